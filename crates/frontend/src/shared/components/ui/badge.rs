use contracts::domain::a001_resource_catalog::ThemeColor;
use leptos::prelude::*;

/// Small rounded label tinted with a palette color.
#[component]
pub fn Badge(
    /// Palette color of the badge
    tone: ThemeColor,
    /// Badge content
    children: Children,
    /// Additional CSS classes
    #[prop(optional, into)]
    class: MaybeProp<String>,
) -> impl IntoView {
    let tone_class = format!("bg-{0}-50 text-{0}-600", tone.as_str());
    let additional_class = move || class.get().unwrap_or_default();

    view! {
        <span class=move || format!("px-2 py-0.5 text-xs rounded-full {} {}", tone_class, additional_class())>
            {children()}
        </span>
    }
}

/// Badge color for a resource tag: 免费 green, 付费 orange, otherwise the
/// category color.
pub fn tag_tone(tag: &str, category_color: ThemeColor) -> ThemeColor {
    match tag {
        "免费" => ThemeColor::Green,
        "付费" => ThemeColor::Orange,
        _ => category_color,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_tone() {
        assert_eq!(tag_tone("免费", ThemeColor::Purple), ThemeColor::Green);
        assert_eq!(tag_tone("付费", ThemeColor::Purple), ThemeColor::Orange);
        assert_eq!(tag_tone("开源", ThemeColor::Purple), ThemeColor::Purple);
    }
}
