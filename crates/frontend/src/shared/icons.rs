use leptos::prelude::*;

/// Font Awesome glyph class for a UI icon name. The page shell loads FA 4.
pub fn glyph_class(name: &str) -> &'static str {
    match name {
        "copy" => "fa-copy",
        "check" => "fa-check",
        "external-link" => "fa-external-link",
        "database" => "fa-database",
        "search" => "fa-search",
        "folder-open" => "fa-folder-open-o",
        "alert" => "fa-exclamation-circle",
        "arrow-right" => "fa-arrow-right",
        "refresh" => "fa-refresh",
        _ => "fa-circle-o",
    }
}

/// UI icon as an `<i>` element; `class` adds size/color utilities.
pub fn icon(name: &str, class: &str) -> AnyView {
    let class = format!("fa {} {}", glyph_class(name), class);
    view! { <i class=class.trim_end().to_string() aria-hidden="true"></i> }.into_any()
}
