use serde::{Deserialize, Serialize};

/// Named theme colors a category (or resource) may use.
///
/// CSS class names are derived from the token (`bg-<token>-50`,
/// `text-<token>-500`, `icon--color-<token>`), so only this finite set is
/// accepted; anything else falls back to [`ThemeColor::Blue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeColor {
    #[default]
    Blue,
    Purple,
    Green,
    Orange,
    Red,
    Yellow,
    Indigo,
    Pink,
    Teal,
    Gray,
}

impl ThemeColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeColor::Blue => "blue",
            ThemeColor::Purple => "purple",
            ThemeColor::Green => "green",
            ThemeColor::Orange => "orange",
            ThemeColor::Red => "red",
            ThemeColor::Yellow => "yellow",
            ThemeColor::Indigo => "indigo",
            ThemeColor::Pink => "pink",
            ThemeColor::Teal => "teal",
            ThemeColor::Gray => "gray",
        }
    }

    /// Strict lookup; `None` for tokens outside the palette.
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "blue" => Some(ThemeColor::Blue),
            "purple" => Some(ThemeColor::Purple),
            "green" => Some(ThemeColor::Green),
            "orange" => Some(ThemeColor::Orange),
            "red" => Some(ThemeColor::Red),
            "yellow" => Some(ThemeColor::Yellow),
            "indigo" => Some(ThemeColor::Indigo),
            "pink" => Some(ThemeColor::Pink),
            "teal" => Some(ThemeColor::Teal),
            "gray" | "grey" => Some(ThemeColor::Gray),
            _ => None,
        }
    }

    /// Lenient lookup used for category colors.
    pub fn parse_or_default(token: Option<&str>) -> Self {
        token.and_then(Self::parse).unwrap_or_default()
    }

    pub fn all() -> [ThemeColor; 10] {
        [
            ThemeColor::Blue,
            ThemeColor::Purple,
            ThemeColor::Green,
            ThemeColor::Orange,
            ThemeColor::Red,
            ThemeColor::Yellow,
            ThemeColor::Indigo,
            ThemeColor::Pink,
            ThemeColor::Teal,
            ThemeColor::Gray,
        ]
    }

    /// Class hook consumed by the icon stylesheet.
    pub fn icon_class(&self) -> String {
        format!("icon--color-{}", self.as_str())
    }

    pub fn text_class(&self) -> String {
        format!("text-{}-500", self.as_str())
    }

    pub fn soft_bg_class(&self) -> String {
        format!("bg-{}-50", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_tokens() {
        for color in ThemeColor::all() {
            assert_eq!(ThemeColor::parse(color.as_str()), Some(color));
        }
        assert_eq!(ThemeColor::parse(" Green "), Some(ThemeColor::Green));
        assert_eq!(ThemeColor::parse("grey"), Some(ThemeColor::Gray));
    }

    #[test]
    fn test_unknown_falls_back_to_blue() {
        assert_eq!(ThemeColor::parse("#ff0000"), None);
        assert_eq!(ThemeColor::parse_or_default(Some("magenta")), ThemeColor::Blue);
        assert_eq!(ThemeColor::parse_or_default(None), ThemeColor::Blue);
    }

    #[test]
    fn test_class_names() {
        assert_eq!(ThemeColor::Orange.icon_class(), "icon--color-orange");
        assert_eq!(ThemeColor::Orange.text_class(), "text-orange-500");
        assert_eq!(ThemeColor::Purple.soft_bg_class(), "bg-purple-50");
    }
}
