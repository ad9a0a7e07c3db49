//! Icon descriptors and their normalization into render-ready markup.
//!
//! Catalog authors describe icons in several shapes: inline `<svg>` markup,
//! an `<img>` tag or a bare image path, a Font Awesome `<i>` tag or just a
//! `fa-*` class token. The shape is sniffed once when the catalog is loaded
//! ([`IconDescriptor::classify`]); rendering then only has to decorate the
//! markup ([`normalize`]).
//!
//! Decoration is additive: classes are merged into an existing `class`
//! attribute, styles are appended to an existing `style` attribute, and no
//! authored attribute is ever removed or rewritten.

use super::palette::ThemeColor;
use std::fmt;

const FONT_ICON_PREFIX: &str = "fa-";
const IMAGE_EXTENSIONS: [&str; 6] = [".svg", ".png", ".jpg", ".jpeg", ".gif", ".webp"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Authored `<img ...>` tag.
    Markup(String),
    /// Bare path or URL of an image file.
    Url(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontGlyph {
    /// Authored `<i class="fa ...">` tag.
    Markup(String),
    /// Shorthand class token such as `fa-wrench`.
    Token(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum IconDescriptor {
    /// Inline vector markup, always carrying its closing tag.
    Vector(String),
    Image(ImageSource),
    FontGlyph(FontGlyph),
    #[default]
    None,
}

impl IconDescriptor {
    /// Sniff the raw JSON value. Priority: vector markup, image, font icon,
    /// then nothing.
    pub fn classify(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return IconDescriptor::None;
        };
        let lower = raw.to_ascii_lowercase();

        if find_open_tag(&lower, "svg").is_some() {
            let mut markup = raw.to_string();
            if !lower.contains("</svg>") {
                markup.push_str("</svg>");
            }
            return IconDescriptor::Vector(markup);
        }
        if find_open_tag(&lower, "img").is_some() {
            return IconDescriptor::Image(ImageSource::Markup(raw.to_string()));
        }
        if is_image_path(&lower) {
            return IconDescriptor::Image(ImageSource::Url(raw.to_string()));
        }
        if find_open_tag(&lower, "i").is_some() {
            return IconDescriptor::FontGlyph(FontGlyph::Markup(raw.to_string()));
        }
        if is_font_token(raw) {
            return IconDescriptor::FontGlyph(FontGlyph::Token(raw.to_string()));
        }
        IconDescriptor::None
    }

    pub fn is_none(&self) -> bool {
        matches!(self, IconDescriptor::None)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            IconDescriptor::Vector(_) => "vector",
            IconDescriptor::Image(_) => "image",
            IconDescriptor::FontGlyph(_) => "font",
            IconDescriptor::None => "none",
        }
    }
}

/// Glyph rendered when an icon is absent or unrecognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultGlyph {
    Link,
    Grid,
}

impl DefaultGlyph {
    fn class(&self) -> &'static str {
        match self {
            DefaultGlyph::Link => "fa-link",
            DefaultGlyph::Grid => "fa-th-large",
        }
    }
}

/// Where the icon is being drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconContext {
    /// Explicit pixel size. When set, an inline `width`/`height` style is
    /// added, which wins over authored `width`/`height` attributes.
    pub display_size: Option<u32>,
    pub fallback: DefaultGlyph,
}

impl IconContext {
    pub const SIDEBAR_PX: u32 = 18;
    pub const CARD_PX: u32 = 20;
    pub const HEADER_PX: u32 = 28;

    pub fn resource() -> Self {
        Self {
            display_size: None,
            fallback: DefaultGlyph::Link,
        }
    }

    pub fn category() -> Self {
        Self {
            display_size: None,
            fallback: DefaultGlyph::Grid,
        }
    }

    pub fn with_size(mut self, px: u32) -> Self {
        self.display_size = Some(px);
        self
    }
}

/// Render-ready icon markup. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconFragment(String);

impl IconFragment {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for IconFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Decorate a classified icon for display. Total: every descriptor yields
/// a non-empty fragment.
pub fn normalize(descriptor: &IconDescriptor, color: ThemeColor, ctx: IconContext) -> IconFragment {
    let color_class = color.icon_class();
    let size_style = ctx
        .display_size
        .map(|px| format!("width:{px}px;height:{px}px;"))
        .unwrap_or_default();

    let html = match descriptor {
        IconDescriptor::Vector(markup) => augment_tag(
            markup,
            "svg",
            &["icon", "icon--svg", &color_class],
            &size_style,
        ),
        IconDescriptor::Image(source) => {
            let markup = match source {
                ImageSource::Markup(markup) => markup.clone(),
                ImageSource::Url(url) => format!(r#"<img src="{}" alt="">"#, escape_attr(url)),
            };
            augment_tag(
                &markup,
                "img",
                &["icon", "icon--img"],
                &format!("object-fit: contain;{size_style}"),
            )
        }
        IconDescriptor::FontGlyph(FontGlyph::Token(token)) => {
            font_icon(token, color, &color_class, ctx.display_size)
        }
        IconDescriptor::FontGlyph(FontGlyph::Markup(markup)) => augment_tag(
            markup,
            "i",
            &[&color_class, &color.text_class()],
            &font_size_style(ctx.display_size),
        ),
        IconDescriptor::None => {
            font_icon(ctx.fallback.class(), color, &color_class, ctx.display_size)
        }
    };

    IconFragment(html)
}

fn font_icon(token: &str, color: ThemeColor, color_class: &str, size: Option<u32>) -> String {
    let style = font_size_style(size);
    let style_attr = if style.is_empty() {
        String::new()
    } else {
        format!(r#" style="{style}""#)
    };
    format!(
        r#"<i class="fa {} text-2xl {} {}"{}></i>"#,
        escape_attr(token),
        color_class,
        color.text_class(),
        style_attr
    )
}

fn font_size_style(size: Option<u32>) -> String {
    size.map(|px| format!("font-size:{px}px;")).unwrap_or_default()
}

fn is_image_path(lower: &str) -> bool {
    if lower.contains('<') || lower.chars().any(char::is_whitespace) {
        return false;
    }
    let path = lower.split(['?', '#']).next().unwrap_or(lower);
    IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

fn is_font_token(raw: &str) -> bool {
    raw.starts_with(FONT_ICON_PREFIX)
        && raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ' ')
}

/// Byte range of the first `<tag ...>` opening tag: from `<` up to and
/// including `>`, or to the end of input when the tag is never closed.
/// `lower` must be ASCII-lowercased so offsets match the original.
fn find_open_tag(lower: &str, tag: &str) -> Option<(usize, usize)> {
    let needle = format!("<{tag}");
    let mut from = 0;
    while let Some(pos) = lower[from..].find(&needle) {
        let start = from + pos;
        let after = start + needle.len();
        let boundary = lower[after..].chars().next();
        if matches!(boundary, None | Some('>') | Some('/')) || boundary.is_some_and(char::is_whitespace) {
            return Some((start, tag_end(lower, after)));
        }
        from = after;
    }
    None
}

fn tag_end(src: &str, from: usize) -> usize {
    let mut quote: Option<char> = None;
    for (offset, c) in src[from..].char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(c),
            (None, '>') => return from + offset + 1,
            _ => {}
        }
    }
    src.len()
}

#[derive(Debug, Clone, Copy)]
struct AttrValue {
    start: usize,
    end: usize,
    quoted: bool,
}

/// Locate `name="value"` inside an opening tag (`tag_src` is lowercased).
/// Attributes are walked one by one, so text inside another attribute's
/// quoted value is never taken for an attribute name.
fn find_attr(tag_src: &str, name: &str) -> Option<AttrValue> {
    let bytes = tag_src.as_bytes();
    let len = bytes.len();

    // skip `<tag`
    let mut i = 1;
    while i < len && !is_attr_delimiter(bytes[i]) {
        i += 1;
    }

    loop {
        while i < len && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/') {
            i += 1;
        }
        if i >= len || bytes[i] == b'>' {
            return None;
        }

        let name_start = i;
        while i < len && !is_attr_delimiter(bytes[i]) && bytes[i] != b'=' {
            i += 1;
        }
        let attr_name = &tag_src[name_start..i];

        while i < len && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= len || bytes[i] != b'=' {
            // boolean attribute
            continue;
        }
        i += 1;
        while i < len && bytes[i].is_ascii_whitespace() {
            i += 1;
        }

        let value = match bytes.get(i) {
            Some(&q) if q == b'"' || q == b'\'' => {
                let start = i + 1;
                let end = tag_src[start..]
                    .find(q as char)
                    .map(|p| start + p)
                    .unwrap_or(len);
                i = (end + 1).min(len);
                AttrValue {
                    start,
                    end,
                    quoted: true,
                }
            }
            _ => {
                let start = i;
                while i < len && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                    i += 1;
                }
                AttrValue {
                    start,
                    end: i,
                    quoted: false,
                }
            }
        };

        if attr_name == name {
            return Some(value);
        }
    }
}

fn is_attr_delimiter(b: u8) -> bool {
    b.is_ascii_whitespace() || b == b'>' || b == b'/'
}

/// Merge classes and an inline style into the first `<tag>` of `markup`.
fn augment_tag(markup: &str, tag: &str, classes: &[&str], style: &str) -> String {
    let with_classes = merge_attr(markup, tag, "class", |existing| {
        let present: Vec<&str> = existing.split_whitespace().collect();
        let missing: Vec<&str> = classes
            .iter()
            .copied()
            .filter(|c| !c.is_empty() && !present.contains(c))
            .collect();
        if missing.is_empty() {
            None
        } else if existing.trim().is_empty() {
            Some(missing.join(" "))
        } else {
            Some(format!("{} {}", existing.trim_end(), missing.join(" ")))
        }
    });

    if style.is_empty() {
        return with_classes;
    }

    merge_attr(&with_classes, tag, "style", |existing| {
        let existing = existing.trim_end();
        if existing.is_empty() {
            Some(style.to_string())
        } else if existing.ends_with(';') {
            Some(format!("{existing} {style}"))
        } else {
            Some(format!("{existing}; {style}"))
        }
    })
}

/// Rewrite (or add) one attribute of the first `<tag>`; `merge` receives
/// the current value (empty when absent) and returns the new one, or
/// `None` to leave the markup as is.
fn merge_attr(markup: &str, tag: &str, name: &str, merge: impl FnOnce(&str) -> Option<String>) -> String {
    let lower = markup.to_ascii_lowercase();
    let Some((tag_start, tag_end)) = find_open_tag(&lower, tag) else {
        return markup.to_string();
    };

    match find_attr(&lower[tag_start..tag_end], name) {
        Some(attr) => {
            let start = tag_start + attr.start;
            let end = tag_start + attr.end;
            let Some(value) = merge(&markup[start..end]) else {
                return markup.to_string();
            };
            if attr.quoted {
                format!("{}{}{}", &markup[..start], value, &markup[end..])
            } else {
                format!("{}\"{}\"{}", &markup[..start], escape_attr(&value), &markup[end..])
            }
        }
        None => {
            let Some(value) = merge("") else {
                return markup.to_string();
            };
            let insert_at = tag_start + 1 + tag.len();
            format!(
                "{} {}=\"{}\"{}",
                &markup[..insert_at],
                name,
                escape_attr(&value),
                &markup[insert_at..]
            )
        }
    }
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SVG: &str = r#"<svg width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="currentColor"><path d="M4 4h16"/></svg>"#;

    fn render(raw: Option<&str>) -> String {
        normalize(
            &IconDescriptor::classify(raw),
            ThemeColor::Green,
            IconContext::resource(),
        )
        .into_string()
    }

    #[test]
    fn test_normalize_is_total() {
        let inputs = [
            None,
            Some(""),
            Some("fa-star"),
            Some(SVG),
            Some(r#"<svg viewBox="0 0 24 24"><path d="M1 1"/>"#),
            Some("<img src=x>"),
            Some("garbage"),
        ];
        for input in inputs {
            for ctx in [IconContext::resource(), IconContext::category().with_size(18)] {
                let fragment = normalize(&IconDescriptor::classify(input), ThemeColor::Blue, ctx);
                assert!(!fragment.as_str().is_empty(), "empty fragment for {input:?}");
            }
        }
    }

    #[test]
    fn test_classify_priority() {
        assert!(matches!(IconDescriptor::classify(Some(SVG)), IconDescriptor::Vector(_)));
        // vector markup wins even if an <img> is embedded inside it
        let mixed = r#"<svg><image href="a.png"/><img src="b.png"></svg>"#;
        assert!(matches!(IconDescriptor::classify(Some(mixed)), IconDescriptor::Vector(_)));
        assert_eq!(
            IconDescriptor::classify(Some("<img src=\"a.png\">")),
            IconDescriptor::Image(ImageSource::Markup("<img src=\"a.png\">".into()))
        );
        assert_eq!(
            IconDescriptor::classify(Some("/assets/img/logo.PNG")),
            IconDescriptor::Image(ImageSource::Url("/assets/img/logo.PNG".into()))
        );
        assert_eq!(
            IconDescriptor::classify(Some(r#"<i class="fa fa-wrench"></i>"#)),
            IconDescriptor::FontGlyph(FontGlyph::Markup(r#"<i class="fa fa-wrench"></i>"#.into()))
        );
        assert_eq!(
            IconDescriptor::classify(Some(" fa-star ")),
            IconDescriptor::FontGlyph(FontGlyph::Token("fa-star".into()))
        );
        assert_eq!(IconDescriptor::classify(Some("<img-ish>")), IconDescriptor::None);
        assert_eq!(IconDescriptor::classify(Some("   ")), IconDescriptor::None);
    }

    #[test]
    fn test_unclosed_svg_is_closed_once() {
        let raw = r#"<svg viewBox="0 0 24 24"><path d="M1 1"/>"#;
        let IconDescriptor::Vector(markup) = IconDescriptor::classify(Some(raw)) else {
            panic!("expected vector");
        };
        assert!(markup.ends_with("</svg>"));
        assert_eq!(markup.matches("</svg>").count(), 1);

        let IconDescriptor::Vector(closed) = IconDescriptor::classify(Some(SVG)) else {
            panic!("expected vector");
        };
        assert_eq!(closed, SVG);
    }

    #[test]
    fn test_svg_keeps_authored_attributes() {
        let html = render(Some(SVG));
        assert!(html.starts_with(r#"<svg class="icon icon--svg icon--color-green" width="24""#));
        for attr in [r#"width="24""#, r#"height="24""#, r#"fill="none""#, r#"stroke="currentColor""#] {
            assert!(html.contains(attr), "lost {attr}");
        }
        assert!(!html.contains("style="));
    }

    #[test]
    fn test_svg_class_is_merged_not_replaced() {
        let raw = r#"<svg class="lucide lucide-bot" width="16"><path d=""/></svg>"#;
        let html = render(Some(raw));
        assert!(html.contains(r#"class="lucide lucide-bot icon icon--svg icon--color-green""#));
        assert_eq!(html.matches("class=").count(), 1);
    }

    #[test]
    fn test_display_size_adds_style() {
        let descriptor = IconDescriptor::classify(Some(SVG));
        let html = normalize(&descriptor, ThemeColor::Blue, IconContext::resource().with_size(28)).into_string();
        assert!(html.contains(r#"style="width:28px;height:28px;""#));
        assert!(html.contains(r#"width="24""#));

        let styled = r#"<svg style="color:red" viewBox="0 0 1 1"></svg>"#;
        let descriptor = IconDescriptor::classify(Some(styled));
        let html = normalize(&descriptor, ThemeColor::Blue, IconContext::resource().with_size(18)).into_string();
        assert!(html.contains(r#"style="color:red; width:18px;height:18px;""#));
        assert_eq!(html.matches("style=").count(), 1);
    }

    #[test]
    fn test_img_keeps_src_and_gets_sizing_class() {
        let html = render(Some(r#"<img src="/a.png" alt="logo" class="rounded">"#));
        assert!(html.contains(r#"src="/a.png""#));
        assert!(html.contains(r#"alt="logo""#));
        assert!(html.contains(r#"class="rounded icon icon--img""#));
        assert!(html.contains("object-fit: contain;"));

        let html = render(Some("<img src=x>"));
        assert_eq!(html, r#"<img style="object-fit: contain;" class="icon icon--img" src=x>"#);
    }

    #[test]
    fn test_image_path_becomes_img_tag() {
        let html = render(Some("/img/a\"b.png"));
        assert!(html.starts_with(r#"<img style="object-fit: contain;" class="icon icon--img""#));
        assert!(html.contains(r#"src="/img/a&quot;b.png""#));
    }

    #[test]
    fn test_font_token_and_markup() {
        assert_eq!(
            render(Some("fa-star")),
            r#"<i class="fa fa-star text-2xl icon--color-green text-green-500"></i>"#
        );
        let html = render(Some(r#"<i class="fa fa-wrench" title="tools"></i>"#));
        assert_eq!(
            html,
            r#"<i class="fa fa-wrench icon--color-green text-green-500" title="tools"></i>"#
        );
    }

    #[test]
    fn test_default_glyph_depends_on_context() {
        let link = normalize(&IconDescriptor::None, ThemeColor::Gray, IconContext::resource());
        assert!(link.as_str().contains("fa-link"));
        assert!(link.as_str().contains("icon--color-gray"));
        let grid = normalize(&IconDescriptor::None, ThemeColor::Gray, IconContext::category());
        assert!(grid.as_str().contains("fa-th-large"));
        assert_eq!(render(Some("garbage")), render(None));
    }

    #[test]
    fn test_attribute_text_inside_quoted_value_is_ignored() {
        let raw = r#"<svg aria-label="a class=x" class="own"><path d=""/></svg>"#;
        let html = normalize(&IconDescriptor::classify(Some(raw)), ThemeColor::Blue, IconContext::resource())
            .into_string();
        assert_eq!(
            html,
            r#"<svg aria-label="a class=x" class="own icon icon--svg icon--color-blue"><path d=""/></svg>"#
        );

        let raw = r#"<img alt='style="x"' src="/a.png" style="border:0">"#;
        let html = render(Some(raw));
        assert!(html.contains(r#"alt='style="x"'"#));
        assert!(html.contains(r#"style="border:0; object-fit: contain;""#));
    }

    #[test]
    fn test_unquoted_attribute_is_requoted() {
        let html = render(Some("<img src=x class=round>"));
        assert!(html.contains(r#"class="round icon icon--img""#));
    }
}
