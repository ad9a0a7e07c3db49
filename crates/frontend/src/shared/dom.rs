//! Page shell contract: fixed element ids, URL fragment and viewport helpers.
//!
//! The static HTML pages own these elements; only the content containers
//! are required, everything else is looked up and skipped when absent.

use contracts::domain::a001_resource_catalog::{PatternMode, SearchOptions};
use thiserror::Error;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

use super::api_utils::DEFAULT_CATALOG_URL;

pub const CONTENT_CONTAINER_ID: &str = "dynamic-resource-container";
pub const SIDEBAR_ID: &str = "category-sidebar";
pub const SEARCH_INPUT_ID: &str = "resource-search";
pub const SEARCH_COUNT_ID: &str = "search-count";
pub const MOBILE_TOGGLE_ID: &str = "mobile-category-btn";
pub const STATS_ID: &str = "resource-stats";
pub const HOME_CONTAINER_ID: &str = "home-resource-container";

pub const CATALOG_URL_ATTR: &str = "data-catalog-url";
pub const SEARCH_MODE_ATTR: &str = "data-search-mode";

pub const MOBILE_BREAKPOINT_PX: f64 = 768.0;
// Gap between the page header and a scrolled-to section.
const SCROLL_GAP_PX: f64 = 20.0;

const SEARCH_COUNT_CLASS: &str =
    "fixed top-4 right-4 bg-primary text-white px-3 py-1 rounded-full text-sm shadow-md z-40";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("容器元素 #{id} 不存在")]
pub struct ContainerMissingError {
    pub id: &'static str,
}

/// Per-page settings read from the content container's data attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryConfig {
    pub catalog_url: String,
    pub search: SearchOptions,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            search: SearchOptions::default(),
        }
    }
}

impl DirectoryConfig {
    pub fn from_attrs(catalog_url: Option<String>, search_mode: Option<String>) -> Self {
        let catalog_url = catalog_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string());
        Self {
            catalog_url,
            search: SearchOptions {
                pattern_mode: PatternMode::from_attr(search_mode.as_deref()),
            },
        }
    }

    pub fn from_container(container: &Element) -> Self {
        Self::from_attrs(
            container.get_attribute(CATALOG_URL_ATTR),
            container.get_attribute(SEARCH_MODE_ATTR),
        )
    }
}

pub fn document() -> Option<Document> {
    web_sys::window()?.document()
}

pub fn element_by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

pub fn html_element_by_id(id: &str) -> Option<HtmlElement> {
    element_by_id(id)?.dyn_into::<HtmlElement>().ok()
}

pub fn require_element(id: &'static str) -> Result<HtmlElement, ContainerMissingError> {
    html_element_by_id(id).ok_or(ContainerMissingError { id })
}

/// First descendant of `#parent_id` matching `selector`.
pub fn child_of(parent_id: &str, selector: &str) -> Option<HtmlElement> {
    element_by_id(parent_id)?
        .query_selector(selector)
        .ok()
        .flatten()?
        .dyn_into::<HtmlElement>()
        .ok()
}

pub fn search_input() -> Option<HtmlInputElement> {
    element_by_id(SEARCH_INPUT_ID)?
        .dyn_into::<HtmlInputElement>()
        .ok()
}

/// Attach a page-lifetime listener to an element the page shell owns.
pub fn listen<F>(target: &Element, event: &str, handler: F)
where
    F: FnMut(web_sys::Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::Event)>);
    if let Err(err) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        log::warn!("Failed to attach {} listener: {:?}", event, err);
    }
    // The shell elements live as long as the page.
    closure.forget();
}

// ----------------------------------------------------------------------------
// URL fragment
// ----------------------------------------------------------------------------

/// `location.hash` without the leading `#`; `None` when empty.
pub fn current_fragment() -> Option<String> {
    let hash = web_sys::window()?.location().hash().ok()?;
    let fragment = hash.trim_start_matches('#');
    (!fragment.is_empty()).then(|| fragment.to_string())
}

/// Point the URL at the category without adding a history entry.
pub fn replace_fragment(category_id: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(history) = window.history() else {
        return;
    };
    let url = fragment_url(category_id);
    if let Err(err) = history.replace_state_with_url(&JsValue::NULL, "", Some(&url)) {
        log::warn!("history.replaceState failed: {:?}", err);
    }
}

pub fn fragment_url(category_id: &str) -> String {
    format!("#{}", urlencoding::encode(category_id))
}

// ----------------------------------------------------------------------------
// Viewport
// ----------------------------------------------------------------------------

pub fn is_mobile_viewport() -> bool {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|width| width.as_f64())
        .map(|width| width < MOBILE_BREAKPOINT_PX)
        .unwrap_or(false)
}

/// Smooth-scroll so the section sits just below the page header.
pub fn scroll_to_section(section_id: &str) {
    let (Some(window), Some(section)) = (web_sys::window(), html_element_by_id(section_id)) else {
        return;
    };

    let header_height = document()
        .and_then(|d| d.query_selector("header").ok().flatten())
        .and_then(|h| h.dyn_into::<HtmlElement>().ok())
        .map(|h| h.offset_height() as f64)
        .unwrap_or(0.0);

    let top = section.get_bounding_client_rect().top() + window.scroll_y().unwrap_or(0.0)
        - header_height
        - SCROLL_GAP_PX;

    let options = web_sys::ScrollToOptions::new();
    options.set_top(top.max(0.0));
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

/// Close the overlay after a category pick; no-op on desktop.
pub fn collapse_mobile_sidebar() {
    if element_by_id(MOBILE_TOGGLE_ID).is_none() || !is_mobile_viewport() {
        return;
    }
    if let Some(sidebar) = element_by_id(SIDEBAR_ID) {
        let _ = sidebar.class_list().add_1("hidden");
    }
    set_toggle_icon("fa-bars");
}

fn set_toggle_icon(name: &str) {
    let Some(icon) = element_by_id(MOBILE_TOGGLE_ID)
        .and_then(|btn| btn.query_selector("i").ok().flatten())
    else {
        return;
    };
    let classes = icon.class_list();
    let _ = classes.remove_2("fa-bars", "fa-times");
    let _ = classes.add_1(name);
}

// ----------------------------------------------------------------------------
// Search input / counter
// ----------------------------------------------------------------------------

pub fn reset_search_input() {
    if let Some(input) = search_input() {
        input.set_value("");
    }
}

/// Show `text` in the counter, or hide it with `None`.
pub fn set_search_count(text: Option<&str>) {
    let Some(counter) = element_by_id(SEARCH_COUNT_ID) else {
        return;
    };
    match text {
        Some(text) => {
            counter.set_text_content(Some(text));
            counter.set_class_name(SEARCH_COUNT_CLASS);
        }
        None => {
            let _ = counter.class_list().add_1("hidden");
        }
    }
}

pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_config_defaults() {
        let config = DirectoryConfig::from_attrs(None, None);
        assert_eq!(config, DirectoryConfig::default());
        assert_eq!(config.catalog_url, DEFAULT_CATALOG_URL);

        let config = DirectoryConfig::from_attrs(Some("  ".into()), Some("literal".into()));
        assert_eq!(config.catalog_url, DEFAULT_CATALOG_URL);
        assert_eq!(config.search.pattern_mode, PatternMode::Literal);
    }

    #[test]
    fn test_directory_config_overrides() {
        let config = DirectoryConfig::from_attrs(
            Some("/static/catalog.json".into()),
            Some("raw".into()),
        );
        assert_eq!(config.catalog_url, "/static/catalog.json");
        assert_eq!(config.search.pattern_mode, PatternMode::Raw);
    }

    #[test]
    fn test_fragment_url_encodes() {
        assert_eq!(fragment_url("toolbox"), "#toolbox");
        assert_eq!(fragment_url("书签"), "#%E4%B9%A6%E7%AD%BE");
    }
}
