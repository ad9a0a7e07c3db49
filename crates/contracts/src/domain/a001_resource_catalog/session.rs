use super::aggregate::{Catalog, Category, ALL_TAG_ID, DEFAULT_CATEGORY_ID};
use super::error::SearchPatternError;
use super::search::{search, SearchOptions, SearchQuery, SearchResults};
use std::collections::HashMap;

/// Outcome of a category selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Unchanged,
    Rerender,
}

/// Outcome of a search input change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryChange {
    /// Empty input: back to the active category.
    Cleared,
    Active,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum SearchState {
    #[default]
    Idle,
    Active(SearchQuery),
    Invalid(SearchPatternError),
}

/// What the content container currently shows. Two equal keys render the
/// same view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentKey {
    Category(String),
    Search(SearchQuery),
    PatternError(SearchPatternError),
}

/// Per-page browsing state: active category, per-category tag filter and
/// the search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserSession {
    active_category_id: String,
    tag_filters: HashMap<String, String>,
    search: SearchState,
    options: SearchOptions,
}

impl BrowserSession {
    /// Initial state for a freshly loaded catalog. `fragment` is the raw URL
    /// hash (with or without `#`, possibly percent-encoded).
    pub fn resolve(catalog: &Catalog, fragment: Option<&str>) -> Self {
        let requested = fragment.map(decode_fragment).filter(|id| catalog.contains(id));
        let active_category_id = requested
            .or_else(|| catalog.first().map(|c| c.id.clone()))
            .unwrap_or_else(|| DEFAULT_CATEGORY_ID.to_string());

        Self {
            active_category_id,
            tag_filters: HashMap::new(),
            search: SearchState::Idle,
            options: SearchOptions::default(),
        }
    }

    pub fn with_search_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn active_category_id(&self) -> &str {
        &self.active_category_id
    }

    pub fn active_category<'a>(&self, catalog: &'a Catalog) -> Option<&'a Category> {
        catalog.category(&self.active_category_id)
    }

    pub fn select_category(&mut self, id: &str) -> Transition {
        if id == self.active_category_id && !self.is_searching() {
            return Transition::Unchanged;
        }
        self.active_category_id = id.to_string();
        self.tag_filters.remove(id);
        self.search = SearchState::Idle;
        Transition::Rerender
    }

    /// `hashchange`: only categories that exist are selected.
    pub fn follow_fragment(&mut self, catalog: &Catalog, fragment: &str) -> Transition {
        let id = decode_fragment(fragment);
        if !catalog.contains(&id) {
            return Transition::Unchanged;
        }
        self.select_category(&id)
    }

    pub fn active_tag(&self, category_id: &str) -> &str {
        self.tag_filters
            .get(category_id)
            .map(String::as_str)
            .unwrap_or(ALL_TAG_ID)
    }

    /// Single-select tag filter. `false` when the tag cannot be selected
    /// (unknown category, undeclared tag, or no resource carries it).
    pub fn select_tag(&mut self, catalog: &Catalog, category_id: &str, tag_id: &str) -> bool {
        let Some(category) = catalog.category(category_id) else {
            return false;
        };
        if !super::filter::is_tag_selectable(category, tag_id) {
            return false;
        }
        if tag_id == ALL_TAG_ID {
            self.tag_filters.remove(category_id);
        } else {
            self.tag_filters
                .insert(category_id.to_string(), tag_id.to_string());
        }
        true
    }

    /// Apply the search input. An invalid pattern is kept in the session so
    /// the content can show it, and is also returned.
    pub fn set_query(&mut self, input: &str) -> Result<QueryChange, SearchPatternError> {
        match SearchQuery::parse(input, self.options) {
            Ok(None) => {
                self.search = SearchState::Idle;
                Ok(QueryChange::Cleared)
            }
            Ok(Some(query)) => {
                self.search = SearchState::Active(query);
                Ok(QueryChange::Active)
            }
            Err(err) => {
                self.search = SearchState::Invalid(err.clone());
                Err(err)
            }
        }
    }

    pub fn clear_search(&mut self) {
        self.search = SearchState::Idle;
    }

    pub fn query(&self) -> Option<&SearchQuery> {
        match &self.search {
            SearchState::Active(query) => Some(query),
            _ => None,
        }
    }

    pub fn is_searching(&self) -> bool {
        !matches!(self.search, SearchState::Idle)
    }

    /// Results of the active query, `None` outside search mode.
    pub fn results(&self, catalog: &Catalog) -> Option<SearchResults> {
        self.query().map(|query| search(catalog, query))
    }

    pub fn content_key(&self) -> ContentKey {
        match &self.search {
            SearchState::Idle => ContentKey::Category(self.active_category_id.clone()),
            SearchState::Active(query) => ContentKey::Search(query.clone()),
            SearchState::Invalid(err) => ContentKey::PatternError(err.clone()),
        }
    }
}

/// `#%E5%B7%A5%E5%85%B7 ` -> `工具`. Undecodable input is used as is.
pub fn decode_fragment(raw: &str) -> String {
    let raw = raw.trim().trim_start_matches('#');
    urlencoding::decode(raw)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| raw.to_string())
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_resource_catalog::search::PatternMode;

    fn catalog() -> Catalog {
        Catalog::from_json(
            r#"{"categories": [
                {"id": "toolbox", "name": "百宝箱", "resources": [
                    {"name": "JSON Formatter", "url": "https://json.cn", "tags": ["免费"]}
                ], "tags": [{"id": "免费", "name": "免费"}, {"id": "付费", "name": "付费"}]},
                {"id": "ai", "name": "AI工具", "resources": [
                    {"name": "AI Summary", "url": "https://example.com"}
                ]},
                {"id": "书签", "name": "书签"}
            ]}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_resolve_fragment() {
        let catalog = catalog();
        assert_eq!(BrowserSession::resolve(&catalog, Some("#ai")).active_category_id(), "ai");
        assert_eq!(
            BrowserSession::resolve(&catalog, Some("%E4%B9%A6%E7%AD%BE")).active_category_id(),
            "书签"
        );
        assert_eq!(
            BrowserSession::resolve(&catalog, Some("#missing")).active_category_id(),
            "toolbox"
        );
        assert_eq!(BrowserSession::resolve(&catalog, None).active_category_id(), "toolbox");
    }

    #[test]
    fn test_resolve_empty_catalog() {
        let empty = Catalog::default();
        let session = BrowserSession::resolve(&empty, Some("ai"));
        assert_eq!(session.active_category_id(), DEFAULT_CATEGORY_ID);
        assert!(session.active_category(&empty).is_none());
    }

    #[test]
    fn test_select_category_is_idempotent() {
        let catalog = catalog();
        let mut session = BrowserSession::resolve(&catalog, None);
        assert_eq!(session.select_category("ai"), Transition::Rerender);
        assert_eq!(session.select_category("ai"), Transition::Unchanged);
        assert_eq!(session.content_key(), ContentKey::Category("ai".into()));
    }

    #[test]
    fn test_select_category_clears_search_and_filter() {
        let catalog = catalog();
        let mut session = BrowserSession::resolve(&catalog, None);
        assert!(session.select_tag(&catalog, "toolbox", "免费"));
        assert_eq!(session.active_tag("toolbox"), "免费");

        session.set_query("json").unwrap();
        assert!(session.is_searching());
        // same id, but search mode forces a re-render
        assert_eq!(session.select_category("toolbox"), Transition::Rerender);
        assert!(!session.is_searching());
        assert_eq!(session.active_tag("toolbox"), ALL_TAG_ID);
    }

    #[test]
    fn test_tag_filters_are_per_category() {
        let catalog = catalog();
        let mut session = BrowserSession::resolve(&catalog, None);
        assert!(session.select_tag(&catalog, "toolbox", "免费"));
        assert_eq!(session.active_tag("ai"), ALL_TAG_ID);
        assert!(!session.select_tag(&catalog, "toolbox", "付费"));
        assert_eq!(session.active_tag("toolbox"), "免费");
        assert!(session.select_tag(&catalog, "toolbox", ALL_TAG_ID));
        assert_eq!(session.active_tag("toolbox"), ALL_TAG_ID);
        assert!(!session.select_tag(&catalog, "missing", ALL_TAG_ID));
    }

    #[test]
    fn test_set_query() {
        let catalog = catalog();
        let mut session = BrowserSession::resolve(&catalog, None);

        assert_eq!(session.set_query("  JSON "), Ok(QueryChange::Active));
        assert_eq!(session.query().unwrap().as_str(), "json");
        let results = session.results(&catalog).unwrap();
        assert_eq!(results.total_matches, 1);
        assert_eq!(results.groups[0].category_id, "toolbox");

        assert_eq!(session.set_query(""), Ok(QueryChange::Cleared));
        assert!(session.results(&catalog).is_none());
        assert_eq!(session.content_key(), ContentKey::Category("toolbox".into()));
    }

    #[test]
    fn test_equal_queries_share_content_key() {
        let catalog = catalog();
        let mut session = BrowserSession::resolve(&catalog, None);
        session.set_query("json").unwrap();
        let first = session.content_key();
        session.set_query(" JSON").unwrap();
        assert_eq!(session.content_key(), first);
    }

    #[test]
    fn test_invalid_raw_pattern() {
        let catalog = catalog();
        let mut session = BrowserSession::resolve(&catalog, None).with_search_options(SearchOptions {
            pattern_mode: PatternMode::Raw,
        });
        let err = session.set_query("[a-").unwrap_err();
        assert!(session.is_searching());
        assert_eq!(session.content_key(), ContentKey::PatternError(err));
        assert!(session.results(&catalog).is_none());
    }

    #[test]
    fn test_follow_fragment() {
        let catalog = catalog();
        let mut session = BrowserSession::resolve(&catalog, None);
        assert_eq!(session.follow_fragment(&catalog, "#nope"), Transition::Unchanged);
        assert_eq!(session.active_category_id(), "toolbox");
        assert_eq!(session.follow_fragment(&catalog, "#ai"), Transition::Rerender);
        assert_eq!(session.active_category_id(), "ai");
    }

    #[test]
    fn test_decode_fragment() {
        assert_eq!(decode_fragment("#%E5%B7%A5%E5%85%B7 "), "工具");
        assert_eq!(decode_fragment("#%zz"), "%zz");
        assert_eq!(decode_fragment(""), "");
    }
}
