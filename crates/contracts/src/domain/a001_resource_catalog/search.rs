use super::aggregate::{Catalog, Resource};
use super::error::SearchPatternError;
use super::icon::IconDescriptor;
use super::palette::ThemeColor;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// How the typed query is turned into a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternMode {
    /// Metacharacters are escaped: plain substring search.
    #[default]
    Literal,
    /// The query is used verbatim as a regular expression.
    Raw,
}

impl PatternMode {
    /// Reads the `data-search-mode` attribute value; anything but `raw` is literal.
    pub fn from_attr(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("raw") => PatternMode::Raw,
            _ => PatternMode::Literal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchOptions {
    pub pattern_mode: PatternMode,
}

/// A compiled, non-empty search query. Matching is case-insensitive.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    text: String,
    source: String,
    mode: PatternMode,
    regex: Regex,
}

impl PartialEq for SearchQuery {
    fn eq(&self, other: &Self) -> bool {
        self.mode == other.mode && self.source == other.source
    }
}

impl Eq for SearchQuery {}

impl SearchQuery {
    /// `Ok(None)` when the trimmed input is empty.
    pub fn parse(input: &str, options: SearchOptions) -> Result<Option<Self>, SearchPatternError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let text = trimmed.to_lowercase();

        // Raw patterns keep their case: `\D` and `\d` mean different things.
        let source = match options.pattern_mode {
            PatternMode::Literal => regex::escape(&text),
            PatternMode::Raw => trimmed.to_string(),
        };

        let regex = RegexBuilder::new(&source)
            .case_insensitive(true)
            .build()
            .map_err(|e| SearchPatternError {
                pattern: trimmed.to_string(),
                cause: e.to_string(),
            })?;

        Ok(Some(Self {
            text,
            source,
            mode: options.pattern_mode,
            regex,
        }))
    }

    /// Normalized (trimmed, lower-cased) query text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Identity of the query for re-render decisions.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn mode(&self) -> PatternMode {
        self.mode
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.find_iter(text).any(|m| !m.is_empty())
    }

    /// Name, description or any tag.
    pub fn matches(&self, resource: &Resource) -> bool {
        self.is_match(&resource.name)
            || resource.authored_description().is_some_and(|d| self.is_match(d))
            || resource.tags.iter().any(|tag| self.is_match(tag))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchGroup {
    pub category_id: String,
    pub category_name: String,
    pub color: ThemeColor,
    pub icon: IconDescriptor,
    pub matches: Vec<Resource>,
}

impl SearchGroup {
    pub fn match_label(&self) -> String {
        format!("（匹配 {} 个）", self.matches.len())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchResults {
    /// Catalog order; categories without matches are omitted.
    pub groups: Vec<SearchGroup>,
    pub total_matches: usize,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.total_matches == 0
    }

    pub fn count_label(&self) -> String {
        format!("找到 {} 个相关资源", self.total_matches)
    }
}

pub fn search(catalog: &Catalog, query: &SearchQuery) -> SearchResults {
    let groups: Vec<SearchGroup> = catalog
        .categories()
        .iter()
        .filter_map(|category| {
            let matches: Vec<Resource> = category
                .resources
                .iter()
                .filter(|resource| query.matches(resource))
                .cloned()
                .collect();
            if matches.is_empty() {
                return None;
            }
            Some(SearchGroup {
                category_id: category.id.clone(),
                category_name: category.name.clone(),
                color: category.color,
                icon: category.icon.clone(),
                matches,
            })
        })
        .collect();

    let total_matches = groups.iter().map(|g| g.matches.len()).sum();
    SearchResults {
        groups,
        total_matches,
    }
}

/// A run of display text; `highlighted` runs are wrapped in the highlight span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSegment {
    pub text: String,
    pub highlighted: bool,
}

/// Split `text` around every non-empty match of `query`.
pub fn highlight(text: &str, query: &SearchQuery) -> Vec<TextSegment> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for m in query.regex.find_iter(text).filter(|m| !m.is_empty()) {
        if m.start() > cursor {
            segments.push(TextSegment {
                text: text[cursor..m.start()].to_string(),
                highlighted: false,
            });
        }
        segments.push(TextSegment {
            text: m.as_str().to_string(),
            highlighted: true,
        });
        cursor = m.end();
    }

    if cursor < text.len() || segments.is_empty() {
        segments.push(TextSegment {
            text: text[cursor..].to_string(),
            highlighted: false,
        });
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_json(
            r#"{"categories": [
                {"id": "toolbox", "name": "百宝箱", "resources": [
                    {"name": "JSON Formatter", "description": "格式化与校验", "url": "https://json.cn"},
                    {"name": "Regex101", "url": "https://regex101.com", "tags": ["免费"]}
                ]},
                {"id": "ai", "name": "AI工具", "resources": [
                    {"name": "AI Summary", "description": "文档总结", "url": "https://example.com", "tags": ["文档总结"]}
                ]}
            ]}"#,
        )
        .unwrap()
    }

    fn literal(input: &str) -> SearchQuery {
        SearchQuery::parse(input, SearchOptions::default()).unwrap().unwrap()
    }

    #[test]
    fn test_json_scenario() {
        let catalog = catalog();
        let results = search(&catalog, &literal("  json "));
        assert_eq!(results.total_matches, 1);
        assert_eq!(results.groups.len(), 1);
        assert_eq!(results.groups[0].category_id, "toolbox");
        assert_eq!(results.groups[0].matches[0].name, "JSON Formatter");
        assert_eq!(results.groups[0].match_label(), "（匹配 1 个）");
        assert_eq!(results.count_label(), "找到 1 个相关资源");

        let segments = highlight("JSON Formatter", &literal("json"));
        assert_eq!(
            segments,
            vec![
                TextSegment { text: "JSON".into(), highlighted: true },
                TextSegment { text: " Formatter".into(), highlighted: false },
            ]
        );
    }

    #[test]
    fn test_matches_description_and_tags() {
        let catalog = catalog();
        let results = search(&catalog, &literal("文档"));
        assert_eq!(results.total_matches, 1);
        assert_eq!(results.groups[0].category_id, "ai");

        let results = search(&catalog, &literal("免费"));
        assert_eq!(results.groups[0].matches[0].name, "Regex101");
    }

    #[test]
    fn test_description_placeholder_is_not_searched() {
        let results = search(&catalog(), &literal("暂无描述"));
        assert!(results.is_empty());
    }

    #[test]
    fn test_no_results() {
        let results = search(&catalog(), &literal("nothing here"));
        assert!(results.is_empty());
        assert!(results.groups.is_empty());
    }

    #[test]
    fn test_empty_query_is_none() {
        assert_eq!(SearchQuery::parse("   ", SearchOptions::default()), Ok(None));
    }

    #[test]
    fn test_literal_escapes_metacharacters() {
        let query = literal("c++ (");
        assert!(query.is_match("learn C++ (basics)"));
        assert!(!query.is_match("cpp"));
        assert_eq!(query.as_str(), "c++ (");
    }

    #[test]
    fn test_raw_mode() {
        let raw = SearchOptions { pattern_mode: PatternMode::Raw };
        let query = SearchQuery::parse("^json|regex\\d+", raw).unwrap().unwrap();
        assert!(query.is_match("JSON Formatter"));
        assert!(query.is_match("Regex101"));

        let err = SearchQuery::parse("(unclosed", raw).unwrap_err();
        assert_eq!(err.pattern, "(unclosed");
        assert!(!err.cause.is_empty());

        // literal mode accepts the same input
        assert!(SearchQuery::parse("(unclosed", SearchOptions::default()).is_ok());
    }

    #[test]
    fn test_zero_width_matches_are_skipped() {
        let raw = SearchOptions { pattern_mode: PatternMode::Raw };
        let query = SearchQuery::parse("x*", raw).unwrap().unwrap();
        assert!(!query.is_match("abc"));
        assert_eq!(
            highlight("abc", &query),
            vec![TextSegment { text: "abc".into(), highlighted: false }]
        );
        assert_eq!(
            highlight("axxb", &query),
            vec![
                TextSegment { text: "a".into(), highlighted: false },
                TextSegment { text: "xx".into(), highlighted: true },
                TextSegment { text: "b".into(), highlighted: false },
            ]
        );
    }

    #[test]
    fn test_highlight_every_match() {
        let segments = highlight("Json to JSON", &literal("json"));
        let marked: Vec<_> = segments.iter().filter(|s| s.highlighted).map(|s| s.text.as_str()).collect();
        assert_eq!(marked, vec!["Json", "JSON"]);
        assert_eq!(highlight("", &literal("json")).len(), 1);
    }

    #[test]
    fn test_pattern_mode_attr() {
        assert_eq!(PatternMode::from_attr(Some(" RAW ")), PatternMode::Raw);
        assert_eq!(PatternMode::from_attr(Some("literal")), PatternMode::Literal);
        assert_eq!(PatternMode::from_attr(None), PatternMode::Literal);
    }
}
