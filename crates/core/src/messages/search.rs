//! Search message and its typed response.

use crate::messages::filters::queries::BooleanQuery;
use crate::messages::is_valid_language_code;
use crate::messages::metadata::{validate_nested_metadata, Metadata};
use crate::validation::{validate_component, Rule, Validatable, ValidationContext};
use serde::Deserialize;

/// Direction applied to the sort metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

/// A search query to send to the remote service.
///
/// Owns an optional [`BooleanQuery`] filter tree plus the scalar request
/// parameters (pagination, sort, highlighting, session token). Pagination
/// and highlight limits are unsigned, so the non-negativity constraints hold
/// by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchMessage {
    searched_text: String,
    searched_languages: Vec<String>,
    search_query: Option<BooleanQuery>,
    sort_metadata: Option<Metadata>,
    sort_direction: SortDirection,
    pagination_size: Option<u32>,
    pagination_location: Option<u32>,
    highlight_regex: Option<String>,
    highlight_limit: Option<u32>,
    session_token: Option<String>,
}

impl SearchMessage {
    pub fn new(searched_text: impl Into<String>) -> Self {
        Self {
            searched_text: searched_text.into(),
            searched_languages: Vec::new(),
            search_query: None,
            sort_metadata: None,
            sort_direction: SortDirection::default(),
            pagination_size: None,
            pagination_location: None,
            highlight_regex: None,
            highlight_limit: None,
            session_token: None,
        }
    }

    /// Languages to filter the search on, as ISO-639-1 codes.
    pub fn with_languages(mut self, languages: Vec<String>) -> Self {
        self.searched_languages = languages;
        self
    }

    pub fn with_query(mut self, query: BooleanQuery) -> Self {
        self.search_query = Some(query);
        self
    }

    /// Sort criteria; without one, results come back sorted by relevancy.
    /// Only the metadata's name and kind matter here.
    pub fn with_sort(mut self, metadata: Metadata, direction: SortDirection) -> Self {
        self.sort_metadata = Some(metadata);
        self.sort_direction = direction;
        self
    }

    /// Pagination: results per page and the page to retrieve.
    pub fn with_pagination(mut self, size: u32, location: u32) -> Self {
        self.pagination_size = Some(size);
        self.pagination_location = Some(location);
        self
    }

    /// Highlighting: the HTML wrapping expression and the maximum text
    /// length the service may highlight.
    pub fn with_highlighting(mut self, regex: impl Into<String>, limit: u32) -> Self {
        self.highlight_regex = Some(regex.into());
        self.highlight_limit = Some(limit);
        self
    }

    /// Session token, required only for secured indices.
    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    pub fn searched_text(&self) -> &str {
        &self.searched_text
    }

    pub fn searched_languages(&self) -> &[String] {
        &self.searched_languages
    }

    pub fn query(&self) -> Option<&BooleanQuery> {
        self.search_query.as_ref()
    }

    pub fn sort_metadata(&self) -> Option<&Metadata> {
        self.sort_metadata.as_ref()
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    pub fn pagination_size(&self) -> Option<u32> {
        self.pagination_size
    }

    pub fn pagination_location(&self) -> Option<u32> {
        self.pagination_location
    }

    pub fn highlight_regex(&self) -> Option<&str> {
        self.highlight_regex.as_deref()
    }

    pub fn highlight_limit(&self) -> Option<u32> {
        self.highlight_limit
    }

    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }
}

impl Validatable for SearchMessage {
    fn rules() -> &'static [Rule<Self>] {
        const RULES: &[Rule<SearchMessage>] = &[Rule {
            path: "searchedText",
            check: |message| !message.searched_text.trim().is_empty(),
            message: "This value should not be blank.",
        }];
        RULES
    }

    fn validate_custom(&self, ctx: &mut ValidationContext) {
        for (index, language) in self.searched_languages.iter().enumerate() {
            if !is_valid_language_code(language) {
                ctx.violate(
                    &format!("searchedLanguages[{index}]"),
                    "This value is not a valid language.",
                );
            }
        }
        if let Some(query) = &self.search_query {
            ctx.nested("searchQuery", |ctx| validate_component(query, ctx));
        }
        if let Some(metadata) = &self.sort_metadata {
            validate_nested_metadata(metadata, "sortMetadata", ctx);
        }
    }
}

/// Typed search response returned by the service.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub total_results: u64,
    #[serde(default)]
    pub page_number: Option<u32>,
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

/// One result entry of a search response.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
    /// Indexed metadata echoed back by the service, kept untyped.
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::filters::clauses::TermClause;
    use crate::validation::Validator;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_blank_searched_text_fails_validation() {
        let message = SearchMessage::new("   ");
        let result = Validator::validate(&message);

        assert_eq!(result.len(), 1);
        assert_eq!(
            result.message_at("searchedText"),
            Some("This value should not be blank.")
        );
    }

    #[test]
    fn test_valid_message_produces_no_violation() {
        let message = SearchMessage::new("rust client")
            .with_languages(vec!["en".to_string(), "fr".to_string()])
            .with_pagination(20, 1)
            .with_highlighting("<b>{}</b>", 250);

        assert!(Validator::validate(&message).is_valid());
    }

    #[test]
    fn test_invalid_language_codes_are_reported_per_index() {
        let message = SearchMessage::new("rust client")
            .with_languages(vec!["en".to_string(), "english".to_string(), "EN".to_string()]);

        let result = Validator::validate(&message);

        assert_eq!(
            result.paths(),
            vec!["searchedLanguages[1]", "searchedLanguages[2]"]
        );
    }

    #[test]
    fn test_query_violations_are_scoped_under_search_query() {
        let mut query = BooleanQuery::new();
        query.add_must(crate::messages::filters::clauses::Clause::from(
            TermClause::new(Metadata::string(""), "x"),
        ));
        let message = SearchMessage::new("rust client").with_query(query);

        let result = Validator::validate(&message);

        assert_eq!(
            result.message_at("searchQuery.must.filterList[0].impliedMetadata.rawName"),
            Some("This value should not be blank.")
        );
    }

    #[test]
    fn test_search_response_deserializes_from_wire_names() {
        let body = r#"{
            "totalResults": 2,
            "pageNumber": 1,
            "pageSize": 20,
            "results": [
                {"reference": "ref-1", "url": "https://example.org/1", "weight": 1.5},
                {"reference": "ref-2", "content": "second", "metadata": {"esST_title": ["x"]}}
            ]
        }"#;

        let response: SearchResponse = serde_json::from_str(body).unwrap();

        assert_eq!(response.total_results, 2);
        assert_eq!(response.results.len(), 2);
        assert_eq!(response.results[0].reference.as_deref(), Some("ref-1"));
        assert_eq!(response.results[1].content.as_deref(), Some("second"));
    }
}
