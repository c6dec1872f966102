//! Wire request payloads sent to the service.
//!
//! These structs are the last typed stop before serialization: message
//! converters fold the converted component fragments and the connection
//! settings into them, and the transporter posts them as JSON.

use serde::Serialize;
use serde_json::Value;

/// Sort parameters as the service expects them.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SortParameters {
    pub field: String,
    pub direction: String,
}

/// Assembled search request.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub api_key: String,
    pub database: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_regex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortParameters>,
    /// Converted filter-query fragment, e.g. `{"bool": {"must": [...]}}`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<Value>,
}

/// Assembled web content indexing request.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IndexWebContentRequest {
    pub api_key: String,
    pub database: String,
    pub document_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_language: Option<String>,
    #[serde(rename = "documentURI")]
    pub document_uri: String,
    pub document_content: String,
    /// Merged metadata fragments, keyed by wire field name
    #[serde(skip_serializing_if = "serde_json::Map::is_empty")]
    pub metadata: serde_json::Map<String, Value>,
}

/// Assembled index item deletion request.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteItemRequest {
    pub api_key: String,
    pub database: String,
    pub document_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_absent_search_fields_are_omitted_from_the_wire() {
        let request = SearchRequest {
            api_key: "key".to_string(),
            database: "DEMO".to_string(),
            text: "rust".to_string(),
            languages: None,
            page_number: None,
            page_size: None,
            highlight_regex: None,
            highlight_limit: None,
            session_token: None,
            sort: None,
            query: None,
        };

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({"apiKey": "key", "database": "DEMO", "text": "rust"})
        );
    }

    #[test]
    fn test_document_uri_uses_the_service_spelling() {
        let request = IndexWebContentRequest {
            api_key: "key".to_string(),
            database: "DEMO".to_string(),
            document_id: "doc-1".to_string(),
            document_language: None,
            document_uri: "https://example.org/doc-1".to_string(),
            document_content: "body".to_string(),
            metadata: serde_json::Map::new(),
        };

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({
                "apiKey": "key",
                "database": "DEMO",
                "documentId": "doc-1",
                "documentURI": "https://example.org/doc-1",
                "documentContent": "body"
            })
        );
    }
}
