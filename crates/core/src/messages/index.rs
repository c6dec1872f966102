//! Indexing messages: add or refresh a web content document, or delete an
//! indexed item.

use crate::messages::is_valid_language_code;
use crate::messages::metadata::{validate_nested_metadata, Metadata};
use crate::validation::{Rule, Validatable, ValidationContext};

/// A web content document to add to or refresh in the remote index.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexWebContentMessage {
    document_id: String,
    document_language: Option<String>,
    document_uri: String,
    document_content: String,
    metadata: Vec<Metadata>,
}

impl IndexWebContentMessage {
    pub fn new(document_id: impl Into<String>, document_uri: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            document_language: None,
            document_uri: document_uri.into(),
            document_content: String::new(),
            metadata: Vec::new(),
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.document_language = Some(language.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.document_content = content.into();
        self
    }

    /// Appends an indexable metadata; insertion order is preserved in the
    /// request document.
    pub fn add_metadata(&mut self, metadata: Metadata) {
        self.metadata.push(metadata);
    }

    pub fn with_metadata(mut self, metadata: Vec<Metadata>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    pub fn document_language(&self) -> Option<&str> {
        self.document_language.as_deref()
    }

    pub fn document_uri(&self) -> &str {
        &self.document_uri
    }

    pub fn document_content(&self) -> &str {
        &self.document_content
    }

    pub fn metadata(&self) -> &[Metadata] {
        &self.metadata
    }
}

impl Validatable for IndexWebContentMessage {
    fn rules() -> &'static [Rule<Self>] {
        const RULES: &[Rule<IndexWebContentMessage>] = &[
            Rule {
                path: "documentId",
                check: |message| !message.document_id.trim().is_empty(),
                message: "This value should not be blank.",
            },
            Rule {
                path: "documentURI",
                check: |message| !message.document_uri.trim().is_empty(),
                message: "This value should not be blank.",
            },
            Rule {
                path: "documentContent",
                check: |message| !message.document_content.trim().is_empty(),
                message: "This value should not be blank.",
            },
        ];
        RULES
    }

    fn validate_custom(&self, ctx: &mut ValidationContext) {
        if let Some(language) = &self.document_language {
            if !is_valid_language_code(language) {
                ctx.violate("documentLanguage", "This value is not a valid language.");
            }
        }
        for (index, metadata) in self.metadata.iter().enumerate() {
            validate_nested_metadata(metadata, &format!("metadata[{index}]"), ctx);
        }
    }
}

/// An item to delete from the remote index.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteIndexItemMessage {
    document_id: String,
}

impl DeleteIndexItemMessage {
    pub fn new(document_id: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
        }
    }

    pub fn document_id(&self) -> &str {
        &self.document_id
    }
}

impl Validatable for DeleteIndexItemMessage {
    fn rules() -> &'static [Rule<Self>] {
        const RULES: &[Rule<DeleteIndexItemMessage>] = &[Rule {
            path: "documentId",
            check: |message| !message.document_id.trim().is_empty(),
            message: "This value should not be blank.",
        }];
        RULES
    }
}

/// Typed acknowledgement of an indexing operation.
///
/// The service always returns the indexed item's reference; the tracking id
/// is only present on asynchronous ingestion pipelines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexingResponse {
    pub reference: String,
    pub tracking_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::metadata::MetadataValue;
    use crate::validation::Validator;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_index_message_requires_id_uri_and_content() {
        let message = IndexWebContentMessage::new("", "");
        let result = Validator::validate(&message);

        assert_eq!(
            result.paths(),
            vec!["documentId", "documentURI", "documentContent"]
        );
    }

    #[test]
    fn test_index_message_checks_language_and_metadata() {
        let mut message = IndexWebContentMessage::new("doc-1", "https://example.org/doc-1")
            .with_content("content body")
            .with_language("english");
        message.add_metadata(Metadata::string("title").with_values(vec!["fine".into()]));
        message.add_metadata(Metadata::integer("pages").with_values(vec![MetadataValue::from("ten")]));

        let result = Validator::validate(&message);

        assert_eq!(
            result.message_at("documentLanguage"),
            Some("This value is not a valid language.")
        );
        assert_eq!(
            result.message_at("metadata[1].values[0]"),
            Some("This value should be of type integer.")
        );
    }

    #[test]
    fn test_valid_index_message_passes() {
        let mut message = IndexWebContentMessage::new("doc-1", "https://example.org/doc-1")
            .with_content("content body")
            .with_language("en");
        message.add_metadata(Metadata::full_text("body").with_values(vec!["indexed text".into()]));

        assert!(Validator::validate(&message).is_valid());
    }

    #[test]
    fn test_delete_message_requires_document_id() {
        let result = Validator::validate(&DeleteIndexItemMessage::new("  "));
        assert_eq!(result.message_at("documentId"), Some("This value should not be blank."));
    }
}
