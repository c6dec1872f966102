//! End-to-end indexing pipeline: web content indexing and item deletion.

use pretty_assertions::assert_eq;
use searchgate_client::{Endpoint, MockTransporter, SearchGateClient};
use searchgate_core::messages::{
    DeleteIndexItemMessage, IndexWebContentMessage, Metadata, MetadataValue,
};
use searchgate_core::{Error, SearchGateConfig, ServiceConfig};
use serde_json::json;
use std::sync::Arc;

fn test_config() -> SearchGateConfig {
    SearchGateConfig {
        ingestion: ServiceConfig {
            url: "https://ingestion.example.org".to_string(),
            api_key: "ingest-key".to_string(),
            database: "DEMO".to_string(),
        },
        search: ServiceConfig {
            url: "https://search.example.org".to_string(),
            api_key: "search-key".to_string(),
            database: "DEMO".to_string(),
        },
    }
}

fn client_with_mock() -> (SearchGateClient, Arc<MockTransporter>) {
    let mock = Arc::new(MockTransporter::new());
    let client =
        SearchGateClient::with_transporter(test_config(), Box::new(Arc::clone(&mock))).unwrap();
    (client, mock)
}

fn sample_message() -> IndexWebContentMessage {
    let mut message = IndexWebContentMessage::new("web-1", "https://example.org/content/web-1")
        .with_language("en")
        .with_content("Funding programme overview for 2020.");
    message.add_metadata(Metadata::string("title").with_values(vec!["Funding overview".into()]));
    message
        .add_metadata(Metadata::date("pubDate").with_values(vec![MetadataValue::date("2020-01-01")]));
    message.add_metadata(Metadata::boolean("archived").with_values(vec![false.into()]));
    message
}

#[tokio::test]
async fn test_index_web_content_assembles_the_wire_document() {
    let (client, mock) = client_with_mock();
    mock.push_response(200, r#"{"reference": "web_content/web-1"}"#);

    client.index_web_content(&sample_message()).await.unwrap();

    let sent = mock.sent_requests();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].endpoint, Endpoint::IndexText);
    assert_eq!(
        sent[0].body,
        json!({
            "apiKey": "ingest-key",
            "database": "DEMO",
            "documentId": "web-1",
            "documentLanguage": "en",
            "documentURI": "https://example.org/content/web-1",
            "documentContent": "Funding programme overview for 2020.",
            "metadata": {
                "esST_title": ["Funding overview"],
                "esDATE_pubDate": ["2020-01-01T00:00:00+00:00"],
                "esBO_archived": [false]
            }
        })
    );
}

#[tokio::test]
async fn test_indexing_response_exposes_reference_and_tracking_id() {
    let (client, mock) = client_with_mock();
    mock.push_response(
        200,
        r#"{"reference": "web_content/web-1", "trackingId": "t-42"}"#,
    );

    let response = client.index_web_content(&sample_message()).await.unwrap();

    assert_eq!(response.reference, "web_content/web-1");
    assert_eq!(response.tracking_id.as_deref(), Some("t-42"));
}

#[tokio::test]
async fn test_missing_reference_fails_the_whole_operation() {
    let (client, mock) = client_with_mock();
    mock.push_response(200, r#"{"trackingId": "t-42"}"#);

    let error = client
        .index_web_content(&sample_message())
        .await
        .unwrap_err();

    assert!(matches!(error, Error::Conversion(_)));
    assert!(error
        .to_string()
        .contains("The reference is not returned by the service"));
}

#[tokio::test]
async fn test_invalid_index_message_collects_every_violation() {
    let (client, mock) = client_with_mock();

    let mut message = IndexWebContentMessage::new("", "").with_language("english");
    message.add_metadata(Metadata::integer("pages").with_values(vec!["ten".into()]));
    let error = client.index_web_content(&message).await.unwrap_err();

    let violations = error.violations().expect("expected a validation failure");
    assert_eq!(
        violations.paths(),
        vec![
            "documentId",
            "documentURI",
            "documentContent",
            "documentLanguage",
            "metadata[0].values[0]",
        ]
    );
    assert!(mock.sent_requests().is_empty());
}

#[tokio::test]
async fn test_delete_document_targets_the_ingestion_endpoint() {
    let (client, mock) = client_with_mock();

    client
        .delete_document(&DeleteIndexItemMessage::new("web-1"))
        .await
        .unwrap();

    let sent = mock.sent_requests();
    assert_eq!(sent[0].endpoint, Endpoint::DeleteItem);
    assert_eq!(
        sent[0].body,
        json!({
            "apiKey": "ingest-key",
            "database": "DEMO",
            "documentId": "web-1"
        })
    );
}
