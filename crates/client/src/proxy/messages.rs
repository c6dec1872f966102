//! Message-level conversion: folds converted component fragments and the
//! connection settings into wire requests, and converts raw responses into
//! typed results.

use crate::proxy::{ComponentRef, Proxy};
use crate::requests::{DeleteItemRequest, IndexWebContentRequest, SearchRequest, SortParameters};
use crate::transport::RawResponse;
use searchgate_core::messages::{
    DeleteIndexItemMessage, IndexWebContentMessage, IndexingResponse, SearchMessage, SearchResponse,
};
use searchgate_core::{Error, Result, ServiceConfig};
use serde_json::Value;
use std::collections::BTreeMap;

impl Proxy {
    /// Converts a search message into its wire request.
    ///
    /// The component map (`sort_metadata`, `search_query`) is converted
    /// first, children before parents; the scalar fields and connection
    /// settings are folded in afterwards.
    pub fn convert_search_message(
        &self,
        message: &SearchMessage,
        config: &ServiceConfig,
    ) -> Result<SearchRequest> {
        let mut components: BTreeMap<&'static str, Value> = BTreeMap::new();
        if let Some(metadata) = message.sort_metadata() {
            if let Some(fragment) = self.convert_component(ComponentRef::Metadata(metadata))? {
                components.insert("sort_metadata", fragment);
            }
        }
        if let Some(query) = message.query() {
            if let Some(fragment) = self.convert_component(ComponentRef::Boolean(query))? {
                components.insert("search_query", fragment);
            }
        }

        let sort = match components.remove("sort_metadata") {
            Some(fragment) => Some(SortParameters {
                field: sort_field_name(&fragment)?,
                direction: message.sort_direction().as_str().to_string(),
            }),
            None => None,
        };

        Ok(SearchRequest {
            api_key: config.api_key.clone(),
            database: config.database.clone(),
            text: message.searched_text().to_string(),
            languages: if message.searched_languages().is_empty() {
                None
            } else {
                Some(message.searched_languages().to_vec())
            },
            page_number: message.pagination_location(),
            page_size: message.pagination_size(),
            highlight_regex: message.highlight_regex().map(str::to_string),
            highlight_limit: message.highlight_limit(),
            session_token: message.session_token().map(str::to_string),
            sort,
            query: components.remove("search_query"),
        })
    }

    /// Converts a web content indexing message into its wire request,
    /// merging the converted metadata fragments into one object.
    pub fn convert_index_message(
        &self,
        message: &IndexWebContentMessage,
        config: &ServiceConfig,
    ) -> Result<IndexWebContentRequest> {
        let mut merged = serde_json::Map::new();
        for metadata in message.metadata() {
            if let Some(Value::Object(fragment)) =
                self.convert_component(ComponentRef::Metadata(metadata))?
            {
                merged.extend(fragment);
            }
        }

        Ok(IndexWebContentRequest {
            api_key: config.api_key.clone(),
            database: config.database.clone(),
            document_id: message.document_id().to_string(),
            document_language: message.document_language().map(str::to_string),
            document_uri: message.document_uri().to_string(),
            document_content: message.document_content().to_string(),
            metadata: merged,
        })
    }

    pub fn convert_delete_message(
        &self,
        message: &DeleteIndexItemMessage,
        config: &ServiceConfig,
    ) -> Result<DeleteItemRequest> {
        Ok(DeleteItemRequest {
            api_key: config.api_key.clone(),
            database: config.database.clone(),
            document_id: message.document_id().to_string(),
        })
    }

    /// Decodes a search response body into its typed form.
    pub fn convert_search_response(&self, response: &RawResponse) -> Result<SearchResponse> {
        let decoded = decode_body(response)?;
        serde_json::from_value(decoded)
            .map_err(|e| Error::conversion(format!("Malformed search response: {e}")))
    }

    /// Decodes an indexing response body.
    ///
    /// The service must return the indexed item's reference; its absence is
    /// a hard failure of the operation, not a warning.
    pub fn convert_index_response(&self, response: &RawResponse) -> Result<IndexingResponse> {
        let decoded = decode_body(response)?;
        let reference = decoded
            .get("reference")
            .and_then(Value::as_str)
            .filter(|reference| !reference.is_empty())
            .ok_or_else(|| Error::conversion("The reference is not returned by the service"))?
            .to_string();
        let tracking_id = decoded
            .get("trackingId")
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(IndexingResponse {
            reference,
            tracking_id,
        })
    }
}

fn decode_body(response: &RawResponse) -> Result<Value> {
    serde_json::from_str(&response.body)
        .map_err(|_| Error::conversion("The service response is not recognized by the client"))
}

/// The sort fragment is a metadata fragment, `{"<wireName>": [...]}`; the
/// wire name is its single key.
fn sort_field_name(fragment: &Value) -> Result<String> {
    fragment
        .as_object()
        .and_then(|object| object.keys().next())
        .map(String::clone)
        .ok_or_else(|| Error::conversion("Sort metadata converted to an unusable fragment"))
}
