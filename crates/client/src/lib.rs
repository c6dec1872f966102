//! searchgate — typed client for a hosted search web service
//!
//! Callers describe search and indexing operations as validated message
//! trees instead of raw HTTP payloads. [`SearchGateClient`] sequences the
//! pipeline for every operation: validate the message (collecting every
//! violation before giving up), convert the component tree bottom-up into
//! the wire document, dispatch it, and convert the raw response into a
//! typed result.
//!
//! ```no_run
//! use searchgate_client::SearchGateClient;
//! use searchgate_core::{SearchGateConfig, SearchMessage};
//!
//! # async fn run(config: SearchGateConfig) -> searchgate_core::Result<()> {
//! let client = SearchGateClient::new(config)?;
//! let response = client
//!     .search(&SearchMessage::new("rust client").with_pagination(20, 1))
//!     .await?;
//! println!("{} results", response.total_results);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod proxy;
pub mod requests;
pub mod transport;

pub use error::TransportError;
pub use proxy::{ComponentRef, ComponentTypeId, ConverterRegistry, Proxy};
pub use transport::{Endpoint, GatewayRequest, HttpTransporter, MockTransporter, RawResponse, Transporter};

use searchgate_core::messages::{
    DeleteIndexItemMessage, IndexWebContentMessage, IndexingResponse, SearchMessage, SearchResponse,
};
use searchgate_core::validation::{Validatable, Validator};
use searchgate_core::{Error, Result, SearchGateConfig};
use tracing::{debug, info};

/// Top-level client: validates, converts and dispatches messages.
pub struct SearchGateClient {
    config: SearchGateConfig,
    proxy: Proxy,
    transporter: Box<dyn Transporter>,
}

impl SearchGateClient {
    /// Client over the HTTP transporter.
    pub fn new(config: SearchGateConfig) -> Result<Self> {
        let transporter = HttpTransporter::new(config.clone())?;
        Self::with_transporter(config, Box::new(transporter))
    }

    /// Client over a caller-supplied transporter.
    pub fn with_transporter(
        config: SearchGateConfig,
        transporter: Box<dyn Transporter>,
    ) -> Result<Self> {
        config.validate()?;
        info!(
            "Initializing searchgate client for database '{}'",
            config.search.database
        );

        Ok(Self {
            config,
            proxy: Proxy::new(),
            transporter,
        })
    }

    /// Runs a search and returns its typed response.
    pub async fn search(&self, message: &SearchMessage) -> Result<SearchResponse> {
        self.validate(message)?;

        let request = self.proxy.convert_search_message(message, &self.config.search)?;
        let body = serde_json::to_value(&request)
            .map_err(|e| Error::conversion(format!("Failed to serialize search request: {e}")))?;

        debug!("Sending search request for '{}'", message.searched_text());
        let raw = self
            .transporter
            .send(GatewayRequest {
                endpoint: Endpoint::Search,
                body,
            })
            .await?;

        self.proxy.convert_search_response(&raw)
    }

    /// Adds or refreshes a web content document in the index.
    pub async fn index_web_content(
        &self,
        message: &IndexWebContentMessage,
    ) -> Result<IndexingResponse> {
        self.validate(message)?;

        let request = self
            .proxy
            .convert_index_message(message, &self.config.ingestion)?;
        let body = serde_json::to_value(&request)
            .map_err(|e| Error::conversion(format!("Failed to serialize index request: {e}")))?;

        debug!("Indexing document '{}'", message.document_id());
        let raw = self
            .transporter
            .send(GatewayRequest {
                endpoint: Endpoint::IndexText,
                body,
            })
            .await?;

        self.proxy.convert_index_response(&raw)
    }

    /// Deletes an indexed item.
    pub async fn delete_document(&self, message: &DeleteIndexItemMessage) -> Result<()> {
        self.validate(message)?;

        let request = self
            .proxy
            .convert_delete_message(message, &self.config.ingestion)?;
        let body = serde_json::to_value(&request)
            .map_err(|e| Error::conversion(format!("Failed to serialize delete request: {e}")))?;

        debug!("Deleting document '{}'", message.document_id());
        self.transporter
            .send(GatewayRequest {
                endpoint: Endpoint::DeleteItem,
                body,
            })
            .await?;

        Ok(())
    }

    /// Hard stop on any violation: an invalid message is never partially
    /// converted or dispatched.
    fn validate<M: Validatable + 'static>(&self, message: &M) -> Result<()> {
        let result = Validator::validate(message);
        if !result.is_valid() {
            debug!("Message rejected with {} violation(s)", result.len());
            return Err(Error::Validation(result));
        }
        Ok(())
    }
}
