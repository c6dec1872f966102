//! Transport seam between the proxy and the wire.
//!
//! The proxy hands a fully assembled request to a [`Transporter`] and gets a
//! raw response back. Retry and rate limiting, if any, belong behind this
//! trait, not in the conversion pipeline.

mod http;
mod mock;

pub use http::HttpTransporter;
pub use mock::MockTransporter;

use async_trait::async_trait;
use searchgate_core::Result;
use serde_json::Value;

/// Service endpoint a request is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Search,
    IndexText,
    DeleteItem,
}

impl Endpoint {
    /// Path under the service base URL.
    pub fn path(self) -> &'static str {
        match self {
            Self::Search => "/rest/search",
            Self::IndexText => "/rest/ingestion/text",
            Self::DeleteItem => "/rest/ingestion/delete",
        }
    }

    /// Whether the endpoint belongs to the ingestion or the search
    /// connection.
    pub fn is_ingestion(self) -> bool {
        matches!(self, Self::IndexText | Self::DeleteItem)
    }
}

/// A fully assembled request, ready to dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayRequest {
    pub endpoint: Endpoint,
    pub body: Value,
}

/// Raw service response, before any typed conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Dispatches assembled requests to the remote service.
#[async_trait]
pub trait Transporter: Send + Sync {
    async fn send(&self, request: GatewayRequest) -> Result<RawResponse>;
}

#[async_trait]
impl<T: Transporter + ?Sized> Transporter for std::sync::Arc<T> {
    async fn send(&self, request: GatewayRequest) -> Result<RawResponse> {
        (**self).send(request).await
    }
}
