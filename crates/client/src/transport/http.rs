//! HTTP transporter backed by reqwest.

use crate::error::TransportError;
use crate::transport::{Endpoint, GatewayRequest, RawResponse, Transporter};
use async_trait::async_trait;
use reqwest::Client;
use searchgate_core::{Result, SearchGateConfig};
use std::time::Duration;
use tracing::{debug, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Posts assembled requests as JSON to the configured service URLs.
pub struct HttpTransporter {
    client: Client,
    config: SearchGateConfig,
}

impl HttpTransporter {
    pub fn new(config: SearchGateConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TransportError::ClientBuild(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn base_url(&self, endpoint: Endpoint) -> &str {
        if endpoint.is_ingestion() {
            &self.config.ingestion.url
        } else {
            &self.config.search.url
        }
    }
}

#[async_trait]
impl Transporter for HttpTransporter {
    async fn send(&self, request: GatewayRequest) -> Result<RawResponse> {
        let url = format!(
            "{}{}",
            self.base_url(request.endpoint).trim_end_matches('/'),
            request.endpoint.path()
        );
        debug!("Dispatching request to {url}");

        let response = self
            .client
            .post(&url)
            .json(&request.body)
            .send()
            .await
            .map_err(|e| TransportError::RequestFailed {
                endpoint: url.clone(),
                source: e,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::BodyRead(e.to_string()))?;

        if !status.is_success() {
            warn!("Service answered {status} for {url}");
            return Err(TransportError::ErrorStatus {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        Ok(RawResponse {
            status: status.as_u16(),
            body,
        })
    }
}
