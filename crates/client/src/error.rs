use searchgate_core::Error as CoreError;
use thiserror::Error;

/// Transport-specific error types
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("Request to {endpoint} failed: {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Service returned HTTP {status}: {body}")]
    ErrorStatus { status: u16, body: String },

    #[error("Failed to read response body: {0}")]
    BodyRead(String),
}

impl From<TransportError> for CoreError {
    fn from(err: TransportError) -> Self {
        CoreError::transport(err.to_string())
    }
}
