//! Canned-response transporter for tests.

use crate::transport::{GatewayRequest, RawResponse, Transporter};
use async_trait::async_trait;
use searchgate_core::Result;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Records every dispatched request and replays queued responses.
///
/// When the response queue is empty, answers `200 {}`.
#[derive(Default)]
pub struct MockTransporter {
    responses: Mutex<VecDeque<RawResponse>>,
    requests: Mutex<Vec<GatewayRequest>>,
}

impl MockTransporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the next response to replay.
    pub fn push_response(&self, status: u16, body: impl Into<String>) {
        self.responses
            .lock()
            .expect("mock transporter lock poisoned")
            .push_back(RawResponse {
                status,
                body: body.into(),
            });
    }

    /// Requests dispatched so far, in order.
    pub fn sent_requests(&self) -> Vec<GatewayRequest> {
        self.requests
            .lock()
            .expect("mock transporter lock poisoned")
            .clone()
    }
}

#[async_trait]
impl Transporter for MockTransporter {
    async fn send(&self, request: GatewayRequest) -> Result<RawResponse> {
        self.requests
            .lock()
            .expect("mock transporter lock poisoned")
            .push(request);

        let canned = self
            .responses
            .lock()
            .expect("mock transporter lock poisoned")
            .pop_front();

        Ok(canned.unwrap_or(RawResponse {
            status: 200,
            body: "{}".to_string(),
        }))
    }
}
