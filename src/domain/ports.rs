use crate::domain::model::HttpMethod;
use async_trait::async_trait;

/// Outcome of one HTTP round trip. Transports report failures through
/// `transport_error` instead of returning an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportReply {
    pub body: String,
    pub http_status: u16,
    pub transport_error: Option<String>,
}

impl TransportReply {
    pub fn ok(http_status: u16, body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            http_status,
            transport_error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            body: String::new(),
            http_status: 0,
            transport_error: Some(message.into()),
        }
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        params: &[(String, String)],
    ) -> TransportReply;
}
