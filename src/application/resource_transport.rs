// Transport trait for fetching dashboard resources
use async_trait::async_trait;
use bytes::Bytes;

/// Status and body of a completed request.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Bytes,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait ResourceTransport: Send + Sync {
    /// GET a resource path such as `/api/overview`
    async fn get(&self, path: &str) -> anyhow::Result<RawResponse>;
}
