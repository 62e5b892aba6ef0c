use async_trait::async_trait;
use serde_json::Value;

use crate::{ApiRequest, ApiResponse, Result};

/// Core trait for sending requests to the library API.
///
/// A transport performs exactly one exchange per call. It never retries and
/// never interprets application-level success markers; that is left to the
/// caller. All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends a request and returns the raw response.
    ///
    /// Non-2xx statuses are returned as responses, not errors: a failure
    /// body such as `{"success": false, "message": ...}` is meaningful.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// Extension trait providing convenience methods for transports.
#[async_trait]
pub trait TransportExt: Transport {
    /// Sends a request and parses the body as JSON.
    async fn send_json(&self, request: ApiRequest) -> Result<Value> {
        self.send(request).await?.json_body()
    }
}

impl<T: Transport + ?Sized> TransportExt for T {}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        (**self).send(request).await
    }
}
