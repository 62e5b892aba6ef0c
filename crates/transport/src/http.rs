use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::{API_KEY_HEADER, ApiRequest, ApiResponse, Method, Result, Transport, TransportError};

/// Settings for [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    /// Origin of the API, e.g. `http://127.0.0.1:5000`.
    pub base_url: String,

    /// Whole-request timeout. `None` waits indefinitely.
    pub request_timeout: Option<Duration>,

    /// Connection establishment timeout.
    pub connect_timeout: Option<Duration>,
}

impl HttpTransportConfig {
    /// Creates a config with no timeouts.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: None,
            connect_timeout: None,
        }
    }

    /// Sets the whole-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

/// reqwest-backed transport talking to a live API server.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Creates a transport for the configured origin.
    pub fn new(config: &HttpTransportConfig) -> Result<Self> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(TransportError::InvalidUrl(config.base_url.clone()));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        tracing::debug!(%base_url, "HTTP transport created");

        Ok(Self { client, base_url })
    }

    /// Returns the normalised origin (no trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, request: &ApiRequest) -> String {
        format!("{}{}", self.base_url, request.path_and_query())
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[tracing::instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = self.url_for(&request);
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), &url);

        if let Some(ref api_key) = request.api_key {
            builder = builder.header(API_KEY_HEADER, api_key);
        }
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        metrics::counter!("transport_requests_total", "method" => request.method.as_str())
            .increment(1);

        let response = builder.send().await.inspect_err(|e| {
            tracing::warn!(error = %e, %url, "request failed");
        })?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        tracing::debug!(status, bytes = body.len(), "response received");

        Ok(ApiResponse { status, body })
    }
}
