use common::FilterSet;
use serde_json::Value;

use crate::Result;

/// Header carrying the opaque API credential on mutating requests.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// HTTP verbs used by the library API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Returns the verb as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }

    /// Returns true for verbs that change server state.
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Method::Get)
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single request to the library API.
///
/// Paths are absolute (`/api/books/42`); the transport supplies the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP verb.
    pub method: Method,

    /// Absolute path, without query string.
    pub path: String,

    /// Filter parameters; empty entries are dropped when sent.
    pub query: FilterSet,

    /// Optional JSON body.
    pub body: Option<Value>,

    /// Credential sent as [`API_KEY_HEADER`] when present.
    pub api_key: Option<String>,
}

impl ApiRequest {
    /// Creates a request with no query, body or credential.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: FilterSet::new(),
            body: None,
            api_key: None,
        }
    }

    /// Creates a GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// Creates a POST request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// Creates a PUT request.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    /// Creates a DELETE request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Sets the query parameters.
    pub fn with_query(mut self, query: FilterSet) -> Self {
        self.query = query;
        self
    }

    /// Sets the JSON body.
    pub fn with_json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets (or clears) the credential. Blank credentials are dropped.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        if !self.method.is_mutation() {
            return self;
        }
        self.api_key = api_key.filter(|k| !k.trim().is_empty());
        self
    }

    /// Returns the path followed by the encoded query, if any.
    pub fn path_and_query(&self) -> String {
        let query = self.query.to_query_string();
        if query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, query)
        }
    }
}

/// A raw response: status code plus body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Creates a response from a status and raw body.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Creates a response carrying a JSON document.
    pub fn json(status: u16, body: &Value) -> Self {
        Self::new(status, body.to_string())
    }

    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns true if the body holds nothing but whitespace.
    pub fn is_empty_body(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }

    /// Parses the body as JSON.
    pub fn json_body(&self) -> Result<Value> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Returns the body as (lossy) UTF-8 text.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
