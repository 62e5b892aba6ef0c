use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use serde_json::Value;

use crate::{ApiRequest, ApiResponse, Method, Result, Transport, TransportError};

#[derive(Debug, Clone)]
enum Scripted {
    Respond(ApiResponse),
    Fail(String),
}

#[derive(Debug, Default)]
struct InMemoryState {
    routes: HashMap<(Method, String), VecDeque<Scripted>>,
    sent: Vec<ApiRequest>,
}

/// In-memory transport for testing.
///
/// Responses are scripted per `(method, path)`; the query string is not part
/// of the route. Scripted responses are consumed in order, except that the
/// last one for a route keeps answering. Every request is recorded.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTransport {
    state: Arc<RwLock<InMemoryState>>,
}

impl InMemoryTransport {
    /// Creates a transport with no routes.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, method: Method, path: &str, scripted: Scripted) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .routes
            .entry((method, path.to_string()))
            .or_default()
            .push_back(scripted);
    }

    /// Queues a JSON response for a route.
    pub fn respond(&self, method: Method, path: &str, status: u16, body: Value) {
        self.push(method, path, Scripted::Respond(ApiResponse::json(status, &body)));
    }

    /// Queues a raw (possibly non-JSON) response for a route.
    pub fn respond_raw(&self, method: Method, path: &str, status: u16, body: &str) {
        self.push(method, path, Scripted::Respond(ApiResponse::new(status, body)));
    }

    /// Queues a network failure for a route.
    pub fn fail(&self, method: Method, path: &str, reason: &str) {
        self.push(method, path, Scripted::Fail(reason.to_string()));
    }

    /// Returns every request sent so far, oldest first.
    pub fn sent_requests(&self) -> Vec<ApiRequest> {
        self.state.read().unwrap_or_else(PoisonError::into_inner).sent.clone()
    }

    /// Returns the requests sent with a given verb.
    pub fn sent_with(&self, method: Method) -> Vec<ApiRequest> {
        self.sent_requests()
            .into_iter()
            .filter(|r| r.method == method)
            .collect()
    }

    /// Returns the total number of requests sent.
    pub fn request_count(&self) -> usize {
        self.state.read().unwrap_or_else(PoisonError::into_inner).sent.len()
    }
}

#[async_trait]
impl Transport for InMemoryTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.sent.push(request.clone());

        let key = (request.method, request.path.clone());
        let scripted = match state.routes.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };

        match scripted {
            Some(Scripted::Respond(response)) => Ok(response),
            Some(Scripted::Fail(reason)) => Err(TransportError::Network(reason)),
            None => Err(TransportError::Unrouted {
                method: request.method,
                path: request.path,
            }),
        }
    }
}
