//! Mock request dispatcher
//!
//! Records every request and answers from a queue of scripted outcomes, or
//! from a handler standing in for the remote end.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::traits::RequestDispatcher;
use super::types::RawResponse;
use crate::Error;

/// Request captured by [`MockDispatcher`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    /// Resolved path
    pub path: String,
    /// Request body
    pub payload: Value,
}

type Handler = dyn Fn(&str, &Value) -> Result<RawResponse, Error> + Send + Sync;

enum Scripted {
    Response(RawResponse),
    TransportFailure(String),
}

/// Mock dispatcher
pub struct MockDispatcher {
    is_active: Arc<AtomicBool>,
    queue: Mutex<VecDeque<Scripted>>,
    handler: Option<Box<Handler>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl std::fmt::Debug for MockDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockDispatcher")
            .field("is_active", &self.is_active.load(Ordering::Relaxed))
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}

impl MockDispatcher {
    /// Create a mock answering `null` unless responses are queued
    pub fn new() -> Self {
        Self {
            is_active: Arc::new(AtomicBool::new(true)),
            queue: Mutex::new(VecDeque::new()),
            handler: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that computes each response from the request
    pub fn with_handler<F>(handler: F) -> Self
    where
        F: Fn(&str, &Value) -> Result<RawResponse, Error> + Send + Sync + 'static,
    {
        Self {
            handler: Some(Box::new(handler)),
            ..Self::new()
        }
    }

    /// Queue a response for the next request
    pub async fn push_response(&self, response: RawResponse) {
        self.queue.lock().await.push_back(Scripted::Response(response));
    }

    /// Queue a transport failure for the next request
    pub async fn push_transport_failure<S: Into<String>>(&self, message: S) {
        self.queue
            .lock()
            .await
            .push_back(Scripted::TransportFailure(message.into()));
    }

    /// All requests received so far
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.clone()
    }

    /// Number of requests received so far
    pub async fn request_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    /// Simulate losing the connection; later sends fail with a transport error
    pub fn close(&self) {
        self.is_active.store(false, Ordering::Relaxed);
    }
}

impl Default for MockDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RequestDispatcher for MockDispatcher {
    async fn send(&self, path: &str, payload: Value) -> Result<RawResponse, Error> {
        if !self.is_active.load(Ordering::Relaxed) {
            return Err(Error::transport("Connection is closed"));
        }

        self.requests.lock().await.push(RecordedRequest {
            path: path.to_string(),
            payload: payload.clone(),
        });

        if let Some(scripted) = self.queue.lock().await.pop_front() {
            return match scripted {
                Scripted::Response(response) => Ok(response),
                Scripted::TransportFailure(message) => Err(Error::transport(message)),
            };
        }

        match &self.handler {
            Some(handler) => handler(path, &payload),
            None => Ok(RawResponse::success(Value::Null)),
        }
    }
}
