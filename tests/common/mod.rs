//! Common test utilities
//!
//! This module provides shared test helpers for the integration tests.

#![allow(dead_code)]

use chaser_exec::protocol::HttpDispatcher;
use chaser_exec::session::Session;
use std::sync::Arc;
use std::time::Duration;
use wiremock::{MockServer, Request};

/// Session talking HTTP to an arbitrary URL
pub fn session_for_url(url: &str, session_id: &str) -> Session {
    let dispatcher = HttpDispatcher::new(url, Duration::from_secs(5))
        .expect("Failed to create dispatcher");
    Session::new(session_id, Arc::new(dispatcher))
}

/// Session talking HTTP to the mock WebDriver server
pub fn http_session(server: &MockServer, session_id: &str) -> Session {
    session_for_url(&server.uri(), session_id)
}

/// Requests the mock server has seen so far
pub async fn received(server: &MockServer) -> Vec<Request> {
    server
        .received_requests()
        .await
        .expect("Request recording is disabled")
}

/// Parse a received request body
pub fn json_body(request: &Request) -> serde_json::Value {
    serde_json::from_slice(&request.body).expect("Request body is not JSON")
}
