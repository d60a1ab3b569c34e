//! Request dispatch trait
//!
//! This module defines the abstract interface to the transport that carries
//! commands to the remote session.

use async_trait::async_trait;
use serde_json::Value;

use super::types::RawResponse;

/// Request dispatcher trait
///
/// Sends one command to the remote end and resolves with its raw response.
/// Delivery failures are reported as `Error::Transport`; retries, if any, are
/// the implementation's business.
#[async_trait]
pub trait RequestDispatcher: Send + Sync + std::fmt::Debug {
    /// Send a command body to a resolved session path
    async fn send(&self, path: &str, payload: Value) -> Result<RawResponse, crate::Error>;
}
