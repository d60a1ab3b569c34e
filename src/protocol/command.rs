//! Command builder
//!
//! Turns a normalized script and its arguments into an execute request.

use serde::Serialize;

use super::codec::ValueCodec;
use super::types::{ExecutionMode, Value};
use crate::Result;

/// Placeholder replaced by the session id in path templates
pub const SESSION_ID_PLACEHOLDER: &str = ":sessionId";

/// Path template for setting the async script timeout
pub const ASYNC_SCRIPT_TIMEOUT_PATH: &str = "/session/:sessionId/timeouts/async_script";

/// Execute command body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutePayload {
    /// Function body source
    pub script: String,
    /// Encoded positional arguments
    pub args: Vec<serde_json::Value>,
}

/// Execute request ready for dispatch
#[derive(Debug, Clone, PartialEq)]
pub struct CommandRequest {
    mode: ExecutionMode,
    path: String,
    payload: ExecutePayload,
}

impl CommandRequest {
    /// Execution mode
    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Resolved request path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Request body
    pub fn payload(&self) -> &ExecutePayload {
        &self.payload
    }

    /// Request body as JSON
    pub fn payload_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(&self.payload)?)
    }
}

/// Substitute the session id into a path template
pub fn resolve_path(template: &str, session_id: &str) -> String {
    template.replace(SESSION_ID_PLACEHOLDER, session_id)
}

/// Build an execute request
///
/// Fails with `InvalidArgument` if any argument cannot be encoded; argument
/// count and types are otherwise left for the remote end to judge.
pub fn build(
    session_id: &str,
    mode: ExecutionMode,
    script: String,
    args: &[Value],
    codec: &ValueCodec,
) -> Result<CommandRequest> {
    let args = codec.encode_args(args)?;

    Ok(CommandRequest {
        mode,
        path: resolve_path(mode.path_template(), session_id),
        payload: ExecutePayload { script, args },
    })
}
