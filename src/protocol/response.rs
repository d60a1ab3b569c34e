//! Response interpretation
//!
//! Maps what the dispatcher delivered to exactly one outcome: a decoded value,
//! a protocol fault, a cancellation, or the transport failure itself.

use tracing::{debug, warn};

use super::codec::ValueCodec;
use super::types::{ExecutionMode, RawResponse, StatusCode, Value};
use crate::{Error, Result};

/// Fault messages reporting that an async script was abandoned by a page unload
const CANCELLATION_MARKERS: &[&str] = &[
    "document was unloaded",
    "document unloaded",
    "execution context was destroyed",
    "navigated away",
];

/// Interpret the dispatcher outcome for one command
pub fn interpret(
    mode: ExecutionMode,
    codec: &ValueCodec,
    outcome: Result<RawResponse>,
) -> Result<Value> {
    let raw = match outcome {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Dispatch failed for {} script: {}", mode, e);
            return Err(e);
        }
    };

    if let Some(fault) = fault_of(&raw) {
        return Err(classify(mode, fault));
    }

    debug!("Command completed ({} mode)", mode);
    Ok(codec.decode_json(raw.value))
}

/// Remote failure details extracted from a response
#[derive(Debug, Clone, PartialEq)]
struct Fault {
    status: StatusCode,
    error: String,
    message: String,
}

fn fault_of(raw: &RawResponse) -> Option<Fault> {
    // JSON Wire: non-zero status
    if let Some(code) = raw.status.filter(|code| *code != 0) {
        let status = StatusCode::from_code(code);
        return Some(Fault {
            status,
            error: status.error_name().to_string(),
            message: message_of(&raw.value),
        });
    }

    // W3C: HTTP error status with an error object as value
    let http_failed = raw.http_status.is_some_and(|code| !(200..300).contains(&code));
    if raw.status.is_none() && http_failed {
        let error = raw
            .value
            .get("error")
            .and_then(|e| e.as_str())
            .unwrap_or("unknown error")
            .to_string();
        return Some(Fault {
            status: StatusCode::from_error_name(&error),
            error,
            message: message_of(&raw.value),
        });
    }

    None
}

fn message_of(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Object(map) => map
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| value.to_string()),
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn is_cancellation(mode: ExecutionMode, fault: &Fault) -> bool {
    if mode != ExecutionMode::Async {
        return false;
    }
    if thrown_by_script(&fault.message) {
        return false;
    }
    let message = fault.message.to_lowercase();
    CANCELLATION_MARKERS.iter().any(|marker| message.contains(marker))
}

/// Whether the message is a JS exception raised by the script itself,
/// e.g. `TypeError: ...` or `Uncaught ReferenceError: ...`
fn thrown_by_script(message: &str) -> bool {
    let message = message.trim_start();
    let message = message.strip_prefix("Uncaught ").unwrap_or(message);
    let Some((name, _)) = message.split_once(':') else {
        return false;
    };
    !name.is_empty()
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        && (name.ends_with("Error") || name.ends_with("Exception"))
}

fn classify(mode: ExecutionMode, fault: Fault) -> Error {
    if is_cancellation(mode, &fault) {
        warn!("Async script cancelled by page unload: {}", fault.message);
        return Error::cancelled(fault.message);
    }

    warn!(
        "Remote reported {} (status {}): {}",
        fault.error,
        fault.status.code(),
        fault.message
    );
    Error::protocol_fault(fault.status.code(), fault.error, fault.message)
}
