//! Unified error types for Chaser-Exec

use thiserror::Error;

/// Unified Result type
pub type Result<T> = std::result::Result<T, Error>;

/// Message reported when the script or its arguments cannot be marshalled
pub const INVALID_ARGUMENTS_MESSAGE: &str =
    "number or type of arguments don't agree with execute protocol command";

/// Unified error type for Chaser-Exec
#[derive(Error, Debug)]
pub enum Error {
    /// Script or argument rejected locally, before any request was sent
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Remote session answered a well-formed request with a non-success status
    #[error("Protocol fault ({error}, status {status}): {message}")]
    ProtocolFault {
        /// JSON Wire status code (0 when the remote only reported a W3C error string)
        status: i64,
        /// W3C error name, e.g. "javascript error"
        error: String,
        /// Remote message
        message: String,
    },

    /// Async script invalidated by an unload or navigation before it completed
    #[error("Script cancelled: {0}")]
    Cancelled(String),

    /// Request could not be delivered or its response not received
    #[error("Transport error: {0}")]
    Transport(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Create a new invalid argument error
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// Create a new protocol fault
    pub fn protocol_fault<E: Into<String>, M: Into<String>>(status: i64, error: E, message: M) -> Self {
        Error::ProtocolFault {
            status,
            error: error.into(),
            message: message.into(),
        }
    }

    /// Create a new cancellation error
    pub fn cancelled<S: Into<String>>(msg: S) -> Self {
        Error::Cancelled(msg.into())
    }

    /// Create a new transport error
    pub fn transport<S: Into<String>>(msg: S) -> Self {
        Error::Transport(msg.into())
    }

    /// Create a new configuration error
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Error::Configuration(msg.into())
    }

    /// Whether the remote side invalidated the script by unloading the page
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Error::Cancelled(_))
    }

    /// Whether the failure happened below the protocol layer
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// Whether the failure was raised locally, before dispatch
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }
}
