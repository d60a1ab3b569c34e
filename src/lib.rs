//! Chaser-Exec: WebDriver script execution client
//!
//! This library marshals `execute` / `execute_async` commands for a remote
//! browser session: argument and result encoding, element reference
//! substitution, and classification of what the remote end answers.

pub mod error;
pub mod config;

pub mod protocol;
pub mod session;

// Re-exports
pub use error::{Error, Result};
pub use protocol::{ElementRef, Script, Value};
pub use session::Session;

/// Chaser-Exec library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
