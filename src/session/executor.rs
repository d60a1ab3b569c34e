//! Script execution against one remote session
//!
//! `execute` and `execute_async` are thin entry points over a single
//! mode-parameterized pipeline.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::Config;
use crate::protocol::command::{self, resolve_path, ASYNC_SCRIPT_TIMEOUT_PATH};
use crate::protocol::{
    interpret, normalize, ElementKey, ExecutionMode, HttpDispatcher, NormalizeOptions,
    RequestDispatcher, Script, Value, ValueCodec,
};
use crate::{Error, Result};

/// Handle for issuing script commands to a remote session
///
/// Holds no mutable state; clones share the dispatcher and may be used
/// concurrently. Ordering of overlapping calls is up to the dispatcher.
#[derive(Debug, Clone)]
pub struct Session {
    id: String,
    dispatcher: Arc<dyn RequestDispatcher>,
    codec: ValueCodec,
    normalize_options: NormalizeOptions,
}

impl Session {
    /// Create a session handle
    ///
    /// # Arguments
    /// * `id` - Session id issued by the remote end
    /// * `dispatcher` - Transport for the session's commands
    pub fn new<S: Into<String>>(id: S, dispatcher: Arc<dyn RequestDispatcher>) -> Self {
        Self {
            id: id.into(),
            dispatcher,
            codec: ValueCodec::default(),
            normalize_options: NormalizeOptions::default(),
        }
    }

    /// Create a session handle talking HTTP to the configured server
    pub fn from_config(config: &Config) -> Result<Self> {
        let id = config
            .session_id
            .clone()
            .ok_or_else(|| Error::configuration("No session id configured"))?;

        let dispatcher = HttpDispatcher::new(
            config.webdriver_url.clone(),
            Duration::from_millis(config.request_timeout),
        )?;

        Ok(Self::new(id, Arc::new(dispatcher))
            .with_element_key(config.element_key)
            .with_multi_instance(config.multi_instance))
    }

    /// Use another WebElement marker dialect
    pub fn with_element_key(mut self, key: ElementKey) -> Self {
        self.codec = ValueCodec::new(key);
        self
    }

    /// Treat the session as running in multi-instance mode
    pub fn with_multi_instance(mut self, multi_instance: bool) -> Self {
        self.normalize_options.multi_instance = multi_instance;
        self
    }

    /// Session id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Codec used for arguments and results
    pub fn codec(&self) -> &ValueCodec {
        &self.codec
    }

    /// Execute a synchronous script; its return value is the result
    pub async fn execute<S: Into<Script>>(&self, script: S, args: &[Value]) -> Result<Value> {
        self.run(ExecutionMode::Sync, script.into(), args).await
    }

    /// Execute an asynchronous script
    ///
    /// The remote end appends a completion callback as the final argument;
    /// the value passed to it is the result. Fails with `Error::Cancelled` if
    /// the page unloads before the callback fires.
    pub async fn execute_async<S: Into<Script>>(&self, script: S, args: &[Value]) -> Result<Value> {
        self.run(ExecutionMode::Async, script.into(), args).await
    }

    /// [`Session::execute`] for a script supplied as dynamic JSON
    pub async fn execute_json(&self, script: &serde_json::Value, args: &[Value]) -> Result<Value> {
        self.run(ExecutionMode::Sync, Script::from_json(script)?, args).await
    }

    /// [`Session::execute_async`] for a script supplied as dynamic JSON
    pub async fn execute_async_json(&self, script: &serde_json::Value, args: &[Value]) -> Result<Value> {
        self.run(ExecutionMode::Async, Script::from_json(script)?, args).await
    }

    /// Set how long the remote end waits for an async script's callback
    pub async fn set_async_script_timeout(&self, ms: u64) -> Result<()> {
        let path = resolve_path(ASYNC_SCRIPT_TIMEOUT_PATH, &self.id);
        let outcome = self
            .dispatcher
            .send(&path, serde_json::json!({ "ms": ms }))
            .await;

        interpret(ExecutionMode::Sync, &self.codec, outcome)?;
        info!("Async script timeout for session {} set to {}ms", self.id, ms);
        Ok(())
    }

    async fn run(&self, mode: ExecutionMode, script: Script, args: &[Value]) -> Result<Value> {
        let request_id = Uuid::new_v4();

        let source = normalize(&script, self.normalize_options)?;
        let request = command::build(&self.id, mode, source, args, &self.codec)?;
        let payload = request.payload_json()?;

        debug!(
            "[{}] Dispatching {} script to {} ({} args)",
            request_id,
            mode,
            request.path(),
            args.len()
        );

        let outcome = self.dispatcher.send(request.path(), payload).await;
        let result = interpret(mode, &self.codec, outcome);

        debug!("[{}] {} script finished: ok={}", request_id, mode, result.is_ok());
        result
    }
}
