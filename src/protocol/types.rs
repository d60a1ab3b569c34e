//! WebDriver execute command type definitions
//!
//! This module defines the native value model, execution modes and the raw
//! response shape returned by the remote end.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// W3C WebElement identifier key
pub const W3C_ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Legacy JSON Wire Protocol WebElement key
pub const JSONWIRE_ELEMENT_KEY: &str = "ELEMENT";

/// WebElement marker dialect spoken by the remote end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKey {
    /// `element-6066-11e4-a52e-4f735466cecf`
    #[default]
    W3c,
    /// `ELEMENT`
    JsonWire,
}

impl ElementKey {
    /// Reserved object key used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKey::W3c => W3C_ELEMENT_KEY,
            ElementKey::JsonWire => JSONWIRE_ELEMENT_KEY,
        }
    }
}

impl FromStr for ElementKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "w3c" => Ok(ElementKey::W3c),
            "jsonwire" | "json-wire" => Ok(ElementKey::JsonWire),
            other => Err(format!("Unknown element key dialect: {}", other)),
        }
    }
}

/// Opaque handle to a remote DOM node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementRef(String);

impl ElementRef {
    /// Wrap an identifier issued by the remote session
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    /// Remote identifier
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Native representation of script arguments and results
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// null / undefined
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Integral number
    Integer(i64),
    /// Floating point number
    Float(f64),
    /// String value
    String(String),
    /// Array value
    Array(Vec<Value>),
    /// Plain object
    Object(BTreeMap<String, Value>),
    /// Remote element handle
    Element(ElementRef),
}

impl Value {
    /// Convert any serializable value
    ///
    /// Fails with `InvalidArgument` when the value has no JSON representation
    /// (e.g. a map with non-string keys).
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> crate::Result<Self> {
        serde_json::to_value(value)
            .map(Value::from)
            .map_err(|e| crate::Error::invalid_argument(format!("value is not JSON-safe: {}", e)))
    }

    /// Borrow the element handle, if this is one
    pub fn as_element(&self) -> Option<&ElementRef> {
        match self {
            Value::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Integer view, if this is an integral number
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric view of either number variant
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// String view
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// Structural conversion; objects stay plain objects even when they carry the
/// element key, tag detection only happens when decoding a wire value.
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            ),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(n as i64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<ElementRef> for Value {
    fn from(element: ElementRef) -> Self {
        Value::Element(element)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Script execution mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionMode {
    /// Script returns its result directly
    Sync,
    /// Script signals completion through a trailing callback argument
    Async,
}

impl ExecutionMode {
    /// Path template of the execute endpoint for this mode
    pub fn path_template(&self) -> &'static str {
        match self {
            ExecutionMode::Sync => "/session/:sessionId/execute",
            ExecutionMode::Async => "/session/:sessionId/execute_async",
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionMode::Sync => f.write_str("sync"),
            ExecutionMode::Async => f.write_str("async"),
        }
    }
}

/// Raw response body as returned by the remote end
///
/// JSON Wire servers report `status`; W3C servers omit it and signal failures
/// through the HTTP status and an error object in `value`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct RawResponse {
    /// Session the response belongs to
    #[serde(rename = "sessionId", default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// JSON Wire status code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i64>,
    /// Response value
    #[serde(default)]
    pub value: serde_json::Value,
    /// HTTP status of the transport response, when there was one
    #[serde(skip)]
    pub http_status: Option<u16>,
}

impl RawResponse {
    /// Successful response carrying `value`
    pub fn success(value: serde_json::Value) -> Self {
        Self {
            status: Some(0),
            value,
            ..Default::default()
        }
    }

    /// JSON Wire failure with a status code and message
    pub fn status(code: i64, message: &str) -> Self {
        Self {
            status: Some(code),
            value: serde_json::json!({ "message": message }),
            ..Default::default()
        }
    }

    /// W3C failure, as delivered with an HTTP error status
    pub fn w3c_error(error: &str, message: &str) -> Self {
        Self {
            status: None,
            value: serde_json::json!({
                "error": error,
                "message": message,
                "stacktrace": "",
            }),
            http_status: Some(StatusCode::from_error_name(error).http_status()),
            ..Default::default()
        }
    }
}

/// JSON Wire status codes relevant to script execution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Success,
    NoSuchDriver,
    NoSuchElement,
    StaleElementReference,
    UnknownError,
    JavaScriptError,
    Timeout,
    ScriptTimeout,
    InvalidArgument,
    Other(i64),
}

impl StatusCode {
    /// Map a numeric JSON Wire status
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => StatusCode::Success,
            6 => StatusCode::NoSuchDriver,
            7 => StatusCode::NoSuchElement,
            10 => StatusCode::StaleElementReference,
            13 => StatusCode::UnknownError,
            17 => StatusCode::JavaScriptError,
            21 => StatusCode::Timeout,
            28 => StatusCode::ScriptTimeout,
            61 => StatusCode::InvalidArgument,
            other => StatusCode::Other(other),
        }
    }

    /// Map a W3C error name
    pub fn from_error_name(name: &str) -> Self {
        match name {
            "invalid session id" => StatusCode::NoSuchDriver,
            "no such element" => StatusCode::NoSuchElement,
            "stale element reference" => StatusCode::StaleElementReference,
            "javascript error" => StatusCode::JavaScriptError,
            "timeout" => StatusCode::Timeout,
            "script timeout" => StatusCode::ScriptTimeout,
            "invalid argument" => StatusCode::InvalidArgument,
            _ => StatusCode::UnknownError,
        }
    }

    /// Numeric JSON Wire status
    pub fn code(&self) -> i64 {
        match self {
            StatusCode::Success => 0,
            StatusCode::NoSuchDriver => 6,
            StatusCode::NoSuchElement => 7,
            StatusCode::StaleElementReference => 10,
            StatusCode::UnknownError => 13,
            StatusCode::JavaScriptError => 17,
            StatusCode::Timeout => 21,
            StatusCode::ScriptTimeout => 28,
            StatusCode::InvalidArgument => 61,
            StatusCode::Other(code) => *code,
        }
    }

    /// W3C error name
    pub fn error_name(&self) -> &'static str {
        match self {
            StatusCode::Success => "success",
            StatusCode::NoSuchDriver => "invalid session id",
            StatusCode::NoSuchElement => "no such element",
            StatusCode::StaleElementReference => "stale element reference",
            StatusCode::JavaScriptError => "javascript error",
            StatusCode::Timeout => "timeout",
            StatusCode::ScriptTimeout => "script timeout",
            StatusCode::InvalidArgument => "invalid argument",
            StatusCode::UnknownError | StatusCode::Other(_) => "unknown error",
        }
    }

    /// HTTP status a W3C server answers with for this error
    pub fn http_status(&self) -> u16 {
        match self {
            StatusCode::Success => 200,
            StatusCode::InvalidArgument => 400,
            StatusCode::NoSuchDriver | StatusCode::NoSuchElement | StatusCode::StaleElementReference => 404,
            _ => 500,
        }
    }
}
