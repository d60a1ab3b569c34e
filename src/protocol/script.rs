//! Script normalization
//!
//! The remote end only ever receives a function body. Callable-like scripts
//! are wrapped so they are applied to the `arguments` collection the remote
//! end invokes the body with (which, in async mode, already ends with the
//! completion callback).

use crate::error::INVALID_ARGUMENTS_MESSAGE;
use crate::{Error, Result};

/// Prefix identifying function source text passed as a plain string
pub const FUNCTION_PREFIX: &str = "function (";

/// Script to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Script {
    /// Function body, e.g. `return document.title;`
    Source(String),
    /// Source of a whole function expression, e.g. `function(a, b) { return a + b; }`
    Function(String),
}

impl Script {
    /// Function body script
    pub fn source<S: Into<String>>(body: S) -> Self {
        Script::Source(body.into())
    }

    /// Callable-like script from function source text
    pub fn function<S: Into<String>>(source: S) -> Self {
        Script::Function(source.into())
    }

    /// Accept a script supplied as dynamic JSON
    ///
    /// A string is a function body; `{"function": "<source>"}` is callable-like.
    /// Everything else is rejected.
    pub fn from_json(json: &serde_json::Value) -> Result<Self> {
        match json {
            serde_json::Value::String(body) => Ok(Script::Source(body.clone())),
            serde_json::Value::Object(map) => match map.get("function") {
                Some(serde_json::Value::String(source)) if map.len() == 1 => {
                    Ok(Script::Function(source.clone()))
                }
                _ => Err(Error::invalid_argument(INVALID_ARGUMENTS_MESSAGE)),
            },
            _ => Err(Error::invalid_argument(INVALID_ARGUMENTS_MESSAGE)),
        }
    }

    fn text(&self) -> &str {
        match self {
            Script::Source(text) | Script::Function(text) => text,
        }
    }
}

impl From<&str> for Script {
    fn from(body: &str) -> Self {
        Script::Source(body.to_string())
    }
}

impl From<String> for Script {
    fn from(body: String) -> Self {
        Script::Source(body)
    }
}

/// Normalization options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Session runs in multi-instance mode, where function values cannot be
    /// sent directly and function source passed as text must be wrapped too
    pub multi_instance: bool,
}

/// Produce the function body sent to the remote end
pub fn normalize(script: &Script, options: NormalizeOptions) -> Result<String> {
    let text = script.text();
    if text.trim().is_empty() {
        return Err(Error::invalid_argument(INVALID_ARGUMENTS_MESSAGE));
    }

    let wrap = match script {
        Script::Function(_) => true,
        Script::Source(body) => options.multi_instance && body.starts_with(FUNCTION_PREFIX),
    };

    if wrap {
        Ok(wrap_function(text))
    } else {
        Ok(text.to_string())
    }
}

fn wrap_function(source: &str) -> String {
    format!("return ({}).apply(null, arguments);", source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_source_unchanged_by_default() {
        let normalized = normalize(&Script::source("return 1;"), NormalizeOptions::default()).unwrap();
        assert_eq!(normalized, "return 1;");
    }

    #[test]
    fn test_function_is_wrapped() {
        let script = Script::function("function(a, b, c, d) { return a + b + c + d; }");
        let normalized = normalize(&script, NormalizeOptions::default()).unwrap();
        assert_eq!(
            normalized,
            "return (function(a, b, c, d) { return a + b + c + d; }).apply(null, arguments);"
        );
    }

    #[test]
    fn test_function_text_wrapped_only_in_multi_instance_mode() {
        let script = Script::source("function () { return 1; }");

        let plain = normalize(&script, NormalizeOptions::default()).unwrap();
        assert_eq!(plain, "function () { return 1; }");

        let multi = normalize(&script, NormalizeOptions { multi_instance: true }).unwrap();
        assert_eq!(multi, "return (function () { return 1; }).apply(null, arguments);");
    }

    #[test]
    fn test_multi_instance_leaves_bodies_alone() {
        let normalized = normalize(
            &Script::source("return document.title;"),
            NormalizeOptions { multi_instance: true },
        )
        .unwrap();
        assert_eq!(normalized, "return document.title;");
    }

    #[test]
    fn test_empty_script_rejected() {
        for script in [Script::source(""), Script::source("   "), Script::function("")] {
            let err = normalize(&script, NormalizeOptions::default()).unwrap_err();
            assert!(err.is_invalid_argument());
        }
    }

    #[test]
    fn test_from_json() {
        assert_eq!(
            Script::from_json(&json!("return 1;")).unwrap(),
            Script::source("return 1;")
        );
        assert_eq!(
            Script::from_json(&json!({ "function": "function(a) { return a; }" })).unwrap(),
            Script::function("function(a) { return a; }")
        );

        for bad in [json!(42), json!(null), json!(true), json!(["return 1;"]), json!({ "body": "x" })] {
            let err = Script::from_json(&bad).unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("Invalid argument: {}", INVALID_ARGUMENTS_MESSAGE)
            );
        }
    }
}
