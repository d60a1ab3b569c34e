//! Protocol layer pipeline tests
//!
//! Exercises normalize → build → dispatch → interpret against the mock
//! dispatcher.

use serde_json::json;

use super::command;
use super::mock::MockDispatcher;
use super::response::interpret;
use super::script::{normalize, NormalizeOptions, Script};
use super::traits::RequestDispatcher;
use super::types::*;
use super::codec::ValueCodec;

async fn run(
    dispatcher: &MockDispatcher,
    mode: ExecutionMode,
    script: Script,
    args: &[Value],
) -> crate::Result<Value> {
    let codec = ValueCodec::default();
    let source = normalize(&script, NormalizeOptions::default())?;
    let request = command::build("s1", mode, source, args, &codec)?;
    let outcome = dispatcher.send(request.path(), request.payload_json()?).await;
    interpret(mode, &codec, outcome)
}

#[tokio::test]
async fn test_sync_and_async_requests_differ_only_in_path() {
    let dispatcher = MockDispatcher::new();
    let script = Script::function("function(a, b, done) { done(a + b); }");
    let args = [Value::from(1), Value::from(2)];

    run(&dispatcher, ExecutionMode::Sync, script.clone(), &args).await.unwrap();
    run(&dispatcher, ExecutionMode::Async, script, &args).await.unwrap();

    let requests = dispatcher.requests().await;
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].path, "/session/s1/execute");
    assert_eq!(requests[1].path, "/session/s1/execute_async");
    // the remote end appends the completion callback to `arguments`, which
    // the wrapper forwards unchanged
    assert_eq!(requests[0].payload, requests[1].payload);
}

#[tokio::test]
async fn test_function_wrapper_forwards_all_arguments() {
    let dispatcher = MockDispatcher::new();
    let script = Script::function("function(a, b, c, d) { return a + b + c + d; }");
    let args: Vec<Value> = vec![1, 2, 3, 4].into_iter().map(Value::from).collect();

    run(&dispatcher, ExecutionMode::Sync, script, &args).await.unwrap();

    let request = &dispatcher.requests().await[0];
    assert_eq!(
        request.payload,
        json!({
            "script": "return (function(a, b, c, d) { return a + b + c + d; }).apply(null, arguments);",
            "args": [1, 2, 3, 4],
        })
    );
}

#[tokio::test]
async fn test_element_arguments_and_results() {
    let dispatcher = MockDispatcher::with_handler(|_, payload| {
        // echo the first argument back, as `return arguments[0];` would
        Ok(RawResponse::success(payload["args"][0].clone()))
    });
    let element = ElementRef::new("node-17");

    let value = run(
        &dispatcher,
        ExecutionMode::Sync,
        Script::source("return arguments[0];"),
        &[Value::Element(element.clone())],
    )
    .await
    .unwrap();

    assert_eq!(value, Value::Element(element));
    assert_eq!(
        dispatcher.requests().await[0].payload["args"],
        json!([{ W3C_ELEMENT_KEY: "node-17" }])
    );
}

#[tokio::test]
async fn test_local_failure_sends_nothing() {
    let dispatcher = MockDispatcher::new();

    let err = run(&dispatcher, ExecutionMode::Sync, Script::source(""), &[])
        .await
        .unwrap_err();
    assert!(err.is_invalid_argument());

    let err = run(
        &dispatcher,
        ExecutionMode::Async,
        Script::source("return 1;"),
        &[Value::Float(f64::INFINITY)],
    )
    .await
    .unwrap_err();
    assert!(err.is_invalid_argument());

    assert_eq!(dispatcher.request_count().await, 0);
}
