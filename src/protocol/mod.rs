//! # WebDriver 脚本执行协议层
//!
//! 负责 `execute` / `execute_async` 命令的编码、分发与响应解析。
//!
//! ## 主要功能
//! - **值编解码**: 原生值与线上 JSON 之间的双向转换，元素引用使用 WebElement 标记对象
//! - **脚本规范化**: 将函数形式的脚本包装为函数体
//! - **命令构建**: 生成请求路径与 `{script, args}` 请求体
//! - **响应解析**: 区分成功、协议错误、页面卸载导致的取消以及传输错误
//!
//! ## 模块结构
//! - `types`: 值模型、执行模式与原始响应
//! - `codec`: 值编解码
//! - `script`: 脚本规范化
//! - `command`: 命令构建
//! - `response`: 响应解析
//! - `traits`: 请求分发 trait
//! - `http`: 基于 reqwest 的 HTTP 分发实现
//! - `mock`: 用于测试的 Mock 实现
//!
//! ## 使用示例
//! ```rust
//! use chaser_exec::protocol::{command, normalize, ExecutionMode, NormalizeOptions, Script, Value, ValueCodec};
//!
//! # fn example() -> Result<(), chaser_exec::Error> {
//! let source = normalize(&Script::function("function(a, b) { return a + b; }"), NormalizeOptions::default())?;
//! let request = command::build("abc", ExecutionMode::Sync, source, &[Value::from(1), Value::from(2)], &ValueCodec::default())?;
//! assert_eq!(request.path(), "/session/abc/execute");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod types;
pub mod codec;
pub mod script;
pub mod command;
pub mod response;
pub mod traits;
pub mod http;
pub mod mock;

#[cfg(test)]
pub mod tests;

pub use types::{
    ElementKey, ElementRef, ExecutionMode, RawResponse, StatusCode, Value,
    JSONWIRE_ELEMENT_KEY, W3C_ELEMENT_KEY,
};
pub use codec::{ValueCodec, WireValue};
pub use script::{normalize, NormalizeOptions, Script};
pub use command::{CommandRequest, ExecutePayload};
pub use response::interpret;
pub use traits::RequestDispatcher;

// Re-export implementation structs
pub use http::HttpDispatcher;

// Re-export mock for development/testing
pub use mock::{MockDispatcher, RecordedRequest};
