//! # 会话层
//!
//! 面向调用方的脚本执行入口，绑定一个远程会话 ID 与请求分发器。
//!
//! ## 主要功能
//! - **同步执行**: `execute`，脚本返回值即为结果
//! - **异步执行**: `execute_async`，脚本通过最后一个回调参数返回结果
//! - **超时设置**: 设置异步脚本的等待超时
//! - **并发安全**: 会话句柄不持有可变状态，可在任务间克隆共享
//!
//! ## 模块结构
//! - `executor`: 会话句柄实现
//!
//! ## 使用示例
//! ```rust,no_run
//! use chaser_exec::protocol::{HttpDispatcher, Script, Value};
//! use chaser_exec::session::Session;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let dispatcher = HttpDispatcher::new("http://localhost:4444", Duration::from_secs(30))?;
//! let session = Session::new("4f1c...", Arc::new(dispatcher));
//!
//! let sum = session
//!     .execute_async(
//!         Script::function("function(a, b, done) { done(a + b); }"),
//!         &[Value::from(1), Value::from(2)],
//!     )
//!     .await?;
//! println!("Result: {:?}", sum);
//! # Ok(())
//! # }
//! ```

pub mod executor;


pub use executor::Session;
