//! # Chaser-Exec 命令行入口
//!
//! 在已有的 WebDriver 会话中执行一段脚本，并以 JSON 形式输出结果。
//!
//! ## 用法
//! ```text
//! chaser-exec [--async] [--function] [--config <file>] <script-file|-> [json-arg ...]
//! ```
//! - `--async`: 使用 `execute_async`，脚本需调用最后一个回调参数返回结果
//! - `--function`: 脚本文件内容是完整的函数表达式而非函数体
//! - `--config`: TOML 配置文件，环境变量会覆盖其中的值
//! - 其余参数逐个按 JSON 解析，作为脚本的位置参数
//!
//! ## 环境变量
//! - `CHASER_WEBDRIVER_URL`: WebDriver 服务地址（默认: http://localhost:4444）
//! - `CHASER_SESSION_ID`: 目标会话 ID（必填）
//! - `CHASER_MULTI_INSTANCE`: 是否为多实例模式（默认: false）
//! - `CHASER_ELEMENT_KEY`: 元素标记方言 `w3c` 或 `jsonwire`（默认: w3c）
//! - `CHASER_REQUEST_TIMEOUT`: 请求超时毫秒数（默认: 30000）
//! - `CHASER_LOG_LEVEL`: 未设置 `RUST_LOG` 时使用的日志过滤（默认: info）

use anyhow::Context;
use chaser_exec::{config::Config, protocol::Value, Script, Session};
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Execute a script in an existing WebDriver session
#[derive(Debug, Parser)]
#[command(name = "chaser-exec", version, about = "Execute a script in a WebDriver session")]
struct Cli {
    /// Use execute_async; the script must call its last argument with the result
    #[arg(long = "async")]
    is_async: bool,

    /// The script file holds a whole function expression instead of a body
    #[arg(long = "function")]
    is_function: bool,

    /// TOML configuration file; CHASER_* variables override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Script file, or `-` to read from stdin
    script: String,

    /// Positional script arguments, each parsed as JSON
    #[arg(value_parser = parse_json_arg, allow_hyphen_values = true, trailing_var_arg = true)]
    args: Vec<serde_json::Value>,
}

fn parse_json_arg(raw: &str) -> Result<serde_json::Value, String> {
    serde_json::from_str(raw).map_err(|e| format!("argument is not valid JSON: {}", e))
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => {
            let path = path.to_str().context("Config path is not valid UTF-8")?;
            Config::from_file(path)?
        }
        None => Config::default(),
    };
    Ok(config.with_env_overrides()?)
}

/// `RUST_LOG` directives when set, otherwise the configured level
fn log_filter(rust_log: Option<&str>, config: &Config) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(&config.log_level))
}

fn read_script(path: &str) -> anyhow::Result<String> {
    if path == "-" {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("Failed to read script from stdin")?;
        return Ok(source);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read script file {}", path))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Configuration first: it supplies the log level fallback
    let config = load_config(cli.config.as_ref())?;

    let rust_log = std::env::var("RUST_LOG").ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref(), &config))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("setting default subscriber failed: {}", e))?;

    info!("Chaser-Exec v{}", chaser_exec::VERSION);
    info!(
        "Configuration loaded: url={}, element_key={:?}",
        config.webdriver_url, config.element_key
    );

    let session = Session::from_config(&config)?;

    let source = read_script(&cli.script)?;
    let script = if cli.is_function {
        Script::function(source)
    } else {
        Script::source(source)
    };

    let args: Vec<Value> = cli.args.into_iter().map(Value::from).collect();

    let result = if cli.is_async {
        session.execute_async(script, &args).await
    } else {
        session.execute(script, &args).await
    };

    match result {
        Ok(value) => {
            let json = session.codec().encode_json(&value)?;
            println!("{}", serde_json::to_string_pretty(&json)?);
            Ok(())
        }
        Err(e) => {
            error!("Script execution failed: {}", e);
            Err(e.into())
        }
    }
}
