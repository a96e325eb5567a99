//! 可观测性：tracing 订阅器初始化
//!
//! 默认过滤级别来自配置 app.log_filter，可通过 RUST_LOG 覆盖。
//! 无界面模式写 stderr（stdout 留给 JSON 输出）；TUI 模式写日志文件，避免覆盖画面。

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub fn init(default_filter: &str, log_file: Option<&Path>) -> std::io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let registry = tracing_subscriber::registry().with(filter);

    let result = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            registry
                .with(fmt::layer().with_ansi(false).with_writer(Arc::new(file)))
                .try_init()
        }
        None => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    };
    // 已有全局订阅器（例如测试中重复调用）时沿用它
    if let Err(e) = result {
        tracing::debug!("Tracing subscriber already installed: {}", e);
    }
    Ok(())
}
