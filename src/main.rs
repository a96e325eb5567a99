//! Ron AI
//!
//! 入口：加载配置、初始化日志、创建 Copilot 命令循环与 TUI，并运行主循环。
//! `--headless [消息...]` 不启动界面：跑完演示与给定消息后把最终 UiState 以 JSON 打印到 stdout。

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use ron_ai::{
    cli::Cli,
    config::{load_config, AppConfig},
    core::{spawn_copilot, Command, Copilot, ShutdownManager},
    observability,
    ui::run_app,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (cfg, load_error) = match load_config(cli.config.clone()) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    let log_file = if cli.headless {
        None
    } else {
        Some(cfg.app.log_file.as_path())
    };
    observability::init(&cfg.app.log_filter, log_file).context("Failed to open log file")?;
    if let Some(e) = load_error {
        tracing::warn!("Failed to load config, using defaults: {}", e);
    }
    tracing::info!(app = %cfg.app.name, headless = cli.headless, "Starting");

    let shutdown = Arc::new(ShutdownManager::new());
    shutdown.install_signal_handlers();

    let run_demo = cfg.demo.enabled && !cli.no_demo;

    if cli.headless {
        let copilot = Copilot::new(&cfg, shutdown.token());
        if run_demo {
            copilot.run_demo().await.context("Demo failed")?;
        }
        for message in &cli.messages {
            copilot
                .submit(message)
                .await
                .with_context(|| format!("Failed to handle message: {}", message))?;
        }
        let json = serde_json::to_string_pretty(&copilot.state())
            .context("Failed to serialize state")?;
        println!("{}", json);
        return Ok(());
    }

    let (cmd_tx, state_rx, handle) = spawn_copilot(&cfg, Arc::clone(&shutdown));
    if run_demo {
        let _ = cmd_tx.send(Command::RunDemo);
    }

    run_app(state_rx, cmd_tx.clone())
        .await
        .context("App run failed")?;

    let _ = cmd_tx.send(Command::Quit);
    let _ = handle.await;
    if let Some(reason) = shutdown.reason() {
        tracing::info!(?reason, "Shut down");
    }
    Ok(())
}
