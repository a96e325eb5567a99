//! 编排器：命令队列
//!
//! UI 把用户操作作为 Command 发到单一队列；后台任务按顺序消费。
//! 耗时操作（发送消息、演示）在独立任务中运行，队列本身不被阻塞；其错误记录日志并写入 UiState.notice。

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::core::shutdown::{ShutdownManager, ShutdownReason};
use crate::core::{AppError, Copilot, UiState};
use crate::prompt_builder::MedicationRequest;

/// 从 UI 发往编排器的命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 发送一条消息（触发路由）
    Submit(String),
    /// 用户编辑输入框
    Input(String),
    SetDeepResearch(bool),
    /// 浏览按钮
    ToggleBrowser,
    /// 按 id 把最近检索结果中的医生加入护理团队
    AddToCareTeam(String),
    RemoveFromCareTeam(String),
    /// 按专科生成个性化检索提示词并填入输入框
    BuildPrompt(String),
    /// 按药名生成用药管理提示词并填入输入框
    MedicationPrompt(String),
    RunDemo,
    Quit,
}

/// 创建 Copilot 并启动命令循环：返回命令发送端、状态接收端与循环句柄
pub fn spawn_copilot(
    cfg: &AppConfig,
    shutdown: Arc<ShutdownManager>,
) -> (
    mpsc::UnboundedSender<Command>,
    watch::Receiver<UiState>,
    JoinHandle<()>,
) {
    let copilot = Arc::new(Copilot::new(cfg, shutdown.token()));
    let state_rx = copilot.subscribe();
    let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel::<Command>();

    let handle = tokio::spawn(async move {
        loop {
            tokio::select! {
                Some(cmd) = cmd_rx.recv() => {
                    match cmd {
                        Command::Submit(text) => {
                            let copilot = Arc::clone(&copilot);
                            tokio::spawn(async move {
                                if let Err(e) = copilot.submit(&text).await {
                                    warn!("Submit failed: {}", e);
                                }
                            });
                        }
                        Command::Input(text) => {
                            copilot.set_input(&text);
                        }
                        Command::SetDeepResearch(enabled) => copilot.set_deep_research(enabled),
                        Command::ToggleBrowser => copilot.toggle_browser(),
                        Command::AddToCareTeam(id) => {
                            if let Err(e) = copilot.add_result_to_care_team(&id) {
                                warn!("Add to care team failed: {}", e);
                                copilot.report(&e);
                            }
                        }
                        Command::RemoveFromCareTeam(id) => {
                            copilot.remove_from_care_team(&id);
                        }
                        Command::BuildPrompt(specialty) => {
                            let copilot = Arc::clone(&copilot);
                            tokio::spawn(async move {
                                let info = copilot.patient_info(&specialty);
                                if let Err(e) = copilot.build_prompt(&info).await {
                                    warn!("Prompt generation failed: {}", e);
                                }
                            });
                        }
                        Command::MedicationPrompt(name) => {
                            let request = MedicationRequest {
                                medication_name: name,
                                ..MedicationRequest::default()
                            };
                            copilot.prepare_medication_prompt(&request);
                        }
                        Command::RunDemo => {
                            let copilot = Arc::clone(&copilot);
                            tokio::spawn(async move {
                                match copilot.run_demo().await {
                                    Ok(outcome) => info!(?outcome, "Demo finished"),
                                    Err(AppError::Cancelled) => info!("Demo cancelled by shutdown"),
                                    Err(e) => warn!("Demo failed: {}", e),
                                }
                            });
                        }
                        Command::Quit => {
                            shutdown.shutdown(ShutdownReason::UserInitiated);
                            break;
                        }
                    }
                }
                _ = shutdown.wait_for_shutdown() => break,
                else => break,
            }
        }
        info!("Command loop stopped");
    });

    (cmd_tx, state_rx, handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_commands_mutate_state_in_order() {
        let shutdown = Arc::new(ShutdownManager::new());
        let (tx, mut rx, handle) = spawn_copilot(&AppConfig::default(), shutdown.clone());

        tx.send(Command::SetDeepResearch(true)).unwrap();
        tx.send(Command::ToggleBrowser).unwrap();
        tx.send(Command::AddToCareTeam("7".into())).unwrap();

        rx.wait_for(|s| s.notice.is_some()).await.unwrap();
        let state = rx.borrow().clone();
        assert!(state.deep_research);
        assert!(state.computer_agent.is_active);
        assert_eq!(state.notice.as_deref(), Some("Unknown provider: 7"));

        tx.send(Command::Quit).unwrap();
        handle.await.unwrap();
        assert!(shutdown.is_shutdown());
    }

    #[tokio::test(start_paused = true)]
    async fn test_build_prompt_fills_input() {
        let shutdown = Arc::new(ShutdownManager::new());
        let (tx, mut rx, _handle) = spawn_copilot(&AppConfig::default(), shutdown.clone());
        let start = tokio::time::Instant::now();

        tx.send(Command::BuildPrompt("rheumatology".into())).unwrap();
        rx.wait_for(|s| !s.input.value.is_empty()).await.unwrap();

        assert!(start.elapsed() >= std::time::Duration::from_millis(2500));
        let value = rx.borrow().input.value.clone();
        assert!(value.starts_with("I'm John Doe"));
        assert!(value.contains("looking for a rheumatology specialist"));
        shutdown.shutdown(ShutdownReason::UserInitiated);
    }
}
