//! 演示执行器：每个进程生命周期只跑一次
//!
//! 在执行第一步之前原子地置位 has_run，重复调用直接返回 AlreadyRan。
//! 每个等待都经 Pacer，取消令牌触发时序列中止。

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info};

use super::script::{DemoAction, DemoScript, DemoStep};
use crate::core::{AppError, Pacer, StateStore};
use crate::transcript::Message;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DemoOutcome {
    Completed,
    AlreadyRan,
}

pub struct DemoRunner {
    script: DemoScript,
    has_run: AtomicBool,
    default_url: String,
}

impl DemoRunner {
    pub fn new(script: DemoScript, default_url: impl Into<String>) -> Self {
        Self {
            script,
            has_run: AtomicBool::new(false),
            default_url: default_url.into(),
        }
    }

    pub fn has_run(&self) -> bool {
        self.has_run.load(Ordering::SeqCst)
    }

    pub async fn run(&self, store: &StateStore, pacer: &Pacer) -> Result<DemoOutcome, AppError> {
        if self.has_run.swap(true, Ordering::SeqCst) {
            debug!("Demo already ran, skipping");
            return Ok(DemoOutcome::AlreadyRan);
        }
        info!(steps = self.script.steps().len(), "Starting demo sequence");

        for step in self.script.steps() {
            match step {
                DemoStep::Wait(d) => pacer.pause(*d).await?,
                DemoStep::Act(action) => self.apply(store, action),
            }
        }

        info!("Demo sequence finished");
        Ok(DemoOutcome::Completed)
    }

    fn apply(&self, store: &StateStore, action: &DemoAction) {
        match action {
            DemoAction::HideHero => store.update(|s| s.hero_visible = false),
            DemoAction::BeginTyping => store.update(|s| s.input.typing = true),
            DemoAction::SetInput(text) => {
                debug!(chars = text.chars().count(), "Demo keystroke");
                store.update(|s| s.input.value.clone_from(text));
            }
            DemoAction::PressSend => store.update(|s| s.input.send_pressed = true),
            DemoAction::SendUserMessage(text) => {
                info!("Demo sends user message");
                store.update(|s| {
                    s.transcript.push(Message::user(text.as_str()));
                    s.input.value.clear();
                    s.input.typing = false;
                    s.input.send_pressed = false;
                });
            }
            DemoAction::AppendAssistant(text) => {
                store.push_message(Message::assistant(text.as_str()));
            }
            DemoAction::StartComputerAgent { task, url } => {
                info!(%task, %url, "Demo opens computer-use panel");
                store.update(|s| {
                    s.computer_agent.start(task, Some(url.as_str()), &self.default_url);
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_runs_exactly_once() {
        let store = StateStore::new();
        let pacer = Pacer::default();
        let runner = DemoRunner::new(
            DemoScript::new()
                .wait(Duration::from_millis(10))
                .act(DemoAction::AppendAssistant("hi".into())),
            "https://example.com",
        );

        assert_eq!(runner.run(&store, &pacer).await, Ok(DemoOutcome::Completed));
        assert_eq!(runner.run(&store, &pacer).await, Ok(DemoOutcome::AlreadyRan));
        assert_eq!(store.read(|s| s.transcript.len()), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_mid_sequence() {
        let store = StateStore::new();
        let pacer = Pacer::default();
        let token = pacer.token();
        let runner = DemoRunner::new(
            DemoScript::new()
                .act(DemoAction::HideHero)
                .wait(Duration::from_secs(5))
                .act(DemoAction::AppendAssistant("never".into())),
            "https://example.com",
        );

        token.cancel();
        assert_eq!(runner.run(&store, &pacer).await, Err(AppError::Cancelled));
        assert!(runner.has_run());
        assert!(!store.read(|s| s.hero_visible));
        assert!(store.read(|s| s.transcript.is_empty()));
    }
}
