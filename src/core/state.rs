//! 状态定义：UiState 与 StateStore
//!
//! 全部共享状态（状态机阶段、对话、AgentData、护理团队、Computer-Use 会话、输入框）集中在一个 UiState 中，
//! 由 StateStore 通过 watch 通道持有。每次修改都经 send_modify 完成，单次修改原子且可被订阅者观察；
//! 多步序列整体不是原子的。修改方法仅 crate 内可见，外部只能读或经 Copilot 操作。

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;

use crate::agents::{Agent, AgentData, AgentPayload, AgentStatus};
use crate::care_team::CareTeam;
use crate::computer_agent::ComputerAgentSession;
use crate::core::AppError;
use crate::transcript::{Message, Transcript};

/// 底部输入区
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct InputState {
    pub value: String,
    /// 演示脚本正在「打字」，用户按键被忽略
    pub typing: bool,
    /// 发送按钮处于按下效果
    pub send_pressed: bool,
}

/// UI 渲染所需的完整快照
#[derive(Clone, Debug, Serialize)]
pub struct UiState {
    pub status: AgentStatus,
    pub current_agent: Option<Agent>,
    /// 有请求在处理中
    pub processing: bool,
    pub transcript: Transcript,
    pub agent_data: AgentData,
    pub care_team: CareTeam,
    pub computer_agent: ComputerAgentSession,
    pub hero_visible: bool,
    pub input: InputState,
    pub deep_research: bool,
    /// 最近一次被拒绝或失败的操作说明
    pub notice: Option<String>,
}

impl UiState {
    /// 演示打字或请求处理中，输入框不接受用户编辑
    pub fn input_locked(&self) -> bool {
        self.input.typing || self.processing
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            status: AgentStatus::Idle,
            current_agent: None,
            processing: false,
            transcript: Transcript::new(),
            agent_data: AgentData::default(),
            care_team: CareTeam::new(),
            computer_agent: ComputerAgentSession::default(),
            hero_visible: true,
            input: InputState::default(),
            deep_research: false,
            notice: None,
        }
    }
}

/// 共享状态容器
#[derive(Clone, Debug)]
pub struct StateStore {
    tx: Arc<watch::Sender<UiState>>,
}

impl StateStore {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(UiState::default());
        Self { tx: Arc::new(tx) }
    }

    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> UiState {
        self.tx.borrow().clone()
    }

    pub fn read<R>(&self, f: impl FnOnce(&UiState) -> R) -> R {
        f(&self.tx.borrow())
    }

    pub(crate) fn update(&self, f: impl FnOnce(&mut UiState)) {
        self.tx.send_modify(f);
    }

    /// f 返回 true 表示确有改动，才通知订阅者
    pub(crate) fn update_if(&self, f: impl FnOnce(&mut UiState) -> bool) -> bool {
        self.tx.send_if_modified(f)
    }

    /// 原子地占用「处理中」标记；已有请求时返回 Busy
    pub(crate) fn begin_request(&self) -> Result<RequestGuard, AppError> {
        let acquired = self.update_if(|state| {
            if state.processing {
                false
            } else {
                state.processing = true;
                state.notice = None;
                true
            }
        });
        if acquired {
            Ok(RequestGuard {
                store: self.clone(),
            })
        } else {
            Err(AppError::Busy)
        }
    }

    pub(crate) fn set_status(&self, status: AgentStatus) {
        self.update(|s| s.status = status);
    }

    pub(crate) fn set_agent(&self, agent: Agent, status: AgentStatus) {
        self.update(|s| {
            s.current_agent = Some(agent);
            s.status = status;
        });
    }

    pub(crate) fn record(&self, payload: AgentPayload) {
        self.update(|s| s.agent_data.record(payload));
    }

    pub(crate) fn push_message(&self, message: Message) {
        self.update(|s| s.transcript.push(message));
    }

    pub(crate) fn set_notice(&self, notice: impl Into<String>) {
        let notice = notice.into();
        self.update(|s| s.notice = Some(notice));
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

/// 处理中标记的 RAII 守卫；drop 时释放（包括被取消的序列）
#[derive(Debug)]
pub(crate) struct RequestGuard {
    store: StateStore,
}

impl Drop for RequestGuard {
    fn drop(&mut self) {
        self.store.update(|s| s.processing = false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_request_rejected_while_busy() {
        let store = StateStore::new();
        let guard = store.begin_request().unwrap();
        assert!(store.read(|s| s.processing));
        assert_eq!(store.begin_request().unwrap_err(), AppError::Busy);

        drop(guard);
        assert!(!store.read(|s| s.processing));
        assert!(store.begin_request().is_ok());
    }

    #[test]
    fn test_subscribers_see_mutations() {
        let store = StateStore::new();
        let mut rx = store.subscribe();
        store.push_message(Message::user("hello"));

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().transcript.len(), 1);
    }

    #[test]
    fn test_default_state() {
        let s = UiState::default();
        assert!(s.hero_visible);
        assert_eq!(s.status, AgentStatus::Idle);
        assert!(!s.computer_agent.is_active);
    }
}
