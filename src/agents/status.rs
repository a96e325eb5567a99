//! 路由状态：一次请求依次经过的阶段

use serde::Serialize;

use super::Agent;

/// 当前请求所处阶段（全局唯一）
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    #[default]
    Idle,
    Analyzing,
    Connecting,
    Searching,
    Processing,
    Scheduling,
    Researching,
    Completed,
}

impl AgentStatus {
    /// 是否为请求进行中的中间阶段
    pub fn is_active(self) -> bool {
        !matches!(self, AgentStatus::Idle | AgentStatus::Completed)
    }

    /// 状态指示器上的文字
    pub fn message(self, agent: Option<&Agent>) -> String {
        match self {
            AgentStatus::Analyzing => "Analyzing your request...".to_string(),
            AgentStatus::Connecting => match agent {
                Some(a) => format!("Connecting to {}...", a.name),
                None => "Connecting...".to_string(),
            },
            AgentStatus::Searching => "Searching for providers...".to_string(),
            AgentStatus::Processing => "Processing medication data...".to_string(),
            AgentStatus::Scheduling => "Checking appointment availability...".to_string(),
            AgentStatus::Researching => "Researching health information...".to_string(),
            AgentStatus::Completed => "Task completed successfully".to_string(),
            AgentStatus::Idle => "Processing...".to_string(),
        }
    }
}
