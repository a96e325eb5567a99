//! 智能体分类器
//!
//! 将用户输入小写后按固定优先级匹配关键词表：provider-search > medication > appointment，
//! 均未命中时归为 general。纯函数、全域：任何输入都恰好得到一个类别。

use std::fmt;

use serde::{Deserialize, Serialize};

use super::AgentStatus;

/// 路由目标类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgentCategory {
    ProviderSearch,
    Medication,
    Appointment,
    General,
}

impl AgentCategory {
    pub const ALL: [AgentCategory; 4] = [
        AgentCategory::ProviderSearch,
        AgentCategory::Medication,
        AgentCategory::Appointment,
        AgentCategory::General,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            AgentCategory::ProviderSearch => "Provider Search Agent",
            AgentCategory::Medication => "Medication Management Agent",
            AgentCategory::Appointment => "Appointment Scheduling Agent",
            AgentCategory::General => "General Health Agent",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AgentCategory::ProviderSearch => "Finding healthcare providers",
            AgentCategory::Medication => "Managing medications and prescriptions",
            AgentCategory::Appointment => "Scheduling appointments",
            AgentCategory::General => "Providing general health information",
        }
    }

    /// 该类别处理器工作时的中间状态
    pub fn working_status(self) -> AgentStatus {
        match self {
            AgentCategory::ProviderSearch => AgentStatus::Searching,
            AgentCategory::Medication => AgentStatus::Processing,
            AgentCategory::Appointment => AgentStatus::Scheduling,
            AgentCategory::General => AgentStatus::Researching,
        }
    }
}

impl fmt::Display for AgentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AgentCategory::ProviderSearch => "provider-search",
            AgentCategory::Medication => "medication",
            AgentCategory::Appointment => "appointment",
            AgentCategory::General => "general",
        };
        f.write_str(s)
    }
}

/// 分类结果；名称与描述只取决于类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Agent {
    pub category: AgentCategory,
    pub name: &'static str,
    pub description: &'static str,
}

impl Agent {
    pub fn for_category(category: AgentCategory) -> Self {
        Self {
            category,
            name: category.display_name(),
            description: category.description(),
        }
    }
}

/// 单条触发规则（输入已小写）
#[derive(Debug, Clone, Copy)]
pub enum Trigger {
    /// 包含该子串即命中
    Word(&'static str),
    /// 同时包含 anchor 与 any_of 中任意一个
    Paired {
        anchor: &'static str,
        any_of: &'static [&'static str],
    },
}

impl Trigger {
    pub fn matches(&self, lowered: &str) -> bool {
        match self {
            Trigger::Word(word) => lowered.contains(word),
            Trigger::Paired { anchor, any_of } => {
                lowered.contains(anchor) && any_of.iter().any(|w| lowered.contains(w))
            }
        }
    }
}

const SPECIALIST_TERMS: &[&str] = &[
    "doctor",
    "provider",
    "specialist",
    "physician",
    "rheumatologist",
    "cardiologist",
    "dermatologist",
];

/// 路由关键词表，自上而下求值，先命中者胜出。
/// 与 Computer-Use 触发表（`computer_agent::BROWSE_TRIGGERS`）相互独立。
pub const AGENT_RULES: &[(AgentCategory, &[Trigger])] = &[
    (
        AgentCategory::ProviderSearch,
        &[
            Trigger::Paired {
                anchor: "find",
                any_of: SPECIALIST_TERMS,
            },
            Trigger::Word("provider"),
            Trigger::Word("doctor"),
            Trigger::Word("specialist"),
            Trigger::Word("research"),
            Trigger::Word("look up"),
        ],
    ),
    (
        AgentCategory::Medication,
        &[
            Trigger::Word("medication"),
            Trigger::Word("prescription"),
            Trigger::Word("drug"),
            Trigger::Word("pill"),
            Trigger::Word("humira"),
        ],
    ),
    (
        AgentCategory::Appointment,
        &[
            Trigger::Word("appointment"),
            Trigger::Word("schedule"),
            Trigger::Word("book"),
        ],
    ),
];

/// 对请求分类
pub fn classify(request: &str) -> Agent {
    let lowered = request.to_lowercase();
    let category = AGENT_RULES
        .iter()
        .find(|(_, triggers)| triggers.iter().any(|t| t.matches(&lowered)))
        .map(|(category, _)| *category)
        .unwrap_or(AgentCategory::General);
    Agent::for_category(category)
}
