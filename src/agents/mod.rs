//! 智能体层：分类器、状态、数据槽、类别处理器与路由状态机

pub mod classifier;
pub mod data;
pub mod handlers;
pub mod mock;
pub mod router;
pub mod status;

pub use classifier::{classify, Agent, AgentCategory, Trigger, AGENT_RULES};
pub use data::{
    AgentData, AgentPayload, AppointmentPayload, MedicationPayload, ProviderResult,
    ProviderSearchPayload,
};
pub use handlers::{AgentHandler, HandlerContext, HandlerOutcome, HandlerRegistry};
pub use router::AgentRouter;
pub use status::AgentStatus;
