//! 应用错误类型
//!
//! 路由与演示序列本身不会失败；这里只表达并发拒绝、取消与调用方传入的非法引用。

use thiserror::Error;

use crate::agents::AgentCategory;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// 已有请求在处理中（拒绝并发请求）
    #[error("A request is already in flight")]
    Busy,

    /// 取消令牌触发（退出 / 关闭）
    #[error("Sequence cancelled")]
    Cancelled,

    #[error("No handler registered for agent: {0}")]
    MissingHandler(AgentCategory),

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Command channel closed")]
    ChannelClosed,
}
