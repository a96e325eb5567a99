//! 智能体路由：状态机主流程
//!
//! analyzing →（等待）→ 分类并 connecting →（等待）→ 交给类别处理器（工作状态 + 等待）
//! → 写入负载 → completed。同一时刻只允许一个请求，进行中再调用返回 Busy。

use std::time::Duration;

use tracing::{debug, info};

use super::handlers::{HandlerContext, HandlerRegistry};
use super::{classify, AgentStatus};
use crate::config::AgentsSection;
use crate::core::state::RequestGuard;
use crate::core::{AppError, Pacer, StateStore};
use crate::transcript::Message;

pub struct AgentRouter {
    handlers: HandlerRegistry,
    analyze: Duration,
    connect: Duration,
    store: StateStore,
    pacer: Pacer,
}

impl AgentRouter {
    pub fn new(cfg: &AgentsSection, store: StateStore, pacer: Pacer) -> Self {
        Self::with_handlers(HandlerRegistry::with_defaults(cfg), cfg, store, pacer)
    }

    pub fn with_handlers(
        handlers: HandlerRegistry,
        cfg: &AgentsSection,
        store: StateStore,
        pacer: Pacer,
    ) -> Self {
        Self {
            handlers,
            analyze: cfg.analyze(),
            connect: cfg.connect(),
            store,
            pacer,
        }
    }

    /// 路由一条请求，返回处理器给出的助手回复（若有）。
    /// 回复不会自动写入对话，由调用方决定是否追加。
    pub async fn route(
        &self,
        request: &str,
        deep_research: bool,
    ) -> Result<Option<Message>, AppError> {
        let guard = self.store.begin_request()?;
        self.route_with(guard, request, deep_research).await
    }

    /// 调用方已占用处理中标记；guard 在返回时释放
    pub(crate) async fn route_with(
        &self,
        _guard: RequestGuard,
        request: &str,
        deep_research: bool,
    ) -> Result<Option<Message>, AppError> {
        self.store.set_status(AgentStatus::Analyzing);
        debug!(deep_research, "Analyzing request");
        self.pacer.pause(self.analyze).await?;

        let agent = classify(request);
        info!(agent = %agent.category, "Connecting to {}", agent.name);
        self.store.set_agent(agent, AgentStatus::Connecting);
        self.pacer.pause(self.connect).await?;

        let handler = self
            .handlers
            .get(agent.category)
            .ok_or(AppError::MissingHandler(agent.category))?;
        let ctx = HandlerContext {
            store: &self.store,
            pacer: &self.pacer,
        };
        let outcome = handler.handle(&ctx, request, deep_research).await?;

        if let Some(payload) = outcome.payload {
            debug!(category = %payload.category(), "Recording agent payload");
            self.store.record(payload);
        }

        self.store.set_status(AgentStatus::Completed);
        info!(agent = %agent.category, replied = outcome.reply.is_some(), "Request completed");
        Ok(outcome.reply)
    }
}
