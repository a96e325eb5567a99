//! 各类别的处理器
//!
//! 所有处理器实现 AgentHandler（category / handle），由 HandlerRegistry 按类别注册与查找。
//! 处理器自己切换到工作状态并等待模拟延迟，再返回负载和/或聊天消息。

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::data::{AgentPayload, AppointmentPayload, ProviderSearchPayload};
use super::{mock, AgentCategory};
use crate::config::AgentsSection;
use crate::core::{AppError, Pacer, StateStore};
use crate::transcript::Message;

/// 处理器运行时可用的上下文：状态与可取消等待
pub struct HandlerContext<'a> {
    pub store: &'a StateStore,
    pub pacer: &'a Pacer,
}

impl HandlerContext<'_> {
    /// 切换到工作状态并等待
    pub async fn work(&self, category: AgentCategory, latency: Duration) -> Result<(), AppError> {
        self.store.set_status(category.working_status());
        self.pacer.pause(latency).await
    }
}

/// 处理结果：写入 AgentData 的负载与追加到对话的回复，二者都可为空
#[derive(Debug, Default)]
pub struct HandlerOutcome {
    pub payload: Option<AgentPayload>,
    pub reply: Option<Message>,
}

#[async_trait]
pub trait AgentHandler: Send + Sync {
    fn category(&self) -> AgentCategory;

    async fn handle(
        &self,
        ctx: &HandlerContext<'_>,
        request: &str,
        deep_research: bool,
    ) -> Result<HandlerOutcome, AppError>;
}

/// 医生检索：Deep Research 只影响耗时，不影响结果
pub struct ProviderSearchHandler {
    latency: Duration,
    deep_latency: Duration,
}

#[async_trait]
impl AgentHandler for ProviderSearchHandler {
    fn category(&self) -> AgentCategory {
        AgentCategory::ProviderSearch
    }

    async fn handle(
        &self,
        ctx: &HandlerContext<'_>,
        request: &str,
        deep_research: bool,
    ) -> Result<HandlerOutcome, AppError> {
        let latency = if deep_research {
            self.deep_latency
        } else {
            self.latency
        };
        ctx.work(self.category(), latency).await?;

        Ok(HandlerOutcome {
            payload: Some(AgentPayload::ProviderSearch(ProviderSearchPayload {
                results: mock::providers(),
                search_query: request.to_string(),
            })),
            reply: None,
        })
    }
}

/// 用药管理：提到 Humira 时只回复固定消息，不写数据
pub struct MedicationHandler {
    latency: Duration,
}

#[async_trait]
impl AgentHandler for MedicationHandler {
    fn category(&self) -> AgentCategory {
        AgentCategory::Medication
    }

    async fn handle(
        &self,
        ctx: &HandlerContext<'_>,
        request: &str,
        _deep_research: bool,
    ) -> Result<HandlerOutcome, AppError> {
        ctx.work(self.category(), self.latency).await?;

        if request.to_lowercase().contains("humira") {
            return Ok(HandlerOutcome {
                payload: None,
                reply: Some(Message::assistant(mock::HUMIRA_RESPONSE)),
            });
        }

        Ok(HandlerOutcome {
            payload: Some(AgentPayload::Medication(mock::medication_bundle())),
            reply: None,
        })
    }
}

pub struct AppointmentHandler {
    latency: Duration,
}

#[async_trait]
impl AgentHandler for AppointmentHandler {
    fn category(&self) -> AgentCategory {
        AgentCategory::Appointment
    }

    async fn handle(
        &self,
        ctx: &HandlerContext<'_>,
        _request: &str,
        _deep_research: bool,
    ) -> Result<HandlerOutcome, AppError> {
        ctx.work(self.category(), self.latency).await?;

        Ok(HandlerOutcome {
            payload: Some(AgentPayload::Appointment(AppointmentPayload::default())),
            reply: None,
        })
    }
}

pub struct GeneralHandler {
    latency: Duration,
}

#[async_trait]
impl AgentHandler for GeneralHandler {
    fn category(&self) -> AgentCategory {
        AgentCategory::General
    }

    async fn handle(
        &self,
        ctx: &HandlerContext<'_>,
        _request: &str,
        _deep_research: bool,
    ) -> Result<HandlerOutcome, AppError> {
        ctx.work(self.category(), self.latency).await?;
        Ok(HandlerOutcome::default())
    }
}

/// 处理器注册表：按类别存储 Arc<dyn AgentHandler>
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<AgentCategory, Arc<dyn AgentHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册四个内置处理器，延迟取自 [agents] 配置
    pub fn with_defaults(cfg: &AgentsSection) -> Self {
        let mut registry = Self::new();
        registry.register(ProviderSearchHandler {
            latency: Duration::from_millis(cfg.provider_search_ms),
            deep_latency: Duration::from_millis(cfg.deep_research_ms),
        });
        registry.register(MedicationHandler {
            latency: Duration::from_millis(cfg.medication_ms),
        });
        registry.register(AppointmentHandler {
            latency: Duration::from_millis(cfg.appointment_ms),
        });
        registry.register(GeneralHandler {
            latency: Duration::from_millis(cfg.general_ms),
        });
        registry
    }

    /// 同类别后注册者覆盖先注册者
    pub fn register<H: AgentHandler + 'static>(&mut self, handler: H) {
        self.handlers.insert(handler.category(), Arc::new(handler));
    }

    pub fn get(&self, category: AgentCategory) -> Option<Arc<dyn AgentHandler>> {
        self.handlers.get(&category).cloned()
    }

    pub fn categories(&self) -> Vec<AgentCategory> {
        AgentCategory::ALL
            .into_iter()
            .filter(|c| self.handlers.contains_key(c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_every_category() {
        let registry = HandlerRegistry::with_defaults(&AgentsSection::default());
        assert_eq!(registry.categories(), AgentCategory::ALL.to_vec());
    }

    #[tokio::test(start_paused = true)]
    async fn test_medication_humira_reply_without_payload() {
        let store = StateStore::new();
        let pacer = Pacer::default();
        let ctx = HandlerContext {
            store: &store,
            pacer: &pacer,
        };
        let handler = MedicationHandler {
            latency: Duration::from_millis(1500),
        };

        let out = handler.handle(&ctx, "Is HUMIRA covered?", false).await.unwrap();
        assert!(out.payload.is_none());
        assert_eq!(out.reply.unwrap().content, mock::HUMIRA_RESPONSE);
        assert_eq!(store.read(|s| s.status), crate::agents::AgentStatus::Processing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deep_research_only_changes_latency() {
        let store = StateStore::new();
        let pacer = Pacer::default();
        let ctx = HandlerContext {
            store: &store,
            pacer: &pacer,
        };
        let handler = ProviderSearchHandler {
            latency: Duration::from_millis(2000),
            deep_latency: Duration::from_millis(3000),
        };

        let start = tokio::time::Instant::now();
        let deep = handler.handle(&ctx, "find a doctor", true).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(3000));

        let plain = handler.handle(&ctx, "find a doctor", false).await.unwrap();
        assert_eq!(deep.payload, plain.payload);
    }
}
