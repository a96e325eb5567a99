//! Copilot：应用状态的唯一控制者
//!
//! 持有 StateStore、路由器、演示执行器与 Computer-Use 配置，对外提供全部修改操作；
//! 调用方只能读 UiState 快照或订阅变化，不能直接改状态。

use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::agents::{AgentRouter, ProviderResult};
use crate::computer_agent::requires_computer_agent;
use crate::config::{AppConfig, BrowserSection};
use crate::core::{AppError, Pacer, StateStore, UiState};
use crate::demo::{DemoOutcome, DemoRunner, DemoScript};
use crate::prompt_builder::{
    generate_medication_prompt, generate_personalized_prompt, MedicationRequest, PatientInfo,
    UserProfile,
};
use crate::transcript::Message;

/// 浏览按钮打开面板时的任务描述
pub const BROWSE_TASK: &str = "Browsing Ron AI Website";

pub struct Copilot {
    store: StateStore,
    router: AgentRouter,
    demo: DemoRunner,
    pacer: Pacer,
    browser: BrowserSection,
    profile: UserProfile,
    prompt_delay: Duration,
}

impl Copilot {
    /// teardown 取消时，所有进行中的等待都会以 Cancelled 结束
    pub fn new(cfg: &AppConfig, teardown: CancellationToken) -> Self {
        let store = StateStore::new();
        let pacer = Pacer::new(teardown);
        let router = AgentRouter::new(&cfg.agents, store.clone(), pacer.clone());
        let demo = DemoRunner::new(DemoScript::humira(&cfg.demo), cfg.browser.default_url.clone());
        Self {
            store,
            router,
            demo,
            pacer,
            browser: cfg.browser.clone(),
            profile: UserProfile::demo(),
            prompt_delay: cfg.agents.prompt_builder(),
        }
    }

    pub fn state(&self) -> UiState {
        self.store.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.store.subscribe()
    }

    /// 用户编辑输入框；演示打字或请求处理中时忽略，返回 false
    pub fn set_input(&self, text: &str) -> bool {
        self.store.update_if(|s| {
            if s.input_locked() {
                return false;
            }
            s.input.value = text.to_string();
            true
        })
    }

    pub fn set_deep_research(&self, enabled: bool) {
        self.store.update(|s| s.deep_research = enabled);
    }

    /// 发送当前输入框内容
    pub async fn send_current_input(&self) -> Result<Option<Message>, AppError> {
        let (text, typing) = self
            .store
            .read(|s| (s.input.value.clone(), s.input.typing));
        // 处理中的情况交给 submit 报 Busy
        if typing {
            return Ok(None);
        }
        self.submit(&text).await
    }

    /// 发送一条用户消息：追加到对话、按需打开 Computer-Use 面板、路由并追加回复。
    /// 空白输入被忽略；已有请求在处理时返回 Busy 且不改动任何状态。
    pub async fn submit(&self, text: &str) -> Result<Option<Message>, AppError> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        let guard = match self.store.begin_request() {
            Ok(guard) => guard,
            Err(e) => {
                warn!("Rejecting message while another request is in flight");
                self.store.set_notice(e.to_string());
                return Err(e);
            }
        };

        self.store.update(|s| {
            s.transcript.push(Message::user(text));
            s.hero_visible = false;
        });

        if requires_computer_agent(text) {
            let task = format!("Researching: {}", text);
            self.start_computer_agent(&task, Some(self.browser.home_url.as_str()));
        }

        let deep_research = self.store.read(|s| s.deep_research);
        let reply = match self.router.route_with(guard, text, deep_research).await {
            Ok(reply) => reply,
            Err(e) => {
                self.store.set_notice(e.to_string());
                return Err(e);
            }
        };

        if let Some(message) = &reply {
            self.store.push_message(message.clone());
        }
        self.store.update(|s| s.input.value.clear());
        Ok(reply)
    }

    /// 直接驱动路由状态机，不经过对话与 Computer-Use 触发
    pub async fn route(&self, text: &str, deep_research: bool) -> Result<Option<Message>, AppError> {
        self.router.route(text, deep_research).await
    }

    /// 打开（或覆盖）Computer-Use 会话，返回新的 session_id
    pub fn start_computer_agent(&self, task: &str, url: Option<&str>) -> String {
        let mut session_id = String::new();
        self.store.update(|s| {
            session_id = s
                .computer_agent
                .start(task, url, &self.browser.default_url)
                .to_string();
        });
        info!(%session_id, %task, "Computer-use session started");
        session_id
    }

    /// 仅在会话激活时生效
    pub fn update_computer_agent_task(&self, task: &str) -> bool {
        self.store.update_if(|s| s.computer_agent.update_task(task))
    }

    /// 仅在会话激活时生效
    pub fn update_computer_agent_url(&self, url: &str) -> bool {
        self.store.update_if(|s| s.computer_agent.update_url(url))
    }

    pub fn stop_computer_agent(&self) {
        self.store.update(|s| s.computer_agent.stop());
        info!("Computer-use session stopped");
    }

    /// 浏览按钮：未打开时打开主页，已打开时关闭
    pub fn toggle_browser(&self) {
        if self.store.read(|s| s.computer_agent.is_active) {
            self.stop_computer_agent();
        } else {
            self.start_computer_agent(BROWSE_TASK, Some(self.browser.home_url.as_str()));
        }
    }

    pub fn add_to_care_team(&self, provider: ProviderResult) -> bool {
        let id = provider.id.clone();
        let added = self.store.update_if(|s| s.care_team.add(provider));
        debug!(%id, added, "Add to care team");
        added
    }

    /// 从最近一次检索结果中按 id 加入护理团队
    pub fn add_result_to_care_team(&self, id: &str) -> Result<bool, AppError> {
        let provider = self
            .store
            .read(|s| s.agent_data.find_provider(id).cloned())
            .ok_or_else(|| AppError::UnknownProvider(id.to_string()))?;
        Ok(self.add_to_care_team(provider))
    }

    pub fn remove_from_care_team(&self, id: &str) -> bool {
        let removed = self.store.update_if(|s| s.care_team.remove(id));
        debug!(%id, removed, "Remove from care team");
        removed
    }

    pub fn user_profile(&self) -> &UserProfile {
        &self.profile
    }

    /// 以用户档案预填的检索提示词输入
    pub fn patient_info(&self, specialty: &str) -> PatientInfo {
        let mut info = PatientInfo::from_profile(&self.profile);
        info.specialty = specialty.trim().to_string();
        info
    }

    /// 模拟生成耗时后把个性化提示词填入输入框（输入框锁定时不覆盖），返回提示词
    pub async fn build_prompt(&self, info: &PatientInfo) -> Result<String, AppError> {
        debug!(specialty = %info.specialty, "Generating personalized prompt");
        self.pacer.pause(self.prompt_delay).await?;
        let prompt = generate_personalized_prompt(info);
        self.fill_input(&prompt);
        Ok(prompt)
    }

    /// 用药表单提交：生成用药管理提示词并填入输入框
    pub fn prepare_medication_prompt(&self, request: &MedicationRequest) -> String {
        let prompt = generate_medication_prompt(request, &self.profile);
        self.fill_input(&prompt);
        prompt
    }

    fn fill_input(&self, text: &str) {
        let filled = self.set_input(text);
        if !filled {
            warn!("Input is locked, generated prompt not placed in the input field");
        }
    }

    /// 首屏演示；整个生命周期只执行一次
    pub async fn run_demo(&self) -> Result<DemoOutcome, AppError> {
        self.demo.run(&self.store, &self.pacer).await
    }

    pub fn report(&self, error: &AppError) {
        self.store.set_notice(error.to_string());
    }
}
