//! Computer-Use 会话：右侧浏览器 / 视频面板的开关状态
//!
//! 不变式：is_active 为 true 当且仅当 task / url / session_id 全部非空；stop 后全部为空。
//! 触发来源有两个：用户点浏览按钮，或输入命中 BROWSE_TRIGGERS（与路由关键词表相互独立）。

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use serde::Serialize;

/// 需要打开 Computer-Use 面板的关键词（输入已小写）
pub const BROWSE_TRIGGERS: &[&str] = &[
    "research",
    "look up",
    "find information",
    "check reviews",
    "verify",
    "browse",
    "search online",
    "deep research",
];

/// 输入是否要求打开 Computer-Use 面板
pub fn requires_computer_agent(text: &str) -> bool {
    let lowered = text.to_lowercase();
    BROWSE_TRIGGERS.iter().any(|t| lowered.contains(t))
}

static NEXT_SESSION_SEQ: AtomicU64 = AtomicU64::new(0);

/// 毫秒时间戳 + 进程内递增序号，同一毫秒内多次 start 也不会重复
fn next_session_id() -> String {
    let seq = NEXT_SESSION_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("cua_{}_{}", Utc::now().timestamp_millis(), seq)
}

/// 面板里展示的内容类型
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelContent<'a> {
    Video(&'a str),
    Page(&'a str),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ComputerAgentSession {
    pub is_active: bool,
    pub current_task: Option<String>,
    pub live_url: Option<String>,
    pub session_id: Option<String>,
}

impl ComputerAgentSession {
    /// 覆盖当前会话并生成新的 session_id；url 为空时使用 default_url
    pub fn start(&mut self, task: &str, url: Option<&str>, default_url: &str) -> &str {
        self.is_active = true;
        self.current_task = Some(task.to_string());
        self.live_url = Some(url.unwrap_or(default_url).to_string());
        self.session_id.insert(next_session_id()).as_str()
    }

    /// 无条件复位，幂等
    pub fn stop(&mut self) {
        *self = Self::default();
    }

    /// 仅在会话活跃时更新任务描述
    pub fn update_task(&mut self, task: &str) -> bool {
        if !self.is_active {
            return false;
        }
        self.current_task = Some(task.to_string());
        true
    }

    /// 仅在会话活跃时更新地址
    pub fn update_url(&mut self, url: &str) -> bool {
        if !self.is_active {
            return false;
        }
        self.live_url = Some(url.to_string());
        true
    }

    pub fn content(&self) -> Option<PanelContent<'_>> {
        let url = self.live_url.as_deref()?;
        if url.ends_with(".mov") || url.ends_with(".mp4") || url.contains("/videos/") {
            Some(PanelContent::Video(url))
        } else {
            Some(PanelContent::Page(url))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT: &str = "https://example.com";

    fn assert_invariant(s: &ComputerAgentSession) {
        let all_set = s.current_task.is_some() && s.live_url.is_some() && s.session_id.is_some();
        let all_none = s.current_task.is_none() && s.live_url.is_none() && s.session_id.is_none();
        assert!(if s.is_active { all_set } else { all_none });
    }

    #[test]
    fn test_restart_overwrites_session() {
        let mut s = ComputerAgentSession::default();
        let first = s.start("t", Some("u"), DEFAULT).to_string();
        let second = s.start("t2", Some("u2"), DEFAULT).to_string();

        assert!(s.is_active);
        assert_eq!(s.current_task.as_deref(), Some("t2"));
        assert_eq!(s.live_url.as_deref(), Some("u2"));
        assert_ne!(first, second);
        assert!(second.starts_with("cua_"));
        assert_invariant(&s);
    }

    #[test]
    fn test_start_without_url_uses_default() {
        let mut s = ComputerAgentSession::default();
        s.start("task", None, DEFAULT);
        assert_eq!(s.live_url.as_deref(), Some(DEFAULT));
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut s = ComputerAgentSession::default();
        s.start("t", None, DEFAULT);
        s.stop();
        s.stop();
        assert_eq!(s, ComputerAgentSession::default());
        assert_invariant(&s);
    }

    #[test]
    fn test_updates_ignored_when_inactive() {
        let mut s = ComputerAgentSession::default();
        assert!(!s.update_task("x"));
        assert!(!s.update_url("y"));
        assert_invariant(&s);

        s.start("t", None, DEFAULT);
        assert!(s.update_url("https://cdn.test/clip.mp4"));
        assert_eq!(s.content(), Some(PanelContent::Video("https://cdn.test/clip.mp4")));
    }

    #[test]
    fn test_content_kind() {
        let mut s = ComputerAgentSession::default();
        assert_eq!(s.content(), None);
        s.start("t", Some("https://ron-ai.io"), DEFAULT);
        assert_eq!(s.content(), Some(PanelContent::Page("https://ron-ai.io")));
    }

    #[test]
    fn test_browse_triggers_independent_of_routing() {
        assert!(requires_computer_agent("Please VERIFY this clinic"));
        assert!(requires_computer_agent("can you check reviews for Dr. Lee"));
        assert!(!requires_computer_agent("find a doctor"));
    }
}
