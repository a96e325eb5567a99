//! 演示脚本：固定顺序的「等待 / 动作」步骤表
//!
//! 脚本只是数据，没有分支；DemoRunner 负责逐步执行。

use std::time::Duration;

use crate::agents::mock::HUMIRA_RESPONSE;
use crate::config::DemoSection;

/// 演示中用户「输入」的消息
pub const DEMO_USER_MESSAGE: &str = "Hi Ron, I was prescribed Humira, and even with insurance, there's no way I can afford it. Can you help me out?";

pub const DEMO_TASK: &str = "Showing cost-saving research for Humira";

pub const DEMO_VIDEO_URL: &str = "https://hebbkx1anhila5yf.public.blob.vercel-storage.com/Ron%20AI-7_21_2025%2C%209_30%E2%80%AFAM-wlBkV5MtoPcCEVbKa2hHRzMV7swpCR.mp4";

/// 逐字显示一段文本所需时间
pub fn typewriter_duration(text: &str, per_char: Duration) -> Duration {
    per_char * text.chars().count() as u32
}

/// 单个 UI 动作
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DemoAction {
    HideHero,
    /// 进入打字模式，输入框由脚本控制
    BeginTyping,
    SetInput(String),
    PressSend,
    /// 追加用户消息，清空输入，退出打字模式并松开按钮
    SendUserMessage(String),
    AppendAssistant(String),
    StartComputerAgent { task: String, url: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DemoStep {
    Wait(Duration),
    Act(DemoAction),
}

#[derive(Clone, Debug, Default)]
pub struct DemoScript {
    steps: Vec<DemoStep>,
}

impl DemoScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wait(mut self, duration: Duration) -> Self {
        self.steps.push(DemoStep::Wait(duration));
        self
    }

    pub fn act(mut self, action: DemoAction) -> Self {
        self.steps.push(DemoStep::Act(action));
        self
    }

    /// 逐字把 text 填入输入框：依次设置长度 0..=len 的前缀，每次之后等待 interval
    pub fn type_text(mut self, text: &str, interval: Duration) -> Self {
        let total = text.chars().count();
        for n in 0..=total {
            let prefix: String = text.chars().take(n).collect();
            self.steps.push(DemoStep::Act(DemoAction::SetInput(prefix)));
            self.steps.push(DemoStep::Wait(interval));
        }
        self
    }

    /// 首屏演示：用户抱怨 Humira 太贵 → Ron 回复 → 打开视频面板
    pub fn humira(cfg: &DemoSection) -> Self {
        let ms = Duration::from_millis;
        let typewriter = typewriter_duration(HUMIRA_RESPONSE, ms(cfg.typewriter_per_char_ms))
            + ms(cfg.typewriter_buffer_ms);

        Self::new()
            .wait(ms(cfg.start_delay_ms))
            .act(DemoAction::HideHero)
            .wait(ms(cfg.hero_exit_ms))
            .act(DemoAction::BeginTyping)
            .type_text(DEMO_USER_MESSAGE, ms(cfg.keystroke_ms))
            .wait(ms(cfg.pre_send_ms))
            .act(DemoAction::PressSend)
            .wait(ms(cfg.press_ms))
            .act(DemoAction::SendUserMessage(DEMO_USER_MESSAGE.to_string()))
            .wait(ms(cfg.reply_delay_ms))
            .act(DemoAction::AppendAssistant(HUMIRA_RESPONSE.to_string()))
            .wait(typewriter)
            .wait(ms(cfg.panel_delay_ms))
            .act(DemoAction::StartComputerAgent {
                task: DEMO_TASK.to_string(),
                url: DEMO_VIDEO_URL.to_string(),
            })
    }

    pub fn steps(&self) -> &[DemoStep] {
        &self.steps
    }

    /// 所有等待之和
    pub fn total_duration(&self) -> Duration {
        self.steps
            .iter()
            .filter_map(|s| match s {
                DemoStep::Wait(d) => Some(*d),
                DemoStep::Act(_) => None,
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actions(script: &DemoScript) -> Vec<&DemoAction> {
        script
            .steps()
            .iter()
            .filter_map(|s| match s {
                DemoStep::Act(a) => Some(a),
                DemoStep::Wait(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_type_text_reveals_growing_prefixes() {
        let script = DemoScript::new().type_text("abc", Duration::from_millis(30));
        let inputs: Vec<&str> = actions(&script)
            .into_iter()
            .map(|a| match a {
                DemoAction::SetInput(s) => s.as_str(),
                _ => panic!("unexpected action"),
            })
            .collect();
        assert_eq!(inputs, ["", "a", "ab", "abc"]);
        assert_eq!(script.total_duration(), Duration::from_millis(120));
    }

    #[test]
    fn test_humira_script_order_and_timing() {
        let cfg = DemoSection::default();
        let script = DemoScript::humira(&cfg);
        let acts = actions(&script);

        assert_eq!(acts.first(), Some(&&DemoAction::HideHero));
        assert_eq!(acts[1], &DemoAction::BeginTyping);
        assert!(matches!(
            acts.last(),
            Some(DemoAction::StartComputerAgent { url, .. }) if url == DEMO_VIDEO_URL
        ));

        let keystrokes = DEMO_USER_MESSAGE.chars().count() as u64 + 1;
        let reply_chars = HUMIRA_RESPONSE.chars().count() as u64;
        let expected = 2000 + 500 + keystrokes * 30 + 500 + 200 + 2000 + (reply_chars * 15 + 1000) + 1500;
        assert_eq!(script.total_duration(), Duration::from_millis(expected));
    }

    #[test]
    fn test_typewriter_duration() {
        assert_eq!(
            typewriter_duration("héllo", Duration::from_millis(15)),
            Duration::from_millis(75)
        );
    }
}
