//! 事件处理
//!
//! 轮询 crossterm 键盘事件：Ctrl+B / Ctrl+R / Ctrl+Q 直接转为 Command 发给编排器，
//! Ctrl+T 是纯界面动作（护理团队面板），其余按键交给 run_app 编辑输入框。

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;

use crate::core::Command;

/// 应用事件：来自快捷键的 Command、界面动作或原始 KeyEvent
#[derive(Debug, Clone)]
pub enum AppEvent {
    Command(Command),
    ToggleCareTeam,
    /// 深度研究开关（需要当前状态才能取反，由 run_app 发送）
    ToggleDeepResearch,
    Key(KeyEvent),
}

/// 事件处理器：持有 cmd_tx，poll 时读键盘并返回 AppEvent
pub struct EventHandler {
    cmd_tx: mpsc::UnboundedSender<Command>,
}

impl EventHandler {
    pub fn new(cmd_tx: mpsc::UnboundedSender<Command>) -> Self {
        Self { cmd_tx }
    }

    pub fn poll(&self) -> anyhow::Result<Option<AppEvent>> {
        if event::poll(std::time::Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(Some(self.handle_key(key)));
                }
            }
        }
        Ok(None)
    }

    pub fn handle_key(&self, key: KeyEvent) -> AppEvent {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('b') if ctrl => {
                self.send(Command::ToggleBrowser);
                AppEvent::Command(Command::ToggleBrowser)
            }
            KeyCode::Char('r') if ctrl => AppEvent::ToggleDeepResearch,
            KeyCode::Char('t') if ctrl => AppEvent::ToggleCareTeam,
            KeyCode::Char('q') | KeyCode::Char('c') if ctrl => {
                self.send(Command::Quit);
                AppEvent::Command(Command::Quit)
            }
            _ => AppEvent::Key(key),
        }
    }

    pub fn send(&self, cmd: Command) {
        let _ = self.cmd_tx.send(cmd);
    }
}

/// 解析输入框里的斜杠命令；普通消息返回 Submit
pub fn parse_input(input: &str) -> Option<Command> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if let Some(id) = input.strip_prefix("/add ") {
        return Some(Command::AddToCareTeam(id.trim().to_string()));
    }
    if let Some(id) = input.strip_prefix("/remove ") {
        return Some(Command::RemoveFromCareTeam(id.trim().to_string()));
    }
    if let Some(specialty) = input.strip_prefix("/prompt ") {
        return Some(Command::BuildPrompt(specialty.trim().to_string()));
    }
    if let Some(name) = input.strip_prefix("/medication ") {
        return Some(Command::MedicationPrompt(name.trim().to_string()));
    }
    if matches!(input, "/quit" | "/exit") {
        return Some(Command::Quit);
    }
    Some(Command::Submit(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_parse_input() {
        assert_eq!(parse_input("   "), None);
        assert_eq!(
            parse_input("/add 2"),
            Some(Command::AddToCareTeam("2".to_string()))
        );
        assert_eq!(
            parse_input("/remove  3 "),
            Some(Command::RemoveFromCareTeam("3".to_string()))
        );
        assert_eq!(parse_input("/quit"), Some(Command::Quit));
        assert_eq!(
            parse_input("/prompt cardiology"),
            Some(Command::BuildPrompt("cardiology".to_string()))
        );
        assert_eq!(
            parse_input("/medication Humira"),
            Some(Command::MedicationPrompt("Humira".to_string()))
        );
        assert_eq!(
            parse_input(" find a doctor "),
            Some(Command::Submit("find a doctor".to_string()))
        );
    }

    #[test]
    fn test_shortcuts_are_forwarded() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handler = EventHandler::new(tx);

        let ev = handler.handle_key(key(KeyCode::Char('b'), KeyModifiers::CONTROL));
        assert!(matches!(ev, AppEvent::Command(Command::ToggleBrowser)));
        assert_eq!(rx.try_recv().unwrap(), Command::ToggleBrowser);

        let ev = handler.handle_key(key(KeyCode::Char('t'), KeyModifiers::CONTROL));
        assert!(matches!(ev, AppEvent::ToggleCareTeam));
        assert!(rx.try_recv().is_err());

        let ev = handler.handle_key(key(KeyCode::Char('b'), KeyModifiers::NONE));
        assert!(matches!(ev, AppEvent::Key(_)));
    }
}
