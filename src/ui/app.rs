//! TUI 应用主循环
//!
//! 进入全屏/原始模式，轮询 state_rx 与键盘事件，将用户输入与快捷键转为 Command 发送给编排器，
//! 每帧用 draw 渲染 UiState。输入框内容以 UiState.input 为准（演示脚本也会往里「打字」）。

use std::io::{self, Stdout};

use crossterm::event::KeyCode;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::{mpsc, watch};

use crate::core::{Command, UiState};
use crate::ui::event::{parse_input, AppEvent, EventHandler};
use crate::ui::render::{draw, ViewState};

/// 运行 TUI：启用原始模式与全屏，循环 poll 事件 + 渲染，退出时恢复终端
pub async fn run_app(
    mut state_rx: watch::Receiver<UiState>,
    cmd_tx: mpsc::UnboundedSender<Command>,
) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut state_rx, cmd_tx).await;

    restore_terminal(&mut terminal)?;
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state_rx: &mut watch::Receiver<UiState>,
    cmd_tx: mpsc::UnboundedSender<Command>,
) -> anyhow::Result<()> {
    let event_handler = EventHandler::new(cmd_tx);
    let mut view = ViewState::default();
    let mut input_buffer = String::new();
    let mut last_seen_input = String::new();
    let mut last_transcript_len = 0usize;

    loop {
        // 编排器已退出（Quit 或信号）
        if state_rx.has_changed().is_err() {
            break;
        }
        let state = state_rx.borrow_and_update().clone();

        if state.input.value != last_seen_input {
            last_seen_input = state.input.value.clone();
            input_buffer = state.input.value.clone();
        }
        if state.transcript.len() != last_transcript_len {
            last_transcript_len = state.transcript.len();
            view.scroll = usize::MAX;
        }

        if let Ok(Some(ev)) = event_handler.poll() {
            match ev {
                AppEvent::Command(Command::Quit) => break,
                AppEvent::Command(_) => {}
                AppEvent::ToggleCareTeam => view.show_care_team = !view.show_care_team,
                AppEvent::ToggleDeepResearch => {
                    event_handler.send(Command::SetDeepResearch(!state.deep_research));
                }
                AppEvent::Key(key) => match key.code {
                    // 演示打字或请求处理中不接受编辑与发送，滚动不受影响
                    KeyCode::Enter | KeyCode::Backspace | KeyCode::Char(_)
                        if state.input_locked() => {}
                    KeyCode::Enter => {
                        if let Some(cmd) = parse_input(&input_buffer) {
                            let quit = cmd == Command::Quit;
                            event_handler.send(cmd);
                            if quit {
                                break;
                            }
                            input_buffer.clear();
                            event_handler.send(Command::Input(String::new()));
                        }
                    }
                    KeyCode::Backspace => {
                        input_buffer.pop();
                        event_handler.send(Command::Input(input_buffer.clone()));
                    }
                    KeyCode::Char(c) => {
                        input_buffer.push(c);
                        event_handler.send(Command::Input(input_buffer.clone()));
                    }
                    KeyCode::Up => view.scroll = view.scroll.saturating_sub(1),
                    KeyCode::Down => view.scroll = view.scroll.saturating_add(1),
                    KeyCode::PageUp => view.scroll = view.scroll.saturating_sub(10),
                    KeyCode::PageDown => view.scroll = view.scroll.saturating_add(10),
                    KeyCode::Home => view.scroll = 0,
                    KeyCode::End => view.scroll = usize::MAX,
                    _ => {}
                },
            }
        }

        let mut scroll_info = (0usize, 0usize);
        terminal.draw(|f| draw(f, &state, &input_buffer, &view, &mut scroll_info))?;
        let (total_lines, viewport_height) = scroll_info;
        view.scroll = view.scroll.min(total_lines.saturating_sub(viewport_height));

        tokio::task::yield_now().await;
    }
    Ok(())
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
