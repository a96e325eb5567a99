//! 界面渲染
//!
//! 根据 UiState 绘制：标题栏显示状态文字与深度研究开关；主体为首屏文案或对话 + 智能体结果；
//! Computer-Use 会话激活时右侧显示面板；底部为输入框与快捷键提示。

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap},
    Frame,
};

use crate::agents::{AgentCategory, AgentData, ProviderResult};
use crate::computer_agent::{ComputerAgentSession, PanelContent};
use crate::core::UiState;
use crate::transcript::Role;

const HERO_TITLE: &str = "Your Health Advocacy Co-Pilot";
const HERO_SUBTITLE: &str =
    "Get clarity and confidence in your healthcare decisions with AI-powered insights and expert recommendations.";

/// 仅属于界面的状态（不进入 UiState）
#[derive(Debug, Default, Clone)]
pub struct ViewState {
    pub scroll: usize,
    pub show_care_team: bool,
}

/// 将内容按宽度换行，支持 UTF-8（按字符数，避免在 UTF-8 中间截断）
fn wrap_text(s: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![s.to_string()];
    }
    let mut lines = Vec::new();
    for para in s.split('\n') {
        let mut line = String::new();
        for ch in para.chars() {
            if line.chars().count() >= width {
                lines.push(std::mem::take(&mut line));
            }
            line.push(ch);
        }
        lines.push(line);
    }
    lines
}

fn stars(rating: f32) -> String {
    let full = rating.round().clamp(0.0, 5.0) as usize;
    format!("{}{}", "★".repeat(full), "☆".repeat(5 - full))
}

fn provider_lines(p: &ProviderResult, in_team: bool) -> Vec<Line<'static>> {
    let marker = if in_team { " ✓ care team" } else { "" };
    vec![
        Line::from(vec![
            Span::styled(
                format!("[{}] {}", p.id, p.name),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" · {}", p.specialty)),
            Span::styled(marker.to_string(), Style::default().fg(Color::Green)),
        ]),
        Line::from(format!(
            "    {} {:.1} ({} reviews) · {} · {} · {}",
            stars(p.rating),
            p.rating,
            p.review_count,
            p.location,
            p.distance_label,
            p.availability_label
        )),
        Line::from(Span::styled(
            format!("    {}", p.ai_summary),
            Style::default().fg(Color::Gray),
        )),
    ]
}

fn heading(text: String) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
    ))
}

/// 当前智能体的结果视图；只显示 current_agent 对应的数据槽
fn agent_data_lines(data: &AgentData, state: &UiState) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let Some(agent) = state.current_agent else {
        return lines;
    };

    match agent.category {
        AgentCategory::ProviderSearch => {
            if let Some(search) = &data.provider_search {
                lines.push(Line::from(""));
                lines.push(heading(format!(
                    "Providers for \"{}\" (/add <id> to add to care team)",
                    search.search_query
                )));
                for p in &search.results {
                    lines.extend(provider_lines(p, state.care_team.contains(&p.id)));
                }
            }
        }
        AgentCategory::Medication => {
            if let Some(meds) = &data.medication {
                lines.push(Line::from(""));
                lines.push(heading("Current medications".to_string()));
                for m in &meds.current_medications {
                    let refill = if m.needs_refill { " · refill needed" } else { "" };
                    lines.push(Line::from(format!(
                        "  {} {} · next {} · {} refills{}",
                        m.name,
                        m.dosage,
                        m.next_due.format("%b %d %H:%M"),
                        m.refills_remaining,
                        refill
                    )));
                    if let Some(saving) = &m.cost_saving {
                        lines.push(Line::from(Span::styled(
                            format!(
                                "    ${:.2} → save ${:.2}: {}",
                                saving.current_cost, saving.potential_savings, saving.suggestion
                            ),
                            Style::default().fg(Color::Green),
                        )));
                    }
                }
                for r in &meds.reminders {
                    lines.push(Line::from(format!(
                        "  ⏰ {} · {}",
                        r.time.format("%b %d %H:%M"),
                        r.message
                    )));
                }
            }
        }
        AgentCategory::Appointment => {
            lines.push(Line::from(""));
            lines.push(heading("Appointment Scheduling".to_string()));
            let slots = data
                .appointment
                .as_ref()
                .map(|a| a.available_slots.as_slice())
                .unwrap_or_default();
            if slots.is_empty() {
                lines.push(Line::from("  Appointment scheduling interface coming soon..."));
            }
            for slot in slots {
                lines.push(Line::from(format!("  {}", slot.format("%a %b %d %H:%M"))));
            }
        }
        AgentCategory::General => {}
    }
    lines
}

fn conversation_lines(state: &UiState, width: usize) -> Vec<Line<'static>> {
    let mut text_lines: Vec<Line> = Vec::new();
    for (idx, m) in state.transcript.messages().iter().enumerate() {
        if idx > 0 {
            text_lines.push(Line::from(""));
        }
        let (prefix, color) = match m.role {
            Role::User => ("You ", Color::Cyan),
            Role::Assistant => ("Ron ", Color::Green),
        };
        for (i, line) in wrap_text(&m.content, width.max(20)).into_iter().enumerate() {
            let pref = if i == 0 { prefix } else { "    " };
            text_lines.push(Line::from(vec![
                Span::styled(pref, Style::default().fg(color).add_modifier(Modifier::BOLD)),
                Span::raw(line),
            ]));
        }
    }
    text_lines.extend(agent_data_lines(&state.agent_data, state));
    text_lines
}

fn draw_hero(f: &mut Frame, area: Rect) {
    let text = Text::from(vec![
        Line::from(""),
        Line::from(Span::styled(
            HERO_TITLE,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(HERO_SUBTITLE, Style::default().fg(Color::Gray))),
    ]);
    let hero = Paragraph::new(text)
        .alignment(ratatui::layout::Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(hero, area);
}

fn draw_computer_agent(f: &mut Frame, area: Rect, session: &ComputerAgentSession) {
    let title = format!(
        " Computer Use │ {} ",
        session.current_task.as_deref().unwrap_or("")
    );
    let body = match session.content() {
        Some(PanelContent::Video(url)) => vec![
            Line::from(Span::styled("▶ Playing recording", Style::default().fg(Color::Yellow))),
            Line::from(url.to_string()),
        ],
        Some(PanelContent::Page(url)) => vec![
            Line::from(Span::styled("🌐 Live page", Style::default().fg(Color::Yellow))),
            Line::from(url.to_string()),
        ],
        None => vec![Line::from("Waiting for the agent...")],
    };
    let mut lines = body;
    if let Some(id) = &session.session_id {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("session {}", id),
            Style::default().fg(Color::DarkGray),
        )));
    }
    let panel = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
    f.render_widget(panel, area);
}

fn draw_care_team(f: &mut Frame, area: Rect, state: &UiState) {
    let mut lines: Vec<Line> = Vec::new();
    if state.care_team.is_empty() {
        lines.push(Line::from("No providers yet. Search, then /add <id>."));
    }
    for p in state.care_team.members() {
        lines.push(Line::from(format!("[{}] {} · {}", p.id, p.name, p.specialty)));
    }
    let panel = Paragraph::new(Text::from(lines)).block(
        Block::default()
            .title(format!(" Care Team ({}) ", state.care_team.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)),
    );
    f.render_widget(panel, area);
}

/// 绘制一帧；将 (总行数, 可视高度) 写入 out 供外部 clamp 滚动
pub fn draw(
    f: &mut Frame,
    state: &UiState,
    input_buffer: &str,
    view: &ViewState,
    out: &mut (usize, usize),
) {
    let status_height = if state.processing { 1 } else { 0 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(status_height),
            Constraint::Length(3),
        ])
        .split(f.area());

    let columns = if state.computer_agent.is_active {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[0])
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(100)])
            .split(rows[0])
    };
    if state.computer_agent.is_active {
        draw_computer_agent(f, columns[1], &state.computer_agent);
    }

    let mut main_area = columns[0];
    if view.show_care_team {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(8)])
            .split(main_area);
        main_area = split[0];
        draw_care_team(f, split[1], state);
    }

    if state.hero_visible && state.transcript.is_empty() {
        draw_hero(f, main_area);
        *out = (0, 0);
    } else {
        let research = if state.deep_research { " │ deep research" } else { "" };
        let title = format!(
            " Ron AI │ {}{} ",
            state.status.message(state.current_agent.as_ref()),
            research
        );
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let width = main_area.width.saturating_sub(3) as usize;
        let text_lines = conversation_lines(state, width);

        let content_height = main_area.height.saturating_sub(2) as usize;
        let total_lines = text_lines.len();
        let scroll_offset = view.scroll.min(total_lines.saturating_sub(content_height));

        let inner = block.inner(main_area);
        f.render_widget(block, main_area);
        let paragraph = Paragraph::new(Text::from(text_lines))
            .wrap(Wrap { trim: false })
            .scroll((scroll_offset as u16, 0));
        f.render_widget(paragraph, inner);

        if total_lines > content_height {
            let mut scrollbar_state = ScrollbarState::new(total_lines)
                .position(scroll_offset)
                .viewport_content_length(content_height);
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .thumb_symbol("█")
                .track_symbol(Some("░"));
            f.render_stateful_widget(scrollbar, inner, &mut scrollbar_state);
        }
        *out = (total_lines, content_height);
    }

    if state.processing {
        let indicator = Paragraph::new(Line::from(Span::styled(
            format!(" ● {}", state.status.message(state.current_agent.as_ref())),
            Style::default().fg(Color::Yellow),
        )));
        f.render_widget(indicator, rows[1]);
    }

    let input_title = if let Some(notice) = &state.notice {
        format!(" {} ", notice.chars().take(48).collect::<String>())
    } else if state.input.typing {
        " Ron is typing a demo message… ".to_string()
    } else {
        " Message Ron ".to_string()
    };
    let border_color = if state.input.send_pressed {
        Color::Green
    } else if state.notice.is_some() {
        Color::Red
    } else {
        Color::Blue
    };
    let hint = " Enter send │ Ctrl+B browser │ Ctrl+R research │ Ctrl+T care team │ Ctrl+Q quit ";
    let input_block = Block::default()
        .title(input_title)
        .title_bottom(Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let input = Paragraph::new(input_buffer)
        .block(input_block)
        .style(if state.input.typing {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        });
    f.render_widget(input, rows[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(state: &UiState) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut out = (0, 0);
        terminal
            .draw(|f| draw(f, state, "", &ViewState::default(), &mut out))
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_wrap_text_by_chars() {
        assert_eq!(wrap_text("abcdef", 4), vec!["abcd", "ef"]);
        assert_eq!(wrap_text("a\n\nb", 4), vec!["a", "", "b"]);
    }

    #[test]
    fn test_hero_shown_initially() {
        let screen = render(&UiState::default());
        assert!(screen.contains(HERO_TITLE));
    }

    #[test]
    fn test_computer_agent_panel_rendered_when_active() {
        let mut state = UiState::default();
        state.hero_visible = false;
        state
            .computer_agent
            .start("Browsing", Some("https://ron-ai.io"), "https://example.com");
        let screen = render(&state);
        assert!(screen.contains("Computer Use"));
        assert!(screen.contains("https://ron-ai.io"));
    }

    #[test]
    fn test_only_current_agent_view_rendered() {
        use crate::agents::{mock, Agent, ProviderSearchPayload};

        let mut state = UiState::default();
        state.hero_visible = false;
        state.agent_data.provider_search = Some(ProviderSearchPayload {
            results: mock::providers(),
            search_query: "find a doctor".to_string(),
        });
        state.agent_data.medication = Some(mock::medication_bundle());

        state.current_agent = Some(Agent::for_category(AgentCategory::Medication));
        let screen = render(&state);
        assert!(screen.contains("Current medications"));
        assert!(!screen.contains("Providers for"));

        state.current_agent = Some(Agent::for_category(AgentCategory::Appointment));
        let screen = render(&state);
        assert!(screen.contains("Appointment scheduling interface coming soon..."));
        assert!(!screen.contains("Current medications"));

        state.current_agent = Some(Agent::for_category(AgentCategory::General));
        let screen = render(&state);
        assert!(!screen.contains("Providers for"));
        assert!(!screen.contains("Current medications"));
    }
}
