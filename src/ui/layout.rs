//! Layout components (header, status bar)

use super::components::BUTTON_HEIGHT;
use crate::app::App;
use crate::platform::{BACK_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::BankAccountStep;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Split the screen into header, form body and submit button, keeping the
/// bottom line for the status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Header
            Constraint::Min(0),                // Form body
            Constraint::Length(BUTTON_HEIGHT), // Submit button
            Constraint::Length(1),             // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Draw the step header
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let step = BankAccountStep::AchContract;
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("Step {} of {}", step.number(), BankAccountStep::total()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw("  "),
        Span::styled(
            step.label(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .block(
        Block::default()
            .title(format!(" Connect bank account · {} ", app.company_name))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(header, area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![Span::styled(
        format!(" {}", key_hints()),
        Style::default().fg(Color::Gray),
    )];

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Yellow)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);
}

fn key_hints() -> String {
    format!("Tab:next  Space:toggle  {SUBMIT_SHORTCUT}:submit  {BACK_SHORTCUT}:back  Esc:close")
}
