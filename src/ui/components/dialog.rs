//! Modal error dialog

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph},
    Frame,
};

const MAX_WIDTH: u16 = 60;
const TITLE: &str = "Something went wrong";

/// Render the oldest queued error centered over the form.
/// `queued` is the total number of errors waiting, including this one.
pub fn render_error_dialog(frame: &mut Frame, message: &str, queued: usize) {
    let area = frame.area();
    let title = dialog_title(queued);
    let width = MAX_WIDTH.min(area.width);
    // Borders plus one column of padding each side
    let text_width = width.saturating_sub(4) as usize;
    let body = message_lines(message, text_width);

    // Title, blank, body, blank, hint and borders
    let height = (body.len() as u16 + 6).min(area.height);
    let dialog_area = centered(area, width, height);

    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut content = vec![
        Line::from(Span::styled(
            title,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    content.extend(body.into_iter().map(Line::from));
    content.push(Line::from(""));
    content.push(Line::from(vec![
        Span::raw("Press "),
        Span::styled("Enter", key_style),
        Span::raw(" or "),
        Span::styled("Esc", key_style),
        Span::raw(" to continue editing"),
    ]));

    let dialog = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .padding(Padding::horizontal(1))
            .style(Style::default().bg(Color::Black)),
    );

    frame.render_widget(Clear, dialog_area);
    frame.render_widget(dialog, dialog_area);
}

fn dialog_title(queued: usize) -> String {
    if queued > 1 {
        format!("{TITLE} (1 of {queued})")
    } else {
        TITLE.to_string()
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

/// Word wrap `message` to `width` columns. Words longer than a line, such as
/// file paths in I/O errors, are split across lines.
fn message_lines(message: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in message.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            let used = line.chars().count();
            if used > 0 && used + 1 + word.len() > width {
                lines.push(std::mem::take(&mut line));
            }
            while word.len() > width {
                let rest = word.split_off(width);
                lines.push(word.into_iter().collect());
                word = rest;
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.extend(word);
        }
        lines.push(line);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
