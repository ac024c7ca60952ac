//! Checkbox rows

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Cyan when focused, default otherwise
pub fn focus_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

/// A `[x] label` row, indented by `indent` spaces
pub fn checkbox_line(
    indent: usize,
    checked: bool,
    label: String,
    is_focused: bool,
) -> Line<'static> {
    let mark = if checked { "[x]" } else { "[ ]" };
    let mark_style = if checked {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let pointer = if is_focused { "›" } else { " " };

    Line::from(vec![
        Span::styled(
            format!("{}{pointer} ", " ".repeat(indent)),
            focus_style(is_focused),
        ),
        Span::styled(mark, if is_focused { focus_style(true) } else { mark_style }),
        Span::raw(" "),
        Span::styled(label, focus_style(is_focused)),
    ])
}
