//! Beneficial owners and agreements form

use super::components::{checkbox_line, focus_style, render_button};
use crate::app::App;
use crate::controller::StepPhase;
use crate::state::{
    error_text, BeneficialOwner, Checkbox, ErrorPath, FocusTarget, OwnerField, DOB_AGE_KEY,
};
use crate::validation::validate_identity;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rendered form body plus the row holding the focused element
pub struct FormLines {
    pub lines: Vec<Line<'static>>,
    pub focus_line: Option<usize>,
}

impl FormLines {
    fn push(&mut self, line: Line<'static>) {
        self.lines.push(line);
    }

    fn push_focusable(&mut self, line: Line<'static>, is_focused: bool) {
        if is_focused {
            self.focus_line = Some(self.lines.len());
        }
        self.lines.push(line);
    }

    fn blank(&mut self) {
        self.lines.push(Line::from(""));
    }
}

pub fn checkbox_label(checkbox: Checkbox, company_name: &str) -> String {
    match checkbox {
        Checkbox::OwnsMoreThan25Percent => {
            format!("I own more than 25% of {company_name}")
        }
        Checkbox::HasOtherBeneficialOwners => {
            format!("Somebody else owns more than 25% of {company_name}")
        }
        Checkbox::AcceptTermsAndConditions => "I accept the terms and conditions".to_string(),
        Checkbox::CertifyTrueInformation => {
            "I certify that the information provided is true and accurate".to_string()
        }
    }
}

fn section_title(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
}

fn error_line(indent: usize, key: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("{}! {}", " ".repeat(indent), error_text(key)),
        Style::default().fg(Color::Red),
    ))
}

fn field_line(label: &str, value: &str, is_focused: bool) -> Line<'static> {
    let value_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else if value.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    let shown = if value.is_empty() && !is_focused {
        "(empty)".to_string()
    } else {
        value.to_string()
    };
    let cursor = if is_focused { "▌" } else { "" };
    let pointer = if is_focused { "›" } else { " " };

    Line::from(vec![
        Span::styled(format!("    {pointer} {label}: "), focus_style(is_focused)),
        Span::styled(shown, value_style),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ])
}

fn link_line(indent: usize, text: &str, is_focused: bool) -> Line<'static> {
    let pointer = if is_focused { "›" } else { " " };
    let style = if is_focused {
        focus_style(true)
    } else {
        Style::default().fg(Color::Blue)
    };
    Line::from(vec![
        Span::raw(format!("{}{pointer} ", " ".repeat(indent))),
        Span::styled(format!("[ {text} ]"), style),
    ])
}

fn owner_heading(index: usize, owner: &BeneficialOwner, has_errors: bool) -> Line<'static> {
    let (status, color) = if has_errors {
        ("needs attention", Color::Red)
    } else if owner.is_blank() {
        ("not started", Color::DarkGray)
    } else if validate_identity(owner).is_empty() {
        ("complete", Color::Green)
    } else {
        ("in progress", Color::Yellow)
    };
    Line::from(vec![
        Span::styled(
            format!("  Additional owner {}", index + 1),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  ({status})"), Style::default().fg(color)),
    ])
}

/// Lay out every row of the form for the current state
pub fn build_form_lines(app: &App, focused: Option<FocusTarget>) -> FormLines {
    let form = app.contract.form();
    let errors = app.contract.errors();
    let is_focused = |target: FocusTarget| focused == Some(target);
    let mut out = FormLines {
        lines: Vec::new(),
        focus_line: None,
    };

    out.push(section_title("Beneficial owners"));
    out.push(Line::from(Span::styled(
        "Any individual who owns 25% or more of the business must be listed.",
        Style::default().fg(Color::DarkGray),
    )));
    out.blank();

    for checkbox in [Checkbox::OwnsMoreThan25Percent, Checkbox::HasOtherBeneficialOwners] {
        let target = FocusTarget::Checkbox(checkbox);
        out.push_focusable(
            checkbox_line(
                0,
                form.checkbox(checkbox),
                checkbox_label(checkbox, &app.company_name),
                is_focused(target),
            ),
            is_focused(target),
        );
    }

    if form.has_other_beneficial_owners {
        let can_remove = form.beneficial_owners.can_remove();
        for (index, owner) in form.beneficial_owners.iter().enumerate() {
            out.blank();
            let has_errors = errors.owner(index).is_some_and(|e| !e.is_empty());
            out.push(owner_heading(index, owner, has_errors));

            for field in OwnerField::TEXT_FIELDS {
                let target = FocusTarget::OwnerField { index, field };
                out.push_focusable(
                    field_line(field.label(), owner.text(field), is_focused(target)),
                    is_focused(target),
                );
                if errors.has(&ErrorPath::owner(index, field.key())) {
                    out.push(error_line(8, field.key()));
                }
                if field == OwnerField::Dob && errors.has(&ErrorPath::owner(index, DOB_AGE_KEY)) {
                    out.push(error_line(8, DOB_AGE_KEY));
                }
            }

            let manual = FocusTarget::OwnerField {
                index,
                field: OwnerField::ManualAddress,
            };
            out.push_focusable(
                checkbox_line(
                    4,
                    owner.is_manual_address(),
                    OwnerField::ManualAddress.label().to_string(),
                    is_focused(manual),
                ),
                is_focused(manual),
            );

            if can_remove {
                let target = FocusTarget::RemoveOwner(index);
                out.push_focusable(
                    link_line(4, "Remove this beneficial owner", is_focused(target)),
                    is_focused(target),
                );
            }
        }

        if app.contract.can_add_more_beneficial_owners() {
            out.blank();
            out.push_focusable(
                link_line(2, "Add another individual", is_focused(FocusTarget::AddOwner)),
                is_focused(FocusTarget::AddOwner),
            );
        }
    }

    out.blank();
    out.push(section_title("Agreements"));
    for checkbox in Checkbox::REQUIRED {
        let target = FocusTarget::Checkbox(checkbox);
        out.push_focusable(
            checkbox_line(
                0,
                form.checkbox(checkbox),
                checkbox_label(checkbox, &app.company_name),
                is_focused(target),
            ),
            is_focused(target),
        );
        if errors.has(&ErrorPath::field(checkbox.key())) {
            out.push(error_line(6, checkbox.key()));
        }
    }

    out
}

/// Draw the scrollable form body
pub fn draw_body(frame: &mut Frame, area: Rect, lines: Vec<Line<'static>>, scroll_offset: usize) {
    let body = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Additional information ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .scroll((scroll_offset.min(u16::MAX as usize) as u16, 0));

    frame.render_widget(body, area);
}

pub fn draw_submit_button(frame: &mut Frame, area: Rect, app: &App, focused: Option<FocusTarget>) {
    let is_enabled = app.contract.phase() == StepPhase::Editing;
    let label = if is_enabled { "Save & continue" } else { "Submitted" };
    render_button(
        frame,
        area,
        label,
        focused == Some(FocusTarget::Submit),
        is_enabled,
    );
}
