//! UI module for rendering the TUI

mod components;
mod contract_form;
mod layout;

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &mut App) {
    let (header_area, body_area, button_area) = layout::create_layout(frame.area());

    layout::draw_header(frame, header_area, app);

    let focused = app.focused();
    let form = contract_form::build_form_lines(app, focused);

    // Keep the focused line inside the bordered body
    if let Some(line) = form.focus_line {
        let visible = body_area.height.saturating_sub(2) as usize;
        app.state.scroll_into_view(line, visible);
    }
    contract_form::draw_body(frame, body_area, form.lines, app.state.scroll_offset);
    contract_form::draw_submit_button(frame, button_area, app, focused);

    // Draw status bar
    layout::draw_status_bar(frame, app);

    if let Some(message) = app.state.current_error() {
        components::render_error_dialog(frame, message, app.state.error_count());
    }
}
