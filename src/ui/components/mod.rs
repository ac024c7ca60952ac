//! Reusable UI components

mod button;
mod checkbox;
mod dialog;

pub use button::{render_button, BUTTON_HEIGHT};
pub use checkbox::{checkbox_line, focus_style};
pub use dialog::render_error_dialog;
