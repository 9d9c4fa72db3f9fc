//! Reusable UI components

mod button;
mod dialog;

pub use button::{render_button, ButtonStyle, BUTTON_HEIGHT};
pub use dialog::{render_error_dialog, wrap_text};
