//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod wizard;

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let (content_area, status_area) = layout::create_layout(area);

    layout::draw_host(frame, content_area, app);

    if let Some(overlay) = &app.state.overlay {
        wizard::draw(frame, content_area, overlay);
    }

    layout::draw_status_bar(frame, status_area, app);

    // Error dialog sits above everything
    if let Some(error) = app.state.current_error() {
        components::render_error_dialog(frame, error);
    }
}

/// Whether the next frames change without input
pub fn is_animating(app: &App) -> bool {
    app.state
        .overlay
        .as_ref()
        .is_some_and(|o| o.is_progress_animating() || o.wizard.is_submitting())
}
