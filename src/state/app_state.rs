//! Application state definitions

use super::overlay::IntakeOverlay;
use crate::submission::{SubmissionError, SubmissionResponse};
use std::collections::VecDeque;

/// Events posted from background tasks and host callbacks
#[derive(Debug)]
pub enum AppEvent {
    /// The submission task finished
    SubmissionFinished(Result<SubmissionResponse, SubmissionError>),
    /// The overlay's close callback ran
    IntakeClosed,
    /// The overlay's success callback ran
    IntakeSucceeded,
}

/// Host view state plus the mounted overlay, if any
#[derive(Debug, Default)]
pub struct AppState {
    /// Mounted intake wizard
    pub overlay: Option<IntakeOverlay>,
    /// One-line message on the status bar
    pub status_message: Option<String>,
    /// Id of the last accepted project
    pub last_project_id: Option<String>,
    /// Pending errors shown one at a time in the error dialog
    errors: VecDeque<String>,
}

impl AppState {
    pub fn is_overlay_open(&self) -> bool {
        self.overlay.is_some()
    }

    /// Unmount the overlay, cancelling any pending success timer
    pub fn unmount_overlay(&mut self) -> Option<IntakeOverlay> {
        self.overlay.take()
    }

    pub fn push_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{message}");
        self.errors.push_back(message);
    }

    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }
}
