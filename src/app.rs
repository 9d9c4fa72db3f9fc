//! Application state and core logic

use crate::config::IntakeConfig;
use crate::platform::is_shortcut;
use crate::state::{
    field_spec, spawn_submission, AppEvent, AppState, Control, FieldKey, FieldKind, Form,
    IntakeOverlay, SessionContext, SessionSubscription, SubmitRejected, WizardButton,
    WizardCallbacks,
};
use crate::submission::SubmissionService;
use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    config: IntakeConfig,
    session: SessionContext,
    /// Host view's view of the session
    pub host_session: SessionSubscription,
    service: Arc<dyn SubmissionService>,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
    /// Settings file to re-read; the user config dir when unset
    settings_path: Option<PathBuf>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance
    pub fn new(config: IntakeConfig, service: Arc<dyn SubmissionService>) -> Self {
        let session = SessionContext::new(config.session());
        let host_session = session.subscribe();
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::default(),
            config,
            session,
            host_session,
            service,
            events_tx,
            events_rx,
            settings_path: None,
            quit: false,
        }
    }

    #[cfg(test)]
    fn with_settings_path(mut self, path: PathBuf) -> Self {
        self.settings_path = Some(path);
        self
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Per-frame housekeeping: pick up session changes and task results
    pub fn tick(&mut self) {
        self.host_session.refresh();
        self.drain_events();
    }

    /// Apply every queued event
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::SubmissionFinished(outcome) => match self.state.overlay.as_mut() {
                Some(overlay) => {
                    if let Err(e) = &outcome {
                        tracing::warn!("Submission error: {e}");
                    }
                    overlay.finish_submission(outcome);
                }
                None => tracing::warn!("Submission finished with no wizard mounted"),
            },
            AppEvent::IntakeClosed => {
                if self.state.overlay.as_ref().is_some_and(|o| o.is_closed()) {
                    self.state.unmount_overlay();
                }
            }
            AppEvent::IntakeSucceeded => {
                let Some(overlay) = self.state.unmount_overlay() else {
                    tracing::debug!("Success callback after the wizard was closed");
                    return;
                };
                let project_id = overlay.project_id().map(str::to_string);
                match &project_id {
                    Some(id) => self.state.set_status(format!(
                        "Project {id} submitted. We'll be in touch within 24 hours."
                    )),
                    None => self.state.set_status("Project submitted."),
                }
                self.state.last_project_id = project_id;
            }
        }
    }

    /// Mount a fresh intake wizard over the host view
    pub fn open_intake(&mut self) {
        if self.state.is_overlay_open() {
            return;
        }
        let overlay = IntakeOverlay::open(
            self.config.attachment_limits(),
            &self.session.current(),
            WizardCallbacks::from_sender(self.events_tx.clone()),
        );
        self.state.status_message = None;
        self.state.overlay = Some(overlay);
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.current_error().is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        if self.state.is_overlay_open() {
            self.handle_overlay_key(key)
        } else {
            self.handle_host_key(key)
        }
    }

    fn handle_host_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Enter => self.open_intake(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.reload_settings()?,
            KeyCode::Char('q') | KeyCode::Char('Q') => self.quit = true,
            _ => {}
        }
        Ok(())
    }

    /// Re-read settings and publish the session they describe. Limits apply
    /// to the next wizard opened.
    fn reload_settings(&mut self) -> Result<()> {
        let config = match &self.settings_path {
            Some(path) => IntakeConfig::load_from(path),
            None => IntakeConfig::load(),
        }
        .context("Could not reload settings")?;

        self.session.publish(config.session());
        self.config = config;
        self.state.set_status("Settings reloaded.");
        tracing::info!("Settings reloaded");
        Ok(())
    }

    fn handle_overlay_key(&mut self, key: KeyEvent) -> Result<()> {
        let Some(overlay) = self.state.overlay.as_mut() else {
            return Ok(());
        };

        if key.code == KeyCode::Esc {
            if !overlay.wizard.dismiss_attachment_error() {
                self.close_intake();
            }
            return Ok(());
        }

        // Submitting ignores input; submitted only accepts close
        if !overlay.wizard.is_editing() {
            if overlay.wizard.is_submitted() && key.code == KeyCode::Enter {
                self.close_intake();
            }
            return Ok(());
        }

        if is_shortcut(&key, 'n') {
            overlay.next();
            return Ok(());
        }
        if is_shortcut(&key, 'p') {
            overlay.previous();
            return Ok(());
        }
        if is_shortcut(&key, 's') {
            if overlay.wizard.can_submit() {
                self.submit_intake();
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Tab => overlay.wizard.next_field(),
            KeyCode::BackTab => overlay.wizard.prev_field(),
            _ => match overlay.wizard.active_control() {
                Control::Field(field) => self.handle_field_key(key, field),
                Control::AttachmentInput => self.handle_attachment_input_key(key),
                Control::AttachmentList => self.handle_attachment_list_key(key),
                Control::Buttons => self.handle_buttons_key(key),
            },
        }
        Ok(())
    }

    fn handle_field_key(&mut self, key: KeyEvent, field: FieldKey) {
        let Some(overlay) = self.state.overlay.as_mut() else {
            return;
        };
        let wizard = &mut overlay.wizard;
        match field_spec(field).kind {
            FieldKind::Text { .. } => match key.code {
                KeyCode::Char(c) if !has_command_modifier(&key) => wizard.input_char(c),
                KeyCode::Backspace => wizard.backspace(),
                KeyCode::Enter => {
                    if !wizard.input_newline() {
                        wizard.next_field();
                    }
                }
                _ => {}
            },
            FieldKind::Choice | FieldKind::Budget => match key.code {
                KeyCode::Left | KeyCode::Char('h') => wizard.adjust(false),
                KeyCode::Right | KeyCode::Char('l') => wizard.adjust(true),
                KeyCode::Enter => wizard.next_field(),
                _ => {}
            },
        }
    }

    fn handle_attachment_input_key(&mut self, key: KeyEvent) {
        let Some(overlay) = self.state.overlay.as_mut() else {
            return;
        };
        let wizard = &mut overlay.wizard;
        match key.code {
            KeyCode::Char(c) if !has_command_modifier(&key) => wizard.input_char(c),
            KeyCode::Backspace => wizard.backspace(),
            KeyCode::Enter => {
                let added = wizard.submit_attachment_input();
                if added > 0 {
                    tracing::debug!("Attached {added} file(s)");
                }
            }
            _ => {}
        }
    }

    fn handle_attachment_list_key(&mut self, key: KeyEvent) {
        let Some(overlay) = self.state.overlay.as_mut() else {
            return;
        };
        let wizard = &mut overlay.wizard;
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => wizard.select_attachment(false),
            KeyCode::Down | KeyCode::Char('j') => wizard.select_attachment(true),
            KeyCode::Delete | KeyCode::Char('d') => {
                wizard.remove_selected_attachment();
            }
            _ => {}
        }
    }

    fn handle_buttons_key(&mut self, key: KeyEvent) {
        let Some(overlay) = self.state.overlay.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => overlay.wizard.cycle_button(false),
            KeyCode::Right | KeyCode::Char('l') => overlay.wizard.cycle_button(true),
            KeyCode::Enter => match overlay.wizard.selected_button() {
                WizardButton::Previous => {
                    overlay.previous();
                }
                WizardButton::Advance => {
                    if overlay.wizard.step().is_last() {
                        self.submit_intake();
                    } else {
                        overlay.next();
                    }
                }
                WizardButton::Close => self.close_intake(),
            },
            _ => {}
        }
    }

    /// Handle a bracketed paste (drag-and-drop arrives this way)
    pub fn handle_paste(&mut self, text: &str) {
        if self.state.current_error().is_some() {
            return;
        }
        if let Some(overlay) = self.state.overlay.as_mut() {
            overlay.wizard.paste(text);
        }
    }

    fn close_intake(&mut self) {
        if let Some(overlay) = self.state.overlay.as_mut() {
            overlay.close();
        }
    }

    /// Validate and dispatch the submission on a background task
    fn submit_intake(&mut self) {
        let Some(overlay) = self.state.overlay.as_mut() else {
            return;
        };
        match overlay.start_submission() {
            Ok(submission) => {
                tracing::info!(business = %submission.business_name, "Submitting intake");
                spawn_submission(self.service.clone(), submission, self.events_tx.clone());
            }
            Err(SubmitRejected::Invalid { count }) => {
                tracing::debug!("Submit blocked by {count} invalid field(s)");
            }
            Err(e) => tracing::debug!("Submit ignored: {e}"),
        }
    }
}

fn has_command_modifier(key: &KeyEvent) -> bool {
    key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}
