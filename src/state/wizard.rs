//! Intake wizard state machine
//!
//! Four editing steps, a `Submitting` sub-state while the backend call is in
//! flight, and a terminal `Submitted` state. Step advance is gated on the
//! current step's field subset; going back never validates.

use super::forms::{
    validate_all, validate_field, validate_fields, AttachmentLimits, AttachmentStager, BudgetRange, FieldErrors, FieldKey, FieldKind, Form, IntakeForm,
};
use crate::submission::{ProjectSubmission, SubmissionError, SubmissionResponse};
use thiserror::Error;

/// General message shown at step 4 when the backend call fails
pub const SUBMISSION_FAILED_MESSAGE: &str = "Failed to submit project. Please try again.";

/// The four fixed steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WizardStep {
    Overview,
    Details,
    BudgetTimeline,
    Contact,
}

/// Something on a step that can take focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Field(FieldKey),
    AttachmentInput,
    AttachmentList,
    Buttons,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Overview,
        WizardStep::Details,
        WizardStep::BudgetTimeline,
        WizardStep::Contact,
    ];

    pub const COUNT: usize = 4;

    /// 1-based step number
    pub fn number(self) -> usize {
        match self {
            Self::Overview => 1,
            Self::Details => 2,
            Self::BudgetTimeline => 3,
            Self::Contact => 4,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Overview => "Project Overview",
            Self::Details => "Project Details",
            Self::BudgetTimeline => "Budget & Timeline",
            Self::Contact => "Contact Information",
        }
    }

    /// Fields that must validate before leaving this step forward
    pub fn fields(self) -> &'static [FieldKey] {
        match self {
            Self::Overview => &[
                FieldKey::BusinessName,
                FieldKey::ProjectType,
                FieldKey::ProjectDescription,
            ],
            Self::Details => &[FieldKey::GoalsRequirements],
            Self::BudgetTimeline => &[FieldKey::Budget, FieldKey::Timeline],
            Self::Contact => &[FieldKey::FullName, FieldKey::Email],
        }
    }

    /// Focus stops in tab order
    pub fn controls(self) -> &'static [Control] {
        match self {
            Self::Overview => &[
                Control::Field(FieldKey::BusinessName),
                Control::Field(FieldKey::ProjectType),
                Control::Field(FieldKey::ProjectDescription),
                Control::Buttons,
            ],
            Self::Details => &[
                Control::Field(FieldKey::GoalsRequirements),
                Control::AttachmentInput,
                Control::AttachmentList,
                Control::Buttons,
            ],
            Self::BudgetTimeline => &[
                Control::Field(FieldKey::Budget),
                Control::Field(FieldKey::Timeline),
                Control::Buttons,
            ],
            Self::Contact => &[
                Control::Field(FieldKey::FullName),
                Control::Field(FieldKey::Email),
                Control::Field(FieldKey::Phone),
                Control::Buttons,
            ],
        }
    }

    pub fn next(self) -> Option<Self> {
        match self {
            Self::Overview => Some(Self::Details),
            Self::Details => Some(Self::BudgetTimeline),
            Self::BudgetTimeline => Some(Self::Contact),
            Self::Contact => None,
        }
    }

    pub fn previous(self) -> Option<Self> {
        match self {
            Self::Overview => None,
            Self::Details => Some(Self::Overview),
            Self::BudgetTimeline => Some(Self::Details),
            Self::Contact => Some(Self::BudgetTimeline),
        }
    }

    pub fn is_last(self) -> bool {
        self.next().is_none()
    }

    /// Rounded completion percentage for the header
    pub fn progress_percent(self) -> u16 {
        ((self.number() * 100 + Self::COUNT / 2) / Self::COUNT) as u16
    }
}

/// Lifecycle of one wizard instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardPhase {
    Editing,
    Submitting,
    Submitted { project_id: Option<String> },
}

/// Buttons on the footer row, left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardButton {
    Previous,
    Advance,
    Close,
}

impl WizardButton {
    pub const ALL: [WizardButton; 3] = [
        WizardButton::Previous,
        WizardButton::Advance,
        WizardButton::Close,
    ];
}

/// Why `begin_submit` refused to start a submission
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("submit is only available on the last step")]
    NotOnLastStep,
    #[error("a submission is already in progress")]
    InFlight,
    #[error("the project has already been submitted")]
    AlreadySubmitted,
    #[error("{count} field(s) need attention")]
    Invalid { count: usize },
}

/// Owns all form data, staged attachments and UI-facing validation state
/// for one open intake.
#[derive(Debug, Clone)]
pub struct Wizard {
    step: WizardStep,
    phase: WizardPhase,
    form: IntakeForm,
    attachments: AttachmentStager,
    errors: FieldErrors,
    submit_error: Option<String>,
    budget_range: BudgetRange,
    /// Index into the current step's controls
    active_control: usize,
    /// Selected button when the footer row has focus
    pub selected_button: usize,
    /// Text typed into the attachment path input
    pub attachment_input: String,
    /// Highlighted row in the staged attachment list
    pub attachment_selected: usize,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new(AttachmentLimits::default())
    }
}

impl Wizard {
    pub fn new(limits: AttachmentLimits) -> Self {
        Self::with_form(IntakeForm::default(), limits)
    }

    pub fn with_form(form: IntakeForm, limits: AttachmentLimits) -> Self {
        Self {
            step: WizardStep::Overview,
            phase: WizardPhase::Editing,
            form,
            attachments: AttachmentStager::new(limits),
            errors: FieldErrors::default(),
            submit_error: None,
            budget_range: BudgetRange::default(),
            active_control: 0,
            selected_button: 1,
            attachment_input: String::new(),
            attachment_selected: 0,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn phase(&self) -> &WizardPhase {
        &self.phase
    }

    pub fn form(&self) -> &IntakeForm {
        &self.form
    }

    pub fn attachments(&self) -> &AttachmentStager {
        &self.attachments
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn budget_range(&self) -> &BudgetRange {
        &self.budget_range
    }

    pub fn is_editing(&self) -> bool {
        self.phase == WizardPhase::Editing
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == WizardPhase::Submitting
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self.phase, WizardPhase::Submitted { .. })
    }

    /// Submit is offered on the last step and disabled while a call is pending
    pub fn can_submit(&self) -> bool {
        self.is_editing() && self.step.is_last()
    }

    /// Closing is refused only while a submission is pending
    pub fn can_close(&self) -> bool {
        !self.is_submitting()
    }

    /// Validate the current step and advance if it passes.
    /// Returns true when the step changed.
    pub fn next(&mut self) -> bool {
        if !self.is_editing() {
            return false;
        }
        let fields = self.step.fields();
        let outcome = validate_fields(&self.form, fields);
        let failed: Vec<&str> = outcome.iter().map(|(key, _)| key.name()).collect();
        self.errors.replace_for(fields, outcome);

        if !failed.is_empty() {
            tracing::debug!(step = self.step.number(), ?failed, "Step validation failed");
            return false;
        }
        match self.step.next() {
            Some(next) => {
                self.go_to(next);
                true
            }
            None => false,
        }
    }

    /// Go back one step without validating. Returns true when the step changed.
    pub fn previous(&mut self) -> bool {
        if !self.is_editing() {
            return false;
        }
        match self.step.previous() {
            Some(prev) => {
                self.go_to(prev);
                true
            }
            None => false,
        }
    }

    fn go_to(&mut self, step: WizardStep) {
        self.step = step;
        self.active_control = 0;
        self.selected_button = 1;
        self.attachment_selected = 0;
    }

    /// Run full validation and, if it passes, enter `Submitting` and hand
    /// back the payload for the caller to send.
    pub fn begin_submit(&mut self) -> Result<ProjectSubmission, SubmitRejected> {
        match self.phase {
            WizardPhase::Submitting => return Err(SubmitRejected::InFlight),
            WizardPhase::Submitted { .. } => return Err(SubmitRejected::AlreadySubmitted),
            WizardPhase::Editing => {}
        }
        if !self.step.is_last() {
            return Err(SubmitRejected::NotOnLastStep);
        }

        self.errors = validate_all(&self.form);
        if !self.errors.is_empty() {
            return Err(SubmitRejected::Invalid {
                count: self.errors.len(),
            });
        }

        let submission = ProjectSubmission::from_form(&self.form, self.attachments.files())
            .ok_or(SubmitRejected::Invalid { count: 1 })?;
        self.submit_error = None;
        self.phase = WizardPhase::Submitting;
        Ok(submission)
    }

    /// Apply the backend's answer. Returns true on success.
    pub fn complete_submission(
        &mut self,
        outcome: Result<SubmissionResponse, SubmissionError>,
    ) -> bool {
        if !self.is_submitting() {
            tracing::warn!("Ignoring submission result outside of a pending submission");
            return false;
        }
        match outcome {
            Ok(response) if response.success => {
                tracing::info!(project_id = ?response.project_id, "Intake submitted");
                self.phase = WizardPhase::Submitted {
                    project_id: response.project_id,
                };
                true
            }
            Ok(response) => {
                tracing::warn!(error = ?response.error, "Submission rejected");
                self.fail_submission();
                false
            }
            Err(e) => {
                tracing::warn!("Submission failed: {e}");
                self.fail_submission();
                false
            }
        }
    }

    fn fail_submission(&mut self) {
        self.phase = WizardPhase::Editing;
        self.step = WizardStep::Contact;
        self.submit_error = Some(SUBMISSION_FAILED_MESSAGE.to_string());
    }

    /// Control that currently has focus
    pub fn active_control(&self) -> Control {
        let controls = self.step.controls();
        controls[self.active_control.min(controls.len() - 1)]
    }

    /// Field that currently has focus, if the focus is on a field
    pub fn active_field_key(&self) -> Option<FieldKey> {
        match self.active_control() {
            Control::Field(key) => Some(key),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn focus_control(&mut self, control: Control) {
        if let Some(index) = self.step.controls().iter().position(|c| *c == control) {
            self.active_control = index;
        }
    }

    fn revalidate(&mut self, key: FieldKey) {
        self.errors.record(key, validate_field(&self.form, key));
    }

    /// Type a character into the focused text input
    pub fn input_char(&mut self, c: char) {
        if !self.is_editing() {
            return;
        }
        match self.active_control() {
            Control::Field(key) if is_text(key) => {
                self.form.push_char(key, c);
                self.revalidate(key);
            }
            Control::AttachmentInput => self.attachment_input.push(c),
            _ => {}
        }
    }

    /// Newline in multiline fields; other controls ignore it
    pub fn input_newline(&mut self) -> bool {
        match self.active_field_key() {
            Some(key) if crate::state::forms::field_spec(key).is_multiline() => {
                self.input_char('\n');
                true
            }
            _ => false,
        }
    }

    pub fn backspace(&mut self) {
        if !self.is_editing() {
            return;
        }
        match self.active_control() {
            Control::Field(key) if is_text(key) => {
                self.form.pop_char(key);
                self.revalidate(key);
            }
            Control::AttachmentInput => {
                self.attachment_input.pop();
            }
            _ => {}
        }
    }

    /// Left/right on choice and budget controls
    pub fn adjust(&mut self, forward: bool) {
        if !self.is_editing() {
            return;
        }
        if let Control::Field(key) = self.active_control() {
            match crate::state::forms::field_spec(key).kind {
                FieldKind::Choice => self.form.cycle_choice(key, forward),
                FieldKind::Budget => {
                    let range = self.budget_range;
                    self.form.step_budget(&range, forward);
                }
                FieldKind::Text { .. } => return,
            }
            self.revalidate(key);
        }
    }

    /// Replace a field value outright (used for pre-filling)
    pub fn prefill(&mut self, key: FieldKey, text: &str) {
        if is_text(key) && self.form.value(key).as_text().is_empty() {
            self.form.push_str(key, text);
        }
    }

    /// Handle pasted text. On the attachment controls (or anywhere on the
    /// details step outside a text field) it is treated as dropped files;
    /// in a text field it is inserted.
    pub fn paste(&mut self, text: &str) {
        if !self.is_editing() {
            return;
        }
        match self.active_control() {
            Control::Field(key) if is_text(key) => {
                self.form.push_str(key, text);
                self.revalidate(key);
            }
            _ if self.step == WizardStep::Details => {
                self.drop_files(text);
            }
            _ => {}
        }
    }

    /// Stage the paths typed into the attachment input
    pub fn submit_attachment_input(&mut self) -> usize {
        let input = std::mem::take(&mut self.attachment_input);
        let added = self.stage_paths(&input);
        if added == 0 && self.attachments.error().is_some() {
            // keep the text so it can be corrected
            self.attachment_input = input;
        }
        added
    }

    /// Stage paths delivered by drag-and-drop (a terminal paste)
    pub fn drop_files(&mut self, text: &str) -> usize {
        self.stage_paths(text)
    }

    fn stage_paths(&mut self, text: &str) -> usize {
        self.attachments.add_input(text)
    }

    pub fn dismiss_attachment_error(&mut self) -> bool {
        if self.attachments.error().is_some() {
            self.attachments.dismiss_error();
            true
        } else {
            false
        }
    }

    pub fn select_attachment(&mut self, down: bool) {
        let count = self.attachments.files().len();
        if count == 0 {
            self.attachment_selected = 0;
            return;
        }
        self.attachment_selected = if down {
            (self.attachment_selected + 1).min(count - 1)
        } else {
            self.attachment_selected.saturating_sub(1)
        };
    }

    /// Remove the highlighted staged attachment
    pub fn remove_selected_attachment(&mut self) -> bool {
        if !self.is_editing() {
            return false;
        }
        let Some(id) = self
            .attachments
            .files()
            .get(self.attachment_selected)
            .map(|f| f.id.clone())
        else {
            return false;
        };
        self.attachments.remove(&id);
        let remaining = self.attachments.files().len();
        self.attachment_selected = self.attachment_selected.min(remaining.saturating_sub(1));
        true
    }

    /// Move the footer selection (wraps)
    pub fn cycle_button(&mut self, forward: bool) {
        let count = WizardButton::ALL.len();
        self.selected_button = if forward {
            (self.selected_button + 1) % count
        } else {
            (self.selected_button + count - 1) % count
        };
    }

    pub fn selected_button(&self) -> WizardButton {
        WizardButton::ALL[self.selected_button % WizardButton::ALL.len()]
    }
}

impl Form for Wizard {
    fn field_count(&self) -> usize {
        self.step.controls().len()
    }
    fn active_field(&self) -> usize {
        self.active_control
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_control = index.min(self.field_count() - 1);
    }
}

fn is_text(key: FieldKey) -> bool {
    matches!(
        crate::state::forms::field_spec(key).kind,
        FieldKind::Text { .. }
    )
}
