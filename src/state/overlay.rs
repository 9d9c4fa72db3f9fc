//! Intake overlay: one mounted wizard plus the host callbacks
//!
//! The host mounts an overlay with a pair of zero-argument callbacks. The
//! overlay owns the wizard, the progress animation and the success timer;
//! unmounting it (dropping) cancels anything still pending.

use super::app_state::AppEvent;
use super::forms::{AttachmentLimits, FieldKey};
use super::progress::ProgressAnimation;
use super::session::Session;
use super::success_timer::{SuccessTimer, SUCCESS_DISPLAY};
use super::wizard::{SubmitRejected, Wizard, WizardPhase};
use crate::submission::{ProjectSubmission, SubmissionError, SubmissionResponse, SubmissionService};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Host-supplied notification
pub type Callback = Arc<dyn Fn() + Send + Sync>;

/// Callbacks the host passes when mounting the overlay
#[derive(Clone)]
pub struct WizardCallbacks {
    pub on_close: Callback,
    pub on_success: Callback,
}

impl WizardCallbacks {
    /// Callbacks that post the matching app events
    pub fn from_sender(tx: UnboundedSender<AppEvent>) -> Self {
        let close_tx = tx.clone();
        Self {
            on_close: Arc::new(move || {
                let _ = close_tx.send(AppEvent::IntakeClosed);
            }),
            on_success: Arc::new(move || {
                let _ = tx.send(AppEvent::IntakeSucceeded);
            }),
        }
    }
}

impl std::fmt::Debug for WizardCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WizardCallbacks").finish_non_exhaustive()
    }
}

/// A mounted intake wizard
#[derive(Debug)]
pub struct IntakeOverlay {
    pub wizard: Wizard,
    callbacks: WizardCallbacks,
    progress: ProgressAnimation,
    success_timer: Option<SuccessTimer>,
    closed: bool,
}

impl IntakeOverlay {
    /// Mount a fresh wizard, pre-filling contact details from the session
    pub fn open(limits: AttachmentLimits, session: &Session, callbacks: WizardCallbacks) -> Self {
        let mut wizard = Wizard::new(limits);
        if let Some(user) = &session.user {
            if let Some(name) = &user.full_name {
                wizard.prefill(FieldKey::FullName, name);
            }
            wizard.prefill(FieldKey::Email, &user.email);
        }
        tracing::debug!("Intake wizard opened");
        Self {
            progress: ProgressAnimation::new(wizard.step().progress_percent()),
            wizard,
            callbacks,
            success_timer: None,
            closed: false,
        }
    }

    pub fn progress_ratio(&self) -> f64 {
        self.progress.ratio()
    }

    pub fn is_progress_animating(&self) -> bool {
        !self.progress.is_settled()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn project_id(&self) -> Option<&str> {
        match self.wizard.phase() {
            WizardPhase::Submitted { project_id } => project_id.as_deref(),
            _ => None,
        }
    }

    /// Close the overlay. Refused while a submission is pending.
    pub fn close(&mut self) -> bool {
        if self.closed {
            return true;
        }
        if !self.wizard.can_close() {
            tracing::debug!("Close refused while submitting");
            return false;
        }
        self.success_timer = None;
        self.closed = true;
        (self.callbacks.on_close)();
        true
    }

    pub fn next(&mut self) -> bool {
        let moved = self.wizard.next();
        self.sync_progress();
        moved
    }

    pub fn previous(&mut self) -> bool {
        let moved = self.wizard.previous();
        self.sync_progress();
        moved
    }

    fn sync_progress(&mut self) {
        self.progress.retarget(self.wizard.step().progress_percent());
    }

    pub fn start_submission(&mut self) -> Result<ProjectSubmission, SubmitRejected> {
        self.wizard.begin_submit()
    }

    /// Apply the backend result; on success arm the success timer
    pub fn finish_submission(
        &mut self,
        outcome: Result<SubmissionResponse, SubmissionError>,
    ) -> bool {
        let succeeded = self.wizard.complete_submission(outcome);
        if succeeded && !self.closed {
            let on_success = self.callbacks.on_success.clone();
            self.success_timer = Some(SuccessTimer::schedule(SUCCESS_DISPLAY, move || {
                on_success()
            }));
        }
        self.sync_progress();
        succeeded
    }
}

/// Run a submission on its own task and post the result back to the app
pub fn spawn_submission(
    service: Arc<dyn SubmissionService>,
    submission: ProjectSubmission,
    tx: UnboundedSender<AppEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let outcome = service.submit(submission).await;
        if tx.send(AppEvent::SubmissionFinished(outcome)).is_err() {
            tracing::debug!("Submission finished after the app shut down");
        }
    })
}
