//! Trait abstraction for the submission backend to enable mocking in tests

use super::types::{ProjectSubmission, SubmissionError, SubmissionResponse};
use async_trait::async_trait;

/// Accepts a finished intake. `Ok` with `success: false` and `Err` are
/// both failures from the wizard's point of view.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionService: Send + Sync {
    async fn submit(
        &self,
        submission: ProjectSubmission,
    ) -> Result<SubmissionResponse, SubmissionError>;
}
