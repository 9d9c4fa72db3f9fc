//! Stub submission backend
//!
//! Waits a fixed delay and accepts every submission. A real deployment swaps
//! this for a network client implementing the same trait.

use super::traits::SubmissionService;
use super::types::{ProjectSubmission, SubmissionError, SubmissionResponse};
use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;

/// Default simulated round-trip
pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(2000);

/// Backend that accepts everything after `delay`
#[derive(Debug, Clone)]
pub struct StubSubmissionClient {
    delay: Duration,
}

impl Default for StubSubmissionClient {
    fn default() -> Self {
        Self::new(DEFAULT_SUBMIT_DELAY)
    }
}

impl StubSubmissionClient {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl SubmissionService for StubSubmissionClient {
    async fn submit(
        &self,
        submission: ProjectSubmission,
    ) -> Result<SubmissionResponse, SubmissionError> {
        tokio::time::sleep(self.delay).await;

        let project_id = format!("proj_{}", Utc::now().timestamp_millis());
        let payload = serde_json::to_string(&submission)
            .map_err(|e| SubmissionError::Failed(e.to_string()))?;
        tracing::info!(%project_id, files = submission.files.len(), "Project submitted: {payload}");

        Ok(SubmissionResponse::accepted(project_id))
    }
}
