//! Submission backend for finished intakes

mod client;
mod traits;
mod types;

pub use client::{StubSubmissionClient, DEFAULT_SUBMIT_DELAY};
pub use traits::SubmissionService;
pub use types::{ProjectSubmission, SubmissionError, SubmissionResponse};

#[cfg(test)]
pub use traits::MockSubmissionService;
