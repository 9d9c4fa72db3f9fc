//! Submission payload and response types

use crate::state::{IntakeForm, ProjectType, StagedAttachment, Timeline};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// The finished intake, as handed to the submission service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSubmission {
    pub business_name: String,
    pub project_type: ProjectType,
    pub project_description: String,
    pub goals_requirements: String,
    pub budget: u32,
    pub timeline: Timeline,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Raw file handles of the staged attachments, in staging order
    pub files: Vec<PathBuf>,
}

impl ProjectSubmission {
    /// Package a form that has passed full validation. Returns `None` when a
    /// required choice is still unset.
    pub fn from_form(form: &IntakeForm, attachments: &[StagedAttachment]) -> Option<Self> {
        Some(Self {
            business_name: form.business_name.clone(),
            project_type: form.project_type?,
            project_description: form.project_description.clone(),
            goals_requirements: form.goals_requirements.clone(),
            budget: form.budget,
            timeline: form.timeline?,
            full_name: form.full_name.clone(),
            email: form.email.clone(),
            phone: form.phone().map(str::to_string),
            files: attachments.iter().map(|a| a.path.clone()).collect(),
        })
    }
}

/// What the backend says about a submission
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubmissionResponse {
    pub fn accepted(project_id: impl Into<String>) -> Self {
        Self {
            success: true,
            project_id: Some(project_id.into()),
            error: None,
        }
    }

    #[cfg(test)]
    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            success: false,
            project_id: None,
            error: Some(error.into()),
        }
    }
}

/// Transport-level failure talking to the backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("submission failed: {0}")]
    Failed(String),
}
