//! Form field keys and value objects

use super::budget::{format_budget, BudgetRange};
use super::choices::{Choice, ProjectType, Timeline};
use serde::{Deserialize, Serialize};

/// Identifies one field of the intake form.
///
/// Declaration order is display order; `FieldErrors` relies on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKey {
    BusinessName,
    ProjectType,
    ProjectDescription,
    GoalsRequirements,
    Budget,
    Timeline,
    FullName,
    Email,
    Phone,
}

impl FieldKey {
    pub const ALL: [FieldKey; 9] = [
        FieldKey::BusinessName,
        FieldKey::ProjectType,
        FieldKey::ProjectDescription,
        FieldKey::GoalsRequirements,
        FieldKey::Budget,
        FieldKey::Timeline,
        FieldKey::FullName,
        FieldKey::Email,
        FieldKey::Phone,
    ];

    /// Wire name of the field
    pub fn name(self) -> &'static str {
        match self {
            Self::BusinessName => "businessName",
            Self::ProjectType => "projectType",
            Self::ProjectDescription => "projectDescription",
            Self::GoalsRequirements => "goalsRequirements",
            Self::Budget => "budget",
            Self::Timeline => "timeline",
            Self::FullName => "fullName",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }
}

/// How a field is edited and rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text { multiline: bool },
    Choice,
    Budget,
}

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    ProjectType(Option<ProjectType>),
    Timeline(Option<Timeline>),
    Budget(u32),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl FieldValue {
    /// Get the text value (returns empty string for non-text fields)
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            _ => "",
        }
    }

    /// Push a character to a text value
    pub fn push_char(&mut self, c: char) {
        if let FieldValue::Text(s) = self {
            s.push(c);
        }
    }

    /// Append a pasted chunk to a text value
    pub fn push_str(&mut self, text: &str) {
        if let FieldValue::Text(s) = self {
            s.push_str(text);
        }
    }

    /// Remove the last character from a text value
    pub fn pop_char(&mut self) {
        if let FieldValue::Text(s) = self {
            s.pop();
        }
    }

    /// Cycle a choice value; no-op for other kinds
    pub fn cycle(&mut self, forward: bool) {
        match self {
            FieldValue::ProjectType(p) => *p = ProjectType::cycle(*p, forward),
            FieldValue::Timeline(t) => *t = Timeline::cycle(*t, forward),
            FieldValue::Text(_) | FieldValue::Budget(_) => {}
        }
    }

    /// Move a budget value one step within `range`; no-op for other kinds
    pub fn step(&mut self, range: &BudgetRange, up: bool) {
        if let FieldValue::Budget(v) = self {
            *v = if up {
                range.increment(*v)
            } else {
                range.decrement(*v)
            };
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::ProjectType(p) => p
                .map(|p| p.label().to_string())
                .unwrap_or_else(|| "Select project type".to_string()),
            FieldValue::Timeline(t) => t
                .map(|t| format!("{} - {}", t.label(), t.description()))
                .unwrap_or_else(|| "Select timeline".to_string()),
            FieldValue::Budget(v) => format_budget(*v),
        }
    }
}
