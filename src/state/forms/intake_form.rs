//! Intake form data and field editing

use super::budget::{BudgetRange, BUDGET_DEFAULT};
use super::choices::{ProjectType, Timeline};
use super::field::{FieldKey, FieldValue};
use super::registry;

/// Every value the wizard will eventually submit (attachments live alongside
/// in the wizard, not here)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeForm {
    pub business_name: String,
    pub project_type: Option<ProjectType>,
    pub project_description: String,
    pub goals_requirements: String,
    pub budget: u32,
    pub timeline: Option<Timeline>,
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

impl Default for IntakeForm {
    fn default() -> Self {
        Self {
            business_name: String::new(),
            project_type: None,
            project_description: String::new(),
            goals_requirements: String::new(),
            budget: BUDGET_DEFAULT,
            timeline: Some(Timeline::default()),
            full_name: String::new(),
            email: String::new(),
            phone: String::new(),
        }
    }
}

impl IntakeForm {
    /// Current value of a field
    pub fn value(&self, key: FieldKey) -> FieldValue {
        (registry::spec(key).get)(self)
    }

    /// Replace a field's value
    pub fn set_value(&mut self, key: FieldKey, value: FieldValue) {
        (registry::spec(key).set)(self, value);
    }

    /// Read-modify-write a field through the registry
    pub fn edit(&mut self, key: FieldKey, f: impl FnOnce(&mut FieldValue)) {
        let mut value = self.value(key);
        f(&mut value);
        self.set_value(key, value);
    }

    pub fn push_char(&mut self, key: FieldKey, c: char) {
        self.edit(key, |v| v.push_char(c));
    }

    pub fn push_str(&mut self, key: FieldKey, text: &str) {
        self.edit(key, |v| v.push_str(text));
    }

    pub fn pop_char(&mut self, key: FieldKey) {
        self.edit(key, FieldValue::pop_char);
    }

    pub fn cycle_choice(&mut self, key: FieldKey, forward: bool) {
        self.edit(key, |v| v.cycle(forward));
    }

    pub fn step_budget(&mut self, range: &BudgetRange, up: bool) {
        self.edit(FieldKey::Budget, |v| v.step(range, up));
    }

    /// Phone as an optional value (empty means not provided)
    pub fn phone(&self) -> Option<&str> {
        let trimmed = self.phone.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}
