//! Schema validation for the intake form
//!
//! Every rule is evaluated the same way regardless of which step asks for it.
//! Lengths are counted in characters.

use super::budget::{BUDGET_MAX, BUDGET_MIN};
use super::field::FieldKey;
use super::intake_form::IntakeForm;
use super::registry;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use thiserror::Error;

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{message}")]
    Required { message: &'static str },
    #[error("{message}")]
    TooShort { min: usize, message: &'static str },
    #[error("{message}")]
    TooLong { max: usize, message: &'static str },
    #[error("{message}")]
    BelowMinimum { min: u32, message: &'static str },
    #[error("{message}")]
    AboveMaximum { max: u32, message: &'static str },
    #[error("{message}")]
    NotSelected { message: &'static str },
    #[error("Please enter a valid email address")]
    InvalidEmail,
}

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[a-z0-9_'+\-.]*[a-z0-9_+\-]@([a-z0-9][a-z0-9\-]*\.)+[a-z]{2,}$")
        .expect("valid email regex")
});

/// Email syntax check
pub fn is_valid_email(email: &str) -> bool {
    !email.starts_with('.') && !email.contains("..") && EMAIL_RE.is_match(email)
}

fn check_length(
    value: &str,
    min: usize,
    max: usize,
    too_short: &'static str,
    too_long: &'static str,
) -> Result<(), FieldError> {
    let len = value.chars().count();
    if len < min {
        return Err(if min == 1 {
            FieldError::Required { message: too_short }
        } else {
            FieldError::TooShort {
                min,
                message: too_short,
            }
        });
    }
    if len > max {
        return Err(FieldError::TooLong {
            max,
            message: too_long,
        });
    }
    Ok(())
}

pub fn validate_business_name(form: &IntakeForm) -> Result<(), FieldError> {
    check_length(
        &form.business_name,
        1,
        100,
        "Business name is required",
        "Business name must be less than 100 characters",
    )
}

pub fn validate_project_type(form: &IntakeForm) -> Result<(), FieldError> {
    form.project_type
        .map(|_| ())
        .ok_or(FieldError::NotSelected {
            message: "Please select a project type",
        })
}

pub fn validate_project_description(form: &IntakeForm) -> Result<(), FieldError> {
    check_length(
        &form.project_description,
        10,
        1_000,
        "Please provide at least 10 characters",
        "Description must be less than 1000 characters",
    )
}

pub fn validate_goals_requirements(form: &IntakeForm) -> Result<(), FieldError> {
    check_length(
        &form.goals_requirements,
        10,
        2_000,
        "Please provide at least 10 characters",
        "Requirements must be less than 2000 characters",
    )
}

pub fn validate_budget(form: &IntakeForm) -> Result<(), FieldError> {
    if form.budget < BUDGET_MIN {
        return Err(FieldError::BelowMinimum {
            min: BUDGET_MIN,
            message: "Minimum budget is $500",
        });
    }
    if form.budget > BUDGET_MAX {
        return Err(FieldError::AboveMaximum {
            max: BUDGET_MAX,
            message: "Maximum budget is $10,000+",
        });
    }
    Ok(())
}

pub fn validate_timeline(form: &IntakeForm) -> Result<(), FieldError> {
    form.timeline.map(|_| ()).ok_or(FieldError::NotSelected {
        message: "Please select a timeline",
    })
}

pub fn validate_full_name(form: &IntakeForm) -> Result<(), FieldError> {
    check_length(
        &form.full_name,
        1,
        100,
        "Full name is required",
        "Name must be less than 100 characters",
    )
}

pub fn validate_email(form: &IntakeForm) -> Result<(), FieldError> {
    if is_valid_email(&form.email) {
        Ok(())
    } else {
        Err(FieldError::InvalidEmail)
    }
}

pub fn validate_phone(_form: &IntakeForm) -> Result<(), FieldError> {
    Ok(())
}

/// Per-field outcome of the last validation pass, in display order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<FieldKey, FieldError>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, key: FieldKey) -> Option<&FieldError> {
        self.errors.get(&key)
    }

    #[cfg(test)]
    pub fn contains(&self, key: FieldKey) -> bool {
        self.errors.contains_key(&key)
    }

    /// Record the outcome for one field, replacing any previous one
    pub fn record(&mut self, key: FieldKey, outcome: Result<(), FieldError>) {
        match outcome {
            Ok(()) => {
                self.errors.remove(&key);
            }
            Err(e) => {
                self.errors.insert(key, e);
            }
        }
    }

    /// Merge another set of outcomes for `keys` into this one
    pub fn replace_for(&mut self, keys: &[FieldKey], other: FieldErrors) {
        for key in keys {
            self.errors.remove(key);
        }
        self.errors.extend(other.errors);
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &FieldError)> {
        self.errors.iter().map(|(k, e)| (*k, e))
    }
}

/// Validate a single field
pub fn validate_field(form: &IntakeForm, key: FieldKey) -> Result<(), FieldError> {
    (registry::spec(key).validate)(form)
}

/// Validate a subset of fields
pub fn validate_fields(form: &IntakeForm, keys: &[FieldKey]) -> FieldErrors {
    let mut errors = FieldErrors::default();
    for key in keys {
        errors.record(*key, validate_field(form, *key));
    }
    errors
}

/// Validate the whole schema
pub fn validate_all(form: &IntakeForm) -> FieldErrors {
    validate_fields(form, &FieldKey::ALL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::{ProjectType, Timeline};

    fn valid_form() -> IntakeForm {
        IntakeForm {
            business_name: "Acme Bakery".to_string(),
            project_type: Some(ProjectType::EcommerceStore),
            project_description: "Online shop for our pastries".to_string(),
            goals_requirements: "Sell cakes online with delivery slots".to_string(),
            budget: 2_500,
            timeline: Some(Timeline::OneMonth),
            full_name: "Dana Reyes".to_string(),
            email: "dana@acme.example".to_string(),
            phone: String::new(),
        }
    }

    mod email {
        use super::*;

        #[test]
        fn test_accepts_common_addresses() {
            for email in [
                "dana@acme.example",
                "first.last@sub.domain.co",
                "user+tag@mail.io",
                "o'brien@example.ie",
                "UPPER@EXAMPLE.COM",
            ] {
                assert!(is_valid_email(email), "{email} should be valid");
            }
        }

        #[test]
        fn test_rejects_malformed_addresses() {
            for email in [
                "",
                "plainaddress",
                "@example.com",
                "user@",
                "user@example",
                "user@example.c",
                ".user@example.com",
                "user.@example.com",
                "us..er@example.com",
                "user@-example.com",
                "user@exa mple.com",
            ] {
                assert!(!is_valid_email(email), "{email} should be invalid");
            }
        }
    }

    mod rules {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_valid_form_has_no_errors() {
            assert!(validate_all(&valid_form()).is_empty());
        }

        #[test]
        fn test_business_name_required() {
            let mut form = valid_form();
            form.business_name.clear();
            assert_eq!(
                validate_business_name(&form).unwrap_err().to_string(),
                "Business name is required"
            );
        }

        #[test]
        fn test_business_name_max_length() {
            let mut form = valid_form();
            form.business_name = "x".repeat(100);
            assert!(validate_business_name(&form).is_ok());
            form.business_name.push('x');
            assert_eq!(
                validate_business_name(&form).unwrap_err().to_string(),
                "Business name must be less than 100 characters"
            );
        }

        #[test]
        fn test_description_bounds() {
            let mut form = valid_form();
            form.project_description = "too short".to_string();
            assert!(matches!(
                validate_project_description(&form),
                Err(FieldError::TooShort { min: 10, .. })
            ));
            form.project_description = "0123456789".to_string();
            assert!(validate_project_description(&form).is_ok());
            form.project_description = "y".repeat(1_001);
            assert!(matches!(
                validate_project_description(&form),
                Err(FieldError::TooLong { max: 1_000, .. })
            ));
        }

        #[test]
        fn test_length_counts_characters_not_bytes() {
            let mut form = valid_form();
            form.project_description = "é".repeat(10);
            assert!(validate_project_description(&form).is_ok());
        }

        #[test]
        fn test_goals_bounds() {
            let mut form = valid_form();
            form.goals_requirements = "z".repeat(2_000);
            assert!(validate_goals_requirements(&form).is_ok());
            form.goals_requirements.push('z');
            assert_eq!(
                validate_goals_requirements(&form).unwrap_err().to_string(),
                "Requirements must be less than 2000 characters"
            );
        }

        #[test]
        fn test_budget_bounds_inclusive() {
            let mut form = valid_form();
            form.budget = 500;
            assert!(validate_budget(&form).is_ok());
            form.budget = 10_000;
            assert!(validate_budget(&form).is_ok());
            form.budget = 499;
            assert_eq!(
                validate_budget(&form).unwrap_err().to_string(),
                "Minimum budget is $500"
            );
            form.budget = 10_001;
            assert_eq!(
                validate_budget(&form).unwrap_err().to_string(),
                "Maximum budget is $10,000+"
            );
        }

        #[test]
        fn test_choices_must_be_selected() {
            let mut form = valid_form();
            form.project_type = None;
            form.timeline = None;
            let errors = validate_all(&form);
            assert_eq!(errors.len(), 2);
            assert_eq!(
                errors.get(FieldKey::ProjectType).map(|e| e.to_string()),
                Some("Please select a project type".to_string())
            );
            assert_eq!(
                errors.get(FieldKey::Timeline).map(|e| e.to_string()),
                Some("Please select a timeline".to_string())
            );
        }

        #[test]
        fn test_phone_unconstrained() {
            let mut form = valid_form();
            form.phone = "not really a number".to_string();
            assert!(validate_all(&form).is_empty());
        }
    }

    mod field_errors {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_iter_in_display_order() {
            let errors = validate_all(&IntakeForm::default());
            let keys: Vec<FieldKey> = errors.iter().map(|(k, _)| k).collect();
            assert_eq!(
                keys,
                vec![
                    FieldKey::BusinessName,
                    FieldKey::ProjectType,
                    FieldKey::ProjectDescription,
                    FieldKey::GoalsRequirements,
                    FieldKey::FullName,
                    FieldKey::Email,
                ]
            );
        }

        #[test]
        fn test_record_ok_clears_entry() {
            let mut errors = FieldErrors::default();
            errors.record(FieldKey::Email, Err(FieldError::InvalidEmail));
            assert!(errors.contains(FieldKey::Email));
            errors.record(FieldKey::Email, Ok(()));
            assert!(errors.is_empty());
        }

        #[test]
        fn test_replace_for_only_touches_named_keys() {
            let mut errors = validate_all(&IntakeForm::default());
            let mut form = IntakeForm::default();
            form.full_name = "Dana".to_string();
            let keys = [FieldKey::FullName, FieldKey::Email];
            errors.replace_for(&keys, validate_fields(&form, &keys));
            assert!(!errors.contains(FieldKey::FullName));
            assert!(errors.contains(FieldKey::Email));
            assert!(errors.contains(FieldKey::BusinessName));
        }
    }
}
