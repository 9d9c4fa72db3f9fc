//! Form domain layer
//!
//! Type-safe intake form handling: field registry, schema validation,
//! attachment staging and the budget control.

mod attachments;
mod budget;
mod choices;
mod field;
mod form;
mod intake_form;
mod registry;
mod validation;

pub use attachments::{AttachmentKind, AttachmentLimits, AttachmentStager, StagedAttachment};
#[cfg(test)]
pub use attachments::{AttachmentError, FileCandidate};
pub use budget::{describe as describe_budget, tier_for, BudgetRange, BudgetTier};
pub use choices::{ProjectType, Timeline};
pub use field::{FieldKey, FieldKind, FieldValue};
pub use form::Form;
pub use intake_form::IntakeForm;
pub use registry::{spec as field_spec, FieldSpec};
pub use validation::{validate_all, validate_field, validate_fields, FieldError, FieldErrors};
