//! Explicit field registry: key -> label, getter, setter, validator

use super::field::{FieldKey, FieldKind, FieldValue};
use super::intake_form::IntakeForm;
use super::validation::{self, FieldError};

/// Everything the wizard needs to know about one field
pub struct FieldSpec {
    pub key: FieldKey,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub kind: FieldKind,
    pub get: fn(&IntakeForm) -> FieldValue,
    pub set: fn(&mut IntakeForm, FieldValue),
    pub validate: fn(&IntakeForm) -> Result<(), FieldError>,
}

impl FieldSpec {
    pub fn is_multiline(&self) -> bool {
        matches!(self.kind, FieldKind::Text { multiline: true })
    }
}

// Setters ignore values of the wrong kind.
static FIELDS: [FieldSpec; 9] = [
    FieldSpec {
        key: FieldKey::BusinessName,
        label: "Business Name *",
        placeholder: "Your business name",
        kind: FieldKind::Text { multiline: false },
        get: |f| FieldValue::Text(f.business_name.clone()),
        set: |f, v| {
            if let FieldValue::Text(s) = v {
                f.business_name = s;
            }
        },
        validate: validation::validate_business_name,
    },
    FieldSpec {
        key: FieldKey::ProjectType,
        label: "Project Type *",
        placeholder: "Select project type",
        kind: FieldKind::Choice,
        get: |f| FieldValue::ProjectType(f.project_type),
        set: |f, v| {
            if let FieldValue::ProjectType(p) = v {
                f.project_type = p;
            }
        },
        validate: validation::validate_project_type,
    },
    FieldSpec {
        key: FieldKey::ProjectDescription,
        label: "Project Description *",
        placeholder: "Describe your project in detail...",
        kind: FieldKind::Text { multiline: true },
        get: |f| FieldValue::Text(f.project_description.clone()),
        set: |f, v| {
            if let FieldValue::Text(s) = v {
                f.project_description = s;
            }
        },
        validate: validation::validate_project_description,
    },
    FieldSpec {
        key: FieldKey::GoalsRequirements,
        label: "Goals & Requirements *",
        placeholder: "What are your main goals? What features do you need? Who is your target audience?",
        kind: FieldKind::Text { multiline: true },
        get: |f| FieldValue::Text(f.goals_requirements.clone()),
        set: |f, v| {
            if let FieldValue::Text(s) = v {
                f.goals_requirements = s;
            }
        },
        validate: validation::validate_goals_requirements,
    },
    FieldSpec {
        key: FieldKey::Budget,
        label: "Budget Range *",
        placeholder: "",
        kind: FieldKind::Budget,
        get: |f| FieldValue::Budget(f.budget),
        set: |f, v| {
            if let FieldValue::Budget(b) = v {
                f.budget = b;
            }
        },
        validate: validation::validate_budget,
    },
    FieldSpec {
        key: FieldKey::Timeline,
        label: "Preferred Timeline *",
        placeholder: "Select timeline",
        kind: FieldKind::Choice,
        get: |f| FieldValue::Timeline(f.timeline),
        set: |f, v| {
            if let FieldValue::Timeline(t) = v {
                f.timeline = t;
            }
        },
        validate: validation::validate_timeline,
    },
    FieldSpec {
        key: FieldKey::FullName,
        label: "Full Name *",
        placeholder: "Your full name",
        kind: FieldKind::Text { multiline: false },
        get: |f| FieldValue::Text(f.full_name.clone()),
        set: |f, v| {
            if let FieldValue::Text(s) = v {
                f.full_name = s;
            }
        },
        validate: validation::validate_full_name,
    },
    FieldSpec {
        key: FieldKey::Email,
        label: "Email Address *",
        placeholder: "your@email.com",
        kind: FieldKind::Text { multiline: false },
        get: |f| FieldValue::Text(f.email.clone()),
        set: |f, v| {
            if let FieldValue::Text(s) = v {
                f.email = s;
            }
        },
        validate: validation::validate_email,
    },
    FieldSpec {
        key: FieldKey::Phone,
        label: "Phone Number (Optional)",
        placeholder: "Your phone number",
        kind: FieldKind::Text { multiline: false },
        get: |f| FieldValue::Text(f.phone.clone()),
        set: |f, v| {
            if let FieldValue::Text(s) = v {
                f.phone = s;
            }
        },
        validate: validation::validate_phone,
    },
];

/// Look up the spec for a field
pub fn spec(key: FieldKey) -> &'static FieldSpec {
    // FIELDS is declared in FieldKey order
    let spec = &FIELDS[key as usize];
    debug_assert_eq!(spec.key, key);
    spec
}
