//! Whole-form validation.
//!
//! [`validate_form`] walks the form's field specs in order and runs each
//! field's rule against the submitted [`FormData`]. Errors accumulate rather
//! than short-circuiting, so every field gets its verdict in one pass; within
//! a single field only the first failing check is reported.

use formgate_core::PasswordPolicy;
use serde::Serialize;

use crate::fields::{FieldKind, FieldSpec, FormData, FormKind};
use crate::outcome::ValidationOutcome;
use crate::rules;
use crate::strength::PasswordStrengthScore;

/// The verdict for one field of a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldOutcome {
    /// The field name.
    pub field: &'static str,
    /// The verdict.
    pub outcome: ValidationOutcome,
}

/// The result of validating a whole form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormReport {
    /// Which form was validated.
    pub kind: FormKind,
    /// One outcome per field, in field order.
    pub outcomes: Vec<FieldOutcome>,
    /// Strength of the password field. Only reported for sign-up.
    pub strength: Option<PasswordStrengthScore>,
}

impl FormReport {
    /// Returns `true` if every field is valid.
    pub fn is_valid(&self) -> bool {
        self.outcomes.iter().all(|fo| fo.outcome.is_valid())
    }

    /// Returns the outcome for a field, if the form has it.
    pub fn outcome(&self, field: &str) -> Option<&ValidationOutcome> {
        self.outcomes
            .iter()
            .find(|fo| fo.field == field)
            .map(|fo| &fo.outcome)
    }

    /// Returns `(field, message)` for every invalid field, in field order.
    pub fn errors(&self) -> Vec<(&'static str, &str)> {
        self.outcomes
            .iter()
            .filter_map(|fo| fo.outcome.message().map(|msg| (fo.field, msg)))
            .collect()
    }
}

/// Validates one field of a form.
///
/// Returns the outcome and, for a policy-enforced password field, its strength.
pub fn validate_field(
    spec: &FieldSpec,
    data: &FormData,
    policy: &PasswordPolicy,
) -> (ValidationOutcome, Option<PasswordStrengthScore>) {
    let value = data.text(spec.name);
    match spec.kind {
        FieldKind::Email => (
            rules::validate_required(value, spec.label).and_then(|| rules::validate_email(value)),
            None,
        ),
        FieldKind::Password {
            enforce_policy: false,
        } => (rules::validate_required(value, spec.label), None),
        FieldKind::Password {
            enforce_policy: true,
        } => {
            let (policy_outcome, score) = rules::validate_password(value, policy);
            (
                rules::validate_required(value, spec.label).and_then(|| policy_outcome),
                Some(score),
            )
        }
        FieldKind::ConfirmPassword { against } => (
            rules::validate_confirm_password(data.text(against), value),
            None,
        ),
        FieldKind::RequiredText => (rules::validate_required(value, spec.label), None),
        FieldKind::RequiredCheckbox { message } => {
            (rules::validate_checked(data.checked(spec.name), message), None)
        }
    }
}

/// Validates every field of a form.
///
/// Sign-in checks email (required + shape) and password (required only).
/// Sign-up checks name, email, password (required + policy), the password
/// confirmation, and the terms checkbox.
pub fn validate_form(kind: FormKind, data: &FormData, policy: &PasswordPolicy) -> FormReport {
    let mut outcomes = Vec::with_capacity(kind.fields().len());
    let mut strength = None;

    for spec in kind.fields() {
        let (outcome, score) = validate_field(spec, data, policy);
        if score.is_some() {
            strength = score;
        }
        outcomes.push(FieldOutcome {
            field: spec.name,
            outcome,
        });
    }

    FormReport {
        kind,
        outcomes,
        strength: strength.filter(|_| kind.reports_strength()),
    }
}
