//! Validation outcomes and field values.
//!
//! A [`ValidationOutcome`] is the verdict for one field. Invalid input is
//! always an outcome, never an error: the engine reports it and keeps going.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The pass/fail verdict for one validation check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum ValidationOutcome {
    /// The value passed.
    Valid,
    /// The value failed, with the message to show next to the field.
    Invalid(String),
}

impl ValidationOutcome {
    /// Creates an `Invalid` outcome.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }

    /// Returns `true` if this outcome is `Valid`.
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns the error message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid(msg) => Some(msg),
        }
    }

    /// Returns `self` if it is `Invalid`, otherwise evaluates `next`.
    ///
    /// Chains checks so that only the first failure is reported.
    #[must_use]
    pub fn and_then(self, next: impl FnOnce() -> Self) -> Self {
        match self {
            Self::Valid => next(),
            invalid @ Self::Invalid(_) => invalid,
        }
    }
}

impl fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => write!(f, "valid"),
            Self::Invalid(msg) => write!(f, "{msg}"),
        }
    }
}

/// One form input's current content.
///
/// Recreated from UI state on every validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValue {
    /// The field name.
    pub name: String,
    /// The raw value, untrimmed.
    pub value: String,
}

impl FieldValue {
    /// Creates a new field value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
