//! Form and field definitions.
//!
//! Each [`FormKind`] owns a fixed, ordered list of [`FieldSpec`]s. A field
//! spec pairs a field name and label with a [`FieldKind`], which selects the
//! validation rule applied to it. [`FormData`] carries the values the caller
//! read from the UI.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::outcome::FieldValue;

/// Field names used by the built-in forms.
pub mod names {
    /// Full name (sign-up).
    pub const NAME: &str = "name";
    /// Email address.
    pub const EMAIL: &str = "email";
    /// Password.
    pub const PASSWORD: &str = "password";
    /// Password confirmation (sign-up).
    pub const CONFIRM_PASSWORD: &str = "confirm_password";
    /// Terms-of-service checkbox (sign-up).
    pub const AGREE_TERMS: &str = "agree_terms";
    /// "Remember me" checkbox (sign-in). Carried, never validated.
    pub const REMEMBER_ME: &str = "remember_me";
}

/// The validation rule family applied to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Required, then checked against the email shape.
    Email,
    /// Required; with `enforce_policy` the full strength policy also applies.
    Password {
        /// Whether the five-check password policy applies.
        enforce_policy: bool,
    },
    /// Must equal the raw value of the `against` field.
    ConfirmPassword {
        /// Name of the field being confirmed.
        against: &'static str,
    },
    /// Non-empty after trimming.
    RequiredText,
    /// The checkbox must be ticked.
    RequiredCheckbox {
        /// Message shown when the box is unticked.
        message: &'static str,
    },
}

/// Definition of one field on a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// The field name.
    pub name: &'static str,
    /// Human-readable label, embedded in "is required" messages.
    pub label: &'static str,
    /// The rule family.
    pub kind: FieldKind,
}

impl FieldSpec {
    const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind }
    }
}

const SIGN_IN_FIELDS: &[FieldSpec] = &[
    FieldSpec::new(names::EMAIL, "Email", FieldKind::Email),
    FieldSpec::new(
        names::PASSWORD,
        "Password",
        FieldKind::Password {
            enforce_policy: false,
        },
    ),
];

const SIGN_UP_FIELDS: &[FieldSpec] = &[
    FieldSpec::new(names::NAME, "Full name", FieldKind::RequiredText),
    FieldSpec::new(names::EMAIL, "Email", FieldKind::Email),
    FieldSpec::new(
        names::PASSWORD,
        "Password",
        FieldKind::Password {
            enforce_policy: true,
        },
    ),
    FieldSpec::new(
        names::CONFIRM_PASSWORD,
        "Confirm password",
        FieldKind::ConfirmPassword {
            against: names::PASSWORD,
        },
    ),
    FieldSpec::new(
        names::AGREE_TERMS,
        "Terms of service",
        FieldKind::RequiredCheckbox {
            message: "You must agree to the terms of service",
        },
    ),
];

/// The forms the engine knows how to validate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    /// Email + password login.
    SignIn,
    /// Account creation.
    SignUp,
}

impl FormKind {
    /// Returns the form's ordered field definitions.
    pub const fn fields(self) -> &'static [FieldSpec] {
        match self {
            Self::SignIn => SIGN_IN_FIELDS,
            Self::SignUp => SIGN_UP_FIELDS,
        }
    }

    /// Returns the field spec with the given name, if the form has one.
    pub fn field(self, name: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|f| f.name == name)
    }

    /// Returns a stable, snake_case name for logs and spans.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SignIn => "sign_in",
            Self::SignUp => "sign_up",
        }
    }

    /// Returns the text of the submit control.
    pub const fn submit_label(self) -> &'static str {
        match self {
            Self::SignIn => "Sign In",
            Self::SignUp => "Create Account",
        }
    }

    /// Returns the banner shown after a successful submission.
    pub const fn success_message(self) -> &'static str {
        match self {
            Self::SignIn => "Login successful! Redirecting...",
            Self::SignUp => "Account created successfully! Redirecting to dashboard...",
        }
    }

    /// Returns `true` if this form reports a password strength score.
    pub const fn reports_strength(self) -> bool {
        matches!(self, Self::SignUp)
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The current values of one form, as read from the UI.
///
/// Missing text fields read as the empty string; missing checkboxes read
/// as unticked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormData {
    text: HashMap<String, String>,
    checkboxes: HashMap<String, bool>,
}

impl FormData {
    /// Creates an empty data set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds sign-in data.
    pub fn sign_in(
        email: impl Into<String>,
        password: impl Into<String>,
        remember_me: bool,
    ) -> Self {
        Self::new()
            .with_text(names::EMAIL, email)
            .with_text(names::PASSWORD, password)
            .with_checkbox(names::REMEMBER_ME, remember_me)
    }

    /// Builds sign-up data.
    pub fn sign_up(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
        agree_terms: bool,
    ) -> Self {
        Self::new()
            .with_text(names::NAME, name)
            .with_text(names::EMAIL, email)
            .with_text(names::PASSWORD, password)
            .with_text(names::CONFIRM_PASSWORD, confirm_password)
            .with_checkbox(names::AGREE_TERMS, agree_terms)
    }

    /// Sets a text value.
    #[must_use]
    pub fn with_text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_text(name, value);
        self
    }

    /// Sets a checkbox value.
    #[must_use]
    pub fn with_checkbox(mut self, name: impl Into<String>, checked: bool) -> Self {
        self.set_checkbox(name, checked);
        self
    }

    /// Sets a text value in place, e.g. on a keystroke.
    pub fn set_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.text.insert(name.into(), value.into());
    }

    /// Sets a checkbox value in place.
    pub fn set_checkbox(&mut self, name: impl Into<String>, checked: bool) {
        self.checkboxes.insert(name.into(), checked);
    }

    /// Returns the raw text value of a field.
    pub fn text(&self, name: &str) -> &str {
        self.text.get(name).map_or("", String::as_str)
    }

    /// Returns whether a checkbox is ticked.
    pub fn checked(&self, name: &str) -> bool {
        self.checkboxes.get(name).copied().unwrap_or(false)
    }

    /// Returns a snapshot of one text field.
    pub fn field_value(&self, name: &str) -> FieldValue {
        FieldValue::new(name, self.text(name))
    }
}
