//! Field-level validation rules.
//!
//! Every rule is a pure function from the current value(s) to a
//! [`ValidationOutcome`]. Calling a rule twice with the same input yields the
//! same outcome.
//!
//! The password rule runs the [`PasswordCheck`]s in a fixed priority order and
//! reports only the first failure, so the user sees one message at a time.

use std::fmt;

use formgate_core::PasswordPolicy;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::outcome::ValidationOutcome;
use crate::strength::PasswordStrengthScore;

/// `local@domain.tld`: no whitespace, one `@`, at least one `.` after it.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

/// Message for a malformed email address.
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";

/// Message for a confirmation that differs from the password.
pub const PASSWORD_MISMATCH_MESSAGE: &str = "Passwords do not match";

/// One check of the password policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PasswordCheck {
    /// At least `min_length` characters.
    MinLength,
    /// At least one ASCII uppercase letter.
    Uppercase,
    /// At least one ASCII lowercase letter.
    Lowercase,
    /// At least one ASCII digit.
    Digit,
    /// At least one character from the policy's special set.
    Special,
}

impl PasswordCheck {
    /// All checks, in reporting priority order.
    pub const ALL: [Self; 5] = [
        Self::MinLength,
        Self::Uppercase,
        Self::Lowercase,
        Self::Digit,
        Self::Special,
    ];

    /// Returns `true` if `password` satisfies this check.
    pub fn passes(self, password: &str, policy: &PasswordPolicy) -> bool {
        match self {
            Self::MinLength => password.chars().count() >= policy.min_length,
            Self::Uppercase => password.chars().any(|c| c.is_ascii_uppercase()),
            Self::Lowercase => password.chars().any(|c| c.is_ascii_lowercase()),
            Self::Digit => password.chars().any(|c| c.is_ascii_digit()),
            Self::Special => password.chars().any(|c| policy.is_special(c)),
        }
    }

    /// Returns the message shown when this check fails.
    pub fn message(self, policy: &PasswordPolicy) -> String {
        match self {
            Self::MinLength => format!(
                "Password must be at least {} characters long",
                policy.min_length
            ),
            Self::Uppercase => "Password must contain at least one uppercase letter".to_string(),
            Self::Lowercase => "Password must contain at least one lowercase letter".to_string(),
            Self::Digit => "Password must contain at least one number".to_string(),
            Self::Special => "Password must contain at least one special character".to_string(),
        }
    }

    /// Returns a description of this check's requirement.
    pub fn help_text(self, policy: &PasswordPolicy) -> String {
        match self {
            Self::MinLength => format!(
                "Your password must contain at least {} characters.",
                policy.min_length
            ),
            Self::Uppercase => "Your password must contain an uppercase letter.".to_string(),
            Self::Lowercase => "Your password must contain a lowercase letter.".to_string(),
            Self::Digit => "Your password must contain a number.".to_string(),
            Self::Special => format!(
                "Your password must contain one of {}",
                policy.special_characters
            ),
        }
    }
}

impl fmt::Display for PasswordCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MinLength => "min_length",
            Self::Uppercase => "uppercase",
            Self::Lowercase => "lowercase",
            Self::Digit => "digit",
            Self::Special => "special",
        };
        f.write_str(name)
    }
}

/// Checks the shape of an email address.
///
/// An empty (or all-whitespace) value is `Valid`: nothing is flagged while the
/// user has typed nothing. Required-ness is enforced separately at submit time.
pub fn validate_email(value: &str) -> ValidationOutcome {
    let trimmed = value.trim();
    if trimmed.is_empty() || EMAIL_RE.is_match(trimmed) {
        ValidationOutcome::Valid
    } else {
        ValidationOutcome::invalid(INVALID_EMAIL_MESSAGE)
    }
}

/// Applies the password policy.
///
/// Returns the first failing check's message (if any) together with the
/// strength score. The score is 5 exactly when the outcome is `Valid`.
pub fn validate_password(
    value: &str,
    policy: &PasswordPolicy,
) -> (ValidationOutcome, PasswordStrengthScore) {
    let outcome = PasswordCheck::ALL
        .into_iter()
        .find(|check| !check.passes(value, policy))
        .map_or(ValidationOutcome::Valid, |check| {
            ValidationOutcome::invalid(check.message(policy))
        });
    (outcome, PasswordStrengthScore::evaluate(value, policy))
}

/// Requires the confirmation to equal the password exactly.
///
/// Comparison is case-sensitive and does not trim.
pub fn validate_confirm_password(password: &str, confirm: &str) -> ValidationOutcome {
    if password == confirm {
        ValidationOutcome::Valid
    } else {
        ValidationOutcome::invalid(PASSWORD_MISMATCH_MESSAGE)
    }
}

/// Requires a non-empty value after trimming.
pub fn validate_required(value: &str, field_label: &str) -> ValidationOutcome {
    if value.trim().is_empty() {
        ValidationOutcome::invalid(format!("{field_label} is required"))
    } else {
        ValidationOutcome::Valid
    }
}

/// Requires a ticked checkbox.
pub fn validate_checked(checked: bool, message: &str) -> ValidationOutcome {
    if checked {
        ValidationOutcome::Valid
    } else {
        ValidationOutcome::invalid(message)
    }
}
