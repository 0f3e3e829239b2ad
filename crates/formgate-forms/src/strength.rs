//! Password strength scoring.
//!
//! The score counts how many of the five [`PasswordCheck`]s a password
//! passes. It is derived on demand and never stored.

use std::fmt;

use formgate_core::PasswordPolicy;
use serde::{Deserialize, Serialize};

use crate::rules::PasswordCheck;

const LABELS: [&str; 5] = ["Very Weak", "Weak", "Fair", "Good", "Strong"];
const COLORS: [&str; 5] = ["#ef4444", "#f97316", "#eab308", "#22c55e", "#16a34a"];

/// A 0–5 summary of password policy compliance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PasswordStrengthScore(u8);

impl TryFrom<u8> for PasswordStrengthScore {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > Self::MAX {
            Err(format!(
                "password strength score {value} is out of range 0..={}",
                Self::MAX
            ))
        } else {
            Ok(Self(value))
        }
    }
}

impl From<PasswordStrengthScore> for u8 {
    fn from(score: PasswordStrengthScore) -> Self {
        score.0
    }
}

impl PasswordStrengthScore {
    /// The highest possible score.
    pub const MAX: u8 = 5;

    /// Scores `password` against `policy`.
    pub fn evaluate(password: &str, policy: &PasswordPolicy) -> Self {
        let passed = PasswordCheck::ALL
            .into_iter()
            .filter(|check| check.passes(password, policy))
            .count();
        Self(u8::try_from(passed).unwrap_or(Self::MAX))
    }

    /// Returns the raw score.
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns `true` if every check passed.
    pub const fn is_max(self) -> bool {
        self.0 == Self::MAX
    }

    /// Returns the indicator label. A score of 0 shares the "Very Weak" label.
    pub const fn label(self) -> &'static str {
        LABELS[self.level_index()]
    }

    /// Returns the indicator color as a CSS hex string.
    pub const fn color(self) -> &'static str {
        COLORS[self.level_index()]
    }

    /// Returns how full the indicator bar is, in percent.
    pub const fn fill_percent(self) -> u8 {
        self.0 * 20
    }

    const fn level_index(self) -> usize {
        if self.0 == 0 {
            0
        } else {
            self.0 as usize - 1
        }
    }
}

impl fmt::Display for PasswordStrengthScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({})", self.0, Self::MAX, self.label())
    }
}
