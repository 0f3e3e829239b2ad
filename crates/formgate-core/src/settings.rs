//! Settings for formgate.
//!
//! [`Settings`] holds the tunable parts of the form engine: the password
//! policy, the timing of the simulated submit boundary, and logging. Every
//! field has a default, so an empty configuration file is valid.
//!
//! Settings are plain values passed to whoever needs them. There is no global
//! instance; each engine is configured explicitly.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// The default set of characters that satisfy the special-character check.
pub const DEFAULT_SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Password policy applied to the sign-up password field.
///
/// The order in which the checks run is fixed; only their parameters are
/// configurable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordPolicy {
    /// Minimum password length, in characters.
    pub min_length: usize,
    /// Characters accepted by the special-character check.
    pub special_characters: String,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            special_characters: DEFAULT_SPECIAL_CHARACTERS.to_string(),
        }
    }
}

impl PasswordPolicy {
    /// Returns `true` if `c` belongs to the configured special-character set.
    pub fn is_special(&self, c: char) -> bool {
        self.special_characters.contains(c)
    }
}

/// Timing and follow-up behavior of a form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionSettings {
    /// Latency of the simulated submit backend, in milliseconds.
    pub simulated_latency_ms: u64,
    /// Where the UI navigates after a successful submission.
    pub redirect_to: String,
    /// How long the success banner is shown before redirecting, in milliseconds.
    pub redirect_delay_ms: u64,
}

impl Default for SubmissionSettings {
    fn default() -> Self {
        Self {
            simulated_latency_ms: 2000,
            redirect_to: "dashboard.html".to_string(),
            redirect_delay_ms: 1500,
        }
    }
}

impl SubmissionSettings {
    /// Returns the simulated latency as a [`Duration`].
    pub const fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }

    /// Returns the redirect delay as a [`Duration`].
    pub const fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }
}

/// The complete set of formgate settings.
///
/// # Examples
///
/// ```
/// use formgate_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(settings.debug);
/// assert_eq!(settings.password_policy.min_length, 8);
/// assert_eq!(settings.submission.redirect_to, "dashboard.html");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    // ── Core ─────────────────────────────────────────────────────────

    /// Whether debug mode is enabled (pretty logs instead of JSON).
    pub debug: bool,

    // ── Logging ──────────────────────────────────────────────────────

    /// The log filter (e.g. "info", "debug", "formgate_forms=trace").
    pub log_level: String,

    // ── Forms ────────────────────────────────────────────────────────

    /// Password policy for the sign-up form.
    pub password_policy: PasswordPolicy,
    /// Submission timing and follow-up.
    pub submission: SubmissionSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            log_level: "info".to_string(),
            password_policy: PasswordPolicy::default(),
            submission: SubmissionSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(settings.debug);
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.submission.simulated_latency_ms, 2000);
        assert_eq!(settings.submission.redirect_delay_ms, 1500);
    }

    #[test]
    fn test_default_special_characters() {
        let policy = PasswordPolicy::default();
        for c in "!@#$%^&*(),.?\":{}|<>".chars() {
            assert!(policy.is_special(c), "{c} should be special");
        }
        assert!(!policy.is_special('-'));
        assert!(!policy.is_special('_'));
        assert!(!policy.is_special('a'));
    }

    #[test]
    fn test_durations() {
        let submission = SubmissionSettings {
            simulated_latency_ms: 250,
            redirect_delay_ms: 10,
            ..SubmissionSettings::default()
        };
        assert_eq!(submission.simulated_latency(), Duration::from_millis(250));
        assert_eq!(submission.redirect_delay(), Duration::from_millis(10));
    }

    #[test]
    fn test_settings_json_roundtrip_keeps_policy() {
        let mut settings = Settings::default();
        settings.password_policy.min_length = 12;
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }
}
