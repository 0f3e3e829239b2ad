//! The per-form validation engine and submission lifecycle.
//!
//! A [`FormValidationEngine`] is constructed explicitly for one form and
//! handed to whatever renders that form. It exposes the field rules, whole-form
//! validation, and a small state machine:
//!
//! ```text
//! Idle --begin (all valid)--> Submitting --complete(Succeeded)--> Succeeded --reset--> Idle
//!                             Submitting --complete(Failed)-----> Failed ----reset--> Idle
//! ```
//!
//! `Validating` is held while [`FormValidationEngine::validate_form`] runs from
//! `Idle`. Lifecycle misuse is reported as a contract violation
//! ([`FormgateError::AlreadySubmitting`] or
//! [`FormgateError::InvalidStateTransition`]), never as a field error.

use std::fmt;

use formgate_core::{FormgateError, FormgateResult, PasswordPolicy, Settings};
use serde::{Deserialize, Serialize};

use crate::fields::{FormData, FormKind};
use crate::outcome::ValidationOutcome;
use crate::rules;
use crate::strength::PasswordStrengthScore;
use crate::validation::{self, FormReport};

/// Where a form is in its submission lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    /// Editable, nothing in flight.
    Idle,
    /// Whole-form validation is running.
    Validating,
    /// A submission is in flight; the submit control should be disabled.
    Submitting,
    /// The last submission succeeded.
    Succeeded,
    /// The last submission failed; the form stays editable.
    Failed,
}

impl SubmissionState {
    /// Returns `true` for `Succeeded` and `Failed`.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    /// Returns `true` while the submit control should be disabled.
    pub const fn is_busy(self) -> bool {
        matches!(self, Self::Validating | Self::Submitting)
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "Idle",
            Self::Validating => "Validating",
            Self::Submitting => "Submitting",
            Self::Succeeded => "Succeeded",
            Self::Failed => "Failed",
        };
        f.write_str(name)
    }
}

/// How an in-flight submission settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionResult {
    /// The submission was accepted.
    Succeeded,
    /// The submission was rejected.
    Failed,
}

impl From<SubmissionResult> for SubmissionState {
    fn from(result: SubmissionResult) -> Self {
        match result {
            SubmissionResult::Succeeded => Self::Succeeded,
            SubmissionResult::Failed => Self::Failed,
        }
    }
}

/// Validation rules and submission state for one form.
///
/// Not `Clone`: a copy taken mid-submission would carry its own
/// `Submitting` state past the single-flight check.
///
/// ```compile_fail
/// use formgate_forms::{FormKind, FormValidationEngine};
///
/// let engine = FormValidationEngine::new(FormKind::SignIn);
/// let _second = engine.clone();
/// ```
#[derive(Debug)]
pub struct FormValidationEngine {
    kind: FormKind,
    policy: PasswordPolicy,
    state: SubmissionState,
    /// Verdict of the most recent `validate_form`; consumed by `begin_submission`.
    ready_to_submit: bool,
}

impl FormValidationEngine {
    /// Creates an engine for `kind` with the default password policy.
    pub fn new(kind: FormKind) -> Self {
        Self::with_policy(kind, PasswordPolicy::default())
    }

    /// Creates an engine for `kind` with a custom password policy.
    pub const fn with_policy(kind: FormKind, policy: PasswordPolicy) -> Self {
        Self {
            kind,
            policy,
            state: SubmissionState::Idle,
            ready_to_submit: false,
        }
    }

    /// Creates an engine for `kind` configured from `settings`.
    pub fn from_settings(kind: FormKind, settings: &Settings) -> Self {
        Self::with_policy(kind, settings.password_policy.clone())
    }

    /// Returns the form this engine validates.
    pub const fn kind(&self) -> FormKind {
        self.kind
    }

    /// Returns the password policy in force.
    pub const fn policy(&self) -> &PasswordPolicy {
        &self.policy
    }

    /// Returns the current submission state.
    pub const fn state(&self) -> SubmissionState {
        self.state
    }

    /// Returns `true` if the last whole-form validation passed and has not
    /// been consumed by a submission yet.
    pub const fn is_ready_to_submit(&self) -> bool {
        self.ready_to_submit
    }

    // ── Field rules ──────────────────────────────────────────────────

    /// See [`rules::validate_email`].
    pub fn validate_email(&self, value: &str) -> ValidationOutcome {
        rules::validate_email(value)
    }

    /// Live password check.
    ///
    /// On sign-up this applies the policy and returns the strength score. On
    /// sign-in passwords are only checked for presence at submit time, so
    /// this returns `Valid` and no score.
    pub fn validate_password(
        &self,
        value: &str,
    ) -> (ValidationOutcome, Option<PasswordStrengthScore>) {
        if self.kind.reports_strength() {
            let (outcome, score) = rules::validate_password(value, &self.policy);
            (outcome, Some(score))
        } else {
            (ValidationOutcome::Valid, None)
        }
    }

    /// See [`rules::validate_confirm_password`].
    pub fn validate_confirm_password(&self, password: &str, confirm: &str) -> ValidationOutcome {
        rules::validate_confirm_password(password, confirm)
    }

    /// See [`rules::validate_required`].
    pub fn validate_required(&self, value: &str, field_label: &str) -> ValidationOutcome {
        rules::validate_required(value, field_label)
    }

    /// Validates every field and records whether the form may be submitted.
    pub fn validate_form(&mut self, data: &FormData) -> FormReport {
        let from_idle = self.state == SubmissionState::Idle;
        if from_idle {
            self.transition(SubmissionState::Validating);
        }

        let report = validation::validate_form(self.kind, data, &self.policy);
        self.ready_to_submit = report.is_valid();
        tracing::debug!(
            form = %self.kind,
            valid = self.ready_to_submit,
            errors = report.errors().len(),
            "validated form"
        );

        if from_idle {
            self.transition(SubmissionState::Idle);
        }
        report
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Starts a submission.
    ///
    /// Moves `Idle -> Submitting` if the most recent [`validate_form`] passed.
    /// Otherwise nothing changes and `Idle` is returned; the caller should
    /// surface the per-field errors instead.
    ///
    /// [`validate_form`]: Self::validate_form
    pub fn begin_submission(&mut self) -> FormgateResult<SubmissionState> {
        match self.state {
            SubmissionState::Submitting => {
                tracing::warn!(form = %self.kind, "begin_submission while already submitting");
                Err(FormgateError::AlreadySubmitting)
            }
            SubmissionState::Succeeded | SubmissionState::Failed => {
                Err(self.violation("begin submission"))
            }
            SubmissionState::Idle | SubmissionState::Validating => {
                if self.ready_to_submit {
                    self.ready_to_submit = false;
                    self.transition(SubmissionState::Submitting);
                } else {
                    tracing::debug!(form = %self.kind, "submission blocked by invalid fields");
                }
                Ok(self.state)
            }
        }
    }

    /// Settles an in-flight submission.
    pub fn complete_submission(
        &mut self,
        result: SubmissionResult,
    ) -> FormgateResult<SubmissionState> {
        if self.state != SubmissionState::Submitting {
            return Err(self.violation("complete submission"));
        }
        self.transition(result.into());
        Ok(self.state)
    }

    /// Returns a settled form to `Idle`.
    ///
    /// A no-op from `Idle`. Submissions cannot be cancelled, so this fails
    /// while `Submitting`. Field outcomes are not touched; callers re-derive
    /// them from the current input.
    pub fn reset_submission(&mut self) -> FormgateResult<SubmissionState> {
        match self.state {
            SubmissionState::Idle => Ok(SubmissionState::Idle),
            SubmissionState::Succeeded | SubmissionState::Failed => {
                self.transition(SubmissionState::Idle);
                Ok(self.state)
            }
            SubmissionState::Validating | SubmissionState::Submitting => {
                Err(self.violation("reset submission"))
            }
        }
    }

    fn transition(&mut self, to: SubmissionState) {
        tracing::debug!(form = %self.kind, from = %self.state, %to, "submission state transition");
        self.state = to;
    }

    fn violation(&self, action: &str) -> FormgateError {
        tracing::warn!(
            form = %self.kind,
            state = %self.state,
            action,
            "lifecycle contract violation"
        );
        FormgateError::invalid_transition(self.state, action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::names;

    fn valid_sign_in() -> FormData {
        FormData::sign_in("a@b.com", "hunter2", false)
    }

    fn submitting_engine() -> FormValidationEngine {
        let mut engine = FormValidationEngine::new(FormKind::SignIn);
        engine.validate_form(&valid_sign_in());
        assert_eq!(engine.begin_submission().unwrap(), SubmissionState::Submitting);
        engine
    }

    #[test]
    fn test_new_engine_is_idle() {
        let engine = FormValidationEngine::new(FormKind::SignUp);
        assert_eq!(engine.state(), SubmissionState::Idle);
        assert!(!engine.is_ready_to_submit());
        assert_eq!(engine.policy().min_length, 8);
    }

    #[test]
    fn test_validate_form_returns_to_idle() {
        let mut engine = FormValidationEngine::new(FormKind::SignIn);
        let report = engine.validate_form(&valid_sign_in());
        assert!(report.is_valid());
        assert_eq!(engine.state(), SubmissionState::Idle);
        assert!(engine.is_ready_to_submit());
    }

    #[test]
    fn test_begin_requires_valid_form() {
        let mut engine = FormValidationEngine::new(FormKind::SignIn);
        // never validated
        assert_eq!(engine.begin_submission().unwrap(), SubmissionState::Idle);

        engine.validate_form(&FormData::sign_in("a@b", "pw", false));
        assert_eq!(engine.begin_submission().unwrap(), SubmissionState::Idle);
        assert_eq!(engine.state(), SubmissionState::Idle);
    }

    #[test]
    fn test_most_recent_validation_wins() {
        let mut engine = FormValidationEngine::new(FormKind::SignIn);
        engine.validate_form(&valid_sign_in());
        engine.validate_form(&FormData::sign_in("", "pw", false));
        assert_eq!(engine.begin_submission().unwrap(), SubmissionState::Idle);
    }

    #[test]
    fn test_begin_transitions_to_submitting() {
        let engine = submitting_engine();
        assert_eq!(engine.state(), SubmissionState::Submitting);
        assert!(engine.state().is_busy());
        assert!(!engine.is_ready_to_submit());
    }

    #[test]
    fn test_double_begin_rejected() {
        let mut engine = submitting_engine();
        let err = engine.begin_submission().unwrap_err();
        assert!(matches!(err, FormgateError::AlreadySubmitting));
        assert!(err.is_contract_violation());
        assert_eq!(engine.state(), SubmissionState::Submitting);
    }

    #[test]
    fn test_complete_success_and_reset() {
        let mut engine = submitting_engine();
        assert_eq!(
            engine.complete_submission(SubmissionResult::Succeeded).unwrap(),
            SubmissionState::Succeeded
        );
        assert!(engine.state().is_terminal());
        assert_eq!(engine.reset_submission().unwrap(), SubmissionState::Idle);
    }

    #[test]
    fn test_complete_failure_and_retry() {
        let mut engine = submitting_engine();
        assert_eq!(
            engine.complete_submission(SubmissionResult::Failed).unwrap(),
            SubmissionState::Failed
        );
        engine.reset_submission().unwrap();

        // verdict was consumed; must validate again
        assert_eq!(engine.begin_submission().unwrap(), SubmissionState::Idle);
        engine.validate_form(&valid_sign_in());
        assert_eq!(engine.begin_submission().unwrap(), SubmissionState::Submitting);
    }

    #[test]
    fn test_complete_from_idle_rejected() {
        let mut engine = FormValidationEngine::new(FormKind::SignIn);
        let err = engine
            .complete_submission(SubmissionResult::Succeeded)
            .unwrap_err();
        assert!(matches!(
            err,
            FormgateError::InvalidStateTransition { ref from, .. } if from == "Idle"
        ));
        assert_eq!(engine.state(), SubmissionState::Idle);
    }

    #[test]
    fn test_complete_twice_rejected() {
        let mut engine = submitting_engine();
        engine.complete_submission(SubmissionResult::Succeeded).unwrap();
        let err = engine.complete_submission(SubmissionResult::Failed).unwrap_err();
        assert!(err.is_contract_violation());
        assert_eq!(engine.state(), SubmissionState::Succeeded);
    }

    #[test]
    fn test_begin_from_terminal_requires_reset() {
        let mut engine = submitting_engine();
        engine.complete_submission(SubmissionResult::Succeeded).unwrap();
        engine.validate_form(&valid_sign_in());
        let err = engine.begin_submission().unwrap_err();
        assert!(matches!(err, FormgateError::InvalidStateTransition { .. }));
        // validation while settled leaves the state alone
        assert_eq!(engine.state(), SubmissionState::Succeeded);
    }

    #[test]
    fn test_reset_while_submitting_rejected() {
        let mut engine = submitting_engine();
        assert!(engine.reset_submission().unwrap_err().is_contract_violation());
        assert_eq!(engine.state(), SubmissionState::Submitting);
    }

    #[test]
    fn test_reset_from_idle_is_noop() {
        let mut engine = FormValidationEngine::new(FormKind::SignUp);
        assert_eq!(engine.reset_submission().unwrap(), SubmissionState::Idle);
    }

    #[test]
    fn test_validate_while_submitting_keeps_state() {
        let mut engine = submitting_engine();
        let report = engine.validate_form(&valid_sign_in());
        assert!(report.is_valid());
        assert_eq!(engine.state(), SubmissionState::Submitting);
    }

    #[test]
    fn test_live_password_only_scored_on_sign_up() {
        let sign_in = FormValidationEngine::new(FormKind::SignIn);
        assert_eq!(sign_in.validate_password("x"), (ValidationOutcome::Valid, None));

        let sign_up = FormValidationEngine::new(FormKind::SignUp);
        let (outcome, score) = sign_up.validate_password("Abcdefg1!");
        assert!(outcome.is_valid());
        assert_eq!(score.map(PasswordStrengthScore::value), Some(5));
    }

    #[test]
    fn test_from_settings_uses_policy() {
        let mut settings = Settings::default();
        settings.password_policy.min_length = 4;
        let engine = FormValidationEngine::from_settings(FormKind::SignUp, &settings);
        let (outcome, _) = engine.validate_password("Ab1!");
        assert!(outcome.is_valid());
    }

    #[test]
    fn test_field_rule_delegates() {
        let engine = FormValidationEngine::new(FormKind::SignUp);
        assert!(engine.validate_email("").is_valid());
        assert!(!engine.validate_email("a@b").is_valid());
        assert!(!engine.validate_confirm_password("a", "A").is_valid());
        assert_eq!(
            engine.validate_required("", "Full name").message(),
            Some("Full name is required")
        );
    }

    #[test]
    fn test_sign_up_terms_block_submission() {
        let mut engine = FormValidationEngine::new(FormKind::SignUp);
        let data = FormData::sign_up("Ada", "ada@x.io", "Abcdefg1!", "Abcdefg1!", true)
            .with_checkbox(names::AGREE_TERMS, false);
        assert!(!engine.validate_form(&data).is_valid());
        assert_eq!(engine.begin_submission().unwrap(), SubmissionState::Idle);
    }

    #[test]
    fn test_state_display_and_conversion() {
        assert_eq!(SubmissionState::Submitting.to_string(), "Submitting");
        assert_eq!(
            SubmissionState::from(SubmissionResult::Failed),
            SubmissionState::Failed
        );
        assert!(!SubmissionState::Idle.is_busy());
        assert!(SubmissionState::Validating.is_busy());
    }
}
