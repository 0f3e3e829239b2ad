//! The asynchronous submit boundary.
//!
//! The engine itself never waits. Sending a validated form somewhere is the
//! job of a [`SubmitBackend`]; [`submit_form`] ties the two together:
//! validate, begin, await the backend, complete.
//!
//! [`SimulatedBackend`] stands in for a real service: it waits a fixed
//! latency and always accepts.

use std::time::Duration;

use async_trait::async_trait;
use formgate_core::{FormgateResult, SubmissionSettings};
use serde::Serialize;

use crate::engine::{FormValidationEngine, SubmissionResult, SubmissionState};
use crate::fields::{FormData, FormKind};
use crate::validation::FormReport;

/// A validated form handed to a backend.
#[derive(Debug, Clone, Serialize)]
pub struct FormSubmission {
    /// Which form is being submitted.
    pub kind: FormKind,
    /// The submitted values.
    pub data: FormData,
}

/// Something that accepts or rejects submitted forms.
///
/// Implementations must be `Send + Sync` so one backend can serve many
/// engines. A rejection is reported as
/// [`FormgateError::SubmitRejected`](formgate_core::FormgateError::SubmitRejected).
#[async_trait]
pub trait SubmitBackend: Send + Sync {
    /// Sends the submission and waits for the verdict.
    async fn submit(&self, submission: &FormSubmission) -> FormgateResult<()>;
}

/// A backend that waits a fixed latency and then accepts everything.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedBackend {
    latency: Duration,
}

impl SimulatedBackend {
    /// Creates a simulated backend with the given latency.
    pub const fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// Creates a simulated backend using the configured latency.
    pub const fn from_settings(settings: &SubmissionSettings) -> Self {
        Self::new(settings.simulated_latency())
    }

    /// Returns the simulated latency.
    pub const fn latency(&self) -> Duration {
        self.latency
    }
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        Self::from_settings(&SubmissionSettings::default())
    }
}

#[async_trait]
impl SubmitBackend for SimulatedBackend {
    async fn submit(&self, submission: &FormSubmission) -> FormgateResult<()> {
        tracing::debug!(form = %submission.kind, latency = ?self.latency, "simulating submit");
        tokio::time::sleep(self.latency).await;
        Ok(())
    }
}

/// What the UI does after a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FollowUp {
    /// The success banner text.
    pub message: String,
    /// Where to navigate.
    pub redirect_to: String,
    /// How long to show the banner before navigating, in milliseconds.
    pub delay_ms: u64,
}

impl FollowUp {
    /// Builds the follow-up for a form from the submission settings.
    pub fn for_form(kind: FormKind, settings: &SubmissionSettings) -> Self {
        Self {
            message: kind.success_message().to_string(),
            redirect_to: settings.redirect_to.clone(),
            delay_ms: settings.redirect_delay_ms,
        }
    }

    /// Returns the display delay as a [`Duration`].
    pub const fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// The result of one [`submit_form`] call.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitAttempt {
    /// The validation report the attempt was based on.
    pub report: FormReport,
    /// The engine state when the attempt returned.
    pub state: SubmissionState,
    /// Present when the submission succeeded.
    pub follow_up: Option<FollowUp>,
    /// The backend's rejection message, when the submission failed.
    pub rejection: Option<String>,
}

impl SubmitAttempt {
    /// Returns `true` if the backend accepted the submission.
    pub fn succeeded(&self) -> bool {
        self.state == SubmissionState::Succeeded
    }
}

/// Validates `data` and, if every field passes, submits it through `backend`.
///
/// An invalid form returns immediately with the engine still `Idle` and the
/// backend untouched. Otherwise the engine ends in `Succeeded` or `Failed`;
/// the caller resets it once the UI is ready for another attempt.
///
/// # Errors
///
/// Returns a contract violation if the engine is not `Idle` on entry.
pub async fn submit_form(
    engine: &mut FormValidationEngine,
    data: &FormData,
    backend: &dyn SubmitBackend,
    settings: &SubmissionSettings,
) -> FormgateResult<SubmitAttempt> {
    let report = engine.validate_form(data);
    let state = engine.begin_submission()?;
    if state != SubmissionState::Submitting {
        return Ok(SubmitAttempt {
            report,
            state,
            follow_up: None,
            rejection: None,
        });
    }

    let submission = FormSubmission {
        kind: engine.kind(),
        data: data.clone(),
    };

    let (result, rejection) = match backend.submit(&submission).await {
        Ok(()) => (SubmissionResult::Succeeded, None),
        Err(err) => {
            tracing::warn!(form = %submission.kind, error = %err, "submission rejected");
            (SubmissionResult::Failed, Some(err.to_string()))
        }
    };

    let state = engine.complete_submission(result)?;
    tracing::info!(form = %submission.kind, %state, "submission settled");

    let follow_up = (state == SubmissionState::Succeeded)
        .then(|| FollowUp::for_form(submission.kind, settings));

    Ok(SubmitAttempt {
        report,
        state,
        follow_up,
        rejection,
    })
}
