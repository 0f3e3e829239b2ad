//! Shared plumbing for the `signin` and `signup` commands.

use std::fmt::Write as _;

use formgate_core::logging::form_span;
use formgate_core::FormgateResult;
use formgate_forms::{
    submit_form, FormData, FormKind, FormValidationEngine, SimulatedBackend, SubmitAttempt,
};
use tracing::Instrument;

use crate::command::{CommandContext, CommandOutput};

/// Validates and submits `data` against the simulated backend.
pub async fn run_submission(
    kind: FormKind,
    data: &FormData,
    ctx: &CommandContext,
) -> FormgateResult<CommandOutput> {
    let mut engine = FormValidationEngine::from_settings(kind, &ctx.settings);
    let backend = SimulatedBackend::from_settings(&ctx.settings.submission);

    let attempt = submit_form(&mut engine, data, &backend, &ctx.settings.submission)
        .instrument(form_span(kind.as_str()))
        .await?;

    Ok(render_attempt(&attempt))
}

/// Turns a submit attempt into command output.
pub fn render_attempt(attempt: &SubmitAttempt) -> CommandOutput {
    let body = serde_json::to_value(attempt).unwrap_or_else(|e| {
        serde_json::json!({ "error": format!("failed to serialize attempt: {e}") })
    });

    if !attempt.report.is_valid() {
        let mut text = String::new();
        for (field, message) in attempt.report.errors() {
            let _ = writeln!(text, "{field}: {message}");
        }
        return CommandOutput::rejected(text.trim_end(), body);
    }

    let mut text = String::new();
    if let Some(strength) = attempt.report.strength {
        let _ = writeln!(text, "Password strength: {strength}");
    }

    match (&attempt.follow_up, &attempt.rejection) {
        (Some(follow_up), _) => {
            let _ = write!(
                text,
                "{}\nRedirecting to {} in {} ms",
                follow_up.message, follow_up.redirect_to, follow_up.delay_ms
            );
            CommandOutput::success(text, body)
        }
        (None, rejection) => {
            let _ = write!(
                text,
                "{}",
                rejection.as_deref().unwrap_or("Submission did not complete")
            );
            CommandOutput::rejected(text, body)
        }
    }
}
