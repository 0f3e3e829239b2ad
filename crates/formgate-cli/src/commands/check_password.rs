//! The `check-password` command.
//!
//! Runs the sign-up password policy and prints the strength indicator.

use async_trait::async_trait;
use formgate_core::FormgateResult;
use formgate_forms::{validate_password, PasswordCheck, ValidationOutcome};
use serde::Serialize;

use crate::command::{CommandContext, CommandOutput, ManagementCommand};
use crate::commands::string_arg;

/// Checks a password against the sign-up policy.
pub struct CheckPasswordCommand;

#[derive(Debug, Serialize)]
struct StrengthReport {
    outcome: ValidationOutcome,
    score: u8,
    label: &'static str,
    color: &'static str,
    fill_percent: u8,
    failed_checks: Vec<String>,
    requirements: Vec<String>,
}

#[async_trait]
impl ManagementCommand for CheckPasswordCommand {
    fn name(&self) -> &'static str {
        "check-password"
    }

    fn help(&self) -> &'static str {
        "Check a password against the sign-up policy"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            clap::Arg::new("value")
                .required(true)
                .help("The password to check"),
        )
    }

    async fn handle(
        &self,
        matches: &clap::ArgMatches,
        ctx: &CommandContext,
    ) -> FormgateResult<CommandOutput> {
        let password = string_arg(matches, "value");
        let policy = &ctx.settings.password_policy;
        let (outcome, score) = validate_password(&password, policy);

        let failing: Vec<PasswordCheck> = PasswordCheck::ALL
            .into_iter()
            .filter(|check| !check.passes(&password, policy))
            .collect();

        let mut text = format!("Strength: {score}");
        if let Some(msg) = outcome.message() {
            text.push('\n');
            text.push_str(msg);
        }

        let report = StrengthReport {
            score: score.value(),
            label: score.label(),
            color: score.color(),
            fill_percent: score.fill_percent(),
            failed_checks: failing.iter().map(ToString::to_string).collect(),
            requirements: failing.iter().map(|check| check.help_text(policy)).collect(),
            outcome,
        };
        let body = serde_json::to_value(&report).unwrap_or(serde_json::Value::Null);

        Ok(if report.outcome.is_valid() {
            CommandOutput::success(text, body)
        } else {
            CommandOutput::rejected(text, body)
        })
    }
}
