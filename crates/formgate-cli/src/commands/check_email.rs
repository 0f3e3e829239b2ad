//! The `check-email` command.
//!
//! Runs the live email check, the one shown when an email input loses focus.

use async_trait::async_trait;
use formgate_core::FormgateResult;
use formgate_forms::{validate_email, FieldValue};

use crate::command::{CommandContext, CommandOutput, ManagementCommand};
use crate::commands::string_arg;

/// Checks the shape of an email address.
pub struct CheckEmailCommand;

#[async_trait]
impl ManagementCommand for CheckEmailCommand {
    fn name(&self) -> &'static str {
        "check-email"
    }

    fn help(&self) -> &'static str {
        "Check an email address"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            clap::Arg::new("value")
                .required(true)
                .help("The email address to check"),
        )
    }

    async fn handle(
        &self,
        matches: &clap::ArgMatches,
        _ctx: &CommandContext,
    ) -> FormgateResult<CommandOutput> {
        let field = FieldValue::new("email", string_arg(matches, "value"));
        let outcome = validate_email(&field.value);
        let body = serde_json::json!({ "field": field.name, "outcome": outcome });

        Ok(match outcome.message() {
            None => CommandOutput::success("valid", body),
            Some(msg) => CommandOutput::rejected(msg, body),
        })
    }
}
