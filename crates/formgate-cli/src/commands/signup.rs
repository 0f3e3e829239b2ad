//! The `signup` command.

use async_trait::async_trait;
use formgate_core::FormgateResult;
use formgate_forms::{FormData, FormKind};

use crate::command::{CommandContext, CommandOutput, ManagementCommand};
use crate::commands::string_arg;
use crate::submission::run_submission;

/// Validates and submits the sign-up form.
pub struct SignupCommand;

#[async_trait]
impl ManagementCommand for SignupCommand {
    fn name(&self) -> &'static str {
        "signup"
    }

    fn help(&self) -> &'static str {
        "Create an account"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            clap::Arg::new("name")
                .long("name")
                .default_value("")
                .help("Full name"),
        )
        .arg(
            clap::Arg::new("email")
                .long("email")
                .default_value("")
                .help("Email address"),
        )
        .arg(
            clap::Arg::new("password")
                .long("password")
                .default_value("")
                .help("Password"),
        )
        .arg(
            clap::Arg::new("confirm-password")
                .long("confirm-password")
                .default_value("")
                .help("Password again"),
        )
        .arg(
            clap::Arg::new("agree-terms")
                .long("agree-terms")
                .action(clap::ArgAction::SetTrue)
                .help("Agree to the terms of service"),
        )
    }

    async fn handle(
        &self,
        matches: &clap::ArgMatches,
        ctx: &CommandContext,
    ) -> FormgateResult<CommandOutput> {
        let data = FormData::sign_up(
            string_arg(matches, "name"),
            string_arg(matches, "email"),
            string_arg(matches, "password"),
            string_arg(matches, "confirm-password"),
            matches.get_flag("agree-terms"),
        );
        run_submission(FormKind::SignUp, &data, ctx).await
    }
}
