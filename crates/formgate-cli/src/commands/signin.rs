//! The `signin` command.

use async_trait::async_trait;
use formgate_core::FormgateResult;
use formgate_forms::{FormData, FormKind};

use crate::command::{CommandContext, CommandOutput, ManagementCommand};
use crate::commands::string_arg;
use crate::submission::run_submission;

/// Validates and submits the sign-in form.
pub struct SigninCommand;

#[async_trait]
impl ManagementCommand for SigninCommand {
    fn name(&self) -> &'static str {
        "signin"
    }

    fn help(&self) -> &'static str {
        "Sign in with an email and password"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
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
            clap::Arg::new("remember-me")
                .long("remember-me")
                .action(clap::ArgAction::SetTrue)
                .help("Keep me signed in"),
        )
    }

    async fn handle(
        &self,
        matches: &clap::ArgMatches,
        ctx: &CommandContext,
    ) -> FormgateResult<CommandOutput> {
        let data = FormData::sign_in(
            string_arg(matches, "email"),
            string_arg(matches, "password"),
            matches.get_flag("remember-me"),
        );
        run_submission(FormKind::SignIn, &data, ctx).await
    }
}
