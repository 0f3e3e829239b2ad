//! Command framework for the `formgate` CLI.
//!
//! This module provides the [`ManagementCommand`] trait for defining CLI
//! commands and [`CommandRegistry`] for registering and dispatching them.
//!
//! Commands do not print. They return a [`CommandOutput`] which the binary
//! renders as text or JSON, so every command can be tested without capturing
//! stdout.
//!
//! ## Defining a Custom Command
//!
//! ```rust,no_run
//! use async_trait::async_trait;
//! use formgate_cli::command::{CommandContext, CommandOutput, ManagementCommand};
//! use formgate_core::FormgateResult;
//!
//! struct GreetCommand;
//!
//! #[async_trait]
//! impl ManagementCommand for GreetCommand {
//!     fn name(&self) -> &'static str { "greet" }
//!     fn help(&self) -> &'static str { "Say hello" }
//!
//!     async fn handle(
//!         &self,
//!         _matches: &clap::ArgMatches,
//!         _ctx: &CommandContext,
//!     ) -> FormgateResult<CommandOutput> {
//!         Ok(CommandOutput::success("Hello from formgate!", serde_json::json!({})))
//!     }
//! }
//! ```

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use formgate_core::{settings_loader, FormgateError, FormgateResult, Settings};

/// Everything a command needs besides its own arguments.
#[derive(Debug, Clone, Default)]
pub struct CommandContext {
    /// The loaded settings.
    pub settings: Settings,
    /// Whether output should be rendered as JSON.
    pub json: bool,
}

impl CommandContext {
    /// Creates a context.
    pub const fn new(settings: Settings, json: bool) -> Self {
        Self { settings, json }
    }
}

/// The result of running a command.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutput {
    /// `false` when the command ran but the input was rejected
    /// (e.g. a field failed validation). Maps to a non-zero exit status.
    pub success: bool,
    /// Human-readable output.
    pub text: String,
    /// Machine-readable output.
    pub body: serde_json::Value,
}

impl CommandOutput {
    /// Creates a successful output.
    pub fn success(text: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            success: true,
            text: text.into(),
            body,
        }
    }

    /// Creates an output for rejected input.
    pub fn rejected(text: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            success: false,
            text: text.into(),
            body,
        }
    }

    /// Renders the output as text or pretty JSON.
    pub fn render(&self, json: bool) -> String {
        if json {
            serde_json::to_string_pretty(&self.body).unwrap_or_else(|_| self.body.to_string())
        } else {
            self.text.clone()
        }
    }
}

/// A command that can be registered and invoked through the CLI.
///
/// Implementations define a name, help text, optional arguments, and an
/// async handler. All commands must be `Send + Sync`.
#[async_trait]
pub trait ManagementCommand: Send + Sync {
    /// Returns the name of this command (used to invoke it from the CLI).
    fn name(&self) -> &'static str;

    /// Returns a short help description for this command.
    fn help(&self) -> &'static str;

    /// Adds custom arguments to the clap command.
    ///
    /// The default implementation returns the command unchanged.
    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd
    }

    /// Executes the command with the given argument matches and context.
    async fn handle(
        &self,
        matches: &clap::ArgMatches,
        ctx: &CommandContext,
    ) -> FormgateResult<CommandOutput>;
}

/// A registry of commands, keyed by name.
pub struct CommandRegistry {
    commands: HashMap<&'static str, Box<dyn ManagementCommand>>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    /// Creates a new empty command registry.
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Registers a command.
    ///
    /// If a command with the same name already exists, it is replaced.
    pub fn register(&mut self, command: Box<dyn ManagementCommand>) {
        self.commands.insert(command.name(), command);
    }

    /// Returns a reference to the command with the given name, if registered.
    pub fn get(&self, name: &str) -> Option<&dyn ManagementCommand> {
        self.commands.get(name).map(AsRef::as_ref)
    }

    /// Returns a sorted list of all registered command names.
    pub fn list_commands(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.commands.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Builds the top-level clap `Command` with all registered subcommands
    /// and the global `--settings` and `--json` options.
    pub fn build_cli(&self) -> clap::Command {
        let mut app = clap::Command::new("formgate")
            .about("Validate sign-in and sign-up forms from the terminal")
            .subcommand_required(true)
            .arg(
                clap::Arg::new("settings")
                    .long("settings")
                    .global(true)
                    .value_parser(clap::value_parser!(PathBuf))
                    .help("Settings file (TOML, or JSON by .json extension)"),
            )
            .arg(
                clap::Arg::new("json")
                    .long("json")
                    .global(true)
                    .action(clap::ArgAction::SetTrue)
                    .help("Print machine-readable JSON"),
            );

        for name in self.list_commands() {
            if let Some(cmd) = self.get(name) {
                let subcmd = clap::Command::new(name).about(cmd.help());
                app = app.subcommand(cmd.add_arguments(subcmd));
            }
        }

        app
    }

    /// Executes the command identified by the given argument matches.
    pub async fn execute(
        &self,
        matches: &clap::ArgMatches,
        ctx: &CommandContext,
    ) -> FormgateResult<CommandOutput> {
        let (name, sub_matches) = matches.subcommand().ok_or_else(|| {
            FormgateError::ConfigurationError("No subcommand specified".to_string())
        })?;

        let cmd = self.get(name).ok_or_else(|| {
            FormgateError::ConfigurationError(format!("Unknown command: {name}"))
        })?;

        tracing::debug!(command = name, "executing command");
        cmd.handle(sub_matches, ctx).await
    }
}

/// Loads settings as selected by the global `--settings` option.
///
/// Without the option, settings come from defaults plus environment
/// overrides.
pub fn load_settings(matches: &clap::ArgMatches) -> FormgateResult<Settings> {
    match matches.get_one::<PathBuf>("settings") {
        Some(path) => settings_loader::from_file_with_env(path),
        None => Ok(settings_loader::from_env()),
    }
}
