//! Built-in commands.
//!
//! Each command implements the
//! [`ManagementCommand`](crate::command::ManagementCommand) trait.

pub mod check_email;
pub mod check_password;
pub mod signin;
pub mod signup;

pub use check_email::CheckEmailCommand;
pub use check_password::CheckPasswordCommand;
pub use signin::SigninCommand;
pub use signup::SignupCommand;

use crate::command::CommandRegistry;

/// Registers all built-in commands into the given registry.
pub fn register_builtin_commands(registry: &mut CommandRegistry) {
    registry.register(Box::new(CheckEmailCommand));
    registry.register(Box::new(CheckPasswordCommand));
    registry.register(Box::new(SigninCommand));
    registry.register(Box::new(SignupCommand));
}

/// Reads a string argument, defaulting to empty.
pub(crate) fn string_arg(matches: &clap::ArgMatches, id: &str) -> String {
    matches.get_one::<String>(id).cloned().unwrap_or_default()
}
