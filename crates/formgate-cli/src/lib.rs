//! # formgate-cli
//!
//! The `formgate` command-line front end.
//!
//! - **Command framework** - [`ManagementCommand`] and [`CommandRegistry`]
//! - **Built-in commands** - `check-email`, `check-password`, `signin`, `signup`
//! - **Submission plumbing** - running a form through the engine and the
//!   simulated backend, then rendering the attempt
//!
//! ## Quick Start
//!
//! ```rust
//! use formgate_cli::command::CommandRegistry;
//! use formgate_cli::commands::register_builtin_commands;
//!
//! let mut registry = CommandRegistry::new();
//! register_builtin_commands(&mut registry);
//!
//! let names = registry.list_commands();
//! assert!(names.contains(&"signin"));
//! assert!(names.contains(&"check-password"));
//! ```

// These clippy lints are intentionally allowed:
// - doc_markdown: backtick requirements for documentation items are too strict
// - module_name_repetitions: re-exports make module-prefixed names redundant
// - unused_async: command handlers maintain consistent async signatures
#![allow(clippy::doc_markdown)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::unused_async)]

pub mod command;
pub mod commands;
pub mod submission;

pub use command::{CommandContext, CommandOutput, CommandRegistry, ManagementCommand};
pub use commands::register_builtin_commands;
pub use submission::{render_attempt, run_submission};
