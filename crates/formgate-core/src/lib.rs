//! # formgate-core
//!
//! Core types, settings, and error types for formgate.
//! This crate has no formgate dependencies and provides the foundation for the other crates.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`settings`] - Password policy and submission settings
//! - [`settings_loader`] - Loading settings from TOML, JSON, and the environment
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;

// Re-export the most commonly used types at the crate root.
pub use error::{FormgateError, FormgateResult};
pub use settings::{PasswordPolicy, Settings, SubmissionSettings};
