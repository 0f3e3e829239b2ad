//! # formgate
//!
//! Validation and submission for sign-in and sign-up forms.
//!
//! This is the meta-crate that re-exports the sub-crates for convenient
//! access. Depend on `formgate` to get everything, or on individual crates
//! for finer-grained control.
//!
//! ```rust
//! use formgate::prelude::*;
//!
//! let mut engine = FormValidationEngine::new(FormKind::SignUp);
//! let data = FormData::sign_up("Ada", "ada@example.com", "Abcdefg1!", "Abcdefg1!", true);
//! assert!(engine.validate_form(&data).is_valid());
//! ```

/// Error types, settings, settings loading and logging setup.
pub use formgate_core as core;

/// Field rules, password strength, the engine and the submit boundary.
pub use formgate_forms as forms;

/// The `formgate` command framework and built-in commands.
#[cfg(feature = "cli")]
pub use formgate_cli as cli;

/// Commonly used types.
pub mod prelude {
    pub use formgate_core::{FormgateError, FormgateResult, PasswordPolicy, Settings};
    pub use formgate_forms::{
        submit_form, FormData, FormKind, FormReport, FormValidationEngine,
        PasswordStrengthScore, SimulatedBackend, SubmissionResult, SubmissionState,
        SubmitBackend, ValidationOutcome,
    };
}

// Re-export third-party crates users need to implement `SubmitBackend`.
pub use async_trait;
pub use serde;
pub use serde_json;
pub use tokio;
pub use tracing;
