//! Core error types for formgate.
//!
//! [`FormgateError`] covers everything that is *not* a user-input validation
//! failure. Bad user input is reported as an `Invalid` outcome by the forms
//! crate and never travels through this type.
//!
//! The variants fall into three groups:
//!
//! - **Contract violations**: the caller drove the submission lifecycle out of
//!   order. These indicate a wiring bug between the UI layer and the engine.
//! - **Submit boundary**: the asynchronous submit capability rejected a
//!   submission.
//! - **Configuration**: settings could not be loaded.

use thiserror::Error;

/// The primary error type for formgate.
#[derive(Error, Debug)]
pub enum FormgateError {
    // ── Contract violations ──────────────────────────────────────────

    /// `begin_submission` was called while a submission was in flight.
    #[error("A submission is already in progress")]
    AlreadySubmitting,

    /// A lifecycle operation was invoked from a state that does not allow it.
    #[error("Invalid state transition: cannot {action} from {from}")]
    InvalidStateTransition {
        /// The state the engine was in.
        from: String,
        /// The lifecycle operation that was attempted.
        action: String,
    },

    // ── Submit boundary ──────────────────────────────────────────────

    /// The submit backend refused the submission.
    #[error("Submission rejected: {0}")]
    SubmitRejected(String),

    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl FormgateError {
    /// Creates an [`InvalidStateTransition`](Self::InvalidStateTransition) error.
    pub fn invalid_transition(from: impl ToString, action: impl Into<String>) -> Self {
        Self::InvalidStateTransition {
            from: from.to_string(),
            action: action.into(),
        }
    }

    /// Returns `true` for lifecycle misuse by the caller.
    ///
    /// The UI layer uses this to tell "this is a bug" apart from recoverable
    /// failures such as a rejected submission.
    pub const fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::AlreadySubmitting | Self::InvalidStateTransition { .. }
        )
    }
}

/// A convenience type alias for `Result<T, FormgateError>`.
pub type FormgateResult<T> = Result<T, FormgateError>;
