//! # formgate-forms
//!
//! The form validation engine behind the sign-in and sign-up forms.
//!
//! - [`rules`] - pure field rules (email, password policy, confirmation, required)
//! - [`strength`] - the 0–5 password strength score and its display table
//! - [`fields`] - form and field definitions, and the [`FormData`] input bag
//! - [`validation`] - whole-form validation producing a [`FormReport`]
//! - [`engine`] - [`FormValidationEngine`], one per form, with the submission lifecycle
//! - [`submit`] - the async submit boundary and [`submit_form`]
//!
//! The engine only returns data. Rendering field errors, spinners and banners
//! is the caller's concern.
//!
//! ## Quick Start
//!
//! ```rust
//! use formgate_forms::{FormData, FormKind, FormValidationEngine, SubmissionState};
//!
//! let mut engine = FormValidationEngine::new(FormKind::SignIn);
//! let report = engine.validate_form(&FormData::sign_in("ada@example.com", "secret", false));
//! assert!(report.is_valid());
//! assert_eq!(engine.begin_submission().unwrap(), SubmissionState::Submitting);
//! ```

pub mod engine;
pub mod fields;
pub mod outcome;
pub mod rules;
pub mod strength;
pub mod submit;
pub mod validation;

pub use engine::{FormValidationEngine, SubmissionResult, SubmissionState};
pub use fields::{FieldKind, FieldSpec, FormData, FormKind};
pub use outcome::{FieldValue, ValidationOutcome};
pub use rules::{
    validate_checked, validate_confirm_password, validate_email, validate_password,
    validate_required, PasswordCheck,
};
pub use strength::PasswordStrengthScore;
pub use submit::{
    submit_form, FollowUp, FormSubmission, SimulatedBackend, SubmitAttempt, SubmitBackend,
};
pub use validation::{validate_form, FieldOutcome, FormReport};
