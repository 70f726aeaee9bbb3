//! Error types for payload validation.
//!
//! Validation problems are data: `validate_payload` returns the full
//! [`PayloadError`] list and lets the caller decide whether to block or
//! warn. [`ModelError`] only appears when a caller asks for a bound
//! instance and the payload was rejected.

use thiserror::Error;

/// One problem found while validating a payload against a model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PayloadError {
    /// A required field is absent (or submitted empty for a collection).
    #[error("missing required field: {param}")]
    MissingRequired {
        /// Field name.
        param: String,
    },

    /// A native value has the wrong shape for its field.
    #[error("field '{param}' expects {expected}, got {found}")]
    TypeMismatch {
        /// Field name.
        param: String,
        /// Annotation form of the expected type.
        expected: String,
        /// Shape of the supplied value.
        found: String,
    },

    /// A choice field received a value outside its declared options.
    #[error("field '{param}' got '{value}', not one of [{options}]")]
    InvalidChoice {
        /// Field name.
        param: String,
        /// Display form of the rejected value.
        value: String,
        /// The declared options, comma-joined.
        options: String,
    },

    /// Wire text for a field could not be parsed.
    #[error("field '{param}': {detail}")]
    InvalidWire {
        /// Field name.
        param: String,
        /// Parse failure description.
        detail: String,
    },
}

/// Errors from model instantiation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// The payload failed validation; all problems are attached.
    #[error("payload rejected with {} validation error(s)", .0.len())]
    Rejected(Vec<PayloadError>),
}

/// Convenience alias for results with [`ModelError`].
pub type Result<T> = std::result::Result<T, ModelError>;
