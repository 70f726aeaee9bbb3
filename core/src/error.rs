//! Error types for classification, extraction, and coercion.
//!
//! Provides a unified error type covering structural failures: annotation
//! grammar violations, malformed specification documents, and values that
//! cannot be conformed to a descriptor.

use thiserror::Error;

/// Errors that can occur while classifying annotations, extracting
/// parameter specifications, or coercing values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpecError {
    /// Annotation text does not match the supported grammar.
    #[error("unrecognized type annotation '{annotation}': {detail}")]
    UnrecognizedType {
        /// The full annotation as given.
        annotation: String,
        /// What the classifier stumbled on.
        detail: String,
    },

    /// Annotation nests deeper than the classifier's recursion limit.
    #[error("type annotation '{annotation}' nests deeper than {limit} levels")]
    NestingTooDeep {
        /// The full annotation as given.
        annotation: String,
        /// The recursion limit that was exceeded.
        limit: usize,
    },

    /// Choice literals mix strings and booleans.
    #[error("choice in '{annotation}' mixes string and boolean literals")]
    MixedChoiceKind {
        /// The full annotation as given.
        annotation: String,
    },

    /// Choice declares no options at all.
    #[error("choice in '{annotation}' declares no options")]
    EmptyChoice {
        /// The full annotation as given.
        annotation: String,
    },

    /// Specification document carries an unknown `kind` value.
    #[error("unrecognized specification kind: {0}")]
    UnrecognizedSpecKind(String),

    /// Two parameters in one specification share a name.
    #[error("duplicate parameter in specification: {0}")]
    DuplicateParameter(String),

    /// A choice parameter's default is not one of its declared options.
    #[error("default for choice parameter '{param}' is not a declared option: {value}")]
    ChoiceDefaultMismatch {
        /// Parameter name.
        param: String,
        /// Display form of the offending default.
        value: String,
    },

    /// Text could not be parsed as the expected kind.
    #[error("cannot parse '{text}' as {expected}")]
    InvalidScalar {
        /// What the coercion expected, e.g. `int`.
        expected: String,
        /// The text that failed to parse.
        text: String,
    },

    /// A supplied value is not one of a choice's declared options.
    #[error("'{value}' is not one of [{options}]")]
    InvalidChoiceValue {
        /// Display form of the rejected value.
        value: String,
        /// The declared options, comma-joined.
        options: String,
    },

    /// A native value has the wrong shape for its descriptor.
    #[error("expected {expected}, found {found}")]
    ValueMismatch {
        /// Annotation form of the expected descriptor.
        expected: String,
        /// Shape name of the value actually given.
        found: String,
    },
}

/// Convenience alias for results with [`SpecError`].
pub type Result<T> = std::result::Result<T, SpecError>;
