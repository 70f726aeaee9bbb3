//! Error types for input planning and collection.

use thiserror::Error;

use param_schema_core::SpecError;

/// Errors that can occur while planning controls or collecting input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WidgetError {
    /// Structural specification error surfaced at render time.
    #[error("specification error: {0}")]
    Spec(#[from] SpecError),

    /// A state entry does not match the kind of control planned for it.
    #[error("control '{control}' expected {expected} input, got {found}")]
    InputKindMismatch {
        /// Control name the state entry was bound to.
        control: String,
        /// Input kind the planned control consumes.
        expected: &'static str,
        /// Input kind actually found in the state.
        found: &'static str,
    },

    /// A select or multi-select received a label outside its options.
    #[error("selection for '{param}' is not an option: {value}")]
    InvalidSelection {
        /// Owning parameter name.
        param: String,
        /// The rejected label.
        value: String,
    },

    /// A fixed tuple has some positions filled and others empty.
    #[error("tuple parameter '{param}' is partially filled")]
    IncompleteTuple {
        /// Owning parameter name.
        param: String,
    },
}

/// Convenience alias for results with [`WidgetError`].
pub type Result<T> = std::result::Result<T, WidgetError>;
