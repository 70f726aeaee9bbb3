use thiserror::Error;

/// Errors raised while planning form fields.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    /// The parameter's type has no form field equivalent. Collections and
    /// tuples fall outside the form subset and are refused outright rather
    /// than dropped from the plan.
    #[error("parameter '{param}' of type '{annotation}' is not supported in form rendering")]
    UnsupportedField { param: String, annotation: String },
}

/// Convenience alias for form planning results.
pub type Result<T> = std::result::Result<T, FormError>;
