//! Core parameter specification types, classification, and coercion.
//!
//! This crate defines the shared contract from which validation models,
//! interactive input plans, and form plans are all derived:
//!
//! - [`Value`] — dynamically typed parameter values with natural JSON/YAML
//!   wire shapes.
//! - [`TypeDescriptor`] — the classified shape of a parameter type, built
//!   by [`classify`] from textual annotations like `Option<Vec<int>>`.
//! - [`ParamDecl`] / [`Specification`] / [`BoundSpecification`] /
//!   [`FunctionSpec`] — inbound parameter descriptions, wrapped in a
//!   [`SpecSource`].
//! - [`ParameterSpec`] — one extracted parameter (name, descriptor,
//!   resolved default, required flag) as produced by [`extract`].
//!
//! Coercion ([`conform_value`], [`encode_items`], [`decode_items`])
//! converts between native values and the flat wire forms used by
//! payloads and string-backed controls.
//!
//! # Example
//!
//! ```
//! use param_schema_core::*;
//!
//! // Declare a parameter set
//! let spec = Specification::new("MyTap")
//!     .with_param(ParamDecl::new("name", "str"))
//!     .with_param(ParamDecl::new("age", "int"))
//!     .with_param(ParamDecl::new("optional_field", "Option<str>").with_default(Value::Null))
//!     .with_param(
//!         ParamDecl::new("choice", "Literal[\"Option1\", \"Option2\", \"Option3\"]")
//!             .with_default("Option1"),
//!     )
//!     .with_param(ParamDecl::new("agree", "bool").with_default(false));
//!
//! // Extract the shared parameter contract
//! let params = extract(&SpecSource::Declaration(spec)).unwrap();
//! assert_eq!(params.len(), 5);
//! assert!(find_param(&params, "name").unwrap().required);
//! assert!(!find_param(&params, "agree").unwrap().required);
//!
//! // Coerce between native and wire forms
//! let ages = classify("Vec<int>").unwrap();
//! let native = conform_value(&ages, &Value::Str("1, 2, 3".into())).unwrap();
//! assert_eq!(native, Value::list([Value::Int(1), Value::Int(2), Value::Int(3)]));
//! ```

mod classify;
mod coerce;
mod descriptor;
mod error;
mod spec;
mod value;

pub use classify::{MAX_NESTING_DEPTH, classify};
pub use coerce::{
    LINE_DELIMITER, WIRE_DELIMITER, conform_value, decode_items, decode_lines, dedup_first_seen,
    encode_items, encode_lines, format_scalar, is_empty_value, parse_element, parse_scalar,
};
pub use descriptor::{ChoiceSet, ContainerKind, ScalarKind, TypeDescriptor};
pub use error::{Result, SpecError};
pub use spec::{
    BoundSpecification, FunctionSpec, ParamDecl, ParameterSpec, SpecDocument, SpecSource,
    Specification, extract, find_param,
};
pub use value::Value;
