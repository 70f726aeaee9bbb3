//! Validation models derived from parameter specifications.
//!
//! This crate turns the extracted [`ParameterSpec`] sequence from
//! [`param_schema_core`] into a server-side validation artifact:
//!
//! - [`build_model`] — derives a [`ValidationModel`] (named
//!   `{spec}Model`) with one [`ModelField`] per parameter and an explicit
//!   [`FieldDefault`] marker.
//! - [`ValidationModel::validate_payload`] — error-collecting validation
//!   of key→value payloads; missing required fields are reported as data,
//!   not raised.
//! - [`ValidationModel::instantiate`] — binds a payload into a
//!   [`ModelInstance`] with defaults filled uniformly, whatever the entry
//!   path.
//! - [`ValidationModel::json_schema`] — a JSON Schema rendering of the
//!   model.
//!
//! # Example
//!
//! ```
//! use param_schema_core::{extract, ParamDecl, Specification, SpecSource, Value};
//! use param_schema_model::{build_model, Payload};
//!
//! let spec = Specification::new("MyTap")
//!     .with_param(ParamDecl::new("name", "str"))
//!     .with_param(ParamDecl::new("age", "int"))
//!     .with_param(
//!         ParamDecl::new("choice", "Literal[\"Option1\", \"Option2\", \"Option3\"]")
//!             .with_default("Option1"),
//!     );
//! let params = extract(&SpecSource::Declaration(spec)).unwrap();
//! let model = build_model("MyTap", &params);
//!
//! let mut payload = Payload::new();
//! payload.insert("name".into(), Value::Str("David".into()));
//! payload.insert("age".into(), Value::Int(87));
//!
//! let instance = model.instantiate(&payload).unwrap();
//! assert_eq!(instance.get("choice"), Some(&Value::Str("Option1".into())));
//! ```
//!
//! [`ParameterSpec`]: param_schema_core::ParameterSpec

mod error;
mod model;
mod schema;

pub use error::{ModelError, PayloadError, Result};
pub use model::{
    BoundField, FieldDefault, ModelField, ModelInstance, Payload, ValidationModel, build_model,
};
