//! Server-side form field planning for parameter specifications.
//!
//! The form builder covers the flat subset of parameter types an HTML
//! form can express: scalars, string literal sets, and optional wrappers
//! of those. Collections and tuples belong to the interactive builder and
//! are rejected here with an explicit error.
//!
//! # Quick start
//!
//! ```
//! use param_schema_core::{extract, ParamDecl, Specification, SpecSource};
//! use param_schema_form::{render_form, FieldKind};
//!
//! let spec = Specification::new("MyTap")
//!     .with_param(ParamDecl::new("name", "str"))
//!     .with_param(
//!         ParamDecl::new("choice", "Literal[\"Option1\", \"Option2\"]")
//!             .with_default("Option1"),
//!     );
//! let params = extract(&SpecSource::Declaration(spec)).unwrap();
//!
//! let plan = render_form("MyTap", &params).unwrap();
//! assert!(matches!(
//!     plan.find_field("choice").unwrap().kind,
//!     FieldKind::Select { .. }
//! ));
//! ```

mod error;
mod plan;

pub use error::{FormError, Result};
pub use plan::{FieldKind, FormField, FormPlan, SubmitAction, SubmitKind, render_form};
