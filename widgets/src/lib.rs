//! Interactive input planning for parameter specifications.
//!
//! This crate decides which input control each extracted parameter should
//! be presented with, and turns a bag of raw widget state back into typed
//! values. The mapping follows the parameter's type descriptor: booleans
//! become toggles, string literals become selects, scalar collections
//! become line-oriented text areas, and fixed tuples expand into one
//! sub-control per position.
//!
//! # Quick start
//!
//! ```
//! use param_schema_core::{extract, ParamDecl, Specification, SpecSource, Value};
//! use param_schema_widgets::{render, Control, InputState, RawInput};
//!
//! let spec = Specification::new("MyTap")
//!     .with_param(ParamDecl::new("name", "str"))
//!     .with_param(
//!         ParamDecl::new("choice", "Literal[\"Option1\", \"Option2\"]")
//!             .with_default("Option1"),
//!     );
//! let params = extract(&SpecSource::Declaration(spec)).unwrap();
//!
//! // First render: no state yet, controls seeded from defaults.
//! let first = render(&params, &InputState::new(), false).unwrap();
//! assert!(matches!(first.find_control("name"), Some(Control::Text { .. })));
//! assert_eq!(first.values["choice"], Value::Str("Option1".into()));
//! assert_eq!(first.missing, vec!["name".to_string()]);
//!
//! // Re-render with the user's input applied.
//! let mut state = InputState::new();
//! state.insert("name".into(), RawInput::Text("David".into()));
//! let second = render(&params, &state, false).unwrap();
//! assert!(second.is_complete());
//! ```

mod control;
mod error;
mod render;
mod state;

pub use control::{Control, NumberFormat, PlannedControl};
pub use error::{Result, WidgetError};
pub use render::{RenderedInputs, render};
pub use state::{InputState, RawInput};
