//! Native widget outputs fed back into value collection.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The typed output of one platform widget.
///
/// Numeric and date variants carry `Option` because those widgets can sit
/// empty; text widgets report emptiness as the empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawInput {
    /// Output of text and text-area controls.
    Text(String),
    /// Output of toggle controls.
    Toggle(bool),
    /// Output of integer inputs; `None` when left blank.
    Int(Option<i64>),
    /// Output of float inputs; `None` when left blank.
    Float(Option<f64>),
    /// Output of date pickers; `None` when cleared.
    Date(Option<NaiveDate>),
    /// Selected label of a single-select.
    Select(String),
    /// Selected labels of a multi-select.
    MultiSelect(Vec<String>),
}

impl RawInput {
    /// Short name of the input kind, for mismatch errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            RawInput::Text(_) => "text",
            RawInput::Toggle(_) => "toggle",
            RawInput::Int(_) => "integer",
            RawInput::Float(_) => "float",
            RawInput::Date(_) => "date",
            RawInput::Select(_) => "selection",
            RawInput::MultiSelect(_) => "multi-selection",
        }
    }
}

/// Prior widget state keyed by control name.
///
/// An absent entry means the control has not been touched yet; collection
/// falls back to the declared default, so rendering against an empty
/// state yields the defaults.
pub type InputState = BTreeMap<String, RawInput>;
