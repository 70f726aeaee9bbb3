//! Control descriptions produced by input planning.
//!
//! A [`Control`] captures the mapping decision for one parameter (or one
//! tuple position): which kind of interactive widget to present, seeded
//! with which initial state. The types are plain data so a rendering
//! layer can consume them as JSON.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Display formatting for float inputs.
///
/// Inferred from the declared default: up to two decimal places renders
/// fixed-point, more switches to scientific notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberFormat {
    /// Fixed-point with the given precision, e.g. `%.2f`.
    Fixed(u8),
    /// Scientific notation, e.g. `%e`, for defaults with many decimals.
    Scientific(u8),
}

impl NumberFormat {
    /// The printf-style format string a rendering layer would apply.
    pub fn format_string(&self) -> String {
        match self {
            NumberFormat::Fixed(precision) => format!("%.{precision}f"),
            NumberFormat::Scientific(_) => "%e".to_string(),
        }
    }
}

/// One interactive control, with its initial state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    /// On/off switch. Booleans and boolean choices land here.
    Toggle {
        /// Checked state on first render.
        initial: bool,
    },
    /// Single-line text input.
    Text {
        /// Text shown on first render.
        initial: String,
    },
    /// Calendar picker, chosen when a string default is an ISO date.
    DatePicker {
        /// Date shown on first render.
        initial: NaiveDate,
    },
    /// Whole-number input.
    IntInput {
        /// Value shown on first render; `None` renders blank.
        initial: Option<i64>,
        /// Increment step (always 1).
        step: i64,
    },
    /// Floating-point input.
    FloatInput {
        /// Value shown on first render; `None` renders blank.
        initial: Option<f64>,
        /// Increment step, derived from the default's precision.
        step: f64,
        /// Display formatting.
        format: NumberFormat,
    },
    /// Single-choice dropdown.
    Select {
        /// Option labels in declaration order.
        options: Vec<String>,
        /// Pre-selected label; `None` renders with no selection.
        initial: Option<String>,
    },
    /// Multi-choice picker.
    MultiSelect {
        /// Option labels in declaration order.
        options: Vec<String>,
        /// Pre-selected labels.
        initial: Vec<String>,
    },
    /// Multi-line text area, one collection item per line.
    TextArea {
        /// Text shown on first render.
        initial: String,
    },
    /// Single-line input holding `", "`-delimited items.
    DelimitedText {
        /// Text shown on first render.
        initial: String,
    },
}

impl Control {
    /// Short name of the control kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Control::Toggle { .. } => "toggle",
            Control::Text { .. } => "text",
            Control::DatePicker { .. } => "date-picker",
            Control::IntInput { .. } => "int-input",
            Control::FloatInput { .. } => "float-input",
            Control::Select { .. } => "select",
            Control::MultiSelect { .. } => "multi-select",
            Control::TextArea { .. } => "text-area",
            Control::DelimitedText { .. } => "delimited-text",
        }
    }
}

/// A control bound to its state key.
///
/// Most parameters plan exactly one control named after the parameter;
/// fixed tuples plan one control per position named `{param}.{index}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedControl {
    /// State key this control reads from and writes to.
    pub name: String,
    /// The planned control.
    pub control: Control,
}
