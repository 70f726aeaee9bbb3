//! Input planning and value collection.
//!
//! [`render`] walks an extracted parameter sequence and, for each
//! parameter, decides which control to present and what value the prior
//! widget state produces. Each call is a pure function of the parameters
//! and the given state; nothing is retained between calls.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use param_schema_core::{
    ChoiceSet, ContainerKind, ParameterSpec, ScalarKind, SpecError, TypeDescriptor, Value,
    decode_items, decode_lines, dedup_first_seen, encode_items, encode_lines, format_scalar,
    is_empty_value,
};

use crate::control::{Control, NumberFormat, PlannedControl};
use crate::error::{Result, WidgetError};
use crate::state::{InputState, RawInput};

/// Calendar format accepted by the date-picker promotion.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// The outcome of one render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedInputs {
    /// Planned controls in declaration order (tuples contribute one per
    /// position).
    pub controls: Vec<PlannedControl>,
    /// Produced value per parameter.
    pub values: BTreeMap<String, Value>,
    /// Required parameters whose produced value is still empty, in
    /// declaration order.
    pub missing: Vec<String>,
}

impl RenderedInputs {
    /// Whether every required parameter has a value.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Finds a planned control by state key.
    pub fn find_control(&self, name: &str) -> Option<&Control> {
        self.controls
            .iter()
            .find(|planned| planned.name == name)
            .map(|planned| &planned.control)
    }
}

/// Plans controls and collects values for a parameter sequence.
///
/// Absent state entries fall back to declared defaults, so rendering
/// against an empty state yields the defaults as values. When
/// `required_warning` is set, each still-missing required parameter is
/// surfaced through `tracing::warn!`.
///
/// # Errors
///
/// Fails on structural problems only: state entries of the wrong input
/// kind, selections outside a choice's options, partially filled tuples,
/// and specification-level inconsistencies such as a choice default
/// outside its own options. Missing required values are data in
/// [`RenderedInputs::missing`], never an error.
///
/// # Examples
///
/// ```
/// use param_schema_core::{extract, ParamDecl, Specification, SpecSource, Value};
/// use param_schema_widgets::{render, InputState, RawInput};
///
/// let spec = Specification::new("MyTap")
///     .with_param(ParamDecl::new("name", "str"))
///     .with_param(ParamDecl::new("agree", "bool").with_default(false));
/// let params = extract(&SpecSource::Declaration(spec)).unwrap();
///
/// let first = render(&params, &InputState::new(), false).unwrap();
/// assert_eq!(first.missing, vec!["name".to_string()]);
///
/// let mut state = InputState::new();
/// state.insert("name".into(), RawInput::Text("David".into()));
/// let second = render(&params, &state, false).unwrap();
/// assert!(second.is_complete());
/// assert_eq!(second.values["name"], Value::Str("David".into()));
/// ```
pub fn render(
    specs: &[ParameterSpec],
    state: &InputState,
    required_warning: bool,
) -> Result<RenderedInputs> {
    let mut controls = Vec::with_capacity(specs.len());
    let mut values = BTreeMap::new();
    let mut missing = Vec::new();

    for spec in specs {
        let (mut planned, value) = render_param(spec, state)?;
        controls.append(&mut planned);
        if spec.required && is_empty_value(&value) {
            missing.push(spec.name.clone());
        }
        values.insert(spec.name.clone(), value);
    }

    if required_warning {
        for name in &missing {
            warn!(param = %name, "required parameter not supplied");
        }
    }
    debug!(
        controls = controls.len(),
        missing = missing.len(),
        "rendered interactive inputs"
    );

    Ok(RenderedInputs {
        controls,
        values,
        missing,
    })
}

fn render_param(spec: &ParameterSpec, state: &InputState) -> Result<(Vec<PlannedControl>, Value)> {
    let optional = spec.descriptor.is_optional();
    let shape = spec.descriptor.unwrap_optional();
    // A Null default seeds controls the same way as no default at all;
    // the distinction only matters for the required flag.
    let default = spec.default.as_ref().filter(|value| !value.is_null());

    let (planned, value) = match shape {
        TypeDescriptor::Scalar(_) | TypeDescriptor::Choice(_) => {
            let (control, value, _) = element_control(&spec.name, &spec.name, shape, default, state)?;
            (
                vec![PlannedControl {
                    name: spec.name.clone(),
                    control,
                }],
                value,
            )
        }
        TypeDescriptor::Collection { container, inner } => match inner.as_ref() {
            TypeDescriptor::Choice(set) => {
                multi_select_param(spec, *container, set, default, state)?
            }
            _ => text_area_param(spec, *container, inner, default, state)?,
        },
        TypeDescriptor::FixedTuple(elements) => fixed_tuple_param(spec, elements, default, state)?,
        TypeDescriptor::VariableTuple(inner) => delimited_param(spec, inner, default, state)?,
        TypeDescriptor::Optional(_) => {
            return Err(WidgetError::Spec(SpecError::UnrecognizedType {
                annotation: spec.descriptor.to_string(),
                detail: "'Option' cannot nest inside 'Option'".to_string(),
            }));
        }
    };

    let value = if optional { normalize_optional(value) } else { value };
    Ok((planned, value))
}

/// Maps an optional parameter's empty sentinel to `Null`: empty strings
/// for string-backed controls, empty containers for native ones.
fn normalize_optional(value: Value) -> Value {
    match &value {
        Value::Str(s) if s.is_empty() => Value::Null,
        Value::List(items) | Value::Set(items) | Value::Tuple(items) if items.is_empty() => {
            Value::Null
        }
        _ => value,
    }
}

/// Plans one scalar or choice control and collects its value.
///
/// Returns the control, the produced value, and whether this control can
/// sit empty at all (toggles and pre-seeded selects cannot), which fixed
/// tuples use to tell "untouched" from "partially filled".
fn element_control(
    control_name: &str,
    param: &str,
    element: &TypeDescriptor,
    default: Option<&Value>,
    state: &InputState,
) -> Result<(Control, Value, bool)> {
    match element {
        TypeDescriptor::Scalar(ScalarKind::Bool) => {
            let initial = default.and_then(Value::as_bool).unwrap_or(false);
            let value = match state.get(control_name) {
                Some(RawInput::Toggle(checked)) => Value::Bool(*checked),
                Some(other) => return Err(kind_mismatch(control_name, "toggle", other)),
                None => Value::Bool(initial),
            };
            Ok((Control::Toggle { initial }, value, false))
        }
        TypeDescriptor::Scalar(ScalarKind::Str) => match default.and_then(Value::as_str) {
            Some(text) => match NaiveDate::parse_from_str(text, DATE_FORMAT) {
                Ok(date) => date_picker_control(control_name, date, state),
                Err(_) => text_control(control_name, text, state),
            },
            None => text_control(control_name, "", state),
        },
        TypeDescriptor::Scalar(ScalarKind::Int) => {
            let initial = default.and_then(Value::as_i64);
            let value = match state.get(control_name) {
                Some(RawInput::Int(Some(number))) => Value::Int(*number),
                Some(RawInput::Int(None)) => Value::Null,
                Some(other) => return Err(kind_mismatch(control_name, "integer", other)),
                None => initial.map(Value::Int).unwrap_or(Value::Null),
            };
            Ok((Control::IntInput { initial, step: 1 }, value, true))
        }
        TypeDescriptor::Scalar(ScalarKind::Float) => {
            let initial = default.and_then(Value::as_f64);
            let (step, format) = float_presentation(initial);
            let value = match state.get(control_name) {
                Some(RawInput::Float(Some(number))) => Value::Float(*number),
                Some(RawInput::Float(None)) => Value::Null,
                Some(other) => return Err(kind_mismatch(control_name, "float", other)),
                None => initial.map(Value::Float).unwrap_or(Value::Null),
            };
            Ok((
                Control::FloatInput {
                    initial,
                    step,
                    format,
                },
                value,
                true,
            ))
        }
        TypeDescriptor::Choice(set) if set.kind() == ScalarKind::Bool => {
            let initial = match default {
                Some(value) => {
                    check_choice_initial(param, set, value)?;
                    value.as_bool().unwrap_or(false)
                }
                // An unchecked toggle is the natural rest state when the
                // options allow it; otherwise the sole remaining option.
                None => !set.contains(&Value::Bool(false)),
            };
            let value = match state.get(control_name) {
                Some(RawInput::Toggle(checked)) => {
                    let candidate = Value::Bool(*checked);
                    if !set.contains(&candidate) {
                        return Err(WidgetError::InvalidSelection {
                            param: param.to_string(),
                            value: checked.to_string(),
                        });
                    }
                    candidate
                }
                Some(other) => return Err(kind_mismatch(control_name, "toggle", other)),
                None => Value::Bool(initial),
            };
            Ok((Control::Toggle { initial }, value, false))
        }
        TypeDescriptor::Choice(set) => {
            let options = set.labels();
            let initial = match default {
                Some(value) => {
                    check_choice_initial(param, set, value)?;
                    value.as_str().map(str::to_string)
                }
                None => None,
            };
            let value = match state.get(control_name) {
                Some(RawInput::Select(label)) => {
                    set.value_for_label(label)
                        .ok_or_else(|| WidgetError::InvalidSelection {
                            param: param.to_string(),
                            value: label.clone(),
                        })?
                }
                Some(other) => return Err(kind_mismatch(control_name, "selection", other)),
                None => match &initial {
                    Some(label) => Value::Str(label.clone()),
                    None => Value::Null,
                },
            };
            let emptiable = initial.is_none();
            Ok((Control::Select { options, initial }, value, emptiable))
        }
        other => Err(WidgetError::Spec(SpecError::UnrecognizedType {
            annotation: other.to_string(),
            detail: "not a scalar or literal element type".to_string(),
        })),
    }
}

fn text_control(
    control_name: &str,
    initial: &str,
    state: &InputState,
) -> Result<(Control, Value, bool)> {
    let value = match state.get(control_name) {
        Some(RawInput::Text(text)) => Value::Str(text.clone()),
        Some(other) => return Err(kind_mismatch(control_name, "text", other)),
        None => Value::Str(initial.to_string()),
    };
    Ok((
        Control::Text {
            initial: initial.to_string(),
        },
        value,
        true,
    ))
}

fn date_picker_control(
    control_name: &str,
    initial: NaiveDate,
    state: &InputState,
) -> Result<(Control, Value, bool)> {
    let value = match state.get(control_name) {
        Some(RawInput::Date(Some(date))) => Value::Str(date.format(DATE_FORMAT).to_string()),
        Some(RawInput::Date(None)) => Value::Str(String::new()),
        Some(other) => return Err(kind_mismatch(control_name, "date", other)),
        None => Value::Str(initial.format(DATE_FORMAT).to_string()),
    };
    Ok((Control::DatePicker { initial }, value, true))
}

fn multi_select_param(
    spec: &ParameterSpec,
    container: ContainerKind,
    set: &ChoiceSet,
    default: Option<&Value>,
    state: &InputState,
) -> Result<(Vec<PlannedControl>, Value)> {
    let options = set.labels();
    let mut initial = Vec::new();
    if let Some(items) = default.and_then(Value::as_items) {
        for item in items {
            check_choice_initial(&spec.name, set, item)?;
            initial.push(format_scalar(item));
        }
    }

    let picked: Vec<Value> = match state.get(&spec.name) {
        Some(RawInput::MultiSelect(labels)) => labels
            .iter()
            .map(|label| {
                set.value_for_label(label)
                    .ok_or_else(|| WidgetError::InvalidSelection {
                        param: spec.name.clone(),
                        value: label.clone(),
                    })
            })
            .collect::<Result<_>>()?,
        Some(other) => return Err(kind_mismatch(&spec.name, "multi-selection", other)),
        None => initial
            .iter()
            .filter_map(|label| set.value_for_label(label))
            .collect(),
    };

    let value = shape_items(container, picked);
    let control = Control::MultiSelect { options, initial };
    Ok((
        vec![PlannedControl {
            name: spec.name.clone(),
            control,
        }],
        value,
    ))
}

fn text_area_param(
    spec: &ParameterSpec,
    container: ContainerKind,
    inner: &TypeDescriptor,
    default: Option<&Value>,
    state: &InputState,
) -> Result<(Vec<PlannedControl>, Value)> {
    let initial = default
        .and_then(Value::as_items)
        .map(encode_lines)
        .unwrap_or_default();

    let value = match state.get(&spec.name) {
        // An empty submission keeps the declared default instead of
        // clearing the collection.
        Some(RawInput::Text(text)) if text.is_empty() => defaulted(default),
        Some(RawInput::Text(text)) => {
            let items = decode_lines(text, inner)?;
            shape_items(container, items)
        }
        Some(other) => return Err(kind_mismatch(&spec.name, "text", other)),
        None => defaulted(default),
    };

    let control = Control::TextArea { initial };
    Ok((
        vec![PlannedControl {
            name: spec.name.clone(),
            control,
        }],
        value,
    ))
}

fn delimited_param(
    spec: &ParameterSpec,
    inner: &TypeDescriptor,
    default: Option<&Value>,
    state: &InputState,
) -> Result<(Vec<PlannedControl>, Value)> {
    let initial = default
        .and_then(Value::as_items)
        .map(encode_items)
        .unwrap_or_default();

    let value = match state.get(&spec.name) {
        Some(RawInput::Text(text)) if text.is_empty() => defaulted(default),
        Some(RawInput::Text(text)) => Value::Tuple(decode_items(text, inner)?),
        Some(other) => return Err(kind_mismatch(&spec.name, "text", other)),
        None => defaulted(default),
    };

    let control = Control::DelimitedText { initial };
    Ok((
        vec![PlannedControl {
            name: spec.name.clone(),
            control,
        }],
        value,
    ))
}

fn fixed_tuple_param(
    spec: &ParameterSpec,
    elements: &[TypeDescriptor],
    default: Option<&Value>,
    state: &InputState,
) -> Result<(Vec<PlannedControl>, Value)> {
    let default_items = default.and_then(Value::as_items);

    let mut planned = Vec::with_capacity(elements.len());
    let mut produced = Vec::with_capacity(elements.len());
    let mut emptiable = Vec::with_capacity(elements.len());

    for (index, element) in elements.iter().enumerate() {
        let sub_name = format!("{}.{}", spec.name, index);
        let sub_default = default_items.and_then(|items| items.get(index));
        let (control, value, can_be_empty) =
            element_control(&sub_name, &spec.name, element, sub_default, state)?;
        planned.push(PlannedControl {
            name: sub_name,
            control,
        });
        produced.push(value);
        emptiable.push(can_be_empty);
    }

    let any_empty = produced.iter().any(is_empty_value);
    let untouched = produced
        .iter()
        .zip(&emptiable)
        .filter(|(_, can_be_empty)| **can_be_empty)
        .all(|(value, _)| is_empty_value(value));

    let value = if !any_empty {
        Value::Tuple(produced)
    } else if untouched {
        Value::Null
    } else {
        return Err(WidgetError::IncompleteTuple {
            param: spec.name.clone(),
        });
    };

    Ok((planned, value))
}

fn shape_items(container: ContainerKind, items: Vec<Value>) -> Value {
    match container {
        ContainerKind::List => Value::List(items),
        ContainerKind::Set => Value::Set(dedup_first_seen(items)),
    }
}

fn defaulted(default: Option<&Value>) -> Value {
    default.cloned().unwrap_or(Value::Null)
}

fn check_choice_initial(param: &str, set: &ChoiceSet, value: &Value) -> Result<()> {
    if set.contains(value) {
        Ok(())
    } else {
        Err(WidgetError::Spec(SpecError::ChoiceDefaultMismatch {
            param: param.to_string(),
            value: format_scalar(value),
        }))
    }
}

fn kind_mismatch(control: &str, expected: &'static str, found: &RawInput) -> WidgetError {
    WidgetError::InputKindMismatch {
        control: control.to_string(),
        expected,
        found: found.kind_name(),
    }
}

/// Step and display formatting for a float input, derived from the
/// default's decimal digits. No default falls back to cents-style
/// fixed-point.
fn float_presentation(initial: Option<f64>) -> (f64, NumberFormat) {
    let digits = initial.map(decimal_digits).unwrap_or(2);
    if digits <= 2 {
        (0.01, NumberFormat::Fixed(2))
    } else {
        (
            10f64.powi(-(digits as i32)),
            NumberFormat::Scientific(digits as u8),
        )
    }
}

fn decimal_digits(value: f64) -> usize {
    let text = value.to_string();
    text.split_once('.')
        .map(|(_, fraction)| fraction.len())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use param_schema_core::{ParamDecl, SpecSource, Specification, classify, extract};

    fn params_for(spec: Specification) -> Vec<ParameterSpec> {
        extract(&SpecSource::Declaration(spec)).unwrap()
    }

    fn state(entries: &[(&str, RawInput)]) -> InputState {
        entries
            .iter()
            .map(|(name, input)| (name.to_string(), input.clone()))
            .collect()
    }

    #[test]
    fn test_first_render_yields_defaults() {
        let params = params_for(
            Specification::new("MyTap")
                .with_param(ParamDecl::new("name", "str"))
                .with_param(ParamDecl::new("age", "int"))
                .with_param(
                    ParamDecl::new("choice", "Literal[\"Option1\", \"Option2\"]")
                        .with_default("Option1"),
                )
                .with_param(ParamDecl::new("agree", "bool").with_default(false)),
        );

        let rendered = render(&params, &InputState::new(), false).unwrap();
        assert_eq!(rendered.values["name"], Value::Str("".into()));
        assert_eq!(rendered.values["age"], Value::Null);
        assert_eq!(rendered.values["choice"], Value::Str("Option1".into()));
        assert_eq!(rendered.values["agree"], Value::Bool(false));
        assert_eq!(rendered.missing, vec!["name".to_string(), "age".to_string()]);
    }

    #[test]
    fn test_controls_map_by_descriptor() {
        let params = params_for(
            Specification::new("T")
                .with_param(ParamDecl::new("name", "str"))
                .with_param(ParamDecl::new("age", "int"))
                .with_param(ParamDecl::new("score", "float").with_default(0.5))
                .with_param(ParamDecl::new("agree", "bool").with_default(false))
                .with_param(
                    ParamDecl::new("choice", "Literal[\"a\", \"b\"]").with_default("a"),
                )
                .with_param(ParamDecl::new("tags", "Vec<str>"))
                .with_param(ParamDecl::new("picks", "Set<Literal[\"x\", \"y\"]>"))
                .with_param(ParamDecl::new("words", "(str, ..)")),
        );

        let rendered = render(&params, &InputState::new(), false).unwrap();
        assert!(matches!(
            rendered.find_control("name"),
            Some(Control::Text { .. })
        ));
        assert!(matches!(
            rendered.find_control("age"),
            Some(Control::IntInput { step: 1, .. })
        ));
        assert!(matches!(
            rendered.find_control("score"),
            Some(Control::FloatInput { .. })
        ));
        assert!(matches!(
            rendered.find_control("agree"),
            Some(Control::Toggle { initial: false })
        ));
        assert!(matches!(
            rendered.find_control("choice"),
            Some(Control::Select { .. })
        ));
        assert!(matches!(
            rendered.find_control("tags"),
            Some(Control::TextArea { .. })
        ));
        assert!(matches!(
            rendered.find_control("picks"),
            Some(Control::MultiSelect { .. })
        ));
        assert!(matches!(
            rendered.find_control("words"),
            Some(Control::DelimitedText { .. })
        ));
    }

    #[test]
    fn test_date_default_promotes_to_date_picker() {
        let params = params_for(
            Specification::new("T")
                .with_param(ParamDecl::new("start", "str").with_default("2024-03-01"))
                .with_param(ParamDecl::new("label", "str").with_default("2024-3-1x")),
        );
        let rendered = render(&params, &InputState::new(), false).unwrap();
        assert!(matches!(
            rendered.find_control("start"),
            Some(Control::DatePicker { .. })
        ));
        assert!(matches!(
            rendered.find_control("label"),
            Some(Control::Text { .. })
        ));
        assert_eq!(rendered.values["start"], Value::Str("2024-03-01".into()));
    }

    #[test]
    fn test_date_picker_output_coerces_to_iso_string() {
        let params = params_for(
            Specification::new("T")
                .with_param(ParamDecl::new("start", "str").with_default("2024-03-01")),
        );
        let picked = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        let rendered = render(
            &params,
            &state(&[("start", RawInput::Date(Some(picked)))]),
            false,
        )
        .unwrap();
        assert_eq!(rendered.values["start"], Value::Str("2025-12-31".into()));
    }

    #[test]
    fn test_float_presentation_from_default_decimals() {
        let params = params_for(
            Specification::new("T")
                .with_param(ParamDecl::new("coarse", "float").with_default(2.5))
                .with_param(ParamDecl::new("fine", "float").with_default(0.00012))
                .with_param(ParamDecl::new("blank", "float")),
        );
        let rendered = render(&params, &InputState::new(), false).unwrap();

        match rendered.find_control("coarse") {
            Some(Control::FloatInput { step, format, .. }) => {
                assert_eq!(*step, 0.01);
                assert_eq!(*format, NumberFormat::Fixed(2));
            }
            other => panic!("unexpected control: {other:?}"),
        }
        match rendered.find_control("fine") {
            Some(Control::FloatInput { step, format, .. }) => {
                assert!((*step - 1e-5).abs() < 1e-12);
                assert_eq!(*format, NumberFormat::Scientific(5));
            }
            other => panic!("unexpected control: {other:?}"),
        }
        match rendered.find_control("blank") {
            Some(Control::FloatInput {
                initial,
                step,
                format,
            }) => {
                assert_eq!(*initial, None);
                assert_eq!(*step, 0.01);
                assert_eq!(*format, NumberFormat::Fixed(2));
            }
            other => panic!("unexpected control: {other:?}"),
        }
    }

    #[test]
    fn test_required_str_missing_until_supplied() {
        let params = params_for(Specification::new("T").with_param(ParamDecl::new("name", "str")));

        let rendered = render(&params, &state(&[("name", RawInput::Text("".into()))]), false)
            .unwrap();
        assert_eq!(rendered.missing, vec!["name".to_string()]);

        let rendered = render(
            &params,
            &state(&[("name", RawInput::Text("David".into()))]),
            false,
        )
        .unwrap();
        assert!(rendered.missing.is_empty());
    }

    #[test]
    fn test_optional_text_empty_becomes_null() {
        let params = params_for(
            Specification::new("T")
                .with_param(ParamDecl::new("note", "Option<str>").with_default(Value::Null)),
        );
        let rendered = render(&params, &state(&[("note", RawInput::Text("".into()))]), false)
            .unwrap();
        assert_eq!(rendered.values["note"], Value::Null);

        let rendered = render(
            &params,
            &state(&[("note", RawInput::Text("hi".into()))]),
            false,
        )
        .unwrap();
        assert_eq!(rendered.values["note"], Value::Str("hi".into()));
    }

    #[test]
    fn test_optional_multi_select_empty_becomes_null() {
        let params = params_for(
            Specification::new("T")
                .with_param(
                    ParamDecl::new("picks", "Option<Vec<Literal[\"x\", \"y\"]>>")
                        .with_default(Value::Null),
                ),
        );
        let rendered = render(
            &params,
            &state(&[("picks", RawInput::MultiSelect(vec![]))]),
            false,
        )
        .unwrap();
        assert_eq!(rendered.values["picks"], Value::Null);
    }

    #[test]
    fn test_required_multi_select_empty_is_empty_collection() {
        let params = params_for(
            Specification::new("T")
                .with_param(ParamDecl::new("picks", "Vec<Literal[\"x\", \"y\"]>")),
        );
        let rendered = render(
            &params,
            &state(&[("picks", RawInput::MultiSelect(vec![]))]),
            false,
        )
        .unwrap();
        assert_eq!(rendered.values["picks"], Value::list([]));
        assert!(rendered.missing.is_empty());
    }

    #[test]
    fn test_text_area_splits_lines_and_keeps_default_on_empty() {
        let params = params_for(Specification::new("T").with_param(
            ParamDecl::new("tags", "Vec<str>").with_default(Value::list(["a".into(), "b".into()])),
        ));

        let rendered = render(&params, &InputState::new(), false).unwrap();
        assert_eq!(
            rendered.find_control("tags"),
            Some(&Control::TextArea {
                initial: "a\nb".into()
            })
        );

        let rendered = render(
            &params,
            &state(&[("tags", RawInput::Text("x\ny\nz".into()))]),
            false,
        )
        .unwrap();
        assert_eq!(
            rendered.values["tags"],
            Value::list(["x".into(), "y".into(), "z".into()])
        );

        let rendered = render(&params, &state(&[("tags", RawInput::Text("".into()))]), false)
            .unwrap();
        assert_eq!(
            rendered.values["tags"],
            Value::list(["a".into(), "b".into()])
        );
    }

    #[test]
    fn test_set_collection_deduplicates() {
        let params = params_for(
            Specification::new("T").with_param(ParamDecl::new("tags", "Set<str>")),
        );
        let rendered = render(
            &params,
            &state(&[("tags", RawInput::Text("b\na\nb".into()))]),
            false,
        )
        .unwrap();
        assert_eq!(
            rendered.values["tags"],
            Value::set(["b".into(), "a".into()])
        );
    }

    #[test]
    fn test_delimited_control_round_trip() {
        let params = params_for(Specification::new("T").with_param(
            ParamDecl::new("nums", "(int, ..)").with_default(Value::tuple([
                Value::Int(1),
                Value::Int(2),
            ])),
        ));

        let rendered = render(&params, &InputState::new(), false).unwrap();
        assert_eq!(
            rendered.find_control("nums"),
            Some(&Control::DelimitedText {
                initial: "1, 2".into()
            })
        );
        assert_eq!(
            rendered.values["nums"],
            Value::tuple([Value::Int(1), Value::Int(2)])
        );

        let rendered = render(
            &params,
            &state(&[("nums", RawInput::Text("3, 4, 5".into()))]),
            false,
        )
        .unwrap();
        assert_eq!(
            rendered.values["nums"],
            Value::tuple([Value::Int(3), Value::Int(4), Value::Int(5)])
        );
    }

    #[test]
    fn test_fixed_tuple_sub_controls() {
        let params = params_for(
            Specification::new("T").with_param(ParamDecl::new("point", "(float, float)")),
        );

        let rendered = render(&params, &InputState::new(), false).unwrap();
        assert!(rendered.find_control("point.0").is_some());
        assert!(rendered.find_control("point.1").is_some());
        assert_eq!(rendered.values["point"], Value::Null);
        assert_eq!(rendered.missing, vec!["point".to_string()]);

        let rendered = render(
            &params,
            &state(&[
                ("point.0", RawInput::Float(Some(1.5))),
                ("point.1", RawInput::Float(Some(-2.0))),
            ]),
            false,
        )
        .unwrap();
        assert_eq!(
            rendered.values["point"],
            Value::tuple([Value::Float(1.5), Value::Float(-2.0)])
        );
    }

    #[test]
    fn test_fixed_tuple_partial_fill_is_error() {
        let params = params_for(
            Specification::new("T").with_param(ParamDecl::new("point", "(float, float)")),
        );
        let err = render(
            &params,
            &state(&[("point.0", RawInput::Float(Some(1.5)))]),
            false,
        )
        .unwrap_err();
        assert_eq!(
            err,
            WidgetError::IncompleteTuple {
                param: "point".into()
            }
        );
    }

    #[test]
    fn test_fixed_tuple_with_toggle_position_can_rest() {
        // The toggle always has a value, so an untouched (str, bool)
        // tuple must still count as untouched rather than partial.
        let params = params_for(
            Specification::new("T").with_param(ParamDecl::new("pair", "(str, bool)")),
        );
        let rendered = render(&params, &InputState::new(), false).unwrap();
        assert_eq!(rendered.values["pair"], Value::Null);

        let rendered = render(
            &params,
            &state(&[("pair.0", RawInput::Text("on".into()))]),
            false,
        )
        .unwrap();
        assert_eq!(
            rendered.values["pair"],
            Value::tuple([Value::Str("on".into()), Value::Bool(false)])
        );
    }

    #[test]
    fn test_select_rejects_unknown_label() {
        let params = params_for(Specification::new("T").with_param(
            ParamDecl::new("choice", "Literal[\"a\", \"b\"]").with_default("a"),
        ));
        let err = render(
            &params,
            &state(&[("choice", RawInput::Select("c".into()))]),
            false,
        )
        .unwrap_err();
        assert_eq!(
            err,
            WidgetError::InvalidSelection {
                param: "choice".into(),
                value: "c".into()
            }
        );
    }

    #[test]
    fn test_select_without_default_has_no_silent_pick() {
        let params = params_for(
            Specification::new("T").with_param(ParamDecl::new("choice", "Literal[\"a\", \"b\"]")),
        );
        let rendered = render(&params, &InputState::new(), false).unwrap();
        assert_eq!(
            rendered.find_control("choice"),
            Some(&Control::Select {
                options: vec!["a".into(), "b".into()],
                initial: None
            })
        );
        assert_eq!(rendered.values["choice"], Value::Null);
        assert_eq!(rendered.missing, vec!["choice".to_string()]);
    }

    #[test]
    fn test_hand_built_choice_default_fails_at_render() {
        // Bypassing the extractor with an out-of-set default must fail
        // loudly rather than pick an arbitrary option.
        let spec = ParameterSpec {
            name: "mode".into(),
            descriptor: classify("Literal[\"a\", \"b\"]").unwrap(),
            default: Some(Value::Str("z".into())),
            required: false,
        };
        let err = render(&[spec], &InputState::new(), false).unwrap_err();
        assert!(matches!(
            err,
            WidgetError::Spec(SpecError::ChoiceDefaultMismatch { .. })
        ));
    }

    #[test]
    fn test_boolean_choice_renders_toggle() {
        let params = params_for(
            Specification::new("T")
                .with_param(ParamDecl::new("confirm", "Literal[true]"))
                .with_param(ParamDecl::new("flag", "Literal[true, false]")),
        );
        let rendered = render(&params, &InputState::new(), false).unwrap();
        // The sole option seeds the toggle when false is not a member.
        assert_eq!(
            rendered.find_control("confirm"),
            Some(&Control::Toggle { initial: true })
        );
        assert_eq!(
            rendered.find_control("flag"),
            Some(&Control::Toggle { initial: false })
        );

        let err = render(
            &params,
            &state(&[("confirm", RawInput::Toggle(false))]),
            false,
        )
        .unwrap_err();
        assert!(matches!(err, WidgetError::InvalidSelection { .. }));
    }

    #[test]
    fn test_input_kind_mismatch_fails_render() {
        let params = params_for(Specification::new("T").with_param(ParamDecl::new("age", "int")));
        let err = render(
            &params,
            &state(&[("age", RawInput::Text("87".into()))]),
            false,
        )
        .unwrap_err();
        assert_eq!(
            err,
            WidgetError::InputKindMismatch {
                control: "age".into(),
                expected: "integer",
                found: "text"
            }
        );
    }

    #[test]
    fn test_missing_names_appear_once_in_order() {
        let params = params_for(
            Specification::new("T")
                .with_param(ParamDecl::new("b_first", "str"))
                .with_param(ParamDecl::new("a_second", "int"))
                .with_param(ParamDecl::new("filled", "bool").with_default(true)),
        );
        let rendered = render(&params, &InputState::new(), true).unwrap();
        assert_eq!(
            rendered.missing,
            vec!["b_first".to_string(), "a_second".to_string()]
        );
    }
}
