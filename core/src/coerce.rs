//! Bidirectional value coercion.
//!
//! Converts between native [`Value`]s and the flat textual forms used by
//! wire payloads and string-backed controls. Encoding and decoding are
//! inverse operations: `decode(encode(v))` returns `v` for any value whose
//! items do not contain the active delimiter. The one documented exception
//! is the empty string, which callers resolve against the parameter default
//! before decoding so that an empty submission cannot silently clear a
//! collection.

use crate::descriptor::{ChoiceSet, ContainerKind, ScalarKind, TypeDescriptor};
use crate::error::{Result, SpecError};
use crate::value::Value;

/// Delimiter for wire collections, delimited controls, and tuple positions.
pub const WIRE_DELIMITER: &str = ", ";

/// Delimiter for text-area backed collections.
pub const LINE_DELIMITER: &str = "\n";

/// Renders a scalar value as wire text.
///
/// `Null` renders as the empty string; containers render through
/// [`encode_items`]. Booleans render as `true`/`false`.
///
/// # Examples
///
/// ```
/// use param_schema_core::{format_scalar, Value};
///
/// assert_eq!(format_scalar(&Value::Int(42)), "42");
/// assert_eq!(format_scalar(&Value::Bool(false)), "false");
/// assert_eq!(format_scalar(&Value::Null), "");
/// ```
pub fn format_scalar(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Str(s) => s.clone(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::List(items) | Value::Set(items) | Value::Tuple(items) => encode_items(items),
    }
}

/// Parses wire text as the given scalar kind.
///
/// Numbers tolerate surrounding whitespace. Booleans accept `true`/`false`
/// in any ASCII case plus `1`/`0`.
///
/// # Errors
///
/// Returns [`SpecError::InvalidScalar`] when the text does not parse.
pub fn parse_scalar(kind: ScalarKind, text: &str) -> Result<Value> {
    match kind {
        ScalarKind::Str => Ok(Value::Str(text.to_string())),
        ScalarKind::Int => text
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| invalid(kind.name(), text)),
        ScalarKind::Float => text
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| invalid(kind.name(), text)),
        ScalarKind::Bool => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(Value::Bool(true)),
            "false" | "0" => Ok(Value::Bool(false)),
            _ => Err(invalid(kind.name(), text)),
        },
    }
}

/// Parses one delimited item as a collection or tuple element type.
///
/// Element types are scalars and choices; choice text must match one of
/// the declared options.
pub fn parse_element(descriptor: &TypeDescriptor, text: &str) -> Result<Value> {
    match descriptor {
        TypeDescriptor::Scalar(kind) => parse_scalar(*kind, text),
        TypeDescriptor::Choice(set) => {
            let candidate = match set.kind() {
                ScalarKind::Bool => parse_scalar(ScalarKind::Bool, text)?,
                _ => Value::Str(text.to_string()),
            };
            if set.contains(&candidate) {
                Ok(candidate)
            } else {
                Err(outside_choice(set, text))
            }
        }
        other => Err(SpecError::ValueMismatch {
            expected: other.to_string(),
            found: "delimited text".to_string(),
        }),
    }
}

/// Encodes container items as one wire string using [`WIRE_DELIMITER`].
///
/// # Examples
///
/// ```
/// use param_schema_core::{encode_items, Value};
///
/// let items = [Value::Int(1), Value::Int(2), Value::Int(3)];
/// assert_eq!(encode_items(&items), "1, 2, 3");
/// ```
pub fn encode_items(items: &[Value]) -> String {
    items
        .iter()
        .map(format_scalar)
        .collect::<Vec<_>>()
        .join(WIRE_DELIMITER)
}

/// Decodes a wire string into items of the given element type.
///
/// The split is on the exact delimiter, so `"a,b"` stays one item and
/// items keep incidental whitespace. Callers resolve empty text against
/// the parameter default before calling.
pub fn decode_items(text: &str, element: &TypeDescriptor) -> Result<Vec<Value>> {
    text.split(WIRE_DELIMITER)
        .map(|piece| parse_element(element, piece))
        .collect()
}

/// Encodes container items one per line for text-area controls.
pub fn encode_lines(items: &[Value]) -> String {
    items
        .iter()
        .map(format_scalar)
        .collect::<Vec<_>>()
        .join(LINE_DELIMITER)
}

/// Decodes text-area content into items, one per line.
///
/// A single trailing newline is ignored; interior blank lines are kept.
pub fn decode_lines(text: &str, element: &TypeDescriptor) -> Result<Vec<Value>> {
    text.strip_suffix(LINE_DELIMITER)
        .unwrap_or(text)
        .split(LINE_DELIMITER)
        .map(|line| parse_element(element, line))
        .collect()
}

/// Removes duplicate values, keeping the first occurrence of each.
///
/// # Examples
///
/// ```
/// use param_schema_core::{dedup_first_seen, Value};
///
/// let items = vec![Value::Int(2), Value::Int(1), Value::Int(2)];
/// assert_eq!(dedup_first_seen(items), vec![Value::Int(2), Value::Int(1)]);
/// ```
pub fn dedup_first_seen(items: Vec<Value>) -> Vec<Value> {
    let mut out: Vec<Value> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

/// Emptiness predicate shared by widget rendering and payload validation.
///
/// String values count as empty when absent or blank; every other shape
/// counts as empty only when absent.
///
/// # Examples
///
/// ```
/// use param_schema_core::{is_empty_value, Value};
///
/// assert!(is_empty_value(&Value::Null));
/// assert!(is_empty_value(&Value::Str(String::new())));
/// assert!(!is_empty_value(&Value::Bool(false)));
/// assert!(!is_empty_value(&Value::Int(0)));
/// assert!(!is_empty_value(&Value::list([])));
/// ```
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Str(s) => s.is_empty(),
        _ => false,
    }
}

/// Conforms a value to a descriptor, keeping it when it already fits and
/// coercing it when a safe conversion exists.
///
/// Accepted conversions:
///
/// - wire strings parse per scalar kind, split per container shape;
/// - `int` widens to `float`; an integral `float` narrows to `int`;
/// - arrays reshape into the declared container (`Set` deduplicating in
///   first-seen order, tuples checking arity);
/// - under `Optional`, `null` and the empty string conform to `Null`.
///
/// Anything else is an error: booleans never convert to numbers, non-empty
/// shapes never convert across containers and scalars, and choice values
/// must match a declared option.
///
/// # Errors
///
/// Returns [`SpecError::InvalidScalar`] for unparseable wire text,
/// [`SpecError::InvalidChoiceValue`] for out-of-set choice values, and
/// [`SpecError::ValueMismatch`] for native values of the wrong shape.
///
/// # Examples
///
/// ```
/// use param_schema_core::{classify, conform_value, Value};
///
/// let d = classify("Set<int>").unwrap();
/// let raw = Value::list([Value::Str("2".into()), Value::Int(1), Value::Int(2)]);
/// assert_eq!(
///     conform_value(&d, &raw).unwrap(),
///     Value::set([Value::Int(2), Value::Int(1)])
/// );
/// ```
pub fn conform_value(descriptor: &TypeDescriptor, value: &Value) -> Result<Value> {
    match descriptor {
        TypeDescriptor::Optional(inner) => match value {
            Value::Null => Ok(Value::Null),
            Value::Str(s) if s.is_empty() => Ok(Value::Null),
            other => conform_value(inner, other),
        },
        TypeDescriptor::Scalar(kind) => conform_scalar(*kind, value),
        TypeDescriptor::Choice(set) => conform_choice(set, value),
        TypeDescriptor::Collection { container, inner } => {
            let items = conform_items(descriptor, inner, value)?;
            Ok(match container {
                ContainerKind::List => Value::List(items),
                ContainerKind::Set => Value::Set(dedup_first_seen(items)),
            })
        }
        TypeDescriptor::FixedTuple(elements) => {
            let items = match value {
                Value::Str(text) => {
                    let pieces: Vec<&str> = text.split(WIRE_DELIMITER).collect();
                    if pieces.len() != elements.len() {
                        return Err(mismatch(
                            descriptor,
                            format!("{} delimited items", pieces.len()),
                        ));
                    }
                    elements
                        .iter()
                        .zip(pieces)
                        .map(|(element, piece)| parse_element(element, piece))
                        .collect::<Result<Vec<_>>>()?
                }
                Value::List(items) | Value::Tuple(items) => {
                    if items.len() != elements.len() {
                        return Err(mismatch(descriptor, format!("{} items", items.len())));
                    }
                    elements
                        .iter()
                        .zip(items)
                        .map(|(element, item)| conform_value(element, item))
                        .collect::<Result<Vec<_>>>()?
                }
                other => return Err(mismatch(descriptor, other.kind_name())),
            };
            Ok(Value::Tuple(items))
        }
        TypeDescriptor::VariableTuple(inner) => {
            let items = conform_items(descriptor, inner, value)?;
            Ok(Value::Tuple(items))
        }
    }
}

fn conform_items(
    descriptor: &TypeDescriptor,
    element: &TypeDescriptor,
    value: &Value,
) -> Result<Vec<Value>> {
    match value {
        Value::Str(text) if text.is_empty() => Err(mismatch(descriptor, "empty string")),
        Value::Str(text) => decode_items(text, element),
        Value::List(items) | Value::Set(items) | Value::Tuple(items) => items
            .iter()
            .map(|item| conform_value(element, item))
            .collect(),
        other => Err(mismatch(descriptor, other.kind_name())),
    }
}

fn conform_scalar(kind: ScalarKind, value: &Value) -> Result<Value> {
    match (kind, value) {
        (ScalarKind::Str, Value::Str(s)) => Ok(Value::Str(s.clone())),
        (_, Value::Str(text)) => parse_scalar(kind, text),
        (ScalarKind::Int, Value::Int(i)) => Ok(Value::Int(*i)),
        (ScalarKind::Int, Value::Float(f)) => integral_to_i64(*f)
            .map(Value::Int)
            .ok_or_else(|| scalar_mismatch(kind, value)),
        (ScalarKind::Float, Value::Float(f)) => Ok(Value::Float(*f)),
        (ScalarKind::Float, Value::Int(i)) => Ok(Value::Float(*i as f64)),
        (ScalarKind::Bool, Value::Bool(b)) => Ok(Value::Bool(*b)),
        _ => Err(scalar_mismatch(kind, value)),
    }
}

fn conform_choice(set: &ChoiceSet, value: &Value) -> Result<Value> {
    let candidate = match (set.kind(), value) {
        (ScalarKind::Bool, Value::Str(text)) => parse_scalar(ScalarKind::Bool, text)?,
        _ => value.clone(),
    };
    if set.contains(&candidate) {
        Ok(candidate)
    } else {
        Err(outside_choice(set, &format_scalar(value)))
    }
}

fn integral_to_i64(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0 && (i64::MIN as f64..=i64::MAX as f64).contains(&f))
        .then_some(f as i64)
}

fn outside_choice(set: &ChoiceSet, value: &str) -> SpecError {
    SpecError::InvalidChoiceValue {
        value: value.to_string(),
        options: set.labels().join(", "),
    }
}

fn invalid(expected: &str, text: &str) -> SpecError {
    SpecError::InvalidScalar {
        expected: expected.to_string(),
        text: text.to_string(),
    }
}

fn mismatch(descriptor: &TypeDescriptor, found: impl Into<String>) -> SpecError {
    SpecError::ValueMismatch {
        expected: descriptor.to_string(),
        found: found.into(),
    }
}

fn scalar_mismatch(kind: ScalarKind, value: &Value) -> SpecError {
    SpecError::ValueMismatch {
        expected: kind.name().to_string(),
        found: value.kind_name().to_string(),
    }
}
