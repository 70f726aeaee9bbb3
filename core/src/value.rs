//! Runtime value representation for parameter defaults and bound inputs.
//!
//! [`Value`] is the single currency that flows through classification,
//! widget rendering, form planning, and payload validation. It is designed
//! for serialization with [`serde`] and round-trips through JSON and YAML
//! in its natural wire shape: scalars serialize as themselves and every
//! container serializes as a plain array.

use serde::{Deserialize, Serialize};

/// A dynamically typed parameter value.
///
/// Containers all serialize as JSON arrays; the distinction between
/// [`List`](Value::List), [`Set`](Value::Set), and [`Tuple`](Value::Tuple)
/// is restored from the parameter's type descriptor when a wire value is
/// conformed (see [`conform_value`](crate::conform_value)). Deserialization
/// therefore always yields `List` for arrays.
///
/// # Examples
///
/// ```
/// use param_schema_core::Value;
///
/// let v: Value = serde_json::from_str("[1, 2, 3]").unwrap();
/// assert_eq!(v, Value::list([Value::Int(1), Value::Int(2), Value::Int(3)]));
/// assert_eq!(serde_json::to_string(&v).unwrap(), "[1,2,3]");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Absent value (`null` on the wire).
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating-point number.
    Float(f64),
    /// Text.
    Str(String),
    /// Ordered sequence.
    List(Vec<Value>),
    /// Deduplicated sequence in first-seen order (serializes as an array).
    Set(Vec<Value>),
    /// Fixed or variable arity sequence (serializes as an array).
    Tuple(Vec<Value>),
}

impl Value {
    /// Builds a [`Value::List`] from anything iterable.
    ///
    /// # Examples
    ///
    /// ```
    /// use param_schema_core::Value;
    ///
    /// let v = Value::list(["a".into(), "b".into()]);
    /// assert!(matches!(v, Value::List(_)));
    /// ```
    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Value::List(items.into_iter().collect())
    }

    /// Builds a [`Value::Set`] from anything iterable.
    ///
    /// The items are kept in the given order; callers are expected to have
    /// deduplicated already (see [`dedup_first_seen`](crate::dedup_first_seen)).
    pub fn set(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Set(items.into_iter().collect())
    }

    /// Builds a [`Value::Tuple`] from anything iterable.
    pub fn tuple(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Tuple(items.into_iter().collect())
    }

    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short lowercase name of the value's shape, for error messages.
    ///
    /// # Examples
    ///
    /// ```
    /// use param_schema_core::Value;
    ///
    /// assert_eq!(Value::Int(3).kind_name(), "int");
    /// assert_eq!(Value::list([]).kind_name(), "list");
    /// ```
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Set(_) => "set",
            Value::Tuple(_) => "tuple",
        }
    }

    /// Returns the string if this is a [`Value::Str`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer if this is a [`Value::Int`].
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the number as `f64` if this is a [`Value::Float`] or
    /// [`Value::Int`].
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Returns the boolean if this is a [`Value::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the items if this is any container variant.
    pub fn as_items(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) | Value::Set(items) | Value::Tuple(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}
