//! Classified type descriptors.
//!
//! A [`TypeDescriptor`] is the structured result of classifying a textual
//! type annotation (see [`classify`](crate::classify)). Every downstream
//! consumer (validation models, widget planning, form planning, coercion)
//! dispatches on this tree rather than re-parsing annotation text.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Primitive kind at the leaves of a descriptor tree.
///
/// # Examples
///
/// ```
/// use param_schema_core::ScalarKind;
///
/// assert_eq!(ScalarKind::Int.to_string(), "int");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
    /// Text value.
    Str,
    /// Signed integer.
    Int,
    /// Floating-point number.
    Float,
    /// Boolean.
    Bool,
}

impl ScalarKind {
    /// Lowercase annotation spelling of the kind.
    pub fn name(self) -> &'static str {
        match self {
            ScalarKind::Str => "str",
            ScalarKind::Int => "int",
            ScalarKind::Float => "float",
            ScalarKind::Bool => "bool",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The declared options of a choice type.
///
/// Choice literals are homogeneous: either all strings or all booleans.
/// The classifier rejects mixed literal lists, so this invariant holds by
/// construction.
///
/// # Examples
///
/// ```
/// use param_schema_core::{ChoiceSet, Value};
///
/// let set = ChoiceSet::Str(vec!["json".into(), "yaml".into()]);
/// assert!(set.contains(&Value::Str("yaml".into())));
/// assert!(!set.contains(&Value::Str("toml".into())));
/// assert_eq!(set.labels(), vec!["json".to_string(), "yaml".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceSet {
    /// String options, e.g. `Literal["json", "yaml"]`.
    Str(Vec<String>),
    /// Boolean options, e.g. `Literal[true]`.
    Bool(Vec<bool>),
}

impl ChoiceSet {
    /// Number of declared options.
    pub fn len(&self) -> usize {
        match self {
            ChoiceSet::Str(opts) => opts.len(),
            ChoiceSet::Bool(opts) => opts.len(),
        }
    }

    /// Whether no options are declared. The classifier never produces an
    /// empty set, but hand-built descriptors may.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Primitive kind of the options.
    pub fn kind(&self) -> ScalarKind {
        match self {
            ChoiceSet::Str(_) => ScalarKind::Str,
            ChoiceSet::Bool(_) => ScalarKind::Bool,
        }
    }

    /// Whether `value` is one of the declared options.
    pub fn contains(&self, value: &Value) -> bool {
        match (self, value) {
            (ChoiceSet::Str(opts), Value::Str(s)) => opts.iter().any(|o| o == s),
            (ChoiceSet::Bool(opts), Value::Bool(b)) => opts.contains(b),
            _ => false,
        }
    }

    /// Display labels for the options, in declaration order.
    ///
    /// Used by select-style widgets and form fields, and by error messages.
    pub fn labels(&self) -> Vec<String> {
        match self {
            ChoiceSet::Str(opts) => opts.clone(),
            ChoiceSet::Bool(opts) => opts.iter().map(|b| b.to_string()).collect(),
        }
    }

    /// Looks up the option matching a display label.
    pub fn value_for_label(&self, label: &str) -> Option<Value> {
        match self {
            ChoiceSet::Str(opts) => opts
                .iter()
                .find(|o| o.as_str() == label)
                .map(|o| Value::Str(o.clone())),
            ChoiceSet::Bool(opts) => {
                let wanted = match label {
                    "true" => true,
                    "false" => false,
                    _ => return None,
                };
                opts.contains(&wanted).then_some(Value::Bool(wanted))
            }
        }
    }
}

/// Container flavor of a collection descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    /// Ordered, duplicates allowed (`Vec<T>`).
    List,
    /// Deduplicated in first-seen order (`Set<T>`).
    Set,
}

impl ContainerKind {
    /// Annotation spelling of the container.
    pub fn name(self) -> &'static str {
        match self {
            ContainerKind::List => "Vec",
            ContainerKind::Set => "Set",
        }
    }
}

/// Classified shape of a parameter type.
///
/// Produced by [`classify`](crate::classify) from annotation text. The
/// [`Display`](fmt::Display) impl renders a descriptor back to canonical
/// annotation form, so `classify(d.to_string())` returns `d` again.
///
/// # Examples
///
/// ```
/// use param_schema_core::{classify, ScalarKind, TypeDescriptor};
///
/// let d = classify("Option<Vec<int>>").unwrap();
/// assert_eq!(d.to_string(), "Option<Vec<int>>");
/// assert!(d.is_optional());
/// assert_eq!(d.unwrap_optional().scalar_kind(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeDescriptor {
    /// A bare primitive: `str`, `int`, `float`, or `bool`.
    Scalar(ScalarKind),
    /// Absence-tolerant wrapper: `Option<T>`. Never nests inside another
    /// `Option`, a collection, or a tuple.
    Optional(Box<TypeDescriptor>),
    /// Closed set of literal options: `Literal[...]`.
    Choice(ChoiceSet),
    /// Homogeneous collection: `Vec<T>` or `Set<T>`. The inner type is a
    /// scalar or a choice.
    Collection {
        /// List or set semantics.
        container: ContainerKind,
        /// Element type.
        inner: Box<TypeDescriptor>,
    },
    /// Fixed-arity tuple: `(A, B, ...)` with one descriptor per position.
    FixedTuple(Vec<TypeDescriptor>),
    /// Variable-arity tuple: `(T, ..)`, any number of `T` elements.
    VariableTuple(Box<TypeDescriptor>),
}

impl TypeDescriptor {
    /// Whether the outermost layer is [`TypeDescriptor::Optional`].
    pub fn is_optional(&self) -> bool {
        matches!(self, TypeDescriptor::Optional(_))
    }

    /// Strips one `Optional` layer, if present.
    ///
    /// Widget and form planning dispatch on the unwrapped shape and handle
    /// absence separately.
    pub fn unwrap_optional(&self) -> &TypeDescriptor {
        match self {
            TypeDescriptor::Optional(inner) => inner,
            other => other,
        }
    }

    /// The scalar kind if this descriptor is a bare scalar.
    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        match self {
            TypeDescriptor::Scalar(kind) => Some(*kind),
            _ => None,
        }
    }

    /// The choice set if this descriptor is a bare choice.
    pub fn choice_set(&self) -> Option<&ChoiceSet> {
        match self {
            TypeDescriptor::Choice(set) => Some(set),
            _ => None,
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Scalar(kind) => f.write_str(kind.name()),
            TypeDescriptor::Optional(inner) => write!(f, "Option<{inner}>"),
            TypeDescriptor::Choice(set) => {
                f.write_str("Literal[")?;
                match set {
                    ChoiceSet::Str(opts) => {
                        for (i, opt) in opts.iter().enumerate() {
                            if i > 0 {
                                f.write_str(", ")?;
                            }
                            let escaped = opt.replace('\\', "\\\\").replace('"', "\\\"");
                            write!(f, "\"{escaped}\"")?;
                        }
                    }
                    ChoiceSet::Bool(opts) => {
                        for (i, opt) in opts.iter().enumerate() {
                            if i > 0 {
                                f.write_str(", ")?;
                            }
                            write!(f, "{opt}")?;
                        }
                    }
                }
                f.write_str("]")
            }
            TypeDescriptor::Collection { container, inner } => {
                write!(f, "{}<{inner}>", container.name())
            }
            TypeDescriptor::FixedTuple(inners) => {
                f.write_str("(")?;
                for (i, inner) in inners.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{inner}")?;
                }
                f.write_str(")")
            }
            TypeDescriptor::VariableTuple(inner) => write!(f, "({inner}, ..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_set_contains() {
        let set = ChoiceSet::Str(vec!["a".into(), "b".into()]);
        assert!(set.contains(&Value::Str("a".into())));
        assert!(!set.contains(&Value::Str("c".into())));
        assert!(!set.contains(&Value::Bool(true)));

        let flags = ChoiceSet::Bool(vec![true]);
        assert!(flags.contains(&Value::Bool(true)));
        assert!(!flags.contains(&Value::Bool(false)));
    }

    #[test]
    fn test_choice_set_labels_round_trip() {
        let set = ChoiceSet::Str(vec!["json".into(), "yaml".into()]);
        for label in set.labels() {
            assert_eq!(set.value_for_label(&label), Some(Value::Str(label.clone())));
        }
        assert_eq!(set.value_for_label("toml"), None);

        let flags = ChoiceSet::Bool(vec![true, false]);
        assert_eq!(flags.value_for_label("true"), Some(Value::Bool(true)));
        assert_eq!(flags.value_for_label("maybe"), None);
    }

    #[test]
    fn test_display_scalar_and_optional() {
        let d = TypeDescriptor::Optional(Box::new(TypeDescriptor::Scalar(ScalarKind::Str)));
        assert_eq!(d.to_string(), "Option<str>");
        assert!(d.is_optional());
        assert_eq!(d.unwrap_optional().scalar_kind(), Some(ScalarKind::Str));
    }

    #[test]
    fn test_display_containers() {
        let d = TypeDescriptor::Collection {
            container: ContainerKind::Set,
            inner: Box::new(TypeDescriptor::Scalar(ScalarKind::Int)),
        };
        assert_eq!(d.to_string(), "Set<int>");

        let d = TypeDescriptor::FixedTuple(vec![
            TypeDescriptor::Scalar(ScalarKind::Float),
            TypeDescriptor::Scalar(ScalarKind::Float),
        ]);
        assert_eq!(d.to_string(), "(float, float)");

        let d = TypeDescriptor::VariableTuple(Box::new(TypeDescriptor::Scalar(ScalarKind::Str)));
        assert_eq!(d.to_string(), "(str, ..)");
    }

    #[test]
    fn test_display_choice() {
        let d = TypeDescriptor::Choice(ChoiceSet::Str(vec!["x".into(), "y".into()]));
        assert_eq!(d.to_string(), "Literal[\"x\", \"y\"]");
        let d = TypeDescriptor::Choice(ChoiceSet::Bool(vec![true]));
        assert_eq!(d.to_string(), "Literal[true]");
    }
}
