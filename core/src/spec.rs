//! Parameter specifications and the extraction pipeline.
//!
//! A [`SpecSource`] is the inbound description of a parameter set: a plain
//! declaration, a declaration bound to live values, or a callable
//! signature. [`extract`] turns any source into the flat
//! [`ParameterSpec`] sequence that every downstream builder consumes, so
//! validation models, widget plans, and form plans are always derived from
//! the same view of the parameters.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::classify::classify;
use crate::coerce::{conform_value, format_scalar};
use crate::descriptor::TypeDescriptor;
use crate::error::{Result, SpecError};
use crate::value::Value;

/// One declared parameter: a name, a textual type annotation, and an
/// optional default.
///
/// A parameter without a default is required. A default of `Null` is a
/// real default (the parameter is optional-with-absent-value), which is
/// why `default` distinguishes "absent" from "declared as null" during
/// serialization.
///
/// # Examples
///
/// ```
/// use param_schema_core::ParamDecl;
///
/// let age = ParamDecl::new("age", "int");
/// assert!(age.default.is_none());
///
/// let choice = ParamDecl::new("choice", "Literal[\"a\", \"b\"]").with_default("a");
/// assert!(choice.default.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDecl {
    /// Parameter name, unique within a specification.
    pub name: String,
    /// Textual type annotation, e.g. `Option<Vec<int>>`.
    #[serde(rename = "type")]
    pub annotation: String,
    /// Declared default; absent means required.
    #[serde(
        default,
        deserialize_with = "declared_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub default: Option<Value>,
}

impl ParamDecl {
    /// Creates a required parameter.
    pub fn new(name: &str, annotation: &str) -> Self {
        Self {
            name: name.to_string(),
            annotation: annotation.to_string(),
            default: None,
        }
    }

    /// Attaches a default, making the parameter optional to supply.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// A named set of parameter declarations.
///
/// # Examples
///
/// ```
/// use param_schema_core::{ParamDecl, Specification};
///
/// let spec = Specification::new("MyTap")
///     .with_param(ParamDecl::new("name", "str"))
///     .with_param(ParamDecl::new("agree", "bool").with_default(false));
///
/// assert_eq!(spec.params.len(), 2);
/// assert!(spec.find_param("agree").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specification {
    /// Specification name; also seeds derived model and form names.
    pub name: String,
    /// Declared parameters, in declaration order.
    #[serde(default)]
    pub params: Vec<ParamDecl>,
}

impl Specification {
    /// Creates an empty specification.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            params: Vec::new(),
        }
    }

    /// Appends a parameter declaration.
    pub fn with_param(mut self, param: ParamDecl) -> Self {
        self.params.push(param);
        self
    }

    /// Finds a declaration by name.
    pub fn find_param(&self, name: &str) -> Option<&ParamDecl> {
        self.params.iter().find(|p| p.name == name)
    }
}

/// A specification together with live values bound to some parameters.
///
/// Bound values take precedence over declared defaults during extraction,
/// and a bound parameter is never required. Values bound to names the
/// declaration does not mention are ignored.
///
/// # Examples
///
/// ```
/// use param_schema_core::{BoundSpecification, ParamDecl, Specification, Value};
///
/// let spec = Specification::new("MyTap")
///     .with_param(ParamDecl::new("name", "str"))
///     .with_param(ParamDecl::new("age", "int"));
/// let bound = BoundSpecification::new(spec)
///     .with_value("name", "David")
///     .with_value("age", 87i64);
///
/// assert_eq!(bound.values["age"], Value::Int(87));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundSpecification {
    /// The underlying declaration.
    pub declaration: Specification,
    /// Live values keyed by parameter name.
    #[serde(default)]
    pub values: BTreeMap<String, Value>,
}

impl BoundSpecification {
    /// Wraps a declaration with no values bound yet.
    pub fn new(declaration: Specification) -> Self {
        Self {
            declaration,
            values: BTreeMap::new(),
        }
    }

    /// Binds a live value to a parameter name.
    pub fn with_value(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.values.insert(name.to_string(), value.into());
        self
    }
}

/// A callable signature treated as a parameter set.
///
/// Structurally identical to [`Specification`]; kept distinct because the
/// provenance differs (handler arguments rather than a declared class of
/// parameters) and because serialized documents tag the two differently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSpec {
    /// Function name; also seeds derived model and form names.
    pub name: String,
    /// One declaration per argument, in signature order.
    #[serde(default)]
    pub params: Vec<ParamDecl>,
}

impl FunctionSpec {
    /// Creates an empty signature.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            params: Vec::new(),
        }
    }

    /// Appends an argument declaration.
    pub fn with_param(mut self, param: ParamDecl) -> Self {
        self.params.push(param);
        self
    }
}

/// Any inbound parameter description.
///
/// Serializes as a [`SpecDocument`]: a flat object with a `kind` field of
/// `class`, `instance`, or `function` (`class` when omitted).
///
/// # Examples
///
/// ```
/// use param_schema_core::SpecSource;
///
/// let doc = r#"{"kind": "class", "name": "MyTap", "params": []}"#;
/// let source: SpecSource = serde_json::from_str(doc).unwrap();
/// assert_eq!(source.name(), "MyTap");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SpecDocument", into = "SpecDocument")]
pub enum SpecSource {
    /// A parameter declaration (`kind: class`).
    Declaration(Specification),
    /// A declaration bound to live values (`kind: instance`).
    Instance(BoundSpecification),
    /// A callable signature (`kind: function`).
    Callable(FunctionSpec),
}

impl SpecSource {
    /// Name of the underlying specification.
    pub fn name(&self) -> &str {
        match self {
            SpecSource::Declaration(spec) => &spec.name,
            SpecSource::Instance(bound) => &bound.declaration.name,
            SpecSource::Callable(func) => &func.name,
        }
    }

    /// The serialized `kind` tag for this source.
    pub fn kind(&self) -> &'static str {
        match self {
            SpecSource::Declaration(_) => "class",
            SpecSource::Instance(_) => "instance",
            SpecSource::Callable(_) => "function",
        }
    }
}

/// Flat serialized form of a [`SpecSource`].
///
/// Deserializing accepts any JSON/YAML object with `name`, `params`, an
/// optional `kind`, and (for instances) a `values` map. An unknown `kind`
/// is rejected with [`SpecError::UnrecognizedSpecKind`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecDocument {
    /// Source kind: `class`, `instance`, or `function`. Defaults to `class`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Specification name.
    pub name: String,
    /// Parameter declarations.
    #[serde(default)]
    pub params: Vec<ParamDecl>,
    /// Live values; only meaningful when `kind` is `instance`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub values: BTreeMap<String, Value>,
}

impl TryFrom<SpecDocument> for SpecSource {
    type Error = SpecError;

    fn try_from(doc: SpecDocument) -> Result<Self> {
        let spec = Specification {
            name: doc.name,
            params: doc.params,
        };
        match doc.kind.as_deref().unwrap_or("class") {
            "class" => Ok(SpecSource::Declaration(spec)),
            "instance" => Ok(SpecSource::Instance(BoundSpecification {
                declaration: spec,
                values: doc.values,
            })),
            "function" => Ok(SpecSource::Callable(FunctionSpec {
                name: spec.name,
                params: spec.params,
            })),
            other => Err(SpecError::UnrecognizedSpecKind(other.to_string())),
        }
    }
}

impl From<SpecSource> for SpecDocument {
    fn from(source: SpecSource) -> Self {
        let kind = Some(source.kind().to_string());
        match source {
            SpecSource::Declaration(spec) => SpecDocument {
                kind,
                name: spec.name,
                params: spec.params,
                values: BTreeMap::new(),
            },
            SpecSource::Instance(bound) => SpecDocument {
                kind,
                name: bound.declaration.name,
                params: bound.declaration.params,
                values: bound.values,
            },
            SpecSource::Callable(func) => SpecDocument {
                kind,
                name: func.name,
                params: func.params,
                values: BTreeMap::new(),
            },
        }
    }
}

/// One extracted parameter: classified type, resolved default, and the
/// required flag.
///
/// This is the shared contract consumed by every builder. `required` is
/// `true` exactly when no default was declared and no live value was
/// bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    /// Parameter name.
    pub name: String,
    /// Classified type.
    pub descriptor: TypeDescriptor,
    /// Resolved default (declared default or bound live value), conformed
    /// to the descriptor.
    #[serde(
        default,
        deserialize_with = "declared_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub default: Option<Value>,
    /// Whether the parameter must be supplied.
    pub required: bool,
}

/// Finds an extracted parameter by name.
pub fn find_param<'a>(specs: &'a [ParameterSpec], name: &str) -> Option<&'a ParameterSpec> {
    specs.iter().find(|spec| spec.name == name)
}

/// Extracts the shared [`ParameterSpec`] sequence from any source.
///
/// Classifies every annotation, resolves defaults (bound live values take
/// precedence over declared defaults), conforms each resolved default to
/// its descriptor, and flags parameters with neither as required.
/// Declaration order is preserved.
///
/// # Errors
///
/// Any classification error propagates. Also returns
/// [`SpecError::DuplicateParameter`] for repeated names and
/// [`SpecError::ChoiceDefaultMismatch`] when a default (declared or
/// bound) is not one of a choice's options.
///
/// # Examples
///
/// ```
/// use param_schema_core::{extract, ParamDecl, Specification, SpecSource, Value};
///
/// let spec = Specification::new("MyTap")
///     .with_param(ParamDecl::new("name", "str"))
///     .with_param(ParamDecl::new("agree", "bool").with_default(false));
///
/// let params = extract(&SpecSource::Declaration(spec)).unwrap();
/// assert!(params[0].required);
/// assert_eq!(params[1].default, Some(Value::Bool(false)));
/// ```
pub fn extract(source: &SpecSource) -> Result<Vec<ParameterSpec>> {
    let (decls, values) = match source {
        SpecSource::Declaration(spec) => (&spec.params, None),
        SpecSource::Instance(bound) => (&bound.declaration.params, Some(&bound.values)),
        SpecSource::Callable(func) => (&func.params, None),
    };

    let mut seen: HashSet<&str> = HashSet::new();
    let mut specs = Vec::with_capacity(decls.len());

    for decl in decls {
        if !seen.insert(decl.name.as_str()) {
            return Err(SpecError::DuplicateParameter(decl.name.clone()));
        }
        let descriptor = classify(&decl.annotation)?;

        let resolved = match values.and_then(|bound| bound.get(&decl.name)) {
            Some(live) => Some(live),
            None => decl.default.as_ref(),
        };
        let default = match resolved {
            Some(raw) => Some(resolve_default(&decl.name, &descriptor, raw)?),
            None => None,
        };

        specs.push(ParameterSpec {
            name: decl.name.clone(),
            descriptor,
            required: default.is_none(),
            default,
        });
    }

    debug!(
        source = source.name(),
        kind = source.kind(),
        params = specs.len(),
        "extracted parameter specifications"
    );
    Ok(specs)
}

/// Conforms a resolved default to its descriptor, reporting choice
/// membership violations with the parameter name attached.
fn resolve_default(param: &str, descriptor: &TypeDescriptor, raw: &Value) -> Result<Value> {
    check_choice_membership(param, descriptor, raw)?;
    conform_value(descriptor, raw)
}

fn check_choice_membership(param: &str, descriptor: &TypeDescriptor, value: &Value) -> Result<()> {
    match (descriptor, value) {
        (TypeDescriptor::Optional(_), Value::Null) => Ok(()),
        (TypeDescriptor::Optional(inner), other) => check_choice_membership(param, inner, other),
        (TypeDescriptor::Choice(set), other) => {
            if set.contains(other) {
                Ok(())
            } else {
                Err(SpecError::ChoiceDefaultMismatch {
                    param: param.to_string(),
                    value: format_scalar(other),
                })
            }
        }
        (
            TypeDescriptor::Collection { inner, .. } | TypeDescriptor::VariableTuple(inner),
            Value::List(items) | Value::Set(items) | Value::Tuple(items),
        ) => items
            .iter()
            .try_for_each(|item| check_choice_membership(param, inner, item)),
        (TypeDescriptor::FixedTuple(elements), Value::List(items) | Value::Tuple(items)) => elements
            .iter()
            .zip(items)
            .try_for_each(|(element, item)| check_choice_membership(param, element, item)),
        _ => Ok(()),
    }
}

/// Deserializes a present field into `Some`, keeping `default: null`
/// distinct from an absent `default`.
fn declared_default<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{ChoiceSet, ScalarKind};

    fn sample_spec() -> Specification {
        Specification::new("MyTap")
            .with_param(ParamDecl::new("name", "str"))
            .with_param(ParamDecl::new("age", "int"))
            .with_param(ParamDecl::new("optional_field", "Option<str>").with_default(Value::Null))
            .with_param(
                ParamDecl::new("choice", "Literal[\"Option1\", \"Option2\", \"Option3\"]")
                    .with_default("Option1"),
            )
            .with_param(ParamDecl::new("agree", "bool").with_default(false))
    }

    #[test]
    fn test_extract_declaration() {
        let params = extract(&SpecSource::Declaration(sample_spec())).unwrap();
        assert_eq!(params.len(), 5);

        let name = find_param(&params, "name").unwrap();
        assert!(name.required);
        assert_eq!(name.default, None);

        let optional = find_param(&params, "optional_field").unwrap();
        assert!(!optional.required);
        assert_eq!(optional.default, Some(Value::Null));

        let choice = find_param(&params, "choice").unwrap();
        assert_eq!(choice.default, Some(Value::Str("Option1".into())));
        assert_eq!(
            choice.descriptor,
            TypeDescriptor::Choice(ChoiceSet::Str(vec![
                "Option1".into(),
                "Option2".into(),
                "Option3".into(),
            ]))
        );
    }

    #[test]
    fn test_extract_preserves_declaration_order() {
        let params = extract(&SpecSource::Declaration(sample_spec())).unwrap();
        let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["name", "age", "optional_field", "choice", "agree"]);
    }

    #[test]
    fn test_extract_instance_binds_values() {
        let bound = BoundSpecification::new(sample_spec())
            .with_value("name", "David")
            .with_value("age", 87i64);
        let params = extract(&SpecSource::Instance(bound)).unwrap();

        let name = find_param(&params, "name").unwrap();
        assert!(!name.required);
        assert_eq!(name.default, Some(Value::Str("David".into())));

        let age = find_param(&params, "age").unwrap();
        assert!(!age.required);
        assert_eq!(age.default, Some(Value::Int(87)));

        // Unbound parameters keep their declared behavior.
        let agree = find_param(&params, "agree").unwrap();
        assert_eq!(agree.default, Some(Value::Bool(false)));
    }

    #[test]
    fn test_extract_instance_ignores_unknown_names() {
        let bound = BoundSpecification::new(sample_spec()).with_value("nonsense", 1i64);
        let params = extract(&SpecSource::Instance(bound)).unwrap();
        assert!(find_param(&params, "nonsense").is_none());
        assert_eq!(params.len(), 5);
    }

    #[test]
    fn test_extract_instance_conforms_bound_values() {
        let bound = BoundSpecification::new(sample_spec()).with_value("age", "87");
        let params = extract(&SpecSource::Instance(bound)).unwrap();
        assert_eq!(
            find_param(&params, "age").unwrap().default,
            Some(Value::Int(87))
        );
    }

    #[test]
    fn test_extract_callable() {
        let func = FunctionSpec::new("handler")
            .with_param(ParamDecl::new("query", "str"))
            .with_param(ParamDecl::new("limit", "int").with_default(10i64));
        let params = extract(&SpecSource::Callable(func)).unwrap();
        assert!(params[0].required);
        assert_eq!(params[1].default, Some(Value::Int(10)));
    }

    #[test]
    fn test_extract_rejects_duplicate_names() {
        let spec = Specification::new("Dup")
            .with_param(ParamDecl::new("x", "int"))
            .with_param(ParamDecl::new("x", "str"));
        assert_eq!(
            extract(&SpecSource::Declaration(spec)).unwrap_err(),
            SpecError::DuplicateParameter("x".into())
        );
    }

    #[test]
    fn test_extract_rejects_choice_default_outside_options() {
        let spec = Specification::new("Bad")
            .with_param(ParamDecl::new("mode", "Literal[\"a\", \"b\"]").with_default("c"));
        assert_eq!(
            extract(&SpecSource::Declaration(spec)).unwrap_err(),
            SpecError::ChoiceDefaultMismatch {
                param: "mode".into(),
                value: "c".into()
            }
        );
    }

    #[test]
    fn test_extract_rejects_bound_value_outside_options() {
        let bound = BoundSpecification::new(sample_spec()).with_value("choice", "Option9");
        assert_eq!(
            extract(&SpecSource::Instance(bound)).unwrap_err(),
            SpecError::ChoiceDefaultMismatch {
                param: "choice".into(),
                value: "Option9".into()
            }
        );
    }

    #[test]
    fn test_extract_checks_choice_membership_inside_collections() {
        let spec = Specification::new("Tags").with_param(
            ParamDecl::new("tags", "Set<Literal[\"x\", \"y\"]>")
                .with_default(Value::list(["x".into(), "z".into()])),
        );
        assert!(matches!(
            extract(&SpecSource::Declaration(spec)).unwrap_err(),
            SpecError::ChoiceDefaultMismatch { .. }
        ));
    }

    #[test]
    fn test_extract_conforms_collection_defaults() {
        let spec = Specification::new("Tags").with_param(
            ParamDecl::new("tags", "Set<str>")
                .with_default(Value::list(["b".into(), "a".into(), "b".into()])),
        );
        let params = extract(&SpecSource::Declaration(spec)).unwrap();
        assert_eq!(
            params[0].default,
            Some(Value::set(["b".into(), "a".into()]))
        );
    }

    #[test]
    fn test_extract_rejects_bad_annotation() {
        let spec = Specification::new("Bad").with_param(ParamDecl::new("x", "dict"));
        assert!(matches!(
            extract(&SpecSource::Declaration(spec)).unwrap_err(),
            SpecError::UnrecognizedType { .. }
        ));
    }

    #[test]
    fn test_spec_document_kinds() {
        let doc = r#"{"name": "Untagged", "params": []}"#;
        let source: SpecSource = serde_json::from_str(doc).unwrap();
        assert!(matches!(source, SpecSource::Declaration(_)));

        let doc = r#"{"kind": "function", "name": "handler", "params": []}"#;
        let source: SpecSource = serde_json::from_str(doc).unwrap();
        assert!(matches!(source, SpecSource::Callable(_)));

        let doc = r#"{"kind": "module", "name": "x", "params": []}"#;
        let err = serde_json::from_str::<SpecSource>(doc).unwrap_err();
        assert!(err.to_string().contains("unrecognized specification kind"));
    }

    #[test]
    fn test_spec_source_yaml_round_trip() {
        let bound = BoundSpecification::new(sample_spec()).with_value("age", 87i64);
        let source = SpecSource::Instance(bound);
        let yaml = serde_yaml::to_string(&source).unwrap();
        let back: SpecSource = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, source);
    }

    #[test]
    fn test_param_decl_null_default_survives_yaml() {
        let yaml = "name: optional_field\ntype: Option<str>\ndefault: null\n";
        let decl: ParamDecl = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(decl.default, Some(Value::Null));

        let yaml = "name: required_field\ntype: str\n";
        let decl: ParamDecl = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(decl.default, None);
    }

    #[test]
    fn test_extract_rejects_null_default_on_required_scalar() {
        let spec = Specification::new("Bad")
            .with_param(ParamDecl::new("x", "int").with_default(Value::Null));
        assert!(matches!(
            extract(&SpecSource::Declaration(spec)).unwrap_err(),
            SpecError::ValueMismatch { .. }
        ));
    }

    #[test]
    fn test_descriptor_api_shape() {
        let params = extract(&SpecSource::Declaration(sample_spec())).unwrap();
        let agree = find_param(&params, "agree").unwrap();
        assert_eq!(agree.descriptor.scalar_kind(), Some(ScalarKind::Bool));
    }
}
