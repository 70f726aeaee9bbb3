//! Form field planning.
//!
//! [`render_form`] maps extracted parameters onto server-side form fields.
//! The dispatch covers the flat subset of types a plain HTML form can
//! carry: scalars, string literal sets, and optional wrappers of those.
//! Anything requiring structured input (collections, tuples) is refused
//! with [`FormError::UnsupportedField`] so the caller knows the plan is
//! incomplete instead of silently losing a field.

use param_schema_core::{ChoiceSet, ParameterSpec, ScalarKind, TypeDescriptor, Value};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FormError, Result};

/// The visual and validation kind of one form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Free text input.
    Text,
    /// Whole number input.
    Integer,
    /// Real number input.
    Float,
    /// Single checkbox.
    Checkbox,
    /// Dropdown over a fixed option list.
    Select { options: Vec<String> },
}

impl FieldKind {
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Integer => "integer",
            FieldKind::Float => "float",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Select { .. } => "select",
        }
    }
}

/// One planned form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    /// Parameter name, doubling as the form input name.
    pub name: String,
    /// Field kind to render.
    pub kind: FieldKind,
    /// Whether submission without this field must be rejected.
    pub required: bool,
    /// Initial value, when the parameter declared a non-null default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

/// Transport a submit button routes the form through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitKind {
    PostJson,
    Get,
    PostForm,
}

impl std::fmt::Display for SubmitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PostJson => write!(f, "post_json"),
            Self::Get => write!(f, "get"),
            Self::PostForm => write!(f, "post_form"),
        }
    }
}

/// A labelled submit button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitAction {
    pub label: String,
    pub kind: SubmitKind,
}

impl SubmitAction {
    fn new(label: &str, kind: SubmitKind) -> Self {
        SubmitAction {
            label: label.to_string(),
            kind,
        }
    }
}

/// A complete form plan: fields in declaration order plus the submit row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormPlan {
    /// Form title, taken from the specification name.
    pub name: String,
    pub fields: Vec<FormField>,
    pub submits: Vec<SubmitAction>,
}

impl FormPlan {
    /// Finds a planned field by parameter name.
    pub fn find_field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// Plans one form field per parameter.
///
/// # Errors
///
/// Returns [`FormError::UnsupportedField`] for any parameter whose type
/// falls outside the form subset, naming the offending parameter and its
/// annotation.
///
/// # Examples
///
/// ```
/// use param_schema_core::{extract, ParamDecl, Specification, SpecSource};
/// use param_schema_form::{render_form, FieldKind};
///
/// let spec = Specification::new("MyTap")
///     .with_param(ParamDecl::new("name", "str"))
///     .with_param(ParamDecl::new("agree", "bool").with_default(false));
/// let params = extract(&SpecSource::Declaration(spec)).unwrap();
///
/// let plan = render_form("MyTap", &params).unwrap();
/// assert_eq!(plan.fields.len(), 2);
/// assert_eq!(plan.find_field("name").unwrap().kind, FieldKind::Text);
/// assert!(plan.find_field("name").unwrap().required);
/// assert_eq!(plan.submits.len(), 3);
/// ```
pub fn render_form(name: &str, specs: &[ParameterSpec]) -> Result<FormPlan> {
    let mut fields = Vec::with_capacity(specs.len());
    for spec in specs {
        fields.push(FormField {
            name: spec.name.clone(),
            kind: field_kind(spec)?,
            required: spec.required,
            default: spec.default.clone().filter(|value| !value.is_null()),
        });
    }
    debug!(form = %name, fields = fields.len(), "planned form fields");

    Ok(FormPlan {
        name: name.to_string(),
        fields,
        submits: vec![
            SubmitAction::new("Send POST JSON", SubmitKind::PostJson),
            SubmitAction::new("Send GET Request", SubmitKind::Get),
            SubmitAction::new("Send POST Form", SubmitKind::PostForm),
        ],
    })
}

fn field_kind(spec: &ParameterSpec) -> Result<FieldKind> {
    match spec.descriptor.unwrap_optional() {
        TypeDescriptor::Scalar(ScalarKind::Str) => Ok(FieldKind::Text),
        TypeDescriptor::Scalar(ScalarKind::Int) => Ok(FieldKind::Integer),
        TypeDescriptor::Scalar(ScalarKind::Float) => Ok(FieldKind::Float),
        TypeDescriptor::Scalar(ScalarKind::Bool) => Ok(FieldKind::Checkbox),
        TypeDescriptor::Choice(ChoiceSet::Bool(_)) => Ok(FieldKind::Checkbox),
        TypeDescriptor::Choice(set) => Ok(FieldKind::Select {
            options: set.labels(),
        }),
        unsupported => Err(FormError::UnsupportedField {
            param: spec.name.clone(),
            annotation: unsupported.to_string(),
        }),
    }
}
