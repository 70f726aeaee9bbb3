//! Validation model construction and payload binding.
//!
//! [`build_model`] turns an extracted parameter sequence into a
//! [`ValidationModel`]: one field per parameter with an explicit
//! required-or-default marker. The model validates payloads by
//! collecting every problem rather than stopping at the first, and
//! instantiation fills declared defaults for omitted fields the same way
//! on every entry path.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use param_schema_core::{ParameterSpec, SpecError, TypeDescriptor, Value, conform_value};

use crate::error::{ModelError, PayloadError, Result};

/// Inbound payload: field name to native or wire value.
pub type Payload = BTreeMap<String, Value>;

/// Default marker for one model field.
///
/// Distinguishes "must be supplied" from "has a default", including the
/// default `Null` (for optional fields declared absent).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldDefault {
    /// No default; the payload must supply the field.
    Required,
    /// Stored default substituted when the payload omits the field.
    Value(Value),
}

impl FieldDefault {
    /// Whether this marker means the field must be supplied.
    pub fn is_required(&self) -> bool {
        matches!(self, FieldDefault::Required)
    }
}

/// One field of a validation model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelField {
    /// Field name.
    pub name: String,
    /// Classified type the field validates against.
    pub descriptor: TypeDescriptor,
    /// Required marker or stored default.
    pub default: FieldDefault,
}

/// A validation model derived from a parameter specification.
///
/// Building is pure: two models built from the same parameters are
/// structurally equal, and the model holds no state between calls.
///
/// # Examples
///
/// ```
/// use param_schema_core::{extract, ParamDecl, Specification, SpecSource};
/// use param_schema_model::build_model;
///
/// let spec = Specification::new("MyTap")
///     .with_param(ParamDecl::new("name", "str"))
///     .with_param(ParamDecl::new("age", "int"));
/// let params = extract(&SpecSource::Declaration(spec)).unwrap();
///
/// let model = build_model("MyTap", &params);
/// assert_eq!(model.name, "MyTapModel");
/// assert!(model.find_field("age").unwrap().default.is_required());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationModel {
    /// Model name: the specification name with a `Model` suffix.
    pub name: String,
    /// Fields in declaration order.
    pub fields: Vec<ModelField>,
}

/// One bound field of an instantiated model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundField {
    /// Field name.
    pub name: String,
    /// Conformed native value.
    pub value: Value,
}

/// A payload successfully bound against a model, defaults filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInstance {
    /// Name of the model this instance satisfies.
    pub model: String,
    /// Bound values in field declaration order.
    pub values: Vec<BoundField>,
}

impl ModelInstance {
    /// Looks up a bound value by field name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|bound| bound.name == name)
            .map(|bound| &bound.value)
    }

    /// Dumps the bound mapping as a JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        let entries = self.values.iter().map(|bound| {
            let value = serde_json::to_value(&bound.value).unwrap_or(serde_json::Value::Null);
            (bound.name.clone(), value)
        });
        serde_json::Value::Object(entries.collect())
    }
}

/// Builds a validation model from extracted parameters.
///
/// The model is named `{spec_name}Model`. Parameters with a resolved
/// default become optional fields carrying that default; the rest are
/// marked required.
pub fn build_model(spec_name: &str, params: &[ParameterSpec]) -> ValidationModel {
    let fields = params
        .iter()
        .map(|param| ModelField {
            name: param.name.clone(),
            descriptor: param.descriptor.clone(),
            default: match &param.default {
                Some(value) => FieldDefault::Value(value.clone()),
                None => FieldDefault::Required,
            },
        })
        .collect::<Vec<_>>();

    let model = ValidationModel {
        name: format!("{spec_name}Model"),
        fields,
    };
    debug!(
        model = %model.name,
        fields = model.fields.len(),
        "built validation model"
    );
    model
}

impl ValidationModel {
    /// Finds a field by name.
    pub fn find_field(&self, name: &str) -> Option<&ModelField> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Validates a payload, returning every problem found.
    ///
    /// An empty vector means the payload is acceptable. Unknown payload
    /// keys are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use param_schema_core::{extract, ParamDecl, Specification, SpecSource, Value};
    /// use param_schema_model::{build_model, Payload};
    ///
    /// let spec = Specification::new("T").with_param(ParamDecl::new("name", "str"));
    /// let model = build_model("T", &extract(&SpecSource::Declaration(spec)).unwrap());
    ///
    /// assert_eq!(model.validate_payload(&Payload::new()).len(), 1);
    ///
    /// let mut payload = Payload::new();
    /// payload.insert("name".into(), Value::Str("x".into()));
    /// assert!(model.validate_payload(&payload).is_empty());
    /// ```
    pub fn validate_payload(&self, payload: &Payload) -> Vec<PayloadError> {
        match self.instantiate(payload) {
            Ok(_) => Vec::new(),
            Err(ModelError::Rejected(errors)) => errors,
        }
    }

    /// Binds a payload against the model, filling defaults for omitted
    /// optional fields.
    ///
    /// Every field goes through the same conformance path whether the
    /// payload value is native or wire text, so defaults and coercions
    /// behave identically for JSON payloads, form submissions, and
    /// widget output.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Rejected`] carrying every [`PayloadError`]
    /// found; a rejected payload binds nothing.
    pub fn instantiate(&self, payload: &Payload) -> Result<ModelInstance> {
        let mut errors = Vec::new();
        let mut values = Vec::with_capacity(self.fields.len());

        for field in &self.fields {
            match payload.get(&field.name) {
                Some(raw) => match bind_field(field, raw) {
                    Ok(value) => values.push(BoundField {
                        name: field.name.clone(),
                        value,
                    }),
                    Err(err) => errors.push(err),
                },
                None => match &field.default {
                    FieldDefault::Value(default) => values.push(BoundField {
                        name: field.name.clone(),
                        value: default.clone(),
                    }),
                    FieldDefault::Required => errors.push(PayloadError::MissingRequired {
                        param: field.name.clone(),
                    }),
                },
            }
        }

        if !errors.is_empty() {
            return Err(ModelError::Rejected(errors));
        }
        debug!(model = %self.name, fields = values.len(), "instantiated model");
        Ok(ModelInstance {
            model: self.name.clone(),
            values,
        })
    }
}

/// Conforms one supplied value to its field.
///
/// An empty wire string means absence for `Optional` fields and for
/// container fields (which fall back to their default rather than
/// becoming an empty container); a required `str` field keeps it as a
/// present empty string.
fn bind_field(field: &ModelField, raw: &Value) -> std::result::Result<Value, PayloadError> {
    if raw.as_str().is_some_and(str::is_empty) {
        if field.descriptor.is_optional() {
            return Ok(Value::Null);
        }
        if is_container(&field.descriptor) {
            return match &field.default {
                FieldDefault::Value(default) => Ok(default.clone()),
                FieldDefault::Required => Err(PayloadError::MissingRequired {
                    param: field.name.clone(),
                }),
            };
        }
    }

    conform_value(&field.descriptor, raw).map_err(|err| payload_error(&field.name, err))
}

fn is_container(descriptor: &TypeDescriptor) -> bool {
    matches!(
        descriptor,
        TypeDescriptor::Collection { .. }
            | TypeDescriptor::FixedTuple(_)
            | TypeDescriptor::VariableTuple(_)
    )
}

fn payload_error(param: &str, err: SpecError) -> PayloadError {
    match err {
        SpecError::InvalidChoiceValue { value, options } => PayloadError::InvalidChoice {
            param: param.to_string(),
            value,
            options,
        },
        SpecError::InvalidScalar { expected, text } => PayloadError::InvalidWire {
            param: param.to_string(),
            detail: format!("cannot parse '{text}' as {expected}"),
        },
        SpecError::ValueMismatch { expected, found } => PayloadError::TypeMismatch {
            param: param.to_string(),
            expected,
            found,
        },
        other => PayloadError::InvalidWire {
            param: param.to_string(),
            detail: other.to_string(),
        },
    }
}
