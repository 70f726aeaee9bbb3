//! JSON Schema emission for validation models.

use serde_json::{Value as Json, json};

use param_schema_core::{ChoiceSet, ContainerKind, ScalarKind, TypeDescriptor};

use crate::model::{FieldDefault, ValidationModel};

impl ValidationModel {
    /// Emits a JSON Schema object describing this model.
    ///
    /// Descriptors map to standard schema forms: scalars to primitive
    /// types, choices to `enum`, `Optional` to an `anyOf` with `null`,
    /// collections to `array` (`Set` adding `uniqueItems`), fixed tuples
    /// to `prefixItems` with pinned arity. Declared defaults are carried
    /// on each property and required fields are listed in `required`.
    ///
    /// # Examples
    ///
    /// ```
    /// use param_schema_core::{extract, ParamDecl, Specification, SpecSource};
    /// use param_schema_model::build_model;
    ///
    /// let spec = Specification::new("T")
    ///     .with_param(ParamDecl::new("name", "str"))
    ///     .with_param(ParamDecl::new("agree", "bool").with_default(false));
    /// let model = build_model("T", &extract(&SpecSource::Declaration(spec)).unwrap());
    ///
    /// let schema = model.json_schema();
    /// assert_eq!(schema["title"], "TModel");
    /// assert_eq!(schema["properties"]["name"]["type"], "string");
    /// assert_eq!(schema["required"], serde_json::json!(["name"]));
    /// ```
    pub fn json_schema(&self) -> Json {
        let mut properties = serde_json::Map::new();
        let mut required: Vec<Json> = Vec::new();

        for field in &self.fields {
            let mut schema = descriptor_schema(&field.descriptor);
            match &field.default {
                FieldDefault::Required => required.push(json!(field.name)),
                FieldDefault::Value(default) => {
                    if let Json::Object(map) = &mut schema {
                        map.insert(
                            "default".to_string(),
                            serde_json::to_value(default).unwrap_or(Json::Null),
                        );
                    }
                }
            }
            properties.insert(field.name.clone(), schema);
        }

        json!({
            "title": self.name,
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

fn descriptor_schema(descriptor: &TypeDescriptor) -> Json {
    match descriptor {
        TypeDescriptor::Scalar(kind) => json!({ "type": scalar_type_name(*kind) }),
        TypeDescriptor::Optional(inner) => json!({
            "anyOf": [descriptor_schema(inner), { "type": "null" }],
        }),
        TypeDescriptor::Choice(set) => match set {
            ChoiceSet::Str(options) => json!({ "type": "string", "enum": options }),
            ChoiceSet::Bool(options) => json!({ "type": "boolean", "enum": options }),
        },
        TypeDescriptor::Collection { container, inner } => {
            let mut schema = json!({ "type": "array", "items": descriptor_schema(inner) });
            if *container == ContainerKind::Set {
                if let Json::Object(map) = &mut schema {
                    map.insert("uniqueItems".to_string(), json!(true));
                }
            }
            schema
        }
        TypeDescriptor::FixedTuple(elements) => json!({
            "type": "array",
            "prefixItems": elements.iter().map(descriptor_schema).collect::<Vec<_>>(),
            "minItems": elements.len(),
            "maxItems": elements.len(),
        }),
        TypeDescriptor::VariableTuple(inner) => json!({
            "type": "array",
            "items": descriptor_schema(inner),
        }),
    }
}

fn scalar_type_name(kind: ScalarKind) -> &'static str {
    match kind {
        ScalarKind::Str => "string",
        ScalarKind::Int => "integer",
        ScalarKind::Float => "number",
        ScalarKind::Bool => "boolean",
    }
}
