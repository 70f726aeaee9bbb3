//! End-to-end tests: specification in, validated model instance out.

use param_schema_core::{
    BoundSpecification, ParamDecl, SpecSource, Specification, Value, extract,
};
use param_schema_model::{Payload, PayloadError, build_model};

fn scenario_spec() -> Specification {
    Specification::new("MyTap")
        .with_param(ParamDecl::new("name", "str"))
        .with_param(ParamDecl::new("age", "int"))
        .with_param(
            ParamDecl::new("choice", "Literal[\"Option1\", \"Option2\", \"Option3\"]")
                .with_default("Option1"),
        )
}

#[test]
fn test_scenario_rejects_partial_payload() {
    let params = extract(&SpecSource::Declaration(scenario_spec())).unwrap();
    let model = build_model("MyTap", &params);

    let mut payload = Payload::new();
    payload.insert("age".into(), Value::Int(5));

    let errors = model.validate_payload(&payload);
    assert_eq!(
        errors,
        vec![PayloadError::MissingRequired {
            param: "name".into()
        }]
    );
    assert!(model.instantiate(&payload).is_err());
}

#[test]
fn test_scenario_accepts_complete_payload() {
    let params = extract(&SpecSource::Declaration(scenario_spec())).unwrap();
    let model = build_model("MyTap", &params);

    let mut payload = Payload::new();
    payload.insert("name".into(), Value::Str("David".into()));
    payload.insert("age".into(), Value::Int(87));

    let instance = model.instantiate(&payload).unwrap();
    assert_eq!(instance.model, "MyTapModel");
    assert_eq!(instance.get("name"), Some(&Value::Str("David".into())));
    assert_eq!(instance.get("age"), Some(&Value::Int(87)));
    assert_eq!(instance.get("choice"), Some(&Value::Str("Option1".into())));
}

#[test]
fn test_bound_instance_needs_no_payload() {
    // Binding live values upstream makes every field optional downstream.
    let bound = BoundSpecification::new(scenario_spec())
        .with_value("name", "David")
        .with_value("age", 87i64);
    let params = extract(&SpecSource::Instance(bound)).unwrap();
    let model = build_model("MyTap", &params);

    let instance = model.instantiate(&Payload::new()).unwrap();
    assert_eq!(instance.get("name"), Some(&Value::Str("David".into())));
    assert_eq!(instance.get("age"), Some(&Value::Int(87)));
}

#[test]
fn test_serialized_document_to_model_pipeline() {
    let doc = r#"
    {
        "kind": "class",
        "name": "MyTap",
        "params": [
            { "name": "name", "type": "str" },
            { "name": "age", "type": "int" },
            { "name": "optional_field", "type": "Option<str>", "default": null },
            { "name": "agree", "type": "bool", "default": false }
        ]
    }
    "#;
    let source: SpecSource = serde_json::from_str(doc).unwrap();
    let params = extract(&source).unwrap();
    let model = build_model(source.name(), &params);

    let schema = model.json_schema();
    assert_eq!(schema["title"], "MyTapModel");
    assert_eq!(schema["required"], serde_json::json!(["name", "age"]));

    let mut payload = Payload::new();
    payload.insert("name".into(), Value::Str("David".into()));
    payload.insert("age".into(), Value::Str("87".into()));

    let instance = model.instantiate(&payload).unwrap();
    assert_eq!(instance.get("age"), Some(&Value::Int(87)));
    assert_eq!(instance.get("optional_field"), Some(&Value::Null));
    assert_eq!(instance.get("agree"), Some(&Value::Bool(false)));

    let json = instance.to_json();
    assert_eq!(json["name"], serde_json::json!("David"));
    assert_eq!(json["agree"], serde_json::json!(false));
}

#[test]
fn test_model_serde_round_trip() {
    let params = extract(&SpecSource::Declaration(scenario_spec())).unwrap();
    let model = build_model("MyTap", &params);

    let json = serde_json::to_string(&model).unwrap();
    let back: param_schema_model::ValidationModel = serde_json::from_str(&json).unwrap();
    assert_eq!(back, model);
}
