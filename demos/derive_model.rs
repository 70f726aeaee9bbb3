//! Validation model derivation example.
//!
//! Demonstrates the core pipeline: declare a parameter specification (or
//! load one from YAML), extract it into `ParameterSpec`s, build a
//! `ValidationModel`, and run payloads through it.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p param-schema-demos --example derive_model
//! ```

use param_schema_core::{ParamDecl, SpecSource, Specification, extract};
use param_schema_model::build_model;

const SPEC_YAML: &str = r#"kind: class
name: MyTap
params:
  - name: name
    type: str
  - name: age
    type: int
  - name: choice
    type: 'Literal["Option1", "Option2", "Option3"]'
    default: Option1
  - name: agree
    type: bool
    default: false
"#;

fn main() {
    // A specification can be assembled in code...
    let spec = Specification::new("MyTap")
        .with_param(ParamDecl::new("name", "str"))
        .with_param(ParamDecl::new("age", "int"))
        .with_param(
            ParamDecl::new("choice", "Literal[\"Option1\", \"Option2\", \"Option3\"]")
                .with_default("Option1"),
        )
        .with_param(ParamDecl::new("agree", "bool").with_default(false));

    // ...or loaded from a document. Both roads lead to the same extraction.
    let loaded: SpecSource = serde_yaml::from_str(SPEC_YAML).unwrap();
    let params = extract(&SpecSource::Declaration(spec)).unwrap();
    assert_eq!(params, extract(&loaded).unwrap());

    println!("Extracted {} parameter(s) from MyTap:", params.len());
    for param in &params {
        let marker = if param.required { "required" } else { "optional" };
        println!("  {:<10} {:<40} {marker}", param.name, param.descriptor.to_string());
    }
    println!();

    // Build the validation model
    let model = build_model("MyTap", &params);
    println!("Model '{}' with {} field(s)", model.name, model.fields.len());
    println!();

    // A payload missing a required field is rejected with the full error list
    let mut payload = param_schema_model::Payload::new();
    payload.insert("age".into(), 5.into());
    let errors = model.validate_payload(&payload);
    println!("Validating {{age: 5}}:");
    for error in &errors {
        println!("  rejected: {error}");
    }
    println!();

    // A complete payload instantiates, with defaults filled in
    let mut payload = param_schema_model::Payload::new();
    payload.insert("name".into(), "David".into());
    payload.insert("age".into(), 87.into());
    let instance = model.instantiate(&payload).unwrap();
    println!("Validating {{name: David, age: 87}}:");
    println!(
        "  accepted: {}",
        serde_json::to_string(&instance.to_json()).unwrap()
    );
    println!();

    // Wire strings coerce on the way in
    let mut payload = param_schema_model::Payload::new();
    payload.insert("name".into(), "David".into());
    payload.insert("age".into(), "87".into());
    payload.insert("agree".into(), "true".into());
    let instance = model.instantiate(&payload).unwrap();
    println!("Validating wire strings {{age: \"87\", agree: \"true\"}}:");
    println!("  age   -> {:?}", instance.get("age").unwrap());
    println!("  agree -> {:?}", instance.get("agree").unwrap());
    println!();

    // The model also emits a JSON Schema document
    println!("JSON Schema:");
    println!(
        "{}",
        serde_json::to_string_pretty(&model.json_schema()).unwrap()
    );
}
