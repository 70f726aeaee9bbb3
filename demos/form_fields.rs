//! Form field planning example.
//!
//! Derives server-side form fields from a specification, prints the plan,
//! and shows the explicit rejection of types a flat form cannot carry.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p param-schema-demos --example form_fields
//! ```

use param_schema_core::{ParamDecl, SpecSource, Specification, extract};
use param_schema_form::render_form;

fn main() {
    let spec = Specification::new("ContactTap")
        .with_param(ParamDecl::new("name", "str"))
        .with_param(ParamDecl::new("age", "int"))
        .with_param(
            ParamDecl::new("topic", "Literal[\"sales\", \"support\"]").with_default("support"),
        )
        .with_param(ParamDecl::new("subscribe", "bool").with_default(false));
    let params = extract(&SpecSource::Declaration(spec)).unwrap();

    let plan = render_form("ContactTap", &params).unwrap();
    println!("Form '{}':", plan.name);
    for field in &plan.fields {
        let marker = if field.required { "required" } else { "optional" };
        println!("  {:<12} {:<10} {marker}", field.name, field.kind.name());
    }
    println!();
    println!("Submit actions:");
    for action in &plan.submits {
        println!("  [{}] -> {}", action.label, action.kind);
    }
    println!();

    // Collections have no flat form equivalent; the plan fails loudly
    // instead of dropping the field.
    let wide = Specification::new("WideTap")
        .with_param(ParamDecl::new("name", "str"))
        .with_param(ParamDecl::new("tags", "Vec<str>"));
    let params = extract(&SpecSource::Declaration(wide)).unwrap();
    match render_form("WideTap", &params) {
        Ok(_) => unreachable!("collections are not form-renderable"),
        Err(err) => println!("WideTap refused: {err}"),
    }
    println!();

    // The plan is plain data for whatever renders the HTML
    println!("As JSON:");
    println!("{}", serde_json::to_string_pretty(&plan).unwrap());
}
