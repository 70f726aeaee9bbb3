//! Interactive input planning example.
//!
//! Walks through a widget session: plan controls for a specification,
//! render once with no state (defaults only), then feed user input back
//! in and collect the typed values.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p param-schema-demos --example widget_session
//! ```

use param_schema_core::{ParamDecl, SpecSource, Specification, Value, extract};
use param_schema_widgets::{InputState, RawInput, render};

fn main() {
    let spec = Specification::new("SurveyTap")
        .with_param(ParamDecl::new("name", "str"))
        .with_param(ParamDecl::new("birthday", "str").with_default("1990-01-01"))
        .with_param(ParamDecl::new("score", "float").with_default(0.75))
        .with_param(
            ParamDecl::new("color", "Literal[\"red\", \"green\", \"blue\"]")
                .with_default("green"),
        )
        .with_param(ParamDecl::new("tags", "Set<str>"))
        .with_param(ParamDecl::new("window", "(int, int)"))
        .with_param(ParamDecl::new("note", "Option<str>").with_default(Value::Null));
    let params = extract(&SpecSource::Declaration(spec)).unwrap();

    // First render: no widget state exists yet
    let first = render(&params, &InputState::new(), false).unwrap();
    println!("Planned {} control(s):", first.controls.len());
    for planned in &first.controls {
        println!("  {:<12} {}", planned.name, planned.control.kind_name());
    }
    println!();
    println!("Still missing after first render: {:?}", first.missing);
    println!();

    // Simulate the user filling in the widgets. Numeric, date, and toggle
    // widgets hand back typed values; only text widgets carry strings.
    let mut state = InputState::new();
    state.insert("name".into(), RawInput::Text("David".into()));
    state.insert(
        "birthday".into(),
        RawInput::Date(chrono_date(1987, 6, 15)),
    );
    state.insert("score".into(), RawInput::Float(Some(0.9)));
    state.insert("color".into(), RawInput::Select("blue".into()));
    state.insert("tags".into(), RawInput::Text("rust\nforms\nrust".into()));
    state.insert("window.0".into(), RawInput::Int(Some(800)));
    state.insert("window.1".into(), RawInput::Int(Some(600)));
    state.insert("note".into(), RawInput::Text("".into()));

    let second = render(&params, &state, true).unwrap();
    println!("Collected values:");
    for (name, value) in &second.values {
        println!("  {name:<10} = {value:?}");
    }
    println!();
    println!("Complete: {}", second.is_complete());

    // The set deduplicated, the tuple assembled from its sub-controls, and
    // the empty optional text became absence rather than ""
    assert_eq!(
        second.values["tags"],
        Value::set(["rust".into(), "forms".into()])
    );
    assert_eq!(
        second.values["window"],
        Value::tuple([Value::Int(800), Value::Int(600)])
    );
    assert_eq!(second.values["note"], Value::Null);

    // The whole run serializes for a rendering layer to consume
    println!();
    println!("As JSON:");
    println!("{}", serde_json::to_string_pretty(&second).unwrap());
}

fn chrono_date(year: i32, month: u32, day: u32) -> Option<chrono::NaiveDate> {
    chrono::NaiveDate::from_ymd_opt(year, month, day)
}
