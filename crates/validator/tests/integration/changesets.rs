use paramcast_validator::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn cast_into(changeset: &mut Changeset, field: &str, ty: &FieldType, raw: Value) {
    changeset.put_param(field, raw.clone());
    match cast(ty, &raw) {
        Ok(value) => changeset.put_change(field, value),
        Err(_) => changeset.push_error(FieldError::cast(field, ty)),
    }
}

#[test]
fn cast_then_validate_through_the_library() {
    let library = Builtins::new();
    let mut changeset = Changeset::default();
    cast_into(&mut changeset, "price", &FieldType::Float, json!("20.00"));
    cast_into(&mut changeset, "category", &FieldType::String, json!("desktop"));

    let number = library.lookup("number", 3).unwrap();
    let changeset = number(changeset, "price", &[json!({"greater_than": 0})]).unwrap();
    assert!(changeset.is_valid());

    let inclusion = library.lookup("inclusion", 3).unwrap();
    let changeset = inclusion(changeset, "category", &[json!(["mobile", "laptop"])]).unwrap();

    assert!(!changeset.is_valid());
    assert_eq!(
        changeset.to_error_tree(),
        json!({"valid": false, "errors": {"category": ["is invalid"]}})
    );
}

#[test]
fn cast_failure_is_recorded_without_a_change() {
    let mut changeset = Changeset::default();
    cast_into(&mut changeset, "price", &FieldType::Float, json!("string"));

    assert!(!changeset.is_valid());
    assert!(changeset.get_change("price").is_none());
    assert!(changeset.has_param("price"));
    assert_eq!(changeset.errors()[0].kind, ErrorKind::Cast);
}

#[test]
fn validators_chain_and_accumulate_errors() {
    let library = Builtins::new();
    let mut changeset = Changeset::default();
    cast_into(&mut changeset, "name", &FieldType::String, json!("x"));
    cast_into(&mut changeset, "terms", &FieldType::Boolean, json!("false"));

    let steps: [(&str, Vec<Value>); 2] = [
        ("length", vec![json!({"min": 2})]),
        ("acceptance", vec![]),
    ];
    let fields = ["name", "terms"];

    let changeset = steps
        .iter()
        .zip(fields)
        .try_fold(changeset, |cs, ((name, args), field)| {
            let f = library.lookup(name, args.len() + 2).unwrap();
            f(cs, field, args.as_slice())
        })
        .unwrap();

    let fields: Vec<&str> = changeset
        .errors()
        .iter()
        .map(|e| e.field.as_str())
        .collect();
    assert_eq!(fields, vec!["name", "terms"]);
}

#[test]
fn custom_library_can_extend_builtins() {
    let library = Builtins::new().with("even", 2, |mut cs, field, _| {
        let odd = cs
            .get_change_value(field)
            .and_then(Value::as_i64)
            .is_some_and(|n| n % 2 != 0);
        if odd {
            cs.push_error(FieldError::from_validation(
                field,
                ValidationError::new("even", "must be even"),
            ));
        }
        Ok(cs)
    });

    assert!(library.exports_fn("even", 2));
    assert!(library.exports_fn("inclusion", 3));

    let mut changeset = Changeset::default();
    changeset.put_change("qty", json!(3));
    let even = library.lookup("even", 2).unwrap();
    let changeset = even(changeset, "qty", &[]).unwrap();
    assert_eq!(changeset.errors()[0].kind.label(), "even");
}

#[test]
fn params_resolve_string_keys_before_symbols() {
    let params = Params::new()
        .with_sym("name", json!("symbol"))
        .with("name", json!("string"));
    assert_eq!(params.get("name"), Some(&json!("string")));
    assert_eq!(params.len(), 2);
}
