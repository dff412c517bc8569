//! End-to-end validation flows.

use paramcast_schema::prelude::*;
use paramcast_schema::{Change, EngineConfig, UnknownKeys, ValidatorRef};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

fn params(value: Value) -> Params {
    Params::from_json(value).unwrap()
}

fn invalid(result: Result<Record, Error>) -> Changeset {
    let err = result.unwrap_err();
    assert!(!err.is_defect(), "expected invalid input, got {err}");
    err.into_changeset().unwrap()
}

fn messages(changeset: &Changeset) -> Vec<(String, String)> {
    changeset
        .errors()
        .iter()
        .map(|e| (e.field.clone(), e.message.to_string()))
        .collect()
}

fn products() -> Module {
    Module::builder("products")
        .schema(
            "create",
            Schema::new()
                .field(Field::required("name", FieldType::String))
                .field(Field::required("price", FieldType::Float))
                .field(
                    Field::optional("category", FieldType::String)
                        .validator(("inclusion", json!(["mobile", "laptop"]))),
                ),
        )
        .build()
}

fn animals() -> Module {
    Module::builder("animals")
        .schema(
            "create",
            Schema::new()
                .field(Field::required("name", FieldType::String))
                .field(Field::required("origin", FieldType::String).droppable()),
        )
        .build()
}

fn orders() -> Module {
    let product = Schema::new()
        .field(Field::required("name", FieldType::String))
        .field(Field::required("price", FieldType::Float));

    Module::builder("orders")
        .schema(
            "create",
            Schema::new()
                .field(Field::optional("note", FieldType::String))
                .embed(Embed::many("products", product.clone()))
                .embed(Embed::one("gift", product)),
        )
        .build()
}

fn cars() -> Module {
    Module::builder("cars")
        .schema(
            "create",
            Schema::new()
                .field(Field::required("brand", FieldType::String))
                .field(Field::required("fuel_source", FieldType::String))
                .callback("eco_friendly"),
        )
        .callback("eco_friendly", |changeset, _input| {
            let eco = matches!(
                changeset.get_field("fuel_source").and_then(Value::as_str),
                Some("electric" | "hydrogen") | None
            );
            Ok(if eco {
                changeset
            } else {
                changeset.add_error("fuel_source", "is not eco-friendly")
            })
        })
        .build()
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn valid_input_casts_to_record() {
    let record = products()
        .validate("create", &params(json!({"name": "iPod", "price": "20.00"})))
        .unwrap();

    assert_eq!(record.to_value(), json!({"name": "iPod", "price": 20.0}));
    assert!(!record.contains("category"));
}

#[test]
fn library_validator_rejects_value() {
    let changeset = invalid(products().validate(
        "create",
        &params(json!({"name": "iPod", "price": "20.00", "category": "desktop"})),
    ));

    assert_eq!(
        changeset.to_error_tree(),
        json!({"valid": false, "errors": {"category": ["is invalid"]}})
    );
}

#[test]
fn droppable_field_is_skipped_when_absent() {
    let record = animals()
        .validate("create", &params(json!({"name": "Cheetah"})))
        .unwrap();
    assert_eq!(record.to_value(), json!({"name": "Cheetah"}));
}

#[test]
fn droppable_field_present_but_blank_is_reported() {
    let changeset = invalid(
        animals().validate("create", &params(json!({"name": "Cheetah", "origin": ""}))),
    );
    assert_eq!(
        messages(&changeset),
        vec![("origin".to_owned(), "can't be blank".to_owned())]
    );
}

#[test]
fn embed_many_reports_each_element() {
    let changeset = invalid(orders().validate(
        "create",
        &params(json!({"products": [
            {"name": "iPod", "price": "20.00"},
            {"name": "iPad", "price": "string"}
        ]})),
    ));

    assert!(changeset.errors().is_empty());
    assert_eq!(
        changeset.to_error_tree(),
        json!({
            "valid": false,
            "errors": {},
            "embeds": {"products": [
                null,
                {"valid": false, "errors": {"price": ["is invalid"]}}
            ]}
        })
    );
}

#[test]
fn callback_adds_errors() {
    let changeset = invalid(cars().validate(
        "create",
        &params(json!({"brand": "Tesla", "fuel_source": "coal"})),
    ));
    assert_eq!(
        messages(&changeset),
        vec![("fuel_source".to_owned(), "is not eco-friendly".to_owned())]
    );

    assert!(
        cars()
            .validate("create", &params(json!({"brand": "Tesla", "fuel_source": "electric"})))
            .is_ok()
    );
}

// ============================================================================
// REQUIRED FIELDS
// ============================================================================

#[rstest]
#[case(json!({}), "is required")]
#[case(json!({"name": null}), "can't be blank")]
#[case(json!({"name": "   "}), "can't be blank")]
#[case(json!({"name": ""}), "can't be blank")]
fn required_messages(#[case] input: Value, #[case] expected: &str) {
    let module = Module::builder("m")
        .schema(
            "a",
            Schema::new().field(Field::required("name", FieldType::String)),
        )
        .build();
    let changeset = invalid(module.validate("a", &params(input)));
    assert_eq!(changeset.errors()[0].message, expected);
}

#[test]
fn required_list_and_map_must_not_be_empty() {
    let module = Module::builder("m")
        .schema(
            "a",
            Schema::new()
                .field(Field::required("tags", FieldType::array_of(FieldType::String)))
                .field(Field::required("meta", FieldType::Map)),
        )
        .build();
    let changeset = invalid(module.validate("a", &params(json!({"tags": [], "meta": {}}))));
    assert_eq!(changeset.errors().len(), 2);
}

#[test]
fn defaults_satisfy_required_fields() {
    let module = Module::builder("m")
        .schema(
            "a",
            Schema::new().field(Field::required("qty", FieldType::Integer).default(json!(1))),
        )
        .build();
    let record = module.validate("a", &Params::new()).unwrap();
    assert_eq!(record.get("qty"), Some(&json!(1)));
}

#[test]
fn uncastable_required_value_reports_only_the_cast_error() {
    let module = Module::builder("m")
        .schema(
            "a",
            Schema::new().field(Field::required("price", FieldType::Float)),
        )
        .build();
    let changeset = invalid(module.validate("a", &params(json!({"price": "cheap"}))));
    let kinds: Vec<&str> = changeset.errors().iter().map(|e| e.kind.label()).collect();
    assert_eq!(kinds, vec!["cast"]);
    assert_eq!(changeset.errors()[0].meta("type"), Some(&json!("float")));
}

#[test]
fn blank_uncastable_required_value_reports_both_errors() {
    let module = Module::builder("m")
        .schema(
            "a",
            Schema::new().field(Field::required("qty", FieldType::Integer)),
        )
        .build();
    let changeset = invalid(module.validate("a", &params(json!({"qty": "   "}))));
    assert_eq!(
        messages(&changeset),
        vec![
            ("qty".to_owned(), "is invalid".to_owned()),
            ("qty".to_owned(), "can't be blank".to_owned()),
        ]
    );
}

#[test]
fn plain_field_typed_embed_is_invalid() {
    let module = Module::builder("m")
        .schema(
            "a",
            Schema::new().field(Field::required("seller", FieldType::Embed)),
        )
        .build();
    let changeset = invalid(module.validate("a", &params(json!({"seller": {"name": "x"}}))));
    assert_eq!(
        messages(&changeset),
        vec![("seller".to_owned(), "is invalid".to_owned())]
    );
}

#[test]
fn required_embeds_are_checked_after_resolution() {
    let module = Module::builder("m")
        .schema(
            "a",
            Schema::new()
                .embed(Embed::one("seller", Schema::new()).required())
                .embed(Embed::many("items", Schema::new()).required()),
        )
        .build();

    let changeset = invalid(module.validate("a", &Params::new()));
    assert_eq!(
        messages(&changeset),
        vec![
            ("seller".to_owned(), "is required".to_owned()),
            ("items".to_owned(), "is required".to_owned()),
        ]
    );

    let changeset = invalid(module.validate("a", &params(json!({"seller": null, "items": []}))));
    assert_eq!(
        messages(&changeset),
        vec![
            ("seller".to_owned(), "can't be blank".to_owned()),
            ("items".to_owned(), "can't be blank".to_owned()),
        ]
    );

    assert!(
        module
            .validate("a", &params(json!({"seller": {}, "items": [{}]})))
            .is_ok()
    );
}

// ============================================================================
// EMBEDS
// ============================================================================

#[test]
fn embed_one_produces_nested_record() {
    let record = orders()
        .validate(
            "create",
            &params(json!({"gift": {"name": "Card", "price": 1}, "products": []})),
        )
        .unwrap();
    assert_eq!(
        record.to_value(),
        json!({"products": [], "gift": {"name": "Card", "price": 1.0}})
    );
}

#[test]
fn embed_one_rejects_non_maps() {
    let changeset = invalid(orders().validate("create", &params(json!({"gift": "card"}))));
    assert_eq!(
        messages(&changeset),
        vec![("gift".to_owned(), "is invalid".to_owned())]
    );
}

#[test]
fn embed_one_invalid_child_is_nested() {
    let changeset = invalid(
        orders().validate("create", &params(json!({"gift": {"name": "Card"}}))),
    );
    assert!(changeset.errors().is_empty());
    assert_eq!(
        changeset.to_error_tree()["embeds"]["gift"],
        json!({"valid": false, "errors": {"price": ["is required"]}})
    );
}

#[test]
fn embed_many_skips_non_sequences() {
    let record = orders()
        .validate("create", &params(json!({"products": "none", "note": "hi"})))
        .unwrap();
    assert_eq!(record.to_value(), json!({"note": "hi"}));
}

#[test]
fn embed_many_flags_non_map_elements_by_index() {
    let changeset = invalid(orders().validate(
        "create",
        &params(json!({"products": [{"name": "a", "price": 1}, 7]})),
    ));
    let Some(Change::Many(children)) = changeset.get_change("products") else {
        panic!("expected an embed-many change");
    };
    assert!(children[0].is_valid());
    assert_eq!(
        messages(&children[1]),
        vec![("products".to_owned(), "is invalid".to_owned())]
    );
}

#[test]
fn nested_embeds_recurse() {
    let module = Module::builder("m")
        .schema(
            "a",
            Schema::new().embed(Embed::one(
                "order",
                Schema::new().embed(Embed::many(
                    "lines",
                    Schema::new().field(Field::required("qty", FieldType::Integer)),
                )),
            )),
        )
        .build();

    let record = module
        .validate("a", &params(json!({"order": {"lines": [{"qty": "2"}]}})))
        .unwrap();
    assert_eq!(record.to_value(), json!({"order": {"lines": [{"qty": 2}]}}));

    let changeset = invalid(module.validate("a", &params(json!({"order": {"lines": [{}]}}))));
    assert_eq!(
        changeset.to_error_tree()["embeds"]["order"]["embeds"]["lines"][0]["errors"],
        json!({"qty": ["is required"]})
    );
}

// ============================================================================
// VALIDATORS AND CALLBACKS
// ============================================================================

#[test]
fn caller_validator_runs_when_library_lacks_it() {
    let module = Module::builder("m")
        .schema(
            "a",
            Schema::new().field(Field::optional("sku", FieldType::String).validator("uppercase")),
        )
        .validator("uppercase", 2, |changeset, field, _args| {
            let lower = changeset
                .get_change_value(field)
                .and_then(Value::as_str)
                .is_some_and(|s| s.chars().any(char::is_lowercase));
            Ok(if lower {
                changeset.add_error(field.to_owned(), "must be uppercase")
            } else {
                changeset
            })
        })
        .build();

    assert!(module.validate("a", &params(json!({"sku": "ABC"}))).is_ok());
    let changeset = invalid(module.validate("a", &params(json!({"sku": "abc"}))));
    assert_eq!(changeset.errors()[0].message, "must be uppercase");
}

#[test]
fn library_wins_when_arity_matches() {
    let module = Module::builder("m")
        .schema(
            "a",
            Schema::new().field(
                Field::optional("category", FieldType::String)
                    .validator(("inclusion", json!(["mobile"]))),
            ),
        )
        .validator("inclusion", 3, |changeset, field, _| {
            Ok(changeset.add_error(field.to_owned(), "caller version"))
        })
        .validator("inclusion", 2, |changeset, field, _| {
            Ok(changeset.add_error(field.to_owned(), "arity two"))
        })
        .build();

    let changeset = invalid(module.validate("a", &params(json!({"category": "desktop"}))));
    assert_eq!(changeset.errors()[0].message, "is invalid");
}

#[test]
fn caller_function_used_when_library_arity_differs() {
    let module = Module::builder("m")
        .schema(
            "a",
            Schema::new().field(Field::optional("x", FieldType::String).validator("inclusion")),
        )
        .validator("inclusion", 2, |changeset, field, _| {
            Ok(changeset.add_error(field.to_owned(), "caller version"))
        })
        .build();

    let changeset = invalid(module.validate("a", &params(json!({"x": "y"}))));
    assert_eq!(changeset.errors()[0].message, "caller version");
}

#[test]
fn validators_run_on_fields_with_cast_errors() {
    let seen = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let counter = seen.clone();
    let module = Module::builder("m")
        .schema(
            "a",
            Schema::new().field(Field::optional("n", FieldType::Integer).validator("count")),
        )
        .validator("count", 2, move |changeset, _, _| {
            counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok(changeset)
        })
        .build();

    let _ = module.validate("a", &params(json!({"n": "x"})));
    assert_eq!(seen.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[test]
fn dropped_fields_do_not_run_validators() {
    let module = Module::builder("m")
        .schema(
            "a",
            Schema::new().field(
                Field::optional("origin", FieldType::String)
                    .validator("missing_everywhere")
                    .droppable(),
            ),
        )
        .build();

    assert!(module.validate("a", &Params::new()).is_ok());
    let err = module
        .validate("a", &params(json!({"origin": "x"})))
        .unwrap_err();
    assert_eq!(err.code(), "PARAMCAST_UNKNOWN_VALIDATOR");
}

#[test]
fn validator_messages_can_be_overridden() {
    let module = Module::builder("m")
        .schema(
            "a",
            Schema::new().field(Field::optional("name", FieldType::String).validator(
                ValidatorRef::new("exclusion")
                    .arg(json!(["admin"]))
                    .opts(json!({"message": "is taken"})),
            )),
        )
        .build();

    let changeset = invalid(module.validate("a", &params(json!({"name": "admin"}))));
    assert_eq!(changeset.errors()[0].message, "is taken");
}

#[test]
fn function_errors_are_defects() {
    let module = Module::builder("m")
        .schema(
            "a",
            Schema::new().field(
                Field::optional("x", FieldType::String).validator(("inclusion", json!("oops"))),
            ),
        )
        .build();
    let err = module
        .validate("a", &params(json!({"x": "y"})))
        .unwrap_err();
    assert!(err.is_defect());
    assert_eq!(err.category(), "function");
}

#[test]
fn missing_callback_is_a_defect() {
    let module = Module::builder("m")
        .schema("a", Schema::new().callback("nowhere"))
        .build();
    let err = module.validate("a", &Params::new()).unwrap_err();
    assert_eq!(err.code(), "PARAMCAST_UNKNOWN_CALLBACK");
}

#[test]
fn callbacks_run_per_embed_level_with_raw_input() {
    let module = Module::builder("m")
        .schema(
            "a",
            Schema::new().embed(Embed::many(
                "items",
                Schema::new()
                    .field(Field::optional("sku", FieldType::String))
                    .callback("stamp"),
            )),
        )
        .callback("stamp", |mut changeset, input| {
            let raw_keys = input.len();
            changeset.put_change("raw_keys", json!(raw_keys));
            Ok(changeset)
        })
        .build();

    let record = module
        .validate("a", &params(json!({"items": [{"sku": "a", "extra": 1}, {}]})))
        .unwrap();
    assert_eq!(
        record.to_value(),
        json!({"items": [{"sku": "a", "raw_keys": 2}, {"raw_keys": 0}]})
    );
}

// ============================================================================
// INPUT KEYS AND CONFIG
// ============================================================================

#[test]
fn extra_keys_are_ignored_by_default() {
    let record = products()
        .validate(
            "create",
            &params(json!({"name": "iPod", "price": 1, "colour": "red"})),
        )
        .unwrap();
    assert!(!record.contains("colour"));
}

#[test]
fn extra_keys_can_be_rejected_at_every_level() {
    let module = Module::builder("m")
        .schema(
            "a",
            Schema::new()
                .field(Field::optional("name", FieldType::String))
                .embed(Embed::one("seller", Schema::new())),
        )
        .config(EngineConfig::default().unknown_keys(UnknownKeys::Reject))
        .build();

    let changeset = invalid(module.validate(
        "a",
        &params(json!({"name": "x", "colour": "red", "seller": {"rating": 5}})),
    ));
    assert_eq!(
        changeset.to_error_tree(),
        json!({
            "valid": false,
            "errors": {"colour": ["is unknown"]},
            "embeds": {"seller": {"valid": false, "errors": {"rating": ["is unknown"]}}}
        })
    );
}

#[test]
fn symbol_keys_are_accepted() {
    let input = Params::new()
        .with_sym("name", json!("iPod"))
        .with_sym("price", json!(3));
    let record = products().validate("create", &input).unwrap();
    assert_eq!(record.to_value(), json!({"name": "iPod", "price": 3.0}));
}

#[test]
fn string_keys_win_over_symbol_keys() {
    let input = Params::new()
        .with_sym("name", json!("symbol"))
        .with("name", json!("string"))
        .with("price", json!(1));
    let record = products().validate("create", &input).unwrap();
    assert_eq!(record.get("name"), Some(&json!("string")));
}

#[test]
fn trimming_is_configurable() {
    let module = Module::builder("m")
        .schema(
            "a",
            Schema::new().field(Field::required("name", FieldType::String)),
        )
        .config(EngineConfig::default().trim_strings(true))
        .build();

    let record = module
        .validate("a", &params(json!({"name": "  iPod "})))
        .unwrap();
    assert_eq!(record.get("name"), Some(&json!("iPod")));

    let changeset = invalid(module.validate("a", &params(json!({"name": "   "}))));
    assert_eq!(changeset.errors()[0].message, "can't be blank");
}

#[test]
fn spec_introspection_reflects_droppable_filtering() {
    let module = animals();
    let spec = module.spec("create", &Params::new()).unwrap();
    assert_eq!(spec.permitted, vec!["name"]);

    let spec = module
        .spec("create", &Params::new().with_sym("origin", json!("Africa")))
        .unwrap();
    assert_eq!(spec.permitted, vec!["name", "origin"]);
    assert_eq!(spec.required, vec!["name", "origin"]);
}

#[test]
fn registry_dispatches_by_module() {
    let registry = Registry::new().with(products()).with(cars());
    assert!(
        registry
            .validate("products", "create", &params(json!({"name": "a", "price": 1})))
            .is_ok()
    );
    let err = registry
        .validate("trucks", "create", &Params::new())
        .unwrap_err();
    assert_eq!(err.code(), "PARAMCAST_UNKNOWN_MODULE");
}

#[test]
fn modules_validate_concurrently() {
    let module = std::sync::Arc::new(products());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let module = module.clone();
            std::thread::spawn(move || {
                let input = Params::new()
                    .with("name", json!(format!("item-{i}")))
                    .with("price", json!(i));
                module.validate("create", &input).map(|r| r.len())
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap().unwrap(), 2);
    }
}
