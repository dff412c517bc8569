//! Properties that hold for every schema and input.

use paramcast_schema::prelude::*;
use proptest::prelude::*;
use serde_json::{Value, json};

fn field_names() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::btree_set("[a-z]{1,8}", 1..6).prop_map(|s| s.into_iter().collect())
}

fn module_with(schema: Schema) -> Module {
    Module::builder("m").schema("a", schema).build()
}

proptest! {
    #[test]
    fn empty_input_reports_every_required_field(names in field_names()) {
        let schema = names
            .iter()
            .fold(Schema::new(), |s, n| s.field(Field::required(n.as_str(), FieldType::String)));
        let err = module_with(schema).validate("a", &Params::new()).unwrap_err();
        let changeset = err.changeset().unwrap();

        for name in &names {
            prop_assert!(changeset.errors_on(name).any(|e| e.message == "is required"));
        }
    }

    #[test]
    fn valid_input_round_trips(values in proptest::collection::vec(any::<i32>(), 1..6)) {
        let names: Vec<String> = (0..values.len()).map(|i| format!("f{i}")).collect();
        let schema = names
            .iter()
            .fold(Schema::new(), |s, n| s.field(Field::required(n.as_str(), FieldType::Integer)))
            .field(Field::optional("fallback", FieldType::String).default(json!("x")));

        let input = names
            .iter()
            .zip(&values)
            .fold(Params::new(), |p, (n, v)| p.with(n.as_str(), json!(v.to_string())));

        let record = module_with(schema).validate("a", &input).unwrap();
        for (name, value) in names.iter().zip(&values) {
            prop_assert_eq!(record.get(name), Some(&json!(value)));
        }
        prop_assert_eq!(record.get("fallback"), Some(&json!("x")));
    }

    #[test]
    fn absent_droppable_fields_leave_no_trace(
        ty in prop_oneof![
            Just(FieldType::String),
            Just(FieldType::Integer),
            Just(FieldType::Map),
            Just(FieldType::array_of(FieldType::Float)),
        ],
        required in any::<bool>(),
    ) {
        let field = if required {
            Field::required("maybe", ty)
        } else {
            Field::optional("maybe", ty)
        };
        let module = module_with(
            Schema::new()
                .field(Field::required("name", FieldType::String))
                .field(field.droppable()),
        );
        let input = Params::new().with("name", json!("x"));

        prop_assert!(!module.spec("a", &input).unwrap().permits("maybe"));
        let record = module.validate("a", &input).unwrap();
        prop_assert!(!record.contains("maybe"));
    }

    #[test]
    fn every_embed_element_is_evaluated(bad_index in 0usize..3) {
        let module = module_with(Schema::new().embed(Embed::many(
            "items",
            Schema::new().field(Field::required("price", FieldType::Float)),
        )));
        let items: Vec<Value> = (0..3)
            .map(|i| if i == bad_index { json!({"price": "nope"}) } else { json!({"price": i}) })
            .collect();

        let err = module
            .validate("a", &Params::new().with("items", Value::Array(items)))
            .unwrap_err();
        let tree = err.changeset().unwrap().to_error_tree();
        let elements = tree["embeds"]["items"].as_array().unwrap();

        prop_assert_eq!(elements.len(), 3);
        for (i, element) in elements.iter().enumerate() {
            prop_assert_eq!(element.is_null(), i != bad_index);
        }
    }

    #[test]
    fn extra_keys_never_reach_the_record(extra in "[a-z]{9,12}", value in any::<i64>()) {
        let module = module_with(Schema::new().field(Field::optional("name", FieldType::String)));
        let input = Params::new().with("name", json!("x")).with(extra.as_str(), json!(value));
        let record = module.validate("a", &input).unwrap();
        prop_assert!(!record.contains(&extra));
        prop_assert_eq!(record.len(), 1);
    }
}
