use paramcast_validator::prelude::*;
use proptest::prelude::*;
use serde_json::json;

proptest! {
    #[test]
    fn integer_strings_cast_to_integers(n in any::<i64>()) {
        let cast = cast(&FieldType::Integer, &json!(n.to_string())).unwrap();
        prop_assert_eq!(cast, json!(n));
    }

    #[test]
    fn strings_never_cast_to_maps(s in ".*") {
        prop_assert!(cast(&FieldType::Map, &json!(s)).is_err());
    }

    #[test]
    fn any_accepts_every_string(s in ".*") {
        prop_assert_eq!(cast(&FieldType::Any, &json!(s.clone())).unwrap(), json!(s));
    }

    #[test]
    fn length_is_idempotent(s in ".{0,20}", min in 0usize..10) {
        let v = Length::new().min(min);
        prop_assert_eq!(v.validate(&json!(s.clone())).is_ok(), v.validate(&json!(s)).is_ok());
    }

    #[test]
    fn length_matches_char_count(s in ".{0,20}", min in 0usize..10, max in 10usize..20) {
        let v = Length::new().min(min).max(max);
        let n = s.chars().count();
        prop_assert_eq!(v.validate(&json!(s)).is_ok(), n >= min && n <= max);
    }

    #[test]
    fn validity_is_never_regained(messages in proptest::collection::vec("[a-z]{1,8}", 1..5)) {
        let mut changeset = Changeset::default();
        for message in messages {
            changeset = changeset.add_error("field", message);
            changeset.put_change("field", json!(1));
            prop_assert!(!changeset.is_valid());
        }
        changeset.delete_change("field");
        prop_assert!(!changeset.is_valid());
    }

    #[test]
    fn inclusion_accepts_exactly_the_allowed(n in 0i64..10) {
        let allowed: Vec<_> = (0..5).map(|i| json!(i)).collect();
        let v = Inclusion::new(allowed);
        prop_assert_eq!(v.validate(&json!(n)).is_ok(), n < 5);
    }
}
