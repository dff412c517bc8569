use paramcast_validator::{Change, Changeset};
use serde_json::{Map, Value};

use crate::record::Record;

/// Turn a valid changeset into a record.
///
/// Fields keep declaration order: a change wins, else a non-null default,
/// else the field is left out. Changes to undeclared names (put there by a
/// callback) follow in the order they were made.
pub(crate) fn apply(changeset: &Changeset) -> Record {
    let mut fields = Map::new();
    for (name, default) in changeset.data() {
        match changeset.get_change(name) {
            Some(change) => {
                fields.insert(name.clone(), change_value(change));
            }
            None if !default.is_null() => {
                fields.insert(name.clone(), default.clone());
            }
            None => {}
        }
    }
    for (name, change) in changeset.changes() {
        if !changeset.data().contains_key(name) {
            fields.insert(name.clone(), change_value(change));
        }
    }
    Record::from_map(fields)
}

fn change_value(change: &Change) -> Value {
    match change {
        Change::Value(value) => value.clone(),
        Change::One(child) => apply(child).into_value(),
        Change::Many(children) => {
            Value::Array(children.iter().map(|c| apply(c).into_value()).collect())
        }
    }
}
