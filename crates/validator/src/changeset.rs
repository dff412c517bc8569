//! The working validation state for one schema level.
//!
//! A [`Changeset`] starts from the declared defaults (`data`), accumulates the
//! successfully cast input (`changes`) and every error found along the way.
//! Validators and callbacks take a changeset by value and hand back an updated
//! one, so each stage is a plain transform.
//!
//! Invariant: a changeset is valid iff it has no errors of its own and none of
//! its embedded changesets is invalid. Validity can be lost but never regained.

use std::borrow::Cow;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::{ErrorKind, FieldError};
use crate::types::FieldType;

/// A recorded change for one field.
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    /// A cast scalar, list or map value.
    Value(Value),
    /// The result of an `embed-one` field.
    One(Box<Changeset>),
    /// The results of an `embed-many` field, in input order.
    Many(Vec<Changeset>),
}

impl Change {
    /// The plain value, when this is not an embed.
    #[must_use]
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Whether this change, or any embedded changeset in it, is invalid.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        match self {
            Self::Value(_) => false,
            Self::One(child) => !child.is_valid(),
            Self::Many(children) => children.iter().any(|c| !c.is_valid()),
        }
    }
}

/// Validation state: defaults, cast changes, errors and validity.
#[derive(Debug, Clone, PartialEq)]
pub struct Changeset {
    valid: bool,
    data: IndexMap<String, Value>,
    types: IndexMap<String, FieldType>,
    params: IndexMap<String, Value>,
    changes: IndexMap<String, Change>,
    errors: Vec<FieldError>,
}

impl Default for Changeset {
    fn default() -> Self {
        Self {
            valid: true,
            data: IndexMap::new(),
            types: IndexMap::new(),
            params: IndexMap::new(),
            changes: IndexMap::new(),
            errors: Vec::new(),
        }
    }
}

impl Changeset {
    /// A valid changeset over the given defaults and field types.
    #[must_use]
    pub fn new(data: IndexMap<String, Value>, types: IndexMap<String, FieldType>) -> Self {
        Self {
            data,
            types,
            ..Self::default()
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Whether the changeset (including every embed) is valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Declared defaults.
    #[must_use]
    pub fn data(&self) -> &IndexMap<String, Value> {
        &self.data
    }

    /// Declared field types.
    #[must_use]
    pub fn types(&self) -> &IndexMap<String, FieldType> {
        &self.types
    }

    /// Raw input values of permitted fields, keyed by field name.
    #[must_use]
    pub fn params(&self) -> &IndexMap<String, Value> {
        &self.params
    }

    /// Recorded changes.
    #[must_use]
    pub fn changes(&self) -> &IndexMap<String, Change> {
        &self.changes
    }

    /// This level's own errors (embedded errors live in the embedded changesets).
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Errors recorded for one field.
    pub fn errors_on<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldError> + 'a {
        self.errors.iter().filter(move |e| e.field == field)
    }

    /// The change recorded for a field.
    #[must_use]
    pub fn get_change(&self, field: &str) -> Option<&Change> {
        self.changes.get(field)
    }

    /// The plain value change for a field, ignoring `null`.
    #[must_use]
    pub fn get_change_value(&self, field: &str) -> Option<&Value> {
        self.changes
            .get(field)
            .and_then(Change::as_value)
            .filter(|v| !v.is_null())
    }

    /// The effective plain value of a field: its change, else its default.
    ///
    /// Returns `None` for absent and `null` values and for embeds.
    #[must_use]
    pub fn get_field(&self, field: &str) -> Option<&Value> {
        let value = match self.changes.get(field) {
            Some(Change::Value(v)) => Some(v),
            Some(_) => None,
            None => self.data.get(field),
        };
        value.filter(|v| !v.is_null())
    }

    /// Whether the raw input contained this field.
    #[must_use]
    pub fn has_param(&self, field: &str) -> bool {
        self.params.contains_key(field)
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Record the raw input value of a permitted field.
    pub fn put_param(&mut self, field: impl Into<String>, value: Value) {
        self.params.insert(field.into(), value);
    }

    /// Record a cast value.
    ///
    /// A value equal to the field's default is not a change, so any earlier
    /// change is removed instead.
    pub fn put_change(&mut self, field: impl Into<String>, value: Value) {
        let field = field.into();
        let default = self.data.get(&field).unwrap_or(&Value::Null);
        if *default == value {
            self.changes.shift_remove(&field);
        } else {
            self.changes.insert(field, Change::Value(value));
        }
    }

    /// Record the result of an `embed-one` field; an invalid child invalidates
    /// this changeset.
    pub fn put_embed(&mut self, field: impl Into<String>, child: Changeset) {
        if !child.is_valid() {
            self.valid = false;
        }
        self.changes.insert(field.into(), Change::One(Box::new(child)));
    }

    /// Record the results of an `embed-many` field; any invalid element
    /// invalidates this changeset.
    pub fn put_embeds(&mut self, field: impl Into<String>, children: Vec<Changeset>) {
        if children.iter().any(|c| !c.is_valid()) {
            self.valid = false;
        }
        self.changes.insert(field.into(), Change::Many(children));
    }

    /// Remove a change, returning it.
    ///
    /// Removing an invalid embed does not restore validity.
    pub fn delete_change(&mut self, field: &str) -> Option<Change> {
        self.changes.shift_remove(field)
    }

    /// Record an error and mark the changeset invalid.
    pub fn push_error(&mut self, error: FieldError) {
        tracing::trace!(
            field = %error.field,
            kind = error.kind.label(),
            message = %error.message,
            "field error"
        );
        self.errors.push(error);
        self.valid = false;
    }

    /// Add a custom validation error (builder-style, consuming).
    ///
    /// Intended for caller-supplied validators and callbacks.
    #[must_use]
    pub fn add_error(
        mut self,
        field: impl Into<String>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.push_error(FieldError::new(
            field,
            message,
            ErrorKind::Validation {
                validator: Cow::Borrowed("custom"),
            },
        ));
        self
    }

    /// Mark the changeset invalid without attaching an error.
    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Render the error tree as JSON.
    ///
    /// ```json
    /// {
    ///   "valid": false,
    ///   "errors": {"price": ["is invalid"]},
    ///   "embeds": {"products": [null, {"valid": false, "errors": {...}}]}
    /// }
    /// ```
    ///
    /// Valid embed elements render as `null` so indices line up with the
    /// input; valid `embed-one` children are left out.
    #[must_use]
    pub fn to_error_tree(&self) -> Value {
        let mut errors: Map<String, Value> = Map::new();
        for error in &self.errors {
            let messages = errors
                .entry(error.field.clone())
                .or_insert_with(|| Value::Array(Vec::new()));
            if let Value::Array(list) = messages {
                list.push(Value::String(error.message.to_string()));
            }
        }

        let mut embeds: Map<String, Value> = Map::new();
        for (field, change) in &self.changes {
            match change {
                Change::One(child) if !child.is_valid() => {
                    embeds.insert(field.clone(), child.to_error_tree());
                }
                Change::Many(children) if children.iter().any(|c| !c.is_valid()) => {
                    let items = children
                        .iter()
                        .map(|c| {
                            if c.is_valid() {
                                Value::Null
                            } else {
                                c.to_error_tree()
                            }
                        })
                        .collect();
                    embeds.insert(field.clone(), Value::Array(items));
                }
                _ => {}
            }
        }

        let mut tree = Map::new();
        tree.insert("valid".into(), Value::Bool(self.valid));
        tree.insert("errors".into(), Value::Object(errors));
        if !embeds.is_empty() {
            tree.insert("embeds".into(), Value::Object(embeds));
        }
        Value::Object(tree)
    }
}
