//! Named validators, dispatched by `(name, arity)`.
//!
//! A named validator is a function `(Changeset, field, args) -> Changeset`.
//! Its arity counts the changeset and the field name, so `inclusion` called
//! with an allowed list has arity 3, and with an extra options map arity 4.
//!
//! The engine asks a [`ValidatorLibrary`] whether it exports `(name, arity)`
//! before falling back to caller-supplied functions. [`Builtins`] is the
//! library shipped with this crate:
//!
//! | name         | arity | argument                                        |
//! |--------------|-------|-------------------------------------------------|
//! | `required`   | 2, 3  | options                                         |
//! | `inclusion`  | 3, 4  | allowed list, options                           |
//! | `exclusion`  | 3, 4  | reserved list, options                          |
//! | `subset`     | 3, 4  | allowed list, options                           |
//! | `format`     | 3, 4  | regex string, options                           |
//! | `length`     | 3     | `{min, max, is, message}`                       |
//! | `number`     | 3     | `{greater_than, less_than, ..., message}`       |
//! | `acceptance` | 2, 3  | options                                         |
//!
//! The only option understood everywhere is `message`, which replaces the
//! default error message.
//!
//! Except for `required`, built-ins only look at fields that carry a non-null
//! change: defaults and absent fields are never validated.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::cast;
use crate::changeset::Changeset;
use crate::error::{CastError, FieldError, FunctionError};
use crate::foundation::{Validate, ValidationError};
use crate::types::FieldType;
use crate::validators::{
    Acceptance, Bound, Exclusion, Format, Inclusion, Length, NumberBounds, Subset,
};

/// A named validator or validator-shaped function.
///
/// Receives the changeset, the field name, and the extra arguments (zero to
/// two values). Returns the updated changeset, or a [`FunctionError`] when
/// the function itself cannot run.
pub type ValidatorFn =
    Arc<dyn Fn(Changeset, &str, &[Value]) -> Result<Changeset, FunctionError> + Send + Sync>;

/// A source of type coercion and named validators.
pub trait ValidatorLibrary: fmt::Debug + Send + Sync {
    /// The validator exported as `name` with the given arity, if any.
    fn lookup(&self, name: &str, arity: usize) -> Option<ValidatorFn>;

    /// Every exported `(name, arity)` pair.
    fn exports(&self) -> Vec<(String, usize)>;

    /// Whether `(name, arity)` is exported.
    fn exports_fn(&self, name: &str, arity: usize) -> bool {
        self.lookup(name, arity).is_some()
    }

    /// Casts a raw value to a field type.
    fn cast(&self, ty: &FieldType, value: &Value) -> Result<Value, CastError> {
        cast::cast(ty, value)
    }
}

// ============================================================================
// BUILTINS
// ============================================================================

/// The built-in validator library.
///
/// # Examples
///
/// ```rust
/// use paramcast_validator::{Builtins, Changeset, ValidatorLibrary};
/// use serde_json::json;
///
/// let library = Builtins::new();
/// assert!(library.exports_fn("inclusion", 3));
/// assert!(!library.exports_fn("inclusion", 2));
///
/// let mut changeset = Changeset::default();
/// changeset.put_change("name", json!("x"));
/// let length = library.lookup("length", 3).unwrap();
/// let changeset = length(changeset, "name", &[json!({"min": 2})]).unwrap();
/// assert_eq!(changeset.errors()[0].message, "should be at least 2 character(s)");
/// ```
#[derive(Clone)]
pub struct Builtins {
    table: IndexMap<String, IndexMap<usize, ValidatorFn>>,
}

impl Builtins {
    /// The standard set of built-in validators.
    #[must_use]
    pub fn new() -> Self {
        Self::empty()
            .with("required", 2, required)
            .with("required", 3, required)
            .with("inclusion", 3, inclusion)
            .with("inclusion", 4, inclusion)
            .with("exclusion", 3, exclusion)
            .with("exclusion", 4, exclusion)
            .with("subset", 3, subset)
            .with("subset", 4, subset)
            .with("format", 3, format)
            .with("format", 4, format)
            .with("length", 3, length)
            .with("number", 3, number)
            .with("acceptance", 2, acceptance)
            .with("acceptance", 3, acceptance)
    }

    /// A library exporting nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            table: IndexMap::new(),
        }
    }

    /// Export `f` as `(name, arity)`, replacing any previous export.
    #[must_use]
    pub fn with<F>(mut self, name: impl Into<String>, arity: usize, f: F) -> Self
    where
        F: Fn(Changeset, &str, &[Value]) -> Result<Changeset, FunctionError>
            + Send
            + Sync
            + 'static,
    {
        self.table
            .entry(name.into())
            .or_default()
            .insert(arity, Arc::new(f));
        self
    }
}

impl Default for Builtins {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Builtins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builtins")
            .field("exports", &self.exports())
            .finish()
    }
}

impl ValidatorLibrary for Builtins {
    fn lookup(&self, name: &str, arity: usize) -> Option<ValidatorFn> {
        self.table.get(name)?.get(&arity).cloned()
    }

    fn exports(&self) -> Vec<(String, usize)> {
        self.table
            .iter()
            .flat_map(|(name, arities)| arities.keys().map(move |a| (name.clone(), *a)))
            .collect()
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Whether a value counts as blank: `null`, a whitespace-only string, or an
/// empty list or map.
#[must_use]
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Runs a value-level validator against the field's change, if there is one.
///
/// `message` replaces the validator's own message on failure.
pub fn validate_change<V>(
    mut changeset: Changeset,
    field: &str,
    validator: &V,
    message: Option<&str>,
) -> Changeset
where
    V: Validate<Input = Value>,
{
    let Some(value) = changeset.get_change_value(field) else {
        return changeset;
    };
    if let Err(error) = validator.validate(value) {
        changeset.push_error(field_error(field, error, message));
    }
    changeset
}

fn field_error(field: &str, error: ValidationError, message: Option<&str>) -> FieldError {
    let error = match message {
        Some(message) => error.with_message(message.to_owned()),
        None => error,
    };
    FieldError::from_validation(field, error)
}

fn options<'a>(
    function: &'static str,
    arg: Option<&'a Value>,
) -> Result<Option<&'a Map<String, Value>>, FunctionError> {
    match arg {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(other) => Err(FunctionError::bad_argument(
            function,
            format!("expected an options map, got {other}"),
        )),
    }
}

fn message_option(opts: Option<&Map<String, Value>>) -> Option<&str> {
    opts?.get("message")?.as_str()
}

fn list_argument(
    function: &'static str,
    arg: Option<&Value>,
) -> Result<Vec<Value>, FunctionError> {
    match arg {
        Some(Value::Array(items)) => Ok(items.clone()),
        Some(other) => Err(FunctionError::bad_argument(
            function,
            format!("expected a list, got {other}"),
        )),
        None => Err(FunctionError::bad_argument(function, "missing list argument")),
    }
}

// ============================================================================
// BUILT-IN FUNCTIONS
// ============================================================================

/// `required/2,3`: the field must have a non-blank effective value.
///
/// Reports `"is required"` when the key never appeared in the input and
/// `"can't be blank"` when it did.
pub fn required(
    mut changeset: Changeset,
    field: &str,
    args: &[Value],
) -> Result<Changeset, FunctionError> {
    let opts = options("required", args.first())?;
    let blank = changeset.get_field(field).is_none_or(is_blank);
    if blank {
        let mut error = if changeset.has_param(field) {
            FieldError::blank(field)
        } else {
            FieldError::missing(field)
        };
        if let Some(message) = message_option(opts) {
            error.message = message.to_owned().into();
        }
        changeset.push_error(error);
    }
    Ok(changeset)
}

/// `inclusion/3,4`: the change must be one of the allowed values.
pub fn inclusion(
    changeset: Changeset,
    field: &str,
    args: &[Value],
) -> Result<Changeset, FunctionError> {
    let allowed = list_argument("inclusion", args.first())?;
    let opts = options("inclusion", args.get(1))?;
    Ok(validate_change(
        changeset,
        field,
        &Inclusion::new(allowed),
        message_option(opts),
    ))
}

/// `exclusion/3,4`: the change must not be one of the reserved values.
pub fn exclusion(
    changeset: Changeset,
    field: &str,
    args: &[Value],
) -> Result<Changeset, FunctionError> {
    let reserved = list_argument("exclusion", args.first())?;
    let opts = options("exclusion", args.get(1))?;
    Ok(validate_change(
        changeset,
        field,
        &Exclusion::new(reserved),
        message_option(opts),
    ))
}

/// `subset/3,4`: every element of the list change must be allowed.
pub fn subset(
    changeset: Changeset,
    field: &str,
    args: &[Value],
) -> Result<Changeset, FunctionError> {
    let allowed = list_argument("subset", args.first())?;
    let opts = options("subset", args.get(1))?;
    Ok(validate_change(
        changeset,
        field,
        &Subset::new(allowed),
        message_option(opts),
    ))
}

/// `format/3,4`: the string change must match the regex.
pub fn format(
    mut changeset: Changeset,
    field: &str,
    args: &[Value],
) -> Result<Changeset, FunctionError> {
    let pattern = args
        .first()
        .and_then(Value::as_str)
        .ok_or_else(|| FunctionError::bad_argument("format", "expected a regex string"))?;
    let validator = Format::new(pattern)
        .map_err(|e| FunctionError::bad_argument("format", e.to_string()))?;
    let opts = options("format", args.get(1))?;

    let Some(value) = changeset.get_change_value(field) else {
        return Ok(changeset);
    };
    let result = match value.as_str() {
        Some(s) => validator.validate(s),
        None => Err(ValidationError::invalid_format(pattern)),
    };
    if let Err(error) = result {
        changeset.push_error(field_error(field, error, message_option(opts)));
    }
    Ok(changeset)
}

/// `length/3`: the string or list change must satisfy `{min, max, is}`.
pub fn length(
    changeset: Changeset,
    field: &str,
    args: &[Value],
) -> Result<Changeset, FunctionError> {
    let opts = options("length", args.first())?
        .ok_or_else(|| FunctionError::bad_argument("length", "missing options"))?;

    let bound = |key: &str| -> Result<Option<usize>, FunctionError> {
        match opts.get(key) {
            None => Ok(None),
            Some(v) => v
                .as_u64()
                .map(|n| Some(n as usize))
                .ok_or_else(|| {
                    FunctionError::bad_argument(
                        "length",
                        format!("`{key}` must be a non-negative integer"),
                    )
                }),
        }
    };
    let validator = Length {
        min: bound("min")?,
        max: bound("max")?,
        is: bound("is")?,
    };
    if validator.is_unbounded() {
        return Err(FunctionError::bad_argument(
            "length",
            "expected at least one of `min`, `max`, `is`",
        ));
    }

    Ok(validate_change(changeset, field, &validator, message_option(Some(opts))))
}

/// `number/3`: the numeric change must satisfy every given bound.
pub fn number(
    changeset: Changeset,
    field: &str,
    args: &[Value],
) -> Result<Changeset, FunctionError> {
    let opts = options("number", args.first())?
        .ok_or_else(|| FunctionError::bad_argument("number", "missing options"))?;

    let mut bounds = Vec::new();
    for (key, value) in opts {
        if key == "message" {
            continue;
        }
        let n = value.as_f64().ok_or_else(|| {
            FunctionError::bad_argument("number", format!("`{key}` must be a number"))
        })?;
        let bound = Bound::from_option(key, n).ok_or_else(|| {
            FunctionError::bad_argument("number", format!("unknown option `{key}`"))
        })?;
        bounds.push(bound);
    }

    Ok(validate_change(
        changeset,
        field,
        &NumberBounds::new(bounds),
        message_option(Some(opts)),
    ))
}

/// `acceptance/2,3`: the change must be `true`.
pub fn acceptance(
    changeset: Changeset,
    field: &str,
    args: &[Value],
) -> Result<Changeset, FunctionError> {
    let opts = options("acceptance", args.first())?;
    Ok(validate_change(changeset, field, &Acceptance, message_option(opts)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn changed(field: &str, value: Value) -> Changeset {
        let mut changeset = Changeset::default();
        changeset.put_change(field, value);
        changeset
    }

    fn call(name: &str, changeset: Changeset, field: &str, args: &[Value]) -> Changeset {
        let library = Builtins::new();
        let f = library.lookup(name, args.len() + 2).unwrap();
        f(changeset, field, args).unwrap()
    }

    fn messages(changeset: &Changeset) -> Vec<String> {
        changeset
            .errors()
            .iter()
            .map(|e| e.message.to_string())
            .collect()
    }

    #[test]
    fn exports_are_listed_by_arity() {
        let library = Builtins::new();
        let exports = library.exports();
        assert!(exports.contains(&("inclusion".to_owned(), 3)));
        assert!(exports.contains(&("inclusion".to_owned(), 4)));
        assert!(!exports.contains(&("length".to_owned(), 4)));
    }

    #[test]
    fn with_replaces_existing_exports() {
        let library =
            Builtins::new().with("inclusion", 3, |cs, _, _| Ok(cs.add_error("x", "replaced")));
        let f = library.lookup("inclusion", 3).unwrap();
        let cs = f(Changeset::default(), "x", &[json!([])]).unwrap();
        assert_eq!(messages(&cs), vec!["replaced"]);
    }

    #[test]
    fn inclusion_rejects_value_outside_list() {
        let cs = call(
            "inclusion",
            changed("category", json!("desktop")),
            "category",
            &[json!(["mobile", "laptop"])],
        );
        assert!(!cs.is_valid());
        assert_eq!(messages(&cs), vec!["is invalid"]);
    }

    #[test]
    fn inclusion_skips_absent_fields() {
        let cs = call(
            "inclusion",
            Changeset::default(),
            "category",
            &[json!(["mobile", "laptop"])],
        );
        assert!(cs.is_valid());
    }

    #[test]
    fn message_option_overrides() {
        let cs = call(
            "exclusion",
            changed("name", json!("admin")),
            "name",
            &[json!(["admin"]), json!({"message": "is taken"})],
        );
        assert_eq!(messages(&cs), vec!["is taken"]);
    }

    #[test]
    fn bad_arguments_are_function_errors() {
        let library = Builtins::new();
        let inclusion = library.lookup("inclusion", 3).unwrap();
        let err = inclusion(Changeset::default(), "x", &[json!("mobile")]).unwrap_err();
        assert!(matches!(err, FunctionError::BadArgument { .. }));

        let length = library.lookup("length", 3).unwrap();
        assert!(length(Changeset::default(), "x", &[json!({})]).is_err());
        assert!(length(Changeset::default(), "x", &[json!({"min": -1})]).is_err());

        let format = library.lookup("format", 3).unwrap();
        assert!(format(Changeset::default(), "x", &[json!("(")]).is_err());

        let number = library.lookup("number", 3).unwrap();
        assert!(number(Changeset::default(), "x", &[json!({"between": 1})]).is_err());
    }

    #[test]
    fn required_distinguishes_missing_from_blank() {
        let cs = call("required", Changeset::default(), "name", &[]);
        assert_eq!(messages(&cs), vec!["is required"]);

        let mut blank = Changeset::default();
        blank.put_param("name", json!("   "));
        let cs = call("required", blank, "name", &[]);
        assert_eq!(messages(&cs), vec!["can't be blank"]);
    }

    #[test]
    fn required_accepts_defaults() {
        let cs = Changeset::new(
            [("qty".to_owned(), json!(1))].into_iter().collect(),
            IndexMap::new(),
        );
        assert!(call("required", cs, "qty", &[]).is_valid());
    }

    #[test]
    fn format_checks_strings() {
        let cs = call(
            "format",
            changed("email", json!("nope")),
            "email",
            &[json!("@")],
        );
        assert_eq!(messages(&cs), vec!["has invalid format"]);

        let cs = call(
            "format",
            changed("email", json!(12)),
            "email",
            &[json!("@")],
        );
        assert!(!cs.is_valid());
    }

    #[test]
    fn length_and_number() {
        let cs = call(
            "length",
            changed("name", json!("a")),
            "name",
            &[json!({"min": 2})],
        );
        assert_eq!(messages(&cs), vec!["should be at least 2 character(s)"]);

        let cs = call(
            "number",
            changed("price", json!(0.0)),
            "price",
            &[json!({"greater_than": 0, "message": "must be positive"})],
        );
        assert_eq!(messages(&cs), vec!["must be positive"]);
    }

    #[test]
    fn acceptance_requires_true() {
        let cs = call("acceptance", changed("terms", json!(false)), "terms", &[]);
        assert_eq!(messages(&cs), vec!["must be accepted"]);
    }

    #[test]
    fn blank_values() {
        assert!(is_blank(&json!(null)));
        assert!(is_blank(&json!(" \t")));
        assert!(is_blank(&json!([])));
        assert!(is_blank(&json!({})));
        assert!(!is_blank(&json!(0)));
        assert!(!is_blank(&json!(false)));
    }
}
