//! Errors recorded on a changeset, and errors raised by the library itself.

use std::borrow::Cow;

use serde::Serialize;
use serde_json::Value;

use crate::foundation::{ValidationError, error::ErrorParams};
use crate::types::FieldType;

/// What kind of check produced a [`FieldError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ErrorKind {
    /// A required field was absent or blank.
    Required,
    /// The raw value could not be coerced to the declared type.
    Cast,
    /// A named validator rejected the value.
    Validation {
        /// Validator code, e.g. `"inclusion"`.
        validator: Cow<'static, str>,
    },
}

impl ErrorKind {
    /// Short label for logs.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Required => "required",
            Self::Cast => "cast",
            Self::Validation { validator } => validator,
        }
    }
}

/// A single error attached to a field of a changeset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    /// Field the error belongs to.
    pub field: String,
    /// Human-readable message, e.g. `"can't be blank"`.
    pub message: Cow<'static, str>,
    /// What produced the error.
    #[serde(flatten)]
    pub kind: ErrorKind,
    /// Extra metadata such as the expected type or allowed values.
    #[serde(
        skip_serializing_if = "ErrorParams::is_empty",
        serialize_with = "serialize_params"
    )]
    pub meta: ErrorParams,
}

fn serialize_params<S: serde::Serializer>(
    params: &ErrorParams,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    use serde::ser::SerializeMap;

    let mut map = serializer.serialize_map(Some(params.len()))?;
    for (key, value) in params {
        map.serialize_entry(key.as_ref(), value)?;
    }
    map.end()
}

impl FieldError {
    /// An error of an arbitrary kind.
    pub fn new(
        field: impl Into<String>,
        message: impl Into<Cow<'static, str>>,
        kind: ErrorKind,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            kind,
            meta: ErrorParams::new(),
        }
    }

    /// The field's key was not present in the input.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::new(field, "is required", ErrorKind::Required)
    }

    /// The field was present but blank.
    pub fn blank(field: impl Into<String>) -> Self {
        Self::new(field, "can't be blank", ErrorKind::Required)
    }

    /// The raw value could not be cast to `expected`.
    pub fn cast(field: impl Into<String>, expected: &FieldType) -> Self {
        Self::new(field, "is invalid", ErrorKind::Cast)
            .with_meta("type", Value::String(expected.to_string()))
    }

    /// Lift a value-level [`ValidationError`] onto a field.
    pub fn from_validation(field: impl Into<String>, error: ValidationError) -> Self {
        Self {
            field: field.into(),
            message: error.message,
            kind: ErrorKind::Validation {
                validator: error.code,
            },
            meta: error.params,
        }
    }

    /// Adds a metadata entry.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_meta(mut self, key: impl Into<Cow<'static, str>>, value: Value) -> Self {
        self.meta.push((key.into(), value));
        self
    }

    /// Looks up a metadata value by key.
    #[must_use]
    pub fn meta(&self, key: &str) -> Option<&Value> {
        self.meta
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v)
    }
}

/// A raw value could not be coerced to a field type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot cast {actual} to {expected}")]
pub struct CastError {
    /// The declared type.
    pub expected: FieldType,
    /// JSON kind of the raw value, e.g. `"string"`.
    pub actual: &'static str,
}

impl CastError {
    pub(crate) fn new(expected: &FieldType, actual: &Value) -> Self {
        Self {
            expected: expected.clone(),
            actual: json_kind(actual),
        }
    }
}

/// JSON kind name of a value.
#[must_use]
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "map",
    }
}

/// A validator or callback function failed outright.
///
/// This is not a validation failure: ordinary rejections are recorded on the
/// changeset. A `FunctionError` means the function itself is defective, for
/// example a validator called with an argument of the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FunctionError {
    /// The function was called with arguments it cannot use.
    #[error("bad argument for `{function}`: {reason}")]
    BadArgument {
        function: Cow<'static, str>,
        reason: String,
    },

    /// The function failed for a reason of its own.
    #[error("{0}")]
    Failed(String),
}

impl FunctionError {
    /// Shorthand for [`FunctionError::BadArgument`].
    pub fn bad_argument(function: impl Into<Cow<'static, str>>, reason: impl Into<String>) -> Self {
        Self::BadArgument {
            function: function.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for [`FunctionError::Failed`].
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed(reason.into())
    }
}
