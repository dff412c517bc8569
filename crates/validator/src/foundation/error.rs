//! Error type for value-level validation failures.
//!
//! String fields use `Cow<'static, str>` so the common case of static codes
//! and messages does not allocate.

use std::borrow::Cow;
use std::fmt;

use serde_json::Value;
use smallvec::SmallVec;

/// Parameters attached to an error, typically 0-2 entries.
pub type ErrorParams = SmallVec<[(Cow<'static, str>, Value); 2]>;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// Why a single value was rejected.
///
/// `code` names the validator (`"inclusion"`, `"length"`, ...) and is stable
/// for programmatic handling; `message` is the human-readable text that ends
/// up in the error tree.
///
/// # Examples
///
/// ```rust
/// use paramcast_validator::foundation::ValidationError;
/// use serde_json::json;
///
/// let error = ValidationError::new("length", "should be at least 3 character(s)")
///     .with_param("kind", json!("min"))
///     .with_param("count", json!(3));
///
/// assert_eq!(error.param("count"), Some(&json!(3)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Validator code, e.g. `"inclusion"`.
    pub code: Cow<'static, str>,

    /// Human-readable message, e.g. `"is invalid"`.
    pub message: Cow<'static, str>,

    /// Extra metadata, e.g. `[("count", 3)]`.
    pub params: ErrorParams,
}

impl ValidationError {
    /// Creates a new validation error with a code and message.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            params: SmallVec::new(),
        }
    }

    /// Adds a parameter to the error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(mut self, key: impl Into<Cow<'static, str>>, value: Value) -> Self {
        self.params.push((key.into(), value));
        self
    }

    /// Replaces the message, keeping code and parameters.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&Value> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;

        if !self.params.is_empty() {
            write!(f, " (")?;
            for (i, (k, v)) in self.params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{k}={v}")?;
            }
            write!(f, ")")?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl ValidationError {
    /// Value is not one of the allowed values.
    pub fn inclusion(allowed: &[Value]) -> Self {
        Self::new("inclusion", "is invalid").with_param("enum", Value::Array(allowed.to_vec()))
    }

    /// Value is one of the reserved values.
    pub fn exclusion(reserved: &[Value]) -> Self {
        Self::new("exclusion", "is reserved").with_param("enum", Value::Array(reserved.to_vec()))
    }

    /// At least one element of a list is not allowed.
    pub fn subset(allowed: &[Value]) -> Self {
        Self::new("subset", "has an invalid entry")
            .with_param("enum", Value::Array(allowed.to_vec()))
    }

    /// Value does not match the expected pattern.
    pub fn invalid_format(pattern: &str) -> Self {
        Self::new("format", "has invalid format")
            .with_param("pattern", Value::String(pattern.to_owned()))
    }

    /// Value must be accepted (`true`).
    pub fn acceptance() -> Self {
        Self::new("acceptance", "must be accepted")
    }

    /// Value length is outside the allowed bounds.
    ///
    /// `unit` is `"character(s)"` for strings and `"item(s)"` for lists.
    pub fn length(kind: &'static str, count: usize, unit: &'static str) -> Self {
        let message = match kind {
            "min" => format!("should be at least {count} {unit}"),
            "max" => format!("should be at most {count} {unit}"),
            _ => format!("should be {count} {unit}"),
        };
        Self::new("length", message)
            .with_param("kind", Value::String(kind.to_owned()))
            .with_param("count", Value::from(count))
    }

    /// Number violates a bound such as `greater_than`.
    pub fn number(kind: &'static str, bound: f64) -> Self {
        let phrase = match kind {
            "greater_than" => "greater than",
            "greater_than_or_equal_to" => "greater than or equal to",
            "less_than" => "less than",
            "less_than_or_equal_to" => "less than or equal to",
            "not_equal_to" => "not equal to",
            _ => "equal to",
        };
        Self::new("number", format!("must be {phrase} {}", format_bound(bound)))
            .with_param("kind", Value::String(kind.to_owned()))
            .with_param("number", Value::from(bound))
    }
}

fn format_bound(bound: f64) -> String {
    if bound.fract() == 0.0 && bound.abs() < 1e15 {
        format!("{}", bound as i64)
    } else {
        bound.to_string()
    }
}
