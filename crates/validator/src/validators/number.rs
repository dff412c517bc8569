//! Numeric bound validators

use serde_json::Value;

use crate::foundation::{Validate, ValidationError};

/// One numeric comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    GreaterThan(f64),
    GreaterThanOrEqualTo(f64),
    LessThan(f64),
    LessThanOrEqualTo(f64),
    EqualTo(f64),
    NotEqualTo(f64),
}

impl Bound {
    /// Option names accepted by [`Bound::from_option`].
    pub const OPTIONS: [&'static str; 6] = [
        "greater_than",
        "greater_than_or_equal_to",
        "less_than",
        "less_than_or_equal_to",
        "equal_to",
        "not_equal_to",
    ];

    /// Builds a bound from an option name such as `"greater_than"`.
    #[must_use]
    pub fn from_option(name: &str, value: f64) -> Option<Self> {
        match name {
            "greater_than" => Some(Self::GreaterThan(value)),
            "greater_than_or_equal_to" => Some(Self::GreaterThanOrEqualTo(value)),
            "less_than" => Some(Self::LessThan(value)),
            "less_than_or_equal_to" => Some(Self::LessThanOrEqualTo(value)),
            "equal_to" => Some(Self::EqualTo(value)),
            "not_equal_to" => Some(Self::NotEqualTo(value)),
            _ => None,
        }
    }

    fn check(self, n: f64) -> Result<(), ValidationError> {
        let (ok, kind, bound) = match self {
            Self::GreaterThan(b) => (n > b, "greater_than", b),
            Self::GreaterThanOrEqualTo(b) => (n >= b, "greater_than_or_equal_to", b),
            Self::LessThan(b) => (n < b, "less_than", b),
            Self::LessThanOrEqualTo(b) => (n <= b, "less_than_or_equal_to", b),
            Self::EqualTo(b) => (n == b, "equal_to", b),
            Self::NotEqualTo(b) => (n != b, "not_equal_to", b),
        };
        if ok {
            Ok(())
        } else {
            Err(ValidationError::number(kind, bound))
        }
    }
}

/// Validates a number against a list of bounds; the first violated bound
/// produces the error.
///
/// # Examples
///
/// ```
/// use paramcast_validator::validators::{Bound, NumberBounds};
/// use paramcast_validator::foundation::Validate;
/// use serde_json::json;
///
/// let validator = NumberBounds::new(vec![Bound::GreaterThan(0.0), Bound::LessThan(100.0)]);
/// assert!(validator.validate(&json!(20.0)).is_ok());
/// assert!(validator.validate(&json!(0)).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberBounds {
    pub bounds: Vec<Bound>,
}

impl NumberBounds {
    #[must_use]
    pub fn new(bounds: Vec<Bound>) -> Self {
        Self { bounds }
    }
}

impl Validate for NumberBounds {
    type Input = Value;

    fn validate(&self, input: &Value) -> Result<(), ValidationError> {
        let Some(n) = input.as_f64() else {
            return Err(ValidationError::new("number", "is not a number"));
        };
        self.bounds.iter().try_for_each(|bound| bound.check(n))
    }
}
