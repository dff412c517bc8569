//! Length validators
//!
//! Length is measured in Unicode scalar values (chars) for strings and in
//! elements for lists. Any other value has no length and is rejected.

use serde_json::Value;

use crate::foundation::{Validate, ValidationError};

// ============================================================================
// LENGTH
// ============================================================================

/// Validates the length of a string or list against optional bounds.
///
/// Bounds are checked in order `is`, `min`, `max`; the first violated bound
/// produces the error.
///
/// # Examples
///
/// ```
/// use paramcast_validator::validators::Length;
/// use paramcast_validator::foundation::Validate;
/// use serde_json::json;
///
/// let validator = Length::new().min(2).max(5);
/// assert!(validator.validate(&json!("iPod")).is_ok());
/// assert!(validator.validate(&json!("i")).is_err());
/// assert!(validator.validate(&json!([1, 2, 3, 4, 5, 6])).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Length {
    /// Minimum length (inclusive).
    pub min: Option<usize>,
    /// Maximum length (inclusive).
    pub max: Option<usize>,
    /// Exact length.
    pub is: Option<usize>,
}

impl Length {
    /// A length validator with no bounds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum length.
    #[must_use = "builder methods must be chained or built"]
    pub fn min(mut self, min: usize) -> Self {
        self.min = Some(min);
        self
    }

    /// Sets the maximum length.
    #[must_use = "builder methods must be chained or built"]
    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    /// Sets the exact length.
    #[must_use = "builder methods must be chained or built"]
    pub fn is(mut self, is: usize) -> Self {
        self.is = Some(is);
        self
    }

    /// Whether no bound is set.
    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none() && self.is.is_none()
    }
}

fn measure(input: &Value) -> Option<(usize, &'static str)> {
    match input {
        Value::String(s) => Some((s.chars().count(), "character(s)")),
        Value::Array(items) => Some((items.len(), "item(s)")),
        _ => None,
    }
}

impl Validate for Length {
    type Input = Value;

    fn validate(&self, input: &Value) -> Result<(), ValidationError> {
        let Some((len, unit)) = measure(input) else {
            return Err(ValidationError::new("length", "has no length"));
        };

        if let Some(is) = self.is.filter(|is| len != *is) {
            return Err(ValidationError::length("is", is, unit));
        }
        if let Some(min) = self.min.filter(|min| len < *min) {
            return Err(ValidationError::length("min", min, unit));
        }
        if let Some(max) = self.max.filter(|max| len > *max) {
            return Err(ValidationError::length("max", max, unit));
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
