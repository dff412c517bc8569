//! Core trait for value-level validators.

use crate::foundation::ValidationError;

/// The trait every value-level validator implements.
///
/// Validators are generic over their input type. Use `?Sized` inputs such as
/// `str` or `[T]` where the validator only needs a view of the value.
///
/// # Examples
///
/// ```rust
/// use paramcast_validator::foundation::{Validate, ValidationError};
///
/// struct MinChars {
///     min: usize,
/// }
///
/// impl Validate for MinChars {
///     type Input = str;
///
///     fn validate(&self, input: &str) -> Result<(), ValidationError> {
///         if input.chars().count() >= self.min {
///             Ok(())
///         } else {
///             Err(ValidationError::new("length", "is too short"))
///         }
///     }
/// }
///
/// assert!(MinChars { min: 3 }.validate("iPod").is_ok());
/// ```
pub trait Validate {
    /// The type of input being validated.
    type Input: ?Sized;

    /// Validates the input value.
    ///
    /// Returns `Ok(())` when the value is acceptable and a
    /// [`ValidationError`] describing the first violated constraint otherwise.
    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError>;

    /// Returns `true` when the input passes validation.
    fn is_valid(&self, input: &Self::Input) -> bool {
        self.validate(input).is_ok()
    }
}

impl<V: Validate + ?Sized> Validate for &V {
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        (**self).validate(input)
    }
}
