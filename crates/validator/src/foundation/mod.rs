//! Value-level validation building blocks.
//!
//! - **Traits**: [`Validate`]
//! - **Errors**: [`ValidationError`]
//!
//! A value-level validator looks at a single already-cast value and either
//! accepts it or explains why not. The [`library`](crate::library) module lifts
//! these onto a [`Changeset`](crate::Changeset) field, turning a
//! [`ValidationError`] into a [`FieldError`](crate::FieldError).
//!
//! ```rust
//! use paramcast_validator::foundation::{Validate, ValidationError};
//!
//! struct NonZero;
//!
//! impl Validate for NonZero {
//!     type Input = f64;
//!
//!     fn validate(&self, input: &f64) -> Result<(), ValidationError> {
//!         if *input == 0.0 {
//!             Err(ValidationError::new("non_zero", "must not be zero"))
//!         } else {
//!             Ok(())
//!         }
//!     }
//! }
//!
//! assert!(NonZero.validate(&1.5).is_ok());
//! assert!(NonZero.validate(&0.0).is_err());
//! ```

pub mod error;
pub mod traits;

pub use error::ValidationError;
pub use traits::Validate;

/// A validation result using the standard `ValidationError`.
pub type ValidationResult<T> = Result<T, ValidationError>;
