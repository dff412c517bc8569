//! Common imports for working with the validator library.
//!
//! ```rust
//! use paramcast_validator::prelude::*;
//! ```

pub use crate::cast::cast;
pub use crate::changeset::{Change, Changeset};
pub use crate::error::{CastError, ErrorKind, FieldError, FunctionError};
pub use crate::foundation::{Validate, ValidationError};
pub use crate::library::{Builtins, ValidatorFn, ValidatorLibrary};
pub use crate::params::{Key, Params};
pub use crate::types::FieldType;
pub use crate::validators::{
    Acceptance, Exclusion, Format, Inclusion, Length, NumberBounds, Subset,
};
