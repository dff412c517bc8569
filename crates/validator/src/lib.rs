//! # paramcast-validator
//!
//! The validator library behind `paramcast`: type coercion for raw input
//! values, the [`Changeset`] that carries validation state, and a set of
//! built-in named validators dispatched by `(name, arity)`.
//!
//! ## Quick Start
//!
//! ```rust
//! use paramcast_validator::prelude::*;
//! use serde_json::json;
//!
//! let price = cast(&FieldType::Float, &json!("20.00")).unwrap();
//! assert_eq!(price, json!(20.0));
//!
//! let mut changeset = Changeset::default();
//! changeset.put_change("category", json!("desktop"));
//!
//! let library = Builtins::new();
//! let inclusion = library.lookup("inclusion", 3).unwrap();
//! let changeset = inclusion(changeset, "category", &[json!(["mobile", "laptop"])]).unwrap();
//! assert!(!changeset.is_valid());
//! ```
//!
//! ## Value-level validators
//!
//! Each named validator is built from a plain [`Validate`](foundation::Validate)
//! rule ([`Inclusion`](validators::Inclusion), [`Length`](validators::Length),
//! [`Format`](validators::Format), [`NumberBounds`](validators::NumberBounds), ...)
//! and lifted onto a changeset field by the [`library`] module.

pub mod cast;
pub mod changeset;
pub mod error;
pub mod foundation;
pub mod library;
mod macros;
pub mod params;
pub mod prelude;
pub mod types;
pub mod validators;

pub use cast::cast;
pub use changeset::{Change, Changeset};
pub use error::{CastError, ErrorKind, FieldError, FunctionError};
pub use library::{Builtins, ValidatorFn, ValidatorLibrary};
pub use params::{Key, Params};
pub use types::FieldType;
