//! # paramcast-schema
//!
//! Declarative schemas for raw, request-shaped input. A [`Module`] holds one
//! [`Schema`] per action; validating an action casts the input against the
//! schema's fields, recurses into embedded schemas, runs per-field validators
//! and the schema's callback, and returns either a typed [`Record`] or the
//! invalid [`Changeset`] as an error tree.
//!
//! ```rust
//! use paramcast_schema::prelude::*;
//! use serde_json::json;
//!
//! let module = Module::builder("products")
//!     .schema(
//!         "create",
//!         Schema::new()
//!             .field(Field::required("name", FieldType::String))
//!             .field(Field::required("price", FieldType::Float))
//!             .field(
//!                 Field::optional("category", FieldType::String)
//!                     .validator(("inclusion", json!(["mobile", "laptop"]))),
//!             ),
//!     )
//!     .build();
//!
//! let input = Params::from_json(json!({"name": "iPod", "price": "20.00"})).unwrap();
//! let record = module.validate("create", &input).unwrap();
//! assert_eq!(record.to_value(), json!({"name": "iPod", "price": 20.0}));
//!
//! let input = input.with("category", json!("desktop"));
//! let err = module.validate("create", &input).unwrap_err();
//! let tree = err.changeset().unwrap().to_error_tree();
//! assert_eq!(tree["errors"], json!({"category": ["is invalid"]}));
//! ```

pub mod config;
pub mod definition;
mod engine;
pub mod error;
pub mod field;
pub mod module;
pub mod record;
pub mod registry;
pub mod schema;
pub mod spec;

pub use config::{EngineConfig, UnknownKeys};
pub use definition::ModuleDefinition;
pub use error::Error;
pub use field::{Cardinality, Declaration, Embed, Field, Requirement, ValidatorRef};
pub use module::{CallbackFn, Module, ModuleBuilder};
pub use record::Record;
pub use registry::Registry;
pub use schema::Schema;
pub use spec::{CastSpec, EmbedBinding, SpecBuilder};

pub use paramcast_validator::{
    Builtins, Change, Changeset, FieldError, FieldType, FunctionError, Key, Params,
    ValidatorFn, ValidatorLibrary,
};

pub mod prelude {
    pub use crate::config::{EngineConfig, UnknownKeys};
    pub use crate::error::Error;
    pub use crate::field::{Embed, Field, ValidatorRef};
    pub use crate::module::Module;
    pub use crate::record::Record;
    pub use crate::registry::Registry;
    pub use crate::schema::Schema;

    pub use paramcast_validator::{
        Changeset, FieldError, FieldType, FunctionError, Params, ValidatorLibrary,
    };
}
