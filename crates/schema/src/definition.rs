//! Modules loaded from JSON or YAML.
//!
//! ```yaml
//! name: products
//! config: { unknown_keys: reject }
//! schemas:
//!   create:
//!     fields:
//!       - { name: name, type: string, required: true }
//!       - { name: price, type: float, required: true }
//!       - name: variants
//!         embed: many
//!         schema: { fields: [ { name: sku, type: string, required: true } ] }
//! ```
//!
//! A definition can only reference library validators and callbacks; caller
//! functions are registered on the builder returned by
//! [`ModuleDefinition::into_builder`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::Error;
use crate::module::{Module, ModuleBuilder};
use crate::schema::Schema;

/// The serialized form of a module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleDefinition {
    pub name: String,
    #[serde(default)]
    pub config: EngineConfig,
    #[serde(default)]
    pub schemas: IndexMap<String, Schema>,
}

impl ModuleDefinition {
    /// Parse a JSON definition.
    pub fn from_json_str(source: &str) -> Result<Self, Error> {
        serde_json::from_str(source).map_err(|e| Error::Definition {
            reason: e.to_string(),
        })
    }

    /// Parse a YAML definition.
    pub fn from_yaml_str(source: &str) -> Result<Self, Error> {
        serde_yaml::from_str(source).map_err(|e| Error::Definition {
            reason: e.to_string(),
        })
    }

    /// A builder preloaded with this definition's schemas and config.
    #[must_use]
    pub fn into_builder(self) -> ModuleBuilder {
        let mut builder = Module::builder(self.name).config(self.config);
        for (action, schema) in self.schemas {
            builder = builder.schema(action, schema);
        }
        builder
    }

    /// Build the module with the default library and no caller functions.
    #[must_use]
    pub fn into_module(self) -> Module {
        self.into_builder().build()
    }
}
