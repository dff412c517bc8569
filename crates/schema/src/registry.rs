use indexmap::IndexMap;

use paramcast_validator::Params;

use crate::error::Error;
use crate::module::Module;
use crate::record::Record;
use crate::spec::CastSpec;

/// Modules keyed by name.
///
/// ```rust
/// use paramcast_schema::prelude::*;
/// use serde_json::json;
///
/// let registry = Registry::new().with(
///     Module::builder("animals")
///         .schema("create", Schema::new().field(Field::required("name", FieldType::String)))
///         .build(),
/// );
///
/// let input = Params::new().with("name", json!("Cheetah"));
/// assert!(registry.validate("animals", "create", &input).is_ok());
/// assert!(registry.validate("plants", "create", &input).unwrap_err().is_defect());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Registry {
    modules: IndexMap<String, Module>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module, returning the one it replaces.
    pub fn register(&mut self, module: Module) -> Option<Module> {
        self.modules.insert(module.name().to_owned(), module)
    }

    /// Add a module (builder-style, consuming).
    #[must_use]
    pub fn with(mut self, module: Module) -> Self {
        self.register(module);
        self
    }

    /// Get a module by name.
    pub fn module(&self, name: &str) -> Result<&Module, Error> {
        self.modules.get(name).ok_or_else(|| {
            tracing::warn!(module = name, "unknown module");
            Error::UnknownModule {
                module: name.to_owned(),
            }
        })
    }

    /// Module names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Validate input against `module`'s `action` schema.
    pub fn validate(&self, module: &str, action: &str, input: &Params) -> Result<Record, Error> {
        self.module(module)?.validate(action, input)
    }

    /// The compiled spec for `module`'s `action` schema.
    pub fn spec(&self, module: &str, action: &str, input: &Params) -> Result<CastSpec<'_>, Error> {
        self.module(module)?.spec(action, input)
    }
}
