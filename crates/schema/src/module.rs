//! Modules: named collections of action schemas with their own functions.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use paramcast_validator::{
    Builtins, Changeset, FunctionError, Params, ValidatorFn, ValidatorLibrary,
};
use serde_json::Value;

use crate::config::EngineConfig;
use crate::engine::{self, Context};
use crate::error::Error;
use crate::record::Record;
use crate::schema::Schema;
use crate::spec::CastSpec;

/// A caller-supplied callback: receives the changeset and the raw input of
/// its schema level, and returns the final changeset for that level.
pub type CallbackFn =
    Arc<dyn Fn(Changeset, &Params) -> Result<Changeset, FunctionError> + Send + Sync>;

/// Validators and callbacks supplied by the module author.
#[derive(Clone, Default)]
pub(crate) struct FunctionTable {
    validators: IndexMap<String, IndexMap<usize, ValidatorFn>>,
    callbacks: IndexMap<String, CallbackFn>,
}

impl FunctionTable {
    pub(crate) fn validator(&self, name: &str, arity: usize) -> Option<ValidatorFn> {
        self.validators.get(name)?.get(&arity).cloned()
    }

    pub(crate) fn callback(&self, name: &str) -> Option<&CallbackFn> {
        self.callbacks.get(name)
    }
}

impl fmt::Debug for FunctionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let validators: Vec<String> = self
            .validators
            .iter()
            .flat_map(|(name, arities)| arities.keys().map(move |a| format!("{name}/{a}")))
            .collect();
        f.debug_struct("FunctionTable")
            .field("validators", &validators)
            .field("callbacks", &self.callbacks.keys().collect::<Vec<_>>())
            .finish()
    }
}

// ============================================================================
// MODULE
// ============================================================================

/// A named set of action schemas, immutable once built.
///
/// Safe to share across threads; every call allocates its own state.
#[derive(Debug, Clone)]
pub struct Module {
    name: String,
    schemas: IndexMap<String, Schema>,
    functions: FunctionTable,
    library: Arc<dyn ValidatorLibrary>,
    config: EngineConfig,
}

impl Module {
    /// Start building a module.
    pub fn builder(name: impl Into<String>) -> ModuleBuilder {
        ModuleBuilder::new(name)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Action names in registration order.
    pub fn actions(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    #[must_use]
    pub fn schema(&self, action: &str) -> Option<&Schema> {
        self.schemas.get(action)
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn library(&self) -> &dyn ValidatorLibrary {
        self.library.as_ref()
    }

    fn schema_for(&self, action: &str) -> Result<&Schema, Error> {
        self.schemas.get(action).ok_or_else(|| {
            tracing::warn!(module = %self.name, action, "unknown action");
            Error::UnknownAction {
                module: self.name.clone(),
                action: action.to_owned(),
            }
        })
    }

    /// Run the pipeline and return the changeset, valid or not.
    pub fn changeset(&self, action: &str, input: &Params) -> Result<Changeset, Error> {
        let schema = self.schema_for(action)?;
        let cx = Context {
            module: &self.name,
            library: self.library.as_ref(),
            functions: &self.functions,
            config: &self.config,
        };
        engine::run(&cx, schema, input)
    }

    /// Cast and validate `input` against the action's schema.
    ///
    /// Returns the typed record, [`Error::Invalid`] carrying the error tree,
    /// or a defect.
    pub fn validate(&self, action: &str, input: &Params) -> Result<Record, Error> {
        let span = tracing::debug_span!("validate", module = %self.name, action);
        let _enter = span.enter();

        let changeset = self.changeset(action, input)?;
        if changeset.is_valid() {
            Ok(engine::apply(&changeset))
        } else {
            tracing::debug!(errors = changeset.errors().len(), "input is invalid");
            Err(Error::Invalid(Box::new(changeset)))
        }
    }

    /// [`Module::validate`] over a JSON object.
    ///
    /// A non-object input is validated as if it were empty.
    pub fn validate_json(&self, action: &str, input: &Value) -> Result<Record, Error> {
        let params = Params::from_json_ref(input).unwrap_or_default();
        self.validate(action, &params)
    }

    /// The compiled spec for this action and input, without validating.
    pub fn spec(&self, action: &str, input: &Params) -> Result<CastSpec<'_>, Error> {
        Ok(CastSpec::compile(self.schema_for(action)?, input))
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builder for [`Module`].
#[derive(Debug)]
pub struct ModuleBuilder {
    name: String,
    schemas: IndexMap<String, Schema>,
    functions: FunctionTable,
    library: Option<Arc<dyn ValidatorLibrary>>,
    config: EngineConfig,
}

impl ModuleBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schemas: IndexMap::new(),
            functions: FunctionTable::default(),
            library: None,
            config: EngineConfig::default(),
        }
    }

    /// Declare the schema for an action, replacing any earlier one.
    #[must_use]
    pub fn schema(mut self, action: impl Into<String>, schema: Schema) -> Self {
        self.schemas.insert(action.into(), schema);
        self
    }

    /// Register a validator function under `(name, arity)`.
    ///
    /// The library is consulted first, so a library export with the same
    /// name and arity shadows this function.
    #[must_use]
    pub fn validator<F>(mut self, name: impl Into<String>, arity: usize, f: F) -> Self
    where
        F: Fn(Changeset, &str, &[Value]) -> Result<Changeset, FunctionError>
            + Send
            + Sync
            + 'static,
    {
        self.functions
            .validators
            .entry(name.into())
            .or_default()
            .insert(arity, Arc::new(f));
        self
    }

    /// Register a callback function.
    #[must_use]
    pub fn callback<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(Changeset, &Params) -> Result<Changeset, FunctionError> + Send + Sync + 'static,
    {
        self.functions.callbacks.insert(name.into(), Arc::new(f));
        self
    }

    /// Use a different validator library (default: [`Builtins`]).
    #[must_use]
    pub fn library(mut self, library: impl ValidatorLibrary + 'static) -> Self {
        self.library = Some(Arc::new(library));
        self
    }

    #[must_use]
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn build(self) -> Module {
        Module {
            name: self.name,
            schemas: self.schemas,
            functions: self.functions,
            library: self.library.unwrap_or_else(|| Arc::new(Builtins::new())),
            config: self.config,
        }
    }
}
