//! Compiling a schema and an input into a [`CastSpec`].
//!
//! A spec is built fresh for every call (and for every embed instance),
//! because droppable fields depend on which keys the input carries.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use paramcast_validator::{FieldType, Params};

use crate::field::{Cardinality, Declaration, Embed, Field, ValidatorRef};
use crate::schema::Schema;

/// The nested schema bound to an embed field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmbedBinding<'s> {
    pub cardinality: Cardinality,
    pub schema: &'s Schema,
}

/// The per-call working description of one schema level.
///
/// Every permitted name has an entry in `types` and `defaults`; `required` is
/// a subset of `permitted`; both keep declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CastSpec<'s> {
    pub defaults: IndexMap<String, Value>,
    pub types: IndexMap<String, FieldType>,
    pub permitted: Vec<String>,
    pub required: Vec<String>,
    pub validators: IndexMap<String, &'s ValidatorRef>,
    pub embeds: IndexMap<String, EmbedBinding<'s>>,
}

impl<'s> CastSpec<'s> {
    /// Compile `schema` against `input`: drop droppable declarations whose
    /// key the input lacks, then fold the rest in order.
    ///
    /// ```rust
    /// use paramcast_schema::{CastSpec, Field, Params, Schema, FieldType};
    /// use serde_json::json;
    ///
    /// let schema = Schema::new()
    ///     .field(Field::required("name", FieldType::String))
    ///     .field(Field::required("origin", FieldType::String).droppable());
    ///
    /// let spec = CastSpec::compile(&schema, &Params::new().with("name", json!("Cheetah")));
    /// assert_eq!(spec.permitted, vec!["name"]);
    /// assert_eq!(spec.required, vec!["name"]);
    /// ```
    #[must_use]
    pub fn compile(schema: &'s Schema, input: &Params) -> Self {
        let mut builder = SpecBuilder::new();
        for declaration in schema {
            if declaration.is_droppable() && !input.contains(declaration.name()) {
                tracing::debug!(field = declaration.name(), "dropped: key absent from input");
                continue;
            }
            builder = match declaration {
                Declaration::Field(field) => builder.field(field),
                Declaration::Embed(embed) => builder.embed(embed),
            };
        }
        builder.build()
    }

    /// Whether the name is permitted at this level.
    #[must_use]
    pub fn permits(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }
}

/// Accumulates declarations into a [`CastSpec`].
#[derive(Debug, Default)]
pub struct SpecBuilder<'s> {
    spec: CastSpec<'s>,
}

impl<'s> SpecBuilder<'s> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plain field.
    #[must_use]
    pub fn field(mut self, field: &'s Field) -> Self {
        let name = field.name().to_owned();
        self.spec.defaults.insert(
            name.clone(),
            field.default_value().cloned().unwrap_or(Value::Null),
        );
        self.spec.types.insert(name.clone(), field.field_type().clone());
        self.spec.embeds.shift_remove(&name);
        match field.validator_ref() {
            Some(validator) => self.spec.validators.insert(name.clone(), validator),
            None => self.spec.validators.shift_remove(&name),
        };
        self.permit(name, field.requirement().is_required())
    }

    /// Add an embed: no default, the `embed` placeholder type, and a binding
    /// to the child schema.
    #[must_use]
    pub fn embed(mut self, embed: &'s Embed) -> Self {
        let name = embed.name().to_owned();
        self.spec.defaults.insert(name.clone(), Value::Null);
        self.spec.types.insert(name.clone(), FieldType::Embed);
        self.spec.validators.shift_remove(&name);
        self.spec.embeds.insert(
            name.clone(),
            EmbedBinding {
                cardinality: embed.cardinality(),
                schema: embed.schema(),
            },
        );
        self.permit(name, embed.requirement().is_required())
    }

    // A repeated name keeps its first position; its last declaration wins.
    fn permit(mut self, name: String, required: bool) -> Self {
        let listed = self.spec.required.contains(&name);
        if required && !listed {
            self.spec.required.push(name.clone());
        } else if !required && listed {
            self.spec.required.retain(|n| n != &name);
        }
        if !self.spec.permitted.contains(&name) {
            self.spec.permitted.push(name);
        }
        self
    }

    #[must_use]
    pub fn build(self) -> CastSpec<'s> {
        self.spec
    }
}
