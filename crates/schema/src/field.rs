//! Field and embed declarations.
//!
//! Declarations are plain data. They serialize to the same shape the
//! definition file format reads:
//!
//! ```yaml
//! - { name: price, type: float, required: true }
//! - { name: category, type: string, validator: { name: inclusion, arg: [mobile, laptop] } }
//! - { name: variants, embed: many, schema: { fields: [...] } }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use smallvec::SmallVec;

use paramcast_validator::FieldType;

use crate::schema::Schema;

/// Whether a field must have a non-blank value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "bool", into = "bool")]
pub enum Requirement {
    Required,
    #[default]
    Optional,
}

impl Requirement {
    #[must_use]
    pub fn is_required(self) -> bool {
        self == Self::Required
    }
}

impl From<bool> for Requirement {
    fn from(required: bool) -> Self {
        if required {
            Self::Required
        } else {
            Self::Optional
        }
    }
}

impl From<Requirement> for bool {
    fn from(requirement: Requirement) -> Self {
        requirement.is_required()
    }
}

/// How many child records an embed holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    One,
    Many,
}

// ============================================================================
// VALIDATOR REFERENCE
// ============================================================================

/// A reference to a named validator, with up to two extra arguments.
///
/// The dispatch arity is the number of arguments plus two (the changeset and
/// the field name).
///
/// ```rust
/// use paramcast_schema::ValidatorRef;
/// use serde_json::json;
///
/// assert_eq!(ValidatorRef::new("acceptance").arity(), 2);
/// assert_eq!(ValidatorRef::from(("inclusion", json!(["a"]))).arity(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ValidatorRefRepr")]
pub struct ValidatorRef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arg: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opts: Option<Value>,
}

impl ValidatorRef {
    /// A reference without arguments.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arg: None,
            opts: None,
        }
    }

    /// Adds the argument (builder-style, consuming).
    #[must_use]
    pub fn arg(mut self, arg: Value) -> Self {
        self.arg = Some(arg);
        self
    }

    /// Adds the options (builder-style, consuming).
    ///
    /// Options without an argument are passed as the only argument.
    #[must_use]
    pub fn opts(mut self, opts: Value) -> Self {
        self.opts = Some(opts);
        self
    }

    /// The extra arguments passed after the changeset and field name.
    #[must_use]
    pub fn args(&self) -> SmallVec<[Value; 2]> {
        self.arg.iter().chain(self.opts.iter()).cloned().collect()
    }

    /// Dispatch arity.
    #[must_use]
    pub fn arity(&self) -> usize {
        2 + usize::from(self.arg.is_some()) + usize::from(self.opts.is_some())
    }
}

impl From<&str> for ValidatorRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<(&str, Value)> for ValidatorRef {
    fn from((name, arg): (&str, Value)) -> Self {
        Self::new(name).arg(arg)
    }
}

impl From<(&str, Value, Value)> for ValidatorRef {
    fn from((name, arg, opts): (&str, Value, Value)) -> Self {
        Self::new(name).arg(arg).opts(opts)
    }
}

/// Accepts either a bare name or a `{name, arg, opts}` map.
#[derive(Deserialize)]
#[serde(untagged)]
enum ValidatorRefRepr {
    Name(String),
    Full {
        name: String,
        #[serde(default)]
        arg: Option<Value>,
        #[serde(default)]
        opts: Option<Value>,
    },
}

impl From<ValidatorRefRepr> for ValidatorRef {
    fn from(repr: ValidatorRefRepr) -> Self {
        match repr {
            ValidatorRefRepr::Name(name) => Self::new(name),
            ValidatorRefRepr::Full { name, arg, opts } => Self { name, arg, opts },
        }
    }
}

// ============================================================================
// FIELD
// ============================================================================

/// A plain field declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Field {
    name: String,
    #[serde(rename = "type")]
    ty: FieldType,
    #[serde(default, rename = "required")]
    requirement: Requirement,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    validator: Option<ValidatorRef>,
    #[serde(default, skip_serializing_if = "is_false")]
    droppable: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl Field {
    fn new(name: impl Into<String>, ty: FieldType, requirement: Requirement) -> Self {
        Self {
            name: name.into(),
            ty,
            requirement,
            default: None,
            validator: None,
            droppable: false,
        }
    }

    /// A field that must have a non-blank value.
    pub fn required(name: impl Into<String>, ty: FieldType) -> Self {
        Self::new(name, ty, Requirement::Required)
    }

    /// A field that may be absent.
    pub fn optional(name: impl Into<String>, ty: FieldType) -> Self {
        Self::new(name, ty, Requirement::Optional)
    }

    /// Sets the default value (builder-style, consuming).
    #[must_use]
    pub fn default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Binds a validator (builder-style, consuming).
    #[must_use]
    pub fn validator(mut self, validator: impl Into<ValidatorRef>) -> Self {
        self.validator = Some(validator.into());
        self
    }

    /// Drops the field for calls whose input lacks its key (builder-style, consuming).
    #[must_use]
    pub fn droppable(mut self) -> Self {
        self.droppable = true;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn field_type(&self) -> &FieldType {
        &self.ty
    }

    #[must_use]
    pub fn requirement(&self) -> Requirement {
        self.requirement
    }

    #[must_use]
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    #[must_use]
    pub fn validator_ref(&self) -> Option<&ValidatorRef> {
        self.validator.as_ref()
    }

    #[must_use]
    pub fn is_droppable(&self) -> bool {
        self.droppable
    }
}

// ============================================================================
// EMBED
// ============================================================================

/// A nested schema declaration, holding one child record or a list of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Embed {
    name: String,
    #[serde(rename = "embed")]
    cardinality: Cardinality,
    #[serde(default, rename = "required")]
    requirement: Requirement,
    #[serde(default, skip_serializing_if = "is_false")]
    droppable: bool,
    schema: Schema,
}

impl Embed {
    fn new(name: impl Into<String>, cardinality: Cardinality, schema: Schema) -> Self {
        Self {
            name: name.into(),
            cardinality,
            requirement: Requirement::Optional,
            droppable: false,
            schema,
        }
    }

    /// An embed holding a single child record.
    pub fn one(name: impl Into<String>, schema: Schema) -> Self {
        Self::new(name, Cardinality::One, schema)
    }

    /// An embed holding a list of child records.
    pub fn many(name: impl Into<String>, schema: Schema) -> Self {
        Self::new(name, Cardinality::Many, schema)
    }

    /// Marks the embed required (builder-style, consuming).
    #[must_use]
    pub fn required(mut self) -> Self {
        self.requirement = Requirement::Required;
        self
    }

    /// Drops the embed for calls whose input lacks its key (builder-style, consuming).
    #[must_use]
    pub fn droppable(mut self) -> Self {
        self.droppable = true;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    #[must_use]
    pub fn requirement(&self) -> Requirement {
        self.requirement
    }

    #[must_use]
    pub fn is_droppable(&self) -> bool {
        self.droppable
    }

    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

// ============================================================================
// DECLARATION
// ============================================================================

/// One entry of a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Declaration {
    Embed(Embed),
    Field(Field),
}

impl Declaration {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Field(f) => f.name(),
            Self::Embed(e) => e.name(),
        }
    }

    #[must_use]
    pub fn requirement(&self) -> Requirement {
        match self {
            Self::Field(f) => f.requirement(),
            Self::Embed(e) => e.requirement(),
        }
    }

    #[must_use]
    pub fn is_droppable(&self) -> bool {
        match self {
            Self::Field(f) => f.is_droppable(),
            Self::Embed(e) => e.is_droppable(),
        }
    }
}

impl From<Field> for Declaration {
    fn from(field: Field) -> Self {
        Self::Field(field)
    }
}

impl From<Embed> for Declaration {
    fn from(embed: Embed) -> Self {
        Self::Embed(embed)
    }
}
