//! Field types understood by the caster.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The declared type of a field.
///
/// Serialized as a short name: `"string"`, `"integer"`, `"float"`,
/// `"boolean"`, `"map"`, `"any"`, `"embed"`, or `"array<T>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FieldType {
    String,
    Integer,
    Float,
    Boolean,
    Map,
    Array(Box<FieldType>),
    /// Accepts any value unchanged.
    Any,
    /// Placeholder for embedded schemas; never cast directly.
    Embed,
}

impl FieldType {
    /// Shorthand for `Array(Box::new(inner))`.
    #[must_use]
    pub fn array_of(inner: FieldType) -> Self {
        Self::Array(Box::new(inner))
    }

    /// Whether this is the embed placeholder.
    #[must_use]
    pub fn is_embed(&self) -> bool {
        matches!(self, Self::Embed)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Integer => f.write_str("integer"),
            Self::Float => f.write_str("float"),
            Self::Boolean => f.write_str("boolean"),
            Self::Map => f.write_str("map"),
            Self::Array(inner) => write!(f, "array<{inner}>"),
            Self::Any => f.write_str("any"),
            Self::Embed => f.write_str("embed"),
        }
    }
}

/// Error returned when a type name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field type `{0}`")]
pub struct UnknownType(pub String);

impl FromStr for FieldType {
    type Err = UnknownType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(inner) = s
            .strip_prefix("array<")
            .and_then(|rest| rest.strip_suffix('>'))
        {
            return Ok(Self::array_of(inner.parse()?));
        }
        match s {
            "string" => Ok(Self::String),
            "integer" => Ok(Self::Integer),
            "float" => Ok(Self::Float),
            "boolean" => Ok(Self::Boolean),
            "map" => Ok(Self::Map),
            "array" => Ok(Self::array_of(Self::Any)),
            "any" => Ok(Self::Any),
            "embed" => Ok(Self::Embed),
            other => Err(UnknownType(other.to_owned())),
        }
    }
}

impl TryFrom<String> for FieldType {
    type Error = UnknownType;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FieldType> for String {
    fn from(value: FieldType) -> Self {
        value.to_string()
    }
}
