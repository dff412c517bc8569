use serde::{Deserialize, Serialize};

use crate::field::{Declaration, Embed, Field};

/// An ordered set of field and embed declarations, plus an optional callback.
///
/// Schemas are immutable once built into a [`Module`](crate::Module); embeds
/// own their child schemas, so a schema is always a tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Schema {
    #[serde(default, rename = "fields")]
    declarations: Vec<Declaration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    callback: Option<String>,
}

impl Schema {
    /// Create an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plain field (builder-style, consuming).
    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.declarations.push(Declaration::Field(field));
        self
    }

    /// Add an embed (builder-style, consuming).
    #[must_use]
    pub fn embed(mut self, embed: Embed) -> Self {
        self.declarations.push(Declaration::Embed(embed));
        self
    }

    /// Name the callback run last at this level (builder-style, consuming).
    #[must_use]
    pub fn callback(mut self, name: impl Into<String>) -> Self {
        self.callback = Some(name.into());
        self
    }

    /// Declarations in order.
    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter()
    }

    /// Get a declaration by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.declarations.iter().find(|d| d.name() == name)
    }

    #[must_use]
    pub fn callback_name(&self) -> Option<&str> {
        self.callback.as_deref()
    }

    /// The number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Whether there are no declarations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a Declaration;
    type IntoIter = std::slice::Iter<'a, Declaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.declarations.iter()
    }
}

impl FromIterator<Declaration> for Schema {
    fn from_iter<I: IntoIterator<Item = Declaration>>(iter: I) -> Self {
        Self {
            declarations: iter.into_iter().collect(),
            callback: None,
        }
    }
}
