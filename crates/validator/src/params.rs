//! Raw input parameters.
//!
//! Input arrives either string-keyed (decoded from JSON, form data, query
//! strings) or symbol-keyed (built programmatically). The two representations
//! are distinct keys: a map may hold `"name"` and `:name` side by side.
//! Lookups by field name check the string form first, then the symbol form.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// One input key, in its native representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// A string key, as decoded from JSON.
    Str(String),
    /// A symbol key, as written by code constructing input directly.
    Sym(String),
}

impl Key {
    /// The key's name, regardless of representation.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Str(s) | Self::Sym(s) => s,
        }
    }

    /// Whether this is a symbol key.
    #[must_use]
    pub fn is_symbol(&self) -> bool {
        matches!(self, Self::Sym(_))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "{s:?}"),
            Self::Sym(s) => write!(f, ":{s}"),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

/// An ordered map of raw input values.
///
/// # Examples
///
/// ```rust
/// use paramcast_validator::Params;
/// use serde_json::json;
///
/// let params = Params::from_json(json!({"name": "iPod", "price": "20.00"})).unwrap();
/// assert_eq!(params.get("price"), Some(&json!("20.00")));
///
/// let symbolic = Params::new().with_sym("name", json!("iPod"));
/// assert!(symbolic.contains("name"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: IndexMap<Key, Value>,
}

impl Params {
    /// Create an empty parameter map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build string-keyed params from a JSON object.
    ///
    /// Returns `None` when `value` is not an object.
    #[must_use]
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(
                map.into_iter()
                    .map(|(k, v)| (Key::Str(k), v))
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Build string-keyed params from a borrowed JSON value.
    #[must_use]
    pub fn from_json_ref(value: &Value) -> Option<Self> {
        value.as_object().map(|map| {
            map.iter()
                .map(|(k, v)| (Key::Str(k.clone()), v.clone()))
                .collect()
        })
    }

    /// Insert a string-keyed value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(Key::Str(key.into()), value)
    }

    /// Insert a symbol-keyed value.
    pub fn insert_sym(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(Key::Sym(key.into()), value)
    }

    /// Add a string-keyed value (builder-style, consuming).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.insert(key, value);
        self
    }

    /// Add a symbol-keyed value (builder-style, consuming).
    #[must_use]
    pub fn with_sym(mut self, key: impl Into<String>, value: Value) -> Self {
        self.insert_sym(key, value);
        self
    }

    /// Look up a value by field name, string key first, then symbol key.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .get(&Key::Str(name.to_owned()))
            .or_else(|| self.entries.get(&Key::Sym(name.to_owned())))
    }

    /// Look up a value by exact key.
    #[must_use]
    pub fn get_key(&self, key: &Key) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Whether a key with this name exists in either representation.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.keys()
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.entries.iter()
    }

    /// The number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Convert to a string-keyed JSON object.
    ///
    /// When both representations of a name exist the string key wins.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut map = serde_json::Map::with_capacity(self.entries.len());
        for (key, value) in &self.entries {
            if key.is_symbol() && self.entries.contains_key(&Key::Str(key.name().to_owned())) {
                continue;
            }
            map.insert(key.name().to_owned(), value.clone());
        }
        Value::Object(map)
    }
}

impl FromIterator<(Key, Value)> for Params {
    fn from_iter<I: IntoIterator<Item = (Key, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = (&'a Key, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for Params {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Params {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = serde_json::Map::<String, Value>::deserialize(deserializer)?;
        Ok(map.into_iter().map(|(k, v)| (Key::Str(k), v)).collect())
    }
}
