//! Engine configuration.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What to do with input keys the schema does not declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownKeys {
    /// Drop them silently.
    #[default]
    Ignore,
    /// Record an `"is unknown"` error for each.
    Reject,
}

/// Per-module engine settings, applied at every nesting level.
///
/// ```rust
/// use paramcast_schema::{EngineConfig, UnknownKeys};
///
/// let config: EngineConfig = serde_json::from_str(r#"{"unknown_keys": "reject"}"#).unwrap();
/// assert_eq!(config.unknown_keys, UnknownKeys::Reject);
/// assert_eq!(config.empty_values, vec![String::new()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub unknown_keys: UnknownKeys,
    /// Trim surrounding whitespace from string input before casting.
    pub trim_strings: bool,
    /// String inputs treated as absent (cast to `null`).
    pub empty_values: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            unknown_keys: UnknownKeys::Ignore,
            trim_strings: false,
            empty_values: vec![String::new()],
        }
    }
}

impl EngineConfig {
    /// Set the unknown-key policy (builder-style, consuming).
    #[must_use]
    pub fn unknown_keys(mut self, policy: UnknownKeys) -> Self {
        self.unknown_keys = policy;
        self
    }

    /// Enable or disable string trimming (builder-style, consuming).
    #[must_use]
    pub fn trim_strings(mut self, trim: bool) -> Self {
        self.trim_strings = trim;
        self
    }

    /// Replace the set of strings treated as absent (builder-style, consuming).
    #[must_use]
    pub fn empty_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.empty_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Apply trimming and empty-value rules to a raw input value.
    pub(crate) fn normalize<'v>(&self, raw: &'v Value) -> Cow<'v, Value> {
        let Value::String(s) = raw else {
            return Cow::Borrowed(raw);
        };
        let s = if self.trim_strings {
            s.trim()
        } else {
            s.as_str()
        };
        if self.empty_values.iter().any(|empty| empty == s) {
            Cow::Owned(Value::Null)
        } else if s.len() == raw.as_str().map_or(0, str::len) {
            Cow::Borrowed(raw)
        } else {
            Cow::Owned(Value::String(s.to_owned()))
        }
    }
}
