//! String content validators

use std::collections::HashMap;
use std::sync::{LazyLock, Mutex, PoisonError};

use regex::Regex;

use crate::foundation::ValidationError;

const MAX_CACHED_PATTERNS: usize = 256;

/// Compiled patterns shared across calls; `Regex` clones share the program.
static PATTERNS: LazyLock<Mutex<HashMap<String, Regex>>> = LazyLock::new(Mutex::default);

fn compile(pattern: &str) -> Result<Regex, regex::Error> {
    let mut cache = PATTERNS.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(regex) = cache.get(pattern) {
        return Ok(regex.clone());
    }
    let regex = Regex::new(pattern)?;
    if cache.len() >= MAX_CACHED_PATTERNS {
        cache.clear();
    }
    cache.insert(pattern.to_owned(), regex.clone());
    Ok(regex)
}

crate::validator! {
    /// Validates that a string matches a regular expression.
    ///
    /// The pattern is not anchored: `"@"` accepts any string containing an
    /// at-sign. Anchor it with `^...$` to match the whole value.
    pub Format { pattern: Regex } for str;
    rule(self, input) { self.pattern.is_match(input) }
    error(self, input) { ValidationError::invalid_format(self.pattern.as_str()) }
    new(pattern: &str) -> regex::Error {
        Ok(Self {
            pattern: compile(pattern)?,
        })
    }
    fn format(pattern: &str) -> regex::Error;
}
