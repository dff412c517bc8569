//! Logger configuration.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LogError;

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Human-readable, multi-line
    Pretty,
    /// Single-line
    #[default]
    Compact,
    /// Structured JSON, one object per line
    Json,
}

impl FromStr for Format {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(LogError::Format(other.to_owned())),
        }
    }
}

/// What each log line shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Show the target module
    pub target: bool,
    /// Show `file:line`
    pub source: bool,
    /// Use ANSI colors
    pub colors: bool,
    /// Include the current span in JSON output
    pub current_span: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            target: true,
            source: false,
            colors: true,
            current_span: true,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directives, e.g. `"warn,paramcast_schema=debug"`
    pub level: String,
    pub format: Format,
    pub display: DisplayConfig,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_owned(),
            format: Format::Compact,
            display: DisplayConfig::default(),
        }
    }
}

impl LogConfig {
    /// Read `PARAMCAST_LOG` (or `RUST_LOG`) and `PARAMCAST_LOG_FORMAT`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`LogConfig::from_env`], reading variables through `lookup`.
    ///
    /// An unrecognised format falls back to compact.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(level) = lookup("PARAMCAST_LOG").or_else(|| lookup("RUST_LOG")) {
            config.level = level;
        }
        if let Some(format) = lookup("PARAMCAST_LOG_FORMAT") {
            config.format = format.parse().unwrap_or_default();
        }
        if config.format == Format::Json {
            config.display.colors = false;
        }
        config
    }

    /// Set the filter directives (builder-style, consuming).
    #[must_use]
    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Set the output format (builder-style, consuming).
    #[must_use]
    pub fn format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Enable or disable colors (builder-style, consuming).
    #[must_use]
    pub fn colors(mut self, colors: bool) -> Self {
        self.display.colors = colors;
        self
    }
}
