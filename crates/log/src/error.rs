/// Error type for logger setup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LogError {
    /// The level filter could not be parsed.
    #[error("invalid filter `{filter}`: {reason}")]
    Filter { filter: String, reason: String },

    /// The output format name is not recognised.
    #[error("unknown log format `{0}` (expected pretty, compact or json)")]
    Format(String),

    /// A global subscriber is already installed.
    #[error("logger already initialized: {0}")]
    AlreadyInitialized(String),
}

impl LogError {
    /// Broad error category for grouping.
    #[must_use]
    pub fn category(&self) -> &str {
        match self {
            Self::Filter { .. } | Self::Format(_) => "config",
            Self::AlreadyInitialized(_) => "state",
        }
    }

    /// Machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Filter { .. } => "LOG_FILTER",
            Self::Format(_) => "LOG_FORMAT",
            Self::AlreadyInitialized(_) => "LOG_ALREADY_INIT",
        }
    }
}
