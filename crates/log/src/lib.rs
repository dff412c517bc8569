//! # paramcast-log
//!
//! Installs the global `tracing` subscriber for paramcast binaries.
//!
//! ```rust,no_run
//! use paramcast_log::{Format, LogConfig};
//!
//! // PARAMCAST_LOG / PARAMCAST_LOG_FORMAT, falling back to RUST_LOG
//! paramcast_log::init_with(LogConfig::from_env()).unwrap();
//!
//! // or explicitly
//! let config = LogConfig::default().level("paramcast_schema=trace").format(Format::Json);
//! # let _ = config;
//! ```

mod builder;
mod config;
mod error;

pub use builder::LoggerBuilder;
pub use config::{DisplayConfig, Format, LogConfig};
pub use error::LogError;

/// Result type for logger operations.
pub type LogResult<T> = Result<T, LogError>;

/// Initialize with the default configuration (`warn`, compact, stderr).
pub fn init() -> LogResult<()> {
    init_with(LogConfig::default())
}

/// Initialize with a custom configuration.
pub fn init_with(config: LogConfig) -> LogResult<()> {
    LoggerBuilder::from_config(config).build()
}
