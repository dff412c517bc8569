//! Subscriber installation.

use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

use crate::LogResult;
use crate::config::{Format, LogConfig};
use crate::error::LogError;

/// Builds a fmt layer of the given flavour with the display settings applied.
macro_rules! create_fmt_layer {
    ($format:ident, $display:expr) => {
        tracing_subscriber::fmt::layer()
            .$format()
            .with_writer(std::io::stderr)
            .with_ansi($display.colors)
            .with_target($display.target)
            .with_file($display.source)
            .with_line_number($display.source)
    };
}

/// Registry + filter + fmt layer, installed globally.
macro_rules! init_subscriber {
    ($filter:expr, $fmt_layer:expr) => {
        Registry::default()
            .with($filter)
            .with($fmt_layer)
            .try_init()
            .map_err(|e| LogError::AlreadyInitialized(e.to_string()))
    };
}

/// Logger builder.
#[derive(Debug)]
pub struct LoggerBuilder {
    config: LogConfig,
}

impl LoggerBuilder {
    #[must_use]
    pub fn from_config(config: LogConfig) -> Self {
        Self { config }
    }

    /// Parse the level filter.
    pub fn filter(&self) -> LogResult<EnvFilter> {
        EnvFilter::try_new(&self.config.level).map_err(|e| LogError::Filter {
            filter: self.config.level.clone(),
            reason: e.to_string(),
        })
    }

    /// Install the global subscriber.
    ///
    /// Fails if the filter does not parse or a subscriber is already set.
    pub fn build(self) -> LogResult<()> {
        let filter = self.filter()?;
        let display = &self.config.display;

        match self.config.format {
            Format::Pretty => init_subscriber!(filter, create_fmt_layer!(pretty, display)),
            Format::Compact => init_subscriber!(filter, create_fmt_layer!(compact, display)),
            Format::Json => init_subscriber!(
                filter,
                create_fmt_layer!(json, display).with_current_span(display.current_span)
            ),
        }
    }
}
