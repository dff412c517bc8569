//! paramcast CLI
//!
//! Validate JSON input against a module definition file.
//!
//! ```bash
//! # Validate a file
//! paramcast validate --schema products.yaml --action create --input product.json
//!
//! # Pipe from stdin
//! echo '{"name": "iPod", "price": "20.00"}' | paramcast validate -s products.yaml -a create
//!
//! # Show the compiled spec
//! paramcast spec --schema products.yaml --action create
//! ```
//!
//! ## Exit Codes
//!
//! - 0: valid, the record is printed
//! - 1: invalid, the error tree is printed
//! - 2: error (unreadable files, unknown action, schema defects)

mod input;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use paramcast_log::LogConfig;
use paramcast_schema::{Error, Module, Params};

/// paramcast: cast and validate parameters against declarative schemas
#[derive(Parser)]
#[command(name = "paramcast")]
#[command(version)]
#[command(about = "Cast and validate request parameters against a schema", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log filter directives, e.g. `debug` or `paramcast_schema=trace`
    #[arg(long, global = true, env = "PARAMCAST_LOG")]
    log_level: Option<String>,

    /// Log output format
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate input and print the record or the error tree
    Validate {
        #[command(flatten)]
        target: Target,

        /// Input JSON or YAML file (reads stdin if omitted or `-`)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Print compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Print the compiled spec for an action
    Spec {
        #[command(flatten)]
        target: Target,

        /// Input used for droppable-field filtering (empty if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
struct Target {
    /// Module definition file (JSON or YAML)
    #[arg(short, long)]
    schema: PathBuf,

    /// Action whose schema to use
    #[arg(short, long)]
    action: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormat> for paramcast_log::Format {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
            LogFormat::Json => Self::Json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut log = LogConfig::from_env();
    if let Some(level) = &cli.log_level {
        log = log.level(level.as_str());
    }
    if let Some(format) = cli.log_format {
        log = log.format(format.into());
    }
    if let Err(e) = paramcast_log::init_with(log) {
        eprintln!("Warning: {e}");
    }

    match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Validate {
            target,
            input,
            compact,
        } => {
            let module = input::load_module(&target.schema)?;
            let params = input::read_params(input.as_deref(), true)?;
            validate(&module, &target.action, &params, compact)
        }
        Commands::Spec { target, input } => {
            let module = input::load_module(&target.schema)?;
            let params = input::read_params(input.as_deref(), false)?;
            let spec = module.spec(&target.action, &params)?;
            println!("{}", serde_json::to_string_pretty(&spec)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn validate(module: &Module, action: &str, params: &Params, compact: bool) -> Result<ExitCode> {
    let print = |value: &serde_json::Value| -> Result<()> {
        let text = if compact {
            serde_json::to_string(value)?
        } else {
            serde_json::to_string_pretty(value)?
        };
        println!("{text}");
        Ok(())
    };

    match module.validate(action, params) {
        Ok(record) => {
            print(&record.into_value())?;
            Ok(ExitCode::SUCCESS)
        }
        Err(Error::Invalid(changeset)) => {
            tracing::debug!(action, "input rejected");
            print(&changeset.to_error_tree())?;
            Ok(ExitCode::from(1))
        }
        Err(defect) => Err(defect.into()),
    }
}
