//! Tabulated CLI - Command Line Operations for Tabulated Functions
//!
//! This is the operational entry point for the tabulated function engine.
//!
//! # Commands
//!
//! - `tabulated tabulate --source sqr --from 0 --to 1 --count 11` - Sample an analytic function
//! - `tabulated show <file>` - Print a stored function
//! - `tabulated eval <file> <x>...` - Evaluate a stored function
//! - `tabulated derive <file>` - Differentiate a stored function
//! - `tabulated convert <file> --to binary` - Re-encode a stored function
//! - `tabulated harness --threads 8` - Run the concurrency harness
//!
//! # Configuration
//!
//! Settings come from an optional TOML file, `TABULATED_*` environment
//! variables and global flags, in increasing order of precedence.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

use commands::derive::Method;
use commands::harness::HarnessDiscipline;
use commands::tabulate::{Source, TabulateArgs};
use commands::FileFormat;
use config::{build_config, CliArgs};
pub use error::{CliError, Result};

/// Tabulated function engine CLI
#[derive(Parser)]
#[command(name = "tabulated")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Storage for produced functions (array, linked_list)
    #[arg(long, global = true)]
    storage: Option<String>,

    /// Decimal separator expected in text input (dot, comma)
    #[arg(long, global = true)]
    separator: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample an analytic function on a uniform grid
    Tabulate {
        /// Function to sample
        #[arg(short, long, value_enum, default_value_t = Source::Identity)]
        source: Source,

        /// Value of the constant source
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        value: f64,

        /// Square the source before sampling
        #[arg(long)]
        squared: bool,

        /// Left end of the grid
        #[arg(long, allow_negative_numbers = true)]
        from: f64,

        /// Right end of the grid
        #[arg(long, allow_negative_numbers = true)]
        to: f64,

        /// Number of samples
        #[arg(short = 'n', long, default_value_t = 11)]
        count: usize,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = FileFormat::Text)]
        format: FileFormat,
    },

    /// Print a stored function
    Show {
        /// Input file
        input: PathBuf,

        /// Input format
        #[arg(short, long, value_enum, default_value_t = FileFormat::Text)]
        format: FileFormat,
    },

    /// Evaluate a stored function at the given points
    Eval {
        /// Input file
        input: PathBuf,

        /// Points to evaluate
        #[arg(required = true, allow_negative_numbers = true)]
        points: Vec<f64>,

        /// Input format
        #[arg(short, long, value_enum, default_value_t = FileFormat::Text)]
        format: FileFormat,
    },

    /// Differentiate a stored function
    Derive {
        /// Input file
        input: PathBuf,

        /// Input format
        #[arg(short, long, value_enum, default_value_t = FileFormat::Text)]
        format: FileFormat,

        /// Differentiation method
        #[arg(short, long, value_enum, default_value_t = Method::Tabulated)]
        method: Method,

        /// Step for the stepping methods
        #[arg(long, default_value_t = 1e-3)]
        step: f64,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = FileFormat::Text)]
        output_format: FileFormat,
    },

    /// Re-encode a stored function in another format
    Convert {
        /// Input file
        input: PathBuf,

        /// Input format
        #[arg(long, value_enum, default_value_t = FileFormat::Text)]
        from: FileFormat,

        /// Output format
        #[arg(long, value_enum)]
        to: FileFormat,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run concurrent doubling tasks on one shared function
    Harness {
        /// Input file (y = x on 1..=count if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Input format
        #[arg(short, long, value_enum, default_value_t = FileFormat::Text)]
        format: FileFormat,

        /// Samples of the generated function
        #[arg(short = 'n', long, default_value_t = 8)]
        count: usize,

        /// Worker threads (configuration value if omitted)
        #[arg(short, long)]
        threads: Option<usize>,

        /// Locking discipline
        #[arg(short, long, value_enum, default_value_t = HarnessDiscipline::Atomic)]
        discipline: HarnessDiscipline,
    },
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&CliArgs {
        config_file: cli.config.clone(),
        log_level: cli.log_level.clone(),
        storage: cli.storage.clone(),
        separator: cli.separator.clone(),
    })?;

    init_tracing(config.log_level.as_filter_str());
    info!(
        log_level = %config.log_level,
        storage = %config.storage,
        threads = config.threads,
        "Configuration loaded"
    );

    match cli.command {
        Commands::Tabulate {
            source,
            value,
            squared,
            from,
            to,
            count,
            output,
            format,
        } => commands::tabulate::run(
            &TabulateArgs {
                source,
                value,
                squared,
                from,
                to,
                count,
                output: output.as_deref(),
                format,
            },
            &config,
        ),
        Commands::Show { input, format } => commands::show::run(&input, format, &config),
        Commands::Eval {
            input,
            points,
            format,
        } => commands::eval::run(&input, format, &points, &config),
        Commands::Derive {
            input,
            format,
            method,
            step,
            output,
            output_format,
        } => commands::derive::run(
            &input,
            format,
            method,
            step,
            output.as_deref(),
            output_format,
            &config,
        ),
        Commands::Convert {
            input,
            from,
            to,
            output,
        } => commands::convert::run(&input, from, output.as_deref(), to, &config),
        Commands::Harness {
            input,
            format,
            count,
            threads,
            discipline,
        } => commands::harness::run(
            input.as_deref(),
            format,
            count,
            threads,
            discipline,
            &config,
        ),
    }
}
