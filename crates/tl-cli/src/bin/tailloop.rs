//! tailloop CLI Binary
//!
//! Rewrites guarded, self tail-recursive Go functions into loops.
//!
//! # Usage
//!
//! ```bash
//! # Rewrite ./input.go and print the result
//! tailloop
//!
//! # Rewrite another file with a custom config
//! tailloop rec.go --config tailloop.toml
//! ```

use clap::{Parser, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use tl_cli::{
    CliError, Result, config::CliConfig, diagnostics::setup_error_reporting,
    transform::transform_file,
};
use tracing::{error, info};

#[derive(Parser)]
#[command(
    name = "tailloop",
    version = env!("CARGO_PKG_VERSION"),
    about = "Rewrite tail-recursive Go functions into loops"
)]
struct Cli {
    /// Go source file (defaults to the configured input, `input.go`)
    input: Option<PathBuf>,

    /// Enable verbose logging (use multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress everything but errors
    #[arg(short, long)]
    quiet: bool,

    /// Set log level (overrides --verbose/--quiet)
    #[arg(long, value_enum)]
    log: Option<LogLevel>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = setup_error_reporting().and_then(|_| setup_logging(&cli)) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    match run(&cli) {
        Ok(()) => {
            if cli.verbose > 0 {
                info!("Completed successfully");
            }
        }
        Err(e) => {
            if !tl_cli::diagnostics::render_cli_error(&e) {
                error!("{}", e);
            }
            if cli.verbose > 0 {
                error!(?e, "detailed error context");
            }
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = CliConfig::load(cli.config.as_deref())?;
    let input = cli.input.clone().unwrap_or(config.input.path);

    let output = transform_file(&input, &config.transform)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.source.as_bytes())?;
    stdout.flush().map_err(CliError::Io)
}

fn setup_logging(cli: &Cli) -> Result<()> {
    use tracing_subscriber::EnvFilter;

    let filter = if let Some(level) = cli.log {
        EnvFilter::new(match level {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        })
    } else if cli.quiet {
        EnvFilter::new("error")
    } else {
        match cli.verbose {
            0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| CliError::Config(format!("Failed to initialise logging: {}", e)))
}
