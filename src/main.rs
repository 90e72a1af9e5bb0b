//! Visit Tracker MCP Server - Main Entry Point
//!
//! This is the main entry point for the visit tracker MCP server application.
//! The actual implementation is in the `visit_tracker` library.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use mcp_attr::server::serve_stdio;
use tracing_subscriber::EnvFilter;
use visit_tracker::{DataFormat, Storage, VisitTrackerHandler};

/// Environment variable holding the log filter when --log-level is not given
const LOG_ENV: &str = "VISIT_TRACKER_LOG";

/// Visit Tracker MCP Server - field-visit follow-ups with Jalali dates via Model Context Protocol
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the data file
    file: String,

    /// Data file format (defaults to the file extension: .toml or JSON)
    #[arg(long, value_enum)]
    format: Option<DataFormat>,

    /// Log filter written to stderr, e.g. "debug" or "visit_tracker=trace"
    #[arg(long)]
    log_level: Option<String>,
}

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Filter directive: `--log-level`, then the environment, then the default
fn log_filter(log_level: Option<&str>, env_value: Option<String>) -> String {
    log_level
        .map(str::to_string)
        .or(env_value)
        .unwrap_or_else(|| "visit_tracker=info".to_string())
}

/// Logs go to stderr; stdout carries the MCP protocol.
fn init_logging(log_level: Option<&str>) -> Result<(), BoxError> {
    let filter = log_filter(log_level, std::env::var(LOG_ENV).ok());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
}

#[tokio::main]
async fn main() -> Result<()> {
    // Check if no arguments were provided (except the program name)
    if std::env::args().len() == 1 {
        let mut cmd = Args::command();
        cmd.print_help().ok();
        println!();
        std::process::exit(2);
    }

    let args = Args::parse();
    if let Err(e) = init_logging(args.log_level.as_deref()) {
        eprintln!("visit-tracker: logging disabled: {}", e);
    }

    let storage = match args.format {
        Some(format) => Storage::with_format(&args.file, format),
        None => Storage::new(&args.file),
    };
    tracing::info!(path = %args.file, format = ?storage.format(), "starting visit tracker");

    let handler = VisitTrackerHandler::with_storage(storage)?;
    serve_stdio(handler).await?;
    Ok(())
}
