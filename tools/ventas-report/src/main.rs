//! CLI tool that cleans a raw sales table and reports its totals.
//!
//! # Usage
//!
//! ```bash
//! # Report on a file
//! ventas-report --input ventas_raw.csv
//!
//! # Read from stdin, print JSON, export the cleaned table
//! cat ventas_raw.csv | ventas-report --format json --export ventas_clean.csv
//!
//! # Show why rows were dropped
//! RUST_LOG=sales=debug ventas-report -i ventas_raw.csv
//! ```

mod report;

use std::{
    fs::{self, File},
    io::{Read, Write, stdin, stdout},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use sales::{aggregate::DEFAULT_TOP_N, aggregate_with_top, clean, export};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::report::Report;

/// File name used when `--export` is given without a path.
const DEFAULT_EXPORT_FILE: &str = "ventas_clean.csv";

/// Clean a raw sales table and report totals by product, time slot and family.
///
/// Reads comma-separated sales rows from a file or stdin, drops invalid and
/// duplicate rows, and prints the summary to stdout. Diagnostics go to stderr.
#[derive(Parser, Debug)]
#[command(name = "ventas-report")]
#[command(version, about)]
struct Args {
    /// Input file path. If not specified, reads from stdin.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Write the cleaned table as CSV to this path.
    #[arg(short, long, num_args = 0..=1, default_missing_value = DEFAULT_EXPORT_FILE)]
    export: Option<PathBuf>,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// How many products to list in the top ranking.
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    top: usize,

    /// Number of raw rows and cleaned records to include in the report.
    #[arg(long, default_value_t = 0)]
    preview: usize,
}

/// Supported report formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable summary.
    Text,
    /// Pretty-printed JSON document.
    Json,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    let raw = read_input(args.input.as_deref())?;
    let outcome = clean(&raw);
    let totals = aggregate_with_top(&outcome.records, args.top);
    let report = Report::new(&outcome, &totals, args.preview);

    let mut out = stdout().lock();
    match args.format {
        OutputFormat::Text => write!(out, "{report}").context("Failed to write report")?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &report).context("Failed to write report")?;
            writeln!(out).context("Failed to write report")?;
        }
    }

    if let Some(path) = &args.export {
        let count = export_cleaned(path, &outcome.records)?;
        // stderr, so it doesn't mix with the report on stdout
        eprintln!("Exported {count} record(s) to {}", path.display());
    }

    Ok(())
}

/// Reads the whole raw table from a file, or from stdin when no path is given.
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display())),
        None => {
            let mut raw = String::new();
            stdin().lock().read_to_string(&mut raw).context("Failed to read stdin")?;
            Ok(raw)
        }
    }
}

/// Writes the cleaned records to `path` and returns how many were written.
fn export_cleaned(path: &Path, records: &[sales::Record]) -> Result<usize> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    let count = export::write_csv(file, records)
        .with_context(|| format!("Failed to export cleaned table to {}", path.display()))?;
    info!(count, path = %path.display(), "exported cleaned table");
    Ok(count)
}
