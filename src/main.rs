//! Command-line entry point.
//!
//! Usage: portfolio-merge [OPTIONS] <FILE>...
//!
//! Merges the given brokerage export files (.xlsx/.xls/.csv/.pdf) into
//! one consolidated holdings table and writes it to the output path,
//! encoded per the output extension (.csv/.xlsx/.pdf).

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};

use portfolio_merge::error::PipelineError;
use portfolio_merge::models::{ExportFormat, ExportRequest};
use portfolio_merge::{pipeline, writers};

fn print_usage() {
    eprintln!("Usage: portfolio-merge [OPTIONS] <FILE>...");
    eprintln!();
    eprintln!("Merge brokerage export files into one consolidated holdings table.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --format <seeking-alpha|original>  output shape (default: seeking-alpha)");
    eprintln!("  --date <YYYY-MM-DD>                as-of date (default: today)");
    eprintln!("  --out <PATH>                       output file; .csv, .xlsx or .pdf");
    eprintln!("  --json <PATH>                      also dump the full merge report as JSON");
    eprintln!("  -h, --help                         show this help");
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let mut files: Vec<PathBuf> = Vec::new();
    let mut format = ExportFormat::SeekingAlpha;
    let mut as_of: NaiveDate = Local::now().date_naive();
    let mut out: Option<PathBuf> = None;
    let mut json_out: Option<PathBuf> = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--format" => {
                let raw = args.next().context("--format needs a value")?;
                format = ExportFormat::parse(&raw)
                    .with_context(|| format!("unknown format '{}'", raw))?;
            }
            "--date" => {
                let raw = args.next().context("--date needs a value")?;
                as_of = NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                    .with_context(|| format!("invalid date '{}', expected YYYY-MM-DD", raw))?;
            }
            "--out" => {
                out = Some(PathBuf::from(args.next().context("--out needs a value")?));
            }
            "--json" => {
                json_out = Some(PathBuf::from(args.next().context("--json needs a value")?));
            }
            "-h" | "--help" => {
                print_usage();
                return Ok(ExitCode::SUCCESS);
            }
            other if other.starts_with('-') => bail!("unknown option '{}'", other),
            other => files.push(PathBuf::from(other)),
        }
    }

    if files.is_empty() {
        print_usage();
        return Ok(ExitCode::from(1));
    }

    let out = out.unwrap_or_else(|| default_output(format));
    let request = ExportRequest { files, format, as_of };

    match pipeline::run(&request) {
        Ok(report) => {
            for skipped in &report.skipped {
                eprintln!("skipped {}: {}", skipped.file, skipped.reason);
            }
            writers::write_table(&report.projected, &out)
                .with_context(|| format!("writing {}", out.display()))?;
            if let Some(path) = &json_out {
                let json = serde_json::to_string_pretty(&report)?;
                std::fs::write(path, json)
                    .with_context(|| format!("writing {}", path.display()))?;
            }
            println!(
                "{} holding(s) written to {}",
                report.holdings.len(),
                out.display()
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(PipelineError::EmptyBatch { skipped }) => {
            for s in &skipped {
                eprintln!("skipped {}: {}", s.file, s.reason);
            }
            eprintln!("no valid holdings data found in any input file");
            Ok(ExitCode::from(2))
        }
    }
}

fn default_output(format: ExportFormat) -> PathBuf {
    match format {
        ExportFormat::SeekingAlpha => PathBuf::from("Seeking_Alpha_Portfolio_Upload.csv"),
        ExportFormat::Original => PathBuf::from("holdings.csv"),
    }
}
