//! Batch command - aggregate several inputs independently.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, error, warn};

use tally_core::{Aggregate, AggregateResult, Aggregator};

use super::total::{format_result, OutputFormat};
use super::{load_config, read_samples, InputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Input layout of every file
    #[arg(short, long, value_enum, default_value = "lines")]
    input_format: InputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of aggregating a single file.
struct FileResult {
    path: PathBuf,
    result: Option<AggregateResult>,
    error: Option<String>,
}

#[derive(Serialize)]
struct SummaryRow<'a> {
    filename: &'a str,
    status: &'a str,
    total: Option<f64>,
    count: Option<usize>,
    currency_symbol: &'a str,
    currency_suffix: &'a str,
    error: &'a str,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let aggregator = Aggregator::with_config(&config)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        match read_samples(Some(path.as_path()), args.input_format).await {
            Ok(samples) => {
                let result = aggregator.aggregate(&samples);
                debug!("{}: {} amounts", path.display(), result.count);
                results.push(FileResult {
                    path,
                    result: Some(result),
                    error: None,
                });
            }
            Err(e) => {
                let error_msg = format!("{:#}", e);
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(FileResult {
                        path,
                        result: None,
                        error: Some(error_msg),
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed: {}", error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    for file in &results {
        let Some(result) = &file.result else {
            continue;
        };

        match &args.output_dir {
            Some(output_dir) => {
                let stem = file.path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("samples");
                let output_path = output_dir.join(format!("{}.{}", stem, args.format.extension()));

                fs::write(&output_path, format_result(result, args.format)?)?;
                debug!("Wrote output to {}", output_path.display());
            }
            None => {
                println!(
                    "{}\t{}\t{}",
                    file.path.display(),
                    result.formatted_total(),
                    result.count
                );
            }
        }
    }

    if args.summary {
        let summary_path = args.output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    eprintln!(
        "{} Processed {} files in {:?} ({} failed)",
        style("✓").green(),
        results.len(),
        start.elapsed(),
        style(failed.len()).red()
    );

    for file in &failed {
        eprintln!(
            "  - {}: {}",
            file.path.display(),
            file.error.as_deref().unwrap_or("unknown error")
        );
    }

    Ok(())
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    for file in results {
        let filename = file.path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        let row = match &file.result {
            Some(result) => SummaryRow {
                filename,
                status: "success",
                total: Some(result.total),
                count: Some(result.count),
                currency_symbol: &result.currency_symbol,
                currency_suffix: &result.currency_suffix,
                error: "",
            },
            None => SummaryRow {
                filename,
                status: "error",
                total: None,
                count: None,
                currency_symbol: "",
                currency_suffix: "",
                error: file.error.as_deref().unwrap_or(""),
            },
        };
        wtr.serialize(row)?;
    }

    wtr.flush()?;
    Ok(())
}
