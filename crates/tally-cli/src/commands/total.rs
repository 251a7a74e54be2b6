//! Total command - aggregate the samples of a single input.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use tally_core::{Aggregate, AggregateResult, Aggregator};

use super::{load_config, read_samples, InputFormat};

/// Arguments for the total command.
#[derive(Args)]
pub struct TotalArgs {
    /// Input file (default: stdin)
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Input layout
    #[arg(short, long, value_enum, default_value = "lines")]
    input_format: InputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension used when writing into a directory.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: TotalArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let aggregator = Aggregator::with_config(&config)?;

    let samples = read_samples(args.input.as_deref(), args.input_format).await?;
    info!("Aggregating {} samples", samples.len());

    let result = aggregator.aggregate(&samples);
    let output = format_result(&result, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

pub fn format_result(result: &AggregateResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(result)?),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

fn format_csv(result: &AggregateResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["total", "count", "currency_symbol", "currency_suffix", "samples"])?;
    wtr.write_record([
        &format!("{:.2}", result.total),
        &result.count.to_string(),
        &result.currency_symbol,
        &result.currency_suffix,
        &result.samples.join(" | "),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(result: &AggregateResult) -> String {
    format!("Total: {}\n{}", result.formatted_total(), result.summary_line())
}
