//! Parse command - show how each sample is read.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tracing::info;

use tally_core::{Aggregator, ParsedAmount};

use super::total::OutputFormat;
use super::{load_config, read_samples, InputFormat};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input file (default: stdin)
    input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Input layout
    #[arg(short, long, value_enum, default_value = "lines")]
    input_format: InputFormat,
}

#[derive(Serialize)]
struct ParsedRow<'a> {
    raw: &'a str,
    value: Option<f64>,
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let aggregator = Aggregator::with_config(&config)?;

    let samples = read_samples(args.input.as_deref(), args.input_format).await?;
    let parsed = aggregator.parse_all(&samples);

    let unreadable = parsed.iter().filter(|p| !p.is_valid()).count();
    info!("{} of {} samples have no amount", unreadable, parsed.len());

    println!("{}", format_parsed(&parsed, args.format)?);

    Ok(())
}

fn format_parsed(parsed: &[ParsedAmount], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(parsed)?),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(vec![]);
            for p in parsed {
                wtr.serialize(ParsedRow {
                    raw: &p.raw,
                    value: p.value,
                })?;
            }
            Ok(String::from_utf8(wtr.into_inner()?)?)
        }
        OutputFormat::Text => {
            let lines: Vec<String> = parsed
                .iter()
                .map(|p| match p.value {
                    Some(value) => format!("{}\t{}", p.raw, value),
                    None => format!("{}\tNaN", p.raw),
                })
                .collect();
            Ok(lines.join("\n"))
        }
    }
}
