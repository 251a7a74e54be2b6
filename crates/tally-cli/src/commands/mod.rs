//! Subcommands and the input/config plumbing they share.

pub mod batch;
pub mod config;
pub mod parse;
pub mod total;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use tally_core::TallyConfig;

/// How samples are laid out in an input.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum InputFormat {
    /// One sample per line
    Lines,
    /// A JSON array of strings
    Json,
}

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tally")
        .join("config.json")
}

/// Load the configuration named on the command line, else the default file
/// if present, else built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<TallyConfig> {
    let path = match config_path {
        Some(path) => PathBuf::from(path),
        None => {
            let default_path = default_config_path();
            if !default_path.exists() {
                debug!("No config file at {}, using defaults", default_path.display());
                return Ok(TallyConfig::default());
            }
            default_path
        }
    };

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config = TallyConfig::from_json_str(&content)?;

    info!("Loaded configuration from {}", path.display());

    Ok(config)
}

/// Read samples from a file, or stdin when no file is given.
pub async fn read_samples(input: Option<&Path>, format: InputFormat) -> anyhow::Result<Vec<String>> {
    let content = match input {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Input file not found: {}", path.display());
            }
            tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?
        }
        None => {
            let mut buffer = String::new();
            tokio::io::stdin().read_to_string(&mut buffer).await?;
            buffer
        }
    };

    let samples = split_samples(&content, format)?;
    debug!("Read {} samples", samples.len());

    Ok(samples)
}

fn split_samples(content: &str, format: InputFormat) -> anyhow::Result<Vec<String>> {
    match format {
        InputFormat::Lines => Ok(content.lines().map(str::to_string).collect()),
        InputFormat::Json => serde_json::from_str(content)
            .context("Input is not a JSON array of strings"),
    }
}
