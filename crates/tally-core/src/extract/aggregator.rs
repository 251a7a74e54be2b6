//! Aggregation of raw samples into a total, a count and samples.

use tracing::debug;

use crate::error::Result;
use crate::models::amount::{AggregateResult, ParsedAmount};
use crate::models::config::TallyConfig;

use super::rules::patterns::is_blank_char;
use super::rules::{AmountParser, CurrencyDetector, MAX_SAMPLES};

/// Trait for sample aggregation.
pub trait Aggregate {
    /// Aggregate an ordered sequence of raw samples. Never fails.
    fn aggregate<S: AsRef<str>>(&self, samples: &[S]) -> AggregateResult;
}

/// Amount aggregator combining the amount parser and currency detector.
#[derive(Debug, Clone)]
pub struct Aggregator {
    amounts: AmountParser,
    currency: CurrencyDetector,
    /// Maximum number of samples carried in a result.
    max_samples: usize,
}

impl Aggregator {
    /// Create an aggregator over the built-in tables.
    pub fn new() -> Self {
        Self {
            amounts: AmountParser::new(),
            currency: CurrencyDetector::new(),
            max_samples: MAX_SAMPLES,
        }
    }

    /// Create an aggregator from a configuration.
    pub fn with_config(config: &TallyConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            amounts: AmountParser::new(),
            currency: CurrencyDetector::from_config(&config.currency)?,
            max_samples: config.aggregation.max_samples,
        })
    }

    /// Set the sample cap.
    pub fn with_max_samples(mut self, max_samples: usize) -> Self {
        self.max_samples = max_samples;
        self
    }

    /// Parse every non-blank sample, in order, after trimming.
    pub fn parse_all<S: AsRef<str>>(&self, samples: &[S]) -> Vec<ParsedAmount> {
        trimmed(samples)
            .into_iter()
            .map(|text| self.amounts.parse(text))
            .collect()
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl Aggregate for Aggregator {
    fn aggregate<S: AsRef<str>>(&self, samples: &[S]) -> AggregateResult {
        let texts = trimmed(samples);
        let mark = self.currency.infer(&texts);

        let (total, count) = texts
            .iter()
            .map(|text| self.amounts.parse(text))
            .filter_map(|parsed| parsed.finite_value())
            .fold((0.0_f64, 0_usize), |(total, count), value| (total + value, count + 1));

        debug!(
            samples = texts.len(),
            count,
            total,
            symbol = %mark.symbol,
            suffix = %mark.suffix,
            "Aggregated amounts"
        );

        AggregateResult {
            total,
            count,
            samples: texts
                .iter()
                .take(self.max_samples)
                .map(|text| text.to_string())
                .collect(),
            ..AggregateResult::empty(mark)
        }
    }
}

/// Aggregate raw samples with the built-in tables.
pub fn aggregate<S: AsRef<str>>(samples: &[S]) -> AggregateResult {
    Aggregator::new().aggregate(samples)
}

/// Trimmed samples with blanks dropped.
fn trimmed<S: AsRef<str>>(samples: &[S]) -> Vec<&str> {
    samples
        .iter()
        .map(|s| s.as_ref().trim_matches(is_blank_char))
        .filter(|s| !s.is_empty())
        .collect()
}
