//! Configuration structures for the aggregation engine.
//!
//! Defaults reproduce the built-in tables exactly; a wrapping system can
//! override any of them without touching the parsing rules. The engine never
//! reads configuration from disk itself.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TallyError};
use crate::extract::rules::patterns::{
    CURRENCY_CODES, CURRENCY_SYMBOLS, FALLBACK_SYMBOL, MAX_SAMPLES,
};

/// Main configuration for the tally engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TallyConfig {
    /// Currency inference configuration.
    pub currency: CurrencyConfig,

    /// Aggregation configuration.
    pub aggregation: AggregationConfig,
}

/// Currency inference tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyConfig {
    /// Symbols recognised verbatim.
    pub symbols: Vec<String>,

    /// Three-letter codes, matched case-insensitively.
    pub codes: Vec<String>,

    /// Symbol reported when the first sample names no currency.
    pub fallback_symbol: String,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            symbols: CURRENCY_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            codes: CURRENCY_CODES.iter().map(|s| s.to_string()).collect(),
            fallback_symbol: FALLBACK_SYMBOL.to_string(),
        }
    }
}

/// Aggregation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Maximum number of samples kept in a result.
    pub max_samples: usize,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            max_samples: MAX_SAMPLES,
        }
    }
}

impl TallyConfig {
    /// Parse a JSON configuration document. Missing keys take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the currency tables for entries the detector cannot use.
    pub fn validate(&self) -> Result<()> {
        if let Some(i) = self.currency.symbols.iter().position(|s| s.is_empty()) {
            return Err(TallyError::Config(format!(
                "currency.symbols[{}] is empty",
                i
            )));
        }

        for code in &self.currency.codes {
            if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(TallyError::Config(format!(
                    "currency code {:?} must be non-empty ASCII letters",
                    code
                )));
            }
        }

        Ok(())
    }
}
