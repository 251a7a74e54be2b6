//! Currency mark inference.
//!
//! The mark is read from the first sample only and applied to the whole
//! aggregation; mixed-currency input is treated as single-currency.

use regex::Regex;

use crate::error::Result;
use crate::models::amount::CurrencyMark;
use crate::models::config::CurrencyConfig;

use super::FieldExtractor;
use super::patterns::{code_pattern, mark_pattern, CURRENCY_CODE, CURRENCY_MARK, FALLBACK_SYMBOL};

/// Currency mark detector.
#[derive(Debug, Clone)]
pub struct CurrencyDetector {
    /// Any symbol or code; `None` when both tables are empty.
    mark: Option<Regex>,
    /// Codes only; `None` when there are no codes.
    code: Option<Regex>,
    fallback_symbol: String,
}

impl CurrencyDetector {
    /// Detector over the built-in tables.
    pub fn new() -> Self {
        Self {
            mark: Some(CURRENCY_MARK.clone()),
            code: Some(CURRENCY_CODE.clone()),
            fallback_symbol: FALLBACK_SYMBOL.to_string(),
        }
    }

    /// Detector over custom tables.
    pub fn from_config(config: &CurrencyConfig) -> Result<Self> {
        let symbols = config.symbols.as_slice();
        let codes = config.codes.as_slice();

        let mark = if symbols.is_empty() && codes.is_empty() {
            None
        } else {
            Some(Regex::new(&mark_pattern(symbols, codes))?)
        };

        let code = if codes.is_empty() {
            None
        } else {
            Some(Regex::new(&code_pattern(codes))?)
        };

        Ok(Self {
            mark,
            code,
            fallback_symbol: config.fallback_symbol.clone(),
        })
    }

    pub fn fallback_symbol(&self) -> &str {
        &self.fallback_symbol
    }

    /// Infer one mark for a whole sequence from its first sample.
    pub fn infer<S: AsRef<str>>(&self, samples: &[S]) -> CurrencyMark {
        let first = samples.first().map(|s| s.as_ref()).unwrap_or("");
        self.extract(first)
            .unwrap_or_else(|| CurrencyMark::fallback(&self.fallback_symbol))
    }
}

impl Default for CurrencyDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for CurrencyDetector {
    type Output = CurrencyMark;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let hit = self.mark.as_ref()?.find(text)?;

        // A leading code is reported as suffix, never as symbol
        let symbol = match &self.code {
            Some(code) => code.replace(hit.as_str(), "").into_owned(),
            None => hit.as_str().to_string(),
        };

        let suffix = self
            .code
            .as_ref()
            .and_then(|code| code.find(text))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();

        Some(CurrencyMark::new(symbol, suffix))
    }
}

/// Infer the currency mark of a sample sequence with the built-in tables.
pub fn infer_currency<S: AsRef<str>>(samples: &[S]) -> CurrencyMark {
    CurrencyDetector::new().infer(samples)
}
