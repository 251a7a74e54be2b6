//! Amount, currency and aggregate result models.

use serde::{Deserialize, Serialize};

use crate::extract::rules::patterns::DISPLAY_SAMPLES;

/// A single raw sample after amount extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedAmount {
    /// Amount in the home currency unit, `None` when no number could be read.
    pub value: Option<f64>,

    /// Sample text exactly as it was handed to the parser.
    pub raw: String,
}

impl ParsedAmount {
    pub fn new(value: f64, raw: impl Into<String>) -> Self {
        Self {
            value: Some(value),
            raw: raw.into(),
        }
    }

    /// A sample that carries no readable amount.
    pub fn unparsed(raw: impl Into<String>) -> Self {
        Self {
            value: None,
            raw: raw.into(),
        }
    }

    /// The value if it is a finite number.
    pub fn finite_value(&self) -> Option<f64> {
        self.value.filter(|v| v.is_finite())
    }

    /// Whether this sample contributes to totals.
    pub fn is_valid(&self) -> bool {
        self.finite_value().is_some()
    }
}

/// Currency symbol and code inferred for a whole aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyMark {
    /// Symbol shown before the amount (may be empty).
    pub symbol: String,

    /// Currency code shown after the amount (may be empty).
    pub suffix: String,
}

impl CurrencyMark {
    pub fn new(symbol: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            suffix: suffix.into(),
        }
    }

    /// Mark used when the first sample names no currency.
    pub fn fallback(symbol: impl Into<String>) -> Self {
        Self::new(symbol, "")
    }
}

/// Aggregate over a sequence of raw samples.
///
/// Serialized with camelCase keys (`currencySymbol`, `currencySuffix`), the
/// shape consumed by browser front ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResult {
    /// Sum of every finite amount.
    pub total: f64,

    /// Number of samples with a finite amount.
    pub count: usize,

    /// Leading samples in input order, parseable or not.
    pub samples: Vec<String>,

    /// Inferred currency symbol.
    pub currency_symbol: String,

    /// Inferred currency code.
    pub currency_suffix: String,
}

impl AggregateResult {
    /// Result for an input with no usable samples.
    pub fn empty(mark: CurrencyMark) -> Self {
        Self {
            total: 0.0,
            count: 0,
            samples: Vec::new(),
            currency_symbol: mark.symbol,
            currency_suffix: mark.suffix,
        }
    }

    /// The inferred currency as a mark.
    pub fn currency(&self) -> CurrencyMark {
        CurrencyMark::new(&self.currency_symbol, &self.currency_suffix)
    }

    /// Total with two decimals, wrapped in the currency mark
    /// (e.g. `$20.00`, `300.00 TRY`). No trailing space without a suffix.
    pub fn formatted_total(&self) -> String {
        let amount = format!("{}{:.2}", self.currency_symbol, self.total);
        if self.currency_suffix.is_empty() {
            amount
        } else {
            format!("{} {}", amount, self.currency_suffix)
        }
    }

    /// One-line description: count plus up to three example samples.
    pub fn summary_line(&self) -> String {
        let mut line = format!("Found {} prices", self.count);
        if !self.samples.is_empty() {
            let examples: Vec<&str> = self
                .samples
                .iter()
                .take(DISPLAY_SAMPLES)
                .map(String::as_str)
                .collect();
            line.push_str(". Examples: ");
            line.push_str(&examples.join(" · "));
        }
        line
    }
}
