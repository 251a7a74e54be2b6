//! Core library for amount extraction and aggregation.
//!
//! This crate provides:
//! - Locale-tolerant parsing of monetary amounts from free-form text
//!   (decimal point vs. decimal comma, thousands separators)
//! - Currency mark inference from a small fixed symbol/code table
//! - Aggregation of raw text samples into a total, a count and samples
//!
//! The engine is total: every input, including an empty one, produces an
//! [`AggregateResult`]. Only configuration can fail.

pub mod error;
pub mod models;
pub mod extract;

pub use error::{TallyError, Result};
pub use models::amount::{AggregateResult, CurrencyMark, ParsedAmount};
pub use models::config::TallyConfig;
pub use extract::{aggregate, Aggregate, Aggregator};
pub use extract::rules::{
    infer_currency, parse_amount, AmountParser, CurrencyDetector, FieldExtractor,
    CURRENCY_CODES, CURRENCY_SYMBOLS, DISPLAY_SAMPLES, FALLBACK_SYMBOL, MAX_SAMPLES,
};
