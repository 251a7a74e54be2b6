//! Rule-based extractors for amounts and currency marks.

pub mod amounts;
pub mod currency;
pub mod patterns;

pub use amounts::{parse_amount, AmountParser};
pub use currency::{infer_currency, CurrencyDetector};
pub use patterns::{CURRENCY_CODES, CURRENCY_SYMBOLS, DISPLAY_SAMPLES, FALLBACK_SYMBOL, MAX_SAMPLES};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text, if present.
    fn extract(&self, text: &str) -> Option<Self::Output>;
}
