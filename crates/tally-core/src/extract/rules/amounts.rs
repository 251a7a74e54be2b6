//! Amount extraction from free-form price text.
//!
//! Separators are disambiguated without locale context:
//! - both `.` and `,` with the comma last: European grouping (`1.234,56`)
//! - comma only: decimal comma when there is exactly one comma followed by
//!   at most two digits (`1,50`), thousands grouping otherwise (`1,234`)
//! - anything else: commas are grouping (`1,234.56`)
//!
//! `1,234` is genuinely ambiguous; it is read as one thousand two hundred
//! thirty-four.

use tracing::trace;

use crate::models::amount::ParsedAmount;

use super::FieldExtractor;
use super::patterns::{is_blank_char, AMOUNT_TOKEN, LEADING_DECIMAL};

/// Longest comma-delimited fraction still read as decimals.
const MAX_DECIMAL_COMMA_DIGITS: usize = 2;

/// Amount field extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct AmountParser;

impl AmountParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse one raw sample. `raw` is kept verbatim in the result.
    pub fn parse(&self, raw: &str) -> ParsedAmount {
        match self.extract(raw) {
            Some(value) => ParsedAmount::new(value, raw),
            None => {
                trace!(sample = raw, "no amount in sample");
                ParsedAmount::unparsed(raw)
            }
        }
    }
}

impl FieldExtractor for AmountParser {
    type Output = f64;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let compact: String = text.chars().filter(|c| !is_blank_char(*c)).collect();
        let token = AMOUNT_TOKEN.find(&compact)?;
        let normalized = normalize_separators(token.as_str());
        parse_leading_decimal(&normalized)
    }
}

/// Parse a single raw sample into a [`ParsedAmount`].
pub fn parse_amount(raw: &str) -> ParsedAmount {
    AmountParser::new().parse(raw)
}

/// Rewrite a numeric token so that `.` is the only decimal separator and no
/// grouping characters remain.
fn normalize_separators(token: &str) -> String {
    match (token.rfind(','), token.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => {
            token.replace('.', "").replacen(',', ".", 1)
        }
        (Some(_), None) => {
            let parts: Vec<&str> = token.split(',').collect();
            if parts.len() == 2 && parts[1].len() <= MAX_DECIMAL_COMMA_DIGITS {
                format!("{}.{}", parts[0].replace('.', ""), parts[1])
            } else {
                token.replace(',', "")
            }
        }
        _ => token.replace(',', ""),
    }
}

/// Parse the longest leading `-?digits[.digits]` run.
///
/// Normalized tokens can still carry stray separators (`1.234.567`); only the
/// leading well-formed number counts.
fn parse_leading_decimal(s: &str) -> Option<f64> {
    LEADING_DECIMAL.find(s)?.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn value(raw: &str) -> Option<f64> {
        parse_amount(raw).value
    }

    #[test]
    fn test_european_grouping() {
        assert_eq!(value("1.234,56"), Some(1234.56));
        assert_eq!(value("12.345.678,90 €"), Some(12345678.90));
        assert_eq!(value("1.,5"), Some(1.5));
    }

    #[test]
    fn test_us_grouping() {
        assert_eq!(value("1,234.56"), Some(1234.56));
        assert_eq!(value("$1,234,567.89"), Some(1234567.89));
        assert_eq!(value("10.00"), Some(10.0));
    }

    #[test]
    fn test_ambiguous_comma() {
        assert_eq!(value("1,50"), Some(1.5));
        assert_eq!(value("1,5"), Some(1.5));
        assert_eq!(value("7,"), Some(7.0));
        assert_eq!(value("1,234"), Some(1234.0));
        assert_eq!(value("1,234,567"), Some(1234567.0));
        assert_eq!(value("1,2,3"), Some(123.0));
    }

    #[test]
    fn test_sign_is_preserved() {
        assert_eq!(value("-42.5"), Some(-42.5));
        assert_eq!(value("- 1 234,50 ₺"), Some(-1234.5));
        assert_eq!(value("Discount: -5,00"), Some(-5.0));
    }

    #[test]
    fn test_whitespace_is_removed_before_matching() {
        assert_eq!(value("1 234,56"), Some(1234.56));
        assert_eq!(value("1\u{00a0}234,56 TL"), Some(1234.56));
        assert_eq!(value("  \t99\n"), Some(99.0));
        assert_eq!(value("1\u{feff}234,56"), Some(1234.56));
        assert_eq!(value("\u{feff}-\u{feff}7,50"), Some(-7.5));
    }

    #[test]
    fn test_no_digits_is_not_a_number() {
        assert_eq!(value(""), None);
        assert_eq!(value("junk"), None);
        assert_eq!(value("-"), None);
        assert_eq!(value("$.,"), None);
    }

    #[test]
    fn test_leading_number_wins() {
        // Dots only: commas stripped, the first well-formed number is kept.
        assert_eq!(value("1.234.567"), Some(1.234));
        assert_eq!(value("5.-"), Some(5.0));
        // Only the first numeric run is considered.
        assert_eq!(value("2 x 3,50"), Some(2.0));
        assert_eq!(value("23 ,50"), Some(23.5));
    }

    #[test]
    fn test_raw_is_original_text() {
        let parsed = parse_amount(" 1 234,56 ");
        assert_eq!(parsed.raw, " 1 234,56 ");
        assert_eq!(parse_amount("n/a").raw, "n/a");
    }

    #[test]
    fn test_overflow_is_not_finite() {
        let huge = "9".repeat(400);
        let parsed = parse_amount(&huge);
        assert_eq!(parsed.value, Some(f64::INFINITY));
        assert!(!parsed.is_valid());
    }

    #[test]
    fn test_parse_leading_decimal() {
        assert_eq!(parse_leading_decimal("1234.56"), Some(1234.56));
        assert_eq!(parse_leading_decimal("1.234567.89"), Some(1.234567));
        assert_eq!(parse_leading_decimal("7."), Some(7.0));
        assert_eq!(parse_leading_decimal("-"), None);
        assert_eq!(parse_leading_decimal(""), None);
    }

    #[test]
    fn test_normalize_separators() {
        assert_eq!(normalize_separators("1.234,56"), "1234.56");
        assert_eq!(normalize_separators("1,234.56"), "1234.56");
        assert_eq!(normalize_separators("1,50"), "1.50");
        assert_eq!(normalize_separators("1,234"), "1234");
        assert_eq!(normalize_separators("1,234.567,89"), "1.234567,89");
    }
}
