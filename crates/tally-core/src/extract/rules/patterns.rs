//! Built-in tables and regex patterns for amount extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Currency symbols recognised in the first sample.
pub const CURRENCY_SYMBOLS: &[&str] = &["₺", "$", "€", "£", "¥"];

/// Currency codes recognised in the first sample (ASCII case-insensitive).
pub const CURRENCY_CODES: &[&str] = &["USD", "EUR", "TRY", "GBP", "JPY"];

/// Symbol reported when no currency is found. A fixed default, not a
/// detection of Turkish Lira context.
pub const FALLBACK_SYMBOL: &str = "₺";

/// Maximum number of samples carried in an aggregate.
pub const MAX_SAMPLES: usize = 5;

/// Number of samples shown in a one-line summary.
pub const DISPLAY_SAMPLES: usize = 3;

lazy_static! {
    // Optional minus, a digit, then any run of digits and separators.
    // ASCII digits only: other scripts' numerals are not amounts here.
    pub static ref AMOUNT_TOKEN: Regex = Regex::new(
        r"-?[0-9][0-9.,]*"
    ).unwrap();

    // Any built-in symbol or code
    pub static ref CURRENCY_MARK: Regex = Regex::new(
        &mark_pattern(CURRENCY_SYMBOLS, CURRENCY_CODES)
    ).unwrap();

    pub static ref CURRENCY_CODE: Regex = Regex::new(
        &code_pattern(CURRENCY_CODES)
    ).unwrap();

    // Well-formed number at the start of a normalized token
    pub static ref LEADING_DECIMAL: Regex = Regex::new(
        r"^-?[0-9]+(?:\.[0-9]+)?"
    ).unwrap();
}

/// Whitespace as removed from price text and trimmed from samples.
///
/// Unicode `White_Space` without U+0085 (NEL), plus U+FEFF (BOM), which web
/// pages often leave inside copied text.
pub fn is_blank_char(c: char) -> bool {
    match c {
        '\u{feff}' => true,
        '\u{0085}' => false,
        _ => c.is_whitespace(),
    }
}

/// Alternation over symbols (literal) then codes (ASCII case-insensitive).
pub fn mark_pattern<S: AsRef<str>>(symbols: &[S], codes: &[S]) -> String {
    let alternatives: Vec<String> = symbols
        .iter()
        .map(|s| regex::escape(s.as_ref()))
        .chain(codes.iter().map(|c| ascii_caseless(c.as_ref())))
        .collect();
    format!("(?:{})", alternatives.join("|"))
}

/// Alternation over codes, ASCII case-insensitive.
pub fn code_pattern<S: AsRef<str>>(codes: &[S]) -> String {
    let alternatives: Vec<String> = codes.iter().map(|c| ascii_caseless(c.as_ref())).collect();
    format!("(?:{})", alternatives.join("|"))
}

/// `usd` -> `[Uu][Ss][Dd]`.
///
/// `(?i)` would apply Unicode simple case folding and let `ſ` (U+017F)
/// stand in for `s`.
fn ascii_caseless(code: &str) -> String {
    code.chars()
        .map(|c| {
            if c.is_ascii_alphabetic() {
                format!("[{}{}]", c.to_ascii_uppercase(), c.to_ascii_lowercase())
            } else {
                regex::escape(c.encode_utf8(&mut [0; 4]))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_token_takes_first_run() {
        let m = AMOUNT_TOKEN.find("Price:1.234,56TL,was2.000").unwrap();
        assert_eq!(m.as_str(), "1.234,56");
    }

    #[test]
    fn test_amount_token_keeps_sign() {
        assert_eq!(AMOUNT_TOKEN.find("-$-42.5").unwrap().as_str(), "-42.5");
        assert!(AMOUNT_TOKEN.find("-").is_none());
        assert!(AMOUNT_TOKEN.find("no digits").is_none());
    }

    #[test]
    fn test_currency_mark_is_case_insensitive() {
        assert_eq!(CURRENCY_MARK.find("100 usd").unwrap().as_str(), "usd");
        assert_eq!(CURRENCY_MARK.find("€ 5").unwrap().as_str(), "€");
        assert_eq!(CURRENCY_CODE.find("Eur 5").unwrap().as_str(), "Eur");
        assert!(CURRENCY_CODE.find("$5").is_none());
    }

    #[test]
    fn test_code_case_folding_is_ascii_only() {
        // U+017F LATIN SMALL LETTER LONG S folds to `s` under Unicode rules.
        assert!(CURRENCY_MARK.find("u\u{17f}d 5").is_none());
        assert!(CURRENCY_CODE.find("U\u{17f}D").is_none());
        // U+212A KELVIN SIGN folds to `k`.
        let custom = Regex::new(&code_pattern(&["SEK"])).unwrap();
        assert!(custom.find("se\u{212a}").is_none());
        assert!(custom.is_match("sek"));
    }

    #[test]
    fn test_patterns_escape_symbols() {
        assert_eq!(mark_pattern(&["$"], &["USD"]), r"(?:\$|[Uu][Ss][Dd])");
        assert_eq!(code_pattern(&["EUR", "GBP"]), "(?:[Ee][Uu][Rr]|[Gg][Bb][Pp])");
    }

    #[test]
    fn test_leading_decimal() {
        assert_eq!(LEADING_DECIMAL.find("1.234.567").unwrap().as_str(), "1.234");
        assert_eq!(LEADING_DECIMAL.find("-5.").unwrap().as_str(), "-5");
        assert!(LEADING_DECIMAL.find(".5").is_none());
        assert!(LEADING_DECIMAL.find("x1").is_none());
    }

    #[test]
    fn test_blank_chars() {
        assert!(is_blank_char(' '));
        assert!(is_blank_char('\u{a0}'));
        assert!(is_blank_char('\u{3000}'));
        assert!(is_blank_char('\u{feff}'));
        assert!(!is_blank_char('\u{85}'));
        assert!(!is_blank_char('\u{200b}'));
    }
}
