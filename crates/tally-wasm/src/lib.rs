//! WASM bindings for tally.
//!
//! Built for in-page use: a content script collects the text of matching
//! elements and hands the strings over; the aggregate comes back as a plain
//! object `{ total, count, samples, currencySymbol, currencySuffix }`.

use wasm_bindgen::prelude::*;

use tally_core::{Aggregate, AggregateResult, Aggregator, ParsedAmount, TallyConfig};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn texts_from_js(texts: JsValue) -> Result<Vec<String>, JsValue> {
    serde_wasm_bindgen::from_value(texts).map_err(to_js_error)
}

/// Aggregate an array of element texts with the built-in tables.
#[wasm_bindgen]
pub fn scrape_totals(texts: JsValue) -> Result<JsValue, JsValue> {
    let texts = texts_from_js(texts)?;
    let result = tally_core::aggregate(&texts);

    serde_wasm_bindgen::to_value(&result).map_err(to_js_error)
}

/// Parse a single price text; `undefined` when it holds no finite amount.
#[wasm_bindgen]
pub fn parse_amount(text: &str) -> Option<f64> {
    tally_core::parse_amount(text).finite_value()
}

/// Render an aggregate as `{symbol}{total} {suffix}` with two decimals; no
/// trailing space when there is no suffix.
#[wasm_bindgen]
pub fn format_total(result: JsValue) -> Result<String, JsValue> {
    let result: AggregateResult = serde_wasm_bindgen::from_value(result).map_err(to_js_error)?;
    Ok(result.formatted_total())
}

/// Configurable calculator for browser use.
#[wasm_bindgen]
pub struct TotalCalculator {
    aggregator: Aggregator,
}

#[wasm_bindgen]
impl TotalCalculator {
    /// Create a calculator, optionally from a JSON configuration document.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<TotalCalculator, JsValue> {
        let aggregator = match config_json {
            Some(json) => {
                let config = TallyConfig::from_json_str(&json).map_err(to_js_error)?;
                Aggregator::with_config(&config).map_err(to_js_error)?
            }
            None => Aggregator::new(),
        };

        Ok(Self { aggregator })
    }

    /// Aggregate an array of element texts.
    #[wasm_bindgen]
    pub fn aggregate(&self, texts: JsValue) -> Result<JsValue, JsValue> {
        let texts = texts_from_js(texts)?;
        let result = self.aggregator.aggregate(&texts);

        serde_wasm_bindgen::to_value(&result).map_err(to_js_error)
    }

    /// Aggregate and also return how every sample was read.
    #[wasm_bindgen]
    pub fn aggregate_with_items(&self, texts: JsValue) -> Result<JsValue, JsValue> {
        let texts = texts_from_js(texts)?;

        #[derive(serde::Serialize)]
        struct AggregateWithItems {
            result: AggregateResult,
            items: Vec<ParsedAmount>,
        }

        let output = AggregateWithItems {
            result: self.aggregator.aggregate(&texts),
            items: self.aggregator.parse_all(&texts),
        };

        serde_wasm_bindgen::to_value(&output).map_err(to_js_error)
    }

    /// Two display lines: the formatted total and the count with examples.
    #[wasm_bindgen]
    pub fn summary(&self, texts: JsValue) -> Result<String, JsValue> {
        let texts = texts_from_js(texts)?;
        let result = self.aggregator.aggregate(&texts);

        Ok(format!("Total: {}\n{}", result.formatted_total(), result.summary_line()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn js_texts(texts: &[&str]) -> JsValue {
        serde_wasm_bindgen::to_value(texts).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1.234,56 €"), Some(1234.56));
        assert_eq!(parse_amount("junk"), None);
    }

    #[wasm_bindgen_test]
    fn test_scrape_totals() {
        let value = scrape_totals(js_texts(&["$10.00", "$5.50", "junk", "$4.50"])).unwrap();
        let result: AggregateResult = serde_wasm_bindgen::from_value(value.clone()).unwrap();

        assert_eq!(result.total, 20.0);
        assert_eq!(result.count, 3);
        assert_eq!(result.currency_symbol, "$");
        assert_eq!(format_total(value).unwrap(), "$20.00");
    }

    #[wasm_bindgen_test]
    fn test_calculator_with_config() {
        let calculator =
            TotalCalculator::new(Some(r#"{ "currency": { "fallback_symbol": "zł" } }"#.to_string()))
                .unwrap();
        let summary = calculator.summary(js_texts(&["12,50", "7,50"])).unwrap();

        assert_eq!(summary, "Total: zł20.00\nFound 2 prices. Examples: 12,50 · 7,50");
    }

    #[wasm_bindgen_test]
    fn test_calculator_rejects_bad_config() {
        assert!(TotalCalculator::new(Some("{".to_string())).is_err());
    }
}
