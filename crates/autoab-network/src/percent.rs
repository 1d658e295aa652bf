//! Percentage parsing for spreadsheet-sourced association and prevalence values.
//!
//! Accepted shapes: numbers (fractions in (0, 1] are scaled to percent),
//! `"45%"`, `"~27"`, `"0.4-0.5"`, `"40–50 %"`. Anything else is `None`.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

lazy_static! {
    static ref RANGE_RE: Regex =
        Regex::new(r"^~?\s*(\d+(?:\.\d+)?|\.\d+)\s*[-–]\s*(\d+(?:\.\d+)?|\.\d+)\s*%?$").unwrap();
    static ref SINGLE_RE: Regex =
        Regex::new(r"^~?\s*([-+]?(?:\d+(?:\.\d+)?|\.\d+))\s*%?$").unwrap();
}

/// Scale a fraction in (0, 1] to percent; other values pass through.
pub fn scale_fraction(n: f64) -> f64 {
    if n > 0.0 && n <= 1.0 {
        n * 100.0
    } else {
        n
    }
}

/// Parse a JSON cell into a percentage.
pub fn parse_percent(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).map(scale_fraction),
        Value::String(s) => parse_percent_str(s),
        _ => None,
    }
}

/// Parse a text cell into a percentage.
pub fn parse_percent_str(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(caps) = RANGE_RE.captures(text) {
        let low: f64 = caps[1].parse().ok()?;
        let high: f64 = caps[2].parse().ok()?;
        return Some(scale_fraction((low + high) / 2.0));
    }

    if let Some(caps) = SINGLE_RE.captures(text) {
        return caps[1].parse::<f64>().ok().map(scale_fraction);
    }

    debug!(text, "Unparseable percentage");
    None
}
