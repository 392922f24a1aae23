//! Numeric coercion for loosely-formatted property values.
//!
//! Source values arrive as JSON numbers or as display strings such as
//! `"$1,250"`, `"4.3%"`, or `"$2,100 / month"`. Every function here returns
//! `None` instead of failing; a non-finite result is never produced.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Leading decimal number, in the manner of a lenient float parse
/// (`"45 years"` → `45`).
static DECIMAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)").expect("valid regex"));

/// Leading integer (`"2.5"` → `2`).
static INTEGER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d+").expect("valid regex"));

/// Unit suffixes removed before parsing.
const UNIT_SUFFIXES: &[&str] = &[" / month", "/month", " / mo", "/mo"];

/// Strips currency symbols, thousands separators, percent signs, and unit
/// suffixes, then trims surrounding whitespace.
#[must_use]
pub fn clean_numeric_text(raw: &str) -> String {
    let mut text = raw.replace(['$', ',', '%'], "");
    for suffix in UNIT_SUFFIXES {
        text = text.replace(suffix, "");
    }
    text.trim().to_string()
}

/// Parses a float from a display string.
#[must_use]
pub fn parse_f64(raw: &str) -> Option<f64> {
    let text = clean_numeric_text(raw);
    let number = DECIMAL_RE.find(&text)?;
    number
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Parses an integer from a display string, truncating any fraction.
#[must_use]
pub fn parse_i64(raw: &str) -> Option<i64> {
    let text = clean_numeric_text(raw);
    INTEGER_RE.find(&text)?.as_str().parse::<i64>().ok()
}

/// Coerces a JSON number or numeric string to a float.
#[must_use]
pub fn value_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_f64(s),
        _ => None,
    }
}

/// Coerces a JSON number or numeric string to an integer, truncating any
/// fraction.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn value_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|v| v.is_finite() && v.abs() < 9.0e15)
                .map(|v| v.trunc() as i64)
        }),
        Value::String(s) => parse_i64(s),
        _ => None,
    }
}

/// Treats zero as unknown.
#[must_use]
pub fn known_f64(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

/// Narrows to a non-zero, non-negative count.
#[must_use]
pub fn known_count(value: Option<i64>) -> Option<u32> {
    value
        .and_then(|v| u32::try_from(v).ok())
        .filter(|v| *v != 0)
}
