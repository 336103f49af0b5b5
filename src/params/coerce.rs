//! Scalar coercions from raw strings and JSON values.
//!
//! Path and query inputs always arrive as text; JSON bodies already carry
//! types but are accepted leniently (numeric strings for numbers, integral
//! floats for integers).

use serde_json::Value;

use super::detail::{expected_list, Violation};

/// A closed set of string values: enums and literal unions.
pub trait Choice: Sized + Copy + 'static {
    const VARIANTS: &'static [Self];

    /// Literal unions report `literal_error`, enums report `enum`.
    const LITERAL: bool = false;

    fn as_str(self) -> &'static str;
}

/// Decimal integer. Accepts `_` between digits and a zero fraction
/// (`"1_000"`, `"4.0"`). Values outside `i64` are rejected.
pub fn int(raw: &str) -> Result<i64, Violation> {
    let digits = strip_zero_fraction(raw.trim());
    if !separators_valid(digits) {
        return Err(Violation::IntParsing);
    }
    digits
        .replace('_', "")
        .parse()
        .map_err(|_| Violation::IntParsing)
}

/// `"4.000"` and `"4."` become `"4"`; anything else is returned unchanged.
fn strip_zero_fraction(raw: &str) -> &str {
    match raw.split_once('.') {
        Some((whole, fraction)) if fraction.bytes().all(|b| b == b'0') => whole,
        _ => raw,
    }
}

/// Every `_` must sit between two digits.
fn separators_valid(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.iter().enumerate().all(|(i, b)| {
        *b != b'_'
            || (i > 0
                && bytes[i - 1].is_ascii_digit()
                && bytes.get(i + 1).is_some_and(u8::is_ascii_digit))
    })
}

pub fn float(raw: &str) -> Result<f64, Violation> {
    raw.trim().parse().map_err(|_| Violation::FloatParsing)
}

pub fn boolean(raw: &str) -> Result<bool, Violation> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "f" | "no" | "n" | "off" => Ok(false),
        _ => Err(Violation::BoolParsing),
    }
}

pub fn choice<T: Choice>(raw: &str) -> Result<T, Violation> {
    T::VARIANTS
        .iter()
        .copied()
        .find(|v| v.as_str() == raw)
        .ok_or_else(|| {
            let names: Vec<&str> = T::VARIANTS.iter().map(|v| v.as_str()).collect();
            let expected = expected_list(&names);
            if T::LITERAL {
                Violation::Literal { expected }
            } else {
                Violation::Enum { expected }
            }
        })
}

pub fn json_string(value: &Value) -> Result<String, Violation> {
    match value {
        Value::String(s) => Ok(s.clone()),
        _ => Err(Violation::StringType),
    }
}

pub fn json_float(value: &Value) -> Result<f64, Violation> {
    match value {
        Value::Number(n) => n.as_f64().ok_or(Violation::FloatType),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => float(s),
        _ => Err(Violation::FloatType),
    }
}

pub fn json_int(value: &Value) -> Result<i64, Violation> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 => {
                    Ok(f as i64)
                }
                Some(f) if f.fract() != 0.0 => Err(Violation::IntFromFloat),
                _ => Err(Violation::IntType),
            }
        }
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::String(s) => int(s),
        _ => Err(Violation::IntType),
    }
}
