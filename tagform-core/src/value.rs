//! Value coercions shared by validation and rendering.

use std::collections::HashMap;

/// Returns the supplied value for `name`, treating missing and blank values alike.
pub fn filled<'a>(values: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    values
        .get(name)
        .map(String::as_str)
        .filter(|value| !value.trim().is_empty())
}

/// Prepends `https://` unless the value already starts with `http://` or `https://`.
pub fn with_scheme(value: &str) -> String {
    let value = value.trim();
    if value.starts_with("http://") || value.starts_with("https://") {
        value.to_string()
    } else {
        format!("https://{}", value)
    }
}

/// Parses a finite number, ignoring surrounding whitespace.
pub fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

/// Canonical text of a number: `"007"` becomes `"7"` and `"1.50"` becomes `"1.5"`.
pub fn normalize_number(value: &str) -> String {
    match parse_number(value) {
        Some(number) if number == 0.0 => "0".to_string(),
        Some(number) => number.to_string(),
        None => value.to_string(),
    }
}
