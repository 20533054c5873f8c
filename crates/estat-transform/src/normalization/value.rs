//! Observation value cleaning.
//!
//! Eurostat appends flag letters to values (`b` break in series, `e`
//! estimated, `p` provisional, ...) and uses `:` for missing data.

use std::sync::LazyLock;

use estat_model::ValueRule;
use regex::Regex;

static FIRST_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+(\.[0-9]+)?)").expect("Invalid number regex"));

/// Cleans a raw cell according to `rule`. Non-finite results are rejected.
pub fn clean_value(rule: ValueRule, raw: &str) -> Option<f64> {
    let value = match rule {
        ValueRule::StripNonNumeric => strip_non_numeric(raw),
        ValueRule::FirstNumber => first_number(raw),
    }?;
    value.is_finite().then_some(value)
}

/// Deletes every character other than digits and `.`, then parses.
pub fn strip_non_numeric(raw: &str) -> Option<f64> {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    kept.parse().ok()
}

/// Parses the first `digits[.digits]` run in the cell.
pub fn first_number(raw: &str) -> Option<f64> {
    FIRST_NUMBER
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_non_numeric_removes_flags() {
        assert_eq!(strip_non_numeric("78.3 b"), Some(78.3));
        assert_eq!(strip_non_numeric("83.7 "), Some(83.7));
        assert_eq!(strip_non_numeric("81 ep"), Some(81.0));
        assert_eq!(strip_non_numeric(":"), None);
        assert_eq!(strip_non_numeric(": c"), None);
        assert_eq!(strip_non_numeric("1.2.3"), None);
    }

    #[test]
    fn first_number_takes_leading_match() {
        assert_eq!(first_number("12.5 p"), Some(12.5));
        assert_eq!(first_number("9 b"), Some(9.0));
        assert_eq!(first_number("1.2.3"), Some(1.2));
        assert_eq!(first_number("7."), Some(7.0));
        assert_eq!(first_number(": u"), None);
    }

    #[test]
    fn clean_value_rejects_overflow() {
        let huge = "9".repeat(400);
        assert_eq!(clean_value(ValueRule::StripNonNumeric, &huge), None);
        assert_eq!(clean_value(ValueRule::FirstNumber, "5.5 e"), Some(5.5));
    }
}
