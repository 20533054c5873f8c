//! Year label cleaning.

use std::sync::LazyLock;

use estat_model::YearRule;
use regex::Regex;

static FOUR_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]{4})").expect("Invalid year regex"));

/// Cleans a time period label according to `rule`.
pub fn clean_year(rule: YearRule, label: &str) -> Option<i64> {
    match rule {
        YearRule::StripSpaces => strip_spaces(label),
        YearRule::FirstFourDigits => first_four_digits(label),
    }
}

/// Removes every space and parses the rest as an integer.
///
/// `"2020 "` parses; `"2020Q1"` does not.
pub fn strip_spaces(label: &str) -> Option<i64> {
    let compact: String = label.chars().filter(|c| *c != ' ').collect();
    compact.parse().ok()
}

/// Parses the first run of four digits anywhere in the label.
pub fn first_four_digits(label: &str) -> Option<i64> {
    FOUR_DIGITS
        .captures(label)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
