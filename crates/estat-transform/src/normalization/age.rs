//! Age band cleaning.

/// Deletes every non-digit and parses the remainder.
///
/// `"Y_LT1"` is `1`, `"Y25"` is `25`, `"Y_GE85"` is `85`. Codes without
/// digits such as `"TOTAL"` or `"UNK"` yield `None`.
pub fn clean_age(code: &str) -> Option<i64> {
    let digits: String = code.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_age_bands() {
        assert_eq!(clean_age("Y_LT1"), Some(1));
        assert_eq!(clean_age("Y25"), Some(25));
        assert_eq!(clean_age("Y_GE85"), Some(85));
        assert_eq!(clean_age("Y_OPEN"), None);
        assert_eq!(clean_age("TOTAL"), None);
    }
}
