//! Country code cleaning.

/// Removes every `[` and `]` footnote bracket from a geo code.
///
/// `"[DE_TOT]"` becomes `"DE_TOT"`; `"CH"` is unchanged.
pub fn clean_country(code: &str) -> String {
    code.chars().filter(|c| !matches!(c, '[' | ']')).collect()
}
