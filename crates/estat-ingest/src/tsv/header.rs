//! TSV header parsing.

use std::collections::BTreeSet;

/// Column names from the first line of a TSV export, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsvHeader {
    pub columns: Vec<String>,
}

impl TsvHeader {
    /// Parses a header line. Only a trailing carriage return is removed;
    /// names are not trimmed.
    pub fn parse(line: &str) -> Self {
        let line = line.strip_suffix('\r').unwrap_or(line);
        Self {
            columns: line.split('\t').map(str::to_string).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// First name that appears more than once.
    pub fn first_duplicate(&self) -> Option<&str> {
        let mut seen = BTreeSet::new();
        self.columns
            .iter()
            .find(|name| !seen.insert(name.as_str()))
            .map(String::as_str)
    }
}

/// Number of fields on a data line.
pub fn field_count(line: &str) -> usize {
    let line = line.strip_suffix('\r').unwrap_or(line);
    line.split('\t').count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_kept_verbatim() {
        let header = TsvHeader::parse("freq,unit,sex,age,geo\\TIME_PERIOD\t2019 \t2020 \r");
        assert_eq!(
            header.columns,
            vec!["freq,unit,sex,age,geo\\TIME_PERIOD", "2019 ", "2020 "]
        );
        assert_eq!(header.len(), 3);
    }

    #[test]
    fn test_first_duplicate() {
        assert_eq!(TsvHeader::parse("k\t2019\t2019").first_duplicate(), Some("2019"));
        assert_eq!(TsvHeader::parse("k\t2019\t2020").first_duplicate(), None);
    }

    #[test]
    fn test_field_count() {
        assert_eq!(field_count("A,F,DE\t1.0\t:"), 3);
        assert_eq!(field_count("A,F,DE\t\t\r"), 3);
        assert_eq!(field_count(""), 1);
    }
}
