//! TSV reading into Polars with Eurostat null tokens.

use std::io::Cursor;
use std::sync::Arc;

use polars::prelude::*;

use crate::error::{IngestError, Result};

use super::header::{TsvHeader, field_count};

/// Cell contents read as missing values.
pub const NULL_TOKENS: [&str; 3] = ["", ":", ": "];

/// Checks that every data line has as many fields as the header.
///
/// Blank lines are skipped. Returns the header and the text with blank
/// lines removed, ready for the Polars reader.
pub fn validate_structure(text: &str, origin: &str) -> Result<(TsvHeader, String)> {
    let mut lines = text.lines().enumerate();

    let header = match lines.next() {
        Some((_, line)) if !line.trim().is_empty() => TsvHeader::parse(line),
        _ => {
            return Err(IngestError::EmptyFile {
                origin: origin.to_string(),
            });
        }
    };

    let mut body = String::with_capacity(text.len());
    body.push_str(&header.columns.join("\t"));
    body.push('\n');

    for (index, line) in lines {
        if line.is_empty() {
            continue;
        }
        let found = field_count(line);
        if found != header.len() {
            return Err(IngestError::RaggedRow {
                origin: origin.to_string(),
                line: index + 1,
                expected: header.len(),
                found,
            });
        }
        body.push_str(line.strip_suffix('\r').unwrap_or(line));
        body.push('\n');
    }

    Ok((header, body))
}

/// Parses decompressed TSV text into a DataFrame of string columns.
///
/// Column names are taken verbatim from the header line. Every column is read
/// as a string; cells equal to one of [`NULL_TOKENS`] become nulls.
pub fn parse_tsv(text: &str, origin: &str) -> Result<(TsvHeader, DataFrame)> {
    let (header, body) = validate_structure(text, origin)?;

    if let Some(duplicate) = header.first_duplicate() {
        return Err(IngestError::TsvParse {
            origin: origin.to_string(),
            message: format!("duplicate column '{duplicate}'"),
        });
    }

    let schema = Schema::from_iter(
        header
            .columns
            .iter()
            .map(|name| Field::new(name.as_str().into(), DataType::String)),
    );
    let null_values = NullValues::AllColumns(NULL_TOKENS.iter().map(|t| (*t).into()).collect());

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_schema(Some(Arc::new(schema)))
        .map_parse_options(|options| {
            options
                .with_separator(b'\t')
                .with_quote_char(None)
                .with_null_values(Some(null_values.clone()))
        })
        .into_reader_with_file_handle(Cursor::new(body.into_bytes()))
        .finish()
        .map_err(|e| IngestError::TsvParse {
            origin: origin.to_string(),
            message: e.to_string(),
        })?;

    Ok((header, df))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "freq,unit,sex,age,geo\\TIME_PERIOD\t2019 \t2020 \n\
                          A,YR,F,Y_LT1,DE\t83.7 \t: \n\
                          A,YR,M,Y_LT1,[IT]\t81.1 b\t:\n\
                          A,YR,T,Y_LT1,FR\t\t82.3 e\n";

    fn cell(df: &DataFrame, column: &str, idx: usize) -> Option<String> {
        let series = df.column(column).unwrap().as_materialized_series().clone();
        series.str().unwrap().get(idx).map(str::to_string)
    }

    #[test]
    fn test_parse_keeps_header_verbatim() {
        let (header, df) = parse_tsv(SAMPLE, "sample").unwrap();

        assert_eq!(header.columns[0], "freq,unit,sex,age,geo\\TIME_PERIOD");
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, header.columns);
        assert_eq!(df.height(), 3);
    }

    #[test]
    fn test_parse_recognizes_null_tokens() {
        let (_, df) = parse_tsv(SAMPLE, "sample").unwrap();

        assert_eq!(cell(&df, "2019 ", 0).as_deref(), Some("83.7 "));
        assert_eq!(cell(&df, "2020 ", 0), None);
        assert_eq!(cell(&df, "2020 ", 1), None);
        assert_eq!(cell(&df, "2019 ", 2), None);
        assert_eq!(cell(&df, "2019 ", 1).as_deref(), Some("81.1 b"));
        assert_eq!(cell(&df, "2020 ", 2).as_deref(), Some("82.3 e"));
    }

    #[test]
    fn test_parse_reads_every_column_as_string() {
        let (_, df) = parse_tsv("key\t2020\nA,B\t12\n", "numeric").unwrap();
        assert_eq!(df.column("2020").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let (_, df) = parse_tsv("key\t2020\n\nA,B\t1\r\n\n", "blank").unwrap();
        assert_eq!(df.height(), 1);
        assert_eq!(cell(&df, "2020", 0).as_deref(), Some("1"));
    }

    #[test]
    fn test_parse_header_only() {
        let (header, df) = parse_tsv("key\t2020\n", "header-only").unwrap();
        assert_eq!(header.len(), 2);
        assert_eq!(df.height(), 0);
    }

    #[test]
    fn test_ragged_row_reports_line() {
        let err = parse_tsv("key\t2019\t2020\nA,B\t1\t2\nA,C\t1\n", "ragged").unwrap_err();
        match err {
            IngestError::RaggedRow {
                line,
                expected,
                found,
                ..
            } => {
                assert_eq!(line, 3);
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            parse_tsv("", "empty"),
            Err(IngestError::EmptyFile { .. })
        ));
        assert!(matches!(
            parse_tsv("\n1\t2\n", "blank-header"),
            Err(IngestError::EmptyFile { .. })
        ));
    }

    #[test]
    fn test_duplicate_columns_rejected() {
        assert!(matches!(
            parse_tsv("key\t2020\t2020\nA\t1\t2\n", "dup"),
            Err(IngestError::TsvParse { .. })
        ));
    }
}
