//! Raw table loading.

use polars::prelude::DataFrame;
use tracing::{debug, info};

use crate::error::Result;
use crate::source::DataSource;
use crate::tsv::{TsvHeader, parse_tsv};

/// A Eurostat export as loaded: one string column per tab-separated field.
///
/// The first column is the composite dimension key; the others are labelled
/// with time periods.
#[derive(Debug, Clone)]
pub struct RawTable {
    origin: String,
    header: TsvHeader,
    frame: DataFrame,
}

impl RawTable {
    /// Where the table was loaded from.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Column names exactly as they appear in the header line.
    pub fn columns(&self) -> &[String] {
        &self.header.columns
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn into_frame(self) -> DataFrame {
        self.frame
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn width(&self) -> usize {
        self.frame.width()
    }
}

/// Parses already decompressed TSV text into a [`RawTable`].
pub fn parse_raw_table(text: &str, origin: &str) -> Result<RawTable> {
    let (header, frame) = parse_tsv(text, origin)?;
    debug!(
        origin,
        rows = frame.height(),
        columns = frame.width(),
        "parsed TSV"
    );
    Ok(RawTable {
        origin: origin.to_string(),
        header,
        frame,
    })
}

/// Fetches, decompresses and parses a gzip-compressed TSV export.
pub fn load_raw_table(source: &DataSource) -> Result<RawTable> {
    let origin = source.origin();
    info!(source = %origin, "loading raw table");
    let text = source.read_text()?;
    parse_raw_table(&text, &origin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_raw_table() {
        let table = parse_raw_table(
            "freq,geo\\TIME_PERIOD\t2021 \t2022 \nA,AT\t81.3\t81.4 p\n",
            "inline",
        )
        .unwrap();

        assert_eq!(table.origin(), "inline");
        assert_eq!(table.columns(), ["freq,geo\\TIME_PERIOD", "2021 ", "2022 "]);
        assert_eq!(table.height(), 1);
        assert_eq!(table.width(), 3);
        assert_eq!(table.into_frame().height(), 1);
    }
}
