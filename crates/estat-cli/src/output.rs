//! Result writers.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::{CsvWriter, DataFrame, SerWriter};

use estat_common::column_string;
use estat_model::DatasetProfile;
use estat_transform::{ISO3_COLUMN, observations};

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Comma-separated values with a header row.
    Csv,
    /// One JSON observation per line.
    JsonLines,
}

/// Writes the frame as CSV.
pub fn write_csv<W: Write>(df: &DataFrame, mut writer: W) -> Result<()> {
    let mut df = df.clone();
    CsvWriter::new(&mut writer)
        .include_header(true)
        .finish(&mut df)
        .context("write CSV")?;
    writer.flush().context("flush output")?;
    Ok(())
}

/// Writes one JSON object per observation.
///
/// A `country_iso3` column, when present, is carried as an extra dimension.
pub fn write_json_lines<W: Write>(
    df: &DataFrame,
    profile: &DatasetProfile,
    mut writer: W,
) -> Result<usize> {
    let mut rows = observations(df, profile)?;
    if df.column(ISO3_COLUMN).is_ok() {
        for (idx, row) in rows.iter_mut().enumerate() {
            row.dimensions
                .push((ISO3_COLUMN.to_string(), column_string(df, ISO3_COLUMN, idx)));
        }
    }
    for row in &rows {
        serde_json::to_writer(&mut writer, row).context("serialize observation")?;
        writer.write_all(b"\n").context("write observation")?;
    }
    writer.flush().context("flush output")?;
    Ok(rows.len())
}

/// Writes the frame to `path` in `format`.
pub fn write_output(
    df: &DataFrame,
    profile: &DatasetProfile,
    path: &Path,
    format: OutputFormat,
) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let writer = BufWriter::new(file);
    match format {
        OutputFormat::Csv => write_csv(df, writer),
        OutputFormat::JsonLines => write_json_lines(df, profile, writer).map(|_| ()),
    }
    .with_context(|| format!("write {}", path.display()))
}
