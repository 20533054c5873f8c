//! Composite key splitting.
//!
//! The first column of a Eurostat export packs every dimension into one
//! comma-joined key whose header names the dimensions and ends with
//! `\TIME_PERIOD`. Splitting is purely positional.

use polars::prelude::*;
use tracing::debug;

use estat_ingest::RawTable;
use estat_model::{DatasetProfile, TIME_PERIOD_SUFFIX};

use crate::error::{Result, TransformError};

/// A raw table whose key column has been replaced by one column per dimension.
#[derive(Debug, Clone)]
pub struct DimensionTable {
    /// Dimension columns (post-rename) followed by the untouched period columns.
    pub frame: DataFrame,
    /// Dimension column names after renames, in key order.
    pub dimensions: Vec<String>,
    /// Period column names in header order.
    pub year_columns: Vec<String>,
}

/// Locates the composite key column.
///
/// A header ending in `\TIME_PERIOD` wins; otherwise the only header that
/// contains a comma is used.
pub fn find_key_column(columns: &[String]) -> Result<usize> {
    let by_suffix: Vec<usize> = columns
        .iter()
        .enumerate()
        .filter(|(_, name)| name.trim_end().ends_with(TIME_PERIOD_SUFFIX))
        .map(|(idx, _)| idx)
        .collect();

    let candidates = if by_suffix.is_empty() {
        columns
            .iter()
            .enumerate()
            .filter(|(_, name)| name.contains(','))
            .map(|(idx, _)| idx)
            .collect()
    } else {
        by_suffix
    };

    match candidates.as_slice() {
        [idx] => Ok(*idx),
        [] => Err(TransformError::MissingKeyColumn {
            columns: columns.to_vec(),
        }),
        many => Err(TransformError::AmbiguousKeyColumn {
            candidates: many.iter().map(|idx| columns[*idx].clone()).collect(),
        }),
    }
}

/// Dimension names declared by a key header, suffix removed.
///
/// `"freq,unit,geo\TIME_PERIOD"` gives `["freq", "unit", "geo"]`.
pub fn key_dimension_names(header: &str) -> Vec<String> {
    let header = header.trim_end();
    let header = header.strip_suffix(TIME_PERIOD_SUFFIX).unwrap_or(header);
    header.split(',').map(str::to_string).collect()
}

/// Splits the key column of `raw` into the profile's dimensions.
pub fn split_dimensions(raw: &RawTable, profile: &DatasetProfile) -> Result<DimensionTable> {
    split_frame(raw.frame(), profile)
}

/// Splits the key column of a string-typed frame into the profile's dimensions.
///
/// Fails with a schema error when the key header or any row holds a different
/// number of fields than the profile declares.
pub fn split_frame(df: &DataFrame, profile: &DatasetProfile) -> Result<DimensionTable> {
    let columns: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let key_idx = find_key_column(&columns)?;
    let key_name = &columns[key_idx];
    let expected = profile.dimensions.len();

    let declared = key_dimension_names(key_name);
    if declared.len() != expected {
        return Err(TransformError::HeaderDimensionMismatch {
            column: key_name.clone(),
            expected,
            found: declared.len(),
        });
    }

    let keys = df.column(key_name)?.str()?;
    let mut values: Vec<Vec<&str>> = vec![Vec::with_capacity(df.height()); expected];

    for (row, key) in keys.into_iter().enumerate() {
        let Some(key) = key else {
            return Err(TransformError::TokenCountMismatch {
                row,
                key: String::new(),
                expected,
                found: 0,
            });
        };
        let tokens: Vec<&str> = key.split(',').collect();
        if tokens.len() != expected {
            return Err(TransformError::TokenCountMismatch {
                row,
                key: key.to_string(),
                expected,
                found: tokens.len(),
            });
        }
        for (slot, token) in values.iter_mut().zip(tokens) {
            slot.push(token);
        }
    }

    let dimensions = profile.split_columns();
    let mut out: Vec<Column> = Vec::with_capacity(columns.len() - 1 + expected);
    for (name, column_values) in dimensions.iter().zip(values) {
        out.push(Series::new(name.as_str().into(), column_values).into());
    }

    let mut year_columns = Vec::with_capacity(columns.len() - 1);
    for (idx, name) in columns.iter().enumerate() {
        if idx == key_idx {
            continue;
        }
        out.push(df.column(name)?.clone());
        year_columns.push(name.clone());
    }

    let frame = DataFrame::new(out)?;
    debug!(
        rows = frame.height(),
        dimensions = dimensions.len(),
        year_columns = year_columns.len(),
        "split composite key"
    );

    Ok(DimensionTable {
        frame,
        dimensions,
        year_columns,
    })
}
