//! Typed observation extraction from cleaned frames.

use polars::prelude::{DataFrame, StringChunked};

use estat_model::{AGE_COLUMN, DatasetProfile, Observation, YEAR_COLUMN};

use crate::error::{Result, TransformError};

/// Reads the rows of a pipeline output frame back as [`Observation`]s.
///
/// Dimensions follow the profile's output order. A numeric age, when the
/// profile keeps one, goes to [`Observation::age`].
pub fn observations(df: &DataFrame, profile: &DatasetProfile) -> Result<Vec<Observation>> {
    for name in profile.output_columns() {
        if df.column(&name).is_err() {
            return Err(TransformError::UnknownDimension { name });
        }
    }

    let numeric_age = profile.has_numeric_age();
    let mut dimensions: Vec<(String, &StringChunked)> = Vec::new();
    for name in profile.output_dimensions() {
        if numeric_age && name == AGE_COLUMN {
            continue;
        }
        let ca = df.column(&name)?.str()?;
        dimensions.push((name, ca));
    }
    let ages = match df.column(AGE_COLUMN) {
        Ok(column) if numeric_age => Some(column.i64()?),
        _ => None,
    };
    let years = df.column(YEAR_COLUMN)?.i64()?;
    let values = df.column(&profile.value_column)?.f64()?;

    let mut rows = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let (Some(year), Some(value)) = (years.get(idx), values.get(idx)) else {
            continue;
        };
        rows.push(Observation {
            dimensions: dimensions
                .iter()
                .map(|(name, ca)| (name.clone(), ca.get(idx).unwrap_or_default().to_string()))
                .collect(),
            age: ages.and_then(|ages| ages.get(idx)),
            year,
            value,
        });
    }
    Ok(rows)
}
