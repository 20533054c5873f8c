//! ISO alpha-3 enrichment for map consumers.

use polars::prelude::*;
use tracing::debug;

use estat_model::{COUNTRY_COLUMN, is_map_excluded, iso2_to_iso3};

use crate::error::{Result, TransformError};

/// Column added by [`attach_iso3`].
pub const ISO3_COLUMN: &str = "country_iso3";

/// Adds a `country_iso3` column and keeps only rows that name a mappable
/// country.
///
/// Aggregates (`EU27_2020`, `EA20`, `DE_TOT`, ...), San Marino and codes
/// missing from the ISO table are removed.
pub fn attach_iso3(df: &DataFrame) -> Result<DataFrame> {
    let countries = df
        .column(COUNTRY_COLUMN)
        .and_then(|column| column.str())
        .map_err(|_| TransformError::UnknownDimension {
            name: COUNTRY_COLUMN.to_string(),
        })?;

    let iso3: Vec<Option<&str>> = countries
        .into_iter()
        .map(|code| {
            code.filter(|code| !is_map_excluded(code))
                .and_then(iso2_to_iso3)
        })
        .collect();
    let keep: Vec<bool> = iso3.iter().map(Option::is_some).collect();
    let mask = BooleanChunked::from_slice("keep".into(), &keep);

    let mut enriched = df.clone();
    enriched.with_column(Series::new(ISO3_COLUMN.into(), iso3))?;
    let filtered = enriched.filter(&mask)?;

    debug!(
        rows = df.height(),
        kept = filtered.height(),
        "attached ISO alpha-3 codes"
    );
    Ok(filtered)
}
