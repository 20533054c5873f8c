//! The split → reshape → clean pipeline driven by a [`DatasetProfile`].
//!
//! # Example
//!
//! ```ignore
//! use estat_ingest::DataSource;
//! use estat_model::DatasetProfile;
//! use estat_transform::run_pipeline;
//!
//! let source = DataSource::parse("data/ilc_iw01.tsv.gz");
//! let output = run_pipeline(&source, &DatasetProfile::poverty_rate())?;
//! println!("{} rows, {} dropped", output.stats.output_rows, output.stats.dropped_rows);
//! ```

use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::{debug, info, info_span};

use estat_ingest::{DataSource, RawTable, load_raw_table};
use estat_model::DatasetProfile;

use crate::clean::{clean_rows, filter_age, prune_columns};
use crate::error::{PipelineResult, Result, TransformError};
use crate::reshape::unpivot_years;
use crate::split::split_dimensions;

/// Row counts collected while running a pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    /// Data rows in the raw table.
    pub raw_rows: usize,
    /// Period columns unpivoted.
    pub year_columns: usize,
    /// Rows after unpivoting (`raw_rows * year_columns`).
    pub expanded_rows: usize,
    /// Rows removed because year, value or age failed to clean.
    pub dropped_rows: usize,
    /// Rows removed by the profile's age filter.
    pub filtered_rows: usize,
    pub output_rows: usize,
}

/// Cleaned long-form table plus the counts that produced it.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub frame: DataFrame,
    pub stats: PipelineStats,
}

/// Splits, reshapes, cleans, filters and prunes an already loaded table.
pub fn transform_raw(raw: &RawTable, profile: &DatasetProfile) -> Result<PipelineOutput> {
    profile.validate()?;
    let span = info_span!("transform", profile = %profile.name, source = raw.origin());
    let _guard = span.enter();

    let table = split_dimensions(raw, profile)?;
    let long = unpivot_years(&table)?;
    let cleaned = clean_rows(&long, profile)?;

    let filtered = match profile.age_filter {
        Some(age) => filter_age(&cleaned, age)?,
        None => cleaned.clone(),
    };
    let frame = prune_columns(&filtered, profile)?;

    let stats = PipelineStats {
        raw_rows: raw.height(),
        year_columns: table.year_columns.len(),
        expanded_rows: long.height(),
        dropped_rows: long.height() - cleaned.height(),
        filtered_rows: cleaned.height() - filtered.height(),
        output_rows: frame.height(),
    };
    debug!(?stats, "pipeline statistics");
    info!(rows = stats.output_rows, "pipeline complete");

    Ok(PipelineOutput { frame, stats })
}

/// Loads `source` and runs the profile's pipeline over it.
pub fn run_pipeline(
    source: &DataSource,
    profile: &DatasetProfile,
) -> PipelineResult<PipelineOutput> {
    profile.validate().map_err(TransformError::from)?;
    let raw = load_raw_table(source)?;
    Ok(transform_raw(&raw, profile)?)
}

/// Life expectancy by sex, age and country.
///
/// Columns: `sex`, `age` (`i64`), `country`, `year` (`i64`), `life_exp` (`f64`).
pub fn life_expectancy(source: &DataSource) -> PipelineResult<DataFrame> {
    Ok(run_pipeline(source, &DatasetProfile::life_expectancy())?.frame)
}

/// Life expectancy of the under-one age band.
///
/// Columns: `sex`, `country`, `year` (`i64`), `life_exp` (`f64`).
pub fn infant_life_expectancy(source: &DataSource) -> PipelineResult<DataFrame> {
    Ok(run_pipeline(source, &DatasetProfile::infant_life_expectancy())?.frame)
}

/// In-work at-risk-of-poverty rate.
///
/// Columns: `freq`, `wstatus`, `sex`, `age`, `unit`, `country`, `year` (`i64`),
/// `poverty_rate` (`f64`).
pub fn poverty_rate(source: &DataSource) -> PipelineResult<DataFrame> {
    Ok(run_pipeline(source, &DatasetProfile::poverty_rate())?.frame)
}
