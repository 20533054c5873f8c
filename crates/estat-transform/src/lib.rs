//! Reshaping of Eurostat wide exports into clean long-form tables.
//!
//! - **split**: composite key column to one column per dimension
//! - **reshape**: period columns to `(year, value)` rows
//! - **normalization**: year, value, country and age cleaning rules
//! - **clean**: row cleaning, age filtering, column pruning
//! - **pipeline**: the profile-driven chain of the above
//! - **countries**: ISO alpha-3 enrichment for map consumers
//! - **observations**: typed rows read back from output frames

pub mod clean;
pub mod countries;
mod error;
pub mod normalization;
pub mod observations;
pub mod pipeline;
pub mod reshape;
pub mod split;

// === Error Types ===
pub use error::{PipelineError, PipelineResult, Result, TransformError};

// === Pipeline ===
pub use pipeline::{
    PipelineOutput, PipelineStats, infant_life_expectancy, life_expectancy, poverty_rate,
    run_pipeline, transform_raw,
};

// === Stages ===
pub use clean::{clean_rows, filter_age, prune_columns};
pub use countries::{ISO3_COLUMN, attach_iso3};
pub use observations::observations;
pub use reshape::{RAW_VALUE_COLUMN, unpivot_years};
pub use split::{DimensionTable, find_key_column, key_dimension_names, split_dimensions, split_frame};
