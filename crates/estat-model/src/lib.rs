//! Data model for the Eurostat reshaping pipeline.
//!
//! - **profile**: per-dataset configuration driving the generic pipeline
//! - **catalog**: named profile collections, built in or loaded from TOML
//! - **country**: ISO 3166 alpha-2 to alpha-3 mapping and aggregate geo codes
//! - **observation**: the long-form row handed to downstream consumers

pub mod catalog;
pub mod country;
pub mod error;
pub mod observation;
pub mod profile;

pub use catalog::ProfileCatalog;
pub use country::{is_aggregate_code, is_map_excluded, iso2_to_iso3, iso3_mapping};
pub use error::{ErrorKind, ModelError, Result};
pub use observation::Observation;
pub use profile::{
    AGE_COLUMN, AgeRule, COUNTRY_COLUMN, DatasetProfile, INFANT_AGE, RAW_VALUE_COLUMN, Rename,
    TIME_PERIOD_SUFFIX, ValueRule, YEAR_COLUMN, YearRule,
};
