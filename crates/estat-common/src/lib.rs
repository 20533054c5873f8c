//! Shared utilities for the Eurostat reshaping crates.
//!
//! Holds the Polars `AnyValue` rendering used when writing cleaned frames out.

pub mod polars;

pub use polars::{any_to_string, column_string, format_numeric};
