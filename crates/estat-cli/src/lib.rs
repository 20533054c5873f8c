//! CLI library components for the `estat` binary.

pub mod catalog;
pub mod logging;
pub mod output;
