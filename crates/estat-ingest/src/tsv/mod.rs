//! Tab-separated text parsing.

mod header;
mod reader;

pub use header::{TsvHeader, field_count};
pub use reader::{NULL_TOKENS, parse_tsv, validate_structure};
