//! Raw loading of Eurostat bulk exports.
//!
//! Eurostat distributes datasets as gzip-compressed, tab-separated files whose
//! first column packs every dimension into one comma-joined key. This crate
//! turns such a file (local or remote) into a [`RawTable`] of string columns
//! without interpreting the key or the values.
//!
//! # Example
//!
//! ```ignore
//! use estat_ingest::{DataSource, load_raw_table};
//!
//! let source = DataSource::parse("data/demo_mlexpec.tsv.gz");
//! let table = load_raw_table(&source)?;
//! println!("{} rows from {}", table.height(), table.origin());
//! ```

mod error;
mod source;
mod table;
mod tsv;

// === Error Types ===
pub use error::{IngestError, Result};

// === Sources ===
pub use source::{DataSource, MAX_SOURCE_FILE_SIZE, check_file_size_with_limit, decompress_gzip};

// === TSV Parsing ===
pub use table::{RawTable, load_raw_table, parse_raw_table};
pub use tsv::{NULL_TOKENS, TsvHeader, parse_tsv, validate_structure};
