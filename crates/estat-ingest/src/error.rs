//! Error types for raw Eurostat loading.

use std::path::PathBuf;

use estat_model::ErrorKind;
use thiserror::Error;

/// Errors that can occur while fetching, decompressing or parsing a source.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Source Errors ===
    /// Source file not found.
    #[error("source file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source file exceeds the size limit.
    #[error("source file {path} is {size} bytes (limit {max_size})")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// Request failed before a response arrived.
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status.
    #[error("fetching {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    // === Decoding Errors ===
    /// Payload is not a valid gzip stream.
    #[error("failed to decompress {origin}: {source}")]
    Decompress {
        origin: String,
        #[source]
        source: std::io::Error,
    },

    /// Decompressed payload is not UTF-8.
    #[error("{origin} is not valid UTF-8 after decompression")]
    Encoding { origin: String },

    // === TSV Errors ===
    /// No header line.
    #[error("TSV source is empty: {origin}")]
    EmptyFile { origin: String },

    /// A data line has a different field count than the header.
    #[error("{origin} line {line}: expected {expected} tab-separated fields, found {found}")]
    RaggedRow {
        origin: String,
        line: usize,
        expected: usize,
        found: usize,
    },

    /// Header or body could not be parsed as tab-separated text.
    #[error("failed to parse TSV {origin}: {message}")]
    TsvParse { origin: String, message: String },
}

impl IngestError {
    /// Pipeline error class of this failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FileNotFound { .. }
            | Self::FileRead { .. }
            | Self::FileTooLarge { .. }
            | Self::Fetch { .. }
            | Self::HttpStatus { .. }
            | Self::Decompress { .. }
            | Self::Encoding { .. } => ErrorKind::Io,
            Self::EmptyFile { .. }
            | Self::RaggedRow { .. }
            | Self::TsvParse { .. } => ErrorKind::Format,
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
