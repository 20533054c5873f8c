//! Error types for splitting and reshaping.

use estat_ingest::IngestError;
use estat_model::{ErrorKind, ModelError};
use thiserror::Error;

/// Errors raised while splitting the composite key or reshaping a table.
#[derive(Debug, Error)]
pub enum TransformError {
    /// No header looks like a composite dimension key.
    #[error("no composite key column found among: {}", columns.join(", "))]
    MissingKeyColumn { columns: Vec<String> },

    /// More than one header looks like a composite dimension key.
    #[error("ambiguous composite key column: {}", candidates.join(", "))]
    AmbiguousKeyColumn { candidates: Vec<String> },

    /// Key header names a different number of dimensions than configured.
    #[error("key column '{column}' names {found} dimensions, expected {expected}")]
    HeaderDimensionMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    /// A row's key splits into the wrong number of fields.
    #[error("row {row}: key '{key}' has {found} fields, expected {expected}")]
    TokenCountMismatch {
        row: usize,
        key: String,
        expected: usize,
        found: usize,
    },

    /// A required dimension column is absent from the frame.
    #[error("column '{name}' not found")]
    UnknownDimension { name: String },

    /// Profile is inconsistent.
    #[error(transparent)]
    Profile(#[from] ModelError),

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl TransformError {
    /// Pipeline error class of this failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DataFrame { .. } => ErrorKind::Format,
            _ => ErrorKind::Schema,
        }
    }
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Any fatal failure of a full load-and-reshape run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Transform(#[from] TransformError),
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Ingest(err) => err.kind(),
            Self::Transform(err) => err.kind(),
        }
    }
}

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;

/// Result type for full pipeline runs.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
