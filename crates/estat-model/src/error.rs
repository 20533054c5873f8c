//! Error types for profile definitions and catalogs.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Class of a fatal pipeline failure.
///
/// Every fatal error raised while loading or reshaping an export belongs to
/// one of these classes. Row-level cleaning failures are never errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Source unreachable, unreadable or not decompressable.
    Io,
    /// Source is not well-formed tab-separated text.
    Format,
    /// Composite key layout does not match the configured dimensions.
    Schema,
}

impl ErrorKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Io => "IOError",
            Self::Format => "FormatError",
            Self::Schema => "SchemaError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors raised while building or validating dataset profiles.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Profile declares no dimensions.
    #[error("profile '{profile}' declares no dimensions")]
    EmptyDimensions { profile: String },

    /// Same dimension name declared twice.
    #[error("profile '{profile}' declares dimension '{name}' more than once")]
    DuplicateDimension { profile: String, name: String },

    /// Rename refers to a dimension that is not declared.
    #[error("profile '{profile}' renames unknown dimension '{name}'")]
    UnknownRename { profile: String, name: String },

    /// Pruned column is not a (renamed) dimension.
    #[error("profile '{profile}' prunes unknown column '{name}'")]
    UnknownPrune { profile: String, name: String },

    /// Value column name collides with a dimension or the year column.
    #[error("profile '{profile}' value column '{name}' collides with another column")]
    ValueColumnCollision { profile: String, name: String },

    /// Age cleaning or filtering configured without an `age` dimension.
    #[error("profile '{profile}' cleans or filters age but has no 'age' dimension")]
    MissingAgeDimension { profile: String },

    /// Age filter requires the digit age rule.
    #[error("profile '{profile}' filters on age but does not clean age to integers")]
    AgeFilterWithoutDigits { profile: String },

    /// Two profiles share a name inside one catalog.
    #[error("profile '{name}' is defined more than once")]
    DuplicateProfile { name: String },

    /// Lookup for a profile that is not in the catalog.
    #[error("unknown profile '{name}' (available: {})", available.join(", "))]
    UnknownProfile {
        name: String,
        available: Vec<String>,
    },

    /// Failed to read a catalog file.
    #[error("failed to read profile catalog {path}: {source}")]
    CatalogRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog file is not valid TOML for the profile schema.
    #[error("invalid profile catalog: {0}")]
    CatalogParse(#[from] toml::de::Error),
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
