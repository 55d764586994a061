//! Error types for the tabulon crate.
//!
//! The pipeline itself never fails: degenerate inputs resolve to defined
//! outputs. Errors only arise while loading records or configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading records or table configuration.
#[derive(Debug, Error)]
pub enum TableError {
    /// Reading a file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON input could not be parsed.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML input could not be parsed.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// CSV input could not be parsed.
    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A column width token was not recognised.
    #[error("invalid width '{0}': expected 'auto', '<n>%', '<n>', '<n>px' or '<n>ch'")]
    InvalidWidth(String),

    /// A sort direction was not recognised.
    #[error("invalid sort direction '{0}': expected 'asc' or 'desc'")]
    InvalidDirection(String),

    /// A named sort value extractor was not recognised.
    #[error("unknown sort value extractor '{0}'")]
    UnknownExtractor(String),

    /// The file extension does not map to a supported format.
    #[error("unsupported file format for {0}: expected .json, .yaml, .yml or .csv")]
    UnsupportedFormat(PathBuf),
}

/// Result type for tabulon operations.
pub type Result<T> = std::result::Result<T, TableError>;
