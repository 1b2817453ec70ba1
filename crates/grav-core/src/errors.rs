//! Cross-cutting error types for gravcheck.
//!
//! Transport and workflow errors live in `grav-client` and `grav-verify`.
//! They converge into `anyhow` in `grav-cli`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// An expected schema file could not be read.
    #[error("failed to read expected schema {path}: {source}")]
    SchemaRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An expected schema file is not valid JSON of the expected shape.
    #[error("failed to parse expected schema {path}: {source}")]
    SchemaParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Data failed validation (duplicates, empty names).
    #[error("Validation error: {0}")]
    Validation(String),
}
