//! Error types for catalog access.

use std::path::PathBuf;

use diagnosis_types::Role;
use thiserror::Error;

/// Errors that can occur while reading or editing a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The acting role may not perform this operation.
    #[error("{role} may not {action}")]
    Forbidden { role: Role, action: &'static str },

    /// A record to update or remove does not exist.
    #[error("{collection} {code} not found")]
    NotFound {
        collection: &'static str,
        code: String,
    },

    /// The catalog file could not be read.
    #[error("failed to read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog file is not valid JSON for the document schema.
    #[error("invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    /// The catalog file is not valid TOML for the document schema.
    #[error("invalid TOML catalog: {0}")]
    Toml(#[from] toml::de::Error),

    /// The file extension maps to no known format.
    #[error("unsupported catalog format: {0}")]
    UnsupportedFormat(String),
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
