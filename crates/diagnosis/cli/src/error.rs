//! CLI error types

use diagnosis_catalog::CatalogError;
use diagnosis_service::{RecorderError, ServiceError};
use thiserror::Error;

/// CLI error types
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Recorder(#[from] RecorderError),

    /// No catalog given on the command line or in configuration
    #[error("No catalog file given (use --catalog, CFDX_CATALOG or `catalog` in the config file)")]
    MissingCatalog,

    /// No session store configured
    #[error("No session store configured (use --store or `sessions.store` in the config file)")]
    MissingSessionStore,

    /// `validate` found problems
    #[error("Catalog has {0} integrity issue(s)")]
    Integrity(usize),

    /// JSON encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
