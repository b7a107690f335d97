//! Error types for the diagnosis service.

use std::path::PathBuf;

use diagnosis_catalog::CatalogError;
use diagnosis_engine::EngineError;
use thiserror::Error;

/// Errors returned from [`DiagnosisService::diagnose`](crate::DiagnosisService::diagnose).
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The selection or catalog was rejected by the engine.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The catalog could not be read.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Failures while persisting a session. Logged, never returned to the caller
/// of a diagnosis.
#[derive(Debug, Error)]
pub enum RecorderError {
    #[error("session store {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode session record: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode session store {} line {line}: {source}", path.display())]
    Decode {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// The store refused the write.
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

pub type RecorderResult<T> = Result<T, RecorderError>;
