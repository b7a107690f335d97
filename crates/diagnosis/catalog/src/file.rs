//! Read-only catalog backed by a JSON or TOML file.
//!
//! The file is re-read on every snapshot, so edits on disk are picked up by
//! the next diagnosis without restarting.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use diagnosis_types::{Damage, RuleDefinition, Symptom};

use crate::document::{CatalogDocument, CatalogFormat};
use crate::error::{CatalogError, CatalogResult};
use crate::provider::CatalogProvider;
use crate::snapshot::CatalogSnapshot;

/// Catalog loaded from a file on each request.
#[derive(Debug)]
pub struct FileCatalog {
    path: PathBuf,
    format: CatalogFormat,
    loads: AtomicU64,
}

impl FileCatalog {
    /// Point at `path`; the format comes from its extension.
    pub fn new(path: impl Into<PathBuf>) -> CatalogResult<Self> {
        let path = path.into();
        let format = CatalogFormat::from_path(&path)?;
        Ok(Self::with_format(path, format))
    }

    pub fn with_format(path: impl Into<PathBuf>, format: CatalogFormat) -> Self {
        Self {
            path: path.into(),
            format,
            loads: AtomicU64::new(0),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> CatalogFormat {
        self.format
    }

    /// Read and parse the file.
    pub async fn load(&self) -> CatalogResult<CatalogDocument> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| CatalogError::Io {
                path: self.path.clone(),
                source,
            })?;
        let document = CatalogDocument::parse(&text, self.format)?;
        let load = self.loads.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(
            path = %self.path.display(),
            load,
            symptoms = document.symptoms.len(),
            damages = document.damages.len(),
            rules = document.rules.len(),
            "Loaded catalog file"
        );
        Ok(document)
    }
}

#[async_trait]
impl CatalogProvider for FileCatalog {
    async fn get_symptoms(&self) -> CatalogResult<Vec<Symptom>> {
        Ok(self.load().await?.symptoms)
    }

    async fn get_damages(&self) -> CatalogResult<Vec<Damage>> {
        Ok(self.load().await?.damages)
    }

    async fn get_rule_definitions(&self) -> CatalogResult<Vec<RuleDefinition>> {
        Ok(self.load().await?.rules)
    }

    /// Number of successful loads so far.
    async fn revision(&self) -> CatalogResult<u64> {
        Ok(self.loads.load(Ordering::Relaxed))
    }

    async fn snapshot(&self) -> CatalogResult<Arc<CatalogSnapshot>> {
        let document = self.load().await?;
        let revision = self.loads.load(Ordering::Relaxed);
        Ok(Arc::new(document.to_snapshot(revision)))
    }
}
