//! On-disk catalog document.
//!
//! ```json
//! {
//!   "symptoms": [{ "id": "G01", "name": "Engine hard to start" }],
//!   "damages":  [{ "id": "K01", "name": "Fouled spark plug", "solution": "..." }],
//!   "rules":    [{ "id": "R01", "damage_id": "K01",
//!                  "symptoms": [{ "symptom_id": "G01", "cf_expert": 0.8 }] }]
//! }
//! ```
//!
//! The same shape is accepted as TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};

use diagnosis_types::{Damage, RuleDefinition, Symptom};

use crate::error::{CatalogError, CatalogResult};
use crate::snapshot::CatalogSnapshot;

/// Serialization format of a catalog file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Toml,
}

impl CatalogFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> CatalogResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            other => Err(CatalogError::UnsupportedFormat(if other.is_empty() {
                path.display().to_string()
            } else {
                other.to_string()
            })),
        }
    }
}

/// Flat, storable catalog: records reference each other by code only.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub symptoms: Vec<Symptom>,
    #[serde(default)]
    pub damages: Vec<Damage>,
    #[serde(default)]
    pub rules: Vec<RuleDefinition>,
}

impl CatalogDocument {
    pub fn parse(text: &str, format: CatalogFormat) -> CatalogResult<Self> {
        match format {
            CatalogFormat::Json => Ok(serde_json::from_str(text)?),
            CatalogFormat::Toml => Ok(toml::from_str(text)?),
        }
    }

    pub fn to_json_pretty(&self) -> CatalogResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Join the records into an evaluable snapshot.
    pub fn to_snapshot(&self, revision: u64) -> CatalogSnapshot {
        CatalogSnapshot::assemble(
            self.symptoms.clone(),
            self.damages.clone(),
            &self.rules,
            revision,
        )
    }
}
