//! Catalog provider trait.

use std::sync::Arc;

use async_trait::async_trait;

use diagnosis_types::{Damage, Rule, RuleDefinition, Symptom};

use crate::error::CatalogResult;
use crate::snapshot::CatalogSnapshot;

/// Source of catalog data for diagnosis.
///
/// Implementors only need to supply the flat lists; the provided methods
/// join them.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// All symptoms, in catalog order.
    async fn get_symptoms(&self) -> CatalogResult<Vec<Symptom>>;

    /// All damages, in catalog order.
    async fn get_damages(&self) -> CatalogResult<Vec<Damage>>;

    /// All rules in stored (unjoined) form, in catalog order.
    async fn get_rule_definitions(&self) -> CatalogResult<Vec<RuleDefinition>>;

    /// Edit counter of the underlying catalog.
    async fn revision(&self) -> CatalogResult<u64> {
        Ok(0)
    }

    /// Rules joined with their damage and symptom records.
    async fn get_rules(&self) -> CatalogResult<Vec<Rule>> {
        Ok(self.snapshot().await?.rules().to_vec())
    }

    /// A consistent, immutable view of the whole catalog.
    async fn snapshot(&self) -> CatalogResult<Arc<CatalogSnapshot>> {
        let symptoms = self.get_symptoms().await?;
        let damages = self.get_damages().await?;
        let definitions = self.get_rule_definitions().await?;
        let revision = self.revision().await?;
        Ok(Arc::new(CatalogSnapshot::assemble(
            symptoms,
            damages,
            &definitions,
            revision,
        )))
    }
}
