//! In-memory catalog with expert-only editing.
//!
//! Edits go through a write lock and bump the revision. Snapshots are built
//! lazily, cached per revision, and never see edits made after they were
//! taken.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::info;

use diagnosis_types::{Damage, RuleDefinition, Role, Symptom};

use crate::document::CatalogDocument;
use crate::error::{CatalogError, CatalogResult};
use crate::provider::CatalogProvider;
use crate::snapshot::CatalogSnapshot;

struct Store {
    document: CatalogDocument,
    revision: u64,
    cached: Option<Arc<CatalogSnapshot>>,
}

impl Store {
    fn touch(&mut self) {
        self.revision += 1;
        self.cached = None;
    }
}

/// Catalog held in process memory.
pub struct InMemoryCatalog {
    store: RwLock<Store>,
}

impl InMemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::from_document(CatalogDocument::default())
    }

    /// Create a catalog seeded with `document`.
    pub fn from_document(document: CatalogDocument) -> Self {
        Self {
            store: RwLock::new(Store {
                document,
                revision: 0,
                cached: None,
            }),
        }
    }

    /// Copy of the current records.
    pub fn document(&self) -> CatalogDocument {
        self.store.read().document.clone()
    }

    pub fn current_revision(&self) -> u64 {
        self.store.read().revision
    }

    /// Current snapshot, rebuilt only if the catalog changed since the last one.
    pub fn current_snapshot(&self) -> Arc<CatalogSnapshot> {
        if let Some(cached) = self.store.read().cached.clone() {
            return cached;
        }
        let mut store = self.store.write();
        if let Some(cached) = store.cached.clone() {
            return cached;
        }
        let snapshot = Arc::new(store.document.to_snapshot(store.revision));
        store.cached = Some(snapshot.clone());
        snapshot
    }

    // ── Symptoms ────────────────────────────────────────────────────────

    /// Insert a symptom, or replace the one with the same code in place.
    pub fn upsert_symptom(&self, role: Role, symptom: Symptom) -> CatalogResult<()> {
        ensure_expert(role, "edit symptoms")?;
        let mut store = self.store.write();
        info!(%role, symptom_id = %symptom.id, "Upserting symptom");
        upsert(&mut store.document.symptoms, symptom, |s| s.id.as_str());
        store.touch();
        Ok(())
    }

    /// Remove a symptom and every rule entry that refers to it.
    pub fn remove_symptom(&self, role: Role, id: &str) -> CatalogResult<Symptom> {
        ensure_expert(role, "remove symptoms")?;
        let mut store = self.store.write();
        let removed = remove(&mut store.document.symptoms, id, |s| s.id.as_str())
            .ok_or_else(|| not_found("symptom", id))?;
        for rule in &mut store.document.rules {
            rule.symptoms.retain(|entry| entry.symptom_id.as_str() != id);
        }
        info!(%role, symptom_id = id, "Removed symptom");
        store.touch();
        Ok(removed)
    }

    // ── Damages ─────────────────────────────────────────────────────────

    /// Insert a damage, or replace the one with the same code in place.
    pub fn upsert_damage(&self, role: Role, damage: Damage) -> CatalogResult<()> {
        ensure_expert(role, "edit damages")?;
        let mut store = self.store.write();
        info!(%role, damage_id = %damage.id, "Upserting damage");
        upsert(&mut store.document.damages, damage, |d| d.id.as_str());
        store.touch();
        Ok(())
    }

    /// Remove a damage and every rule that concludes it.
    pub fn remove_damage(&self, role: Role, id: &str) -> CatalogResult<Damage> {
        ensure_expert(role, "remove damages")?;
        let mut store = self.store.write();
        let removed = remove(&mut store.document.damages, id, |d| d.id.as_str())
            .ok_or_else(|| not_found("damage", id))?;
        store.document.rules.retain(|rule| rule.damage_id.as_str() != id);
        info!(%role, damage_id = id, "Removed damage");
        store.touch();
        Ok(removed)
    }

    // ── Rules ───────────────────────────────────────────────────────────

    /// Insert a rule, or replace the one with the same id in place.
    pub fn upsert_rule(&self, role: Role, rule: RuleDefinition) -> CatalogResult<()> {
        ensure_expert(role, "edit rules")?;
        let mut store = self.store.write();
        info!(%role, rule_id = %rule.id, damage_id = %rule.damage_id, "Upserting rule");
        upsert(&mut store.document.rules, rule, |r| r.id.as_str());
        store.touch();
        Ok(())
    }

    pub fn remove_rule(&self, role: Role, id: &str) -> CatalogResult<RuleDefinition> {
        ensure_expert(role, "remove rules")?;
        let mut store = self.store.write();
        let removed = remove(&mut store.document.rules, id, |r| r.id.as_str())
            .ok_or_else(|| not_found("rule", id))?;
        info!(%role, rule_id = id, "Removed rule");
        store.touch();
        Ok(removed)
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogProvider for InMemoryCatalog {
    async fn get_symptoms(&self) -> CatalogResult<Vec<Symptom>> {
        Ok(self.store.read().document.symptoms.clone())
    }

    async fn get_damages(&self) -> CatalogResult<Vec<Damage>> {
        Ok(self.store.read().document.damages.clone())
    }

    async fn get_rule_definitions(&self) -> CatalogResult<Vec<RuleDefinition>> {
        Ok(self.store.read().document.rules.clone())
    }

    async fn revision(&self) -> CatalogResult<u64> {
        Ok(self.current_revision())
    }

    async fn snapshot(&self) -> CatalogResult<Arc<CatalogSnapshot>> {
        Ok(self.current_snapshot())
    }
}

fn ensure_expert(role: Role, action: &'static str) -> CatalogResult<()> {
    if role.can_edit_catalog() {
        Ok(())
    } else {
        Err(CatalogError::Forbidden { role, action })
    }
}

fn not_found(collection: &'static str, code: &str) -> CatalogError {
    CatalogError::NotFound {
        collection,
        code: code.to_string(),
    }
}

fn upsert<T>(items: &mut Vec<T>, item: T, key: impl Fn(&T) -> &str) {
    match items.iter().position(|existing| key(existing) == key(&item)) {
        Some(i) => items[i] = item,
        None => items.push(item),
    }
}

fn remove<T>(items: &mut Vec<T>, code: &str, key: impl Fn(&T) -> &str) -> Option<T> {
    let i = items.iter().position(|existing| key(existing) == code)?;
    Some(items.remove(i))
}
