//! # diagnosis-types
//!
//! Shared vocabulary for certainty-factor diagnosis.
//!
//! - **Catalog records**: [`Symptom`], [`Damage`] and the [`Rule`]s that link a
//!   damage to the symptoms it produces, each with an expert confidence.
//! - **Input**: a list of [`UserSymptomSelection`]s, one per symptom the user
//!   reports, each with the user's own confidence.
//! - **Output**: ranked [`DiagnosisResult`]s carrying the [`MatchedSymptom`]s
//!   that produced them.
//! - **Warnings**: [`DataIntegrityWarning`]s for catalog inconsistencies that
//!   are skipped rather than treated as failures.

#![deny(unsafe_code)]

pub mod catalog;
pub mod ids;
pub mod result;
pub mod role;
pub mod selection;
pub mod warning;

// ── Re-exports ──────────────────────────────────────────────────────────

pub use catalog::{
    Damage, Rule, RuleDefinition, RuleSymptom, RuleSymptomDefinition, Symptom,
    UNKNOWN_SYMPTOM_NAME,
};
pub use ids::{DamageId, RuleId, SymptomId};
pub use result::{DiagnosisResult, MatchedSymptom};
pub use role::Role;
pub use selection::{NamedSelection, UserConfidence, UserSymptomSelection};
pub use warning::DataIntegrityWarning;
