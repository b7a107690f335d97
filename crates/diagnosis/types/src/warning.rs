//! Non-fatal catalog inconsistencies.
//!
//! A warning never aborts a diagnosis; the offending candidate or entry is
//! skipped and evaluation continues.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::{DamageId, RuleId, SymptomId};

/// A data integrity problem found while assembling or evaluating a catalog.
#[derive(Clone, Debug, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataIntegrityWarning {
    /// A rule names a damage that is neither embedded nor in the damage list.
    #[error("rule {rule_id} references unknown damage {damage_id}")]
    UnknownDamage { rule_id: RuleId, damage_id: DamageId },

    /// A rule entry names a symptom missing from the symptom list.
    #[error("rule {rule_id} references unknown symptom {symptom_id}")]
    UnknownSymptom {
        rule_id: RuleId,
        symptom_id: SymptomId,
    },

    /// The same code appears more than once in one list.
    #[error("duplicate {collection} code {code}")]
    DuplicateCode { collection: String, code: String },

    /// A rule with no symptom entries; it can never match.
    #[error("rule {rule_id} has no symptoms")]
    EmptyRule { rule_id: RuleId },

    /// The same symptom is listed twice within one rule.
    #[error("rule {rule_id} lists symptom {symptom_id} more than once")]
    RepeatedRuleSymptom {
        rule_id: RuleId,
        symptom_id: SymptomId,
    },

    /// An expert confidence outside `[-1, 1]` or not a number.
    #[error("rule {rule_id} gives symptom {symptom_id} expert confidence {cf_expert} outside [-1, 1]")]
    ExpertConfidenceOutOfRange {
        rule_id: RuleId,
        symptom_id: SymptomId,
        cf_expert: f64,
    },
}
