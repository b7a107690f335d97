//! Compact projection of a finished diagnosis, suitable for recording.

use serde::{Deserialize, Serialize};

use diagnosis_types::{DamageId, DiagnosisResult, SymptomId, UserSymptomSelection};

/// A reported symptom and the confidence given for it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SymptomConfidence {
    pub symptom_id: SymptomId,
    pub cf: f64,
}

/// A ranked damage, without its explanation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankedDamage {
    pub damage_id: DamageId,
    pub cf: f64,
    pub percentage: i64,
    pub rank: usize,
}

/// What gets handed to a session recorder after a diagnosis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub total_symptoms: usize,
    pub total_results: usize,
    /// Selection in the order the user gave it.
    pub user_symptoms: Vec<SymptomConfidence>,
    /// Results in ranked order.
    pub results: Vec<RankedDamage>,
}

impl SessionSummary {
    pub fn from_diagnosis(selection: &[UserSymptomSelection], results: &[DiagnosisResult]) -> Self {
        Self {
            total_symptoms: selection.len(),
            total_results: results.len(),
            user_symptoms: selection
                .iter()
                .map(|s| SymptomConfidence {
                    symptom_id: s.symptom_id.clone(),
                    cf: s.cf_user,
                })
                .collect(),
            results: results
                .iter()
                .map(|r| RankedDamage {
                    damage_id: r.damage_id.clone(),
                    cf: r.cf,
                    percentage: r.percentage,
                    rank: r.rank,
                })
                .collect(),
        }
    }

    /// Best ranked damage, if there was any result.
    pub fn top(&self) -> Option<&RankedDamage> {
        self.results.first()
    }
}
