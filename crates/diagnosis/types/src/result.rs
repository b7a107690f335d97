//! Derived records produced by a diagnosis run.

use serde::{Deserialize, Serialize};

use crate::ids::{DamageId, RuleId, SymptomId};

/// A rule symptom that the user also reported.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchedSymptom {
    pub symptom_id: SymptomId,
    pub symptom_name: String,
    pub cf_expert: f64,
    pub cf_user: f64,
    /// `cf_expert * cf_user`.
    pub cf_combined: f64,
}

/// One ranked candidate cause.
///
/// `cf` is the left fold of `matching_symptoms[..].cf_combined` in rule
/// declaration order. `rank` is only meaningful relative to the result list
/// it was sorted in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisResult {
    pub damage_id: DamageId,
    /// Rule that produced this candidate.
    pub rule_id: RuleId,
    pub name: String,
    pub description: String,
    pub solution: String,
    pub cf: f64,
    /// `round(cf * 100)`.
    pub percentage: i64,
    pub matching_symptoms: Vec<MatchedSymptom>,
    /// Number of symptom entries on the rule.
    pub total_symptoms: usize,
    /// Number of those entries the user reported.
    pub matched_symptoms: usize,
    /// 1-based position after ranking.
    pub rank: usize,
}

impl DiagnosisResult {
    /// Fraction of the rule's symptoms that were reported.
    pub fn coverage(&self) -> f64 {
        if self.total_symptoms == 0 {
            return 0.0;
        }
        self.matched_symptoms as f64 / self.total_symptoms as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(matched: usize, total: usize) -> DiagnosisResult {
        DiagnosisResult {
            damage_id: DamageId::new("K01"),
            rule_id: RuleId::new("R1"),
            name: "Spark plug fouled".into(),
            description: String::new(),
            solution: String::new(),
            cf: 0.5,
            percentage: 50,
            matching_symptoms: vec![],
            total_symptoms: total,
            matched_symptoms: matched,
            rank: 1,
        }
    }

    #[test]
    fn coverage_ratio() {
        assert!((result(1, 4).coverage() - 0.25).abs() < f64::EPSILON);
        assert_eq!(result(0, 0).coverage(), 0.0);
    }
}
