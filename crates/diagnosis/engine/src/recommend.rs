//! Advice derived from the top-ranked result.
//!
//! Tiers compare the rounded `percentage` of the first result, so the advice
//! always agrees with the number shown next to it.

use serde::{Deserialize, Serialize};

use diagnosis_types::{DamageId, DiagnosisResult};

/// How strongly the top result should be acted on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationTier {
    /// ≥ 70%: repair according to the solution.
    Repair,
    /// ≥ 50%: inspect further before repairing.
    Inspect,
    /// Everything else.
    CheckOtherSymptoms,
}

impl RecommendationTier {
    /// Inclusive lower bound in percent.
    pub const REPAIR_FROM: i64 = 70;
    pub const INSPECT_FROM: i64 = 50;

    pub fn for_percentage(percentage: i64) -> Self {
        if percentage >= Self::REPAIR_FROM {
            Self::Repair
        } else if percentage >= Self::INSPECT_FROM {
            Self::Inspect
        } else {
            Self::CheckOtherSymptoms
        }
    }
}

/// Advice for a finished diagnosis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub tier: RecommendationTier,
    pub damage_id: DamageId,
    pub damage_name: String,
    pub percentage: i64,
    pub message: String,
}

impl Recommendation {
    /// Advice for the first result of a ranked list, `None` when it is empty.
    pub fn for_results(results: &[DiagnosisResult]) -> Option<Self> {
        let top = results.first()?;
        let tier = RecommendationTier::for_percentage(top.percentage);
        let message = match tier {
            RecommendationTier::Repair => format!(
                "The reported symptoms most likely point to {} ({}% certainty). \
                 Repair it according to the given solution.",
                top.name, top.percentage
            ),
            RecommendationTier::Inspect => format!(
                "The reported symptoms may point to {} ({}% certainty). \
                 Inspect further or consult a mechanic.",
                top.name, top.percentage
            ),
            RecommendationTier::CheckOtherSymptoms => format!(
                "Diagnosis confidence is still low ({}%). \
                 Check for other symptoms or consult an experienced mechanic.",
                top.percentage
            ),
        };

        Some(Self {
            tier,
            damage_id: top.damage_id.clone(),
            damage_name: top.name.clone(),
            percentage: top.percentage,
            message,
        })
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diagnosis_types::RuleId;

    fn ranked(percentages: &[i64]) -> Vec<DiagnosisResult> {
        percentages
            .iter()
            .enumerate()
            .map(|(index, &percentage)| DiagnosisResult {
                damage_id: DamageId::new(format!("K0{}", index + 1)),
                rule_id: RuleId::new(format!("R{}", index + 1)),
                name: format!("Damage {}", index + 1),
                description: String::new(),
                solution: String::new(),
                cf: percentage as f64 / 100.0,
                percentage,
                matching_symptoms: Vec::new(),
                total_symptoms: 1,
                matched_symptoms: 1,
                rank: index + 1,
            })
            .collect()
    }

    #[test]
    fn tier_bounds_are_inclusive() {
        assert_eq!(RecommendationTier::for_percentage(70), RecommendationTier::Repair);
        assert_eq!(RecommendationTier::for_percentage(69), RecommendationTier::Inspect);
        assert_eq!(RecommendationTier::for_percentage(50), RecommendationTier::Inspect);
        assert_eq!(
            RecommendationTier::for_percentage(49),
            RecommendationTier::CheckOtherSymptoms
        );
        assert_eq!(
            RecommendationTier::for_percentage(-20),
            RecommendationTier::CheckOtherSymptoms
        );
    }

    #[test]
    fn only_the_top_result_counts() {
        let advice = Recommendation::for_results(&ranked(&[65, 90])).unwrap();
        assert_eq!(advice.tier, RecommendationTier::Inspect);
        assert_eq!(advice.damage_id.as_str(), "K01");
        assert!(advice.message.contains("Damage 1 (65% certainty)"));
    }

    #[test]
    fn low_confidence_names_no_damage() {
        let advice = Recommendation::for_results(&ranked(&[12])).unwrap();
        assert_eq!(advice.tier, RecommendationTier::CheckOtherSymptoms);
        assert!(!advice.to_string().contains("Damage 1"));
        assert!(advice.to_string().contains("(12%)"));
    }

    #[test]
    fn empty_results_give_no_advice() {
        assert!(Recommendation::for_results(&[]).is_none());
    }
}
