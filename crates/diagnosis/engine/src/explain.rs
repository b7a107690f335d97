//! Step-by-step replay of how a result's certainty factor was reached.
//!
//! The replay walks a [`DiagnosisResult`]'s matched symptoms with the same
//! [`cf`](crate::cf) functions the engine used, so the final step's value is
//! bit-identical to `DiagnosisResult::cf`.

use std::iter::FusedIterator;

use serde::{Deserialize, Serialize};

use diagnosis_types::{DiagnosisResult, MatchedSymptom};

use crate::cf;

/// Description used for fold steps.
pub const COMBINATION_DESCRIPTION: &str = "CF combination";

/// What a step computes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// `cf_expert × cf_user` for one matched symptom.
    Product,
    /// One application of the combination operator.
    Combination,
}

/// One line of the calculation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalculationStep {
    /// 1-based position.
    pub step: usize,
    pub kind: StepKind,
    pub description: String,
    pub formula: String,
    /// Value produced by this step.
    pub result: f64,
}

impl std::fmt::Display for CalculationStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}. {}: {}", self.step, self.description, self.formula)
    }
}

/// Lazy iterator over the calculation steps of one result.
///
/// Yields one [`StepKind::Product`] per matched symptom, then one
/// [`StepKind::Combination`] per fold. Clone it (or call
/// [`restart`](Self::restart)) to replay from the beginning.
#[derive(Clone, Debug)]
pub struct CalculationSteps<'a> {
    symptoms: &'a [MatchedSymptom],
    position: usize,
    running: f64,
}

impl<'a> CalculationSteps<'a> {
    pub fn new(symptoms: &'a [MatchedSymptom]) -> Self {
        Self {
            symptoms,
            position: 0,
            running: symptoms.first().map_or(0.0, |s| s.cf_combined),
        }
    }

    /// A fresh iterator over the same symptoms.
    pub fn restart(&self) -> Self {
        Self::new(self.symptoms)
    }

    fn total(&self) -> usize {
        let n = self.symptoms.len();
        n + n.saturating_sub(1)
    }

    fn product_step(&self, index: usize) -> CalculationStep {
        let symptom = &self.symptoms[index];
        CalculationStep {
            step: index + 1,
            kind: StepKind::Product,
            description: symptom.symptom_name.clone(),
            formula: format!(
                "CF = CF_Expert × CF_User = {} × {} = {:.4}",
                symptom.cf_expert, symptom.cf_user, symptom.cf_combined
            ),
            result: symptom.cf_combined,
        }
    }

    fn combination_step(&mut self, index: usize) -> CalculationStep {
        let previous = self.running;
        let incoming = self.symptoms[index].cf_combined;
        let combined = cf::combine(previous, incoming);
        self.running = combined;

        CalculationStep {
            step: self.position + 1,
            kind: StepKind::Combination,
            description: COMBINATION_DESCRIPTION.to_string(),
            formula: format!(
                "CF = {previous:.4} + {incoming:.4} × (1 - {previous:.4}) = {combined:.4}"
            ),
            result: combined,
        }
    }
}

impl Iterator for CalculationSteps<'_> {
    type Item = CalculationStep;

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.symptoms.len();
        if self.position >= self.total() {
            return None;
        }

        let step = if self.position < n {
            self.product_step(self.position)
        } else {
            // Fold k (1-based) folds in symptom k.
            let index = self.position - n + 1;
            self.combination_step(index)
        };
        self.position += 1;
        Some(step)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total() - self.position.min(self.total());
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CalculationSteps<'_> {}

impl FusedIterator for CalculationSteps<'_> {}

/// Calculation steps for `result`.
pub fn format_calculation_steps(result: &DiagnosisResult) -> CalculationSteps<'_> {
    CalculationSteps::new(&result.matching_symptoms)
}

/// Closing line for a result, e.g. `Final CF = 0.6464 = 65%`.
pub fn format_conclusion(result: &DiagnosisResult) -> String {
    format!("Final CF = {:.4} = {}%", result.cf, result.percentage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::diagnose;
    use diagnosis_types::{Damage, Rule, Symptom, UserSymptomSelection};

    fn two_symptom_result() -> DiagnosisResult {
        let rules = vec![Rule::new("R1", "K01")
            .with_joined_symptom(Symptom::new("G01", "Engine stalls when idling"), 0.8)
            .with_joined_symptom(Symptom::new("G02", "Black exhaust smoke"), 0.4)];
        let damages = vec![Damage::new("K01", "Rich fuel mixture")];
        let selection = vec![
            UserSymptomSelection::new("G01", 0.6),
            UserSymptomSelection::new("G02", 0.8),
        ];
        diagnose(&selection, &rules, &damages).unwrap().remove(0)
    }

    #[test]
    fn products_then_combinations() {
        let result = two_symptom_result();
        let steps: Vec<CalculationStep> = format_calculation_steps(&result).collect();

        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].kind, StepKind::Product);
        assert_eq!(steps[0].description, "Engine stalls when idling");
        assert_eq!(
            steps[0].formula,
            "CF = CF_Expert × CF_User = 0.8 × 0.6 = 0.4800"
        );
        assert_eq!(steps[1].kind, StepKind::Product);
        assert_eq!(steps[2].kind, StepKind::Combination);
        assert_eq!(steps[2].description, COMBINATION_DESCRIPTION);
        assert_eq!(
            steps[2].formula,
            "CF = 0.4800 + 0.3200 × (1 - 0.4800) = 0.6464"
        );
        let numbers: Vec<usize> = steps.iter().map(|s| s.step).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn last_step_equals_stored_cf_exactly() {
        let result = two_symptom_result();
        let last = format_calculation_steps(&result).last().unwrap();
        assert_eq!(last.result.to_bits(), result.cf.to_bits());
    }

    #[test]
    fn single_match_has_no_combination_step() {
        let rules = vec![Rule::new("R1", "K01").with_symptom("G01", 0.8)];
        let damages = vec![Damage::new("K01", "Rich fuel mixture")];
        let result = diagnose(&[UserSymptomSelection::new("G01", 0.6)], &rules, &damages)
            .unwrap()
            .remove(0);

        let steps: Vec<_> = format_calculation_steps(&result).collect();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].kind, StepKind::Product);
        assert_eq!(steps[0].result.to_bits(), result.cf.to_bits());
    }

    #[test]
    fn iterator_is_restartable_and_sized() {
        let result = two_symptom_result();
        let mut steps = format_calculation_steps(&result);
        assert_eq!(steps.len(), 3);

        let snapshot = steps.clone();
        steps.next();
        steps.next();
        assert_eq!(steps.len(), 1);

        let replay: Vec<_> = snapshot.collect();
        let fresh: Vec<_> = steps.restart().collect();
        assert_eq!(replay, fresh);

        steps.next();
        assert!(steps.next().is_none());
        assert!(steps.next().is_none());
    }

    #[test]
    fn empty_matches_yield_nothing() {
        let steps = CalculationSteps::new(&[]);
        assert_eq!(steps.len(), 0);
        assert_eq!(steps.count(), 0);
    }

    #[test]
    fn display_and_conclusion() {
        let result = two_symptom_result();
        let first = format_calculation_steps(&result).next().unwrap();
        assert!(first.to_string().starts_with("1. Engine stalls when idling: CF ="));
        assert_eq!(format_conclusion(&result), "Final CF = 0.6464 = 65%");
    }
}
