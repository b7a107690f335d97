//! Property tests: ranking, combination and replay hold for arbitrary catalogs.

use diagnosis_engine::*;
use diagnosis_types::{Damage, Rule, UserSymptomSelection};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Helpers / Strategies
// ---------------------------------------------------------------------------

const SYMPTOM_POOL: usize = 12;
const DAMAGE_POOL: usize = 6;

fn symptom_code(i: usize) -> String {
    format!("G{:02}", i)
}

fn damage_code(i: usize) -> String {
    format!("K{:02}", i)
}

fn damages() -> Vec<Damage> {
    (0..DAMAGE_POOL)
        .map(|i| Damage::new(damage_code(i), format!("damage {}", i)))
        .collect()
}

/// Confidence on the scale users can pick from.
fn arb_user_cf() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.2), Just(0.4), Just(0.6), Just(0.8), Just(1.0)]
}

/// Expert confidence in `[0, 1]`.
fn arb_expert_cf() -> impl Strategy<Value = f64> {
    (0u32..=100).prop_map(|n| f64::from(n) / 100.0)
}

/// A rule over distinct symptoms from the pool.
fn arb_rule(index: usize) -> impl Strategy<Value = Rule> {
    (
        0..DAMAGE_POOL,
        prop::sample::subsequence((0..SYMPTOM_POOL).collect::<Vec<_>>(), 0..5),
        prop::collection::vec(arb_expert_cf(), 5),
    )
        .prop_map(move |(damage, symptoms, cfs)| {
            let mut rule = Rule::new(format!("R{}", index), damage_code(damage));
            for (s, cf) in symptoms.into_iter().zip(cfs) {
                rule = rule.with_symptom(symptom_code(s), cf);
            }
            rule
        })
}

fn arb_rules() -> impl Strategy<Value = Vec<Rule>> {
    (1usize..10).prop_flat_map(|n| (0..n).map(arb_rule).collect::<Vec<_>>())
}

fn arb_selection() -> impl Strategy<Value = Vec<UserSymptomSelection>> {
    prop::collection::vec((0..SYMPTOM_POOL, arb_user_cf()), 1..8).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(s, cf)| UserSymptomSelection::new(symptom_code(s), cf))
            .collect()
    })
}

fn overlaps(selection: &[UserSymptomSelection], rules: &[Rule]) -> bool {
    rules.iter().any(|r| {
        r.symptoms
            .iter()
            .any(|rs| selection.iter().any(|s| s.symptom_id == rs.symptom_id))
    })
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    /// Any overlap yields a non-empty, descending list ranked 1..=n.
    #[test]
    fn ranked_descending_with_contiguous_ranks(
        rules in arb_rules(),
        selection in arb_selection(),
    ) {
        let results = diagnose(&selection, &rules, &damages()).unwrap();

        if overlaps(&selection, &rules) {
            prop_assert!(!results.is_empty());
        }
        for pair in results.windows(2) {
            prop_assert!(pair[0].cf >= pair[1].cf);
        }
        for (i, r) in results.iter().enumerate() {
            prop_assert_eq!(r.rank, i + 1);
        }
    }

    /// Percentages are round(cf * 100) and stay within [0, 100].
    #[test]
    fn percentage_matches_cf(
        rules in arb_rules(),
        selection in arb_selection(),
    ) {
        for r in diagnose(&selection, &rules, &damages()).unwrap() {
            prop_assert!((0.0..=1.0).contains(&r.cf));
            prop_assert_eq!(r.percentage, (r.cf * 100.0).round() as i64);
            prop_assert!((0..=100).contains(&r.percentage));
        }
    }

    /// Every result's cf is the declaration-order fold of its matches.
    #[test]
    fn cf_is_fold_of_matches(
        rules in arb_rules(),
        selection in arb_selection(),
    ) {
        for r in diagnose(&selection, &rules, &damages()).unwrap() {
            prop_assert!(r.matched_symptoms >= 1);
            prop_assert_eq!(r.matched_symptoms, r.matching_symptoms.len());
            prop_assert!(r.matched_symptoms <= r.total_symptoms);
            let folded = cf::fold(r.matching_symptoms.iter().map(|m| m.cf_combined)).unwrap();
            prop_assert_eq!(folded.to_bits(), r.cf.to_bits());
        }
    }

    /// The explanation's final value equals the stored cf bit for bit.
    #[test]
    fn explanation_replays_exactly(
        rules in arb_rules(),
        selection in arb_selection(),
    ) {
        for r in diagnose(&selection, &rules, &damages()).unwrap() {
            let steps: Vec<CalculationStep> = format_calculation_steps(&r).collect();
            prop_assert_eq!(steps.len(), 2 * r.matched_symptoms - 1);
            let last = steps.last().unwrap();
            prop_assert_eq!(last.result.to_bits(), r.cf.to_bits());
        }
    }

    /// Same inputs, same output, down to the serialized bytes.
    #[test]
    fn diagnose_is_idempotent(
        rules in arb_rules(),
        selection in arb_selection(),
    ) {
        let first = diagnose(&selection, &rules, &damages()).unwrap();
        let second = diagnose(&selection, &rules, &damages()).unwrap();
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    /// Combination with non-negative inputs never decreases and never leaves [0, 1].
    #[test]
    fn combine_is_monotone_on_unit_interval(
        a in 0.0f64..=1.0,
        b in 0.0f64..=1.0,
    ) {
        let c = cf::combine(a, b);
        prop_assert!(c >= a - 1e-12);
        prop_assert!(c >= b - 1e-12);
        prop_assert!(c <= 1.0 + 1e-12);
    }
}
