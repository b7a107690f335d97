//! Certainty factor arithmetic.
//!
//! Everything that turns confidences into a score goes through this module so
//! the ranking and its explanation can never drift apart.

/// Certainty of one piece of evidence: expert confidence in the rule entry
/// scaled by the user's confidence that the symptom is present.
#[inline]
pub fn product(cf_expert: f64, cf_user: f64) -> f64 {
    cf_expert * cf_user
}

/// Parallel combination of two corroborating certainty factors:
/// `a + b * (1 - a)`.
///
/// For inputs in `[0, 1]` the result stays in `[0, 1]` and grows with every
/// extra piece of evidence. Algebraically a fold equals `1 - Π(1 - x)`, so
/// only floating point rounding depends on the order; callers fold in rule
/// declaration order to keep results bit-for-bit reproducible.
///
/// This is the positive-evidence branch of certainty factor calculus only.
/// Negative inputs are not treated as disconfirming evidence and can push the
/// result outside `[-1, 1]`.
#[inline]
pub fn combine(a: f64, b: f64) -> f64 {
    a + b * (1.0 - a)
}

/// Left fold of [`combine`] seeded with the first value.
///
/// Returns `None` for an empty sequence. A single value is returned as is.
pub fn fold<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut iter = values.into_iter();
    let first = iter.next()?;
    Some(iter.fold(first, combine))
}

/// `round(cf * 100)`, rounding halves away from zero.
#[inline]
pub fn percentage(cf: f64) -> i64 {
    (cf * 100.0).round() as i64
}

/// Whether `cf` is a usable user confidence (finite, in `[0, 1]`).
pub fn is_valid_user_cf(cf: f64) -> bool {
    cf.is_finite() && (0.0..=1.0).contains(&cf)
}

/// Whether `cf` is a usable expert confidence (finite, in `[-1, 1]`).
pub fn is_valid_expert_cf(cf: f64) -> bool {
    cf.is_finite() && (-1.0..=1.0).contains(&cf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_of_expert_and_user() {
        assert!((product(0.8, 0.6) - 0.48).abs() < 1e-9);
    }

    #[test]
    fn combine_two_values() {
        assert!((combine(0.48, 0.32) - 0.6464).abs() < 1e-9);
    }

    #[test]
    fn combine_saturates_towards_one() {
        let cf = fold(std::iter::repeat(0.5).take(20)).unwrap();
        assert!(cf < 1.0);
        assert!(cf > 0.999_99);
    }

    #[test]
    fn combine_matches_closed_form() {
        let values = [0.48, 0.32, 0.2, 0.7];
        let closed = 1.0 - values.iter().map(|x| 1.0 - x).product::<f64>();
        assert!((fold(values).unwrap() - closed).abs() < 1e-12);
    }

    #[test]
    fn negative_inputs_can_leave_the_cf_range() {
        let cf = combine(-0.5, -0.5);
        assert!((cf - -1.25).abs() < 1e-12);
    }

    #[test]
    fn fold_edge_cases() {
        assert_eq!(fold(std::iter::empty()), None);
        assert_eq!(fold([0.42]), Some(0.42));
        let folded = fold([0.48, 0.32, 0.2]).unwrap();
        assert_eq!(folded, combine(combine(0.48, 0.32), 0.2));
    }

    #[test]
    fn percentage_rounds_half_away_from_zero() {
        assert_eq!(percentage(0.125), 13);
        assert_eq!(percentage(0.6464), 65);
        assert_eq!(percentage(0.48), 48);
        assert_eq!(percentage(0.0), 0);
        assert_eq!(percentage(1.0), 100);
    }

    #[test]
    fn validity_ranges() {
        assert!(is_valid_user_cf(0.0));
        assert!(is_valid_user_cf(1.0));
        assert!(!is_valid_user_cf(-0.2));
        assert!(!is_valid_user_cf(f64::NAN));
        assert!(is_valid_expert_cf(-1.0));
        assert!(!is_valid_expert_cf(1.5));
        assert!(!is_valid_expert_cf(f64::INFINITY));
    }
}
