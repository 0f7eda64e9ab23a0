//! Defuzzification of aggregated output sets.

use crate::engine::AggregatedSet;
use crate::{FuzzyError, Result};

/// Degrees summing below this are treated as "no rule fired".
const ZERO_MASS: f64 = 1e-10;

/// Centroid (center of gravity) defuzzification.
///
/// Computes `sum(x_i * mu_i) / sum(mu_i)` over the set's sample grid. An
/// all-zero set means no rule fired for this output; that is surfaced as
/// [`FuzzyError::NoRuleFired`] so the caller can pick a domain-appropriate
/// fallback instead of the engine guessing one.
pub fn centroid(name: &str, set: &AggregatedSet) -> Result<f64> {
    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (&x, &mu) in set.universe().samples().iter().zip(set.degrees()) {
        numerator += x * mu;
        denominator += mu;
    }
    if denominator < ZERO_MASS {
        return Err(FuzzyError::NoRuleFired(name.to_string()));
    }
    Ok(numerator / denominator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::membership::MembershipFunction;
    use crate::universe::Universe;

    fn clipped_set(mf: MembershipFunction, universe: Universe, height: f64) -> AggregatedSet {
        let degrees = mf
            .sample(&universe)
            .into_iter()
            .map(|d| d.min(height))
            .collect();
        AggregatedSet::new(universe, degrees)
    }

    #[test]
    fn test_symmetric_triangle_centroids_at_peak() {
        let universe = Universe::linspace(15.0, 26.0, 12).unwrap();
        let mf = MembershipFunction::triangular(18.0, 20.0, 22.0).unwrap();
        let value = centroid("command", &clipped_set(mf, universe, 1.0)).unwrap();
        assert!((value - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_asymmetric_triangle_matches_closed_form() {
        // Closed-form centroid of a full-height triangle is (a + b + c) / 3.
        let universe = Universe::linspace(15.0, 26.0, 12).unwrap();
        let mf = MembershipFunction::triangular(18.0, 20.0, 26.0).unwrap();
        let value = centroid("command", &clipped_set(mf, universe, 1.0)).unwrap();
        let expected = (18.0 + 20.0 + 26.0) / 3.0;
        assert!((value - expected).abs() / expected < 1e-3);
    }

    #[test]
    fn test_clipping_pulls_centroid_toward_plateau_center() {
        let universe = Universe::linspace(0.0, 10.0, 1001).unwrap();
        let mf = MembershipFunction::triangular(0.0, 2.0, 10.0).unwrap();
        let full = centroid("out", &clipped_set(mf, universe.clone(), 1.0)).unwrap();
        let clipped = centroid("out", &clipped_set(mf, universe, 0.5)).unwrap();
        // Clipping flattens the sharp peak at 2, shifting mass to the right.
        assert!(clipped > full);
    }

    #[test]
    fn test_zero_mass_is_no_rule_fired() {
        let universe = Universe::linspace(0.0, 10.0, 11).unwrap();
        let set = AggregatedSet::new(universe, vec![0.0; 11]);
        assert_eq!(
            centroid("command", &set).unwrap_err(),
            FuzzyError::NoRuleFired("command".to_string())
        );
    }
}
