//! Membership function shapes and their evaluation.

use serde::{Deserialize, Serialize};

use crate::universe::Universe;
use crate::{FuzzyError, Result};

/// A membership function mapping a crisp value to a degree of truth in [0, 1].
///
/// Shapes are validated once at construction and evaluated repeatedly; use
/// the checked constructors ([`MembershipFunction::trapezoidal`],
/// [`MembershipFunction::triangular`], [`MembershipFunction::gaussian`])
/// rather than building variants directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MembershipFunction {
    /// Trapezoidal: 0 below `a`, ramp up to `b`, plateau to `c`, ramp down to `d`.
    Trapezoidal { a: f64, b: f64, c: f64, d: f64 },
    /// Triangular: a trapezoid whose plateau has collapsed to the single peak `b`.
    Triangular { a: f64, b: f64, c: f64 },
    /// Gaussian: μ(x) = exp(-(x - mean)² / (2·sigma²)).
    Gaussian { mean: f64, sigma: f64 },
}

impl MembershipFunction {
    /// Build a trapezoidal membership function with breakpoints `a ≤ b ≤ c ≤ d`.
    ///
    /// Zero-width ramps (`a == b` or `c == d`) are allowed and evaluate as
    /// instantaneous steps.
    pub fn trapezoidal(a: f64, b: f64, c: f64, d: f64) -> Result<Self> {
        if [a, b, c, d].iter().any(|x| !x.is_finite()) {
            return Err(FuzzyError::Configuration(format!(
                "trapezoid breakpoints must be finite, got [{a}, {b}, {c}, {d}]"
            )));
        }
        if !(a <= b && b <= c && c <= d) {
            return Err(FuzzyError::Configuration(format!(
                "trapezoid breakpoints must be non-decreasing, got [{a}, {b}, {c}, {d}]"
            )));
        }
        Ok(Self::Trapezoidal { a, b, c, d })
    }

    /// Build a triangular membership function with breakpoints `a ≤ b ≤ c`.
    pub fn triangular(a: f64, b: f64, c: f64) -> Result<Self> {
        if [a, b, c].iter().any(|x| !x.is_finite()) {
            return Err(FuzzyError::Configuration(format!(
                "triangle breakpoints must be finite, got [{a}, {b}, {c}]"
            )));
        }
        if !(a <= b && b <= c) {
            return Err(FuzzyError::Configuration(format!(
                "triangle breakpoints must be non-decreasing, got [{a}, {b}, {c}]"
            )));
        }
        Ok(Self::Triangular { a, b, c })
    }

    /// Build a Gaussian membership function; `sigma` must be positive.
    pub fn gaussian(mean: f64, sigma: f64) -> Result<Self> {
        if !mean.is_finite() || !sigma.is_finite() {
            return Err(FuzzyError::Configuration(format!(
                "gaussian parameters must be finite, got mean {mean}, sigma {sigma}"
            )));
        }
        if sigma <= 0.0 {
            return Err(FuzzyError::Configuration(format!(
                "gaussian sigma must be positive, got {sigma}"
            )));
        }
        Ok(Self::Gaussian { mean, sigma })
    }

    /// Compute the membership degree for a crisp value.
    pub fn membership(&self, x: f64) -> f64 {
        match *self {
            Self::Trapezoidal { a, b, c, d } => trapezoid(x, a, b, c, d),
            Self::Triangular { a, b, c } => trapezoid(x, a, b, b, c),
            Self::Gaussian { mean, sigma } => {
                (-(x - mean).powi(2) / (2.0 * sigma.powi(2))).exp()
            }
        }
    }

    /// Evaluate the function over every sample of a universe.
    ///
    /// Only output variables need this; crisp inputs evaluate the closed form
    /// at a scalar via [`MembershipFunction::membership`].
    pub fn sample(&self, universe: &Universe) -> Vec<f64> {
        universe.samples().iter().map(|&x| self.membership(x)).collect()
    }
}

/// Shared trapezoid evaluation; a triangle is a trapezoid with `b == c`.
///
/// The plateau branch is checked before the ramps so zero-width ramps act as
/// steps instead of dividing by zero.
fn trapezoid(x: f64, a: f64, b: f64, c: f64, d: f64) -> f64 {
    if x < a || x > d {
        0.0
    } else if x >= b && x <= c {
        1.0
    } else if x < b {
        (x - a) / (b - a)
    } else {
        (d - x) / (d - c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trapezoidal_membership() {
        let mf = MembershipFunction::trapezoidal(0.0, 2.0, 8.0, 10.0).unwrap();

        assert_eq!(mf.membership(-1.0), 0.0);
        assert_eq!(mf.membership(0.0), 0.0);
        assert_eq!(mf.membership(1.0), 0.5);
        assert_eq!(mf.membership(2.0), 1.0);
        assert_eq!(mf.membership(5.0), 1.0);
        assert_eq!(mf.membership(8.0), 1.0);
        assert_eq!(mf.membership(9.0), 0.5);
        assert_eq!(mf.membership(10.0), 0.0);
        assert_eq!(mf.membership(11.0), 0.0);
    }

    #[test]
    fn test_degenerate_ramps_are_steps() {
        // a == b: left edge steps straight to the plateau.
        let left = MembershipFunction::trapezoidal(0.0, 0.0, 5.0, 10.0).unwrap();
        assert_eq!(left.membership(0.0), 1.0);
        assert_eq!(left.membership(-0.1), 0.0);

        // c == d: right edge steps straight down.
        let right = MembershipFunction::trapezoidal(0.0, 5.0, 10.0, 10.0).unwrap();
        assert_eq!(right.membership(10.0), 1.0);
        assert_eq!(right.membership(10.1), 0.0);
    }

    #[test]
    fn test_triangular_membership() {
        let mf = MembershipFunction::triangular(0.0, 5.0, 10.0).unwrap();

        assert_eq!(mf.membership(-1.0), 0.0);
        assert_eq!(mf.membership(0.0), 0.0);
        assert_eq!(mf.membership(2.5), 0.5);
        assert_eq!(mf.membership(5.0), 1.0);
        assert_eq!(mf.membership(7.5), 0.5);
        assert_eq!(mf.membership(10.0), 0.0);
    }

    #[test]
    fn test_gaussian_membership() {
        let mf = MembershipFunction::gaussian(5.0, 1.0).unwrap();

        assert_eq!(mf.membership(5.0), 1.0);
        assert!(mf.membership(8.0) < 0.1);
        assert!((mf.membership(4.0) - mf.membership(6.0)).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert!(MembershipFunction::trapezoidal(4.0, 2.0, 8.0, 10.0).is_err());
        assert!(MembershipFunction::trapezoidal(0.0, 2.0, 10.0, 8.0).is_err());
        assert!(MembershipFunction::trapezoidal(0.0, f64::NAN, 8.0, 10.0).is_err());
        assert!(MembershipFunction::triangular(5.0, 4.0, 10.0).is_err());
        assert!(MembershipFunction::gaussian(0.0, 0.0).is_err());
        assert!(MembershipFunction::gaussian(0.0, -1.0).is_err());
    }

    #[test]
    fn test_sample_over_universe() {
        let u = Universe::linspace(0.0, 10.0, 11).unwrap();
        let mf = MembershipFunction::triangular(0.0, 5.0, 10.0).unwrap();
        let degrees = mf.sample(&u);

        assert_eq!(degrees.len(), 11);
        assert_eq!(degrees[0], 0.0);
        assert_eq!(degrees[5], 1.0);
        assert!(degrees.iter().all(|&d| (0.0..=1.0).contains(&d)));
    }
}
