//! Standard normal upper tail
//!
//! `Q(x) = 1/√(2π) ∫ₓ^∞ exp(−t²/2) dt`, evaluated either through the
//! complementary error function or by adaptive quadrature.

use crate::quadrature::{integrate_to_infinity, QuadratureSettings};
use crate::{ClusterError, Result};
use std::f64::consts::{PI, SQRT_2};

/// Complementary error function
///
/// Chebyshev fit with fractional error below 1.2e-7 over the whole real
/// line.
pub fn erfc(x: f64) -> f64 {
    let z = x.abs();
    let t = 1.0 / (1.0 + 0.5 * z);
    let poly = -z * z - 1.26551223
        + t * (1.00002368
            + t * (0.37409196
                + t * (0.09678418
                    + t * (-0.18628806
                        + t * (0.27886807
                            + t * (-1.13520398
                                + t * (1.48851587 + t * (-0.82215223 + t * 0.17087277))))))));
    let result = t * poly.exp();
    if x >= 0.0 {
        result
    } else {
        2.0 - result
    }
}

/// Q(x) through [`erfc`]
pub fn upper_tail(x: f64) -> f64 {
    0.5 * erfc(x / SQRT_2)
}

/// Q(x) by numerical integration of the Gaussian kernel
///
/// For `x ≥ 0` the kernel is rescaled as
/// `∫ₓ^∞ e^{−t²/2} dt = e^{−x²/2} ∫₀^∞ e^{−xu − u²/2} du`
/// so the integrand stays O(1) far into the tail. Negative arguments use
/// `Q(x) = 1 − Q(−x)`.
pub fn upper_tail_by_quadrature(x: f64, settings: &QuadratureSettings) -> Result<f64> {
    if !x.is_finite() {
        return Err(ClusterError::InvalidParameter {
            metric: "outage probability",
            input: "normalized protection margin",
            value: x,
        });
    }
    if x < 0.0 {
        return Ok(1.0 - upper_tail_by_quadrature(-x, settings)?);
    }

    let scaled = integrate_to_infinity(|u| (-x * u - 0.5 * u * u).exp(), 0.0, settings)?;
    Ok((-0.5 * x * x).exp() * scaled.value / (2.0 * PI).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use proptest::prelude::*;

    #[test]
    fn test_erfc_reference_values() {
        assert_abs_diff_eq!(erfc(0.0), 1.0, epsilon = 1e-7);
        assert_relative_eq!(erfc(0.5), 0.479_500_122_186_953_5, max_relative = 1.2e-7);
        assert_relative_eq!(erfc(1.0), 0.157_299_207_050_285_1, max_relative = 1.2e-7);
        assert_relative_eq!(erfc(2.0), 0.004_677_734_981_047_266, max_relative = 1.2e-7);
        assert_relative_eq!(erfc(-1.0), 1.842_700_792_949_715, max_relative = 1.2e-7);
    }

    #[test]
    fn test_upper_tail_reference_values() {
        assert_abs_diff_eq!(upper_tail(0.0), 0.5, epsilon = 1e-7);
        assert_relative_eq!(upper_tail(1.96), 0.024_997_895_148_220_435, max_relative = 1e-6);
        assert_relative_eq!(upper_tail(-1.96), 0.975_002_104_851_779_6, max_relative = 1e-6);
    }

    #[test]
    fn test_quadrature_at_zero() {
        let settings = QuadratureSettings::default();
        let q = upper_tail_by_quadrature(0.0, &settings).unwrap();
        assert_abs_diff_eq!(q, 0.5, epsilon = 1e-10);
    }

    #[test]
    fn test_quadrature_far_tail() {
        // Q(6) = 9.865876450376946e-10
        let settings = QuadratureSettings::default();
        let q = upper_tail_by_quadrature(6.0, &settings).unwrap();
        assert_relative_eq!(q, 9.865_876_450_376_946e-10, max_relative = 1e-6);
    }

    #[test]
    fn test_quadrature_rejects_nan() {
        let settings = QuadratureSettings::default();
        assert!(upper_tail_by_quadrature(f64::NAN, &settings).is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        // Both evaluations of Q agree to well beyond 4 significant digits
        #[test]
        fn fuzz_quadrature_matches_erfc(x in -6.0f64..8.0) {
            let settings = QuadratureSettings::default();
            let by_quadrature = upper_tail_by_quadrature(x, &settings).unwrap();
            let closed_form = upper_tail(x);
            prop_assert!(
                ((by_quadrature - closed_form) / closed_form).abs() < 1e-5,
                "x={} quadrature={} erfc={}", x, by_quadrature, closed_form
            );
        }

        #[test]
        fn fuzz_tail_decreasing(x in -6.0f64..8.0, step in 0.01f64..1.0) {
            prop_assert!(upper_tail(x + step) < upper_tail(x));
        }
    }
}
