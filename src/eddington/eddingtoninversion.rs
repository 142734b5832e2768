//! Eddington's inversion formula for an isotropic spherical system.
//!
//! The antiderivative of the distribution function is
//!
//!   F(E) = 1/(√8 π²) ∫_{E_min}^{E} (dρ/dΨ) / √(E - Ψ) dΨ
//!
//! and the DF itself is f(E) = dF/dE. Mapping Ψ ∈ [E_min, E] onto
//! x ∈ [-1, 1] turns the inverse square root into the Jacobi weight
//! (1 - x)^{-1/2}, which Gauss–Jacobi quadrature absorbs exactly.

use std::f64::consts::PI;

use rayon::prelude::*;

use crate::godicerror::{
    GodicError,
    GodicResult
};
use crate::math::curve::curve::Curve;
use crate::math::quadrature::gaussjacobi::{
    gauss_jacobi,
    QuadratureRule
};

pub const DEFAULT_N_QUAD: usize = 10;

const JACOBI_ALPHA: f64 = -0.5;
const JACOBI_BETA: f64 = 0.0;

fn check_lower_bound(e_min: f64) -> GodicResult<()> {
    if e_min.is_finite() {
        Ok(())
    } else {
        Err(GodicError::domain(
            "eddington inversion",
            format!("minimum energy must be finite, got {}", e_min),
        ))
    }
}

fn antiderivative_at<C>(
    rule: &QuadratureRule,
    e: f64,
    e_min: f64,
    drho_dpsi: &C,
) -> GodicResult<f64>
where
    C: Curve + ?Sized,
{
    if e == e_min {
        return Ok(0.0);
    }
    let sum = rule.integrate(|x| drho_dpsi.value(0.5 * (e * (x + 1.0) - e_min * (x - 1.0))))?;
    Ok((e - e_min).sqrt() * sum / (4.0 * PI * PI))
}

/// F(E) at every energy, with dρ/dΨ taken from `drho_dpsi` and an
/// `n_quad`-node Gauss–Jacobi rule.
///
/// Every energy must be >= `e_min`; F(e_min) is exactly 0. The quadrature
/// nodes map into (e_min, E), so `drho_dpsi` must cover that range.
pub fn antiderivative_of_df<C>(
    energies: &[f64],
    e_min: f64,
    drho_dpsi: &C,
    n_quad: usize,
) -> GodicResult<Vec<f64>>
where
    C: Curve + Sync + ?Sized,
{
    let rule = gauss_jacobi(n_quad, JACOBI_ALPHA, JACOBI_BETA)?;
    check_lower_bound(e_min)?;
    let invalid = energies
        .iter()
        .enumerate()
        .find(|(_, e)| !(**e >= e_min && e.is_finite()));
    if let Some((i, &e)) = invalid {
        return Err(GodicError::domain(
            "eddington inversion",
            format!("energy #{} = {} lies below the minimum energy {}", i, e, e_min),
        ));
    }

    energies
        .par_iter()
        .map(|&e| antiderivative_at(&rule, e, e_min, drho_dpsi))
        .collect()
}

/// f(E) = dF/dE for E > e_min, and 0 for E <= e_min.
pub fn distribution_function_at<C>(e: f64, e_min: f64, antideriv: &C) -> GodicResult<f64>
where
    C: Curve + ?Sized,
{
    if e.is_nan() {
        return Err(GodicError::domain("distribution function", "energy is NaN"));
    }
    if e > e_min {
        antideriv.derivative(e, 1)
    } else {
        Ok(0.0)
    }
}

pub fn distribution_function<C>(
    energies: &[f64],
    e_min: f64,
    antideriv: &C,
) -> GodicResult<Vec<f64>>
where
    C: Curve + ?Sized,
{
    energies
        .iter()
        .map(|&e| distribution_function_at(e, e_min, antideriv))
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    /// dρ/dΨ of the Plummer sphere, 15Ψ⁴/4π, without any interpolation.
    struct PlummerDrhoDpsi;

    impl Curve for PlummerDrhoDpsi {
        fn value(&self, psi: f64) -> GodicResult<f64> {
            Ok(15.0 * psi.powi(4) / (4.0 * PI))
        }

        fn derivative(&self, psi: f64, order: usize) -> GodicResult<f64> {
            match order {
                0 => self.value(psi),
                1 => Ok(15.0 * psi.powi(3) / PI),
                _ => Err(GodicError::domain("test curve", "order too high")),
            }
        }
    }

    fn plummer_antiderivative(e: f64) -> f64 {
        24.0 * 2.0_f64.sqrt() / (7.0 * PI.powi(3)) * e.powf(4.5) / 4.5
    }

    #[test]
    fn exact_for_polynomial_integrands() {
        // u(Ψ) is a quartic, so three nodes already integrate it exactly
        let energies = [0.1, 0.5, 1.0];
        let values = antiderivative_of_df(&energies, 0.0, &PlummerDrhoDpsi, 3).unwrap();
        for (&e, &f) in energies.iter().zip(values.iter()) {
            assert_relative_eq!(f, plummer_antiderivative(e), max_relative = 1e-12);
        }
    }

    #[test]
    fn error_does_not_grow_with_node_count() {
        let e = 0.5;
        let mut previous = f64::INFINITY;
        for n in 1..=10 {
            let value = antiderivative_of_df(&[e], 0.0, &PlummerDrhoDpsi, n).unwrap()[0];
            let error = (value - plummer_antiderivative(e)).abs() / plummer_antiderivative(e);
            assert!(error <= previous + 1e-13, "n = {}: {} > {}", n, error, previous);
            previous = error;
        }
        assert!(previous < 1e-13);
    }

    #[test]
    fn lower_bound_gives_zero() {
        let values = antiderivative_of_df(&[0.2, 0.2, 0.7], 0.2, &PlummerDrhoDpsi, 10).unwrap();
        assert_eq!(values[0], 0.0);
        assert_eq!(values[1], 0.0);
        assert!(values[2] > 0.0);
    }

    #[test]
    fn invalid_energies_and_node_counts_are_rejected() {
        assert!(matches!(
            antiderivative_of_df(&[0.5, 0.1], 0.2, &PlummerDrhoDpsi, 10),
            Err(GodicError::Domain { .. })
        ));
        assert!(matches!(
            antiderivative_of_df(&[f64::NAN], 0.2, &PlummerDrhoDpsi, 10),
            Err(GodicError::Domain { .. })
        ));
        assert!(matches!(
            antiderivative_of_df(&[0.5], 0.2, &PlummerDrhoDpsi, 0),
            Err(GodicError::Quadrature { .. })
        ));
    }

    #[test]
    fn distribution_vanishes_at_and_below_the_lower_bound() {
        let energies = [-1.0, 0.3, 0.3 + 1e-9, 0.8];
        let values = distribution_function(&energies, 0.3, &PlummerDrhoDpsi).unwrap();
        assert_eq!(values[0], 0.0);
        assert_eq!(values[1], 0.0);
        assert!(values[2] > 0.0);
        assert_relative_eq!(values[3], 15.0 * 0.8_f64.powi(3) / PI, max_relative = 1e-14);
        assert!(distribution_function_at(f64::NAN, 0.3, &PlummerDrhoDpsi).is_err());
    }
}
