use crate::eddington::eddingtoninversion::{
    antiderivative_of_df,
    DEFAULT_N_QUAD
};
use crate::godicerror::{
    GodicError,
    GodicResult
};
use crate::math::curve::curve::Curve;
use crate::math::curve::nonparametriccurve::nonparametriccurve::Point2D;
use crate::math::curve::nonparametriccurve::piecewisepolynomial::PiecewisePolynomial;
use crate::math::grid::geomspace;

/// Antiderivative of the DF sampled on a geometric energy grid and its spline.
pub struct AntiderivativeSpline {
    pub energy: Vec<f64>,
    pub spline: PiecewisePolynomial,
}

impl AntiderivativeSpline {
    pub fn e_min(&self) -> f64 {
        self.energy[0]
    }

    pub fn e_max(&self) -> f64 {
        self.energy[self.energy.len() - 1]
    }
}

pub fn build_antiderivative_spline<C>(
    e_min: f64,
    e_max: f64,
    drho_dpsi: &C,
    n_pts: usize,
    degree: usize,
) -> GodicResult<AntiderivativeSpline>
where
    C: Curve + Sync + ?Sized,
{
    build_antiderivative_spline_with_quadrature(
        e_min,
        e_max,
        drho_dpsi,
        n_pts,
        degree,
        DEFAULT_N_QUAD,
    )
}

/// Evaluates F on `n_pts` log-spaced energies from `e_min` to `e_max` and
/// fits a spline of the given degree through the samples.
///
/// F is integrated from `e_min`, so `e_min` should be the lowest potential
/// covered by `drho_dpsi`.
pub fn build_antiderivative_spline_with_quadrature<C>(
    e_min: f64,
    e_max: f64,
    drho_dpsi: &C,
    n_pts: usize,
    degree: usize,
    n_quad: usize,
) -> GodicResult<AntiderivativeSpline>
where
    C: Curve + Sync + ?Sized,
{
    if !(e_min < e_max) {
        return Err(GodicError::domain(
            "antiderivative spline",
            format!("energy range [{}, {}] is empty", e_min, e_max),
        ));
    }
    let energy = geomspace(e_min, e_max, n_pts)?;
    let antideriv = antiderivative_of_df(&energy, e_min, drho_dpsi, n_quad)?;
    let points = Point2D::from_slices(&energy, &antideriv)?;
    let spline = PiecewisePolynomial::interpolate(points, degree)?;

    log::debug!(
        "antiderivative of the DF: {} energies in [{:e}, {:e}], {} Gauss-Jacobi nodes",
        n_pts,
        e_min,
        e_max,
        n_quad
    );

    Ok(AntiderivativeSpline { energy, spline })
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_relative_eq;

    use super::*;
    use crate::eddington::eddingtoninversion::distribution_function_at;

    struct PlummerDrhoDpsi;

    impl Curve for PlummerDrhoDpsi {
        fn value(&self, psi: f64) -> GodicResult<f64> {
            Ok(15.0 * psi.powi(4) / (4.0 * PI))
        }

        fn derivative(&self, psi: f64, _order: usize) -> GodicResult<f64> {
            Ok(15.0 * psi.powi(3) / PI)
        }
    }

    #[test]
    fn spline_derivative_recovers_the_plummer_df() {
        let spline = build_antiderivative_spline(1e-3, 1.0, &PlummerDrhoDpsi, 200, 3).unwrap();
        assert_eq!(spline.energy.len(), 200);
        assert_eq!(spline.e_min(), 1e-3);
        assert_eq!(spline.e_max(), 1.0);
        let normalization = 24.0 * 2.0_f64.sqrt() / (7.0 * PI.powi(3));
        for &e in &[0.05, 0.2, 0.6] {
            // F is integrated from 1e-3 rather than 0, which shifts f by O(1e-3^4.5)
            let df = distribution_function_at(e, spline.e_min(), &spline.spline).unwrap();
            assert_relative_eq!(df, normalization * e.powf(3.5), max_relative = 1e-4);
        }
    }

    #[test]
    fn energy_range_must_be_positive_and_non_empty() {
        assert!(matches!(
            build_antiderivative_spline(0.0, 1.0, &PlummerDrhoDpsi, 50, 3),
            Err(GodicError::Domain { .. })
        ));
        assert!(matches!(
            build_antiderivative_spline(0.5, 0.5, &PlummerDrhoDpsi, 50, 3),
            Err(GodicError::Domain { .. })
        ));
    }

    #[test]
    fn node_count_is_forwarded() {
        assert!(matches!(
            build_antiderivative_spline_with_quadrature(0.1, 1.0, &PlummerDrhoDpsi, 50, 3, 0),
            Err(GodicError::Quadrature { .. })
        ));
    }
}
