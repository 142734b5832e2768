use crate::godicerror::{
    GodicError,
    GodicResult
};
use crate::math::curve::nonparametriccurve::nonparametriccurve::Point2D;
use crate::math::curve::nonparametriccurve::piecewisepolynomial::PiecewisePolynomial;
use crate::math::grid::linspace;
use crate::model::sphericalmodel::SphericalModel;

/// Density and dρ/dΨ of a model as splines in the relative potential.
pub struct DensityPotentialSplines {
    /// Potential samples in increasing order, i.e. from the outermost radius
    /// inwards.
    pub potential: Vec<f64>,
    pub density: PiecewisePolynomial,
    pub drho_dpsi: PiecewisePolynomial,
}

impl DensityPotentialSplines {
    /// Lowest potential covered by the splines.
    pub fn psi_min(&self) -> f64 {
        self.potential[0]
    }

    pub fn psi_max(&self) -> f64 {
        self.potential[self.potential.len() - 1]
    }
}

/// Samples the model on r_j = exp(ξ_j), ξ_j evenly spaced in
/// [xi_min, xi_max], and fits ρ(Ψ) and u(Ψ) = ρ'(r)/Ψ'(r) with splines of
/// the given degree.
///
/// Both profiles decrease with r, so the samples are reversed to make the
/// potential the increasing abscissa.
pub fn build_density_potential_splines<M>(
    model: &M,
    xi_min: f64,
    xi_max: f64,
    n_pts: usize,
    degree: usize,
) -> GodicResult<DensityPotentialSplines>
where
    M: SphericalModel + ?Sized,
{
    if !(xi_min.is_finite() && xi_max.is_finite() && xi_min < xi_max) {
        return Err(GodicError::domain(
            "density-potential splines",
            format!("log-radius range [{}, {}] is empty or not finite", xi_min, xi_max),
        ));
    }

    let offset = model.regularization_offset();
    let radius: Vec<f64> = linspace(xi_min, xi_max, n_pts)
        .into_iter()
        .map(f64::exp)
        .collect();

    let potential: Vec<f64> = radius
        .iter()
        .rev()
        .map(|&r| model.relative_potential(r, offset))
        .collect();
    let density: Vec<f64> = radius.iter().rev().map(|&r| model.mass_density(r)).collect();
    let drho_dpsi: Vec<f64> = radius.iter().rev().map(|&r| model.drho_dpsi(r, offset)).collect();

    let density_spline =
        PiecewisePolynomial::interpolate(Point2D::from_slices(&potential, &density)?, degree)?;
    let drho_dpsi_spline =
        PiecewisePolynomial::interpolate(Point2D::from_slices(&potential, &drho_dpsi)?, degree)?;

    log::debug!(
        "{}: {} samples, potential in [{:e}, {:e}]",
        model.name(),
        n_pts,
        potential[0],
        potential[n_pts - 1]
    );

    Ok(DensityPotentialSplines {
        potential,
        density: density_spline,
        drho_dpsi: drho_dpsi_spline,
    })
}
