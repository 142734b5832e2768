use std::f64::consts::PI;

use rayon::prelude::*;

use crate::eddington::eddingtoninversion::distribution_function_at;
use crate::godicerror::{
    GodicError,
    GodicResult
};
use crate::math::curve::curve::Curve;
use crate::math::quadrature::romberg::{
    romberg,
    RombergOptions
};
use crate::model::sphericalmodel::SphericalModel;

pub const DEFAULT_MAX_DEPTH: usize = 20;

/// E = Ψ(r) - v²/2
pub fn relative_energy<M>(radius: f64, speed: f64, model: &M) -> f64
where
    M: SphericalModel + ?Sized,
{
    model.relative_potential(radius, model.regularization_offset()) - 0.5 * speed * speed
}

/// Ψ(r) at a requested radius, rejecting radii the DF does not reach.
fn potential_at<M>(index: usize, radius: f64, e_min: f64, model: &M) -> GodicResult<f64>
where
    M: SphericalModel + ?Sized,
{
    if !(radius >= 0.0 && radius.is_finite()) {
        return Err(GodicError::domain(
            "speed moment",
            format!("radius #{} = {} is not a valid radial coordinate", index, radius),
        ));
    }
    let psi = model.relative_potential(radius, model.regularization_offset());
    if !(psi >= e_min) {
        return Err(GodicError::domain(
            "speed moment",
            format!(
                "potential {} at radius #{} (r = {}) lies below the minimum energy {}",
                psi, index, radius, e_min
            ),
        ));
    }
    Ok(psi)
}

fn moment_at<C>(
    index: usize,
    radius: f64,
    psi: f64,
    nth: f64,
    e_min: f64,
    antideriv: &C,
    options: &RombergOptions,
) -> GodicResult<f64>
where
    C: Curve + ?Sized,
{
    if psi == e_min {
        return Ok(0.0);
    }

    let v_max = (2.0 * (psi - e_min)).sqrt();
    let integrand = |v: f64| -> GodicResult<f64> {
        let f = distribution_function_at(psi - 0.5 * v * v, e_min, antideriv)?;
        Ok(4.0 * PI * v.powf(2.0 + nth) * f)
    };
    let result = romberg(integrand, 0.0, v_max, options)?;
    if !result.converged {
        return Err(GodicError::Convergence {
            index,
            radius,
            levels: result.levels,
            change: result.change,
        });
    }
    log::trace!(
        "moment {} at r = {}: {:e} after {} levels",
        nth,
        radius,
        result.value,
        result.levels
    );
    Ok(result.value)
}

/// The n-th speed moment of the DF at each radius,
///
///   M_n(r) = 4π ∫₀^{v_max} v^{2+n} f(Ψ(r) - v²/2) dv,  v_max = √(2(Ψ(r) - E_min)),
///
/// where f is the derivative of `antideriv` (see `distribution_function`).
///
/// The integrals use Romberg refinement with the default tolerances and at
/// most `max_depth` halvings; missing the tolerance is a `Convergence`
/// error. If `norm` is given, the moments are divided by it elementwise.
///
/// The length of `norm` and every radius (finite, non-negative, with
/// Ψ(r) >= `e_min`) are checked before anything is integrated.
pub fn speed_moment<C, M>(
    radii: &[f64],
    nth: f64,
    e_min: f64,
    antideriv: &C,
    model: &M,
    norm: Option<&[f64]>,
    max_depth: usize,
) -> GodicResult<Vec<f64>>
where
    C: Curve + Sync + ?Sized,
    M: SphericalModel + ?Sized,
{
    if let Some(norm) = norm {
        if norm.len() != radii.len() {
            return Err(GodicError::shape_mismatch("norm", radii.len(), norm.len()));
        }
    }

    let potential = radii
        .iter()
        .enumerate()
        .map(|(index, &radius)| potential_at(index, radius, e_min, model))
        .collect::<GodicResult<Vec<f64>>>()?;

    let options = RombergOptions::default().with_max_levels(max_depth);
    let moments: Vec<f64> = radii
        .par_iter()
        .zip(potential.par_iter())
        .enumerate()
        .map(|(index, (&radius, &psi))| {
            moment_at(index, radius, psi, nth, e_min, antideriv, &options)
        })
        .collect::<GodicResult<Vec<f64>>>()?;

    Ok(match norm {
        Some(norm) => moments.iter().zip(norm.iter()).map(|(m, n)| m / n).collect(),
        None => moments,
    })
}

/// Local speed statistics at a radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityProfile {
    pub radius: f64,
    /// M₀
    pub density: f64,
    /// ⟨v⟩ = M₁/M₀
    pub mean_speed: f64,
    /// ⟨v²⟩ = M₂/M₀
    pub mean_square_speed: f64,
    /// Spread of the speed about its mean, √(⟨v²⟩ - ⟨v⟩²).
    pub dispersion: f64,
}

pub fn velocity_profiles<C, M>(
    radii: &[f64],
    e_min: f64,
    antideriv: &C,
    model: &M,
    max_depth: usize,
) -> GodicResult<Vec<VelocityProfile>>
where
    C: Curve + Sync + ?Sized,
    M: SphericalModel + ?Sized,
{
    let density = speed_moment(radii, 0.0, e_min, antideriv, model, None, max_depth)?;
    if let Some(i) = density.iter().position(|&rho| rho <= 0.0) {
        return Err(GodicError::domain(
            "velocity profile",
            format!("no phase-space density at radius #{} (r = {})", i, radii[i]),
        ));
    }
    let mean_speed = speed_moment(radii, 1.0, e_min, antideriv, model, Some(&density), max_depth)?;
    let mean_square_speed =
        speed_moment(radii, 2.0, e_min, antideriv, model, Some(&density), max_depth)?;

    Ok(radii
        .iter()
        .enumerate()
        .map(|(i, &radius)| VelocityProfile {
            radius,
            density: density[i],
            mean_speed: mean_speed[i],
            mean_square_speed: mean_square_speed[i],
            dispersion: (mean_square_speed[i] - mean_speed[i] * mean_speed[i]).sqrt(),
        })
        .collect())
}
