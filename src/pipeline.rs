use crate::configuration::PipelineConfiguration;
use crate::eddington::antiderivdffromenergy::{
    build_antiderivative_spline_with_quadrature,
    AntiderivativeSpline
};
use crate::eddington::densityfrompotential::{
    build_density_potential_splines,
    DensityPotentialSplines
};
use crate::godicerror::GodicResult;
use crate::phasespace::phasespace::{
    velocity_profiles,
    VelocityProfile
};

/// Everything computed by one run, from the splines to the profiles.
pub struct PipelineOutput {
    pub model_name: &'static str,
    pub density_potential: DensityPotentialSplines,
    pub antiderivative: AntiderivativeSpline,
    pub profiles: Vec<VelocityProfile>,
}

/// Radial profile → ρ(Ψ), dρ/dΨ splines → F(E) spline → velocity profiles.
///
/// The energy range is the potential range covered by the splines, so the
/// DF vanishes below the potential at the outermost sampled radius.
pub fn run_pipeline(configuration: &PipelineConfiguration) -> GodicResult<PipelineOutput> {
    let model = match configuration.offset {
        Some(offset) => configuration.model.build_with_offset(offset),
        None => configuration.model.build(),
    };
    log::info!(
        "running Eddington inversion for the {} model (offset {:e})",
        model.name(),
        model.regularization_offset()
    );

    let density_potential = build_density_potential_splines(
        model.as_ref(),
        configuration.xi_min,
        configuration.xi_max,
        configuration.n_radial,
        configuration.degree,
    )?;

    let e_min = density_potential.psi_min();
    let antiderivative = build_antiderivative_spline_with_quadrature(
        e_min,
        density_potential.psi_max(),
        &density_potential.drho_dpsi,
        configuration.n_energy,
        configuration.degree,
        configuration.n_quad,
    )?;

    let profiles = velocity_profiles(
        &configuration.radii,
        e_min,
        &antiderivative.spline,
        model.as_ref(),
        configuration.max_depth,
    )?;
    log::info!("computed velocity profiles at {} radii", profiles.len());

    Ok(PipelineOutput {
        model_name: model.name(),
        density_potential,
        antiderivative,
        profiles,
    })
}
