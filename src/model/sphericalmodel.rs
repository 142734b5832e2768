use serde::Deserialize;

use crate::model::exponential::Exponential;
use crate::model::exponentiallinear::ExponentialLinear;
use crate::model::henonisochrone::HenonIsochrone;
use crate::model::jaffe::Jaffe;
use crate::model::plummer::Plummer;

/// Self-gravitating, spherically symmetric mass distribution.
///
/// Units are G = M = 1 with a model-specific length unit. Density and
/// relative potential are strictly decreasing in r, and the potential
/// vanishes as r → ∞.
///
/// The `offset` argument of the potential methods is the radius below which
/// a Taylor expansion around r = 0 replaces the closed form. Models whose
/// closed forms are regular at the origin ignore it.
///
/// # Thread safety
/// `Send + Sync` is a supertrait so that one model can be sampled from the
/// rayon pool while the moment integrals run.
pub trait SphericalModel: Send + Sync {
    fn name(&self) -> &'static str;

    fn mass_density(&self, r: f64) -> f64;

    fn deriv_mass_density(&self, r: f64) -> f64;

    fn relative_potential(&self, r: f64, offset: f64) -> f64;

    fn deriv_relative_potential(&self, r: f64, offset: f64) -> f64;

    /// dρ/dΨ expressed as ρ'(r)/Ψ'(r).
    fn drho_dpsi(&self, r: f64, offset: f64) -> f64;

    /// Offset used by the Eddington pipeline when it samples this model.
    fn regularization_offset(&self) -> f64 {
        0.0
    }

    fn analytic_df(&self) -> Option<&dyn AnalyticDistribution> {
        None
    }

    fn has_analytic_df(&self) -> bool {
        self.analytic_df().is_some()
    }
}

/// Closed-form distribution function of a model, as a function of the
/// relative energy E > 0.
pub trait AnalyticDistribution {
    /// Antiderivative F(E) of the DF with F(0) = 0.
    fn antideriv_df(&self, e: f64) -> f64;

    fn df(&self, e: f64) -> f64;
}

/// Model selector as it appears in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ModelKind {
    Plummer,
    HenonIsochrone,
    Jaffe,
    Exponential,
    ExponentialLinear,
}

impl ModelKind {
    pub fn build(&self) -> Box<dyn SphericalModel> {
        match self {
            ModelKind::Plummer => Box::new(Plummer::new()),
            ModelKind::HenonIsochrone => Box::new(HenonIsochrone::new()),
            ModelKind::Jaffe => Box::new(Jaffe::new()),
            ModelKind::Exponential => Box::new(Exponential::new()),
            ModelKind::ExponentialLinear => Box::new(ExponentialLinear::new()),
        }
    }

    /// Same as `build`, with the regularization offset overridden.
    pub fn build_with_offset(&self, offset: f64) -> Box<dyn SphericalModel> {
        match self {
            ModelKind::Plummer => Box::new(Plummer::with_offset(offset)),
            ModelKind::HenonIsochrone => Box::new(HenonIsochrone::with_offset(offset)),
            ModelKind::Jaffe => Box::new(Jaffe::with_offset(offset)),
            ModelKind::Exponential => Box::new(Exponential::with_offset(offset)),
            ModelKind::ExponentialLinear => Box::new(ExponentialLinear::with_offset(offset)),
        }
    }
}
