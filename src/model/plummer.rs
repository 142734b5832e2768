use std::f64::consts::PI;

use crate::model::sphericalmodel::{
    AnalyticDistribution,
    SphericalModel
};

/// Polytropic index of the Plummer sphere.
const POLYTROPIC_INDEX: f64 = 5.0;

/// Normalization of the Plummer DF, f(E) = F·E^{n-3/2}.
pub const PLUMMER_DF_NORMALIZATION: f64 = 24.0 * std::f64::consts::SQRT_2 / (7.0 * PI * PI * PI);

/// Plummer's model, lengths in units of the scale radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plummer {
    offset: f64,
}

impl Plummer {
    pub fn new() -> Plummer {
        Plummer { offset: 0.0 }
    }

    pub fn with_offset(offset: f64) -> Plummer {
        Plummer { offset }
    }
}

impl Default for Plummer {
    fn default() -> Self {
        Plummer::new()
    }
}

impl SphericalModel for Plummer {
    fn name(&self) -> &'static str {
        "Plummer"
    }

    fn mass_density(&self, r: f64) -> f64 {
        3.0 / (4.0 * PI * (1.0 + r * r).powf(2.5))
    }

    fn deriv_mass_density(&self, r: f64) -> f64 {
        -15.0 * r / (4.0 * PI * (1.0 + r * r).powf(3.5))
    }

    fn relative_potential(&self, r: f64, _offset: f64) -> f64 {
        1.0 / (1.0 + r * r).sqrt()
    }

    fn deriv_relative_potential(&self, r: f64, _offset: f64) -> f64 {
        -r / (1.0 + r * r).powf(1.5)
    }

    fn drho_dpsi(&self, r: f64, _offset: f64) -> f64 {
        let s = 1.0 + r * r;
        15.0 / (4.0 * PI * s * s)
    }

    fn regularization_offset(&self) -> f64 {
        self.offset
    }

    fn analytic_df(&self) -> Option<&dyn AnalyticDistribution> {
        Some(self)
    }
}

impl AnalyticDistribution for Plummer {
    fn antideriv_df(&self, e: f64) -> f64 {
        PLUMMER_DF_NORMALIZATION * e.powf(POLYTROPIC_INDEX - 0.5) / (POLYTROPIC_INDEX - 0.5)
    }

    fn df(&self, e: f64) -> f64 {
        PLUMMER_DF_NORMALIZATION * e.powf(POLYTROPIC_INDEX - 1.5)
    }
}
