use std::f64::consts::{
    PI,
    SQRT_2
};

use crate::math::special::{
    dawson_minus,
    dawson_plus
};
use crate::model::sphericalmodel::{
    AnalyticDistribution,
    SphericalModel
};

/// Jaffe's model, lengths in units of the half-mass radius.
///
/// Density and potential both diverge at the origin. The closed forms stay
/// finite for every r > 0, so the offset is not used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jaffe {
    offset: f64,
}

impl Jaffe {
    pub fn new() -> Jaffe {
        Jaffe { offset: 0.0 }
    }

    pub fn with_offset(offset: f64) -> Jaffe {
        Jaffe { offset }
    }
}

impl Default for Jaffe {
    fn default() -> Self {
        Jaffe::new()
    }
}

impl SphericalModel for Jaffe {
    fn name(&self) -> &'static str {
        "Jaffe"
    }

    fn mass_density(&self, r: f64) -> f64 {
        let s = r * (1.0 + r);
        1.0 / (4.0 * PI * s * s)
    }

    fn deriv_mass_density(&self, r: f64) -> f64 {
        -(1.0 + 2.0 * r) / (r * (1.0 + r)).powi(3) / (2.0 * PI)
    }

    fn relative_potential(&self, r: f64, _offset: f64) -> f64 {
        (1.0 / r).ln_1p()
    }

    fn deriv_relative_potential(&self, r: f64, _offset: f64) -> f64 {
        -1.0 / (r * (1.0 + r))
    }

    fn drho_dpsi(&self, r: f64, _offset: f64) -> f64 {
        let s = r * (1.0 + r);
        (1.0 + 2.0 * r) / (s * s) / (2.0 * PI)
    }

    fn regularization_offset(&self) -> f64 {
        self.offset
    }

    fn analytic_df(&self) -> Option<&dyn AnalyticDistribution> {
        Some(self)
    }
}

// With D₊ Dawson's integral and D₋ its exp(x²)·erf companion:
//   F(E) = [D₋(√2E) - D₊(√2E) + √8(D₊(√E) - D₋(√E))] / 4π³
//   f(E) = [D₋(√2E) + D₊(√2E) - √2(D₋(√E) + D₊(√E))] / 2π³
impl AnalyticDistribution for Jaffe {
    fn antideriv_df(&self, e: f64) -> f64 {
        let (x1, x2) = (e.sqrt(), (2.0 * e).sqrt());
        (dawson_minus(x2) - dawson_plus(x2) + 2.0 * SQRT_2 * (dawson_plus(x1) - dawson_minus(x1)))
            / (4.0 * PI.powi(3))
    }

    fn df(&self, e: f64) -> f64 {
        let (x1, x2) = (e.sqrt(), (2.0 * e).sqrt());
        (dawson_minus(x2) + dawson_plus(x2) - SQRT_2 * (dawson_minus(x1) + dawson_plus(x1)))
            / (2.0 * PI.powi(3))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn analytic_df_is_the_derivative_of_its_antiderivative() {
        let model = Jaffe::new();
        for &e in &[0.2, 1.0, 2.5] {
            let h = 1e-5 * e;
            let numeric = (model.antideriv_df(e + h) - model.antideriv_df(e - h)) / (2.0 * h);
            assert_relative_eq!(numeric, model.df(e), max_relative = 1e-6);
        }
    }

    #[test]
    fn antiderivative_matches_reference_values() {
        let model = Jaffe::new();
        assert_relative_eq!(model.antideriv_df(0.5), 9.690_264_678_857_08e-4, max_relative = 1e-9);
        assert_relative_eq!(model.antideriv_df(2.0), 0.253_656_458_956_973_53, max_relative = 1e-9);
    }
}
