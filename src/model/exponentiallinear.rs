use std::f64::consts::PI;

use crate::math::special::regularized_gamma_p;
use crate::model::exponential::DEFAULT_OFFSET;
use crate::model::sphericalmodel::SphericalModel;

/// Density of a wavefunction combining linear growth and exponential decay,
/// ρ = (1 + r)² e^{-2r} / 7π.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialLinear {
    offset: f64,
}

impl ExponentialLinear {
    pub fn new() -> ExponentialLinear {
        ExponentialLinear { offset: DEFAULT_OFFSET }
    }

    pub fn with_offset(offset: f64) -> ExponentialLinear {
        ExponentialLinear { offset }
    }

    /// Radius enclosing 90% of the mass.
    pub fn r90(&self) -> f64 {
        3.61
    }
}

impl Default for ExponentialLinear {
    fn default() -> Self {
        ExponentialLinear::new()
    }
}

/// -r²Ψ'(r) = 1 - e^{-2r}(1 + 2r + 2r² + 8r³/7 + 2r⁴/7), the enclosed mass.
fn enclosed_mass(r: f64) -> f64 {
    regularized_gamma_p(5, 2.0 * r) + (-2.0 * r).exp() * 4.0 * r.powi(3) * (1.0 + 2.0 * r) / 21.0
}

impl SphericalModel for ExponentialLinear {
    fn name(&self) -> &'static str {
        "ExponentialLinear"
    }

    fn mass_density(&self, r: f64) -> f64 {
        (1.0 + r) * (1.0 + r) * (-2.0 * r).exp() / (7.0 * PI)
    }

    fn deriv_mass_density(&self, r: f64) -> f64 {
        -2.0 * r * (1.0 + r) * (-2.0 * r).exp() / (7.0 * PI)
    }

    /// Ψ = [1 - e^{-2r}(2 + r)(7 + 6r + 2r²)/14] / r
    fn relative_potential(&self, r: f64, offset: f64) -> f64 {
        if r.abs() < offset {
            return 9.0 / 14.0 - 2.0 * r * r / 21.0;
        }
        let polynomial = 9.0 / 14.0 + r * (9.0 / 7.0 + r * 25.0 / 21.0);
        (regularized_gamma_p(4, 2.0 * r) + (-2.0 * r).exp() * r * polynomial) / r
    }

    fn deriv_relative_potential(&self, r: f64, offset: f64) -> f64 {
        if r.abs() < offset {
            return -4.0 * r / 21.0;
        }
        -enclosed_mass(r) / (r * r)
    }

    fn drho_dpsi(&self, r: f64, offset: f64) -> f64 {
        if r.abs() < offset {
            return 0.3 * (5.0 + r * (3.0 * r - 5.0)) / PI;
        }
        2.0 * r.powi(3) * (1.0 + r) * (-2.0 * r).exp() / (7.0 * PI * enclosed_mass(r))
    }

    fn regularization_offset(&self) -> f64 {
        self.offset
    }
}
