use std::f64::consts::PI;

use crate::math::special::regularized_gamma_p;
use crate::model::sphericalmodel::SphericalModel;

pub const DEFAULT_OFFSET: f64 = 1e-6;

/// Density of a wavefunction decaying exponentially with radius,
/// ρ = e^{-2r}/π.
///
/// The potential is written through P(n, 2r), the regularized incomplete
/// gamma function, which keeps the closed forms free of cancellation down
/// to the offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exponential {
    offset: f64,
}

impl Exponential {
    pub fn new() -> Exponential {
        Exponential { offset: DEFAULT_OFFSET }
    }

    pub fn with_offset(offset: f64) -> Exponential {
        Exponential { offset }
    }
}

impl Default for Exponential {
    fn default() -> Self {
        Exponential::new()
    }
}

impl SphericalModel for Exponential {
    fn name(&self) -> &'static str {
        "Exponential"
    }

    fn mass_density(&self, r: f64) -> f64 {
        (-2.0 * r).exp() / PI
    }

    fn deriv_mass_density(&self, r: f64) -> f64 {
        -2.0 * (-2.0 * r).exp() / PI
    }

    /// Ψ = [1 - e^{-2r}(1 + r)] / r
    fn relative_potential(&self, r: f64, offset: f64) -> f64 {
        if r.abs() < offset {
            return 1.0 - 2.0 * r * r / 3.0;
        }
        (regularized_gamma_p(2, 2.0 * r) + r * (-2.0 * r).exp()) / r
    }

    /// Ψ' = -[1 - e^{-2r}(1 + 2r + 2r²)] / r²
    fn deriv_relative_potential(&self, r: f64, offset: f64) -> f64 {
        if r.abs() < offset {
            return -4.0 * r / 3.0 + 2.0 * r * r;
        }
        -regularized_gamma_p(3, 2.0 * r) / (r * r)
    }

    fn drho_dpsi(&self, r: f64, offset: f64) -> f64 {
        if r.abs() < offset {
            return (0.75 * (2.0 / r - 1.0) + 0.0125 * r * (6.0 + r)) / PI;
        }
        2.0 * r * r * (-2.0 * r).exp() / (PI * regularized_gamma_p(3, 2.0 * r))
    }

    fn regularization_offset(&self) -> f64 {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn closed_forms_match_the_textbook_expressions() {
        let model = Exponential::new();
        let r: f64 = 0.37;
        let e = (-2.0 * r).exp();
        assert_relative_eq!(
            model.relative_potential(r, DEFAULT_OFFSET),
            (1.0 - e * (1.0 + r)) / r,
            max_relative = 1e-13
        );
        assert_relative_eq!(
            model.deriv_relative_potential(r, DEFAULT_OFFSET),
            e * (1.0 - (2.0 * r).exp() + 2.0 * r * (1.0 + r)) / (r * r),
            max_relative = 1e-12
        );
    }

    #[test]
    fn taylor_branch_joins_the_closed_form() {
        let model = Exponential::new();
        let below = 0.999 * DEFAULT_OFFSET;
        let above = 1.001 * DEFAULT_OFFSET;
        assert_relative_eq!(
            model.relative_potential(below, DEFAULT_OFFSET),
            model.relative_potential(above, 0.0),
            max_relative = 1e-9
        );
        assert_relative_eq!(
            model.deriv_relative_potential(below, DEFAULT_OFFSET),
            model.deriv_relative_potential(below, 0.0),
            max_relative = 1e-5
        );
        assert_relative_eq!(
            model.drho_dpsi(below, DEFAULT_OFFSET),
            model.drho_dpsi(below, 0.0),
            max_relative = 1e-9
        );
    }

    #[test]
    fn far_field_is_keplerian() {
        let model = Exponential::new();
        let r = 400.0;
        let psi = model.relative_potential(r, DEFAULT_OFFSET);
        let dpsi = model.deriv_relative_potential(r, DEFAULT_OFFSET);
        assert_relative_eq!(psi, 1.0 / r, max_relative = 1e-14);
        assert_relative_eq!(dpsi, -1.0 / (r * r), max_relative = 1e-14);
    }
}
