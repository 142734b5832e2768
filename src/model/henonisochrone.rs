use std::f64::consts::PI;

use crate::model::sphericalmodel::SphericalModel;

/// Hénon's isochrone, lengths in units of b, the radius within which the
/// density is roughly constant.
///
/// All closed forms are regular at r = 0, so no Taylor branch is needed.
/// The isochrone DF is not provided in closed form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HenonIsochrone {
    offset: f64,
}

impl HenonIsochrone {
    pub fn new() -> HenonIsochrone {
        HenonIsochrone { offset: 0.0 }
    }

    pub fn with_offset(offset: f64) -> HenonIsochrone {
        HenonIsochrone { offset }
    }
}

impl Default for HenonIsochrone {
    fn default() -> Self {
        HenonIsochrone::new()
    }
}

/// a = √(1 + r²)
fn a_of(r: f64) -> f64 {
    (1.0 + r * r).sqrt()
}

impl SphericalModel for HenonIsochrone {
    fn name(&self) -> &'static str {
        "HenonIsochrone"
    }

    /// [3(1 + a)a² - r²(1 + 3a)] / [4π a³(1 + a)³], with a² = 1 + r²
    /// substituted into the numerator.
    fn mass_density(&self, r: f64) -> f64 {
        let a = a_of(r);
        (3.0 * (1.0 + a) + 2.0 * r * r) / (a * (1.0 + a)).powi(3) / (4.0 * PI)
    }

    fn deriv_mass_density(&self, r: f64) -> f64 {
        let a = a_of(r);
        let numerator = r * (20.0 * (1.0 + a) + r * r * (17.0 + 8.0 * a));
        -numerator / (a * (1.0 + a)).powi(4) / (4.0 * PI * a)
    }

    fn relative_potential(&self, r: f64, _offset: f64) -> f64 {
        1.0 / (1.0 + a_of(r))
    }

    fn deriv_relative_potential(&self, r: f64, _offset: f64) -> f64 {
        let a = a_of(r);
        -r / (a * (1.0 + a) * (1.0 + a))
    }

    fn drho_dpsi(&self, r: f64, _offset: f64) -> f64 {
        // the factor r cancels between ρ' and Ψ'
        let a = a_of(r);
        let numerator = 20.0 * (1.0 + a) + r * r * (17.0 + 8.0 * a);
        numerator / (4.0 * PI * a.powi(4) * (1.0 + a) * (1.0 + a))
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
    fn central_values() {
        let model = HenonIsochrone::new();
        assert_relative_eq!(model.relative_potential(0.0, 0.0), 0.5);
        assert_relative_eq!(model.mass_density(0.0), 3.0 / (16.0 * PI), max_relative = 1e-14);
        assert_relative_eq!(model.drho_dpsi(0.0, 0.0), 2.5 / PI, max_relative = 1e-14);
        assert_eq!(model.deriv_relative_potential(0.0, 0.0), 0.0);
    }
}
