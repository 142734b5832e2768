use std::f64::consts::PI;

use approx::assert_relative_eq;

use godic::math::grid::linspace;
use godic::model::exponential::Exponential;
use godic::model::exponentiallinear::ExponentialLinear;
use godic::model::henonisochrone::HenonIsochrone;
use godic::model::jaffe::Jaffe;
use godic::model::plummer::Plummer;
use godic::model::sphericalmodel::SphericalModel;

fn all_models() -> Vec<Box<dyn SphericalModel>> {
    vec![
        Box::new(Exponential::new()),
        Box::new(ExponentialLinear::new()),
        Box::new(HenonIsochrone::new()),
        Box::new(Plummer::new()),
        Box::new(Jaffe::new()),
    ]
}

fn finite_mass_models() -> Vec<Box<dyn SphericalModel>> {
    vec![
        Box::new(Exponential::new()),
        Box::new(ExponentialLinear::new()),
        Box::new(HenonIsochrone::new()),
        Box::new(Plummer::new()),
    ]
}

/// Composite Simpson rule on an odd number of evenly spaced samples.
fn simpson(ys: &[f64], h: f64) -> f64 {
    let n = ys.len();
    let interior: f64 = ys[1..n - 1]
        .iter()
        .enumerate()
        .map(|(i, y)| if i % 2 == 0 { 4.0 * y } else { 2.0 * y })
        .sum();
    (ys[0] + ys[n - 1] + interior) * h / 3.0
}

/// Total mass, splitting [0, ∞) at `cutoff` and mapping the tail onto
/// u = 1/r ∈ [0, 1/cutoff].
fn total_mass(model: &dyn SphericalModel, cutoff: f64) -> f64 {
    let n = 10_001;
    let rs = linspace(0.0, cutoff, n);
    let inner: Vec<f64> = rs.iter().map(|&r| 4.0 * PI * r * r * model.mass_density(r)).collect();

    let us = linspace(0.0, 1.0 / cutoff, n);
    let outer: Vec<f64> = us
        .iter()
        .map(|&u| {
            // shifted to keep 1/u finite at u = 0
            let r = 1.0 / (u + 1e-12);
            4.0 * PI * r.powi(4) * model.mass_density(r)
        })
        .collect();

    simpson(&inner, rs[1] - rs[0]) + simpson(&outer, us[1] - us[0])
}

/// Second-order finite difference on an arbitrary grid, one-sided at the ends.
fn first_derivative(f: &[f64], x: &[f64]) -> Vec<f64> {
    let n = f.len();
    let mut dfdx = vec![0.0; n];

    let (d0, d1) = (x[1] - x[0], x[2] - x[1]);
    dfdx[0] = (-(2.0 * d0 + d1) * f[0] / d0 - d0 * f[2] / d1) / (d0 + d1)
        + (d0 + d1) * f[1] / (d0 * d1);

    for j in 1..n - 1 {
        let (dj, djm1) = (x[j + 1] - x[j], x[j] - x[j - 1]);
        dfdx[j] = (djm1 * f[j + 1] / dj - dj * f[j - 1] / djm1) / (dj + djm1)
            + (dj - djm1) * f[j] / (dj * djm1);
    }

    let (dn2, dn3) = (x[n - 1] - x[n - 2], x[n - 2] - x[n - 3]);
    dfdx[n - 1] = ((2.0 * dn2 + dn3) * f[n - 1] / dn2 + dn2 * f[n - 3] / dn3) / (dn2 + dn3)
        - (dn2 + dn3) * f[n - 2] / (dn2 * dn3);
    dfdx
}

#[test]
fn mass_is_normalized_to_unity() {
    for model in finite_mass_models() {
        let mass = total_mass(model.as_ref(), 10.0);
        assert!((mass - 1.0).abs() < 5e-8, "mass = {} for the {} model", mass, model.name());
    }
}

#[test]
fn potential_solves_poisson_equation() {
    let rs = linspace(0.3, 0.7, 10_000);
    for model in all_models() {
        let offset = model.regularization_offset();
        let flux: Vec<f64> = rs
            .iter()
            .map(|&r| -r * r * model.deriv_relative_potential(r, offset))
            .collect();
        let divergence = first_derivative(&flux, &rs);
        for (i, &r) in rs.iter().enumerate() {
            let four_pi_density = 4.0 * PI * model.mass_density(r);
            let laplacian = divergence[i] / (r * r);
            assert!(
                ((laplacian - four_pi_density) / four_pi_density).abs() < 1e-7,
                "Poisson's equation fails at r = {} for the {} model",
                r,
                model.name()
            );
        }
    }
}

#[test]
fn drho_dpsi_is_the_ratio_of_radial_derivatives() {
    for model in all_models() {
        let offset = model.regularization_offset();
        for &r in &[1e-3, 0.05, 0.3, 1.0, 5.0, 50.0] {
            let ratio = model.deriv_mass_density(r) / model.deriv_relative_potential(r, offset);
            assert_relative_eq!(model.drho_dpsi(r, offset), ratio, max_relative = 1e-12);
        }
    }
}

#[test]
fn radial_derivatives_match_finite_differences() {
    for model in all_models() {
        let offset = model.regularization_offset();
        for &r in &[0.05, 0.3, 1.0, 5.0, 20.0] {
            let h = 1e-4 * r;
            let drho = (model.mass_density(r + h) - model.mass_density(r - h)) / (2.0 * h);
            let dpsi = (model.relative_potential(r + h, offset)
                - model.relative_potential(r - h, offset))
                / (2.0 * h);
            assert_relative_eq!(model.deriv_mass_density(r), drho, max_relative = 1e-5);
            let analytic = model.deriv_relative_potential(r, offset);
            assert_relative_eq!(analytic, dpsi, max_relative = 1e-5);
        }
    }
}

#[test]
fn profiles_decrease_outwards() {
    let rs: Vec<f64> = linspace(-8.0, 8.0, 200).into_iter().map(f64::exp).collect();
    for model in all_models() {
        let offset = model.regularization_offset();
        for w in rs.windows(2) {
            let (inner, outer) = (
                model.relative_potential(w[0], offset),
                model.relative_potential(w[1], offset),
            );
            assert!(outer < inner);
            assert!(outer > 0.0);
        }
        for w in rs.windows(2).filter(|w| w[1] < 100.0) {
            assert!(model.mass_density(w[1]) < model.mass_density(w[0]), "{}", model.name());
        }
    }
}
