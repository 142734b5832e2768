//! Gauss–Jacobi quadrature rules.
//!
//! The integral of g(x)·(1-x)^α·(1+x)^β over [-1, 1] is approximated by
//!
//!   Σ_i w_i g(x_i)
//!
//! which is exact whenever g is a polynomial of degree at most 2n - 1. A
//! negative α puts an integrable singularity at x = 1 into the weight, so
//! g itself stays regular there.

use nalgebra::{
    DMatrix,
    SymmetricEigen
};

use crate::godicerror::{
    GodicError,
    GodicResult
};
use crate::math::special::ln_gamma;

/// Quadrature nodes and weights on [-1, 1].
#[derive(Debug, Clone)]
pub struct QuadratureRule {
    /// Nodes in increasing order.
    pub x: Vec<f64>,
    pub w: Vec<f64>,
    pub alpha: f64,
    pub beta: f64,
}

impl QuadratureRule {
    /// Σ_i w_i g(x_i), stopping at the first failing evaluation.
    pub fn integrate<F, E>(&self, mut g: F) -> Result<f64, E>
    where
        F: FnMut(f64) -> Result<f64, E>,
    {
        self.x
            .iter()
            .zip(self.w.iter())
            .try_fold(0.0, |acc, (&x, &w)| Ok(acc + w * g(x)?))
    }
}

/// ∫₋₁¹ (1-x)^α (1+x)^β dx = 2^{α+β+1} Γ(α+1) Γ(β+1) / Γ(α+β+2)
fn weight_moment(alpha: f64, beta: f64) -> f64 {
    let ab = alpha + beta;
    ((ab + 1.0) * std::f64::consts::LN_2 + ln_gamma(alpha + 1.0) + ln_gamma(beta + 1.0)
        - ln_gamma(ab + 2.0))
    .exp()
}

/// Diagonal entry of the Jacobi matrix of the orthonormal Jacobi polynomials.
fn recurrence_diagonal(i: usize, alpha: f64, beta: f64) -> f64 {
    let ab = alpha + beta;
    if i == 0 {
        (beta - alpha) / (ab + 2.0)
    } else {
        let two_i_ab = 2.0 * i as f64 + ab;
        (beta * beta - alpha * alpha) / (two_i_ab * (two_i_ab + 2.0))
    }
}

/// Off-diagonal entry coupling P_{i-1} and P_i, i >= 1.
fn recurrence_off_diagonal(i: usize, alpha: f64, beta: f64) -> f64 {
    let ab = alpha + beta;
    if i == 1 {
        // general formula is 0/0 when α + β = -1
        (4.0 * (1.0 + alpha) * (1.0 + beta) / ((ab + 2.0).powi(2) * (ab + 3.0))).sqrt()
    } else {
        let fi = i as f64;
        let two_i_ab = 2.0 * fi + ab;
        (4.0 * fi * (fi + alpha) * (fi + beta) * (fi + ab)
            / (two_i_ab * two_i_ab * (two_i_ab + 1.0) * (two_i_ab - 1.0)))
            .sqrt()
    }
}

/// The n-point Gauss–Jacobi rule for the weight (1-x)^α (1+x)^β.
///
/// Nodes are the eigenvalues of the symmetric Jacobi matrix and the weights
/// the squared first eigenvector components times the weight's total mass
/// (Golub–Welsch). Fails with `Quadrature` if n = 0 or α, β <= -1.
pub fn gauss_jacobi(n: usize, alpha: f64, beta: f64) -> GodicResult<QuadratureRule> {
    if n < 1 {
        return Err(GodicError::quadrature("at least one quadrature node is required"));
    }
    if !(alpha.is_finite() && beta.is_finite() && alpha > -1.0 && beta > -1.0) {
        return Err(GodicError::quadrature(format!(
            "weight exponents must be finite and > -1, got alpha = {}, beta = {}",
            alpha, beta
        )));
    }

    let mu0 = weight_moment(alpha, beta);
    if n == 1 {
        return Ok(QuadratureRule {
            x: vec![recurrence_diagonal(0, alpha, beta)],
            w: vec![mu0],
            alpha,
            beta,
        });
    }

    let mut jacobi = DMatrix::<f64>::zeros(n, n);
    for i in 0..n {
        jacobi[(i, i)] = recurrence_diagonal(i, alpha, beta);
        if i > 0 {
            let b = recurrence_off_diagonal(i, alpha, beta);
            jacobi[(i - 1, i)] = b;
            jacobi[(i, i - 1)] = b;
        }
    }

    let eigen = SymmetricEigen::new(jacobi);
    let mut pairs: Vec<(f64, f64)> = (0..n)
        .map(|j| {
            let v0 = eigen.eigenvectors[(0, j)];
            (eigen.eigenvalues[j], mu0 * v0 * v0)
        })
        .collect();
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

    Ok(QuadratureRule {
        x: pairs.iter().map(|p| p.0).collect(),
        w: pairs.iter().map(|p| p.1).collect(),
        alpha,
        beta,
    })
}
