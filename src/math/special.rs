//! Special functions needed by the analytic models and the quadrature rules.

use std::f64::consts::PI;

const LANCZOS_G: f64 = 7.0;

const LANCZOS_COEFS: [f64; 9] = [
    0.999_999_999_999_809_93,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_13,
    -176.615_029_162_140_59,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_571_6e-6,
    1.505_632_735_149_311_6e-7,
];

/// Step of Rybicki's sampling of the Gaussian in `dawson_plus`. The
/// discretization error behaves like exp(-(π/2h)²).
const RYBICKI_STEP: f64 = 0.2;

/// Gaussian tails beyond this distance are dropped from Rybicki's sum.
const RYBICKI_HALF_WIDTH: f64 = 8.0;

/// ln Γ(x) for x > 0 (Lanczos approximation, g = 7, 9 terms).
pub fn ln_gamma(x: f64) -> f64 {
    if x < 0.5 {
        // reflection
        return (PI / (PI * x).sin().abs()).ln() - ln_gamma(1.0 - x);
    }
    let x = x - 1.0;
    let series = LANCZOS_COEFS[1..]
        .iter()
        .enumerate()
        .fold(LANCZOS_COEFS[0], |acc, (i, &c)| acc + c / (x + (i + 1) as f64));
    let t = x + LANCZOS_G + 0.5;
    0.5 * (2.0 * PI).ln() + (x + 0.5) * t.ln() - t + series.ln()
}

/// Dawson's integral F(x) = exp(-x²) ∫₀ˣ exp(t²) dt.
///
/// Power series below |x| = 1, Rybicki's exponentially convergent sum
///   F(x) ≈ π^{-1/2} Σ_{n odd} exp(-(x - nh)²) / n
/// above it.
pub fn dawson_plus(x: f64) -> f64 {
    if x.abs() < 1.0 {
        return dawson_series(x, -1.0);
    }
    let n_lo = ((x - RYBICKI_HALF_WIDTH) / RYBICKI_STEP).floor() as i64;
    let n_hi = ((x + RYBICKI_HALF_WIDTH) / RYBICKI_STEP).ceil() as i64;
    let sum: f64 = (n_lo..=n_hi)
        .filter(|n| n.rem_euclid(2) == 1)
        .map(|n| {
            let shift = x - n as f64 * RYBICKI_STEP;
            (-shift * shift).exp() / n as f64
        })
        .sum();
    sum / PI.sqrt()
}

/// The companion integral exp(x²) ∫₀ˣ exp(-t²) dt = (√π/2) exp(x²) erf(x).
pub fn dawson_minus(x: f64) -> f64 {
    dawson_series(x, 1.0)
}

/// Regularized lower incomplete gamma function P(n, x) for integer n >= 1.
///
/// Equals 1 - e^{-x} Σ_{k<n} x^k/k!, i.e. the exponential tail
/// e^{-x} Σ_{k>=n} x^k/k!, evaluated without cancellation for small x.
pub fn regularized_gamma_p(n: u32, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    let a = n as f64;
    if x < a + 1.0 {
        let mut term = 1.0;
        let mut sum = 1.0;
        for k in 1..10_000 {
            term *= x / (a + k as f64);
            sum += term;
            if term <= f64::EPSILON * sum {
                break;
            }
        }
        sum * (a * x.ln() - x - ln_gamma(a + 1.0)).exp()
    } else {
        let mut term = 1.0;
        let mut sum = 1.0;
        for k in 1..n {
            term *= x / k as f64;
            sum += term;
        }
        1.0 - (-x).exp() * sum
    }
}

/// Σ_n sign^n 2^n x^{2n+1} / (2n+1)!!
fn dawson_series(x: f64, sign: f64) -> f64 {
    let x2 = x * x;
    let mut term = x;
    let mut sum = x;
    for n in 1..10_000 {
        term *= sign * 2.0 * x2 / (2 * n + 1) as f64;
        sum += term;
        if term.abs() <= f64::EPSILON * sum.abs() {
            break;
        }
    }
    sum
}
