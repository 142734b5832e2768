use std::iter::repeat;

use nalgebra::{
    DMatrix,
    DVector
};

use crate::godicerror::{
    GodicError,
    GodicResult
};
use crate::math::curve::nonparametriccurve::nonparametriccurve::Point2D;

pub const MIN_DEGREE: usize = 1;
pub const MAX_DEGREE: usize = 5;

// ─────────────────────────────────────────────
// Knot placement
// ─────────────────────────────────────────────
//
// Interpolating knots as FITPACK places them for a zero smoothing factor:
//   boundary knots repeated (k+1) times,
//   odd k:  interior knots at the data x[(k+1)/2 .. m-(k+1)/2],
//   even k: interior knots at the midpoints of x[k/2 .. m-k/2].
// This gives m coefficients for m points and satisfies Schoenberg-Whitney.

fn interpolation_knots(xs: &[f64], degree: usize) -> Vec<f64> {
    let m = xs.len();
    let mut knots = Vec::with_capacity(m + degree + 1);
    knots.extend(repeat(xs[0]).take(degree + 1));
    if degree % 2 == 1 {
        let half = (degree + 1) / 2;
        knots.extend_from_slice(&xs[half..(m - half)]);
    } else {
        let half = degree / 2;
        knots.extend((half..(m - half - 1)).map(|i| 0.5 * (xs[i] + xs[i + 1])));
    }
    knots.extend(repeat(xs[m - 1]).take(degree + 1));
    knots
}

/// Values and derivatives of the `degree + 1` non-vanishing B-splines at `x`.
///
/// `ders[d][j]` is the d-th derivative of B_{span-degree+j}. Orders above
/// `degree` are identically zero. Piegl & Tiller, algorithm A2.3.
fn basis_function_derivatives(
    knots: &[f64],
    span: usize,
    x: f64,
    degree: usize,
    n_derivs: usize,
) -> Vec<Vec<f64>> {
    let p = degree;
    let mut ndu = vec![vec![0.0_f64; p + 1]; p + 1];
    let mut left = vec![0.0_f64; p + 1];
    let mut right = vec![0.0_f64; p + 1];

    ndu[0][0] = 1.0;
    for j in 1..=p {
        left[j] = x - knots[span + 1 - j];
        right[j] = knots[span + j] - x;
        let mut saved = 0.0;
        for r in 0..j {
            // lower triangle holds knot differences
            ndu[j][r] = right[r + 1] + left[j - r];
            let temp = ndu[r][j - 1] / ndu[j][r];
            ndu[r][j] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        ndu[j][j] = saved;
    }

    let n = n_derivs.min(p);
    let mut ders = vec![vec![0.0_f64; p + 1]; n_derivs + 1];
    for j in 0..=p {
        ders[0][j] = ndu[j][p];
    }

    let mut a = [vec![0.0_f64; p + 1], vec![0.0_f64; p + 1]];
    for r in 0..=p {
        let (mut s1, mut s2) = (0_usize, 1_usize);
        a[0][0] = 1.0;
        for k in 1..=n {
            let mut d = 0.0;
            let rk = r as isize - k as isize;
            let pk = p - k;
            if rk >= 0 {
                a[s2][0] = a[s1][0] / ndu[pk + 1][rk as usize];
                d = a[s2][0] * ndu[rk as usize][pk];
            }
            let j1 = if rk >= -1 { 1 } else { (-rk) as usize };
            let j2 = if r <= pk + 1 { k - 1 } else { p - r };
            for j in j1..=j2 {
                let idx = (rk + j as isize) as usize;
                a[s2][j] = (a[s1][j] - a[s1][j - 1]) / ndu[pk + 1][idx];
                d += a[s2][j] * ndu[idx][pk];
            }
            if r <= pk {
                a[s2][k] = -a[s1][k - 1] / ndu[pk + 1][r];
                d += a[s2][k] * ndu[r][pk];
            }
            ders[k][r] = d;
            std::mem::swap(&mut s1, &mut s2);
        }
    }

    let mut factor = p as f64;
    for k in 1..=n {
        for value in ders[k].iter_mut() {
            *value *= factor;
        }
        factor *= (p - k) as f64;
    }
    ders
}

/// Gaussian elimination restricted to the band `[i - lower, i + upper]`.
///
/// B-spline collocation matrices are totally positive, so elimination without
/// pivoting is stable and creates no fill-in outside the band.
fn solve_banded(
    mut mat: DMatrix<f64>,
    mut rhs: DVector<f64>,
    lower: usize,
    upper: usize,
) -> Option<DVector<f64>> {
    let n = rhs.len();
    let scale = mat.amax().max(f64::MIN_POSITIVE);
    for p in 0..n {
        let pivot = mat[(p, p)];
        if pivot.abs() <= f64::EPSILON * scale {
            return None;
        }
        let last_col = (p + upper).min(n - 1);
        for r in (p + 1)..=(p + lower).min(n - 1) {
            let factor = mat[(r, p)] / pivot;
            if factor == 0.0 {
                continue;
            }
            for c in p..=last_col {
                mat[(r, c)] -= factor * mat[(p, c)];
            }
            rhs[r] -= factor * rhs[p];
        }
    }

    let mut sol = DVector::<f64>::zeros(n);
    for p in (0..n).rev() {
        let last_col = (p + upper).min(n - 1);
        let mut acc = rhs[p];
        for c in (p + 1)..=last_col {
            acc -= mat[(p, c)] * sol[c];
        }
        sol[p] = acc / mat[(p, p)];
    }
    Some(sol)
}

// ─────────────────────────────────────────────
// BSpline
// ─────────────────────────────────────────────

/// Interpolating B-spline in knot/coefficient form.
pub struct BSpline {
    knots: Vec<f64>,
    coefs: Vec<f64>,
    degree: usize,
}

impl BSpline {
    /// Fits the B-spline of the given degree that passes through every point.
    ///
    /// The points must already be validated as strictly increasing in x.
    pub fn interpolate(points: &[Point2D], degree: usize) -> GodicResult<BSpline> {
        let m = points.len();
        if !(MIN_DEGREE..=MAX_DEGREE).contains(&degree) {
            return Err(GodicError::fit(
                m,
                degree,
                format!("degree must lie in [{}, {}]", MIN_DEGREE, MAX_DEGREE),
            ));
        }
        if m < degree + 1 {
            return Err(GodicError::fit(
                m,
                degree,
                format!("at least {} points are required", degree + 1),
            ));
        }

        let xs: Vec<f64> = points.iter().map(|pt| pt.x()).collect();
        let knots = interpolation_knots(&xs, degree);

        let mut mat = DMatrix::<f64>::zeros(m, m);
        let rhs = DVector::<f64>::from_iterator(m, points.iter().map(|pt| pt.y()));
        let (mut lower, mut upper) = (0_usize, 0_usize);
        for (i, &x) in xs.iter().enumerate() {
            let span = find_span(&knots, m, degree, x);
            let first_col = span - degree;
            let basis = basis_function_derivatives(&knots, span, x, degree, 0);
            for (j, &b) in basis[0].iter().enumerate() {
                mat[(i, first_col + j)] = b;
            }
            lower = lower.max(i.saturating_sub(first_col));
            upper = upper.max(span.saturating_sub(i));
        }

        let coefs = solve_banded(mat, rhs, lower, upper)
            .ok_or_else(|| GodicError::fit(m, degree, "singular collocation system"))?;

        Ok(BSpline {
            knots,
            coefs: coefs.as_slice().to_vec(),
            degree,
        })
    }

    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    pub fn coefs(&self) -> &[f64] {
        &self.coefs
    }

    /// Index of the knot span holding `x`, clamped to the first/last span.
    pub fn find_span(&self, x: f64) -> usize {
        find_span(&self.knots, self.coefs.len(), self.degree, x)
    }

    /// The spline value and its derivatives up to `n_derivs`, from span `span`.
    pub fn derivatives_at(&self, span: usize, x: f64, n_derivs: usize) -> Vec<f64> {
        let basis = basis_function_derivatives(&self.knots, span, x, self.degree, n_derivs);
        let first_col = span - self.degree;
        basis
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(j, b)| b * self.coefs[first_col + j])
                    .sum()
            })
            .collect()
    }
}

fn find_span(knots: &[f64], n_coefs: usize, degree: usize, x: f64) -> usize {
    if x >= knots[n_coefs] {
        return n_coefs - 1;
    }
    let interior = &knots[(degree + 1)..n_coefs];
    degree + interior.partition_point(|&t| t <= x)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn sample(xs: &[f64], f: impl Fn(f64) -> f64) -> Vec<Point2D> {
        xs.iter().map(|&x| Point2D::new(x, f(x))).collect()
    }

    #[test]
    fn knots_match_fitpack_layout() {
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let cubic = interpolation_knots(&xs, 3);
        assert_eq!(cubic, vec![0.0, 0.0, 0.0, 0.0, 2.0, 3.0, 5.0, 5.0, 5.0, 5.0]);
        let quadratic = interpolation_knots(&xs, 2);
        assert_eq!(quadratic, vec![0.0, 0.0, 0.0, 1.5, 2.5, 3.5, 5.0, 5.0, 5.0]);
    }

    #[test]
    fn basis_is_a_partition_of_unity() {
        let xs: Vec<f64> = (0..9).map(|i| i as f64 * 0.5).collect();
        let knots = interpolation_knots(&xs, 4);
        for &x in &[0.0, 0.3, 1.7, 2.2, 3.9, 4.0] {
            let span = find_span(&knots, xs.len(), 4, x);
            let ders = basis_function_derivatives(&knots, span, x, 4, 2);
            assert_abs_diff_eq!(ders[0].iter().sum::<f64>(), 1.0, epsilon = 1e-14);
            assert_abs_diff_eq!(ders[1].iter().sum::<f64>(), 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(ders[2].iter().sum::<f64>(), 0.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn interpolates_the_samples() {
        let xs: Vec<f64> = (0..12).map(|i| (i as f64 * 0.37).exp()).collect();
        let points = sample(&xs, |x| x.sin());
        for degree in MIN_DEGREE..=MAX_DEGREE {
            let spline = BSpline::interpolate(&points, degree).unwrap();
            for pt in &points {
                let span = spline.find_span(pt.x());
                let value = spline.derivatives_at(span, pt.x(), 0)[0];
                assert_abs_diff_eq!(value, pt.y(), epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn rejects_bad_degree_and_short_input() {
        let points = sample(&[0.0, 1.0, 2.0], |x| x);
        assert!(matches!(
            BSpline::interpolate(&points, 3),
            Err(GodicError::Fit { points: 3, degree: 3, .. })
        ));
        assert!(matches!(
            BSpline::interpolate(&points, 0),
            Err(GodicError::Fit { .. })
        ));
        assert!(matches!(
            BSpline::interpolate(&points, 6),
            Err(GodicError::Fit { .. })
        ));
    }
}
