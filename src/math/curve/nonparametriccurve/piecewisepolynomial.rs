use crate::godicerror::{
    GodicError,
    GodicResult
};
use crate::math::curve::curve::Curve;
use crate::math::curve::nonparametriccurve::bspline::BSpline;
use crate::math::curve::nonparametriccurve::nonparametriccurve::{
    check_strictly_increasing,
    NonparametricCurve,
    Point2D
};

/// Relative slack at the domain edges that absorbs floating-point roundoff
/// in grid endpoints (e.g. `exp(ln(x))`).
const RANGE_TOLERANCE: f64 = 1e-12;

// ─────────────────────────────────────────────
// Subpolynomial
// ─────────────────────────────────────────────

struct Subpolynomial {
    /// Horner order: coefs[0] multiplies (x - lhs_x)^degree.
    coefs: Vec<f64>,
    lhs_x: f64,
}

impl Subpolynomial {
    pub fn new(coefs: Vec<f64>, lhs_x: f64) -> Subpolynomial {
        Subpolynomial { coefs, lhs_x }
    }

    pub fn value(&self, x: f64) -> f64 {
        let x_diff = x - self.lhs_x;
        let mut result = self.coefs[0];
        for &beta in &self.coefs[1..] {
            result = f64::mul_add(result, x_diff, beta);
        }
        result
    }

    /// Derivative of order `order`, `order <= degree`.
    ///
    /// With a_j the coefficient of h^j, the m-th derivative is
    ///   Σ_{j>=m} a_j · j!/(j-m)! · h^(j-m)
    pub fn derivative(&self, x: f64, order: usize) -> f64 {
        let degree = self.coefs.len() - 1;
        let x_diff = x - self.lhs_x;
        let mut result = 0.0;
        for j in (order..=degree).rev() {
            let falling = ((j - order + 1)..=j).fold(1.0, |acc, i| acc * i as f64);
            result = f64::mul_add(result, x_diff, self.coefs[degree - j] * falling);
        }
        result
    }
}

// ─────────────────────────────────────────────
// Extrapolation
// ─────────────────────────────────────────────

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum Extrapolation {
    /// Evaluation outside [min_x, max_x] is an `InterpolationRange` error.
    #[default]
    Forbid,
    /// Continue the first/last polynomial piece beyond the domain.
    Extrapolate,
}

// ─────────────────────────────────────────────
// PiecewisePolynomial
// ─────────────────────────────────────────────

/// Interpolating spline of degree 1..=5 stored piece by piece.
///
/// The B-spline fit is converted once into Taylor coefficients at the left
/// end of each knot interval, so evaluation is a binary search plus Horner.
pub struct PiecewisePolynomial {
    max_x: f64,
    degree: usize,
    extrapolation: Extrapolation,
    subpolynomial_list: Vec<Subpolynomial>,
}

impl PiecewisePolynomial {
    /// Fits the spline of the given degree through `points`.
    ///
    /// Fails with `Domain` if the abscissas are not strictly increasing and
    /// with `Fit` if `degree` is outside [1, 5] or fewer than `degree + 1`
    /// points are given.
    pub fn interpolate(points: Vec<Point2D>, degree: usize) -> GodicResult<PiecewisePolynomial> {
        check_strictly_increasing(&points)?;
        let bspline = BSpline::interpolate(&points, degree)?;

        let n_coefs = bspline.coefs().len();
        let knots = bspline.knots();
        let subpolynomial_list = (degree..n_coefs)
            .map(|span| {
                let lhs_x = knots[span];
                let ders = bspline.derivatives_at(span, lhs_x, degree);
                let mut factorial = 1.0;
                let mut taylor: Vec<f64> = ders
                    .iter()
                    .enumerate()
                    .map(|(j, d)| {
                        if j > 0 {
                            factorial *= j as f64;
                        }
                        d / factorial
                    })
                    .collect();
                taylor.reverse();
                Subpolynomial::new(taylor, lhs_x)
            })
            .collect();

        log::trace!(
            "fitted degree-{} spline through {} points on [{}, {}]",
            degree,
            points.len(),
            knots[degree],
            knots[n_coefs]
        );

        Ok(PiecewisePolynomial {
            max_x: knots[n_coefs],
            degree,
            extrapolation: Extrapolation::Forbid,
            subpolynomial_list,
        })
    }

    pub fn with_extrapolation(mut self, extrapolation: Extrapolation) -> PiecewisePolynomial {
        self.extrapolation = extrapolation;
        self
    }

    pub fn extrapolation(&self) -> Extrapolation {
        self.extrapolation
    }

    /// Left ends of the pieces followed by the right end of the domain.
    pub fn breakpoints(&self) -> Vec<f64> {
        let mut xs: Vec<f64> = self.subpolynomial_list.iter().map(|s| s.lhs_x).collect();
        xs.push(self.max_x);
        xs
    }

    fn check_range(&self, x: f64) -> GodicResult<()> {
        let (min_x, max_x) = (self.min_x(), self.max_x);
        let slack = RANGE_TOLERANCE * (max_x - min_x);
        let inside = x >= min_x - slack && x <= max_x + slack;
        if !x.is_nan() && (inside || self.extrapolation == Extrapolation::Extrapolate) {
            Ok(())
        } else {
            Err(GodicError::InterpolationRange { x, min: min_x, max: max_x })
        }
    }

    fn find_segment(&self, x: f64) -> usize {
        if x <= self.min_x() {
            0
        } else if x >= self.max_x {
            self.subpolynomial_list.len() - 1
        } else {
            self.subpolynomial_list
                .partition_point(|s| s.lhs_x <= x)
                - 1
        }
    }
}

// ─────────────────────────────────────────────
// Trait implementations
// ─────────────────────────────────────────────

impl NonparametricCurve for PiecewisePolynomial {
    fn points(&self) -> Vec<Point2D> {
        let mut pts: Vec<Point2D> = self
            .subpolynomial_list
            .iter()
            .map(|s| Point2D::new(s.lhs_x, s.value(s.lhs_x)))
            .collect();
        if let Some(last) = self.subpolynomial_list.last() {
            pts.push(Point2D::new(self.max_x, last.value(self.max_x)));
        }
        pts
    }

    fn min_x(&self) -> f64 {
        self.subpolynomial_list[0].lhs_x
    }

    fn max_x(&self) -> f64 {
        self.max_x
    }
}

impl Curve for PiecewisePolynomial {
    fn value(&self, x: f64) -> GodicResult<f64> {
        self.check_range(x)?;
        let i = self.find_segment(x);
        Ok(self.subpolynomial_list[i].value(x))
    }

    fn derivative(&self, x: f64, order: usize) -> GodicResult<f64> {
        self.check_range(x)?;
        if order > self.degree {
            return Err(GodicError::domain(
                "spline evaluation",
                format!("derivative order {} exceeds spline degree {}", order, self.degree),
            ));
        }
        let i = self.find_segment(x);
        Ok(self.subpolynomial_list[i].derivative(x, order))
    }
}
