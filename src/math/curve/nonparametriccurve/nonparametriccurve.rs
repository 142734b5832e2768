use crate::godicerror::{
    GodicError,
    GodicResult
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2D {
    x: f64,
    y: f64
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Point2D {
        Point2D { x: x, y: y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Zips abscissas and ordinates; both slices must have the same length.
    pub fn from_slices(xs: &[f64], ys: &[f64]) -> GodicResult<Vec<Point2D>> {
        if xs.len() != ys.len() {
            return Err(GodicError::shape_mismatch("ordinates", xs.len(), ys.len()));
        }
        Ok(xs.iter()
            .zip(ys.iter())
            .map(|(&x, &y)| Point2D::new(x, y))
            .collect())
    }
}

/// Checks that the abscissas are finite and strictly increasing.
pub fn check_strictly_increasing(points: &[Point2D]) -> GodicResult<()> {
    if let Some(pt) = points.iter().find(|pt| !pt.x().is_finite() || !pt.y().is_finite()) {
        return Err(GodicError::domain(
            "spline fit",
            format!("non-finite sample ({}, {})", pt.x(), pt.y()),
        ));
    }
    match points.windows(2).position(|w| w[1].x() <= w[0].x()) {
        Some(i) => Err(GodicError::domain(
            "spline fit",
            format!(
                "abscissas not strictly increasing at index {}: {} followed by {}",
                i + 1,
                points[i].x(),
                points[i + 1].x()
            ),
        )),
        None => Ok(()),
    }
}

pub trait NonparametricCurve {
    fn points(&self) -> Vec<Point2D>;

    fn min_x(&self) -> f64;

    fn max_x(&self) -> f64;
}
