use thiserror::Error;

pub type GodicResult<T> = Result<T, GodicError>;

/// Errors raised anywhere in the Eddington pipeline.
///
/// Every variant carries the offending values so that the caller can retry
/// with adjusted parameters (more points, more nodes, deeper refinement).
#[derive(Error, Debug)]
pub enum GodicError {
    /// Physical input that is non-monotonic, non-finite or out of range.
    #[error("domain error in {component}: {message}")]
    Domain {
        component: &'static str,
        message: String,
    },

    /// Spline fit that cannot be built with the requested degree.
    #[error("fit error: {message} ({points} points, degree {degree})")]
    Fit {
        points: usize,
        degree: usize,
        message: String,
    },

    #[error("x = {x} lies outside the interpolation range [{min}, {max}]")]
    InterpolationRange { x: f64, min: f64, max: f64 },

    /// Invalid node count or weight exponents for a quadrature rule.
    #[error("quadrature error: {message}")]
    Quadrature { message: String },

    /// Adaptive integration missed its tolerance within the depth budget.
    #[error(
        "integration at radius #{index} (r = {radius}) did not converge after {levels} levels \
         (last change {change:e})"
    )]
    Convergence {
        index: usize,
        radius: f64,
        levels: usize,
        change: f64,
    },

    #[error("shape mismatch for {name}: expected {expected}, got {actual}")]
    ShapeMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl GodicError {
    pub fn domain(component: &'static str, message: impl Into<String>) -> GodicError {
        GodicError::Domain {
            component,
            message: message.into(),
        }
    }

    pub fn fit(points: usize, degree: usize, message: impl Into<String>) -> GodicError {
        GodicError::Fit {
            points,
            degree,
            message: message.into(),
        }
    }

    pub fn quadrature(message: impl Into<String>) -> GodicError {
        GodicError::Quadrature {
            message: message.into(),
        }
    }

    pub fn shape_mismatch(name: &'static str, expected: usize, actual: usize) -> GodicError {
        GodicError::ShapeMismatch {
            name,
            expected,
            actual,
        }
    }
}
