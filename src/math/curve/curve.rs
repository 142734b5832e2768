use crate::godicerror::GodicResult;

/// A real function of one variable that can be evaluated and differentiated.
pub trait Curve {
    fn value(&self, x: f64) -> GodicResult<f64>;

    /// Derivative of the given order at `x`; order 0 is the value itself.
    fn derivative(&self, x: f64, order: usize) -> GodicResult<f64>;

    fn values(&self, xs: &[f64]) -> GodicResult<Vec<f64>> {
        xs.iter().map(|&x| self.value(x)).collect()
    }

    fn derivatives(&self, xs: &[f64], order: usize) -> GodicResult<Vec<f64>> {
        xs.iter().map(|&x| self.derivative(x, order)).collect()
    }
}
