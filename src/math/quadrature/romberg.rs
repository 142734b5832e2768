use crate::godicerror::{
    GodicError,
    GodicResult
};

/// Tolerances and depth limit of the Romberg scheme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RombergOptions {
    /// Absolute tolerance on the change between successive diagonal entries.
    pub atol: f64,
    /// Relative tolerance on the same change.
    pub rtol: f64,
    /// Maximum number of interval halvings.
    pub max_levels: usize,
}

impl Default for RombergOptions {
    fn default() -> Self {
        RombergOptions {
            atol: 1e-12,
            rtol: 1e-12,
            max_levels: 20,
        }
    }
}

impl RombergOptions {
    pub fn with_max_levels(mut self, max_levels: usize) -> RombergOptions {
        self.max_levels = max_levels;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RombergResult {
    /// Latest diagonal entry of the Romberg table.
    pub value: f64,
    /// |R(i, i) - R(i-1, i-1)| at the last level.
    pub change: f64,
    /// Number of halvings performed.
    pub levels: usize,
    pub evaluations: usize,
    pub converged: bool,
}

/// Romberg integration of `f` over [a, b].
///
/// Level i refines the trapezoid rule to 2^i intervals, reusing every
/// earlier sample, and Richardson-extrapolates the new row of the table.
/// Iteration stops once the diagonal changes by less than
/// max(atol, rtol·|value|). Running out of levels is not an error here; the
/// result then carries `converged == false`.
pub fn romberg<F>(mut f: F, a: f64, b: f64, options: &RombergOptions) -> GodicResult<RombergResult>
where
    F: FnMut(f64) -> GodicResult<f64>,
{
    if !(a.is_finite() && b.is_finite()) {
        return Err(GodicError::domain(
            "romberg",
            format!("integration limits must be finite, got [{}, {}]", a, b),
        ));
    }

    let range = b - a;
    let mut ordinate_sum = 0.5 * (f(a)? + f(b)?);
    let mut evaluations = 2;
    let mut n_intervals = 1_usize;
    let mut previous_row = vec![range * ordinate_sum];
    let mut change = f64::INFINITY;

    for level in 1..=options.max_levels {
        let h = range / n_intervals as f64;
        for j in 0..n_intervals {
            ordinate_sum += f(a + (j as f64 + 0.5) * h)?;
        }
        evaluations += n_intervals;
        n_intervals *= 2;

        let mut row = Vec::with_capacity(level + 1);
        row.push(range * ordinate_sum / n_intervals as f64);
        let mut power_of_four = 1.0;
        for k in 0..level {
            power_of_four *= 4.0;
            row.push(row[k] + (row[k] - previous_row[k]) / (power_of_four - 1.0));
        }

        let value = row[level];
        change = (value - previous_row[level - 1]).abs();
        log::trace!("romberg level {}: value = {:e}, change = {:e}", level, value, change);

        if change < options.atol || change < options.rtol * value.abs() {
            return Ok(RombergResult {
                value,
                change,
                levels: level,
                evaluations,
                converged: true,
            });
        }
        previous_row = row;
    }

    let value = previous_row[previous_row.len() - 1];
    Ok(RombergResult {
        value,
        change,
        levels: options.max_levels,
        evaluations,
        converged: false,
    })
}
