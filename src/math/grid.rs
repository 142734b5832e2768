use crate::godicerror::{
    GodicError,
    GodicResult
};

/// `n` evenly spaced values from `start` to `end`, both included.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// `n` values evenly spaced in log from `start` to `end`. Both endpoints are
/// returned exactly, and both must be strictly positive.
pub fn geomspace(start: f64, end: f64, n: usize) -> GodicResult<Vec<f64>> {
    if !(start > 0.0 && end > 0.0 && start.is_finite() && end.is_finite()) {
        return Err(GodicError::domain(
            "geometric grid",
            format!("endpoints must be positive and finite, got {} and {}", start, end),
        ));
    }
    let mut grid: Vec<f64> = linspace(start.ln(), end.ln(), n)
        .into_iter()
        .map(f64::exp)
        .collect();
    if let Some(first) = grid.first_mut() {
        *first = start;
    }
    if n > 1 {
        grid[n - 1] = end;
    }
    Ok(grid)
}
