use thiserror::Error;

/// AnalysisError is returned by every transform whose preconditions are not fulfilled. The
/// transforms are deterministic, so retrying a failed call on the same inputs is pointless.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// A required value is absent, e.g. all three qualifying segments of every driver.
    #[error("Missing data: {0}")]
    MissingData(String),
    /// A precondition is violated, e.g. a decreasing distance grid.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Fewer samples than the algorithm requires.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),
    /// The fallback palette has no unused color left.
    #[error("Palette exhausted: {0}")]
    PaletteExhausted(String),
}

/// argmin returns the index of the first minimum value in the array x, None for an empty array.
pub fn argmin<T: std::cmp::PartialOrd>(x: &[T]) -> Option<usize> {
    if x.is_empty() {
        return None;
    }

    let (min_idx, _min_val) =
        x.iter()
            .enumerate()
            .fold((0, &x[0]), |(idx_min, val_min), (idx, val)| {
                if val < val_min {
                    (idx, val)
                } else {
                    (idx_min, val_min)
                }
            });
    Some(min_idx)
}

/// is_non_decreasing returns true if every value of x is greater or equal to its predecessor.
pub fn is_non_decreasing(x: &[f64]) -> bool {
    x.windows(2).all(|w| w[0] <= w[1])
}

/// lin_interp returns the linearly interpolated value at x for given discrete data points xp, fp.
/// xp must be non-decreasing and of the same length as fp (at least one element). Values of x
/// outside the range of xp are clamped to the first or last value of fp. Inspired by numpy.interp.
pub fn lin_interp(x: f64, xp: &[f64], fp: &[f64]) -> f64 {
    debug_assert_eq!(xp.len(), fp.len());

    if x.is_nan() {
        return f64::NAN;
    }

    if x <= xp[0] {
        return fp[0];
    }

    // index of the first element greater or equal to x -> xp[i - 1] < x <= xp[i]
    let i = xp.partition_point(|&v| v < x);

    if i >= xp.len() {
        return fp[fp.len() - 1];
    }

    fp[i - 1] + (x - xp[i - 1]) * (fp[i] - fp[i - 1]) / (xp[i] - xp[i - 1])
}

/// quantile returns the q-quantile (q in [0.0, 1.0]) of the sorted array x using linear
/// interpolation between the closest ranks, None for an empty array.
pub fn quantile(x_sorted: &[f64], q: f64) -> Option<f64> {
    if x_sorted.is_empty() {
        return None;
    }

    let pos = q.max(0.0).min(1.0) * (x_sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;

    Some(x_sorted[lo] + (pos - lo as f64) * (x_sorted[hi] - x_sorted[lo]))
}

/// linear_fit returns slope and intercept of the least-squares line through the points (x, y),
/// None if fewer than two distinct x values are given.
pub fn linear_fit(x: &[f64], y: &[f64]) -> Option<(f64, f64)> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }

    let n = x.len() as f64;
    let x_mean = x.iter().sum::<f64>() / n;
    let y_mean = y.iter().sum::<f64>() / n;

    let (mut sxy, mut sxx) = (0.0, 0.0);
    for (xi, yi) in x.iter().zip(y.iter()) {
        sxy += (xi - x_mean) * (yi - y_mean);
        sxx += (xi - x_mean).powi(2);
    }

    if sxx <= f64::EPSILON {
        return None;
    }

    let slope = sxy / sxx;
    Some((slope, y_mean - slope * x_mean))
}
