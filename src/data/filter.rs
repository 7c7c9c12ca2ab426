use crate::config::DecreaseMode;

// ---------------------------------------------------------------------------
// Decrease tests
// ---------------------------------------------------------------------------

/// True when every value is strictly below the one before it.
/// A single value is trivially decreasing.
pub fn is_strictly_decreasing(values: &[f64]) -> bool {
    values.windows(2).all(|pair| pair[1] < pair[0])
}

/// Ordinary least-squares slope of `values` against their indices `0..n`.
///
/// `None` for fewer than two points, where the slope is undefined.
pub fn ols_slope(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }

    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2) = (0.0, 0.0, 0.0, 0.0);
    for (i, &y) in values.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
    }

    let n = n as f64;
    Some((n * sum_xy - sum_x * sum_y) / (n * sum_x2 - sum_x * sum_x))
}

/// True when the fitted slope is below `slope_threshold`.
/// A single point has no slope and never counts as a trend.
pub fn is_trend_decreasing(values: &[f64], slope_threshold: f64) -> bool {
    ols_slope(values).is_some_and(|slope| slope < slope_threshold)
}

// ---------------------------------------------------------------------------
// Row classification
// ---------------------------------------------------------------------------

/// Outcome of classifying one complete window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    /// First value below the minimum; the decrease test was not run.
    BelowMinimum,
    NotDecreasing,
}

/// Gate on the initial value, then apply the selected decrease test.
pub fn classify(window: &[f64], min_initial: f64, mode: DecreaseMode) -> Verdict {
    match window.first() {
        Some(&first) if first >= min_initial => {}
        _ => return Verdict::BelowMinimum,
    }

    let decreasing = match mode {
        DecreaseMode::Strict => is_strictly_decreasing(window),
        DecreaseMode::Trend { slope_threshold } => is_trend_decreasing(window, slope_threshold),
    };

    if decreasing {
        Verdict::Accepted
    } else {
        Verdict::NotDecreasing
    }
}
