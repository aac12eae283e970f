//! Numeric helpers behind the chart builders.

/// Five-number boxplot summary of `values`: min, Q1, median, Q3, max.
///
/// Quantiles interpolate linearly between closest ranks, so Q1 of
/// `[1, 2, 3, 4]` is 1.75 rather than a snapped sample point. Non-finite
/// entries are dropped before ranking; an empty input yields all zeros.
pub fn boxplot_stats(values: &[f64]) -> [f64; 5] {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return [0.0; 5];
    }
    sorted.sort_by(f64::total_cmp);

    [
        sorted[0],
        quantile(&sorted, 0.25),
        quantile(&sorted, 0.5),
        quantile(&sorted, 0.75),
        sorted[sorted.len() - 1],
    ]
}

/// Linear-interpolation quantile over an already sorted slice.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let idx = (sorted.len() - 1) as f64 * p;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let lo = idx.floor() as usize;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let hi = idx.ceil() as usize;

    if lo == hi {
        sorted[lo]
    } else {
        #[allow(clippy::cast_precision_loss)]
        let weight = idx - lo as f64;
        sorted[lo] + weight * (sorted[hi] - sorted[lo])
    }
}

/// Rescale a fitted density curve onto a histogram's count axis.
///
/// The overlay shares the histogram's y axis, so the density is multiplied
/// by `max(counts) / max(density)`. When either series is empty or has a
/// non-positive peak the input is returned unchanged.
pub fn rescale_to_counts(density: &[f64], counts: &[f64]) -> Vec<f64> {
    let max_count = counts.iter().copied().fold(0.0_f64, f64::max);
    let max_density = density.iter().copied().fold(0.0_f64, f64::max);
    if max_count <= 0.0 || max_density <= 0.0 {
        return density.to_vec();
    }

    let scale = max_count / max_density;
    density.iter().map(|y| y * scale).collect()
}

#[cfg(test)]
#[path = "stats_test.rs"]
mod stats_test;
