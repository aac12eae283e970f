use super::*;

// ============================================================================
// Boxplot five-number summary
// ============================================================================

#[test]
fn test_boxplot_stats_odd_count_hits_sample_points() {
    let stats = boxplot_stats(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    assert_eq!(stats, [1.0, 2.0, 3.0, 4.0, 5.0]);
}

#[test]
fn test_boxplot_stats_even_count_interpolates() {
    let stats = boxplot_stats(&[1.0, 2.0, 3.0, 4.0]);
    assert_eq!(stats, [1.0, 1.75, 2.5, 3.25, 4.0]);
}

#[test]
fn test_boxplot_stats_sorts_input_first() {
    let stats = boxplot_stats(&[4.0, 1.0, 3.0, 2.0]);
    assert_eq!(stats, [1.0, 1.75, 2.5, 3.25, 4.0]);
}

#[test]
fn test_boxplot_stats_single_value() {
    let stats = boxplot_stats(&[7.5]);
    assert_eq!(stats, [7.5, 7.5, 7.5, 7.5, 7.5]);
}

#[test]
fn test_boxplot_stats_empty_input_yields_zeros() {
    assert_eq!(boxplot_stats(&[]), [0.0; 5]);
}

#[test]
fn test_boxplot_stats_drops_non_finite_values() {
    let stats = boxplot_stats(&[f64::NAN, 1.0, 2.0, f64::INFINITY, 3.0, 4.0, 5.0]);
    assert_eq!(stats, [1.0, 2.0, 3.0, 4.0, 5.0]);
}

#[test]
fn test_boxplot_stats_all_non_finite_treated_as_empty() {
    assert_eq!(boxplot_stats(&[f64::NAN, f64::NEG_INFINITY]), [0.0; 5]);
}

// ============================================================================
// Density rescale
// ============================================================================

#[test]
fn test_rescale_to_counts_matches_histogram_peak() {
    let density = [0.1, 0.5, 0.2];
    let counts = [2.0, 10.0, 4.0];

    let scaled = rescale_to_counts(&density, &counts);

    assert_eq!(scaled, vec![2.0, 10.0, 4.0]);
}

#[test]
fn test_rescale_to_counts_preserves_curve_shape() {
    let density = [0.25, 1.0, 0.5];
    let counts = [1.0, 8.0, 3.0];

    let scaled = rescale_to_counts(&density, &counts);

    assert_eq!(scaled, vec![2.0, 8.0, 4.0]);
}

#[test]
fn test_rescale_to_counts_zero_peak_returns_input() {
    let density = [0.1, 0.2];

    assert_eq!(rescale_to_counts(&density, &[0.0, 0.0]), vec![0.1, 0.2]);
    assert_eq!(rescale_to_counts(&[0.0, 0.0], &[1.0, 2.0]), vec![0.0, 0.0]);
}

#[test]
fn test_rescale_to_counts_empty_inputs() {
    assert!(rescale_to_counts(&[], &[1.0]).is_empty());
    assert_eq!(rescale_to_counts(&[0.5], &[]), vec![0.5]);
}
