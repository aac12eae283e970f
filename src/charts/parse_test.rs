use serde_json::json;

use super::*;

fn make_config(kind: ChartKind, data: Value) -> ChartConfig {
    ChartConfig {
        kind,
        title: "测试图表".to_owned(),
        data,
        x_label: None,
        y_label: None,
    }
}

// ============================================================================
// Scatter and residual plots
// ============================================================================

#[test]
fn test_parse_scatter_wrapped_points() {
    let config = make_config(ChartKind::Scatter, json!({"points": [[1.0, 2.0], [3.0, 4.5]]}));

    let parsed = parse_chart_data(&config).unwrap();

    assert_eq!(
        parsed,
        ChartData::Scatter(ScatterData {
            points: vec![[1.0, 2.0], [3.0, 4.5]],
        })
    );
}

#[test]
fn test_parse_scatter_bare_array() {
    let config = make_config(ChartKind::Scatter, json!([[0, 1], [2, 3]]));

    let parsed = parse_chart_data(&config).unwrap();

    assert_eq!(
        parsed,
        ChartData::Scatter(ScatterData {
            points: vec![[0.0, 1.0], [2.0, 3.0]],
        })
    );
}

#[test]
fn test_parse_residual_plot_shares_scatter_shape() {
    let config = make_config(ChartKind::Residual, json!({"points": [[1.0, -0.5]]}));

    let parsed = parse_chart_data(&config).unwrap();

    assert_eq!(
        parsed,
        ChartData::Scatter(ScatterData {
            points: vec![[1.0, -0.5]],
        })
    );
}

#[test]
fn test_parse_scatter_rejects_non_pair_entries() {
    let config = make_config(ChartKind::Scatter, json!({"points": [[1.0, 2.0, 3.0]]}));

    let err = parse_chart_data(&config).unwrap_err();

    assert!(err.contains("散点图"), "unexpected message: {err}");
}

#[test]
fn test_parse_scatter_rejects_non_numeric_points() {
    let config = make_config(ChartKind::Scatter, json!({"points": [["a", "b"]]}));

    assert!(parse_chart_data(&config).is_err());
}

// ============================================================================
// Box charts
// ============================================================================

#[test]
fn test_parse_box_raw_groups() {
    let config = make_config(
        ChartKind::Box,
        json!({"groups": ["甲", "乙"], "values": [[1.0, 2.0], [3.0, 4.0, 5.0]]}),
    );

    let parsed = parse_chart_data(&config).unwrap();

    assert_eq!(
        parsed,
        ChartData::Box(BoxData::Raw {
            groups: vec!["甲".to_owned(), "乙".to_owned()],
            values: vec![vec![1.0, 2.0], vec![3.0, 4.0, 5.0]],
        })
    );
}

#[test]
fn test_parse_box_precomputed_stats() {
    let config = make_config(
        ChartKind::Box,
        json!({"categories": ["A"], "values": [[1.0, 2.0, 3.0, 4.0, 5.0]]}),
    );

    let parsed = parse_chart_data(&config).unwrap();

    assert_eq!(
        parsed,
        ChartData::Box(BoxData::Stats {
            categories: vec!["A".to_owned()],
            values: vec![[1.0, 2.0, 3.0, 4.0, 5.0]],
        })
    );
}

#[test]
fn test_parse_box_rejects_group_value_length_mismatch() {
    let config = make_config(
        ChartKind::Box,
        json!({"groups": ["甲", "乙"], "values": [[1.0]]}),
    );

    let err = parse_chart_data(&config).unwrap_err();

    assert!(err.contains("长度不一致"), "unexpected message: {err}");
}

#[test]
fn test_parse_box_rejects_wrong_stats_arity() {
    let config = make_config(
        ChartKind::Box,
        json!({"categories": ["A"], "values": [[1.0, 2.0, 3.0, 4.0]]}),
    );

    assert!(parse_chart_data(&config).is_err());
}

// ============================================================================
// Bar charts
// ============================================================================

#[test]
fn test_parse_bar_crosstab_aligns_rows_with_zero_fill() {
    let config = make_config(
        ChartKind::Bar,
        json!({"table": {
            "A": {"x": 1, "y": 2},
            "B": {"y": 3, "z": 4},
        }}),
    );

    let parsed = parse_chart_data(&config).unwrap();

    assert_eq!(
        parsed,
        ChartData::Bar(BarData::Crosstab(CrosstabBars {
            categories: vec!["x".to_owned(), "y".to_owned(), "z".to_owned()],
            series: vec![
                ("A".to_owned(), vec![1.0, 2.0, 0.0]),
                ("B".to_owned(), vec![0.0, 3.0, 4.0]),
            ],
        }))
    );
}

#[test]
fn test_parse_bar_simple_categories() {
    let config = make_config(
        ChartKind::Bar,
        json!({"categories": ["一", "二"], "values": [10, 20]}),
    );

    let parsed = parse_chart_data(&config).unwrap();

    assert_eq!(
        parsed,
        ChartData::Bar(BarData::Simple {
            categories: vec!["一".to_owned(), "二".to_owned()],
            values: vec![10.0, 20.0],
        })
    );
}

#[test]
fn test_parse_bar_rejects_unrecognized_shape() {
    let config = make_config(ChartKind::Bar, json!({"rows": [1, 2]}));

    let err = parse_chart_data(&config).unwrap_err();

    assert!(err.contains("柱状图"), "unexpected message: {err}");
}

#[test]
fn test_parse_bar_rejects_category_value_length_mismatch() {
    let config = make_config(
        ChartKind::Bar,
        json!({"categories": ["一"], "values": [1, 2]}),
    );

    assert!(parse_chart_data(&config).is_err());
}

// ============================================================================
// Distribution charts
// ============================================================================

#[test]
fn test_parse_distribution_numeric_edges() {
    let config = make_config(
        ChartKind::Distribution,
        json!({"bins": [[0.0, 1.0], [1.0, 2.0]], "counts": [3, 7]}),
    );

    let ChartData::Distribution(dist) = parse_chart_data(&config).unwrap() else {
        panic!("expected distribution data");
    };

    assert_eq!(dist.bins, DistributionBins::Edges(vec![(0.0, 1.0), (1.0, 2.0)]));
    assert_eq!(dist.counts, vec![3.0, 7.0]);
    assert_eq!(dist.bins.labels(), vec!["0-1", "1-2"]);
    assert_eq!(dist.bins.span(), Some((0.0, 2.0)));
    assert!(dist.normal_curve.is_none());
    assert!(dist.capability.is_none());
}

#[test]
fn test_parse_distribution_label_bins() {
    let config = make_config(
        ChartKind::Distribution,
        json!({"bins": ["低", "中", "高"], "counts": [1, 2, 3]}),
    );

    let ChartData::Distribution(dist) = parse_chart_data(&config).unwrap() else {
        panic!("expected distribution data");
    };

    assert_eq!(
        dist.bins,
        DistributionBins::Labels(vec!["低".to_owned(), "中".to_owned(), "高".to_owned()])
    );
    assert_eq!(dist.bins.span(), None);
}

#[test]
fn test_parse_distribution_mixed_bins_fall_back_to_labels() {
    let config = make_config(
        ChartKind::Distribution,
        json!({"bins": [[0.5, 1.5], "other"], "counts": [4, 1]}),
    );

    let ChartData::Distribution(dist) = parse_chart_data(&config).unwrap() else {
        panic!("expected distribution data");
    };

    assert_eq!(
        dist.bins,
        DistributionBins::Labels(vec!["0.5-1.5".to_owned(), "other".to_owned()])
    );
}

#[test]
fn test_parse_distribution_rejects_bin_count_mismatch() {
    let config = make_config(
        ChartKind::Distribution,
        json!({"bins": [[0.0, 1.0]], "counts": [1, 2]}),
    );

    let err = parse_chart_data(&config).unwrap_err();

    assert!(err.contains("长度不一致"), "unexpected message: {err}");
}

#[test]
fn test_parse_distribution_with_curve_and_limits() {
    let config = make_config(
        ChartKind::Distribution,
        json!({
            "bins": [[9.0, 10.0], [10.0, 11.0]],
            "counts": [5, 8],
            "normal_curve": {"x": [9.0, 10.0, 11.0], "y": [0.1, 0.4, 0.1]},
            "usl": 11.5,
            "lsl": 8.5,
            "mean": 10.2,
        }),
    );

    let ChartData::Distribution(dist) = parse_chart_data(&config).unwrap() else {
        panic!("expected distribution data");
    };

    assert_eq!(
        dist.normal_curve,
        Some(NormalCurve {
            x: vec![9.0, 10.0, 11.0],
            y: vec![0.1, 0.4, 0.1],
        })
    );
    assert_eq!(dist.usl, Some(11.5));
    assert_eq!(dist.lsl, Some(8.5));
    assert_eq!(dist.mean, Some(10.2));
}

#[test]
fn test_parse_distribution_capability_block() {
    let config = make_config(
        ChartKind::Distribution,
        json!({
            "bins": [[0.0, 1.0]],
            "counts": [10],
            "cp": 1.42,
            "cpk": 1.33,
            "pp": 1.38,
            "ppk": 1.25,
            "std_dev": 0.12,
            "sample_size": 120,
            "ppm": 66.8,
            "normality_test": {"method": "Shapiro-Wilk", "p_value": 0.32, "is_normal": true},
        }),
    );

    let ChartData::Distribution(dist) = parse_chart_data(&config).unwrap() else {
        panic!("expected distribution data");
    };

    let capability = dist.capability.unwrap();
    assert_eq!(capability.cp, Some(1.42));
    assert_eq!(capability.cpk, Some(1.33));
    assert_eq!(capability.pp, Some(1.38));
    assert_eq!(capability.ppk, Some(1.25));
    assert_eq!(capability.std_dev, Some(0.12));
    assert_eq!(capability.sample_size, Some(120));
    assert_eq!(capability.ppm, Some(66.8));

    let normality = capability.normality.unwrap();
    assert_eq!(normality.method, "Shapiro-Wilk");
    assert_eq!(normality.p_value, Some(0.32));
    assert!(normality.is_normal);
}

// ============================================================================
// Control charts
// ============================================================================

#[test]
fn test_parse_control_chart_full_payload() {
    let config = make_config(
        ChartKind::ControlChart,
        json!({
            "points": [
                {"x": 1, "y": 10.1, "is_anomaly": false, "rule_violated": []},
                {"x": 2, "y": 13.9, "is_anomaly": true, "rule_violated": [1, 5]},
            ],
            "ucl": 13.0,
            "cl": 10.0,
            "lcl": 7.0,
            "chart_type": "IX-MR",
        }),
    );

    let ChartData::Control(control) = parse_chart_data(&config).unwrap() else {
        panic!("expected control chart data");
    };

    assert_eq!(control.ucl, 13.0);
    assert_eq!(control.cl, 10.0);
    assert_eq!(control.lcl, 7.0);
    assert_eq!(control.chart_type, "IX-MR");
    assert_eq!(control.points.len(), 2);
    assert!(control.points[1].is_anomaly);
    assert_eq!(control.points[1].rule_violated, vec![1, 5]);
}

#[test]
fn test_parse_control_chart_point_defaults() {
    let config = make_config(
        ChartKind::ControlChart,
        json!({
            "points": [{"x": 1, "y": 2.5}],
            "ucl": 4.0,
            "cl": 2.0,
            "lcl": 0.0,
        }),
    );

    let ChartData::Control(control) = parse_chart_data(&config).unwrap() else {
        panic!("expected control chart data");
    };

    assert!(!control.points[0].is_anomaly);
    assert!(control.points[0].rule_violated.is_empty());
    assert_eq!(control.chart_type, "");
}

#[test]
fn test_parse_control_chart_rejects_missing_limits() {
    let config = make_config(
        ChartKind::ControlChart,
        json!({"points": [{"x": 1, "y": 2.0}], "cl": 2.0}),
    );

    let err = parse_chart_data(&config).unwrap_err();

    assert!(err.contains("控制图"), "unexpected message: {err}");
}
