use super::*;

fn point(y: f64, is_anomaly: bool, rules: &[u8]) -> ControlPoint {
    ControlPoint {
        x: 1.0,
        y,
        is_anomaly,
        rule_violated: rules.to_vec(),
    }
}

#[test]
fn sigma_is_one_third_of_the_upper_band() {
    let sigma = control_sigma(Some(10.6), Some(10.0)).unwrap();
    assert!((sigma - 0.2).abs() < 1e-9);
    assert_eq!(control_sigma(None, Some(10.0)), None);
    assert_eq!(control_sigma(Some(10.6), None), None);
}

#[test]
fn process_status_bands_on_anomaly_count() {
    assert_eq!(process_status(0).0, "受控");
    assert_eq!(process_status(1).0, "预警");
    assert_eq!(process_status(2).0, "预警");
    assert_eq!(process_status(3).0, "失控");
}

#[test]
fn status_line_counts_anomalies() {
    assert_eq!(status_line(0), "过程处于统计受控状态，无异常信号。");
    assert_eq!(status_line(4), "检测到 4 个异常点，过程存在特殊原因变异。");
}

#[test]
fn violated_rules_are_sorted_and_deduplicated() {
    let points = vec![
        point(10.2, true, &[5, 1]),
        point(9.8, false, &[8]),
        point(11.0, true, &[1, 2]),
    ];
    assert_eq!(violated_rules(&points), vec![1, 2, 5]);
}

#[test]
fn quiet_points_yield_no_rules() {
    let points = vec![point(10.0, false, &[]), point(10.1, false, &[])];
    assert!(violated_rules(&points).is_empty());
}

#[test]
fn western_electric_rules_have_descriptions() {
    assert_eq!(rule_description(1), "1点超出3σ控制限");
    assert_eq!(rule_description(8), "连续8点在1σ范围外");
    assert_eq!(rule_description(9), "自定义规则 9");
}

#[test]
fn chart_type_reasons_cover_the_standard_families() {
    assert_eq!(
        chart_type_reason("IX-MR"),
        "单值数据（子组大小=1），适用于个别值与移动极差控制图"
    );
    assert_eq!(chart_type_reason("EWMA"), "根据数据特征选择 EWMA 控制图");
}

#[test]
fn y_variable_comes_after_the_title_dash() {
    assert_eq!(y_variable_from_title("控制图（IX-MR）— 温度"), "温度");
    assert_eq!(y_variable_from_title("温度"), "温度");
    assert_eq!(y_variable_from_title(""), "—");
}
