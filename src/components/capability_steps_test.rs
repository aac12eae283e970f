use super::*;

#[test]
fn rating_bands_follow_the_cpk_thresholds() {
    assert_eq!(capability_rating(Some(2.0)).grade, "A");
    assert_eq!(capability_rating(Some(1.8)).grade, "B");
    assert_eq!(capability_rating(Some(1.5)).grade, "C");
    assert_eq!(capability_rating(Some(1.1)).grade, "D");
    assert_eq!(capability_rating(Some(0.9)).grade, "F");
}

#[test]
fn band_edges_grade_upward() {
    assert_eq!(capability_rating(Some(1.67)).grade, "B");
    assert_eq!(capability_rating(Some(1.33)).grade, "C");
    assert_eq!(capability_rating(Some(1.0)).grade, "D");
}

#[test]
fn missing_cpk_cannot_be_graded() {
    let rating = capability_rating(None);
    assert_eq!(rating.grade, "—");
    assert_eq!(rating.label, "无法评估");
}

#[test]
fn rating_labels_carry_the_improvement_hint() {
    assert_eq!(capability_rating(Some(1.2)).label, "勉强，需改进");
    assert_eq!(capability_rating(Some(0.5)).label, "不合格，必须改进");
}

#[test]
fn spec_limit_line_formats_both_bounds() {
    assert_eq!(spec_limits_line(Some(10.5), Some(9.5)), "USL = 10.50, LSL = 9.50");
    assert_eq!(spec_limits_line(Some(10.5), None), "USL = 10.50, LSL = —");
    assert_eq!(spec_limits_line(None, None), "USL = —, LSL = —");
}
