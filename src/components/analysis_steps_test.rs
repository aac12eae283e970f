use super::*;

#[test]
fn parametric_methods_require_normality() {
    let prerequisites = method_prerequisites("t_test", 120);
    assert_eq!(prerequisites[0], "样本量: 120 行");
    assert!(prerequisites.contains(&"前提假设: 数据近似正态分布".to_owned()));
    assert!(prerequisites.contains(&"检验方式: 参数检验".to_owned()));
}

#[test]
fn nonparametric_methods_skip_normality() {
    let prerequisites = method_prerequisites("mann_whitney", 45);
    assert!(prerequisites.contains(&"前提假设: 无分布假设要求".to_owned()));
    assert!(prerequisites.contains(&"检验方式: 非参数检验".to_owned()));
}

#[test]
fn variant_method_ids_match_their_family() {
    // Backends report ids like "t_test_independent"; substring matching
    // keeps those in the parametric family.
    let prerequisites = method_prerequisites("t_test_independent", 60);
    assert!(prerequisites.contains(&"检验方式: 参数检验".to_owned()));
}

#[test]
fn known_methods_have_decision_paths() {
    assert_eq!(
        decision_path("anova", "单因素方差分析"),
        "多组比较 → 连续变量 → 正态分布 → 单因素方差分析"
    );
    assert_eq!(
        decision_path("mann_whitney", "Mann-Whitney U 检验"),
        "两组独立样本 → 非正态分布 → Mann-Whitney U 检验"
    );
}

#[test]
fn unknown_method_falls_back_to_generic_path() {
    assert_eq!(
        decision_path("bayes_factor", "贝叶斯检验"),
        "根据数据特征选择 → 贝叶斯检验"
    );
}

#[test]
fn conclusion_states_significance_at_alpha() {
    assert_eq!(
        conclusion_line(Some(0.003), true),
        "p = 0.003，差异具有统计学显著性（α = 0.05）。"
    );
    assert_eq!(
        conclusion_line(Some(0.2), false),
        "p = 0.200，差异不具有统计学显著性（α = 0.05）。"
    );
}

#[test]
fn tiny_p_values_collapse_in_the_conclusion() {
    assert_eq!(
        conclusion_line(Some(0.0004), true),
        "p = < 0.001，差异具有统计学显著性（α = 0.05）。"
    );
}
