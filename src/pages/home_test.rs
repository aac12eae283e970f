use super::*;

use crate::net::types::{EffectLevel, EffectSize, EffectSizeKind};

fn make_analysis(method: &str, significant: bool) -> AnalysisResult {
    AnalysisResult {
        method: method.to_owned(),
        method_name: "独立样本t检验".to_owned(),
        p_value: Some(0.02),
        effect_size: Some(EffectSize {
            kind: EffectSizeKind::CohensD,
            value: 0.6,
            level: EffectLevel::Medium,
        }),
        significant,
        interpretation: "两组差异显著".to_owned(),
        suggestions: vec!["查看分布".to_owned()],
        visualizations: Vec::new(),
    }
}

fn make_multi(x: &str, significant: bool) -> MultiAnalysisResult {
    MultiAnalysisResult {
        x_variable: x.to_owned(),
        y_variable: "销售额".to_owned(),
        analysis: make_analysis("t_test_independent", significant),
    }
}

// =============================================================
// Multi-X summary composition
// =============================================================

#[test]
fn multi_summary_lists_only_successful_factors() {
    // Failed factors never enter `multi_results`, so the summary only ever
    // counts what actually completed and carries no failure wording.
    let results = vec![make_multi("渠道", true), make_multi("地区", false)];
    let summary = multi_summary(&results);

    assert!(summary.contains("已完成 2 项影响因子分析"));
    assert!(summary.contains("渠道"));
    assert!(summary.contains("地区"));
    assert!(!summary.contains("失败"));
}

#[test]
fn multi_summary_reports_significance_per_factor() {
    let summary = multi_summary(&[make_multi("渠道", true), make_multi("地区", false)]);
    assert!(summary.contains("影响显著"));
    assert!(summary.contains("影响不显著"));
}

#[test]
fn multi_summary_empty_run_says_so() {
    let summary = multi_summary(&[]);
    assert!(summary.contains("未能得到结果"));
}

#[test]
fn failure_note_lists_factors_in_run_order() {
    let note = multi_failure_note(&[
        ("广告费".to_owned(), "服务器错误".to_owned()),
        ("地区".to_owned(), "网络错误，请检查连接".to_owned()),
    ])
    .unwrap();

    assert!(note.starts_with("以下变量分析失败"));
    let ad = note.find("广告费").unwrap();
    let region = note.find("地区").unwrap();
    assert!(ad < region);
}

#[test]
fn failure_note_absent_without_failures() {
    assert!(multi_failure_note(&[]).is_none());
}

// =============================================================
// Sequential factor loop
// =============================================================

#[test]
fn factor_loop_continues_past_a_failed_variable() {
    // The middle factor fails; the ones behind it still run, and its error
    // is kept in run order instead of aborting the whole analysis.
    let xs = ["广告费".to_owned(), "渠道".to_owned(), "地区".to_owned()];
    let mut recorded = Vec::new();

    let failures = futures::executor::block_on(run_factors(
        &xs,
        |x| async move {
            if x == "渠道" {
                FactorOutcome::Failed("服务器错误".to_owned())
            } else {
                FactorOutcome::Analysis(make_analysis("t_test_independent", true))
            }
        },
        |x, _analysis| recorded.push(x),
    ))
    .unwrap();

    assert_eq!(recorded, ["广告费", "地区"]);
    assert_eq!(failures, [("渠道".to_owned(), "服务器错误".to_owned())]);
}

#[test]
fn factor_loop_aborts_when_cancelled() {
    let xs = ["广告费".to_owned(), "渠道".to_owned(), "地区".to_owned()];
    let mut recorded = Vec::new();

    let result = futures::executor::block_on(run_factors(
        &xs,
        |x| async move {
            if x == "渠道" {
                FactorOutcome::Cancelled
            } else {
                FactorOutcome::Analysis(make_analysis("t_test_independent", true))
            }
        },
        |x, _analysis| recorded.push(x),
    ));

    assert!(result.is_none());
    assert_eq!(recorded, ["广告费"]);
}

#[test]
fn factor_loop_skips_replies_without_analysis() {
    let xs = ["广告费".to_owned()];
    let mut recorded = Vec::new();

    let failures = futures::executor::block_on(run_factors(
        &xs,
        |_x| async move { FactorOutcome::Reply },
        |x, _analysis| recorded.push(x),
    ))
    .unwrap();

    assert!(recorded.is_empty());
    assert!(failures.is_empty());
}

// =============================================================
// Conclusion request assembly
// =============================================================

#[test]
fn conclusion_uses_multi_results_when_present() {
    let mut state = ChatState::default();
    state.push_multi_result(make_multi("渠道", true));
    state.push_multi_result(make_multi("地区", false));

    let analyses = conclusion_analyses(&state);
    assert_eq!(analyses.len(), 2);
    assert_eq!(analyses[0].x_variable.as_deref(), Some("渠道"));
    assert_eq!(analyses[0].y_variable.as_deref(), Some("销售额"));
}

#[test]
fn conclusion_falls_back_to_latest_single_analysis() {
    let mut state = ChatState::default();
    state.push_message(assistant_message(
        "回复".to_owned(),
        Some(make_analysis("anova", true)),
    ));

    let analyses = conclusion_analyses(&state);
    assert_eq!(analyses.len(), 1);
    assert!(analyses[0].x_variable.is_none());
    assert_eq!(analyses[0].method, "anova");
}

#[test]
fn conclusion_empty_without_any_analysis() {
    let state = ChatState::default();
    assert!(conclusion_analyses(&state).is_empty());
}

#[test]
fn conclusion_forwards_null_p_value_untouched() {
    let mut state = ChatState::default();
    let mut analysis = make_analysis("spc_xbar_r", false);
    analysis.p_value = None;
    state.push_message(assistant_message("回复".to_owned(), Some(analysis)));

    let analyses = conclusion_analyses(&state);
    assert_eq!(analyses[0].p_value, None);
    let json = serde_json::to_value(&analyses[0]).unwrap();
    assert!(json.get("p_value").unwrap().is_null());
}

// =============================================================
// Task bodies and prompts
// =============================================================

#[test]
fn hypothesis_prompt_names_both_variables() {
    assert_eq!(hypothesis_prompt("广告费", "销售额"), "请分析 广告费 对 销售额 的影响");
}

#[test]
fn spc_task_body_is_structured_json() {
    let body: serde_json::Value = serde_json::from_str(&spc_task_body("缺陷数")).unwrap();
    assert_eq!(body["task"], "spc");
    assert_eq!(body["y_variable"], "缺陷数");
}

#[test]
fn capability_task_body_carries_spec_limits() {
    let body: serde_json::Value =
        serde_json::from_str(&capability_task_body("直径", 10.5, 9.5)).unwrap();
    assert_eq!(body["task"], "capability");
    assert_eq!(body["usl"], 10.5);
    assert_eq!(body["lsl"], 9.5);
}

// =============================================================
// Step family routing
// =============================================================

#[test]
fn step_family_routes_spc_methods() {
    assert_eq!(step_family("spc_xbar_r"), StepFamily::Spc);
    assert_eq!(step_family("control_chart"), StepFamily::Spc);
}

#[test]
fn step_family_routes_capability_methods() {
    assert_eq!(step_family("capability"), StepFamily::Capability);
    assert_eq!(step_family("process_capability"), StepFamily::Capability);
}

#[test]
fn step_family_defaults_to_hypothesis() {
    assert_eq!(step_family("t_test_independent"), StepFamily::Hypothesis);
    assert_eq!(step_family("linear_regression"), StepFamily::Hypothesis);
}
