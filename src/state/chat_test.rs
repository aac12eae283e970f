use super::*;

use crate::net::types::{AnalysisResult, Role};

fn make_message(id: &str, role: Role) -> ChatMessage {
    ChatMessage {
        id: id.to_owned(),
        role,
        content: "内容".to_owned(),
        timestamp: "2026-03-01T10:00:00".to_owned(),
        analysis: None,
    }
}

fn make_analysis(method: &str) -> AnalysisResult {
    AnalysisResult {
        method: method.to_owned(),
        method_name: "独立样本t检验".to_owned(),
        p_value: Some(0.03),
        effect_size: None,
        significant: true,
        interpretation: "两组差异显著".to_owned(),
        suggestions: Vec::new(),
        visualizations: Vec::new(),
    }
}

fn make_multi_result(x: &str) -> MultiAnalysisResult {
    MultiAnalysisResult {
        x_variable: x.to_owned(),
        y_variable: "销售额".to_owned(),
        analysis: make_analysis("t_test_independent"),
    }
}

// =============================================================
// Defaults and transcript
// =============================================================

#[test]
fn chat_state_default_is_empty() {
    let state = ChatState::default();
    assert!(state.session_id.is_none());
    assert!(state.messages.is_empty());
    assert!(!state.loading);
    assert!(state.error.is_none());
    assert!(state.multi_results.is_empty());
    assert!(state.conclusion.is_none());
    assert_eq!(state.generation, 0);
}

#[test]
fn push_message_appends_in_order() {
    let mut state = ChatState::default();
    state.push_message(make_message("1", Role::User));
    state.push_message(make_message("2", Role::Assistant));

    assert_eq!(state.messages.len(), 2);
    assert_eq!(state.messages[0].id, "1");
    assert_eq!(state.messages[1].id, "2");
}

// =============================================================
// Session adoption
// =============================================================

#[test]
fn adopt_session_sets_id_when_none() {
    let mut state = ChatState::default();
    state.adopt_session("sess-1");
    assert_eq!(state.session_id.as_deref(), Some("sess-1"));
}

#[test]
fn adopt_session_never_replaces_existing_id() {
    let mut state = ChatState::default();
    state.adopt_session("sess-1");
    state.adopt_session("sess-2");
    assert_eq!(state.session_id.as_deref(), Some("sess-1"));
}

#[test]
fn adopt_session_ignores_empty_id() {
    let mut state = ChatState::default();
    state.adopt_session("");
    assert!(state.session_id.is_none());
}

// =============================================================
// Clear and generation token
// =============================================================

#[test]
fn clear_resets_conversation() {
    let mut state = ChatState::default();
    state.adopt_session("sess-1");
    state.push_message(make_message("1", Role::User));
    state.push_multi_result(make_multi_result("渠道"));
    state.error = Some("出错".to_owned());
    state.conclusion = Some("# 结论".to_owned());
    state.conclusion_loading = true;

    state.clear();

    assert!(state.session_id.is_none());
    assert!(state.messages.is_empty());
    assert!(state.error.is_none());
    assert!(state.multi_results.is_empty());
    assert!(state.conclusion.is_none());
    assert!(!state.conclusion_loading);
}

#[test]
fn clear_releases_in_flight_loading_flags() {
    // A reset during an in-flight send drops that send's completion via the
    // generation token, so clear() itself must bring the flags down or the
    // input stays disabled forever.
    let mut state = ChatState::default();
    state.loading = true;
    state.conclusion_loading = true;

    state.clear();

    assert!(!state.loading);
    assert!(!state.conclusion_loading);
}

#[test]
fn clear_invalidates_in_flight_token() {
    let mut state = ChatState::default();
    let token = state.generation;
    assert!(state.is_current(token));

    state.clear();

    assert!(!state.is_current(token));
    assert!(state.is_current(state.generation));
}

#[test]
fn each_clear_bumps_generation() {
    let mut state = ChatState::default();
    state.clear();
    state.clear();
    assert_eq!(state.generation, 2);
}

// =============================================================
// Session restore
// =============================================================

#[test]
fn restore_session_replaces_conversation_and_invalidates_token() {
    let mut state = ChatState::default();
    state.adopt_session("old");
    state.push_message(make_message("1", Role::User));
    let token = state.generation;

    let detail = crate::net::types::SessionDetail {
        session_id: "sess-9".to_owned(),
        created_at: "2026-03-01T10:00:00".to_owned(),
        updated_at: "2026-03-01T10:05:00".to_owned(),
        file_name: "sales.csv".to_owned(),
        industry: None,
        first_query: "广告费对销售额有影响吗".to_owned(),
        methods_used: vec!["linear_regression".to_owned()],
        message_count: 2,
        messages: vec![
            make_message("a", Role::User),
            make_message("b", Role::Assistant),
        ],
        data_summary: crate::net::types::DataSummary {
            rows: 100,
            columns: 3,
            column_names: vec!["广告费".to_owned()],
            column_types: std::collections::BTreeMap::new(),
            column_stats: None,
        },
        report_conclusion: Some("# 结论".to_owned()),
    };
    state.restore_session(&detail);

    assert_eq!(state.session_id.as_deref(), Some("sess-9"));
    assert_eq!(state.messages.len(), 2);
    assert_eq!(state.conclusion.as_deref(), Some("# 结论"));
    assert!(!state.is_current(token));
}

// =============================================================
// Multi-factor results
// =============================================================

#[test]
fn multi_results_accumulate_and_clear() {
    let mut state = ChatState::default();
    state.push_multi_result(make_multi_result("渠道"));
    state.push_multi_result(make_multi_result("地区"));
    assert_eq!(state.multi_results.len(), 2);
    assert_eq!(state.multi_results[0].x_variable, "渠道");

    state.clear_multi_results();
    assert!(state.multi_results.is_empty());
}

// =============================================================
// Latest analysis lookup
// =============================================================

#[test]
fn latest_analysis_message_finds_most_recent() {
    let mut state = ChatState::default();
    let mut first = make_message("1", Role::Assistant);
    first.analysis = Some(make_analysis("t_test_independent"));
    let mut second = make_message("2", Role::Assistant);
    second.analysis = Some(make_analysis("anova"));

    state.push_message(first);
    state.push_message(make_message("3", Role::User));
    state.push_message(second);

    let latest = state.latest_analysis_message().unwrap();
    assert_eq!(latest.id, "2");
}

#[test]
fn latest_analysis_message_none_without_analyses() {
    let mut state = ChatState::default();
    state.push_message(make_message("1", Role::User));
    assert!(state.latest_analysis_message().is_none());
}
