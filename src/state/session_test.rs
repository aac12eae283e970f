use super::*;

use std::collections::BTreeMap;

fn make_summary(id: &str) -> SessionSummary {
    SessionSummary {
        session_id: id.to_owned(),
        created_at: "2026-03-01T09:00:00".to_owned(),
        updated_at: "2026-03-01T09:30:00".to_owned(),
        file_name: "sales.csv".to_owned(),
        industry: None,
        first_query: "渠道对销售额有影响吗".to_owned(),
        methods_used: vec!["anova".to_owned()],
        message_count: 4,
    }
}

fn make_data_summary() -> DataSummary {
    DataSummary {
        rows: 120,
        columns: 2,
        column_names: vec!["渠道".to_owned(), "销售额".to_owned()],
        column_types: BTreeMap::from([
            ("渠道".to_owned(), "categorical".to_owned()),
            ("销售额".to_owned(), "numeric".to_owned()),
        ]),
        column_stats: None,
    }
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn session_state_defaults_to_first_page() {
    let state = SessionState::default();
    assert!(state.sessions.is_empty());
    assert_eq!(state.total, 0);
    assert_eq!(state.current_page, 1);
    assert!(!state.loading);
    assert!(state.error.is_none());
    assert!(state.current_file.is_none());
    assert!(state.data_summary.is_none());
    assert!(state.industry.is_none());
}

// =============================================================
// Listing pages
// =============================================================

#[test]
fn apply_page_replaces_listing() {
    let mut state = SessionState::default();
    state.apply_page(
        SessionsResponse {
            total: 23,
            page: 3,
            items: vec![make_summary("a"), make_summary("b")],
        },
        3,
    );

    assert_eq!(state.sessions.len(), 2);
    assert_eq!(state.total, 23);
    assert_eq!(state.current_page, 3);
}

#[test]
fn apply_page_overwrites_previous_page() {
    let mut state = SessionState::default();
    state.apply_page(
        SessionsResponse {
            total: 2,
            page: 1,
            items: vec![make_summary("a")],
        },
        1,
    );
    state.apply_page(
        SessionsResponse {
            total: 2,
            page: 2,
            items: vec![make_summary("b")],
        },
        2,
    );

    assert_eq!(state.sessions.len(), 1);
    assert_eq!(state.sessions[0].session_id, "b");
    assert_eq!(state.current_page, 2);
}

// =============================================================
// Data context
// =============================================================

#[test]
fn set_current_file_attaches_summary() {
    let mut state = SessionState::default();
    state.set_current_file("sales.csv".to_owned(), make_data_summary());

    assert_eq!(state.current_file.as_deref(), Some("sales.csv"));
    assert_eq!(state.data_summary.as_ref().unwrap().rows, 120);
}

#[test]
fn clear_current_drops_file_summary_and_industry() {
    let mut state = SessionState::default();
    state.set_current_file("sales.csv".to_owned(), make_data_summary());
    state.industry = Some(Industry::Ecommerce);

    state.clear_current();

    assert!(state.current_file.is_none());
    assert!(state.data_summary.is_none());
    assert!(state.industry.is_none());
}

#[test]
fn clear_current_keeps_history_listing() {
    let mut state = SessionState::default();
    state.apply_page(
        SessionsResponse {
            total: 1,
            page: 1,
            items: vec![make_summary("a")],
        },
        1,
    );
    state.set_current_file("sales.csv".to_owned(), make_data_summary());

    state.clear_current();

    assert_eq!(state.sessions.len(), 1);
    assert_eq!(state.total, 1);
}
