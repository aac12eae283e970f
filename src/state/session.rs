//! Session history and the active data-file context.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::types::{DataSummary, Industry, SessionSummary, SessionsResponse};

/// History listing plus the data context the next analysis runs against.
#[derive(Clone, Debug)]
pub struct SessionState {
    /// Current page of history entries.
    pub sessions: Vec<SessionSummary>,
    /// Total entries matching the active filter.
    pub total: u64,
    /// One-based page number the listing shows.
    pub current_page: u64,
    /// True while a listing fetch is in flight.
    pub loading: bool,
    /// Last listing failure, if any.
    pub error: Option<String>,
    /// Name of the uploaded data file backing the conversation.
    pub current_file: Option<String>,
    /// Column profile of the uploaded file.
    pub data_summary: Option<DataSummary>,
    /// Industry context chosen for interpretation.
    pub industry: Option<Industry>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            sessions: Vec::new(),
            total: 0,
            current_page: 1,
            loading: false,
            error: None,
            current_file: None,
            data_summary: None,
            industry: None,
        }
    }
}

impl SessionState {
    /// Replace the listing with one fetched page.
    pub fn apply_page(&mut self, response: SessionsResponse, page: u64) {
        self.sessions = response.items;
        self.total = response.total;
        self.current_page = page;
    }

    /// Attach an uploaded file and its column profile.
    pub fn set_current_file(&mut self, file_name: String, summary: DataSummary) {
        self.current_file = Some(file_name);
        self.data_summary = Some(summary);
    }

    /// Drop the active data context, e.g. when switching sessions.
    pub fn clear_current(&mut self) {
        self.current_file = None;
        self.data_summary = None;
        self.industry = None;
    }
}
