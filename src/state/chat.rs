//! Conversation state for the active analysis session.
//!
//! DESIGN
//! ======
//! One conversation at a time. Async sends capture [`ChatState::generation`]
//! before awaiting; [`ChatState::clear`] bumps it, so a response that lands
//! after the user reset or switched sessions is dropped instead of being
//! appended to the new conversation.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use crate::net::types::{ChatMessage, MultiAnalysisResult, SessionDetail};

/// Chat panel state: transcript, in-flight flags, and per-factor results
/// accumulated by the multi-X flow.
#[derive(Clone, Debug, Default)]
pub struct ChatState {
    /// Backend session this conversation belongs to; adopted from the first
    /// reply and stable afterwards.
    pub session_id: Option<String>,
    /// Full transcript in arrival order.
    pub messages: Vec<ChatMessage>,
    /// True while a send is in flight.
    pub loading: bool,
    /// Last send failure, if any.
    pub error: Option<String>,
    /// Per-X results collected during a multi-factor run.
    pub multi_results: Vec<MultiAnalysisResult>,
    /// Auto-generated overall conclusion markdown.
    pub conclusion: Option<String>,
    /// True while the conclusion request is in flight.
    pub conclusion_loading: bool,
    /// Token invalidating in-flight async work; bumped on every clear.
    pub generation: u64,
}

impl ChatState {
    /// Append a message to the transcript.
    pub fn push_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Adopt a backend-issued session ID, but only when the conversation has
    /// none yet. An established conversation never switches sessions because
    /// a reply said so.
    pub fn adopt_session(&mut self, session_id: &str) {
        if self.session_id.is_none() && !session_id.is_empty() {
            self.session_id = Some(session_id.to_owned());
        }
    }

    /// Reset the conversation and invalidate any in-flight requests.
    ///
    /// Both loading flags come down here: the invalidated completions drop
    /// their writes, so nothing else would ever clear them.
    pub fn clear(&mut self) {
        self.session_id = None;
        self.messages.clear();
        self.loading = false;
        self.error = None;
        self.multi_results.clear();
        self.conclusion = None;
        self.conclusion_loading = false;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Replace the conversation with a stored session's transcript.
    ///
    /// Bumps the generation first so any response still in flight for the
    /// previous conversation is dropped.
    pub fn restore_session(&mut self, detail: &SessionDetail) {
        self.clear();
        self.session_id = Some(detail.session_id.clone());
        self.messages = detail.messages.clone();
        self.conclusion = detail.report_conclusion.clone();
    }

    /// Record one X-factor result from the multi-variable flow.
    pub fn push_multi_result(&mut self, result: MultiAnalysisResult) {
        self.multi_results.push(result);
    }

    pub fn clear_multi_results(&mut self) {
        self.multi_results.clear();
    }

    /// Whether an async task started at `token` may still write its result.
    #[must_use]
    pub fn is_current(&self, token: u64) -> bool {
        self.generation == token
    }

    /// Latest assistant message carrying an analysis, for the result panel.
    #[must_use]
    pub fn latest_analysis_message(&self) -> Option<&ChatMessage> {
        self.messages
            .iter()
            .rev()
            .find(|message| message.analysis.is_some())
    }
}
