//! Model and prompt configuration, persisted across page loads.
//!
//! DESIGN
//! ======
//! The settings page edits this state in place and mirrors it to the
//! backend; a local snapshot also lands in browser storage so the form is
//! populated before the first round-trip completes.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::net::types::{ModelConfig, PromptTemplates};
use crate::util::persistence;

/// Browser storage key for the persisted configuration snapshot.
pub const CONFIG_STORAGE_KEY: &str = "hypothesis-testing-config";

/// Settings state: the model configuration and pipeline prompts being
/// edited, plus request flags.
#[derive(Clone, Debug, Default)]
pub struct ConfigState {
    pub model: ModelConfig,
    pub prompts: PromptTemplates,
    /// True while a save, load, or connection test is in flight.
    pub loading: bool,
    /// Last settings failure, if any.
    pub error: Option<String>,
}

/// The subset of [`ConfigState`] written to browser storage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    #[serde(rename = "modelConfig")]
    pub model_config: ModelConfig,
    #[serde(rename = "promptTemplates")]
    pub prompt_templates: PromptTemplates,
}

impl ConfigState {
    /// Restore persisted settings, falling back to defaults when storage is
    /// empty or stale.
    pub fn restore() -> Self {
        match persistence::read_json::<ConfigSnapshot>(CONFIG_STORAGE_KEY) {
            Some(snapshot) => Self {
                model: snapshot.model_config,
                prompts: snapshot.prompt_templates,
                ..Self::default()
            },
            None => Self::default(),
        }
    }

    /// Write the persistable subset to browser storage.
    pub fn persist(&self) {
        persistence::write_json(CONFIG_STORAGE_KEY, &self.snapshot());
    }

    #[must_use]
    pub fn snapshot(&self) -> ConfigSnapshot {
        ConfigSnapshot {
            model_config: self.model.clone(),
            prompt_templates: self.prompts.clone(),
        }
    }

    /// Reset model settings and prompts to their defaults, keeping request
    /// flags untouched.
    pub fn reset_to_default(&mut self) {
        self.model = ModelConfig::default();
        self.prompts = PromptTemplates::default();
    }
}
