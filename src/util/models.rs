//! LLM provider and model catalog for the settings form.

#[cfg(test)]
#[path = "models_test.rs"]
mod models_test;

use crate::net::types::ModelProvider;

/// All selectable providers in display order.
pub const ALL_PROVIDERS: [ModelProvider; 5] = [
    ModelProvider::Claude,
    ModelProvider::Openai,
    ModelProvider::Zhipu,
    ModelProvider::Qwen,
    ModelProvider::Custom,
];

/// Display label for a provider.
pub fn provider_label(provider: ModelProvider) -> &'static str {
    match provider {
        ModelProvider::Claude => "Claude (Anthropic)",
        ModelProvider::Openai => "OpenAI",
        ModelProvider::Zhipu => "智谱AI",
        ModelProvider::Qwen => "通义千问",
        ModelProvider::Custom => "自定义",
    }
}

/// Default API base URL for a provider; empty for fully custom setups.
pub fn provider_base_url(provider: ModelProvider) -> &'static str {
    match provider {
        ModelProvider::Claude => "https://api.anthropic.com",
        ModelProvider::Openai => "https://api.openai.com",
        ModelProvider::Zhipu => "https://open.bigmodel.cn/api/paas/v4",
        ModelProvider::Qwen => "https://dashscope.aliyuncs.com/api",
        ModelProvider::Custom => "",
    }
}

/// Selectable models for a provider as `(value, label)` pairs.
///
/// Custom providers have no preset list; the form falls back to free entry.
pub fn provider_models(provider: ModelProvider) -> &'static [(&'static str, &'static str)] {
    match provider {
        ModelProvider::Claude => &[
            ("claude-3-opus", "Claude 3 Opus"),
            ("claude-3-sonnet", "Claude 3 Sonnet"),
            ("claude-3-haiku", "Claude 3 Haiku"),
        ],
        ModelProvider::Openai => &[
            ("gpt-4-turbo", "GPT-4 Turbo"),
            ("gpt-4", "GPT-4"),
            ("gpt-3.5-turbo", "GPT-3.5 Turbo"),
        ],
        ModelProvider::Zhipu => &[
            ("GLM-4.7", "GLM-4.7"),
            ("glm-4-plus", "GLM-4 Plus"),
            ("glm-4", "GLM-4"),
            ("glm-4-flash", "GLM-4 Flash"),
        ],
        ModelProvider::Qwen => &[
            ("qwen-max", "Qwen Max"),
            ("qwen-plus", "Qwen Plus"),
            ("qwen-turbo", "Qwen Turbo"),
        ],
        ModelProvider::Custom => &[],
    }
}

/// Default model for a provider: the first catalog entry, if any.
pub fn provider_default_model(provider: ModelProvider) -> Option<&'static str> {
    provider_models(provider).first().map(|(value, _)| *value)
}

/// Wire/form value for a provider, matching its serde representation.
pub fn provider_value(provider: ModelProvider) -> &'static str {
    match provider {
        ModelProvider::Claude => "claude",
        ModelProvider::Openai => "openai",
        ModelProvider::Zhipu => "zhipu",
        ModelProvider::Qwen => "qwen",
        ModelProvider::Custom => "custom",
    }
}

/// Provider for a form value; unknown values map to none.
pub fn provider_from_value(value: &str) -> Option<ModelProvider> {
    ALL_PROVIDERS
        .into_iter()
        .find(|provider| provider_value(*provider) == value)
}
