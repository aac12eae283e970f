use super::*;

// =============================================================
// Provider switching
// =============================================================

#[test]
fn switching_provider_pulls_catalog_defaults() {
    let mut model = ModelConfig::default();
    apply_provider(&mut model, ModelProvider::Openai);

    assert_eq!(model.provider, ModelProvider::Openai);
    assert_eq!(model.base_url.as_deref(), Some("https://api.openai.com"));
    assert_eq!(model.model, "gpt-4-turbo");
}

#[test]
fn switching_to_custom_keeps_entered_values() {
    let mut model = ModelConfig {
        base_url: Some("https://my-proxy.example".to_owned()),
        model: "my-model".to_owned(),
        ..ModelConfig::default()
    };
    apply_provider(&mut model, ModelProvider::Custom);

    assert_eq!(model.provider, ModelProvider::Custom);
    assert_eq!(model.base_url.as_deref(), Some("https://my-proxy.example"));
    assert_eq!(model.model, "my-model");
}

#[test]
fn switching_provider_keeps_api_key_and_sampling() {
    let mut model = ModelConfig {
        api_key: "sk-123".to_owned(),
        temperature: 0.3,
        ..ModelConfig::default()
    };
    apply_provider(&mut model, ModelProvider::Claude);

    assert_eq!(model.api_key, "sk-123");
    assert!((model.temperature - 0.3).abs() < f64::EPSILON);
    assert_eq!(model.model, "claude-3-opus");
}
