//! Settings: model configuration and the pipeline prompt templates.
//!
//! DESIGN
//! ======
//! The form edits the config store in place; every mutation is mirrored to
//! browser storage immediately so a reload never loses unsaved edits. The
//! backend round trips are explicit: load on mount (silent on failure so
//! the persisted snapshot stays), save and test-connection on demand with
//! inline feedback.

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

use leptos::prelude::*;

use crate::components::layout::Layout;
use crate::net::types::{ModelConfig, ModelProvider, PromptTemplates};
use crate::state::config::ConfigState;
use crate::util::models::{
    ALL_PROVIDERS, provider_base_url, provider_default_model, provider_from_value, provider_label,
    provider_models, provider_value,
};

/// Inline outcome strip under the form actions.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Feedback {
    Success(String),
    Failure(String),
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    let config = expect_context::<RwSignal<ConfigState>>();

    let model_feedback = RwSignal::new(None::<Feedback>);
    let prompt_feedback = RwSignal::new(None::<Feedback>);
    let testing = RwSignal::new(false);

    // Server state wins over the persisted snapshot when reachable.
    Effect::new(move || load_from_server(config));

    let mutate = move |apply: &dyn Fn(&mut ConfigState)| {
        config.update(|c| {
            apply(c);
            c.persist();
        });
        model_feedback.set(None);
    };

    let on_provider = move |ev: leptos::ev::Event| {
        let Some(provider) = provider_from_value(&event_target_value(&ev)) else {
            return;
        };
        mutate(&move |c| apply_provider(&mut c.model, provider));
    };
    let on_api_key = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        mutate(&move |c| c.model.api_key = value.clone());
    };
    let on_base_url = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        mutate(&move |c| c.model.base_url = (!value.is_empty()).then(|| value.clone()));
    };
    let on_model = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        mutate(&move |c| c.model.model = value.clone());
    };
    let on_temperature = move |ev: leptos::ev::Event| {
        if let Ok(value) = event_target_value(&ev).parse::<f64>() {
            mutate(&move |c| c.model.temperature = value.clamp(0.0, 1.0));
        }
    };
    let on_max_tokens = move |ev: leptos::ev::Event| {
        if let Ok(value) = event_target_value(&ev).parse::<u32>() {
            mutate(&move |c| c.model.max_tokens = value.clamp(256, 8192));
        }
    };
    let on_top_p = move |ev: leptos::ev::Event| {
        if let Ok(value) = event_target_value(&ev).parse::<f64>() {
            mutate(&move |c| c.model.top_p = value.clamp(0.0, 1.0));
        }
    };

    let on_save_model = move |_| save_model(config, model_feedback);
    let on_test = move |_| test_connection(config, model_feedback, testing);

    let set_prompt = move |stage: PromptStage, value: String| {
        config.update(|c| {
            match stage {
                PromptStage::Intent => c.prompts.intent = value,
                PromptStage::Planning => c.prompts.planning = value,
                PromptStage::Interpret => c.prompts.interpret = value,
            }
            c.persist();
        });
        prompt_feedback.set(None);
    };
    let on_save_prompts = move |_| save_prompts(config, prompt_feedback);
    let on_reset_prompts = move |_| {
        config.update(|c| {
            c.prompts = PromptTemplates::default();
            c.persist();
        });
        prompt_feedback.set(Some(Feedback::Success("已恢复默认提示词".to_owned())));
    };

    let provider = move || config.with(|c| c.model.provider);
    let custom_model = move || {
        config.with(|c| {
            provider_models(c.model.provider)
                .iter()
                .all(|(value, _)| *value != c.model.model)
        })
    };

    view! {
        <Layout>
            <div class="settings">
                <section class="settings__card">
                    <h2 class="settings__heading">"🤖 模型配置"</h2>

                    <label class="settings__field">
                        <span class="settings__label">"服务提供商"</span>
                        <select class="settings__input" on:change=on_provider>
                            {ALL_PROVIDERS
                                .into_iter()
                                .map(|p| {
                                    view! {
                                        <option
                                            value=provider_value(p)
                                            selected=move || provider() == p
                                        >
                                            {provider_label(p)}
                                        </option>
                                    }
                                })
                                .collect::<Vec<_>>()}
                        </select>
                    </label>

                    <label class="settings__field">
                        <span class="settings__label">"API Key"</span>
                        <input
                            class="settings__input"
                            type="password"
                            placeholder="输入 API Key"
                            prop:value=move || config.with(|c| c.model.api_key.clone())
                            on:input=on_api_key
                        />
                    </label>

                    <label class="settings__field">
                        <span class="settings__label">"Base URL"</span>
                        <input
                            class="settings__input"
                            type="text"
                            prop:value=move || {
                                config.with(|c| c.model.base_url.clone().unwrap_or_default())
                            }
                            on:input=on_base_url
                        />
                    </label>

                    <label class="settings__field">
                        <span class="settings__label">"模型"</span>
                        {move || {
                            let models = provider_models(provider());
                            if models.is_empty() {
                                view! {
                                    <input
                                        class="settings__input"
                                        type="text"
                                        placeholder="模型标识"
                                        prop:value=move || config.with(|c| c.model.model.clone())
                                        on:input=on_model
                                    />
                                }
                                    .into_any()
                            } else {
                                view! {
                                    <select class="settings__input" on:change=on_model>
                                        {models
                                            .iter()
                                            .map(|(value, label)| {
                                                let value = *value;
                                                view! {
                                                    <option
                                                        value=value
                                                        selected=move || {
                                                            config.with(|c| c.model.model == value)
                                                        }
                                                    >
                                                        {*label}
                                                    </option>
                                                }
                                            })
                                            .collect::<Vec<_>>()}
                                        <option value="" selected=custom_model>
                                            "自定义..."
                                        </option>
                                    </select>
                                }
                                    .into_any()
                            }
                        }}
                    </label>

                    <label class="settings__field">
                        <span class="settings__label">
                            {move || {
                                format!("温度: {:.1}", config.with(|c| c.model.temperature))
                            }}
                        </span>
                        <input
                            class="settings__slider"
                            type="range"
                            min="0"
                            max="1"
                            step="0.1"
                            prop:value=move || config.with(|c| c.model.temperature.to_string())
                            on:input=on_temperature
                        />
                    </label>

                    <label class="settings__field">
                        <span class="settings__label">"最大 Token 数"</span>
                        <input
                            class="settings__input"
                            type="number"
                            min="256"
                            max="8192"
                            prop:value=move || config.with(|c| c.model.max_tokens.to_string())
                            on:input=on_max_tokens
                        />
                    </label>

                    <label class="settings__field">
                        <span class="settings__label">
                            {move || format!("Top P: {:.1}", config.with(|c| c.model.top_p))}
                        </span>
                        <input
                            class="settings__slider"
                            type="range"
                            min="0"
                            max="1"
                            step="0.1"
                            prop:value=move || config.with(|c| c.model.top_p.to_string())
                            on:input=on_top_p
                        />
                    </label>

                    <div class="settings__actions">
                        <button
                            class="btn"
                            disabled=move || testing.get()
                            on:click=on_test
                        >
                            {move || if testing.get() { "测试中..." } else { "测试连接" }}
                        </button>
                        <button
                            class="btn btn--primary"
                            disabled=move || config.with(|c| c.loading)
                            on:click=on_save_model
                        >
                            "保存配置"
                        </button>
                    </div>
                    {move || feedback_view(model_feedback.get())}
                </section>

                <section class="settings__card">
                    <h2 class="settings__heading">"📝 提示词模板"</h2>
                    <PromptEditor
                        title="意图识别"
                        value=Signal::derive(move || config.with(|c| c.prompts.intent.clone()))
                        on_change=Callback::new(move |v| set_prompt(PromptStage::Intent, v))
                    />
                    <PromptEditor
                        title="分析规划"
                        value=Signal::derive(move || config.with(|c| c.prompts.planning.clone()))
                        on_change=Callback::new(move |v| set_prompt(PromptStage::Planning, v))
                    />
                    <PromptEditor
                        title="结果解读"
                        value=Signal::derive(move || config.with(|c| c.prompts.interpret.clone()))
                        on_change=Callback::new(move |v| set_prompt(PromptStage::Interpret, v))
                    />
                    <div class="settings__actions">
                        <button class="btn" on:click=on_reset_prompts>
                            "恢复默认"
                        </button>
                        <button class="btn btn--primary" on:click=on_save_prompts>
                            "保存提示词"
                        </button>
                    </div>
                    {move || feedback_view(prompt_feedback.get())}
                </section>
            </div>
        </Layout>
    }
}

/// Which prompt textarea changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PromptStage {
    Intent,
    Planning,
    Interpret,
}

#[component]
fn PromptEditor(
    title: &'static str,
    value: Signal<String>,
    on_change: Callback<String>,
) -> impl IntoView {
    view! {
        <label class="settings__field">
            <span class="settings__label">{title}</span>
            <textarea
                class="settings__textarea"
                rows=4
                prop:value=move || value.get()
                on:input=move |ev| on_change.run(event_target_value(&ev))
            ></textarea>
        </label>
    }
}

fn feedback_view(feedback: Option<Feedback>) -> Option<AnyView> {
    feedback.map(|feedback| match feedback {
        Feedback::Success(text) => {
            view! { <div class="settings__feedback settings__feedback--ok">{text}</div> }.into_any()
        }
        Feedback::Failure(text) => {
            view! { <div class="settings__feedback settings__feedback--err">{text}</div> }
                .into_any()
        }
    })
}

// ============================================================================
// Pure helpers
// ============================================================================

/// Switches provider and pulls its catalog defaults in. A custom provider
/// keeps whatever base URL and model were entered.
fn apply_provider(model: &mut ModelConfig, provider: ModelProvider) {
    model.provider = provider;
    if provider == ModelProvider::Custom {
        return;
    }
    model.base_url = Some(provider_base_url(provider).to_owned());
    if let Some(default_model) = provider_default_model(provider) {
        model.model = default_model.to_owned();
    }
}

// ============================================================================
// Server sync
// ============================================================================

/// Pulls config and prompts from the backend. Failures are silent so the
/// locally persisted snapshot keeps driving the form.
fn load_from_server(config: RwSignal<ConfigState>) {
    #[cfg(feature = "hydrate")]
    {
        leptos::task::spawn_local(async move {
            if let Ok(model) = crate::net::api::fetch_model_config().await {
                config.update(|c| {
                    c.model = model;
                    c.persist();
                });
            }
            if let Ok(prompts) = crate::net::api::fetch_prompt_templates().await {
                config.update(|c| {
                    c.prompts = prompts;
                    c.persist();
                });
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = config;
}

fn save_model(config: RwSignal<ConfigState>, feedback: RwSignal<Option<Feedback>>) {
    #[cfg(feature = "hydrate")]
    {
        config.update(|c| c.loading = true);
        let model = config.get_untracked().model;
        leptos::task::spawn_local(async move {
            let result = crate::net::api::save_model_config(&model).await;
            config.update(|c| c.loading = false);
            match result {
                Ok(()) => feedback.set(Some(Feedback::Success("配置已保存".to_owned()))),
                Err(message) => {
                    config.update(|c| c.error = Some(message.clone()));
                    feedback.set(Some(Feedback::Failure(format!("保存失败: {message}"))));
                }
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = (config, feedback);
}

fn test_connection(
    config: RwSignal<ConfigState>,
    feedback: RwSignal<Option<Feedback>>,
    testing: RwSignal<bool>,
) {
    #[cfg(feature = "hydrate")]
    {
        use crate::net::types::TestConnectionRequest;

        let model = config.get_untracked().model;
        let request = TestConnectionRequest {
            provider: model.provider,
            api_key: model.api_key,
            base_url: model.base_url,
        };
        testing.set(true);
        leptos::task::spawn_local(async move {
            let outcome = match crate::net::api::test_connection(&request).await {
                Ok(response) if response.success => Feedback::Success(response.message),
                Ok(response) => Feedback::Failure(response.message),
                Err(message) => Feedback::Failure(message),
            };
            testing.set(false);
            feedback.set(Some(outcome));
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = (config, feedback, testing);
}

fn save_prompts(config: RwSignal<ConfigState>, feedback: RwSignal<Option<Feedback>>) {
    #[cfg(feature = "hydrate")]
    {
        let prompts = config.get_untracked().prompts;
        leptos::task::spawn_local(async move {
            match crate::net::api::save_prompt_templates(&prompts).await {
                Ok(()) => feedback.set(Some(Feedback::Success("提示词已保存".to_owned()))),
                Err(message) => {
                    feedback.set(Some(Feedback::Failure(format!("保存失败: {message}"))));
                }
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = (config, feedback);
}
