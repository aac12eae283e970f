//! AI-written report conclusion rendered below the analysis results.

use leptos::prelude::*;

use crate::util::markdown::render_markdown_html;

/// Report conclusion with a regenerate action. The regenerate button only
/// appears once a conclusion exists; before that the panel shows a loading
/// strip while the first conclusion is being written.
#[component]
pub fn ConclusionPanel(
    conclusion: Signal<Option<String>>,
    loading: Signal<bool>,
    on_generate: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="conclusion-panel">
            <div class="conclusion-panel__header">
                <span class="conclusion-panel__title">"📄 分析报告"</span>
                <Show when=move || conclusion.get().is_some()>
                    <button
                        class="btn btn--accent"
                        disabled=move || loading.get()
                        on:click=move |_| on_generate.run(())
                    >
                        {move || if loading.get() { "生成中..." } else { "重新生成" }}
                    </button>
                </Show>
            </div>
            <Show when=move || loading.get() && conclusion.get().is_none()>
                <div class="conclusion-panel__loading">
                    <span class="spinner"></span>
                    <span>"AI 正在分析数据并生成报告结论..."</span>
                </div>
            </Show>
            <Show when=move || conclusion.get().is_some()>
                <div
                    class="conclusion-panel__body markdown"
                    inner_html=move || {
                        conclusion.get().map(|text| render_markdown_html(&text)).unwrap_or_default()
                    }
                ></div>
            </Show>
        </div>
    }
}
