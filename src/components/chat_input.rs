//! Message composer with quick-suggestion chips.

use leptos::prelude::*;

/// Canned follow-up phrases offered above the textarea.
const QUICK_SUGGESTIONS: [&str; 4] = ["换个方法试试", "去掉异常值", "分组分析", "查看分布"];

/// Multiline input that sends on Enter (Shift+Enter inserts a newline).
/// Quick suggestion chips send their label directly.
#[component]
pub fn ChatInput(
    on_send: Callback<String>,
    #[prop(optional)] disabled: Signal<bool>,
    #[prop(default = "请描述您的分析需求...")] placeholder: &'static str,
) -> impl IntoView {
    let input = RwSignal::new(String::new());

    let send = move || {
        let text = input.get_untracked().trim().to_owned();
        if text.is_empty() || disabled.get_untracked() {
            return;
        }
        input.set(String::new());
        on_send.run(text);
    };

    let handle_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            send();
        }
    };

    view! {
        <div class="chat-input">
            <div class="chat-input__chips">
                {QUICK_SUGGESTIONS
                    .into_iter()
                    .map(|suggestion| {
                        view! {
                            <button
                                class="chat-input__chip"
                                disabled=move || disabled.get()
                                on:click=move |_| on_send.run(suggestion.to_owned())
                            >
                                {suggestion}
                            </button>
                        }
                    })
                    .collect::<Vec<_>>()}
            </div>
            <div class="chat-input__row">
                <textarea
                    class="chat-input__field"
                    rows=2
                    placeholder=placeholder
                    prop:value=move || input.get()
                    disabled=move || disabled.get()
                    on:input=move |ev| input.set(event_target_value(&ev))
                    on:keydown=handle_keydown
                ></textarea>
                <button
                    class="chat-input__send"
                    disabled=move || disabled.get() || input.get().trim().is_empty()
                    on:click=move |_| send()
                >
                    "➤"
                </button>
            </div>
        </div>
    }
}
