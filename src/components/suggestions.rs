//! Follow-up suggestion chips under an analysis result.

use leptos::prelude::*;

/// Suggestion chip row. When `on_select` is wired, clicking a chip sends the
/// suggestion back into the conversation.
#[component]
pub fn Suggestions(
    suggestions: Vec<String>,
    #[prop(optional_no_strip)] on_select: Option<Callback<String>>,
) -> impl IntoView {
    if suggestions.is_empty() {
        return None;
    }

    Some(view! {
        <div class="suggestions">
            <div class="suggestions__header">
                <span class="suggestions__icon">"💡"</span>
                <span class="suggestions__title">"建议"</span>
            </div>
            <div class="suggestions__chips">
                {suggestions
                    .into_iter()
                    .map(|suggestion| {
                        let label = suggestion.clone();
                        view! {
                            <button
                                class="suggestions__chip"
                                on:click=move |_| {
                                    if let Some(on_select) = on_select.as_ref() {
                                        on_select.run(suggestion.clone());
                                    }
                                }
                            >
                                {label}
                            </button>
                        }
                    })
                    .collect::<Vec<_>>()}
            </div>
        </div>
    })
}
