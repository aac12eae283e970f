//! Analysis-module switcher at the top of the sidebar.
//!
//! Two-column grid; the capability module spans both columns. Selecting a
//! module also fires its callback so the sidebar can open the matching
//! variable picker.

use leptos::prelude::*;

use crate::state::app::{AppState, ModuleType};

#[component]
pub fn ModuleSelector(
    #[prop(optional)] on_hypothesis: Option<Callback<()>>,
    #[prop(optional)] on_spc: Option<Callback<()>>,
    #[prop(optional)] on_capability: Option<Callback<()>>,
) -> impl IntoView {
    let app = expect_context::<RwSignal<AppState>>();

    let buttons = [
        (ModuleType::Hypothesis, "🧪", on_hypothesis),
        (ModuleType::Spc, "📈", on_spc),
        (ModuleType::Capability, "🎯", on_capability),
    ]
    .into_iter()
    .map(|(module, icon, callback)| {
        view! {
            <button
                class="module-selector__item"
                class:module-selector__item--active=move || app.with(|a| a.active_module == module)
                class:module-selector__item--wide=module == ModuleType::Capability
                on:click=move |_| {
                    app.update(|a| a.active_module = module);
                    if let Some(callback) = callback {
                        callback.run(());
                    }
                }
            >
                <span class="module-selector__icon">{icon}</span>
                <span class="module-selector__label">{module.label()}</span>
            </button>
        }
    })
    .collect::<Vec<_>>();

    view! { <div class="module-selector">{buttons}</div> }
}
