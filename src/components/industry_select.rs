//! Industry classification dropdown shown alongside the upload zone.

use leptos::prelude::*;

use crate::util::industries::{industry_from_value, industry_option, industry_value, ALL_INDUSTRIES};

/// Labeled select over the industry catalog. Emits `None` when the
/// placeholder row is chosen.
#[component]
pub fn IndustrySelect(
    value: RwSignal<Option<crate::net::types::Industry>>,
    #[prop(optional)] on_change: Option<Callback<Option<crate::net::types::Industry>>>,
) -> impl IntoView {
    let handle_change = move |ev: leptos::ev::Event| {
        let raw = event_target_value(&ev);
        let next = industry_from_value(&raw);
        value.set(next);
        if let Some(cb) = on_change {
            cb.run(next);
        }
    };

    view! {
        <div class="industry-select">
            <label class="industry-select__label">"行业分类"</label>
            <select class="industry-select__input" on:change=handle_change>
                <option value="" selected=move || value.get().is_none()>
                    "不选择"
                </option>
                {ALL_INDUSTRIES
                    .iter()
                    .map(|industry| {
                        let (label, icon, _) = industry_option(*industry);
                        let val = industry_value(*industry);
                        view! {
                            <option
                                value=val
                                selected=move || value.get() == Some(*industry)
                            >
                                {format!("{icon} {label}")}
                            </option>
                        }
                    })
                    .collect::<Vec<_>>()}
            </select>
        </div>
    }
}
