//! Small card for one headline statistic (p-value, significance, effect).

use leptos::prelude::*;

use crate::net::types::EffectLevel;
use crate::util::format::effect_level_label;

/// What a [`StatCard`] displays, driving its accent color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatKind {
    PValue,
    Effect,
    Significance,
}

fn accent_color(kind: StatKind, significant: bool, level: Option<EffectLevel>) -> &'static str {
    match kind {
        StatKind::Effect => match level {
            Some(EffectLevel::Large) => "#00e676",
            Some(EffectLevel::Medium) => "#ffab00",
            _ => "#80cbc4",
        },
        StatKind::PValue | StatKind::Significance => {
            if significant { "#00e676" } else { "#80cbc4" }
        }
    }
}

/// One statistic with a title, a colored value, and an optional effect-level
/// caption.
#[component]
pub fn StatCard(
    title: &'static str,
    value: String,
    kind: StatKind,
    #[prop(optional)] significant: bool,
    #[prop(optional)] level: Option<EffectLevel>,
) -> impl IntoView {
    let color = accent_color(kind, significant, level);
    let caption = level.map(effect_level_label);
    let marker = (kind == StatKind::Significance).then(|| if significant { "✓" } else { "✗" });

    view! {
        <div class="stat-card">
            <span class="stat-card__title">{title}</span>
            <span class="stat-card__value" style:color=color>
                {value}
                {marker.map(|m| view! { <span class="stat-card__marker">{m}</span> })}
            </span>
            {caption.map(|text| view! { <span class="stat-card__caption">{text}</span> })}
        </div>
    }
}
