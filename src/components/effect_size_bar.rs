//! Effect-size magnitude bar with small/medium/large threshold markers.

#[cfg(test)]
#[path = "effect_size_bar_test.rs"]
mod effect_size_bar_test;

use leptos::prelude::*;

use crate::net::types::{EffectLevel, EffectSize, EffectSizeKind};
use crate::util::format::effect_level_label;

/// Banding thresholds and display scale for one effect-size statistic.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectThresholds {
    pub small: f64,
    pub medium: f64,
    pub large: f64,
    /// Value at which the bar reads 100%.
    pub max: f64,
}

/// Conventional banding thresholds per statistic.
pub fn effect_thresholds(kind: EffectSizeKind) -> EffectThresholds {
    match kind {
        EffectSizeKind::CohensD => EffectThresholds { small: 0.2, medium: 0.5, large: 0.8, max: 1.5 },
        EffectSizeKind::RSquared | EffectSizeKind::EtaSquared => {
            EffectThresholds { small: 0.01, medium: 0.06, large: 0.14, max: 0.5 }
        }
        EffectSizeKind::CramersV => EffectThresholds { small: 0.1, medium: 0.3, large: 0.5, max: 1.0 },
    }
}

/// Bar fill percentage: |value| against the statistic's display scale,
/// clamped at 100.
pub fn effect_percentage(kind: EffectSizeKind, value: f64) -> f64 {
    let max = effect_thresholds(kind).max;
    ((value.abs() / max) * 100.0).min(100.0)
}

/// Accent color for an effect-size band.
pub fn effect_level_color(level: EffectLevel) -> &'static str {
    match level {
        EffectLevel::Small => "#80cbc4",
        EffectLevel::Medium => "#ffab00",
        EffectLevel::Large => "#00e676",
    }
}

/// Display name of the statistic, e.g. `COHENS D`.
pub fn effect_kind_name(kind: EffectSizeKind) -> &'static str {
    match kind {
        EffectSizeKind::CohensD => "COHENS D",
        EffectSizeKind::RSquared => "R SQUARED",
        EffectSizeKind::EtaSquared => "ETA SQUARED",
        EffectSizeKind::CramersV => "CRAMERS V",
    }
}

/// Horizontal magnitude bar for one effect size, with the qualitative band
/// as a colored tag and the conventional thresholds marked underneath.
#[component]
pub fn EffectSizeBar(effect_size: EffectSize) -> impl IntoView {
    let thresholds = effect_thresholds(effect_size.kind);
    let percentage = effect_percentage(effect_size.kind, effect_size.value);
    let color = effect_level_color(effect_size.level);
    let magnitude = format!("{:.3}", effect_size.value.abs());

    let markers = [thresholds.small, thresholds.medium, thresholds.large]
        .into_iter()
        .map(|threshold| {
            let position = (threshold / thresholds.max) * 100.0;
            view! {
                <div class="effect-bar__marker" style:left=format!("{position}%")>
                    <div class="effect-bar__tick"></div>
                    <span class="effect-bar__tick-label">{format!("{threshold}")}</span>
                </div>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <div class="effect-bar">
            <div class="effect-bar__header">
                <span class="effect-bar__name">
                    {format!("{}: {magnitude}", effect_kind_name(effect_size.kind))}
                </span>
                <span class="effect-bar__level" style:color=color>
                    {effect_level_label(effect_size.level)}
                </span>
            </div>
            <div class="effect-bar__track">
                <div
                    class="effect-bar__fill"
                    style:width=format!("{percentage}%")
                    style:background-color=color
                ></div>
            </div>
            <div class="effect-bar__markers">{markers}</div>
        </div>
    }
}
