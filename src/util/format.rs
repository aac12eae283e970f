//! Display formatting for statistics and timestamps.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use crate::net::types::EffectLevel;

/// Format a p-value the way stat cards show it.
///
/// Values below 0.001 collapse to `"< 0.001"`; absent values (SPC methods)
/// render as a dash.
pub fn format_p_value(p_value: Option<f64>) -> String {
    match p_value {
        None => "—".to_owned(),
        Some(v) if v < 0.001 => "< 0.001".to_owned(),
        Some(v) => format!("{v:.3}"),
    }
}

/// Fixed-decimal formatting for displayed statistics.
pub fn format_number(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

/// Shorten an ISO 8601 timestamp to `YYYY-MM-DD HH:MM` for tables.
///
/// Strings without a `T` separator are returned unchanged.
pub fn format_timestamp(iso: &str) -> String {
    let Some((date, time)) = iso.split_once('T') else {
        return iso.to_owned();
    };
    let minutes = time.get(0..5).unwrap_or(time);
    format!("{date} {minutes}")
}

/// Chinese display label for an effect-size band.
pub fn effect_level_label(level: EffectLevel) -> &'static str {
    match level {
        EffectLevel::Small => "小效应",
        EffectLevel::Medium => "中等效应",
        EffectLevel::Large => "大效应",
    }
}

/// Current time as an ISO 8601 string, for client-generated messages.
pub fn now_iso() -> String {
    #[cfg(feature = "hydrate")]
    {
        js_sys::Date::new_0().to_iso_string().as_string().unwrap_or_default()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        String::new()
    }
}
