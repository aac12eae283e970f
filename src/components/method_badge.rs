//! Chip showing which statistical method an analysis used.

use leptos::prelude::*;

/// Outlined method-name chip for analysis cards and step displays.
#[component]
pub fn MethodBadge(method_name: String) -> impl IntoView {
    view! { <span class="method-badge">{method_name}</span> }
}
