//! Compact summary card for the uploaded dataset.

use leptos::prelude::*;

use crate::net::types::DataSummary;

/// How many column chips are shown before collapsing into a `+N` chip.
const COLUMN_CHIP_LIMIT: usize = 8;

/// File name, shape chips, and the first few column names.
#[component]
pub fn DataPreview(file_name: String, summary: DataSummary) -> impl IntoView {
    let shown = summary
        .column_names
        .iter()
        .take(COLUMN_CHIP_LIMIT)
        .cloned()
        .collect::<Vec<_>>();
    let hidden = summary.column_names.len().saturating_sub(COLUMN_CHIP_LIMIT);
    let has_hidden = hidden > 0;

    view! {
        <div class="data-preview">
            <div class="data-preview__header">
                <span class="data-preview__file">{file_name}</span>
                <span class="data-preview__chip">{format!("{} 行", summary.rows)}</span>
                <span class="data-preview__chip">{format!("{} 列", summary.columns)}</span>
            </div>
            <div class="data-preview__columns">
                {shown
                    .into_iter()
                    .map(|col| view! { <span class="data-preview__chip">{col}</span> })
                    .collect::<Vec<_>>()}
                <Show when=move || has_hidden>
                    <span class="data-preview__chip data-preview__chip--more">
                        {format!("+{hidden} 更多")}
                    </span>
                </Show>
            </div>
        </div>
    }
}
