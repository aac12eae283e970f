//! Session history table with per-row view/export/continue actions.

#[cfg(test)]
#[path = "history_table_test.rs"]
mod history_table_test;

use leptos::prelude::*;

use crate::net::types::SessionSummary;
use crate::util::format::format_timestamp;
use crate::util::industries::{industry_icon, industry_label};

/// Table timestamp without the year, `MM-DD HH:MM`.
fn table_timestamp(iso: &str) -> String {
    let full = format_timestamp(iso);
    match full.split_once('-') {
        Some((year, rest)) if year.len() == 4 && year.chars().all(|c| c.is_ascii_digit()) => {
            rest.to_owned()
        }
        _ => full,
    }
}

/// One page of sessions as table rows.
#[component]
pub fn HistoryTable(
    sessions: Vec<SessionSummary>,
    on_view: Callback<SessionSummary>,
    on_export: Callback<SessionSummary>,
    on_continue: Callback<SessionSummary>,
    on_delete: Callback<SessionSummary>,
) -> impl IntoView {
    let rows = sessions
        .into_iter()
        .map(|session| {
            let industry = session.industry.map_or_else(
                || view! { <span>"-"</span> }.into_any(),
                |industry| {
                    view! {
                        <span class="history-table__industry-chip">
                            {format!("{} {}", industry_icon(industry), industry_label(industry))}
                        </span>
                    }
                    .into_any()
                },
            );
            let view_session = session.clone();
            let export_session = session.clone();
            let continue_session = session.clone();
            let delete_session = session.clone();
            view! {
                <tr class="history-table__row">
                    <td>{table_timestamp(&session.created_at)}</td>
                    <td>{industry}</td>
                    <td>{session.file_name.clone()}</td>
                    <td class="history-table__query">{session.first_query.clone()}</td>
                    <td class="history-table__actions">
                        <button
                            class="history-table__action"
                            title="查看详情"
                            on:click=move |_| on_view.run(view_session.clone())
                        >
                            "👁"
                        </button>
                        <button
                            class="history-table__action"
                            title="导出报告"
                            on:click=move |_| on_export.run(export_session.clone())
                        >
                            "📄"
                        </button>
                        <button
                            class="history-table__action history-table__action--primary"
                            title="继续分析"
                            on:click=move |_| on_continue.run(continue_session.clone())
                        >
                            "↗"
                        </button>
                        <button
                            class="history-table__action history-table__action--danger"
                            title="删除记录"
                            on:click=move |_| on_delete.run(delete_session.clone())
                        >
                            "🗑"
                        </button>
                    </td>
                </tr>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <table class="history-table">
            <thead>
                <tr>
                    <th>"时间"</th>
                    <th>"行业"</th>
                    <th>"数据文件"</th>
                    <th>"分析问题"</th>
                    <th class="history-table__actions-head">"操作"</th>
                </tr>
            </thead>
            <tbody>{rows}</tbody>
        </table>
    }
}
