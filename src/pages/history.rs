//! Session history: filters, paged table, detail dialog, row actions.
//!
//! DESIGN
//! ======
//! The filter bar stores the time dropdown's range token (`today`,
//! `7days`, `30days`) in `start_date`; it is resolved to a concrete ISO
//! date here, right before querying, so the token survives round trips
//! through the form. Row export backfills the report conclusion through
//! the conclusion endpoint when the stored session has none.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::layout::Layout;
use crate::components::export_menu::ExportMenu;
use crate::components::history_table::HistoryTable;
use crate::components::message_list::MessageList;
use crate::components::search_filters::SearchFilters;
use crate::net::types::{SessionDetail, SessionSummary, SessionsQuery};
use crate::state::chat::ChatState;
use crate::state::session::SessionState;
use crate::util::format::format_timestamp;
use crate::util::industries::{industry_icon, industry_label};
use crate::util::markdown::render_markdown_html;

/// Sessions per history page.
const PAGE_SIZE: u32 = 10;

#[component]
pub fn HistoryPage() -> impl IntoView {
    let chat = expect_context::<RwSignal<ChatState>>();
    let session = expect_context::<RwSignal<SessionState>>();
    let navigate = use_navigate();

    let filters = RwSignal::new(SessionsQuery::default());
    let detail = RwSignal::new(None::<SessionDetail>);

    // First page on mount.
    Effect::new(move || {
        if session.with_untracked(|s| s.sessions.is_empty() && !s.loading) {
            fetch_page(1, filters, session);
        }
    });

    let on_search = Callback::new(move |()| fetch_page(1, filters, session));
    let on_view = Callback::new(move |summary: SessionSummary| {
        open_detail(&summary.session_id, detail);
    });
    let on_export = Callback::new(move |summary: SessionSummary| {
        export_with_backfill(&summary.session_id);
    });
    let on_continue = Callback::new({
        let navigate = navigate.clone();
        move |summary: SessionSummary| {
            continue_session(&summary.session_id, chat, session, navigate.clone());
        }
    });
    let on_delete = Callback::new(move |summary: SessionSummary| {
        delete_with_confirm(&summary, filters, session);
    });

    let total_pages = move || {
        session.with(|s| page_count(s.total, u64::from(PAGE_SIZE)))
    };
    let current_page = move || session.with(|s| s.current_page);

    view! {
        <Layout>
            <div class="history">
                <h2 class="history__title">"🕘 历史记录"</h2>
                <SearchFilters filters=filters on_search=on_search/>

                <Show when=move || session.with(|s| s.loading)>
                    <div class="history__loading">
                        <span class="spinner"></span>
                        <span>"加载中..."</span>
                    </div>
                </Show>
                <Show when=move || session.with(|s| s.error.is_some())>
                    <div class="history__error">
                        {move || session.with(|s| s.error.clone().unwrap_or_default())}
                    </div>
                </Show>

                {move || {
                    let sessions = session.with(|s| s.sessions.clone());
                    if sessions.is_empty() {
                        view! { <div class="history__empty">"暂无符合条件的会话"</div> }
                            .into_any()
                    } else {
                        view! {
                            <HistoryTable
                                sessions=sessions
                                on_view=on_view
                                on_export=on_export
                                on_continue=on_continue
                                on_delete=on_delete
                            />
                        }
                            .into_any()
                    }
                }}

                <div class="history__pager">
                    <button
                        class="btn"
                        disabled=move || current_page() <= 1
                        on:click=move |_| {
                            let page = current_page().saturating_sub(1).max(1);
                            fetch_page(page, filters, session);
                        }
                    >
                        "上一页"
                    </button>
                    <span class="history__pager-label">
                        {move || format!("第 {} / {} 页", current_page(), total_pages().max(1))}
                    </span>
                    <button
                        class="btn"
                        disabled=move || current_page() >= total_pages()
                        on:click=move |_| {
                            let page = current_page() + 1;
                            fetch_page(page, filters, session);
                        }
                    >
                        "下一页"
                    </button>
                </div>
            </div>

            {move || {
                detail
                    .get()
                    .map(|d| view! { <SessionDetailDialog detail=d on_close=Callback::new(move |()| detail.set(None))/> })
            }}
        </Layout>
    }
}

/// Read-only dialog over one stored session: metadata, transcript, and the
/// stored conclusion when present.
#[component]
fn SessionDetailDialog(detail: SessionDetail, on_close: Callback<()>) -> impl IntoView {
    let messages = Signal::stored(detail.messages.clone());
    let industry = detail.industry.map(|industry| {
        format!("{} {}", industry_icon(industry), industry_label(industry))
    });
    let conclusion_html = detail
        .report_conclusion
        .as_ref()
        .map(|text| render_markdown_html(text));

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div class="dialog dialog--detail" on:click=move |ev| ev.stop_propagation()>
                <div class="dialog__header">
                    <h2>"会话详情"</h2>
                    <button class="dialog__close" on:click=move |_| on_close.run(())>
                        "×"
                    </button>
                </div>

                <div class="detail__meta">
                    <span class="detail__chip">{detail.file_name.clone()}</span>
                    <span class="detail__chip">{format_timestamp(&detail.created_at)}</span>
                    {industry.map(|label| view! { <span class="detail__chip">{label}</span> })}
                    <span class="detail__chip">
                        {format!("{} 行 × {} 列", detail.data_summary.rows, detail.data_summary.columns)}
                    </span>
                </div>

                <div class="detail__transcript">
                    <MessageList messages=messages/>
                </div>

                {conclusion_html
                    .map(|html| {
                        view! {
                            <div class="detail__conclusion">
                                <h3>"报告结论"</h3>
                                <div class="markdown" inner_html=html></div>
                            </div>
                        }
                    })}

                <div class="dialog__actions">
                    <ExportMenu session_id=detail.session_id.clone()/>
                </div>
            </div>
        </div>
    }
}

// ============================================================================
// Pure helpers
// ============================================================================

/// Total pages for a listing, never below one page of math: `ceil(total/size)`.
fn page_count(total: u64, size: u64) -> u64 {
    if size == 0 {
        return 0;
    }
    total.div_ceil(size)
}

/// Resolves the filter bar's time token into a concrete ISO start date.
/// Strings that are not known tokens pass through unchanged (already ISO).
fn resolve_start_date(token: &str, now_ms: f64) -> Option<String> {
    const DAY_MS: f64 = 86_400_000.0;
    match token {
        "" => None,
        "today" => Some(iso_date(now_ms)),
        "7days" => Some(iso_date(now_ms - 7.0 * DAY_MS)),
        "30days" => Some(iso_date(now_ms - 30.0 * DAY_MS)),
        other => Some(other.to_owned()),
    }
}

/// Civil date (`YYYY-MM-DD`) for a Unix-epoch millisecond timestamp.
#[allow(clippy::cast_possible_truncation)]
fn iso_date(epoch_ms: f64) -> String {
    let days = (epoch_ms / 86_400_000.0).floor() as i64;
    let (year, month, day) = civil_from_days(days);
    format!("{year:04}-{month:02}-{day:02}")
}

/// Days-since-epoch to proleptic Gregorian calendar date.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146_096) / 365;
    let year = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = if month <= 2 { year + 1 } else { year };
    (year, month as u32, day as u32)
}

/// Query actually sent to the backend: the display filters with the time
/// token resolved and paging attached.
fn effective_query(filters: &SessionsQuery, page: u64, now_ms: f64) -> SessionsQuery {
    let mut query = filters.clone();
    query.start_date = filters
        .start_date
        .as_deref()
        .and_then(|token| resolve_start_date(token, now_ms));
    #[allow(clippy::cast_possible_truncation)]
    {
        query.page = Some(page as u32);
    }
    query.size = Some(PAGE_SIZE);
    query
}

// ============================================================================
// Async flows
// ============================================================================

fn now_epoch_ms() -> f64 {
    #[cfg(feature = "hydrate")]
    {
        js_sys::Date::now()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        0.0
    }
}

/// Fetches one listing page into the session store.
fn fetch_page(page: u64, filters: RwSignal<SessionsQuery>, session: RwSignal<SessionState>) {
    let query = effective_query(&filters.get_untracked(), page, now_epoch_ms());

    #[cfg(feature = "hydrate")]
    {
        session.update(|s| {
            s.loading = true;
            s.error = None;
        });
        leptos::task::spawn_local(async move {
            let result = crate::net::api::fetch_sessions(&query).await;
            session.update(|s| {
                s.loading = false;
                match result {
                    Ok(response) => s.apply_page(response, page),
                    Err(message) => s.error = Some(message),
                }
            });
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = (query, session);
}

/// Loads the full transcript for the detail dialog.
fn open_detail(session_id: &str, detail: RwSignal<Option<SessionDetail>>) {
    #[cfg(feature = "hydrate")]
    {
        let session_id = session_id.to_owned();
        leptos::task::spawn_local(async move {
            match crate::net::api::fetch_session_detail(&session_id).await {
                Ok(loaded) => detail.set(Some(loaded)),
                Err(message) => alert(&format!("加载会话失败: {message}")),
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = (session_id, detail);
}

/// Restores a stored session as the active conversation and returns home.
fn continue_session(
    session_id: &str,
    chat: RwSignal<ChatState>,
    session: RwSignal<SessionState>,
    navigate: impl Fn(&str, NavigateOptions) + 'static,
) {
    #[cfg(feature = "hydrate")]
    {
        let session_id = session_id.to_owned();
        leptos::task::spawn_local(async move {
            match crate::net::api::fetch_session_detail(&session_id).await {
                Ok(detail) => {
                    chat.update(|c| c.restore_session(&detail));
                    session.update(|s| {
                        s.set_current_file(detail.file_name.clone(), detail.data_summary.clone());
                        s.industry = detail.industry;
                    });
                    navigate("/", NavigateOptions::default());
                }
                Err(message) => alert(&format!("恢复会话失败: {message}")),
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = (session_id, chat, session, navigate);
}

/// Exports a stored session as Markdown, generating the report conclusion
/// first when the session has none. A failed backfill still exports; the
/// report just lacks the conclusion section.
fn export_with_backfill(session_id: &str) {
    #[cfg(feature = "hydrate")]
    {
        use crate::net::types::{
            ConclusionAnalysis, ConclusionRequest, ExportFormat, ExportRequest,
        };

        let session_id = session_id.to_owned();
        leptos::task::spawn_local(async move {
            let detail = match crate::net::api::fetch_session_detail(&session_id).await {
                Ok(detail) => detail,
                Err(message) => {
                    alert(&format!("导出失败: {message}"));
                    return;
                }
            };

            if detail.report_conclusion.is_none() {
                let analyses = detail
                    .messages
                    .iter()
                    .filter_map(|message| message.analysis.as_ref())
                    .map(|analysis| ConclusionAnalysis::from_analysis(analysis, None, None))
                    .collect::<Vec<_>>();
                if !analyses.is_empty() {
                    let request = ConclusionRequest {
                        session_id: Some(session_id.clone()),
                        analyses,
                        data_summary: Some(detail.data_summary.clone()),
                    };
                    if let Err(message) = crate::net::api::generate_conclusion(&request).await {
                        leptos::logging::warn!("结论生成失败，报告将不含结论: {message}");
                    }
                }
            }

            let request = ExportRequest {
                session_id,
                format: ExportFormat::Md,
                include_charts: true,
            };
            match crate::net::api::export_report(&request).await {
                Ok(response) => {
                    crate::util::download::download_url(&response.download_url, &response.file_name);
                }
                Err(message) => alert(&format!("导出失败: {message}")),
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = session_id;
}

/// Deletes a session after a browser confirm, then refreshes the current
/// page of the listing.
fn delete_with_confirm(
    summary: &SessionSummary,
    filters: RwSignal<SessionsQuery>,
    session: RwSignal<SessionState>,
) {
    #[cfg(feature = "hydrate")]
    {
        let confirmed = web_sys::window()
            .and_then(|window| {
                window
                    .confirm_with_message(&format!("确认删除会话「{}」？", summary.file_name))
                    .ok()
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }

        let session_id = summary.session_id.clone();
        leptos::task::spawn_local(async move {
            match crate::net::api::delete_session(&session_id).await {
                Ok(()) => {
                    let page = session.get_untracked().current_page;
                    fetch_page(page, filters, session);
                }
                Err(message) => alert(&format!("删除失败: {message}")),
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = (summary, filters, session);
}

#[cfg(feature = "hydrate")]
fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}
