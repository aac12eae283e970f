//! Drag-and-drop upload zone that seeds a new analysis session.
//!
//! DESIGN
//! ======
//! Format and size checks run locally before any bytes leave the browser,
//! so an oversized or mistyped file fails instantly with no network round
//! trip. A successful upload adopts the backend session, records the data
//! context, and posts a synthetic assistant message summarizing the file.

#[cfg(test)]
#[path = "file_upload_test.rs"]
mod file_upload_test;

use leptos::prelude::*;

use crate::components::industry_select::IndustrySelect;
use crate::net::types::Industry;
use crate::state::chat::ChatState;
use crate::state::session::SessionState;

#[cfg(feature = "hydrate")]
use crate::net::types::{ChatMessage, Role};
#[cfg(feature = "hydrate")]
use crate::util::format::now_iso;

const UPLOAD_TYPE_ERROR: &str = "请上传 CSV 或 Excel 文件";
const UPLOAD_SIZE_ERROR: &str = "文件大小不能超过 50MB";

const MAX_UPLOAD_BYTES: f64 = 50.0 * 1024.0 * 1024.0;

/// MIME types browsers report for csv/xls/xlsx. Extension is the fallback
/// because Windows frequently reports csv as excel or empty.
const SUPPORTED_MIME_TYPES: [&str; 3] = [
    "text/csv",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
];

/// Upload zone with drag-and-drop, click-to-browse, and the industry
/// selector. On success the chat store gets the new session ID and a
/// data-loaded assistant message.
#[component]
pub fn FileUpload() -> impl IntoView {
    let chat = expect_context::<RwSignal<ChatState>>();
    let session = expect_context::<RwSignal<SessionState>>();

    let dragging = RwSignal::new(false);
    let uploading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let industry = RwSignal::new(session.get_untracked().industry);
    let file_input_ref = NodeRef::<leptos::html::Input>::new();

    #[cfg(not(feature = "hydrate"))]
    let _ = chat;

    let on_industry = Callback::new(move |value: Option<Industry>| {
        session.update(|s| s.industry = value);
    });

    let on_drag_over = move |ev: leptos::ev::DragEvent| {
        ev.prevent_default();
        dragging.set(true);
    };

    let on_drag_leave = move |ev: leptos::ev::DragEvent| {
        ev.prevent_default();
        dragging.set(false);
    };

    let on_drop = move |ev: leptos::ev::DragEvent| {
        ev.prevent_default();
        dragging.set(false);

        #[cfg(feature = "hydrate")]
        {
            if let Some(file) = ev
                .data_transfer()
                .and_then(|transfer| transfer.files())
                .and_then(|files| files.get(0))
            {
                begin_upload(file, chat, session, uploading, error);
            }
        }
    };

    let on_zone_click = move |_| {
        #[cfg(feature = "hydrate")]
        {
            if let Some(input) = file_input_ref.get() {
                input.click();
            }
        }
    };

    let on_file_chosen = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            let input = event_target::<web_sys::HtmlInputElement>(&ev);
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                begin_upload(file, chat, session, uploading, error);
            }
            // Reset so picking the same file again still fires change.
            input.set_value("");
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = ev;
    };

    view! {
        <div class="file-upload">
            <div
                class="file-upload__zone"
                class:file-upload__zone--dragging=move || dragging.get()
                on:dragover=on_drag_over
                on:dragleave=on_drag_leave
                on:drop=on_drop
                on:click=on_zone_click
            >
                <div class="file-upload__icon">"☁"</div>
                <div class="file-upload__title">"拖拽上传 CSV/Excel 文件"</div>
                <div class="file-upload__hint">"或点击选择文件（最大 50MB）"</div>
                <Show when=move || uploading.get()>
                    <div class="file-upload__progress">
                        <div class="file-upload__bar"></div>
                        <span>"正在上传..."</span>
                    </div>
                </Show>
            </div>
            <input
                node_ref=file_input_ref
                class="file-upload__input"
                type="file"
                accept=".csv,.xlsx,.xls"
                on:change=on_file_chosen
            />
            <div class="file-upload__industry">
                <IndustrySelect value=industry on_change=on_industry />
                <span class="file-upload__caption">"选择行业分类，便于知识归类管理"</span>
            </div>
            <Show when=move || error.get().is_some()>
                <div class="file-upload__error">
                    <span>{move || error.get().unwrap_or_default()}</span>
                    <button class="file-upload__dismiss" on:click=move |_| error.set(None)>
                        "×"
                    </button>
                </div>
            </Show>
        </div>
    }
}

/// Validates a candidate file before upload. Type first, then size, matching
/// the order errors are surfaced in.
fn validate_upload(name: &str, mime: &str, size_bytes: f64) -> Result<(), &'static str> {
    if !SUPPORTED_MIME_TYPES.contains(&mime) && !has_supported_extension(name) {
        return Err(UPLOAD_TYPE_ERROR);
    }
    if size_bytes > MAX_UPLOAD_BYTES {
        return Err(UPLOAD_SIZE_ERROR);
    }
    Ok(())
}

fn has_supported_extension(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.ends_with(".csv") || lower.ends_with(".xlsx") || lower.ends_with(".xls")
}

/// Validates and ships one file, then seeds the conversation from the
/// response. The generation token captured before the await drops results
/// that land after the user reset the conversation.
#[cfg(feature = "hydrate")]
fn begin_upload(
    file: web_sys::File,
    chat: RwSignal<ChatState>,
    session: RwSignal<SessionState>,
    uploading: RwSignal<bool>,
    error: RwSignal<Option<String>>,
) {
    if let Err(message) = validate_upload(&file.name(), &file.type_(), file.size()) {
        error.set(Some(message.to_owned()));
        return;
    }

    uploading.set(true);
    error.set(None);
    let industry = session.get_untracked().industry;
    let token = chat.get_untracked().generation;

    leptos::task::spawn_local(async move {
        let result = crate::net::api::upload_file(&file, industry).await;
        uploading.set(false);
        if !chat.get_untracked().is_current(token) {
            return;
        }

        match result {
            Ok(response) => {
                let summary = &response.data_summary;
                let content = format!(
                    "数据已加载: **{}**\n\n- 样本量: {} 行\n- 变量数: {} 列\n- 列名: {}\n\n请描述您的分析需求，例如：\"广告费对销售额有影响吗？\"",
                    response.file_name,
                    summary.rows,
                    summary.columns,
                    summary.column_names.join(", "),
                );
                chat.update(|c| {
                    c.session_id = Some(response.session_id.clone());
                    c.push_message(ChatMessage {
                        id: uuid::Uuid::new_v4().to_string(),
                        role: Role::Assistant,
                        content,
                        timestamp: now_iso(),
                        analysis: None,
                    });
                });
                session.update(|s| {
                    s.set_current_file(response.file_name, response.data_summary);
                });
            }
            Err(message) => error.set(Some(message)),
        }
    });
}
