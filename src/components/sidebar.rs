//! Workbench sidebar: upload, data preview, module launcher, recent
//! sessions.
//!
//! The sidebar owns no analysis logic. Picking a module or pressing the
//! launcher reports the wanted picker mode upward; the home page runs the
//! actual flows. Continuing a recent session replaces the conversation in
//! place.

use leptos::prelude::*;

use crate::components::data_preview::DataPreview;
use crate::components::file_upload::FileUpload;
use crate::components::module_selector::ModuleSelector;
use crate::components::variable_picker::PickerMode;
use crate::net::types::{SessionsQuery, SessionSummary};
use crate::state::app::{AppState, ModuleType};
use crate::state::chat::ChatState;
use crate::state::session::SessionState;
use crate::util::format::format_timestamp;

/// How many recent sessions the sidebar lists.
const RECENT_SESSIONS: u32 = 5;

/// Picker mode matching an analysis module.
pub fn picker_mode_for(module: ModuleType) -> PickerMode {
    match module {
        ModuleType::Hypothesis => PickerMode::Hypothesis,
        ModuleType::Spc => PickerMode::Spc,
        ModuleType::Capability => PickerMode::Capability,
    }
}

#[component]
pub fn Sidebar(on_open_picker: Callback<PickerMode>) -> impl IntoView {
    let app = expect_context::<RwSignal<AppState>>();
    let chat = expect_context::<RwSignal<ChatState>>();
    let session = expect_context::<RwSignal<SessionState>>();

    let recent = LocalResource::new(|| async {
        let query = SessionsQuery {
            page: Some(1),
            size: Some(RECENT_SESSIONS),
            ..SessionsQuery::default()
        };
        crate::net::api::fetch_sessions(&query).await
    });

    let has_data = move || session.with(|s| s.data_summary.is_some());

    let open_picker = move |mode: PickerMode| {
        if has_data() {
            on_open_picker.run(mode);
        }
    };

    let on_launch = move |_| open_picker(picker_mode_for(app.get_untracked().active_module));

    let on_continue = move |summary: SessionSummary| {
        continue_session(&summary.session_id, chat, session);
    };

    view! {
        <div class="sidebar">
            <section class="sidebar__section">
                <h3 class="sidebar__heading">"📂 数据上传"</h3>
                <FileUpload/>
                {move || {
                    session
                        .with(|s| s.current_file.clone().zip(s.data_summary.clone()))
                        .map(|(file_name, summary)| {
                            view! { <DataPreview file_name=file_name summary=summary/> }
                        })
                }}
            </section>

            <section class="sidebar__section">
                <h3 class="sidebar__heading">"🧭 分析模块"</h3>
                <ModuleSelector
                    on_hypothesis=Callback::new(move |()| open_picker(PickerMode::Hypothesis))
                    on_spc=Callback::new(move |()| open_picker(PickerMode::Spc))
                    on_capability=Callback::new(move |()| open_picker(PickerMode::Capability))
                />
                <button
                    class="btn btn--primary sidebar__launch"
                    disabled=move || !has_data()
                    on:click=on_launch
                >
                    "🚀 选择变量并分析"
                </button>
                <Show when=move || !has_data()>
                    <div class="sidebar__hint">"请先上传数据文件"</div>
                </Show>
            </section>

            <section class="sidebar__section">
                <h3 class="sidebar__heading">"🕘 最近会话"</h3>
                <Suspense fallback=move || {
                    view! { <div class="sidebar__hint">"加载中..."</div> }
                }>
                    {move || {
                        recent
                            .get()
                            .map(|result| match result {
                                Ok(page) if page.items.is_empty() => {
                                    view! { <div class="sidebar__hint">"暂无历史会话"</div> }
                                        .into_any()
                                }
                                Ok(page) => {
                                    page.items
                                        .into_iter()
                                        .map(|summary| {
                                            let label = summary.file_name.clone();
                                            let when = format_timestamp(&summary.created_at);
                                            view! {
                                                <button
                                                    class="sidebar__recent"
                                                    on:click=move |_| on_continue(summary.clone())
                                                >
                                                    <span class="sidebar__recent-file">{label}</span>
                                                    <span class="sidebar__recent-time">{when}</span>
                                                </button>
                                            }
                                        })
                                        .collect::<Vec<_>>()
                                        .into_any()
                                }
                                Err(_) => {
                                    view! {
                                        <div class="sidebar__hint">"历史会话加载失败"</div>
                                    }
                                        .into_any()
                                }
                            })
                    }}
                </Suspense>
            </section>
        </div>
    }
}

/// Fetches a stored session and swaps it in as the active conversation.
fn continue_session(
    session_id: &str,
    chat: RwSignal<ChatState>,
    session: RwSignal<SessionState>,
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
                }
                Err(message) => {
                    leptos::logging::warn!("恢复会话失败: {message}");
                }
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = (session_id, chat, session);
}
