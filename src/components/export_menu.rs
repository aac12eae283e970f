//! Report export button with a format dropdown.
//!
//! Export renders server side and comes back as a download URL; the menu
//! only picks the format and triggers the anchor-click download.

use leptos::prelude::*;

use crate::net::types::ExportFormat;

/// `导出报告` button offering Markdown and Word output.
#[component]
pub fn ExportMenu(session_id: String, #[prop(optional)] disabled: Signal<bool>) -> impl IntoView {
    let open = RwSignal::new(false);
    let exporting = RwSignal::new(false);

    let md_session = session_id.clone();
    let docx_session = session_id;

    view! {
        <div class="export-menu">
            <button
                class="btn export-menu__button"
                disabled=move || disabled.get() || exporting.get()
                on:click=move |_| open.update(|o| *o = !*o)
            >
                <span class="export-menu__icon">
                    {move || if exporting.get() { "⏳" } else { "⬇" }}
                </span>
                " 导出报告"
            </button>
            <div
                class="export-menu__backdrop"
                style:display=move || if open.get() { "block" } else { "none" }
                on:click=move |_| open.set(false)
            ></div>
            <div
                class="export-menu__list"
                style:display=move || if open.get() { "block" } else { "none" }
            >
                <button
                    class="export-menu__item"
                    on:click=move |_| begin_export(&md_session, ExportFormat::Md, open, exporting)
                >
                    <span class="export-menu__icon">"📝"</span>
                    " Markdown (.md)"
                </button>
                <button
                    class="export-menu__item"
                    on:click=move |_| {
                        begin_export(&docx_session, ExportFormat::Docx, open, exporting)
                    }
                >
                    <span class="export-menu__icon">"📄"</span>
                    " Word (.docx)"
                </button>
            </div>
        </div>
    }
}

fn begin_export(
    session_id: &str,
    format: ExportFormat,
    open: RwSignal<bool>,
    exporting: RwSignal<bool>,
) {
    open.set(false);
    #[cfg(feature = "hydrate")]
    {
        use crate::net::api::export_report;
        use crate::net::types::ExportRequest;
        use crate::util::download::download_url;

        exporting.set(true);
        let request = ExportRequest {
            session_id: session_id.to_owned(),
            format,
            include_charts: true,
        };
        leptos::task::spawn_local(async move {
            match export_report(&request).await {
                Ok(resp) => download_url(&resp.download_url, &resp.file_name),
                Err(message) => {
                    if let Some(window) = web_sys::window() {
                        let _ = window.alert_with_message(&format!("导出失败: {message}"));
                    }
                }
            }
            exporting.set(false);
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (session_id, format, exporting);
    }
}
