//! Scrolling conversation transcript for the chat column.

#[cfg(test)]
#[path = "message_list_test.rs"]
mod message_list_test;

use leptos::prelude::*;

use crate::net::types::{ChatMessage, Role};

/// Conversation transcript. User messages render as plain bubbles;
/// assistant messages get lightweight bold highlighting and, when an
/// analysis payload rode along, a pointer to the results panel.
#[component]
pub fn MessageList(
    messages: Signal<Vec<ChatMessage>>,
    #[prop(optional)] loading: Signal<bool>,
) -> impl IntoView {
    let list_ref = NodeRef::<leptos::html::Div>::new();

    Effect::new(move || {
        let _ = messages.get().len();
        let _ = loading.get();

        #[cfg(feature = "hydrate")]
        {
            if let Some(el) = list_ref.get() {
                let scroll_height = el.scroll_height();
                el.set_scroll_top(scroll_height);
            }
        }
    });

    view! {
        <div class="message-list" node_ref=list_ref>
            {move || {
                let entries = messages.get();
                if entries.is_empty() && !loading.get() {
                    return view! {
                        <div class="message-list__empty">"上传数据后开始分析对话"</div>
                    }
                        .into_any();
                }

                entries
                    .iter()
                    .map(|msg| {
                        if msg.role == Role::User {
                            let content = msg.content.clone();
                            view! {
                                <div class="message message--user">
                                    <div class="message__bubble">{content}</div>
                                </div>
                            }
                                .into_any()
                        } else {
                            let html = assistant_html(&msg.content);
                            let has_analysis = msg.analysis.is_some();
                            view! {
                                <div class="message message--assistant">
                                    <div class="message__avatar">"🤖"</div>
                                    <div class="message__body">
                                        <div class="message__bubble" inner_html=html></div>
                                        <Show when=move || has_analysis>
                                            <span class="message__caption">
                                                "分析结果已显示在右侧面板"
                                            </span>
                                        </Show>
                                    </div>
                                </div>
                            }
                                .into_any()
                        }
                    })
                    .collect::<Vec<_>>()
                    .into_any()
            }}
            <Show when=move || loading.get()>
                <div class="message-list__loading">
                    <span class="spinner"></span>
                    <span>"正在分析..."</span>
                </div>
            </Show>
        </div>
    }
}

/// Renders assistant text: `**bold**` spans become green highlights and
/// newlines become `<br/>`. Unpaired `**` markers stay literal. Raw HTML
/// in the content is escaped before markup insertion.
fn assistant_html(content: &str) -> String {
    let escaped = content
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");

    let parts = escaped.split("**").collect::<Vec<_>>();
    let mut html = String::with_capacity(escaped.len() + 64);
    for (i, part) in parts.iter().enumerate() {
        if i % 2 == 1 {
            if i + 1 < parts.len() {
                html.push_str("<strong style=\"color:#00e676\">");
                html.push_str(part);
                html.push_str("</strong>");
            } else {
                html.push_str("**");
                html.push_str(part);
            }
        } else {
            html.push_str(part);
        }
    }
    html.replace('\n', "<br/>")
}
