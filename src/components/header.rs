//! Top app bar with navigation.
//!
//! `返回首页` is a reset, not just navigation: it clears the data context
//! and transcript and puts the workbench back on the hypothesis module.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::state::app::{AppState, ModuleType};
use crate::state::chat::ChatState;
use crate::state::session::SessionState;

#[component]
pub fn Header() -> impl IntoView {
    let app = expect_context::<RwSignal<AppState>>();
    let chat = expect_context::<RwSignal<ChatState>>();
    let session = expect_context::<RwSignal<SessionState>>();
    let navigate = use_navigate();
    let pathname = use_location().pathname;

    let go_home = {
        let navigate = navigate.clone();
        move |_| {
            session.update(|s| s.clear_current());
            chat.update(|c| c.clear());
            app.update(|a| a.active_module = ModuleType::Hypothesis);
            navigate("/", NavigateOptions::default());
        }
    };
    let go_history = {
        let navigate = navigate.clone();
        move |_| navigate("/history", NavigateOptions::default())
    };
    let go_settings = move |_| navigate("/settings", NavigateOptions::default());

    view! {
        <header class="header">
            <div class="header__brand">
                <span class="header__logo">"📈"</span>
                <span class="header__title">"统计分析助手"</span>
            </div>
            <nav class="header__nav">
                <button
                    class="btn header__nav-btn"
                    class:btn--primary=move || pathname.get() == "/"
                    on:click=go_home
                >
                    "🏠 返回首页"
                </button>
                <button
                    class="btn header__nav-btn"
                    class:btn--primary=move || pathname.get() == "/history"
                    on:click=go_history
                >
                    "🕘 历史记录"
                </button>
                <button class="header__settings" title="设置" on:click=go_settings>
                    "⚙"
                </button>
            </nav>
        </header>
    }
}
