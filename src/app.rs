//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::pages::{history::HistoryPage, home::HomePage, settings::SettingsPage};
use crate::state::app::AppState;
use crate::state::chat::ChatState;
use crate::state::config::ConfigState;
use crate::state::session::SessionState;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="zh-CN">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Creates one signal per state store and provides them via context; no
/// store lives at module level. Config rehydrates from browser storage
/// here so the settings form is populated before any server round trip.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = RwSignal::new(SessionState::default());
    let chat = RwSignal::new(ChatState::default());
    let app = RwSignal::new(AppState::default());
    let config = RwSignal::new(ConfigState::restore());

    provide_context(session);
    provide_context(chat);
    provide_context(app);
    provide_context(config);

    view! {
        <Stylesheet id="leptos" href="/pkg/statchat.css"/>
        <Title text="统计分析助手"/>

        <Router>
            <Routes fallback=|| view! { <Redirect path="/"/> }>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=StaticSegment("history") view=HistoryPage/>
                <Route path=StaticSegment("settings") view=SettingsPage/>
            </Routes>
        </Router>
    }
}
