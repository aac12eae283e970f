//! Page shell: app bar on top, optional fixed-width sidebar, scrolling
//! content area.

use leptos::prelude::*;

use crate::components::header::Header;

#[component]
pub fn Layout(#[prop(optional)] sidebar: Option<AnyView>, children: Children) -> impl IntoView {
    view! {
        <div class="layout">
            <Header/>
            <main class="layout__main">
                {sidebar.map(|sidebar| view! { <aside class="layout__sidebar">{sidebar}</aside> })}
                <div class="layout__content">{children()}</div>
            </main>
        </div>
    }
}
