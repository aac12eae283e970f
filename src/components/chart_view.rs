//! Host component binding one chart payload to an ECharts instance.
//!
//! ARCHITECTURE
//! ============
//! The option object is built once per mount by the pure
//! [`crate::charts::options::build_chart_option`]; this component only owns
//! the browser side: init against the host div, `setOption`, a window
//! resize listener, and `dispose` on unmount. The ECharts library is loaded
//! globally from `index.html`, so all calls go through `js_sys` reflection
//! rather than a binding crate. Cleanup callbacks must be `Send`, so live
//! instances are parked in a thread-local registry and the callback carries
//! only a numeric key.

use leptos::prelude::*;

#[cfg(feature = "hydrate")]
use std::cell::{Cell, RefCell};
#[cfg(feature = "hydrate")]
use std::collections::HashMap;

#[cfg(feature = "hydrate")]
use wasm_bindgen::{JsCast, JsValue, closure::Closure};

use crate::charts::options::{build_chart_option, chart_height};
use crate::net::types::ChartConfig;

#[cfg(feature = "hydrate")]
struct ChartHandle {
    instance: js_sys::Object,
    resize_listener: Closure<dyn FnMut()>,
}

#[cfg(feature = "hydrate")]
thread_local! {
    static LIVE_CHARTS: RefCell<HashMap<u64, ChartHandle>> = RefCell::new(HashMap::new());
    static NEXT_CHART_KEY: Cell<u64> = const { Cell::new(0) };
}

/// One rendered chart. Unrecognized payload shapes surface as an inline
/// error box instead of an empty chart.
#[component]
pub fn ChartView(config: ChartConfig) -> impl IntoView {
    let height = chart_height(config.kind);
    let title = config.title.clone();
    let option = build_chart_option(&config);

    let reject = option.as_ref().err().cloned();
    let host_ref = NodeRef::<leptos::html::Div>::new();

    #[cfg(feature = "hydrate")]
    {
        if let Ok(option) = option {
            let key = NEXT_CHART_KEY.with(|next| {
                let key = next.get().wrapping_add(1);
                next.set(key);
                key
            });

            Effect::new(move || {
                let Some(host) = host_ref.get() else {
                    return;
                };
                if LIVE_CHARTS.with(|charts| charts.borrow().contains_key(&key)) {
                    return;
                }
                let Some(instance) = init_chart(&host) else {
                    return;
                };
                apply_option(&instance, &option);

                let resize_listener = Closure::<dyn FnMut()>::new({
                    let instance = instance.clone();
                    move || call_method(&instance, "resize")
                });
                if let Some(window) = web_sys::window() {
                    let _ = window.add_event_listener_with_callback(
                        "resize",
                        resize_listener.as_ref().unchecked_ref(),
                    );
                }
                LIVE_CHARTS.with(|charts| {
                    charts.borrow_mut().insert(
                        key,
                        ChartHandle {
                            instance,
                            resize_listener,
                        },
                    );
                });
            });

            on_cleanup(move || dispose_chart(key));
        }
    }

    view! {
        <div class="chart-view">
            <div class="chart-view__title">{title}</div>
            {match reject {
                Some(message) => {
                    view! {
                        <div class="chart-view__error">
                            {format!("图表数据格式不支持: {message}")}
                        </div>
                    }
                        .into_any()
                }
                None => {
                    view! {
                        <div
                            class="chart-view__host"
                            node_ref=host_ref
                            style:height=format!("{height}px")
                        ></div>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}

/// Looks up the global `echarts` object installed by the script tag.
#[cfg(feature = "hydrate")]
fn echarts_global() -> Option<js_sys::Object> {
    let window = web_sys::window()?;
    let value = js_sys::Reflect::get(&window, &JsValue::from_str("echarts")).ok()?;
    if value.is_undefined() || value.is_null() {
        return None;
    }
    value.dyn_into::<js_sys::Object>().ok()
}

#[cfg(feature = "hydrate")]
fn init_chart(host: &web_sys::HtmlDivElement) -> Option<js_sys::Object> {
    let echarts = echarts_global()?;
    let init = js_sys::Reflect::get(&echarts, &JsValue::from_str("init"))
        .ok()?
        .dyn_into::<js_sys::Function>()
        .ok()?;
    init.call1(&echarts, host.as_ref())
        .ok()?
        .dyn_into::<js_sys::Object>()
        .ok()
}

/// Ships the option through `JSON.parse`; ECharts accepts the parsed object
/// directly and this avoids hand-building nested `js_sys` structures.
#[cfg(feature = "hydrate")]
fn apply_option(chart: &js_sys::Object, option: &serde_json::Value) {
    let Ok(parsed) = js_sys::JSON::parse(&option.to_string()) else {
        return;
    };
    if let Ok(set_option) = js_sys::Reflect::get(chart, &JsValue::from_str("setOption")) {
        if let Ok(set_option) = set_option.dyn_into::<js_sys::Function>() {
            let _ = set_option.call1(chart, &parsed);
        }
    }
}

#[cfg(feature = "hydrate")]
fn call_method(chart: &js_sys::Object, name: &str) {
    if let Ok(value) = js_sys::Reflect::get(chart, &JsValue::from_str(name)) {
        if let Ok(method) = value.dyn_into::<js_sys::Function>() {
            let _ = method.call0(chart);
        }
    }
}

#[cfg(feature = "hydrate")]
fn dispose_chart(key: u64) {
    let Some(handle) = LIVE_CHARTS.with(|charts| charts.borrow_mut().remove(&key)) else {
        return;
    };
    if let Some(window) = web_sys::window() {
        let _ = window.remove_event_listener_with_callback(
            "resize",
            handle.resize_listener.as_ref().unchecked_ref(),
        );
    }
    call_method(&handle.instance, "dispose");
}
