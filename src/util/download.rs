//! Browser file-download helper for exported reports.
//!
//! TRADE-OFFS
//! ==========
//! Downloads are best-effort browser-only behavior; SSR paths safely no-op
//! so server rendering stays deterministic.

/// Download `url` as `file_name` by clicking a temporary anchor element.
pub fn download_url(url: &str, file_name: &str) {
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::JsCast;

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Ok(element) = document.create_element("a") else {
            return;
        };
        let Ok(anchor) = element.dyn_into::<web_sys::HtmlAnchorElement>() else {
            return;
        };
        anchor.set_href(url);
        anchor.set_download(file_name);
        if let Some(body) = document.body() {
            let _ = body.append_child(&anchor);
            anchor.click();
            let _ = body.remove_child(&anchor);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (url, file_name);
    }
}
