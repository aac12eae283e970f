//! REST wrappers for the analysis backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, raced against a
//! timeout. Server-side (SSR): stubs returning errors since every endpoint
//! is only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! All wrappers return `Result<T, String>` with user-facing Chinese
//! messages: non-OK responses surface the body's `message` or `detail`
//! field (falling back to a generic server error), and transport failures
//! or timeouts collapse into one network error string the chat panel can
//! show verbatim.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{
    ChatRequest, ChatResponse, ConclusionRequest, ConclusionResponse, ExportRequest,
    ExportResponse, ModelConfig, PromptTemplates, SessionDetail, SessionsQuery, SessionsResponse,
    TestConnectionRequest, TestConnectionResponse,
};
#[cfg(feature = "hydrate")]
use super::types::{Industry, UploadResponse};
#[cfg(any(test, feature = "hydrate"))]
use crate::util::industries::industry_value;

/// Error shown when the request never reached the backend or timed out.
pub const NETWORK_ERROR_MESSAGE: &str = "网络错误，请检查连接";

#[cfg(any(test, feature = "hydrate"))]
const SERVER_ERROR_MESSAGE: &str = "服务器错误";

/// Browser storage key the auth token is read from, when one exists.
#[cfg(feature = "hydrate")]
const AUTH_TOKEN_KEY: &str = "auth_token";

/// Ceiling for ordinary requests.
#[cfg(feature = "hydrate")]
const DEFAULT_TIMEOUT_MS: u32 = 60_000;

/// Conclusion generation calls the language model and can run for minutes.
#[cfg(feature = "hydrate")]
const CONCLUSION_TIMEOUT_MS: u32 = 300_000;

/// Backend origin, overridable at build time for non-local deployments.
#[cfg(any(test, feature = "hydrate"))]
fn api_base_url() -> &'static str {
    option_env!("STATCHAT_API_BASE").unwrap_or("http://localhost:8001")
}

#[cfg(any(test, feature = "hydrate"))]
fn endpoint(path: &str) -> String {
    format!("{}{path}", api_base_url())
}

#[cfg(any(test, feature = "hydrate"))]
fn session_endpoint(session_id: &str) -> String {
    endpoint(&format!("/api/v2/session/{session_id}"))
}

/// Picks the user-facing message out of an error body: `message` wins over
/// `detail`, empty strings count as absent.
#[cfg(any(test, feature = "hydrate"))]
fn server_error_message(body: Option<&serde_json::Value>) -> String {
    fn field<'a>(body: &'a serde_json::Value, key: &str) -> Option<&'a str> {
        body.get(key)
            .and_then(serde_json::Value::as_str)
            .filter(|text| !text.is_empty())
    }

    body.and_then(|value| field(value, "message").or_else(|| field(value, "detail")))
        .map_or_else(|| SERVER_ERROR_MESSAGE.to_owned(), ToOwned::to_owned)
}

/// Query-string pairs for the session listing; unset filters are omitted.
#[cfg(any(test, feature = "hydrate"))]
fn sessions_query_pairs(query: &SessionsQuery) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    if let Some(page) = query.page {
        pairs.push(("page", page.to_string()));
    }
    if let Some(size) = query.size {
        pairs.push(("size", size.to_string()));
    }
    if let Some(keyword) = &query.keyword
        && !keyword.is_empty()
    {
        pairs.push(("keyword", keyword.clone()));
    }
    if let Some(industry) = query.industry {
        pairs.push(("industry", industry_value(industry).to_owned()));
    }
    if let Some(method) = &query.method
        && !method.is_empty()
    {
        pairs.push(("method", method.clone()));
    }
    if let Some(start_date) = &query.start_date {
        pairs.push(("start_date", start_date.clone()));
    }
    if let Some(end_date) = &query.end_date {
        pairs.push(("end_date", end_date.clone()));
    }
    pairs
}

// ============================================================================
// Transport plumbing (browser only)
// ============================================================================

/// Races a request against its timeout. Timeouts and transport failures are
/// indistinguishable to the user, so both map to the network error message.
#[cfg(feature = "hydrate")]
async fn send_with_timeout(
    request: gloo_net::http::Request,
    timeout_ms: u32,
) -> Result<gloo_net::http::Response, String> {
    use futures::future::{Either, select};
    use gloo_timers::future::TimeoutFuture;

    let send = Box::pin(request.send());
    let timeout = Box::pin(TimeoutFuture::new(timeout_ms));
    match select(send, timeout).await {
        Either::Left((result, _)) => result.map_err(|_| NETWORK_ERROR_MESSAGE.to_owned()),
        Either::Right(((), _)) => Err(NETWORK_ERROR_MESSAGE.to_owned()),
    }
}

#[cfg(feature = "hydrate")]
fn with_auth(builder: gloo_net::http::RequestBuilder) -> gloo_net::http::RequestBuilder {
    match crate::util::persistence::read_string(AUTH_TOKEN_KEY) {
        Some(token) if !token.is_empty() => {
            builder.header("Authorization", &format!("Bearer {token}"))
        }
        _ => builder,
    }
}

#[cfg(feature = "hydrate")]
async fn response_error(resp: gloo_net::http::Response) -> String {
    let body = resp.json::<serde_json::Value>().await.ok();
    server_error_message(body.as_ref())
}

#[cfg(feature = "hydrate")]
async fn read_json<T: serde::de::DeserializeOwned>(
    resp: gloo_net::http::Response,
) -> Result<T, String> {
    if !resp.ok() {
        return Err(response_error(resp).await);
    }
    resp.json::<T>().await.map_err(|e| e.to_string())
}

#[cfg(feature = "hydrate")]
async fn read_ok(resp: gloo_net::http::Response) -> Result<(), String> {
    if !resp.ok() {
        return Err(response_error(resp).await);
    }
    Ok(())
}

#[cfg(feature = "hydrate")]
async fn get_json<T: serde::de::DeserializeOwned>(path: &str) -> Result<T, String> {
    let request = with_auth(gloo_net::http::Request::get(&endpoint(path)))
        .build()
        .map_err(|e| e.to_string())?;
    let resp = send_with_timeout(request, DEFAULT_TIMEOUT_MS).await?;
    read_json(resp).await
}

#[cfg(feature = "hydrate")]
async fn post_json<B: serde::Serialize, T: serde::de::DeserializeOwned>(
    path: &str,
    body: &B,
    timeout_ms: u32,
) -> Result<T, String> {
    let request = with_auth(gloo_net::http::Request::post(&endpoint(path)))
        .json(body)
        .map_err(|e| e.to_string())?;
    let resp = send_with_timeout(request, timeout_ms).await?;
    read_json(resp).await
}

#[cfg(feature = "hydrate")]
async fn put_json<B: serde::Serialize>(path: &str, body: &B) -> Result<(), String> {
    let request = with_auth(gloo_net::http::Request::put(&endpoint(path)))
        .json(body)
        .map_err(|e| e.to_string())?;
    let resp = send_with_timeout(request, DEFAULT_TIMEOUT_MS).await?;
    read_ok(resp).await
}

// ============================================================================
// Chat and upload
// ============================================================================

/// Send one chat turn via `POST /api/v2/chat`.
///
/// # Errors
///
/// Returns the normalized backend or network error message.
pub async fn send_chat(request: &ChatRequest) -> Result<ChatResponse, String> {
    #[cfg(feature = "hydrate")]
    {
        post_json("/api/v2/chat", request, DEFAULT_TIMEOUT_MS).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = request;
        Err("not available on server".to_owned())
    }
}

/// Upload a data file via `POST /api/v2/upload` as multipart form data.
///
/// The optional industry tag rides along as a form field. Format and size
/// validation happens in the upload component before this is called.
///
/// # Errors
///
/// Returns the normalized backend or network error message.
#[cfg(feature = "hydrate")]
pub async fn upload_file(
    file: &web_sys::File,
    industry: Option<Industry>,
) -> Result<UploadResponse, String> {
    let form = web_sys::FormData::new().map_err(|_| "上传请求构建失败".to_owned())?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(|_| "上传请求构建失败".to_owned())?;
    if let Some(industry) = industry {
        form.append_with_str("industry", industry_value(industry))
            .map_err(|_| "上传请求构建失败".to_owned())?;
    }

    // The browser supplies the multipart boundary; setting Content-Type
    // here would break it.
    let request = with_auth(gloo_net::http::Request::post(&endpoint("/api/v2/upload")))
        .body(form)
        .map_err(|e| e.to_string())?;
    let resp = send_with_timeout(request, DEFAULT_TIMEOUT_MS).await?;
    read_json(resp).await
}

// ============================================================================
// Sessions
// ============================================================================

/// Fetch one page of the session history via `GET /api/v2/sessions`.
///
/// # Errors
///
/// Returns the normalized backend or network error message.
pub async fn fetch_sessions(query: &SessionsQuery) -> Result<SessionsResponse, String> {
    #[cfg(feature = "hydrate")]
    {
        let pairs = sessions_query_pairs(query);
        let request = with_auth(
            gloo_net::http::Request::get(&endpoint("/api/v2/sessions"))
                .query(pairs.iter().map(|(key, value)| (*key, value.as_str()))),
        )
        .build()
        .map_err(|e| e.to_string())?;
        let resp = send_with_timeout(request, DEFAULT_TIMEOUT_MS).await?;
        read_json(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = query;
        Err("not available on server".to_owned())
    }
}

/// Fetch a full session transcript via `GET /api/v2/session/{id}`.
///
/// # Errors
///
/// Returns the normalized backend or network error message.
pub async fn fetch_session_detail(session_id: &str) -> Result<SessionDetail, String> {
    #[cfg(feature = "hydrate")]
    {
        let request = with_auth(gloo_net::http::Request::get(&session_endpoint(session_id)))
            .build()
            .map_err(|e| e.to_string())?;
        let resp = send_with_timeout(request, DEFAULT_TIMEOUT_MS).await?;
        read_json(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = session_id;
        Err("not available on server".to_owned())
    }
}

/// Delete a session via `DELETE /api/v2/session/{id}`.
///
/// # Errors
///
/// Returns the normalized backend or network error message.
pub async fn delete_session(session_id: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let request = with_auth(gloo_net::http::Request::delete(&session_endpoint(
            session_id,
        )))
        .build()
        .map_err(|e| e.to_string())?;
        let resp = send_with_timeout(request, DEFAULT_TIMEOUT_MS).await?;
        read_ok(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = session_id;
        Err("not available on server".to_owned())
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Fetch the active model configuration via `GET /api/v2/config/model`.
///
/// # Errors
///
/// Returns the normalized backend or network error message.
pub async fn fetch_model_config() -> Result<ModelConfig, String> {
    #[cfg(feature = "hydrate")]
    {
        get_json("/api/v2/config/model").await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err("not available on server".to_owned())
    }
}

/// Save the model configuration via `PUT /api/v2/config/model`.
///
/// # Errors
///
/// Returns the normalized backend or network error message.
pub async fn save_model_config(config: &ModelConfig) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        put_json("/api/v2/config/model", config).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = config;
        Err("not available on server".to_owned())
    }
}

/// Probe provider credentials via `POST /api/v2/config/model/test`.
///
/// # Errors
///
/// Returns the normalized backend or network error message.
pub async fn test_connection(
    request: &TestConnectionRequest,
) -> Result<TestConnectionResponse, String> {
    #[cfg(feature = "hydrate")]
    {
        post_json("/api/v2/config/model/test", request, DEFAULT_TIMEOUT_MS).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = request;
        Err("not available on server".to_owned())
    }
}

/// Fetch the pipeline prompt templates via `GET /api/v2/config/prompts`.
///
/// # Errors
///
/// Returns the normalized backend or network error message.
pub async fn fetch_prompt_templates() -> Result<PromptTemplates, String> {
    #[cfg(feature = "hydrate")]
    {
        get_json("/api/v2/config/prompts").await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err("not available on server".to_owned())
    }
}

/// Save the pipeline prompt templates via `PUT /api/v2/config/prompts`.
///
/// # Errors
///
/// Returns the normalized backend or network error message.
pub async fn save_prompt_templates(templates: &PromptTemplates) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        put_json("/api/v2/config/prompts", templates).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = templates;
        Err("not available on server".to_owned())
    }
}

// ============================================================================
// Reports
// ============================================================================

/// Render a report via `POST /api/v2/export`.
///
/// # Errors
///
/// Returns the normalized backend or network error message.
pub async fn export_report(request: &ExportRequest) -> Result<ExportResponse, String> {
    #[cfg(feature = "hydrate")]
    {
        post_json("/api/v2/export", request, DEFAULT_TIMEOUT_MS).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = request;
        Err("not available on server".to_owned())
    }
}

/// Generate the overall conclusion via `POST /api/v2/report/conclusion`.
///
/// Runs with the extended timeout; the backend calls the language model
/// synchronously.
///
/// # Errors
///
/// Returns the normalized backend or network error message.
pub async fn generate_conclusion(
    request: &ConclusionRequest,
) -> Result<ConclusionResponse, String> {
    #[cfg(feature = "hydrate")]
    {
        post_json("/api/v2/report/conclusion", request, CONCLUSION_TIMEOUT_MS).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = request;
        Err("not available on server".to_owned())
    }
}
