//! Shared wire DTOs for the `/api/v2` backend boundary.
//!
//! DESIGN
//! ======
//! These types mirror the backend payloads field-for-field so serde stays
//! lossless and the API wrappers remain schema-driven. Chart payload `data`
//! is kept as raw JSON here; `charts::parse` turns it into closed per-kind
//! shapes.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Industry vertical attached to an uploaded dataset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Industry {
    Ecommerce,
    Finance,
    Healthcare,
    Education,
    Manufacturing,
    Internet,
    Hr,
    Marketing,
    Other,
}

/// Author of a chat transcript entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry in the chat transcript.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Client-generated message identifier (UUID string).
    pub id: String,
    /// Who authored the message.
    pub role: Role,
    /// Free-text body; assistant messages may contain markdown.
    pub content: String,
    /// ISO 8601 timestamp.
    pub timestamp: String,
    /// Structured analysis attached to assistant replies, when the backend
    /// ran a statistical method for this turn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisResult>,
}

/// Statistical analysis produced by the backend for one question.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Machine method identifier (e.g. `"t_test_independent"`, `"spc"`).
    pub method: String,
    /// Human-readable method name.
    pub method_name: String,
    /// Two-sided p-value; SPC methods report none.
    #[serde(default)]
    pub p_value: Option<f64>,
    /// Effect size with qualitative banding, when the method defines one.
    #[serde(default)]
    pub effect_size: Option<EffectSize>,
    /// Whether the result is significant at the backend's alpha.
    pub significant: bool,
    /// Business-facing interpretation text.
    pub interpretation: String,
    /// Follow-up suggestions, rendered as clickable chips.
    #[serde(default)]
    pub suggestions: Vec<String>,
    /// Chart configurations to render alongside the interpretation.
    #[serde(default)]
    pub visualizations: Vec<ChartConfig>,
}

/// Kind of effect-size statistic reported by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectSizeKind {
    CohensD,
    RSquared,
    EtaSquared,
    CramersV,
}

/// Qualitative effect-size banding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectLevel {
    Small,
    Medium,
    Large,
}

/// Standardized effect size attached to an analysis result.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EffectSize {
    /// Which statistic `value` is.
    #[serde(rename = "type")]
    pub kind: EffectSizeKind,
    /// The statistic itself.
    pub value: f64,
    /// Backend-assigned small/medium/large banding.
    pub level: EffectLevel,
}

/// Chart family a configuration belongs to. Closed set; unknown kinds fail
/// deserialization instead of falling through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Scatter,
    Box,
    Bar,
    Distribution,
    Residual,
    ControlChart,
}

/// One chart as shipped by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Chart family.
    #[serde(rename = "type")]
    pub kind: ChartKind,
    /// Display title above the chart.
    pub title: String,
    /// Kind-specific payload; parsed by `charts::parse`.
    pub data: serde_json::Value,
    /// X-axis label, if the backend supplies one.
    #[serde(rename = "xLabel", default, skip_serializing_if = "Option::is_none")]
    pub x_label: Option<String>,
    /// Y-axis label, if the backend supplies one.
    #[serde(rename = "yLabel", default, skip_serializing_if = "Option::is_none")]
    pub y_label: Option<String>,
}

/// Per-column descriptive statistics for numeric columns.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    /// Arithmetic mean.
    pub mean: f64,
    /// Standard deviation.
    pub std: f64,
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
}

/// Shape summary of the uploaded dataset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataSummary {
    /// Row count.
    #[serde(deserialize_with = "deserialize_u64_from_number")]
    pub rows: u64,
    /// Column count.
    #[serde(deserialize_with = "deserialize_u64_from_number")]
    pub columns: u64,
    /// Column names in dataset order.
    pub column_names: Vec<String>,
    /// Column name to inferred type (e.g. `"numeric"`, `"categorical"`).
    pub column_types: std::collections::BTreeMap<String, String>,
    /// Descriptive statistics for numeric columns, when computed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_stats: Option<std::collections::BTreeMap<String, ColumnStats>>,
}

/// One session as listed by `/api/v2/sessions`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Backend-issued session identifier.
    pub session_id: String,
    /// ISO 8601 creation timestamp.
    pub created_at: String,
    /// ISO 8601 last-update timestamp.
    pub updated_at: String,
    /// Uploaded file name.
    pub file_name: String,
    /// Industry tag chosen at upload time, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<Industry>,
    /// First user question in the session.
    pub first_query: String,
    /// Statistical methods run during the session.
    #[serde(default)]
    pub methods_used: Vec<String>,
    /// Number of transcript messages.
    #[serde(deserialize_with = "deserialize_u64_from_number")]
    pub message_count: u64,
}

/// Full session detail from `/api/v2/session/{id}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionDetail {
    /// Backend-issued session identifier.
    pub session_id: String,
    /// ISO 8601 creation timestamp.
    pub created_at: String,
    /// ISO 8601 last-update timestamp.
    pub updated_at: String,
    /// Uploaded file name.
    pub file_name: String,
    /// Industry tag chosen at upload time, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<Industry>,
    /// First user question in the session.
    pub first_query: String,
    /// Statistical methods run during the session.
    #[serde(default)]
    pub methods_used: Vec<String>,
    /// Number of transcript messages.
    #[serde(deserialize_with = "deserialize_u64_from_number")]
    pub message_count: u64,
    /// Full transcript.
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    /// Dataset summary captured at upload time.
    pub data_summary: DataSummary,
    /// Stored report conclusion, if one has been generated.
    #[serde(default)]
    pub report_conclusion: Option<String>,
}

/// Query parameters for the session list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionsQuery {
    /// 1-based page index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    /// Free-text filter over file names and first queries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    /// Restrict to one industry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<Industry>,
    /// Restrict to sessions that ran this method.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// ISO 8601 lower bound on creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// ISO 8601 upper bound on creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// One page of the session list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionsResponse {
    /// Total matching sessions across all pages.
    #[serde(deserialize_with = "deserialize_u64_from_number")]
    pub total: u64,
    /// 1-based page index echoed back.
    #[serde(deserialize_with = "deserialize_u64_from_number")]
    pub page: u64,
    /// Sessions on this page.
    #[serde(default)]
    pub items: Vec<SessionSummary>,
}

/// Request body for `/api/v2/chat`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Existing session to continue; omitted for the first message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// The user's message or a JSON task directive.
    pub message: String,
    /// Base64 file content for inline upload, unused by this client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Industry tag for new sessions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<Industry>,
}

/// Response body for `/api/v2/chat`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Session this reply belongs to.
    pub session_id: String,
    /// Assistant reply text.
    pub reply: String,
    /// Structured analysis, when a statistical method was run.
    #[serde(default)]
    pub analysis: Option<AnalysisResult>,
    /// Follow-up suggestions.
    #[serde(default)]
    pub suggestions: Vec<String>,
    /// Charts to render with the reply.
    #[serde(default)]
    pub visualizations: Vec<ChartConfig>,
}

/// Response body for `/api/v2/upload`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Newly created session identifier.
    pub session_id: String,
    /// Echoed file name.
    pub file_name: String,
    /// Parsed dataset summary.
    pub data_summary: DataSummary,
}

/// LLM provider selection for the backend's model calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelProvider {
    Claude,
    Openai,
    Zhipu,
    Qwen,
    Custom,
}

/// Model configuration mirrored between local storage and the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Provider the backend should call.
    pub provider: ModelProvider,
    /// Provider API key; stored as entered, never logged.
    pub api_key: String,
    /// Provider base URL override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Model identifier at the provider.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Completion token ceiling.
    pub max_tokens: u32,
    /// Nucleus sampling parameter.
    pub top_p: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: ModelProvider::Zhipu,
            api_key: String::new(),
            base_url: Some("https://open.bigmodel.cn/api/paas/v4".to_owned()),
            model: "GLM-4.7".to_owned(),
            temperature: 0.7,
            max_tokens: 4096,
            top_p: 1.0,
        }
    }
}

/// Editable prompt templates for the backend's three LLM stages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptTemplates {
    /// Intent-extraction stage prompt.
    pub intent: String,
    /// Analysis-planning stage prompt.
    pub planning: String,
    /// Result-interpretation stage prompt.
    pub interpret: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            intent: "你是一个统计分析助手。根据用户问题，提取自变量(X)、因变量(Y)、任务类型与特殊要求，并以 JSON 输出。".to_owned(),
            planning: "根据 intent 与 data_summary 输出分析计划 JSON（method 与 params）。".to_owned(),
            interpret: "根据 analysis_result 输出业务化解释、建议与图表选择。".to_owned(),
        }
    }
}

/// Request body for `/api/v2/config/model/test`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TestConnectionRequest {
    /// Provider to probe.
    pub provider: ModelProvider,
    /// Key to probe with.
    pub api_key: String,
    /// Base URL override, if set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Response body for `/api/v2/config/model/test`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestConnectionResponse {
    /// Whether the backend reached the provider.
    pub success: bool,
    /// Human-readable outcome.
    pub message: String,
}

/// Report output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Md,
    Docx,
}

/// Request body for `/api/v2/export`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRequest {
    /// Session to export.
    pub session_id: String,
    /// Output format.
    pub format: ExportFormat,
    /// Whether chart images are embedded in the report.
    pub include_charts: bool,
}

/// Response body for `/api/v2/export`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportResponse {
    /// URL the finished report can be fetched from.
    pub download_url: String,
    /// Suggested file name for the download.
    pub file_name: String,
}

/// One analysis forwarded to the conclusion generator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConclusionAnalysis {
    /// X variable this analysis covered, for multi-X runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_variable: Option<String>,
    /// Y variable this analysis covered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_variable: Option<String>,
    /// Machine method identifier.
    pub method: String,
    /// Human-readable method name.
    pub method_name: String,
    /// P-value; serialized as `null` for SPC results.
    pub p_value: Option<f64>,
    /// Significance flag.
    pub significant: bool,
    /// Effect size forwarded as an open object.
    pub effect_size: serde_json::Value,
    /// Interpretation text.
    pub interpretation: String,
    /// Suggestions.
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl ConclusionAnalysis {
    /// Flattens one analysis result into the conclusion-request shape. The
    /// p-value stays `None` for SPC methods and serializes as `null`.
    #[must_use]
    pub fn from_analysis(
        analysis: &AnalysisResult,
        x_variable: Option<String>,
        y_variable: Option<String>,
    ) -> Self {
        Self {
            x_variable,
            y_variable,
            method: analysis.method.clone(),
            method_name: analysis.method_name.clone(),
            p_value: analysis.p_value,
            significant: analysis.significant,
            effect_size: serde_json::to_value(analysis.effect_size)
                .unwrap_or(serde_json::Value::Null),
            interpretation: analysis.interpretation.clone(),
            suggestions: analysis.suggestions.clone(),
        }
    }
}

/// Request body for `/api/v2/report/conclusion`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConclusionRequest {
    /// Session the analyses belong to, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Analyses the conclusion should cover.
    pub analyses: Vec<ConclusionAnalysis>,
    /// Dataset summary for context, if available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_summary: Option<DataSummary>,
}

/// Response body for `/api/v2/report/conclusion`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConclusionResponse {
    /// Markdown conclusion text.
    pub conclusion: String,
}

/// Client-side record of one X variable's result in a multi-X run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MultiAnalysisResult {
    /// X variable analyzed.
    pub x_variable: String,
    /// Y variable analyzed.
    pub y_variable: String,
    /// The backend's analysis for this pair.
    pub analysis: AnalysisResult,
}

fn deserialize_u64_from_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Number(number) => {
            if let Some(int) = number.as_u64() {
                return Ok(int);
            }
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            if let Some(float) = number.as_f64()
                && float.is_finite()
                && float.fract() == 0.0
                && float >= 0.0
                && float <= u64::MAX as f64
            {
                return Ok(float as u64);
            }
            Err(D::Error::custom("expected non-negative integer-compatible number"))
        }
        _ => Err(D::Error::custom("expected number")),
    }
}
