use super::*;

// =============================================================
// Helpers
// =============================================================

fn make_effect_size() -> EffectSize {
    EffectSize { kind: EffectSizeKind::CohensD, value: 0.82, level: EffectLevel::Large }
}

fn make_analysis() -> AnalysisResult {
    AnalysisResult {
        method: "t_test_independent".to_owned(),
        method_name: "独立样本 t 检验".to_owned(),
        p_value: Some(0.003),
        effect_size: Some(make_effect_size()),
        significant: true,
        interpretation: "两组均值差异显著。".to_owned(),
        suggestions: vec!["建议检查分组平衡性。".to_owned()],
        visualizations: vec![make_chart_config()],
    }
}

fn make_chart_config() -> ChartConfig {
    ChartConfig {
        kind: ChartKind::Box,
        title: "分组箱线图".to_owned(),
        data: serde_json::json!({"groups": ["A", "B"], "values": [[1.0, 2.0], [3.0, 4.0]]}),
        x_label: Some("组别".to_owned()),
        y_label: Some("数值".to_owned()),
    }
}

fn make_data_summary() -> DataSummary {
    let mut column_types = std::collections::BTreeMap::new();
    column_types.insert("yield".to_owned(), "numeric".to_owned());
    column_types.insert("line".to_owned(), "categorical".to_owned());
    let mut column_stats = std::collections::BTreeMap::new();
    column_stats.insert("yield".to_owned(), ColumnStats { mean: 92.5, std: 3.1, min: 80.0, max: 99.0 });
    DataSummary {
        rows: 200,
        columns: 2,
        column_names: vec!["yield".to_owned(), "line".to_owned()],
        column_types,
        column_stats: Some(column_stats),
    }
}

// =============================================================
// Enum wire strings
// =============================================================

#[test]
fn industry_serializes_to_lowercase() {
    assert_eq!(serde_json::to_string(&Industry::Ecommerce).unwrap(), "\"ecommerce\"");
    assert_eq!(serde_json::to_string(&Industry::Manufacturing).unwrap(), "\"manufacturing\"");
    assert_eq!(serde_json::to_string(&Industry::Hr).unwrap(), "\"hr\"");
}

#[test]
fn industry_rejects_unknown_value() {
    assert!(serde_json::from_str::<Industry>("\"agriculture\"").is_err());
}

#[test]
fn role_round_trips_lowercase() {
    assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
    assert_eq!(serde_json::from_str::<Role>("\"user\"").unwrap(), Role::User);
}

#[test]
fn effect_size_kind_uses_snake_case() {
    assert_eq!(serde_json::to_string(&EffectSizeKind::CohensD).unwrap(), "\"cohens_d\"");
    assert_eq!(serde_json::to_string(&EffectSizeKind::RSquared).unwrap(), "\"r_squared\"");
    assert_eq!(serde_json::to_string(&EffectSizeKind::EtaSquared).unwrap(), "\"eta_squared\"");
    assert_eq!(serde_json::to_string(&EffectSizeKind::CramersV).unwrap(), "\"cramers_v\"");
}

#[test]
fn chart_kind_uses_snake_case() {
    assert_eq!(serde_json::to_string(&ChartKind::ControlChart).unwrap(), "\"control_chart\"");
    assert_eq!(serde_json::from_str::<ChartKind>("\"distribution\"").unwrap(), ChartKind::Distribution);
}

#[test]
fn chart_kind_rejects_unknown_value() {
    assert!(serde_json::from_str::<ChartKind>("\"heatmap\"").is_err());
}

#[test]
fn model_provider_round_trips_lowercase() {
    assert_eq!(serde_json::to_string(&ModelProvider::Zhipu).unwrap(), "\"zhipu\"");
    assert_eq!(serde_json::from_str::<ModelProvider>("\"claude\"").unwrap(), ModelProvider::Claude);
}

#[test]
fn export_format_round_trips_lowercase() {
    assert_eq!(serde_json::to_string(&ExportFormat::Docx).unwrap(), "\"docx\"");
    assert_eq!(serde_json::from_str::<ExportFormat>("\"md\"").unwrap(), ExportFormat::Md);
}

// =============================================================
// ChartConfig serde
// =============================================================

#[test]
fn chart_config_round_trip() {
    let config = make_chart_config();
    let json = serde_json::to_string(&config).unwrap();
    let back: ChartConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(config, back);
}

#[test]
fn chart_config_maps_type_and_label_field_names() {
    let json = r#"{
        "type": "control_chart",
        "title": "IX-MR 控制图 — yield",
        "data": {"points": [], "ucl": 3.0, "cl": 2.0, "lcl": 1.0, "chart_type": "IX-MR"},
        "xLabel": "样本序号"
    }"#;
    let config: ChartConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.kind, ChartKind::ControlChart);
    assert_eq!(config.x_label.as_deref(), Some("样本序号"));
    assert_eq!(config.y_label, None);
    let out = serde_json::to_value(&config).unwrap();
    assert_eq!(out["type"], "control_chart");
    assert_eq!(out["xLabel"], "样本序号");
    assert!(out.get("yLabel").is_none());
}

// =============================================================
// AnalysisResult serde
// =============================================================

#[test]
fn analysis_result_round_trip() {
    let analysis = make_analysis();
    let json = serde_json::to_string(&analysis).unwrap();
    let back: AnalysisResult = serde_json::from_str(&json).unwrap();
    assert_eq!(analysis, back);
}

#[test]
fn analysis_result_accepts_null_p_value() {
    let json = r#"{
        "method": "spc",
        "method_name": "SPC IX-MR 控制图",
        "p_value": null,
        "effect_size": {"type": "cohens_d", "value": 0.0, "level": "small"},
        "significant": true,
        "interpretation": "过程失控。",
        "suggestions": [],
        "visualizations": []
    }"#;
    let analysis: AnalysisResult = serde_json::from_str(json).unwrap();
    assert_eq!(analysis.p_value, None);
    assert!(analysis.significant);
}

#[test]
fn analysis_result_defaults_missing_collections() {
    let json = r#"{
        "method": "pearson",
        "method_name": "Pearson 相关分析",
        "significant": false,
        "interpretation": "未发现显著相关。"
    }"#;
    let analysis: AnalysisResult = serde_json::from_str(json).unwrap();
    assert_eq!(analysis.p_value, None);
    assert_eq!(analysis.effect_size, None);
    assert!(analysis.suggestions.is_empty());
    assert!(analysis.visualizations.is_empty());
}

// =============================================================
// ChatMessage serde
// =============================================================

#[test]
fn chat_message_round_trip_with_analysis() {
    let message = ChatMessage {
        id: "m-1".to_owned(),
        role: Role::Assistant,
        content: "分析完成。".to_owned(),
        timestamp: "2025-06-01T08:00:00Z".to_owned(),
        analysis: Some(make_analysis()),
    };
    let json = serde_json::to_string(&message).unwrap();
    let back: ChatMessage = serde_json::from_str(&json).unwrap();
    assert_eq!(message, back);
}

#[test]
fn chat_message_omits_absent_analysis() {
    let message = ChatMessage {
        id: "m-2".to_owned(),
        role: Role::User,
        content: "良率和温度有关系吗？".to_owned(),
        timestamp: "2025-06-01T08:00:01Z".to_owned(),
        analysis: None,
    };
    let out = serde_json::to_value(&message).unwrap();
    assert!(out.get("analysis").is_none());
}

// =============================================================
// DataSummary serde
// =============================================================

#[test]
fn data_summary_round_trip() {
    let summary = make_data_summary();
    let json = serde_json::to_string(&summary).unwrap();
    let back: DataSummary = serde_json::from_str(&json).unwrap();
    assert_eq!(summary, back);
}

#[test]
fn data_summary_accepts_float_typed_counts() {
    let json = r#"{
        "rows": 200.0,
        "columns": 3.0,
        "column_names": ["a", "b", "c"],
        "column_types": {"a": "numeric", "b": "numeric", "c": "categorical"}
    }"#;
    let summary: DataSummary = serde_json::from_str(json).unwrap();
    assert_eq!(summary.rows, 200);
    assert_eq!(summary.columns, 3);
    assert_eq!(summary.column_stats, None);
}

#[test]
fn data_summary_rejects_fractional_counts() {
    let json = r#"{
        "rows": 200.5,
        "columns": 3,
        "column_names": [],
        "column_types": {}
    }"#;
    assert!(serde_json::from_str::<DataSummary>(json).is_err());
}

// =============================================================
// Session list serde
// =============================================================

#[test]
fn sessions_response_round_trip() {
    let response = SessionsResponse {
        total: 12,
        page: 1,
        items: vec![SessionSummary {
            session_id: "s-1".to_owned(),
            created_at: "2025-06-01T08:00:00Z".to_owned(),
            updated_at: "2025-06-01T09:00:00Z".to_owned(),
            file_name: "yield.csv".to_owned(),
            industry: Some(Industry::Manufacturing),
            first_query: "良率和温度有关系吗？".to_owned(),
            methods_used: vec!["pearson".to_owned()],
            message_count: 6,
        }],
    };
    let json = serde_json::to_string(&response).unwrap();
    let back: SessionsResponse = serde_json::from_str(&json).unwrap();
    assert_eq!(response, back);
}

#[test]
fn session_detail_defaults_missing_conclusion() {
    let json = r#"{
        "session_id": "s-2",
        "created_at": "2025-06-01T08:00:00Z",
        "updated_at": "2025-06-01T09:00:00Z",
        "file_name": "yield.csv",
        "first_query": "整体情况如何？",
        "methods_used": [],
        "message_count": 2,
        "messages": [],
        "data_summary": {
            "rows": 10,
            "columns": 1,
            "column_names": ["yield"],
            "column_types": {"yield": "numeric"}
        }
    }"#;
    let detail: SessionDetail = serde_json::from_str(json).unwrap();
    assert_eq!(detail.report_conclusion, None);
    assert_eq!(detail.industry, None);
}

// =============================================================
// Request bodies
// =============================================================

#[test]
fn chat_request_omits_absent_optionals() {
    let request =
        ChatRequest { session_id: None, message: "你好".to_owned(), file: None, industry: None };
    let out = serde_json::to_value(&request).unwrap();
    assert_eq!(out, serde_json::json!({"message": "你好"}));
}

#[test]
fn chat_request_keeps_session_and_industry() {
    let request = ChatRequest {
        session_id: Some("s-1".to_owned()),
        message: "继续".to_owned(),
        file: None,
        industry: Some(Industry::Finance),
    };
    let out = serde_json::to_value(&request).unwrap();
    assert_eq!(out["session_id"], "s-1");
    assert_eq!(out["industry"], "finance");
}

#[test]
fn conclusion_analysis_serializes_null_p_value() {
    let analysis = ConclusionAnalysis {
        x_variable: None,
        y_variable: Some("yield".to_owned()),
        method: "spc".to_owned(),
        method_name: "SPC IX-MR 控制图".to_owned(),
        p_value: None,
        significant: true,
        effect_size: serde_json::json!({"type": "cohens_d", "value": 0.0, "level": "small"}),
        interpretation: "过程失控。".to_owned(),
        suggestions: vec![],
    };
    let out = serde_json::to_value(&analysis).unwrap();
    assert_eq!(out["p_value"], serde_json::Value::Null);
    assert!(out.get("x_variable").is_none());
    assert_eq!(out["y_variable"], "yield");
}

// =============================================================
// Config defaults
// =============================================================

#[test]
fn model_config_default_matches_backend_defaults() {
    let config = ModelConfig::default();
    assert_eq!(config.provider, ModelProvider::Zhipu);
    assert_eq!(config.base_url.as_deref(), Some("https://open.bigmodel.cn/api/paas/v4"));
    assert_eq!(config.model, "GLM-4.7");
    assert!((config.temperature - 0.7).abs() < f64::EPSILON);
    assert_eq!(config.max_tokens, 4096);
    assert!((config.top_p - 1.0).abs() < f64::EPSILON);
}

#[test]
fn prompt_templates_default_is_populated() {
    let templates = PromptTemplates::default();
    assert!(templates.intent.contains("统计分析助手"));
    assert!(!templates.planning.is_empty());
    assert!(!templates.interpret.is_empty());
}

#[test]
fn model_config_round_trip() {
    let config = ModelConfig {
        provider: ModelProvider::Custom,
        api_key: "sk-test".to_owned(),
        base_url: Some("https://example.com/v1".to_owned()),
        model: "my-model".to_owned(),
        temperature: 0.2,
        max_tokens: 1024,
        top_p: 0.9,
    };
    let json = serde_json::to_string(&config).unwrap();
    let back: ModelConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(config, back);
}
