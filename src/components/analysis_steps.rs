//! Six-step walkthrough of one hypothesis-testing result.
//!
//! Renders the backend's analysis as an accordion: data identification,
//! prerequisite checks, method selection, the computed statistics, effect
//! size, and the conclusion with charts and follow-up suggestions. All
//! sections start expanded; headers toggle them independently.

#[cfg(test)]
#[path = "analysis_steps_test.rs"]
mod analysis_steps_test;

use leptos::prelude::*;

use crate::components::chart_view::ChartView;
use crate::components::effect_size_bar::EffectSizeBar;
use crate::components::method_badge::MethodBadge;
use crate::components::stat_card::{StatCard, StatKind};
use crate::components::suggestions::Suggestions;
use crate::net::types::{AnalysisResult, DataSummary};
use crate::util::format::format_p_value;

const STEP_COUNT: usize = 6;

const STEP_TITLES: [&str; STEP_COUNT] = [
    "数据识别",
    "前提条件校验",
    "方法选择",
    "统计计算",
    "效应量分析",
    "结论与建议",
];

const STEP_ICONS: [&str; STEP_COUNT] = ["📊", "✅", "🔀", "🧮", "📏", "💡"];

/// Prerequisite lines for step 2, derived from the method family.
pub fn method_prerequisites(method: &str, rows: u64) -> Vec<String> {
    const NORMAL_METHODS: [&str; 4] = ["t_test", "paired_t_test", "anova", "pearson"];
    let mut prerequisites = vec![format!("样本量: {rows} 行")];
    if NORMAL_METHODS.iter().any(|m| method.contains(m)) {
        prerequisites.push("前提假设: 数据近似正态分布".to_owned());
        prerequisites.push("检验方式: 参数检验".to_owned());
    } else {
        prerequisites.push("前提假设: 无分布假设要求".to_owned());
        prerequisites.push("检验方式: 非参数检验".to_owned());
    }
    prerequisites
}

/// Decision path shown in step 3. Unknown methods fall back to a generic
/// line built from the display name.
pub fn decision_path(method: &str, method_name: &str) -> String {
    let path = match method {
        "t_test" => "两组独立样本 → 连续变量 → 正态分布 → 独立样本 t 检验",
        "paired_t_test" => "配对样本 → 连续变量 → 正态分布 → 配对 t 检验",
        "anova" => "多组比较 → 连续变量 → 正态分布 → 单因素方差分析",
        "chi_square" => "分类变量 → 频率数据 → 卡方检验",
        "pearson" => "两个连续变量 → 正态分布 → Pearson 相关分析",
        "spearman" => "两个变量 → 非正态/有序 → Spearman 秩相关",
        "mann_whitney" => "两组独立样本 → 非正态分布 → Mann-Whitney U 检验",
        "wilcoxon" => "配对样本 → 非正态分布 → Wilcoxon 符号秩检验",
        "kruskal_wallis" => "多组比较 → 非正态分布 → Kruskal-Wallis 检验",
        "linear_regression" => "预测关系 → 连续因变量 → 线性回归分析",
        _ => return format!("根据数据特征选择 → {method_name}"),
    };
    path.to_owned()
}

/// Statistical conclusion sentence for step 6, fixed at α = 0.05.
pub fn conclusion_line(p_value: Option<f64>, significant: bool) -> String {
    let formatted = format_p_value(p_value);
    if significant {
        format!("p = {formatted}，差异具有统计学显著性（α = 0.05）。")
    } else {
        format!("p = {formatted}，差异不具有统计学显著性（α = 0.05）。")
    }
}

/// Accordion of the six analysis steps for one result.
#[component]
pub fn AnalysisSteps(
    result: AnalysisResult,
    #[prop(optional_no_strip)] data_summary: Option<DataSummary>,
    #[prop(optional_no_strip)] on_suggestion: Option<Callback<String>>,
) -> impl IntoView {
    let expanded = RwSignal::new([true; STEP_COUNT]);

    let overview = {
        let summary = data_summary.clone();
        let method_name = result.method_name.clone();
        view! {
            <div>
                {summary
                    .map(|summary| {
                        let chips = summary
                            .column_names
                            .iter()
                            .map(|col| {
                                let column_type = summary
                                    .column_types
                                    .get(col)
                                    .cloned()
                                    .unwrap_or_else(|| "未知".to_owned());
                                view! {
                                    <span class="analysis-steps__chip">
                                        {format!("{col} ({column_type})")}
                                    </span>
                                }
                            })
                            .collect::<Vec<_>>();
                        view! {
                            <p class="analysis-steps__line">
                                <strong class="analysis-steps__key">"变量数:"</strong>
                                {format!(" {} 列", summary.columns)}
                            </p>
                            <p class="analysis-steps__line">
                                <strong class="analysis-steps__key">"样本量:"</strong>
                                {format!(" {} 行", summary.rows)}
                            </p>
                            <p class="analysis-steps__line">
                                <strong class="analysis-steps__key">"变量列表:"</strong>
                            </p>
                            <div class="analysis-steps__chips">{chips}</div>
                        }
                    })}
                <p class="analysis-steps__line">
                    <strong class="analysis-steps__key">"分析类型:"</strong>
                    {format!(" {method_name}")}
                </p>
            </div>
        }
    };

    let rows = data_summary.as_ref().map_or(0, |summary| summary.rows);
    let checks = view! {
        <div>
            {method_prerequisites(&result.method, rows)
                .into_iter()
                .map(|line| {
                    view! {
                        <p class="analysis-steps__check">
                            <span class="analysis-steps__check-icon">"✓"</span>
                            {line}
                        </p>
                    }
                })
                .collect::<Vec<_>>()}
        </div>
    };

    let selection = {
        let path = decision_path(&result.method, &result.method_name);
        let method_name = result.method_name.clone();
        view! {
            <div>
                <MethodBadge method_name=method_name/>
                <p class="analysis-steps__caption">
                    <strong class="analysis-steps__key">"决策路径:"</strong>
                </p>
                <p class="analysis-steps__path">{path}</p>
            </div>
        }
    };

    let calculation = view! {
        <div class="analysis-steps__cards">
            <StatCard
                title="p 值"
                value=format_p_value(result.p_value)
                kind=StatKind::PValue
                significant=result.significant
            />
            <StatCard
                title="显著性"
                value=(if result.significant { "显著" } else { "不显著" }).to_owned()
                kind=StatKind::Significance
                significant=result.significant
            />
        </div>
    };

    let effect = match result.effect_size {
        Some(effect_size) => view! { <EffectSizeBar effect_size=effect_size/> }.into_any(),
        None => view! { <p class="analysis-steps__placeholder">"该方法未提供效应量"</p> }.into_any(),
    };

    let conclusion = {
        let line = conclusion_line(result.p_value, result.significant);
        let interpretation = result.interpretation.clone();
        let charts = result
            .visualizations
            .iter()
            .cloned()
            .map(|config| view! { <ChartView config=config/> })
            .collect::<Vec<_>>();
        let suggestions = result.suggestions.clone();
        view! {
            <div>
                <p class="analysis-steps__caption">"统计结论"</p>
                <p class="analysis-steps__text">{line}</p>
                <hr class="analysis-steps__divider"/>
                <p class="analysis-steps__caption">"业务解读"</p>
                <p class="analysis-steps__text">{interpretation}</p>
                <div class="analysis-steps__charts">{charts}</div>
                <Suggestions suggestions=suggestions on_select=on_suggestion/>
            </div>
        }
    };

    view! {
        <div class="analysis-steps">
            {step_section(0, expanded, overview)}
            {step_section(1, expanded, checks)}
            {step_section(2, expanded, selection)}
            {step_section(3, expanded, calculation)}
            {step_section(4, expanded, effect)}
            {step_section(5, expanded, conclusion)}
        </div>
    }
}

fn step_section<Body: IntoView + 'static>(
    index: usize,
    expanded: RwSignal<[bool; STEP_COUNT]>,
    body: Body,
) -> impl IntoView {
    view! {
        <section class="analysis-steps__step">
            <button
                class="analysis-steps__summary"
                on:click=move |_| expanded.update(|open| open[index] = !open[index])
            >
                <span class="analysis-steps__icon">{STEP_ICONS[index]}</span>
                <span class="analysis-steps__heading">
                    {format!("步骤 {}: {}", index + 1, STEP_TITLES[index])}
                </span>
                <span class="analysis-steps__done">"✓"</span>
                <span class="analysis-steps__chevron">
                    {move || if expanded.get()[index] { "▾" } else { "▸" }}
                </span>
            </button>
            <div
                class="analysis-steps__body"
                style:display=move || if expanded.get()[index] { "block" } else { "none" }
            >
                {body}
            </div>
        </section>
    }
}
