//! Five-step walkthrough of one process-capability result.
//!
//! Pulls Cp/Cpk, spec limits and the normality check out of the first
//! visualization's distribution payload and grades the process on the
//! conventional Cpk bands.

#[cfg(test)]
#[path = "capability_steps_test.rs"]
mod capability_steps_test;

use leptos::prelude::*;

use crate::charts::parse::{ChartData, parse_chart_data};
use crate::components::chart_view::ChartView;
use crate::components::spc_steps::y_variable_from_title;
use crate::components::suggestions::Suggestions;
use crate::net::types::{AnalysisResult, DataSummary};

const STEP_COUNT: usize = 5;

const STEP_TITLES: [&str; STEP_COUNT] = [
    "数据识别",
    "正态性检验",
    "指标计算",
    "能力评估",
    "结论与建议",
];

const STEP_ICONS: [&str; STEP_COUNT] = ["📊", "📈", "🧮", "🎯", "💡"];

/// Cpk grade with its display label and accent color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CapabilityRating {
    pub grade: &'static str,
    pub label: &'static str,
    pub color: &'static str,
}

/// Conventional Cpk grading; a missing Cpk cannot be graded.
pub fn capability_rating(cpk: Option<f64>) -> CapabilityRating {
    match cpk {
        None => CapabilityRating { grade: "—", label: "无法评估", color: "#546e7a" },
        Some(v) if v >= 2.0 => CapabilityRating { grade: "A", label: "优秀", color: "#2ecc71" },
        Some(v) if v >= 1.67 => CapabilityRating { grade: "B", label: "良好", color: "#27ae60" },
        Some(v) if v >= 1.33 => CapabilityRating { grade: "C", label: "可接受", color: "#f39c12" },
        Some(v) if v >= 1.0 => {
            CapabilityRating { grade: "D", label: "勉强，需改进", color: "#e67e22" }
        }
        Some(_) => CapabilityRating { grade: "F", label: "不合格，必须改进", color: "#e74c3c" },
    }
}

const GRADE_REFERENCE: [(&str, &str, &str); 5] = [
    ("A", "Cpk ≥ 2.0", "优秀"),
    ("B", "Cpk ≥ 1.67", "良好"),
    ("C", "Cpk ≥ 1.33", "可接受"),
    ("D", "Cpk ≥ 1.0", "勉强"),
    ("F", "Cpk < 1.0", "不合格"),
];

/// Spec-limit summary line for step 1; absent limits render as dashes.
pub fn spec_limits_line(usl: Option<f64>, lsl: Option<f64>) -> String {
    format!(
        "USL = {}, LSL = {}",
        optional_number(usl, 2),
        optional_number(lsl, 2)
    )
}

fn optional_number(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| "—".to_owned(), |v| format!("{v:.decimals$}"))
}

/// Accordion of the five capability steps for one result.
#[component]
pub fn CapabilitySteps(
    result: AnalysisResult,
    #[prop(optional_no_strip)] data_summary: Option<DataSummary>,
    #[prop(optional_no_strip)] on_suggestion: Option<Callback<String>>,
) -> impl IntoView {
    let expanded = RwSignal::new([true; STEP_COUNT]);

    let distribution = result.visualizations.first().and_then(|config| {
        match parse_chart_data(config) {
            Ok(ChartData::Distribution(data)) => Some(data),
            _ => None,
        }
    });
    let capability = distribution.as_ref().and_then(|d| d.capability.clone());

    let usl = distribution.as_ref().and_then(|d| d.usl);
    let lsl = distribution.as_ref().and_then(|d| d.lsl);
    let mean = distribution.as_ref().and_then(|d| d.mean);
    let cp = capability.as_ref().and_then(|c| c.cp);
    let cpk = capability.as_ref().and_then(|c| c.cpk);
    let pp = capability.as_ref().and_then(|c| c.pp);
    let ppk = capability.as_ref().and_then(|c| c.ppk);
    let std_dev = capability.as_ref().and_then(|c| c.std_dev);
    let sample_size = capability.as_ref().and_then(|c| c.sample_size);
    let ppm = capability.as_ref().and_then(|c| c.ppm);
    let normality = capability.as_ref().and_then(|c| c.normality.clone());

    let identification = {
        let y_variable = result
            .visualizations
            .first()
            .map_or_else(|| "—".to_owned(), |config| y_variable_from_title(&config.title));
        let samples =
            sample_size.map_or_else(|| "—".to_owned(), |n| n.to_string());
        let dataset = data_summary.map(|summary| {
            view! {
                <p class="analysis-steps__line">
                    <strong class="analysis-steps__key">"原始数据集:"</strong>
                    {format!(" {} 行 x {} 列", summary.rows, summary.columns)}
                </p>
            }
        });
        view! {
            <div>
                <p class="analysis-steps__line">
                    <strong class="analysis-steps__key">"Y 变量:"</strong>
                    {format!(" {y_variable}")}
                </p>
                <p class="analysis-steps__line">
                    <strong class="analysis-steps__key">"样本量:"</strong>
                    {format!(" {samples} 个数据点")}
                </p>
                <p class="analysis-steps__line">
                    <strong class="analysis-steps__key">"均值 (μ):"</strong>
                    {format!(" {}", optional_number(mean, 4))}
                </p>
                <p class="analysis-steps__line">
                    <strong class="analysis-steps__key">"标准差 (σ):"</strong>
                    {format!(" {}", optional_number(std_dev, 4))}
                </p>
                <p class="analysis-steps__line">
                    <strong class="analysis-steps__key">"规格限:"</strong>
                    {format!(" {}", spec_limits_line(usl, lsl))}
                </p>
                {dataset}
            </div>
        }
    };

    let normality_check = {
        let method = normality
            .as_ref()
            .map_or_else(|| "Shapiro-Wilk".to_owned(), |t| t.method.clone());
        let p_value = normality.as_ref().and_then(|t| t.p_value);
        let is_normal = normality.as_ref().is_some_and(|t| t.is_normal);
        let verdict = if is_normal { "服从正态分布" } else { "不服从正态分布" };
        let note = if is_normal {
            "(p > 0.05, 数据符合正态假设，Cp/Cpk 有效)"
        } else {
            "(p ≤ 0.05, 数据可能不服从正态分布，结果仅供参考)"
        };
        view! {
            <div>
                <p class="analysis-steps__line">
                    <strong class="analysis-steps__key">"检验方法:"</strong>
                    {format!(" {method}")}
                </p>
                <p class="analysis-steps__line">
                    <strong class="analysis-steps__key">"p 值:"</strong>
                    {format!(" {}", optional_number(p_value, 4))}
                </p>
                <p class="analysis-steps__line">
                    <span
                        class="capability-steps__verdict-chip"
                        class:capability-steps__verdict-chip--normal=is_normal
                    >
                        {verdict}
                    </span>
                    <span class="analysis-steps__caption">{format!(" {note}")}</span>
                </p>
            </div>
        }
    };

    let indices = {
        let cards = [
            ("Cp（潜在能力）", cp, "#42a5f5"),
            ("Cpk（实际能力）", cpk, "#00e676"),
            ("Pp（长期潜在）", pp, "#ab47bc"),
            ("Ppk（长期实际）", ppk, "#ffab40"),
        ]
        .into_iter()
        .map(|(label, value, color)| {
            view! {
                <div class="spc-steps__limit-card">
                    <span class="spc-steps__limit-label">{label}</span>
                    <span class="spc-steps__limit-value" style:color=color>
                        {optional_number(value, 3)}
                    </span>
                </div>
            }
        })
        .collect::<Vec<_>>();
        view! { <div class="spc-steps__limits">{cards}</div> }
    };

    let assessment = {
        let rating = capability_rating(cpk);
        let ppm_line = ppm.map(|ppm| {
            view! {
                <p class="analysis-steps__line">
                    <strong class="analysis-steps__key">"预估不良率 (PPM):"</strong>
                    {format!(" {ppm:.1} PPM（百万分之 {ppm:.1}）")}
                </p>
            }
        });
        let reference = GRADE_REFERENCE
            .into_iter()
            .map(|(grade, range, label)| {
                let current = cpk.is_some() && rating.grade == grade;
                let marker = if current { " ◀ 当前" } else { "" };
                view! {
                    <p
                        class="capability-steps__grade-row"
                        class:capability-steps__grade-row--current=current
                    >
                        {format!("{grade}: {range} — {label}{marker}")}
                    </p>
                }
            })
            .collect::<Vec<_>>();
        view! {
            <div>
                <p class="capability-steps__rating">
                    <span
                        class="capability-steps__grade-badge"
                        style:color=rating.color
                        style:border-color=rating.color
                    >
                        {rating.grade}
                    </span>
                    <span class="capability-steps__rating-label" style:color=rating.color>
                        {rating.label}
                    </span>
                </p>
                {ppm_line}
                <hr class="analysis-steps__divider"/>
                <p class="analysis-steps__caption">"能力等级参考:"</p>
                {reference}
            </div>
        }
    };

    let conclusion = {
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
                <p class="analysis-steps__caption">"业务解读"</p>
                <p class="analysis-steps__text">{interpretation}</p>
                <div class="analysis-steps__charts">{charts}</div>
                <Suggestions suggestions=suggestions on_select=on_suggestion/>
            </div>
        }
    };

    view! {
        <div class="analysis-steps">
            {step_section(0, expanded, identification)}
            {step_section(1, expanded, normality_check)}
            {step_section(2, expanded, indices)}
            {step_section(3, expanded, assessment)}
            {step_section(4, expanded, conclusion)}
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
