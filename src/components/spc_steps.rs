//! Five-step walkthrough of one control-chart result.
//!
//! The step content is derived client side from the first visualization's
//! control-chart payload: anomaly counts, violated Western Electric rules,
//! and the limit lines. A result without a parsable control chart still
//! renders, with dashes where the numbers would be.

#[cfg(test)]
#[path = "spc_steps_test.rs"]
mod spc_steps_test;

use std::collections::BTreeSet;

use leptos::prelude::*;

use crate::charts::parse::{ChartData, ControlPoint, parse_chart_data};
use crate::components::chart_view::ChartView;
use crate::components::suggestions::Suggestions;
use crate::net::types::{AnalysisResult, DataSummary};

const STEP_COUNT: usize = 5;

const STEP_TITLES: [&str; STEP_COUNT] = [
    "数据识别",
    "图型选择",
    "控制限计算",
    "异常检测",
    "结论与建议",
];

const STEP_ICONS: [&str; STEP_COUNT] = ["📊", "🔀", "🧮", "⚠️", "💡"];

/// Western Electric rule description for step 4.
pub fn rule_description(rule: u8) -> String {
    let text = match rule {
        1 => "1点超出3σ控制限",
        2 => "连续9点落在中心线同侧",
        3 => "连续6点递增或递减",
        4 => "连续14点交替上下",
        5 => "3点中有2点超出2σ",
        6 => "5点中有4点超出1σ",
        7 => "连续15点在1σ范围内",
        8 => "连续8点在1σ范围外",
        _ => return format!("自定义规则 {rule}"),
    };
    text.to_owned()
}

/// Why a chart family fits the data, shown in step 2.
pub fn chart_type_reason(chart_type: &str) -> String {
    let reason = match chart_type {
        "IX-MR" => "单值数据（子组大小=1），适用于个别值与移动极差控制图",
        "Xbar-R" => "子组数据（子组大小2-9），适用于均值-极差控制图",
        "Xbar-S" => "子组数据（子组大小≥10），适用于均值-标准差控制图",
        "P" => "不合格品率数据，适用于 P 控制图",
        "NP" => "不合格品数数据，适用于 NP 控制图",
        "C" => "缺陷数数据（固定检验单位），适用于 C 控制图",
        "U" => "单位缺陷数数据（可变检验单位），适用于 U 控制图",
        _ => return format!("根据数据特征选择 {chart_type} 控制图"),
    };
    reason.to_owned()
}

/// Process status band `(label, color)` from the anomaly count.
pub fn process_status(anomaly_count: usize) -> (&'static str, &'static str) {
    if anomaly_count == 0 {
        ("受控", "#2ecc71")
    } else if anomaly_count <= 2 {
        ("预警", "#f39c12")
    } else {
        ("失控", "#e74c3c")
    }
}

/// Conclusion sentence next to the status chip in step 5.
pub fn status_line(anomaly_count: usize) -> String {
    if anomaly_count == 0 {
        "过程处于统计受控状态，无异常信号。".to_owned()
    } else {
        format!("检测到 {anomaly_count} 个异常点，过程存在特殊原因变异。")
    }
}

/// All rules violated by anomalous points, deduplicated and ascending.
pub fn violated_rules(points: &[ControlPoint]) -> Vec<u8> {
    let mut rules = BTreeSet::new();
    for point in points.iter().filter(|p| p.is_anomaly) {
        rules.extend(point.rule_violated.iter().copied());
    }
    rules.into_iter().collect()
}

/// Estimated process sigma from the limit lines; control charts place UCL
/// three sigma above the center line.
pub fn control_sigma(ucl: Option<f64>, cl: Option<f64>) -> Option<f64> {
    Some((ucl? - cl?) / 3.0)
}

/// Monitored variable name pulled from a chart title like
/// `控制图（IX-MR）— 温度`.
pub fn y_variable_from_title(title: &str) -> String {
    let stripped = match title.rfind('—') {
        Some(pos) => title[pos + '—'.len_utf8()..].trim_start(),
        None => title,
    };
    if stripped.is_empty() {
        "—".to_owned()
    } else {
        stripped.to_owned()
    }
}

/// Accordion of the five control-chart steps for one result.
#[component]
pub fn SpcSteps(
    result: AnalysisResult,
    #[prop(optional_no_strip)] data_summary: Option<DataSummary>,
    #[prop(optional_no_strip)] on_suggestion: Option<Callback<String>>,
) -> impl IntoView {
    let expanded = RwSignal::new([true; STEP_COUNT]);

    let control = result.visualizations.first().and_then(|config| {
        match parse_chart_data(config) {
            Ok(ChartData::Control(data)) => Some(data),
            _ => None,
        }
    });

    let y_variable = result
        .visualizations
        .first()
        .map_or_else(|| "—".to_owned(), |config| y_variable_from_title(&config.title));
    let point_count = control.as_ref().map_or(0, |c| c.points.len());
    let anomaly_count = control
        .as_ref()
        .map_or(0, |c| c.points.iter().filter(|p| p.is_anomaly).count());
    let rules = control.as_ref().map_or_else(Vec::new, |c| violated_rules(&c.points));
    let chart_type = control.as_ref().map_or_else(String::new, |c| c.chart_type.clone());
    let ucl = control.as_ref().map(|c| c.ucl);
    let cl = control.as_ref().map(|c| c.cl);
    let lcl = control.as_ref().map(|c| c.lcl);
    let sigma = control_sigma(ucl, cl);

    let identification = {
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
                    {format!(" {point_count} 个数据点")}
                </p>
                <p class="analysis-steps__line">
                    <strong class="analysis-steps__key">"数据类型:"</strong>
                    " 连续型（计量数据）"
                </p>
                {dataset}
            </div>
        }
    };

    let selection = {
        let label = if chart_type.is_empty() { "未知".to_owned() } else { chart_type.clone() };
        let reason = chart_type_reason(&chart_type);
        view! {
            <div>
                <p class="analysis-steps__line">
                    <span class="spc-steps__type-chip">{label}</span>
                    " 控制图"
                </p>
                <p class="analysis-steps__caption">
                    <strong class="analysis-steps__key">"选型依据:"</strong>
                </p>
                <p class="analysis-steps__path">{reason}</p>
            </div>
        }
    };

    let limits = {
        let cards = [
            ("UCL (上控制限)", ucl, "#e74c3c"),
            ("CL (中心线)", cl, "#2ecc71"),
            ("LCL (下控制限)", lcl, "#e74c3c"),
            ("σ (标准差)", sigma, "#42a5f5"),
        ]
        .into_iter()
        .map(|(label, value, color)| {
            let text = value.map_or_else(|| "—".to_owned(), |v| format!("{v:.2}"));
            view! {
                <div class="spc-steps__limit-card">
                    <span class="spc-steps__limit-label">{label}</span>
                    <span class="spc-steps__limit-value" style:color=color>{text}</span>
                </div>
            }
        })
        .collect::<Vec<_>>();
        view! { <div class="spc-steps__limits">{cards}</div> }
    };

    let detection = {
        let count_chip = format!("{anomaly_count} / {point_count}");
        let rule_rows = if rules.is_empty() {
            view! {
                <p class="analysis-steps__check">
                    <span class="analysis-steps__check-icon">"✓"</span>
                    "未触发任何西联规则，过程数据表现正常"
                </p>
            }
            .into_any()
        } else {
            let rows = rules
                .iter()
                .map(|rule| {
                    view! {
                        <p class="spc-steps__rule">
                            <span class="spc-steps__rule-icon">"⚠"</span>
                            {format!("规则 {}: {}", rule, rule_description(*rule))}
                        </p>
                    }
                })
                .collect::<Vec<_>>();
            view! {
                <div>
                    <p class="analysis-steps__caption">
                        <strong class="analysis-steps__key">"触发的西联规则:"</strong>
                    </p>
                    {rows}
                </div>
            }
            .into_any()
        };
        view! {
            <div>
                <p class="analysis-steps__line">
                    <strong class="analysis-steps__key">"异常点数:"</strong>
                    <span
                        class="spc-steps__count-chip"
                        class:spc-steps__count-chip--anomalous={anomaly_count > 0}
                    >
                        {count_chip}
                    </span>
                </p>
                {rule_rows}
            </div>
        }
    };

    let conclusion = {
        let (status_label, status_color) = process_status(anomaly_count);
        let line = status_line(anomaly_count);
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
                <p class="analysis-steps__caption">"过程状态"</p>
                <p class="analysis-steps__line">
                    <span class="spc-steps__status-chip" style:color=status_color>
                        {status_label}
                    </span>
                    {format!(" {line}")}
                </p>
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
            {step_section(0, expanded, identification)}
            {step_section(1, expanded, selection)}
            {step_section(2, expanded, limits)}
            {step_section(3, expanded, detection)}
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
