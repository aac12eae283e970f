//! ECharts option construction.
//!
//! ARCHITECTURE
//! ============
//! Options are plain JSON values handed to `echarts.setOption` through the
//! interop layer, so everything here must serialize; tooltips that need
//! per-point text carry it in the datum `name` and use the `{b}` formatter
//! instead of a callback.

use serde_json::{Map, Value, json};

use crate::net::types::{ChartConfig, ChartKind};
use crate::util::format::format_number;

use super::parse::{
    BarData, BoxData, ChartData, ControlChartData, ControlPoint, DistributionData, NormalCurve,
    parse_chart_data,
};
use super::stats;

/// Default render height in pixels; control charts get extra room for the
/// limit lines and legend.
pub fn chart_height(kind: ChartKind) -> u32 {
    match kind {
        ChartKind::ControlChart => 400,
        _ => 300,
    }
}

/// Builds the complete ECharts option for one chart payload.
///
/// Pure function of the config: the same input always yields the same
/// option object.
pub fn build_chart_option(config: &ChartConfig) -> Result<Value, String> {
    Ok(match parse_chart_data(config)? {
        ChartData::Scatter(scatter) => scatter_option(config, &scatter.points),
        ChartData::Box(data) => box_option(&data),
        ChartData::Bar(data) => bar_option(&data),
        ChartData::Distribution(data) => distribution_option(config, &data),
        ChartData::Control(data) => control_option(&data),
    })
}

/// Short Western Electric rule label shown in control chart tooltips.
pub fn rule_description(rule: u8) -> String {
    match rule {
        1 => "1点超出3σ".to_owned(),
        2 => "连续9点同侧".to_owned(),
        3 => "连续6点递增/递减".to_owned(),
        4 => "连续14点交替".to_owned(),
        5 => "3中2超2σ".to_owned(),
        6 => "5中4超1σ".to_owned(),
        7 => "15点在1σ内".to_owned(),
        8 => "8点在1σ外".to_owned(),
        other => format!("规则{other}"),
    }
}

// ============================================================================
// Shared pieces
// ============================================================================

/// Starts from the shared tooltip and grid, then lays `extra` keys over it.
fn with_base(extra: Value) -> Value {
    let mut option = Map::new();
    option.insert("tooltip".to_owned(), json!({"trigger": "item"}));
    option.insert(
        "grid".to_owned(),
        json!({"left": "10%", "right": "10%", "bottom": "15%", "top": "10%"}),
    );
    if let Value::Object(map) = extra {
        for (key, value) in map {
            option.insert(key, value);
        }
    }
    Value::Object(option)
}

fn value_axis(name: Option<&str>) -> Value {
    match name {
        Some(name) => json!({"type": "value", "name": name}),
        None => json!({"type": "value"}),
    }
}

fn category_axis(data: &[String], name: Option<&str>) -> Value {
    match name {
        Some(name) => json!({"type": "category", "data": data, "name": name}),
        None => json!({"type": "category", "data": data}),
    }
}

// ============================================================================
// Per-kind builders
// ============================================================================

fn scatter_option(config: &ChartConfig, points: &[[f64; 2]]) -> Value {
    with_base(json!({
        "xAxis": value_axis(config.x_label.as_deref()),
        "yAxis": value_axis(config.y_label.as_deref()),
        "series": [{
            "type": "scatter",
            "data": points,
            "symbolSize": 8,
        }],
    }))
}

fn box_option(data: &BoxData) -> Value {
    let (categories, summaries): (&[String], Vec<[f64; 5]>) = match data {
        BoxData::Raw { groups, values } => (
            groups,
            values
                .iter()
                .map(|samples| stats::boxplot_stats(samples))
                .collect(),
        ),
        BoxData::Stats { categories, values } => (categories, values.clone()),
    };

    with_base(json!({
        "xAxis": category_axis(categories, None),
        "yAxis": {"type": "value"},
        "series": [{
            "type": "boxplot",
            "data": summaries,
        }],
    }))
}

fn bar_option(data: &BarData) -> Value {
    match data {
        BarData::Crosstab(crosstab) => {
            let series: Vec<Value> = crosstab
                .series
                .iter()
                .map(|(name, counts)| {
                    json!({
                        "name": name,
                        "type": "bar",
                        "stack": "total",
                        "data": counts,
                    })
                })
                .collect();

            with_base(json!({
                "tooltip": {"trigger": "axis"},
                "legend": {"top": 0},
                "xAxis": category_axis(&crosstab.categories, None),
                "yAxis": {"type": "value"},
                "series": series,
            }))
        }
        BarData::Simple { categories, values } => with_base(json!({
            "xAxis": category_axis(categories, None),
            "yAxis": {"type": "value"},
            "series": [{
                "type": "bar",
                "data": values,
                "itemStyle": {"borderRadius": [4, 4, 0, 0]},
            }],
        })),
    }
}

fn distribution_option(config: &ChartConfig, data: &DistributionData) -> Value {
    let mut series = vec![histogram_series(data)];
    if let (Some(curve), Some(span)) = (&data.normal_curve, data.bins.span()) {
        series.push(curve_series(curve, span, data));
    }

    with_base(json!({
        "xAxis": category_axis(&data.bins.labels(), config.x_label.as_deref()),
        "yAxis": value_axis(config.y_label.as_deref()),
        "series": series,
    }))
}

fn histogram_series(data: &DistributionData) -> Value {
    let mut series = json!({
        "type": "bar",
        "data": data.counts,
        "itemStyle": {"borderRadius": [4, 4, 0, 0]},
    });

    // Specification limits and the mean only plot when numeric bin edges
    // give the category axis a coordinate system.
    if let Some(span) = data.bins.span() {
        let bins = data.bins.len();
        let mut marks = Vec::new();
        if let Some(lsl) = data.lsl {
            marks.push(limit_mark("LSL", lsl, span, bins, "#e74c3c", "dashed", 1.5));
        }
        if let Some(usl) = data.usl {
            marks.push(limit_mark("USL", usl, span, bins, "#e74c3c", "dashed", 1.5));
        }
        if let Some(mean) = data.mean {
            marks.push(limit_mark("均值", mean, span, bins, "#2ecc71", "solid", 2.0));
        }
        if !marks.is_empty() {
            series["markLine"] = json!({
                "symbol": "none",
                "data": marks,
            });
        }
    }

    series
}

fn limit_mark(
    label: &str,
    value: f64,
    span: (f64, f64),
    bins: usize,
    color: &str,
    style: &str,
    width: f64,
) -> Value {
    json!({
        "name": label,
        "xAxis": axis_position(value, span, bins),
        "label": {"formatter": label},
        "lineStyle": {"color": color, "type": style, "width": width},
    })
}

fn curve_series(curve: &NormalCurve, span: (f64, f64), data: &DistributionData) -> Value {
    let scaled = stats::rescale_to_counts(&curve.y, &data.counts);
    let bins = data.bins.len();
    let points: Vec<[f64; 2]> = curve
        .x
        .iter()
        .zip(&scaled)
        .map(|(x, y)| [axis_position(*x, span, bins), *y])
        .collect();

    json!({
        "name": "正态拟合",
        "type": "line",
        "smooth": true,
        "showSymbol": false,
        "data": points,
        "lineStyle": {"color": "#f39c12", "width": 2},
        "itemStyle": {"color": "#f39c12"},
        "z": 5,
    })
}

/// Maps a raw x value onto fractional category-axis coordinates, where bin
/// `i` is centered at index `i`.
fn axis_position(value: f64, (lo, hi): (f64, f64), bins: usize) -> f64 {
    if hi <= lo {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let scaled = (value - lo) / (hi - lo) * bins as f64;
    scaled - 0.5
}

fn control_option(data: &ControlChartData) -> Value {
    let line_points: Vec<Value> = data.points.iter().map(control_datum).collect();
    let anomaly_points: Vec<Value> = data
        .points
        .iter()
        .filter(|point| point.is_anomaly)
        .map(control_datum)
        .collect();
    let xs: Vec<f64> = data.points.iter().map(|point| point.x).collect();
    let limit_line = |value: f64| -> Vec<[f64; 2]> { xs.iter().map(|x| [*x, value]).collect() };

    with_base(json!({
        "tooltip": {"trigger": "item", "formatter": "{b}"},
        "legend": {"top": 0, "data": ["数据", "异常点", "UCL", "CL", "LCL"]},
        "xAxis": {"type": "value", "name": "样本序号", "min": 1, "max": data.points.len()},
        "yAxis": {"type": "value", "name": data.chart_type},
        "series": [
            {
                "name": "数据",
                "type": "line",
                "data": line_points,
                "symbol": "circle",
                "symbolSize": 6,
                "lineStyle": {"color": "#3498db"},
                "itemStyle": {"color": "#3498db"},
            },
            {
                "name": "异常点",
                "type": "scatter",
                "data": anomaly_points,
                "symbolSize": 12,
                "itemStyle": {"color": "#e74c3c"},
                "z": 10,
            },
            {
                "name": "UCL",
                "type": "line",
                "data": limit_line(data.ucl),
                "symbol": "none",
                "lineStyle": {"color": "#e74c3c", "type": "dashed", "width": 1.5},
            },
            {
                "name": "CL",
                "type": "line",
                "data": limit_line(data.cl),
                "symbol": "none",
                "lineStyle": {"color": "#2ecc71", "type": "solid", "width": 2},
            },
            {
                "name": "LCL",
                "type": "line",
                "data": limit_line(data.lcl),
                "symbol": "none",
                "lineStyle": {"color": "#e74c3c", "type": "dashed", "width": 1.5},
            },
        ],
    }))
}

fn control_datum(point: &ControlPoint) -> Value {
    json!({"value": [point.x, point.y], "name": point_tip(point)})
}

/// Hover text for one sampled point; rule hits append in red below the
/// value line.
fn point_tip(point: &ControlPoint) -> String {
    let mut tip = format!("#{}: {}", point.x, format_number(point.y, 4));
    if !point.rule_violated.is_empty() {
        let rules = point
            .rule_violated
            .iter()
            .map(|rule| rule_description(*rule))
            .collect::<Vec<_>>()
            .join("、");
        tip.push_str(&format!(
            "<br/><span style=\"color:#e74c3c\">触发: {rules}</span>"
        ));
    }
    tip
}

#[cfg(test)]
#[path = "options_test.rs"]
mod options_test;
