//! Typed views over the `data` payload carried by each `ChartConfig`.
//!
//! ARCHITECTURE
//! ============
//! The backend ships chart data as free-form JSON. Every chart kind has a
//! small closed set of accepted shapes (current wire format plus the legacy
//! pre-aggregated one where the backend used to emit it), and anything else
//! is a hard parse error rather than a silently empty chart.

use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;
use serde_json::Value;

use crate::net::types::{ChartConfig, ChartKind};

// ============================================================================
// Parsed shapes
// ============================================================================

/// A `ChartConfig.data` payload decoded into its kind-specific shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartData {
    /// Point series, shared by scatter and residual plots.
    Scatter(ScatterData),
    Box(BoxData),
    Bar(BarData),
    Distribution(DistributionData),
    Control(ControlChartData),
}

/// Numeric point series.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterData {
    pub points: Vec<[f64; 2]>,
}

/// Box chart payload, either raw per-group samples or pre-computed
/// five-number summaries.
#[derive(Debug, Clone, PartialEq)]
pub enum BoxData {
    /// Raw observations per group; quantiles are computed client side.
    Raw {
        groups: Vec<String>,
        values: Vec<Vec<f64>>,
    },
    /// Legacy payload with `[min, q1, median, q3, max]` per category.
    Stats {
        categories: Vec<String>,
        values: Vec<[f64; 5]>,
    },
}

/// Bar chart payload.
#[derive(Debug, Clone, PartialEq)]
pub enum BarData {
    /// Grouped counts from a crosstab, rendered as stacked series.
    Crosstab(CrosstabBars),
    /// Plain category/value pairs.
    Simple {
        categories: Vec<String>,
        values: Vec<f64>,
    },
}

/// Crosstab counts unpacked into aligned per-column series.
#[derive(Debug, Clone, PartialEq)]
pub struct CrosstabBars {
    /// Row labels along the x axis.
    pub categories: Vec<String>,
    /// One `(column label, counts aligned to categories)` entry per column.
    pub series: Vec<(String, Vec<f64>)>,
}

/// Histogram payload with optional fitted curve, spec limits and process
/// capability statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionData {
    pub bins: DistributionBins,
    pub counts: Vec<f64>,
    pub normal_curve: Option<NormalCurve>,
    /// Upper specification limit marker.
    pub usl: Option<f64>,
    /// Lower specification limit marker.
    pub lsl: Option<f64>,
    pub mean: Option<f64>,
    pub capability: Option<CapabilityStats>,
}

/// Histogram bins, kept numeric when the backend sent edge pairs.
#[derive(Debug, Clone, PartialEq)]
pub enum DistributionBins {
    /// `(low, high)` edge pairs; labels and curve coordinates derive from
    /// these.
    Edges(Vec<(f64, f64)>),
    /// Pre-rendered labels; no numeric axis is available.
    Labels(Vec<String>),
}

/// Fitted density curve sampled along the x axis.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NormalCurve {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// Process capability figures attached to a distribution payload.
#[derive(Debug, Clone, PartialEq)]
pub struct CapabilityStats {
    pub cp: Option<f64>,
    pub cpk: Option<f64>,
    pub pp: Option<f64>,
    pub ppk: Option<f64>,
    pub std_dev: Option<f64>,
    pub sample_size: Option<u64>,
    /// Defects per million opportunities estimate.
    pub ppm: Option<f64>,
    pub normality: Option<NormalityTest>,
}

/// Normality check reported alongside capability indices.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NormalityTest {
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub p_value: Option<f64>,
    #[serde(default)]
    pub is_normal: bool,
}

/// Control chart payload with its three limit lines.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ControlChartData {
    pub points: Vec<ControlPoint>,
    pub ucl: f64,
    pub cl: f64,
    pub lcl: f64,
    /// Chart family label, e.g. `IX-MR` or `Xbar-R`.
    #[serde(default)]
    pub chart_type: String,
}

/// One sampled point on a control chart.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ControlPoint {
    /// One-based sample index.
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub is_anomaly: bool,
    /// Western Electric rule numbers this point violates.
    #[serde(default)]
    pub rule_violated: Vec<u8>,
}

// ============================================================================
// Wire payloads
// ============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum ScatterPayload {
    Wrapped { points: Vec<[f64; 2]> },
    Bare(Vec<[f64; 2]>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BoxPayload {
    Raw {
        groups: Vec<String>,
        values: Vec<Vec<f64>>,
    },
    Stats {
        categories: Vec<String>,
        values: Vec<[f64; 5]>,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BarPayload {
    Crosstab {
        table: BTreeMap<String, BTreeMap<String, f64>>,
    },
    Simple {
        categories: Vec<String>,
        values: Vec<f64>,
    },
}

#[derive(Deserialize)]
struct DistributionPayload {
    bins: Vec<RawBin>,
    counts: Vec<f64>,
    #[serde(default)]
    normal_curve: Option<NormalCurve>,
    #[serde(default)]
    usl: Option<f64>,
    #[serde(default)]
    lsl: Option<f64>,
    #[serde(default)]
    mean: Option<f64>,
    #[serde(default)]
    cp: Option<f64>,
    #[serde(default)]
    cpk: Option<f64>,
    #[serde(default)]
    pp: Option<f64>,
    #[serde(default)]
    ppk: Option<f64>,
    #[serde(default)]
    std_dev: Option<f64>,
    #[serde(default)]
    sample_size: Option<u64>,
    #[serde(default)]
    ppm: Option<f64>,
    #[serde(default)]
    normality_test: Option<NormalityTest>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBin {
    Edges([f64; 2]),
    Label(String),
    Number(f64),
}

// ============================================================================
// Parsing
// ============================================================================

/// Decodes `config.data` into the shape its chart kind expects.
///
/// Unknown or malformed payloads are an error; the chart area surfaces the
/// message instead of rendering an empty frame.
pub fn parse_chart_data(config: &ChartConfig) -> Result<ChartData, String> {
    match config.kind {
        ChartKind::Scatter | ChartKind::Residual => {
            parse_scatter(&config.data).map(ChartData::Scatter)
        }
        ChartKind::Box => parse_box(&config.data).map(ChartData::Box),
        ChartKind::Bar => parse_bar(&config.data).map(ChartData::Bar),
        ChartKind::Distribution => parse_distribution(&config.data).map(ChartData::Distribution),
        ChartKind::ControlChart => parse_control(&config.data).map(ChartData::Control),
    }
}

fn parse_scatter(data: &Value) -> Result<ScatterData, String> {
    let payload: ScatterPayload = decode(data, "散点图")?;
    let points = match payload {
        ScatterPayload::Wrapped { points } | ScatterPayload::Bare(points) => points,
    };
    Ok(ScatterData { points })
}

fn parse_box(data: &Value) -> Result<BoxData, String> {
    let payload: BoxPayload = decode(data, "箱线图")?;
    Ok(match payload {
        BoxPayload::Raw { groups, values } => {
            if groups.len() != values.len() {
                return Err("箱线图数据无效: groups 与 values 长度不一致".to_owned());
            }
            BoxData::Raw { groups, values }
        }
        BoxPayload::Stats { categories, values } => {
            if categories.len() != values.len() {
                return Err("箱线图数据无效: categories 与 values 长度不一致".to_owned());
            }
            BoxData::Stats { categories, values }
        }
    })
}

fn parse_bar(data: &Value) -> Result<BarData, String> {
    let payload: BarPayload = decode(data, "柱状图")?;
    Ok(match payload {
        BarPayload::Crosstab { table } => BarData::Crosstab(unpack_crosstab(&table)),
        BarPayload::Simple { categories, values } => {
            if categories.len() != values.len() {
                return Err("柱状图数据无效: categories 与 values 长度不一致".to_owned());
            }
            BarData::Simple { categories, values }
        }
    })
}

/// Aligns a `column -> row -> count` table onto a shared category axis,
/// filling absent cells with zero. Categories and series follow the sorted
/// key order, so the result is stable for a given table.
fn unpack_crosstab(table: &BTreeMap<String, BTreeMap<String, f64>>) -> CrosstabBars {
    let categories: Vec<String> = table
        .values()
        .flat_map(|rows| rows.keys().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let series = table
        .iter()
        .map(|(column, rows)| {
            let counts = categories
                .iter()
                .map(|category| rows.get(category).copied().unwrap_or(0.0))
                .collect();
            (column.clone(), counts)
        })
        .collect();

    CrosstabBars { categories, series }
}

fn parse_distribution(data: &Value) -> Result<DistributionData, String> {
    let payload: DistributionPayload = decode(data, "分布图")?;
    if payload.bins.len() != payload.counts.len() {
        return Err("分布图数据无效: bins 与 counts 长度不一致".to_owned());
    }

    let all_edges: Option<Vec<(f64, f64)>> = payload
        .bins
        .iter()
        .map(|bin| match bin {
            RawBin::Edges([lo, hi]) => Some((*lo, *hi)),
            RawBin::Label(_) | RawBin::Number(_) => None,
        })
        .collect();
    let bins = match all_edges {
        Some(edges) => DistributionBins::Edges(edges),
        None => DistributionBins::Labels(
            payload
                .bins
                .iter()
                .map(|bin| match bin {
                    RawBin::Edges([lo, hi]) => format!("{lo}-{hi}"),
                    RawBin::Label(label) => label.clone(),
                    RawBin::Number(value) => format!("{value}"),
                })
                .collect(),
        ),
    };

    let has_capability = payload.cp.is_some() || payload.cpk.is_some();
    let capability = has_capability.then(|| CapabilityStats {
        cp: payload.cp,
        cpk: payload.cpk,
        pp: payload.pp,
        ppk: payload.ppk,
        std_dev: payload.std_dev,
        sample_size: payload.sample_size,
        ppm: payload.ppm,
        normality: payload.normality_test,
    });

    Ok(DistributionData {
        bins,
        counts: payload.counts,
        normal_curve: payload.normal_curve,
        usl: payload.usl,
        lsl: payload.lsl,
        mean: payload.mean,
        capability,
    })
}

fn parse_control(data: &Value) -> Result<ControlChartData, String> {
    decode(data, "控制图")
}

fn decode<T: for<'de> Deserialize<'de>>(data: &Value, label: &str) -> Result<T, String> {
    serde_json::from_value(data.clone()).map_err(|e| format!("{label}数据无效: {e}"))
}

impl DistributionBins {
    /// Axis labels for the bins; edge pairs render as `low-high`.
    pub fn labels(&self) -> Vec<String> {
        match self {
            Self::Edges(edges) => edges.iter().map(|(lo, hi)| format!("{lo}-{hi}")).collect(),
            Self::Labels(labels) => labels.clone(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Edges(edges) => edges.len(),
            Self::Labels(labels) => labels.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Full numeric span `(first low, last high)` when edges are known.
    pub fn span(&self) -> Option<(f64, f64)> {
        match self {
            Self::Edges(edges) => {
                let (first, _) = edges.first()?;
                let (_, last) = edges.last()?;
                Some((*first, *last))
            }
            Self::Labels(_) => None,
        }
    }
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod parse_test;
