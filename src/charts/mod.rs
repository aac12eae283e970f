//! Chart payload parsing and declarative chart-option construction.
//!
//! ARCHITECTURE
//! ============
//! `parse` turns raw backend payloads into closed per-kind shapes, `stats`
//! holds the numeric helpers (boxplot quantiles, density rescale), and
//! `options` builds the final ECharts option objects. Everything here is
//! pure; the `ChartView` component owns the browser side.

pub mod options;
pub mod parse;
pub mod stats;
