//! # Meridian
//!
//! Performance and risk statistics for financial return series: a
//! normalization layer that turns arbitrary price/return input into
//! canonical, aligned, gap-free series, and a metrics engine of stateless
//! pure functions over them (Sharpe, Sortino, drawdown analysis,
//! value-at-risk, CAGR, rolling volatility, monthly aggregation, and the
//! rest of the tearsheet panel).
//!
//! The workspace splits along its layers:
//!
//! - [`core_types`]: the `Series` container and shared enums/records.
//! - [`series`]: the normalization layer (classification, compounding
//!   transforms, alignment, resampling).
//! - [`analytics`]: the metrics library and report assembly.
//!
//! Rendering, plotting, and data loading are intentionally absent; this is
//! the engine those layers call into.

pub use analytics;
pub use core_types;
pub use series;

// The most common entry points, re-exported flat for callers that do not
// care about the layering.
pub use analytics::{MetricRow, MetricsReport, ReportConfig};
pub use core_types::{DataKind, DrawdownEpisode, OutlierTail, Period, Series};
