//! # Meridian Analytics Engine
//!
//! This crate is the statistics engine: a library of stateless pure
//! functions that turn canonical return series into risk-adjusted
//! performance metrics, drawdown analysis, and tabular report output.
//!
//! ## Architectural Principles
//!
//! - **Layer 2 Logic:** Pure computation over `core-types` series, using
//!   the `series` crate for the transforms some metrics are defined in
//!   terms of (growth curves, resampling, excess returns). No I/O, no
//!   shared state, no knowledge of where data came from.
//! - **NaN over exceptions:** A scalar metric that cannot be computed
//!   (too few observations, zero variance, out-of-domain input) yields
//!   NaN, never an error. Report assembly relies on this: every row is
//!   computed independently and one NaN never blocks the rest.
//! - **Explicit annualization:** Every metric that annualizes takes a
//!   `periods` parameter. `DAYS_PER_YEAR` and `TRADING_DAYS` are exported
//!   for the two common conventions; nothing reads a hidden global.
//!
//! ## Public API
//!
//! - `stats`: scalar metrics (growth, risk, risk-adjusted, tail, streak,
//!   distribution shape).
//! - `drawdown`: drawdown curve, max drawdown, and episode details.
//! - `rolling`: windowed metrics with strict NaN warm-up.
//! - `relative`: benchmark-relative metrics over pre-aligned pairs.
//! - `monthly`: the (year x month) pivot of compounded returns.
//! - `report`: `MetricsReport`, the named-row metric table.

pub mod constants;
pub mod drawdown;
pub mod error;
pub(crate) mod math;
pub mod monthly;
pub mod relative;
pub mod report;
pub mod rolling;
pub mod stats;

// Re-export the key components to create a clean, public-facing API.
pub use constants::{DAYS_PER_YEAR, MEAN_YEAR_DAYS, TRADING_DAYS};
pub use drawdown::{drawdown_details, max_drawdown, to_drawdown_series};
pub use error::AnalyticsError;
pub use monthly::{monthly_returns, MonthlyRow};
pub use relative::{correlation, greeks, information_ratio, r_squared, treynor_ratio, Greeks};
pub use report::{MetricRow, MetricsReport, ReportConfig};
