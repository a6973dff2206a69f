//! Benchmark-relative metrics.
//!
//! All functions here expect a strategy and benchmark that share an index
//! already (see `series::align`); they do not re-align. A length mismatch
//! is a caller error and surfaces as NaN like every other unusable sample.

use core_types::Series;
use serde::{Deserialize, Serialize};
use series::comp;

use crate::math;

/// Regression coefficients of the strategy against its benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    /// Annualized excess return not explained by benchmark exposure.
    pub alpha: f64,
    /// Sensitivity to benchmark moves.
    pub beta: f64,
}

/// Beta from sample covariance and annualized alpha.
pub fn greeks(returns: &Series, benchmark: &Series, periods: f64) -> Greeks {
    let cov = math::covariance(returns.values(), benchmark.values());
    let bench_sd = math::stdev(benchmark.values(), 1);
    let beta = if bench_sd > 0.0 {
        cov / (bench_sd * bench_sd)
    } else {
        f64::NAN
    };
    let alpha = (math::mean(returns.values()) - beta * math::mean(benchmark.values())) * periods;
    Greeks { alpha, beta }
}

/// Pearson correlation between strategy and benchmark returns.
pub fn correlation(returns: &Series, benchmark: &Series) -> f64 {
    math::pearson(returns.values(), benchmark.values())
}

/// Share of strategy variance explained by the benchmark.
pub fn r_squared(returns: &Series, benchmark: &Series) -> f64 {
    let corr = correlation(returns, benchmark);
    corr * corr
}

/// Mean active return over its tracking error, per period.
pub fn information_ratio(returns: &Series, benchmark: &Series) -> f64 {
    if returns.len() != benchmark.len() {
        return f64::NAN;
    }
    let diff: Vec<f64> = returns
        .values()
        .iter()
        .zip(benchmark.values())
        .map(|(r, b)| r - b)
        .collect();
    let sd = math::stdev(&diff, 1);
    if !(sd > 0.0) {
        return f64::NAN;
    }
    math::mean(&diff) / sd
}

/// Excess compounded return per unit of benchmark exposure.
pub fn treynor_ratio(returns: &Series, benchmark: &Series, rf: f64) -> f64 {
    let beta = greeks(returns, benchmark, 1.0).beta;
    if !(beta != 0.0) || beta.is_nan() {
        return f64::NAN;
    }
    (comp(returns) - rf) / beta
}
