//! Metric-table assembly.
//!
//! The report is the output boundary of the engine: an ordered list of
//! named rows, one value per series, handed to rendering code as-is. Every
//! row is computed independently so a metric that degrades to NaN (thin
//! sample, flat series, no losses) never blocks the rest of the table.

use core_types::{DataKind, Period, Series};
use serde::{Deserialize, Serialize};
use series::{align, comp, prepare_returns};
use tracing::debug;

use crate::constants::DAYS_PER_YEAR;
use crate::drawdown::{drawdown_details, max_drawdown};
use crate::relative;
use crate::stats;

/// Caller-supplied configuration for report assembly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Annual risk-free rate.
    pub rf: f64,
    /// Periods per year used for annualization and rf deannualization.
    pub periods: f64,
    /// Restrict strategy and benchmark to their shared dates.
    pub match_dates: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            rf: 0.0,
            periods: DAYS_PER_YEAR,
            match_dates: true,
        }
    }
}

/// One row of the metric table. `benchmark` is present only when the
/// report was computed against one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRow {
    pub name: String,
    pub strategy: f64,
    pub benchmark: Option<f64>,
}

/// The assembled metric table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    pub rows: Vec<MetricRow>,
}

impl MetricsReport {
    /// Normalizes the inputs, aligns them when a benchmark is present, and
    /// evaluates the metric panel row by row.
    pub fn compute(
        strategy: &Series,
        benchmark: Option<&Series>,
        config: ReportConfig,
    ) -> Result<Self, crate::AnalyticsError> {
        let strategy = prepare_returns(strategy, DataKind::Auto, 0.0, None);
        let benchmark = benchmark.map(|b| prepare_returns(b, DataKind::Auto, 0.0, None));

        let (strategy, benchmark) = match benchmark {
            Some(bench) => {
                let (s, b) = align(&strategy, &bench, config.match_dates)?;
                (s, Some(b))
            }
            None => (strategy, None),
        };
        debug!(
            observations = strategy.len(),
            with_benchmark = benchmark.is_some(),
            "assembling metrics report"
        );

        let mut rows = Vec::new();
        let mut push = |name: &str, metric: &dyn Fn(&Series) -> f64| {
            rows.push(MetricRow {
                name: name.to_string(),
                strategy: metric(&strategy),
                benchmark: benchmark.as_ref().map(|b| metric(b)),
            });
        };

        let rf = config.rf;
        let periods = config.periods;

        push("Cumulative Return", &|r| comp(r));
        push("CAGR%", &|r| stats::cagr(r, rf, true));
        push("Sharpe", &|r| stats::sharpe(r, rf, periods, true, false));
        push("Prob. Sharpe Ratio", &|r| {
            stats::probabilistic_sharpe_ratio(r, rf, periods)
        });
        push("Smart Sharpe", &|r| stats::sharpe(r, rf, periods, true, true));
        push("Sortino", &|r| stats::sortino(r, rf, periods, true, false));
        push("Smart Sortino", &|r| stats::sortino(r, rf, periods, true, true));
        push("Sortino/sqrt(2)", &|r| {
            stats::adjusted_sortino(r, rf, periods, true)
        });
        push("Omega", &|r| stats::omega(r, rf, 0.0, periods));
        push("Max Drawdown", &max_drawdown);
        push("Longest DD Days", &|r| {
            drawdown_details(r)
                .iter()
                .map(|e| e.days)
                .max()
                .map(|d| d as f64)
                .unwrap_or(f64::NAN)
        });
        push("Volatility (ann.)", &|r| stats::volatility(r, periods, true));
        push("Calmar", &stats::calmar);
        push("Skew", &stats::skew);
        push("Kurtosis", &stats::kurtosis);
        push("Expected Daily", &stats::expected_return);
        push("Expected Monthly", &|r| {
            stats::expected_return(&series::aggregate_returns(r, Some(Period::Monthly), true))
        });
        push("Expected Yearly", &|r| {
            stats::expected_return(&series::aggregate_returns(r, Some(Period::Yearly), true))
        });
        push("Kelly Criterion", &stats::kelly_criterion);
        push("Risk of Ruin", &stats::risk_of_ruin);
        push("Daily Value-at-Risk", &|r| stats::value_at_risk(r, 1.0, 0.95));
        push("Expected Shortfall (cVaR)", &|r| {
            stats::conditional_value_at_risk(r, 1.0, 0.95)
        });
        push("Gain/Pain Ratio", &|r| stats::gain_to_pain_ratio(r, rf, None));
        push("Gain/Pain (1M)", &|r| {
            stats::gain_to_pain_ratio(r, rf, Some(Period::Monthly))
        });
        push("Payoff Ratio", &stats::payoff_ratio);
        push("Profit Factor", &stats::profit_factor);
        push("Common Sense Ratio", &stats::common_sense_ratio);
        push("CPC Index", &stats::cpc_index);
        push("Tail Ratio", &|r| stats::tail_ratio(r, 0.95));
        push("Outlier Win Ratio", &|r| stats::outlier_win_ratio(r, 0.99));
        push("Outlier Loss Ratio", &|r| stats::outlier_loss_ratio(r, 0.01));
        push("Ulcer Index", &stats::ulcer_index);
        push("Serenity Index", &|r| stats::serenity_index(r, rf));
        push("Recovery Factor", &stats::recovery_factor);
        push("Win Days %", &stats::win_rate);
        push("Win Month %", &|r| {
            stats::win_rate(&series::aggregate_returns(r, Some(Period::Monthly), true))
        });
        push("Win Quarter %", &|r| {
            stats::win_rate(&series::aggregate_returns(r, Some(Period::Quarterly), true))
        });
        push("Win Year %", &|r| {
            stats::win_rate(&series::aggregate_returns(r, Some(Period::Yearly), true))
        });
        push("Best Day", &|r| stats::best(r, None));
        push("Worst Day", &|r| stats::worst(r, None));
        push("Best Month", &|r| stats::best(r, Some(Period::Monthly)));
        push("Worst Month", &|r| stats::worst(r, Some(Period::Monthly)));
        push("Best Year", &|r| stats::best(r, Some(Period::Yearly)));
        push("Worst Year", &|r| stats::worst(r, Some(Period::Yearly)));
        push("Consecutive Wins", &|r| stats::consecutive_wins(r) as f64);
        push("Consecutive Losses", &|r| stats::consecutive_losses(r) as f64);
        push("Time in Market %", &stats::exposure);

        if let Some(bench) = &benchmark {
            let g = relative::greeks(&strategy, bench, periods);
            let mut relative_row = |name: &str, value: f64| {
                rows.push(MetricRow {
                    name: name.to_string(),
                    strategy: value,
                    benchmark: None,
                });
            };
            relative_row("Beta", g.beta);
            relative_row("Alpha", g.alpha);
            relative_row("Correlation", relative::correlation(&strategy, bench));
            relative_row("R^2", relative::r_squared(&strategy, bench));
            relative_row(
                "Information Ratio",
                relative::information_ratio(&strategy, bench),
            );
            relative_row("Treynor Ratio", relative::treynor_ratio(&strategy, bench, rf));
        }

        Ok(Self { rows })
    }

    /// Looks a row up by its display name.
    pub fn get(&self, name: &str) -> Option<&MetricRow> {
        self.rows.iter().find(|row| row.name == name)
    }
}
