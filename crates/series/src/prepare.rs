use core_types::{DataKind, Series};
use tracing::debug;

use crate::transform::{to_excess_returns, to_prices, to_returns};

/// Classifies an unlabeled series as price levels or period returns.
///
/// The heuristic is magnitude-based: a series whose values never go below
/// zero and exceed 1.0 somewhere looks like price levels; anything else is
/// treated as returns. Callers that know better should pass
/// `DataKind::Prices` or `DataKind::Returns` instead of relying on this.
pub fn infer_kind(series: &Series) -> DataKind {
    if looks_like_prices(series) {
        DataKind::Prices
    } else {
        DataKind::Returns
    }
}

fn looks_like_prices(series: &Series) -> bool {
    match (series.min_value(), series.max_value()) {
        (Some(min), Some(max)) => min >= 0.0 && max > 1.0,
        _ => false,
    }
}

/// Produces a canonical return series from arbitrary input.
///
/// Price-like input (per `kind`, or the heuristic under `DataKind::Auto`) is
/// converted by percent-change with 0.0 for the first element. Gaps are
/// filled with 0.0 and infinite values are surfaced as NaN. A positive
/// risk-free rate is subtracted, deannualized to `(1+rf)^(1/nperiods) - 1`
/// when `nperiods` is given.
pub fn prepare_returns(series: &Series, kind: DataKind, rf: f64, nperiods: Option<f64>) -> Series {
    let is_prices = match kind {
        DataKind::Prices => true,
        DataKind::Returns => false,
        DataKind::Auto => {
            let detected = looks_like_prices(series);
            if detected {
                debug!(observations = series.len(), "auto-classified input as price levels");
            }
            detected
        }
    };

    let returns = if is_prices {
        to_returns(series)
    } else {
        series.clone()
    };

    // Gaps become 0.0 first; infinities then surface as NaN.
    let cleaned = returns.map(|v| {
        let v = if v.is_nan() { 0.0 } else { v };
        if v.is_infinite() { f64::NAN } else { v }
    });

    if rf > 0.0 {
        to_excess_returns(&cleaned, rf, nperiods)
    } else {
        cleaned
    }
}

/// Produces a canonical price series from arbitrary input.
///
/// Return-like input (per `kind`, or the heuristic under `DataKind::Auto`:
/// any value at or below zero, or all values below 1.0) is compounded onto
/// `base`.
pub fn prepare_prices(series: &Series, kind: DataKind, base: f64) -> Series {
    let is_returns = match kind {
        DataKind::Returns => true,
        DataKind::Prices => false,
        DataKind::Auto => {
            let detected = match (series.min_value(), series.max_value()) {
                (Some(min), Some(max)) => min <= 0.0 || max < 1.0,
                _ => false,
            };
            if detected {
                debug!(observations = series.len(), "auto-classified input as returns");
            }
            detected
        }
    };

    if is_returns {
        to_prices(series, base)
    } else {
        series.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn daily(values: &[f64]) -> Series {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        Series::new(
            values
                .iter()
                .enumerate()
                .map(|(i, &v)| (start + chrono::Days::new(i as u64), v))
                .collect(),
        )
    }

    #[test]
    fn price_levels_are_detected_and_converted() {
        let prices = daily(&[100.0, 102.0, 99.0, 101.0, 103.0]);
        assert_eq!(infer_kind(&prices), DataKind::Prices);

        let returns = prepare_returns(&prices, DataKind::Auto, 0.0, None);
        assert_eq!(returns.values()[0], 0.0);
        assert!((returns.values()[1] - 0.02).abs() < 1e-10);
    }

    #[test]
    fn return_series_passes_through() {
        let returns = daily(&[0.01, -0.02, 0.03]);
        assert_eq!(infer_kind(&returns), DataKind::Returns);
        let prepared = prepare_returns(&returns, DataKind::Auto, 0.0, None);
        assert_eq!(prepared.values(), returns.values());
    }

    #[test]
    fn explicit_hint_overrides_heuristic() {
        // Sub-1.0 price levels would fool the magnitude test.
        let penny_stock = daily(&[0.50, 0.55, 0.52]);
        let returns = prepare_returns(&penny_stock, DataKind::Prices, 0.0, None);
        assert_eq!(returns.values()[0], 0.0);
        assert!((returns.values()[1] - 0.10).abs() < 1e-10);
    }

    #[test]
    fn gaps_fill_with_zero_and_infinities_become_nan() {
        let raw = daily(&[0.01, f64::NAN, f64::INFINITY, -0.02]);
        let prepared = prepare_returns(&raw, DataKind::Returns, 0.0, None);
        assert_eq!(prepared.values()[1], 0.0);
        assert!(prepared.values()[2].is_nan());
        assert_eq!(prepared.values()[3], -0.02);
    }

    #[test]
    fn risk_free_rate_is_deannualized_when_nperiods_given() {
        let returns = daily(&[0.01, -0.02]);
        let prepared = prepare_returns(&returns, DataKind::Returns, 0.01, Some(252.0));
        let daily_rf = (1.0f64 + 0.01).powf(1.0 / 252.0) - 1.0;
        assert!((prepared.values()[0] - (0.01 - daily_rf)).abs() < 1e-12);
    }

    #[test]
    fn prepare_prices_compounds_return_input_onto_base() {
        let returns = daily(&[-0.01, 0.02, -0.03, 0.01, 0.02]);
        let prices = prepare_prices(&returns, DataKind::Auto, 100.0);
        assert!((prices.values()[0] - 99.0).abs() < 1e-10);
    }

    #[test]
    fn prepare_prices_leaves_price_input_alone() {
        let prices = daily(&[100.0, 102.0, 99.0]);
        let prepared = prepare_prices(&prices, DataKind::Auto, 100.0);
        assert_eq!(prepared.values(), prices.values());
    }

    #[test]
    fn empty_series_stays_empty() {
        let empty = Series::empty();
        assert!(prepare_returns(&empty, DataKind::Auto, 0.0, None).is_empty());
        assert!(prepare_prices(&empty, DataKind::Auto, 100.0).is_empty());
    }
}
