//! Rolling-window metrics.
//!
//! Output always has the same length as the input, with NaN for every
//! entry before the window has filled: a strict warm-up, not an early
//! underweighted estimate.

use core_types::Series;
use series::to_excess_returns;

use crate::math;

/// Rolling annualized volatility over `window` observations.
pub fn rolling_volatility(returns: &Series, window: usize, periods: f64) -> Series {
    rolling(returns, window, |slice| {
        math::stdev(slice, 1) * periods.sqrt()
    })
}

/// Rolling annualized Sharpe ratio over `window` observations.
pub fn rolling_sharpe(returns: &Series, rf: f64, window: usize, periods: f64) -> Series {
    let excess = if rf > 0.0 {
        to_excess_returns(returns, rf, Some(periods))
    } else {
        returns.clone()
    };
    rolling(&excess, window, |slice| {
        let sd = math::stdev(slice, 1);
        if !(sd > 0.0) {
            return f64::NAN;
        }
        math::mean(slice) / sd * periods.sqrt()
    })
}

/// Rolling annualized Sortino ratio over `window` observations.
pub fn rolling_sortino(returns: &Series, rf: f64, window: usize, periods: f64) -> Series {
    let excess = if rf > 0.0 {
        to_excess_returns(returns, rf, Some(periods))
    } else {
        returns.clone()
    };
    rolling(&excess, window, |slice| {
        let downside_sq: f64 = slice
            .iter()
            .filter(|r| !r.is_nan())
            .map(|r| r.min(0.0) * r.min(0.0))
            .sum();
        let downside = (downside_sq / slice.len() as f64).sqrt();
        if !(downside > 0.0) {
            return f64::NAN;
        }
        math::mean(slice) / downside * periods.sqrt()
    })
}

fn rolling<F: Fn(&[f64]) -> f64>(series: &Series, window: usize, stat: F) -> Series {
    if window == 0 {
        return series.map(|_| f64::NAN);
    }
    let values = series.values();
    let mut out = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        if i + 1 < window {
            out.push(f64::NAN);
            continue;
        }
        let slice = &values[i + 1 - window..=i];
        if slice.iter().any(|v| v.is_nan()) {
            out.push(f64::NAN);
        } else {
            out.push(stat(slice));
        }
    }
    // The output shares the input index, so the lengths always agree.
    series.with_values(out).unwrap_or_else(|_| series.clone())
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

    const SAMPLE: [f64; 10] = [0.01, -0.02, 0.03, -0.01, 0.02, 0.01, -0.03, 0.02, 0.01, -0.02];

    #[test]
    fn rolling_volatility_keeps_length_and_pads_warm_up() {
        let vol = rolling_volatility(&daily(&SAMPLE), 5, 365.0);
        assert_eq!(vol.len(), SAMPLE.len());
        for i in 0..4 {
            assert!(vol.values()[i].is_nan(), "entry {i} should be warm-up NaN");
        }
        for i in 4..SAMPLE.len() {
            assert!(vol.values()[i].is_finite());
        }
    }

    #[test]
    fn full_window_matches_whole_series_volatility() {
        let returns = daily(&SAMPLE);
        let vol = rolling_volatility(&returns, SAMPLE.len(), 365.0);
        let whole = crate::stats::volatility(&returns, 365.0, true);
        assert!((vol.values()[SAMPLE.len() - 1] - whole).abs() < 1e-12);
    }

    #[test]
    fn window_of_one_has_no_defined_deviation() {
        let vol = rolling_volatility(&daily(&SAMPLE), 1, 365.0);
        assert_eq!(vol.len(), SAMPLE.len());
        assert!(vol.values().iter().all(|v| v.is_nan()));
    }

    #[test]
    fn rolling_sharpe_goes_nan_inside_flat_windows() {
        let sharpe = rolling_sharpe(&daily(&[0.01, 0.01, 0.01, 0.02, -0.01]), 0.0, 3, 365.0);
        assert!(sharpe.values()[2].is_nan());
        assert!(sharpe.values()[4].is_finite());
    }

    #[test]
    fn rolling_sortino_needs_downside_in_the_window() {
        let sortino = rolling_sortino(&daily(&[0.01, 0.02, 0.03, -0.01, 0.02]), 0.0, 3, 365.0);
        // All-positive window has zero downside deviation.
        assert!(sortino.values()[2].is_nan());
        assert!(sortino.values()[3].is_finite());
    }
}
