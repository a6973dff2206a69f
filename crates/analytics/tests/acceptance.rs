//! End-to-end pins for the statistics engine: the canonical ten-day sample
//! series, its benchmark, and the invariants every metric must hold.

use analytics::{drawdown_details, max_drawdown, monthly_returns, rolling, stats, DAYS_PER_YEAR};
use chrono::NaiveDate;
use core_types::{DataKind, Series};
use series::{aggregate_returns, prepare_returns, to_prices, to_returns};

const RETURNS: [f64; 10] = [0.01, -0.02, 0.03, -0.01, 0.02, 0.01, -0.03, 0.02, 0.01, -0.02];
const BENCHMARK: [f64; 10] = [
    0.005, -0.01, 0.02, -0.005, 0.015, 0.01, -0.02, 0.01, 0.005, -0.01,
];

fn sample_returns() -> Series {
    daily(&RETURNS)
}

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

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn geometric_mean_pin() {
    assert_close(stats::geometric_mean(&sample_returns()), 0.0018116481973156073);
}

#[test]
fn volatility_pin() {
    let vol = stats::volatility(&sample_returns(), DAYS_PER_YEAR, true);
    assert!(vol > 0.0);
    assert_close(vol, 0.3904982572161992);
}

#[test]
fn sharpe_pin() {
    assert_close(
        stats::sharpe(&sample_returns(), 0.01, DAYS_PER_YEAR, true, false),
        1.8439250885518859,
    );
}

#[test]
fn sortino_pin() {
    let sortino = stats::sortino(&sample_returns(), 0.01, DAYS_PER_YEAR, true, false);
    assert!(!sortino.is_nan());
    assert_close(sortino, 2.805780971175484);
}

#[test]
fn max_drawdown_pin() {
    let dd = max_drawdown(&sample_returns());
    assert!(dd <= 0.0);
    assert_close(dd, -0.029999999999999916);
}

#[test]
fn win_rate_pin() {
    let wr = stats::win_rate(&sample_returns());
    assert!((0.0..=1.0).contains(&wr));
    assert_close(wr, 0.6);
}

#[test]
fn cagr_pin() {
    assert_close(stats::cagr(&sample_returns(), 0.0, true), 1.0845688420190212);
}

#[test]
fn value_at_risk_pin() {
    let var = stats::value_at_risk(&sample_returns(), 1.0, 0.95);
    assert!(var < 0.0);
    assert_close(var, -0.03162017150362553);
}

#[test]
fn streak_pins() {
    assert_eq!(stats::consecutive_wins(&sample_returns()), 2);
    assert_eq!(stats::consecutive_losses(&sample_returns()), 1);
}

#[test]
fn profit_factor_pin() {
    assert_close(stats::profit_factor(&sample_returns()), 1.25);
}

#[test]
fn benchmark_correlation_pin() {
    let corr = analytics::correlation(&sample_returns(), &daily(&BENCHMARK));
    assert!((-1.0..=1.0).contains(&corr));
    assert_close(corr, 0.985919893073543);
}

#[test]
fn price_round_trip_law() {
    let prices = to_prices(&sample_returns(), 100.0);
    let round_tripped = to_prices(&to_returns(&prices), prices.values()[0]);
    for (a, b) in prices.values().iter().zip(round_tripped.values()) {
        assert!((a - b).abs() < 1e-9);
    }
}

#[test]
fn empty_and_singleton_yield_nan_not_panic() {
    let empty = Series::empty();
    let single = daily(&[0.01]);
    assert!(stats::geometric_mean(&empty).is_nan());
    assert!(stats::volatility(&empty, DAYS_PER_YEAR, true).is_nan());
    assert!(stats::volatility(&single, DAYS_PER_YEAR, true).is_nan());
    assert!(stats::sharpe(&empty, 0.01, DAYS_PER_YEAR, true, false).is_nan());
    assert!(stats::sortino(&empty, 0.01, DAYS_PER_YEAR, true, false).is_nan());
}

#[test]
fn all_zero_series_has_zero_volatility() {
    assert_eq!(
        stats::volatility(&daily(&[0.0, 0.0, 0.0, 0.0, 0.0]), DAYS_PER_YEAR, true),
        0.0
    );
}

#[test]
fn aggregate_none_is_identity() {
    let returns = sample_returns();
    assert_eq!(aggregate_returns(&returns, None, true), returns);
}

#[test]
fn rolling_volatility_shape_law() {
    let returns = sample_returns();
    let vol = rolling::rolling_volatility(&returns, 5, DAYS_PER_YEAR);
    assert_eq!(vol.len(), returns.len());
    assert!(vol.values()[..4].iter().all(|v| v.is_nan()));
    assert!(vol.values()[4..].iter().all(|v| v.is_finite()));
}

#[test]
fn drawdown_details_episode_contract() {
    let episodes = drawdown_details(&sample_returns());
    assert!(!episodes.is_empty());
    for window in episodes.windows(2) {
        assert!(window[0].start < window[1].start);
    }
    for episode in &episodes {
        assert!(episode.max_drawdown < 0.0);
        assert!(episode.start <= episode.valley);
        if let Some(end) = episode.end {
            assert!(episode.valley < end);
        }
        assert!(episode.days >= 1);
    }
}

#[test]
fn monthly_pivot_covers_the_sample() {
    let rows = monthly_returns(&sample_returns(), true);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].year, 2020);
    // All ten observations land in January 2020.
    let january = rows[0].months[0];
    let expected: f64 = RETURNS.iter().fold(1.0, |acc, r| acc * (1.0 + r)) - 1.0;
    assert!((january - expected).abs() < 1e-12);
    assert!((rows[0].eoy - expected).abs() < 1e-12);
    assert!(rows[0].months[1..].iter().all(|m| m.is_nan()));
}

#[test]
fn unlabeled_price_input_normalizes_to_the_same_metrics() {
    let prices = daily(&[100.0, 102.0, 99.0, 101.0, 103.0, 102.0, 99.0, 101.0, 102.0, 101.0]);
    let returns = prepare_returns(&prices, DataKind::Auto, 0.0, None);
    assert_eq!(returns.values()[0], 0.0);
    assert!((returns.values()[1] - 0.02).abs() < 1e-10);
    // Metrics on normalized prices equal metrics on the hand-built returns.
    let by_hand = to_returns(&prices);
    assert_close(stats::sharpe(&returns, 0.0, DAYS_PER_YEAR, true, false),
        stats::sharpe(&by_hand, 0.0, DAYS_PER_YEAR, true, false));
}
