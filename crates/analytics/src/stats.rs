//! Scalar performance and risk metrics.
//!
//! Every function here is a stateless pure transform over a canonical
//! return series (see the `series` crate). Insufficient samples, zero
//! variance, and out-of-domain input all yield NaN, never an error;
//! report assembly depends on that non-aborting behavior.

use core_types::{OutlierTail, Period, Series};
use series::{aggregate_returns, comp, multi_shift, to_excess_returns};
use statrs::distribution::{ContinuousCDF, Normal};

use crate::constants::MEAN_YEAR_DAYS;
use crate::drawdown::max_drawdown;
use crate::math;

/// Per-period geometric mean of growth: `Π(1+r)^(1/n) - 1`.
pub fn expected_return(returns: &Series) -> f64 {
    if returns.is_empty() {
        return f64::NAN;
    }
    let growth: f64 = returns
        .values()
        .iter()
        .filter(|r| !r.is_nan())
        .fold(1.0, |acc, r| acc * (1.0 + r));
    growth.powf(1.0 / returns.len() as f64) - 1.0
}

/// Alias of [`expected_return`].
pub fn geometric_mean(returns: &Series) -> f64 {
    expected_return(returns)
}

/// Alias of [`expected_return`] (geometric holding period return).
pub fn ghpr(returns: &Series) -> f64 {
    expected_return(returns)
}

/// Mean return of the periods the strategy was actually active (non-zero).
pub fn avg_return(returns: &Series) -> f64 {
    let active: Vec<f64> = returns
        .values()
        .iter()
        .copied()
        .filter(|r| !r.is_nan() && *r != 0.0)
        .collect();
    math::mean(&active)
}

/// Mean winning-period return.
pub fn avg_win(returns: &Series) -> f64 {
    let wins: Vec<f64> = returns.values().iter().copied().filter(|r| *r > 0.0).collect();
    math::mean(&wins)
}

/// Mean losing-period return (a negative number).
pub fn avg_loss(returns: &Series) -> f64 {
    let losses: Vec<f64> = returns.values().iter().copied().filter(|r| *r < 0.0).collect();
    math::mean(&losses)
}

/// Best period return, optionally after resampling to a coarser period.
pub fn best(returns: &Series, aggregate: Option<Period>) -> f64 {
    aggregate_returns(returns, aggregate, true)
        .max_value()
        .unwrap_or(f64::NAN)
}

/// Worst period return, optionally after resampling to a coarser period.
pub fn worst(returns: &Series, aggregate: Option<Period>) -> f64 {
    aggregate_returns(returns, aggregate, true)
        .min_value()
        .unwrap_or(f64::NAN)
}

/// Sample standard deviation of returns, `* sqrt(periods)` when
/// annualizing. NaN below two observations; exactly 0.0 for a flat series.
pub fn volatility(returns: &Series, periods: f64, annualize: bool) -> f64 {
    let sd = math::stdev(returns.values(), 1);
    if annualize { sd * periods.sqrt() } else { sd }
}

/// Sharpe ratio: mean excess return over its standard deviation,
/// annualized by `sqrt(periods)`.
///
/// A positive `rf` is quoted annually and deannualized by `periods`.
/// `smart` shrinks the denominator penalty-style for autocorrelated
/// return streams (see [`autocorr_penalty`]).
pub fn sharpe(returns: &Series, rf: f64, periods: f64, annualize: bool, smart: bool) -> f64 {
    let excess = excess_by_periods(returns, rf, periods);
    let mut divisor = math::stdev(excess.values(), 1);
    if smart {
        divisor *= autocorr_penalty(&excess);
    }
    if !(divisor > 0.0) {
        return f64::NAN;
    }
    let res = math::mean(excess.values()) / divisor;
    if annualize { res * periods.sqrt() } else { res }
}

/// Sortino ratio: like Sharpe, but the denominator only counts downside,
/// `sqrt(Σ min(r,0)² / n)`.
pub fn sortino(returns: &Series, rf: f64, periods: f64, annualize: bool, smart: bool) -> f64 {
    let excess = excess_by_periods(returns, rf, periods);
    let n = excess.values().iter().filter(|r| !r.is_nan()).count();
    if n == 0 {
        return f64::NAN;
    }
    let downside_sq: f64 = excess
        .values()
        .iter()
        .filter(|r| !r.is_nan())
        .map(|r| r.min(0.0) * r.min(0.0))
        .sum();
    let mut downside = (downside_sq / n as f64).sqrt();
    if smart {
        downside *= autocorr_penalty(&excess);
    }
    if !(downside > 0.0) {
        return f64::NAN;
    }
    let res = math::mean(excess.values()) / downside;
    if annualize { res * periods.sqrt() } else { res }
}

/// Jack Schwager's variant: Sortino scaled down by sqrt(2) so it reads on
/// the same scale as Sharpe.
pub fn adjusted_sortino(returns: &Series, rf: f64, periods: f64, annualize: bool) -> f64 {
    sortino(returns, rf, periods, annualize, false) / 2.0f64.sqrt()
}

/// Penalty factor for autocorrelated returns, used by the smart Sharpe and
/// Sortino variants. 1.0 when no meaningful sample exists.
pub fn autocorr_penalty(returns: &Series) -> f64 {
    let n = returns.len();
    if n < 2 {
        return 1.0;
    }
    // Lag-1 view of the series; pair (r[t], r[t-1]) skipping the warm-up NaN.
    let lagged = multi_shift(returns, 2);
    let coef = math::pearson(&lagged[0].values()[1..], &lagged[1].values()[1..]).abs();
    if coef.is_nan() {
        return 1.0;
    }
    let num = n as f64;
    let corr: f64 = (1..n)
        .map(|x| ((num - x as f64) / num) * coef.powi(x as i32))
        .sum();
    (1.0 + 2.0 * corr).sqrt()
}

/// Compound annual growth rate. The year count comes from the calendar
/// span of the index (`days / 365.25`), so sparse and daily series
/// annualize the same way.
pub fn cagr(returns: &Series, rf: f64, compounded: bool) -> f64 {
    let (Some((first, _)), Some((last, _))) = (returns.first(), returns.last()) else {
        return f64::NAN;
    };
    let years = (last - first).num_days() as f64 / MEAN_YEAR_DAYS;
    if !(years > 0.0) {
        return f64::NAN;
    }
    let excess = if rf > 0.0 {
        to_excess_returns(returns, rf, None)
    } else {
        returns.clone()
    };
    let total = if compounded {
        comp(&excess)
    } else {
        excess.values().iter().filter(|r| !r.is_nan()).sum()
    };
    (total + 1.0).abs().powf(1.0 / years) - 1.0
}

/// Share of positive periods among all observed (finite) periods.
pub fn win_rate(returns: &Series) -> f64 {
    let observed = returns.values().iter().filter(|r| !r.is_nan()).count();
    if observed == 0 {
        return f64::NAN;
    }
    let wins = returns.values().iter().filter(|r| **r > 0.0).count();
    wins as f64 / observed as f64
}

/// Longest run of strictly positive returns. Zeros break a run.
pub fn consecutive_wins(returns: &Series) -> usize {
    longest_run(returns, |r| r > 0.0)
}

/// Longest run of strictly negative returns. Zeros break a run.
pub fn consecutive_losses(returns: &Series) -> usize {
    longest_run(returns, |r| r < 0.0)
}

fn longest_run<F: Fn(f64) -> bool>(returns: &Series, hit: F) -> usize {
    let mut best = 0usize;
    let mut current = 0usize;
    for r in returns.values() {
        if hit(*r) {
            current += 1;
            best = best.max(current);
        } else {
            current = 0;
        }
    }
    best
}

/// Gross profits over gross losses: `Σ wins / |Σ losses|`.
pub fn profit_factor(returns: &Series) -> f64 {
    let wins: f64 = returns.values().iter().filter(|r| **r > 0.0).sum();
    let losses: f64 = returns.values().iter().filter(|r| **r < 0.0).sum();
    if losses == 0.0 {
        return f64::NAN;
    }
    (wins / losses).abs()
}

/// Mean win magnitude per winning period over mean loss magnitude per
/// losing period.
pub fn profit_ratio(returns: &Series) -> f64 {
    let wins: Vec<f64> = returns.values().iter().copied().filter(|r| *r >= 0.0).collect();
    let losses: Vec<f64> = returns.values().iter().copied().filter(|r| *r < 0.0).collect();
    if wins.is_empty() || losses.is_empty() {
        return f64::NAN;
    }
    let win_ratio = (math::mean(&wins) / wins.len() as f64).abs();
    let loss_ratio = (math::mean(&losses) / losses.len() as f64).abs();
    if !(loss_ratio > 0.0) {
        return f64::NAN;
    }
    win_ratio / loss_ratio
}

/// Average win over average loss magnitude.
pub fn payoff_ratio(returns: &Series) -> f64 {
    let loss = avg_loss(returns).abs();
    if !(loss > 0.0) {
        return f64::NAN;
    }
    avg_win(returns) / loss
}

/// Alias of [`payoff_ratio`].
pub fn win_loss_ratio(returns: &Series) -> f64 {
    payoff_ratio(returns)
}

/// Sum of returns over the absolute sum of losing returns, optionally on a
/// resampled (summed) series. Schwager's gain-to-pain ratio.
pub fn gain_to_pain_ratio(returns: &Series, rf: f64, aggregate: Option<Period>) -> f64 {
    let excess = if rf > 0.0 {
        to_excess_returns(returns, rf, None)
    } else {
        returns.clone()
    };
    let resampled = aggregate_returns(&excess, aggregate, false);
    let total: f64 = resampled.values().iter().filter(|r| !r.is_nan()).sum();
    let pain: f64 = resampled
        .values()
        .iter()
        .filter(|r| **r < 0.0)
        .sum::<f64>()
        .abs();
    if !(pain > 0.0) {
        return f64::NAN;
    }
    total / pain
}

/// Omega ratio: probability-weighted gains over losses relative to a
/// required return threshold (annualized, deannualized by `periods`).
pub fn omega(returns: &Series, rf: f64, required_return: f64, periods: f64) -> f64 {
    if returns.len() < 2 || required_return <= -1.0 {
        return f64::NAN;
    }
    let excess = excess_by_periods(returns, rf, periods);
    let threshold = if periods == 1.0 {
        required_return
    } else {
        (1.0 + required_return).powf(1.0 / periods) - 1.0
    };
    let mut gains = 0.0;
    let mut losses = 0.0;
    for r in excess.values() {
        if r.is_nan() {
            continue;
        }
        let diff = r - threshold;
        if diff > 0.0 {
            gains += diff;
        } else if diff < 0.0 {
            losses -= diff;
        }
    }
    if !(losses > 0.0) {
        return f64::NAN;
    }
    gains / losses
}

/// Bias-corrected sample skewness of the return distribution.
pub fn skew(returns: &Series) -> f64 {
    math::skew(returns.values())
}

/// Bias-corrected excess kurtosis of the return distribution.
pub fn kurtosis(returns: &Series) -> f64 {
    math::kurtosis(returns.values())
}

/// CAGR over the magnitude of the worst drawdown.
pub fn calmar(returns: &Series) -> f64 {
    let dd = max_drawdown(returns).abs();
    if !(dd > 0.0) {
        return f64::NAN;
    }
    cagr(returns, 0.0, true) / dd
}

/// Ulcer index: RMS depth of the drawdown curve.
pub fn ulcer_index(returns: &Series) -> f64 {
    let dd = crate::drawdown::to_drawdown_series(returns);
    let n = returns.len();
    if n < 2 {
        return f64::NAN;
    }
    let sum_sq: f64 = dd
        .values()
        .iter()
        .filter(|v| !v.is_nan())
        .map(|v| v * v)
        .sum();
    (sum_sq / (n - 1) as f64).sqrt()
}

/// Total compounded return over the ulcer index.
pub fn ulcer_performance_index(returns: &Series, rf: f64) -> f64 {
    let ulcer = ulcer_index(returns);
    if !(ulcer > 0.0) {
        return f64::NAN;
    }
    (comp(returns) - rf) / ulcer
}

/// Serenity index: return over ulcer-scaled pitfall risk (the expected
/// shortfall of the drawdown curve relative to return volatility).
pub fn serenity_index(returns: &Series, rf: f64) -> f64 {
    let dd = crate::drawdown::to_drawdown_series(returns);
    let sd = math::stdev(returns.values(), 1);
    if !(sd > 0.0) {
        return f64::NAN;
    }
    let pitfall = -conditional_value_at_risk(&dd, 1.0, 0.95) / sd;
    let ulcer = ulcer_index(returns);
    let denom = ulcer * pitfall;
    if !(denom != 0.0) || denom.is_nan() {
        return f64::NAN;
    }
    let total: f64 = returns.values().iter().filter(|r| !r.is_nan()).sum();
    (total - rf) / denom
}

/// Probability of losing the book given the observed win rate, compounded
/// over the sample length.
pub fn risk_of_ruin(returns: &Series) -> f64 {
    let wr = win_rate(returns);
    if wr.is_nan() {
        return f64::NAN;
    }
    ((1.0 - wr) / (1.0 + wr)).powi(returns.len() as i32)
}

/// Unannualized mean-over-deviation of raw returns.
pub fn risk_return_ratio(returns: &Series) -> f64 {
    let sd = math::stdev(returns.values(), 1);
    if !(sd > 0.0) {
        return f64::NAN;
    }
    math::mean(returns.values()) / sd
}

/// Parametric (Gaussian) value-at-risk at the given confidence: the
/// `1 - confidence` quantile of a normal fitted to the sample.
///
/// A confidence above 1 is read as a percentage (95 -> 0.95).
pub fn value_at_risk(returns: &Series, sigma: f64, confidence: f64) -> f64 {
    let confidence = if confidence > 1.0 {
        confidence / 100.0
    } else {
        confidence
    };
    if !(confidence > 0.0 && confidence < 1.0) {
        return f64::NAN;
    }
    let mu = math::mean(returns.values());
    let sd = sigma * math::stdev(returns.values(), 1);
    match Normal::new(mu, sd) {
        Ok(normal) => normal.inverse_cdf(1.0 - confidence),
        Err(_) => f64::NAN,
    }
}

/// Expected shortfall (cVaR): mean return beyond the VaR cutoff. Falls
/// back to the VaR itself when no observation sits past the cutoff.
pub fn conditional_value_at_risk(returns: &Series, sigma: f64, confidence: f64) -> f64 {
    let cutoff = value_at_risk(returns, sigma, confidence);
    if cutoff.is_nan() {
        return f64::NAN;
    }
    let tail: Vec<f64> = returns
        .values()
        .iter()
        .copied()
        .filter(|r| *r < cutoff)
        .collect();
    let shortfall = math::mean(&tail);
    if shortfall.is_nan() { cutoff } else { shortfall }
}

/// Right-tail magnitude over left-tail magnitude at the given cutoff.
pub fn tail_ratio(returns: &Series, cutoff: f64) -> f64 {
    let right = math::quantile(returns.values(), cutoff);
    let left = math::quantile(returns.values(), 1.0 - cutoff);
    if !(left != 0.0) || left.is_nan() || right.is_nan() {
        return f64::NAN;
    }
    (right / left).abs()
}

/// Profit factor scaled by the tail ratio.
pub fn common_sense_ratio(returns: &Series) -> f64 {
    profit_factor(returns) * tail_ratio(returns, 0.95)
}

/// Profit factor x win rate x win/loss ratio.
pub fn cpc_index(returns: &Series) -> f64 {
    profit_factor(returns) * win_rate(returns) * win_loss_ratio(returns)
}

/// How far the extreme winners sit above the typical winner.
pub fn outlier_win_ratio(returns: &Series, quantile: f64) -> f64 {
    let wins: Vec<f64> = returns.values().iter().copied().filter(|r| *r >= 0.0).collect();
    let typical = math::mean(&wins);
    if !(typical != 0.0) || typical.is_nan() {
        return f64::NAN;
    }
    math::quantile(returns.values(), quantile) / typical
}

/// How far the extreme losers sit below the typical loser.
pub fn outlier_loss_ratio(returns: &Series, quantile: f64) -> f64 {
    let losses: Vec<f64> = returns.values().iter().copied().filter(|r| *r < 0.0).collect();
    let typical = math::mean(&losses);
    if !(typical != 0.0) || typical.is_nan() {
        return f64::NAN;
    }
    math::quantile(returns.values(), quantile) / typical
}

/// Total compounded return over the magnitude of the worst drawdown.
pub fn recovery_factor(returns: &Series) -> f64 {
    let dd = max_drawdown(returns).abs();
    if !(dd > 0.0) {
        return f64::NAN;
    }
    comp(returns) / dd
}

/// Kelly's optimal bet fraction from the observed win rate and payoff.
pub fn kelly_criterion(returns: &Series) -> f64 {
    let payoff = payoff_ratio(returns);
    if payoff.is_nan() || payoff == 0.0 {
        return f64::NAN;
    }
    let win_prob = win_rate(returns);
    let lose_prob = 1.0 - win_prob;
    (payoff * win_prob - lose_prob) / payoff
}

/// Share of periods with an active (non-zero) return, rounded up to whole
/// percent.
pub fn exposure(returns: &Series) -> f64 {
    if returns.is_empty() {
        return f64::NAN;
    }
    let active = returns
        .values()
        .iter()
        .filter(|r| !r.is_nan() && **r != 0.0)
        .count();
    let ex = active as f64 / returns.len() as f64;
    (ex * 100.0).ceil() / 100.0
}

/// Probability the observed Sharpe is real rather than sampling noise:
/// normal CDF of the Sharpe estimate deflated by its standard error
/// (which widens with skew and fat tails).
pub fn probabilistic_sharpe_ratio(returns: &Series, rf: f64, periods: f64) -> f64 {
    let n = returns.len();
    if n < 2 {
        return f64::NAN;
    }
    let sr = sharpe(returns, rf, periods, false, false);
    let skew_no = skew(returns);
    let kurt_no = kurtosis(returns);
    if sr.is_nan() || skew_no.is_nan() || kurt_no.is_nan() {
        return f64::NAN;
    }
    let var_sr =
        (1.0 + 0.5 * sr * sr - skew_no * sr + (kurt_no - 3.0) / 4.0 * sr * sr) / (n as f64 - 1.0);
    if !(var_sr > 0.0) {
        return f64::NAN;
    }
    let ratio = sr / var_sr.sqrt();
    match Normal::new(0.0, 1.0) {
        Ok(standard) => standard.cdf(ratio),
        Err(_) => f64::NAN,
    }
}

/// Returns beyond an empirical quantile threshold.
pub fn outliers(returns: &Series, quantile: f64, tail: OutlierTail) -> Series {
    let upper = math::quantile(returns.values(), quantile);
    let lower = math::quantile(returns.values(), 1.0 - quantile);
    filter_points(returns, |r| match tail {
        OutlierTail::Upper => r > upper,
        OutlierTail::Lower => r < lower,
        OutlierTail::Both => r > upper || r < lower,
    })
}

/// The complement of [`outliers`]: the series with extreme observations
/// removed.
pub fn remove_outliers(returns: &Series, quantile: f64, tail: OutlierTail) -> Series {
    let upper = math::quantile(returns.values(), quantile);
    let lower = math::quantile(returns.values(), 1.0 - quantile);
    filter_points(returns, |r| match tail {
        OutlierTail::Upper => r < upper,
        OutlierTail::Lower => r > lower,
        OutlierTail::Both => r < upper && r > lower,
    })
}

fn filter_points<F: Fn(f64) -> bool>(returns: &Series, keep: F) -> Series {
    Series::new(returns.iter().filter(|(_, r)| keep(*r)).collect())
}

fn excess_by_periods(returns: &Series, rf: f64, periods: f64) -> Series {
    if rf > 0.0 {
        to_excess_returns(returns, rf, Some(periods))
    } else {
        returns.clone()
    }
}
