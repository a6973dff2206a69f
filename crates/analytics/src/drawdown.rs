//! Drawdown curve, worst drawdown, and episode details.

use core_types::{DrawdownEpisode, Series};
use series::to_prices;

/// Running ratio of cumulative growth to its peak, minus one. Always <= 0;
/// 0 exactly while the series sits at a high-water mark.
pub fn to_drawdown_series(returns: &Series) -> Series {
    let prices = to_prices(returns, 1.0);
    let mut peak = f64::NAN;
    prices.map(|price| {
        if price.is_nan() {
            return f64::NAN;
        }
        if !(price <= peak) {
            peak = price;
        }
        let dd = price / peak - 1.0;
        // Normalize -0.0 and any infinity artifact back to a clean zero.
        if dd == 0.0 || dd.is_infinite() { 0.0 } else { dd }
    })
}

/// Most negative point of the drawdown curve. NaN for an empty series.
pub fn max_drawdown(returns: &Series) -> f64 {
    to_drawdown_series(returns).min_value().unwrap_or(f64::NAN)
}

/// Scans the drawdown curve for contiguous below-water runs and describes
/// each as an episode: first underwater date, valley, recovery date (absent
/// while still underwater), duration in observations from start through
/// recovery, and depth. Episodes come back ordered by start date.
pub fn drawdown_details(returns: &Series) -> Vec<DrawdownEpisode> {
    let curve = to_drawdown_series(returns);
    let mut episodes = Vec::new();

    let mut start_idx: Option<usize> = None;
    let mut valley_idx = 0usize;
    let mut valley_depth = 0.0f64;

    for (i, (_, dd)) in curve.iter().enumerate() {
        if dd < 0.0 {
            if start_idx.is_none() {
                start_idx = Some(i);
                valley_idx = i;
                valley_depth = dd;
            } else if dd < valley_depth {
                valley_idx = i;
                valley_depth = dd;
            }
        } else if let Some(start) = start_idx.take() {
            // Back at (or above) the high-water mark: the episode recovered
            // on this observation.
            episodes.push(episode(&curve, start, valley_idx, Some(i), valley_depth));
        }
    }

    if let Some(start) = start_idx {
        episodes.push(episode(&curve, start, valley_idx, None, valley_depth));
    }

    episodes
}

fn episode(
    curve: &Series,
    start: usize,
    valley: usize,
    end: Option<usize>,
    depth: f64,
) -> DrawdownEpisode {
    let last = curve.len() - 1;
    let close = end.unwrap_or(last);
    DrawdownEpisode {
        start: curve.dates()[start],
        valley: curve.dates()[valley],
        end: end.map(|i| curve.dates()[i]),
        days: close - start + 1,
        max_drawdown: depth,
    }
}
