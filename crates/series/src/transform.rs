use core_types::Series;

/// Cumulative compounded growth minus one: `Π(1+r) - 1` up to each index.
///
/// A single running product, so a long series costs one multiplication per
/// observation. NaN observations leave a NaN in the output but do not
/// contaminate the running product.
pub fn compsum(returns: &Series) -> Series {
    let mut growth = 1.0;
    returns.map(|r| {
        if r.is_nan() {
            return f64::NAN;
        }
        growth *= 1.0 + r;
        growth - 1.0
    })
}

/// Total compounded return: `Π(1+r) - 1`. NaN observations are skipped.
pub fn comp(returns: &Series) -> f64 {
    returns
        .values()
        .iter()
        .filter(|r| !r.is_nan())
        .fold(1.0, |growth, r| growth * (1.0 + r))
        - 1.0
}

/// Re-expresses a return series as a cumulative-growth curve anchored at
/// `base`: `price[t] = base + base * compsum(r)[t]`.
///
/// Gaps count as flat periods; infinite returns surface as NaN.
pub fn to_prices(returns: &Series, base: f64) -> Series {
    let cleaned = returns.map(|r| {
        let r = if r.is_nan() { 0.0 } else { r };
        if r.is_infinite() { f64::NAN } else { r }
    });
    compsum(&cleaned).map(|c| base + base * c)
}

/// Simple arithmetic returns of a price series: percent change with 0.0 for
/// the first element (day zero has no prior price to compare against).
pub fn to_returns(prices: &Series) -> Series {
    let mut prev = f64::NAN;
    let mut first = true;
    prices.map(|price| {
        let ret = if first { 0.0 } else { (price - prev) / prev };
        first = false;
        prev = price;
        ret
    })
}

/// Log returns `ln(1+r)` per period.
///
/// A return at or below -100% has no defined log return; it becomes NaN
/// rather than an error, like every other out-of-domain value in this layer.
pub fn log_returns(returns: &Series) -> Series {
    returns.map(|r| {
        let log = (1.0 + r).ln();
        if log.is_finite() { log } else { f64::NAN }
    })
}

/// Linearly rescales a price series so its first finite value equals `base`,
/// preserving every percentage move.
pub fn rebase(prices: &Series, base: f64) -> Series {
    let Some(anchor) = prices.values().iter().copied().find(|v| v.is_finite()) else {
        return prices.clone();
    };
    prices.map(|v| v / anchor * base)
}

/// Subtracts the risk-free rate from every observation.
///
/// With `nperiods`, `rf` is treated as an annual rate and deannualized to
/// `(1+rf)^(1/nperiods) - 1`; without it, `rf` is assumed to be quoted per
/// period already and subtracted as-is.
pub fn to_excess_returns(returns: &Series, rf: f64, nperiods: Option<f64>) -> Series {
    let period_rf = match nperiods {
        Some(n) => (1.0 + rf).powf(1.0 / n) - 1.0,
        None => rf,
    };
    returns.map(|r| r - period_rf)
}
