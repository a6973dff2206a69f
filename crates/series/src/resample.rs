use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use core_types::{Period, Series};

/// Collapses returns into groups keyed by `key`, compounding (`Π(1+r) - 1`)
/// or summing within each group. Output is ordered by key. NaN observations
/// are skipped; a group of only NaN collapses to 0.0.
pub fn group_returns<K, F>(returns: &Series, key: F, compounded: bool) -> Vec<(K, f64)>
where
    K: Ord,
    F: Fn(NaiveDate) -> K,
{
    let mut groups: BTreeMap<K, f64> = BTreeMap::new();
    for (date, value) in returns.iter() {
        let acc = groups.entry(key(date)).or_insert(0.0);
        if !value.is_nan() {
            if compounded {
                *acc = (1.0 + *acc) * (1.0 + value) - 1.0;
            } else {
                *acc += value;
            }
        }
    }
    groups.into_iter().collect()
}

/// Resamples a return series into calendar buckets, compounding the
/// sub-period returns. Each output point is dated at the last observation of
/// its bucket. `None` is the identity: the input comes back unchanged.
pub fn aggregate_returns(returns: &Series, period: Option<Period>, compounded: bool) -> Series {
    let Some(period) = period else {
        return returns.clone();
    };

    let bucket = |date: NaiveDate| -> (i32, u32) {
        match period {
            Period::Weekly => {
                let week = date.iso_week();
                (week.year(), week.week())
            }
            Period::Monthly => (date.year(), date.month()),
            Period::Quarterly => (date.year(), (date.month() - 1) / 3 + 1),
            Period::Yearly => (date.year(), 0),
        }
    };

    let mut points: Vec<(NaiveDate, f64)> = Vec::new();
    let mut current: Option<(i32, u32)> = None;
    for (date, value) in returns.iter() {
        let key = bucket(date);
        match points.last_mut() {
            Some((last_date, acc)) if current == Some(key) => {
                *last_date = date;
                if !value.is_nan() {
                    if compounded {
                        *acc = (1.0 + *acc) * (1.0 + value) - 1.0;
                    } else {
                        *acc += value;
                    }
                }
            }
            _ => {
                current = Some(key);
                points.push((date, if value.is_nan() { 0.0 } else { value }));
            }
        }
    }

    Series::new(points)
}
