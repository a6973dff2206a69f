use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A date-indexed series of floating-point observations.
///
/// This is the single entity every layer of the system operates on. The
/// constructor establishes the index invariants every consumer assumes:
///
/// - dates are strictly increasing and unique (unsorted input is sorted, a
///   duplicated date keeps the last value supplied for it);
/// - values are `f64`, with NaN as the explicit gap/invalid marker.
///
/// A `Series` is immutable once constructed; every transform produces a new
/// one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl Series {
    /// Builds a series from (date, value) pairs, sorting the index and
    /// resolving duplicate dates in favor of the last value supplied.
    pub fn new(mut points: Vec<(NaiveDate, f64)>) -> Self {
        points.sort_by_key(|(date, _)| *date);

        let mut dates: Vec<NaiveDate> = Vec::with_capacity(points.len());
        let mut values: Vec<f64> = Vec::with_capacity(points.len());
        for (date, value) in points {
            if dates.last() == Some(&date) {
                // Last write wins for a duplicated date.
                if let Some(last) = values.last_mut() {
                    *last = value;
                }
            } else {
                dates.push(date);
                values.push(value);
            }
        }

        Self { dates, values }
    }

    /// Builds a series from an already-aligned index and value vector.
    pub fn from_parts(dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self, CoreError> {
        if dates.len() != values.len() {
            return Err(CoreError::LengthMismatch {
                index: dates.len(),
                values: values.len(),
            });
        }
        Ok(Self::new(dates.into_iter().zip(values).collect()))
    }

    /// An empty series.
    pub fn empty() -> Self {
        Self {
            dates: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn first(&self) -> Option<(NaiveDate, f64)> {
        self.get(0)
    }

    pub fn last(&self) -> Option<(NaiveDate, f64)> {
        self.len().checked_sub(1).and_then(|i| self.get(i))
    }

    pub fn get(&self, index: usize) -> Option<(NaiveDate, f64)> {
        Some((*self.dates.get(index)?, *self.values.get(index)?))
    }

    /// Iterates over (date, value) pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }

    /// A new series sharing this index with replacement values.
    pub fn with_values(&self, values: Vec<f64>) -> Result<Self, CoreError> {
        if values.len() != self.dates.len() {
            return Err(CoreError::LengthMismatch {
                index: self.dates.len(),
                values: values.len(),
            });
        }
        Ok(Self {
            dates: self.dates.clone(),
            values,
        })
    }

    /// A new series with every value passed through `f`, index unchanged.
    pub fn map<F: FnMut(f64) -> f64>(&self, f: F) -> Self {
        Self {
            dates: self.dates.clone(),
            values: self.values.iter().copied().map(f).collect(),
        }
    }

    /// Smallest finite value, if any. NaN entries are skipped.
    pub fn min_value(&self) -> Option<f64> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| Some(acc.map_or(v, |a: f64| a.min(v))))
    }

    /// Largest finite value, if any. NaN entries are skipped.
    pub fn max_value(&self) -> Option<f64> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| Some(acc.map_or(v, |a: f64| a.max(v))))
    }
}

/// One contiguous below-water stretch of a drawdown curve.
///
/// `end` is the recovery date and stays `None` while the series is still in
/// drawdown at its final observation. `days` counts observations inside the
/// episode. The serialized field names (`start`, `valley`, `end`, `days`,
/// `max drawdown`) are consumed verbatim by rendering code and must not
/// change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawdownEpisode {
    pub start: NaiveDate,
    pub valley: NaiveDate,
    pub end: Option<NaiveDate>,
    pub days: usize,
    #[serde(rename = "max drawdown")]
    pub max_drawdown: f64,
}
