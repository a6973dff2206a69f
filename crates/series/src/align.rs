use core_types::Series;
use tracing::debug;

use crate::error::NormalizeError;

/// Puts a strategy and a benchmark on a shared index.
///
/// With `match_dates` set, both series are restricted to the ascending
/// intersection of their date sets. Without it, the inputs must already be
/// aligned: equal lengths pass through untouched and a mismatch is an error
/// rather than a silent positional truncation.
pub fn align(
    strategy: &Series,
    benchmark: &Series,
    match_dates: bool,
) -> Result<(Series, Series), NormalizeError> {
    if !match_dates {
        if strategy.len() != benchmark.len() {
            return Err(NormalizeError::LengthMismatch {
                strategy: strategy.len(),
                benchmark: benchmark.len(),
            });
        }
        return Ok((strategy.clone(), benchmark.clone()));
    }

    // Both indexes are sorted, so the intersection is a single merge pass.
    let mut matched_strategy = Vec::new();
    let mut matched_benchmark = Vec::new();
    let mut i = 0;
    let mut j = 0;
    while i < strategy.len() && j < benchmark.len() {
        let (sd, sv) = match strategy.get(i) {
            Some(point) => point,
            None => break,
        };
        let (bd, bv) = match benchmark.get(j) {
            Some(point) => point,
            None => break,
        };
        if sd < bd {
            i += 1;
        } else if bd < sd {
            j += 1;
        } else {
            matched_strategy.push((sd, sv));
            matched_benchmark.push((bd, bv));
            i += 1;
            j += 1;
        }
    }

    let dropped = (strategy.len() - matched_strategy.len()) + (benchmark.len() - matched_benchmark.len());
    if dropped > 0 {
        debug!(dropped, "alignment dropped dates outside the shared index");
    }

    Ok((Series::new(matched_strategy), Series::new(matched_benchmark)))
}
