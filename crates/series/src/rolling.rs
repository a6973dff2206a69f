use core_types::Series;

/// Exponentially weighted rolling standard deviation.
///
/// `window` is the span of the weighting (or the halflife when
/// `is_halflife` is set), and doubles as the strict warm-up requirement:
/// entries before `window` observations have accumulated are NaN rather
/// than an early, underweighted estimate.
///
/// Weights are debiased; a constant series reports exactly zero deviation.
pub fn exponential_stdev(returns: &Series, window: usize, is_halflife: bool) -> Series {
    let alpha = if is_halflife {
        1.0 - (-(2.0f64.ln()) / window as f64).exp()
    } else {
        2.0 / (window as f64 + 1.0)
    };
    let decay = 1.0 - alpha;

    // Running weighted sums; every step decays all of them, a non-NaN
    // observation then joins with weight 1.
    let mut w_sum = 0.0; // Σ w
    let mut w_sq_sum = 0.0; // Σ w²
    let mut wx_sum = 0.0; // Σ w·x
    let mut wx2_sum = 0.0; // Σ w·x²
    let mut observed = 0usize;

    returns.map(|value| {
        w_sum *= decay;
        w_sq_sum *= decay * decay;
        wx_sum *= decay;
        wx2_sum *= decay;

        if !value.is_nan() {
            w_sum += 1.0;
            w_sq_sum += 1.0;
            wx_sum += value;
            wx2_sum += value * value;
            observed += 1;
        }

        if observed < window || w_sum <= 0.0 {
            return f64::NAN;
        }

        let mean = wx_sum / w_sum;
        let biased_var = wx2_sum / w_sum - mean * mean;
        let debias_denom = w_sum * w_sum - w_sq_sum;
        if debias_denom <= 0.0 {
            return f64::NAN;
        }
        let var = (biased_var * w_sum * w_sum / debias_denom).max(0.0);
        var.sqrt()
    })
}

/// Lagged views of a series: `shift` columns, the i-th shifted down by `i`
/// periods with NaN padding at the top. Column 0 is the series itself.
pub fn multi_shift(series: &Series, shift: usize) -> Vec<Series> {
    (0..shift)
        .map(|lag| {
            let mut shifted = vec![f64::NAN; series.len()];
            for (target, value) in shifted.iter_mut().skip(lag).zip(series.values()) {
                *target = *value;
            }
            // Index length is preserved, so this cannot mismatch.
            series.with_values(shifted).unwrap_or_else(|_| series.clone())
        })
        .collect()
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
    fn warm_up_entries_are_nan() {
        let stdev = exponential_stdev(&daily(&SAMPLE), 2, false);
        assert_eq!(stdev.len(), 10);
        assert!(stdev.values()[0].is_nan());
        assert!(stdev.values()[1].is_finite());
        assert!(stdev.values()[9].is_finite());
    }

    #[test]
    fn two_point_window_matches_hand_computation() {
        // After [a, b] with span 2 (α = 2/3): weights are (1-α) and 1.
        let stdev = exponential_stdev(&daily(&[1.0, 2.0]), 2, false);
        let (w0, w1) = (1.0f64 / 3.0, 1.0f64);
        let w_sum = w0 + w1;
        let mean = (w0 * 1.0 + w1 * 2.0) / w_sum;
        let biased = (w0 * (1.0 - mean).powi(2) + w1 * (2.0 - mean).powi(2)) / w_sum;
        let debiased = biased * w_sum * w_sum / (w_sum * w_sum - (w0 * w0 + w1 * w1));
        assert!((stdev.values()[1] - debiased.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn constant_series_has_zero_deviation() {
        let stdev = exponential_stdev(&daily(&[0.01; 6]), 3, false);
        assert!(stdev.values()[5].abs() < 1e-12);
    }

    #[test]
    fn multi_shift_lags_with_nan_padding() {
        let columns = multi_shift(&daily(&[1.0, 2.0, 3.0, 4.0, 5.0]), 3);
        assert_eq!(columns.len(), 3);
        assert_eq!(columns[0].values(), &[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!(columns[1].values()[0].is_nan());
        assert_eq!(&columns[1].values()[1..], &[1.0, 2.0, 3.0, 4.0]);
        assert!(columns[2].values()[1].is_nan());
        assert_eq!(&columns[2].values()[2..], &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn multi_shift_of_one_is_just_the_series() {
        let series = daily(&[1.0, 2.0]);
        let columns = multi_shift(&series, 1);
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0], series);
    }
}
