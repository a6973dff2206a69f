//! Calendar pivot of compounded returns.

use chrono::Datelike;
use core_types::Series;
use serde::{Deserialize, Serialize};
use series::group_returns;

/// One calendar year of compounded monthly returns.
///
/// `months[0]` is January. Months with no observations hold NaN; `eoy` is
/// the compounded return of the whole year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRow {
    pub year: i32,
    pub months: [f64; 12],
    #[serde(rename = "EOY")]
    pub eoy: f64,
}

/// Pivots a return series by (year, month), compounding (or summing) the
/// returns inside each bucket. Rows come back ordered by year ascending.
pub fn monthly_returns(returns: &Series, compounded: bool) -> Vec<MonthlyRow> {
    let by_month = group_returns(returns, |d| (d.year(), d.month()), compounded);
    let by_year = group_returns(returns, |d| d.year(), compounded);

    let mut rows: Vec<MonthlyRow> = Vec::new();
    for ((year, month), value) in by_month {
        match rows.last_mut() {
            Some(row) if row.year == year => row.months[month as usize - 1] = value,
            _ => {
                let mut months = [f64::NAN; 12];
                months[month as usize - 1] = value;
                rows.push(MonthlyRow {
                    year,
                    months,
                    eoy: f64::NAN,
                });
            }
        }
    }
    for (year, value) in by_year {
        if let Some(row) = rows.iter_mut().find(|r| r.year == year) {
            row.eoy = value;
        }
    }

    rows
}
