//! Annualization constants for metric calculations.
//!
//! Metrics never read these implicitly; callers pass one (or any other
//! factor) as the explicit `periods` argument.

/// Calendar-day convention, the default used by report assembly.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Trading-day convention for callers on an exchange calendar.
pub const TRADING_DAYS: f64 = 252.0;

/// Mean calendar year length, used to turn a date span into a year count.
pub const MEAN_YEAR_DAYS: f64 = 365.25;
