use series::NormalizeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Failed to align strategy and benchmark series: {0}")]
    Alignment(#[from] NormalizeError),
}
