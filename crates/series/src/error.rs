use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error(
        "Strategy and benchmark are not aligned: {strategy} vs {benchmark} observations \
         (align with match_dates=true or pre-align the inputs)"
    )]
    LengthMismatch { strategy: usize, benchmark: usize },

    #[error(transparent)]
    Core(#[from] core_types::CoreError),
}
