use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Series index and values differ in length: {index} dates vs {values} values")]
    LengthMismatch { index: usize, values: usize },
}
