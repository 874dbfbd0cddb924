use thiserror::Error;

pub type PixleakResult<T> = Result<T, PixleakError>;

#[derive(Debug, Error)]
pub enum PixleakError {
    /// Corpus shape is wrong before any work starts (e.g. file/digest count
    /// mismatch). Never raised once the pipeline is past its entry checks.
    #[error("precondition failed: {0}")]
    Precondition(String),

    #[error("format error: {0}")]
    Format(String),

    /// The search space was exhausted without a single digest match.
    #[error("brute force exhausted the search space with no matches")]
    NotFound,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
