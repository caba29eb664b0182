use sar_core::SearchId;
use sar_grid::{GridError, ValidationInfo};
use sar_path::PathError;
use sar_series::SeriesError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid model parameters: {0}")]
    InvalidParams(ValidationInfo),

    #[error("model configuration error: {0}")]
    Config(String),

    #[error("{what}: expected {expected} entries, got {got}")]
    LengthMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("search {0} is already applied")]
    DuplicateSearch(SearchId),

    #[error("search {0} is not applied")]
    UnknownSearch(SearchId),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Series(#[from] SeriesError),
}

pub type ModelResult<T> = Result<T, ModelError>;
