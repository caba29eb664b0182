use sar_core::{CoreError, GeoRectangle};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("cannot combine distributions over different rectangles ({left} vs {right})")]
    IncompatibleGeometry { left: GeoRectangle, right: GeoRectangle },

    #[error("{points} points but {weights} weights")]
    LengthMismatch { points: usize, weights: usize },

    #[error("no points to aggregate")]
    NoPoints,

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type GridResult<T> = Result<T, GridError>;
