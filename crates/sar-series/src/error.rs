use sar_core::CoreError;
use sar_grid::GridError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("series has no keyframes")]
    Empty,

    #[error("axis {axis} must be non-empty and strictly ascending")]
    BadAxis { axis: &'static str },

    #[error("keyframe at {time} is {rows}x{cols}, expected {want_rows}x{want_cols}")]
    ShapeMismatch { time: i64, rows: usize, cols: usize, want_rows: usize, want_cols: usize },

    #[error("cannot interpolate at a NaN location")]
    NanLocation,

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type SeriesResult<T> = Result<T, SeriesError>;
