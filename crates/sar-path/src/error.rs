use sar_core::EpochMs;
use sar_schedule::ScheduleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PathError {
    #[error("step at {got} is not one time delta after the previous step (expected {expected})")]
    InvalidStep { expected: EpochMs, got: EpochMs },

    #[error("build() called before the sample reached its logical end")]
    NotFinalized,

    #[error("a sample needs at least one point")]
    EmptyPath,

    #[error("anchor at {got} is out of time order (neighbour at {neighbour})")]
    OutOfOrder { neighbour: EpochMs, got: EpochMs },

    #[error("invalid sample: {0}")]
    InvalidSample(String),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

pub type PathResult<T> = Result<T, PathError>;
