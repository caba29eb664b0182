use sar_core::EpochMs;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("end time {end} is before start time {start}")]
    InvalidInterval { start: EpochMs, end: EpochMs },

    #[error("invalid status change times: {0}")]
    InvalidChangeTimes(String),

    #[error("a movement schedule named {0:?} is already registered")]
    DuplicateName(String),

    #[error("schedule parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
