use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("invalid exclusion zone: {0}")]
    InvalidZone(String),

    #[error("zone file parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GeometryResult<T> = Result<T, GeometryError>;
