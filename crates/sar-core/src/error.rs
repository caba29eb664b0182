//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`, so a bad rectangle surfaces the same way no matter
//! which layer constructed it.

use thiserror::Error;

/// The error type for `sar-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid rectangle: {0}")]
    InvalidRectangle(String),

    #[error("unknown direction {0:?}")]
    UnknownDirection(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `sar-core`.
pub type CoreResult<T> = Result<T, CoreError>;
