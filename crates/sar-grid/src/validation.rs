//! Structured validation reports.
//!
//! Validation findings are data, not failures: malformed shapes and negative
//! mass are errors, suspicious-but-usable states are warnings, and the caller
//! decides whether to proceed.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationInfo {
    errors:   Vec<String>,
    warnings: Vec<String>,
}

impl ValidationInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// `true` when there are no errors.  Warnings do not affect validity.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Append every finding from `other`.
    pub fn merge(&mut self, other: ValidationInfo) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

impl fmt::Display for ValidationInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValidationInfo [errors={:?}, warnings={:?}]", self.errors, self.warnings)
    }
}
