//! Accrual error types.

use thiserror::Error;

use crate::calendar::CalendarError;

/// Errors that can occur while computing accruals.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccrualError {
    /// The accrual divisor must be positive.
    #[error("Accrual divisor must be greater than zero")]
    InvalidDivisor,

    /// Date arithmetic failed.
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

impl AccrualError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidDivisor => 400,
            Self::Calendar(e) => e.status_code(),
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDivisor => "INVALID_ACCRUAL_DIVISOR",
            Self::Calendar(e) => e.error_code(),
        }
    }
}
