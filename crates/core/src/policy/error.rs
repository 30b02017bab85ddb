//! Policy validation errors.

use thiserror::Error;

/// Errors raised when a leave type or settings snapshot is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// A required text field is blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A numeric field is negative.
    #[error("{0} cannot be negative")]
    NegativeValue(&'static str),

    /// A divisor is zero or negative.
    #[error("{0} must be greater than zero")]
    NonPositiveDivisor(&'static str),

    /// Fiscal year start month outside 1-12.
    #[error("Invalid fiscal year start month: {0}")]
    InvalidFiscalMonth(u32),
}

impl PolicyError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        400
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "MISSING_FIELD",
            Self::NegativeValue(_) => "NEGATIVE_VALUE",
            Self::NonPositiveDivisor(_) => "NON_POSITIVE_DIVISOR",
            Self::InvalidFiscalMonth(_) => "INVALID_FISCAL_MONTH",
        }
    }
}
