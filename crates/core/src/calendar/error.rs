//! Calendar error types.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur during calendar calculations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    /// Range start falls after its end.
    #[error("Invalid date range: {start} is after {end}")]
    InvalidRange {
        /// First day of the range.
        start: NaiveDate,
        /// Last day of the range.
        end: NaiveDate,
    },

    /// Fiscal year start month outside 1-12.
    #[error("Invalid fiscal year start month: {0}")]
    InvalidFiscalMonth(u32),

    /// No working day could be found after the given date.
    #[error("No working day found after {0}")]
    NoWorkingDay(NaiveDate),

    /// Date arithmetic left the supported calendar range.
    #[error("Date out of range")]
    DateOutOfRange,
}

impl CalendarError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidRange { .. } | Self::InvalidFiscalMonth(_) => 400,
            Self::NoWorkingDay(_) | Self::DateOutOfRange => 422,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRange { .. } => "INVALID_RANGE",
            Self::InvalidFiscalMonth(_) => "INVALID_FISCAL_MONTH",
            Self::NoWorkingDay(_) => "NO_WORKING_DAY",
            Self::DateOutOfRange => "DATE_OUT_OF_RANGE",
        }
    }
}
