//! Application-wide error types.
//!
//! Every domain error is eventually reported to a caller as one of these
//! kinds. `Internal` never carries infrastructure detail in its message.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad input: date range, missing reason, gender mismatch, missing attachment.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not enough remaining days for the requested debit.
    #[error("Insufficient balance: {0}")]
    InsufficientBalance(String),

    /// Transition attempted from a terminal or non-matching state.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// An open request already exists for the employee.
    #[error("Pending request exists: {0}")]
    PendingRequestExists(String),

    /// Requested days exceed what the employee may encash.
    #[error("Exceeds eligible days: {0}")]
    ExceedsEligibleDays(String),

    /// Administrative adjustment rejected.
    #[error("Invalid adjustment: {0}")]
    InvalidAdjustment(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Conflict (e.g., duplicate code, resource still referenced).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal error. The message is generic by construction.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::InvalidAdjustment(_) => 400,
            Self::NotFound(_) => 404,
            Self::InvalidState(_) | Self::PendingRequestExists(_) | Self::Conflict(_) => 409,
            Self::InsufficientBalance(_) | Self::ExceedsEligibleDays(_) => 422,
            Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InsufficientBalance(_) => "INSUFFICIENT_BALANCE",
            Self::InvalidState(_) => "INVALID_STATE",
            Self::PendingRequestExists(_) => "PENDING_REQUEST_EXISTS",
            Self::ExceedsEligibleDays(_) => "EXCEEDS_ELIGIBLE_DAYS",
            Self::InvalidAdjustment(_) => "INVALID_ADJUSTMENT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Builds the generic error reported for unexpected failures.
    #[must_use]
    pub fn internal() -> Self {
        Self::Internal("an unexpected error occurred".to_string())
    }
}
