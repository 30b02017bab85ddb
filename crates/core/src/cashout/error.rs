//! Cash-out error types.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::cashout::types::CashOutStatus;

/// Errors that can occur during cash-out operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CashOutError {
    /// Encashment is switched off in the leave policy.
    #[error("Leave encashment is disabled")]
    Disabled,

    /// Another request is still pending.
    #[error("A cash-out request is already pending")]
    PendingRequestExists,

    /// Day count must be positive.
    #[error("Days to cash out must be positive, got {0}")]
    InvalidDays(Decimal),

    /// Requested days exceed the eligible days.
    #[error("Requested {requested} days exceeds eligible {eligible} days")]
    ExceedsEligibleDays {
        /// Requested days.
        requested: Decimal,
        /// Days the employee may encash.
        eligible: Decimal,
    },

    /// Salary divisor must be positive.
    #[error("Salary divisor must be greater than zero")]
    InvalidDivisor,

    /// Transition not allowed from the current status.
    #[error("Cannot move cash-out request from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: CashOutStatus,
        /// The attempted target status.
        to: CashOutStatus,
    },

    /// Rejection reason is required but not provided.
    #[error("Rejection reason is required")]
    RejectionReasonRequired,
}

impl CashOutError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Disabled
            | Self::InvalidDays(_)
            | Self::InvalidDivisor
            | Self::RejectionReasonRequired => 400,
            Self::PendingRequestExists | Self::InvalidTransition { .. } => 409,
            Self::ExceedsEligibleDays { .. } => 422,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Disabled => "ENCASHMENT_DISABLED",
            Self::PendingRequestExists => "PENDING_REQUEST_EXISTS",
            Self::InvalidDays(_) => "INVALID_DAYS",
            Self::ExceedsEligibleDays { .. } => "EXCEEDS_ELIGIBLE_DAYS",
            Self::InvalidDivisor => "INVALID_SALARY_DIVISOR",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::RejectionReasonRequired => "REJECTION_REASON_REQUIRED",
        }
    }
}
