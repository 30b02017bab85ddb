//! Engine error types.
//!
//! Every core module error is wrapped here, then reduced to one of the
//! caller-visible kinds in [`ErrorKind`] and finally to an [`AppError`].

use leavebook_core::accrual::AccrualError;
use leavebook_core::calendar::CalendarError;
use leavebook_core::cashout::CashOutError;
use leavebook_core::ledger::LedgerError;
use leavebook_core::policy::PolicyError;
use leavebook_core::recall::RecallError;
use leavebook_core::workflow::WorkflowError;
use leavebook_shared::AppError;
use thiserror::Error;

/// Result type alias using `EngineError`.
pub type EngineResult<T> = Result<T, EngineError>;

/// Caller-visible error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input.
    Validation,
    /// Not enough remaining days.
    InsufficientBalance,
    /// Transition attempted from the wrong status.
    InvalidState,
    /// An open request already exists.
    PendingRequestExists,
    /// Requested more days than may be encashed.
    ExceedsEligibleDays,
    /// Administrative adjustment rejected.
    InvalidAdjustment,
    /// Unknown entity.
    NotFound,
    /// Duplicate or still-referenced resource.
    Conflict,
    /// Unexpected failure.
    Internal,
}

/// Errors returned by engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Date calculus failed.
    #[error(transparent)]
    Calendar(#[from] CalendarError),

    /// Accrual computation failed.
    #[error(transparent)]
    Accrual(#[from] AccrualError),

    /// Policy or leave-type definition is invalid.
    #[error(transparent)]
    Policy(#[from] PolicyError),

    /// Balance operation rejected.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Application transition rejected.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// Cash-out operation rejected.
    #[error(transparent)]
    CashOut(#[from] CashOutError),

    /// Recall operation rejected.
    #[error(transparent)]
    Recall(#[from] RecallError),

    /// Unknown entity.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Entity kind.
        entity: &'static str,
        /// Identifier that was looked up.
        id: String,
    },

    /// The leave type is referenced and cannot be deleted.
    #[error("Leave type {0} is still referenced by applications or balances")]
    LeaveTypeInUse(String),

    /// Leave type code already taken.
    #[error("Leave type code {0} already exists")]
    DuplicateCode(String),

    /// Unexpected failure. The message is for logs only.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl EngineError {
    /// Shorthand for a missing entity.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Caller-visible category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Calendar(CalendarError::DateOutOfRange) | Self::Internal(_) => ErrorKind::Internal,
            Self::Calendar(_) | Self::Accrual(_) | Self::Policy(_) => ErrorKind::Validation,

            Self::Ledger(e) => match e {
                LedgerError::InvalidQuantity(_) => ErrorKind::Validation,
                LedgerError::InsufficientBalance { .. } => ErrorKind::InsufficientBalance,
                LedgerError::ExceedsHeld { .. } => ErrorKind::InvalidState,
                LedgerError::InvalidAdjustment(_) => ErrorKind::InvalidAdjustment,
                LedgerError::BalanceNotFound(_) => ErrorKind::NotFound,
            },

            Self::Workflow(e) if e.is_validation() => ErrorKind::Validation,
            Self::Workflow(_) => ErrorKind::InvalidState,

            Self::CashOut(e) => match e {
                CashOutError::Disabled
                | CashOutError::InvalidDays(_)
                | CashOutError::InvalidDivisor
                | CashOutError::RejectionReasonRequired => ErrorKind::Validation,
                CashOutError::PendingRequestExists => ErrorKind::PendingRequestExists,
                CashOutError::ExceedsEligibleDays { .. } => ErrorKind::ExceedsEligibleDays,
                CashOutError::InvalidTransition { .. } => ErrorKind::InvalidState,
            },

            Self::Recall(e) => match e {
                RecallError::NotApproved(_)
                | RecallError::NotOnLeave { .. }
                | RecallError::AlreadyRecalled
                | RecallError::AlreadyResponded(_) => ErrorKind::InvalidState,
                RecallError::PendingRecallExists => ErrorKind::PendingRequestExists,
                RecallError::Calendar(_)
                | RecallError::RecallDateOutOfRange(_)
                | RecallError::ReturnDateOutOfRange(_)
                | RecallError::ReasonRequired
                | RecallError::CommentsRequired => ErrorKind::Validation,
            },

            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::LeaveTypeInUse(_) | Self::DuplicateCode(_) => ErrorKind::Conflict,
        }
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        let message = err.to_string();
        match err.kind() {
            ErrorKind::Validation => Self::Validation(message),
            ErrorKind::InsufficientBalance => Self::InsufficientBalance(message),
            ErrorKind::InvalidState => Self::InvalidState(message),
            ErrorKind::PendingRequestExists => Self::PendingRequestExists(message),
            ErrorKind::ExceedsEligibleDays => Self::ExceedsEligibleDays(message),
            ErrorKind::InvalidAdjustment => Self::InvalidAdjustment(message),
            ErrorKind::NotFound => Self::NotFound(message),
            ErrorKind::Conflict => Self::Conflict(message),
            ErrorKind::Internal => {
                tracing::error!(error = %err, "internal engine error");
                Self::internal()
            }
        }
    }
}
