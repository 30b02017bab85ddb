//! Recall error types.

use chrono::NaiveDate;
use thiserror::Error;

use crate::calendar::CalendarError;
use crate::recall::types::RecallStatus;
use crate::workflow::LeaveStatus;

/// Errors that can occur during recall operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecallError {
    /// Only approved leave can be recalled.
    #[error("Only approved leave can be recalled (status {0})")]
    NotApproved(LeaveStatus),

    /// The employee is not on leave today.
    #[error("Leave {start}..{end} is not in progress on {today}")]
    NotOnLeave {
        /// Current date.
        today: NaiveDate,
        /// First day of leave.
        start: NaiveDate,
        /// Last day of leave.
        end: NaiveDate,
    },

    /// Recall date must fall between today and the end of the leave.
    #[error("Recall date {0} is outside the remaining leave period")]
    RecallDateOutOfRange(NaiveDate),

    /// Return date must fall within the leave period.
    #[error("Return date {0} is outside the leave period")]
    ReturnDateOutOfRange(NaiveDate),

    /// Recall reason is required.
    #[error("Recall reason is required")]
    ReasonRequired,

    /// Declining requires comments.
    #[error("Comments are required when declining a recall")]
    CommentsRequired,

    /// The application already has a pending recall.
    #[error("A recall is already pending for this application")]
    PendingRecallExists,

    /// The application was already cut short by an accepted recall.
    #[error("This leave has already been recalled")]
    AlreadyRecalled,

    /// The recall was already answered.
    #[error("Recall already {0}")]
    AlreadyResponded(RecallStatus),

    /// Refund computation failed.
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

impl RecallError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::RecallDateOutOfRange(_)
            | Self::ReturnDateOutOfRange(_)
            | Self::ReasonRequired
            | Self::CommentsRequired => 400,
            Self::NotApproved(_)
            | Self::NotOnLeave { .. }
            | Self::PendingRecallExists
            | Self::AlreadyRecalled
            | Self::AlreadyResponded(_) => 409,
            Self::Calendar(e) => e.status_code(),
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotApproved(_) => "LEAVE_NOT_APPROVED",
            Self::NotOnLeave { .. } => "NOT_ON_LEAVE",
            Self::RecallDateOutOfRange(_) => "RECALL_DATE_OUT_OF_RANGE",
            Self::ReturnDateOutOfRange(_) => "RETURN_DATE_OUT_OF_RANGE",
            Self::ReasonRequired => "RECALL_REASON_REQUIRED",
            Self::CommentsRequired => "COMMENTS_REQUIRED",
            Self::PendingRecallExists => "PENDING_RECALL_EXISTS",
            Self::AlreadyRecalled => "LEAVE_ALREADY_RECALLED",
            Self::AlreadyResponded(_) => "RECALL_ALREADY_RESPONDED",
            Self::Calendar(e) => e.error_code(),
        }
    }
}
