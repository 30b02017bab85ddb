//! Workflow error types for the leave application lifecycle.

use chrono::NaiveDate;
use leavebook_shared::types::ApplicationId;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::workflow::types::{ApprovalAction, LeaveStatus};

/// Errors that can occur during workflow operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// The action is not allowed from the current status.
    #[error("Cannot apply {action} to an application in status {from}")]
    InvalidTransition {
        /// The current status.
        from: LeaveStatus,
        /// The attempted action.
        action: ApprovalAction,
    },

    /// Approved leave that already started cannot be cancelled.
    #[error("Leave starting {start_date} has already started")]
    AlreadyStarted {
        /// First day of leave.
        start_date: NaiveDate,
    },

    /// The end date precedes the start date.
    #[error("End date {end} is before start date {start}")]
    InvalidDateRange {
        /// Requested start.
        start: NaiveDate,
        /// Requested end.
        end: NaiveDate,
    },

    /// Leave cannot start in the past.
    #[error("Start date {start} is before today ({today})")]
    StartInPast {
        /// Requested start.
        start: NaiveDate,
        /// Current date.
        today: NaiveDate,
    },

    /// The applicant's gender is not eligible for this leave type.
    #[error("Leave type {0} is not available to this employee")]
    GenderNotEligible(String),

    /// The leave type requires a supporting document.
    #[error("Leave type {0} requires an attachment")]
    AttachmentRequired(String),

    /// The leave type no longer accepts applications.
    #[error("Leave type {0} is inactive")]
    LeaveTypeInactive(String),

    /// The requested range counts no leave days.
    #[error("Requested range contains no leave days (got {0})")]
    NoLeaveDays(Decimal),

    /// Another open application covers part of the range.
    #[error("Overlaps open application {0}")]
    Overlapping(ApplicationId),

    /// Rejection reason is required but not provided.
    #[error("Rejection reason is required")]
    RejectionReasonRequired,
}

impl WorkflowError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidDateRange { .. }
            | Self::StartInPast { .. }
            | Self::GenderNotEligible(_)
            | Self::AttachmentRequired(_)
            | Self::LeaveTypeInactive(_)
            | Self::NoLeaveDays(_)
            | Self::Overlapping(_)
            | Self::RejectionReasonRequired => 400,

            Self::InvalidTransition { .. } | Self::AlreadyStarted { .. } => 409,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::AlreadyStarted { .. } => "LEAVE_ALREADY_STARTED",
            Self::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
            Self::StartInPast { .. } => "START_IN_PAST",
            Self::GenderNotEligible(_) => "GENDER_NOT_ELIGIBLE",
            Self::AttachmentRequired(_) => "ATTACHMENT_REQUIRED",
            Self::LeaveTypeInactive(_) => "LEAVE_TYPE_INACTIVE",
            Self::NoLeaveDays(_) => "NO_LEAVE_DAYS",
            Self::Overlapping(_) => "OVERLAPPING_APPLICATION",
            Self::RejectionReasonRequired => "REJECTION_REASON_REQUIRED",
        }
    }

    /// Returns true for errors caused by the request contents rather than
    /// the application's current state.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        self.status_code() == 400
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transition_error() {
        let err = WorkflowError::InvalidTransition {
            from: LeaveStatus::Rejected,
            action: ApprovalAction::Approved,
        };
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.error_code(), "INVALID_TRANSITION");
        assert!(err.to_string().contains("REJECTED"));
        assert!(!err.is_validation());
    }

    #[test]
    fn test_validation_errors() {
        let start = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let err = WorkflowError::InvalidDateRange { start, end };
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "INVALID_DATE_RANGE");
        assert!(err.is_validation());

        let err = WorkflowError::AttachmentRequired("SICK".into());
        assert_eq!(err.error_code(), "ATTACHMENT_REQUIRED");
        assert!(err.to_string().contains("SICK"));
    }

    #[test]
    fn test_already_started_error() {
        let err = WorkflowError::AlreadyStarted {
            start_date: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
        };
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.error_code(), "LEAVE_ALREADY_STARTED");
    }

    #[test]
    fn test_rejection_reason_required_error() {
        let err = WorkflowError::RejectionReasonRequired;
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "REJECTION_REASON_REQUIRED");
    }
}
