//! Recall service.
//!
//! An accepted recall refunds the leave days from the return date through
//! the original end date, counted with the leave type's own rules and never
//! more than the application originally debited.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::calendar::{CalendarService, DayCounting, HolidayCalendar, WeekShape};
use crate::recall::error::RecallError;
use crate::recall::types::{RecallDecision, RecallStatus};
use crate::workflow::{LeaveApplication, LeaveStatus};

/// Stateless recall rules.
pub struct RecallService;

impl RecallService {
    /// Checks that `application` may be recalled for `recall_date`.
    ///
    /// # Errors
    ///
    /// `ReasonRequired`, `NotApproved`, `NotOnLeave`, `RecallDateOutOfRange`,
    /// then `PendingRecallExists` or `AlreadyRecalled` from the statuses of
    /// the application's earlier recalls.
    pub fn validate_recall(
        application: &LeaveApplication,
        recall_date: NaiveDate,
        reason: &str,
        today: NaiveDate,
        earlier: &[RecallStatus],
    ) -> Result<(), RecallError> {
        if reason.trim().is_empty() {
            return Err(RecallError::ReasonRequired);
        }
        if application.status != LeaveStatus::Approved {
            return Err(RecallError::NotApproved(application.status));
        }
        if today < application.start_date || today > application.end_date {
            return Err(RecallError::NotOnLeave {
                today,
                start: application.start_date,
                end: application.end_date,
            });
        }
        if recall_date < today || recall_date > application.end_date {
            return Err(RecallError::RecallDateOutOfRange(recall_date));
        }
        if earlier.contains(&RecallStatus::Pending) {
            return Err(RecallError::PendingRecallExists);
        }
        Self::ensure_not_recalled(earlier)
    }

    /// An application is refunded by at most one accepted recall.
    ///
    /// # Errors
    ///
    /// `AlreadyRecalled` when `earlier` holds an accepted recall.
    pub fn ensure_not_recalled(earlier: &[RecallStatus]) -> Result<(), RecallError> {
        if earlier.contains(&RecallStatus::Accepted) {
            return Err(RecallError::AlreadyRecalled);
        }
        Ok(())
    }

    /// Validates an answer to a pending recall and returns the new status.
    ///
    /// # Errors
    ///
    /// `AlreadyResponded` unless pending, `CommentsRequired` when declining
    /// without comments.
    pub fn respond(
        current: RecallStatus,
        decision: RecallDecision,
        comments: Option<&str>,
    ) -> Result<RecallStatus, RecallError> {
        if current != RecallStatus::Pending {
            return Err(RecallError::AlreadyResponded(current));
        }
        match decision {
            RecallDecision::Accept => Ok(RecallStatus::Accepted),
            RecallDecision::Decline => {
                if comments.is_none_or(|c| c.trim().is_empty()) {
                    return Err(RecallError::CommentsRequired);
                }
                Ok(RecallStatus::Declined)
            }
        }
    }

    /// Days to refund when the employee is back on `return_date`.
    ///
    /// # Errors
    ///
    /// `ReturnDateOutOfRange` when `return_date` precedes the leave start.
    pub fn refund_days(
        application: &LeaveApplication,
        return_date: NaiveDate,
        shape: WeekShape,
        holidays: &HolidayCalendar,
        counting: DayCounting,
    ) -> Result<Decimal, RecallError> {
        if return_date < application.start_date {
            return Err(RecallError::ReturnDateOutOfRange(return_date));
        }
        if return_date > application.end_date {
            return Ok(Decimal::ZERO);
        }
        let unused = CalendarService::working_days_between(
            return_date,
            application.end_date,
            shape,
            holidays,
            counting,
        )?;
        Ok(unused.min(application.requested_days))
    }
}
