//! Business rule validation for leave submissions.

use chrono::NaiveDate;
use leavebook_shared::types::ApplicationId;
use rust_decimal::Decimal;

use crate::calendar::CalendarService;
use crate::policy::{EmployeeProfile, LeaveType};
use crate::workflow::error::WorkflowError;
use crate::workflow::types::{LeaveApplication, LeaveRequest};

/// Validates a request against its leave type and the applicant.
///
/// # Errors
///
/// Returns the first rule the request breaks.
pub fn validate_request(
    request: &LeaveRequest,
    leave_type: &LeaveType,
    profile: &EmployeeProfile,
    today: NaiveDate,
) -> Result<(), WorkflowError> {
    if !leave_type.is_active {
        return Err(WorkflowError::LeaveTypeInactive(leave_type.code.clone()));
    }
    if request.end_date < request.start_date {
        return Err(WorkflowError::InvalidDateRange {
            start: request.start_date,
            end: request.end_date,
        });
    }
    if request.start_date < today {
        return Err(WorkflowError::StartInPast {
            start: request.start_date,
            today,
        });
    }
    if !leave_type.applicable_gender.allows(profile.gender) {
        return Err(WorkflowError::GenderNotEligible(leave_type.code.clone()));
    }
    let has_attachment = request
        .attachment_url
        .as_deref()
        .is_some_and(|url| !url.trim().is_empty());
    if leave_type.requires_attachment && !has_attachment {
        return Err(WorkflowError::AttachmentRequired(leave_type.code.clone()));
    }
    Ok(())
}

/// Rejects a range that counts no leave days.
///
/// # Errors
///
/// Returns `WorkflowError::NoLeaveDays` when `requested_days` is not positive.
pub fn ensure_leave_days(requested_days: Decimal) -> Result<(), WorkflowError> {
    if requested_days <= Decimal::ZERO {
        return Err(WorkflowError::NoLeaveDays(requested_days));
    }
    Ok(())
}

/// Finds an open application of the same employee overlapping `[start, end]`.
pub fn find_overlap<'a>(
    existing: impl IntoIterator<Item = &'a LeaveApplication>,
    start: NaiveDate,
    end: NaiveDate,
) -> Option<ApplicationId> {
    existing
        .into_iter()
        .filter(|app| app.is_open())
        .find(|app| CalendarService::ranges_overlap(app.start_date, app.end_date, start, end))
        .map(|app| app.id)
}
