//! Notification payloads.
//!
//! The core decides *that* someone is notified and *what* they are told.
//! Delivery belongs to a dispatcher outside this crate.

use chrono::NaiveDate;
use leavebook_shared::types::EmployeeId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;

use crate::cashout::CashOutRequest;
use crate::ledger::BalanceKey;
use crate::recall::LeaveRecall;
use crate::workflow::LeaveApplication;

/// Which message to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationTemplate {
    /// An application was submitted.
    LeaveSubmitted,
    /// An application moved to the next approver.
    LeaveStageAdvanced,
    /// An application was fully approved.
    LeaveApproved,
    /// An application was rejected.
    LeaveRejected,
    /// An application was cancelled.
    LeaveCancelled,
    /// The sweep advanced a stale application.
    AutoApproved,
    /// A manager recalled the employee from leave.
    RecallCreated,
    /// The employee answered a recall.
    RecallResolved,
    /// A cash-out request changed status.
    CashOutUpdated,
    /// Carried-over days expire soon.
    BalanceExpiring,
    /// Carried-over days expired.
    BalanceExpired,
}

impl NotificationTemplate {
    /// Returns the string representation of the template.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LeaveSubmitted => "LEAVE_SUBMITTED",
            Self::LeaveStageAdvanced => "LEAVE_STAGE_ADVANCED",
            Self::LeaveApproved => "LEAVE_APPROVED",
            Self::LeaveRejected => "LEAVE_REJECTED",
            Self::LeaveCancelled => "LEAVE_CANCELLED",
            Self::AutoApproved => "AUTO_APPROVED",
            Self::RecallCreated => "RECALL_CREATED",
            Self::RecallResolved => "RECALL_RESOLVED",
            Self::CashOutUpdated => "CASH_OUT_UPDATED",
            Self::BalanceExpiring => "BALANCE_EXPIRING",
            Self::BalanceExpired => "BALANCE_EXPIRED",
        }
    }
}

impl fmt::Display for NotificationTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A message addressed to one employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Recipient.
    pub employee_id: EmployeeId,
    /// Message kind.
    pub template: NotificationTemplate,
    /// Template variables.
    pub payload: Value,
}

impl Notification {
    /// Notification about a leave application, addressed to its applicant.
    #[must_use]
    pub fn for_application(template: NotificationTemplate, application: &LeaveApplication) -> Self {
        Self {
            employee_id: application.employee_id,
            template,
            payload: json!({
                "application_id": application.id,
                "leave_type_id": application.leave_type_id,
                "status": application.status,
                "start_date": application.start_date,
                "end_date": application.end_date,
                "requested_days": application.requested_days,
                "return_date": application.return_date,
                "rejection_reason": application.rejection_reason,
            }),
        }
    }

    /// Notification about a recall, addressed to `recipient`.
    #[must_use]
    pub fn for_recall(
        template: NotificationTemplate,
        recipient: EmployeeId,
        recall: &LeaveRecall,
    ) -> Self {
        Self {
            employee_id: recipient,
            template,
            payload: json!({
                "recall_id": recall.id,
                "application_id": recall.leave_application_id,
                "status": recall.status,
                "recall_date": recall.recall_date,
                "reason": recall.reason,
                "employee_response": recall.employee_response,
                "refunded_days": recall.refunded_days,
            }),
        }
    }

    /// Notification about a cash-out request, addressed to its requester.
    #[must_use]
    pub fn for_cash_out(request: &CashOutRequest) -> Self {
        Self {
            employee_id: request.employee_id,
            template: NotificationTemplate::CashOutUpdated,
            payload: json!({
                "cash_out_id": request.id,
                "status": request.status,
                "days": request.days_cashed_out,
                "cash_value": request.cash_value,
                "rejection_reason": request.rejection_reason,
            }),
        }
    }

    /// Warning or confirmation about expiring carried-over days.
    #[must_use]
    pub fn for_expiry(
        template: NotificationTemplate,
        key: &BalanceKey,
        days: Decimal,
        expiry_date: NaiveDate,
    ) -> Self {
        Self {
            employee_id: key.employee_id,
            template,
            payload: json!({
                "leave_type_id": key.leave_type_id,
                "fiscal_year": key.fiscal_year,
                "days": days,
                "expiry_date": expiry_date,
            }),
        }
    }
}
