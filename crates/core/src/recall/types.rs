//! Recall domain types.

use chrono::{DateTime, NaiveDate, Utc};
use leavebook_shared::types::{ApplicationId, EmployeeId, RecallId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Recall status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecallStatus {
    /// Awaiting the employee's answer.
    Pending,
    /// The employee returns early; unused days were refunded.
    Accepted,
    /// The employee stays on leave.
    Declined,
}

impl RecallStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Accepted => "ACCEPTED",
            Self::Declined => "DECLINED",
        }
    }
}

impl fmt::Display for RecallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The employee's answer to a recall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecallDecision {
    /// Return to work.
    Accept,
    /// Stay on leave.
    Decline,
}

/// A manager's request that an employee return early from approved leave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRecall {
    /// Unique identifier.
    pub id: RecallId,
    /// Recalled application.
    pub leave_application_id: ApplicationId,
    /// Manager who issued the recall.
    pub recalled_by: EmployeeId,
    /// Date the employee is asked to be back.
    pub recall_date: NaiveDate,
    /// Manager's reason.
    pub reason: String,
    /// Current status.
    pub status: RecallStatus,
    /// Employee's comments.
    pub employee_response: Option<String>,
    /// Date the employee actually returns, if different from `recall_date`.
    pub actual_return_date: Option<NaiveDate>,
    /// Days returned to the balance.
    pub refunded_days: Decimal,
    /// When the recall was issued.
    pub created_at: DateTime<Utc>,
    /// When the employee answered.
    pub responded_at: Option<DateTime<Utc>>,
}

impl LeaveRecall {
    /// First day back at work once accepted.
    #[must_use]
    pub fn effective_return_date(&self) -> NaiveDate {
        self.actual_return_date.unwrap_or(self.recall_date)
    }
}
