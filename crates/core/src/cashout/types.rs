//! Cash-out domain types.

use chrono::{DateTime, Utc};
use leavebook_shared::types::{CashOutId, EmployeeId, LeaveTypeId, RoundingMode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cash-out request status.
///
/// PENDING → APPROVED → PAID, or PENDING → REJECTED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CashOutStatus {
    /// Awaiting a decision; days are reserved.
    Pending,
    /// Approved; days are used.
    Approved,
    /// Rejected; days were released.
    Rejected,
    /// Paid out by payroll.
    Paid,
}

impl CashOutStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Paid => "PAID",
        }
    }
}

impl fmt::Display for CashOutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why an employee cannot encash leave right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IneligibleReason {
    /// Encashment is switched off in the leave policy.
    EncashmentDisabled,
    /// Another cash-out request is still pending.
    PendingRequest,
    /// No annual leave remains.
    NoRemainingBalance,
}

impl fmt::Display for IneligibleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::EncashmentDisabled => "leave encashment is disabled",
            Self::PendingRequest => "a cash-out request is already pending",
            Self::NoRemainingBalance => "no annual leave remains",
        })
    }
}

/// What an employee may currently encash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashOutEligibility {
    /// True if a request may be submitted.
    pub eligible: bool,
    /// Upper bound on `days_cashed_out`.
    pub eligible_days: Decimal,
    /// Salary per day, rounded to cents for display.
    pub daily_rate: Decimal,
    /// Value of `eligible_days` under the policy rounding mode.
    pub max_amount: Decimal,
    /// Set when `eligible` is false.
    pub reason: Option<IneligibleReason>,
}

/// A request to convert unused annual leave into pay.
///
/// Salary, divisor and rounding mode are captured at submission so later
/// payroll or policy changes do not alter the agreed value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashOutRequest {
    /// Unique identifier.
    pub id: CashOutId,
    /// Requesting employee.
    pub employee_id: EmployeeId,
    /// Leave type the days come from (annual leave).
    pub leave_type_id: LeaveTypeId,
    /// Fiscal year of the debited balance.
    pub fiscal_year: i32,
    /// Days converted.
    pub days_cashed_out: Decimal,
    /// Monthly salary at submission.
    pub monthly_salary: Decimal,
    /// Salary divisor at submission.
    pub salary_divisor: Decimal,
    /// Rounding mode at submission.
    pub rounding_mode: RoundingMode,
    /// Payable amount.
    pub cash_value: Decimal,
    /// Current status.
    pub status: CashOutStatus,
    /// Reason given on rejection.
    pub rejection_reason: Option<String>,
    /// Submission time.
    pub created_at: DateTime<Utc>,
    /// Last status change.
    pub updated_at: DateTime<Utc>,
}
