//! Ledger domain types.

use leavebook_shared::types::{EmployeeId, LeaveTypeId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one balance: an employee's days of one leave type in one fiscal year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BalanceKey {
    /// Employee owning the balance.
    pub employee_id: EmployeeId,
    /// Leave type of the balance.
    pub leave_type_id: LeaveTypeId,
    /// Fiscal year label.
    pub fiscal_year: i32,
}

impl BalanceKey {
    /// Creates a balance key.
    #[must_use]
    pub const fn new(employee_id: EmployeeId, leave_type_id: LeaveTypeId, fiscal_year: i32) -> Self {
        Self {
            employee_id,
            leave_type_id,
            fiscal_year,
        }
    }

    /// Returns the key for the same employee and type in the following year.
    #[must_use]
    pub const fn next_year(&self) -> Self {
        Self::new(self.employee_id, self.leave_type_id, self.fiscal_year + 1)
    }
}

impl fmt::Display for BalanceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.employee_id, self.leave_type_id, self.fiscal_year
        )
    }
}

/// Which bucket a release returns days from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseSource {
    /// Days still reserved by an in-flight request.
    Pending,
    /// Days already consumed by an approved request.
    Used,
}

impl fmt::Display for ReleaseSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("pending"),
            Self::Used => f.write_str("used"),
        }
    }
}

/// Direction of an administrative adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentDirection {
    /// Adds days.
    Credit,
    /// Removes days.
    Debit,
}
