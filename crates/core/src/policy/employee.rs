//! Employee data supplied by the identity/employment provider.

use chrono::NaiveDate;
use leavebook_shared::types::EmployeeId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Employee gender as recorded by HR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
}

/// Read-only employee facts used by accrual, approval and cash-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    /// Employee identifier.
    pub employee_id: EmployeeId,
    /// Manager-level role (routes approvals through the CEO stage).
    pub is_manager: bool,
    /// Current monthly salary.
    pub monthly_salary: Decimal,
    /// First day of employment.
    pub hire_date: NaiveDate,
    /// Gender used for leave-type eligibility.
    pub gender: Gender,
}
