//! Leave type definitions.

use leavebook_shared::types::LeaveTypeId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::DayCounting;
use crate::policy::employee::Gender;
use crate::policy::error::PolicyError;

/// Which employees a leave type applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicableGender {
    /// Every employee.
    #[default]
    All,
    /// Male employees only.
    Male,
    /// Female employees only.
    Female,
}

impl ApplicableGender {
    /// Returns true if an employee of the given gender may take this leave.
    #[must_use]
    pub fn allows(self, gender: Gender) -> bool {
        match self {
            Self::All => true,
            Self::Male => gender == Gender::Male,
            Self::Female => gender == Gender::Female,
        }
    }
}

/// A configured kind of leave (annual, sick, maternity, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveType {
    /// Unique identifier.
    #[serde(default)]
    pub id: LeaveTypeId,
    /// Unique short code (e.g. "ANNUAL").
    pub code: String,
    /// Display name.
    pub name: String,
    /// Base yearly allowance before tenure bonuses.
    pub default_allowance_days: Decimal,
    /// Days added per completed tenure period.
    #[serde(default)]
    pub incremental_days_per_year: Decimal,
    /// Length of a tenure period in years (0 = use the policy default).
    #[serde(default)]
    pub incremental_period_years: u32,
    /// Hard cap on the yearly entitlement.
    #[serde(default)]
    pub max_accrual_limit: Option<Decimal>,
    /// Unused days roll into the next fiscal year.
    #[serde(default)]
    pub is_carry_over_allowed: bool,
    /// Months after rollover before carried days expire (None = never).
    #[serde(default)]
    pub carry_over_expiry_months: Option<u32>,
    /// Paid leave.
    #[serde(default = "default_true")]
    pub is_paid: bool,
    /// Applications must carry an attachment URL.
    #[serde(default)]
    pub requires_attachment: bool,
    /// Weekends and holidays count towards the leave.
    #[serde(default)]
    pub is_calendar_days: bool,
    /// Gender eligibility.
    #[serde(default)]
    pub applicable_gender: ApplicableGender,
    /// Accepts new applications.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl LeaveType {
    /// Creates a working-day leave type with no tenure bonus or carry-over.
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>, allowance: Decimal) -> Self {
        Self {
            id: LeaveTypeId::new(),
            code: code.into(),
            name: name.into(),
            default_allowance_days: allowance,
            incremental_days_per_year: Decimal::ZERO,
            incremental_period_years: 0,
            max_accrual_limit: None,
            is_carry_over_allowed: false,
            carry_over_expiry_months: None,
            is_paid: true,
            requires_attachment: false,
            is_calendar_days: false,
            applicable_gender: ApplicableGender::All,
            is_active: true,
        }
    }

    /// Returns the day-counting rule for applications of this type.
    #[must_use]
    pub fn day_counting(&self) -> DayCounting {
        DayCounting::from_calendar_flag(self.is_calendar_days)
    }

    /// Validates the definition.
    ///
    /// # Errors
    ///
    /// Returns a `PolicyError` describing the first invalid field.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.code.trim().is_empty() {
            return Err(PolicyError::MissingField("code"));
        }
        if self.name.trim().is_empty() {
            return Err(PolicyError::MissingField("name"));
        }
        if self.default_allowance_days < Decimal::ZERO {
            return Err(PolicyError::NegativeValue("default_allowance_days"));
        }
        if self.incremental_days_per_year < Decimal::ZERO {
            return Err(PolicyError::NegativeValue("incremental_days_per_year"));
        }
        if self.max_accrual_limit.is_some_and(|cap| cap < Decimal::ZERO) {
            return Err(PolicyError::NegativeValue("max_accrual_limit"));
        }
        Ok(())
    }
}
