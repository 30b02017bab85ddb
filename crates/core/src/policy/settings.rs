//! Leave settings.
//!
//! Settings are never edited in place. Publishing a change produces a new
//! [`PolicySnapshot`] with a higher version, and every accrual, application
//! and cash-out records the version it was computed under.

use chrono::NaiveDate;
use leavebook_shared::types::RoundingMode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::WeekShape;
use crate::policy::error::PolicyError;

/// When the accrual year starts for an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccrualBasis {
    /// From the most recent hire-date anniversary.
    Anniversary,
    /// From the start of the fiscal year.
    #[default]
    CalendarYear,
}

/// How often accrued days are credited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccrualFrequency {
    /// A fraction of a day every day.
    #[default]
    Daily,
    /// Whole-month increments on month boundaries.
    Monthly,
}

/// Organization-wide leave settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaveSettings {
    /// Working week shape.
    pub week_shape: WeekShape,
    /// First month of the fiscal year (1-12).
    pub fiscal_year_start_month: u32,
    /// Accrual year start rule.
    pub accrual_basis: AccrualBasis,
    /// Accrual crediting frequency.
    pub accrual_frequency: AccrualFrequency,
    /// Days over which a yearly entitlement accrues under daily accrual.
    pub accrual_divisor: Decimal,
    /// Tenure period used when a leave type does not define its own.
    pub tenure_increment_period_years: u32,
    /// Tenure bonus used when a leave type does not define its own.
    pub tenure_increment_days: Decimal,
    /// Cash-out of unused annual leave is enabled.
    pub encashment_enabled: bool,
    /// Monthly salary divided by this gives the daily encashment rate.
    pub encashment_salary_divisor: Decimal,
    /// Maximum days per cash-out.
    pub max_encashment_days: Decimal,
    /// Rounding applied to cash-out values.
    pub rounding_mode: RoundingMode,
    /// Days before a carry-over expiry to warn the employee.
    pub expiry_notification_days: u32,
    /// Manager applications pass through the CEO stage.
    pub require_ceo_approval_for_managers: bool,
    /// Idle days after which a pending stage advances automatically.
    pub auto_approve_after_days: Option<u32>,
    /// Code of the leave type that cash-out draws from.
    pub annual_leave_code: String,
}

impl Default for LeaveSettings {
    fn default() -> Self {
        Self {
            week_shape: WeekShape::default(),
            fiscal_year_start_month: 1,
            accrual_basis: AccrualBasis::CalendarYear,
            accrual_frequency: AccrualFrequency::Daily,
            accrual_divisor: Decimal::from(365),
            tenure_increment_period_years: 0,
            tenure_increment_days: Decimal::ZERO,
            encashment_enabled: false,
            encashment_salary_divisor: Decimal::from(30),
            max_encashment_days: Decimal::from(10),
            rounding_mode: RoundingMode::Round,
            expiry_notification_days: 30,
            require_ceo_approval_for_managers: true,
            auto_approve_after_days: None,
            annual_leave_code: "ANNUAL".to_string(),
        }
    }
}

impl LeaveSettings {
    /// Validates the settings.
    ///
    /// # Errors
    ///
    /// Returns a `PolicyError` describing the first invalid field.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if !(1..=12).contains(&self.fiscal_year_start_month) {
            return Err(PolicyError::InvalidFiscalMonth(self.fiscal_year_start_month));
        }
        if self.accrual_divisor <= Decimal::ZERO {
            return Err(PolicyError::NonPositiveDivisor("accrual_divisor"));
        }
        if self.encashment_salary_divisor <= Decimal::ZERO {
            return Err(PolicyError::NonPositiveDivisor("encashment_salary_divisor"));
        }
        if self.max_encashment_days < Decimal::ZERO {
            return Err(PolicyError::NegativeValue("max_encashment_days"));
        }
        if self.tenure_increment_days < Decimal::ZERO {
            return Err(PolicyError::NegativeValue("tenure_increment_days"));
        }
        if self.annual_leave_code.trim().is_empty() {
            return Err(PolicyError::MissingField("annual_leave_code"));
        }
        Ok(())
    }
}

/// An immutable, versioned settings snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicySnapshot {
    /// Monotonic policy version, starting at 1.
    pub version: u32,
    /// First day the snapshot applies.
    pub effective_date: NaiveDate,
    /// The settings themselves.
    pub settings: LeaveSettings,
}
