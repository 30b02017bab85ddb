//! Cash-out service.
//!
//! cash_value = rounding_mode(days × monthly_salary / salary_divisor)
//!
//! The division happens at full precision; only the final amount is rounded.

use leavebook_shared::types::{MONEY_SCALE, RoundingMode};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::cashout::error::CashOutError;
use crate::cashout::types::{CashOutEligibility, CashOutStatus, IneligibleReason};
use crate::policy::LeaveSettings;

/// Stateless cash-out calculator and state machine.
pub struct CashOutService;

impl CashOutService {
    /// Salary per day at full precision.
    ///
    /// # Errors
    ///
    /// Returns `CashOutError::InvalidDivisor` for a non-positive divisor.
    pub fn daily_rate(monthly_salary: Decimal, divisor: Decimal) -> Result<Decimal, CashOutError> {
        if divisor <= Decimal::ZERO {
            return Err(CashOutError::InvalidDivisor);
        }
        Ok(monthly_salary / divisor)
    }

    /// Payable amount for `days` under `mode`.
    ///
    /// # Errors
    ///
    /// Returns `CashOutError::InvalidDivisor` for a non-positive divisor.
    pub fn cash_value(
        days: Decimal,
        monthly_salary: Decimal,
        divisor: Decimal,
        mode: RoundingMode,
    ) -> Result<Decimal, CashOutError> {
        if divisor <= Decimal::ZERO {
            return Err(CashOutError::InvalidDivisor);
        }
        Ok(mode.apply(days * monthly_salary / divisor))
    }

    /// What the employee may encash given the annual-leave remaining balance.
    ///
    /// # Errors
    ///
    /// Returns `CashOutError::InvalidDivisor` for a non-positive divisor.
    pub fn eligibility(
        settings: &LeaveSettings,
        remaining_days: Decimal,
        has_pending_request: bool,
        monthly_salary: Decimal,
    ) -> Result<CashOutEligibility, CashOutError> {
        let divisor = settings.encashment_salary_divisor;
        let daily_rate = Self::daily_rate(monthly_salary, divisor)?
            .round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);

        let reason = if !settings.encashment_enabled {
            Some(IneligibleReason::EncashmentDisabled)
        } else if has_pending_request {
            Some(IneligibleReason::PendingRequest)
        } else if remaining_days <= Decimal::ZERO {
            Some(IneligibleReason::NoRemainingBalance)
        } else {
            None
        };

        if reason.is_some() {
            return Ok(CashOutEligibility {
                eligible: false,
                eligible_days: Decimal::ZERO,
                daily_rate,
                max_amount: Decimal::ZERO,
                reason,
            });
        }

        let eligible_days = remaining_days.min(settings.max_encashment_days.max(Decimal::ZERO));
        let max_amount =
            Self::cash_value(eligible_days, monthly_salary, divisor, settings.rounding_mode)?;

        Ok(CashOutEligibility {
            eligible: eligible_days > Decimal::ZERO,
            eligible_days,
            daily_rate,
            max_amount,
            reason: None,
        })
    }

    /// Checks a requested day count against the current eligibility.
    ///
    /// # Errors
    ///
    /// `InvalidDays` for a non-positive count, `Disabled` or
    /// `PendingRequestExists` when ineligible, `ExceedsEligibleDays` when
    /// `days` is above `eligible_days`.
    pub fn validate_request(
        days: Decimal,
        eligibility: &CashOutEligibility,
    ) -> Result<(), CashOutError> {
        if days <= Decimal::ZERO {
            return Err(CashOutError::InvalidDays(days));
        }
        match eligibility.reason {
            Some(IneligibleReason::EncashmentDisabled) => return Err(CashOutError::Disabled),
            Some(IneligibleReason::PendingRequest) => {
                return Err(CashOutError::PendingRequestExists);
            }
            Some(IneligibleReason::NoRemainingBalance) | None => {}
        }
        if days > eligibility.eligible_days {
            return Err(CashOutError::ExceedsEligibleDays {
                requested: days,
                eligible: eligibility.eligible_days,
            });
        }
        Ok(())
    }

    /// PENDING → APPROVED.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` from any other status.
    pub fn approve(current: CashOutStatus) -> Result<CashOutStatus, CashOutError> {
        Self::transition(current, CashOutStatus::Pending, CashOutStatus::Approved)
    }

    /// PENDING → REJECTED.
    ///
    /// # Errors
    ///
    /// `RejectionReasonRequired` for a blank reason, `InvalidTransition`
    /// from any status other than PENDING.
    pub fn reject(current: CashOutStatus, reason: &str) -> Result<CashOutStatus, CashOutError> {
        if reason.trim().is_empty() {
            return Err(CashOutError::RejectionReasonRequired);
        }
        Self::transition(current, CashOutStatus::Pending, CashOutStatus::Rejected)
    }

    /// APPROVED → PAID.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` from any other status.
    pub fn mark_paid(current: CashOutStatus) -> Result<CashOutStatus, CashOutError> {
        Self::transition(current, CashOutStatus::Approved, CashOutStatus::Paid)
    }

    fn transition(
        current: CashOutStatus,
        required: CashOutStatus,
        to: CashOutStatus,
    ) -> Result<CashOutStatus, CashOutError> {
        if current == required {
            Ok(to)
        } else {
            Err(CashOutError::InvalidTransition { from: current, to })
        }
    }
}
