//! Accrual service.
//!
//! entitlement = min(base + floor(years / period) * increment, cap)
//!
//! Daily accrual credits entitlement / divisor per elapsed day; monthly
//! accrual credits entitlement / 12 per completed month. Both stop at the
//! entitlement and are truncated to two decimal places so an employee is
//! never credited a fraction of a cent-day they have not earned yet.

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::accrual::error::AccrualError;
use crate::calendar::{fiscal_year_bounds, fiscal_year_of};
use crate::policy::{AccrualBasis, AccrualFrequency, LeaveSettings, LeaveType};

/// Decimal places kept on accrued days.
const ACCRUAL_SCALE: u32 = 2;

/// Months per accrual year.
const MONTHS_PER_YEAR: i64 = 12;

/// Full accrual computation for one employee and leave type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccrualResult {
    /// Completed years of service at `as_of`.
    pub service_years: u32,
    /// Yearly entitlement after tenure bonus and cap.
    pub entitlement: Decimal,
    /// First day of the current accrual period.
    pub accrual_start: NaiveDate,
    /// Days accrued from `accrual_start` through `as_of`.
    pub accrued: Decimal,
}

/// Stateless accrual calculator.
pub struct AccrualService;

impl AccrualService {
    /// Completed years of service between `hire_date` and `as_of`.
    #[must_use]
    pub fn service_years(hire_date: NaiveDate, as_of: NaiveDate) -> u32 {
        if as_of <= hire_date {
            return 0;
        }
        let mut years = as_of.year() - hire_date.year();
        if (as_of.month(), as_of.day()) < (hire_date.month(), hire_date.day()) {
            years -= 1;
        }
        u32::try_from(years.max(0)).unwrap_or(0)
    }

    /// Yearly entitlement for a leave type at the given tenure.
    ///
    /// A leave type with a zero tenure period falls back to the policy-wide
    /// increment. When neither defines a period there is no bonus.
    #[must_use]
    pub fn entitlement_for_year(
        leave_type: &LeaveType,
        settings: &LeaveSettings,
        service_years: u32,
    ) -> Decimal {
        let (period, increment) = if leave_type.incremental_period_years > 0 {
            (
                leave_type.incremental_period_years,
                leave_type.incremental_days_per_year,
            )
        } else {
            (
                settings.tenure_increment_period_years,
                settings.tenure_increment_days,
            )
        };

        let bonus = if period == 0 {
            Decimal::ZERO
        } else {
            Decimal::from(service_years / period) * increment
        };

        let total = leave_type.default_allowance_days + bonus;
        match leave_type.max_accrual_limit {
            Some(cap) => total.min(cap),
            None => total,
        }
    }

    /// Most recent hire anniversary on or before `as_of`.
    ///
    /// Employees hired on 29 February celebrate on 28 February in common years.
    #[must_use]
    pub fn anniversary_on_or_before(hire_date: NaiveDate, as_of: NaiveDate) -> NaiveDate {
        if as_of <= hire_date {
            return hire_date;
        }
        let candidate = Self::anniversary_in(hire_date, as_of.year());
        if candidate <= as_of {
            candidate
        } else {
            Self::anniversary_in(hire_date, as_of.year() - 1).max(hire_date)
        }
    }

    fn anniversary_in(hire_date: NaiveDate, year: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, hire_date.month(), hire_date.day())
            .or_else(|| NaiveDate::from_ymd_opt(year, hire_date.month(), 28))
            .unwrap_or(hire_date)
    }

    /// First day of the accrual period containing `as_of`.
    ///
    /// # Errors
    ///
    /// Returns a calendar error for an invalid fiscal start month.
    pub fn accrual_start(
        hire_date: NaiveDate,
        as_of: NaiveDate,
        settings: &LeaveSettings,
    ) -> Result<NaiveDate, AccrualError> {
        let start = match settings.accrual_basis {
            AccrualBasis::Anniversary => Self::anniversary_on_or_before(hire_date, as_of),
            AccrualBasis::CalendarYear => {
                let year = fiscal_year_of(as_of, settings.fiscal_year_start_month)?;
                fiscal_year_bounds(year, settings.fiscal_year_start_month)?.0
            }
        };
        Ok(start.max(hire_date))
    }

    /// Days elapsed from `start` through `as_of`, inclusive.
    #[must_use]
    pub fn days_elapsed(start: NaiveDate, as_of: NaiveDate) -> i64 {
        if as_of < start {
            return 0;
        }
        (as_of - start).num_days() + 1
    }

    /// Whole months completed from `start` by the end of `as_of`.
    #[must_use]
    pub fn months_elapsed(start: NaiveDate, as_of: NaiveDate) -> i64 {
        if as_of < start {
            return 0;
        }
        let end = as_of + Duration::days(1);
        let mut months = i64::from(end.year() - start.year()) * MONTHS_PER_YEAR
            + i64::from(end.month())
            - i64::from(start.month());
        if end.day() < start.day() {
            months -= 1;
        }
        months.max(0)
    }

    /// Days accrued out of `entitlement` after the given elapsed time.
    ///
    /// # Errors
    ///
    /// Returns `AccrualError::InvalidDivisor` if the accrual divisor is not positive.
    pub fn accrued_to_date(
        entitlement: Decimal,
        settings: &LeaveSettings,
        days_elapsed: i64,
        months_elapsed: i64,
    ) -> Result<Decimal, AccrualError> {
        let raw = match settings.accrual_frequency {
            AccrualFrequency::Daily => {
                if settings.accrual_divisor <= Decimal::ZERO {
                    return Err(AccrualError::InvalidDivisor);
                }
                entitlement * Decimal::from(days_elapsed.max(0)) / settings.accrual_divisor
            }
            AccrualFrequency::Monthly => {
                entitlement * Decimal::from(months_elapsed.clamp(0, MONTHS_PER_YEAR))
                    / Decimal::from(MONTHS_PER_YEAR)
            }
        };

        Ok(raw
            .min(entitlement)
            .max(Decimal::ZERO)
            .round_dp_with_strategy(ACCRUAL_SCALE, RoundingStrategy::ToZero))
    }

    /// Computes tenure, entitlement and accrued days for one leave type.
    ///
    /// # Errors
    ///
    /// Propagates calendar and divisor errors.
    pub fn accrue(
        leave_type: &LeaveType,
        settings: &LeaveSettings,
        hire_date: NaiveDate,
        as_of: NaiveDate,
    ) -> Result<AccrualResult, AccrualError> {
        let service_years = Self::service_years(hire_date, as_of);
        let entitlement = Self::entitlement_for_year(leave_type, settings, service_years);
        let accrual_start = Self::accrual_start(hire_date, as_of, settings)?;
        let accrued = Self::accrued_to_date(
            entitlement,
            settings,
            Self::days_elapsed(accrual_start, as_of),
            Self::months_elapsed(accrual_start, as_of),
        )?;

        Ok(AccrualResult {
            service_years,
            entitlement,
            accrual_start,
            accrued,
        })
    }
}
