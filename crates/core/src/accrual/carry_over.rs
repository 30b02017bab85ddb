//! Fiscal-year rollover of unused days.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::LeaveBalance;
use crate::policy::LeaveType;

/// Result of a rollover attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarryOverOutcome {
    /// The leave type does not carry unused days forward.
    NotAllowed,
    /// The target balance already received a carry-over.
    AlreadyApplied,
    /// Days were carried into the target balance.
    Applied {
        /// Days credited.
        days: Decimal,
        /// When the carried days expire, if ever.
        expiry_date: Option<NaiveDate>,
    },
}

/// Stateless carry-over calculator.
pub struct CarryOverService;

impl CarryOverService {
    /// Expiry date for days carried over on `rollover_date`.
    ///
    /// Returns `None` when carried days never expire or the date overflows.
    #[must_use]
    pub fn expiry_date(rollover_date: NaiveDate, expiry_months: Option<u32>) -> Option<NaiveDate> {
        expiry_months.and_then(|months| rollover_date.checked_add_months(Months::new(months)))
    }

    /// Carries the unused days of `previous` into `target`.
    ///
    /// `target` must be the balance for the fiscal year after `previous`.
    pub fn rollover(
        leave_type: &LeaveType,
        previous: &LeaveBalance,
        target: &mut LeaveBalance,
        rollover_date: NaiveDate,
    ) -> CarryOverOutcome {
        if !leave_type.is_carry_over_allowed {
            return CarryOverOutcome::NotAllowed;
        }

        let days = previous.remaining_days().max(Decimal::ZERO);
        let expiry_date = Self::expiry_date(rollover_date, leave_type.carry_over_expiry_months);
        if target.apply_carry_over(days, previous.key.fiscal_year, expiry_date) {
            CarryOverOutcome::Applied { days, expiry_date }
        } else {
            CarryOverOutcome::AlreadyApplied
        }
    }
}
