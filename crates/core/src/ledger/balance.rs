//! Per-employee, per-leave-type, per-fiscal-year balance.
//!
//! remaining = accrued - used - pending, where
//! accrued = earned + carried_over - expired + adjusted.
//!
//! Every mutating method validates first and only then writes, so a
//! returned error leaves the balance exactly as it was. No successful
//! operation can leave `remaining` below zero.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::error::LedgerError;
use crate::ledger::types::{AdjustmentDirection, BalanceKey, ReleaseSource};

/// Result of an expiry check on a balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryOutcome {
    /// No carried-over days, or no expiry date.
    NotApplicable,
    /// The expiry date has not been reached.
    NotDue,
    /// Expiry already ran for this balance.
    AlreadyProcessed,
    /// The given number of carried-over days expired (possibly zero).
    Expired(Decimal),
}

/// Authoritative day balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveBalance {
    /// The balance key.
    pub key: BalanceKey,
    /// Full-year entitlement including tenure bonus and cap.
    pub annual_entitlement: Decimal,
    /// Days accrued so far from this year's entitlement.
    pub earned_days: Decimal,
    /// Days rolled over from the previous fiscal year.
    pub carried_over_days: Decimal,
    /// Carried-over days that expired unused.
    pub expired_days: Decimal,
    /// Net administrative adjustments (signed).
    pub adjusted_days: Decimal,
    /// Days consumed by approved requests.
    pub used_days: Decimal,
    /// Days reserved by in-flight requests.
    pub pending_days: Decimal,
    /// Date the carried-over portion expires.
    pub expiry_date: Option<NaiveDate>,
    /// Expiry has run for the carried-over portion.
    pub expiry_processed: bool,
    /// The pre-expiry warning was sent.
    pub expiry_warning_sent: bool,
    /// Fiscal year the carried-over days came from.
    pub carry_over_source_year: Option<i32>,
    /// Policy version of the latest accrual.
    pub policy_version: u32,
    /// Incremented on every successful mutation.
    pub version: u64,
}

impl LeaveBalance {
    /// Creates an empty balance.
    #[must_use]
    pub fn new(key: BalanceKey) -> Self {
        Self {
            key,
            annual_entitlement: Decimal::ZERO,
            earned_days: Decimal::ZERO,
            carried_over_days: Decimal::ZERO,
            expired_days: Decimal::ZERO,
            adjusted_days: Decimal::ZERO,
            used_days: Decimal::ZERO,
            pending_days: Decimal::ZERO,
            expiry_date: None,
            expiry_processed: false,
            expiry_warning_sent: false,
            carry_over_source_year: None,
            policy_version: 0,
            version: 0,
        }
    }

    /// Days earned to date, including carry-over and adjustments.
    #[must_use]
    pub fn accrued_entitlement(&self) -> Decimal {
        self.earned_days + self.carried_over_days - self.expired_days + self.adjusted_days
    }

    /// Days still available for new requests.
    #[must_use]
    pub fn remaining_days(&self) -> Decimal {
        self.accrued_entitlement() - self.used_days - self.pending_days
    }

    fn ensure_positive(days: Decimal) -> Result<(), LedgerError> {
        if days <= Decimal::ZERO {
            return Err(LedgerError::InvalidQuantity(days));
        }
        Ok(())
    }

    fn ensure_available(&self, days: Decimal) -> Result<(), LedgerError> {
        let available = self.remaining_days();
        if available < days {
            return Err(LedgerError::InsufficientBalance {
                requested: days,
                available,
            });
        }
        Ok(())
    }

    fn bump(&mut self) {
        self.version += 1;
    }

    /// Holds `days` for an in-flight request.
    ///
    /// # Errors
    ///
    /// `InvalidQuantity` for non-positive days, `InsufficientBalance` when
    /// fewer than `days` remain.
    pub fn reserve(&mut self, days: Decimal) -> Result<(), LedgerError> {
        Self::ensure_positive(days)?;
        self.ensure_available(days)?;
        self.pending_days += days;
        self.bump();
        Ok(())
    }

    /// Moves reserved days to used on final approval.
    ///
    /// # Errors
    ///
    /// `InvalidQuantity` for non-positive days, `ExceedsHeld` when fewer
    /// than `days` are pending.
    pub fn commit(&mut self, days: Decimal) -> Result<(), LedgerError> {
        Self::ensure_positive(days)?;
        if self.pending_days < days {
            return Err(LedgerError::ExceedsHeld {
                requested: days,
                held: self.pending_days,
                bucket: ReleaseSource::Pending,
            });
        }
        self.pending_days -= days;
        self.used_days += days;
        self.bump();
        Ok(())
    }

    /// Returns days to the available balance from the given bucket.
    ///
    /// # Errors
    ///
    /// `InvalidQuantity` for non-positive days, `ExceedsHeld` when the
    /// bucket holds fewer than `days`.
    pub fn release(&mut self, days: Decimal, source: ReleaseSource) -> Result<(), LedgerError> {
        Self::ensure_positive(days)?;
        let held = match source {
            ReleaseSource::Pending => self.pending_days,
            ReleaseSource::Used => self.used_days,
        };
        if held < days {
            return Err(LedgerError::ExceedsHeld {
                requested: days,
                held,
                bucket: source,
            });
        }
        match source {
            ReleaseSource::Pending => self.pending_days -= days,
            ReleaseSource::Used => self.used_days -= days,
        }
        self.bump();
        Ok(())
    }

    /// Applies an administrative credit or debit.
    ///
    /// # Errors
    ///
    /// `InvalidAdjustment` for a blank reason or non-positive delta,
    /// `InsufficientBalance` when a debit exceeds the remaining days.
    pub fn adjust(
        &mut self,
        delta: Decimal,
        direction: AdjustmentDirection,
        reason: &str,
    ) -> Result<(), LedgerError> {
        if reason.trim().is_empty() {
            return Err(LedgerError::InvalidAdjustment(
                "a reason is required".to_string(),
            ));
        }
        if delta <= Decimal::ZERO {
            return Err(LedgerError::InvalidAdjustment(format!(
                "delta must be positive, got {delta}"
            )));
        }
        match direction {
            AdjustmentDirection::Credit => self.adjusted_days += delta,
            AdjustmentDirection::Debit => {
                self.ensure_available(delta)?;
                self.adjusted_days -= delta;
            }
        }
        self.bump();
        Ok(())
    }

    /// Records the latest accrual.
    ///
    /// Earned days never decrease: a later policy change is not applied
    /// retroactively to days already accrued.
    pub fn refresh_accrual(&mut self, entitlement: Decimal, earned: Decimal, policy_version: u32) {
        self.annual_entitlement = entitlement;
        self.earned_days = self.earned_days.max(earned);
        self.policy_version = policy_version;
        self.bump();
    }

    /// Credits days rolled over from `source_year`.
    ///
    /// Returns false (and changes nothing) when a carry-over from that year
    /// was already applied.
    pub fn apply_carry_over(
        &mut self,
        days: Decimal,
        source_year: i32,
        expiry_date: Option<NaiveDate>,
    ) -> bool {
        if self.carry_over_source_year.is_some() {
            return false;
        }
        self.carried_over_days = days.max(Decimal::ZERO);
        self.carry_over_source_year = Some(source_year);
        self.expiry_date = expiry_date;
        self.expiry_processed = false;
        self.expiry_warning_sent = false;
        self.bump();
        true
    }

    /// Raises the days carried from `source_year` to `total`, the source
    /// balance's current remaining days. Returns the days added.
    ///
    /// Only grows the carry-over, and only after a rollover from that year.
    /// Days added once the carry-over has expired are expired with it.
    pub fn top_up_carry_over(&mut self, source_year: i32, total: Decimal) -> Decimal {
        if self.carry_over_source_year != Some(source_year) || total <= self.carried_over_days {
            return Decimal::ZERO;
        }
        let added = total - self.carried_over_days;
        self.carried_over_days = total;
        if self.expiry_processed {
            self.expired_days += added;
        }
        self.bump();
        added
    }

    /// Carried-over days not yet consumed, assuming consumption draws on
    /// carried days first.
    #[must_use]
    pub fn unconsumed_carry_over(&self) -> Decimal {
        (self.carried_over_days - self.used_days - self.pending_days)
            .max(Decimal::ZERO)
            .min(self.remaining_days().max(Decimal::ZERO))
    }

    /// Expires the unconsumed carried-over portion once `today` reaches the expiry date.
    pub fn expire_carry_over(&mut self, today: NaiveDate) -> ExpiryOutcome {
        let Some(expiry_date) = self.expiry_date else {
            return ExpiryOutcome::NotApplicable;
        };
        if self.expiry_processed {
            return ExpiryOutcome::AlreadyProcessed;
        }
        if today < expiry_date {
            return ExpiryOutcome::NotDue;
        }
        let expired = self.unconsumed_carry_over();
        self.expired_days += expired;
        self.expiry_processed = true;
        self.bump();
        ExpiryOutcome::Expired(expired)
    }

    /// True when the pre-expiry warning window has opened and no warning was sent.
    #[must_use]
    pub fn needs_expiry_warning(&self, today: NaiveDate, notice_days: u32) -> bool {
        let Some(expiry_date) = self.expiry_date else {
            return false;
        };
        if self.expiry_warning_sent || self.expiry_processed || today >= expiry_date {
            return false;
        }
        if self.unconsumed_carry_over() <= Decimal::ZERO {
            return false;
        }
        (expiry_date - today).num_days() <= i64::from(notice_days)
    }

    /// Records that the pre-expiry warning went out.
    pub fn mark_expiry_warning_sent(&mut self) {
        self.expiry_warning_sent = true;
        self.bump();
    }
}
