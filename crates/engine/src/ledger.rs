//! Balance ledger.
//!
//! The authoritative store of leave balances. Every mutation runs while the
//! key's map entry is write-locked: the operation is applied to a copy, the
//! copy is validated by the core arithmetic, and only then written back. A
//! rejected operation therefore never leaves a partial change behind, and
//! two concurrent reservations on one key are strictly ordered.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use leavebook_core::ledger::{
    AdjustmentDirection, BalanceKey, LeaveBalance, LedgerError, ReleaseSource,
};
use leavebook_shared::types::{AdjustmentId, EmployeeId, LeaveTypeId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};

use crate::error::EngineResult;

/// Audit record of an administrative adjustment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceAdjustment {
    /// Unique identifier.
    pub id: AdjustmentId,
    /// Adjusted balance.
    pub key: BalanceKey,
    /// Days added or removed.
    pub delta: Decimal,
    /// Credit or debit.
    pub direction: AdjustmentDirection,
    /// Why the adjustment was made.
    pub reason: String,
    /// Who made it.
    pub actor: EmployeeId,
    /// When it was made.
    pub timestamp: DateTime<Utc>,
}

/// Concurrent store of leave balances.
#[derive(Debug, Default)]
pub struct BalanceLedger {
    balances: DashMap<BalanceKey, LeaveBalance>,
    adjustments: Mutex<Vec<BalanceAdjustment>>,
}

impl BalanceLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn mutate<T>(
        &self,
        key: BalanceKey,
        operation: &'static str,
        f: impl FnOnce(&mut LeaveBalance) -> Result<T, LedgerError>,
    ) -> EngineResult<(T, LeaveBalance)> {
        let mut entry = self
            .balances
            .get_mut(&key)
            .ok_or(LedgerError::BalanceNotFound(key))?;
        let mut draft = entry.clone();
        match f(&mut draft) {
            Ok(value) => {
                *entry = draft.clone();
                Ok((value, draft))
            }
            Err(err) => {
                tracing::warn!(%key, operation, error = %err, "balance operation rejected");
                Err(err.into())
            }
        }
    }

    /// Holds `days` for an in-flight request.
    ///
    /// # Errors
    ///
    /// `InvalidQuantity`, `InsufficientBalance` or `BalanceNotFound`.
    pub fn reserve(&self, key: BalanceKey, days: Decimal) -> EngineResult<LeaveBalance> {
        let ((), balance) = self.mutate(key, "reserve", |b| b.reserve(days))?;
        tracing::debug!(%key, %days, pending = %balance.pending_days, "days reserved");
        Ok(balance)
    }

    /// Moves reserved days to used.
    ///
    /// # Errors
    ///
    /// `InvalidQuantity`, `ExceedsHeld` or `BalanceNotFound`.
    pub fn commit(&self, key: BalanceKey, days: Decimal) -> EngineResult<LeaveBalance> {
        let ((), balance) = self.mutate(key, "commit", |b| b.commit(days))?;
        tracing::debug!(%key, %days, used = %balance.used_days, "days committed");
        Ok(balance)
    }

    /// Returns days from the pending or used bucket.
    ///
    /// # Errors
    ///
    /// `InvalidQuantity`, `ExceedsHeld` or `BalanceNotFound`.
    pub fn release(
        &self,
        key: BalanceKey,
        days: Decimal,
        source: ReleaseSource,
    ) -> EngineResult<LeaveBalance> {
        let ((), balance) = self.mutate(key, "release", |b| b.release(days, source))?;
        tracing::debug!(%key, %days, %source, remaining = %balance.remaining_days(), "days released");
        self.sync_carry_over(key);
        Ok(balance)
    }

    /// Applies an administrative credit or debit and records it for audit.
    ///
    /// # Errors
    ///
    /// `InvalidAdjustment`, `InsufficientBalance` or `BalanceNotFound`.
    pub fn adjust(
        &self,
        key: BalanceKey,
        delta: Decimal,
        direction: AdjustmentDirection,
        reason: &str,
        actor: EmployeeId,
        at: DateTime<Utc>,
    ) -> EngineResult<LeaveBalance> {
        let ((), balance) = self.mutate(key, "adjust", |b| b.adjust(delta, direction, reason))?;
        let record = BalanceAdjustment {
            id: AdjustmentId::new(),
            key,
            delta,
            direction,
            reason: reason.trim().to_string(),
            actor,
            timestamp: at,
        };
        tracing::info!(
            %key,
            adjustment_id = %record.id,
            %delta,
            ?direction,
            %actor,
            reason = %record.reason,
            "balance adjusted"
        );
        self.adjustments
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
        if direction == AdjustmentDirection::Credit {
            self.sync_carry_over(key);
        }
        Ok(balance)
    }

    /// Records the latest accrual, opening the balance if it does not exist.
    pub fn refresh_accrual(
        &self,
        key: BalanceKey,
        entitlement: Decimal,
        earned: Decimal,
        policy_version: u32,
    ) -> LeaveBalance {
        let mut entry = self
            .balances
            .entry(key)
            .or_insert_with(|| LeaveBalance::new(key));
        entry.refresh_accrual(entitlement, earned, policy_version);
        entry.clone()
    }

    /// Forwards days that returned to `source` after its year was rolled
    /// over into the next year's carry-over. Returns the days forwarded.
    ///
    /// Reads `source` and updates the next year under separate entry locks.
    /// Every caller re-reads after its own write, so the last sync always
    /// sees the latest source figures.
    pub(crate) fn sync_carry_over(&self, source: BalanceKey) -> Decimal {
        let Some(total) = self
            .balances
            .get(&source)
            .map(|b| b.remaining_days().max(Decimal::ZERO))
        else {
            return Decimal::ZERO;
        };
        let target = source.next_year();
        let Some(mut entry) = self.balances.get_mut(&target) else {
            return Decimal::ZERO;
        };
        let added = entry.top_up_carry_over(source.fiscal_year, total);
        drop(entry);
        if added > Decimal::ZERO {
            tracing::info!(from = %source, to = %target, days = %added, "carry-over topped up");
        }
        added
    }

    /// Runs an infallible balance update under the key's lock, opening the
    /// balance if needed.
    pub(crate) fn update<T>(&self, key: BalanceKey, f: impl FnOnce(&mut LeaveBalance) -> T) -> T {
        let mut entry = self
            .balances
            .entry(key)
            .or_insert_with(|| LeaveBalance::new(key));
        f(&mut entry)
    }

    /// Balance for `key`.
    ///
    /// # Errors
    ///
    /// Returns `BalanceNotFound` if no balance was opened for the key.
    pub fn balance(&self, key: BalanceKey) -> EngineResult<LeaveBalance> {
        self.balances
            .get(&key)
            .map(|b| b.value().clone())
            .ok_or_else(|| LedgerError::BalanceNotFound(key).into())
    }

    /// All balances of one employee, ordered by leave type and year.
    #[must_use]
    pub fn balances_for(&self, employee_id: EmployeeId) -> Vec<LeaveBalance> {
        let mut balances: Vec<LeaveBalance> = self
            .balances
            .iter()
            .filter(|b| b.key().employee_id == employee_id)
            .map(|b| b.value().clone())
            .collect();
        balances.sort_by_key(|b| b.key);
        balances
    }

    /// Every balance key, ordered.
    #[must_use]
    pub fn keys(&self) -> Vec<BalanceKey> {
        let mut keys: Vec<BalanceKey> = self.balances.iter().map(|b| *b.key()).collect();
        keys.sort();
        keys
    }

    /// Returns true if any balance exists for the leave type.
    #[must_use]
    pub fn references_leave_type(&self, leave_type_id: LeaveTypeId) -> bool {
        self.balances
            .iter()
            .any(|b| b.key().leave_type_id == leave_type_id)
    }

    /// Adjustment history of one balance, oldest first.
    #[must_use]
    pub fn adjustments_for(&self, key: BalanceKey) -> Vec<BalanceAdjustment> {
        self.adjustments
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|a| a.key == key)
            .cloned()
            .collect()
    }
}
