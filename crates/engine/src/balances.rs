//! Accrual refresh and administrative adjustments.

use std::cmp::Ordering;
use std::sync::PoisonError;

use leavebook_core::accrual::AccrualService;
use leavebook_core::calendar::{fiscal_year_bounds, fiscal_year_of};
use leavebook_core::ledger::{AdjustmentDirection, BalanceKey, LeaveBalance};
use leavebook_core::policy::{EmployeeProfile, LeaveType, PolicySnapshot};
use leavebook_shared::types::{EmployeeId, LeaveTypeId};
use rust_decimal::Decimal;

use crate::LeaveEngine;
use crate::error::EngineResult;

impl LeaveEngine {
    /// Recomputes an employee's accrual for one leave type and fiscal year
    /// under the current policy, opening the balance if needed.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown employee or leave type; calendar or accrual
    /// errors from the computation.
    pub fn refresh_balance(
        &self,
        employee_id: EmployeeId,
        leave_type_id: LeaveTypeId,
        fiscal_year: i32,
    ) -> EngineResult<LeaveBalance> {
        let profile = self.profile(employee_id)?;
        let leave_type = self.leave_types.get(leave_type_id)?;
        let snapshot = self.policy.current()?;
        self.refresh_with(&profile, &leave_type, fiscal_year, &snapshot)
    }

    /// Refreshes and returns the current-year balance of every leave type
    /// the employee is eligible for.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown employee; calendar or accrual errors.
    pub fn current_balances(&self, employee_id: EmployeeId) -> EngineResult<Vec<LeaveBalance>> {
        let profile = self.profile(employee_id)?;
        let snapshot = self.policy.current()?;
        let year = fiscal_year_of(self.clock.today(), snapshot.settings.fiscal_year_start_month)?;
        self.leave_types
            .all()
            .iter()
            .filter(|t| t.is_active && t.applicable_gender.allows(profile.gender))
            .map(|t| self.refresh_with(&profile, t, year, &snapshot))
            .collect()
    }

    pub(crate) fn refresh_with(
        &self,
        profile: &EmployeeProfile,
        leave_type: &LeaveType,
        fiscal_year: i32,
        snapshot: &PolicySnapshot,
    ) -> EngineResult<LeaveBalance> {
        let settings = &snapshot.settings;
        let today = self.clock.today();
        let current_year = fiscal_year_of(today, settings.fiscal_year_start_month)?;
        let (year_start, year_end) = fiscal_year_bounds(fiscal_year, settings.fiscal_year_start_month)?;

        let (entitlement, earned) = match fiscal_year.cmp(&current_year) {
            Ordering::Equal => {
                let result = AccrualService::accrue(leave_type, settings, profile.hire_date, today)?;
                (result.entitlement, result.accrued)
            }
            Ordering::Less => {
                let result =
                    AccrualService::accrue(leave_type, settings, profile.hire_date, year_end)?;
                (result.entitlement, result.accrued)
            }
            Ordering::Greater => {
                let years = AccrualService::service_years(profile.hire_date, year_start);
                (
                    AccrualService::entitlement_for_year(leave_type, settings, years),
                    Decimal::ZERO,
                )
            }
        };

        let key = BalanceKey::new(profile.employee_id, leave_type.id, fiscal_year);
        let shared = self
            .type_lifecycle
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        // The type may have been deleted since the caller looked it up.
        self.leave_types.get(leave_type.id)?;
        let balance = self
            .ledger
            .refresh_accrual(key, entitlement, earned, snapshot.version);
        drop(shared);
        tracing::debug!(
            %key,
            %entitlement,
            earned = %balance.earned_days,
            policy_version = snapshot.version,
            "accrual refreshed"
        );
        Ok(balance)
    }

    /// Applies an administrative credit or debit to an existing balance.
    ///
    /// # Errors
    ///
    /// `InvalidAdjustment`, `InsufficientBalance` or `BalanceNotFound`.
    pub fn adjust_balance(
        &self,
        key: BalanceKey,
        delta: Decimal,
        direction: AdjustmentDirection,
        reason: &str,
        actor: EmployeeId,
    ) -> EngineResult<LeaveBalance> {
        self.ledger
            .adjust(key, delta, direction, reason, actor, self.clock.now())
    }

    /// Balances of one employee as currently stored.
    #[must_use]
    pub fn balances_for(&self, employee_id: EmployeeId) -> Vec<LeaveBalance> {
        self.ledger.balances_for(employee_id)
    }
}
