//! Leave encashment requests.
//!
//! Days are reserved on the annual-leave balance of the current fiscal year
//! at submission, committed on approval and released on rejection.

use leavebook_core::calendar::fiscal_year_of;
use leavebook_core::cashout::{
    CashOutEligibility, CashOutError, CashOutRequest, CashOutService, CashOutStatus,
};
use leavebook_core::ledger::{BalanceKey, LeaveBalance, ReleaseSource};
use leavebook_core::notification::Notification;
use leavebook_core::policy::{EmployeeProfile, LeaveType, PolicySnapshot};
use leavebook_shared::types::{CashOutId, EmployeeId};
use rust_decimal::Decimal;
use std::sync::PoisonError;

use crate::LeaveEngine;
use crate::error::{EngineError, EngineResult};

impl LeaveEngine {
    /// What the employee may encash right now.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown employee or a missing annual leave type.
    pub fn cash_out_eligibility(&self, employee_id: EmployeeId) -> EngineResult<CashOutEligibility> {
        let profile = self.profile(employee_id)?;
        let snapshot = self.policy.current()?;
        let (_, balance) = self.annual_balance(&profile, &snapshot)?;
        self.eligibility_for(&profile, &snapshot, &balance)
    }

    /// Requests conversion of `days` of annual leave into pay.
    ///
    /// # Errors
    ///
    /// `PendingRequestExists`, `ExceedsEligibleDays`, a validation error for
    /// a disabled policy or non-positive days, or `InsufficientBalance`.
    pub fn submit_cash_out(
        &self,
        employee_id: EmployeeId,
        days: Decimal,
    ) -> EngineResult<CashOutRequest> {
        let profile = self.profile(employee_id)?;
        let snapshot = self.policy.current()?;
        let settings = &snapshot.settings;

        let gate = self.employee_gate(employee_id);
        let _guard = gate.lock().unwrap_or_else(PoisonError::into_inner);

        let (leave_type, balance) = self.annual_balance(&profile, &snapshot)?;
        let eligibility = self.eligibility_for(&profile, &snapshot, &balance)?;
        if let Err(err) = CashOutService::validate_request(days, &eligibility) {
            tracing::warn!(%employee_id, %days, error = %err, "cash-out request rejected");
            return Err(err.into());
        }

        let cash_value = CashOutService::cash_value(
            days,
            profile.monthly_salary,
            settings.encashment_salary_divisor,
            settings.rounding_mode,
        )?;
        self.ledger.reserve(balance.key, days)?;

        let now = self.clock.now();
        let request = CashOutRequest {
            id: CashOutId::new(),
            employee_id,
            leave_type_id: leave_type.id,
            fiscal_year: balance.key.fiscal_year,
            days_cashed_out: days,
            monthly_salary: profile.monthly_salary,
            salary_divisor: settings.encashment_salary_divisor,
            rounding_mode: settings.rounding_mode,
            cash_value,
            status: CashOutStatus::Pending,
            rejection_reason: None,
            created_at: now,
            updated_at: now,
        };
        self.cash_outs.insert(request.id, request.clone());

        tracing::info!(
            cash_out_id = %request.id,
            %employee_id,
            %days,
            %cash_value,
            "cash-out requested"
        );
        self.notify(Notification::for_cash_out(&request));
        Ok(request)
    }

    /// Approves a pending cash-out; the reserved days become used.
    ///
    /// # Errors
    ///
    /// `NotFound`, or `InvalidState` unless pending.
    pub fn approve_cash_out(&self, id: CashOutId, actor: EmployeeId) -> EngineResult<CashOutRequest> {
        self.transition_cash_out(id, actor, None, |request| {
            let status = CashOutService::approve(request.status)?;
            Ok((status, LedgerStep::Commit))
        })
    }

    /// Rejects a pending cash-out and releases its days.
    ///
    /// # Errors
    ///
    /// `NotFound`, `Validation` for a blank reason, or `InvalidState`.
    pub fn reject_cash_out(
        &self,
        id: CashOutId,
        actor: EmployeeId,
        reason: &str,
    ) -> EngineResult<CashOutRequest> {
        self.transition_cash_out(id, actor, Some(reason.trim().to_string()), |request| {
            let status = CashOutService::reject(request.status, reason)?;
            Ok((status, LedgerStep::ReleasePending))
        })
    }

    /// Marks an approved cash-out as paid.
    ///
    /// # Errors
    ///
    /// `NotFound`, or `InvalidState` unless approved.
    pub fn mark_cash_out_paid(&self, id: CashOutId, actor: EmployeeId) -> EngineResult<CashOutRequest> {
        self.transition_cash_out(id, actor, None, |request| {
            let status = CashOutService::mark_paid(request.status)?;
            Ok((status, LedgerStep::None))
        })
    }

    /// Cash-out request by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id.
    pub fn cash_out(&self, id: CashOutId) -> EngineResult<CashOutRequest> {
        self.cash_outs
            .get(&id)
            .map(|c| c.value().clone())
            .ok_or_else(|| EngineError::not_found("cash-out request", id))
    }

    /// Cash-out requests of one employee, oldest first.
    #[must_use]
    pub fn cash_outs_for(&self, employee_id: EmployeeId) -> Vec<CashOutRequest> {
        let mut requests: Vec<CashOutRequest> = self
            .cash_outs
            .iter()
            .filter(|c| c.employee_id == employee_id)
            .map(|c| c.value().clone())
            .collect();
        requests.sort_by_key(|c| (c.created_at, c.id));
        requests
    }

    fn annual_balance(
        &self,
        profile: &EmployeeProfile,
        snapshot: &PolicySnapshot,
    ) -> EngineResult<(LeaveType, LeaveBalance)> {
        let settings = &snapshot.settings;
        let leave_type = self.leave_types.by_code(&settings.annual_leave_code)?;
        let year = fiscal_year_of(self.clock.today(), settings.fiscal_year_start_month)?;
        let balance = self.refresh_with(profile, &leave_type, year, snapshot)?;
        Ok((leave_type, balance))
    }

    fn eligibility_for(
        &self,
        profile: &EmployeeProfile,
        snapshot: &PolicySnapshot,
        balance: &LeaveBalance,
    ) -> EngineResult<CashOutEligibility> {
        let has_pending = self.cash_outs.iter().any(|c| {
            c.employee_id == profile.employee_id && c.status == CashOutStatus::Pending
        });
        Ok(CashOutService::eligibility(
            &snapshot.settings,
            balance.remaining_days(),
            has_pending,
            profile.monthly_salary,
        )?)
    }

    fn transition_cash_out(
        &self,
        id: CashOutId,
        actor: EmployeeId,
        rejection_reason: Option<String>,
        decide: impl FnOnce(&CashOutRequest) -> Result<(CashOutStatus, LedgerStep), CashOutError>,
    ) -> EngineResult<CashOutRequest> {
        let mut request = self
            .cash_outs
            .get_mut(&id)
            .ok_or_else(|| EngineError::not_found("cash-out request", id))?;

        let (status, step) = match decide(request.value()) {
            Ok(decision) => decision,
            Err(err) => {
                tracing::warn!(cash_out_id = %id, status = %request.status, error = %err, "cash-out transition rejected");
                return Err(err.into());
            }
        };

        let key = BalanceKey::new(request.employee_id, request.leave_type_id, request.fiscal_year);
        let days = request.days_cashed_out;
        match step {
            LedgerStep::None => {}
            LedgerStep::Commit => {
                self.ledger.commit(key, days)?;
            }
            LedgerStep::ReleasePending => {
                self.ledger.release(key, days, ReleaseSource::Pending)?;
            }
        }

        let from = request.status;
        request.status = status;
        request.updated_at = self.clock.now();
        if status == CashOutStatus::Rejected {
            request.rejection_reason = rejection_reason;
        }
        let snapshot = request.clone();
        drop(request);

        tracing::info!(cash_out_id = %id, %actor, %from, to = %status, "cash-out transitioned");
        self.notify(Notification::for_cash_out(&snapshot));
        Ok(snapshot)
    }
}

#[derive(Debug, Clone, Copy)]
enum LedgerStep {
    None,
    Commit,
    ReleasePending,
}
