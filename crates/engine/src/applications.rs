//! Leave application submission and approvals.
//!
//! Each transition runs while the application's map entry is write-locked,
//! with the ledger call inside that lock. If the ledger rejects the change
//! the status is left as it was.

use leavebook_core::calendar::{CalendarService, fiscal_year_of};
use leavebook_core::ledger::{BalanceKey, ReleaseSource};
use leavebook_core::notification::{Notification, NotificationTemplate};
use leavebook_core::workflow::{
    ApprovalChain, ApprovalLog, LeaveApplication, LeaveRequest, LeaveStatus, LedgerEffect, Transition,
    WorkflowError, WorkflowService, ensure_leave_days, find_overlap, validate_request,
};
use leavebook_shared::types::{ApplicationId, EmployeeId};
use std::sync::PoisonError;

use crate::LeaveEngine;
use crate::error::{EngineError, EngineResult};

impl LeaveEngine {
    /// Submits a leave request and reserves its days.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown employee or leave type, a workflow
    /// validation error, or `InsufficientBalance`.
    pub fn submit(&self, request: LeaveRequest) -> EngineResult<LeaveApplication> {
        let profile = self.profile(request.employee_id)?;
        let leave_type = self.leave_types.get(request.leave_type_id)?;
        let snapshot = self.policy.current()?;
        let settings = &snapshot.settings;
        let today = self.clock.today();

        validate_request(&request, &leave_type, &profile, today)?;

        let holidays = self.holidays.calendar();
        let requested_days = CalendarService::working_days_between(
            request.start_date,
            request.end_date,
            settings.week_shape,
            &holidays,
            leave_type.day_counting(),
        )?;
        ensure_leave_days(requested_days)?;
        let return_date =
            CalendarService::return_date(request.end_date, settings.week_shape, &holidays)?;
        let fiscal_year = fiscal_year_of(request.start_date, settings.fiscal_year_start_month)?;

        let gate = self.employee_gate(profile.employee_id);
        let _guard = gate.lock().unwrap_or_else(PoisonError::into_inner);

        let existing = self.applications_for(profile.employee_id);
        if let Some(overlapping) = find_overlap(&existing, request.start_date, request.end_date) {
            tracing::warn!(
                employee_id = %profile.employee_id,
                %overlapping,
                "leave request overlaps an open application"
            );
            return Err(WorkflowError::Overlapping(overlapping).into());
        }

        let balance = self.refresh_with(&profile, &leave_type, fiscal_year, &snapshot)?;
        self.ledger.reserve(balance.key, requested_days)?;

        let now = self.clock.now();
        let chain = ApprovalChain::for_applicant(
            profile.is_manager,
            settings.require_ceo_approval_for_managers,
        );
        let transition = WorkflowService::submit(chain);
        let mut application = LeaveApplication {
            id: ApplicationId::new(),
            employee_id: profile.employee_id,
            leave_type_id: leave_type.id,
            fiscal_year,
            start_date: request.start_date,
            end_date: request.end_date,
            requested_days,
            return_date,
            reason: request.reason.trim().to_string(),
            relief_officer_id: request.relief_officer_id,
            attachment_url: request.attachment_url,
            status: transition.to,
            rejection_reason: None,
            policy_version: snapshot.version,
            is_manager: profile.is_manager,
            chain,
            status_changed_at: now,
            log: ApprovalLog::default(),
        };
        application.apply(&transition, Some(profile.employee_id), None, now);
        self.applications.insert(application.id, application.clone());

        tracing::info!(
            application_id = %application.id,
            employee_id = %application.employee_id,
            leave_type = %leave_type.code,
            %requested_days,
            status = %application.status,
            "leave application submitted"
        );
        self.notify(Notification::for_application(
            NotificationTemplate::LeaveSubmitted,
            &application,
        ));
        Ok(application)
    }

    /// Advances a pending application one approval stage.
    ///
    /// # Errors
    ///
    /// `NotFound`, or `InvalidState` unless the application is pending.
    pub fn approve(
        &self,
        id: ApplicationId,
        actor: EmployeeId,
        comments: Option<String>,
    ) -> EngineResult<LeaveApplication> {
        let (application, transition) = self.transition_application(
            id,
            Some(actor),
            comments,
            |app| WorkflowService::approve(app.status, app.chain),
        )?;
        let template = if transition.to == LeaveStatus::Approved {
            NotificationTemplate::LeaveApproved
        } else {
            NotificationTemplate::LeaveStageAdvanced
        };
        self.notify(Notification::for_application(template, &application));
        Ok(application)
    }

    /// Rejects a pending application and releases its reservation.
    ///
    /// # Errors
    ///
    /// `NotFound`, `Validation` for a blank reason, or `InvalidState`.
    pub fn reject(
        &self,
        id: ApplicationId,
        actor: EmployeeId,
        reason: &str,
    ) -> EngineResult<LeaveApplication> {
        let (application, _) = self.transition_application(
            id,
            Some(actor),
            Some(reason.trim().to_string()),
            |app| WorkflowService::reject(app.status, reason),
        )?;
        self.notify(Notification::for_application(
            NotificationTemplate::LeaveRejected,
            &application,
        ));
        Ok(application)
    }

    /// Cancels a pending application, or approved leave that has not started.
    ///
    /// # Errors
    ///
    /// `NotFound`, or `InvalidState` from a terminal status or once the leave started.
    pub fn cancel(&self, id: ApplicationId, actor: EmployeeId) -> EngineResult<LeaveApplication> {
        let today = self.clock.today();
        let (application, _) = self.transition_application(id, Some(actor), None, |app| {
            WorkflowService::cancel(app.status, app.start_date, today)
        })?;
        self.notify(Notification::for_application(
            NotificationTemplate::LeaveCancelled,
            &application,
        ));
        Ok(application)
    }

    /// Application by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id.
    pub fn application(&self, id: ApplicationId) -> EngineResult<LeaveApplication> {
        self.applications
            .get(&id)
            .map(|a| a.value().clone())
            .ok_or_else(|| EngineError::not_found("application", id))
    }

    /// All applications of one employee, ordered by start date.
    #[must_use]
    pub fn applications_for(&self, employee_id: EmployeeId) -> Vec<LeaveApplication> {
        let mut applications: Vec<LeaveApplication> = self
            .applications
            .iter()
            .filter(|a| a.employee_id == employee_id)
            .map(|a| a.value().clone())
            .collect();
        applications.sort_by_key(|a| (a.start_date, a.id));
        applications
    }

    /// Ids of applications still awaiting approval.
    pub(crate) fn pending_application_ids(&self) -> Vec<ApplicationId> {
        let mut ids: Vec<ApplicationId> = self
            .applications
            .iter()
            .filter(|a| a.status.is_pending())
            .map(|a| a.id)
            .collect();
        ids.sort();
        ids
    }

    pub(crate) fn transition_application(
        &self,
        id: ApplicationId,
        actor: Option<EmployeeId>,
        comments: Option<String>,
        decide: impl FnOnce(&LeaveApplication) -> Result<Transition, WorkflowError>,
    ) -> EngineResult<(LeaveApplication, Transition)> {
        let mut application = self
            .applications
            .get_mut(&id)
            .ok_or_else(|| EngineError::not_found("application", id))?;

        let transition = match decide(application.value()) {
            Ok(transition) => transition,
            Err(err) => {
                tracing::warn!(application_id = %id, status = %application.status, error = %err, "transition rejected");
                return Err(err.into());
            }
        };

        let key = BalanceKey::new(
            application.employee_id,
            application.leave_type_id,
            application.fiscal_year,
        );
        let days = application.requested_days;
        match transition.ledger {
            LedgerEffect::None => {}
            LedgerEffect::Commit => {
                self.ledger.commit(key, days)?;
            }
            LedgerEffect::ReleasePending => {
                self.ledger.release(key, days, ReleaseSource::Pending)?;
            }
            LedgerEffect::ReleaseUsed => {
                self.ledger.release(key, days, ReleaseSource::Used)?;
            }
        }

        application.apply(&transition, actor, comments, self.clock.now());
        let snapshot = application.clone();
        drop(application);

        tracing::info!(
            application_id = %id,
            action = %transition.action,
            from = ?transition.from,
            to = %transition.to,
            "leave application transitioned"
        );
        Ok((snapshot, transition))
    }
}
