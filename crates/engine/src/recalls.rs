//! Recall from active leave.
//!
//! Lock order is application, then recall, then ledger. Responding looks up
//! the recall's application first, releases that read, and re-enters in order.
//! The application's write lock serializes recall creation and acceptance, so
//! at most one recall per application is ever accepted.

use chrono::NaiveDate;
use leavebook_core::ledger::{BalanceKey, ReleaseSource};
use leavebook_core::notification::{Notification, NotificationTemplate};
use leavebook_core::recall::{LeaveRecall, RecallDecision, RecallService, RecallStatus};
use leavebook_core::workflow::WorkflowService;
use leavebook_shared::types::{ApplicationId, EmployeeId, RecallId};
use rust_decimal::Decimal;

use crate::LeaveEngine;
use crate::error::{EngineError, EngineResult};

impl LeaveEngine {
    /// Asks an employee on approved leave to return on `recall_date`.
    ///
    /// # Errors
    ///
    /// `NotFound`, or a validation error when the leave is not active, the
    /// date is out of range or the reason is blank. `PendingRecallExists` and
    /// `AlreadyRecalled` guard against a second recall of the same leave.
    pub fn create_recall(
        &self,
        application_id: ApplicationId,
        recalled_by: EmployeeId,
        recall_date: NaiveDate,
        reason: &str,
    ) -> EngineResult<LeaveRecall> {
        let today = self.clock.today();
        let application = self
            .applications
            .get_mut(&application_id)
            .ok_or_else(|| EngineError::not_found("application", application_id))?;

        let earlier = self.recall_statuses(application_id, None);
        if let Err(err) =
            RecallService::validate_recall(&application, recall_date, reason, today, &earlier)
        {
            tracing::warn!(%application_id, %recall_date, error = %err, "recall rejected");
            return Err(err.into());
        }

        let recall = LeaveRecall {
            id: RecallId::new(),
            leave_application_id: application_id,
            recalled_by,
            recall_date,
            reason: reason.trim().to_string(),
            status: RecallStatus::Pending,
            employee_response: None,
            actual_return_date: None,
            refunded_days: Decimal::ZERO,
            created_at: self.clock.now(),
            responded_at: None,
        };
        self.recalls.insert(recall.id, recall.clone());
        let applicant = application.employee_id;
        drop(application);

        tracing::info!(
            recall_id = %recall.id,
            %application_id,
            %recalled_by,
            %recall_date,
            "recall issued"
        );
        self.notify(Notification::for_recall(
            NotificationTemplate::RecallCreated,
            applicant,
            &recall,
        ));
        Ok(recall)
    }

    /// Records the employee's answer to a pending recall.
    ///
    /// Accepting refunds the unused days from the return date to the end of
    /// the leave; declining requires comments and changes no balance.
    ///
    /// # Errors
    ///
    /// `NotFound`, `InvalidState` unless pending, or a validation error for
    /// missing comments or a return date before the leave started.
    pub fn respond_to_recall(
        &self,
        recall_id: RecallId,
        decision: RecallDecision,
        actual_return_date: Option<NaiveDate>,
        comments: Option<String>,
    ) -> EngineResult<LeaveRecall> {
        let application_id = self.recall(recall_id)?.leave_application_id;

        let mut application = self
            .applications
            .get_mut(&application_id)
            .ok_or_else(|| EngineError::not_found("application", application_id))?;
        let others = self.recall_statuses(application_id, Some(recall_id));
        let mut recall = self
            .recalls
            .get_mut(&recall_id)
            .ok_or_else(|| EngineError::not_found("recall", recall_id))?;

        let status = match RecallService::respond(recall.status, decision, comments.as_deref()) {
            Ok(status) => status,
            Err(err) => {
                tracing::warn!(%recall_id, status = %recall.status, error = %err, "recall response rejected");
                return Err(err.into());
            }
        };

        let mut refunded = Decimal::ZERO;
        if status == RecallStatus::Accepted {
            if let Err(err) = RecallService::ensure_not_recalled(&others) {
                tracing::warn!(%recall_id, %application_id, error = %err, "recall response rejected");
                return Err(err.into());
            }
            let return_date = actual_return_date.unwrap_or(recall.recall_date);
            let snapshot = self.policy.get(application.policy_version)?;
            let leave_type = self.leave_types.get(application.leave_type_id)?;
            refunded = RecallService::refund_days(
                &application,
                return_date,
                snapshot.settings.week_shape,
                &self.holidays.calendar(),
                leave_type.day_counting(),
            )?;
            let transition = WorkflowService::recall(application.status)?;
            if refunded > Decimal::ZERO {
                let key = BalanceKey::new(
                    application.employee_id,
                    application.leave_type_id,
                    application.fiscal_year,
                );
                self.ledger.release(key, refunded, ReleaseSource::Used)?;
            }
            let employee_id = application.employee_id;
            application.apply(
                &transition,
                Some(employee_id),
                comments.clone(),
                self.clock.now(),
            );
            recall.actual_return_date = Some(return_date);
        }

        recall.status = status;
        recall.employee_response = comments;
        recall.refunded_days = refunded;
        recall.responded_at = Some(self.clock.now());
        let resolved = recall.clone();
        drop(recall);
        drop(application);

        tracing::info!(
            %recall_id,
            %application_id,
            status = %resolved.status,
            refunded_days = %refunded,
            "recall resolved"
        );
        self.notify(Notification::for_recall(
            NotificationTemplate::RecallResolved,
            resolved.recalled_by,
            &resolved,
        ));
        Ok(resolved)
    }

    /// Statuses of the application's recalls, skipping `except`.
    ///
    /// Callers must not hold a recall entry guard.
    fn recall_statuses(
        &self,
        application_id: ApplicationId,
        except: Option<RecallId>,
    ) -> Vec<RecallStatus> {
        self.recalls
            .iter()
            .filter(|r| r.leave_application_id == application_id && Some(r.id) != except)
            .map(|r| r.status)
            .collect()
    }

    /// Recall by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id.
    pub fn recall(&self, id: RecallId) -> EngineResult<LeaveRecall> {
        self.recalls
            .get(&id)
            .map(|r| r.value().clone())
            .ok_or_else(|| EngineError::not_found("recall", id))
    }

    /// Recalls issued against one application, oldest first.
    #[must_use]
    pub fn recalls_for_application(&self, application_id: ApplicationId) -> Vec<LeaveRecall> {
        let mut recalls: Vec<LeaveRecall> = self
            .recalls
            .iter()
            .filter(|r| r.leave_application_id == application_id)
            .map(|r| r.value().clone())
            .collect();
        recalls.sort_by_key(|r| (r.created_at, r.id));
        recalls
    }
}
