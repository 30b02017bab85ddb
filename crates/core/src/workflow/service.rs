//! Workflow service for leave application state transitions.
//!
//! Every method validates a single transition and returns it together with
//! the ledger effect the caller must apply in the same unit of work.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::workflow::approval::ApprovalChain;
use crate::workflow::error::WorkflowError;
use crate::workflow::types::{ApprovalAction, LedgerEffect, LeaveStatus, Transition};

/// Stateless service for managing leave application transitions.
pub struct WorkflowService;

impl WorkflowService {
    /// Transition that creates a new application.
    #[must_use]
    pub fn submit(chain: ApprovalChain) -> Transition {
        Transition {
            from: None,
            to: chain.initial(),
            action: ApprovalAction::Submitted,
            ledger: LedgerEffect::None,
        }
    }

    /// Advances a pending application one stage.
    ///
    /// Reaching APPROVED commits the reserved days.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::InvalidTransition` unless the status is pending.
    pub fn approve(
        current_status: LeaveStatus,
        chain: ApprovalChain,
    ) -> Result<Transition, WorkflowError> {
        Self::advance(current_status, chain, ApprovalAction::Approved)
    }

    /// Advances a stale pending application one stage on behalf of the sweep.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::InvalidTransition` unless the status is pending.
    pub fn auto_approve(
        current_status: LeaveStatus,
        chain: ApprovalChain,
    ) -> Result<Transition, WorkflowError> {
        Self::advance(current_status, chain, ApprovalAction::AutoApproved)
    }

    fn advance(
        current_status: LeaveStatus,
        chain: ApprovalChain,
        action: ApprovalAction,
    ) -> Result<Transition, WorkflowError> {
        let to = chain
            .next(current_status)
            .ok_or(WorkflowError::InvalidTransition {
                from: current_status,
                action,
            })?;
        let ledger = if to == LeaveStatus::Approved {
            LedgerEffect::Commit
        } else {
            LedgerEffect::None
        };
        Ok(Transition {
            from: Some(current_status),
            to,
            action,
            ledger,
        })
    }

    /// Returns true when a pending application has waited at least
    /// `after_days` in its current stage.
    #[must_use]
    pub fn is_auto_approve_due(
        current_status: LeaveStatus,
        status_changed_at: DateTime<Utc>,
        now: DateTime<Utc>,
        after_days: u32,
    ) -> bool {
        current_status.is_pending()
            && now - status_changed_at >= Duration::days(i64::from(after_days))
    }

    /// Rejects a pending application and releases its reservation.
    ///
    /// # Errors
    ///
    /// `RejectionReasonRequired` for a blank reason, `InvalidTransition`
    /// unless the status is pending.
    pub fn reject(current_status: LeaveStatus, reason: &str) -> Result<Transition, WorkflowError> {
        if reason.trim().is_empty() {
            return Err(WorkflowError::RejectionReasonRequired);
        }
        if !current_status.is_pending() {
            return Err(WorkflowError::InvalidTransition {
                from: current_status,
                action: ApprovalAction::Rejected,
            });
        }
        Ok(Transition {
            from: Some(current_status),
            to: LeaveStatus::Rejected,
            action: ApprovalAction::Rejected,
            ledger: LedgerEffect::ReleasePending,
        })
    }

    /// Cancels a pending application, or an approved one that has not started.
    ///
    /// # Errors
    ///
    /// `AlreadyStarted` for approved leave starting on or before `today`,
    /// `InvalidTransition` from a terminal status.
    pub fn cancel(
        current_status: LeaveStatus,
        start_date: NaiveDate,
        today: NaiveDate,
    ) -> Result<Transition, WorkflowError> {
        let ledger = match current_status {
            s if s.is_pending() => LedgerEffect::ReleasePending,
            LeaveStatus::Approved if start_date > today => LedgerEffect::ReleaseUsed,
            LeaveStatus::Approved => return Err(WorkflowError::AlreadyStarted { start_date }),
            _ => {
                return Err(WorkflowError::InvalidTransition {
                    from: current_status,
                    action: ApprovalAction::Cancelled,
                });
            }
        };
        Ok(Transition {
            from: Some(current_status),
            to: LeaveStatus::Cancelled,
            action: ApprovalAction::Cancelled,
            ledger,
        })
    }

    /// Records an accepted recall on approved leave.
    ///
    /// The status stays APPROVED; the partial refund is computed by the recall
    /// workflow.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless the application is approved.
    pub fn recall(current_status: LeaveStatus) -> Result<Transition, WorkflowError> {
        if current_status != LeaveStatus::Approved {
            return Err(WorkflowError::InvalidTransition {
                from: current_status,
                action: ApprovalAction::Recalled,
            });
        }
        Ok(Transition {
            from: Some(current_status),
            to: LeaveStatus::Approved,
            action: ApprovalAction::Recalled,
            ledger: LedgerEffect::None,
        })
    }
}
