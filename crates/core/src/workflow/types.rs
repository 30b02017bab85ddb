//! Workflow domain types for leave applications.

use chrono::{DateTime, NaiveDate, Utc};
use leavebook_shared::types::{ApplicationId, EmployeeId, LeaveTypeId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::workflow::approval::ApprovalChain;

/// Leave application status in the approval workflow.
///
/// Applications move PENDING_SUPERVISOR → PENDING_HR → (PENDING_CEO) →
/// APPROVED. REJECTED and CANCELLED are reachable from any pending state,
/// and CANCELLED also from APPROVED before the leave starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveStatus {
    /// Awaiting the line supervisor.
    PendingSupervisor,
    /// Awaiting human resources.
    PendingHr,
    /// Awaiting the chief executive (manager-level applicants only).
    PendingCeo,
    /// Fully approved; days are used.
    Approved,
    /// Rejected by an approver.
    Rejected,
    /// Withdrawn by the applicant or an administrator.
    Cancelled,
}

impl LeaveStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PendingSupervisor => "PENDING_SUPERVISOR",
            Self::PendingHr => "PENDING_HR",
            Self::PendingCeo => "PENDING_CEO",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "PENDING_SUPERVISOR" => Some(Self::PendingSupervisor),
            "PENDING_HR" => Some(Self::PendingHr),
            "PENDING_CEO" => Some(Self::PendingCeo),
            "APPROVED" => Some(Self::Approved),
            "REJECTED" => Some(Self::Rejected),
            "CANCELLED" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Returns true while an approver still has to act.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            Self::PendingSupervisor | Self::PendingHr | Self::PendingCeo
        )
    }

    /// Returns true if no further transition is possible.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Cancelled)
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Action recorded in an application's approval log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalAction {
    /// Application created.
    Submitted,
    /// An approver advanced the application.
    Approved,
    /// The scheduled sweep advanced a stale application.
    AutoApproved,
    /// An approver rejected the application.
    Rejected,
    /// The application was withdrawn.
    Cancelled,
    /// The employee accepted a recall from leave.
    Recalled,
}

impl ApprovalAction {
    /// Returns the string representation of the action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submitted => "SUBMITTED",
            Self::Approved => "APPROVED",
            Self::AutoApproved => "AUTO_APPROVED",
            Self::Rejected => "REJECTED",
            Self::Cancelled => "CANCELLED",
            Self::Recalled => "RECALLED",
        }
    }
}

impl fmt::Display for ApprovalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ledger side effect that accompanies a status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEffect {
    /// No balance change.
    None,
    /// Move the requested days from pending to used.
    Commit,
    /// Return reserved days to the available balance.
    ReleasePending,
    /// Return used days to the available balance.
    ReleaseUsed,
}

/// A validated status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Status before the transition (None on submission).
    pub from: Option<LeaveStatus>,
    /// Status after the transition.
    pub to: LeaveStatus,
    /// Action to record in the approval log.
    pub action: ApprovalAction,
    /// Balance change the transition requires.
    pub ledger: LedgerEffect,
}

/// One immutable approval-log record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalLogEntry {
    /// Position in the log, starting at 1.
    pub sequence: u32,
    /// What happened.
    pub action: ApprovalAction,
    /// Who did it (None for the scheduled sweep).
    pub actor: Option<EmployeeId>,
    /// Status before the action.
    pub from_status: Option<LeaveStatus>,
    /// Status after the action.
    pub to_status: LeaveStatus,
    /// Free-text comments.
    pub comments: Option<String>,
    /// When it happened.
    pub timestamp: DateTime<Utc>,
}

/// Append-only approval history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalLog {
    entries: Vec<ApprovalLogEntry>,
}

impl ApprovalLog {
    /// Appends a record for `transition` and returns its sequence number.
    pub fn record(
        &mut self,
        transition: &Transition,
        actor: Option<EmployeeId>,
        comments: Option<String>,
        timestamp: DateTime<Utc>,
    ) -> u32 {
        let sequence = self.next_sequence();
        self.entries.push(ApprovalLogEntry {
            sequence,
            action: transition.action,
            actor,
            from_status: transition.from,
            to_status: transition.to,
            comments,
            timestamp,
        });
        sequence
    }

    fn next_sequence(&self) -> u32 {
        self.entries.last().map_or(1, |entry| entry.sequence + 1)
    }

    /// All records, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[ApprovalLogEntry] {
        &self.entries
    }

    /// Most recent record.
    #[must_use]
    pub fn last(&self) -> Option<&ApprovalLogEntry> {
        self.entries.last()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Input for a new leave application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Applicant.
    pub employee_id: EmployeeId,
    /// Requested leave type.
    pub leave_type_id: LeaveTypeId,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave.
    pub end_date: NaiveDate,
    /// Applicant's reason.
    #[serde(default)]
    pub reason: String,
    /// Colleague covering during the absence.
    #[serde(default)]
    pub relief_officer_id: Option<EmployeeId>,
    /// Supporting document location.
    #[serde(default)]
    pub attachment_url: Option<String>,
}

/// A leave application and its approval history.
///
/// Applications are never deleted; terminal ones stay for audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveApplication {
    /// Unique identifier.
    pub id: ApplicationId,
    /// Applicant.
    pub employee_id: EmployeeId,
    /// Leave type.
    pub leave_type_id: LeaveTypeId,
    /// Fiscal year the days are drawn from.
    pub fiscal_year: i32,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave.
    pub end_date: NaiveDate,
    /// Days debited from the balance.
    pub requested_days: Decimal,
    /// Expected first working day back.
    pub return_date: NaiveDate,
    /// Applicant's reason.
    pub reason: String,
    /// Colleague covering during the absence.
    pub relief_officer_id: Option<EmployeeId>,
    /// Supporting document location.
    pub attachment_url: Option<String>,
    /// Current status.
    pub status: LeaveStatus,
    /// Reason given on rejection.
    pub rejection_reason: Option<String>,
    /// Policy version the application was evaluated under.
    pub policy_version: u32,
    /// Whether the applicant was manager-level at submission.
    pub is_manager: bool,
    /// Approval stages fixed at submission.
    pub chain: ApprovalChain,
    /// When the status last changed.
    pub status_changed_at: DateTime<Utc>,
    /// Approval history.
    pub log: ApprovalLog,
}

impl LeaveApplication {
    /// Applies a transition: updates the status and appends a log record.
    pub fn apply(
        &mut self,
        transition: &Transition,
        actor: Option<EmployeeId>,
        comments: Option<String>,
        at: DateTime<Utc>,
    ) {
        self.status = transition.to;
        self.status_changed_at = at;
        if transition.to == LeaveStatus::Rejected {
            self.rejection_reason.clone_from(&comments);
        }
        self.log.record(transition, actor, comments, at);
    }

    /// Returns true if the application is pending or approved.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.status.is_terminal()
    }
}
