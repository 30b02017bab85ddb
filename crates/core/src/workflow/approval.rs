//! Approval chains.
//!
//! The chain is fixed when an application is submitted, so a later change
//! to the applicant's grade or to the policy does not reroute it.

use serde::{Deserialize, Serialize};

use crate::workflow::types::LeaveStatus;

/// Ordered approval stages an application passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalChain {
    /// Supervisor, then HR.
    #[default]
    Standard,
    /// Supervisor, HR, then CEO.
    Executive,
}

impl ApprovalChain {
    /// Chain for an applicant of the given grade under the given policy.
    #[must_use]
    pub fn for_applicant(is_manager: bool, require_ceo_for_managers: bool) -> Self {
        if is_manager && require_ceo_for_managers {
            Self::Executive
        } else {
            Self::Standard
        }
    }

    /// First status of a new application.
    #[must_use]
    pub fn initial(self) -> LeaveStatus {
        LeaveStatus::PendingSupervisor
    }

    /// Status that follows one approval in `current`.
    ///
    /// Returns `None` when `current` is not awaiting approval.
    #[must_use]
    pub fn next(self, current: LeaveStatus) -> Option<LeaveStatus> {
        match (self, current) {
            (_, LeaveStatus::PendingSupervisor) => Some(LeaveStatus::PendingHr),
            (Self::Standard, LeaveStatus::PendingHr) | (_, LeaveStatus::PendingCeo) => {
                Some(LeaveStatus::Approved)
            }
            (Self::Executive, LeaveStatus::PendingHr) => Some(LeaveStatus::PendingCeo),
            _ => None,
        }
    }

    /// Number of approvals needed to reach APPROVED.
    #[must_use]
    pub fn stages(self) -> usize {
        match self {
            Self::Standard => 2,
            Self::Executive => 3,
        }
    }
}
