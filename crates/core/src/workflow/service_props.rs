//! Property-based tests for WorkflowService.

use chrono::{Duration, NaiveDate, Utc};
use proptest::prelude::*;

use crate::workflow::approval::ApprovalChain;
use crate::workflow::service::WorkflowService;
use crate::workflow::types::{
    ApprovalAction, ApprovalLog, LedgerEffect, LeaveStatus, Transition,
};

fn arb_status() -> impl Strategy<Value = LeaveStatus> {
    prop_oneof![
        Just(LeaveStatus::PendingSupervisor),
        Just(LeaveStatus::PendingHr),
        Just(LeaveStatus::PendingCeo),
        Just(LeaveStatus::Approved),
        Just(LeaveStatus::Rejected),
        Just(LeaveStatus::Cancelled),
    ]
}

fn arb_chain() -> impl Strategy<Value = ApprovalChain> {
    prop_oneof![Just(ApprovalChain::Standard), Just(ApprovalChain::Executive)]
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Approve,
    Reject,
    Cancel,
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![Just(Step::Approve), Just(Step::Reject), Just(Step::Cancel)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Repeated approvals reach APPROVED after exactly `stages()` steps,
    /// committing the days only on the last one.
    #[test]
    fn prop_chain_reaches_approved(chain in arb_chain()) {
        let mut status = chain.initial();
        let mut commits = 0;
        for _ in 0..chain.stages() {
            let transition = WorkflowService::approve(status, chain).unwrap();
            if transition.ledger == LedgerEffect::Commit {
                commits += 1;
            }
            status = transition.to;
        }
        prop_assert_eq!(status, LeaveStatus::Approved);
        prop_assert_eq!(commits, 1);
        prop_assert!(WorkflowService::approve(status, chain).is_err());
    }

    /// Terminal statuses accept no transition at all.
    #[test]
    fn prop_terminal_states_are_final(
        status in prop_oneof![Just(LeaveStatus::Rejected), Just(LeaveStatus::Cancelled)],
        chain in arb_chain(),
        offset in -30i64..30,
    ) {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        prop_assert!(WorkflowService::approve(status, chain).is_err());
        prop_assert!(WorkflowService::auto_approve(status, chain).is_err());
        prop_assert!(WorkflowService::reject(status, "reason").is_err());
        prop_assert!(WorkflowService::cancel(status, today + Duration::days(offset), today).is_err());
        prop_assert!(WorkflowService::recall(status).is_err());
    }

    /// Any walk of approve/reject/cancel keeps days balanced: whatever was
    /// reserved is committed or released exactly once.
    #[test]
    fn prop_reservation_settled_once(
        chain in arb_chain(),
        steps in prop::collection::vec(arb_step(), 1..8),
    ) {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let start = today + Duration::days(7);
        let (mut pending, mut used) = (1i32, 0i32);
        let mut status = chain.initial();
        let mut log = ApprovalLog::default();
        log.record(&WorkflowService::submit(chain), None, None, Utc::now());

        for step in steps {
            let result = match step {
                Step::Approve => WorkflowService::approve(status, chain),
                Step::Reject => WorkflowService::reject(status, "no cover"),
                Step::Cancel => WorkflowService::cancel(status, start, today),
            };
            let Ok(transition): Result<Transition, _> = result else {
                continue;
            };
            match transition.ledger {
                LedgerEffect::Commit => { pending -= 1; used += 1; }
                LedgerEffect::ReleasePending => pending -= 1,
                LedgerEffect::ReleaseUsed => used -= 1,
                LedgerEffect::None => {}
            }
            log.record(&transition, None, None, Utc::now());
            status = transition.to;
        }

        prop_assert!(pending >= 0 && used >= 0);
        prop_assert_eq!(pending == 1, status.is_pending());
        prop_assert_eq!(used == 1, status == LeaveStatus::Approved);

        let sequences: Vec<u32> = log.entries().iter().map(|e| e.sequence).collect();
        let expected: Vec<u32> = (1..=u32::try_from(sequences.len()).unwrap()).collect();
        prop_assert_eq!(sequences, expected);
        prop_assert_eq!(log.entries()[0].action, ApprovalAction::Submitted);
    }

    /// Rejection is only possible while pending, and always needs a reason.
    #[test]
    fn prop_reject_requires_pending_and_reason(status in arb_status(), blank in "[ \t]{0,5}") {
        prop_assert!(WorkflowService::reject(status, &blank).is_err());
        prop_assert_eq!(WorkflowService::reject(status, "conflict").is_ok(), status.is_pending());
    }
}
