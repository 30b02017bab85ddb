//! Property-based tests for LeaveBalance.

use leavebook_shared::types::{EmployeeId, LeaveTypeId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::ledger::balance::LeaveBalance;
use crate::ledger::types::{AdjustmentDirection, BalanceKey, ReleaseSource};

/// Day quantities in half-day steps, including zero and negatives.
fn arb_days() -> impl Strategy<Value = Decimal> {
    (-4i64..60).prop_map(|halves| Decimal::new(halves * 5, 1))
}

#[derive(Debug, Clone)]
enum Op {
    Reserve(Decimal),
    Commit(Decimal),
    Release(Decimal, ReleaseSource),
    Adjust(Decimal, AdjustmentDirection),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        arb_days().prop_map(Op::Reserve),
        arb_days().prop_map(Op::Commit),
        (arb_days(), prop_oneof![Just(ReleaseSource::Pending), Just(ReleaseSource::Used)])
            .prop_map(|(d, s)| Op::Release(d, s)),
        (arb_days(), prop_oneof![Just(AdjustmentDirection::Credit), Just(AdjustmentDirection::Debit)])
            .prop_map(|(d, dir)| Op::Adjust(d, dir)),
    ]
}

fn fresh(earned: Decimal) -> LeaveBalance {
    let mut balance = LeaveBalance::new(BalanceKey::new(EmployeeId::new(), LeaveTypeId::new(), 2026));
    balance.refresh_accrual(earned, earned, 1);
    balance
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Remaining days never go negative, and a failed operation changes nothing.
    #[test]
    fn prop_remaining_never_negative(
        earned in (0i64..40).prop_map(Decimal::from),
        ops in prop::collection::vec(arb_op(), 1..40),
    ) {
        let mut balance = fresh(earned);
        for op in ops {
            let before = balance.clone();
            let result = match op {
                Op::Reserve(d) => balance.reserve(d),
                Op::Commit(d) => balance.commit(d),
                Op::Release(d, s) => balance.release(d, s),
                Op::Adjust(d, dir) => balance.adjust(d, dir, "audit"),
            };
            if result.is_err() {
                prop_assert_eq!(&balance, &before);
            } else {
                prop_assert_eq!(balance.version, before.version + 1);
            }
            prop_assert!(balance.remaining_days() >= Decimal::ZERO);
            prop_assert!(balance.pending_days >= Decimal::ZERO);
            prop_assert!(balance.used_days >= Decimal::ZERO);
        }
    }

    /// Reserve followed by a pending release restores the original figures.
    #[test]
    fn prop_reserve_release_round_trip(
        earned in (1i64..40).prop_map(Decimal::from),
        halves in 1i64..80,
    ) {
        let mut balance = fresh(earned);
        let days = Decimal::new(halves * 5, 1);
        prop_assume!(days <= earned);

        let remaining = balance.remaining_days();
        balance.reserve(days).unwrap();
        prop_assert_eq!(balance.pending_days, days);
        prop_assert_eq!(balance.remaining_days(), remaining - days);

        balance.release(days, ReleaseSource::Pending).unwrap();
        prop_assert_eq!(balance.pending_days, Decimal::ZERO);
        prop_assert_eq!(balance.remaining_days(), remaining);
    }
}
