//! Scheduled carry-over and expiry sweeps.

mod common;

use common::{Harness, date, request};
use leavebook_core::ledger::{AdjustmentDirection, BalanceKey};
use leavebook_core::notification::NotificationTemplate;
use leavebook_engine::{Clock, SweepReport};
use leavebook_shared::types::EmployeeId;
use rust_decimal_macros::dec;

#[test]
fn test_carry_over_then_expiry_is_idempotent() {
    let h = Harness::new();
    let employee = h.hire(false);
    h.engine.current_balances(employee).unwrap();

    h.move_to(date(2027, 1, 5));
    let report = h.engine.run_sweeps().unwrap();
    assert_eq!(
        report,
        SweepReport {
            carried_over: 1,
            ..SweepReport::default()
        }
    );
    assert_eq!(h.engine.run_sweeps().unwrap(), SweepReport::default());

    let previous = h
        .engine
        .ledger()
        .balance(BalanceKey::new(employee, h.annual.id, 2026))
        .unwrap();
    assert_eq!(previous.earned_days, dec!(16));

    let key = BalanceKey::new(employee, h.annual.id, 2027);
    let balance = h.engine.ledger().balance(key).unwrap();
    assert_eq!(balance.carried_over_days, dec!(16));
    assert_eq!(balance.carry_over_source_year, Some(2026));
    assert_eq!(balance.expiry_date, Some(date(2027, 4, 1)));

    h.move_to(date(2027, 3, 10));
    assert_eq!(h.engine.expire_carry_over().unwrap(), (0, 1));
    assert_eq!(h.engine.expire_carry_over().unwrap(), (0, 0));
    assert_eq!(h.notifier.count(NotificationTemplate::BalanceExpiring), 1);

    h.move_to(date(2027, 4, 1));
    assert_eq!(h.engine.expire_carry_over().unwrap(), (1, 0));
    assert_eq!(h.engine.expire_carry_over().unwrap(), (0, 0));
    assert_eq!(h.notifier.count(NotificationTemplate::BalanceExpired), 1);

    let balance = h.engine.ledger().balance(key).unwrap();
    assert_eq!(balance.expired_days, dec!(16));
    assert!(balance.expiry_processed);
}

#[test]
fn test_consumed_carry_over_does_not_expire() {
    let h = Harness::new();
    let employee = h.hire(false);
    let approver = EmployeeId::new();
    h.engine.current_balances(employee).unwrap();

    h.move_to(date(2027, 1, 5));
    assert_eq!(h.engine.roll_over_balances().unwrap(), 1);

    // 11 to 22 January: ten weekdays and one Saturday.
    let app = h
        .engine
        .submit(request(employee, h.annual.id, date(2027, 1, 11), date(2027, 1, 22)))
        .unwrap();
    assert_eq!(app.requested_days, dec!(10.5));
    h.engine.approve(app.id, approver, None).unwrap();
    h.engine.approve(app.id, approver, None).unwrap();

    h.move_to(date(2027, 4, 1));
    assert_eq!(h.engine.expire_carry_over().unwrap(), (1, 0));
    let balance = h
        .engine
        .ledger()
        .balance(BalanceKey::new(employee, h.annual.id, 2027))
        .unwrap();
    assert_eq!(balance.expired_days, dec!(5.5));
}

#[test]
fn test_no_carry_over_for_disallowed_type() {
    let h = Harness::new();
    let employee = h.hire(false);
    let study = h.calendar_days_type("STUDY", dec!(10));
    h.engine.refresh_balance(employee, study.id, 2026).unwrap();

    h.move_to(date(2027, 1, 5));
    h.engine.roll_over_balances().unwrap();
    assert!(
        h.engine
            .ledger()
            .balance(BalanceKey::new(employee, study.id, 2027))
            .is_err()
    );
}

#[test]
fn test_rejection_after_rollover_reaches_carry_over() {
    let h = Harness::new();
    let employee = h.hire(false);

    // Monday 28 to Thursday 31 December, still pending at year end.
    let app = h
        .engine
        .submit(request(employee, h.annual.id, date(2026, 12, 28), date(2026, 12, 31)))
        .unwrap();
    assert_eq!(app.requested_days, dec!(4));

    h.move_to(date(2027, 1, 2));
    h.engine.run_sweeps().unwrap();
    let key = BalanceKey::new(employee, h.annual.id, 2027);
    assert_eq!(h.engine.ledger().balance(key).unwrap().carried_over_days, dec!(12));

    h.engine
        .reject(app.id, EmployeeId::new(), "Year-end freeze")
        .unwrap();
    let balance = h.engine.ledger().balance(key).unwrap();
    assert_eq!(balance.carried_over_days, dec!(16));
    assert_eq!(balance.carry_over_source_year, Some(2026));

    // A second sweep leaves the topped-up carry-over alone.
    assert_eq!(h.engine.run_sweeps().unwrap(), SweepReport::default());
    assert_eq!(h.engine.ledger().balance(key).unwrap().carried_over_days, dec!(16));
}

#[test]
fn test_credit_to_closed_year_reaches_carry_over() {
    let h = Harness::new();
    let employee = h.hire(false);
    h.engine.current_balances(employee).unwrap();

    h.move_to(date(2027, 1, 5));
    h.engine.roll_over_balances().unwrap();
    let previous = BalanceKey::new(employee, h.annual.id, 2026);
    h.engine
        .ledger()
        .adjust(
            previous,
            dec!(2),
            AdjustmentDirection::Credit,
            "Overtime in December",
            EmployeeId::new(),
            h.clock.now(),
        )
        .unwrap();

    let balance = h.engine.ledger().balance(previous.next_year()).unwrap();
    assert_eq!(balance.carried_over_days, dec!(18));
}
