//! Leave encashment through the engine.

mod common;

use common::Harness;
use leavebook_core::cashout::{CashOutStatus, IneligibleReason};
use leavebook_core::notification::NotificationTemplate;
use leavebook_core::policy::LeaveSettings;
use leavebook_engine::ErrorKind;
use leavebook_shared::types::{EmployeeId, RoundingMode};
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn encashing(rounding_mode: RoundingMode) -> Harness {
    Harness::with_settings(LeaveSettings {
        encashment_enabled: true,
        rounding_mode,
        ..LeaveSettings::default()
    })
}

#[test]
fn test_eligibility_caps_at_max_days() {
    let h = encashing(RoundingMode::Round);
    let employee = h.hire(false);

    let eligibility = h.engine.cash_out_eligibility(employee).unwrap();
    assert!(eligibility.eligible);
    assert_eq!(eligibility.eligible_days, dec!(10));
    assert_eq!(eligibility.daily_rate, dec!(833.33));
    assert_eq!(eligibility.max_amount, dec!(8333.33));
    assert_eq!(eligibility.reason, None);
}

#[test]
fn test_disabled_policy() {
    let h = Harness::new();
    let employee = h.hire(false);

    let eligibility = h.engine.cash_out_eligibility(employee).unwrap();
    assert!(!eligibility.eligible);
    assert_eq!(eligibility.reason, Some(IneligibleReason::EncashmentDisabled));

    let err = h.engine.submit_cash_out(employee, dec!(1)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn test_submit_values_and_reserves_days() {
    let h = encashing(RoundingMode::Round);
    let employee = h.hire(false);

    let request = h.engine.submit_cash_out(employee, dec!(5)).unwrap();
    assert_eq!(request.status, CashOutStatus::Pending);
    assert_eq!(request.cash_value, dec!(4166.67));
    assert_eq!(request.monthly_salary, dec!(25000));
    assert_eq!(request.salary_divisor, dec!(30));
    assert_eq!(request.fiscal_year, 2026);

    let balance = h.engine.balances_for(employee).pop().unwrap();
    assert_eq!(balance.pending_days, dec!(5));
    assert_eq!(balance.remaining_days(), dec!(7.8));
    assert_eq!(h.notifier.count(NotificationTemplate::CashOutUpdated), 1);

    let err = h.engine.submit_cash_out(employee, dec!(1)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PendingRequestExists);
    assert_eq!(
        h.engine.cash_out_eligibility(employee).unwrap().reason,
        Some(IneligibleReason::PendingRequest)
    );
}

#[rstest]
#[case::round(RoundingMode::Round, dec!(4166.67))]
#[case::floor(RoundingMode::Floor, dec!(4166.00))]
#[case::ceil(RoundingMode::Ceil, dec!(4167.00))]
fn test_cash_value_rounding(#[case] mode: RoundingMode, #[case] expected: Decimal) {
    let h = encashing(mode);
    let employee = h.hire(false);
    let request = h.engine.submit_cash_out(employee, dec!(5)).unwrap();
    assert_eq!(request.cash_value, expected);
}

#[test]
fn test_exceeding_eligible_days() {
    let h = encashing(RoundingMode::Round);
    let employee = h.hire(false);

    let err = h.engine.submit_cash_out(employee, dec!(10.5)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ExceedsEligibleDays);

    let err = h.engine.submit_cash_out(employee, dec!(0)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(h.engine.cash_outs_for(employee).is_empty());
}

#[test]
fn test_approve_then_pay() {
    let h = encashing(RoundingMode::Round);
    let employee = h.hire(false);
    let payroll = EmployeeId::new();

    let request = h.engine.submit_cash_out(employee, dec!(2)).unwrap();
    let err = h.engine.mark_cash_out_paid(request.id, payroll).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);

    let approved = h.engine.approve_cash_out(request.id, payroll).unwrap();
    assert_eq!(approved.status, CashOutStatus::Approved);
    let balance = h.engine.balances_for(employee).pop().unwrap();
    assert_eq!(balance.pending_days, dec!(0));
    assert_eq!(balance.used_days, dec!(2));

    let paid = h.engine.mark_cash_out_paid(request.id, payroll).unwrap();
    assert_eq!(paid.status, CashOutStatus::Paid);
    assert_eq!(h.engine.cash_out(request.id).unwrap().status, CashOutStatus::Paid);

    let err = h.engine.reject_cash_out(request.id, payroll, "late").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);
}

#[test]
fn test_reject_releases_days() {
    let h = encashing(RoundingMode::Round);
    let employee = h.hire(false);
    let hr = EmployeeId::new();

    let request = h.engine.submit_cash_out(employee, dec!(3)).unwrap();
    let err = h.engine.reject_cash_out(request.id, hr, "").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let rejected = h
        .engine
        .reject_cash_out(request.id, hr, "Budget closed")
        .unwrap();
    assert_eq!(rejected.status, CashOutStatus::Rejected);
    assert_eq!(rejected.rejection_reason.as_deref(), Some("Budget closed"));

    let balance = h.engine.balances_for(employee).pop().unwrap();
    assert_eq!(balance.pending_days, dec!(0));
    assert_eq!(balance.remaining_days(), dec!(12.8));
    assert!(h.engine.cash_out_eligibility(employee).unwrap().eligible);
}
