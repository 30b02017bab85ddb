//! Concurrent reservations and catalog changes.
//!
//! However the threads interleave, a balance with room for one request
//! admits exactly one of them.

use std::sync::{Arc, Barrier};
use std::thread;

mod common;

use common::{Harness, date, request};
use leavebook_core::ledger::BalanceKey;
use leavebook_engine::{BalanceLedger, ErrorKind};
use leavebook_shared::types::{EmployeeId, LeaveTypeId};
use rust_decimal_macros::dec;

const THREADS: usize = 8;

#[test]
fn test_concurrent_reservations_admit_exactly_one() {
    let ledger = Arc::new(BalanceLedger::new());
    let key = BalanceKey::new(EmployeeId::new(), LeaveTypeId::new(), 2026);
    ledger.refresh_accrual(key, dec!(5), dec!(5), 1);
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let ledger = Arc::clone(&ledger);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                ledger.reserve(key, dec!(5))
            })
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    for err in results.into_iter().filter_map(Result::err) {
        assert_eq!(err.kind(), ErrorKind::InsufficientBalance);
    }
    let balance = ledger.balance(key).unwrap();
    assert_eq!(balance.pending_days, dec!(5));
    assert_eq!(balance.remaining_days(), dec!(0));
}

#[test]
fn test_concurrent_submissions_for_one_employee() {
    let h = Arc::new(Harness::new());
    let employee = h.hire(false);
    let barrier = Arc::new(Barrier::new(THREADS));

    // Disjoint fortnights, each Monday to the following Tuesday: 7.5 days
    // against 12.8 earned. Requests reaching into 2027 find nothing earned yet.
    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let h = Arc::clone(&h);
            let barrier = Arc::clone(&barrier);
            let start = date(2026, 10, 26) + chrono::Duration::weeks(2 * i as i64);
            let end = start + chrono::Duration::days(8);
            thread::spawn(move || {
                barrier.wait();
                h.engine.submit(request(employee, h.annual.id, start, end))
            })
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|t| t.join().unwrap()).collect();

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert_eq!(h.engine.applications_for(employee).len(), 1);
    let balance = h
        .engine
        .ledger()
        .balance(BalanceKey::new(employee, h.annual.id, 2026))
        .unwrap();
    assert_eq!(balance.pending_days, dec!(7.5));
}

#[test]
fn test_different_employees_do_not_contend() {
    let h = Arc::new(Harness::new());
    let employees: Vec<_> = (0..THREADS).map(|_| h.hire(false)).collect();
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = employees
        .iter()
        .map(|&employee| {
            let h = Arc::clone(&h);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                h.engine.submit(request(
                    employee,
                    h.annual.id,
                    date(2026, 10, 26),
                    date(2026, 10, 30),
                ))
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap().is_ok());
    }
    for employee in employees {
        assert_eq!(h.engine.balances_for(employee).pop().unwrap().pending_days, dec!(5));
    }
}

#[test]
fn test_leave_type_deletion_races_submissions() {
    let h = Arc::new(Harness::new());
    let study = h.calendar_days_type("STUDY", dec!(20)).id;
    let employees: Vec<_> = (0..THREADS - 1).map(|_| h.hire(false)).collect();
    let barrier = Arc::new(Barrier::new(THREADS));

    let submitters: Vec<_> = employees
        .iter()
        .map(|&employee| {
            let h = Arc::clone(&h);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                h.engine
                    .submit(request(employee, study, date(2026, 10, 26), date(2026, 10, 28)))
                    .map(|_| ())
            })
        })
        .collect();
    let deleter = {
        let h = Arc::clone(&h);
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            h.engine.delete_leave_type(study).map(|_| ())
        })
    };

    let submitted: Vec<_> = submitters.into_iter().map(|t| t.join().unwrap()).collect();
    let deleted = deleter.join().unwrap();

    let referenced = employees.iter().any(|&employee| {
        h.engine
            .balances_for(employee)
            .iter()
            .any(|b| b.key.leave_type_id == study)
    });
    match deleted {
        Ok(()) => {
            assert!(!referenced);
            for err in submitted.into_iter().filter_map(Result::err) {
                assert_eq!(err.kind(), ErrorKind::NotFound);
            }
            assert!(h.engine.leave_types().get(study).is_err());
        }
        Err(err) => {
            assert_eq!(err.kind(), ErrorKind::Conflict);
            assert!(referenced);
            assert!(submitted.iter().all(Result::is_ok));
        }
    }
}
