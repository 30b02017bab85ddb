//! Shared set-up for engine integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use leavebook_core::calendar::DayCounting;
use leavebook_core::policy::{EmployeeProfile, Gender, LeaveSettings, LeaveType};
use leavebook_core::workflow::LeaveRequest;
use leavebook_engine::{
    Clock, FixedClock, InMemoryDirectory, LeaveEngine, RecordingDispatcher,
};
use leavebook_shared::types::{EmployeeId, LeaveTypeId};
use rust_decimal_macros::dec;
use std::sync::Arc;

/// Monday 19 October 2026.
pub fn today() -> NaiveDate {
    date(2026, 10, 19)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub struct Harness {
    pub engine: LeaveEngine,
    pub clock: Arc<FixedClock>,
    pub notifier: Arc<RecordingDispatcher>,
    pub directory: Arc<InMemoryDirectory>,
    pub annual: LeaveType,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_settings(LeaveSettings::default())
    }

    /// Engine on `today()` with a 16-day annual leave type. An employee hired
    /// in 2020 has earned 16 × 292 / 365 = 12.8 days by then.
    pub fn with_settings(settings: LeaveSettings) -> Self {
        let clock = Arc::new(FixedClock::at_date(today()));
        let notifier = Arc::new(RecordingDispatcher::new());
        let directory = Arc::new(InMemoryDirectory::new());
        let engine = LeaveEngine::with_effective_date(
            settings,
            date(2026, 1, 1),
            directory.clone(),
            notifier.clone(),
            clock.clone(),
        )
        .unwrap();

        let mut annual = LeaveType::new("ANNUAL", "Annual Leave", dec!(16));
        annual.is_carry_over_allowed = true;
        annual.carry_over_expiry_months = Some(3);
        let annual = engine.create_leave_type(annual).unwrap();

        Self {
            engine,
            clock,
            notifier,
            directory,
            annual,
        }
    }

    pub fn hire(&self, is_manager: bool) -> EmployeeId {
        let employee_id = EmployeeId::new();
        self.directory.upsert(EmployeeProfile {
            employee_id,
            is_manager,
            monthly_salary: dec!(25000),
            hire_date: date(2020, 1, 6),
            gender: Gender::Female,
        });
        employee_id
    }

    pub fn calendar_days_type(&self, code: &str, allowance: rust_decimal::Decimal) -> LeaveType {
        let mut leave_type = LeaveType::new(code, code, allowance);
        leave_type.is_calendar_days = true;
        let leave_type = self.engine.create_leave_type(leave_type).unwrap();
        assert_eq!(leave_type.day_counting(), DayCounting::CalendarDays);
        leave_type
    }

    pub fn move_to(&self, day: NaiveDate) {
        self.clock.set(FixedClock::at_date(day).now());
    }
}

pub fn request(
    employee_id: EmployeeId,
    leave_type_id: LeaveTypeId,
    start: NaiveDate,
    end: NaiveDate,
) -> LeaveRequest {
    LeaveRequest {
        employee_id,
        leave_type_id,
        start_date: start,
        end_date: end,
        reason: "Family visit".to_string(),
        relief_officer_id: None,
        attachment_url: None,
    }
}
