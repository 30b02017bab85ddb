//! Transactional leave engine for Leavebook.
//!
//! This crate wires the pure rules of `leavebook-core` to concurrent
//! in-memory storage and the external collaborators (employee directory,
//! notification dispatcher, clock).
//!
//! # Modules
//!
//! - `ledger` - Balance ledger with atomic per-key operations
//! - `policy` - Versioned leave-policy registry
//! - `catalog` - Leave-type catalog and public holidays
//! - `balances` - Accrual refresh and administrative adjustments
//! - `applications` - Leave application submission and approvals
//! - `cash_out` - Leave encashment requests
//! - `recalls` - Recall from active leave
//! - `sweeps` - Scheduled auto-approval, carry-over and expiry
//! - `fixture` - JSON bootstrap data
//! - `clock`, `directory`, `notify` - Collaborator traits

pub mod applications;
pub mod balances;
pub mod cash_out;
pub mod catalog;
pub mod clock;
pub mod directory;
pub mod error;
pub mod fixture;
pub mod ledger;
pub mod notify;
pub mod policy;
pub mod recalls;
pub mod sweeps;

use chrono::NaiveDate;
use dashmap::DashMap;
use leavebook_core::calendar::PublicHoliday;
use leavebook_core::cashout::CashOutRequest;
use leavebook_core::notification::Notification;
use leavebook_core::policy::{EmployeeProfile, LeaveSettings, LeaveType};
use leavebook_core::recall::LeaveRecall;
use leavebook_core::workflow::LeaveApplication;
use leavebook_shared::types::{
    ApplicationId, CashOutId, EmployeeId, HolidayId, LeaveTypeId, RecallId,
};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

pub use catalog::{HolidayRegistry, LeaveTypeCatalog};
pub use clock::{Clock, FixedClock, SystemClock};
pub use directory::{EmployeeDirectory, InMemoryDirectory};
pub use error::{EngineError, EngineResult, ErrorKind};
pub use fixture::Fixture;
pub use ledger::{BalanceAdjustment, BalanceLedger};
pub use notify::{NotificationDispatcher, RecordingDispatcher, TracingDispatcher};
pub use policy::PolicyRegistry;
pub use sweeps::SweepReport;

/// The leave engine.
///
/// Share it behind an `Arc`; every operation takes `&self`.
pub struct LeaveEngine {
    policy: PolicyRegistry,
    leave_types: LeaveTypeCatalog,
    holidays: HolidayRegistry,
    ledger: BalanceLedger,
    applications: DashMap<ApplicationId, LeaveApplication>,
    cash_outs: DashMap<CashOutId, CashOutRequest>,
    recalls: DashMap<RecallId, LeaveRecall>,
    employee_gates: DashMap<EmployeeId, Arc<Mutex<()>>>,
    // Shared while a balance is opened, exclusive while a leave type is deleted.
    type_lifecycle: RwLock<()>,
    directory: Arc<dyn EmployeeDirectory>,
    notifier: Arc<dyn NotificationDispatcher>,
    clock: Arc<dyn Clock>,
}

impl LeaveEngine {
    /// Creates an engine whose policy version 1 is `settings`, effective today.
    ///
    /// # Errors
    ///
    /// Returns a policy error if the settings are invalid.
    pub fn new(
        settings: LeaveSettings,
        directory: Arc<dyn EmployeeDirectory>,
        notifier: Arc<dyn NotificationDispatcher>,
        clock: Arc<dyn Clock>,
    ) -> EngineResult<Self> {
        let effective_date = clock.today();
        Self::with_effective_date(settings, effective_date, directory, notifier, clock)
    }

    /// Creates an engine whose policy version 1 takes effect on `effective_date`.
    ///
    /// # Errors
    ///
    /// Returns a policy error if the settings are invalid.
    pub fn with_effective_date(
        settings: LeaveSettings,
        effective_date: NaiveDate,
        directory: Arc<dyn EmployeeDirectory>,
        notifier: Arc<dyn NotificationDispatcher>,
        clock: Arc<dyn Clock>,
    ) -> EngineResult<Self> {
        Ok(Self {
            policy: PolicyRegistry::new(settings, effective_date)?,
            leave_types: LeaveTypeCatalog::new(),
            holidays: HolidayRegistry::new(),
            ledger: BalanceLedger::new(),
            applications: DashMap::new(),
            cash_outs: DashMap::new(),
            recalls: DashMap::new(),
            employee_gates: DashMap::new(),
            type_lifecycle: RwLock::new(()),
            directory,
            notifier,
            clock,
        })
    }

    /// Policy registry.
    #[must_use]
    pub fn policy(&self) -> &PolicyRegistry {
        &self.policy
    }

    /// Leave-type catalog.
    #[must_use]
    pub fn leave_types(&self) -> &LeaveTypeCatalog {
        &self.leave_types
    }

    /// Public holidays.
    #[must_use]
    pub fn holidays(&self) -> &HolidayRegistry {
        &self.holidays
    }

    /// Balance ledger.
    #[must_use]
    pub fn ledger(&self) -> &BalanceLedger {
        &self.ledger
    }

    /// Clock in use.
    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Adds a leave type.
    ///
    /// # Errors
    ///
    /// A policy error for an invalid definition, `DuplicateCode` when the code is taken.
    pub fn create_leave_type(&self, leave_type: LeaveType) -> EngineResult<LeaveType> {
        self.leave_types.create(leave_type)
    }

    /// Replaces a leave type definition.
    ///
    /// # Errors
    ///
    /// `NotFound`, a policy error, or `DuplicateCode`.
    pub fn update_leave_type(&self, leave_type: LeaveType) -> EngineResult<LeaveType> {
        self.leave_types.update(leave_type)
    }

    /// Deletes a leave type that nothing references.
    ///
    /// # Errors
    ///
    /// `LeaveTypeInUse` when an application, cash-out or balance uses it;
    /// `NotFound` for an unknown id.
    pub fn delete_leave_type(&self, id: LeaveTypeId) -> EngineResult<LeaveType> {
        let _exclusive = self
            .type_lifecycle
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let leave_type = self.leave_types.get(id)?;
        let in_use = self.applications.iter().any(|a| a.leave_type_id == id)
            || self.cash_outs.iter().any(|c| c.leave_type_id == id)
            || self.ledger.references_leave_type(id);
        if in_use {
            tracing::warn!(leave_type_id = %id, code = %leave_type.code, "leave type still in use");
            return Err(EngineError::LeaveTypeInUse(leave_type.code));
        }
        self.leave_types.remove(id)
    }

    /// Leave type by code.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown code.
    pub fn leave_type_by_code(&self, code: &str) -> EngineResult<LeaveType> {
        self.leave_types.by_code(code)
    }

    /// Adds a public holiday.
    pub fn add_holiday(&self, holiday: PublicHoliday) -> PublicHoliday {
        self.holidays.add(holiday)
    }

    /// Removes a public holiday.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id.
    pub fn remove_holiday(&self, id: HolidayId) -> EngineResult<PublicHoliday> {
        self.holidays.remove(id)
    }

    fn profile(&self, employee_id: EmployeeId) -> EngineResult<EmployeeProfile> {
        self.directory
            .profile(employee_id)
            .ok_or_else(|| EngineError::not_found("employee", employee_id))
    }

    fn employee_gate(&self, employee_id: EmployeeId) -> Arc<Mutex<()>> {
        Arc::clone(self.employee_gates.entry(employee_id).or_default().value())
    }

    fn notify(&self, notification: Notification) {
        self.notifier.dispatch(notification);
    }
}
