//! JSON bootstrap data for a fresh engine.

use chrono::NaiveDate;
use leavebook_core::calendar::PublicHoliday;
use leavebook_core::policy::{EmployeeProfile, LeaveSettings, LeaveType};
use serde::Deserialize;
use std::sync::Arc;

use crate::LeaveEngine;
use crate::clock::Clock;
use crate::directory::InMemoryDirectory;
use crate::error::EngineResult;
use crate::notify::NotificationDispatcher;

/// Policy, leave types, holidays and employees to load at start-up.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Fixture {
    /// Leave settings published as policy version 1.
    pub settings: LeaveSettings,
    /// When version 1 takes effect (defaults to today).
    pub effective_date: Option<NaiveDate>,
    /// Leave types to create.
    pub leave_types: Vec<LeaveType>,
    /// Public holidays.
    pub holidays: Vec<PublicHoliday>,
    /// Employee profiles served by the in-memory directory.
    pub employees: Vec<EmployeeProfile>,
}

impl Fixture {
    /// Parses a fixture document.
    ///
    /// # Errors
    ///
    /// Returns the JSON error for malformed input.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl LeaveEngine {
    /// Builds an engine from a fixture, backed by an in-memory directory.
    ///
    /// # Errors
    ///
    /// Returns a policy error for invalid settings or leave types, or
    /// `DuplicateCode` when two leave types share a code.
    pub fn from_fixture(
        fixture: Fixture,
        notifier: Arc<dyn NotificationDispatcher>,
        clock: Arc<dyn Clock>,
    ) -> EngineResult<Self> {
        let directory: InMemoryDirectory = fixture.employees.into_iter().collect();
        let effective_date = fixture.effective_date.unwrap_or_else(|| clock.today());
        let engine = Self::with_effective_date(
            fixture.settings,
            effective_date,
            Arc::new(directory),
            notifier,
            clock,
        )?;
        for leave_type in fixture.leave_types {
            engine.create_leave_type(leave_type)?;
        }
        for holiday in fixture.holidays {
            engine.add_holiday(holiday);
        }
        tracing::info!(
            leave_types = engine.leave_types.all().len(),
            holidays = engine.holidays.all().len(),
            "engine loaded from fixture"
        );
        Ok(engine)
    }
}
