//! Leave-type catalog and public holidays.

use chrono::NaiveDate;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use leavebook_core::calendar::{HolidayCalendar, PublicHoliday};
use leavebook_core::policy::LeaveType;
use leavebook_shared::types::{HolidayId, LeaveTypeId};
use std::sync::{Mutex, PoisonError};

use crate::error::{EngineError, EngineResult};

/// Leave types keyed by id, with unique codes.
#[derive(Debug, Default)]
pub struct LeaveTypeCatalog {
    types: DashMap<LeaveTypeId, LeaveType>,
    codes: DashMap<String, LeaveTypeId>,
    // Serializes code changes so two edits cannot swap codes into a clash.
    code_changes: Mutex<()>,
}

fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

impl LeaveTypeCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a new leave type.
    ///
    /// # Errors
    ///
    /// A policy error for an invalid definition, `DuplicateCode` when the
    /// code is taken.
    pub fn create(&self, mut leave_type: LeaveType) -> EngineResult<LeaveType> {
        leave_type.validate()?;
        leave_type.code = normalize_code(&leave_type.code);
        let _guard = self
            .code_changes
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        match self.codes.entry(leave_type.code.clone()) {
            Entry::Occupied(_) => return Err(EngineError::DuplicateCode(leave_type.code)),
            Entry::Vacant(slot) => {
                slot.insert(leave_type.id);
            }
        }
        self.types.insert(leave_type.id, leave_type.clone());
        tracing::info!(leave_type_id = %leave_type.id, code = %leave_type.code, "leave type created");
        Ok(leave_type)
    }

    /// Replaces an existing leave type.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id, a policy error for an invalid
    /// definition, `DuplicateCode` when renamed onto a taken code.
    pub fn update(&self, mut leave_type: LeaveType) -> EngineResult<LeaveType> {
        leave_type.validate()?;
        leave_type.code = normalize_code(&leave_type.code);
        let _guard = self
            .code_changes
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let previous_code = self
            .types
            .get(&leave_type.id)
            .map(|t| t.code.clone())
            .ok_or_else(|| EngineError::not_found("leave type", leave_type.id))?;

        if previous_code != leave_type.code {
            if self.codes.contains_key(&leave_type.code) {
                return Err(EngineError::DuplicateCode(leave_type.code));
            }
            self.codes.remove(&previous_code);
            self.codes.insert(leave_type.code.clone(), leave_type.id);
        }
        self.types.insert(leave_type.id, leave_type.clone());
        tracing::info!(leave_type_id = %leave_type.id, code = %leave_type.code, "leave type updated");
        Ok(leave_type)
    }

    /// Removes a leave type. Reference checks are the caller's job.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id.
    pub fn remove(&self, id: LeaveTypeId) -> EngineResult<LeaveType> {
        let _guard = self
            .code_changes
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let (_, removed) = self
            .types
            .remove(&id)
            .ok_or_else(|| EngineError::not_found("leave type", id))?;
        self.codes.remove(&removed.code);
        tracing::info!(leave_type_id = %id, code = %removed.code, "leave type deleted");
        Ok(removed)
    }

    /// Leave type by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id.
    pub fn get(&self, id: LeaveTypeId) -> EngineResult<LeaveType> {
        self.types
            .get(&id)
            .map(|t| t.value().clone())
            .ok_or_else(|| EngineError::not_found("leave type", id))
    }

    /// Leave type by code (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown code.
    pub fn by_code(&self, code: &str) -> EngineResult<LeaveType> {
        let code = normalize_code(code);
        let id = self
            .codes
            .get(&code)
            .map(|id| *id.value())
            .ok_or_else(|| EngineError::not_found("leave type", &code))?;
        self.get(id)
    }

    /// All leave types, ordered by code.
    #[must_use]
    pub fn all(&self) -> Vec<LeaveType> {
        let mut types: Vec<LeaveType> = self.types.iter().map(|t| t.value().clone()).collect();
        types.sort_by(|a, b| a.code.cmp(&b.code));
        types
    }
}

/// Public holidays.
#[derive(Debug, Default)]
pub struct HolidayRegistry {
    holidays: DashMap<HolidayId, PublicHoliday>,
}

impl HolidayRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a holiday.
    pub fn add(&self, holiday: PublicHoliday) -> PublicHoliday {
        tracing::info!(holiday_id = %holiday.id, date = %holiday.date, name = %holiday.name, "holiday added");
        self.holidays.insert(holiday.id, holiday.clone());
        holiday
    }

    /// Removes a holiday.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id.
    pub fn remove(&self, id: HolidayId) -> EngineResult<PublicHoliday> {
        self.holidays
            .remove(&id)
            .map(|(_, h)| h)
            .ok_or_else(|| EngineError::not_found("holiday", id))
    }

    /// All holidays, ordered by date.
    #[must_use]
    pub fn all(&self) -> Vec<PublicHoliday> {
        let mut holidays: Vec<PublicHoliday> =
            self.holidays.iter().map(|h| h.value().clone()).collect();
        holidays.sort_by_key(|h| h.date);
        holidays
    }

    /// Holidays as a calendar for day counting.
    #[must_use]
    pub fn calendar(&self) -> HolidayCalendar {
        HolidayCalendar::new(self.all())
    }

    /// Returns true if a holiday falls on `date`.
    #[must_use]
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.iter().any(|h| h.falls_on(date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_codes_are_unique_and_case_insensitive() {
        let catalog = LeaveTypeCatalog::new();
        catalog
            .create(LeaveType::new("annual", "Annual Leave", dec!(16)))
            .unwrap();
        assert!(matches!(
            catalog.create(LeaveType::new("ANNUAL", "Annual again", dec!(10))),
            Err(EngineError::DuplicateCode(_))
        ));
        assert_eq!(catalog.by_code("Annual").unwrap().name, "Annual Leave");
    }

    #[test]
    fn test_update_renames_code() {
        let catalog = LeaveTypeCatalog::new();
        let mut sick = catalog
            .create(LeaveType::new("SICK", "Sick Leave", dec!(10)))
            .unwrap();
        catalog
            .create(LeaveType::new("ANNUAL", "Annual Leave", dec!(16)))
            .unwrap();

        sick.code = "ANNUAL".to_string();
        assert!(matches!(
            catalog.update(sick.clone()),
            Err(EngineError::DuplicateCode(_))
        ));

        sick.code = "MEDICAL".to_string();
        catalog.update(sick.clone()).unwrap();
        assert!(catalog.by_code("SICK").is_err());
        assert_eq!(catalog.by_code("MEDICAL").unwrap().id, sick.id);
    }

    #[test]
    fn test_remove_frees_code() {
        let catalog = LeaveTypeCatalog::new();
        let study = catalog
            .create(LeaveType::new("STUDY", "Study Leave", dec!(5)))
            .unwrap();
        catalog.remove(study.id).unwrap();
        assert!(catalog.get(study.id).is_err());
        assert!(catalog.create(LeaveType::new("STUDY", "Study Leave", dec!(5))).is_ok());
    }

    #[test]
    fn test_holidays_sorted_and_recurring() {
        let registry = HolidayRegistry::new();
        let christmas = registry.add(PublicHoliday::new(
            "Christmas",
            NaiveDate::from_ymd_opt(2020, 12, 25).unwrap(),
            true,
        ));
        registry.add(PublicHoliday::new(
            "Founders Day",
            NaiveDate::from_ymd_opt(2026, 3, 6).unwrap(),
            false,
        ));
        assert!(registry.is_holiday(NaiveDate::from_ymd_opt(2026, 12, 25).unwrap()));
        assert_eq!(registry.all()[0].name, "Christmas");
        registry.remove(christmas.id).unwrap();
        assert!(!registry.is_holiday(NaiveDate::from_ymd_opt(2026, 12, 25).unwrap()));
        assert!(registry.remove(christmas.id).is_err());
    }
}
