//! Calendar domain types.

use chrono::{Datelike, NaiveDate};
use leavebook_shared::types::HolidayId;
use serde::{Deserialize, Serialize};

/// Shape of the working week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekShape {
    /// Saturday counts as half a working day instead of a full one.
    pub saturday_half_day: bool,
    /// Sunday is a non-working day.
    pub sunday_off: bool,
}

impl Default for WeekShape {
    fn default() -> Self {
        Self {
            saturday_half_day: true,
            sunday_off: true,
        }
    }
}

/// How the days of a leave range are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayCounting {
    /// Weekday weights apply and holidays are excluded.
    WorkingDays,
    /// Every calendar day counts as one.
    CalendarDays,
}

impl DayCounting {
    /// Picks the counting rule from a leave type's `is_calendar_days` flag.
    #[must_use]
    pub const fn from_calendar_flag(is_calendar_days: bool) -> Self {
        if is_calendar_days {
            Self::CalendarDays
        } else {
            Self::WorkingDays
        }
    }
}

/// A public holiday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicHoliday {
    /// Unique identifier.
    #[serde(default)]
    pub id: HolidayId,
    /// Holiday name.
    pub name: String,
    /// Date of the holiday.
    pub date: NaiveDate,
    /// Repeats every year on the same month and day.
    #[serde(default)]
    pub is_recurring: bool,
}

impl PublicHoliday {
    /// Creates a holiday.
    #[must_use]
    pub fn new(name: impl Into<String>, date: NaiveDate, is_recurring: bool) -> Self {
        Self {
            id: HolidayId::new(),
            name: name.into(),
            date,
            is_recurring,
        }
    }

    /// Returns true if this holiday falls on the given date.
    #[must_use]
    pub fn falls_on(&self, date: NaiveDate) -> bool {
        if self.is_recurring {
            self.date.month() == date.month() && self.date.day() == date.day()
        } else {
            self.date == date
        }
    }
}

/// The set of holidays used for day counting.
#[derive(Debug, Clone, Default)]
pub struct HolidayCalendar {
    holidays: Vec<PublicHoliday>,
}

impl HolidayCalendar {
    /// Creates a calendar from a list of holidays.
    #[must_use]
    pub fn new(holidays: Vec<PublicHoliday>) -> Self {
        Self { holidays }
    }

    /// Returns true if any holiday falls on the given date.
    #[must_use]
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.iter().any(|h| h.falls_on(date))
    }

    /// Returns the holidays in this calendar.
    #[must_use]
    pub fn holidays(&self) -> &[PublicHoliday] {
        &self.holidays
    }
}
