//! Working-day calculations.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;

use crate::calendar::error::CalendarError;
use crate::calendar::types::{DayCounting, HolidayCalendar, WeekShape};

/// Upper bound on the search for the next working day.
const MAX_WORKING_DAY_SEARCH: usize = 370;

/// Stateless service for working-day arithmetic.
pub struct CalendarService;

impl CalendarService {
    /// Returns how much a single date contributes to a leave: 0, 0.5 or 1.
    #[must_use]
    pub fn day_weight(
        date: NaiveDate,
        shape: WeekShape,
        holidays: &HolidayCalendar,
        counting: DayCounting,
    ) -> Decimal {
        if counting == DayCounting::CalendarDays {
            return Decimal::ONE;
        }
        if holidays.is_holiday(date) {
            return Decimal::ZERO;
        }
        match date.weekday() {
            Weekday::Sun if shape.sunday_off => Decimal::ZERO,
            Weekday::Sat if shape.saturday_half_day => Decimal::new(5, 1),
            _ => Decimal::ONE,
        }
    }

    /// Sums the per-day contributions over the inclusive range `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns `CalendarError::InvalidRange` if `start > end`.
    pub fn working_days_between(
        start: NaiveDate,
        end: NaiveDate,
        shape: WeekShape,
        holidays: &HolidayCalendar,
        counting: DayCounting,
    ) -> Result<Decimal, CalendarError> {
        if start > end {
            return Err(CalendarError::InvalidRange { start, end });
        }

        Ok(start
            .iter_days()
            .take_while(|d| *d <= end)
            .map(|d| Self::day_weight(d, shape, holidays, counting))
            .sum())
    }

    /// Returns true if the date carries any working time.
    ///
    /// Saturday is a (partial) working day under every week shape.
    #[must_use]
    pub fn is_working_day(date: NaiveDate, shape: WeekShape, holidays: &HolidayCalendar) -> bool {
        Self::day_weight(date, shape, holidays, DayCounting::WorkingDays) > Decimal::ZERO
    }

    /// Returns the first working day strictly after `date`.
    ///
    /// Holidays are skipped here as well, so the return date agrees with
    /// `working_days_between`.
    ///
    /// # Errors
    ///
    /// Returns `CalendarError::NoWorkingDay` if no working day exists within a year.
    pub fn next_working_day(
        date: NaiveDate,
        shape: WeekShape,
        holidays: &HolidayCalendar,
    ) -> Result<NaiveDate, CalendarError> {
        date.iter_days()
            .skip(1)
            .take(MAX_WORKING_DAY_SEARCH)
            .find(|d| Self::is_working_day(*d, shape, holidays))
            .ok_or(CalendarError::NoWorkingDay(date))
    }

    /// Expected date the employee is back at work after a leave ending on `end_date`.
    ///
    /// # Errors
    ///
    /// See [`CalendarService::next_working_day`].
    pub fn return_date(
        end_date: NaiveDate,
        shape: WeekShape,
        holidays: &HolidayCalendar,
    ) -> Result<NaiveDate, CalendarError> {
        Self::next_working_day(end_date, shape, holidays)
    }

    /// Returns true if the two inclusive ranges share at least one day.
    #[must_use]
    pub fn ranges_overlap(
        a_start: NaiveDate,
        a_end: NaiveDate,
        b_start: NaiveDate,
        b_end: NaiveDate,
    ) -> bool {
        a_start <= b_end && b_start <= a_end
    }
}
