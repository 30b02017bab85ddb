//! Fiscal year boundaries.
//!
//! A fiscal year is labeled by the calendar year in which it starts.

use chrono::{Datelike, NaiveDate};

use crate::calendar::error::CalendarError;

/// Returns the fiscal year label containing `date`.
///
/// # Errors
///
/// Returns `CalendarError::InvalidFiscalMonth` if `start_month` is not 1-12.
pub fn fiscal_year_of(date: NaiveDate, start_month: u32) -> Result<i32, CalendarError> {
    if !(1..=12).contains(&start_month) {
        return Err(CalendarError::InvalidFiscalMonth(start_month));
    }
    if date.month() >= start_month {
        Ok(date.year())
    } else {
        Ok(date.year() - 1)
    }
}

/// Returns the first and last day of a fiscal year.
///
/// # Errors
///
/// Returns `CalendarError::InvalidFiscalMonth` if `start_month` is not 1-12.
pub fn fiscal_year_bounds(
    year: i32,
    start_month: u32,
) -> Result<(NaiveDate, NaiveDate), CalendarError> {
    if !(1..=12).contains(&start_month) {
        return Err(CalendarError::InvalidFiscalMonth(start_month));
    }
    let start = NaiveDate::from_ymd_opt(year, start_month, 1).ok_or(CalendarError::DateOutOfRange)?;
    let next_start =
        NaiveDate::from_ymd_opt(year + 1, start_month, 1).ok_or(CalendarError::DateOutOfRange)?;
    let end = next_start.pred_opt().ok_or(CalendarError::DateOutOfRange)?;
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_calendar_fiscal_year() {
        assert_eq!(fiscal_year_of(date(2026, 1, 1), 1).unwrap(), 2026);
        assert_eq!(fiscal_year_of(date(2026, 12, 31), 1).unwrap(), 2026);
    }

    #[test]
    fn test_july_fiscal_year() {
        assert_eq!(fiscal_year_of(date(2026, 6, 30), 7).unwrap(), 2025);
        assert_eq!(fiscal_year_of(date(2026, 7, 1), 7).unwrap(), 2026);
    }

    #[test]
    fn test_bounds() {
        assert_eq!(
            fiscal_year_bounds(2026, 1).unwrap(),
            (date(2026, 1, 1), date(2026, 12, 31))
        );
        assert_eq!(
            fiscal_year_bounds(2025, 7).unwrap(),
            (date(2025, 7, 1), date(2026, 6, 30))
        );
    }

    #[test]
    fn test_invalid_month() {
        assert_eq!(
            fiscal_year_of(date(2026, 1, 1), 13),
            Err(CalendarError::InvalidFiscalMonth(13))
        );
        assert!(fiscal_year_bounds(2026, 0).is_err());
    }
}
