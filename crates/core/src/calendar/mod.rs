//! Working-day and holiday calculus.
//!
//! Pure functions consumed by accrual (days elapsed), the approval
//! workflow (requested days, return date) and recalls (refunds).

pub mod error;
pub mod fiscal;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::CalendarError;
pub use fiscal::{fiscal_year_bounds, fiscal_year_of};
pub use service::CalendarService;
pub use types::{DayCounting, HolidayCalendar, PublicHoliday, WeekShape};
