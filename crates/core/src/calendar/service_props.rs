//! Property-based tests for CalendarService.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::calendar::service::CalendarService;
use crate::calendar::types::{DayCounting, HolidayCalendar, PublicHoliday, WeekShape};

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..3650).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Duration::days(offset)
    })
}

fn arb_shape() -> impl Strategy<Value = WeekShape> {
    (any::<bool>(), any::<bool>()).prop_map(|(saturday_half_day, sunday_off)| WeekShape {
        saturday_half_day,
        sunday_off,
    })
}

fn arb_holidays() -> impl Strategy<Value = HolidayCalendar> {
    prop::collection::vec((arb_date(), any::<bool>()), 0..10).prop_map(|days| {
        HolidayCalendar::new(
            days.into_iter()
                .map(|(date, recurring)| PublicHoliday::new("Holiday", date, recurring))
                .collect(),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The total equals the sum of the individual day weights, each 0, 0.5 or 1.
    #[test]
    fn prop_total_is_sum_of_day_weights(
        start in arb_date(),
        len in 0i64..60,
        shape in arb_shape(),
        holidays in arb_holidays(),
    ) {
        let end = start + Duration::days(len);
        let total = CalendarService::working_days_between(
            start, end, shape, &holidays, DayCounting::WorkingDays,
        ).unwrap();

        let mut expected = Decimal::ZERO;
        for d in start.iter_days().take_while(|d| *d <= end) {
            let w = CalendarService::day_weight(d, shape, &holidays, DayCounting::WorkingDays);
            prop_assert!(w == Decimal::ZERO || w == Decimal::new(5, 1) || w == Decimal::ONE);
            expected += w;
        }
        prop_assert_eq!(total, expected);
    }

    /// Splitting a range in two never changes the total.
    #[test]
    fn prop_range_split_is_additive(
        start in arb_date(),
        first in 0i64..30,
        second in 1i64..30,
        shape in arb_shape(),
        holidays in arb_holidays(),
    ) {
        let mid = start + Duration::days(first);
        let end = mid + Duration::days(second);
        let whole = CalendarService::working_days_between(start, end, shape, &holidays, DayCounting::WorkingDays).unwrap();
        let left = CalendarService::working_days_between(start, mid, shape, &holidays, DayCounting::WorkingDays).unwrap();
        let right = CalendarService::working_days_between(mid + Duration::days(1), end, shape, &holidays, DayCounting::WorkingDays).unwrap();
        prop_assert_eq!(whole, left + right);
    }

    /// Calendar-day counting equals the number of dates and bounds working days.
    #[test]
    fn prop_calendar_days_bound_working_days(
        start in arb_date(),
        len in 0i64..60,
        shape in arb_shape(),
        holidays in arb_holidays(),
    ) {
        let end = start + Duration::days(len);
        let calendar = CalendarService::working_days_between(start, end, shape, &holidays, DayCounting::CalendarDays).unwrap();
        let working = CalendarService::working_days_between(start, end, shape, &holidays, DayCounting::WorkingDays).unwrap();
        prop_assert_eq!(calendar, Decimal::from(len + 1));
        prop_assert!(working <= calendar);
    }

    /// The next working day is after the input and is itself a working day.
    #[test]
    fn prop_next_working_day_is_working(
        date in arb_date(),
        shape in arb_shape(),
        holidays in arb_holidays(),
    ) {
        let next = CalendarService::next_working_day(date, shape, &holidays).unwrap();
        prop_assert!(next > date);
        prop_assert!(CalendarService::is_working_day(next, shape, &holidays));
        for d in date.iter_days().skip(1).take_while(|d| *d < next) {
            prop_assert!(!CalendarService::is_working_day(d, shape, &holidays));
        }
    }
}
