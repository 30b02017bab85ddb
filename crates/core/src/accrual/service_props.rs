//! Property-based tests for AccrualService.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::accrual::service::AccrualService;
use crate::policy::{AccrualBasis, AccrualFrequency, LeaveSettings, LeaveType};

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..7300).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2010, 1, 1).unwrap() + Duration::days(offset)
    })
}

fn arb_settings() -> impl Strategy<Value = LeaveSettings> {
    (any::<bool>(), any::<bool>(), 1u32..=12).prop_map(|(anniversary, monthly, month)| {
        LeaveSettings {
            accrual_basis: if anniversary {
                AccrualBasis::Anniversary
            } else {
                AccrualBasis::CalendarYear
            },
            accrual_frequency: if monthly {
                AccrualFrequency::Monthly
            } else {
                AccrualFrequency::Daily
            },
            fiscal_year_start_month: month,
            ..LeaveSettings::default()
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Accrued days stay within [0, entitlement] and never carry more than two decimals.
    #[test]
    fn prop_accrued_bounded_by_entitlement(
        hire in arb_date(),
        offset in 0i64..1500,
        base in 0i64..40,
        settings in arb_settings(),
    ) {
        let leave_type = LeaveType::new("ANNUAL", "Annual Leave", Decimal::from(base));
        let result = AccrualService::accrue(&leave_type, &settings, hire, hire + Duration::days(offset)).unwrap();
        prop_assert!(result.accrued >= Decimal::ZERO);
        prop_assert!(result.accrued <= result.entitlement);
        prop_assert!(result.accrued.scale() <= 2);
        prop_assert!(result.accrual_start >= hire);
    }

    /// Within one accrual period, accrued days never decrease as time passes.
    #[test]
    fn prop_accrual_monotonic_within_period(
        start in arb_date(),
        a in 0i64..365,
        b in 0i64..365,
        monthly in any::<bool>(),
    ) {
        let settings = LeaveSettings {
            accrual_frequency: if monthly { AccrualFrequency::Monthly } else { AccrualFrequency::Daily },
            ..LeaveSettings::default()
        };
        let (early, late) = (start + Duration::days(a.min(b)), start + Duration::days(a.max(b)));
        let accrued = |as_of: NaiveDate| AccrualService::accrued_to_date(
            Decimal::from(18),
            &settings,
            AccrualService::days_elapsed(start, as_of),
            AccrualService::months_elapsed(start, as_of),
        ).unwrap();
        prop_assert!(accrued(early) <= accrued(late));
    }

    /// More tenure never lowers the entitlement.
    #[test]
    fn prop_entitlement_non_decreasing_in_tenure(
        years in 0u32..40,
        period in 0u32..6,
        increment in 0i64..4,
    ) {
        let mut leave_type = LeaveType::new("ANNUAL", "Annual Leave", Decimal::from(16));
        leave_type.incremental_period_years = period;
        leave_type.incremental_days_per_year = Decimal::from(increment);
        let settings = LeaveSettings::default();
        prop_assert!(
            AccrualService::entitlement_for_year(&leave_type, &settings, years)
                <= AccrualService::entitlement_for_year(&leave_type, &settings, years + 1)
        );
    }

    /// Service years never exceed the calendar-year difference.
    #[test]
    fn prop_service_years_bounded(hire in arb_date(), offset in 0i64..5000) {
        let as_of = hire + Duration::days(offset);
        let years = AccrualService::service_years(hire, as_of);
        prop_assert!(i64::from(years) * 365 <= offset);
    }
}
