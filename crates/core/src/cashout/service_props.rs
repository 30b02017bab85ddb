//! Property-based tests for CashOutService.

use leavebook_shared::types::RoundingMode;
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::cashout::service::CashOutService;
use crate::policy::LeaveSettings;

fn arb_mode() -> impl Strategy<Value = RoundingMode> {
    prop_oneof![
        Just(RoundingMode::Floor),
        Just(RoundingMode::Round),
        Just(RoundingMode::Ceil),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// FLOOR ≤ ROUND ≤ CEIL, and all three are within one unit of the exact value.
    #[test]
    fn prop_rounding_modes_ordered(
        halves in 1i64..60,
        salary in 1_000i64..500_000,
        divisor in 20i64..31,
    ) {
        let days = Decimal::new(halves * 5, 1);
        let (salary, divisor) = (Decimal::from(salary), Decimal::from(divisor));
        let exact = days * salary / divisor;
        let value = |mode| CashOutService::cash_value(days, salary, divisor, mode).unwrap();

        let (floor, round, ceil) = (
            value(RoundingMode::Floor),
            value(RoundingMode::Round),
            value(RoundingMode::Ceil),
        );
        prop_assert!(floor <= round && round <= ceil);
        prop_assert!((exact - floor) < Decimal::ONE);
        prop_assert!((ceil - exact) < Decimal::ONE);
    }

    /// Eligible days never exceed the remaining balance or the policy cap,
    /// and the maximum amount equals the value of the eligible days.
    #[test]
    fn prop_eligibility_bounded(
        remaining_halves in -10i64..80,
        max_days in 0i64..20,
        mode in arb_mode(),
    ) {
        let settings = LeaveSettings {
            encashment_enabled: true,
            max_encashment_days: Decimal::from(max_days),
            rounding_mode: mode,
            ..LeaveSettings::default()
        };
        let remaining = Decimal::new(remaining_halves * 5, 1);
        let eligibility = CashOutService::eligibility(&settings, remaining, false, Decimal::from(30_000)).unwrap();

        prop_assert!(eligibility.eligible_days <= remaining.max(Decimal::ZERO));
        prop_assert!(eligibility.eligible_days <= settings.max_encashment_days);
        prop_assert_eq!(
            eligibility.max_amount,
            if eligibility.reason.is_some() {
                Decimal::ZERO
            } else {
                CashOutService::cash_value(eligibility.eligible_days, Decimal::from(30_000), Decimal::from(30), mode).unwrap()
            }
        );
    }
}
