//! Rounding modes for monetary amounts.
//!
//! CRITICAL: Never use floating-point for money or day calculations.
//! Everything is `rust_decimal::Decimal`; this type decides how a full
//! precision amount is turned into a payable figure.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of decimal places carried by payable amounts.
pub const MONEY_SCALE: u32 = 2;

/// How a computed amount is rounded before it is stored.
///
/// - `Round` rounds half away from zero to cents.
/// - `Floor` drops everything below a whole currency unit.
/// - `Ceil` raises to the next whole currency unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RoundingMode {
    /// Round down to a whole unit.
    Floor,
    /// Round half-up to cents.
    #[default]
    Round,
    /// Round up to a whole unit.
    Ceil,
}

impl RoundingMode {
    /// Applies this rounding mode to an amount, always returning two decimal places.
    #[must_use]
    pub fn apply(self, amount: Decimal) -> Decimal {
        let mut rounded = match self {
            Self::Round => {
                amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
            }
            Self::Floor => amount.floor(),
            Self::Ceil => amount.ceil(),
        };
        rounded.rescale(MONEY_SCALE);
        rounded
    }

    /// Returns the string representation of the mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Floor => "FLOOR",
            Self::Round => "ROUND",
            Self::Ceil => "CEIL",
        }
    }
}

impl std::fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RoundingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "FLOOR" => Ok(Self::Floor),
            "ROUND" => Ok(Self::Round),
            "CEIL" => Ok(Self::Ceil),
            _ => Err(format!("Unknown rounding mode: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    #[rstest]
    #[case(RoundingMode::Round, dec!(4166.6666), dec!(4166.67))]
    #[case(RoundingMode::Floor, dec!(4166.6666), dec!(4166.00))]
    #[case(RoundingMode::Ceil, dec!(4166.6666), dec!(4167.00))]
    #[case(RoundingMode::Round, dec!(0.005), dec!(0.01))]
    #[case(RoundingMode::Ceil, dec!(10), dec!(10.00))]
    fn test_apply(#[case] mode: RoundingMode, #[case] amount: Decimal, #[case] expected: Decimal) {
        assert_eq!(mode.apply(amount), expected);
    }

    #[test]
    fn test_apply_keeps_two_decimal_places() {
        assert_eq!(RoundingMode::Floor.apply(dec!(12.9)).to_string(), "12.00");
        assert_eq!(RoundingMode::Round.apply(dec!(3)).to_string(), "3.00");
    }

    #[test]
    fn test_from_str() {
        assert_eq!(RoundingMode::from_str("floor").unwrap(), RoundingMode::Floor);
        assert_eq!(RoundingMode::from_str("ROUND").unwrap(), RoundingMode::Round);
        assert_eq!(RoundingMode::from_str("Ceil").unwrap(), RoundingMode::Ceil);
        assert!(RoundingMode::from_str("truncate").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(RoundingMode::Floor.to_string(), "FLOOR");
        assert_eq!(RoundingMode::default(), RoundingMode::Round);
    }
}
