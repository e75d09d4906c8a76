//! Progress percentage - a decimal in the range 0..=100

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::error::DomainError;

/// Completion percentage of an enrollment
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct ProgressPercent(Decimal);

impl ProgressPercent {
    pub const ZERO: Self = Self(Decimal::ZERO);
    pub const COMPLETE: Self = Self(Decimal::ONE_HUNDRED);

    /// Validate a raw percentage, rounding to two decimal places
    pub fn new(value: Decimal) -> Result<Self, DomainError> {
        if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
            return Err(DomainError::InvalidProgress(value));
        }
        Ok(Self(value.round_dp_with_strategy(
            2,
            RoundingStrategy::MidpointAwayFromZero,
        )))
    }

    /// Percentage of `done` out of `total` items; zero when there is nothing to do
    pub fn from_ratio(done: u64, total: u64) -> Self {
        if total == 0 {
            return Self::ZERO;
        }
        let done = done.min(total);
        let value = Decimal::from(done) * Decimal::ONE_HUNDRED / Decimal::from(total);
        Self(value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
    }

    #[inline]
    pub const fn value(self) -> Decimal {
        self.0
    }

    /// Whether the course counts as finished
    #[inline]
    pub fn is_complete(self) -> bool {
        self.0 >= Decimal::ONE_HUNDRED
    }
}

impl TryFrom<Decimal> for ProgressPercent {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        ProgressPercent::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range() {
        assert!(ProgressPercent::new(Decimal::ZERO).is_ok());
        assert!(ProgressPercent::new(Decimal::ONE_HUNDRED).is_ok());
        assert!(ProgressPercent::new(Decimal::NEGATIVE_ONE).is_err());
        assert!(ProgressPercent::new(Decimal::from(101)).is_err());
    }

    #[test]
    fn test_rounds_to_two_places() {
        let p = ProgressPercent::new(Decimal::new(333_335, 4)).unwrap();
        assert_eq!(p.value(), Decimal::new(3334, 2));
    }

    #[test]
    fn test_from_ratio() {
        assert_eq!(ProgressPercent::from_ratio(0, 0), ProgressPercent::ZERO);
        assert_eq!(ProgressPercent::from_ratio(1, 3).value(), Decimal::new(3333, 2));
        assert_eq!(ProgressPercent::from_ratio(2, 3).value(), Decimal::new(6667, 2));
        assert!(ProgressPercent::from_ratio(4, 4).is_complete());
        assert!(ProgressPercent::from_ratio(9, 4).is_complete());
    }
}
