//! Coin Amount Value Object
//!
//! A strictly positive number of coins moved by a transfer.

use derive_more::Display;

/// Smallest amount a transfer may carry
pub const MIN_COIN_AMOUNT: i64 = 1;

/// Validated transfer amount (`>= MIN_COIN_AMOUNT`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display("{_0}")]
pub struct CoinAmount(i64);

impl CoinAmount {
    /// `None` when `value` is below [`MIN_COIN_AMOUNT`]
    pub fn new(value: i64) -> Option<Self> {
        (value >= MIN_COIN_AMOUNT).then_some(Self(value))
    }

    #[inline]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl From<CoinAmount> for i64 {
    fn from(amount: CoinAmount) -> Self {
        amount.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_accepted() {
        assert_eq!(CoinAmount::new(1).map(|a| a.value()), Some(1));
        assert_eq!(CoinAmount::new(i64::MAX).map(i64::from), Some(i64::MAX));
    }

    #[test]
    fn test_non_positive_rejected() {
        assert_eq!(CoinAmount::new(0), None);
        assert_eq!(CoinAmount::new(-5), None);
        assert_eq!(CoinAmount::new(i64::MIN), None);
    }
}
