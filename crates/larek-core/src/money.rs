//! # Money Module
//!
//! Provides the `Money` type for prices and basket totals.
//!
//! ## Whole Units Only
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PRICES ARE WHOLE SYNAPSES                                              │
//! │                                                                         │
//! │  The API returns prices as integers (750, 1450, ...) or null.          │
//! │  There is no fractional part, so the value is stored as a plain i64.   │
//! │                                                                         │
//! │  null price  ──► Option<Money>::None  ──► "Бесценно"                   │
//! │  750         ──► Money(750)           ──► "750 синапсов"               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use larek_core::money::{format_price, Money};
//!
//! let price = Money::from_units(750);
//! assert_eq!(price.to_string(), "750 синапсов");
//! assert_eq!(format_price(None), "Бесценно");
//!
//! let total: Money = [Money::from_units(1), Money::from_units(1)].into_iter().sum();
//! assert_eq!(total.to_string(), "2 синапса");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Text shown in place of a missing price.
pub const PRICELESS: &str = "Бесценно";

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole synapses.
///
/// ## Design Decisions
/// - **i64 (signed)**: matches the JSON number range we accept
/// - **Transparent serde**: serializes as a bare number, as the API expects
///
/// ## Where Money is Used
/// ```text
/// Product.price ──┬──► Card price text
///                 │
///                 └──► OrderDraft.total ──► POST /order ──► Success "Списано"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole units.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in whole units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

// =============================================================================
// Formatting
// =============================================================================

/// Picks the Russian noun form for a count of synapses.
///
/// ```text
/// n % 10 == 1, n % 100 != 11        ──► синапс    (1, 21, 101)
/// n % 10 in 2..=4, n % 100 !in 12..=14 ──► синапса (2, 3, 24)
/// everything else                    ──► синапсов (0, 5, 11, 14, 750)
/// ```
pub fn synapse_noun(units: i64) -> &'static str {
    let n = units.unsigned_abs();
    let last = n % 10;
    let last_two = n % 100;

    if last == 1 && last_two != 11 {
        "синапс"
    } else if (2..=4).contains(&last) && !(12..=14).contains(&last_two) {
        "синапса"
    } else {
        "синапсов"
    }
}

/// Formats an optional price the way cards and basket lines show it.
pub fn format_price(price: Option<Money>) -> String {
    match price {
        Some(money) => money.to_string(),
        None => PRICELESS.to_string(),
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0, synapse_noun(self.0))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Money {
    /// Adds two amounts, `None` if the result does not fit.
    #[inline]
    pub const fn checked_add(self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(units) => Some(Money(units)),
            None => None,
        }
    }

    /// Sums amounts, `None` on overflow.
    pub fn checked_sum<I: IntoIterator<Item = Money>>(amounts: I) -> Option<Money> {
        amounts
            .into_iter()
            .try_fold(Money::zero(), Money::checked_add)
    }
}

/// Saturates at the `i64` bounds. Totals that must be exact go through
/// [`Money::checked_add`].
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_units() {
        let money = Money::from_units(750);
        assert_eq!(money.units(), 750);
        assert!(!money.is_zero());
        assert!(Money::default().is_zero());
    }

    #[test]
    fn test_display_plural_forms() {
        assert_eq!(Money::from_units(1).to_string(), "1 синапс");
        assert_eq!(Money::from_units(2).to_string(), "2 синапса");
        assert_eq!(Money::from_units(4).to_string(), "4 синапса");
        assert_eq!(Money::from_units(5).to_string(), "5 синапсов");
        assert_eq!(Money::from_units(11).to_string(), "11 синапсов");
        assert_eq!(Money::from_units(12).to_string(), "12 синапсов");
        assert_eq!(Money::from_units(21).to_string(), "21 синапс");
        assert_eq!(Money::from_units(0).to_string(), "0 синапсов");
        assert_eq!(Money::from_units(1450).to_string(), "1450 синапсов");
    }

    #[test]
    fn test_format_price_priceless() {
        assert_eq!(format_price(None), "Бесценно");
        assert_eq!(format_price(Some(Money::from_units(100))), "100 синапсов");
    }

    #[test]
    fn test_sum() {
        let total: Money = vec![Money::from_units(100), Money::from_units(2500)]
            .into_iter()
            .sum();
        assert_eq!(total.units(), 2600);

        let empty: Money = Vec::<Money>::new().into_iter().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_checked_add_detects_overflow() {
        let max = Money::from_units(i64::MAX);
        assert_eq!(max.checked_add(Money::from_units(1)), None);
        assert_eq!(
            Money::from_units(1).checked_add(Money::from_units(2)),
            Some(Money::from_units(3))
        );
        assert_eq!(Money::checked_sum([max, Money::from_units(1)]), None);
        assert_eq!(max + Money::from_units(1), max);
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&Money::from_units(750)).unwrap();
        assert_eq!(json, "750");

        let price: Option<Money> = serde_json::from_str("null").unwrap();
        assert_eq!(price, None);
    }
}
