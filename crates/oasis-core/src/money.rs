//! # Money Module
//!
//! Provides the `Money` type for prices, totals and rental charges.
//!
//! ## Whole Units Only
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  FCFA has no minor unit in everyday use                                 │
//! │                                                                         │
//! │  Room night:     25 000 FCFA   → Money(25000)                           │
//! │  Towel rental:      500 FCFA   → Money(500)                             │
//! │  Menu price "2,500" (form)     → Money(2500)                            │
//! │                                                                         │
//! │  Integer arithmetic only. No floats ever touch a price.                 │
//! │  Operators saturate at the i64 bounds instead of overflowing.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use oasis_core::money::Money;
//!
//! let night = Money::from_units(25_000);
//! let stay = night * 3;
//! assert_eq!(stay.units(), 75_000);
//!
//! let price = Money::parse("2,500").unwrap();
//! assert_eq!(price.units(), 2_500);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

/// Currency label used when displaying amounts.
pub const CURRENCY: &str = "FCFA";

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in whole currency units.
///
/// ## Design Decisions
/// - **i64 (signed)**: differences between amounts can go negative
/// - **Single field tuple struct**: Zero-cost abstraction over i64
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
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

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity (nights, items, rentals).
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Parses an amount typed into a form.
    ///
    /// Accepts plain digits and digits grouped with `,`, `.`, a space or a
    /// non-breaking space as thousands separators (`15000`, `2,500`,
    /// `25 000`). Every group after the first must hold exactly three
    /// digits, so fractional input such as `12.5` is rejected. A leading `-`
    /// is accepted. Returns `None` for anything else.
    ///
    /// ```rust
    /// use oasis_core::money::Money;
    ///
    /// assert_eq!(Money::parse("25 000"), Some(Money::from_units(25_000)));
    /// assert_eq!(Money::parse("12.5"), None);
    /// assert_eq!(Money::parse("12abc"), None);
    /// ```
    pub fn parse(input: &str) -> Option<Money> {
        let input = input.trim();
        let (negative, digits) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input),
        };

        let mut groups = digits.split(is_group_separator);
        let first = groups.next()?;
        if !(1..=3).contains(&first.len()) && digits.contains(is_group_separator) {
            return None;
        }

        let mut cleaned = String::with_capacity(digits.len());
        cleaned.push_str(first);
        for group in groups {
            if group.len() != 3 {
                return None;
            }
            cleaned.push_str(group);
        }

        if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }

        let value: i64 = cleaned.parse().ok()?;
        Some(Money(if negative { -value } else { value }))
    }
}

fn is_group_separator(c: char) -> bool {
    matches!(c, ',' | '.' | ' ' | '\u{a0}' | '\u{202f}')
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Groups thousands with a space, as printed on receipts: `25 000 FCFA`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(' ');
            }
            grouped.push(c);
        }
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{} {}", sign, grouped, CURRENCY)
    }
}

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
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
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
        let money = Money::from_units(15_000);
        assert_eq!(money.units(), 15_000);
        assert!(!money.is_zero());
        assert!(!money.is_negative());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_units(25_000).to_string(), "25 000 FCFA");
        assert_eq!(Money::from_units(500).to_string(), "500 FCFA");
        assert_eq!(Money::from_units(1_234_567).to_string(), "1 234 567 FCFA");
        assert_eq!(Money::from_units(-1_500).to_string(), "-1 500 FCFA");
        assert_eq!(Money::zero().to_string(), "0 FCFA");
    }

    #[test]
    fn test_parse_accepts_grouping() {
        assert_eq!(Money::parse("15000"), Some(Money::from_units(15_000)));
        assert_eq!(Money::parse("2,500"), Some(Money::from_units(2_500)));
        assert_eq!(Money::parse(" 25 000 "), Some(Money::from_units(25_000)));
        assert_eq!(Money::parse("-500"), Some(Money::from_units(-500)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Money::parse(""), None);
        assert_eq!(Money::parse("abc"), None);
        assert_eq!(Money::parse("12.5e3"), None);
        assert_eq!(Money::parse(","), None);
    }

    #[test]
    fn test_parse_rejects_fractions_and_loose_groups() {
        assert_eq!(Money::parse("12.5"), None);
        assert_eq!(Money::parse("1,2,3"), None);
        assert_eq!(Money::parse("2,50"), None);
        assert_eq!(Money::parse("2500,"), None);
        assert_eq!(Money::parse("1234,567"), None);
        assert_eq!(Money::parse("2,500"), Some(Money::from_units(2_500)));
        assert_eq!(Money::parse("1.234.567"), Some(Money::from_units(1_234_567)));
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::from_units(i64::MAX - 1);
        assert_eq!((huge + huge).units(), i64::MAX);
        assert_eq!((huge * 3).units(), i64::MAX);
        assert_eq!(huge.multiply_quantity(2).units(), i64::MAX);
        assert_eq!((Money::from_units(i64::MIN) - huge).units(), i64::MIN);

        let total: Money = vec![huge, huge, Money::from_units(5)].into_iter().sum();
        assert_eq!(total.units(), i64::MAX);

        let mut acc = huge;
        acc += huge;
        assert_eq!(acc.units(), i64::MAX);
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_units(1_000);
        let b = Money::from_units(500);

        assert_eq!((a + b).units(), 1_500);
        assert_eq!((a - b).units(), 500);
        assert_eq!((a * 3).units(), 3_000);
        assert_eq!(a.multiply_quantity(4).units(), 4_000);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.units(), 2_000);
    }
}
