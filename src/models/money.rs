//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point precision
//! issues. Provides safe arithmetic operations and locale-aware formatting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

/// Number formatting conventions used when printing amounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberFormat {
    /// Currency symbol printed before the amount
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Separator between groups of thousands
    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: char,

    /// Separator between units and cents
    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: char,
}

fn default_currency_symbol() -> String {
    "R$".to_string()
}

fn default_thousands_separator() -> char {
    '.'
}

fn default_decimal_separator() -> char {
    ','
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            thousands_separator: default_thousands_separator(),
            decimal_separator: default_decimal_separator(),
        }
    }
}

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use finance_report::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole currency units and cents
    pub const fn from_units_cents(units: i64, cents: i64) -> Self {
        Self(units * 100 + cents)
    }

    /// Create a Money amount from a decimal value in currency units,
    /// rounded to the nearest cent
    ///
    /// Returns `None` when the value is not finite or its cents do not fit
    /// in an `i64`.
    pub fn try_from_major(amount: f64) -> Option<Self> {
        let cents = (amount * 100.0).round();
        // i64::MAX as f64 rounds up to 2^63, which is itself out of range
        if cents.is_finite() && cents > i64::MIN as f64 && cents < i64::MAX as f64 {
            Some(Self(cents as i64))
        } else {
            None
        }
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the amount in currency units as a float, for ratios and percentages
    pub fn as_major(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Add two amounts, returning `None` on overflow
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Subtract two amounts, returning `None` on overflow
    pub const fn checked_sub(self, other: Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Format with the given conventions, e.g. `R$ 1.234,56`
    pub fn format_with(&self, format: &NumberFormat) -> String {
        let digits = self.units().abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(format.thousands_separator);
            }
            grouped.push(ch);
        }

        let sign = if self.is_negative() { "-" } else { "" };
        format!(
            "{}{} {}{}{:02}",
            sign,
            format.currency_symbol,
            grouped,
            format.decimal_separator,
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with(&NumberFormat::default()))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.units(), 10);
        assert_eq!(m.cents_part(), 50);
    }

    #[test]
    fn test_from_major_rounds_to_cents() {
        let cents = |amount| Money::try_from_major(amount).unwrap().cents();
        assert_eq!(cents(12.346), 1235);
        assert_eq!(cents(0.1 + 0.2), 30);
        assert_eq!(cents(5000.0), 500000);
    }

    #[test]
    fn test_from_major_rejects_out_of_range() {
        assert!(Money::try_from_major(1e17).is_none());
        assert!(Money::try_from_major(-1e17).is_none());
        assert!(Money::try_from_major(f64::NAN).is_none());
        assert!(Money::try_from_major(f64::INFINITY).is_none());
        assert!(Money::try_from_major(1e16).is_some());
    }

    #[test]
    fn test_checked_arithmetic() {
        let max = Money::from_cents(i64::MAX);
        assert_eq!(max.checked_add(Money::from_cents(1)), None);
        assert_eq!(
            Money::from_cents(10).checked_add(Money::from_cents(5)),
            Some(Money::from_cents(15))
        );
        assert_eq!(Money::from_cents(i64::MIN).checked_sub(Money::from_cents(1)), None);
        assert_eq!(Money::zero().checked_sub(max), Some(Money::from_cents(-i64::MAX)));
    }

    #[test]
    fn test_display_uses_brazilian_format() {
        assert_eq!(Money::from_cents(123456).to_string(), "R$ 1.234,56");
        assert_eq!(Money::from_cents(0).to_string(), "R$ 0,00");
        assert_eq!(Money::from_cents(5).to_string(), "R$ 0,05");
        assert_eq!(Money::from_cents(-100000050).to_string(), "-R$ 1.000.000,50");
    }

    #[test]
    fn test_format_with_custom_separators() {
        let format = NumberFormat {
            currency_symbol: "$".into(),
            thousands_separator: ',',
            decimal_separator: '.',
        };
        assert_eq!(Money::from_cents(987654321).format_with(&format), "$ 9,876,543.21");
        assert_eq!(Money::from_cents(99900).format_with(&format), "$ 999.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((-a).cents(), -1000);
        assert_eq!((b - a).abs().cents(), 500);
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::from_cents(100),
            Money::from_cents(200),
            Money::from_cents(300),
        ];
        let by_ref: Money = amounts.iter().sum();
        let total: Money = amounts.into_iter().sum();
        assert_eq!(total.cents(), 600);
        assert_eq!(by_ref, total);
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_cents(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1050");

        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }
}
