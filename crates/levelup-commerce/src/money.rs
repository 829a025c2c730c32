//! Money type for Chilean peso amounts.
//!
//! CLP has no minor unit, so amounts are plain integers and every percentage
//! is rounded half up, matching how prices are shown in the shop.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

/// An amount of Chilean pesos.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Clp(i64);

impl Clp {
    /// Create a new amount.
    pub const fn new(amount: i64) -> Self {
        Self(amount)
    }

    /// The zero amount.
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Raw integer amount.
    pub const fn amount(&self) -> i64 {
        self.0
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Try to add another amount, returning None on overflow.
    pub fn checked_add(&self, other: Clp) -> Option<Clp> {
        self.0.checked_add(other.0).map(Clp)
    }

    /// Try to multiply by a quantity, returning None on overflow.
    pub fn checked_mul(&self, factor: i64) -> Option<Clp> {
        self.0.checked_mul(factor).map(Clp)
    }

    /// `percent`% of this amount, rounded half up.
    ///
    /// ```
    /// use levelup_commerce::money::Clp;
    /// assert_eq!(Clp::new(59_980).percentage(20), Clp::new(11_996));
    /// assert_eq!(Clp::new(14_990).percentage(80), Clp::new(11_992));
    /// ```
    ///
    /// Saturates instead of overflowing; use [`Clp::checked_percentage`]
    /// where an overflow must be reported.
    pub fn percentage(&self, percent: u32) -> Clp {
        Clp(self
            .0
            .saturating_mul(i64::from(percent))
            .saturating_add(50)
            .div_euclid(100))
    }

    /// `percent`% of this amount, rounded half up, or None on overflow.
    pub fn checked_percentage(&self, percent: u32) -> Option<Clp> {
        self.0
            .checked_mul(i64::from(percent))?
            .checked_add(50)
            .map(|scaled| Clp(scaled.div_euclid(100)))
    }

    /// Format with a `$` sign and dot thousands separators, e.g. `$59.980`.
    pub fn display(&self) -> String {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }
        if self.0 < 0 {
            format!("-${grouped}")
        } else {
            format!("${grouped}")
        }
    }
}

impl fmt::Display for Clp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<i64> for Clp {
    fn from(amount: i64) -> Self {
        Self(amount)
    }
}

impl Add for Clp {
    type Output = Clp;

    fn add(self, other: Clp) -> Clp {
        Clp(self.0 + other.0)
    }
}

impl AddAssign for Clp {
    fn add_assign(&mut self, other: Clp) {
        self.0 += other.0;
    }
}

impl Sub for Clp {
    type Output = Clp;

    fn sub(self, other: Clp) -> Clp {
        Clp(self.0 - other.0)
    }
}

impl Mul<i64> for Clp {
    type Output = Clp;

    fn mul(self, factor: i64) -> Clp {
        Clp(self.0 * factor)
    }
}

impl Sum for Clp {
    fn sum<I: Iterator<Item = Clp>>(iter: I) -> Clp {
        iter.fold(Clp::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Clp> for Clp {
    fn sum<I: Iterator<Item = &'a Clp>>(iter: I) -> Clp {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Clp::new(0).display(), "$0");
        assert_eq!(Clp::new(990).display(), "$990");
        assert_eq!(Clp::new(59_980).display(), "$59.980");
        assert_eq!(Clp::new(1_299_990).display(), "$1.299.990");
        assert_eq!(Clp::new(-1_000).to_string(), "-$1.000");
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        assert_eq!(Clp::new(59_980).percentage(20), Clp::new(11_996));
        // 0.2 * 12_345 = 2469.0
        assert_eq!(Clp::new(12_345).percentage(20), Clp::new(2_469));
        // 0.2 * 12_347.5 style tie: 2 * 20 / 100 = 0.4 -> 0, 3 * 20 / 100 = 0.6 -> 1
        assert_eq!(Clp::new(2).percentage(20), Clp::new(0));
        assert_eq!(Clp::new(3).percentage(20), Clp::new(1));
        // exact half rounds up
        assert_eq!(Clp::new(5).percentage(10), Clp::new(1));
        assert_eq!(Clp::new(29_990).percentage(80), Clp::new(23_992));
    }

    #[test]
    fn test_arithmetic() {
        let a = Clp::new(29_990);
        assert_eq!(a * 2, Clp::new(59_980));
        assert_eq!(a + a - Clp::new(980), Clp::new(59_000));
        let total: Clp = [a, a, Clp::new(20)].iter().sum();
        assert_eq!(total, Clp::new(60_000));
    }

    #[test]
    fn test_checked() {
        assert_eq!(Clp::new(i64::MAX).checked_add(Clp::new(1)), None);
        assert_eq!(Clp::new(i64::MAX).checked_mul(2), None);
        assert_eq!(Clp::new(10).checked_mul(3), Some(Clp::new(30)));
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&Clp::new(14_990)).unwrap();
        assert_eq!(json, "14990");
        let back: Clp = serde_json::from_str("14990").unwrap();
        assert_eq!(back, Clp::new(14_990));
    }

    #[test]
    fn test_checked_percentage() {
        assert_eq!(Clp::new(59_980).checked_percentage(20), Some(Clp::new(11_996)));
        assert_eq!(Clp::new(i64::MAX / 2).checked_percentage(20), None);
        assert!(Clp::new(i64::MAX / 2).percentage(20).is_positive());
    }
}
