//! # Quantity Module
//!
//! Fixed-point quantities for cart lines.
//!
//! Unit products (bags, boxes, tools) are sold in whole units; bulk products
//! (seed, feed, fertilizer sold by weight) are sold in fractional amounts with
//! three decimal places. Both are represented as an integer count of
//! **milliunits** so that quantity math never touches floating point:
//!
//! ```text
//!   3 bags    → 3000 milli
//!   0.250 kg  →  250 milli
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};
use ts_rs::TS;

use crate::QUANTITY_SCALE;

/// A product quantity in milliunits (1/1000 of a unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: intermediate math may go negative; the cart clamps
/// - **Three decimal places**: matches the precision of bench scales used
///   for weighed goods
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS, Default,
)]
#[ts(export)]
pub struct Quantity(i64);

impl Quantity {
    /// Exactly one unit. The fixed quantity of every miscellaneous line.
    pub const ONE: Quantity = Quantity(QUANTITY_SCALE);

    /// Creates a quantity from whole units.
    ///
    /// ## Example
    /// ```rust
    /// use agropos_core::Quantity;
    ///
    /// let three_bags = Quantity::from_units(3);
    /// assert_eq!(three_bags.milli(), 3000);
    /// ```
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Quantity(units * QUANTITY_SCALE)
    }

    /// Creates a quantity from milliunits (three decimal places).
    ///
    /// ## Example
    /// ```rust
    /// use agropos_core::Quantity;
    ///
    /// let weighed = Quantity::from_milli(250); // 0.250 kg
    /// assert!(!weighed.is_integral());
    /// ```
    #[inline]
    pub const fn from_milli(milli: i64) -> Self {
        Quantity(milli)
    }

    /// Zero quantity.
    #[inline]
    pub const fn zero() -> Self {
        Quantity(0)
    }

    /// Returns the raw milliunit count.
    #[inline]
    pub const fn milli(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion (truncating).
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / QUANTITY_SCALE
    }

    /// Checks whether the quantity is a whole number of units.
    ///
    /// Unit-type products require this; bulk products do not.
    #[inline]
    pub const fn is_integral(&self) -> bool {
        self.0 % QUANTITY_SCALE == 0
    }

    /// Checks if the quantity is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the quantity is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

/// Integral quantities render without decimals ("3"), fractional with three
/// ("0.250"), matching what the scale prints.
impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integral() {
            write!(f, "{}", self.units())
        } else {
            let sign = if self.0 < 0 { "-" } else { "" };
            let abs = self.0.abs();
            write!(
                f,
                "{}{}.{:03}",
                sign,
                abs / QUANTITY_SCALE,
                abs % QUANTITY_SCALE
            )
        }
    }
}

impl Add for Quantity {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Quantity(self.0 + other.0)
    }
}

impl AddAssign for Quantity {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Quantity {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Quantity(self.0 - other.0)
    }
}

impl std::iter::Sum for Quantity {
    fn sum<I: Iterator<Item = Quantity>>(iter: I) -> Self {
        iter.fold(Quantity::zero(), |acc, q| acc + q)
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
        let qty = Quantity::from_units(3);
        assert_eq!(qty.milli(), 3000);
        assert_eq!(qty.units(), 3);
        assert!(qty.is_integral());
    }

    #[test]
    fn test_from_milli() {
        let qty = Quantity::from_milli(250);
        assert_eq!(qty.milli(), 250);
        assert_eq!(qty.units(), 0);
        assert!(!qty.is_integral());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Quantity::from_units(3)), "3");
        assert_eq!(format!("{}", Quantity::from_milli(250)), "0.250");
        assert_eq!(format!("{}", Quantity::from_milli(1500)), "1.500");
        assert_eq!(format!("{}", Quantity::zero()), "0");
    }

    #[test]
    fn test_arithmetic() {
        let a = Quantity::from_units(2);
        let b = Quantity::from_milli(500);
        assert_eq!((a + b).milli(), 2500);
        assert_eq!((a - b).milli(), 1500);
    }

    #[test]
    fn test_one_constant() {
        assert_eq!(Quantity::ONE, Quantity::from_units(1));
        assert!(Quantity::ONE.is_integral());
    }
}
