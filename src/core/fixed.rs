//! Two-decimal fixed-point numbers for integrity math
//!
//! Modifier sums run over an unordered map, so the arithmetic has to be exact
//! and independent of iteration order. Values are stored as hundredths.
//!
//! Arithmetic saturates at `±Fixed2::MAX` instead of overflowing. The range is
//! symmetric so negation never overflows either.

use derive_more::Neg;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Fixed-point value with two decimal places
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Neg, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Fixed2(i64);

impl Fixed2 {
    pub const ZERO: Fixed2 = Fixed2(0);
    pub const MAX: Fixed2 = Fixed2(i64::MAX);
    pub const MIN: Fixed2 = Fixed2(-i64::MAX);

    const SCALE: i64 = 100;

    const fn saturate(raw: i64) -> Self {
        if raw == i64::MIN {
            Self::MIN
        } else {
            Self(raw)
        }
    }

    /// Whole-number value
    pub const fn new(whole: i64) -> Self {
        Self::saturate(whole.saturating_mul(Self::SCALE))
    }

    /// Raw hundredths (`Fixed2::from_hundredths(150)` is 1.50)
    pub const fn from_hundredths(hundredths: i64) -> Self {
        Self::saturate(hundredths)
    }

    /// Rounds to the nearest hundredth
    pub fn from_f32(value: f32) -> Self {
        Self::from(value as f64)
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Integer division, truncating toward zero at the hundredths place
    pub fn div_int(self, divisor: i64) -> Self {
        if divisor == 0 {
            return self;
        }
        Self::saturate(self.0.saturating_div(divisor))
    }
}

impl Add for Fixed2 {
    type Output = Fixed2;

    fn add(self, rhs: Fixed2) -> Fixed2 {
        Self::saturate(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Fixed2 {
    type Output = Fixed2;

    fn sub(self, rhs: Fixed2) -> Fixed2 {
        Self::saturate(self.0.saturating_sub(rhs.0))
    }
}

impl AddAssign for Fixed2 {
    fn add_assign(&mut self, rhs: Fixed2) {
        *self = *self + rhs;
    }
}

impl SubAssign for Fixed2 {
    fn sub_assign(&mut self, rhs: Fixed2) {
        *self = *self - rhs;
    }
}

impl From<f64> for Fixed2 {
    /// Float casts saturate; NaN becomes zero
    fn from(value: f64) -> Self {
        Self::saturate((value * Self::SCALE as f64).round() as i64)
    }
}

impl From<Fixed2> for f64 {
    fn from(value: Fixed2) -> Self {
        value.0 as f64 / Fixed2::SCALE as f64
    }
}

/// Sums in `i128` and saturates once, so the result never depends on order
impl Sum for Fixed2 {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        let total: i128 = iter.map(|v| v.0 as i128).sum();
        Self(total.clamp(Self::MIN.0 as i128, Self::MAX.0 as i128) as i64)
    }
}

impl<'a> Sum<&'a Fixed2> for Fixed2 {
    fn sum<I: Iterator<Item = &'a Fixed2>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl fmt::Display for Fixed2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        f.pad(&format!("{}{}.{:02}", sign, abs / 100, abs % 100))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_and_hundredths_agree() {
        assert_eq!(Fixed2::new(3), Fixed2::from_hundredths(300));
        assert_eq!(Fixed2::from_f32(0.25), Fixed2::from_hundredths(25));
    }

    #[test]
    fn test_sum_is_order_independent() {
        let a = [Fixed2::from_f32(0.1), Fixed2::from_f32(0.2), Fixed2::from_f32(0.3)];
        let forward: Fixed2 = a.iter().sum();
        let backward: Fixed2 = a.iter().rev().sum();
        assert_eq!(forward, backward);
        assert_eq!(forward, Fixed2::from_f32(0.6));
    }

    #[test]
    fn test_clamp_uses_ord() {
        let cap = Fixed2::new(100);
        assert_eq!(Fixed2::new(130).clamp(Fixed2::ZERO, cap), cap);
        assert_eq!(Fixed2::new(-5).clamp(Fixed2::ZERO, cap), Fixed2::ZERO);
    }

    #[test]
    fn test_display() {
        assert_eq!(Fixed2::from_hundredths(1234).to_string(), "12.34");
        assert_eq!(Fixed2::from_hundredths(-5).to_string(), "-0.05");
    }

    #[test]
    fn test_div_int_halves() {
        assert_eq!(Fixed2::new(30).div_int(2), Fixed2::new(15));
        assert_eq!(Fixed2::new(7).div_int(0), Fixed2::new(7));
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Fixed2::from(5e16);
        assert_eq!(huge + huge, Fixed2::MAX);
        assert_eq!(-huge - huge, Fixed2::MIN);
        assert_eq!(Fixed2::MAX - Fixed2::MIN, Fixed2::MAX);
        assert_eq!(-Fixed2::MIN, Fixed2::MAX);
        assert_eq!(Fixed2::new(i64::MAX), Fixed2::MAX);
        assert_eq!(Fixed2::from_hundredths(i64::MIN), Fixed2::MIN);

        let parts = [Fixed2::MAX, Fixed2::MAX, Fixed2::MIN, Fixed2::new(-10)];
        let forward: Fixed2 = parts.iter().sum();
        let backward: Fixed2 = parts.iter().rev().sum();
        assert_eq!(forward, Fixed2::MAX - Fixed2::new(10));
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_serde_as_float() {
        let json = serde_json::to_string(&Fixed2::from_hundredths(250)).unwrap();
        assert_eq!(json, "2.5");
        let back: Fixed2 = serde_json::from_str("2.5").unwrap();
        assert_eq!(back, Fixed2::from_hundredths(250));
    }
}
