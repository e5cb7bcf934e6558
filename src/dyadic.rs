//! Exact binary numbers `m × 2^e` with arbitrary-size `m`.
//!
//! Every finite value this crate handles (native floats, cell contents, bounds of π, partial sums)
//! is a dyadic rational. Doing the arithmetic on those *exactly*, and rounding only once at the
//! very end, is what makes the results correctly rounded.

use core::cmp::Ordering;

use malachite::{Integer, Natural};
use malachite::base::num::arithmetic::traits::{DivMod, Pow, PowerOf2, UnsignedAbs};
use malachite::base::num::basic::traits::{One, Zero};
use malachite::base::num::conversion::traits::WrappingFrom;
use malachite::base::num::logic::traits::SignificantBits;

use crate::round::Remainder;

/// An exact binary number `mantissa × 2^exponent`.
//
// Invariant: the mantissa is odd, unless the value is zero, in which case the exponent is 0. This
// makes the representation unique, so `Eq` and `Hash` can be derived.
#[derive(Clone)]
#[derive(PartialEq, Eq, Hash)]
pub struct Dyadic {
  mantissa: Integer,
  exponent: i64,
}

impl Dyadic {
  /// Zero.
  pub const ZERO: Self = Self { mantissa: Integer::ZERO, exponent: 0 };

  /// One.
  pub const ONE: Self = Self { mantissa: Integer::ONE, exponent: 0 };

  /// The number `mantissa × 2^exponent`.
  pub fn new(mantissa: Integer, exponent: i64) -> Self {
    if mantissa == Integer::ZERO {
      return Self::ZERO
    }
    let tz = mantissa.trailing_zeros().unwrap_or(0);
    Self {
      mantissa: mantissa >> tz,
      exponent: exponent + tz as i64,
    }
  }

  /// The number `±magnitude × 2^exponent`.
  pub fn from_natural(negative: bool, magnitude: Natural, exponent: i64) -> Self {
    let mantissa = Integer::from(magnitude);
    Self::new(if negative { -mantissa } else { mantissa }, exponent)
  }

  /// The number `2^exponent`.
  pub fn power_of_2(exponent: i64) -> Self {
    Self { mantissa: Integer::ONE, exponent }
  }

  /// The (odd, or zero) mantissa.
  pub fn mantissa(&self) -> &Integer {
    &self.mantissa
  }

  /// The exponent of the lowest set bit.
  pub fn exponent(&self) -> i64 {
    self.exponent
  }

  pub fn is_zero(&self) -> bool {
    self.mantissa == Integer::ZERO
  }

  pub fn is_negative(&self) -> bool {
    self.mantissa < Integer::ZERO
  }

  /// The sign, as an ordering relative to zero.
  pub fn sign(&self) -> Ordering {
    self.mantissa.cmp(&Integer::ZERO)
  }

  pub fn abs(&self) -> Self {
    Self { mantissa: Integer::from((&self.mantissa).unsigned_abs()), exponent: self.exponent }
  }

  /// The magnitude of the mantissa.
  pub(crate) fn magnitude(&self) -> Natural {
    (&self.mantissa).unsigned_abs()
  }

  /// The magnitude of the mantissa, which must fit in 64 bits.
  pub(crate) fn magnitude_u64(&self) -> u64 {
    debug_assert!(self.mantissa.significant_bits() <= 64);
    u64::wrapping_from(&self.magnitude())
  }

  /// Multiply by `2^k`; always exact.
  pub fn mul_pow2(&self, k: i64) -> Self {
    if self.is_zero() {
      return Self::ZERO
    }
    Self { mantissa: self.mantissa.clone(), exponent: self.exponent + k }
  }

  /// `⌊log2 |self|⌋`. The value must be nonzero.
  pub fn floor_log2(&self) -> i64 {
    debug_assert!(!self.is_zero());
    self.exponent + self.mantissa.significant_bits() as i64 - 1
  }

  /// Line up the mantissas of `self` and `other` on a common exponent.
  fn aligned(&self, other: &Self) -> (Integer, Integer, i64) {
    let exponent = self.exponent.min(other.exponent);
    let a = &self.mantissa << (self.exponent - exponent) as u64;
    let b = &other.mantissa << (other.exponent - exponent) as u64;
    (a, b, exponent)
  }

  pub fn add(&self, other: &Self) -> Self {
    if self.is_zero() { return other.clone() }
    if other.is_zero() { return self.clone() }
    let (a, b, exponent) = self.aligned(other);
    Self::new(a + b, exponent)
  }

  pub fn sub(&self, other: &Self) -> Self {
    self.add(&-other)
  }

  pub fn mul(&self, other: &Self) -> Self {
    if self.is_zero() || other.is_zero() {
      return Self::ZERO
    }
    // Product of odd numbers is odd, no need to renormalise.
    Self {
      mantissa: &self.mantissa * &other.mantissa,
      exponent: self.exponent + other.exponent,
    }
  }

  /// `self^n`, exactly.
  pub fn pow(&self, n: u64) -> Self {
    if n == 0 {
      return Self::ONE
    }
    if self.is_zero() {
      return Self::ZERO
    }
    Self {
      mantissa: (&self.mantissa).pow(n),
      exponent: self.exponent * n as i64,
    }
  }

  /// `⌊self⌋` as an integer.
  pub fn floor(&self) -> Integer {
    if self.exponent >= 0 {
      &self.mantissa << self.exponent as u64
    } else {
      // Arithmetic shift right floors, also for negative mantissas.
      &self.mantissa >> self.exponent.unsigned_abs()
    }
  }

  /// `⌊self / other⌋` as an integer, exactly. `other` must be nonzero.
  pub fn div_floor(&self, other: &Self) -> Integer {
    debug_assert!(!other.is_zero());
    let shift = self.exponent - other.exponent;
    let (num, den) = if shift >= 0 {
      (&self.mantissa << shift as u64, other.mantissa.clone())
    } else {
      (self.mantissa.clone(), &other.mantissa << shift.unsigned_abs())
    };
    num.div_mod(den).0
  }

  /// Truncate the magnitude of `self` to a multiple of `2^lsb`, returning the multiple `q` (so
  /// the truncated magnitude is `q × 2^lsb`) and the classification of the discarded part.
  pub(crate) fn split_at(&self, lsb: i64) -> (Natural, Remainder) {
    let magnitude = self.magnitude();
    if self.is_zero() {
      return (Natural::ZERO, Remainder::Zero)
    }
    if self.exponent >= lsb {
      return (magnitude << (self.exponent - lsb) as u64, Remainder::Zero)
    }
    let shift = (lsb - self.exponent) as u64;
    let bits = magnitude.significant_bits();
    if shift > bits {
      // The whole magnitude is below 2^(shift - 1), i.e. below half.
      return (Natural::ZERO, Remainder::BelowHalf)
    }
    let q = &magnitude >> shift;
    let rest = magnitude - (&q << shift);
    let half = Natural::power_of_2(shift - 1);
    let rem = match rest.cmp(&half) {
      _ if rest == Natural::ZERO => Remainder::Zero,
      Ordering::Less => Remainder::BelowHalf,
      Ordering::Equal => Remainder::Half,
      Ordering::Greater => Remainder::AboveHalf,
    };
    (q, rem)
  }
}

impl From<Integer> for Dyadic {
  fn from(value: Integer) -> Self {
    Self::new(value, 0)
  }
}

impl From<i64> for Dyadic {
  fn from(value: i64) -> Self {
    Self::new(Integer::from(value), 0)
  }
}

impl core::ops::Neg for &Dyadic {
  type Output = Dyadic;

  fn neg(self) -> Dyadic {
    Dyadic { mantissa: -&self.mantissa, exponent: self.exponent }
  }
}

impl core::ops::Neg for Dyadic {
  type Output = Dyadic;

  fn neg(self) -> Dyadic {
    Dyadic { mantissa: -self.mantissa, exponent: self.exponent }
  }
}

impl Ord for Dyadic {
  fn cmp(&self, other: &Self) -> Ordering {
    let (sa, sb) = (self.sign(), other.sign());
    if sa != sb || sa == Ordering::Equal {
      return sa.cmp(&sb)
    }
    // Same nonzero sign: compare magnitudes by their leading bit first, so that wildly different
    // exponents never require a huge shift.
    let by_magnitude = self.floor_log2().cmp(&other.floor_log2()).then_with(|| {
      let (a, b, _) = self.abs().aligned(&other.abs());
      a.cmp(&b)
    });
    if sa == Ordering::Less { by_magnitude.reverse() } else { by_magnitude }
  }
}

impl PartialOrd for Dyadic {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl core::fmt::Debug for Dyadic {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    write!(f, "Dyadic({} × 2^{})", self.mantissa, self.exponent)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn d(m: i64, e: i64) -> Dyadic {
    Dyadic::new(Integer::from(m), e)
  }

  #[test]
  fn normalises() {
    assert_eq!(d(12, 0), d(3, 2));
    assert_eq!(d(-8, -3), d(-1, 0));
    assert_eq!(d(0, 17), Dyadic::ZERO);
    assert_eq!(d(12, 0).exponent(), 2);
  }

  #[test]
  fn arithmetic() {
    assert_eq!(d(3, -1).add(&d(1, -1)), d(2, 0));
    assert_eq!(d(3, -1).sub(&d(3, -1)), Dyadic::ZERO);
    assert_eq!(d(3, 10).mul(&d(5, -12)), d(15, -2));
    assert_eq!(d(3, -1).pow(3), d(27, -3));
    assert_eq!(d(-5, 0).abs(), d(5, 0));
  }

  #[test]
  fn ordering() {
    assert!(d(1, 1000) > d(1, -1000));
    assert!(d(-1, 1000) < d(-1, -1000));
    assert!(d(-1, -1000) < Dyadic::ZERO);
    assert!(d(3, 0) > d(5, -1));
    assert!(d(-3, 0) < d(-5, -1));
    assert_eq!(d(7, 3).cmp(&d(7, 3)), Ordering::Equal);
  }

  #[test]
  fn floor() {
    assert_eq!(d(7, -1).floor(), Integer::from(3));
    assert_eq!(d(-7, -1).floor(), Integer::from(-4));
    assert_eq!(d(3, 4).floor(), Integer::from(48));
    assert_eq!(d(7, 0).div_floor(&d(2, 0)), Integer::from(3));
    assert_eq!(d(-7, 0).div_floor(&d(2, 0)), Integer::from(-4));
    assert_eq!(d(1, 10).div_floor(&d(3, -2)), Integer::from(1365));
  }

  #[test]
  fn split() {
    // 13 = 0b1101; at lsb 2: q = 3, rest = 0b01 (below half of 0b100)
    assert_eq!(d(13, 0).split_at(2), (Natural::from(3u32), Remainder::BelowHalf));
    assert_eq!(d(14, 0).split_at(2), (Natural::from(3u32), Remainder::Half));
    assert_eq!(d(15, 0).split_at(2), (Natural::from(3u32), Remainder::AboveHalf));
    assert_eq!(d(12, 0).split_at(2), (Natural::from(3u32), Remainder::Zero));
    assert_eq!(d(3, 0).split_at(-2), (Natural::from(12u32), Remainder::Zero));
    assert_eq!(d(1, -100).split_at(0), (Natural::ZERO, Remainder::BelowHalf));
    assert_eq!(d(-1, -1).split_at(0), (Natural::ZERO, Remainder::Half));
  }
}
