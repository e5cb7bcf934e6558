//! This module contains the bit-level plumbing for the native floating point types that the
//! library converts to and from. End-users only see the sealed [`Native`] trait, implemented for
//! `f32` and `f64`.

use crate::cell::{Format, Num};
use crate::dyadic::Dyadic;

use malachite::Integer;

/// The trait for the native IEEE binary floating point types that cells convert to and from, and
/// that interval bounds are stored in (only satisfied by `f32` and `f64`).
///
/// This is a *sealed* type.
pub trait Native: Sealed {}

/// Actual operations implemented here.
pub trait Sealed:
  Copy + Clone +
  PartialOrd + PartialEq +
  core::fmt::Debug + core::fmt::Display +
  core::ops::Add<Self, Output=Self> +
  core::ops::Sub<Self, Output=Self> +
  core::ops::Mul<Self, Output=Self> +
  core::ops::Neg<Output=Self>
{
  /// The precision and exponent range of this type, with subnormals enabled.
  const FORMAT: Format;

  const NAN: Self;
  const INFINITY: Self;
  const NEG_INFINITY: Self;
  const ZERO: Self;
  const NEG_ZERO: Self;
  const ONE: Self;
  const MAX: Self;

  fn is_nan(self) -> bool;
  fn is_infinite(self) -> bool;
  fn is_finite(self) -> bool;
  fn is_sign_negative(self) -> bool;
  fn abs(self) -> Self;

  /// `self × a + b` with a single rounding (to nearest).
  fn mul_add(self, a: Self, b: Self) -> Self;

  /// The exact value of `self`.
  fn decompose(self) -> Num;

  /// The value `±mantissa × 2^exponent`, which must be exactly representable in `Self`.
  fn compose(negative: bool, mantissa: u64, exponent: i64) -> Self;

  /// The least value greater than `self` (NaN and +∞ map to themselves).
  fn next_up(self) -> Self;

  /// The greatest value less than `self` (NaN and −∞ map to themselves).
  fn next_down(self) -> Self;
}

/// Implementation of everything, parametrised by the bit layout.
macro_rules! impl_native {
  ($float:ty, $bits:ty, $explicit:expr, $bias:expr, $format:expr) => {
    impl Native for $float {}

    impl Sealed for $float {
      const FORMAT: Format = $format;

      const NAN: Self = <$float>::NAN;
      const INFINITY: Self = <$float>::INFINITY;
      const NEG_INFINITY: Self = <$float>::NEG_INFINITY;
      const ZERO: Self = 0.0;
      const NEG_ZERO: Self = -0.0;
      const ONE: Self = 1.0;
      const MAX: Self = <$float>::MAX;

      #[inline]
      fn is_nan(self) -> bool { <$float>::is_nan(self) }

      #[inline]
      fn is_infinite(self) -> bool { <$float>::is_infinite(self) }

      #[inline]
      fn is_finite(self) -> bool { <$float>::is_finite(self) }

      #[inline]
      fn is_sign_negative(self) -> bool { <$float>::is_sign_negative(self) }

      #[inline]
      fn abs(self) -> Self { <$float>::abs(self) }

      #[inline]
      fn mul_add(self, a: Self, b: Self) -> Self { <$float>::mul_add(self, a, b) }

      fn decompose(self) -> Num {
        const EXPLICIT: u32 = $explicit;
        const EXP_MASK: u64 = (1 << (<$bits>::BITS - 1 - EXPLICIT)) - 1;

        let bits = self.to_bits() as u64;
        let negative = self.is_sign_negative();
        let fraction = bits & ((1 << EXPLICIT) - 1);
        let field = (bits >> EXPLICIT) & EXP_MASK;

        // An exponent field of all 1s marks infinities and NaNs, all 0s marks zero and
        // subnormals. Normals have an implicit leading 1; subnormals don't, but share the
        // exponent of the smallest normal.
        if field == EXP_MASK {
          return if fraction == 0 { Num::Inf { negative } } else { Num::Nan }
        }
        if field == 0 && fraction == 0 {
          return Num::Zero { negative }
        }
        let (mantissa, field) =
          if field == 0 { (fraction, 1) } else { (fraction | 1 << EXPLICIT, field) };
        let exponent = field as i64 - $bias - EXPLICIT as i64;
        let mantissa = Integer::from(mantissa);
        Num::Finite(Dyadic::new(if negative { -mantissa } else { mantissa }, exponent))
      }

      fn compose(negative: bool, mantissa: u64, exponent: i64) -> Self {
        const EXPLICIT: u32 = $explicit;
        const MIN_LSB: i64 = 1 - $bias - EXPLICIT as i64;

        let sign = (negative as u64) << (<$bits>::BITS - 1);
        if mantissa == 0 {
          return <$float>::from_bits(sign as $bits)
        }
        let width = 64 - mantissa.leading_zeros();
        debug_assert!(width <= EXPLICIT + 1);
        // Shift the leading 1 into the hidden bit position, unless that would take the lsb below
        // the subnormal grid, in which case the number is subnormal.
        let shift = ((EXPLICIT + 1 - width) as i64).min(exponent - MIN_LSB);
        debug_assert!(shift >= 0, "not representable: {mantissa} × 2^{exponent}");
        let mantissa = mantissa << shift;
        let lsb = exponent - shift;
        let bits = if mantissa >> EXPLICIT == 0 {
          mantissa
        } else {
          let field = (lsb - MIN_LSB + 1) as u64;
          (field << EXPLICIT) | (mantissa & ((1 << EXPLICIT) - 1))
        };
        <$float>::from_bits((sign | bits) as $bits)
      }

      fn next_up(self) -> Self {
        if self.is_nan() || self == <$float>::INFINITY {
          return self
        }
        if self == 0.0 {
          return <$float>::from_bits(1)
        }
        let bits = self.to_bits();
        if self > 0.0 {
          <$float>::from_bits(bits + 1)
        } else {
          <$float>::from_bits(bits - 1)
        }
      }

      fn next_down(self) -> Self {
        -(-self).next_up()
      }
    }
  };
}

impl_native!{f32, u32, 23, 127, Format::F32}
impl_native!{f64, u64, 52, 1023, Format::F64}
