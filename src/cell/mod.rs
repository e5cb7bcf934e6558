//! Arbitrary-precision floating point cells with directed rounding.
//!
//! A [`Cell`] holds a value that is representable in some [`Format`]: a precision in bits plus
//! an exponent range, with or without gradual underflow. The format is an explicit token passed
//! to every operation that produces a cell; there is no ambient exponent range to set up or
//! restore. Every producing operation rounds the *exact* result once, in a requested [`Round`]
//! direction, and reports where the rounded value lies relative to the exact one as an
//! [`Ordering`] (the "ternary status").
//!
//! Operations return full-precision results, i.e. they never round to the subnormal grid on their
//! own. Call [`Cell::subnormalize`] afterwards, passing along the status, to get the value a
//! native type with gradual underflow would have produced.
//!
//! [`BoundCell`] is the same thing with the format fixed at compile time.

use core::cmp::Ordering;

use crate::dyadic::Dyadic;
use crate::round::Round;

mod range;
mod subnormal;
mod convert;
mod ops;
mod bound;
mod fmt;

pub use bound::{BoundCell, F32Cell, F64Cell};
pub use fmt::{Case, Form, ParseStrFormatError, StrFormat};

pub(crate) use ops::compare_power;

/// The precision and exponent range of a [`Cell`].
///
/// Nonzero finite values are `m × 2^e` with `0.5 ≤ |m| < 1`, `m` having at most `precision`
/// significant bits, and `min_exp ≤ e ≤ max_exp` (the same convention as [`f64::MIN_EXP`] and
/// [`f64::MAX_EXP`]). If `subnormal` is set, values below `2^(min_exp - 1)` are also admitted, on
/// the fixed grid of multiples of `2^(min_exp - precision)`, as IEEE subnormals are.
#[derive(Clone, Copy, Debug)]
#[derive(PartialEq, Eq, Hash)]
pub struct Format {
  pub precision: u64,
  pub min_exp: i64,
  pub max_exp: i64,
  pub subnormal: bool,
}

/// Widest exponent range a relaxed format admits. Small enough that multiplying two in-range
/// values never overflows the `i64` exponent of a [`Dyadic`].
const RELAXED_EXP: i64 = 1 << 60;

impl Format {
  /// The format of `f64`.
  pub const F64: Self = Self { precision: 53, min_exp: -1021, max_exp: 1024, subnormal: true };

  /// The format of `f32`.
  pub const F32: Self = Self { precision: 24, min_exp: -125, max_exp: 128, subnormal: true };

  /// Same precision, but with the exponent range widened to its maximum extent and gradual
  /// underflow disabled. Intermediate computations that must not overflow or underflow spuriously
  /// run in relaxed formats.
  pub const fn relaxed(self) -> Self {
    Self { min_exp: -RELAXED_EXP, max_exp: RELAXED_EXP, subnormal: false, ..self }
  }

  /// Same exponent range, different precision.
  pub const fn with_precision(self, precision: u64) -> Self {
    Self { precision, ..self }
  }

  /// The smallest exponent `e` (as in `m × 2^e`, `0.5 ≤ m < 1`) of a full-precision result.
  ///
  /// With gradual underflow, results are kept at full precision down to the smallest subnormal,
  /// and [`Cell::subnormalize`] takes care of shortening them.
  pub(crate) const fn floor_exp(self) -> i64 {
    if self.subnormal { self.min_exp - self.precision as i64 + 1 } else { self.min_exp }
  }

  /// The smallest positive value.
  pub fn min_positive(self) -> Dyadic {
    Dyadic::power_of_2(self.floor_exp() - 1)
  }

  /// The largest finite value.
  pub fn max_finite(self) -> Dyadic {
    let p = self.precision;
    let mantissa = (malachite::Integer::from(1) << p) - malachite::Integer::from(1);
    Dyadic::new(mantissa, self.max_exp - p as i64)
  }
}

/// The value held in a cell.
#[derive(Clone, Debug)]
#[derive(PartialEq, Eq, Hash)]
pub enum Num {
  /// Not a number: the result of an invalid operation.
  Nan,
  Zero { negative: bool },
  Inf { negative: bool },
  /// A nonzero finite value.
  Finite(Dyadic),
}

impl Num {
  pub fn is_nan(&self) -> bool {
    matches!(self, Num::Nan)
  }

  pub fn is_zero(&self) -> bool {
    matches!(self, Num::Zero { .. })
  }

  pub fn is_infinite(&self) -> bool {
    matches!(self, Num::Inf { .. })
  }

  /// Whether the sign bit is set (`false` for NaN).
  pub fn is_sign_negative(&self) -> bool {
    match self {
      Num::Nan => false,
      Num::Zero { negative } | Num::Inf { negative } => *negative,
      Num::Finite(x) => x.is_negative(),
    }
  }

  /// The finite value, with both zeros mapped to [`Dyadic::ZERO`].
  pub fn to_dyadic(&self) -> Option<Dyadic> {
    match self {
      Num::Zero { .. } => Some(Dyadic::ZERO),
      Num::Finite(x) => Some(x.clone()),
      _ => None,
    }
  }

  pub fn neg(&self) -> Self {
    match self {
      Num::Nan => Num::Nan,
      Num::Zero { negative } => Num::Zero { negative: !negative },
      Num::Inf { negative } => Num::Inf { negative: !negative },
      Num::Finite(x) => Num::Finite(-x),
    }
  }

  pub fn abs(&self) -> Self {
    match self {
      Num::Nan => Num::Nan,
      Num::Zero { .. } => Num::Zero { negative: false },
      Num::Inf { .. } => Num::Inf { negative: false },
      Num::Finite(x) => Num::Finite(x.abs()),
    }
  }

  /// Compare the values of `self` and `other` as extended reals: `None` if either is NaN, and
  /// the two zeros compare equal.
  pub fn compare(&self, other: &Self) -> Option<Ordering> {
    let rank = |x: &Self| match x {
      Num::Inf { negative: true } => Some(-1),
      Num::Inf { negative: false } => Some(1),
      Num::Nan => None,
      _ => Some(0),
    };
    let (a, b) = (rank(self)?, rank(other)?);
    if a != 0 || b != 0 {
      return Some(a.cmp(&b))
    }
    Some(self.to_dyadic()?.cmp(&other.to_dyadic()?))
  }
}

/// A value representable in a given [`Format`].
#[derive(Clone, Debug)]
#[derive(PartialEq, Eq, Hash)]
pub struct Cell {
  format: Format,
  num: Num,
}

impl Cell {
  /// Wrap a value already known to be representable in `format` at full precision.
  pub(crate) fn from_parts(format: Format, num: Num) -> Self {
    Self { format, num }
  }

  pub fn nan(format: Format) -> Self {
    Self { format, num: Num::Nan }
  }

  pub fn zero(format: Format, negative: bool) -> Self {
    Self { format, num: Num::Zero { negative } }
  }

  pub fn inf(format: Format, negative: bool) -> Self {
    Self { format, num: Num::Inf { negative } }
  }

  /// Round the exact value `x` to `format`, returning the cell and the ternary status.
  ///
  /// An exact zero is `+0`.
  pub fn from_dyadic(format: Format, x: &Dyadic, rnd: Round) -> (Self, Ordering) {
    let (num, status) = format.round(x, rnd);
    (Self { format, num }, status)
  }

  pub fn format(&self) -> Format {
    self.format
  }

  pub fn num(&self) -> &Num {
    &self.num
  }

  pub fn into_num(self) -> Num {
    self.num
  }

  pub fn is_nan(&self) -> bool {
    self.num.is_nan()
  }

  pub fn is_zero(&self) -> bool {
    self.num.is_zero()
  }

  pub fn is_sign_negative(&self) -> bool {
    self.num.is_sign_negative()
  }

  /// Negation is always exact.
  pub fn neg(&self) -> Self {
    Self { format: self.format, num: self.num.neg() }
  }

  pub fn abs(&self) -> Self {
    Self { format: self.format, num: self.num.abs() }
  }
}
