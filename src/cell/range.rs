use super::*;

use malachite::Natural;
use malachite::base::num::arithmetic::traits::Parity;
use malachite::base::num::basic::traits::One;

use crate::round::{Remainder, ternary};

impl Format {
  /// Round the exact value `x` to this format at full precision (see [`Format::floor_exp`]),
  /// handling overflow and underflow. Returns the rounded value and its ternary status.
  ///
  /// An exact zero rounds to `+0`; callers that know a better sign for it apply it themselves.
  pub(crate) fn round(self, x: &Dyadic, rnd: Round) -> (Num, Ordering) {
    self.round_hinted(x, rnd, Ordering::Equal)
  }

  /// As [`Format::round`], where `x` is itself the result of a previous rounding with status
  /// `hint`. Ties are broken in favour of the exact value the hint points to.
  pub(crate) fn round_hinted(self, x: &Dyadic, rnd: Round, hint: Ordering) -> (Num, Ordering) {
    if x.is_zero() {
      return (Num::Zero { negative: false }, Ordering::Equal)
    }
    let exp = x.floor_log2() + 1;
    if exp < self.floor_exp() {
      return self.underflow(x, rnd, hint)
    }
    self.round_at(x, exp - self.precision as i64, rnd, hint)
  }

  /// Round `x` to a multiple of `2^lsb`, then check for overflow.
  pub(crate) fn round_at(self, x: &Dyadic, lsb: i64, rnd: Round, hint: Ordering) -> (Num, Ordering) {
    let negative = x.is_negative();
    let (q, rem) = x.split_at(lsb);
    let incremented = rnd.increments_hinted(negative, q.odd(), rem, hint);
    let q = if incremented { q + Natural::ONE } else { q };
    let exact = rem == Remainder::Zero;
    let status = if exact { hint } else { ternary(negative, incremented, false) };
    if q == 0u32 {
      return (Num::Zero { negative }, status)
    }
    let value = Dyadic::from_natural(negative, q, lsb);
    if value.floor_log2() + 1 > self.max_exp {
      return self.overflow(negative, rnd)
    }
    (Num::Finite(value), status)
  }

  /// The result of rounding a value of magnitude above the largest finite one.
  pub(crate) fn overflow(self, negative: bool, rnd: Round) -> (Num, Ordering) {
    let to_inf = match rnd {
      Round::Nearest | Round::AwayFromZero => true,
      Round::TowardZero => false,
      Round::Up => !negative,
      Round::Down => negative,
    };
    let status = if negative { Ordering::Less } else { Ordering::Greater };
    if to_inf {
      (Num::Inf { negative }, status)
    } else {
      let max = self.max_finite();
      (Num::Finite(if negative { -max } else { max }), status.reverse())
    }
  }

  /// The result of rounding a nonzero `x` of magnitude below the smallest positive value: either
  /// zero or that smallest value.
  fn underflow(self, x: &Dyadic, rnd: Round, hint: Ordering) -> (Num, Ordering) {
    let negative = x.is_negative();
    let min = self.min_positive();
    let to_min = match rnd {
      Round::Nearest => {
        // Half of the smallest value rounds to zero (the even neighbour), unless it is itself
        // the rounding of something larger.
        let half = min.mul_pow2(-1);
        match x.abs().cmp(&half) {
          Ordering::Greater => true,
          Ordering::Less => false,
          Ordering::Equal => if negative { hint == Ordering::Greater } else { hint == Ordering::Less },
        }
      }
      Round::TowardZero => false,
      Round::AwayFromZero => true,
      Round::Up => !negative,
      Round::Down => negative,
    };
    let status = ternary(negative, to_min, false);
    if to_min {
      (Num::Finite(if negative { -min } else { min }), status)
    } else {
      (Num::Zero { negative }, status)
    }
  }

  /// Whether a finite nonzero value is representable in this format without any rounding, at
  /// full precision.
  pub(crate) fn holds(self, x: &Dyadic) -> bool {
    if x.is_zero() {
      return true
    }
    let exp = x.floor_log2() + 1;
    exp >= self.floor_exp() && exp <= self.max_exp
      && x.exponent() >= exp - self.precision as i64
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use malachite::Integer;

  fn d(m: i64, e: i64) -> Dyadic {
    Dyadic::new(Integer::from(m), e)
  }

  const P4: Format = Format { precision: 4, min_exp: -4, max_exp: 4, subnormal: false };

  #[test]
  fn nearest_even() {
    // 0b10011 = 19 → 4 bits: 0b1010 (tie, round to even) × 2
    assert_eq!(P4.round(&d(19, -2), Round::Nearest), (Num::Finite(d(20, -2)), Ordering::Greater));
    assert_eq!(P4.round(&d(17, -2), Round::Nearest), (Num::Finite(d(16, -2)), Ordering::Less));
    assert_eq!(P4.round(&d(-19, -2), Round::Nearest), (Num::Finite(d(-20, -2)), Ordering::Less));
    assert_eq!(P4.round(&d(15, -2), Round::Nearest), (Num::Finite(d(15, -2)), Ordering::Equal));
  }

  #[test]
  fn directed() {
    assert_eq!(P4.round(&d(17, -2), Round::Up), (Num::Finite(d(18, -2)), Ordering::Greater));
    assert_eq!(P4.round(&d(-17, -2), Round::Up), (Num::Finite(d(-16, -2)), Ordering::Greater));
    assert_eq!(P4.round(&d(-17, -2), Round::Down), (Num::Finite(d(-18, -2)), Ordering::Less));
    assert_eq!(P4.round(&d(-17, -2), Round::TowardZero), (Num::Finite(d(-16, -2)), Ordering::Greater));
    assert_eq!(P4.round(&d(17, -2), Round::AwayFromZero), (Num::Finite(d(18, -2)), Ordering::Greater));
  }

  #[test]
  fn overflow() {
    // max is 0b1111 = 15
    assert_eq!(P4.max_finite(), d(15, 0));
    assert_eq!(P4.round(&d(31, -1), Round::Nearest), (Num::Inf { negative: false }, Ordering::Greater));
    assert_eq!(P4.round(&d(31, -1), Round::Down), (Num::Finite(d(15, 0)), Ordering::Less));
    assert_eq!(P4.round(&d(-100, 0), Round::Up), (Num::Finite(d(-15, 0)), Ordering::Greater));
    assert_eq!(P4.round(&d(-100, 0), Round::Down), (Num::Inf { negative: true }, Ordering::Less));
  }

  #[test]
  fn underflow() {
    // min is 2^-5
    assert_eq!(P4.min_positive(), d(1, -5));
    assert_eq!(P4.round(&d(1, -6), Round::Nearest), (Num::Zero { negative: false }, Ordering::Less));
    assert_eq!(P4.round(&d(3, -7), Round::Nearest), (Num::Finite(d(1, -5)), Ordering::Greater));
    assert_eq!(P4.round(&d(-1, -9), Round::Down), (Num::Finite(d(-1, -5)), Ordering::Less));
    assert_eq!(P4.round(&d(-1, -9), Round::Up), (Num::Zero { negative: true }, Ordering::Greater));
  }

  #[test]
  fn f64_range() {
    let tiny = Format::F64.min_positive();
    assert_eq!(tiny, d(1, -1074));
    assert!(Format::F64.holds(&tiny));
    assert!(Format::F64.holds(&Format::F64.max_finite()));
    assert!(!Format::F64.holds(&d(1, 1024)));
    assert!(!Format::F64.holds(&d((1 << 53) + 1, 0)));
  }
}
