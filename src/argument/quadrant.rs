use log::trace;
use malachite::Integer;

use crate::cell::{Cell, Num};
use crate::round::Round;

use super::pi::pi_bracket;

/// The integer `k` with `k × π/2 ≤ x < (k + 1) × π/2`, computed exactly whatever the magnitude of
/// `x`. `None` for NaN and infinities.
///
/// Divides `x` by outward bounds of `π/2` in a relaxed copy of the cell's format, so neither
/// quotient can overflow or underflow, doubling the precision until both quotients have the
/// same floor. Nonzero `x` is never an exact multiple of `π/2`, so this terminates.
///
/// ```
/// # use p1788::{Cell, Format, Round};
/// # use p1788::argument::quadrant;
/// # use malachite::Integer;
/// let quadrant_of = |x: f64| quadrant(&Cell::from_native(Format::F64, x, Round::Nearest).0);
/// assert_eq!(quadrant_of(1.0), Some(Integer::from(0)));
/// assert_eq!(quadrant_of(-1.0), Some(Integer::from(-1)));
/// assert_eq!(quadrant_of(1e22), Some(Integer::from(6366197723675813430755_i128)));
/// ```
pub fn quadrant(x: &Cell) -> Option<Integer> {
  let format = x.format();
  let x = match x.num() {
    Num::Zero { .. } => return Some(Integer::from(0)),
    Num::Finite(x) => Num::Finite(x.clone()),
    _ => return None,
  };
  let magnitude = x.to_dyadic()?.floor_log2().max(0) as u64;
  let mut w = magnitude + 64;
  loop {
    let working = format.relaxed().with_precision(w);
    let (pi_lo, pi_hi) = pi_bracket(w + 2);
    let (half_lo, half_hi) = (Num::Finite(pi_lo.mul_pow2(-1)), Num::Finite(pi_hi.mul_pow2(-1)));
    // The quotient decreases with the divisor for positive x, increases for negative x.
    let (for_lo, for_hi) = if x.is_sign_negative() { (&half_lo, &half_hi) } else { (&half_hi, &half_lo) };
    let lo = working.div_num(&x, for_lo, Round::Down).0.to_dyadic()?.floor();
    let hi = working.div_num(&x, for_hi, Round::Up).0.to_dyadic()?.floor();
    if lo == hi {
      return Some(lo)
    }
    w *= 2;
    trace!("quadrant: undecided between {lo} and {hi}, retrying at {w} bits");
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::cell::Format;
  use crate::rational::{pi_lower, to_rational};
  use crate::underlying::Sealed;
  use core::f64::consts::FRAC_PI_2;
  use malachite::base::num::arithmetic::traits::Floor;
  use malachite::rational::Rational;
  use proptest::prelude::*;

  fn quadrant_of(x: f64) -> Option<Integer> {
    quadrant(&Cell::from_native(Format::F64, x, Round::Nearest).0)
  }

  /// `floor(x / (π/2))` from 400 decimals of π, which is plenty for any `f64`.
  fn reference(x: f64) -> Integer {
    (to_rational(x) * Rational::from(2) / pi_lower()).floor()
  }

  #[test]
  fn specials() {
    assert_eq!(quadrant_of(f64::NAN), None);
    assert_eq!(quadrant_of(f64::NEG_INFINITY), None);
    assert_eq!(quadrant_of(-0.0), Some(Integer::from(0)));
    assert_eq!(quadrant_of(f64::from_bits(1)), Some(Integer::from(0)));
    assert_eq!(quadrant_of(-f64::from_bits(1)), Some(Integer::from(-1)));
  }

  #[test]
  fn around_half_pi() {
    // The f64 value of π/2 is just below it.
    assert_eq!(quadrant_of(FRAC_PI_2), Some(Integer::from(0)));
    assert_eq!(quadrant_of(Sealed::next_up(FRAC_PI_2)), Some(Integer::from(1)));
    assert_eq!(quadrant_of(-FRAC_PI_2), Some(Integer::from(-1)));
    assert_eq!(quadrant_of(-Sealed::next_up(FRAC_PI_2)), Some(Integer::from(-2)));
  }

  #[test_log::test]
  fn huge() {
    for x in [1e10, 1e22, 1e100, 1e300, f64::MAX, -f64::MAX] {
      assert_eq!(quadrant_of(x), Some(reference(x)), "{x}");
    }
  }

  #[test]
  fn wide_format() {
    let format = Format::F64.relaxed().with_precision(200);
    // An exact product that f64 can't hold.
    let (x, _) = Cell::from_native(format, 1e100, Round::Nearest);
    let (y, t) = format.mul(&x, &x, Round::Nearest);
    assert_eq!(t, core::cmp::Ordering::Equal);
    let exact = to_rational(1e100) * to_rational(1e100) * Rational::from(2) / pi_lower();
    assert_eq!(quadrant(&y), Some(exact.floor()));
  }

  proptest!{
    #![proptest_config(ProptestConfig::with_cases(crate::PROPTEST_CASES))]
    #[test]
    fn agrees_with_reference(x in proptest::num::f64::NORMAL | proptest::num::f64::SUBNORMAL) {
      prop_assert_eq!(quadrant_of(x), Some(reference(x)));
    }
  }
}
