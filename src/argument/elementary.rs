//! Correctly rounded inverse trigonometric functions.
//!
//! All three reduce to brackets of `atan`: `asin(x) = atan(x / √(1 - x²))` and, for `x > 0`,
//! `acos(x) = atan(√(1 - x²) / x)`. The square root and the quotient are bracketed by rounding in
//! opposite directions at the working precision, and `atan` is increasing, so the brackets carry
//! through.

use core::cmp::Ordering;

use crate::cell::{Cell, Format, Num};
use crate::dyadic::Dyadic;
use crate::round::Round;

use super::pi::{pi, pi_bracket, pi_multiple};
use super::series::atan_bracket;
use super::ziv::ziv;

/// Guard bits over the target precision for the first attempt.
const GUARD: u64 = 24;

/// `atan(lo) < atan(x) < atan(hi)` for `lo ≤ x ≤ hi`, both nonzero and of the same sign.
fn atan_between(lo: &Num, hi: &Num, w: u64) -> Option<(Dyadic, Dyadic)> {
  let (lo, hi) = (lo.to_dyadic()?, hi.to_dyadic()?);
  Some((atan_bracket(&lo, w).0, atan_bracket(&hi, w).1))
}

/// Brackets of `√(1 - x²)` for `|x| < 1`, at `w` bits.
fn cosine_of(x: &Dyadic, w: u64) -> (Num, Num) {
  let working = Format::F64.relaxed().with_precision(w);
  let t = Num::Finite(Dyadic::ONE.sub(&x.mul(x)));
  (working.rootn_num(&t, 2, Round::Down).0, working.rootn_num(&t, 2, Round::Up).0)
}

/// The arctangent of `x`, correctly rounded to `format` in direction `rnd`.
///
/// `atan(±0) = ±0` and `atan(±∞) = ±π/2`.
pub fn atan(x: &Cell, format: Format, rnd: Round) -> (Cell, Ordering) {
  match x.num() {
    Num::Nan => (Cell::nan(format), Ordering::Equal),
    Num::Zero { negative } => (Cell::zero(format, *negative), Ordering::Equal),
    Num::Inf { negative } => half_pi(*negative, format, rnd),
    Num::Finite(u) => ziv(format, rnd, format.precision + GUARD, "atan", |w| Some(atan_bracket(u, w))),
  }
}

/// The arcsine of `x`, correctly rounded to `format` in direction `rnd`.
///
/// `asin(±0) = ±0`, `asin(±1) = ±π/2`, and NaN outside of `[-1, 1]`.
pub fn asin(x: &Cell, format: Format, rnd: Round) -> (Cell, Ordering) {
  let u = match x.num() {
    Num::Zero { negative } => return (Cell::zero(format, *negative), Ordering::Equal),
    Num::Finite(u) => u,
    _ => return (Cell::nan(format), Ordering::Equal),
  };
  match u.abs().cmp(&Dyadic::ONE) {
    Ordering::Greater => (Cell::nan(format), Ordering::Equal),
    Ordering::Equal => half_pi(u.is_negative(), format, rnd),
    Ordering::Less => {
      let negative = u.is_negative();
      let u = u.abs();
      ziv(format, rnd, format.precision + GUARD, "asin", |w| {
        let working = Format::F64.relaxed().with_precision(w);
        let (c_lo, c_hi) = cosine_of(&u, w);
        let u = Num::Finite(u.clone());
        let lo = working.div_num(&u, &c_hi, Round::Down).0;
        let hi = working.div_num(&u, &c_lo, Round::Up).0;
        let (lo, hi) = atan_between(&lo, &hi, w)?;
        Some(if negative { (-hi, -lo) } else { (lo, hi) })
      })
    }
  }
}

/// The arccosine of `x`, correctly rounded to `format` in direction `rnd`.
///
/// `acos(1) = +0`, `acos(0) = π/2`, `acos(-1) = π`, and NaN outside of `[-1, 1]`.
pub fn acos(x: &Cell, format: Format, rnd: Round) -> (Cell, Ordering) {
  let u = match x.num() {
    Num::Zero { .. } => return half_pi(false, format, rnd),
    Num::Finite(u) => u,
    _ => return (Cell::nan(format), Ordering::Equal),
  };
  match u.abs().cmp(&Dyadic::ONE) {
    Ordering::Greater => (Cell::nan(format), Ordering::Equal),
    Ordering::Equal if u.is_negative() => pi(format, rnd),
    Ordering::Equal => (Cell::zero(format, false), Ordering::Equal),
    Ordering::Less => {
      let negative = u.is_negative();
      let u = u.abs();
      ziv(format, rnd, format.precision + GUARD, "acos", |w| {
        let working = Format::F64.relaxed().with_precision(w);
        let (c_lo, c_hi) = cosine_of(&u, w);
        let u = Num::Finite(u.clone());
        let lo = working.div_num(&c_lo, &u, Round::Down).0;
        let hi = working.div_num(&c_hi, &u, Round::Up).0;
        let (lo, hi) = atan_between(&lo, &hi, w)?;
        if !negative {
          return Some((lo, hi))
        }
        // acos(-x) = π - acos(x)
        let (pi_lo, pi_hi) = pi_bracket(w);
        Some((pi_lo.sub(&hi), pi_hi.sub(&lo)))
      })
    }
  }
}

fn half_pi(negative: bool, format: Format, rnd: Round) -> (Cell, Ordering) {
  let half = Dyadic::power_of_2(-1);
  pi_multiple(&if negative { -half } else { half }, format, rnd)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::underlying::Sealed;
  use core::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};
  use proptest::prelude::*;

  fn cell(x: f64) -> Cell {
    Cell::from_native(Format::F64, x, Round::Nearest).0
  }

  fn native((c, _): (Cell, Ordering)) -> f64 {
    c.get(Round::Nearest)
  }

  #[test]
  fn special_values() {
    for rnd in Round::ALL {
      assert!(atan(&cell(-0.0), Format::F64, rnd).0.is_sign_negative());
      assert_eq!(native(atan(&cell(f64::INFINITY), Format::F64, Round::Nearest)), FRAC_PI_2);
      assert_eq!(native(asin(&cell(-1.0), Format::F64, Round::Nearest)), -FRAC_PI_2);
      assert_eq!(acos(&cell(1.0), Format::F64, rnd), (Cell::zero(Format::F64, false), Ordering::Equal));
      assert!(native(asin(&cell(1.5), Format::F64, rnd)).is_nan());
      assert!(native(acos(&cell(f64::NEG_INFINITY), Format::F64, rnd)).is_nan());
      assert!(native(atan(&cell(f64::NAN), Format::F64, rnd)).is_nan());
    }
    assert_eq!(native(acos(&cell(-1.0), Format::F64, Round::Down)), PI);
    assert_eq!(native(acos(&cell(0.0), Format::F64, Round::Up)), Sealed::next_up(FRAC_PI_2));
  }

  #[test]
  fn quarter_pi() {
    assert_eq!(native(atan(&cell(1.0), Format::F64, Round::Nearest)), FRAC_PI_4);
    assert_eq!(native(atan(&cell(-1.0), Format::F64, Round::Down)), -Sealed::next_up(FRAC_PI_4));
    // At any precision, atan(1) is π scaled by a power of two, and so is its rounding.
    let format = Format::F64.relaxed().with_precision(500);
    for rnd in [Round::Down, Round::Up] {
      let (a, t) = atan(&cell(1.0), format, rnd);
      let (p, s) = pi(format, rnd);
      assert_eq!(t, s);
      assert_eq!(a.num().to_dyadic(), p.num().to_dyadic().map(|p| p.mul_pow2(-2)));
    }
  }

  #[test_log::test]
  fn near_one() {
    // acos is tiny here, and asin within an ulp of π/2.
    let x = Sealed::next_down(1.0_f64);
    assert!(brackets_libm(acos, x, x.acos()));
    let down = native(asin(&cell(x), Format::F64, Round::Down));
    assert!(down < FRAC_PI_2);
  }

  /// Checks that `f` brackets the libm value within an ulp on each side.
  fn brackets_libm(f: fn(&Cell, Format, Round) -> (Cell, Ordering), x: f64, libm: f64) -> bool {
    let down = native(f(&cell(x), Format::F64, Round::Down));
    let up = native(f(&cell(x), Format::F64, Round::Up));
    let nearest = native(f(&cell(x), Format::F64, Round::Nearest));
    Sealed::next_up(down) == up
      && Sealed::next_down(down) <= libm && libm <= Sealed::next_up(up)
      && (nearest == down || nearest == up)
  }

  proptest!{
    #![proptest_config(ProptestConfig::with_cases(crate::PROPTEST_CASES))]
    #[test]
    fn agree_with_libm(x in -1.0_f64..1.0, y in proptest::num::f64::NORMAL) {
      prop_assume!(x != 0.0);
      prop_assert!(brackets_libm(asin, x, x.asin()));
      prop_assert!(brackets_libm(acos, x, x.acos()));
      prop_assert!(brackets_libm(atan, y, y.atan()));
    }

    #[test]
    fn asin_plus_acos(x in -1.0_f64..1.0) {
      // asin(x) + acos(x) = π/2, so the directed sums bracket it.
      let format = Format::F64.relaxed().with_precision(200);
      let (pi_lo, pi_hi) = pi_bracket(300);
      let sum = |rnd| {
        let a = asin(&cell(x), format, rnd).0.into_num();
        let b = acos(&cell(x), format, rnd).0.into_num();
        a.to_dyadic().unwrap().add(&b.to_dyadic().unwrap())
      };
      prop_assert!(sum(Round::Down) < pi_hi.mul_pow2(-1));
      prop_assert!(sum(Round::Up) > pi_lo.mul_pow2(-1));
    }
  }
}
