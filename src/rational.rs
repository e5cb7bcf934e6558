//! Exact rational oracles for tests: convert values to [`Rational`] and check results against the
//! correctly rounded value of an exact rational, computed here as plainly as possible.

use core::cmp::Ordering;

use malachite::Integer;
use malachite::base::num::arithmetic::traits::{Abs, Pow, PowerOf2};
use malachite::rational::Rational;

use crate::cell::Num;
use crate::dyadic::Dyadic;
use crate::round::Round;
use crate::underlying::{Native, Sealed};

pub fn dyadic_to_rational(x: &Dyadic) -> Rational {
  Rational::from(x.mantissa().clone()) * Rational::power_of_2(x.exponent())
}

/// Convert a **finite** native value to a [`Rational`]. Panics on NaN or infinity.
pub fn to_rational<T: Native>(x: T) -> Rational {
  match x.decompose() {
    Num::Zero { .. } => Rational::from(0),
    Num::Finite(d) => dyadic_to_rational(&d),
    other => panic!("Should not pass {other:?} to to_rational"),
  }
}

/// π truncated to 400 decimals, so that `pi_lower() ≤ π < pi_lower() + 10^-400`.
pub fn pi_lower() -> Rational {
  let digits = [
    "314159265358979323846264338327950288419716939937510582097494459230781640628620899862803482",
    "534211706798214808651328230664709384460955058223172535940812848111745028410270193852110555",
    "964462294895493038196442881097566593344612847564823378678316527120190914564856692346034861",
    "045432664821339360726024914127372458700660631558817488152092096282925409171536436789259036",
    "00113305305488204665213841469519415116094",
  ].concat();
  let numerator: Integer = digits.parse().unwrap();
  Rational::from_integers(numerator, Integer::from(10).pow(400))
}

/// Whether `got` has an even last digit in `T`'s format (zero counts as even).
fn is_even<T: Native>(got: T) -> bool {
  let format = T::FORMAT;
  match got.decompose() {
    Num::Finite(d) => {
      let lsb = (d.floor_log2() + 1 - format.precision as i64).max(format.min_exp - format.precision as i64);
      d.exponent() > lsb
    }
    _ => true,
  }
}

/// The value of a neighbour of a finite value; the one beyond the largest finite value is taken
/// to be `2^max_exp`, as if the exponent range were unbounded.
fn neighbour<T: Native>(x: T) -> Rational {
  if x.is_infinite() {
    let bound = Rational::power_of_2(T::FORMAT.max_exp);
    if x.is_sign_negative() { -bound } else { bound }
  } else {
    to_rational(x)
  }
}

/// Check that `got` is `exact` correctly rounded in direction `rnd` to `T`. Zeros of either sign
/// are accepted for an exact zero.
pub fn is_correct_rounded<T: Native>(exact: &Rational, got: T, rnd: Round) -> bool {
  if got.is_nan() {
    return false
  }
  let max = to_rational(T::MAX);
  let negative = *exact < 0u32;
  let direction = match rnd {
    Round::TowardZero => if negative { Round::Up } else { Round::Down },
    Round::AwayFromZero => if negative { Round::Down } else { Round::Up },
    other => other,
  };
  if got.is_infinite() {
    let beyond = if got.is_sign_negative() { *exact < -&max } else { *exact > max };
    return beyond && match direction {
      Round::Up => !got.is_sign_negative(),
      Round::Down => got.is_sign_negative(),
      _ => {
        // Overflow to infinity happens from max + ulp/2 onwards.
        let above = neighbour(if got.is_sign_negative() { T::NEG_INFINITY } else { T::INFINITY });
        let limit = (&above + if got.is_sign_negative() { -&max } else { max.clone() }) / Rational::from(2);
        if got.is_sign_negative() { *exact <= limit } else { *exact >= limit }
      }
    }
  }
  let value = to_rational(got);
  let below = neighbour(got.next_down());
  let above = neighbour(got.next_up());
  // Directed rounding saturates at the largest finite value, whatever lies beyond it.
  match direction {
    Round::Up => value >= *exact && (got == -T::MAX || below < *exact),
    Round::Down => value <= *exact && (got == T::MAX || above > *exact),
    _ => {
      let d = (&value - exact).abs();
      let db = (&below - exact).abs();
      let da = (&above - exact).abs();
      let tie_ok = |other: &Rational| match d.cmp(other) {
        Ordering::Less => true,
        Ordering::Equal => is_even(got),
        Ordering::Greater => false,
      };
      tie_ok(&db) && tie_ok(&da)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn oracle_agrees_with_hardware() {
    let third = Rational::from_signeds(1, 3);
    assert!(is_correct_rounded(&third, 1.0_f64 / 3.0, Round::Nearest));
    assert!(!is_correct_rounded(&third, Sealed::next_up(1.0_f64 / 3.0), Round::Nearest));
    assert!(is_correct_rounded(&third, 1.0_f32 / 3.0, Round::Nearest));
    let huge = to_rational(f64::MAX) * Rational::from(2);
    assert!(is_correct_rounded(&huge, f64::INFINITY, Round::Nearest));
    assert!(is_correct_rounded(&huge, f64::MAX, Round::TowardZero));
    assert!(!is_correct_rounded(&huge, f64::MAX, Round::Up));
    assert!(!is_correct_rounded(&huge, f64::MAX, Round::Nearest));
    assert!(is_correct_rounded(&-&huge, -f64::MAX, Round::Up));
    assert!(is_correct_rounded(&-&huge, -f64::MAX, Round::TowardZero));
    assert!(!is_correct_rounded(&-&huge, -f64::MAX, Round::Down));
    let beyond = Rational::power_of_2(1025i64);
    assert!(is_correct_rounded(&beyond, f64::MAX, Round::Down));
    assert!(!is_correct_rounded(&beyond, Sealed::next_down(f64::MAX), Round::Down));
    assert!(is_correct_rounded(&Rational::from(0), -0.0_f64, Round::Up));
  }
}
