use malachite::{Integer, Natural};
use malachite::base::num::arithmetic::traits::PowerOf2;
use malachite::base::num::basic::traits::One;

use crate::dyadic::Dyadic;

use super::pi::pi_bracket;

/// `atan(a/b) × 2^w` for `0 < a ≤ b`, truncated, and a bound on its error in units.
///
/// Euler's series `atan(x) = Σ 2^2n (n!)^2 / (2n + 1)! × x^(2n + 1) / (1 + x^2)^(n + 1)`, whose
/// terms shrink by a factor below `x^2 / (1 + x^2) ≤ 1/2` each. Every term is built from the
/// previous truncated one, so its error stays below 2 units; the tail left out once terms vanish
/// is below 4.
fn euler(a: &Natural, b: &Natural, w: u64) -> (Integer, Integer) {
  let a2 = a * a;
  let d = &a2 + b * b;
  let mut term = (a * b << w) / &d;
  let mut sum = term.clone();
  let mut n = 0u64;
  while term != 0u32 {
    n += 1;
    term = term * Natural::from(2 * n) * &a2 / (Natural::from(2 * n + 1) * &d);
    sum += &term;
  }
  (Integer::from(sum), Integer::from(2 * n + 7))
}

/// A bracket `lo < atan(u) < hi` for nonzero `u`, with an error around `2^-w` relative to `u`.
///
/// Arguments above 1 go through `atan(u) = π/2 - atan(1/u)`.
pub(crate) fn atan_bracket(u: &Dyadic, w: u64) -> (Dyadic, Dyadic) {
  debug_assert!(!u.is_zero());
  let w = w + (-u.floor_log2()).max(0) as u64;
  let e = u.exponent();
  let (a, b) = if e >= 0 {
    (u.magnitude() << e as u64, Natural::ONE)
  } else {
    (u.magnitude(), Natural::power_of_2(e.unsigned_abs()))
  };
  let unit = -(w as i64);
  let (lo, hi) = if a <= b {
    let (sum, error) = euler(&a, &b, w);
    (Dyadic::new(&sum - &error, unit), Dyadic::new(sum + error, unit))
  } else {
    let (sum, error) = euler(&b, &a, w);
    let (pi_lo, pi_hi) = pi_bracket(w + 1);
    (
      pi_lo.mul_pow2(-1).sub(&Dyadic::new(&sum + &error, unit)),
      pi_hi.mul_pow2(-1).sub(&Dyadic::new(sum - error, unit)),
    )
  };
  if u.is_negative() { (-hi, -lo) } else { (lo, hi) }
}
