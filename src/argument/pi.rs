use core::cmp::Ordering;

use malachite::{Integer, Natural};
use malachite::base::num::arithmetic::traits::PowerOf2;

use crate::cell::{Cell, Format};
use crate::dyadic::Dyadic;
use crate::round::Round;

use super::ziv::ziv;

/// `atan(1/k) × 2^w`, truncated term by term, together with the number of terms summed.
///
/// Every term is off by less than one unit, and so is the tail left out once terms vanish.
fn atan_inv(k: u64, w: u64) -> (Integer, u64) {
  let k2 = Natural::from(k * k);
  let mut power = Natural::power_of_2(w) / Natural::from(k);
  let mut sum = Integer::from(power.clone());
  let mut n = 0u64;
  while power != 0u32 {
    n += 1;
    power /= &k2;
    let term = Integer::from(&power / Natural::from(2 * n + 1));
    if n % 2 == 1 { sum -= term } else { sum += term }
  }
  (sum, n + 1)
}

/// A bracket `lo < π < hi` of width below `2^-bits`.
///
/// Machin's formula `π = 16 atan(1/5) - 4 atan(1/239)`, summed in fixed point with enough guard
/// bits to absorb the truncation errors.
pub(crate) fn pi_bracket(bits: u64) -> (Dyadic, Dyadic) {
  let w = bits + 48;
  let (a, n) = atan_inv(5, w);
  let (b, m) = atan_inv(239, w);
  let center = (a << 4u64) - (b << 2u64);
  let error = Integer::from(16 * (n + 1) + 4 * (m + 1));
  let lo = Dyadic::new(&center - &error, -(w as i64));
  let hi = Dyadic::new(center + error, -(w as i64));
  (lo, hi)
}

/// `c × π`, correctly rounded. `c` must be nonzero.
pub(crate) fn pi_multiple(c: &Dyadic, format: Format, rnd: Round) -> (Cell, Ordering) {
  debug_assert!(!c.is_zero());
  let start = format.precision + 16;
  ziv(format, rnd, start, "pi", |w| {
    let (lo, hi) = pi_bracket(w);
    let (lo, hi) = (c.mul(&lo), c.mul(&hi));
    Some(if c.is_negative() { (hi, lo) } else { (lo, hi) })
  })
}

/// π, correctly rounded to `format` in direction `rnd`.
pub fn pi(format: Format, rnd: Round) -> (Cell, Ordering) {
  pi_multiple(&Dyadic::ONE, format, rnd)
}
