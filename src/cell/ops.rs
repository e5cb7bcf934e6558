//! Correctly rounded arithmetic, with a [`Format`] as the rounding context.
//!
//! Each operation computes its result exactly (or, for roots and quotients, exactly enough to
//! round correctly) and rounds once to the context's format at full precision. Operands may come
//! from any format.

use super::*;

use log::trace;
use malachite::Natural;
use malachite::base::num::arithmetic::traits::{DivMod, FloorRoot, FloorSqrt, Pow, PowerOf2};
use malachite::base::num::basic::traits::One;
use malachite::base::num::logic::traits::SignificantBits;

/// Exact powers whose mantissa would be wider than this are bracketed instead.
const EXACT_POW_BITS: u64 = 1 << 12;

/// Roots whose exact integer computation would need more bits than this are found by bisection.
const EXACT_ROOT_BITS: u64 = 1 << 16;

/// Round in `rnd` with the sign of the result determined up front: a computation on magnitudes
/// `f` is run in the direction appropriate to the sign, and its result negated if needed.
fn signed(negative: bool, rnd: Round, f: impl FnOnce(Round) -> (Num, Ordering)) -> (Num, Ordering) {
  if negative {
    let (num, status) = f(rnd.mirrored());
    (num.neg(), status.reverse())
  } else {
    f(rnd)
  }
}

impl Format {
  /// Round the value of `x` (from any format) to this one.
  pub fn round_cell(self, x: &Cell, rnd: Round) -> (Cell, Ordering) {
    let (num, status) = self.round_num(x.num(), rnd);
    (Cell::from_parts(self, num), status)
  }

  pub fn add(self, a: &Cell, b: &Cell, rnd: Round) -> (Cell, Ordering) {
    self.wrap(self.add_num(a.num(), b.num(), rnd))
  }

  pub fn sub(self, a: &Cell, b: &Cell, rnd: Round) -> (Cell, Ordering) {
    self.wrap(self.add_num(a.num(), &b.num().neg(), rnd))
  }

  pub fn mul(self, a: &Cell, b: &Cell, rnd: Round) -> (Cell, Ordering) {
    self.wrap(self.mul_num(a.num(), b.num(), rnd))
  }

  pub fn sqr(self, a: &Cell, rnd: Round) -> (Cell, Ordering) {
    self.wrap(self.mul_num(a.num(), a.num(), rnd))
  }

  pub fn div(self, a: &Cell, b: &Cell, rnd: Round) -> (Cell, Ordering) {
    self.wrap(self.div_num(a.num(), b.num(), rnd))
  }

  pub fn recip(self, a: &Cell, rnd: Round) -> (Cell, Ordering) {
    self.wrap(self.div_num(&Num::Finite(Dyadic::ONE), a.num(), rnd))
  }

  /// Square root; `sqrt(-0) = -0`.
  pub fn sqrt(self, a: &Cell, rnd: Round) -> (Cell, Ordering) {
    self.wrap(self.rootn_num(a.num(), 2, rnd))
  }

  /// `1 / sqrt(a)`; `rec_sqrt(±0) = +∞`.
  pub fn rec_sqrt(self, a: &Cell, rnd: Round) -> (Cell, Ordering) {
    self.wrap(self.rec_sqrt_num(a.num(), rnd))
  }

  /// The `n`th root. Negative values have odd roots only; `rootn(x, 0)` is NaN.
  pub fn rootn(self, a: &Cell, n: u64, rnd: Round) -> (Cell, Ordering) {
    self.wrap(self.rootn_num(a.num(), n, rnd))
  }

  /// `a^n`. `a^0 = 1` for every `a`, NaN included.
  pub fn pow_u(self, a: &Cell, n: u64, rnd: Round) -> (Cell, Ordering) {
    self.wrap(self.pow_num(a.num(), n, rnd))
  }

  /// The least value of this format (subnormals included) greater than `a`.
  pub fn next_up(self, a: &Cell) -> Cell {
    let num = match a.num() {
      Num::Nan => Num::Nan,
      Num::Inf { negative: false } => Num::Inf { negative: false },
      Num::Inf { negative: true } => Num::Finite(-self.max_finite()),
      Num::Zero { .. } => Num::Finite(self.min_positive()),
      Num::Finite(x) => {
        // Nudge by less than half a unit in the last place, then round up.
        let tiny = Dyadic::power_of_2(x.floor_log2() - self.precision as i64 - 2);
        let (mut cell, status) = Cell::from_dyadic(self, &x.add(&tiny), Round::Up);
        let _ = cell.subnormalize(status, Round::Up);
        return cell
      }
    };
    Cell::from_parts(self, num)
  }

  /// The greatest value of this format (subnormals included) less than `a`.
  pub fn next_down(self, a: &Cell) -> Cell {
    self.next_up(&a.neg()).neg()
  }

  fn wrap(self, (num, status): (Num, Ordering)) -> (Cell, Ordering) {
    (Cell::from_parts(self, num), status)
  }

  pub(crate) fn round_num(self, x: &Num, rnd: Round) -> (Num, Ordering) {
    match x {
      Num::Finite(x) => self.round(x, rnd),
      special => (special.clone(), Ordering::Equal),
    }
  }

  /// Round an exact result which may be zero, in which case it gets the IEEE sign for sums: `-0`
  /// rounding down, `+0` otherwise.
  fn round_sum(self, x: &Dyadic, rnd: Round) -> (Num, Ordering) {
    if x.is_zero() {
      (Num::Zero { negative: rnd == Round::Down }, Ordering::Equal)
    } else {
      self.round(x, rnd)
    }
  }

  /// Round `±q × 2^lsb` if `exact`, otherwise a value known to lie strictly between `q × 2^lsb`
  /// and `(q + 1) × 2^lsb`. `q` must have at least `precision + 2` bits for the latter to be
  /// rounded correctly.
  fn round_sticky(self, negative: bool, q: Natural, exact: bool, lsb: i64, rnd: Round) -> (Num, Ordering) {
    let value = if exact {
      Dyadic::from_natural(negative, q, lsb)
    } else {
      debug_assert!(q.significant_bits() >= self.precision + 2);
      Dyadic::from_natural(negative, (q << 1u64) + Natural::ONE, lsb - 1)
    };
    self.round(&value, rnd)
  }

  pub(crate) fn add_num(self, a: &Num, b: &Num, rnd: Round) -> (Num, Ordering) {
    match (a, b) {
      (Num::Nan, _) | (_, Num::Nan) => (Num::Nan, Ordering::Equal),
      (Num::Inf { negative: x }, Num::Inf { negative: y }) if x != y => (Num::Nan, Ordering::Equal),
      (Num::Inf { negative }, _) | (_, Num::Inf { negative }) =>
        (Num::Inf { negative: *negative }, Ordering::Equal),
      (Num::Zero { negative: x }, Num::Zero { negative: y }) =>
        (Num::Zero { negative: if x == y { *x } else { rnd == Round::Down } }, Ordering::Equal),
      (Num::Zero { .. }, other) | (other, Num::Zero { .. }) => self.round_num(other, rnd),
      (Num::Finite(x), Num::Finite(y)) => self.round_sum(&x.add(y), rnd),
    }
  }

  pub(crate) fn mul_num(self, a: &Num, b: &Num, rnd: Round) -> (Num, Ordering) {
    let negative = a.is_sign_negative() != b.is_sign_negative();
    match (a, b) {
      (Num::Nan, _) | (_, Num::Nan) => (Num::Nan, Ordering::Equal),
      (Num::Inf { .. }, Num::Zero { .. }) | (Num::Zero { .. }, Num::Inf { .. }) =>
        (Num::Nan, Ordering::Equal),
      (Num::Inf { .. }, _) | (_, Num::Inf { .. }) => (Num::Inf { negative }, Ordering::Equal),
      (Num::Zero { .. }, _) | (_, Num::Zero { .. }) => (Num::Zero { negative }, Ordering::Equal),
      (Num::Finite(x), Num::Finite(y)) => self.round(&x.mul(y), rnd),
    }
  }

  pub(crate) fn div_num(self, a: &Num, b: &Num, rnd: Round) -> (Num, Ordering) {
    let negative = a.is_sign_negative() != b.is_sign_negative();
    match (a, b) {
      (Num::Nan, _) | (_, Num::Nan) => (Num::Nan, Ordering::Equal),
      (Num::Inf { .. }, Num::Inf { .. }) | (Num::Zero { .. }, Num::Zero { .. }) =>
        (Num::Nan, Ordering::Equal),
      (Num::Inf { .. }, _) | (_, Num::Zero { .. }) => (Num::Inf { negative }, Ordering::Equal),
      (Num::Zero { .. }, _) | (_, Num::Inf { .. }) => (Num::Zero { negative }, Ordering::Equal),
      (Num::Finite(x), Num::Finite(y)) => {
        let (n, d) = (x.magnitude(), y.magnitude());
        let shift = (self.precision + 3 + d.significant_bits()).saturating_sub(n.significant_bits());
        let (q, r) = (n << shift).div_mod(d);
        let lsb = x.exponent() - y.exponent() - shift as i64;
        self.round_sticky(negative, q, r == 0u32, lsb, rnd)
      }
    }
  }

  pub(crate) fn rec_sqrt_num(self, a: &Num, rnd: Round) -> (Num, Ordering) {
    match a {
      Num::Nan => (Num::Nan, Ordering::Equal),
      Num::Zero { .. } => (Num::Inf { negative: false }, Ordering::Equal),
      Num::Inf { negative: false } => (Num::Zero { negative: false }, Ordering::Equal),
      _ if a.is_sign_negative() => (Num::Nan, Ordering::Equal),
      Num::Finite(x) => {
        // 1/sqrt(m × 2^e) = sqrt(2^2k / m) × 2^-(k + e/2), with e made even first.
        let (m, e) = (x.magnitude(), x.exponent());
        let (m, e) = if e % 2 == 0 { (m, e) } else { (m << 1u64, e - 1) };
        let k = self.precision + 4 + m.significant_bits();
        let (n, r) = Natural::power_of_2(2 * k).div_mod(&m);
        let q = (&n).floor_sqrt();
        let exact = r == 0u32 && &q * &q == n;
        self.round_sticky(false, q, exact, -(k as i64) - e / 2, rnd)
      }
      Num::Inf { negative: true } => (Num::Nan, Ordering::Equal),
    }
  }

  pub(crate) fn rootn_num(self, a: &Num, n: u64, rnd: Round) -> (Num, Ordering) {
    let odd = n % 2 == 1;
    match a {
      _ if n == 0 => (Num::Nan, Ordering::Equal),
      Num::Nan => (Num::Nan, Ordering::Equal),
      Num::Zero { negative } => (Num::Zero { negative: *negative && (odd || n == 2) }, Ordering::Equal),
      Num::Inf { negative: false } => (a.clone(), Ordering::Equal),
      Num::Inf { negative: true } =>
        (if odd { a.clone() } else { Num::Nan }, Ordering::Equal),
      Num::Finite(x) if x.is_negative() && !odd => (Num::Nan, Ordering::Equal),
      Num::Finite(_) if n == 1 => self.round_num(a, rnd),
      Num::Finite(x) => signed(x.is_negative(), rnd, |rnd| self.root_magnitude(&x.abs(), n, rnd)),
    }
  }

  /// The correctly rounded `n`th root (`n ≥ 2`) of a positive value.
  fn root_magnitude(self, x: &Dyadic, n: u64, rnd: Round) -> (Num, Ordering) {
    let (m, e) = (x.magnitude(), x.exponent());
    let wanted = n.saturating_mul(self.precision + 3);
    if wanted <= EXACT_ROOT_BITS {
      // Shift enough bits in for the root to have precision + 2 of its own, keeping the exponent a
      // multiple of n.
      let base = wanted.saturating_sub(m.significant_bits()) as i64;
      let shift = base + (e - base).rem_euclid(n as i64);
      let big = m << shift as u64;
      let q = (&big).floor_root(n);
      let exact = (&q).pow(n) == big;
      return self.round_sticky(false, q, exact, (e - shift) / n as i64, rnd)
    }
    // Bisect on the grid of (precision + 3)-bit values between 2^a and 2^(a + 1), which brackets
    // the root.
    let a = x.floor_log2().div_euclid(n as i64);
    let lsb = a - self.precision as i64 - 2;
    let candidate = |j: &Natural| Dyadic::from_natural(false, j.clone(), lsb);
    let mut lo = Natural::power_of_2(self.precision + 2);
    let mut hi = Natural::power_of_2(self.precision + 3);
    let mut exact = false;
    while &hi - &lo > 1u32 {
      let mid: Natural = (&lo + &hi) >> 1u64;
      match compare_power(&candidate(&mid), n, &Dyadic::ONE, x) {
        Ordering::Greater => hi = mid,
        Ordering::Less => lo = mid,
        Ordering::Equal => { lo = mid; exact = true; break }
      }
    }
    let exact = exact || compare_power(&candidate(&lo), n, &Dyadic::ONE, x) == Ordering::Equal;
    self.round_sticky(false, lo, exact, lsb, rnd)
  }

  pub(crate) fn pow_num(self, a: &Num, n: u64, rnd: Round) -> (Num, Ordering) {
    let negative = a.is_sign_negative() && n % 2 == 1;
    match a {
      _ if n == 0 => (Num::Finite(Dyadic::ONE), Ordering::Equal),
      Num::Nan => (Num::Nan, Ordering::Equal),
      Num::Zero { .. } => (Num::Zero { negative }, Ordering::Equal),
      Num::Inf { .. } => (Num::Inf { negative }, Ordering::Equal),
      Num::Finite(x) => signed(negative, rnd, |rnd| self.pow_magnitude(&x.abs(), n, rnd)),
    }
  }

  /// The correctly rounded `x^n` for positive `x`.
  fn pow_magnitude(self, x: &Dyadic, n: u64, rnd: Round) -> (Num, Ordering) {
    // The result is in [2^(l × n), 2^((l + 1) × n)); settle overflow and underflow from that.
    let l = x.floor_log2() as i128;
    if l * n as i128 >= self.max_exp as i128 {
      return self.overflow(false, rnd)
    }
    if (l + 1) * n as i128 <= self.floor_exp() as i128 - 2 {
      // Below half the smallest value: round any representative of that range.
      return self.round(&Dyadic::power_of_2(self.floor_exp() - 3), rnd)
    }
    if x.mantissa().significant_bits().saturating_mul(n) <= EXACT_POW_BITS {
      return self.round(&x.pow(n), rnd)
    }
    let x = Num::Finite(x.clone());
    let mut w = self.precision + 2 * n.significant_bits() + 16;
    loop {
      let working = self.relaxed().with_precision(w);
      let (lo, exact) = working.pow_directed(&x, n, Round::Down);
      if exact {
        return self.round_num(&lo, rnd)
      }
      let (hi, _) = working.pow_directed(&x, n, Round::Up);
      let r = self.round_num(&lo, rnd).0;
      if self.round_num(&hi, rnd).0 == r {
        // lo < x^n < hi strictly here.
        if r.compare(&lo).is_some_and(|o| o != Ordering::Greater) {
          return (r, Ordering::Less)
        }
        if r.compare(&hi).is_some_and(|o| o != Ordering::Less) {
          return (r, Ordering::Greater)
        }
      }
      w *= 2;
      trace!("pow_u: {n}th power undecided, retrying at {w} bits");
    }
  }

  /// `x^n` for positive `x` by binary exponentiation, every step rounded in `rnd` (`Up` or `Down`),
  /// so the result bounds the exact power. Also returns whether no step was inexact, in which case
  /// the result *is* the exact power.
  pub(crate) fn pow_directed(self, x: &Num, n: u64, rnd: Round) -> (Num, bool) {
    let mut acc = Num::Finite(Dyadic::ONE);
    let mut square = x.clone();
    let mut exact = true;
    let mut n = n;
    loop {
      if n & 1 == 1 {
        let (r, status) = self.mul_num(&acc, &square, rnd);
        acc = r;
        exact &= status == Ordering::Equal;
      }
      n >>= 1;
      if n == 0 {
        return (acc, exact)
      }
      let (r, status) = self.mul_num(&square, &square, rnd);
      square = r;
      exact &= status == Ordering::Equal;
    }
  }
}

/// Compare `base^n × scale` against `other`, all positive, exactly.
///
/// Brackets the left side by directed binary exponentiation in a relaxed format, doubling the
/// working precision until the bracket excludes `other` (or is exact).
pub(crate) fn compare_power(base: &Dyadic, n: u64, scale: &Dyadic, other: &Dyadic) -> Ordering {
  debug_assert!(base.sign() == Ordering::Greater && scale.sign() == Ordering::Greater);
  let base = Num::Finite(base.clone());
  let scale = Num::Finite(scale.clone());
  let target = Num::Finite(other.clone());
  let mut w = 64 + 2 * n.significant_bits();
  loop {
    let working = Format::F64.relaxed().with_precision(w);
    let bound = |rnd: Round| {
      let (power, exact) = working.pow_directed(&base, n, rnd);
      let (value, status) = working.mul_num(&power, &scale, rnd);
      (value, exact && status == Ordering::Equal)
    };
    let (lo, exact) = bound(Round::Down);
    let below = lo.compare(&target).unwrap_or(Ordering::Equal);
    if exact {
      return below
    }
    if below != Ordering::Less {
      return Ordering::Greater
    }
    let (hi, _) = bound(Round::Up);
    if hi.compare(&target).unwrap_or(Ordering::Equal) != Ordering::Greater {
      return Ordering::Less
    }
    w *= 2;
    trace!("compare_power: {n}th power undecided, retrying at {w} bits");
  }
}
