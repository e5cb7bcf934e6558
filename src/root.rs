//! The `k`th root of a cell for any integer `k`, negative ones included.
//!
//! `x^(1/k)` for `k < 0` is `1 / x^(1/|k|)`, but taking the root and then the reciprocal rounds
//! twice. Instead the double rounding only supplies a first guess, a unit or two away from the
//! answer, which is then moved one representable value at a time until raising it to the `|k|`th
//! power and comparing against `x`, exactly, shows it is the correctly rounded root.

use core::cmp::Ordering;

use log::debug;

use crate::cell::{Cell, Format, Num, compare_power};
use crate::dyadic::Dyadic;
use crate::round::Round;

/// `x^(1/k)`, correctly rounded to `format` in direction `rnd`, subnormals included (the result is
/// final; there is no need to call [`Cell::subnormalize`] on it).
///
///   - `k ≥ 1` is [`Format::rootn`], `k = -1` is [`Format::recip`], and `k = -2` is
///     [`Format::rec_sqrt`].
///   - `k = 0` is NaN.
///   - For `k ≤ -3`, with `n = |k|`: the root of `±0` is `+∞`, except that of `-0` for odd `n`,
///     which is `-∞`; the root of `+∞` is `+0`, that of `-∞` is `-0` for odd `n` and NaN for
///     even `n`; negative values have odd roots only.
///
/// ```
/// # use p1788::{Cell, Format, Round, root};
/// let x = Cell::from_native(Format::F64, 8.0, Round::Nearest).0;
/// let (y, status) = root(&x, -3, Format::F64, Round::Down);
/// assert_eq!(y.get::<f64>(Round::Nearest), 0.5);
/// assert_eq!(status, core::cmp::Ordering::Equal);
/// ```
pub fn root(op: &Cell, k: i64, format: Format, rnd: Round) -> (Cell, Ordering) {
  let (mut y, status) = match k {
    0.. => format.rootn(op, k as u64, rnd),
    -1 => format.recip(op, rnd),
    -2 => format.rec_sqrt(op, rnd),
    _ => {
      let (num, status) = reciprocal_root(op.num(), k.unsigned_abs(), format, rnd);
      (Cell::from_parts(format, num), status)
    }
  };
  let status = y.subnormalize(status, rnd);
  (y, status)
}

/// `x^(-1/n)` for `n ≥ 3`, at full precision.
fn reciprocal_root(x: &Num, n: u64, format: Format, rnd: Round) -> (Num, Ordering) {
  let odd = n % 2 == 1;
  match x {
    Num::Nan => (Num::Nan, Ordering::Equal),
    Num::Zero { negative } => (Num::Inf { negative: *negative && odd }, Ordering::Equal),
    Num::Inf { negative: false } => (Num::Zero { negative: false }, Ordering::Equal),
    Num::Inf { negative: true } =>
      (if odd { Num::Zero { negative: true } } else { Num::Nan }, Ordering::Equal),
    Num::Finite(x) if x.is_negative() => {
      if !odd {
        return (Num::Nan, Ordering::Equal)
      }
      let (num, status) = positive(&x.abs(), n, format, rnd.mirrored());
      (num.neg(), status.reverse())
    }
    Num::Finite(x) => positive(x, n, format, rnd),
  }
}

/// The neighbour of nonzero `r` above (`up`) or below it, at full precision in a relaxed format.
fn step(working: Format, r: &Dyadic, up: bool) -> Dyadic {
  let tiny = Dyadic::power_of_2(r.floor_log2() - working.precision as i64 - 2);
  let (num, _) = if up {
    working.round(&r.add(&tiny), Round::Up)
  } else {
    working.round(&r.sub(&tiny), Round::Down)
  };
  // A relaxed format neither overflows nor underflows here.
  num.to_dyadic().unwrap_or_else(|| r.clone())
}

fn midpoint(a: &Dyadic, b: &Dyadic) -> Dyadic {
  a.add(b).mul_pow2(-1)
}

/// `x^(-1/n)` for positive `x`.
fn positive(x: &Dyadic, n: u64, format: Format, rnd: Round) -> (Num, Ordering) {
  // The result is positive, so only two directions are left.
  let rnd = match rnd {
    Round::TowardZero => Round::Down,
    Round::AwayFromZero => Round::Up,
    other => other,
  };
  let working = format.relaxed();
  let x_num = Num::Finite(x.clone());
  let (y, _) = working.rootn_num(&x_num, n, rnd.opposite());
  let (guess, _) = working.div_num(&Num::Finite(Dyadic::ONE), &y, rnd);
  let Some(mut r) = guess.to_dyadic() else {
    return (Num::Nan, Ordering::Equal)
  };

  // Ordering of r against the true root: r^n × x against 1.
  let against_root = |r: &Dyadic| compare_power(r, n, x, &Dyadic::ONE);
  let mut steps = 0u32;
  match rnd {
    Round::Down => {
      while against_root(&r) == Ordering::Greater {
        r = step(working, &r, false);
        steps += 1;
      }
      loop {
        let next = step(working, &r, true);
        if against_root(&next) == Ordering::Greater {
          break
        }
        r = next;
        steps += 1;
      }
    }
    Round::Up => {
      while against_root(&r) == Ordering::Less {
        r = step(working, &r, true);
        steps += 1;
      }
      loop {
        let next = step(working, &r, false);
        if against_root(&next) == Ordering::Less {
          break
        }
        r = next;
        steps += 1;
      }
    }
    _ => {
      // No midpoint is ever the exact root, which would make x^-1 a power of an odd mantissa.
      loop {
        let next = step(working, &r, true);
        if against_root(&midpoint(&r, &next)) != Ordering::Less {
          break
        }
        r = next;
        steps += 1;
      }
      loop {
        let prev = step(working, &r, false);
        if against_root(&midpoint(&prev, &r)) != Ordering::Greater {
          break
        }
        r = prev;
        steps += 1;
      }
    }
  }
  if steps > 1 {
    debug!("root: first guess for the {n}th reciprocal root was {steps} steps away");
  }
  let status = against_root(&r);
  format.round_hinted(&r, rnd, status)
}
