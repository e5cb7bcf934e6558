use core::cmp::Ordering;

use malachite::Integer;
use malachite::base::num::arithmetic::traits::Parity as _;

use crate::cell::{Cell, Format, Num};
use crate::dyadic::Dyadic;
use crate::round::Round;

use super::ElementaryFn;
use super::pi::pi_bracket;
use super::ziv::ziv;

/// How the branches of an inverse trigonometric function repeat, which fixes the sign and the
/// multiple of π of branch `k` in [`reflect`].
#[derive(Clone, Copy, Debug)]
#[derive(PartialEq, Eq, Hash)]
pub enum Parity {
  /// Branch `k` is `(-1)^k f(x) + kπ`, as for `asin`.
  Odd,
  /// Branch `k` is `(-1)^k f(x) + 2⌈k/2⌉π`, as for `acos`.
  Even,
  /// Branch `k` is `f(x) + kπ`, as for `atan`.
  Periodic,
}

impl Parity {
  /// The sign and multiple of π of branch `k`.
  fn branch(self, k: &Integer) -> (bool, Integer) {
    let odd = k.odd();
    match self {
      Parity::Odd => (odd, k.clone()),
      Parity::Even => (odd, if odd { k + Integer::from(1) } else { k.clone() }),
      Parity::Periodic => (false, k.clone()),
    }
  }
}

/// Branch `k` of the inverse function `f` (see [`Parity`]) at `op`, correctly rounded to `format`
/// in direction `rnd`. NaN if `f(op)` is.
///
/// If the branch has no multiple of π, this is `±f(op)` directly, the negative sign being had by
/// rounding `f` in the mirrored direction and negating. Otherwise `f(op)` is bracketed by rounding
/// it down and up at a working precision, and so is π, and the precision doubles until both ends
/// of the combined bracket round alike. The multiple of π can be arbitrarily large.
///
/// ```
/// # use p1788::{Cell, Format, Round};
/// # use p1788::argument::{Parity, asin, reflect};
/// # use malachite::Integer;
/// // The second branch of asin at 1 is π - π/2.
/// let one = Cell::from_native(Format::F64, 1.0, Round::Nearest).0;
/// let (y, _) = reflect(&one, asin, Parity::Odd, &Integer::from(1), Format::F64, Round::Nearest);
/// assert_eq!(y.get::<f64>(Round::Nearest), core::f64::consts::FRAC_PI_2);
/// ```
pub fn reflect(
  op: &Cell,
  f: ElementaryFn,
  parity: Parity,
  k: &Integer,
  format: Format,
  rnd: Round,
) -> (Cell, Ordering) {
  let (negate, c) = parity.branch(k);
  if c == 0u32 {
    if negate {
      let (y, status) = f(op, format, rnd.mirrored());
      return (y.neg(), status.reverse())
    }
    return f(op, format, rnd)
  }
  let c = Dyadic::from(c);
  ziv(format, rnd, format.precision + 24, "reflect", |w| {
    let working = format.relaxed().with_precision(w);
    let (lo, _) = f(op, working, Round::Down);
    let (hi, _) = f(op, working, Round::Up);
    let (lo, hi) = match (lo.into_num(), hi.into_num()) {
      (Num::Nan, _) | (_, Num::Nan) => return None,
      (lo, hi) => (lo.to_dyadic()?, hi.to_dyadic()?),
    };
    let (lo, hi) = if negate { (-hi, -lo) } else { (lo, hi) };
    let (pi_lo, pi_hi) = pi_bracket(w + c.floor_log2().max(0) as u64);
    let (pi_lo, pi_hi) = if c.is_negative() { (c.mul(&pi_hi), c.mul(&pi_lo)) } else { (c.mul(&pi_lo), c.mul(&pi_hi)) };
    Some((lo.add(&pi_lo), hi.add(&pi_hi)))
  })
}
