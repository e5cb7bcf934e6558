use core::cmp::Ordering;
use core::marker::PhantomData;

use crate::argument;
use crate::cell::{Cell, Format};
use crate::root::root;
use crate::round::Round;
use crate::underlying::Native;

use super::{Domain, Flavor};

/// The inf-sup flavor over the native type `T`: a nonempty interval is its pair of bounds
/// `lo ≤ hi`, with `lo < +∞` and `hi > -∞`, and the empty interval has NaN bounds.
///
/// Bounds of results are the exact bounds rounded outward, lower bounds down and upper bounds up,
/// each rounded once.
#[derive(Clone, Copy, Debug, Default)]
pub struct InfSup<T>(PhantomData<T>);

/// A bare interval of the [`InfSup`] flavor. A lower bound of zero is always `-0` and an upper
/// bound of zero always `+0`.
#[derive(Clone, Copy, Debug)]
pub struct InfSupRepr<T> {
  lo: T,
  hi: T,
}

/// The exact value of a bound, as a cell of its own format.
fn cell<T: Native>(x: T) -> Cell {
  Cell::from_native(T::FORMAT, x, Round::Nearest).0
}

/// Finish a full-precision result and round it to `T`, both in direction `rnd`.
fn bound<T: Native>((mut y, status): (Cell, Ordering), rnd: Round) -> T {
  let _ = y.subnormalize(status, rnd);
  y.get(rnd)
}

fn min<T: Native>(a: T, b: T) -> T {
  if b < a { b } else { a }
}

fn max<T: Native>(a: T, b: T) -> T {
  if b > a { b } else { a }
}

/// `[lo, hi]` with the signs of zero bounds normalised.
fn interval<T: Native>(lo: T, hi: T) -> InfSupRepr<T> {
  let lo = if lo == T::ZERO { T::NEG_ZERO } else { lo };
  let hi = if hi == T::ZERO { T::ZERO } else { hi };
  InfSupRepr { lo, hi }
}

fn empty<T: Native>() -> InfSupRepr<T> {
  InfSupRepr { lo: T::NAN, hi: T::NAN }
}

fn entire<T: Native>() -> InfSupRepr<T> {
  InfSupRepr { lo: T::NEG_INFINITY, hi: T::INFINITY }
}

/// The image of `x` under a nondecreasing `g(v, rnd)`.
fn increasing<T: Native>(x: &InfSupRepr<T>, g: impl Fn(T, Round) -> T) -> InfSupRepr<T> {
  interval(g(x.lo, Round::Down), g(x.hi, Round::Up))
}

/// The image of `x` under a nonincreasing `g(v, rnd)`.
fn decreasing<T: Native>(x: &InfSupRepr<T>, g: impl Fn(T, Round) -> T) -> InfSupRepr<T> {
  interval(g(x.hi, Round::Down), g(x.lo, Round::Up))
}

/// The image of `x` under an even `g(v, rnd)` that is nondecreasing in `|v|`.
fn even<T: Native>(x: &InfSupRepr<T>, g: impl Fn(T, Round) -> T) -> InfSupRepr<T> {
  let (a, b) = (x.lo, x.hi);
  if a >= T::ZERO {
    interval(g(a, Round::Down), g(b, Round::Up))
  } else if b <= T::ZERO {
    interval(g(b, Round::Down), g(a, Round::Up))
  } else {
    interval(g(T::ZERO, Round::Down), max(g(a, Round::Up), g(b, Round::Up)))
  }
}

/// The image of `x` under an odd `g(v, rnd)` with a pole at zero, nonincreasing on either side of
/// it and tending to `±∞` as `v → ±0`, like `1/v`.
fn odd_pole<T: Native>(x: &InfSupRepr<T>, g: impl Fn(T, Round) -> T) -> (InfSupRepr<T>, Domain) {
  let (a, b) = (x.lo, x.hi);
  let zero = T::ZERO;
  if a > zero || b < zero {
    return (decreasing(x, g), Domain::Total)
  }
  let result = if a == zero && b == zero {
    empty()
  } else if a == zero {
    interval(g(b, Round::Down), T::INFINITY)
  } else if b == zero {
    interval(T::NEG_INFINITY, g(a, Round::Up))
  } else {
    entire()
  };
  (result, Domain::Restricted)
}

/// The image of `x` under an even `g(v, rnd)` with a pole at zero, nonincreasing in `|v|` and
/// tending to `+∞` as `v → 0`, like `1/v²`.
fn even_pole<T: Native>(x: &InfSupRepr<T>, g: impl Fn(T, Round) -> T) -> (InfSupRepr<T>, Domain) {
  let (a, b) = (x.lo, x.hi);
  let zero = T::ZERO;
  if a > zero {
    return (decreasing(x, g), Domain::Total)
  }
  if b < zero {
    return (increasing(x, g), Domain::Total)
  }
  let result = if a == zero && b == zero {
    empty()
  } else if a == zero {
    interval(g(b, Round::Down), T::INFINITY)
  } else if b == zero {
    interval(g(a, Round::Down), T::INFINITY)
  } else {
    interval(min(g(a, Round::Down), g(b, Round::Down)), T::INFINITY)
  };
  (result, Domain::Restricted)
}

/// `x ∩ [lo, hi]`, and whether that dropped any point of `x`.
fn clamp<T: Native>(x: &InfSupRepr<T>, lo: T, hi: T) -> (InfSupRepr<T>, Domain) {
  let domain = if x.lo < lo || x.hi > hi { Domain::Restricted } else { Domain::Total };
  let (a, b) = (max(x.lo, lo), min(x.hi, hi));
  (if a <= b { interval(a, b) } else { empty() }, domain)
}

fn product<T: Native>(a: T, b: T, rnd: Round) -> T {
  // Within intervals, 0 × ∞ is 0.
  if a == T::ZERO || b == T::ZERO {
    return if rnd == Round::Down { T::NEG_ZERO } else { T::ZERO }
  }
  bound(T::FORMAT.mul(&cell(a), &cell(b), rnd), rnd)
}

fn quotient<T: Native>(a: T, b: T, rnd: Round) -> T {
  bound(T::FORMAT.div(&cell(a), &cell(b), rnd), rnd)
}

/// A correctly rounded elementary function of one bound.
fn elementary<T: Native>(f: argument::ElementaryFn) -> impl Fn(T, Round) -> T {
  move |v, rnd| bound(f(&cell(v), T::FORMAT, rnd), rnd)
}

/// `v^(-m)` rounded outward: the power is rounded the other way in a wider format without range
/// limits, then inverted.
fn negative_power<T: Native>(m: u64) -> impl Fn(T, Round) -> T {
  let format: Format = T::FORMAT;
  let working = format.relaxed().with_precision(2 * format.precision + 8);
  move |v, rnd| {
    let (p, _) = working.pow_u(&cell(v), m, rnd.opposite());
    bound(format.recip(&p, rnd), rnd)
  }
}

impl<T: Native> Flavor for InfSup<T> {
  type Bound = T;
  type Repr = InfSupRepr<T>;

  fn new(lo: T, hi: T) -> Option<Self::Repr> {
    (lo <= hi && lo != T::INFINITY && hi != T::NEG_INFINITY).then(|| interval(lo, hi))
  }

  fn empty() -> Self::Repr {
    empty()
  }

  fn entire() -> Self::Repr {
    entire()
  }

  fn inf(x: &Self::Repr) -> T {
    if x.lo.is_nan() { T::INFINITY } else { x.lo }
  }

  fn sup(x: &Self::Repr) -> T {
    if x.hi.is_nan() { T::NEG_INFINITY } else { x.hi }
  }

  fn is_empty(x: &Self::Repr) -> bool {
    x.lo.is_nan()
  }

  fn is_entire(x: &Self::Repr) -> bool {
    x.lo == T::NEG_INFINITY && x.hi == T::INFINITY
  }

  fn is_common(x: &Self::Repr) -> bool {
    x.lo.is_finite() && x.hi.is_finite()
  }

  fn is_equal(x: &Self::Repr, y: &Self::Repr) -> bool {
    match (Self::is_empty(x), Self::is_empty(y)) {
      (false, false) => x.lo == y.lo && x.hi == y.hi,
      (e, f) => e && f,
    }
  }

  fn subset(x: &Self::Repr, y: &Self::Repr) -> bool {
    Self::is_empty(x) || (!Self::is_empty(y) && y.lo <= x.lo && x.hi <= y.hi)
  }

  fn neg(x: &Self::Repr) -> Self::Repr {
    if Self::is_empty(x) { empty() } else { interval(-x.hi, -x.lo) }
  }

  fn add(x: &Self::Repr, y: &Self::Repr) -> Self::Repr {
    if Self::is_empty(x) || Self::is_empty(y) {
      return empty()
    }
    let f = T::FORMAT;
    interval(
      bound(f.add(&cell(x.lo), &cell(y.lo), Round::Down), Round::Down),
      bound(f.add(&cell(x.hi), &cell(y.hi), Round::Up), Round::Up),
    )
  }

  fn sub(x: &Self::Repr, y: &Self::Repr) -> Self::Repr {
    if Self::is_empty(x) || Self::is_empty(y) {
      return empty()
    }
    let f = T::FORMAT;
    interval(
      bound(f.sub(&cell(x.lo), &cell(y.hi), Round::Down), Round::Down),
      bound(f.sub(&cell(x.hi), &cell(y.lo), Round::Up), Round::Up),
    )
  }

  fn mul(x: &Self::Repr, y: &Self::Repr) -> Self::Repr {
    if Self::is_empty(x) || Self::is_empty(y) {
      return empty()
    }
    let corners = [(x.lo, y.lo), (x.lo, y.hi), (x.hi, y.lo), (x.hi, y.hi)];
    let lo = corners.iter().map(|&(a, b)| product(a, b, Round::Down)).fold(T::INFINITY, min);
    let hi = corners.iter().map(|&(a, b)| product(a, b, Round::Up)).fold(T::NEG_INFINITY, max);
    interval(lo, hi)
  }

  fn sqr(x: &Self::Repr) -> Self::Repr {
    if Self::is_empty(x) {
      return empty()
    }
    even(x, |v, rnd| bound(T::FORMAT.sqr(&cell(v), rnd), rnd))
  }

  fn atan(x: &Self::Repr) -> Self::Repr {
    if Self::is_empty(x) {
      return empty()
    }
    increasing(x, elementary(argument::atan))
  }

  fn div(x: &Self::Repr, y: &Self::Repr) -> (Self::Repr, Domain) {
    if Self::is_empty(x) || Self::is_empty(y) {
      return (empty(), Domain::Total)
    }
    let (a, b, c, d) = (x.lo, x.hi, y.lo, y.hi);
    let zero = T::ZERO;
    let (down, up) = (Round::Down, Round::Up);
    if c > zero {
      let result = if a >= zero {
        interval(quotient(a, d, down), quotient(b, c, up))
      } else if b <= zero {
        interval(quotient(a, c, down), quotient(b, d, up))
      } else {
        interval(quotient(a, c, down), quotient(b, c, up))
      };
      return (result, Domain::Total)
    }
    if d < zero {
      let result = if a >= zero {
        interval(quotient(b, d, down), quotient(a, c, up))
      } else if b <= zero {
        interval(quotient(b, c, down), quotient(a, d, up))
      } else {
        interval(quotient(b, d, down), quotient(a, d, up))
      };
      return (result, Domain::Total)
    }
    // Zero is in y from here on.
    let result = if c == zero && d == zero {
      empty()
    } else if a == zero && b == zero {
      interval(zero, zero)
    } else if (a < zero && b > zero) || (c < zero && d > zero) {
      entire()
    } else if a >= zero {
      if c == zero {
        interval(quotient(a, d, down), T::INFINITY)
      } else {
        interval(T::NEG_INFINITY, quotient(a, c, up))
      }
    } else if c == zero {
      interval(T::NEG_INFINITY, quotient(b, d, up))
    } else {
      interval(quotient(b, c, down), T::INFINITY)
    };
    (result, Domain::Restricted)
  }

  fn recip(x: &Self::Repr) -> (Self::Repr, Domain) {
    if Self::is_empty(x) {
      return (empty(), Domain::Total)
    }
    odd_pole(x, |v, rnd| bound(T::FORMAT.recip(&cell(v), rnd), rnd))
  }

  fn sqrt(x: &Self::Repr) -> (Self::Repr, Domain) {
    if Self::is_empty(x) {
      return (empty(), Domain::Total)
    }
    let (x, domain) = clamp(x, T::ZERO, T::INFINITY);
    if Self::is_empty(&x) {
      return (x, domain)
    }
    (increasing(&x, |v, rnd| bound(T::FORMAT.sqrt(&cell(v), rnd), rnd)), domain)
  }

  fn rootn(x: &Self::Repr, k: i64) -> (Self::Repr, Domain) {
    if Self::is_empty(x) {
      return (empty(), Domain::Total)
    }
    let g = |v: T, rnd: Round| root(&cell(v), k, T::FORMAT, rnd).0.get::<T>(rnd);
    let odd = k % 2 != 0;
    match k {
      0 => (empty(), Domain::Restricted),
      1.. if odd => (increasing(x, g), Domain::Total),
      1.. => {
        let (x, domain) = clamp(x, T::ZERO, T::INFINITY);
        if Self::is_empty(&x) {
          return (x, domain)
        }
        (increasing(&x, g), domain)
      }
      _ if odd => odd_pole(x, g),
      _ => {
        // Defined on (0, +∞] only.
        if x.hi <= T::ZERO {
          (empty(), Domain::Restricted)
        } else if x.lo <= T::ZERO {
          (interval(g(x.hi, Round::Down), T::INFINITY), Domain::Restricted)
        } else {
          (decreasing(x, g), Domain::Total)
        }
      }
    }
  }

  fn pown(x: &Self::Repr, n: i32) -> (Self::Repr, Domain) {
    if Self::is_empty(x) {
      return (empty(), Domain::Total)
    }
    let m = n.unsigned_abs() as u64;
    let odd = m % 2 == 1;
    match n {
      0 => (interval(T::ONE, T::ONE), Domain::Total),
      1.. => {
        let g = |v: T, rnd: Round| bound(T::FORMAT.pow_u(&cell(v), m, rnd), rnd);
        (if odd { increasing(x, g) } else { even(x, g) }, Domain::Total)
      }
      _ if odd => odd_pole(x, negative_power(m)),
      _ => even_pole(x, negative_power(m)),
    }
  }

  fn asin(x: &Self::Repr) -> (Self::Repr, Domain) {
    if Self::is_empty(x) {
      return (empty(), Domain::Total)
    }
    let (x, domain) = clamp(x, -T::ONE, T::ONE);
    if Self::is_empty(&x) {
      return (x, domain)
    }
    (increasing(&x, elementary(argument::asin)), domain)
  }

  fn acos(x: &Self::Repr) -> (Self::Repr, Domain) {
    if Self::is_empty(x) {
      return (empty(), Domain::Total)
    }
    let (x, domain) = clamp(x, -T::ONE, T::ONE);
    if Self::is_empty(&x) {
      return (x, domain)
    }
    (decreasing(&x, elementary(argument::acos)), domain)
  }
}
