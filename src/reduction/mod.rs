//! Correctly rounded reductions over sequences of native values: sum, sum of absolute values, sum
//! of squares and dot product.
//!
//! Each input is first transformed into an *exact* term (a product of two `p`-bit values needs
//! `2p` bits, a plain value only `p`), all terms are summed exactly, and the total is rounded
//! once. The result is therefore the correctly rounded value of the mathematical reduction, not
//! of some sequence of pairwise floating point operations.
//!
//! ```
//! # use p1788::{Round, reduction};
//! // Pairwise, the 1.0 would be lost.
//! assert_eq!(reduction::sum(&[1e100, 1.0, -1e100], Round::Nearest), 1.0);
//! assert_eq!(reduction::dot(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0], Round::Nearest), 14.0);
//! ```

use core::cmp::Ordering;

use crate::cell::{Cell, Format, Num};
use crate::round::Round;
use crate::underlying::Native;

mod accumulate;
mod eft;

use accumulate::Accumulator;
pub use eft::{fast_two_sum, two_prod, two_sum};

/// A format that holds every product of two values of `format` exactly.
fn product_format(format: Format) -> Format {
  let floor = format.floor_exp();
  Format {
    precision: 2 * format.precision,
    min_exp: 2 * floor - 1,
    max_exp: 2 * format.max_exp,
    subnormal: false,
  }
}

/// Round an exact sum to `T`, with subnormals and the sign of zero as for every other
/// conversion.
fn finish<T: Native>((num, status): (Num, Ordering), rnd: Round) -> T {
  let mut cell = Cell::from_parts(T::FORMAT, num);
  let _ = cell.subnormalize(status, rnd);
  match cell.num() {
    Num::Zero { .. } => cell.get(rnd),
    _ => cell.to_native_exact(),
  }
}

/// The sum of two finite values in native arithmetic, in direction `rnd`, if it doesn't overflow.
///
/// Two-term sums are common (interval bounds, mostly), and need no big numbers: the rounded sum
/// and its error tell which neighbour is the correctly rounded result.
fn sum2<T: Native>(a: T, b: T, rnd: Round) -> Option<T> {
  let (s, e) = two_sum(a, b);
  if !s.is_finite() {
    return None
  }
  if s == T::ZERO {
    return Some(if rnd == Round::Down { T::NEG_ZERO } else { T::ZERO })
  }
  let up = e > T::ZERO;
  let down = e < T::ZERO;
  let towards_zero = if s > T::ZERO { down } else { up };
  let away = if s > T::ZERO { up } else { down };
  Some(match rnd {
    Round::Nearest => s,
    Round::Up if up => s.next_up(),
    Round::Down if down => s.next_down(),
    Round::TowardZero if towards_zero => if s > T::ZERO { s.next_down() } else { s.next_up() },
    Round::AwayFromZero if away => if s > T::ZERO { s.next_up() } else { s.next_down() },
    _ => s,
  })
}

/// Sum the exact terms `xs`, rounding only the total to `T`.
fn reduce<T: Native>(xs: impl ExactSizeIterator<Item = Num>, rnd: Round) -> T {
  let mut acc = Accumulator::with_capacity(xs.len());
  for term in xs {
    acc.push(term);
  }
  finish(acc.sum(T::FORMAT, rnd), rnd)
}

/// `Σ xs`, correctly rounded in direction `rnd`.
///
/// NaN if any element is NaN, or if there are infinities of both signs. The sum of an empty
/// sequence is zero.
pub fn sum<T: Native>(xs: &[T], rnd: Round) -> T {
  if let [a, b] = *xs {
    if a.is_finite() && b.is_finite() {
      if let Some(s) = sum2(a, b, rnd) {
        return s
      }
    }
  }
  reduce::<T>(xs.iter().map(|x| x.decompose()), rnd)
}

/// `Σ |xs|`, correctly rounded in direction `rnd`. Any infinite element makes it `+∞`.
pub fn sum_abs<T: Native>(xs: &[T], rnd: Round) -> T {
  reduce::<T>(xs.iter().map(|x| x.decompose().abs()), rnd)
}

/// `Σ xs²`, correctly rounded in direction `rnd`.
pub fn sum_sqr<T: Native>(xs: &[T], rnd: Round) -> T {
  let format = product_format(T::FORMAT);
  let terms = xs.iter().map(|x| {
    let x = x.decompose();
    format.mul_num(&x, &x, Round::Nearest).0
  });
  reduce::<T>(terms, rnd)
}

/// `Σ xs[i] × ys[i]`, correctly rounded in direction `rnd`.
///
/// NaN if the sequences have different lengths, if any product is NaN (including `0 × ∞`), or if
/// there are infinite products of both signs.
pub fn dot<T: Native>(xs: &[T], ys: &[T], rnd: Round) -> T {
  if xs.len() != ys.len() {
    return T::NAN
  }
  let format = product_format(T::FORMAT);
  let terms = xs.iter().zip(ys).map(|(x, y)| {
    let (product, status) = format.mul_num(&x.decompose(), &y.decompose(), Round::Nearest);
    debug_assert_eq!(status, Ordering::Equal);
    product
  });
  reduce::<T>(terms, rnd)
}
