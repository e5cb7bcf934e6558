use core::fmt;

use crate::cell::{Cell, StrFormat};
use crate::round::Round;
use crate::underlying::Native;

use super::{Flavor, mk_ops};

/// A bare interval of the flavor `F`: a closed, connected set of reals, possibly empty or
/// unbounded.
///
/// Operations whose point function is undefined somewhere on their inputs silently enclose the
/// image of the rest. Use [`DecoratedInterval`](super::DecoratedInterval) to find out when that
/// happened.
///
/// ```
/// # use p1788::{InfSup, Interval};
/// let x = Interval::<InfSup<f64>>::new(1.0, 2.0);
/// let y = Interval::new(-1.0, 4.0);
/// assert_eq!(&x * &y, Interval::new(-2.0, 8.0));
/// assert_eq!(x.to_string(), "[1, 2]");
/// assert_eq!((x / Interval::new(0.0, 0.0)).to_string(), "[empty]");
/// ```
pub struct Interval<F: Flavor> {
  pub(crate) repr: F::Repr,
}

impl<F: Flavor> Clone for Interval<F> {
  fn clone(&self) -> Self {
    Self { repr: self.repr.clone() }
  }
}

impl<F: Flavor> fmt::Debug for Interval<F> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("Interval").field(&self.repr).finish()
  }
}

/// Equality as sets.
impl<F: Flavor> PartialEq for Interval<F> {
  fn eq(&self, other: &Self) -> bool {
    F::is_equal(&self.repr, &other.repr)
  }
}

impl<F: Flavor> Interval<F> {
  pub(crate) fn from_repr(repr: F::Repr) -> Self {
    Self { repr }
  }

  /// `[lo, hi]`, or `None` unless `lo ≤ hi`, `lo < +∞` and `hi > -∞`.
  pub fn try_new(lo: F::Bound, hi: F::Bound) -> Option<Self> {
    F::new(lo, hi).map(Self::from_repr)
  }

  /// `[lo, hi]`, or the empty interval if that is not a valid interval (see [`Self::try_new`]).
  pub fn new(lo: F::Bound, hi: F::Bound) -> Self {
    Self::try_new(lo, hi).unwrap_or_else(Self::empty)
  }

  pub fn empty() -> Self {
    Self::from_repr(F::empty())
  }

  pub fn entire() -> Self {
    Self::from_repr(F::entire())
  }

  /// The lower bound (`+∞` if empty).
  pub fn inf(&self) -> F::Bound {
    F::inf(&self.repr)
  }

  /// The upper bound (`-∞` if empty).
  pub fn sup(&self) -> F::Bound {
    F::sup(&self.repr)
  }

  pub fn is_empty(&self) -> bool {
    F::is_empty(&self.repr)
  }

  pub fn is_entire(&self) -> bool {
    F::is_entire(&self.repr)
  }

  /// Nonempty and bounded.
  pub fn is_common(&self) -> bool {
    F::is_common(&self.repr)
  }

  pub fn subset(&self, other: &Self) -> bool {
    F::subset(&self.repr, &other.repr)
  }

  pub fn neg(&self) -> Self {
    Self::from_repr(F::neg(&self.repr))
  }

  pub fn add(&self, other: &Self) -> Self {
    Self::from_repr(F::add(&self.repr, &other.repr))
  }

  pub fn sub(&self, other: &Self) -> Self {
    Self::from_repr(F::sub(&self.repr, &other.repr))
  }

  pub fn mul(&self, other: &Self) -> Self {
    Self::from_repr(F::mul(&self.repr, &other.repr))
  }

  pub fn div(&self, other: &Self) -> Self {
    Self::from_repr(F::div(&self.repr, &other.repr).0)
  }

  pub fn recip(&self) -> Self {
    Self::from_repr(F::recip(&self.repr).0)
  }

  pub fn sqr(&self) -> Self {
    Self::from_repr(F::sqr(&self.repr))
  }

  pub fn sqrt(&self) -> Self {
    Self::from_repr(F::sqrt(&self.repr).0)
  }

  pub fn rootn(&self, k: i64) -> Self {
    Self::from_repr(F::rootn(&self.repr, k).0)
  }

  pub fn pown(&self, n: i32) -> Self {
    Self::from_repr(F::pown(&self.repr, n).0)
  }

  pub fn asin(&self) -> Self {
    Self::from_repr(F::asin(&self.repr).0)
  }

  pub fn acos(&self) -> Self {
    Self::from_repr(F::acos(&self.repr).0)
  }

  pub fn atan(&self) -> Self {
    Self::from_repr(F::atan(&self.repr))
  }

  /// Write `[lo, hi]` or `[empty]`, the bounds in general form rounded outward, with the
  /// formatter's precision as the number of significant digits (lossless by default).
  pub(crate) fn write_bounds(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.is_empty() {
      return f.write_str("[empty]")
    }
    let spec = StrFormat { precision: f.precision(), ..Default::default() };
    let lo = text(self.inf(), Round::Down, &spec);
    let hi = text(self.sup(), Round::Up, &spec);
    write!(f, "[{lo}, {hi}]")
  }
}

/// A bound as text, with zero unsigned.
fn text<T: Native>(x: T, rnd: Round, spec: &StrFormat) -> String {
  let x = if x == T::ZERO { T::ZERO } else { x };
  Cell::from_native(T::FORMAT, x, Round::Nearest).0.get_str(rnd, spec)
}

impl<F: Flavor> fmt::Display for Interval<F> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.write_bounds(f)
  }
}

mk_ops!{Interval}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::interval::InfSup;
  use crate::underlying::Sealed;

  type I = Interval<InfSup<f64>>;
  type I32 = Interval<InfSup<f32>>;

  const INF: f64 = f64::INFINITY;

  #[test]
  fn construction() {
    assert!(I::try_new(2.0, 1.0).is_none());
    assert!(I::new(2.0, 1.0).is_empty());
    assert!(I::new(f64::NAN, 1.0).is_empty());
    assert!(I::new(-INF, INF).is_entire());
    assert_eq!(I::empty().inf(), INF);
    assert_eq!(I::empty().sup(), -INF);
    assert!(I::new(1.0, 1.0).is_common());
    assert!(!I::new(1.0, INF).is_common());
    assert!(I::new(1.0, 2.0).subset(&I::new(0.0, 2.0)));
  }

  #[test]
  fn equality_is_as_sets() {
    assert_eq!(I::empty(), I::new(3.0, 2.0));
    assert_eq!(I::new(-0.0, 0.0), I::new(0.0, -0.0));
    assert_ne!(I::new(0.0, 1.0), I::empty());
  }

  #[test]
  fn operators() {
    let x = I::new(1.0, 2.0);
    let y = I::new(-3.0, 0.5);
    assert_eq!(&x + &y, I::new(-2.0, 2.5));
    assert_eq!(x.clone() - y.clone(), I::new(0.5, 5.0));
    assert_eq!(&x * y.clone(), I::new(-6.0, 1.0));
    assert_eq!(x.clone() / &y, I::entire());
    assert_eq!(-&y, I::new(-0.5, 3.0));
    assert_eq!(-x.clone(), I::new(-2.0, -1.0));
    assert_eq!(y.sqr(), I::new(0.0, 9.0));
    assert_eq!(I::new(-3.0, 0.25).sqrt(), I::new(0.0, 0.5));
    assert_eq!(I::new(2.0, 2.0).sqrt().sup(), Sealed::next_up(I::new(2.0, 2.0).sqrt().inf()));
    assert_eq!(I::new(4.0, 9.0).rootn(-2), I::new(1.0 / 3.0, 0.5));
    assert_eq!(x.pown(-1), x.recip());
  }

  #[test]
  fn display() {
    assert_eq!(I::new(1.0, 2.0).to_string(), "[1, 2]");
    assert_eq!(I::new(-0.0, 0.0).to_string(), "[0, 0]");
    assert_eq!(I::entire().to_string(), "[-inf, inf]");
    assert_eq!(I::empty().to_string(), "[empty]");
    // Rounded outward to three digits.
    assert_eq!(format!("{:.3}", I::new(1.0 / 3.0, 2.0 / 3.0)), "[0.333, 0.667]");
    assert_eq!(format!("{:.3}", I::new(-2.0 / 3.0, -1.0 / 3.0)), "[-0.667, -0.333]");
    assert_eq!(format!("{:.1}", I::new(0.1, 0.1)), "[0.1, 0.2]");
    assert_eq!(I32::new(0.1, 0.1).to_string(), "[0.100000001, 0.100000002]");
  }
}
