//! Bare and decorated intervals.
//!
//! The interval types are generic over a [`Flavor`]: the representation of a bare interval and
//! the arithmetic on its bounds. [`Interval`] is a thin wrapper that hides which operations were
//! only partially defined on their inputs; [`DecoratedInterval`] turns exactly that information
//! into a [`Decoration`](crate::Decoration). The flavor is a type parameter, so dispatch is
//! static, and mixing bare and decorated operands in one expression does not type check.
//!
//! [`InfSup`] is the usual flavor: an interval is its pair of bounds in a native float type, each
//! rounded outward by the correctly rounded kernels of [`Format`](crate::Format).

use crate::underlying::Native;

mod infsup;
mod bare;
mod decorated;

pub use crate::decoration::Domain;
pub use bare::Interval;
pub use decorated::DecoratedInterval;
pub use infsup::{InfSup, InfSupRepr};

/// The representation of bare intervals and their arithmetic.
///
/// Operations that are defined everywhere return only the result. Those that aren't (division,
/// roots, negative powers, the inverse sines) also return whether any point of their inputs was
/// outside the domain of the point function ([`Domain::Restricted`]); the result then encloses the
/// image of the part of the inputs that is in the domain. Every result of an operation involving
/// the empty interval is empty (with [`Domain::Total`]).
pub trait Flavor {
  /// The type of the bounds.
  type Bound: Native;
  /// A bare interval.
  type Repr: Clone + core::fmt::Debug;

  /// The interval `[lo, hi]`, or `None` unless `lo ≤ hi`, `lo < +∞` and `hi > -∞`.
  fn new(lo: Self::Bound, hi: Self::Bound) -> Option<Self::Repr>;
  fn empty() -> Self::Repr;
  fn entire() -> Self::Repr;

  /// The lower bound: `+∞` for the empty interval, `-0` rather than `+0`.
  fn inf(x: &Self::Repr) -> Self::Bound;
  /// The upper bound: `-∞` for the empty interval, `+0` rather than `-0`.
  fn sup(x: &Self::Repr) -> Self::Bound;

  fn is_empty(x: &Self::Repr) -> bool;
  fn is_entire(x: &Self::Repr) -> bool;
  /// Nonempty and bounded.
  fn is_common(x: &Self::Repr) -> bool;
  /// Same set of reals.
  fn is_equal(x: &Self::Repr, y: &Self::Repr) -> bool;
  /// `x ⊆ y`.
  fn subset(x: &Self::Repr, y: &Self::Repr) -> bool;

  fn neg(x: &Self::Repr) -> Self::Repr;
  fn add(x: &Self::Repr, y: &Self::Repr) -> Self::Repr;
  fn sub(x: &Self::Repr, y: &Self::Repr) -> Self::Repr;
  fn mul(x: &Self::Repr, y: &Self::Repr) -> Self::Repr;
  fn sqr(x: &Self::Repr) -> Self::Repr;
  fn atan(x: &Self::Repr) -> Self::Repr;

  fn div(x: &Self::Repr, y: &Self::Repr) -> (Self::Repr, Domain);
  fn recip(x: &Self::Repr) -> (Self::Repr, Domain);
  fn sqrt(x: &Self::Repr) -> (Self::Repr, Domain);
  /// `x^(1/k)`, for any integer `k` (`k = 0` is nowhere defined).
  fn rootn(x: &Self::Repr, k: i64) -> (Self::Repr, Domain);
  /// `x^n`, with `x^0 = 1` everywhere.
  fn pown(x: &Self::Repr, n: i32) -> (Self::Repr, Domain);
  fn asin(x: &Self::Repr) -> (Self::Repr, Domain);
  fn acos(x: &Self::Repr) -> (Self::Repr, Domain);
}

/// Implement the arithmetic operator traits for all combinations of values and references, in
/// terms of inherent methods taking `&self`.
macro_rules! mk_ops {
  ($type:ident, $trait:ident, $name:ident) => {
    impl<F: Flavor> core::ops::$trait<$type<F>> for $type<F> {
      type Output = $type<F>;

      #[inline]
      fn $name(self, rhs: $type<F>) -> Self::Output { $type::$name(&self, &rhs) }
    }

    impl<F: Flavor> core::ops::$trait<&$type<F>> for $type<F> {
      type Output = $type<F>;

      #[inline]
      fn $name(self, rhs: &$type<F>) -> Self::Output { $type::$name(&self, rhs) }
    }

    impl<F: Flavor> core::ops::$trait<$type<F>> for &$type<F> {
      type Output = $type<F>;

      #[inline]
      fn $name(self, rhs: $type<F>) -> Self::Output { $type::$name(self, &rhs) }
    }

    impl<F: Flavor> core::ops::$trait<&$type<F>> for &$type<F> {
      type Output = $type<F>;

      #[inline]
      fn $name(self, rhs: &$type<F>) -> Self::Output { $type::$name(self, rhs) }
    }
  };
  ($type:ident) => {
    mk_ops!{$type, Add, add}
    mk_ops!{$type, Sub, sub}
    mk_ops!{$type, Mul, mul}
    mk_ops!{$type, Div, div}

    impl<F: Flavor> core::ops::Neg for $type<F> {
      type Output = $type<F>;

      #[inline]
      fn neg(self) -> Self::Output { $type::neg(&self) }
    }

    impl<F: Flavor> core::ops::Neg for &$type<F> {
      type Output = $type<F>;

      #[inline]
      fn neg(self) -> Self::Output { $type::neg(self) }
    }
  };
}

pub(crate) use mk_ops;
