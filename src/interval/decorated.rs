use core::fmt;

use crate::decoration::{Decoration, Domain};

use super::{Flavor, Interval, mk_ops};

/// A bare interval together with a [`Decoration`], or NaI (Not an Interval).
///
/// Every operation combines the decorations of its operands with what happened during the
/// operation itself, per [`Decoration::propagate`], and then weakens the result to what its
/// interval admits ([`Decoration::fit`]). NaI is absorbing.
///
/// ```
/// # use p1788::{DecoratedInterval, Decoration, InfSup};
/// type D = DecoratedInterval<InfSup<f64>>;
/// let x = D::new(1.0, 2.0);
/// assert_eq!(x.decoration(), Decoration::Com);
/// assert_eq!((&x / &D::new(0.0, 1.0)).decoration(), Decoration::Def);
/// assert_eq!(D::new(2.0, 1.0).to_string(), "[nai]");
/// ```
pub struct DecoratedInterval<F: Flavor> {
  state: State<F>,
}

enum State<F: Flavor> {
  Nai,
  Value(Interval<F>, Decoration),
}

impl<F: Flavor> Clone for DecoratedInterval<F> {
  fn clone(&self) -> Self {
    let state = match &self.state {
      State::Nai => State::Nai,
      State::Value(x, d) => State::Value(x.clone(), *d),
    };
    Self { state }
  }
}

impl<F: Flavor> fmt::Debug for DecoratedInterval<F> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.state {
      State::Nai => f.write_str("NaI"),
      State::Value(x, d) => f.debug_tuple("DecoratedInterval").field(x).field(d).finish(),
    }
  }
}

/// Same interval and same decoration; NaI equals itself.
impl<F: Flavor> PartialEq for DecoratedInterval<F> {
  fn eq(&self, other: &Self) -> bool {
    match (&self.state, &other.state) {
      (State::Nai, State::Nai) => true,
      (State::Value(x, d), State::Value(y, e)) => x == y && d == e,
      _ => false,
    }
  }
}

impl<F: Flavor> DecoratedInterval<F> {
  /// `[lo, hi]` decorated `com` if bounded and `dac` if not; NaI if `[lo, hi]` isn't a valid
  /// interval.
  pub fn new(lo: F::Bound, hi: F::Bound) -> Self {
    match Interval::try_new(lo, hi) {
      Some(x) => Self::from_interval(x),
      None => Self::nai(),
    }
  }

  /// The strongest decoration `x` admits: `com` if bounded, `dac` if not, `trv` if empty.
  pub fn from_interval(x: Interval<F>) -> Self {
    let d = Decoration::Com.fit(x.is_empty(), x.is_common());
    Self { state: State::Value(x, d) }
  }

  /// `x` decorated `d`, or NaI if `x` doesn't admit `d` (see [`Decoration::admits`]).
  pub fn with_decoration(x: Interval<F>, d: Decoration) -> Self {
    if d.admits(x.is_empty(), x.is_common()) {
      Self { state: State::Value(x, d) }
    } else {
      Self::nai()
    }
  }

  pub fn nai() -> Self {
    Self { state: State::Nai }
  }

  pub fn empty() -> Self {
    Self::from_interval(Interval::empty())
  }

  pub fn entire() -> Self {
    Self::from_interval(Interval::entire())
  }

  pub fn is_nai(&self) -> bool {
    matches!(self.state, State::Nai)
  }

  /// The bare interval, or `None` for NaI.
  pub fn interval(&self) -> Option<&Interval<F>> {
    match &self.state {
      State::Nai => None,
      State::Value(x, _) => Some(x),
    }
  }

  /// The decoration, `ill` for NaI.
  pub fn decoration(&self) -> Decoration {
    match &self.state {
      State::Nai => Decoration::Ill,
      State::Value(_, d) => *d,
    }
  }

  /// Whether this is the empty interval (NaI is not).
  pub fn is_empty(&self) -> bool {
    self.interval().is_some_and(Interval::is_empty)
  }

  fn finish(repr: F::Repr, d: Decoration) -> Self {
    let x = Interval::from_repr(repr);
    let d = d.fit(x.is_empty(), x.is_common());
    Self { state: State::Value(x, d) }
  }

  fn unary(&self, op: impl FnOnce(&F::Repr) -> (F::Repr, Domain)) -> Self {
    let State::Value(x, d) = &self.state else { return Self::nai() };
    let (y, domain) = op(&x.repr);
    Self::finish(y, Decoration::propagate([(*d, x.is_empty())], domain))
  }

  fn binary(&self, other: &Self, op: impl FnOnce(&F::Repr, &F::Repr) -> (F::Repr, Domain)) -> Self {
    let (State::Value(x, d), State::Value(y, e)) = (&self.state, &other.state) else {
      return Self::nai()
    };
    let (z, domain) = op(&x.repr, &y.repr);
    Self::finish(z, Decoration::propagate([(*d, x.is_empty()), (*e, y.is_empty())], domain))
  }

  pub fn neg(&self) -> Self {
    self.unary(|x| (F::neg(x), Domain::Total))
  }

  pub fn add(&self, other: &Self) -> Self {
    self.binary(other, |x, y| (F::add(x, y), Domain::Total))
  }

  pub fn sub(&self, other: &Self) -> Self {
    self.binary(other, |x, y| (F::sub(x, y), Domain::Total))
  }

  pub fn mul(&self, other: &Self) -> Self {
    self.binary(other, |x, y| (F::mul(x, y), Domain::Total))
  }

  pub fn div(&self, other: &Self) -> Self {
    self.binary(other, F::div)
  }

  pub fn recip(&self) -> Self {
    self.unary(F::recip)
  }

  pub fn sqr(&self) -> Self {
    self.unary(|x| (F::sqr(x), Domain::Total))
  }

  pub fn sqrt(&self) -> Self {
    self.unary(F::sqrt)
  }

  pub fn rootn(&self, k: i64) -> Self {
    self.unary(|x| F::rootn(x, k))
  }

  pub fn pown(&self, n: i32) -> Self {
    self.unary(|x| F::pown(x, n))
  }

  pub fn asin(&self) -> Self {
    self.unary(F::asin)
  }

  pub fn acos(&self) -> Self {
    self.unary(F::acos)
  }

  pub fn atan(&self) -> Self {
    self.unary(|x| (F::atan(x), Domain::Total))
  }
}

impl<F: Flavor> fmt::Display for DecoratedInterval<F> {
  /// `[lo, hi]_dec`, `[empty]_trv`, or `[nai]`.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.state {
      State::Nai => f.write_str("[nai]"),
      State::Value(x, d) => {
        x.write_bounds(f)?;
        write!(f, "_{d}")
      }
    }
  }
}

mk_ops!{DecoratedInterval}
