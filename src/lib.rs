//! This crate provides the correctly rounded numeric core of an implementation of
//! [IEEE 1788](https://standards.ieee.org/ieee/1788/4431/) interval arithmetic, together with the
//! bare and decorated interval types built on it.
//!
//! # Introduction
//!
//! An interval library is only as good as the rounding of its bounds: every lower bound must be
//! rounded down and every upper bound up, *once*, from the exact mathematical value, or the
//! enclosures are either wrong or needlessly loose. This crate supplies the pieces for that:
//!
//!   - [`Cell`] and [`BoundCell`]: arbitrary precision floating point values with an explicit
//!     [`Format`] (precision and exponent range, with or without subnormals), where every
//!     operation rounds the exact result in a requested [`Round`] direction and reports the
//!     ternary status.
//!   - [`reduction`]: correctly rounded sums and dot products of slices of native floats.
//!   - [`argument`]: π, `atan`, `asin` and `acos` at any precision, the quadrant of arbitrarily
//!     large arguments, and every branch of the inverse trigonometric functions.
//!   - [`root`]: the correctly rounded `x^(1/k)` for every integer `k`, negative ones included.
//!   - [`Decoration`] and [`DecoratedInterval`]: the decoration lattice and how operations
//!     propagate it; [`Interval`]: the bare intervals underneath.
//!
//! # Usage
//!
//! ```
//! use p1788::{Cell, DecoratedInterval, Decoration, Format, InfSup, Round};
//! use p1788::reduction;
//!
//! // Round exact results in any direction.
//! let (third, status) = Format::F64.div(
//!   &Cell::from_native(Format::F64, 1.0, Round::Nearest).0,
//!   &Cell::from_native(Format::F64, 3.0, Round::Nearest).0,
//!   Round::Up,
//! );
//! assert_eq!(status, core::cmp::Ordering::Greater);
//! assert!(third.get::<f64>(Round::Up) > 1.0 / 3.0);
//!
//! // Sum without losing anything in between.
//! assert_eq!(reduction::sum(&[1e300, 1.0, -1e300], Round::Down), 1.0);
//!
//! // Decorated intervals track whether every operation was defined on its inputs.
//! type D = DecoratedInterval<InfSup<f64>>;
//! let x = D::new(-1.0, 4.0).sqrt();
//! assert_eq!(x.to_string(), "[0, 2]_def");
//! assert_eq!(x.decoration(), Decoration::Def);
//! ```
//!
//! # Configuration
//!
//! There is no global state: the [`Format`] passed to (or carried by) each operation is all the
//! configuration there is. Diagnostics go through the [`log`](https://docs.rs/log) facade.

mod round;
mod dyadic;
mod underlying;
mod cell;
pub mod reduction;
pub mod argument;
mod root;
mod decoration;
mod interval;

#[cfg(test)]
mod rational;

pub use round::Round;
pub use underlying::Native;
pub use dyadic::Dyadic;
pub use cell::{BoundCell, Cell, F32Cell, F64Cell, Format, Num};
pub use cell::{Case, Form, ParseStrFormatError, StrFormat};
pub use root::root;
pub use decoration::{Decoration, Domain, ParseDecorationError};
pub use interval::{DecoratedInterval, Flavor, InfSup, InfSupRepr, Interval};

/// Number of cases for each property test.
#[cfg(test)]
const PROPTEST_CASES: u32 = if cfg!(debug_assertions) {0x100} else {0x1000};
