//! Argument reduction for the periodic functions, and the inverse trigonometric functions whose
//! branches it selects.
//!
//! Everything here is computed to arbitrary precision by narrowing brackets: π from Machin's
//! formula, `atan` from Euler's series, and both refined by doubling a working precision until
//! the result is decided. Working formats are relaxed copies of the target format (see
//! [`Format::relaxed`](crate::Format::relaxed)), passed explicitly, so there is no exponent range
//! to save and restore around the loops.

use core::cmp::Ordering;

use crate::cell::{Cell, Format};
use crate::round::Round;

mod ziv;
mod pi;
mod series;
mod elementary;
mod quadrant;
mod reflect;

pub use elementary::{acos, asin, atan};
pub use pi::pi;
pub use quadrant::quadrant;
pub use reflect::{Parity, reflect};

/// A correctly rounded function of one cell: `f(x, format, rnd)` is `f(x)` rounded to `format`
/// (at full precision) in direction `rnd`, with its ternary status.
pub type ElementaryFn = fn(&Cell, Format, Round) -> (Cell, Ordering);
