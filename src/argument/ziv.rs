use core::cmp::Ordering;

use log::trace;

use crate::cell::{Cell, Format, Num};
use crate::dyadic::Dyadic;
use crate::round::Round;

/// Round a value `v` known only through brackets.
///
/// `bracket(w)` returns `lo < v < hi`, strictly, with the bracket narrowing to `v` as the working
/// precision `w` grows, or `None` if `v` does not exist. The working precision starts at `start`
/// bits and doubles until both ends of the bracket round to the same value, which is then the
/// correctly rounded `v`. This terminates as long as `v` is neither representable nor a midpoint,
/// which holds for the irrational values this is used for.
pub(crate) fn ziv(
  format: Format,
  rnd: Round,
  start: u64,
  what: &str,
  mut bracket: impl FnMut(u64) -> Option<(Dyadic, Dyadic)>,
) -> (Cell, Ordering) {
  let mut w = start.max(8);
  loop {
    let Some((lo, hi)) = bracket(w) else {
      return (Cell::nan(format), Ordering::Equal)
    };
    debug_assert!(lo < hi);
    let (r, _) = format.round(&lo, rnd);
    if format.round(&hi, rnd).0 == r {
      let below = r.compare(&Num::Finite(lo)).is_some_and(|o| o != Ordering::Greater);
      let above = r.compare(&Num::Finite(hi)).is_some_and(|o| o != Ordering::Less);
      // Under `Nearest` the rounded value may still fall inside the bracket.
      if below {
        return (Cell::from_parts(format, r), Ordering::Less)
      }
      if above {
        return (Cell::from_parts(format, r), Ordering::Greater)
      }
    }
    w *= 2;
    trace!("{what}: undecided, retrying at {w} bits");
  }
}
