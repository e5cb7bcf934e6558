//! Rounding directions, and the handful of decisions every rounding routine in this crate shares.

use core::cmp::Ordering;

/// A rounding direction.
///
/// Every operation in this crate that may produce a value not representable in its target format
/// takes a `Round` and returns the representable value obtained by rounding the *exact*
/// mathematical result in that direction.
#[derive(Clone, Copy, Debug)]
#[derive(PartialEq, Eq, Hash)]
pub enum Round {
  /// Round to the nearest representable value; ties go to the one with an even last digit.
  Nearest,
  /// Round towards zero (truncate).
  TowardZero,
  /// Round towards +∞.
  Up,
  /// Round towards −∞.
  Down,
  /// Round away from zero.
  AwayFromZero,
}

/// How the part of a magnitude that is discarded by truncation compares to half a unit in the
/// last kept place.
#[derive(Clone, Copy, Debug)]
#[derive(PartialEq, Eq)]
pub(crate) enum Remainder {
  Zero,
  BelowHalf,
  Half,
  AboveHalf,
}

impl Round {
  /// All rounding directions, handy for tests and exhaustive loops.
  pub const ALL: [Round; 5] = [
    Round::Nearest,
    Round::TowardZero,
    Round::Up,
    Round::Down,
    Round::AwayFromZero,
  ];

  /// The direction that rounds the other way: `Up` ↔ `Down`, `TowardZero` ↔ `AwayFromZero`.
  /// `Nearest` is its own opposite.
  pub const fn opposite(self) -> Self {
    match self {
      Round::Nearest => Round::Nearest,
      Round::TowardZero => Round::AwayFromZero,
      Round::AwayFromZero => Round::TowardZero,
      Round::Up => Round::Down,
      Round::Down => Round::Up,
    }
  }

  /// The direction that rounding a *negated* value in `self` corresponds to; i.e. the `r` such
  /// that `round(-x, self) == -round(x, r)`.
  pub const fn mirrored(self) -> Self {
    match self {
      Round::Up => Round::Down,
      Round::Down => Round::Up,
      other => other,
    }
  }

  /// Given a magnitude truncated to an integer `q` (whose parity is `odd`), with the discarded
  /// part classified as `rem`, decide whether the correctly rounded magnitude is `q + 1`.
  ///
  /// `negative` is the sign of the value being rounded, which matters for `Up` and `Down`.
  pub(crate) fn increments(self, negative: bool, odd: bool, rem: Remainder) -> bool {
    if rem == Remainder::Zero {
      return false
    }
    match self {
      Round::Nearest => rem == Remainder::AboveHalf || (rem == Remainder::Half && odd),
      Round::TowardZero => false,
      Round::AwayFromZero => true,
      Round::Up => !negative,
      Round::Down => negative,
    }
  }

  /// As [`Round::increments`], but an exact tie under `Nearest` is broken using `hint`, the
  /// ternary status of a previous rounding of the same exact value (the value being re-rounded
  /// compares to the true value as `hint`).
  ///
  /// This is what makes rounding twice (first to a fine grid, then to a coarse one) give the same
  /// answer as rounding once.
  pub(crate) fn increments_hinted(
    self,
    negative: bool,
    odd: bool,
    rem: Remainder,
    hint: Ordering,
  ) -> bool {
    if self == Round::Nearest && rem == Remainder::Half && hint != Ordering::Equal {
      // The true value is strictly on one side of the midpoint. It lies above the midpoint (in
      // magnitude) iff the previous rounding went *towards* zero.
      if negative { hint == Ordering::Greater } else { hint == Ordering::Less }
    } else {
      self.increments(negative, odd, rem)
    }
  }
}

/// The ternary status of a rounded value relative to the exact one: `Less` if the rounded value
/// is below the exact value, `Greater` if above, `Equal` if exact.
pub(crate) fn ternary(negative: bool, incremented: bool, exact: bool) -> Ordering {
  if exact {
    Ordering::Equal
  } else if incremented != negative {
    Ordering::Greater
  } else {
    Ordering::Less
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn opposite() {
    for rnd in Round::ALL {
      assert_eq!(rnd.opposite().opposite(), rnd);
    }
    assert_eq!(Round::Up.opposite(), Round::Down);
    assert_eq!(Round::TowardZero.opposite(), Round::AwayFromZero);
  }

  #[test]
  fn nearest_ties_to_even() {
    assert!(!Round::Nearest.increments(false, false, Remainder::Half));
    assert!(Round::Nearest.increments(false, true, Remainder::Half));
    assert!(Round::Nearest.increments(true, false, Remainder::AboveHalf));
    assert!(!Round::Nearest.increments(true, true, Remainder::BelowHalf));
  }

  #[test]
  fn directed() {
    assert!(Round::Up.increments(false, false, Remainder::BelowHalf));
    assert!(!Round::Up.increments(true, false, Remainder::AboveHalf));
    assert!(Round::Down.increments(true, false, Remainder::BelowHalf));
    assert!(!Round::Down.increments(false, true, Remainder::AboveHalf));
    assert!(!Round::Down.increments(true, true, Remainder::Zero));
  }

  #[test]
  fn hinted_ties() {
    // Positive value previously rounded down: the exact value is above the midpoint.
    assert!(Round::Nearest.increments_hinted(false, false, Remainder::Half, Ordering::Less));
    assert!(!Round::Nearest.increments_hinted(false, true, Remainder::Half, Ordering::Greater));
    // Negative value previously rounded up (towards zero): the exact magnitude is larger.
    assert!(Round::Nearest.increments_hinted(true, false, Remainder::Half, Ordering::Greater));
    // Without a hint, ties to even.
    assert!(!Round::Nearest.increments_hinted(false, false, Remainder::Half, Ordering::Equal));
  }

  #[test]
  fn ternary_status() {
    assert_eq!(ternary(false, true, false), Ordering::Greater);
    assert_eq!(ternary(true, true, false), Ordering::Less);
    assert_eq!(ternary(false, false, false), Ordering::Less);
    assert_eq!(ternary(true, false, false), Ordering::Greater);
    assert_eq!(ternary(true, true, true), Ordering::Equal);
  }
}
