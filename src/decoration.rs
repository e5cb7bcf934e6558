//! The decoration lattice: what a decorated interval certifies about the computation that
//! produced it.

use core::fmt;
use core::str::FromStr;

/// A decoration, ordered from least to most informative: `ill < trv < def < dac < com`.
///
///   - `com`: the interval is nonempty and bounded, and every operation that produced it was
///     defined and continuous on its inputs.
///   - `dac`: as `com`, but the interval may be unbounded.
///   - `def`: every operation was defined on its inputs.
///   - `trv`: nothing is certified.
///   - `ill`: Not an Interval. Absorbing: anything computed from it is `ill`.
///
/// The discriminants are the interchange byte codes.
#[derive(Clone, Copy, Debug)]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Decoration {
  Ill = 0x00,
  Trv = 0x04,
  Def = 0x08,
  Dac = 0x0C,
  Com = 0x10,
}

/// Whether an operation was defined on the whole of its input intervals.
#[derive(Clone, Copy, Debug)]
#[derive(PartialEq, Eq, Hash)]
pub enum Domain {
  /// Defined (and continuous) everywhere on the inputs.
  Total,
  /// Some input points were outside the domain and were dropped.
  Restricted,
}

impl Decoration {
  pub const ALL: [Decoration; 5] = [
    Decoration::Ill,
    Decoration::Trv,
    Decoration::Def,
    Decoration::Dac,
    Decoration::Com,
  ];

  /// The interchange byte code.
  pub const fn to_byte(self) -> u8 {
    self as u8
  }

  /// The decoration with a given interchange byte code, if any.
  pub const fn from_byte(byte: u8) -> Option<Self> {
    match byte {
      0x00 => Some(Decoration::Ill),
      0x04 => Some(Decoration::Trv),
      0x08 => Some(Decoration::Def),
      0x0C => Some(Decoration::Dac),
      0x10 => Some(Decoration::Com),
      _ => None,
    }
  }

  /// The weaker of two decorations.
  pub fn combine(self, other: Self) -> Self {
    self.min(other)
  }

  /// The decoration of the result of an operation, before looking at the result itself.
  ///
  /// Each operand contributes its decoration and whether its interval is empty. The result is the
  /// weakest operand decoration, at most `trv` if any operand is empty, and at most `def` if
  /// the operation was not defined everywhere on its inputs. With no operands it is `com`.
  pub fn propagate(operands: impl IntoIterator<Item = (Decoration, bool)>, domain: Domain) -> Self {
    let mut result = Decoration::Com;
    for (decoration, empty) in operands {
      result = result.combine(decoration);
      if empty {
        result = result.combine(Decoration::Trv);
      }
    }
    match domain {
      Domain::Total => result,
      Domain::Restricted => result.combine(Decoration::Def),
    }
  }

  /// Whether this decoration may be attached to an interval that is `empty` or not, and
  /// `bounded` or not. `ill` is never admitted; construct NaI explicitly instead.
  pub fn admits(self, empty: bool, bounded: bool) -> bool {
    match self {
      Decoration::Ill => false,
      Decoration::Trv => true,
      Decoration::Def | Decoration::Dac => !empty,
      Decoration::Com => !empty && bounded,
    }
  }

  /// The strongest decoration not above `self` that an interval of the given shape admits:
  /// `trv` for the empty interval, at most `dac` for an unbounded one. `ill` stays `ill`.
  pub fn fit(self, empty: bool, bounded: bool) -> Self {
    if self == Decoration::Ill {
      Decoration::Ill
    } else if empty {
      Decoration::Trv
    } else if !bounded {
      self.combine(Decoration::Dac)
    } else {
      self
    }
  }

  pub const fn as_str(self) -> &'static str {
    match self {
      Decoration::Ill => "ill",
      Decoration::Trv => "trv",
      Decoration::Def => "def",
      Decoration::Dac => "dac",
      Decoration::Com => "com",
    }
  }
}

impl fmt::Display for Decoration {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.pad(self.as_str())
  }
}

#[derive(Clone, Debug)]
#[derive(PartialEq, Eq)]
#[derive(thiserror::Error)]
#[error("unknown decoration {0:?}, expected one of com, dac, def, trv, ill")]
pub struct ParseDecorationError(String);

impl FromStr for Decoration {
  type Err = ParseDecorationError;

  /// Parse a decoration name, ignoring case.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Decoration::ALL.into_iter()
      .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
      .ok_or_else(|| ParseDecorationError(s.to_owned()))
  }
}
