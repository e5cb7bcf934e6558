use core::cmp::Ordering;

use log::debug;

use crate::cell::{Format, Num};
use crate::dyadic::Dyadic;
use crate::round::Round;

/// The working array of a reduction: one exact term per input element.
///
/// Allocated once per call and dropped at the end of it.
pub(crate) struct Accumulator {
  terms: Vec<Num>,
}

impl Accumulator {
  pub fn with_capacity(n: usize) -> Self {
    Self { terms: Vec::with_capacity(n) }
  }

  pub fn push(&mut self, term: Num) {
    self.terms.push(term)
  }

  /// The sum of all terms, rounded once to `format` (at full precision).
  ///
  /// Any NaN term makes the sum NaN, and so do infinities of both signs, wherever they occur in
  /// the sequence. An exact zero sum is `-0` when rounding down and `+0` otherwise.
  pub fn sum(&self, format: Format, rnd: Round) -> (Num, Ordering) {
    let mut pos_inf = false;
    let mut neg_inf = false;
    for term in &self.terms {
      match term {
        Num::Nan => return (Num::Nan, Ordering::Equal),
        Num::Inf { negative: false } => pos_inf = true,
        Num::Inf { negative: true } => neg_inf = true,
        _ => {}
      }
    }
    match (pos_inf, neg_inf) {
      (true, true) => {
        debug!("sum of {} terms has infinities of both signs", self.terms.len());
        return (Num::Nan, Ordering::Equal)
      }
      (true, false) => return (Num::Inf { negative: false }, Ordering::Equal),
      (false, true) => return (Num::Inf { negative: true }, Ordering::Equal),
      (false, false) => {}
    }
    let total = self.terms.iter()
      .filter_map(|term| match term {
        Num::Finite(x) => Some(x),
        _ => None,
      })
      .fold(Dyadic::ZERO, |acc, x| acc.add(x));
    if total.is_zero() {
      (Num::Zero { negative: rnd == Round::Down }, Ordering::Equal)
    } else {
      format.round(&total, rnd)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use malachite::Integer;

  fn d(m: i64, e: i64) -> Num {
    Num::Finite(Dyadic::new(Integer::from(m), e))
  }

  #[test_log::test]
  fn mixed_infinities_anywhere() {
    let mut acc = Accumulator::with_capacity(4);
    acc.push(Num::Inf { negative: true });
    acc.push(d(1, 0));
    acc.push(d(3, 5));
    acc.push(Num::Inf { negative: false });
    assert_eq!(acc.sum(Format::F64, Round::Nearest), (Num::Nan, Ordering::Equal));
  }

  #[test]
  fn single_rounding() {
    // 1 + 2^-60 - 1 is exactly 2^-60; pairwise rounding to 53 bits would lose it.
    let mut acc = Accumulator::with_capacity(3);
    acc.push(d(1, 0));
    acc.push(d(1, -60));
    acc.push(d(-1, 0));
    assert_eq!(acc.sum(Format::F64, Round::Nearest), (d(1, -60), Ordering::Equal));
  }

  #[test]
  fn zero_sign() {
    let mut acc = Accumulator::with_capacity(2);
    acc.push(d(5, -3));
    acc.push(d(-5, -3));
    assert_eq!(acc.sum(Format::F64, Round::Down).0, Num::Zero { negative: true });
    assert_eq!(acc.sum(Format::F64, Round::Up).0, Num::Zero { negative: false });
  }
}
