use super::*;

use crate::underlying::Native;

impl Cell {
  /// The exact value of `value`, rounded to `format` in direction `rnd`.
  pub fn from_native<T: Native>(format: Format, value: T, rnd: Round) -> (Self, Ordering) {
    match value.decompose() {
      Num::Finite(x) => Self::from_dyadic(format, &x, rnd),
      special => (Self { format, num: special }, Ordering::Equal),
    }
  }

  /// Replace the value of `self` with `value`, rounded in direction `rnd`, keeping the format.
  pub fn set<T: Native>(&mut self, value: T, rnd: Round) -> Ordering {
    let (cell, status) = Self::from_native(self.format, value, rnd);
    *self = cell;
    status
  }

  /// The value of `self`, rounded to the native type `T` in direction `rnd`, subnormals included.
  ///
  /// A zero cell gives `-0` when rounding [`Down`](Round::Down) and `+0` otherwise, whatever its
  /// sign. A nonzero value too small for `T` keeps its sign.
  pub fn get<T: Native>(&self, rnd: Round) -> T {
    match &self.num {
      Num::Nan => T::NAN,
      Num::Inf { negative: false } => T::INFINITY,
      Num::Inf { negative: true } => T::NEG_INFINITY,
      Num::Zero { .. } => if rnd == Round::Down { T::NEG_ZERO } else { T::ZERO },
      Num::Finite(x) => {
        let (mut cell, status) = Self::from_dyadic(T::FORMAT, x, rnd);
        let _ = cell.subnormalize(status, rnd);
        cell.to_native_exact()
      }
    }
  }

  /// Compose a native value from a cell already representable in `T`.
  pub(crate) fn to_native_exact<T: Native>(&self) -> T {
    match &self.num {
      Num::Nan => T::NAN,
      Num::Inf { negative } => if *negative { T::NEG_INFINITY } else { T::INFINITY },
      Num::Zero { negative } => if *negative { T::NEG_ZERO } else { T::ZERO },
      Num::Finite(x) => T::compose(x.is_negative(), x.magnitude_u64(), x.exponent()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::underlying::Sealed;
  use proptest::prelude::*;

  #[test]
  fn zero_sign_follows_direction() {
    let (c, _) = Cell::from_native(Format::F64, 0.0_f64, Round::Nearest);
    assert!(c.get::<f64>(Round::Down).is_sign_negative());
    assert!(c.get::<f64>(Round::Up).is_sign_positive());
    let (c, _) = Cell::from_native(Format::F64, -0.0_f64, Round::Nearest);
    assert!(c.get::<f64>(Round::Nearest).is_sign_positive());
  }

  #[test]
  fn narrowing() {
    let (c, t) = Cell::from_native(Format::F32, 0.1_f64, Round::Down);
    assert_eq!(t, Ordering::Less);
    assert_eq!(c.get::<f32>(Round::Nearest), 0.099999994_f32);
    let (c, _) = Cell::from_native(Format::F64, 0.1_f64, Round::Nearest);
    assert_eq!(c.get::<f32>(Round::Down), 0.099999994_f32);
    assert_eq!(c.get::<f32>(Round::Up), 0.1_f32);
    assert_eq!(c.get::<f32>(Round::Nearest), 0.1_f32);
  }

  #[test]
  fn out_of_range() {
    let (c, _) = Cell::from_native(Format::F64, 1e300_f64, Round::Nearest);
    assert_eq!(c.get::<f32>(Round::Nearest), f32::INFINITY);
    assert_eq!(c.get::<f32>(Round::Down), f32::MAX);
    let (c, _) = Cell::from_native(Format::F64, -1e-300_f64, Round::Nearest);
    assert_eq!(c.get::<f32>(Round::Down), -f32::from_bits(1));
    let z = c.get::<f32>(Round::Up);
    assert!(z == 0.0 && z.is_sign_negative());
  }

  #[test]
  fn set_keeps_format() {
    let (mut c, _) = Cell::from_native(Format::F32, 1.0_f32, Round::Nearest);
    assert_eq!(c.set(core::f64::consts::PI, Round::Up), Ordering::Greater);
    assert_eq!(c.format(), Format::F32);
    assert_eq!(c.get::<f32>(Round::Nearest), 3.1415927_f32);
  }

  proptest!{
    #![proptest_config(ProptestConfig::with_cases(crate::PROPTEST_CASES))]
    #[test]
    fn f64_roundtrip(x in any::<f64>().prop_filter("nonzero", |x| *x != 0.0)) {
      let (c, t) = Cell::from_native(Format::F64, x, Round::Nearest);
      prop_assert_eq!(t, Ordering::Equal);
      for rnd in Round::ALL {
        let y = c.get::<f64>(rnd);
        prop_assert!(y.to_bits() == x.to_bits() || (x.is_nan() && y.is_nan()));
      }
    }

    #[test]
    fn f32_directed(x in proptest::num::f64::NORMAL | proptest::num::f64::SUBNORMAL) {
      let (c, _) = Cell::from_native(Format::F64, x, Round::Nearest);
      let lo = c.get::<f32>(Round::Down);
      let hi = c.get::<f32>(Round::Up);
      prop_assert!(lo as f64 <= x && x <= hi as f64);
      prop_assert!(lo == hi || Sealed::next_up(lo) == hi || (lo == 0.0 && hi == f32::from_bits(1)));
    }
  }
}
