use super::*;

use crate::underlying::Native;

/// A [`Cell`] whose format (`P` bits of precision, exponents `EMIN..=EMAX`, gradual underflow if
/// `SUB`) is fixed at compile time.
///
/// Examples:
///
/// ```
/// # use p1788::{BoundCell, F64Cell, Round};
/// type Double = F64Cell;  // Same as BoundCell<53, -1021, 1024, true>
/// type Wide = BoundCell<106, -1021, 1024, true>;  // Enough to hold any product of two f64s
///
/// let (x, _) = Wide::from_native(0.1_f64, Round::Nearest);
/// let (y, _) = Double::from_native(1.0_f64 / 3.0, Round::Nearest);
/// assert_eq!(x.get::<f64>(Round::Nearest), 0.1);
/// assert_eq!(y.get::<f32>(Round::Up), 0.33333334);
/// ```
#[derive(Clone, Debug)]
#[derive(PartialEq, Eq, Hash)]
pub struct BoundCell<
  const P: u64,
  const EMIN: i64,
  const EMAX: i64,
  const SUB: bool,
> {
  num: Num,
}

/// A cell with the format of `f64`.
pub type F64Cell = BoundCell<53, -1021, 1024, true>;

/// A cell with the format of `f32`.
pub type F32Cell = BoundCell<24, -125, 128, true>;

impl<
  const P: u64,
  const EMIN: i64,
  const EMAX: i64,
  const SUB: bool,
> BoundCell<P, EMIN, EMAX, SUB> {
  /// The format of this cell type.
  pub const FORMAT: Format = {
    assert!(
      P >= 2,
      "A cell needs at least 2 bits of precision",
    );
    assert!(
      EMIN < EMAX,
      "The exponent range of a cell cannot be empty",
    );
    assert!(
      EMIN >= -RELAXED_EXP && EMAX <= RELAXED_EXP,
      "The exponent range of a cell cannot be wider than that of a relaxed format",
    );
    Format { precision: P, min_exp: EMIN, max_exp: EMAX, subnormal: SUB }
  };

  pub const NAN: Self = Self { num: Num::Nan };

  fn from_cell_unchecked(cell: Cell) -> Self {
    debug_assert_eq!(cell.format(), Self::FORMAT);
    Self { num: cell.into_num() }
  }

  /// The value of `value`, rounded in direction `rnd`, with the ternary status of the rounding.
  pub fn from_native<T: Native>(value: T, rnd: Round) -> (Self, Ordering) {
    let (cell, status) = Cell::from_native(Self::FORMAT, value, rnd);
    (Self::from_cell_unchecked(cell), status)
  }

  /// The value of another cell (of any format), rounded in direction `rnd`.
  pub fn from_cell(value: &Cell, rnd: Round) -> (Self, Ordering) {
    let (cell, status) = Self::FORMAT.round_cell(value, rnd);
    (Self::from_cell_unchecked(cell), status)
  }

  /// Replace the value of `self` with `value`, rounded in direction `rnd`.
  pub fn set<T: Native>(&mut self, value: T, rnd: Round) -> Ordering {
    let (cell, status) = Self::from_native(value, rnd);
    *self = cell;
    status
  }

  /// See [`Cell::get`].
  pub fn get<T: Native>(&self, rnd: Round) -> T {
    self.as_cell().get(rnd)
  }

  /// See [`Cell::subnormalize`].
  #[must_use]
  pub fn subnormalize(&mut self, status: Ordering, rnd: Round) -> Ordering {
    let num = core::mem::replace(&mut self.num, Num::Nan);
    let mut cell = Cell::from_parts(Self::FORMAT, num);
    let status = cell.subnormalize(status, rnd);
    self.num = cell.into_num();
    status
  }

  /// See [`Cell::get_str`].
  pub fn get_str(&self, rnd: Round, spec: &StrFormat) -> String {
    self.as_cell().get_str(rnd, spec)
  }

  pub fn num(&self) -> &Num {
    &self.num
  }

  pub fn as_cell(&self) -> Cell {
    Cell::from_parts(Self::FORMAT, self.num.clone())
  }

  pub fn is_nan(&self) -> bool {
    self.num.is_nan()
  }
}

impl<
  const P: u64,
  const EMIN: i64,
  const EMAX: i64,
  const SUB: bool,
> From<BoundCell<P, EMIN, EMAX, SUB>> for Cell {
  fn from(value: BoundCell<P, EMIN, EMAX, SUB>) -> Self {
    Cell::from_parts(BoundCell::<P, EMIN, EMAX, SUB>::FORMAT, value.num)
  }
}
