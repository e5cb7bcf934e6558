use super::*;

impl Cell {
  /// Emulate gradual underflow: if the format has subnormals and the value is below the normal
  /// range, re-round it to the subnormal grid.
  ///
  /// `status` is the ternary status of the operation that produced `self`; the return value is
  /// the status of the final value relative to the same exact result. Rounding twice this way
  /// gives the same answer as rounding the exact result once, directly to the subnormal grid.
  #[must_use]
  pub fn subnormalize(&mut self, status: Ordering, rnd: Round) -> Ordering {
    let format = self.format;
    let Num::Finite(x) = &self.num else { return status };
    if !format.subnormal || x.floor_log2() + 1 >= format.min_exp {
      return status
    }
    let lsb = format.min_exp - format.precision as i64;
    // Re-rounding an exact value keeps its status; otherwise the exact value lies within the
    // fine rounding's error, so the new status is the direction the value moved.
    let (num, status) = format.round_at(x, lsb, rnd, status);
    self.num = num;
    status
  }
}
