//! Error-free transforms: native operations that also return their exact rounding error.

use crate::underlying::Native;

/// `(s, e)` with `s = a + b` rounded to nearest and `s + e = a + b` exactly (Knuth's TwoSum).
///
/// Exact for all finite inputs whose sum does not overflow.
pub fn two_sum<T: Native>(a: T, b: T) -> (T, T) {
  let s = a + b;
  let bb = s - a;
  let e = (a - (s - bb)) + (b - bb);
  (s, e)
}

/// As [`two_sum`], with fewer operations, but only if `|a| ≥ |b|` (Dekker's FastTwoSum).
pub fn fast_two_sum<T: Native>(a: T, b: T) -> (T, T) {
  debug_assert!(!(a.abs() < b.abs()));
  let s = a + b;
  let e = b - (s - a);
  (s, e)
}

/// `(p, e)` with `p = a × b` rounded to nearest and `p + e = a × b` exactly, using a fused
/// multiply-add.
///
/// Exact for all finite inputs whose product neither overflows nor loses bits to underflow.
pub fn two_prod<T: Native>(a: T, b: T) -> (T, T) {
  let p = a * b;
  let e = a.mul_add(b, -p);
  (p, e)
}
