//! Text output of cells, with the digits rounded in a requested direction.
//!
//! Formats follow the familiar `printf` conversions: fixed (`%f`), scientific (`%e`), hexadecimal
//! (`%a`) and general (`%g`). Without an explicit precision the output is lossless: parsing it
//! back in the same format gives the same value.

use super::*;

use core::str::FromStr;

use malachite::Natural;
use malachite::base::num::arithmetic::traits::{DivMod, Parity, Pow};
use malachite::base::num::basic::traits::One;

use crate::round::Remainder;

/// The numeric form of [`Cell::get_str`]'s output.
#[derive(Clone, Copy, Debug, Default)]
#[derive(PartialEq, Eq, Hash)]
pub enum Form {
  /// `[-]ddd.ddd`
  Fixed,
  /// `[-]d.ddde±dd`
  Scientific,
  /// `[-]0x1.hhhp±d`
  Hex,
  /// Fixed or scientific, whichever is shorter for the value, without trailing zeros.
  #[default]
  General,
}

/// Letter case of [`Cell::get_str`]'s output.
#[derive(Clone, Copy, Debug, Default)]
#[derive(PartialEq, Eq, Hash)]
pub enum Case {
  #[default]
  Lower,
  Upper,
}

/// Configuration of [`Cell::get_str`]: form, case, minimum field width and precision.
///
/// Parses from a `printf`-like conversion spec, `[%][width][.precision]conv`, where `conv` is one
/// of `f e a g` (lower case) or `F E A G` (upper case).
///
/// ```
/// # use p1788::{StrFormat, Form, Case};
/// let spec: StrFormat = "12.5e".parse().unwrap();
/// assert_eq!(spec, StrFormat { form: Form::Scientific, case: Case::Lower, width: 12, precision: Some(5) });
/// ```
#[derive(Clone, Copy, Debug, Default)]
#[derive(PartialEq, Eq, Hash)]
pub struct StrFormat {
  pub form: Form,
  pub case: Case,
  /// The output is right-aligned in a field of at least this many characters.
  pub width: usize,
  /// Digits after the point (fixed, scientific, hex) or significant digits (general). `None`
  /// means as many as needed to be lossless.
  pub precision: Option<usize>,
}

/// The error returned when parsing a [`StrFormat`] fails.
#[derive(Clone, Debug)]
#[derive(PartialEq, Eq)]
#[derive(thiserror::Error)]
pub enum ParseStrFormatError {
  #[error("missing conversion character")]
  MissingConversion,
  #[error("unknown conversion character {0:?}")]
  UnknownConversion(char),
  #[error("invalid {what} {text:?}")]
  InvalidNumber { what: &'static str, text: String },
}

impl FromStr for StrFormat {
  type Err = ParseStrFormatError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let s = s.strip_prefix('%').unwrap_or(s);
    let conv = s.chars().last().ok_or(ParseStrFormatError::MissingConversion)?;
    let (form, case) = match conv {
      'f' => (Form::Fixed, Case::Lower),
      'F' => (Form::Fixed, Case::Upper),
      'e' => (Form::Scientific, Case::Lower),
      'E' => (Form::Scientific, Case::Upper),
      'a' => (Form::Hex, Case::Lower),
      'A' => (Form::Hex, Case::Upper),
      'g' => (Form::General, Case::Lower),
      'G' => (Form::General, Case::Upper),
      c if c.is_ascii_digit() || c == '.' => return Err(ParseStrFormatError::MissingConversion),
      c => return Err(ParseStrFormatError::UnknownConversion(c)),
    };
    let number = |what, text: &str| -> Result<usize, ParseStrFormatError> {
      text.parse().map_err(|_| ParseStrFormatError::InvalidNumber { what, text: text.into() })
    };
    let body = &s[..s.len() - conv.len_utf8()];
    let (width, precision) = match body.split_once('.') {
      Some((w, p)) => (w, Some(p)),
      None => (body, None),
    };
    Ok(Self {
      form,
      case,
      width: if width.is_empty() { 0 } else { number("width", width)? },
      precision: precision.map(|p| if p.is_empty() { Ok(0) } else { number("precision", p) }).transpose()?,
    })
  }
}

const LOG10_2: f64 = core::f64::consts::LOG10_2;

/// Number of decimal digits of `n`.
fn digits(n: u64) -> usize {
  n.checked_ilog10().map_or(1, |d| d as usize + 1)
}

impl Format {
  /// Significant decimal digits needed to tell apart any two values of this format.
  pub fn decimal_digits(self) -> usize {
    (self.precision as f64 * LOG10_2).ceil() as usize + 1
  }

  /// Hex digits after the point needed to write any value exactly.
  fn hex_digits(self) -> usize {
    (self.precision as usize - 1).div_ceil(4)
  }

  /// The longest output of [`Cell::get_str`] for any value of this format, in form `form`, with
  /// the default (lossless) precision and no field width.
  pub fn max_str_width(self, form: Form) -> usize {
    let tiny_exp = self.floor_exp() - 1;
    let int_digits = (self.max_exp as f64 * LOG10_2).floor() as usize + 1;
    let frac_digits = tiny_exp.min(0).unsigned_abs() as usize;
    let dec_exp = (self.max_exp as f64 * LOG10_2).ceil().max((tiny_exp as f64 * LOG10_2).floor().abs());
    let dec_exp_digits = digits(dec_exp as u64).max(2);
    let bin_exp_digits = digits(self.max_exp.unsigned_abs().max(tiny_exp.unsigned_abs()));
    let sign = 1;
    match form {
      Form::Fixed => sign + int_digits + 1 + frac_digits,
      Form::Scientific => sign + self.decimal_digits() + 1 + 2 + dec_exp_digits,
      Form::Hex => sign + 4 + self.hex_digits() + 2 + bin_exp_digits,
      Form::General => {
        let scientific = self.max_str_width(Form::Scientific);
        // Fixed is only chosen for exponents in -4..digits: at worst "0.0000" then the digits.
        scientific.max(sign + 6 + self.decimal_digits())
      }
    }
  }
}

/// Classify remainder `r` of a division by `den`.
fn classify(r: &Natural, den: &Natural) -> Remainder {
  if *r == 0u32 {
    return Remainder::Zero
  }
  match (r << 1u64).cmp(den) {
    Ordering::Less => Remainder::BelowHalf,
    Ordering::Equal => Remainder::Half,
    Ordering::Greater => Remainder::AboveHalf,
  }
}

/// `|x| × 10^k`, truncated, and the classification of the discarded fraction.
fn scale10(x: &Dyadic, k: i64) -> (Natural, Remainder) {
  let mut num = x.magnitude();
  let mut den = Natural::ONE;
  let ten = Natural::from(10u32);
  if k >= 0 {
    num *= (&ten).pow(k as u64);
  } else {
    den *= (&ten).pow(k.unsigned_abs());
  }
  if x.exponent() >= 0 {
    num <<= x.exponent() as u64;
  } else {
    den <<= x.exponent().unsigned_abs();
  }
  let (q, r) = num.div_mod(&den);
  let rem = classify(&r, &den);
  (q, rem)
}

/// `|x| × 10^k` rounded to an integer in direction `rnd` (applied to the signed value).
fn round10(x: &Dyadic, k: i64, rnd: Round) -> Natural {
  let (q, rem) = scale10(x, k);
  if rnd.increments(x.is_negative(), q.odd(), rem) { q + Natural::ONE } else { q }
}

/// The decimal exponent `d` with `10^d ≤ |x| < 10^(d + 1)`.
fn decimal_exponent(x: &Dyadic) -> i64 {
  let mut d = (x.floor_log2() as f64 * LOG10_2).floor() as i64;
  loop {
    let (q, _) = scale10(x, -d);
    if q >= 10u32 {
      d += 1;
    } else if q == 0u32 {
      d -= 1;
    } else {
      return d
    }
  }
}

/// Digits of `|x|` rounded to `precision + 1` significant digits, and the decimal exponent of the
/// first.
fn significant(x: &Dyadic, precision: usize, rnd: Round) -> (String, i64) {
  let mut exp = decimal_exponent(x);
  let mut q = round10(x, precision as i64 - exp, rnd);
  if q.to_string().len() > precision + 1 {
    // Rounded up to the next power of ten.
    q = Natural::from(10u32).pow(precision as u64);
    exp += 1;
  }
  (q.to_string(), exp)
}

fn scientific(x: &Dyadic, precision: usize, rnd: Round) -> String {
  let (digits, exp) = significant(x, precision, rnd);
  let (head, tail) = digits.split_at(1);
  let point = if tail.is_empty() { "" } else { "." };
  let sign = if exp < 0 { '-' } else { '+' };
  format!("{head}{point}{tail}e{sign}{:02}", exp.unsigned_abs())
}

fn fixed(x: &Dyadic, precision: Option<usize>, rnd: Round) -> String {
  // Values are dyadic, so their exact decimal expansion is finite: -exponent fractional digits.
  let precision = precision.unwrap_or(x.exponent().min(0).unsigned_abs() as usize);
  let q = round10(x, precision as i64, rnd).to_string();
  if precision == 0 {
    return q
  }
  let q = format!("{q:0>width$}", width = precision + 1);
  let (int, frac) = q.split_at(q.len() - precision);
  format!("{int}.{frac}")
}

fn general(x: &Dyadic, precision: usize, rnd: Round) -> String {
  let precision = precision.max(1);
  let (_, exp) = significant(x, precision - 1, rnd);
  let s = if exp >= -4 && exp < precision as i64 {
    fixed(x, Some((precision as i64 - 1 - exp) as usize), rnd)
  } else {
    scientific(x, precision - 1, rnd)
  };
  strip_zeros(&s)
}

/// Remove trailing zeros after a point, and the point itself if nothing is left after it.
fn strip_zeros(s: &str) -> String {
  let (mantissa, exponent) = match s.find('e') {
    Some(i) => s.split_at(i),
    None => (s, ""),
  };
  let mantissa = if mantissa.contains('.') {
    mantissa.trim_end_matches('0').trim_end_matches('.')
  } else {
    mantissa
  };
  format!("{mantissa}{exponent}")
}

fn hex(x: &Dyadic, precision: Option<usize>, rnd: Round) -> String {
  let mut exp = x.floor_log2();
  // |x| / 2^exp is in [1, 2); with 4 bits per hex digit.
  let frac_bits = match precision {
    Some(p) => p as i64 * 4,
    None => ((exp - x.exponent()).max(0) + 3) / 4 * 4,
  };
  let (q, rem) = x.split_at(exp - frac_bits);
  let mut q = if rnd.increments(x.is_negative(), q.odd(), rem) { q + Natural::ONE } else { q };
  if (&q >> frac_bits as u64) > 1u32 {
    // Carried into the next binade.
    q >>= 1u64;
    exp += 1;
  }
  let mut digits = format!("{q:x}");
  let frac = digits.split_off(1);
  let point = if frac.is_empty() { "" } else { "." };
  format!("0x{digits}{point}{frac}p{exp:+}")
}

fn zero(spec: &StrFormat) -> String {
  let frac = match spec.precision {
    Some(p) if p > 0 && spec.form != Form::General => format!(".{}", "0".repeat(p)),
    _ => String::new(),
  };
  match spec.form {
    Form::Fixed => format!("0{frac}"),
    Form::Scientific => format!("0{frac}e+00"),
    Form::Hex => format!("0x0{frac}p+0"),
    Form::General => "0".into(),
  }
}

impl Cell {
  /// The value of `self` as text in the configuration `spec`, with decimal (or hex) digits rounded
  /// in direction `rnd`.
  pub fn get_str(&self, rnd: Round, spec: &StrFormat) -> String {
    let negative = self.is_sign_negative();
    let body = match &self.num {
      Num::Nan => "nan".into(),
      Num::Inf { .. } => "inf".into(),
      Num::Zero { .. } => zero(spec),
      Num::Finite(x) => match spec.form {
        Form::Fixed => fixed(x, spec.precision, rnd),
        Form::Scientific =>
          scientific(x, spec.precision.unwrap_or(self.format.decimal_digits() - 1), rnd),
        Form::Hex => hex(x, spec.precision, rnd),
        Form::General => general(x, spec.precision.unwrap_or(self.format.decimal_digits()), rnd),
      },
    };
    let s = if negative { format!("-{body}") } else { body };
    let s = if spec.case == Case::Upper { s.to_uppercase() } else { s };
    format!("{s:>width$}", width = spec.width)
  }
}

impl core::fmt::Display for Cell {
  /// Lossless general form, rounded to nearest.
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_str(&self.get_str(Round::Nearest, &StrFormat::default()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn show(x: f64, rnd: Round, spec: &str) -> String {
    let (c, _) = Cell::from_native(Format::F64, x, Round::Nearest);
    c.get_str(rnd, &spec.parse().unwrap())
  }

  #[test]
  fn parse() {
    assert_eq!("a".parse::<StrFormat>(), Ok(StrFormat { form: Form::Hex, ..Default::default() }));
    assert_eq!("%G".parse::<StrFormat>(), Ok(StrFormat { case: Case::Upper, ..Default::default() }));
    assert_eq!(".f".parse::<StrFormat>().map(|s| s.precision), Ok(Some(0)));
    assert_eq!("".parse::<StrFormat>(), Err(ParseStrFormatError::MissingConversion));
    assert_eq!("12".parse::<StrFormat>(), Err(ParseStrFormatError::MissingConversion));
    assert_eq!("5q".parse::<StrFormat>(), Err(ParseStrFormatError::UnknownConversion('q')));
    assert!(matches!("1.2.3e".parse::<StrFormat>(), Err(ParseStrFormatError::InvalidNumber { .. })));
  }

  #[test]
  fn scientific_directed() {
    assert_eq!(show(0.1, Round::Nearest, ".17e"), "1.00000000000000006e-01");
    assert_eq!(show(0.1, Round::Down, ".17e"), "1.00000000000000005e-01");
    assert_eq!(show(0.1, Round::Up, ".2e"), "1.01e-01");
    assert_eq!(show(-0.1, Round::Up, ".2e"), "-1.00e-01");
    assert_eq!(show(-0.1, Round::Down, ".2e"), "-1.01e-01");
    assert_eq!(show(9.99, Round::Up, ".1e"), "1.0e+01");
    assert_eq!(show(1e300, Round::Nearest, "e"), "1.0000000000000001e+300");
    assert_eq!(show(5e-324, Round::Nearest, "e"), "4.9406564584124654e-324");
  }

  #[test]
  fn hex_form() {
    assert_eq!(show(0.1, Round::Nearest, "a"), "0x1.999999999999ap-4");
    assert_eq!(show(1.0, Round::Nearest, "a"), "0x1p+0");
    assert_eq!(show(-1.5, Round::Nearest, "A"), "-0X1.8P+0");
    assert_eq!(show(0.1, Round::Down, ".3a"), "0x1.999p-4");
    assert_eq!(show(0.1, Round::Up, ".3a"), "0x1.99ap-4");
    assert_eq!(show(1.999, Round::Up, ".1a"), "0x1.0p+1");
    assert_eq!(show(5e-324, Round::Nearest, "a"), "0x1p-1074");
    // Partial hex digits are padded out to whole ones.
    assert_eq!(show(1.25, Round::Nearest, "a"), "0x1.4p+0");
    assert_eq!(show(3.0, Round::Nearest, "a"), "0x1.8p+1");
    assert_eq!(show(1.03125, Round::Nearest, "a"), "0x1.08p+0");
  }

  #[test]
  fn fixed_and_general() {
    assert_eq!(show(0.5, Round::Nearest, "f"), "0.5");
    assert_eq!(show(0.1, Round::Nearest, ".3f"), "0.100");
    assert_eq!(show(2.5, Round::Nearest, ".0f"), "2");
    assert_eq!(show(2.5, Round::Up, ".0f"), "3");
    assert_eq!(show(1234.5, Round::Down, "10.1f"), "    1234.5");
    assert_eq!(show(0.1, Round::Nearest, ".17g"), "0.10000000000000001");
    assert_eq!(show(0.1, Round::Nearest, "g"), "0.10000000000000001");
    assert_eq!(show(1e6, Round::Nearest, ".6g"), "1e+06");
    assert_eq!(show(1e-5, Round::Nearest, ".6g"), "1e-05");
    assert_eq!(show(123456.0, Round::Nearest, ".6g"), "123456");
    assert_eq!(show(0.0001, Round::Nearest, ".3g"), "0.0001");
  }

  #[test]
  fn specials() {
    assert_eq!(show(f64::INFINITY, Round::Nearest, "g"), "inf");
    assert_eq!(show(f64::NEG_INFINITY, Round::Nearest, "E"), "-INF");
    assert_eq!(show(f64::NAN, Round::Nearest, "6f"), "   nan");
    assert_eq!(show(0.0, Round::Nearest, "e"), "0e+00");
    assert_eq!(show(0.0, Round::Nearest, ".2e"), "0.00e+00");
    assert_eq!(show(-0.0, Round::Nearest, ".2f"), "-0.00");
    assert_eq!(show(0.0, Round::Nearest, "a"), "0x0p+0");
  }

  #[test]
  fn widths_are_bounds() {
    let f = Format::F64;
    assert_eq!(f.max_str_width(Form::Scientific), 24);
    assert_eq!(f.max_str_width(Form::Hex), 24);
    let largest_subnormal = crate::underlying::Sealed::next_down(f64::MIN_POSITIVE);
    for x in [f64::MIN_POSITIVE, -f64::MAX, -5e-324, -largest_subnormal] {
      for form in [Form::Fixed, Form::Scientific, Form::Hex, Form::General] {
        let spec = StrFormat { form, ..Default::default() };
        let (c, _) = Cell::from_native(f, x, Round::Nearest);
        for rnd in Round::ALL {
          assert!(c.get_str(rnd, &spec).len() <= f.max_str_width(form), "{x:e} {form:?}");
        }
      }
    }
  }
}
