//! Floating point helpers: ULP-tolerant comparisons and number formatting.
//!
//! Equality in the language is not bitwise. Two doubles are equal when they
//! are at most [`DEFAULT_ULPS`] representable values apart. The bit patterns
//! are mapped onto a monotonically ordered integer line (negative values are
//! reflected so that `-0.0` and `+0.0` meet at zero) and compared there.
//!
//! # Examples
//!
//! ```
//! use cexpr_lang::numeric::{is_equal, format_number};
//!
//! assert!(is_equal(0.1 + 0.2, 0.3));
//! assert!(!is_equal(1.0, 1.0001));
//! assert_eq!(format_number(1.0 / 3.0), "0.333333333333");
//! ```

/// Default tolerance, in units in the last place.
pub const DEFAULT_ULPS: i64 = 100;

/// Significant digits used when printing values.
pub const PRINT_PRECISION: usize = 12;

fn ordered_bits(value: f64) -> i128 {
    let bits = value.to_bits() as i64;
    let ordered = if bits < 0 {
        i64::MIN.wrapping_sub(bits)
    } else {
        bits
    };
    ordered as i128
}

/// `a == b` within `ulps`.
pub fn is_equal_ulps(a: f64, b: f64, ulps: i64) -> bool {
    (ordered_bits(a) - ordered_bits(b)).abs() <= ulps as i128
}

/// `a <= b` where `a` may exceed `b` by up to `ulps`.
pub fn is_inf_or_equal_ulps(a: f64, b: f64, ulps: i64) -> bool {
    ordered_bits(a) - ordered_bits(b) <= ulps as i128
}

/// `a == b` within [`DEFAULT_ULPS`].
pub fn is_equal(a: f64, b: f64) -> bool {
    is_equal_ulps(a, b, DEFAULT_ULPS)
}

/// `a <= b` with [`DEFAULT_ULPS`] of slack.
pub fn is_inf_or_equal(a: f64, b: f64) -> bool {
    is_inf_or_equal_ulps(a, b, DEFAULT_ULPS)
}

/// `a >= b` with [`DEFAULT_ULPS`] of slack.
pub fn is_sup_or_equal(a: f64, b: f64) -> bool {
    is_inf_or_equal(b, a)
}

/// Truth value of a number: anything not ULP-equal to zero.
pub fn is_true(value: f64) -> bool {
    !is_equal(value, 0.0)
}

pub fn from_bool(value: bool) -> f64 {
    if value { 1.0 } else { 0.0 }
}

/// Formats like C's `%.12g`.
pub fn format_number(value: f64) -> String {
    format_significant(value, PRINT_PRECISION)
}

/// Formats like C's `%.<precision>g`: shortest of fixed or scientific
/// notation for the given number of significant digits, trailing zeros
/// removed.
pub fn format_significant(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return if value.is_sign_negative() { "-nan" } else { "nan" }.to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-inf" } else { "inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let precision = precision.max(1);
    // Rounding to `precision` digits may bump the exponent (9.99..e2 -> 1e3),
    // so take the exponent from the rounded scientific form.
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some(parts) => parts,
        None => return scientific,
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= precision as i32 {
        let mantissa = strip_trailing_zeros(mantissa);
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        strip_trailing_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn strip_trailing_zeros(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}
