//! IEEE-754 binary32 reconstruction from raw bits.
//!
//! The value is rebuilt from its sign, exponent and mantissa fields instead
//! of `f32::from_bits`, so every target produces the same result, including
//! for the all-zero sentinel. Only normal numbers are handled exactly:
//! subnormals, infinities and NaN patterns run through the same formula and
//! come out as finite, numerically wrong values.

use crate::error::FormatError;

use super::digits::parse_u32;

/// Number of hex digits in a binary32 field.
pub const FLOAT32_HEX_DIGITS: usize = 8;

const EXPONENT_BIAS: i32 = 127;
const MANTISSA_BITS: i32 = 23;
const MANTISSA_MASK: u32 = 0x007F_FFFF;
const IMPLICIT_BIT: u32 = 0x0080_0000;

/// Rebuild a binary32 value from its 32-bit pattern.
///
/// # Examples
/// ```
/// use tinyframe_core::codec::float32_from_bits;
///
/// assert_eq!(float32_from_bits(0x41CC_0000), 25.5);
/// assert_eq!(float32_from_bits(0), 0.0);
/// ```
pub fn float32_from_bits(bits: u32) -> f64 {
    if bits == 0 {
        return 0.0;
    }
    let sign = if bits >> 31 == 1 { -1.0 } else { 1.0 };
    let exponent = ((bits >> 23) & 0xFF) as i32 - EXPONENT_BIAS;
    let mantissa = f64::from((bits & MANTISSA_MASK) | IMPLICIT_BIT);
    sign * 2f64.powi(exponent) * (mantissa * 2f64.powi(-MANTISSA_BITS))
}

/// Decode exactly 8 big-endian hex digits as a binary32 value.
///
/// # Examples
/// ```
/// use tinyframe_core::codec::decode_float32;
///
/// assert_eq!(decode_float32("BFC00000").unwrap(), -1.5);
/// assert!(decode_float32("BFC000").is_err());
/// ```
pub fn decode_float32(digits: &str) -> Result<f64, FormatError> {
    if digits.len() != FLOAT32_HEX_DIGITS {
        return Err(FormatError::FloatWidth {
            actual: digits.len(),
        });
    }
    parse_u32(digits).map(float32_from_bits)
}
