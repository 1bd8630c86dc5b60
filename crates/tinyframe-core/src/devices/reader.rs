use std::ops::Range;

use crate::codec::digits::{parse_u32, validate_hex};
use crate::codec::{decode_float32, reverse_bytes};
use crate::error::FormatError;

use super::decoder::FieldValue;
use super::layout::{Encoding, FieldSpec, FrameLayout};

/// Validated, read-only view over a raw hex frame.
pub struct FrameReader<'a> {
    digits: &'a str,
}

impl<'a> FrameReader<'a> {
    /// Accept `frame` only if it has the layout's exact length and is all hex.
    pub fn new(layout: &FrameLayout, frame: &'a str) -> Result<Self, FormatError> {
        if frame.len() != layout.frame_len {
            return Err(FormatError::WrongLength {
                family: layout.family,
                expected: layout.frame_len,
                actual: frame.len(),
            });
        }
        validate_hex(frame)?;
        Ok(Self { digits: frame })
    }

    pub fn read_digits(&self, range: Range<usize>) -> Result<&'a str, FormatError> {
        self.digits
            .get(range.clone())
            .ok_or(FormatError::OutOfBounds {
                start: range.start,
                end: range.end,
                len: self.digits.len(),
            })
    }

    pub fn read_uint(&self, range: Range<usize>) -> Result<u32, FormatError> {
        parse_u32(self.read_digits(range)?)
    }

    pub fn read_masked(
        &self,
        range: Range<usize>,
        mask: u32,
        shift: u32,
    ) -> Result<u32, FormatError> {
        Ok((self.read_uint(range)? & mask) >> shift)
    }

    pub fn read_float32_be(&self, range: Range<usize>) -> Result<f64, FormatError> {
        decode_float32(self.read_digits(range)?)
    }

    pub fn read_float32_le(&self, range: Range<usize>) -> Result<f64, FormatError> {
        decode_float32(&reverse_bytes(self.read_digits(range)?)?)
    }

    pub fn read_field(&self, field: &FieldSpec) -> Result<FieldValue, FormatError> {
        let range = field.range();
        Ok(match field.encoding {
            Encoding::UnsignedInt => FieldValue::Unsigned(self.read_uint(range)?),
            Encoding::MaskedBitfield { mask, shift } => {
                FieldValue::Unsigned(self.read_masked(range, mask, shift)?)
            }
            Encoding::Float32Be => FieldValue::Float(self.read_float32_be(range)?),
            Encoding::Float32Le => FieldValue::Float(self.read_float32_le(range)?),
        })
    }
}
