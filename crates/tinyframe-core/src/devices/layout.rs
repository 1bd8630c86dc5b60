//! Frame layout tables.
//!
//! A layout is plain data: an ordered list of fields, each addressed by
//! hex-digit offset and width, plus the encoding used to turn those digits
//! into a value. Offsets count hex digits, not bytes, because some fields
//! (the OST step counter) start mid-byte.

use std::ops::Range;

/// How the digits of one field become a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Big-endian unsigned integer.
    UnsignedInt,
    /// `(raw & mask) >> shift` over the big-endian integer.
    MaskedBitfield { mask: u32, shift: u32 },
    /// Binary32 transmitted most significant byte first.
    Float32Be,
    /// Binary32 transmitted least significant byte first.
    Float32Le,
}

impl Encoding {
    pub fn is_float(&self) -> bool {
        matches!(self, Encoding::Float32Be | Encoding::Float32Le)
    }
}

/// One entry of a [`FrameLayout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub offset: usize,
    pub width: usize,
    pub encoding: Encoding,
}

impl FieldSpec {
    pub const fn new(name: &'static str, offset: usize, width: usize, encoding: Encoding) -> Self {
        Self {
            name,
            offset,
            width,
            encoding,
        }
    }

    pub const fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.width
    }
}

/// Fixed description of one device family's frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLayout {
    pub family: &'static str,
    /// Exact frame length in hex digits.
    pub frame_len: usize,
    pub fields: &'static [FieldSpec],
}

impl FrameLayout {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }
}
