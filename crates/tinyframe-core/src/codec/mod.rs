//! Field-level codecs over hex digit strings.
//!
//! - `digits`: hex digit validation and unsigned integer parsing
//! - `float32`: manual IEEE-754 binary32 reconstruction
//! - `byte_order`: little-endian to big-endian digit-pair reversal
//!
//! Everything here is a pure function of its input.

pub mod byte_order;
pub mod digits;
pub mod float32;

pub use byte_order::reverse_bytes;
pub use float32::{decode_float32, float32_from_bits};
