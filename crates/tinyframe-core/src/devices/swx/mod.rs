//! SWX (Libelium Smart Water Xtreme) tiny-frame decoding.
//!
//! The frame carries the battery level and four optical dissolved-oxygen
//! probe readings. The probe values are binary32 sent least significant byte
//! first, so each one is byte-reversed before reconstruction. Readings are
//! published as strings rounded to two decimals.

pub mod layout;
pub mod parser;

pub use parser::{SwxReading, format_two_decimals, parse_swx};
