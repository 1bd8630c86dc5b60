//! OST (Omicron Smart Tracking) frame decoding.
//!
//! A 12-byte frame: status bits and a 12-bit step counter packed into the
//! first two bytes, a big-endian binary32 latitude/longitude pair, then the
//! solar panel voltage in tenths of a volt and the battery percentage.
//!
//! A latitude or longitude of exactly `0.0` is the firmware's "no fix"
//! sentinel; the reading then carries no geolocation at all.

pub mod layout;
pub mod parser;

pub use parser::{GeoFix, OstReading, parse_ost};
