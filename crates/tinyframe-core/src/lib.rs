//! TinyFrame core library for decoding LoRaWAN sensor tiny frames.
//!
//! Field devices send compact hex frames; this crate turns one frame plus
//! its transport metadata (device EUI, frame counter, first gateway's radio
//! metrics) into a structured envelope ready to publish. Frame layouts are
//! data (`devices::*::layout`), shared field access lives in the frame
//! reader, and each family's parser only adds its semantics on top.
//!
//! Invariants:
//! - Decoding is pure: no I/O, no shared state, safe to call concurrently.
//! - A frame of the wrong length or with a non-hex digit is rejected as a
//!   whole; there is no best-effort partial decode.
//! - Absent values (no GPS fix, no gateway report) stay absent and are
//!   never reported as zero.
//!
//! Publishing is delegated to a caller-supplied [`Publisher`]; the core
//! never opens connections or retries.
//!
//! # Examples
//! ```
//! use tinyframe_core::{DeviceFamily, Uplink, process_uplink};
//!
//! let uplink: Uplink = serde_json::from_str(
//!     r#"{"EUI": "70B3D5E75E00A1B2", "fcnt": 12, "data": "C00A0000000000000000140A",
//!         "gws": [{"rssi": -97, "snr": 8.5}]}"#,
//! )?;
//! let envelope = process_uplink(DeviceFamily::Ost, &uplink)?;
//! println!("{}", serde_json::to_string(&envelope)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod codec;
pub mod devices;
mod envelope;
mod error;
mod handler;
mod uplink;

pub use devices::{DeviceFamily, GeoFix, OstReading, SensorData, SwxReading, decode_frame};
pub use envelope::{Envelope, assemble};
pub use error::{DecodeError, FormatError, PublishError};
pub use handler::{
    HandlerError, HandlerResponse, PublishRequest, Publisher, Route, handle_event, handle_uplink,
    process_uplink,
};
pub use uplink::{GatewayReport, ShadowDocument, ShadowEvent, ShadowState, Uplink, UplinkMetadata};
