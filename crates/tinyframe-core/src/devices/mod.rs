//! Device-family frame decoding.
//!
//! Each family follows the same layered structure:
//! - `layout`: field offsets, widths and encodings (source of truth)
//! - `parser`: family semantics on top of the decoded fields (scaling,
//!   sentinels, range checks, output formatting)
//!
//! The shared `reader` validates a frame and reads fields by encoding, and
//! `decoder` turns a whole layout into `DecodedFields`. Adding a family is
//! a new layout table plus a parser that names its fields.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

pub mod decoder;
pub mod layout;
pub mod ost;
pub mod reader;
pub mod swx;

pub use decoder::{DecodedFields, FieldValue, decode_fields};
pub use layout::{Encoding, FieldSpec, FrameLayout};
pub use ost::{GeoFix, OstReading};
pub use swx::SwxReading;

/// Supported device families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceFamily {
    Ost,
    Swx,
}

impl DeviceFamily {
    pub const ALL: [DeviceFamily; 2] = [DeviceFamily::Ost, DeviceFamily::Swx];

    pub fn name(&self) -> &'static str {
        self.layout().family
    }

    pub fn layout(&self) -> &'static FrameLayout {
        match self {
            DeviceFamily::Ost => &ost::layout::LAYOUT,
            DeviceFamily::Swx => &swx::layout::LAYOUT,
        }
    }
}

impl fmt::Display for DeviceFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reading of any family, serialized without a tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SensorData {
    Ost(OstReading),
    Swx(SwxReading),
}

impl SensorData {
    pub fn family(&self) -> DeviceFamily {
        match self {
            SensorData::Ost(_) => DeviceFamily::Ost,
            SensorData::Swx(_) => DeviceFamily::Swx,
        }
    }
}

/// Decode `frame` with the parser of `family`.
///
/// # Examples
/// ```
/// use tinyframe_core::{DeviceFamily, SensorData, decode_frame};
///
/// let data = decode_frame(DeviceFamily::Ost, "C00A0000000000000000140A")?;
/// assert!(matches!(data, SensorData::Ost(_)));
/// # Ok::<(), tinyframe_core::DecodeError>(())
/// ```
pub fn decode_frame(family: DeviceFamily, frame: &str) -> Result<SensorData, DecodeError> {
    match family {
        DeviceFamily::Ost => ost::parse_ost(frame).map(SensorData::Ost),
        DeviceFamily::Swx => swx::parse_swx(frame).map(SensorData::Swx),
    }
}

#[cfg(test)]
mod tests {
    use super::{DeviceFamily, SensorData, decode_frame};
    use crate::error::{DecodeError, FormatError};

    #[test]
    fn family_names_follow_layouts() {
        assert_eq!(DeviceFamily::Ost.to_string(), "ost");
        assert_eq!(DeviceFamily::Swx.name(), "swx");
        assert_eq!(DeviceFamily::Ost.layout().frame_len, 24);
        assert_eq!(DeviceFamily::Swx.layout().frame_len, 48);
    }

    #[test]
    fn family_serde_is_lowercase() {
        let value = serde_json::to_value(DeviceFamily::Swx).unwrap();
        assert_eq!(value, "swx");
        let family: DeviceFamily = serde_json::from_str("\"ost\"").unwrap();
        assert_eq!(family, DeviceFamily::Ost);
    }

    #[test]
    fn dispatches_by_family() {
        let data = decode_frame(DeviceFamily::Ost, "C00A0000000000000000140A").unwrap();
        assert_eq!(data.family(), DeviceFamily::Ost);

        let swx = "A1B2C355010000CC41026666C5420385EB0141048FC2FD40";
        let data = decode_frame(DeviceFamily::Swx, swx).unwrap();
        assert!(matches!(data, SensorData::Swx(ref r) if r.temperature_c == "25.50"));
    }

    #[test]
    fn frame_of_the_other_family_is_a_length_error() {
        let err = decode_frame(DeviceFamily::Swx, "C00A0000000000000000140A").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Format(FormatError::WrongLength { family: "swx", .. })
        ));
    }

    #[test]
    fn untagged_round_trip_picks_the_right_variant() {
        let swx = "A1B2C355010000CC41026666C5420385EB0141048FC2FD40";
        let data = decode_frame(DeviceFamily::Swx, swx).unwrap();
        let json = serde_json::to_string(&data).unwrap();
        let back: SensorData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, data);
    }
}
