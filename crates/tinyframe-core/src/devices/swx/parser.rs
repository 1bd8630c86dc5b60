use serde::{Deserialize, Serialize};

use crate::devices::decoder::{decode_fields, percent};
use crate::error::DecodeError;

use super::layout;

/// Decoded SWX frame. Probe readings are two-decimal strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwxReading {
    #[serde(rename = "Battery (%)")]
    pub battery_percent: u8,
    #[serde(rename = "Temperature (C°)")]
    pub temperature_c: String,
    #[serde(rename = "Oxygen Saturation (%)")]
    pub oxygen_saturation_percent: String,
    #[serde(rename = "Oxygen Saturation (mg/l)")]
    pub oxygen_mg_per_l: String,
    #[serde(rename = "Oxygen Saturation (ppm)")]
    pub oxygen_ppm: String,
}

/// Round to two decimals, ties away from zero, and format.
///
/// Inputs that came from a binary32 field scale by 100 exactly in `f64`, so
/// ties are real ties and not artifacts of the multiplication.
///
/// # Examples
/// ```
/// use tinyframe_core::devices::swx::format_two_decimals;
///
/// assert_eq!(format_two_decimals(25.5), "25.50");
/// assert_eq!(format_two_decimals(25.125), "25.13");
/// ```
pub fn format_two_decimals(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded:.2}")
}

/// Decode a 48-digit SWX frame.
pub fn parse_swx(frame: &str) -> Result<SwxReading, DecodeError> {
    let fields = decode_fields(&layout::LAYOUT, frame)?;
    let battery_percent = percent(
        layout::BATTERY.name,
        fields.unsigned(layout::BATTERY.name)?,
    )?;
    let reading = |field: &'static str| fields.float(field).map(format_two_decimals);

    Ok(SwxReading {
        battery_percent,
        temperature_c: reading(layout::TEMPERATURE.name)?,
        oxygen_saturation_percent: reading(layout::OXYGEN_SATURATION_PERCENT.name)?,
        oxygen_mg_per_l: reading(layout::OXYGEN_MG_PER_L.name)?,
        oxygen_ppm: reading(layout::OXYGEN_PPM.name)?,
    })
}
