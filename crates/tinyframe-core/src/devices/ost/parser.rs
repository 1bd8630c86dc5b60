use serde::{Deserialize, Serialize};

use crate::devices::decoder::{decode_fields, percent};
use crate::error::DecodeError;

use super::layout;

/// GPS position reported by an OST tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoFix {
    /// Always 1; kept for consumers that test the flag.
    #[serde(rename = "value")]
    pub valid: u8,
    pub lat: f64,
    pub lng: f64,
}

impl GeoFix {
    /// `None` when either coordinate is the `0.0` sentinel.
    pub fn from_coordinates(lat: f64, lng: f64) -> Option<Self> {
        if lat == 0.0 || lng == 0.0 {
            return None;
        }
        Some(Self { valid: 1, lat, lng })
    }
}

/// Decoded OST frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OstReading {
    /// Collar cut-off / sensor status bit.
    #[serde(rename = "Status_Sensor")]
    pub sensor_status: u8,
    #[serde(rename = "Alarma_Geocerca")]
    pub geofence_alarm: u8,
    #[serde(rename = "Pasos")]
    pub steps: u16,
    /// Serialized as `null` when there is no fix.
    pub gps: Option<GeoFix>,
    /// Volts.
    #[serde(rename = "Vpanel")]
    pub panel_voltage: f64,
    #[serde(rename = "Pbat")]
    pub battery_percent: u8,
}

/// Decode a 24-digit OST frame.
///
/// # Examples
/// ```
/// use tinyframe_core::devices::ost::parse_ost;
///
/// let reading = parse_ost("C00A0000000000000000140A")?;
/// assert_eq!(reading.sensor_status, 1);
/// assert_eq!(reading.geofence_alarm, 1);
/// assert_eq!(reading.panel_voltage, 2.0);
/// assert_eq!(reading.battery_percent, 10);
/// assert!(reading.gps.is_none());
/// # Ok::<(), tinyframe_core::DecodeError>(())
/// ```
pub fn parse_ost(frame: &str) -> Result<OstReading, DecodeError> {
    let fields = decode_fields(&layout::LAYOUT, frame)?;

    // Masks bound these to 1, 1 and 0x0FFF.
    let sensor_status = fields.unsigned(layout::SENSOR_STATUS.name)? as u8;
    let geofence_alarm = fields.unsigned(layout::GEOFENCE_ALARM.name)? as u8;
    let steps = fields.unsigned(layout::STEPS.name)? as u16;

    let gps = GeoFix::from_coordinates(
        fields.float(layout::LATITUDE.name)?,
        fields.float(layout::LONGITUDE.name)?,
    );
    let panel_voltage =
        f64::from(fields.unsigned(layout::PANEL_VOLTAGE.name)?) / layout::PANEL_VOLTAGE_DIVISOR;
    let battery_percent = percent(
        layout::BATTERY.name,
        fields.unsigned(layout::BATTERY.name)?,
    )?;

    Ok(OstReading {
        sensor_status,
        geofence_alarm,
        steps,
        gps,
        panel_voltage,
        battery_percent,
    })
}
