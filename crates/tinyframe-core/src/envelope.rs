use serde::{Deserialize, Serialize};

use crate::devices::SensorData;
use crate::uplink::UplinkMetadata;

/// Structure handed to the publisher: flat transport metadata with the
/// reading nested under `sensor_data`.
///
/// # Examples
/// ```
/// use tinyframe_core::{DeviceFamily, UplinkMetadata, assemble, decode_frame};
///
/// let meta = UplinkMetadata {
///     dev_eui: "70B3D5E75E00A1B2".to_string(),
///     fcnt: 1,
///     rssi: None,
///     snr: None,
/// };
/// let reading = decode_frame(DeviceFamily::Ost, "C00A0000000000000000140A")?;
/// let value = serde_json::to_value(assemble(&meta, reading))?;
/// assert_eq!(value["Fcnt"], 1);
/// assert!(value.get("Rssi").is_none());
/// assert_eq!(value["sensor_data"]["Pbat"], 10);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "Dev_EUI")]
    pub dev_eui: String,
    #[serde(rename = "Fcnt")]
    pub fcnt: u32,
    /// Omitted when no gateway reported it.
    #[serde(rename = "Rssi", default, skip_serializing_if = "Option::is_none")]
    pub rssi: Option<i32>,
    /// Omitted when no gateway reported it.
    #[serde(rename = "Snr", default, skip_serializing_if = "Option::is_none")]
    pub snr: Option<f64>,
    pub sensor_data: SensorData,
}

/// Merge transport metadata with a decoded reading.
pub fn assemble(metadata: &UplinkMetadata, reading: SensorData) -> Envelope {
    Envelope {
        dev_eui: metadata.dev_eui.clone(),
        fcnt: metadata.fcnt,
        rssi: metadata.rssi,
        snr: metadata.snr,
        sensor_data: reading,
    }
}
