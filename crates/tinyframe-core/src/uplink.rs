//! Transport metadata as delivered by the network server.
//!
//! LORIOT forwards each uplink into an AWS IoT device shadow; the decoder
//! is triggered with the shadow update document and reads the reported
//! state. Only the keys below are consumed, everything else is ignored.

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// Radio metrics of one receiving gateway.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GatewayReport {
    /// dBm.
    #[serde(default)]
    pub rssi: Option<i32>,
    /// dB.
    #[serde(default)]
    pub snr: Option<f64>,
}

/// Reported uplink state: raw frame plus transport metadata.
///
/// Every field is optional at this level so that a missing key becomes a
/// [`DecodeError::MissingField`] instead of a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Uplink {
    #[serde(default)]
    pub data: Option<String>,
    #[serde(rename = "EUI", default)]
    pub eui: Option<String>,
    #[serde(default)]
    pub fcnt: Option<u32>,
    #[serde(default)]
    pub gws: Option<Vec<GatewayReport>>,
}

/// Metadata copied into the output envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct UplinkMetadata {
    pub dev_eui: String,
    pub fcnt: u32,
    pub rssi: Option<i32>,
    pub snr: Option<f64>,
}

impl Uplink {
    /// The raw hex frame.
    pub fn frame(&self) -> Result<&str, DecodeError> {
        self.data
            .as_deref()
            .ok_or(DecodeError::MissingField { field: "data" })
    }

    /// Radio metrics of the first gateway report, if any.
    pub fn first_gateway(&self) -> Option<&GatewayReport> {
        self.gws.as_ref().and_then(|gws| gws.first())
    }

    /// Extract the envelope metadata, failing on the first missing key.
    ///
    /// # Examples
    /// ```
    /// use tinyframe_core::Uplink;
    ///
    /// let uplink: Uplink = serde_json::from_str(
    ///     r#"{"EUI": "70B3D5E75E00A1B2", "fcnt": 42, "data": "00", "gws": []}"#,
    /// )?;
    /// let meta = uplink.metadata()?;
    /// assert_eq!(meta.fcnt, 42);
    /// assert_eq!(meta.rssi, None);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn metadata(&self) -> Result<UplinkMetadata, DecodeError> {
        let dev_eui = self
            .eui
            .clone()
            .ok_or(DecodeError::MissingField { field: "EUI" })?;
        let fcnt = self.fcnt.ok_or(DecodeError::MissingField { field: "fcnt" })?;
        let gateway = self.first_gateway();
        Ok(UplinkMetadata {
            dev_eui,
            fcnt,
            rssi: gateway.and_then(|gw| gw.rssi),
            snr: gateway.and_then(|gw| gw.snr),
        })
    }
}

/// AWS IoT shadow update document wrapping an [`Uplink`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShadowEvent {
    pub current: ShadowDocument,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShadowDocument {
    pub state: ShadowState,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShadowState {
    pub reported: Uplink,
}

impl ShadowEvent {
    pub fn reported(&self) -> &Uplink {
        &self.current.state.reported
    }
}

impl From<Uplink> for ShadowEvent {
    fn from(reported: Uplink) -> Self {
        Self {
            current: ShadowDocument {
                state: ShadowState { reported },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{GatewayReport, ShadowEvent, Uplink};
    use crate::error::DecodeError;

    #[test]
    fn metadata_uses_first_gateway_only() {
        let uplink: Uplink = serde_json::from_str(
            r#"{
                "EUI": "70B3D5E75E00A1B2",
                "fcnt": 7,
                "data": "00",
                "gws": [{"rssi": -97, "snr": 8.5, "gweui": "x"}, {"rssi": -60, "snr": 12.0}]
            }"#,
        )
        .unwrap();
        let meta = uplink.metadata().unwrap();
        assert_eq!(meta.dev_eui, "70B3D5E75E00A1B2");
        assert_eq!(meta.fcnt, 7);
        assert_eq!(meta.rssi, Some(-97));
        assert_eq!(meta.snr, Some(8.5));
    }

    #[test]
    fn absent_null_or_empty_gateways_leave_metrics_absent() {
        for gws in ["", r#", "gws": null"#, r#", "gws": []"#] {
            let json = format!(r#"{{"EUI": "A", "fcnt": 1{gws}}}"#);
            let uplink: Uplink = serde_json::from_str(&json).unwrap();
            let meta = uplink.metadata().unwrap();
            assert_eq!(meta.rssi, None, "gws {gws:?}");
            assert_eq!(meta.snr, None, "gws {gws:?}");
        }
    }

    #[test]
    fn zero_metrics_are_kept_as_zero() {
        let uplink = Uplink {
            eui: Some("A".to_string()),
            fcnt: Some(0),
            gws: Some(vec![GatewayReport {
                rssi: Some(0),
                snr: None,
            }]),
            ..Uplink::default()
        };
        let meta = uplink.metadata().unwrap();
        assert_eq!(meta.rssi, Some(0));
        assert_eq!(meta.snr, None);
    }

    #[test]
    fn missing_keys_are_named() {
        let uplink = Uplink::default();
        assert_eq!(
            uplink.metadata(),
            Err(DecodeError::MissingField { field: "EUI" })
        );
        assert_eq!(uplink.frame(), Err(DecodeError::MissingField { field: "data" }));

        let uplink = Uplink {
            eui: Some("A".to_string()),
            ..Uplink::default()
        };
        assert_eq!(
            uplink.metadata(),
            Err(DecodeError::MissingField { field: "fcnt" })
        );
    }

    #[test]
    fn shadow_event_exposes_reported_state() {
        let event: ShadowEvent = serde_json::from_str(
            r#"{
                "previous": {"state": {"reported": {"data": "FF"}}},
                "current": {"state": {"reported": {"EUI": "A", "fcnt": 3, "data": "00"}}},
                "timestamp": 1700000000
            }"#,
        )
        .unwrap();
        assert_eq!(event.reported().frame().unwrap(), "00");
        assert_eq!(event.reported().fcnt, Some(3));
    }
}
