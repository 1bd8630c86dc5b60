use crate::devices::layout::{Encoding, FieldSpec, FrameLayout};

pub const FRAME_HEX_DIGITS: usize = 24;

pub const SENSOR_STATUS: FieldSpec = FieldSpec::new(
    "sensor_status",
    0,
    2,
    Encoding::MaskedBitfield { mask: 0x80, shift: 7 },
);
pub const GEOFENCE_ALARM: FieldSpec = FieldSpec::new(
    "geofence_alarm",
    0,
    2,
    Encoding::MaskedBitfield { mask: 0x40, shift: 6 },
);
// Low nibble of the status byte plus the whole second byte.
pub const STEPS: FieldSpec = FieldSpec::new(
    "steps",
    1,
    3,
    Encoding::MaskedBitfield {
        mask: 0x0FFF,
        shift: 0,
    },
);
pub const LATITUDE: FieldSpec = FieldSpec::new("latitude", 4, 8, Encoding::Float32Be);
pub const LONGITUDE: FieldSpec = FieldSpec::new("longitude", 12, 8, Encoding::Float32Be);
pub const PANEL_VOLTAGE: FieldSpec = FieldSpec::new("panel_voltage", 20, 2, Encoding::UnsignedInt);
pub const BATTERY: FieldSpec = FieldSpec::new("battery", 22, 2, Encoding::UnsignedInt);

/// Panel voltage is transmitted in tenths of a volt.
pub const PANEL_VOLTAGE_DIVISOR: f64 = 10.0;

pub const LAYOUT: FrameLayout = FrameLayout {
    family: "ost",
    frame_len: FRAME_HEX_DIGITS,
    fields: &[
        SENSOR_STATUS,
        GEOFENCE_ALARM,
        STEPS,
        LATITUDE,
        LONGITUDE,
        PANEL_VOLTAGE,
        BATTERY,
    ],
};
