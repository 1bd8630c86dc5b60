use crate::devices::layout::{Encoding, FieldSpec, FrameLayout};

pub const FRAME_HEX_DIGITS: usize = 48;

pub const BATTERY: FieldSpec = FieldSpec::new("battery", 6, 2, Encoding::UnsignedInt);
pub const TEMPERATURE: FieldSpec = FieldSpec::new("temperature", 10, 8, Encoding::Float32Le);
pub const OXYGEN_SATURATION_PERCENT: FieldSpec =
    FieldSpec::new("oxygen_saturation_percent", 20, 8, Encoding::Float32Le);
pub const OXYGEN_MG_PER_L: FieldSpec =
    FieldSpec::new("oxygen_mg_per_l", 30, 8, Encoding::Float32Le);
pub const OXYGEN_PPM: FieldSpec = FieldSpec::new("oxygen_ppm", 40, 8, Encoding::Float32Le);

pub const LAYOUT: FrameLayout = FrameLayout {
    family: "swx",
    frame_len: FRAME_HEX_DIGITS,
    fields: &[
        BATTERY,
        TEMPERATURE,
        OXYGEN_SATURATION_PERCENT,
        OXYGEN_MG_PER_L,
        OXYGEN_PPM,
    ],
};
