use crate::error::DecodeError;

use super::layout::FrameLayout;
use super::reader::FrameReader;

/// Value of a single decoded field, before family-specific interpretation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Unsigned(u32),
    Float(f64),
}

/// Every field of one frame, in layout order.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedFields {
    family: &'static str,
    values: Vec<(&'static str, FieldValue)>,
}

impl DecodedFields {
    pub fn family(&self) -> &'static str {
        self.family
    }

    pub fn get(&self, field: &str) -> Option<FieldValue> {
        self.values
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| *value)
    }

    pub fn unsigned(&self, field: &'static str) -> Result<u32, DecodeError> {
        match self.get(field) {
            Some(FieldValue::Unsigned(value)) => Ok(value),
            _ => Err(self.layout_error(field)),
        }
    }

    pub fn float(&self, field: &'static str) -> Result<f64, DecodeError> {
        match self.get(field) {
            Some(FieldValue::Float(value)) => Ok(value),
            _ => Err(self.layout_error(field)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, FieldValue)> + '_ {
        self.values.iter().copied()
    }

    fn layout_error(&self, field: &'static str) -> DecodeError {
        DecodeError::Layout {
            family: self.family,
            field,
        }
    }
}

/// Decode every field of `layout` from `frame`.
///
/// The frame is validated as a whole before any field is read, so a
/// malformed frame never yields a partial result.
pub fn decode_fields(layout: &FrameLayout, frame: &str) -> Result<DecodedFields, DecodeError> {
    let reader = FrameReader::new(layout, frame)?;
    let values = layout
        .fields
        .iter()
        .map(|field| reader.read_field(field).map(|value| (field.name, value)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(DecodedFields {
        family: layout.family,
        values,
    })
}

/// Reject a percentage outside `0..=100`.
pub(crate) fn percent(field: &'static str, value: u32) -> Result<u8, DecodeError> {
    match u8::try_from(value) {
        Ok(percent) if percent <= 100 => Ok(percent),
        _ => Err(DecodeError::Range {
            field,
            value: f64::from(value),
            min: 0.0,
            max: 100.0,
        }),
    }
}
