use thiserror::Error;

/// Structural problems with a hex frame or a hex field.
///
/// # Examples
/// ```
/// use tinyframe_core::FormatError;
///
/// let err = FormatError::WrongLength { family: "ost", expected: 24, actual: 22 };
/// assert!(err.to_string().contains("expected 24 hex digits"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("wrong frame length for {family}: expected {expected} hex digits, got {actual}")]
    WrongLength {
        family: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("odd number of hex digits: {length}")]
    OddLength { length: usize },
    #[error("invalid hex character {character:?} at index {index}")]
    InvalidHexCharacter { character: char, index: usize },
    #[error("float32 field needs 8 hex digits, got {actual}")]
    FloatWidth { actual: usize },
    #[error("integer field must be 1 to 8 hex digits, got {width}")]
    IntegerWidth { width: usize },
    #[error("field {start}..{end} out of bounds for frame of {len} hex digits")]
    OutOfBounds { start: usize, end: usize, len: usize },
}

/// Errors returned while turning an uplink into a reading.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("malformed frame: {0}")]
    Format(#[from] FormatError),
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },
    #[error("{field} out of range: {value} not in {min}..={max}")]
    Range {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{family} layout has no {field} field of the requested encoding")]
    Layout {
        family: &'static str,
        field: &'static str,
    },
}

/// Failure reported by a [`crate::Publisher`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("publish failed: {message}")]
pub struct PublishError {
    pub message: String,
}

impl PublishError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
