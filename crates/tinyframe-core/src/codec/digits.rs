use hex::FromHexError;

use crate::error::FormatError;

/// Check that `digits` is an even-length run of ASCII hex digits.
pub fn validate_hex(digits: &str) -> Result<(), FormatError> {
    hex::decode(digits).map(|_| ()).map_err(|err| match err {
        FromHexError::InvalidHexCharacter { c, index } => FormatError::InvalidHexCharacter {
            character: c,
            index,
        },
        FromHexError::OddLength | FromHexError::InvalidStringLength => FormatError::OddLength {
            length: digits.len(),
        },
    })
}

/// Parse 1 to 8 hex digits as an unsigned 32-bit integer.
///
/// Unlike `u32::from_str_radix`, a leading `+` is rejected.
pub fn parse_u32(digits: &str) -> Result<u32, FormatError> {
    if let Some((index, character)) = digits.char_indices().find(|(_, c)| !c.is_ascii_hexdigit()) {
        return Err(FormatError::InvalidHexCharacter { character, index });
    }
    if digits.is_empty() || digits.len() > 8 {
        return Err(FormatError::IntegerWidth {
            width: digits.len(),
        });
    }
    u32::from_str_radix(digits, 16).map_err(|_| FormatError::IntegerWidth {
        width: digits.len(),
    })
}
