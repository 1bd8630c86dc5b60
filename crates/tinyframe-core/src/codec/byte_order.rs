use crate::error::FormatError;

use super::digits::validate_hex;

/// Reverse the byte order of a hex string, one digit pair at a time.
///
/// Applying it twice returns the input unchanged, including digit case.
///
/// # Examples
/// ```
/// use tinyframe_core::codec::reverse_bytes;
///
/// assert_eq!(reverse_bytes("0000CC41").unwrap(), "41CC0000");
/// ```
pub fn reverse_bytes(digits: &str) -> Result<String, FormatError> {
    validate_hex(digits)?;
    let mut reversed = String::with_capacity(digits.len());
    for pair in digits.as_bytes().rchunks_exact(2) {
        reversed.push(char::from(pair[0]));
        reversed.push(char::from(pair[1]));
    }
    Ok(reversed)
}
