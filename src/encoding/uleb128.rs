//! Unsigned LEB128 variable-length integers.
use crate::error::{Error, Result};

/// The maximum number of bytes a `u64` takes when encoded.
pub const MAX_ENCODED_LEN: usize = 10;

/// Decodes a `u64` from the start of `values`, returning it and the number of bytes it took.
/// # Errors
/// Errors if `values` ends before the last byte of the integer, or if the integer
/// does not fit in a `u64`.
pub fn decode(values: &[u8]) -> Result<(u64, usize)> {
    let mut result = 0;
    let mut shift = 0;

    for (consumed, byte) in values.iter().enumerate() {
        if shift == 63 && *byte > 1 {
            return Err(malformed_err!("varint does not fit in 64 bits"));
        };

        result |= u64::from(byte & 0x7f) << shift;

        if byte & 0x80 == 0 {
            return Ok((result, consumed + 1));
        }

        shift += 7;
    }
    Err(malformed_err!(
        "varint truncated after {} bytes",
        values.len()
    ))
}

/// Encodes `value` into `container`, returning the number of bytes written.
pub fn encode(mut value: u64, container: &mut [u8; MAX_ENCODED_LEN]) -> usize {
    let mut consumed = 0;
    loop {
        let mut byte = (value as u8) & !128;
        value >>= 7;
        if value != 0 {
            byte |= 128;
        }
        container[consumed] = byte;
        consumed += 1;
        if value == 0 {
            return consumed;
        }
    }
}
