use crate::error::{Error, Result};

pub mod bitpacked;
pub mod hybrid_rle;
pub mod uleb128;

/// The largest bit width a value may be encoded with.
pub const MAX_BIT_WIDTH: u32 = 32;

/// Reads the 4-byte little-endian length prefix of `values`.
pub fn get_length(values: &[u8]) -> Result<u32> {
    values
        .get(..4)
        .map(read_le)
        .ok_or_else(|| malformed_err!("a length prefix needs 4 bytes, got {}", values.len()))
}

/// Returns the number of bits needed to represent `max_value`.
#[inline]
pub fn get_bit_width(max_value: u32) -> u32 {
    32 - max_value.leading_zeros()
}

/// Returns the ceil of value/8
#[inline]
pub fn ceil8(value: usize) -> usize {
    value / 8 + ((value % 8 != 0) as usize)
}

/// Writes the `container.len()` least significant bytes of `value`, little-endian.
/// Bytes beyond the width of a `u32` are zero.
#[inline]
pub fn write_le(value: u32, container: &mut [u8]) {
    let bytes = value.to_le_bytes();
    container.iter_mut().enumerate().for_each(|(i, byte)| {
        *byte = bytes.get(i).copied().unwrap_or(0);
    });
}

/// Reads a little-endian integer from up to the first 4 bytes of `values`,
/// zero-extended.
#[inline]
pub fn read_le(values: &[u8]) -> u32 {
    let mut bytes = [0u8; std::mem::size_of::<u32>()];
    values
        .iter()
        .zip(bytes.iter_mut())
        .for_each(|(value, byte)| *byte = *value);
    u32::from_le_bytes(bytes)
}

pub(crate) fn check_bit_width(num_bits: u32) -> Result<()> {
    if num_bits > MAX_BIT_WIDTH {
        Err(invalid_err!(
            "bit width must be at most {}, got {}",
            MAX_BIT_WIDTH,
            num_bits
        ))
    } else {
        Ok(())
    }
}
