mod roundtrip;
mod sink;

use hybrid_rle::error::Result;
use hybrid_rle::{decode, encode};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Encodes and decodes `values`, returning the encoded stream.
pub fn roundtrip(values: &[u32], num_bits: u32) -> Result<Vec<u8>> {
    let encoded = encode(values.iter().copied(), num_bits)?;
    let decoded = decode(&encoded, num_bits, values.len())?;
    assert_eq!(decoded, values, "bit width {}", num_bits);
    Ok(encoded)
}
