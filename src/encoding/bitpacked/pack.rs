use seq_macro::seq;

use super::GROUP_LEN;

/// Packs 8 `u32` into `packed` using `num_bits` per value, LSB first.
/// Bits above `num_bits` of each value are ignored.
/// # Panics
/// This function panics iff `packed.len() < num_bits`.
pub fn pack8(unpacked: &[u32; GROUP_LEN], packed: &mut [u8], num_bits: usize) {
    if num_bits == 0 {
        return;
    }
    let packed = &mut packed[..num_bits];
    let mask = (1u64 << num_bits) - 1;

    // invariant: `bits < 8` before each value is added, so the buffer never exceeds 40 bits.
    let mut buffer = 0u64;
    let mut bits = 0;
    let mut out = 0;
    seq!(i in 0..8 {
        buffer |= (u64::from(unpacked[i]) & mask) << bits;
        bits += num_bits;
        while bits >= 8 {
            packed[out] = buffer as u8;
            out += 1;
            buffer >>= 8;
            bits -= 8;
        }
    });
    debug_assert_eq!(bits, 0);
    debug_assert_eq!(out, num_bits);
}
