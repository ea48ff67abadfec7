use seq_macro::seq;

use super::GROUP_LEN;

/// Unpacks 8 `u32` of `num_bits` each from `packed`, LSB first.
/// Missing trailing bytes in `packed` are read as zeros.
pub fn unpack8(packed: &[u8], unpacked: &mut [u32; GROUP_LEN], num_bits: usize) {
    if num_bits == 0 {
        *unpacked = [0; GROUP_LEN];
        return;
    }
    let mask = (1u64 << num_bits) - 1;

    // `bits < num_bits <= 32` before a byte is shifted in, so the buffer never
    // holds more than 40 bits
    let mut bytes = packed.iter();
    let mut buffer = 0u64;
    let mut bits = 0;
    seq!(i in 0..8 {
        while bits < num_bits {
            buffer |= u64::from(bytes.next().copied().unwrap_or(0)) << bits;
            bits += 8;
        }
        unpacked[i] = (buffer & mask) as u32;
        buffer >>= num_bits;
        bits -= num_bits;
    });
    debug_assert_eq!(bits, 0);
    debug_assert_eq!(buffer, 0);
}
