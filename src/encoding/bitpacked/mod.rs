//! Packing of groups of 8 `u32` into `num_bits * 8` contiguous bits, LSB first.
mod pack;
mod unpack;

pub use pack::pack8 as pack;
pub use unpack::unpack8 as unpack;

/// The number of values in a bitpacked group.
pub const GROUP_LEN: usize = 8;

/// An iterator over the `u32` bitpacked in `compressed`, unpacked one group at a time.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    compressed_chunks: std::slice::Chunks<'a, u8>,
    num_bits: usize,
    remaining: usize,
    current_pack_index: usize, // invariant: <= GROUP_LEN
    current_pack: [u32; GROUP_LEN],
}

impl<'a> Decoder<'a> {
    /// Returns a new [`Decoder`] yielding `length` values.
    /// With `num_bits == 0` every value is zero and `compressed` is ignored.
    pub fn new(compressed: &'a [u8], num_bits: usize, length: usize) -> Self {
        // with no bits, there is nothing to chunk; every group unpacks to zeros.
        let compressed_chunks = compressed.chunks(num_bits.max(1));

        Self {
            remaining: length,
            compressed_chunks,
            num_bits,
            current_pack: [0; GROUP_LEN],
            current_pack_index: GROUP_LEN,
        }
    }
}

impl<'a> Iterator for Decoder<'a> {
    type Item = u32;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        if self.current_pack_index == GROUP_LEN {
            if let Some(chunk) = self.compressed_chunks.next() {
                unpack(chunk, &mut self.current_pack, self.num_bits);
            } else {
                self.current_pack = [0; GROUP_LEN];
            }
            self.current_pack_index = 0;
        }
        let result = self.current_pack[self.current_pack_index];
        self.current_pack_index += 1;
        self.remaining -= 1;
        Some(result)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a> ExactSizeIterator for Decoder<'a> {}
