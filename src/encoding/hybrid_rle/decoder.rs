use log::trace;

use crate::encoding::bitpacked::{self, GROUP_LEN};
use crate::encoding::{ceil8, check_bit_width, read_le, uleb128};
use crate::error::{Error, Result};

use super::{HybridEncoded, RunHeader};

/// An iterator over the runs of a hybrid RLE stream expected to hold `length` values.
///
/// Each run is truncated to the values still expected, so that the zero padding of a
/// trailing bitpacked group is never yielded. After an error the iterator is exhausted.
#[derive(Debug, Clone)]
pub struct HybridRleIter<'a> {
    values: &'a [u8],
    consumed_bytes: usize,
    num_bits: usize,
    remaining: usize,
}

impl<'a> HybridRleIter<'a> {
    /// Returns a new [`HybridRleIter`].
    /// # Errors
    /// Errors iff `num_bits > 32`.
    pub fn try_new(values: &'a [u8], num_bits: u32, length: usize) -> Result<Self> {
        check_bit_width(num_bits)?;
        Ok(Self {
            values,
            consumed_bytes: 0,
            num_bits: num_bits as usize,
            remaining: length,
        })
    }

    /// The number of values not yet covered by a yielded run.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// The number of bytes of the stream consumed so far.
    pub fn consumed_bytes(&self) -> usize {
        self.consumed_bytes
    }

    fn advance(&mut self, bytes: usize) {
        self.values = &self.values[bytes..];
        self.consumed_bytes += bytes;
    }

    fn next_run(&mut self) -> Result<HybridEncoded<'a>> {
        if self.values.is_empty() {
            return Err(malformed_err!(
                "stream ended with {} values still expected",
                self.remaining
            ));
        }
        let offset = self.consumed_bytes;
        let (indicator, consumed) = uleb128::decode(self.values)?;
        self.advance(consumed);

        match RunHeader::from_indicator(indicator)? {
            RunHeader::Bitpacked(groups) => {
                if groups == 0 {
                    return Err(malformed_err!("empty bitpacked run at byte {}", offset));
                }
                let num_bytes = groups
                    .checked_mul(self.num_bits)
                    .filter(|num_bytes| *num_bytes <= self.values.len())
                    .ok_or_else(|| {
                        malformed_err!(
                            "bitpacked run of {} groups of {} bytes at byte {} exceeds the {} remaining bytes",
                            groups,
                            self.num_bits,
                            offset,
                            self.values.len()
                        )
                    })?;
                let length = groups.saturating_mul(GROUP_LEN);
                // only the padding of a trailing group may go past the expected values
                if length.saturating_sub(self.remaining) >= GROUP_LEN {
                    return Err(malformed_err!(
                        "bitpacked run of {} values at byte {} overruns the {} values still expected",
                        length,
                        offset,
                        self.remaining
                    ));
                }
                trace!("bitpacked run at byte {}: groups={}", offset, groups);

                let run_length = length.min(self.remaining);
                let compressed = &self.values[..num_bytes];
                self.advance(num_bytes);
                self.remaining -= run_length;
                Ok(HybridEncoded::Bitpacked {
                    compressed,
                    num_bits: self.num_bits,
                    run_length,
                })
            }
            RunHeader::Rle(run_length) => {
                if run_length == 0 {
                    return Err(malformed_err!("empty rle run at byte {}", offset));
                }
                if run_length > self.remaining {
                    return Err(malformed_err!(
                        "rle run of {} values at byte {} overruns the {} values still expected",
                        run_length,
                        offset,
                        self.remaining
                    ));
                }
                // repeated-value := value that is repeated, using a fixed-width of round-up-to-next-byte(bit-width)
                let rle_bytes = ceil8(self.num_bits);
                let pack = self.values.get(..rle_bytes).ok_or_else(|| {
                    malformed_err!("rle run at byte {} ends before its value", offset)
                })?;
                let value = read_le(pack);
                if self.num_bits < 32 && value >> self.num_bits != 0 {
                    return Err(invalid_err!(
                        "rle value {} at byte {} does not fit in {} bits",
                        value,
                        offset,
                        self.num_bits
                    ));
                }
                trace!(
                    "rle run at byte {}: value={}, repeats={}",
                    offset,
                    value,
                    run_length
                );

                self.advance(rle_bytes);
                self.remaining -= run_length;
                Ok(HybridEncoded::Rle { value, run_length })
            }
        }
    }
}

impl<'a> Iterator for HybridRleIter<'a> {
    type Item = Result<HybridEncoded<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let run = self.next_run();
        if run.is_err() {
            self.remaining = 0;
        }
        Some(run)
    }
}

impl<'a> std::iter::FusedIterator for HybridRleIter<'a> {}

#[derive(Debug, Clone)]
enum State<'a> {
    Bitpacked(bitpacked::Decoder<'a>),
    Rle { value: u32, remaining: usize },
    Finished,
}

/// An iterator over the `u32` of a hybrid RLE stream.
///
/// Values are decoded lazily, run by run. It yields exactly `length` values, or stops
/// after yielding the first error.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    runs: HybridRleIter<'a>,
    state: State<'a>,
}

impl<'a> Decoder<'a> {
    /// Returns a new [`Decoder`] of `length` values of `num_bits` each.
    /// # Errors
    /// Errors iff `num_bits > 32`.
    pub fn try_new(values: &'a [u8], num_bits: u32, length: usize) -> Result<Self> {
        Ok(Self {
            runs: HybridRleIter::try_new(values, num_bits, length)?,
            state: State::Finished,
        })
    }

    /// The number of bytes of the stream consumed so far.
    pub fn consumed_bytes(&self) -> usize {
        self.runs.consumed_bytes()
    }

    fn remaining(&self) -> usize {
        let in_run = match &self.state {
            State::Bitpacked(decoder) => decoder.len(),
            State::Rle { remaining, .. } => *remaining,
            State::Finished => 0,
        };
        in_run + self.runs.remaining()
    }
}

impl<'a> Iterator for Decoder<'a> {
    type Item = Result<u32>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match &mut self.state {
                State::Bitpacked(decoder) => {
                    if let Some(value) = decoder.next() {
                        return Some(Ok(value));
                    }
                }
                State::Rle { value, remaining } => {
                    if *remaining > 0 {
                        *remaining -= 1;
                        return Some(Ok(*value));
                    }
                }
                State::Finished => {}
            };
            self.state = match self.runs.next()? {
                Ok(HybridEncoded::Bitpacked {
                    compressed,
                    num_bits,
                    run_length,
                }) => State::Bitpacked(bitpacked::Decoder::new(compressed, num_bits, run_length)),
                Ok(HybridEncoded::Rle { value, run_length }) => State::Rle {
                    value,
                    remaining: run_length,
                },
                Err(e) => return Some(Err(e)),
            };
        }
    }

    /// The number of values still expected. A malformed stream yields its error in
    /// place of these values and ends there.
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl<'a> std::iter::FusedIterator for Decoder<'a> {}
