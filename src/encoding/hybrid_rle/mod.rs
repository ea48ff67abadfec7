// See https://github.com/apache/parquet-format/blob/master/Encodings.md#run-length-encoding--bit-packing-hybrid-rle--3
mod decoder;
mod encoder;
mod sink;

pub use decoder::{Decoder, HybridRleIter};
pub use encoder::{Encoder, MAX_BITPACKED_GROUPS, MIN_RLE_REPEATS};
pub use sink::{SeekSink, Sink};

use crate::encoding::{get_length, write_le};
use crate::error::{Error, Result};

/// The header of a run: the first varint of every run, whose lowest bit tells
/// a bitpacked run from an RLE run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunHeader {
    /// A value repeated this number of times.
    Rle(usize),
    /// This number of groups of 8 bitpacked values.
    Bitpacked(usize),
}

impl RunHeader {
    /// Returns the [`RunHeader`] of a decoded varint.
    pub fn from_indicator(indicator: u64) -> Result<Self> {
        let length = usize::try_from(indicator >> 1).map_err(|_| {
            malformed_err!("run length {} does not fit in usize", indicator >> 1)
        })?;
        Ok(if indicator & 1 == 1 {
            RunHeader::Bitpacked(length)
        } else {
            RunHeader::Rle(length)
        })
    }

    /// Returns the varint that encodes this header.
    pub fn indicator(&self) -> u64 {
        match self {
            RunHeader::Rle(count) => (*count as u64) << 1,
            RunHeader::Bitpacked(groups) => ((*groups as u64) << 1) | 1,
        }
    }
}

/// A run of a hybrid RLE stream, as yielded by [`HybridRleIter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HybridEncoded<'a> {
    /// A bitpacked slice of whole groups of 8 values. `run_length` values are to be taken
    /// from it; the remaining ones are padding.
    Bitpacked {
        compressed: &'a [u8],
        num_bits: usize,
        run_length: usize,
    },
    /// A value repeated `run_length` times.
    Rle { value: u32, run_length: usize },
}

/// Encodes `values` of `num_bits` each.
/// # Errors
/// Errors if `num_bits > 32` or if a value does not fit in `num_bits`.
pub fn encode<I: IntoIterator<Item = u32>>(values: I, num_bits: u32) -> Result<Vec<u8>> {
    let mut encoder = Encoder::new(num_bits)?;
    values
        .into_iter()
        .try_for_each(|value| encoder.write_int(value))?;
    encoder.finish()
}

/// Decodes `length` values of `num_bits` each. Either all values are returned or none.
pub fn decode(values: &[u8], num_bits: u32, length: usize) -> Result<Vec<u32>> {
    Decoder::try_new(values, num_bits, length)?.collect()
}

/// Encodes `values` of `num_bits` each, preceded by the length of the encoded
/// stream as a 4-byte little-endian integer.
pub fn encode_prefixed<I: IntoIterator<Item = u32>>(values: I, num_bits: u32) -> Result<Vec<u8>> {
    let mut encoder = Encoder::with_sink(vec![0; 4], num_bits)?;
    values
        .into_iter()
        .try_for_each(|value| encoder.write_int(value))?;
    let mut buffer = encoder.finish()?;

    let length = u32::try_from(buffer.len() - 4).map_err(|_| {
        general_err!("encoded stream of {} bytes is too long for its length prefix", buffer.len() - 4)
    })?;
    write_le(length, &mut buffer[..4]);
    Ok(buffer)
}

/// Decodes `length` values of `num_bits` each from a stream preceded by its length
/// as a 4-byte little-endian integer. The stream must hold exactly `length` values.
pub fn decode_prefixed(values: &[u8], num_bits: u32, length: usize) -> Result<Vec<u32>> {
    let stream_length = get_length(values)? as usize;
    let stream = values[4..].get(..stream_length).ok_or_else(|| {
        malformed_err!(
            "length prefix announces {} bytes but only {} follow",
            stream_length,
            values.len() - 4
        )
    })?;

    let mut decoder = Decoder::try_new(stream, num_bits, length)?;
    let result = decoder.by_ref().collect::<Result<Vec<_>>>()?;
    if decoder.consumed_bytes() != stream.len() {
        return Err(malformed_err!(
            "{} bytes remain after the {} expected values",
            stream.len() - decoder.consumed_bytes(),
            length
        ));
    }
    Ok(result)
}
