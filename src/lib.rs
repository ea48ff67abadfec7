//! Encoder and decoder of parquet's RLE / bit-packing hybrid encoding, used for
//! repetition and definition levels, dictionary indices and booleans.
//!
//! The bit width of the values and their number are agreed out of band between
//! the writer and the reader; neither is stored in the stream.
//!
//! ```
//! use hybrid_rle::{decode, encode, get_bit_width};
//!
//! let values = vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 2, 3, 4, 5, 6, 7];
//! let num_bits = get_bit_width(7);
//! let encoded = encode(values.iter().copied(), num_bits)?;
//! assert_eq!(decode(&encoded, num_bits, values.len())?, values);
//! # Ok::<(), hybrid_rle::error::Error>(())
//! ```
#[macro_use]
pub mod error;

pub mod encoding;

pub use encoding::get_bit_width;
pub use encoding::hybrid_rle::{
    decode, decode_prefixed, encode, encode_prefixed, Decoder, Encoder, HybridEncoded,
    HybridRleIter, RunHeader, SeekSink, Sink, MAX_BITPACKED_GROUPS, MIN_RLE_REPEATS,
};
