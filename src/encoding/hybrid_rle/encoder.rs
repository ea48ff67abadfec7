use log::{debug, trace};

use crate::encoding::bitpacked::{self, GROUP_LEN};
use crate::encoding::{ceil8, check_bit_width, uleb128, write_le};
use crate::error::{Error, Result};

use super::sink::Sink;
use super::RunHeader;

/// The number of consecutive repeats from which a value is written as an RLE run.
pub const MIN_RLE_REPEATS: usize = 8;

/// The maximum number of groups of a bitpacked run, so that its header
/// `(groups << 1) | 1` fits in the single byte reserved for it.
pub const MAX_BITPACKED_GROUPS: usize = 63;

/// Streaming encoder of the RLE / bit-packing hybrid.
///
/// Values are fed one at a time with [`Encoder::write_int`]. Repeats of a value are
/// counted; once a value repeats [`MIN_RLE_REPEATS`] times it is no longer buffered and
/// the repetition is written as a single RLE run when a different value arrives (or on
/// [`Encoder::finish`]). Everything else is bitpacked in groups of 8 values, appended
/// to an open bitpacked run whose header byte is patched when the run closes.
#[derive(Debug)]
pub struct Encoder<S: Sink = Vec<u8>> {
    sink: S,
    num_bits: usize,
    length: usize,

    previous_value: u32,
    // consecutive occurrences of `previous_value`, including those past `MIN_RLE_REPEATS`
    repeat_count: usize,
    buffered_values: [u32; GROUP_LEN],
    num_buffered_values: usize,

    // position of the reserved header byte of the open bitpacked run, if any
    bitpacked_run_header: Option<usize>,
    bitpacked_group_count: usize,
    packed: [u8; 32],
}

impl Encoder<Vec<u8>> {
    /// Returns a new [`Encoder`] writing to an owned, growable buffer.
    /// # Errors
    /// Errors iff `num_bits > 32`.
    pub fn new(num_bits: u32) -> Result<Self> {
        Self::with_sink(vec![], num_bits)
    }
}

impl<S: Sink> Encoder<S> {
    /// Returns a new [`Encoder`] writing to `sink`.
    /// # Errors
    /// Errors iff `num_bits > 32`.
    pub fn with_sink(sink: S, num_bits: u32) -> Result<Self> {
        check_bit_width(num_bits)?;
        Ok(Self {
            sink,
            num_bits: num_bits as usize,
            length: 0,
            previous_value: 0,
            repeat_count: 0,
            buffered_values: [0; GROUP_LEN],
            num_buffered_values: 0,
            bitpacked_run_header: None,
            bitpacked_group_count: 0,
            packed: [0; 32],
        })
    }

    /// The number of values written so far.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Whether no value was written so far.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Encodes `value`.
    /// # Errors
    /// Errors if `value` does not fit in the encoder's bit width, or if the sink fails.
    pub fn write_int(&mut self, value: u32) -> Result<()> {
        if self.num_bits < 32 && value >> self.num_bits != 0 {
            return Err(invalid_err!(
                "value {} does not fit in {} bits",
                value,
                self.num_bits
            ));
        }
        if self.num_bits == 0 {
            // every value is zero: the whole stream is a single RLE run, written on `finish`.
            self.length += 1;
            return Ok(());
        }

        if value == self.previous_value {
            self.repeat_count += 1;
            if self.repeat_count >= MIN_RLE_REPEATS {
                // this is going to be an RLE run; keep counting
                self.length += 1;
                return Ok(());
            }
        } else {
            if self.repeat_count >= MIN_RLE_REPEATS {
                self.write_rle_run()?;
            }
            self.repeat_count = 1;
            self.previous_value = value;
        }

        self.buffered_values[self.num_buffered_values] = value;
        self.num_buffered_values += 1;
        if self.num_buffered_values == GROUP_LEN {
            self.write_or_append_bitpacked_run()?;
        }
        self.length += 1;
        Ok(())
    }

    /// Flushes the pending run and returns the sink.
    ///
    /// A trailing partial group is zero-padded to 8 values; the decoder discards the
    /// padding since it is told the number of values out of band.
    /// # Errors
    /// Errors iff the sink fails.
    pub fn finish(mut self) -> Result<S> {
        if self.num_bits == 0 {
            if self.length > 0 {
                self.repeat_count = self.length;
                self.write_rle_run()?;
            }
        } else if self.repeat_count >= MIN_RLE_REPEATS {
            self.write_rle_run()?;
        } else if self.num_buffered_values > 0 {
            self.buffered_values[self.num_buffered_values..].fill(0);
            self.write_or_append_bitpacked_run()?;
        }
        self.end_previous_bitpacked_run()?;

        debug!(
            "finished hybrid RLE stream: {} values, {} bits each, {} bytes",
            self.length,
            self.num_bits,
            self.sink.position()
        );
        Ok(self.sink)
    }

    fn write_rle_run(&mut self) -> Result<()> {
        // a bitpacked run must be closed before another run starts after it
        self.end_previous_bitpacked_run()?;

        trace!(
            "rle run at byte {}: value={}, repeats={}",
            self.sink.position(),
            self.previous_value,
            self.repeat_count
        );
        let mut container = [0u8; uleb128::MAX_ENCODED_LEN];
        let used = uleb128::encode(RunHeader::Rle(self.repeat_count).indicator(), &mut container);
        self.sink.write_bytes(&container[..used])?;

        let mut container = [0u8; 4];
        let value = &mut container[..ceil8(self.num_bits)];
        write_le(self.previous_value, value);
        self.sink.write_bytes(value)?;

        // the buffered values are all `previous_value` and are part of this run
        self.repeat_count = 0;
        self.num_buffered_values = 0;
        Ok(())
    }

    fn write_or_append_bitpacked_run(&mut self) -> Result<()> {
        if self.bitpacked_group_count >= MAX_BITPACKED_GROUPS {
            self.end_previous_bitpacked_run()?;
        }

        if self.bitpacked_run_header.is_none() {
            // placeholder, patched by `end_previous_bitpacked_run`
            self.bitpacked_run_header = Some(self.sink.position());
            self.sink.write_bytes(&[0])?;
        }

        let packed = &mut self.packed[..self.num_bits];
        bitpacked::pack(&self.buffered_values, packed, self.num_bits);
        self.sink.write_bytes(packed)?;

        self.num_buffered_values = 0;
        // the values just packed must not be counted again in an RLE run
        self.repeat_count = 0;
        self.bitpacked_group_count += 1;
        Ok(())
    }

    fn end_previous_bitpacked_run(&mut self) -> Result<()> {
        let position = match self.bitpacked_run_header.take() {
            Some(position) => position,
            None => return Ok(()),
        };
        trace!(
            "bitpacked run at byte {}: groups={}",
            position,
            self.bitpacked_group_count
        );
        let header = RunHeader::Bitpacked(self.bitpacked_group_count).indicator();
        debug_assert!(header <= 127);
        self.sink.set(position, header as u8)?;
        self.bitpacked_group_count = 0;
        Ok(())
    }
}
