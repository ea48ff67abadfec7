use std::io::{Seek, SeekFrom, Write};

use crate::error::{Error, Result};

/// A byte sink that, besides appending, can overwrite a byte it has already written.
///
/// The encoder reserves the header byte of a bitpacked run before knowing how many
/// groups the run will hold, and patches it once the run ends. Positions are offsets
/// from the first byte written through this sink.
pub trait Sink {
    /// The position at which the next appended byte lands.
    fn position(&self) -> usize;

    /// Appends `bytes` to the sink.
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()>;

    /// Overwrites the byte at `position`, which must have been written before.
    fn set(&mut self, position: usize, byte: u8) -> Result<()>;
}

impl Sink for Vec<u8> {
    #[inline]
    fn position(&self) -> usize {
        self.len()
    }

    #[inline]
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.extend_from_slice(bytes);
        Ok(())
    }

    #[inline]
    fn set(&mut self, position: usize, byte: u8) -> Result<()> {
        let len = self.len();
        let slot = self
            .get_mut(position)
            .ok_or_else(|| general_err!("cannot set byte {} of a {}-byte sink", position, len))?;
        *slot = byte;
        Ok(())
    }
}

/// A [`Sink`] over any seekable writer, e.g. a [`std::fs::File`] or a [`std::io::Cursor`].
#[derive(Debug)]
pub struct SeekSink<W: Write + Seek> {
    writer: W,
    start: u64,
    written: usize,
}

impl<W: Write + Seek> SeekSink<W> {
    /// Returns a new [`SeekSink`] writing from the writer's current position.
    pub fn try_new(mut writer: W) -> Result<Self> {
        let start = writer.stream_position()?;
        Ok(Self {
            writer,
            start,
            written: 0,
        })
    }

    /// Returns the inner writer, positioned after the last appended byte.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Seek> Sink for SeekSink<W> {
    fn position(&self) -> usize {
        self.written
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes)?;
        self.written += bytes.len();
        Ok(())
    }

    fn set(&mut self, position: usize, byte: u8) -> Result<()> {
        if position >= self.written {
            return Err(general_err!(
                "cannot set byte {} of a {}-byte sink",
                position,
                self.written
            ));
        }
        self.writer
            .seek(SeekFrom::Start(self.start + position as u64))?;
        self.writer.write_all(&[byte])?;
        self.writer
            .seek(SeekFrom::Start(self.start + self.written as u64))?;
        Ok(())
    }
}
