use std::io::Cursor;

use hybrid_rle::error::Result;
use hybrid_rle::{decode, encode, Encoder, SeekSink, Sink};

#[test]
fn seekable_writer() -> Result<()> {
    let values = (0..200)
        .map(|i| if i % 50 < 20 { 9 } else { i % 13 })
        .collect::<Vec<u32>>();

    let mut cursor = Cursor::new(vec![]);
    cursor.get_mut().extend_from_slice(b"PAR1");
    cursor.set_position(4);

    let mut encoder = Encoder::with_sink(SeekSink::try_new(cursor)?, 4)?;
    for value in &values {
        encoder.write_int(*value)?;
    }
    assert_eq!(encoder.len(), values.len());
    let sink = encoder.finish()?;
    let written = sink.position();
    let buffer = sink.into_inner().into_inner();

    assert_eq!(&buffer[..4], b"PAR1");
    assert_eq!(buffer.len(), 4 + written);
    assert_eq!(buffer[4..], encode(values.iter().copied(), 4)?);
    assert_eq!(decode(&buffer[4..], 4, values.len())?, values);
    Ok(())
}

/// A sink that appends to a vector but keeps track of every backpatch.
#[derive(Default)]
struct Recording {
    bytes: Vec<u8>,
    patched: Vec<usize>,
}

impl Sink for Recording {
    fn position(&self) -> usize {
        self.bytes.len()
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.bytes.extend_from_slice(bytes);
        Ok(())
    }

    fn set(&mut self, position: usize, byte: u8) -> Result<()> {
        self.patched.push(position);
        self.bytes[position] = byte;
        Ok(())
    }
}

#[test]
fn headers_are_backpatched() -> Result<()> {
    let values = (0..16)
        .chain(std::iter::repeat(1).take(10))
        .chain(0..3)
        .collect::<Vec<u32>>();
    let mut encoder = Encoder::with_sink(Recording::default(), 4)?;
    for value in &values {
        encoder.write_int(*value)?;
    }
    let sink = encoder.finish()?;

    // the header of each bitpacked run, patched once the run closes
    assert_eq!(sink.patched, vec![0, 1 + 2 * 4 + 2]);
    assert_eq!(sink.bytes[0], (2 << 1) | 1);
    assert_eq!(&sink.bytes[9..11], &[10 << 1, 1]);
    assert_eq!(sink.bytes[11], (1 << 1) | 1);
    Ok(())
}
