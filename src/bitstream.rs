//! Bit-level output for entropy-coded scan data
//!
//! Packs variable-length codes MSB first into bytes and applies JPEG byte
//! stuffing: every 0xFF emitted inside the scan is followed by 0x00.

use std::io::{self, Write};

/// Bitstream writer for entropy encoding
pub struct BitWriter<W: Write> {
    sink: W,
    bit_buffer: u32,
    bits_in_buffer: u8,
    bytes_written: usize,
}

impl<W: Write> BitWriter<W> {
    /// Create a new bit writer over `sink`
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            bit_buffer: 0,
            bits_in_buffer: 0,
            bytes_written: 0,
        }
    }

    /// Append the low `count` bits of `value`, most significant first.
    ///
    /// `count` must be at most 24 so the pending bits fit the buffer.
    #[inline]
    pub fn write_bits(&mut self, value: u32, count: u8) -> io::Result<()> {
        if count == 0 {
            return Ok(());
        }
        debug_assert!(count <= 24);

        self.bit_buffer = (self.bit_buffer << count) | (value & ((1 << count) - 1));
        self.bits_in_buffer += count;

        while self.bits_in_buffer >= 8 {
            self.bits_in_buffer -= 8;
            let byte = (self.bit_buffer >> self.bits_in_buffer) as u8;
            self.emit(byte)?;
        }
        // Drop bits already emitted
        self.bit_buffer &= (1 << self.bits_in_buffer) - 1;
        Ok(())
    }

    #[inline]
    fn emit(&mut self, byte: u8) -> io::Result<()> {
        // Byte stuffing for 0xFF
        if byte == 0xFF {
            self.sink.write_all(&[0xFF, 0x00])?;
            self.bytes_written += 2;
        } else {
            self.sink.write_all(&[byte])?;
            self.bytes_written += 1;
        }
        Ok(())
    }

    /// Flush remaining bits (pad with 1s)
    pub fn flush(&mut self) -> io::Result<()> {
        if self.bits_in_buffer > 0 {
            let padding = 8 - self.bits_in_buffer;
            self.write_bits((1 << padding) - 1, padding)?;
        }
        Ok(())
    }

    /// Bytes handed to the sink so far, stuffing included
    #[must_use]
    pub fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    /// Bits waiting for a byte boundary
    #[must_use]
    pub fn pending_bits(&self) -> u8 {
        self.bits_in_buffer
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    /// Return the sink. Pending bits are discarded; call [`flush`](Self::flush) first.
    pub fn into_inner(self) -> W {
        self.sink
    }
}
