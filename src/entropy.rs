//! Entropy encoding for JPEG
//!
//! Handles Huffman encoding of quantized DCT coefficients: DC differences
//! against a per-component predictor, then run-length coded AC levels in
//! zigzag order.

use std::io::{self, Write};

use crate::bitstream::BitWriter;
use crate::consts::{DCTSIZE2, JPEG_NATURAL_ORDER};
use crate::huffman::{category, DerivedTable, HuffmanTables, EOB, ZRL};
use crate::types::Component;

/// Bits that follow a category code: the value itself when positive,
/// `2^cat - 1 + value` when negative.
#[inline]
fn magnitude_bits(value: i32, cat: u8) -> u32 {
    if value < 0 {
        (value + (1 << cat) - 1) as u32
    } else {
        value as u32
    }
}

/// Encode a single 8x8 block of quantized levels (natural order).
///
/// Returns the block's DC level, which becomes the component's next
/// predictor.
pub fn encode_block<W: Write>(
    writer: &mut BitWriter<W>,
    levels: &[i32; DCTSIZE2],
    last_dc: i32,
    dc_table: &DerivedTable,
    ac_table: &DerivedTable,
) -> io::Result<i32> {
    // DC coefficient (difference from previous block)
    let dc_diff = levels[0] - last_dc;
    let dc_cat = category(dc_diff);
    let (code, size) = dc_table.get_code(dc_cat);
    writer.write_bits(code, size)?;
    writer.write_bits(magnitude_bits(dc_diff, dc_cat), dc_cat)?;

    // AC coefficients (in zigzag order)
    let mut run = 0u8;
    for &pos in &JPEG_NATURAL_ORDER[1..] {
        let ac = levels[pos];

        if ac == 0 {
            run += 1;
            continue;
        }

        // Emit ZRL for runs of 16 zeros
        while run > 15 {
            let (code, size) = ac_table.get_code(ZRL);
            writer.write_bits(code, size)?;
            run -= 16;
        }

        // Encode run/size and value
        let ac_cat = category(ac);
        let (code, size) = ac_table.get_code((run << 4) | ac_cat);
        writer.write_bits(code, size)?;
        writer.write_bits(magnitude_bits(ac, ac_cat), ac_cat)?;

        run = 0;
    }

    // EOB if the block ends in zeros
    if run > 0 {
        let (code, size) = ac_table.get_code(EOB);
        writer.write_bits(code, size)?;
    }

    Ok(levels[0])
}

/// Entropy encoder for a single interleaved scan.
///
/// Owns the bit writer and one DC predictor per component; predictors start
/// at zero.
pub struct EntropyEncoder<'t, W: Write> {
    writer: BitWriter<W>,
    tables: &'t HuffmanTables,
    last_dc: [i32; 3],
}

impl<'t, W: Write> EntropyEncoder<'t, W> {
    /// Create a new entropy encoder
    pub fn new(sink: W, tables: &'t HuffmanTables) -> Self {
        Self {
            writer: BitWriter::new(sink),
            tables,
            last_dc: [0; 3],
        }
    }

    /// Encode one block of `component`, updating its predictor
    pub fn encode_block(
        &mut self,
        component: Component,
        levels: &[i32; DCTSIZE2],
    ) -> io::Result<()> {
        let class = component.class();
        let idx = component.index();
        self.last_dc[idx] = encode_block(
            &mut self.writer,
            levels,
            self.last_dc[idx],
            self.tables.dc(class),
            self.tables.ac(class),
        )?;
        Ok(())
    }

    /// Current DC predictor for `component`
    #[must_use]
    pub fn last_dc(&self, component: Component) -> i32 {
        self.last_dc[component.index()]
    }

    /// Pad the final byte and return the sink with the scan byte count
    pub fn finish(mut self) -> io::Result<(W, usize)> {
        self.writer.flush()?;
        let written = self.writer.bytes_written();
        Ok((self.writer.into_inner(), written))
    }
}
