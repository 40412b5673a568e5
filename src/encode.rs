//! Main encoder implementation
//!
//! Provides the public Encoder API: header segments, the MCU loop that drives
//! each block through DCT, quantization and entropy coding, and the trailer.

use std::io::{self, BufWriter, Write};

use log::{debug, trace};

use crate::color::build_planes;
use crate::consts::{marker, DCTSIZE, DEFAULT_QUALITY};
use crate::dct::forward_dct_8x8;
use crate::entropy::EntropyEncoder;
use crate::huffman::{HuffSpec, HuffmanTables};
use crate::quant::QuantTableSet;
use crate::types::{Component, RgbImage, SamplingLayout, Subsampling};
use crate::Result;

/// One 8x8 block of a component plane, addressed by its top-left sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockPosition {
    pub component: Component,
    pub x: usize,
    pub y: usize,
}

/// MCU grid of a padded image.
///
/// Fixes the order in which blocks enter the scan: MCUs in raster order, and
/// inside each MCU every Y block, then every Cb block, then every Cr block.
#[derive(Debug, Clone, Copy)]
pub struct McuLayout {
    layout: SamplingLayout,
    mcu_cols: usize,
    mcu_rows: usize,
}

impl McuLayout {
    pub fn new(layout: SamplingLayout, width: usize, height: usize) -> Self {
        Self {
            layout,
            mcu_cols: layout.padded_width(width) / layout.mcu_width(),
            mcu_rows: layout.padded_height(height) / layout.mcu_height(),
        }
    }

    #[must_use]
    pub fn mcu_cols(&self) -> usize {
        self.mcu_cols
    }

    #[must_use]
    pub fn mcu_rows(&self) -> usize {
        self.mcu_rows
    }

    /// Blocks of the MCU at (`mcu_col`, `mcu_row`), in scan order.
    ///
    /// Each component's blocks run over its vertical factor, then its
    /// horizontal factor. Subsampled components start at the MCU origin
    /// divided by the maximum factors.
    pub fn blocks(&self, mcu_col: usize, mcu_row: usize) -> impl Iterator<Item = BlockPosition> {
        let layout = self.layout;
        let mcu_x = mcu_col * layout.mcu_width();
        let mcu_y = mcu_row * layout.mcu_height();
        let max_h = layout.max_h() as usize;
        let max_v = layout.max_v() as usize;

        Component::ALL.into_iter().flat_map(move |component| {
            let h = layout.h_factor(component) as usize;
            let v = layout.v_factor(component) as usize;
            let origin_x = mcu_x * h / max_h;
            let origin_y = mcu_y * v / max_v;
            (0..v).flat_map(move |i| {
                (0..h).map(move |j| BlockPosition {
                    component,
                    x: origin_x + DCTSIZE * j,
                    y: origin_y + DCTSIZE * i,
                })
            })
        })
    }

    /// Every block of the image in scan order
    pub fn iter(&self) -> impl Iterator<Item = BlockPosition> + '_ {
        (0..self.mcu_rows).flat_map(move |row| {
            (0..self.mcu_cols).flat_map(move |col| self.blocks(col, row))
        })
    }
}

/// Counts bytes on their way to the sink
struct CountingWriter<W: Write> {
    inner: W,
    count: usize,
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.count += n;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Baseline JPEG encoder with configurable quality and chroma subsampling.
///
/// Holds no per-image state: one encoder can be reused, or shared between
/// threads, for any number of images.
#[derive(Clone, Debug)]
pub struct Encoder {
    quality: i32,
    subsampling: Subsampling,
    quant: QuantTableSet,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder {
    /// Create a new encoder with default settings (quality 75, 4:4:4)
    pub fn new() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            subsampling: Subsampling::S444,
            quant: QuantTableSet::new(DEFAULT_QUALITY),
        }
    }

    /// Set the quality level.
    ///
    /// Values outside 1..=100 are clamped.
    pub fn quality(mut self, quality: i32) -> Self {
        let clamped = quality.clamp(1, 100);
        if clamped != quality {
            debug!("quality {} out of range, using {}", quality, clamped);
        }
        self.quality = clamped;
        self.quant = QuantTableSet::new(clamped);
        self
    }

    /// Set chroma subsampling mode
    pub fn subsampling(mut self, subsampling: Subsampling) -> Self {
        self.subsampling = subsampling;
        self
    }

    /// Effective quality after clamping
    #[must_use]
    pub fn quality_level(&self) -> i32 {
        self.quality
    }

    #[must_use]
    pub fn subsampling_mode(&self) -> Subsampling {
        self.subsampling
    }

    /// Quantization tables derived from the current quality
    #[must_use]
    pub fn quant_tables(&self) -> &QuantTableSet {
        &self.quant
    }

    /// Encode RGB image data to JPEG
    pub fn encode_rgb(&self, pixels: &[u8], width: usize, height: usize) -> Result<Vec<u8>> {
        let image = RgbImage::new(pixels, width, height)?;
        let mut output = Vec::with_capacity(width * height / 4 + 1024);
        self.encode(&image, &mut output)?;
        Ok(output)
    }

    /// Encode `image` as a complete JFIF stream into `sink`.
    ///
    /// Returns the number of bytes written. Writes are buffered; the sink is
    /// flushed before returning.
    pub fn encode<W: Write>(&self, image: &RgbImage<'_>, sink: W) -> Result<usize> {
        let layout = self.subsampling.layout()?;
        let tables = HuffmanTables::standard()?;
        let mcus = McuLayout::new(layout, image.width(), image.height());

        debug!(
            "encoding {}x{} (padded {}x{}) at quality {}, {}",
            image.width(),
            image.height(),
            layout.padded_width(image.width()),
            layout.padded_height(image.height()),
            self.quality,
            self.subsampling
        );

        let planes = build_planes(image, &layout);

        let mut output = CountingWriter {
            inner: BufWriter::new(sink),
            count: 0,
        };

        self.write_soi(&mut output)?;
        self.write_app0(&mut output)?;
        self.write_dqt(&mut output)?;
        self.write_sof0(&mut output, image, &layout)?;
        for spec in tables.specs() {
            self.write_dht(&mut output, spec)?;
        }
        self.write_sos(&mut output)?;
        let header_bytes = output.count;

        let mut entropy = EntropyEncoder::new(&mut output, &tables);
        for mcu_row in 0..mcus.mcu_rows() {
            for mcu_col in 0..mcus.mcu_cols() {
                for pos in mcus.blocks(mcu_col, mcu_row) {
                    let samples = planes.plane(pos.component).block(pos.x, pos.y);
                    let coeffs = forward_dct_8x8(&samples);
                    let levels = self.quant.table(pos.component.class()).quantize(&coeffs);
                    entropy.encode_block(pos.component, &levels)?;
                }
            }
            trace!("MCU row {}/{} encoded", mcu_row + 1, mcus.mcu_rows());
        }
        let (_, scan_bytes) = entropy.finish()?;

        self.write_eoi(&mut output)?;
        output.flush()?;

        debug!(
            "wrote {} bytes ({} header, {} scan)",
            output.count, header_bytes, scan_bytes
        );
        Ok(output.count)
    }

    /// Write SOI marker
    fn write_soi(&self, output: &mut impl Write) -> io::Result<()> {
        output.write_all(&[0xFF, marker::SOI])
    }

    /// Write APP0 (JFIF) marker
    fn write_app0(&self, output: &mut impl Write) -> io::Result<()> {
        output.write_all(&[0xFF, marker::APP0])?;
        output.write_all(&[0x00, 0x10])?; // Length = 16
        output.write_all(b"JFIF\0")?; // Identifier
        output.write_all(&[0x01, 0x01])?; // Version 1.1
        output.write_all(&[0x00])?; // Units: none
        output.write_all(&[0x00, 0x01])?; // X density
        output.write_all(&[0x00, 0x01])?; // Y density
        output.write_all(&[0x00, 0x00]) // No thumbnail
    }

    /// Write DQT marker carrying both tables
    fn write_dqt(&self, output: &mut impl Write) -> io::Result<()> {
        output.write_all(&[0xFF, marker::DQT])?;
        output.write_all(&[0x00, 0x84])?; // Length = 2 + 2 * 65
        for table in self.quant.iter() {
            output.write_all(&[table.slot])?; // 8-bit precision, table slot
            output.write_all(&table.zigzag_bytes())?;
        }
        Ok(())
    }

    /// Write SOF0 marker (baseline, 3 components)
    fn write_sof0(
        &self,
        output: &mut impl Write,
        image: &RgbImage<'_>,
        layout: &SamplingLayout,
    ) -> io::Result<()> {
        output.write_all(&[0xFF, marker::SOF0])?;
        output.write_all(&[0x00, 0x11])?; // Length = 17
        output.write_all(&[0x08])?; // 8-bit precision
        // Dimensions were checked against 65535 by RgbImage::new
        output.write_all(&(image.height() as u16).to_be_bytes())?;
        output.write_all(&(image.width() as u16).to_be_bytes())?;
        output.write_all(&[0x03])?; // 3 components

        for component in Component::ALL {
            output.write_all(&[
                component.id(),
                layout.sof_sampling_byte(component),
                component.class().id(),
            ])?;
        }
        Ok(())
    }

    /// Write DHT marker for a Huffman table
    fn write_dht(&self, output: &mut impl Write, spec: &HuffSpec) -> io::Result<()> {
        let len = 2 + 1 + 16 + spec.values.len();
        output.write_all(&[0xFF, marker::DHT])?;
        output.write_all(&(len as u16).to_be_bytes())?;
        output.write_all(&[spec.class_id_byte()])?; // table class and ID
        output.write_all(&spec.bits)?;
        output.write_all(&spec.values)
    }

    /// Write SOS marker (3 components)
    fn write_sos(&self, output: &mut impl Write) -> io::Result<()> {
        output.write_all(&[0xFF, marker::SOS])?;
        output.write_all(&[0x00, 0x0C])?; // Length = 12
        output.write_all(&[0x03])?; // 3 components

        for component in Component::ALL {
            let table = component.class().id();
            // DC table in the high nibble, AC table in the low nibble
            output.write_all(&[component.id(), (table << 4) | table])?;
        }

        output.write_all(&[0x00, 0x3F, 0x00]) // Ss, Se, Ah/Al
    }

    /// Write EOI marker
    fn write_eoi(&self, output: &mut impl Write) -> io::Result<()> {
        output.write_all(&[0xFF, marker::EOI])
    }
}
