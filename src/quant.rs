//! Quantization table handling for JPEG encoding
//!
//! Scales the Annex K base tables by the IJG quality formula and divides DCT
//! output by the resulting step sizes.

use crate::consts::{DCTSIZE2, JPEG_NATURAL_ORDER, STD_CHROMA_QUANT, STD_LUMA_QUANT};
use crate::types::TableClass;

/// Largest AC magnitude codable with baseline tables (category 10)
pub const MAX_AC_LEVEL: i32 = 1023;

/// Quantization table for a single component class
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuantTable {
    /// Quantization values in natural order, each in 1..=255
    pub values: [u16; DCTSIZE2],
    /// Table slot (Tq) referenced by SOF0
    pub slot: u8,
}

impl QuantTable {
    /// Create a quantization table from an array
    pub fn new(values: [u16; DCTSIZE2], slot: u8) -> Self {
        Self { values, slot }
    }

    /// Standard luminance table at the given quality
    pub fn luma_standard(quality: i32) -> Self {
        Self::from_base_table(&STD_LUMA_QUANT, quality, TableClass::Luminance.id())
    }

    /// Standard chrominance table at the given quality
    pub fn chroma_standard(quality: i32) -> Self {
        Self::from_base_table(&STD_CHROMA_QUANT, quality, TableClass::Chrominance.id())
    }

    /// Scale a base quantization table by quality factor
    fn from_base_table(base: &[u16; DCTSIZE2], quality: i32, slot: u8) -> Self {
        let quality = quality.clamp(1, 100) as u32;

        // JPEG quality scaling formula
        let scale = if quality < 50 {
            5000 / quality
        } else {
            200 - 2 * quality
        };

        let mut values = [0u16; DCTSIZE2];
        for (value, &b) in values.iter_mut().zip(base.iter()) {
            let scaled = (b as u32 * scale + 50) / 100;
            // 8-bit DQT entries cap at 255
            *value = scaled.clamp(1, 255) as u16;
        }

        Self { values, slot }
    }

    /// Get quantization value at zigzag position
    #[inline]
    #[must_use]
    pub fn at_zigzag(&self, pos: usize) -> u16 {
        self.values[JPEG_NATURAL_ORDER[pos]]
    }

    /// The 64 entries in zigzag order, as written to a DQT segment
    pub fn zigzag_bytes(&self) -> [u8; DCTSIZE2] {
        let mut bytes = [0u8; DCTSIZE2];
        for (pos, byte) in bytes.iter_mut().enumerate() {
            *byte = self.at_zigzag(pos) as u8;
        }
        bytes
    }

    /// Quantize a block of DCT coefficients.
    ///
    /// Removes the DCT's factor of 8, divides by the step size and rounds
    /// half away from zero. Input and output are in natural order.
    ///
    /// AC levels are clamped to +/-1023, the largest magnitude the baseline
    /// AC tables have a category for. Only near-unit step sizes on hard
    /// edges reach that bound.
    pub fn quantize(&self, coeffs: &[f64; DCTSIZE2]) -> [i32; DCTSIZE2] {
        let mut levels = [0i32; DCTSIZE2];
        for k in 0..DCTSIZE2 {
            levels[k] = (coeffs[k] / 8.0 / self.values[k] as f64).round() as i32;
        }
        for level in &mut levels[1..] {
            *level = (*level).clamp(-MAX_AC_LEVEL, MAX_AC_LEVEL);
        }
        levels
    }
}

/// Quantization table set for the luminance and chrominance classes
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuantTableSet {
    /// Luminance quantization table (slot 0)
    pub luma: QuantTable,
    /// Chrominance quantization table (slot 1)
    pub chroma: QuantTable,
}

impl QuantTableSet {
    /// Standard tables at the given quality.
    ///
    /// Quality is clamped to 1..=100, so 0 and negative values behave like 1.
    pub fn new(quality: i32) -> Self {
        Self {
            luma: QuantTable::luma_standard(quality),
            chroma: QuantTable::chroma_standard(quality),
        }
    }

    #[must_use]
    pub fn table(&self, class: TableClass) -> &QuantTable {
        match class {
            TableClass::Luminance => &self.luma,
            TableClass::Chrominance => &self.chroma,
        }
    }

    /// Tables in DQT order
    pub fn iter(&self) -> impl Iterator<Item = &QuantTable> {
        [&self.luma, &self.chroma].into_iter()
    }
}
