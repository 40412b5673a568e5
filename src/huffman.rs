//! Huffman table construction for JPEG encoding.
//!
//! Builds derived encoding tables from the Annex K specifications
//! (Figures C.1-C.3 of the JPEG standard). The derived table stores code and
//! length indexed by symbol value, allowing O(1) lookup during encoding.

use crate::consts::{
    AC_CHROMINANCE_BITS, AC_CHROMINANCE_VALUES, AC_LUMINANCE_BITS, AC_LUMINANCE_VALUES,
    DC_CHROMINANCE_BITS, DC_CHROMINANCE_VALUES, DC_LUMINANCE_BITS, DC_LUMINANCE_VALUES,
};
use crate::error::{Error, Result};
use crate::types::TableClass;

/// Maximum code length allowed by JPEG (16 bits)
pub const MAX_CODE_LENGTH: usize = 16;

/// End-of-block symbol
pub const EOB: u8 = 0x00;

/// Run of sixteen zero coefficients
pub const ZRL: u8 = 0xF0;

/// Coefficient kind a Huffman table codes (Tc in DHT)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HuffClass {
    Dc,
    Ac,
}

/// A Huffman table in the raw format (bits + values).
///
/// This is the format stored in a DHT segment and used as input to build
/// derived tables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HuffSpec {
    pub class: HuffClass,
    /// Destination slot (Th)
    pub id: u8,
    /// `bits[l]` is the number of codes of length `l + 1`
    pub bits: [u8; MAX_CODE_LENGTH],
    /// Symbol values in order of increasing code length
    pub values: Vec<u8>,
}

impl HuffSpec {
    pub fn std_dc_luma() -> Self {
        Self::standard(HuffClass::Dc, 0, DC_LUMINANCE_BITS, &DC_LUMINANCE_VALUES)
    }

    pub fn std_ac_luma() -> Self {
        Self::standard(HuffClass::Ac, 0, AC_LUMINANCE_BITS, &AC_LUMINANCE_VALUES)
    }

    pub fn std_dc_chroma() -> Self {
        Self::standard(HuffClass::Dc, 1, DC_CHROMINANCE_BITS, &DC_CHROMINANCE_VALUES)
    }

    pub fn std_ac_chroma() -> Self {
        Self::standard(HuffClass::Ac, 1, AC_CHROMINANCE_BITS, &AC_CHROMINANCE_VALUES)
    }

    fn standard(class: HuffClass, id: u8, bits: [u8; MAX_CODE_LENGTH], values: &[u8]) -> Self {
        Self {
            class,
            id,
            bits,
            values: values.to_vec(),
        }
    }

    /// `(Tc << 4) | Th` as written in DHT
    #[must_use]
    pub fn class_id_byte(&self) -> u8 {
        let tc = match self.class {
            HuffClass::Dc => 0,
            HuffClass::Ac => 1,
        };
        (tc << 4) | self.id
    }
}

/// Derived Huffman table optimized for encoding.
///
/// This format allows O(1) lookup of the code for any symbol.
#[derive(Clone, Debug)]
pub struct DerivedTable {
    /// Huffman code for each symbol (indexed by symbol value)
    pub ehufco: [u32; 256],
    /// Code length for each symbol (0 means no code assigned)
    pub ehufsi: [u8; 256],
}

impl Default for DerivedTable {
    fn default() -> Self {
        Self {
            ehufco: [0; 256],
            ehufsi: [0; 256],
        }
    }
}

impl DerivedTable {
    /// Build a derived table from a raw Huffman table.
    ///
    /// Codes are assigned canonically: for each length `L` in 1..=16 the next
    /// `bits[L - 1]` values get consecutive codes, starting from 0 and
    /// shifting left whenever the length grows.
    ///
    /// # Errors
    /// [`Error::InvalidHuffmanTable`] when the counts describe more than 256
    /// symbols or disagree with the value list, a code overflows its length,
    /// a DC symbol exceeds 15, or a symbol appears twice.
    pub fn from_spec(spec: &HuffSpec) -> Result<Self> {
        let mut dtbl = Self::default();

        // Figure C.1: make table of Huffman code length for each symbol
        let mut huffsize = [0u8; 257];
        let mut p = 0usize;

        for (l, &count) in spec.bits.iter().enumerate() {
            let count = count as usize;
            if p + count > 256 {
                return Err(Error::InvalidHuffmanTable);
            }
            for _ in 0..count {
                huffsize[p] = (l + 1) as u8;
                p += 1;
            }
        }
        let lastp = p;
        if lastp != spec.values.len() {
            return Err(Error::InvalidHuffmanTable);
        }

        // Figure C.2: generate the codes themselves
        let mut huffcode = [0u32; 257];
        let mut code = 0u32;
        let mut si = huffsize[0] as usize;
        p = 0;

        while p < lastp {
            while p < lastp && huffsize[p] as usize == si {
                huffcode[p] = code;
                code += 1;
                p += 1;
            }
            // Check that code still fits in si bits
            if code >= (1 << si) {
                return Err(Error::InvalidHuffmanTable);
            }
            code <<= 1;
            si += 1;
        }

        // Figure C.3: generate encoding tables indexed by symbol.
        // Codeless symbols keep length 0.
        let max_symbol = match spec.class {
            HuffClass::Dc => 15,
            HuffClass::Ac => 255,
        };

        for (i, &symbol) in spec.values.iter().enumerate() {
            let symbol = symbol as usize;
            if symbol > max_symbol {
                return Err(Error::InvalidHuffmanTable);
            }
            if dtbl.ehufsi[symbol] != 0 {
                // Duplicate symbol
                return Err(Error::InvalidHuffmanTable);
            }
            dtbl.ehufco[symbol] = huffcode[i];
            dtbl.ehufsi[symbol] = huffsize[i];
        }

        Ok(dtbl)
    }

    /// Get the code and length for a symbol.
    ///
    /// # Returns
    /// (code, length) tuple, or (0, 0) if symbol has no code.
    #[inline]
    pub fn get_code(&self, symbol: u8) -> (u32, u8) {
        let idx = symbol as usize;
        (self.ehufco[idx], self.ehufsi[idx])
    }
}

/// The four baseline tables with their derived encoders.
///
/// Stored in DHT order: DC luminance, AC luminance, DC chrominance,
/// AC chrominance.
#[derive(Clone, Debug)]
pub struct HuffmanTables {
    specs: [HuffSpec; 4],
    derived: [DerivedTable; 4],
}

impl HuffmanTables {
    /// Annex K tables
    pub fn standard() -> Result<Self> {
        let specs = [
            HuffSpec::std_dc_luma(),
            HuffSpec::std_ac_luma(),
            HuffSpec::std_dc_chroma(),
            HuffSpec::std_ac_chroma(),
        ];
        let derived = [
            DerivedTable::from_spec(&specs[0])?,
            DerivedTable::from_spec(&specs[1])?,
            DerivedTable::from_spec(&specs[2])?,
            DerivedTable::from_spec(&specs[3])?,
        ];
        Ok(Self { specs, derived })
    }

    /// DC table for a component class
    #[inline]
    pub fn dc(&self, class: TableClass) -> &DerivedTable {
        &self.derived[class.id() as usize * 2]
    }

    /// AC table for a component class
    #[inline]
    pub fn ac(&self, class: TableClass) -> &DerivedTable {
        &self.derived[class.id() as usize * 2 + 1]
    }

    /// Raw specifications in DHT order
    pub fn specs(&self) -> &[HuffSpec; 4] {
        &self.specs
    }
}

/// Number of bits needed for the magnitude of `value` (0 for 0).
#[inline]
pub fn category(value: i32) -> u8 {
    (32 - value.unsigned_abs().leading_zeros()) as u8
}
