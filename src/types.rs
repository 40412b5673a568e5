//! Core types for jpeg-baseline

use std::fmt;
use std::str::FromStr;

use crate::consts::{DCTSIZE, MAX_DIMENSION};
use crate::error::{Error, Result};

/// Bytes per RGB pixel
const RGB_BYTES_PER_PIXEL: usize = 3;

/// A borrowed, validated RGB image.
///
/// Pixels are interleaved 8-bit R, G, B in row-major order.
#[derive(Debug, Clone, Copy)]
pub struct RgbImage<'a> {
    pixels: &'a [u8],
    width: usize,
    height: usize,
}

impl<'a> RgbImage<'a> {
    /// Wrap a pixel buffer, checking dimensions and buffer length.
    pub fn new(pixels: &'a [u8], width: usize, height: usize) -> Result<Self> {
        validate_dimensions(width, height)?;

        let expected = width * height * RGB_BYTES_PER_PIXEL;
        if pixels.len() != expected {
            return Err(Error::InvalidPixelData {
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw interleaved pixel data
    #[must_use]
    pub fn pixels(&self) -> &'a [u8] {
        self.pixels
    }

    /// RGB triple at column `x`, row `y`
    #[inline]
    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> (u8, u8, u8) {
        let i = (y * self.width + x) * RGB_BYTES_PER_PIXEL;
        (self.pixels[i], self.pixels[i + 1], self.pixels[i + 2])
    }
}

fn validate_dimensions(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions {
            width,
            height,
            reason: "dimensions must be non-zero",
        });
    }

    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(Error::InvalidDimensions {
            width,
            height,
            reason: "dimensions exceed JPEG maximum (65535)",
        });
    }

    Ok(())
}

/// Chroma subsampling mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Subsampling {
    /// No subsampling (4:4:4) - highest quality
    #[default]
    S444,
    /// Horizontal subsampling only (4:2:2)
    S422,
    /// Both horizontal and vertical (4:2:0) - smallest files
    S420,
}

impl Subsampling {
    /// Horizontal sampling factor of the luminance component
    #[must_use]
    pub const fn h_factor(self) -> u8 {
        match self {
            Subsampling::S444 => 1,
            Subsampling::S422 | Subsampling::S420 => 2,
        }
    }

    /// Vertical sampling factor of the luminance component
    #[must_use]
    pub const fn v_factor(self) -> u8 {
        match self {
            Subsampling::S444 | Subsampling::S422 => 1,
            Subsampling::S420 => 2,
        }
    }

    /// Build the checked per-component layout for this mode.
    pub fn layout(self) -> Result<SamplingLayout> {
        SamplingLayout::new([(self.h_factor(), self.v_factor()), (1, 1), (1, 1)])
    }
}

impl fmt::Display for Subsampling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Subsampling::S444 => "4:4:4",
            Subsampling::S422 => "4:2:2",
            Subsampling::S420 => "4:2:0",
        };
        f.write_str(name)
    }
}

impl FromStr for Subsampling {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "4:4:4" | "444" => Ok(Subsampling::S444),
            "4:2:2" | "422" => Ok(Subsampling::S422),
            "4:2:0" | "420" => Ok(Subsampling::S420),
            other => Err(Error::InvalidSubsampling(other.to_string())),
        }
    }
}

/// Image component, in frame and scan order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Y,
    Cb,
    Cr,
}

impl Component {
    /// All components in SOF/SOS order
    pub const ALL: [Component; 3] = [Component::Y, Component::Cb, Component::Cr];

    /// Zero-based index (also the DC predictor slot)
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Component::Y => 0,
            Component::Cb => 1,
            Component::Cr => 2,
        }
    }

    /// Component identifier written in SOF0/SOS
    #[must_use]
    pub const fn id(self) -> u8 {
        self.index() as u8 + 1
    }

    /// Which quantization/Huffman table class this component uses
    #[must_use]
    pub const fn class(self) -> TableClass {
        match self {
            Component::Y => TableClass::Luminance,
            Component::Cb | Component::Cr => TableClass::Chrominance,
        }
    }
}

/// Table class shared by quantization and Huffman tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableClass {
    Luminance,
    Chrominance,
}

impl TableClass {
    /// Table slot (Tq / Th) for this class
    #[must_use]
    pub const fn id(self) -> u8 {
        match self {
            TableClass::Luminance => 0,
            TableClass::Chrominance => 1,
        }
    }
}

/// Per-component sample factors with their per-axis maxima.
///
/// Construction checks the invariants the padding and MCU arithmetic rely on:
/// every factor is 1 or 2, and the luminance component carries the largest
/// factor on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingLayout {
    factors: [(u8, u8); 3],
    max_h: u8,
    max_v: u8,
}

impl SamplingLayout {
    /// Validate `(h, v)` factors given in Y, Cb, Cr order.
    pub fn new(factors: [(u8, u8); 3]) -> Result<Self> {
        for (component, &(h, v)) in factors.iter().enumerate() {
            if !matches!(h, 1 | 2) || !matches!(v, 1 | 2) {
                return Err(Error::InvalidSamplingFactors {
                    component,
                    h,
                    v,
                    reason: "sample factors must be 1 or 2",
                });
            }
        }

        let max_h = factors.iter().map(|f| f.0).max().unwrap_or(1);
        let max_v = factors.iter().map(|f| f.1).max().unwrap_or(1);
        let (luma_h, luma_v) = factors[0];
        if luma_h != max_h || luma_v != max_v {
            return Err(Error::InvalidSamplingFactors {
                component: 0,
                h: luma_h,
                v: luma_v,
                reason: "luminance must carry the largest sample factors",
            });
        }

        Ok(Self {
            factors,
            max_h,
            max_v,
        })
    }

    /// Horizontal sample factor of a component
    #[must_use]
    pub fn h_factor(&self, component: Component) -> u8 {
        self.factors[component.index()].0
    }

    /// Vertical sample factor of a component
    #[must_use]
    pub fn v_factor(&self, component: Component) -> u8 {
        self.factors[component.index()].1
    }

    #[must_use]
    pub fn max_h(&self) -> u8 {
        self.max_h
    }

    #[must_use]
    pub fn max_v(&self) -> u8 {
        self.max_v
    }

    /// `(H << 4) | V` as written in SOF0
    #[must_use]
    pub fn sof_sampling_byte(&self, component: Component) -> u8 {
        (self.h_factor(component) << 4) | self.v_factor(component)
    }

    /// Width of one MCU in pixels
    #[must_use]
    pub fn mcu_width(&self) -> usize {
        DCTSIZE * self.max_h as usize
    }

    /// Height of one MCU in pixels
    #[must_use]
    pub fn mcu_height(&self) -> usize {
        DCTSIZE * self.max_v as usize
    }

    /// Smallest multiple of the MCU width covering `width`
    #[must_use]
    pub fn padded_width(&self, width: usize) -> usize {
        width.div_ceil(self.mcu_width()) * self.mcu_width()
    }

    /// Smallest multiple of the MCU height covering `height`
    #[must_use]
    pub fn padded_height(&self, height: usize) -> usize {
        height.div_ceil(self.mcu_height()) * self.mcu_height()
    }

    /// Box size `(h, v)` used to downsample a component's plane
    #[must_use]
    pub fn downsample_ratio(&self, component: Component) -> (usize, usize) {
        (
            (self.max_h / self.h_factor(component)) as usize,
            (self.max_v / self.v_factor(component)) as usize,
        )
    }

    /// Whether any component is stored below full resolution
    #[must_use]
    pub fn is_subsampled(&self) -> bool {
        self.max_h > 1 || self.max_v > 1
    }
}
