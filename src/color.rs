//! Color space conversion and sample plane construction
//!
//! Converts interleaved RGB into padded Y, Cb and Cr planes using the
//! JFIF/BT.601 coefficients, then box-filters the chroma planes down to
//! their sampled resolution.

use crate::consts::{DCTSIZE, DCTSIZE2};
use crate::types::{Component, RgbImage, SamplingLayout};

/// Convert one RGB pixel to YCbCr using JFIF/BT.601 coefficients
///
/// The conversion formula is:
/// - Y  =  0.299 * R + 0.587 * G + 0.114 * B
/// - Cb = 128 - 0.168736 * R - 0.331264 * G + 0.5 * B
/// - Cr = 128 + 0.5 * R - 0.418688 * G - 0.081312 * B
///
/// Evaluated in `f64` and narrowed once; samples are neither rounded nor
/// clamped.
#[inline]
pub fn rgb_to_ycbcr(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let r = r as f64;
    let g = g as f64;
    let b = b as f64;

    let y = 0.299 * r + 0.587 * g + 0.114 * b;
    let cb = 128.0 - 0.168736 * r - 0.331264 * g + 0.5 * b;
    let cr = 128.0 + 0.5 * r - 0.418688 * g - 0.081312 * b;

    (y as f32, cb as f32, cr as f32)
}

/// A 2D plane of samples for one component
#[derive(Debug, Clone, PartialEq)]
pub struct SamplePlane {
    width: usize,
    height: usize,
    samples: Vec<f32>,
}

impl SamplePlane {
    /// Create a zero-filled plane
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            samples: vec![0.0; width * height],
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.samples[y * self.width + x]
    }

    #[inline]
    fn set(&mut self, x: usize, y: usize, value: f32) {
        self.samples[y * self.width + x] = value;
    }

    /// Extract the 8x8 block whose top-left sample is at (`x`, `y`).
    ///
    /// The block must lie inside the plane; padded planes guarantee this for
    /// every block origin visited by the MCU loop.
    pub fn block(&self, x: usize, y: usize) -> [f64; DCTSIZE2] {
        let mut block = [0.0f64; DCTSIZE2];
        for dy in 0..DCTSIZE {
            let row = &self.samples[(y + dy) * self.width + x..][..DCTSIZE];
            for (dx, &sample) in row.iter().enumerate() {
                block[dy * DCTSIZE + dx] = sample as f64;
            }
        }
        block
    }

    /// Average non-overlapping `h_factor` x `v_factor` boxes into a smaller plane.
    pub fn downsample(&self, h_factor: usize, v_factor: usize) -> SamplePlane {
        let new_width = self.width / h_factor;
        let new_height = self.height / v_factor;
        let area = (h_factor * v_factor) as f32;
        let mut output = SamplePlane::new(new_width, new_height);

        for y in 0..new_height {
            for x in 0..new_width {
                let mut sum = 0.0f32;
                for i in 0..v_factor {
                    for j in 0..h_factor {
                        sum += self.get(x * h_factor + j, y * v_factor + i);
                    }
                }
                output.set(x, y, sum / area);
            }
        }

        output
    }
}

/// The three sample planes of one image, ready for block extraction
#[derive(Debug, Clone)]
pub struct ComponentPlanes {
    pub y: SamplePlane,
    pub cb: SamplePlane,
    pub cr: SamplePlane,
}

impl ComponentPlanes {
    /// Plane holding the samples of `component`
    #[must_use]
    pub fn plane(&self, component: Component) -> &SamplePlane {
        match component {
            Component::Y => &self.y,
            Component::Cb => &self.cb,
            Component::Cr => &self.cr,
        }
    }
}

/// Convert an image into padded, subsampled component planes.
///
/// Samples outside the image replicate the nearest edge sample. Chroma planes
/// are box-filtered only when the layout subsamples.
pub fn build_planes(image: &RgbImage<'_>, layout: &SamplingLayout) -> ComponentPlanes {
    let width = image.width();
    let height = image.height();
    let padded_width = layout.padded_width(width);
    let padded_height = layout.padded_height(height);

    let mut y_plane = SamplePlane::new(padded_width, padded_height);
    let mut cb_plane = SamplePlane::new(padded_width, padded_height);
    let mut cr_plane = SamplePlane::new(padded_width, padded_height);

    for row in 0..padded_height {
        let src_row = row.min(height - 1);
        for col in 0..padded_width {
            let src_col = col.min(width - 1);
            let (r, g, b) = image.pixel(src_col, src_row);
            let (y, cb, cr) = rgb_to_ycbcr(r, g, b);
            y_plane.set(col, row, y);
            cb_plane.set(col, row, cb);
            cr_plane.set(col, row, cr);
        }
    }

    if layout.is_subsampled() {
        let (cb_h, cb_v) = layout.downsample_ratio(Component::Cb);
        let (cr_h, cr_v) = layout.downsample_ratio(Component::Cr);
        cb_plane = cb_plane.downsample(cb_h, cb_v);
        cr_plane = cr_plane.downsample(cr_h, cr_v);
    }

    ComponentPlanes {
        y: y_plane,
        cb: cb_plane,
        cr: cr_plane,
    }
}
