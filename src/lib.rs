//! # jpeg-baseline - Baseline Sequential JPEG Encoder
//!
//! Encodes 8-bit RGB images into baseline (SOF0) JFIF streams using the
//! standard Annex K quantization and Huffman tables.
//!
//! ## Pipeline
//!
//! - **Color conversion**: RGB to YCbCr (JFIF/BT.601), edge-replicated
//!   padding to whole MCUs, box-filtered chroma subsampling
//! - **Forward DCT**: floating-point AAN butterfly on 8x8 blocks
//! - **Quantization**: IJG quality scaling of the Annex K tables
//! - **Entropy coding**: DC prediction, AC run-length coding and canonical
//!   Huffman codes, with 0xFF byte stuffing
//!
//! ## Usage
//!
//! ```rust
//! use jpeg_baseline::{Encoder, Subsampling};
//!
//! let (width, height) = (32, 16);
//! let pixels = vec![128u8; width * height * 3];
//!
//! let encoder = Encoder::new()
//!     .quality(85)
//!     .subsampling(Subsampling::S420);
//!
//! let jpeg_data = encoder.encode_rgb(&pixels, width, height)?;
//! assert_eq!(&jpeg_data[..2], &[0xFF, 0xD8]);
//! # Ok::<(), jpeg_baseline::Error>(())
//! ```
//!
//! Any [`std::io::Write`] sink works through [`Encoder::encode`]:
//!
//! ```rust
//! use jpeg_baseline::{Encoder, RgbImage};
//!
//! let pixels = vec![0u8; 8 * 8 * 3];
//! let image = RgbImage::new(&pixels, 8, 8)?;
//! let mut sink = Vec::new();
//! let written = Encoder::new().encode(&image, &mut sink)?;
//! assert_eq!(written, sink.len());
//! # Ok::<(), jpeg_baseline::Error>(())
//! ```

// Core modules
pub mod consts;
mod error;
mod types;

// Encoding pipeline
pub mod bitstream;
pub mod color;
pub mod dct;
mod encode;
pub mod entropy;
pub mod huffman;
pub mod quant;

// Public API
pub use encode::{BlockPosition, Encoder, McuLayout};
pub use error::{Error, Result};
pub use types::{Component, RgbImage, SamplingLayout, Subsampling, TableClass};
