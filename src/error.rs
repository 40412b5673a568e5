//! Error types for jpeg-baseline

use thiserror::Error;

/// Result type for jpeg-baseline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for jpeg-baseline operations
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Invalid image dimensions
    #[error("Invalid dimensions {width}x{height}: {reason}")]
    InvalidDimensions {
        width: usize,
        height: usize,
        reason: &'static str,
    },
    /// Invalid pixel data
    #[error("Expected {expected} bytes of pixel data, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },
    /// Unrecognized chroma subsampling name
    #[error("Unknown subsampling mode {0:?} (expected 4:4:4, 4:2:2 or 4:2:0)")]
    InvalidSubsampling(String),
    /// Sample factors violating the baseline layout rules
    #[error("Invalid sampling factors for component {component}: {h}x{v} ({reason})")]
    InvalidSamplingFactors {
        component: usize,
        h: u8,
        v: u8,
        reason: &'static str,
    },
    /// Invalid Huffman table structure
    #[error("Invalid Huffman table structure")]
    InvalidHuffmanTable,
    /// The output sink rejected a write
    #[error("I/O error while writing JPEG stream: {0}")]
    Io(#[from] std::io::Error),
}
