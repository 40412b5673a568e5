//! Common test utilities for jpeg-baseline tests.
//!
//! Synthetic image generators, logger setup and a small JPEG segment parser
//! used to inspect encoder output without a full decoder.

#![allow(dead_code)]

use std::fmt::Write as _;

/// Route the crate's `log` output to the test harness.
pub fn init_logging() {
    env_logger::builder()
        .is_test(true)
        .filter_module("jpeg_baseline", log::LevelFilter::Trace)
        .parse_default_env()
        .try_init()
        .ok();
}

/// Create a simple gradient test image
pub fn create_gradient_image(width: usize, height: usize) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            let r = (x * 255 / width) as u8;
            let g = (y * 255 / height) as u8;
            let b = ((x + y) * 255 / (width + height)) as u8;
            pixels.push(r);
            pixels.push(g);
            pixels.push(b);
        }
    }
    pixels
}

/// Create a uniform color test image
pub fn create_uniform_image(width: usize, height: usize, r: u8, g: u8, b: u8) -> Vec<u8> {
    [r, g, b].repeat(width * height)
}

/// Busy wrapping pattern with strong high-frequency content in every channel
pub fn create_pattern_image(width: usize, height: usize) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            pixels.push(((x * 16 + y * 3) % 256) as u8);
            pixels.push(((y * 16 + x * 5) % 256) as u8);
            pixels.push(((x * y * 2) % 256) as u8);
        }
    }
    pixels
}

/// One marker segment; `payload` excludes the marker and length bytes.
#[derive(Debug, Clone)]
pub struct Segment {
    pub marker: u8,
    pub payload: Vec<u8>,
}

/// A JPEG stream split into header segments and entropy-coded data.
#[derive(Debug, Clone)]
pub struct ParsedJpeg {
    pub segments: Vec<Segment>,
    pub scan: Vec<u8>,
    pub ends_with_eoi: bool,
}

impl ParsedJpeg {
    pub fn markers(&self) -> Vec<u8> {
        self.segments.iter().map(|s| s.marker).collect()
    }

    pub fn find(&self, marker: u8) -> Vec<&Segment> {
        self.segments.iter().filter(|s| s.marker == marker).collect()
    }
}

/// Split a baseline stream into segments. Panics on malformed input.
#[track_caller]
pub fn parse_jpeg(jpeg: &[u8]) -> ParsedJpeg {
    assert!(jpeg.len() >= 4, "stream too short: {} bytes", jpeg.len());
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8], "Missing SOI marker");

    let mut segments = Vec::new();
    let mut pos = 2;
    loop {
        assert_eq!(jpeg[pos], 0xFF, "expected marker at offset {}", pos);
        let marker = jpeg[pos + 1];
        let len = u16::from_be_bytes([jpeg[pos + 2], jpeg[pos + 3]]) as usize;
        let payload = jpeg[pos + 4..pos + 2 + len].to_vec();
        segments.push(Segment { marker, payload });
        pos += 2 + len;
        if marker == 0xDA {
            break;
        }
    }

    let ends_with_eoi = jpeg.ends_with(&[0xFF, 0xD9]);
    let scan_end = if ends_with_eoi { jpeg.len() - 2 } else { jpeg.len() };
    ParsedJpeg {
        segments,
        scan: jpeg[pos..scan_end].to_vec(),
        ends_with_eoi,
    }
}

/// Human-readable summary of a stream, one line per segment.
pub fn dump(jpeg: &[u8]) -> String {
    let parsed = parse_jpeg(jpeg);
    let mut out = String::from("SOI\n");
    for segment in &parsed.segments {
        let p = &segment.payload;
        let len = p.len() + 2;
        match segment.marker {
            0xE0 => {
                let ident = String::from_utf8_lossy(&p[..4]);
                writeln!(out, "APP0 len={} {} {}.{}", len, ident, p[5], p[6]).unwrap();
            }
            0xDB => {
                writeln!(out, "DQT len={}", len).unwrap();
                for table in p.chunks(65) {
                    let entries: Vec<String> = table[1..].iter().map(|v| v.to_string()).collect();
                    writeln!(out, "  table {}: {}", table[0], entries.join(" ")).unwrap();
                }
            }
            0xC0 => {
                let height = u16::from_be_bytes([p[1], p[2]]);
                let width = u16::from_be_bytes([p[3], p[4]]);
                let comps: Vec<String> = p[6..]
                    .chunks(3)
                    .map(|c| format!("{}:{:02x}:{}", c[0], c[1], c[2]))
                    .collect();
                writeln!(
                    out,
                    "SOF0 len={} precision={} {}x{} {}",
                    len,
                    p[0],
                    width,
                    height,
                    comps.join(" ")
                )
                .unwrap();
            }
            0xC4 => {
                let symbols: usize = p[1..17].iter().map(|&b| b as usize).sum();
                writeln!(
                    out,
                    "DHT len={} class={} id={} symbols={}",
                    len,
                    p[0] >> 4,
                    p[0] & 0x0F,
                    symbols
                )
                .unwrap();
            }
            0xDA => {
                let n = p[0] as usize;
                let comps: Vec<String> = p[1..1 + 2 * n]
                    .chunks(2)
                    .map(|c| format!("{}:{:02x}", c[0], c[1]))
                    .collect();
                let tail = &p[1 + 2 * n..];
                writeln!(
                    out,
                    "SOS len={} {} ss={} se={} a={}",
                    len,
                    comps.join(" "),
                    tail[0],
                    tail[1],
                    tail[2]
                )
                .unwrap();
            }
            other => {
                writeln!(out, "{:02X} len={}", other, len).unwrap();
            }
        }
    }
    writeln!(out, "scan bytes={}", parsed.scan.len()).unwrap();
    if parsed.ends_with_eoi {
        out.push_str("EOI\n");
    }
    out
}

/// Lowercase hex without separators
pub fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Decode with an independent decoder, returning (width, height, RGB pixels).
#[track_caller]
pub fn decode(jpeg: &[u8]) -> (usize, usize, Vec<u8>) {
    let mut decoder = jpeg_decoder::Decoder::new(jpeg);
    let pixels = decoder.decode().expect("decoder rejected encoder output");
    let info = decoder.info().expect("decoder produced no frame info");
    assert_eq!(info.pixel_format, jpeg_decoder::PixelFormat::RGB24);
    (info.width as usize, info.height as usize, pixels)
}
