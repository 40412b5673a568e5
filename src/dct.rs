//! Forward DCT (Discrete Cosine Transform) for JPEG encoding
//!
//! Separable AAN (Arai, Agui, Nakajima) butterfly applied to rows, then
//! columns. The output keeps the butterfly's own scaling (the DC term is the
//! sum of the level-shifted samples); the quantizer divides by 8 and nothing
//! else.
//!
//! The floating-point operation order is fixed. Reordering it changes
//! rounding, which changes quantized levels and therefore output bytes.

use crate::consts::{DCTSIZE, DCTSIZE2};

const C4: f64 = 0.707106781;
const C6: f64 = 0.382683433;
const C2_MINUS_C6: f64 = 0.541196100;
const C2_PLUS_C6: f64 = 1.306562965;

/// One 8-point AAN pass over `data[offset + k * stride]`, in place.
#[inline]
fn aan_1d(data: &mut [f64; DCTSIZE2], offset: usize, stride: usize) {
    let at = |k: usize| offset + k * stride;

    let tmp0 = data[at(0)] + data[at(7)];
    let tmp7 = data[at(0)] - data[at(7)];
    let tmp1 = data[at(1)] + data[at(6)];
    let tmp6 = data[at(1)] - data[at(6)];
    let tmp2 = data[at(2)] + data[at(5)];
    let tmp5 = data[at(2)] - data[at(5)];
    let tmp3 = data[at(3)] + data[at(4)];
    let tmp4 = data[at(3)] - data[at(4)];

    // Even part
    let tmp10 = tmp0 + tmp3;
    let tmp13 = tmp0 - tmp3;
    let tmp11 = tmp1 + tmp2;
    let tmp12 = tmp1 - tmp2;

    data[at(0)] = tmp10 + tmp11;
    data[at(4)] = tmp10 - tmp11;

    let z1 = (tmp12 + tmp13) * C4;
    data[at(2)] = tmp13 + z1;
    data[at(6)] = tmp13 - z1;

    // Odd part
    let tmp10 = tmp4 + tmp5;
    let tmp11 = tmp5 + tmp6;
    let tmp12 = tmp6 + tmp7;

    let z5 = (tmp10 - tmp12) * C6;
    let z2 = C2_MINUS_C6 * tmp10 + z5;
    let z4 = C2_PLUS_C6 * tmp12 + z5;
    let z3 = tmp11 * C4;

    let z11 = tmp7 + z3;
    let z13 = tmp7 - z3;

    data[at(5)] = z13 + z2;
    data[at(3)] = z13 - z2;
    data[at(1)] = z11 + z4;
    data[at(7)] = z11 - z4;
}

/// Forward 8x8 DCT on raw samples
///
/// Takes an 8x8 block of samples in natural order, level-shifts it by -128
/// and returns unnormalized DCT coefficients in natural order.
pub fn forward_dct_8x8(block: &[f64; DCTSIZE2]) -> [f64; DCTSIZE2] {
    let mut output = [0.0f64; DCTSIZE2];
    for (out, &sample) in output.iter_mut().zip(block.iter()) {
        *out = sample - 128.0;
    }

    for row in 0..DCTSIZE {
        aan_1d(&mut output, row * DCTSIZE, 1);
    }
    for col in 0..DCTSIZE {
        aan_1d(&mut output, col, DCTSIZE);
    }

    output
}
