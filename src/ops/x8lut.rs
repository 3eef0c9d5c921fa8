//! Byte lookup microkernels.
//!
//! `x8lut` maps a contiguous run of 8-bit codes through a 256-entry table;
//! `x8lut_rows` applies it to `rows` rows of a strided 2-D buffer.

/// `output[i] = table[input[i]]` over equal-length slices, unrolled by 4.
#[inline(always)]
pub fn x8lut(input: &[u8], table: &[u8; 256], output: &mut [u8]) {
    debug_assert_eq!(input.len(), output.len());

    let mut src = input.chunks_exact(4);
    let mut dst = output.chunks_exact_mut(4);
    for (x, y) in (&mut src).zip(&mut dst) {
        let (x0, x1, x2, x3) = (x[0], x[1], x[2], x[3]);
        y[0] = table[x0 as usize];
        y[1] = table[x1 as usize];
        y[2] = table[x2 as usize];
        y[3] = table[x3 as usize];
    }
    for (&x, y) in src.remainder().iter().zip(dst.into_remainder()) {
        *y = table[x as usize];
    }
}

/// Apply `x8lut` to the first `channels` bytes of `rows` strided rows.
///
/// Bytes between `channels` and the stride are left untouched.
#[inline]
pub fn x8lut_rows(
    input: &[u8],
    input_stride: usize,
    output: &mut [u8],
    output_stride: usize,
    rows: usize,
    channels: usize,
    table: &[u8; 256],
) {
    debug_assert!(input_stride >= channels && output_stride >= channels);
    for r in 0..rows {
        let x = &input[r * input_stride..][..channels];
        let y = &mut output[r * output_stride..][..channels];
        x8lut(x, table, y);
    }
}
