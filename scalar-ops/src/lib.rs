//! Scalar reference implementations: `extern "C"` per-element functions.
//!
//! Golden reference for correctness testing of `q8-kernels`. Every value is
//! computed directly from the affine quantization formula, with no lookup
//! table, so table-driven kernels can be checked against it element by element.
//!
//! This crate is compiled with `opt-level = 1` (configured in the workspace
//! root Cargo.toml) so the loops stay scalar.

/// Quantized TanH of a single code.
///
/// `x = input_scale * (q - input_zero_point)`, `y = tanh(x)`,
/// `out = round_half_even(output_zero_point + y / output_scale)`, clamped to
/// `[output_min, output_max]`.
#[no_mangle]
#[inline(never)]
#[allow(clippy::too_many_arguments)]
pub extern "C" fn scalar_tanh_q8_element(
    q: u8,
    input_zero_point: u8,
    input_scale: f32,
    output_zero_point: u8,
    output_scale: f32,
    output_min: u8,
    output_max: u8,
) -> u8 {
    let x = input_scale * (q as i32 - input_zero_point as i32) as f32;
    let y = x.tanh();
    let shifted = output_zero_point as f32 + y / output_scale;
    let code = if shifted.is_nan() {
        output_zero_point as f32
    } else {
        shifted.round_ties_even()
    };
    code.max(output_min as f32).min(output_max as f32) as u8
}

/// Quantized TanH over `n` contiguous codes: `out[i] = tanh_q8(x[i])`.
///
/// # Safety
/// `x` must be valid for `n` reads and `out` valid for `n` writes.
#[no_mangle]
#[inline(never)]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn scalar_tanh_q8(
    x: *const u8,
    out: *mut u8,
    n: usize,
    input_zero_point: u8,
    input_scale: f32,
    output_zero_point: u8,
    output_scale: f32,
    output_min: u8,
    output_max: u8,
) {
    for i in 0..n {
        *out.add(i) = scalar_tanh_q8_element(
            *x.add(i),
            input_zero_point,
            input_scale,
            output_zero_point,
            output_scale,
            output_min,
            output_max,
        );
    }
}

/// Quantized TanH over `rows` strided rows of `channels` codes each.
///
/// # Safety
/// `x` must be valid for reads of `(rows - 1) * x_stride + channels` bytes and
/// `out` valid for writes of `(rows - 1) * out_stride + channels` bytes.
#[no_mangle]
#[inline(never)]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn scalar_tanh_q8_rows(
    x: *const u8,
    x_stride: usize,
    out: *mut u8,
    out_stride: usize,
    rows: usize,
    channels: usize,
    input_zero_point: u8,
    input_scale: f32,
    output_zero_point: u8,
    output_scale: f32,
    output_min: u8,
    output_max: u8,
) {
    for r in 0..rows {
        scalar_tanh_q8(
            x.add(r * x_stride),
            out.add(r * out_stride),
            channels,
            input_zero_point,
            input_scale,
            output_zero_point,
            output_scale,
            output_min,
            output_max,
        );
    }
}
