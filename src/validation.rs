//! Validation utilities for q8 operator parameters and buffer layouts.
//!
//! # Design
//!
//! - All functions return `Result<T, String>`; callers map the message into
//!   `KernelError::InvalidArgument`
//! - Size arithmetic uses `checked_mul`/`checked_add`, so an overflowing
//!   layout is a validation failure instead of a wrap-around

use crate::types::QuantizationParams;

/// Validate the channel count (row width) of an operator.
#[inline]
pub fn validate_channels(channels: usize) -> Result<(), String> {
    if channels == 0 {
        return Err("channels must be > 0".into());
    }
    Ok(())
}

/// Validate a quantization scale: strictly positive and a normal float.
#[inline]
pub fn validate_scale(scale: f32, name: &str) -> Result<(), String> {
    if scale <= 0.0 || !scale.is_normal() {
        return Err(format!(
            "{name} {scale} must be a positive normal floating-point value"
        ));
    }
    Ok(())
}

/// Validate the clamping range of the output codes.
#[inline]
pub fn validate_output_range(output_min: u8, output_max: u8) -> Result<(), String> {
    if output_min > output_max {
        return Err(format!(
            "output_min {output_min} > output_max {output_max}"
        ));
    }
    Ok(())
}

/// Validate a full set of affine quantization parameters.
pub fn validate_quantization_params(params: &QuantizationParams) -> Result<(), String> {
    validate_scale(params.input_scale, "input_scale")?;
    validate_scale(params.output_scale, "output_scale")?;
    validate_output_range(params.output_min, params.output_max)
}

/// Validate that rows of `channels` elements spaced by `stride` do not overlap.
#[inline]
pub fn validate_stride(stride: usize, channels: usize, name: &str) -> Result<(), String> {
    if stride < channels {
        return Err(format!("{name} {stride} < channels {channels}"));
    }
    Ok(())
}

/// Minimum buffer length addressing `batch_size` rows of `channels` elements.
///
/// # Returns
/// - `Ok(0)` when there is nothing to address
/// - `Ok((batch_size - 1) * stride + channels)` otherwise
/// - `Err(String)` if the computation overflows
#[inline]
pub fn required_len(
    batch_size: usize,
    stride: usize,
    channels: usize,
    name: &str,
) -> Result<usize, String> {
    if batch_size == 0 || channels == 0 {
        return Ok(0);
    }
    (batch_size - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(channels))
        .ok_or_else(|| format!("{name} size overflow"))
}

/// Validate a buffer is at least `required` elements long.
#[inline]
pub fn validate_buffer_len(actual: usize, required: usize, name: &str) -> Result<(), String> {
    if actual < required {
        return Err(format!(
            "{name} len {actual} < required {required}"
        ));
    }
    Ok(())
}

/// Validate one side (input or output) of a strided 2-D buffer binding.
///
/// # Returns
/// - `Ok(required_len)` for the buffer
/// - `Err(String)` describing the validation failure
pub fn validate_strided_buffer(
    len: usize,
    batch_size: usize,
    stride: usize,
    channels: usize,
    name: &str,
) -> Result<usize, String> {
    validate_stride(stride, channels, &format!("{name}_stride"))?;
    let required = required_len(batch_size, stride, channels, name)?;
    validate_buffer_len(len, required, name)?;
    Ok(required)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> QuantizationParams {
        QuantizationParams {
            input_zero_point: 127,
            input_scale: 1.0,
            output_zero_point: 0,
            output_scale: 1.0 / 256.0,
            output_min: 0,
            output_max: 255,
        }
    }

    #[test]
    fn test_validate_channels() {
        assert!(validate_channels(1).is_ok());
        assert!(validate_channels(0).is_err());
    }

    #[test]
    fn test_validate_scale() {
        assert!(validate_scale(1.0, "s").is_ok());
        assert!(validate_scale(1.0e-6, "s").is_ok());
        assert!(validate_scale(0.0, "s").is_err());
        assert!(validate_scale(-1.0, "s").is_err());
        assert!(validate_scale(f32::NAN, "s").is_err());
        assert!(validate_scale(f32::INFINITY, "s").is_err());
        assert!(validate_scale(f32::MIN_POSITIVE / 2.0, "s").is_err());
    }

    #[test]
    fn test_validate_quantization_params() {
        assert!(validate_quantization_params(&params()).is_ok());

        let mut p = params();
        p.output_min = 200;
        p.output_max = 100;
        let err = validate_quantization_params(&p).unwrap_err();
        assert!(err.contains("output_min"));

        let mut p = params();
        p.output_min = 42;
        p.output_max = 42;
        assert!(validate_quantization_params(&p).is_ok());

        let mut p = params();
        p.output_scale = 0.0;
        assert!(validate_quantization_params(&p).unwrap_err().contains("output_scale"));
    }

    #[test]
    fn test_required_len() {
        assert_eq!(required_len(0, 32, 16, "input").unwrap(), 0);
        assert_eq!(required_len(1, 32, 16, "input").unwrap(), 16);
        assert_eq!(required_len(4, 32, 16, "input").unwrap(), 3 * 32 + 16);
        assert!(required_len(usize::MAX, 2, 1, "input").is_err());
    }

    #[test]
    fn test_validate_strided_buffer() {
        assert_eq!(validate_strided_buffer(64, 4, 16, 16, "input").unwrap(), 64);
        // Last row only needs `channels` bytes, not a full stride.
        assert_eq!(validate_strided_buffer(112, 4, 32, 16, "input").unwrap(), 112);
        assert!(validate_strided_buffer(111, 4, 32, 16, "input").is_err());
        let err = validate_strided_buffer(64, 4, 8, 16, "output").unwrap_err();
        assert!(err.contains("output_stride"));
        // Empty batches need no storage at all.
        assert!(validate_strided_buffer(0, 0, 16, 16, "input").is_ok());
    }
}
