//! Affine quantization parameters for 8-bit activation operators.

use serde::Serialize;

/// Affine quantization of an operator's input and output codes.
///
/// `real = (code - zero_point) * scale` on both sides; output codes are
/// additionally clamped into `[output_min, output_max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuantizationParams {
    pub input_zero_point: u8,
    pub input_scale: f32,
    pub output_zero_point: u8,
    pub output_scale: f32,
    pub output_min: u8,
    pub output_max: u8,
}

impl QuantizationParams {
    /// Full-range output clamp (`0..=255`).
    pub fn new(
        input_zero_point: u8,
        input_scale: f32,
        output_zero_point: u8,
        output_scale: f32,
    ) -> Self {
        Self {
            input_zero_point,
            input_scale,
            output_zero_point,
            output_scale,
            output_min: u8::MIN,
            output_max: u8::MAX,
        }
    }

    pub fn with_output_range(mut self, output_min: u8, output_max: u8) -> Self {
        self.output_min = output_min;
        self.output_max = output_max;
        self
    }

    /// Real value represented by an input code.
    #[inline(always)]
    pub fn dequantize_input(&self, code: u8) -> f32 {
        self.input_scale * (i32::from(code) - i32::from(self.input_zero_point)) as f32
    }

    /// Output code for a real value: `round(zero_point + value / scale)`
    /// with ties to even, then clamp.
    #[inline(always)]
    pub fn quantize_output(&self, value: f32) -> u8 {
        let zero_point = f32::from(self.output_zero_point);
        let shifted = zero_point + value / self.output_scale;
        let min = f32::from(self.output_min);
        let max = f32::from(self.output_max);
        // NaN falls through both comparisons; pin it to the zero point.
        let code = if shifted.is_nan() {
            zero_point
        } else {
            shifted.round_ties_even()
        };
        code.max(min).min(max) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dequantize_input() {
        let p = QuantizationParams::new(127, 0.5, 0, 1.0);
        assert_eq!(p.dequantize_input(127), 0.0);
        assert_eq!(p.dequantize_input(129), 1.0);
        assert_eq!(p.dequantize_input(0), -63.5);
        assert_eq!(p.dequantize_input(255), 64.0);
    }

    #[test]
    fn test_quantize_output_rounds_half_to_even() {
        let p = QuantizationParams::new(0, 1.0, 10, 1.0);
        assert_eq!(p.quantize_output(0.5), 10);
        assert_eq!(p.quantize_output(1.5), 12);
        assert_eq!(p.quantize_output(2.5), 12);
        assert_eq!(p.quantize_output(-0.5), 10);
        assert_eq!(p.quantize_output(-1.5), 8);
    }

    #[test]
    fn test_quantize_output_rounds_after_zero_point_shift() {
        // With an odd zero point the tie lands on x.5 only after the shift.
        let p = QuantizationParams::new(0, 1.0, 1, 1.0);
        assert_eq!(p.quantize_output(0.5), 2);
        assert_eq!(p.quantize_output(1.5), 2);
        assert_eq!(p.quantize_output(-0.5), 0);
        assert_eq!(p.quantize_output(f32::NAN), 1);
    }

    #[test]
    fn test_quantize_output_clamps() {
        let p = QuantizationParams::new(0, 1.0, 128, 1.0 / 128.0).with_output_range(10, 240);
        assert_eq!(p.quantize_output(1.0), 240);
        assert_eq!(p.quantize_output(-1.0), 10);
        assert_eq!(p.quantize_output(0.0), 128);
        assert_eq!(p.quantize_output(f32::NAN), 128);
    }
}
