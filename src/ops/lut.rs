//! 256-entry lookup tables for 8-bit activations.
//!
//! Every possible input code is mapped once, at operator creation, to its
//! quantized activation output. Execution then reduces to a byte gather.

use std::ops::Index;

use crate::error::KernelResult;
use crate::types::QuantizationParams;

/// Number of distinct 8-bit codes.
pub const LUT_SIZE: usize = 256;

/// Immutable code-to-code table.
#[derive(Clone, PartialEq, Eq)]
pub struct LookupTable {
    entries: Box<[u8; LUT_SIZE]>,
}

impl LookupTable {
    /// Build a table for `f` under `params`.
    ///
    /// Entry `q` is `clamp(round(output_zero_point + f(x) / output_scale))`
    /// with `x = (q - input_zero_point) * input_scale`. Storage is reserved
    /// fallibly; on failure nothing is retained.
    pub fn build<F>(params: &QuantizationParams, f: F) -> KernelResult<Self>
    where
        F: Fn(f32) -> f32,
    {
        let mut entries = Vec::new();
        entries.try_reserve_exact(LUT_SIZE)?;
        entries.extend((0..LUT_SIZE).map(|code| {
            let x = params.dequantize_input(code as u8);
            params.quantize_output(f(x))
        }));

        let entries: Box<[u8; LUT_SIZE]> = entries
            .into_boxed_slice()
            .try_into()
            .unwrap_or_else(|_| unreachable!("table holds exactly {LUT_SIZE} entries"));
        Ok(Self { entries })
    }

    /// Hyperbolic tangent table.
    pub fn tanh(params: &QuantizationParams) -> KernelResult<Self> {
        Self::build(params, f32::tanh)
    }

    #[inline(always)]
    pub fn get(&self, code: u8) -> u8 {
        self.entries[code as usize]
    }

    #[inline(always)]
    pub fn as_array(&self) -> &[u8; LUT_SIZE] {
        &self.entries
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.entries[..]
    }

    /// Whether entries never decrease with the input code.
    pub fn is_monotonic(&self) -> bool {
        self.entries.windows(2).all(|w| w[0] <= w[1])
    }
}

impl Index<u8> for LookupTable {
    type Output = u8;

    #[inline(always)]
    fn index(&self, code: u8) -> &u8 {
        &self.entries[code as usize]
    }
}

impl std::fmt::Debug for LookupTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (lo, hi) = self
            .entries
            .iter()
            .fold((u8::MAX, u8::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        f.debug_struct("LookupTable")
            .field("len", &LUT_SIZE)
            .field("min", &lo)
            .field("max", &hi)
            .finish()
    }
}
