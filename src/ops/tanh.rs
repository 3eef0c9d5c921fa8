//! Quantized TanH operator over `batch × channels` 8-bit buffers (NC layout).
//!
//! Lifecycle:
//!
//! ```text
//! create ──> Created ──setup──> Configured ──setup/run──> Configured
//!               │                    │
//!               └──────delete────────┴──> Deleted (terminal)
//! ```
//!
//! Quantization parameters are fixed at creation, where the 256-entry table
//! is built once. `setup` only rebinds shape and buffers, so it can be called
//! any number of times without rebuilding the table.
//!
//! # Example
//!
//! ```
//! use q8_kernels::{initialize, QuantizationParams, TanhOperator};
//!
//! initialize().unwrap();
//! let params = QuantizationParams::new(127, 1.0, 0, 1.0 / 256.0);
//! let input = [127u8; 16];
//! let mut output = [0xA5u8; 16];
//!
//! let mut op = TanhOperator::create(16, params, 0).unwrap();
//! op.setup(1, &input, 16, &mut output, 16).unwrap();
//! op.run(None).unwrap();
//! assert_eq!(op.output().unwrap(), &[0u8; 16][..]);
//! op.delete().unwrap();
//! ```

use serde::Serialize;

use crate::error::{KernelError, KernelResult};
use crate::executor::Executor;
use crate::ops::lut::LookupTable;
use crate::ops::lut_exec::{execute_lut, BufferBinding};
use crate::runtime;
use crate::types::QuantizationParams;
use crate::validation::{validate_channels, validate_quantization_params, validate_strided_buffer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OperatorState {
    /// Table built, no buffers bound.
    Created,
    /// Buffers bound; `run` may be called.
    Configured,
    /// Released; every further call fails with `InvalidState`.
    Deleted,
}

/// TanH over 8-bit quantized codes, backed by a per-operator lookup table.
///
/// `'a` is the lifetime of the caller's buffers bound by `setup`.
#[derive(Debug)]
pub struct TanhOperator<'a> {
    channels: usize,
    params: QuantizationParams,
    flags: u32,
    tile_elements: usize,
    state: OperatorState,
    table: Option<LookupTable>,
    binding: Option<BufferBinding<'a>>,
}

impl<'a> TanhOperator<'a> {
    /// Validate parameters and build the lookup table.
    ///
    /// # Errors
    /// - `NotInitialized` if `initialize()` has not succeeded
    /// - `InvalidArgument` for `channels == 0`, a non-positive or non-normal
    ///   scale, or `output_min > output_max`
    /// - `OutOfMemory` if table storage cannot be reserved
    pub fn create(channels: usize, params: QuantizationParams, flags: u32) -> KernelResult<Self> {
        let info = runtime::require_initialized()?;
        validate_channels(channels).map_err(KernelError::InvalidArgument)?;
        validate_quantization_params(&params).map_err(KernelError::InvalidArgument)?;

        let table = LookupTable::tanh(&params)?;
        log::debug!(
            "Created TanH operator: channels={channels} flags={flags:#x} params={params:?}"
        );

        Ok(Self {
            channels,
            params,
            flags,
            tile_elements: info.config.tile_elements,
            state: OperatorState::Created,
            table: Some(table),
            binding: None,
        })
    }

    /// Bind `batch_size` rows of input and output.
    ///
    /// Row `r` reads `input[r * input_stride..][..channels]` and writes
    /// `output[r * output_stride..][..channels]`. Replaces any previous
    /// binding; on error the previous binding and state are kept.
    ///
    /// # Errors
    /// - `InvalidState` after `delete`
    /// - `InvalidArgument` if a stride is below `channels` or a buffer is
    ///   too short for the addressed rows
    pub fn setup(
        &mut self,
        batch_size: usize,
        input: &'a [u8],
        input_stride: usize,
        output: &'a mut [u8],
        output_stride: usize,
    ) -> KernelResult<()> {
        self.ensure_live("setup")?;
        let channels = self.channels;
        validate_strided_buffer(input.len(), batch_size, input_stride, channels, "input")
            .map_err(KernelError::InvalidArgument)?;
        validate_strided_buffer(output.len(), batch_size, output_stride, channels, "output")
            .map_err(KernelError::InvalidArgument)?;

        log::debug!(
            "Setup TanH operator: batch_size={batch_size} channels={channels} \
             input_stride={input_stride} output_stride={output_stride}"
        );
        self.binding = Some(BufferBinding {
            batch_size,
            input,
            input_stride,
            output,
            output_stride,
        });
        self.state = OperatorState::Configured;
        Ok(())
    }

    /// Apply the table to every bound element.
    ///
    /// With `executor == None` the work runs on the calling thread; otherwise
    /// it is partitioned across the executor's workers and joined before
    /// returning.
    ///
    /// # Errors
    /// - `InvalidState` unless the operator is `Configured`
    /// - `Execution` if the executor fails
    pub fn run(&mut self, executor: Option<&dyn Executor>) -> KernelResult<()> {
        if self.state != OperatorState::Configured {
            return Err(self.invalid_state("run"));
        }
        let (channels, tile_elements, state) = (self.channels, self.tile_elements, self.state);
        match (self.table.as_ref(), self.binding.as_mut()) {
            (Some(table), Some(binding)) => {
                execute_lut(table, binding, channels, tile_elements, executor)
            }
            _ => Err(KernelError::InvalidState {
                operation: "run",
                state,
            }),
        }
    }

    /// Release the table and binding. Terminal.
    pub fn delete(&mut self) -> KernelResult<()> {
        self.ensure_live("delete")?;
        self.binding = None;
        self.table = None;
        self.state = OperatorState::Deleted;
        log::debug!("Deleted TanH operator: channels={}", self.channels);
        Ok(())
    }

    pub fn state(&self) -> OperatorState {
        self.state
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn flags(&self) -> u32 {
        self.flags
    }

    pub fn params(&self) -> &QuantizationParams {
        &self.params
    }

    /// The lookup table, until the operator is deleted.
    pub fn table(&self) -> Option<&LookupTable> {
        self.table.as_ref()
    }

    /// Bound batch size, if configured.
    pub fn batch_size(&self) -> Option<usize> {
        self.binding.as_ref().map(|b| b.batch_size)
    }

    /// Read access to the bound output buffer.
    pub fn output(&self) -> Option<&[u8]> {
        self.binding.as_ref().map(|b| &*b.output)
    }

    fn ensure_live(&self, operation: &'static str) -> KernelResult<()> {
        if self.state == OperatorState::Deleted {
            return Err(self.invalid_state(operation));
        }
        Ok(())
    }

    fn invalid_state(&self, operation: &'static str) -> KernelError {
        KernelError::InvalidState {
            operation,
            state: self.state,
        }
    }
}

/// Flat-argument form of [`TanhOperator::create`].
#[allow(clippy::too_many_arguments)]
pub fn create_tanh_nc_q8<'a>(
    channels: usize,
    input_zero_point: u8,
    input_scale: f32,
    output_zero_point: u8,
    output_scale: f32,
    output_min: u8,
    output_max: u8,
    flags: u32,
) -> KernelResult<TanhOperator<'a>> {
    let params = QuantizationParams {
        input_zero_point,
        input_scale,
        output_zero_point,
        output_scale,
        output_min,
        output_max,
    };
    TanhOperator::create(channels, params, flags)
}
