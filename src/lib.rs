//! q8-kernels: quantized 8-bit activation operators.
//!
//! This crate provides a TanH operator over `uint8` affine-quantized tensors:
//! - **Table-Driven**: the activation is evaluated once per input code at
//!   creation into a 256-entry lookup table; execution is a byte gather
//! - **Explicit Lifecycle**: create → setup → run → delete, with out-of-order
//!   calls rejected as `InvalidState` instead of undefined behavior
//! - **Strided Buffers**: independent input/output row strides, padding
//!   bytes untouched
//! - **Injectable Parallelism**: `run` takes an optional [`Executor`];
//!   `None` runs on the calling thread
//!
//! # Quick Start
//!
//! ```
//! use q8_kernels::{initialize, QuantizationParams, TanhOperator, ThreadPoolExecutor};
//!
//! initialize().unwrap();
//! let params = QuantizationParams::new(127, 1.0, 0, 1.0 / 256.0);
//!
//! let (batch, channels) = (64, 32);
//! let input = vec![200u8; batch * channels];
//! let mut output = vec![0u8; batch * channels];
//!
//! let pool = ThreadPoolExecutor::new(2).unwrap();
//! let mut op = TanhOperator::create(channels, params, 0).unwrap();
//! op.setup(batch, &input, channels, &mut output, channels).unwrap();
//! op.run(Some(&pool)).unwrap();
//! op.delete().unwrap();
//! assert!(output.iter().all(|&q| q == 255));
//! ```

pub mod config;
pub mod error;
pub mod executor;
pub mod hw_info;
pub mod ops;
pub mod runtime;
pub mod sweep;
pub mod types;
pub mod validation;

pub use config::RuntimeConfig;
pub use error::{KernelError, KernelResult, Status};
pub use executor::{Executor, Sequential, Task, ThreadPoolExecutor};
pub use hw_info::IsaFeatures;
pub use ops::{
    create_tanh_nc_q8, BufferBinding, LookupTable, OperatorState, TanhOperator, LUT_SIZE,
};
pub use runtime::{initialize, initialize_with, is_initialized, runtime_info, RuntimeInfo};
pub use types::QuantizationParams;
