//! Process-wide runtime initialization.
//!
//! Operators can only be created after `initialize()` has succeeded once.
//! Initialization probes the hardware, captures the effective
//! `RuntimeConfig`, and is idempotent: later calls return `Ok(())` and keep
//! the first configuration.

use std::sync::OnceLock;

use serde::Serialize;

use crate::config::RuntimeConfig;
use crate::error::{KernelError, KernelResult};
use crate::hw_info::{self, IsaFeatures};

/// Capabilities recorded at initialization.
#[derive(Debug, Clone, Serialize)]
pub struct RuntimeInfo {
    pub isa: IsaFeatures,
    pub logical_cores: usize,
    pub config: RuntimeConfig,
}

static RUNTIME: OnceLock<RuntimeInfo> = OnceLock::new();

/// Initialize with `RuntimeConfig::from_env()`.
pub fn initialize() -> KernelResult<()> {
    if RUNTIME.get().is_some() {
        return Ok(());
    }
    initialize_with(RuntimeConfig::from_env())
}

/// Initialize with an explicit configuration.
///
/// An invalid configuration is rejected and leaves the runtime
/// uninitialized. Once initialized, further calls are no-ops.
pub fn initialize_with(config: RuntimeConfig) -> KernelResult<()> {
    if let Some(existing) = RUNTIME.get() {
        if existing.config != config {
            log::debug!(
                "Runtime already initialized with {:?}; ignoring {:?}",
                existing.config,
                config
            );
        }
        return Ok(());
    }
    config.validate()?;

    RUNTIME.get_or_init(|| {
        let info = probe(config);
        log::info!(
            "q8-kernels runtime ready: isa={} logical_cores={} threads={} tile={}",
            info.isa,
            info.logical_cores,
            info.config.num_threads,
            info.config.tile_elements
        );
        info
    });
    Ok(())
}

pub fn is_initialized() -> bool {
    RUNTIME.get().is_some()
}

pub fn runtime_info() -> Option<&'static RuntimeInfo> {
    RUNTIME.get()
}

/// Runtime info, or `NotInitialized` if `initialize()` has not succeeded.
pub(crate) fn require_initialized() -> KernelResult<&'static RuntimeInfo> {
    RUNTIME.get().ok_or(KernelError::NotInitialized)
}

fn probe(config: RuntimeConfig) -> RuntimeInfo {
    RuntimeInfo {
        isa: IsaFeatures::detect(),
        logical_cores: hw_info::logical_cores(),
        config,
    }
}
