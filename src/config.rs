//! Runtime configuration: defaults plus environment overrides.
//!
//! - `Q8K_NUM_THREADS`: worker count for executors built from the config.
//! - `Q8K_TILE_ELEMENTS`: element tile used to partition contiguous runs.

use std::env;

use serde::Serialize;

use crate::error::{KernelError, KernelResult};

/// Default tile used by the contiguous execution path.
pub const DEFAULT_TILE_ELEMENTS: usize = 1024;

pub const ENV_NUM_THREADS: &str = "Q8K_NUM_THREADS";
pub const ENV_TILE_ELEMENTS: &str = "Q8K_TILE_ELEMENTS";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuntimeConfig {
    /// Worker threads for `ThreadPoolExecutor::from_config`.
    pub num_threads: usize,
    /// Elements per tile when a buffer is processed as one flat run.
    pub tile_elements: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            num_threads: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            tile_elements: DEFAULT_TILE_ELEMENTS,
        }
    }
}

impl RuntimeConfig {
    /// Defaults, overridden by any parsable environment values.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(n) = read_usize(ENV_NUM_THREADS) {
            config.num_threads = n;
        }
        if let Some(tile) = read_usize(ENV_TILE_ELEMENTS) {
            config.tile_elements = tile;
        }
        config
    }

    pub fn with_num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = num_threads;
        self
    }

    pub fn with_tile_elements(mut self, tile_elements: usize) -> Self {
        self.tile_elements = tile_elements;
        self
    }

    pub fn validate(&self) -> KernelResult<()> {
        if self.num_threads == 0 {
            return Err(KernelError::InvalidArgument(
                "num_threads must be > 0".into(),
            ));
        }
        if self.tile_elements == 0 {
            return Err(KernelError::InvalidArgument(
                "tile_elements must be > 0".into(),
            ));
        }
        Ok(())
    }
}

fn read_usize(key: &str) -> Option<usize> {
    let value = env::var(key).ok()?;
    match value.trim().parse::<usize>() {
        Ok(n) => Some(n),
        Err(e) => {
            log::warn!("Ignoring {key}={value:?}: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = RuntimeConfig::default();
        assert!(config.num_threads >= 1);
        assert_eq!(config.tile_elements, DEFAULT_TILE_ELEMENTS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_values_rejected() {
        let config = RuntimeConfig::default().with_tile_elements(0);
        assert!(matches!(
            config.validate(),
            Err(KernelError::InvalidArgument(_))
        ));
        let config = RuntimeConfig::default().with_num_threads(0);
        assert!(matches!(
            config.validate(),
            Err(KernelError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_builder_overrides() {
        let config = RuntimeConfig::default()
            .with_num_threads(3)
            .with_tile_elements(64);
        assert_eq!(config.num_threads, 3);
        assert_eq!(config.tile_elements, 64);
    }
}
