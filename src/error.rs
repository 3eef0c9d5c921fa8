//! Error taxonomy and status codes for the q8 operator API.

use serde::Serialize;
use thiserror::Error;

use crate::ops::tanh::OperatorState;

#[derive(Debug, Error)]
pub enum KernelError {
    #[error("runtime not initialized: call initialize() before creating operators")]
    NotInitialized,
    #[error("runtime initialization failed: {0}")]
    Initialization(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("out of memory: {0}")]
    OutOfMemory(String),
    #[error("invalid state: cannot {operation} an operator in state {state:?}")]
    InvalidState {
        operation: &'static str,
        state: OperatorState,
    },
    #[error("execution error: {0}")]
    Execution(String),
}

pub type KernelResult<T> = Result<T, KernelError>;

impl KernelError {
    /// Flat status code for this error.
    pub fn status(&self) -> Status {
        match self {
            Self::NotInitialized | Self::Initialization(_) => Status::NotInitialized,
            Self::InvalidArgument(_) => Status::InvalidArgument,
            Self::OutOfMemory(_) => Status::OutOfMemory,
            Self::InvalidState { .. } => Status::InvalidState,
            Self::Execution(_) => Status::ExecutionError,
        }
    }
}

impl From<std::collections::TryReserveError> for KernelError {
    fn from(err: std::collections::TryReserveError) -> Self {
        KernelError::OutOfMemory(err.to_string())
    }
}

/// Status code returned at the operator boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Status {
    Success,
    NotInitialized,
    InvalidArgument,
    OutOfMemory,
    InvalidState,
    ExecutionError,
}

impl Status {
    /// Collapse a result into its status code.
    pub fn of<T>(result: &KernelResult<T>) -> Self {
        match result {
            Ok(_) => Status::Success,
            Err(e) => e.status(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::NotInitialized => "not-initialized",
            Self::InvalidArgument => "invalid-argument",
            Self::OutOfMemory => "out-of-memory",
            Self::InvalidState => "invalid-state",
            Self::ExecutionError => "execution-error",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(KernelError::NotInitialized.status(), Status::NotInitialized);
        assert_eq!(
            KernelError::Initialization("probe".into()).status(),
            Status::NotInitialized
        );
        assert_eq!(
            KernelError::InvalidArgument("channels".into()).status(),
            Status::InvalidArgument
        );
        assert_eq!(
            KernelError::InvalidState {
                operation: "run",
                state: OperatorState::Deleted,
            }
            .status(),
            Status::InvalidState
        );
        assert_eq!(Status::of(&Ok::<(), KernelError>(())), Status::Success);
        assert!(Status::Success.is_success());
        assert!(!KernelError::NotInitialized.status().is_success());
        assert_eq!(
            Status::of::<()>(&Err(KernelError::Execution("worker".into()))),
            Status::ExecutionError
        );
    }

    #[test]
    fn test_invalid_state_message() {
        let err = KernelError::InvalidState {
            operation: "setup",
            state: OperatorState::Deleted,
        };
        assert_eq!(
            err.to_string(),
            "invalid state: cannot setup an operator in state Deleted"
        );
    }
}
