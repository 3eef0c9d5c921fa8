//! Parallel executors: run a batch of independent tasks and join.
//!
//! Operators never spawn threads themselves. `run` receives an optional
//! `&dyn Executor`; `None` means the caller's thread does all the work.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use rayon::prelude::*;

use crate::config::RuntimeConfig;
use crate::error::{KernelError, KernelResult};

/// One independent unit of work borrowing from the caller's scope.
pub type Task<'s> = Box<dyn FnOnce() + Send + 's>;

/// Capability: run N independent tasks, returning once all have finished.
pub trait Executor: Sync {
    /// Number of workers tasks may be spread across.
    fn num_threads(&self) -> usize;

    /// Run every task to completion.
    ///
    /// Returns `KernelError::Execution` if any task could not complete.
    fn execute<'s>(&self, tasks: Vec<Task<'s>>) -> KernelResult<()>;
}

/// Single worker: tasks run inline, in order, on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sequential;

impl Executor for Sequential {
    fn num_threads(&self) -> usize {
        1
    }

    fn execute<'s>(&self, tasks: Vec<Task<'s>>) -> KernelResult<()> {
        catch_task_panic(|| {
            for task in tasks {
                task();
            }
        })
    }
}

/// Executor backed by a dedicated rayon thread pool.
pub struct ThreadPoolExecutor {
    pool: rayon::ThreadPool,
}

impl ThreadPoolExecutor {
    pub fn new(num_threads: usize) -> KernelResult<Self> {
        if num_threads == 0 {
            return Err(KernelError::InvalidArgument(
                "executor num_threads must be > 0".into(),
            ));
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|idx| format!("q8k-worker{idx}"))
            .build()
            .map_err(|e| {
                KernelError::Initialization(format!("failed to build thread pool: {e}"))
            })?;
        log::debug!("Built thread pool executor with {num_threads} workers");
        Ok(Self { pool })
    }

    pub fn from_config(config: &RuntimeConfig) -> KernelResult<Self> {
        Self::new(config.num_threads)
    }
}

impl std::fmt::Debug for ThreadPoolExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreadPoolExecutor")
            .field("num_threads", &self.pool.current_num_threads())
            .finish()
    }
}

impl Executor for ThreadPoolExecutor {
    fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    fn execute<'s>(&self, tasks: Vec<Task<'s>>) -> KernelResult<()> {
        catch_task_panic(|| {
            self.pool
                .install(|| tasks.into_par_iter().for_each(|task| task()))
        })
    }
}

fn catch_task_panic<F: FnOnce()>(f: F) -> KernelResult<()> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        KernelError::Execution(format!("task panicked: {}", panic_message(&*payload)))
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
