//! Shape sweep and throughput measurement for the TanH operator.
//!
//! Drives the public lifecycle only (create → setup → run × N → delete) and
//! reports element and byte throughput per shape. A shape whose lifecycle
//! fails is recorded with its status and the sweep moves on.

use std::time::{Duration, Instant};

use rand::Rng;
use serde::Serialize;

use crate::error::{KernelResult, Status};
use crate::executor::Executor;
use crate::ops::TanhOperator;
use crate::types::QuantizationParams;

/// One `(batch_size, channels)` case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Shape {
    pub batch_size: usize,
    pub channels: usize,
}

impl Shape {
    pub fn elements(&self) -> usize {
        self.batch_size * self.channels
    }
}

/// Geometric sweep of image-like activations: `N = n*n` spatial positions
/// for `n = 224, 112, …, 7`, with channels doubling from 16 as `n` halves.
pub fn characteristic_shapes() -> Vec<Shape> {
    let mut shapes = Vec::new();
    let mut channels = 16;
    let mut n = 224;
    while n >= 7 {
        shapes.push(Shape {
            batch_size: n * n,
            channels,
        });
        channels *= 2;
        n /= 2;
    }
    shapes
}

/// Parameters used by the sweep: input centered at 127 with unit scale,
/// output covering `[0, 1)` in steps of 1/256.
pub fn sweep_params() -> QuantizationParams {
    QuantizationParams::new(127, 1.0, 0, 1.0 / 256.0)
}

/// Measurement for one shape.
#[derive(Debug, Clone, Serialize)]
pub struct CaseReport {
    pub shape: Shape,
    pub iterations: usize,
    pub elapsed_secs: f64,
    pub items_per_sec: f64,
    pub bytes_per_sec: f64,
    pub status: Status,
    pub error: Option<String>,
}

impl CaseReport {
    fn measured(shape: Shape, iterations: usize, elapsed: Duration) -> Self {
        let secs = elapsed.as_secs_f64().max(f64::MIN_POSITIVE);
        let items = (shape.elements() * iterations) as f64;
        Self {
            shape,
            iterations,
            elapsed_secs: elapsed.as_secs_f64(),
            items_per_sec: items / secs,
            bytes_per_sec: bytes_per_iteration(shape) as f64 * iterations as f64 / secs,
            status: Status::Success,
            error: None,
        }
    }

    fn failed(shape: Shape, status: Status, error: String) -> Self {
        Self {
            shape,
            iterations: 0,
            elapsed_secs: 0.0,
            items_per_sec: 0.0,
            bytes_per_sec: 0.0,
            status,
            error: Some(error),
        }
    }
}

/// Bytes touched per run: each element is read once and written once.
pub fn bytes_per_iteration(shape: Shape) -> u64 {
    2 * shape.elements() as u64
}

/// Uniformly random input codes.
pub fn random_codes(n: usize) -> Vec<u8> {
    let mut codes = vec![0u8; n];
    rand::thread_rng().fill(&mut codes[..]);
    codes
}

/// Measure one shape: contiguous buffers, `iterations` runs on a fixed setup.
pub fn run_case(
    shape: Shape,
    params: QuantizationParams,
    iterations: usize,
    executor: Option<&dyn Executor>,
) -> KernelResult<CaseReport> {
    let input = random_codes(shape.elements());
    let mut output = vec![0xA5u8; shape.elements()];

    let mut op = TanhOperator::create(shape.channels, params, 0)?;
    op.setup(
        shape.batch_size,
        &input,
        shape.channels,
        &mut output,
        shape.channels,
    )?;

    let start = Instant::now();
    for _ in 0..iterations {
        op.run(executor)?;
    }
    let elapsed = start.elapsed();

    op.delete()?;
    Ok(CaseReport::measured(shape, iterations, elapsed))
}

/// Measure every shape, recording failures instead of stopping.
pub fn run_sweep(
    shapes: &[Shape],
    params: QuantizationParams,
    iterations: usize,
    executor: Option<&dyn Executor>,
) -> Vec<CaseReport> {
    shapes
        .iter()
        .map(|&shape| match run_case(shape, params, iterations, executor) {
            Ok(report) => report,
            Err(e) => {
                log::warn!(
                    "Skipping N={} C={}: {e}",
                    shape.batch_size,
                    shape.channels
                );
                CaseReport::failed(shape, e.status(), e.to_string())
            }
        })
        .collect()
}

/// Pretty-printed JSON for a set of reports.
pub fn reports_json(reports: &[CaseReport]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(reports)
}
