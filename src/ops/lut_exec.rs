//! Strided execution of a lookup table over a batch × channels buffer.
//!
//! Two shapes of work:
//! - contiguous: both strides equal `channels` (or a single row), so the
//!   whole binding is one flat run, cut into tile-aligned element chunks
//! - strided: rows are grouped into contiguous row ranges
//!
//! Each task owns a disjoint `&mut` window of the output buffer, so workers
//! never alias. With no executor (or a single worker) everything runs on
//! the caller's thread.

use crate::error::KernelResult;
use crate::executor::{Executor, Task};
use crate::ops::lut::LookupTable;
use crate::ops::x8lut::{x8lut, x8lut_rows};

/// Tasks created per worker; evens out load when rows vary in cost.
const TASKS_PER_WORKER: usize = 4;

/// Caller-owned buffers bound to an operator by `setup`.
#[derive(Debug)]
pub struct BufferBinding<'a> {
    pub batch_size: usize,
    pub input: &'a [u8],
    pub input_stride: usize,
    pub output: &'a mut [u8],
    pub output_stride: usize,
}

impl BufferBinding<'_> {
    /// Whether the addressed elements form one gap-free run on both sides.
    pub fn is_contiguous(&self, channels: usize) -> bool {
        self.batch_size <= 1 || (self.input_stride == channels && self.output_stride == channels)
    }
}

/// Element chunk for the contiguous path: tile-aligned, at least one tile.
///
/// `workers` comes from an arbitrary `Executor`, so the arithmetic saturates.
fn contiguous_chunk(elements: usize, workers: usize, tile: usize) -> usize {
    let workers = workers.clamp(1, elements.max(1));
    let per_task = elements.div_ceil(workers.saturating_mul(TASKS_PER_WORKER));
    per_task.div_ceil(tile).max(1).saturating_mul(tile)
}

/// Apply `table` to every addressed element of `binding`.
///
/// `binding` must already be validated against `channels` (strides and
/// buffer lengths); see `validation::validate_strided_buffer`.
pub fn execute_lut(
    table: &LookupTable,
    binding: &mut BufferBinding<'_>,
    channels: usize,
    tile_elements: usize,
    executor: Option<&dyn Executor>,
) -> KernelResult<()> {
    let batch_size = binding.batch_size;
    if batch_size == 0 || channels == 0 {
        return Ok(());
    }
    let lut = table.as_array();
    let executor = executor.filter(|e| e.num_threads() > 1);

    if binding.is_contiguous(channels) {
        let elements = batch_size * channels;
        let input = &binding.input[..elements];
        let output = &mut binding.output[..elements];
        match executor {
            Some(exec) if elements > tile_elements => {
                let chunk = contiguous_chunk(elements, exec.num_threads(), tile_elements);
                let tasks: Vec<Task<'_>> = input
                    .chunks(chunk)
                    .zip(output.chunks_mut(chunk))
                    .map(|(x, y)| Box::new(move || x8lut(x, lut, y)) as Task<'_>)
                    .collect();
                exec.execute(tasks)
            }
            _ => {
                x8lut(input, lut, output);
                Ok(())
            }
        }
    } else {
        let (input_stride, output_stride) = (binding.input_stride, binding.output_stride);
        let output_len = (batch_size - 1) * output_stride + channels;
        let input = binding.input;
        let output = &mut binding.output[..output_len];
        match executor {
            Some(exec) if batch_size > 1 => {
                let workers = exec.num_threads().min(batch_size);
                let rows_per_task =
                    batch_size.div_ceil(workers.saturating_mul(TASKS_PER_WORKER));
                let tasks = strided_tasks(
                    input,
                    input_stride,
                    output,
                    output_stride,
                    batch_size,
                    channels,
                    rows_per_task,
                    lut,
                );
                exec.execute(tasks)
            }
            _ => {
                x8lut_rows(input, input_stride, output, output_stride, batch_size, channels, lut);
                Ok(())
            }
        }
    }
}

/// Split a strided binding into row-range tasks over disjoint output windows.
#[allow(clippy::too_many_arguments)]
fn strided_tasks<'s>(
    input: &'s [u8],
    input_stride: usize,
    output: &'s mut [u8],
    output_stride: usize,
    batch_size: usize,
    channels: usize,
    rows_per_task: usize,
    lut: &'s [u8; 256],
) -> Vec<Task<'s>> {
    let mut tasks: Vec<Task<'s>> = Vec::with_capacity(batch_size.div_ceil(rows_per_task));
    let mut rest = output;
    let mut row = 0;
    while row < batch_size {
        let rows = rows_per_task.min(batch_size - row);
        let window = if row + rows == batch_size {
            std::mem::take(&mut rest)
        } else {
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(rows * output_stride);
            rest = tail;
            head
        };
        let src = &input[row * input_stride..];
        tasks.push(Box::new(move || {
            x8lut_rows(src, input_stride, window, output_stride, rows, channels, lut)
        }));
        row += rows;
    }
    tasks
}
