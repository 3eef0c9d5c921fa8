//! Throughput sweep for the TanH q8 operator.
//!
//! Usage: cargo run --release --example tanh_sweep -- [--json] [--inline]
//!
//! Thread count and tile size come from `Q8K_NUM_THREADS` / `Q8K_TILE_ELEMENTS`.

use q8_kernels::sweep::{characteristic_shapes, reports_json, run_sweep, sweep_params};
use q8_kernels::{initialize, runtime_info, Executor, RuntimeConfig, ThreadPoolExecutor};

const ITERATIONS: usize = 50;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let json = args.iter().any(|a| a == "--json");
    let inline = args.iter().any(|a| a == "--inline");

    initialize()?;
    let pool = if inline {
        None
    } else {
        Some(ThreadPoolExecutor::from_config(&RuntimeConfig::from_env())?)
    };
    let executor = pool.as_ref().map(|p| p as &dyn Executor);

    let reports = run_sweep(&characteristic_shapes(), sweep_params(), ITERATIONS, executor);

    if json {
        println!("{}", reports_json(&reports)?);
        return Ok(());
    }

    if let Some(info) = runtime_info() {
        println!("=== TanH q8 sweep ({}, {} cores) ===\n", info.isa, info.logical_cores);
    }
    println!(
        "{:>8} {:>6} {:>14} {:>12} {:>10}",
        "N", "C", "Melem/s", "GB/s", "status"
    );
    for r in &reports {
        if r.status.is_success() {
            println!(
                "{:>8} {:>6} {:>14.1} {:>12.2} {:>10}",
                r.shape.batch_size,
                r.shape.channels,
                r.items_per_sec / 1e6,
                r.bytes_per_sec / 1e9,
                r.status.name()
            );
        } else {
            println!(
                "{:>8} {:>6} {:>14} {:>12} {:>10}  {}",
                r.shape.batch_size,
                r.shape.channels,
                "-",
                "-",
                r.status.name(),
                r.error.as_deref().unwrap_or("")
            );
        }
    }
    Ok(())
}
