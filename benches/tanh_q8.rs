//! TanH q8 benchmarks
//!
//! Shapes: N = n*n for n = 224 .. 7, channels doubling from 16
//! Compared: inline run vs thread-pool executor
//! Reported: element throughput, and bytes (read + write) for the pooled run

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::time::Duration;

use q8_kernels::sweep::{bytes_per_iteration, characteristic_shapes, random_codes, sweep_params, Shape};
use q8_kernels::{initialize, Executor, LookupTable, RuntimeConfig, TanhOperator, ThreadPoolExecutor};

fn shape_label(shape: Shape) -> String {
    format!("N{}xC{}", shape.batch_size, shape.channels)
}

fn run_shape(c: &mut Criterion, name: &str, executor: Option<&dyn Executor>, bytes: bool) {
    initialize().unwrap();
    let mut group = c.benchmark_group(name);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(3));

    for shape in characteristic_shapes() {
        if bytes {
            group.throughput(Throughput::Bytes(bytes_per_iteration(shape)));
        } else {
            group.throughput(Throughput::Elements(shape.elements() as u64));
        }
        let input = random_codes(shape.elements());
        let mut output = vec![0u8; shape.elements()];
        let mut op = TanhOperator::create(shape.channels, sweep_params(), 0).unwrap();
        op.setup(shape.batch_size, &input, shape.channels, &mut output, shape.channels)
            .unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(shape_label(shape)), &shape, |b, _| {
            b.iter(|| op.run(black_box(executor)).unwrap());
        });
        op.delete().unwrap();
    }
    group.finish();
}

fn bench_tanh_inline(c: &mut Criterion) {
    run_shape(c, "tanh_q8_inline", None, false);
}

fn bench_tanh_pool(c: &mut Criterion) {
    let config = RuntimeConfig::from_env();
    let pool = ThreadPoolExecutor::from_config(&config).unwrap();
    run_shape(c, "tanh_q8_pool", Some(&pool), true);
}

fn bench_table_build(c: &mut Criterion) {
    let params = sweep_params();
    c.bench_function("tanh_q8_table_build", |b| {
        b.iter(|| LookupTable::tanh(black_box(&params)).unwrap());
    });
}

criterion_group!(benches, bench_tanh_inline, bench_tanh_pool, bench_table_build);
criterion_main!(benches);
