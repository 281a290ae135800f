//! Stride throughput across lane counts and leg budgets

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use timelock_pbkdf2::{EngineConfig, LaneEngine};

fn ready_engine(lanes: usize) -> LaneEngine {
    let mut engine = LaneEngine::new(EngineConfig::with_max_lanes(lanes))
        .expect("benchmark config should be valid");
    let passwords: Vec<[u8; 4]> = (0..lanes as u32).map(u32::to_le_bytes).collect();
    let elem_len = engine
        .load_passwords(&passwords)
        .expect("benchmark passwords should fit");
    engine
        .setup(lanes, elem_len)
        .expect("benchmark setup should succeed");
    engine
}

/// Legs per second for growing batch sizes
fn benchmark_stride(c: &mut Criterion) {
    let mut group = c.benchmark_group("stride_legs");
    let legs = 1_024u64;

    for lanes in [1usize, 16, 256] {
        group.throughput(Throughput::Elements(legs * lanes as u64));
        group.bench_with_input(BenchmarkId::new("lanes", lanes), &lanes, |b, &lanes| {
            let mut engine = ready_engine(lanes);
            b.iter(|| {
                engine.stride(legs).expect("stride should succeed");
                std::hint::black_box(engine.state_words());
            });
        });
    }

    group.finish();
}

/// Fixed per-batch cost of key schedules and the first block
fn benchmark_setup_and_harvest(c: &mut Criterion) {
    let mut group = c.benchmark_group("setup_harvest");

    for lanes in [16usize, 1_024] {
        group.throughput(Throughput::Elements(lanes as u64));
        group.bench_with_input(BenchmarkId::new("lanes", lanes), &lanes, |b, &lanes| {
            let mut engine = ready_engine(lanes);
            b.iter(|| {
                engine.setup(lanes, 4).expect("setup should succeed");
                engine.harvest().expect("harvest should succeed");
                std::hint::black_box(engine.hash_buf());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_stride, benchmark_setup_and_harvest);
criterion_main!(benches);
