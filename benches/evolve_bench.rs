//! Criterion benchmarks for the evolutionary core.
//!
//! Uses a synthetic gray target so numbers measure engine and codec
//! overhead plus the CPU rasterizer, independent of any image file.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use polyvolve::error::EvoError;
use polyvolve::evo::{EvoConfig, Evolution, Selection, SizeScheduler};
use polyvolve::fitness::{CpuRasterizer, MeanSquareComparator, PixelEvaluator};
use polyvolve::genome::{self, BitString, Crossover, POLYGON_BITS};
use polyvolve::random::seeded_rng;
use polyvolve::report::{ReportRecord, ReportSink, SnapshotSink};
use std::path::PathBuf;

struct NullReport;

impl ReportSink for NullReport {
    fn report(&mut self, _record: &ReportRecord) -> Result<(), EvoError> {
        Ok(())
    }
}

struct NullSnapshot;

impl SnapshotSink for NullSnapshot {
    fn save(
        &mut self,
        _polygons: &[genome::Polygon],
        _generation: u64,
        _fitness: f64,
    ) -> Result<PathBuf, EvoError> {
        Ok(PathBuf::new())
    }
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    for polygons in [1usize, 10, 50] {
        let mut rng = seeded_rng(42);
        let bits = BitString::random(polygons * POLYGON_BITS, &mut rng);
        group.bench_with_input(BenchmarkId::from_parameter(polygons), &bits, |b, bits| {
            b.iter(|| genome::decode(black_box(bits), polygons).unwrap());
        });
    }
    group.finish();
}

fn bench_crossover(c: &mut Criterion) {
    let mut group = c.benchmark_group("crossover");
    let mut rng = seeded_rng(42);
    let a = BitString::random(50 * POLYGON_BITS, &mut rng);
    let b = BitString::random(50 * POLYGON_BITS, &mut rng);

    for (name, method) in [
        ("uniform", Crossover::Uniform),
        ("one_point", Crossover::OnePoint),
        ("two_point", Crossover::TwoPoint),
    ] {
        group.bench_function(name, |bench| {
            bench.iter(|| method.recombine(black_box(&a), black_box(&b), &mut rng).unwrap());
        });
    }
    group.finish();
}

fn bench_engine_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_step");
    group.sample_size(10);

    for (name, selection, size) in [
        ("tournament", Selection::Tournament, 3),
        ("roulette", Selection::Roulette, 30),
    ] {
        group.bench_function(name, |b| {
            let config = EvoConfig::default()
                .with_selection(selection, size)
                .with_seed(42)
                .with_report_every(u64::MAX / 2)
                .with_save_every(u64::MAX / 2);
            let evaluator = PixelEvaluator::new(
                CpuRasterizer::default(),
                MeanSquareComparator,
                vec![128u8; 64 * 64 * 3],
                64,
                64,
            );
            let mut engine = Evolution::new(
                config,
                SizeScheduler::new(1, 50),
                evaluator,
                Box::new(NullReport),
                Box::new(NullSnapshot),
            )
            .unwrap();
            b.iter(|| engine.step().unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_decode, bench_crossover, bench_engine_step);
criterion_main!(benches);
