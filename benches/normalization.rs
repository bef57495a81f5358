use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pitchchain::curve::{aggregate, resample, NormalizedCurve, NORMALIZED_POINTS};
use pitchchain::metric::Side;
use pitchchain::pipeline::{AnalysisConfig, AnalysisMode, Pipeline, TrialCache, TrialInput};
use pitchchain::synthetic::{demo_batch, SyntheticTrial};
use pitchchain::table::RawTrialTable;

fn series(len: usize) -> Vec<f64> {
    (0..len).map(|i| (i as f64 * 0.05).sin() * 1000.0).collect()
}

/// Benchmark resampling series of growing length onto 101 points
fn bench_resample(c: &mut Criterion) {
    let mut group = c.benchmark_group("resample");

    for len in [150, 1_000, 10_000] {
        let input = series(len);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &input, |b, input| {
            b.iter(|| resample(black_box(input), NORMALIZED_POINTS).unwrap())
        });
    }

    group.finish();
}

/// Benchmark aggregating three normalized curves
fn bench_aggregate(c: &mut Criterion) {
    let curves: Vec<NormalizedCurve> = [150, 160, 140]
        .iter()
        .map(|&n| NormalizedCurve::from_series(&series(n)).unwrap())
        .collect();

    c.bench_function("aggregate_three_trials", |b| {
        b.iter(|| aggregate(black_box(&curves), 1).unwrap())
    });
}

/// Benchmark parsing a trial table
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_table");

    for samples in [150, 1_500] {
        let bytes = SyntheticTrial::proximal_to_distal(samples, Side::Right)
            .to_csv_bytes()
            .unwrap();
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(samples), &bytes, |b, bytes| {
            b.iter(|| RawTrialTable::from_bytes(black_box(bytes), "bench.csv").unwrap())
        });
    }

    group.finish();
}

/// Benchmark the full dashboard run, cold and with a warm cache
fn bench_pipeline(c: &mut Criterion) {
    let trials: Vec<TrialInput> = demo_batch("bench", Side::Right)
        .into_iter()
        .map(|(name, trial)| TrialInput::new(name, trial.to_csv_bytes().unwrap()))
        .collect();
    let pipeline = Pipeline::new(AnalysisConfig::default().with_mode(AnalysisMode::Dashboard));

    let mut group = c.benchmark_group("pipeline_dashboard");
    group.bench_function("cold", |b| {
        b.iter(|| pipeline.run(black_box(&trials), &mut TrialCache::new()).unwrap())
    });

    let mut cache = TrialCache::new();
    group.bench_function("cached", |b| {
        b.iter(|| pipeline.run(black_box(&trials), &mut cache).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_resample, bench_aggregate, bench_parse, bench_pipeline);
criterion_main!(benches);
