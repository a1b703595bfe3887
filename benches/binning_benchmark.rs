//! Benchmark of the four auto-binning strategies and whole-table binning
//!
//! Run with: cargo bench --bench binning_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use polars::prelude::*;
use rand::prelude::*;
use rand::SeedableRng;

use binmachine::pipeline::{
    bin_dataframe, equal_frequency_by_count, equal_frequency_by_freq, equal_width_by_count,
    equal_width_by_width, AutoBinning, BinSpec, BinningAlgo, BinningMethod, ColumnBinSettings,
    ColumnType,
};

/// Generate a numeric column, right-skewed when `skewed` is set
fn generate_column(n_rows: usize, skewed: bool, seed: u64) -> Column {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let values: Vec<Option<f64>> = (0..n_rows)
        .map(|_| {
            // roughly 5% missing
            if rng.gen::<f64>() < 0.05 {
                return None;
            }
            let v = rng.gen::<f64>();
            Some(if skewed { v * v * v * 100.0 } else { v * 100.0 })
        })
        .collect();
    Column::new("value".into(), values)
}

fn benchmark_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("auto_binning");

    for n_rows in [1_000, 10_000, 100_000] {
        let column = generate_column(n_rows, false, 42);
        group.throughput(Throughput::Elements(n_rows as u64));

        group.bench_with_input(BenchmarkId::new("width_by_width", n_rows), &column, |b, col| {
            b.iter(|| equal_width_by_width(black_box(col), black_box(5.0)))
        });
        group.bench_with_input(BenchmarkId::new("width_by_count", n_rows), &column, |b, col| {
            b.iter(|| equal_width_by_count(black_box(col), black_box(20)))
        });
        group.bench_with_input(BenchmarkId::new("freq_by_freq", n_rows), &column, |b, col| {
            b.iter(|| equal_frequency_by_freq(black_box(col), black_box(n_rows / 20)))
        });
        group.bench_with_input(BenchmarkId::new("freq_by_count", n_rows), &column, |b, col| {
            b.iter(|| equal_frequency_by_count(black_box(col), black_box(20)))
        });
    }

    group.finish();
}

/// Skewed data makes equal-width bins sparse and equal-frequency cuts dense
fn benchmark_skewed(c: &mut Criterion) {
    let mut group = c.benchmark_group("skewed_column");
    let column = generate_column(50_000, true, 7);

    for num_bins in [10, 100, 1_000] {
        group.bench_with_input(BenchmarkId::new("width_by_count", num_bins), &num_bins, |b, &n| {
            b.iter(|| equal_width_by_count(black_box(&column), n))
        });
        group.bench_with_input(BenchmarkId::new("freq_by_count", num_bins), &num_bins, |b, &n| {
            b.iter(|| equal_frequency_by_count(black_box(&column), n))
        });
    }

    group.finish();
}

fn benchmark_dataframe(c: &mut Criterion) {
    let mut group = c.benchmark_group("bin_dataframe");
    group.sample_size(20);

    let n_features = 20;
    let columns: Vec<Column> = (0..n_features)
        .map(|i| {
            generate_column(10_000, i % 2 == 1, i as u64).with_name(format!("feature_{}", i).into())
        })
        .collect();
    let df = DataFrame::new(columns).expect("Failed to create DataFrame");

    let settings: Vec<ColumnBinSettings> = (0..n_features)
        .map(|i| {
            let algo = if i % 2 == 0 {
                BinningAlgo::EqualWidth
            } else {
                BinningAlgo::EqualFrequency
            };
            ColumnBinSettings::new(
                format!("feature_{}", i),
                ColumnType::Numerical,
                BinSpec::Auto(AutoBinning {
                    algo,
                    method: BinningMethod::NumBins,
                    value: 10.0,
                }),
            )
        })
        .collect();

    group.throughput(Throughput::Elements(n_features as u64));
    group.bench_function("20x10000", |b| {
        b.iter(|| bin_dataframe(black_box(&df), black_box(&settings)))
    });

    group.finish();
}

criterion_group!(benches, benchmark_strategies, benchmark_skewed, benchmark_dataframe);
criterion_main!(benches);
