//! Benchmarks for BCSR conversion and block SpMV
//!
//! Measures the dense → BCSR encode across matrix sizes and block sizes,
//! plus reconstruction and SpMV on the converted result.

use bcsr::BcsrMatrix;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use scirs2_core::ndarray_ext::{Array1, Array2};
use std::hint::black_box;

/// Generate a dense matrix with the given fraction of non-zero entries
///
/// Simple pseudo-random generation for reproducibility.
fn random_dense_matrix(nrows: usize, ncols: usize, density: f64) -> Array2<f64> {
    let mut seed = 12345u64;
    Array2::from_shape_fn((nrows, ncols), |_| {
        seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
        if (seed % 10000) as f64 / 10000.0 < density {
            seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
            (seed % 10000) as f64 / 10000.0 + 0.1
        } else {
            0.0
        }
    })
}

fn random_dense_vector(size: usize) -> Array1<f64> {
    let mut seed = 98765u64;
    Array1::from_shape_fn(size, |_| {
        seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
        (seed % 10000) as f64 / 10000.0
    })
}

fn bench_from_dense(c: &mut Criterion) {
    let mut group = c.benchmark_group("from_dense");

    for &size in &[64usize, 256, 512] {
        let dense = random_dense_matrix(size, size, 0.05);
        group.throughput(Throughput::Elements((size * size) as u64));

        for &block in &[2usize, 4, 8] {
            group.bench_with_input(
                BenchmarkId::new(format!("b{block}"), size),
                &dense,
                |bench, dense| {
                    bench.iter(|| {
                        BcsrMatrix::from_dense(black_box(&dense.view()), block, 0.0).unwrap()
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_from_dense_ragged(c: &mut Criterion) {
    let mut group = c.benchmark_group("from_dense_ragged");

    // Shapes chosen so the block size never divides evenly
    for &size in &[63usize, 255] {
        let dense = random_dense_matrix(size, size, 0.05);

        group.bench_with_input(BenchmarkId::new("b4", size), &dense, |bench, dense| {
            bench.iter(|| BcsrMatrix::from_dense(black_box(&dense.view()), 4, 0.0).unwrap());
        });
    }

    group.finish();
}

fn bench_to_dense(c: &mut Criterion) {
    let mut group = c.benchmark_group("to_dense");

    for &size in &[256usize, 512] {
        let dense = random_dense_matrix(size, size, 0.05);
        let bcsr = BcsrMatrix::from_dense(&dense.view(), 4, 0.0).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), &bcsr, |bench, bcsr| {
            bench.iter(|| black_box(bcsr.to_dense()));
        });
    }

    group.finish();
}

fn bench_spmv(c: &mut Criterion) {
    let mut group = c.benchmark_group("spmv");

    for &size in &[256usize, 512] {
        let dense = random_dense_matrix(size, size, 0.05);
        let bcsr = BcsrMatrix::from_dense(&dense.view(), 4, 0.0).unwrap();
        let x = random_dense_vector(size);

        group.throughput(Throughput::Elements(bcsr.nnz() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &bcsr, |bench, bcsr| {
            bench.iter(|| bcsr.spmv(black_box(&x.view())).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_from_dense,
    bench_from_dense_ragged,
    bench_to_dense,
    bench_spmv
);
criterion_main!(benches);
