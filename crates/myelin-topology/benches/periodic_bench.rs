//! Benchmarks for Myelin Periodic Topology
//!
//! Measures performance of:
//! - Minimum-image distance
//! - Brute-force 9-image distance
//! - Wrap offset classification

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use myelin_topology::{Disk, Images, PeriodicDomain, Point2};

/// Deterministic point cloud so runs are comparable.
fn lattice_points(count: usize, side: f64) -> Vec<Point2> {
    let golden = 0.618_033_988_749_895;
    (0..count)
        .map(|i| {
            let t = i as f64;
            Point2::new((t * golden).fract() * side, (t * golden * golden).fract() * side)
        })
        .collect()
}

/// Benchmark minimum-image distance against all other points
fn bench_periodic_distance(c: &mut Criterion) {
    let mut group = c.benchmark_group("periodic_distance");
    let domain = PeriodicDomain::new(100.0).expect("valid side");

    for &count in &[10usize, 100, 1000] {
        let points = lattice_points(count, domain.side());
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &points, |b, pts| {
            let probe = Point2::new(37.0, 61.0);
            b.iter(|| {
                pts.iter()
                    .map(|&p| domain.periodic_distance(black_box(probe), p))
                    .fold(f64::INFINITY, f64::min)
            })
        });
    }
    group.finish();
}

/// Benchmark the explicit 9-image search for comparison
fn bench_image_distance(c: &mut Criterion) {
    let mut group = c.benchmark_group("image_distance");
    let domain = PeriodicDomain::new(100.0).expect("valid side");

    for &count in &[10usize, 100, 1000] {
        let points = lattice_points(count, domain.side());
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &points, |b, pts| {
            let probe = Point2::new(37.0, 61.0);
            b.iter(|| {
                pts.iter()
                    .map(|&p| domain.image_distance(black_box(probe), p))
                    .fold(f64::INFINITY, f64::min)
            })
        });
    }
    group.finish();
}

/// Benchmark image generation
fn bench_images(c: &mut Criterion) {
    c.bench_function("images_of", |b| {
        b.iter(|| Images::of(black_box(Point2::new(3.0, 4.0)), black_box(10.0)))
    });
}

/// Benchmark wrap offset classification
fn bench_wrap_offsets(c: &mut Criterion) {
    let mut group = c.benchmark_group("wrap_offsets");
    let domain = PeriodicDomain::new(10.0).expect("valid side");

    let cases = [
        ("interior", Disk::new(Point2::new(5.0, 5.0), 1.0)),
        ("edge", Disk::new(Point2::new(9.5, 5.0), 1.0)),
        ("corner", Disk::new(Point2::new(0.5, 9.5), 1.0)),
    ];

    for (name, disk) in cases {
        group.bench_with_input(BenchmarkId::from_parameter(name), &disk, |b, d| {
            b.iter(|| domain.wrap_offsets(black_box(d)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_periodic_distance,
    bench_image_distance,
    bench_images,
    bench_wrap_offsets,
);

criterion_main!(benches);
