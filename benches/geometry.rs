use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use geodoc::{Circle, CircleOptions, Point, ToGeoJson, to_string};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;

fn generate_fixed_points(size: usize, seed: u64) -> Vec<Point> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed); // シード固定
    (0..size).map(|_| Point::random_using(&mut rng)).collect()
}

fn generate_fixed_circles(size: usize, seed: u64) -> Vec<Circle> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut circles = Vec::with_capacity(size);
    while circles.len() < size {
        let circle = Circle::random_using(&mut rng, 10.0..=10_000.0);
        // 極や日付変更線の近くは多角形にできないため除外
        if circle.to_polygon().is_ok() {
            circles.push(circle);
        }
    }
    circles
}

fn bench_point_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("Point Operations");

    let points_a = generate_fixed_points(1_000, 12345);
    let points_b = generate_fixed_points(1_000, 67890);

    group.bench_function("Distance", |b| {
        b.iter(|| {
            for (a, other) in points_a.iter().zip(&points_b) {
                black_box(a.distance(other));
            }
        });
    });

    group.bench_function("BearingTo", |b| {
        b.iter(|| {
            for (a, other) in points_a.iter().zip(&points_b) {
                black_box(a.bearing_to(other));
            }
        });
    });

    group.bench_function("MoveBy", |b| {
        b.iter(|| {
            for a in &points_a {
                let _ = black_box(a.move_by(5_000.0, 45.0));
            }
        });
    });

    group.bench_function("Centroid", |b| {
        b.iter(|| black_box(Point::centroid(&points_a)));
    });

    group.finish();
}

fn bench_circle_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("Circle Operations");

    let circles = generate_fixed_circles(100, 24680);

    for &segments in &[16, 64, 256] {
        let options = CircleOptions::new().with_segments(segments);
        group.bench_with_input(
            BenchmarkId::new("ToPolygon", segments),
            &options,
            |b, options| {
                b.iter(|| {
                    for circle in &circles {
                        let _ = black_box(circle.to_polygon_with(options));
                    }
                });
            },
        );
    }

    group.bench_function("GeoJsonText", |b| {
        b.iter(|| {
            for circle in &circles {
                let _ = black_box(to_string(&circle.to_geojson()));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_point_operations, bench_circle_operations);
criterion_main!(benches);
