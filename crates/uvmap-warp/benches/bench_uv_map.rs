use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use uvmap_image::Image;
use uvmap_warp::parallel::ExecutionStrategy;
use uvmap_warp::{generate_uv_map_with, UvMapConfig};

/// A regular grid of `n x n` cells split in two triangles each, with the
/// landmarks slightly sheared in image space.
fn grid_mesh(n: usize) -> (Vec<[f64; 2]>, Vec<[f64; 2]>, Vec<[usize; 3]>) {
    let mut landmarks = Vec::new();
    let mut uv_coords = Vec::new();
    for j in 0..=n {
        for i in 0..=n {
            let (u, v) = (i as f64 / n as f64, j as f64 / n as f64);
            uv_coords.push([u, v]);
            landmarks.push([0.1 + 0.7 * u + 0.1 * v, 0.1 + 0.8 * v]);
        }
    }

    let idx = |i: usize, j: usize| j * (n + 1) + i;
    let mut triangles = Vec::with_capacity(2 * n * n);
    for j in 0..n {
        for i in 0..n {
            triangles.push([idx(i, j), idx(i + 1, j), idx(i + 1, j + 1)]);
            triangles.push([idx(i, j), idx(i + 1, j + 1), idx(i, j + 1)]);
        }
    }

    (landmarks, uv_coords, triangles)
}

fn bench_generate_uv_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("GenerateUvMap");

    let image = Image::<u8, 3>::from_fn([640, 480].into(), |x, y| {
        [(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8]
    })
    .unwrap();
    let (landmarks, uv_coords, triangles) = grid_mesh(24);

    for uvmap_size in [256, 512, 1024].iter() {
        group.throughput(criterion::Throughput::Elements(
            (*uvmap_size * *uvmap_size) as u64,
        ));

        for (name, strategy) in [
            ("serial", ExecutionStrategy::Serial),
            ("auto_rows_32", ExecutionStrategy::AutoRows(32)),
        ] {
            let config = UvMapConfig::default()
                .with_uvmap_size(*uvmap_size)
                .with_strategy(strategy);

            group.bench_with_input(
                BenchmarkId::new(name, uvmap_size),
                &config,
                |b, config| {
                    b.iter(|| {
                        generate_uv_map_with(
                            black_box(&image),
                            black_box(&landmarks),
                            black_box(&triangles),
                            black_box(&uv_coords),
                            black_box(config),
                        )
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_generate_uv_map);
criterion_main!(benches);
