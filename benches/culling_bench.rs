use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::{Vec2, Vec3};
use shade_gallery::camera::OrbitCamera;
use shade_gallery::options::CameraOptions;
use shade_gallery::postprocess::GaussianKernel;
use shade_gallery::scene::{
    primitives, BoundingVolumeCache, CullMode, FrustumCuller, Model, Transform,
};

fn kernel_benchmark(c: &mut Criterion) {
    let texel = Vec2::new(1.0 / 1280.0, 0.0);
    let mut group = c.benchmark_group("gaussian_kernel");
    for sigma in [1.0_f32, 2.0, 8.0] {
        let _ = group.bench_with_input(BenchmarkId::from_parameter(sigma), &sigma, |b, &s| {
            b.iter(|| black_box(GaussianKernel::build(texel, black_box(s))));
        });
    }
    group.finish();
}

fn row(count: usize) -> Vec<Model> {
    let Ok(mesh) = primitives::uv_sphere("head", 25.0, 24, 32) else {
        return Vec::new();
    };
    (0..count)
        .map(|i| {
            let x = (i as f32 - count as f32 / 2.0) * 20.0;
            Model::new(Arc::clone(&mesh), Transform::new(Vec3::new(x, 0.0, 0.0), Vec3::ZERO, 0.5))
                .with_cull_mode(CullMode::BoundingBox)
        })
        .collect()
}

fn classify_benchmark(c: &mut Criterion) {
    let camera = OrbitCamera::new(
        Vec3::new(0.0, 0.0, 100.0),
        Vec3::ZERO,
        16.0 / 9.0,
        &CameraOptions::default(),
    );
    let mut group = c.benchmark_group("frustum_classify");

    for count in [9, 100, 1000] {
        let mut models = row(count);

        let _ = group.bench_with_input(BenchmarkId::new("cached", count), &count, |b, _| {
            let mut cache = BoundingVolumeCache::new();
            let mut culler = FrustumCuller::new(camera.frustum());
            b.iter(|| black_box(culler.classify(&mut cache, 0, &models)));
        });

        let _ = group.bench_with_input(BenchmarkId::new("moving", count), &count, |b, _| {
            let mut cache = BoundingVolumeCache::new();
            let mut culler = FrustumCuller::new(camera.frustum());
            b.iter(|| {
                for model in &mut models {
                    model.transform_mut().translate(Vec3::X * 0.01);
                }
                black_box(culler.classify(&mut cache, 0, &models))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, kernel_benchmark, classify_benchmark);
criterion_main!(benches);
