use criterion::{black_box, criterion_group, Criterion};

use cgmath::prelude::*;
use sphkit2d::sph::smoothing_kernel::*;
use sphkit2d::sph::Dimension;
use sphkit2d::units::*;

fn bench_kernels(c: &mut Criterion) {
    let support_radius = black_box(1.0);

    let ri_to_rj = black_box(Vector::new(1.0, 1.0) - Vector::new(0.5, 1.0));
    let r = black_box(ri_to_rj.magnitude());

    for dimension in [Dimension::One, Dimension::Two, Dimension::Three] {
        let kernel = black_box(CubicSpline::new(support_radius, dimension).unwrap());
        c.bench_function(&format!("CubicSpline.evaluate {}d", dimension.value()), |b| {
            b.iter(|| kernel.evaluate(r))
        });
    }

    let kernel = black_box(CubicSpline::new(support_radius, Dimension::Two).unwrap());
    c.bench_function("CubicSpline.gradient", |b| b.iter(|| kernel.gradient(ri_to_rj)));
}

fn config() -> Criterion {
    Criterion::default()
        .warm_up_time(core::time::Duration::new(0, 100))
        .sample_size(1000)
        .significance_level(0.1)
}

criterion_group!(
    name = smoothing_kernel;
    config = config();
    targets = bench_kernels
);
