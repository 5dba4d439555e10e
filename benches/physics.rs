//! Benchmarks for weft cloth simulation.

use criterion::{criterion_group, criterion_main, Criterion};
use weft::*;

fn cloth_20x20(integrator: Integrator) -> Cloth<f32> {
    let config = ClothConfig::new()
        .with_grid(20, 20)
        .with_integrator(integrator);
    Cloth::new(config).expect("valid bench config")
}

fn bench_integrators(c: &mut Criterion) {
    for integrator in [Integrator::SemiImplicitEuler, Integrator::RungeKutta4, Integrator::Verlet] {
        c.bench_function(&format!("cloth_20x20_{}_one_frame", integrator), |b| {
            b.iter(|| {
                let mut cloth = cloth_20x20(integrator);
                cloth.frame(&Obstacle::None, true);
                cloth.positions()
            });
        });
    }
}

fn bench_sphere_collision(c: &mut Criterion) {
    c.bench_function("cloth_20x20_sphere_60_steps", |b| {
        b.iter(|| {
            let mut cloth = cloth_20x20(Integrator::Verlet);
            let ball = Obstacle::Sphere(Sphere::new(Vec3::new(2.5, -1.0, 2.5), 1.5, 0.8));
            for _ in 0..60 {
                cloth.step(&ball, 0.01, true);
            }
            cloth.positions()
        });
    });
}

fn bench_normals(c: &mut Criterion) {
    let mut cloth = cloth_20x20(Integrator::Verlet);
    c.bench_function("cloth_20x20_normals", |b| {
        b.iter(|| {
            cloth.compute_normals();
            cloth.normals()
        });
    });
}

criterion_group!(benches, bench_integrators, bench_sphere_collision, bench_normals);
criterion_main!(benches);
