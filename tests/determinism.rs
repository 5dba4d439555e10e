use weft::{Cloth, ClothConfig, Integrator, Obstacle, Sphere, Vec3};

fn run(integrator: Integrator) -> Vec<Vec3<f64>> {
    let config = ClothConfig::new()
        .with_grid(8, 8)
        .with_density(4.0)
        .with_integrator(integrator)
        .with_viscosity(0.3, Vec3::new(0.0, 0.0, 1.0))
        .with_origin(Vec3::new(-1.0, 2.0, -1.0));
    let mut cloth = Cloth::new(config).unwrap();
    let ball = Obstacle::Sphere(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 0.6, 0.8));

    for frame in 0..6 {
        let gust = Vec3::new(0.0, 0.0, frame as f64 * 0.5);
        cloth.add_force(gust);
        cloth.add_wind_near(Vec3::new(0.0, 2.0, 0.0), Vec3::new(3.0, 0.0, 0.0), 0.75);
        cloth.frame(&ball, true);
    }
    cloth.positions()
}

#[test]
fn identical_runs_are_bit_identical() {
    for integrator in [Integrator::SemiImplicitEuler, Integrator::RungeKutta4, Integrator::Verlet] {
        let results: Vec<_> = (0..3).map(|_| run(integrator)).collect();
        for r in &results[1..] {
            for (a, b) in results[0].iter().zip(r.iter()) {
                assert_eq!(a.x.to_bits(), b.x.to_bits());
                assert_eq!(a.y.to_bits(), b.y.to_bits());
                assert_eq!(a.z.to_bits(), b.z.to_bits());
            }
        }
    }
}
