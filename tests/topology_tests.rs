use weft::{
    Cloth, ClothConfig, ForceParams, PinLayout, SpringDirection, SpringKind, Topology, Vec3,
};

#[test]
fn default_grid_counts() {
    let topology = Topology::build(&ClothConfig::<f64>::new()).unwrap();
    let count = |kind| topology.springs.iter().filter(|s| s.kind() == kind).count();

    assert_eq!(topology.particle_count(), 1600);
    assert_eq!(count(SpringKind::Structural), 2 * 40 * 39);
    assert_eq!(count(SpringKind::Shear), 2 * 39 * 39);
    assert_eq!(count(SpringKind::Flexion), 2 * 40 * 38);
    assert_eq!(topology.spring_count(), 9202);
    assert_eq!(topology.faces.len(), 3042);
}

#[test]
fn rest_lengths_follow_grid_spacing() {
    let config = ClothConfig::<f64>::new().with_grid(6, 5).with_density(4.0);
    let topology = Topology::build(&config).unwrap();
    let spacing = 0.25;

    for s in &topology.springs {
        let expected = match s.kind() {
            SpringKind::Structural => spacing,
            SpringKind::Shear => spacing * 2f64.sqrt(),
            SpringKind::Flexion => 2.0 * spacing,
        };
        assert!(
            (s.rest_length() - expected).abs() < 1e-12,
            "{:?} spring {}-{} rest {}",
            s.direction,
            s.a,
            s.b,
            s.rest_length(),
        );
        assert!((s.max_length() - 1.5 * s.rest_length()).abs() < 1e-12);
        assert!(s.a < s.b);
    }
}

#[test]
fn stretch_ratio_scales_max_length() {
    let config = ClothConfig::<f64>::new().with_grid(3, 3).with_stretch_ratio(1.1);
    let topology = Topology::build(&config).unwrap();
    for s in &topology.springs {
        assert!((s.max_length() - 1.1 * s.rest_length()).abs() < 1e-12);
    }
}

#[test]
fn interior_particles_have_full_adjacency() {
    let topology = Topology::build(&ClothConfig::<f64>::new().with_grid(5, 5)).unwrap();
    let center = topology.index(2, 2);
    for direction in SpringDirection::ALL {
        assert_eq!(topology.adjacency.springs_of(center, direction).len(), 2, "{:?}", direction);
    }
    assert_eq!(topology.adjacency.degree(center), 12);
    // Corner: one structural each way, one shear, one flexion each way.
    assert_eq!(topology.adjacency.degree(0), 5);
}

#[test]
fn spring_forces_cancel_across_the_cloth() {
    let config = ClothConfig::<f64>::new().with_grid(6, 6);
    let mut topology = Topology::build(&config).unwrap();
    for (i, p) in topology.particles.iter_mut().enumerate() {
        let t = i as f64;
        p.pos += Vec3::new(0.03 * (t * 1.7).sin(), 0.05 * (t * 0.9).cos(), 0.02 * (t * 2.3).sin());
    }

    let params = ForceParams { gravity: Vec3::zero(), drag: 0.0, viscosity: 0.0, fluid_velocity: Vec3::zero() };
    weft::force::accumulate(&mut topology.particles, &topology.springs, &params);

    let total = topology
        .particles
        .iter()
        .fold(Vec3::zero(), |acc, p| acc + p.force);
    assert!(total.length() < 1e-9, "net internal force {:?}", total);
    assert!(topology.particles.iter().any(|p| p.force.length() > 1.0));
}

#[test]
fn texture_coordinates_span_unit_square() {
    let topology = Topology::build(&ClothConfig::<f64>::new().with_grid(3, 5)).unwrap();
    let tex = |row, col| topology.particles[topology.index(row, col)].tex_coord;
    assert_eq!((tex(0, 0).x, tex(0, 0).y), (0.0, 0.0));
    assert_eq!((tex(0, 4).x, tex(0, 4).y), (1.0, 0.0));
    assert_eq!((tex(2, 0).x, tex(2, 0).y), (0.0, 1.0));
    assert_eq!((tex(1, 2).x, tex(1, 2).y), (0.5, 0.5));
}

#[test]
fn pin_offsets_do_not_change_rest_lengths() {
    let far = ClothConfig::<f64>::new()
        .with_grid(4, 4)
        .with_pins(PinLayout::TopCorners { offset: 0.4 });
    let topology = Topology::build(&far).unwrap();
    let corner = &topology.particles[0];
    assert!(corner.fixed);
    assert_eq!(corner.pos, Vec3::new(-0.4, 0.0, 0.0));
    assert_eq!(corner.prev_pos, corner.pos);
    let first = &topology.springs[0];
    assert_eq!((first.a, first.b), (0, 1));
    assert!((first.rest_length() - 0.25).abs() < 1e-12);
}

#[test]
fn pinned_corners_show_up_as_folds() {
    // Offsetting the corners outward kinks the first column edge.
    let cloth = Cloth::new(ClothConfig::<f64>::new().with_grid(4, 4)).unwrap();
    assert!(cloth.fold_candidates(0.9).is_empty());

    let folds = cloth.fold_candidates(0.95);
    let mut particles: Vec<usize> = folds.iter().map(|f| f.particle).collect();
    particles.sort_unstable();
    assert_eq!(particles, vec![4, 7]);
    assert!(folds.iter().all(|f| f.direction == SpringDirection::StructuralColumn));
}
