//! Cloth particles (point masses).

use crate::float::Float;
use crate::vec::{Vec2, Vec3};

/// A point mass on the cloth grid.
///
/// `pos` is relative to the cloth origin. `prev_pos` holds the position at
/// the start of the current step; Verlet integrates from it and every scheme
/// reconstructs velocity from it after constraint correction.
#[derive(Clone, Debug)]
pub struct Particle<F: Float> {
    pub mass: F,
    pub pos: Vec3<F>,
    pub prev_pos: Vec3<F>,
    pub velocity: Vec3<F>,
    /// Net force of the current evaluation. Rebuilt by every force pass.
    pub force: Vec3<F>,
    /// Force injected from outside (wind), consumed by the next step.
    pub external: Vec3<F>,
    pub fixed: bool,
    pub tex_coord: Vec2<F>,
    pub normal: Vec3<F>,
}

impl<F: Float> Particle<F> {
    pub fn new(pos: Vec3<F>, tex_coord: Vec2<F>, mass: F) -> Self {
        Particle {
            mass,
            pos,
            prev_pos: pos,
            velocity: Vec3::zero(),
            force: Vec3::zero(),
            external: Vec3::zero(),
            fixed: false,
            tex_coord,
            normal: Vec3::zero(),
        }
    }

    /// Shift by `offset` and fix in place.
    pub fn pin(&mut self, offset: Vec3<F>) {
        self.pos += offset;
        self.prev_pos = self.pos;
        self.velocity = Vec3::zero();
        self.fixed = true;
    }

    pub fn is_movable(&self) -> bool {
        !self.fixed
    }

    /// Queue an external force for the next step. Ignored on fixed particles.
    pub fn add_external(&mut self, force: Vec3<F>) {
        if !self.fixed {
            self.external += force;
        }
    }

    pub fn acceleration(&self) -> Vec3<F> {
        self.force.scale(F::one() / self.mass)
    }

    /// Velocity implied by the displacement since `prev_pos`.
    pub fn implied_velocity(&self, dt: F) -> Vec3<F> {
        if dt.is_near_zero(F::from_f32(1e-30)) {
            return Vec3::zero();
        }
        (self.pos - self.prev_pos).scale(F::one() / dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle() -> Particle<f64> {
        Particle::new(Vec3::new(1.0, 0.0, 2.0), Vec2::zero(), 2.0)
    }

    #[test]
    fn pin_applies_offset_and_freezes() {
        let mut p = particle();
        p.velocity = Vec3::new(3.0, 0.0, 0.0);
        p.pin(Vec3::new(-0.5, 0.0, 0.0));
        assert!(p.fixed);
        assert_eq!(p.pos, Vec3::new(0.5, 0.0, 2.0));
        assert_eq!(p.prev_pos, p.pos);
        assert_eq!(p.velocity, Vec3::zero());
    }

    #[test]
    fn external_force_skips_fixed() {
        let mut p = particle();
        p.pin(Vec3::zero());
        p.add_external(Vec3::new(10.0, 10.0, 10.0));
        assert_eq!(p.external, Vec3::zero());
    }

    #[test]
    fn implied_velocity_zero_dt() {
        let mut p = particle();
        p.pos = Vec3::new(5.0, 5.0, 5.0);
        assert_eq!(p.implied_velocity(0.0), Vec3::zero());
        let v = p.implied_velocity(0.5);
        assert!((v.x - 8.0).abs() < 1e-12);
    }

    #[test]
    fn acceleration_divides_by_mass() {
        let mut p = particle();
        p.force = Vec3::new(4.0, -2.0, 0.0);
        assert_eq!(p.acceleration(), Vec3::new(2.0, -1.0, 0.0));
    }
}
