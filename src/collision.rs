//! Collision response against rigid obstacles.

use crate::float::Float;
use crate::particle::Particle;
use crate::vec::{Axis, Vec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A sphere obstacle.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sphere<F: Float> {
    pub center: Vec3<F>,
    pub radius: F,
    /// Scale applied to the reflected velocity.
    pub friction: F,
}

/// An axis-aligned cube obstacle.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cube<F: Float> {
    pub center: Vec3<F>,
    pub half_extent: F,
    /// Scale applied to the reflected velocity.
    pub friction: F,
}

/// Where a penetrating point is pushed to, and the outward surface normal.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Contact<F: Float> {
    pub position: Vec3<F>,
    pub normal: Vec3<F>,
}

/// The rigid body the cloth collides with.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Obstacle<F: Float> {
    #[default]
    None,
    Sphere(Sphere<F>),
    Cube(Cube<F>),
}

impl<F: Float> Sphere<F> {
    pub fn new(center: Vec3<F>, radius: F, friction: F) -> Self {
        Sphere { center, radius, friction }
    }

    /// Contact for a world-space point strictly inside the sphere.
    pub fn contact(&self, point: Vec3<F>) -> Option<Contact<F>> {
        let offset = point - self.center;
        let dist = offset.length();
        if dist >= self.radius {
            return None;
        }
        let normal = if dist.is_near_zero(F::from_f32(1e-10)) {
            Vec3::new(F::zero(), F::one(), F::zero())
        } else {
            offset.scale(F::one() / dist)
        };
        Some(Contact { position: self.center + normal.scale(self.radius), normal })
    }
}

impl<F: Float> Cube<F> {
    pub fn new(center: Vec3<F>, half_extent: F, friction: F) -> Self {
        Cube { center, half_extent, friction }
    }

    /// Contact for a world-space point strictly inside the cube, pushed out
    /// through the nearest face.
    pub fn contact(&self, point: Vec3<F>) -> Option<Contact<F>> {
        let offset = point - self.center;
        let mut best: Option<(Axis, F)> = None;
        for axis in Axis::ALL {
            let depth = self.half_extent - offset.get(axis).abs();
            if depth <= F::zero() {
                return None;
            }
            if best.map_or(true, |(_, d)| depth < d) {
                best = Some((axis, depth));
            }
        }

        let (axis, _) = best?;
        let negative = offset.get(axis) < F::zero();
        let face = if negative { -self.half_extent } else { self.half_extent };
        let mut position = point;
        position.set(axis, self.center.get(axis) + face);
        Some(Contact { position, normal: Vec3::unit(axis, negative) })
    }
}

impl<F: Float> Obstacle<F> {
    pub fn center(&self) -> Option<Vec3<F>> {
        match self {
            Obstacle::None => None,
            Obstacle::Sphere(s) => Some(s.center),
            Obstacle::Cube(c) => Some(c.center),
        }
    }

    /// Move the obstacle. No effect on `Obstacle::None`.
    pub fn set_center(&mut self, center: Vec3<F>) {
        match self {
            Obstacle::None => {}
            Obstacle::Sphere(s) => s.center = center,
            Obstacle::Cube(c) => c.center = center,
        }
    }

    pub fn friction(&self) -> F {
        match self {
            Obstacle::None => F::one(),
            Obstacle::Sphere(s) => s.friction,
            Obstacle::Cube(c) => c.friction,
        }
    }

    /// Contact for a world-space point, if it penetrates the obstacle.
    pub fn contact(&self, point: Vec3<F>) -> Option<Contact<F>> {
        match self {
            Obstacle::None => None,
            Obstacle::Sphere(s) => s.contact(point),
            Obstacle::Cube(c) => c.contact(point),
        }
    }

    /// Push penetrating particles out and reflect their inward velocity.
    ///
    /// `origin` converts particle positions to world space. Fixed particles
    /// are left alone. Returns the number of contacts.
    pub fn resolve(&self, particles: &mut [Particle<F>], origin: Vec3<F>, dt: F) -> usize {
        if let Obstacle::None = self {
            return 0;
        }

        let friction = self.friction();
        let mut contacts = 0;
        for p in particles.iter_mut() {
            if p.fixed {
                continue;
            }
            if let Some(hit) = self.contact(origin + p.pos) {
                respond(p, &hit, origin, friction, dt);
                contacts += 1;
            }
        }
        contacts
    }
}

fn respond<F: Float>(p: &mut Particle<F>, hit: &Contact<F>, origin: Vec3<F>, friction: F, dt: F) {
    p.pos = hit.position - origin;
    let vn = p.velocity.dot(hit.normal);
    if vn < F::zero() {
        p.velocity = (p.velocity - hit.normal.scale(F::two() * vn)).scale(friction);
    }
    p.prev_pos = p.pos - p.velocity.scale(dt);
}
