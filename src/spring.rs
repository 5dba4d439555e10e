//! Hookean springs connecting cloth particles.

use crate::float::Float;
use crate::particle::Particle;
use crate::vec::Vec3;

/// Spring category.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpringKind {
    /// Row or column neighbors.
    Structural,
    /// Cell diagonals.
    Shear,
    /// Two cells apart. Not subject to the stretch limit.
    Flexion,
}

/// Orientation of a spring within the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpringDirection {
    StructuralRow,
    StructuralColumn,
    /// Top-left to bottom-right.
    ShearDown,
    /// Top-right to bottom-left.
    ShearUp,
    FlexionRow,
    FlexionColumn,
}

impl SpringDirection {
    pub const ALL: [SpringDirection; 6] = [
        SpringDirection::StructuralRow,
        SpringDirection::StructuralColumn,
        SpringDirection::ShearDown,
        SpringDirection::ShearUp,
        SpringDirection::FlexionRow,
        SpringDirection::FlexionColumn,
    ];

    pub fn kind(self) -> SpringKind {
        match self {
            SpringDirection::StructuralRow | SpringDirection::StructuralColumn => {
                SpringKind::Structural
            }
            SpringDirection::ShearDown | SpringDirection::ShearUp => SpringKind::Shear,
            SpringDirection::FlexionRow | SpringDirection::FlexionColumn => SpringKind::Flexion,
        }
    }

    pub(crate) fn slot(self) -> usize {
        match self {
            SpringDirection::StructuralRow => 0,
            SpringDirection::StructuralColumn => 1,
            SpringDirection::ShearDown => 2,
            SpringDirection::ShearUp => 3,
            SpringDirection::FlexionRow => 4,
            SpringDirection::FlexionColumn => 5,
        }
    }
}

/// A spring between particles `a` and `b`.
///
/// Rest and max length are fixed at construction.
#[derive(Clone, Debug)]
pub struct Spring<F: Float> {
    pub a: usize,
    pub b: usize,
    pub stiffness: F,
    pub direction: SpringDirection,
    rest_length: F,
    max_length: F,
}

impl<F: Float> Spring<F> {
    /// Build a spring whose rest length is the current endpoint distance.
    pub fn new(
        a: usize,
        b: usize,
        particles: &[Particle<F>],
        stiffness: F,
        stretch_ratio: F,
        direction: SpringDirection,
    ) -> Self {
        let rest_length = particles[a].pos.distance(particles[b].pos);
        Spring {
            a,
            b,
            stiffness,
            direction,
            rest_length,
            max_length: rest_length * stretch_ratio,
        }
    }

    pub fn rest_length(&self) -> F { self.rest_length }
    pub fn max_length(&self) -> F { self.max_length }
    pub fn kind(&self) -> SpringKind { self.direction.kind() }

    /// Whether the constraint solver limits this spring's stretch.
    pub fn is_stretch_limited(&self) -> bool {
        self.kind() != SpringKind::Flexion
    }

    pub fn length(&self, particles: &[Particle<F>]) -> F {
        particles[self.a].pos.distance(particles[self.b].pos)
    }

    /// Elastic force on endpoint `a`; endpoint `b` receives the negation.
    ///
    /// Zero when the endpoints coincide.
    pub fn elastic_force(&self, particles: &[Particle<F>]) -> Vec3<F> {
        let delta = particles[self.b].pos - particles[self.a].pos;
        let len = delta.length();
        if len.is_near_zero(F::from_f32(1e-10)) {
            return Vec3::zero();
        }
        delta.scale(self.stiffness * (len - self.rest_length) / len)
    }

    /// Both endpoints, for line rendering.
    pub fn segment(&self, particles: &[Particle<F>]) -> (Vec3<F>, Vec3<F>) {
        (particles[self.a].pos, particles[self.b].pos)
    }
}
