//! Face and particle normals.

use crate::float::Float;
use crate::particle::Particle;
use crate::topology::Face;
use crate::vec::Vec3;

impl Face {
    /// Unit normal of the triangle, zero if degenerate.
    pub fn normal<F: Float>(&self, particles: &[Particle<F>]) -> Vec3<F> {
        let [i, j, k] = self.0;
        let p1 = particles[i].pos;
        let e1 = particles[j].pos - p1;
        let e2 = particles[k].pos - p1;
        e1.cross(e2).normalize()
    }
}

/// Assign each face's normal to its three particles.
///
/// Shared particles keep the normal of the last face that touches them.
pub fn compute_normals<F: Float>(particles: &mut [Particle<F>], faces: &[Face]) {
    for face in faces {
        let n = face.normal(particles);
        for &i in &face.0 {
            particles[i].normal = n;
        }
    }
}
