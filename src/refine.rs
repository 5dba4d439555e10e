//! Fold detection for adaptive refinement.
//!
//! Only the detection half exists: a particle is a candidate when the two
//! structural springs running through it in the same grid direction bend
//! sharply. Subdividing the mesh around candidates is not implemented.

use crate::float::Float;
use crate::spring::SpringDirection;
use crate::topology::Topology;
use alloc::vec::Vec as AllocVec;

/// A particle whose row or column bends more than the threshold allows.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FoldCandidate<F: Float> {
    pub particle: usize,
    pub direction: SpringDirection,
    /// Cosine of the turn angle between the incoming and outgoing edge.
    pub cos_angle: F,
}

/// Particles where consecutive structural edges turn by more than the
/// angle whose cosine is `min_cos` (1 = perfectly straight).
pub fn fold_candidates<F: Float>(topology: &Topology<F>, min_cos: F) -> AllocVec<FoldCandidate<F>> {
    let particles = &topology.particles;
    let mut candidates = AllocVec::new();

    for direction in [SpringDirection::StructuralRow, SpringDirection::StructuralColumn] {
        for i in 0..particles.len() {
            let links = topology.adjacency.springs_of(i, direction);
            if links.len() != 2 {
                continue;
            }
            // Springs always run from the lower index to the higher one, so
            // the spring ending at `i` is the incoming edge.
            let (incoming, outgoing) = {
                let first = &topology.springs[links[0]];
                let second = &topology.springs[links[1]];
                if first.b == i { (first, second) } else { (second, first) }
            };
            let e1 = (particles[i].pos - particles[incoming.a].pos).normalize();
            let e2 = (particles[outgoing.b].pos - particles[i].pos).normalize();
            let cos_angle = e1.dot(e2);
            if cos_angle < min_cos {
                candidates.push(FoldCandidate { particle: i, direction, cos_angle });
            }
        }
    }
    candidates
}
