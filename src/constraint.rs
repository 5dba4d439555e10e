//! Stretch limiting by Jacobi relaxation.

use crate::float::Float;
use crate::observer::StepObserver;
use crate::particle::Particle;
use crate::spring::Spring;
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;

/// Outcome of one [`StretchSolver::solve`] call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SolveReport {
    /// Passes that ran, including the final pass that found nothing to fix.
    pub passes: usize,
    /// A pass finished without any correction.
    pub converged: bool,
}

/// Pulls over-stretched springs back to their max length.
///
/// Every pass measures all springs against the same state and applies the
/// accumulated corrections at the end. A particle corrected by several
/// springs in one pass moves by the average of their corrections. Flexion
/// springs and springs pinned at both ends are never corrected.
pub struct StretchSolver<F: Float> {
    iterations: usize,
    deltas: AllocVec<Vec3<F>>,
    counts: AllocVec<u32>,
}

impl<F: Float> StretchSolver<F> {
    pub fn new(iterations: usize) -> Self {
        StretchSolver { iterations, deltas: AllocVec::new(), counts: AllocVec::new() }
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Relax, then set every velocity to `(pos - prev_pos) / dt`.
    pub fn solve<O: StepObserver>(
        &mut self,
        particles: &mut [Particle<F>],
        springs: &[Spring<F>],
        dt: F,
        observer: &mut O,
    ) -> SolveReport {
        let mut report = SolveReport { passes: 0, converged: false };

        for pass in 0..self.iterations {
            let corrections = self.relax(particles, springs);
            report.passes = pass + 1;
            observer.on_constraint_pass(pass, corrections);
            if corrections == 0 {
                report.converged = true;
                break;
            }
        }

        if !report.converged {
            log::trace!("stretch limit unresolved after {} passes", report.passes);
        }

        for p in particles.iter_mut() {
            p.velocity = p.implied_velocity(dt);
        }
        report
    }

    /// One Jacobi pass. Returns the number of springs corrected.
    fn relax(&mut self, particles: &mut [Particle<F>], springs: &[Spring<F>]) -> usize {
        self.deltas.clear();
        self.deltas.resize(particles.len(), Vec3::zero());
        self.counts.clear();
        self.counts.resize(particles.len(), 0);

        let mut corrected = 0;
        for s in springs {
            if !s.is_stretch_limited() {
                continue;
            }
            let a_movable = particles[s.a].is_movable();
            let b_movable = particles[s.b].is_movable();
            if !a_movable && !b_movable {
                continue;
            }

            let axis = particles[s.b].pos - particles[s.a].pos;
            let len = axis.length();
            if len <= s.max_length() {
                continue;
            }

            let movable = if a_movable && b_movable { F::two() } else { F::one() };
            let shift = axis.scale((len - s.max_length()) / (movable * len));
            if a_movable {
                self.deltas[s.a] += shift;
                self.counts[s.a] += 1;
            }
            if b_movable {
                self.deltas[s.b] -= shift;
                self.counts[s.b] += 1;
            }
            corrected += 1;
        }

        if corrected > 0 {
            for (i, p) in particles.iter_mut().enumerate() {
                let n = self.counts[i];
                if n > 0 {
                    p.pos += self.deltas[i].scale(F::one() / F::from_f32(n as f32));
                }
            }
        }
        corrected
    }
}
