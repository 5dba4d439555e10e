//! The cloth simulation: topology plus the per-step pipeline.

use crate::collision::Obstacle;
use crate::config::ClothConfig;
use crate::constraint::{SolveReport, StretchSolver};
use crate::error::ClothError;
use crate::float::Float;
use crate::force::ForceParams;
use crate::integrator::{Integrator, Rk4Scratch};
use crate::normal;
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::particle::Particle;
use crate::refine::{self, FoldCandidate};
use crate::spring::Spring;
use crate::topology::{Face, Topology};
use crate::vec::{Vec2, Vec3};
use alloc::vec::Vec as AllocVec;

/// A mass-spring cloth.
///
/// Each [`step`](Cloth::step) accumulates forces, integrates with the
/// configured scheme, optionally limits spring stretch, and resolves
/// collisions. Normals are refreshed by [`compute_normals`](Cloth::compute_normals)
/// or once per [`frame`](Cloth::frame).
pub struct Cloth<F: Float> {
    config: ClothConfig<F>,
    topology: Topology<F>,
    solver: StretchSolver<F>,
    rk4: Rk4Scratch<F>,
    last_solve: Option<SolveReport>,
}

impl<F: Float> Cloth<F> {
    pub fn new(config: ClothConfig<F>) -> Result<Self, ClothError> {
        let topology = Topology::build(&config)?;
        let solver = StretchSolver::new(config.constraint_iterations);
        let mut cloth = Cloth {
            config,
            topology,
            solver,
            rk4: Rk4Scratch::new(),
            last_solve: None,
        };
        cloth.compute_normals();
        Ok(cloth)
    }

    /// Advance by one sub-step of length `dt`.
    pub fn step(&mut self, obstacle: &Obstacle<F>, dt: F, apply_constraints: bool) {
        self.step_observed(obstacle, dt, apply_constraints, &mut NoOpStepObserver);
    }

    pub fn step_observed<O: StepObserver>(
        &mut self,
        obstacle: &Obstacle<F>,
        dt: F,
        apply_constraints: bool,
        observer: &mut O,
    ) {
        debug_assert!(dt > F::zero(), "time step must be positive");
        let params = ForceParams::from_config(&self.config);
        let Topology { particles, springs, .. } = &mut self.topology;

        self.config.integrator.advance(
            particles,
            springs,
            &params,
            dt,
            self.config.damping,
            &mut self.rk4,
            observer,
        );
        observer.on_integrate();

        if apply_constraints {
            self.last_solve = Some(self.solver.solve(particles, springs, dt, observer));
        } else {
            self.last_solve = None;
            if self.config.integrator == Integrator::Verlet {
                for p in particles.iter_mut() {
                    p.velocity = p.implied_velocity(dt);
                }
            }
        }

        let contacts = obstacle.resolve(particles, self.config.origin, dt);
        observer.on_collisions(contacts);

        for p in particles.iter_mut() {
            p.external = Vec3::zero();
        }
        observer.on_step_complete();
    }

    /// Run the configured number of sub-steps, then refresh normals.
    pub fn frame(&mut self, obstacle: &Obstacle<F>, apply_constraints: bool) {
        let dt = self.config.time_step;
        for _ in 0..self.config.sub_steps {
            self.step(obstacle, dt, apply_constraints);
        }
        self.compute_normals();
    }

    pub fn compute_normals(&mut self) {
        normal::compute_normals(&mut self.topology.particles, &self.topology.faces);
    }

    /// Add `force` to every movable particle for the next step.
    pub fn add_force(&mut self, force: Vec3<F>) {
        for p in self.topology.particles.iter_mut() {
            p.add_external(force);
        }
    }

    /// Add `force` to one particle for the next step.
    pub fn add_force_to_particle(&mut self, index: usize, force: Vec3<F>) -> Result<(), ClothError> {
        let count = self.topology.particles.len();
        let p = self
            .topology
            .particles
            .get_mut(index)
            .ok_or(ClothError::ParticleOutOfBounds { index, count })?;
        p.add_external(force);
        Ok(())
    }

    /// Wind centered on a world-space `point`, fading linearly to nothing at
    /// `radius`. Returns how many particles received force.
    pub fn add_wind_near(&mut self, point: Vec3<F>, force: Vec3<F>, radius: F) -> usize {
        if radius <= F::zero() {
            return 0;
        }
        let origin = self.config.origin;
        let weights: AllocVec<(usize, F)> = self
            .topology
            .particles
            .iter()
            .enumerate()
            .filter_map(|(i, p)| {
                let d = (origin + p.pos).distance(point);
                (d < radius && !p.fixed).then(|| (i, F::one() - d / radius))
            })
            .collect();
        for &(i, w) in &weights {
            self.topology.particles[i].add_external(force.scale(w));
        }
        weights.len()
    }

    /// Rebuild the grid, springs, faces and pins from the configuration.
    pub fn reset(&mut self) -> Result<(), ClothError> {
        self.topology = Topology::build(&self.config)?;
        self.solver = StretchSolver::new(self.config.constraint_iterations);
        self.last_solve = None;
        self.compute_normals();
        log::debug!("cloth reset");
        Ok(())
    }

    pub fn particles(&self) -> &[Particle<F>] {
        &self.topology.particles
    }

    pub fn particle(&self, index: usize) -> Result<&Particle<F>, ClothError> {
        let count = self.topology.particles.len();
        self.topology
            .particles
            .get(index)
            .ok_or(ClothError::ParticleOutOfBounds { index, count })
    }

    pub fn particle_at(&self, row: usize, col: usize) -> Result<&Particle<F>, ClothError> {
        let index = self.topology.checked_index(row, col)?;
        Ok(&self.topology.particles[index])
    }

    /// Positions relative to the cloth origin.
    pub fn positions(&self) -> AllocVec<Vec3<F>> {
        self.topology.particles.iter().map(|p| p.pos).collect()
    }

    pub fn world_positions(&self) -> AllocVec<Vec3<F>> {
        let origin = self.config.origin;
        self.topology.particles.iter().map(|p| origin + p.pos).collect()
    }

    pub fn normals(&self) -> AllocVec<Vec3<F>> {
        self.topology.particles.iter().map(|p| p.normal).collect()
    }

    pub fn tex_coords(&self) -> AllocVec<Vec2<F>> {
        self.topology.particles.iter().map(|p| p.tex_coord).collect()
    }

    pub fn springs(&self) -> &[Spring<F>] {
        &self.topology.springs
    }

    /// Endpoint positions of every spring, for line rendering.
    pub fn spring_segments(&self) -> AllocVec<(Vec3<F>, Vec3<F>)> {
        let particles = &self.topology.particles;
        self.topology.springs.iter().map(|s| s.segment(particles)).collect()
    }

    pub fn faces(&self) -> &[Face] {
        &self.topology.faces
    }

    pub fn topology(&self) -> &Topology<F> {
        &self.topology
    }

    /// See [`refine::fold_candidates`].
    pub fn fold_candidates(&self, min_cos: F) -> AllocVec<FoldCandidate<F>> {
        refine::fold_candidates(&self.topology, min_cos)
    }

    /// Report of the most recent constrained step.
    pub fn last_solve(&self) -> Option<SolveReport> {
        self.last_solve
    }

    pub fn config(&self) -> &ClothConfig<F> { &self.config }
    pub fn integrator(&self) -> Integrator { self.config.integrator }
    pub fn rows(&self) -> usize { self.topology.rows() }
    pub fn cols(&self) -> usize { self.topology.cols() }
    pub fn particle_count(&self) -> usize { self.topology.particle_count() }
    pub fn spring_count(&self) -> usize { self.topology.spring_count() }
}
