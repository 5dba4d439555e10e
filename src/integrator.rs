//! Time integration: semi-implicit Euler, classical RK4 and Verlet.

use crate::error::ClothError;
use crate::float::Float;
use crate::force::{self, ForceParams};
use crate::observer::StepObserver;
use crate::particle::Particle;
use crate::spring::Spring;
use crate::vec::Vec3;
use alloc::string::ToString;
use alloc::vec::Vec as AllocVec;
use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Integration scheme, chosen once per cloth.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Integrator {
    SemiImplicitEuler,
    RungeKutta4,
    #[default]
    Verlet,
}

const RK4_WEIGHTS: [f32; 4] = [1.0, 2.0, 2.0, 1.0];
/// Fraction of dt at which the next RK4 stage is evaluated.
const RK4_STAGE_OFFSETS: [f32; 3] = [0.5, 0.5, 1.0];

impl Integrator {
    pub fn name(self) -> &'static str {
        match self {
            Integrator::SemiImplicitEuler => "euler",
            Integrator::RungeKutta4 => "rk4",
            Integrator::Verlet => "verlet",
        }
    }

    /// Whether damping enters as a `-damping * v` force. Verlet damps the
    /// implicit velocity directly instead.
    pub fn uses_velocity_drag(self) -> bool {
        !matches!(self, Integrator::Verlet)
    }

    /// Accumulate forces and advance every movable particle by `dt`.
    ///
    /// RK4 evaluates forces four times. Verlet leaves `velocity` stale; the
    /// caller reconstructs it after constraint correction.
    pub fn advance<F: Float, O: StepObserver>(
        self,
        particles: &mut [Particle<F>],
        springs: &[Spring<F>],
        params: &ForceParams<F>,
        dt: F,
        damping: F,
        scratch: &mut Rk4Scratch<F>,
        observer: &mut O,
    ) {
        match self {
            Integrator::SemiImplicitEuler => {
                force::accumulate(particles, springs, params);
                observer.on_forces(0);
                euler(particles, dt);
            }
            Integrator::RungeKutta4 => {
                runge_kutta4(particles, springs, params, dt, scratch, observer);
            }
            Integrator::Verlet => {
                force::accumulate(particles, springs, params);
                observer.on_forces(0);
                verlet(particles, dt, damping);
            }
        }
    }
}

impl fmt::Display for Integrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Integrator {
    type Err = ClothError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let eq = |candidate: &str| name.eq_ignore_ascii_case(candidate);
        if eq("euler") || eq("semi-implicit-euler") || eq("explicit") {
            Ok(Integrator::SemiImplicitEuler)
        } else if eq("rk4") || eq("runge-kutta") {
            Ok(Integrator::RungeKutta4)
        } else if eq("verlet") {
            Ok(Integrator::Verlet)
        } else {
            Err(ClothError::UnknownIntegrator(name.to_string()))
        }
    }
}

fn euler<F: Float>(particles: &mut [Particle<F>], dt: F) {
    for p in particles.iter_mut() {
        if p.fixed {
            continue;
        }
        p.prev_pos = p.pos;
        p.velocity += p.acceleration().scale(dt);
        p.pos += p.velocity.scale(dt);
    }
}

fn verlet<F: Float>(particles: &mut [Particle<F>], dt: F, damping: F) {
    let keep = F::one() - damping;
    for p in particles.iter_mut() {
        if p.fixed {
            continue;
        }
        let last = p.pos;
        p.pos += (p.pos - p.prev_pos).scale(keep) + p.acceleration().scale(dt * dt);
        p.prev_pos = last;
    }
}

/// Per-particle buffers for RK4, reused between steps.
#[derive(Clone, Debug, Default)]
pub struct Rk4Scratch<F: Float> {
    start_pos: AllocVec<Vec3<F>>,
    start_vel: AllocVec<Vec3<F>>,
    sum_pos: AllocVec<Vec3<F>>,
    sum_vel: AllocVec<Vec3<F>>,
}

impl<F: Float> Rk4Scratch<F> {
    pub fn new() -> Self {
        Rk4Scratch {
            start_pos: AllocVec::new(),
            start_vel: AllocVec::new(),
            sum_pos: AllocVec::new(),
            sum_vel: AllocVec::new(),
        }
    }

    fn load(&mut self, particles: &[Particle<F>]) {
        self.start_pos.clear();
        self.start_vel.clear();
        self.start_pos.extend(particles.iter().map(|p| p.pos));
        self.start_vel.extend(particles.iter().map(|p| p.velocity));
        self.sum_pos.clear();
        self.sum_vel.clear();
        self.sum_pos.resize(particles.len(), Vec3::zero());
        self.sum_vel.resize(particles.len(), Vec3::zero());
    }
}

fn runge_kutta4<F: Float, O: StepObserver>(
    particles: &mut [Particle<F>],
    springs: &[Spring<F>],
    params: &ForceParams<F>,
    dt: F,
    scratch: &mut Rk4Scratch<F>,
    observer: &mut O,
) {
    scratch.load(particles);

    for (stage, weight) in RK4_WEIGHTS.iter().enumerate() {
        force::accumulate(particles, springs, params);
        observer.on_forces(stage);

        let w = F::from_f32(*weight);
        let next = RK4_STAGE_OFFSETS.get(stage).map(|&f| dt * F::from_f32(f));
        for (i, p) in particles.iter_mut().enumerate() {
            if p.fixed {
                continue;
            }
            let dx = p.velocity;
            let dv = p.acceleration();
            scratch.sum_pos[i] += dx.scale(w);
            scratch.sum_vel[i] += dv.scale(w);
            if let Some(h) = next {
                p.pos = scratch.start_pos[i] + dx.scale(h);
                p.velocity = scratch.start_vel[i] + dv.scale(h);
            }
        }
    }

    let sixth = dt / F::from_f32(6.0);
    for (i, p) in particles.iter_mut().enumerate() {
        if p.fixed {
            continue;
        }
        p.prev_pos = scratch.start_pos[i];
        p.pos = scratch.start_pos[i] + scratch.sum_pos[i].scale(sixth);
        p.velocity = scratch.start_vel[i] + scratch.sum_vel[i].scale(sixth);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::NoOpStepObserver;
    use crate::vec::Vec2;
    use alloc::vec;

    fn falling() -> AllocVec<Particle<f64>> {
        vec![Particle::new(Vec3::new(0.0, 10.0, 0.0), Vec2::zero(), 1.0)]
    }

    fn gravity_only() -> ForceParams<f64> {
        ForceParams {
            gravity: Vec3::new(0.0, -2.0, 0.0),
            drag: 0.0,
            viscosity: 0.0,
            fluid_velocity: Vec3::zero(),
        }
    }

    #[test]
    fn parses_scheme_names() {
        assert_eq!("euler".parse::<Integrator>(), Ok(Integrator::SemiImplicitEuler));
        assert_eq!(" RK4 ".parse::<Integrator>(), Ok(Integrator::RungeKutta4));
        assert_eq!("Verlet".parse::<Integrator>(), Ok(Integrator::Verlet));
        assert_eq!(
            "leapfrog".parse::<Integrator>(),
            Err(ClothError::UnknownIntegrator("leapfrog".to_string()))
        );
    }

    #[test]
    fn display_round_trips_through_parse() {
        for scheme in [Integrator::SemiImplicitEuler, Integrator::RungeKutta4, Integrator::Verlet] {
            let name = alloc::format!("{}", scheme);
            assert_eq!(name.parse::<Integrator>(), Ok(scheme));
        }
    }

    #[test]
    fn euler_updates_velocity_before_position() {
        let mut particles = falling();
        let mut scratch = Rk4Scratch::new();
        Integrator::SemiImplicitEuler.advance(
            &mut particles, &[], &gravity_only(), 0.5, 0.0, &mut scratch, &mut NoOpStepObserver,
        );
        assert_eq!(particles[0].velocity, Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(particles[0].pos, Vec3::new(0.0, 9.5, 0.0));
        assert_eq!(particles[0].prev_pos, Vec3::new(0.0, 10.0, 0.0));
    }

    #[test]
    fn verlet_damps_implicit_velocity() {
        let mut particles = falling();
        particles[0].prev_pos = Vec3::new(-1.0, 10.0, 0.0);
        let params = ForceParams { gravity: Vec3::zero(), ..gravity_only() };
        let mut scratch = Rk4Scratch::new();
        Integrator::Verlet.advance(
            &mut particles, &[], &params, 0.1, 0.5, &mut scratch, &mut NoOpStepObserver,
        );
        assert_eq!(particles[0].pos, Vec3::new(0.5, 10.0, 0.0));
        assert_eq!(particles[0].prev_pos, Vec3::new(0.0, 10.0, 0.0));
    }

    #[test]
    fn fixed_particles_are_not_integrated() {
        for scheme in [Integrator::SemiImplicitEuler, Integrator::RungeKutta4, Integrator::Verlet] {
            let mut particles = falling();
            particles[0].pin(Vec3::zero());
            let before = particles[0].pos;
            let mut scratch = Rk4Scratch::new();
            scheme.advance(
                &mut particles, &[], &gravity_only(), 0.1, 0.1, &mut scratch, &mut NoOpStepObserver,
            );
            assert_eq!(particles[0].pos, before, "{} moved a fixed particle", scheme);
        }
    }

    #[test]
    fn only_verlet_skips_velocity_drag() {
        assert!(Integrator::SemiImplicitEuler.uses_velocity_drag());
        assert!(Integrator::RungeKutta4.uses_velocity_drag());
        assert!(!Integrator::Verlet.uses_velocity_drag());
    }
}
