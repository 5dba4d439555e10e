//! Per-step force accumulation.

use crate::config::ClothConfig;
use crate::float::Float;
use crate::particle::Particle;
use crate::spring::Spring;
use crate::vec::Vec3;

/// Parameters of the force model for one step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ForceParams<F: Float> {
    pub gravity: Vec3<F>,
    /// Linear velocity drag coefficient.
    pub drag: F,
    pub viscosity: F,
    pub fluid_velocity: Vec3<F>,
}

impl<F: Float> ForceParams<F> {
    /// Force model for `config`. Drag is zero for schemes that damp elsewhere.
    pub fn from_config(config: &ClothConfig<F>) -> Self {
        let drag = if config.integrator.uses_velocity_drag() {
            config.damping
        } else {
            F::zero()
        };
        ForceParams {
            gravity: config.gravity,
            drag,
            viscosity: config.viscosity,
            fluid_velocity: config.fluid_velocity,
        }
    }
}

/// Rebuild every particle's `force` from the current positions and velocities.
///
/// Spring forces are applied to all endpoints; drag, gravity, viscosity and
/// pending external force only to movable particles.
pub fn accumulate<F: Float>(
    particles: &mut [Particle<F>],
    springs: &[Spring<F>],
    params: &ForceParams<F>,
) {
    for p in particles.iter_mut() {
        p.force = Vec3::zero();
    }

    for s in springs {
        let f = s.elastic_force(particles);
        particles[s.a].force += f;
        particles[s.b].force -= f;
    }

    let use_viscosity = !params.viscosity.is_near_zero(F::from_f32(1e-12));
    for p in particles.iter_mut() {
        if p.fixed {
            continue;
        }
        p.force -= p.velocity.scale(params.drag);
        p.force += params.gravity.scale(p.mass);
        if use_viscosity {
            let n = p.normal;
            let relative = params.fluid_velocity - p.velocity;
            p.force += n.scale(params.viscosity * n.dot(relative));
        }
        p.force += p.external;
    }
}
