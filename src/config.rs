//! Configuration for building and stepping a cloth.

use crate::error::ClothError;
use crate::float::Float;
use crate::integrator::Integrator;
use crate::vec::Vec3;
use alloc::vec;
use alloc::vec::Vec as AllocVec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A particle fixed in place, shifted by `offset` when pinned.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pin<F: Float> {
    pub row: usize,
    pub col: usize,
    pub offset: Vec3<F>,
}

/// Which particles are pinned after the grid is built.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PinLayout<F: Float> {
    /// Both ends of the top row, pushed outward along X by `offset`.
    TopCorners { offset: F },
    Custom(AllocVec<Pin<F>>),
}

impl<F: Float> PinLayout<F> {
    /// Concrete pins for a grid with `cols` columns.
    pub fn resolve(&self, cols: usize) -> AllocVec<Pin<F>> {
        match self {
            PinLayout::TopCorners { offset } => vec![
                Pin { row: 0, col: 0, offset: Vec3::new(-*offset, F::zero(), F::zero()) },
                Pin {
                    row: 0,
                    col: cols.saturating_sub(1),
                    offset: Vec3::new(*offset, F::zero(), F::zero()),
                },
            ],
            PinLayout::Custom(pins) => pins.clone(),
        }
    }
}

/// Cloth configuration. Fixed for the lifetime of a [`Cloth`](crate::Cloth).
///
/// # Builder Pattern
/// ```
/// use weft::config::ClothConfig;
/// use weft::integrator::Integrator;
/// use weft::vec::Vec3;
///
/// let config: ClothConfig<f64> = ClothConfig::new()
///     .with_grid(20, 20)
///     .with_density(4.0)
///     .with_gravity(Vec3::new(0.0, -9.8, 0.0))
///     .with_integrator(Integrator::RungeKutta4)
///     .with_constraint_iterations(8);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClothConfig<F: Float> {
    /// Particle rows. Default: 40.
    pub rows: usize,
    /// Particle columns. Default: 40.
    pub cols: usize,
    /// Particles per unit length; grid spacing is `1 / density`. Default: 4.
    pub density: F,
    /// Mass of every particle. Default: 1.
    pub particle_mass: F,
    /// Default: 300.
    pub structural_stiffness: F,
    /// Default: 200.
    pub shear_stiffness: F,
    /// Default: 200.
    pub flexion_stiffness: F,
    /// Linear drag for Euler/RK4; displacement damping for Verlet. Default: 0.1.
    pub damping: F,
    /// Default: (0, -2, 0).
    pub gravity: Vec3<F>,
    /// Default: Verlet.
    pub integrator: Integrator,
    /// Fluid drag along the particle normal. Default: 0 (disabled).
    pub viscosity: F,
    /// Ambient fluid velocity for the viscous term. Default: zero.
    pub fluid_velocity: Vec3<F>,
    /// Jacobi passes per step. Default: 10.
    pub constraint_iterations: usize,
    /// Max spring length as a multiple of rest length. Default: 1.5.
    pub stretch_ratio: F,
    /// Default: top corners, offset 0.1.
    pub pins: PinLayout<F>,
    /// World-space offset of particle positions. Default: zero.
    pub origin: Vec3<F>,
    /// Sub-step length used by `Cloth::frame`. Default: 0.01.
    pub time_step: F,
    /// Sub-steps per `Cloth::frame`. Default: 25.
    pub sub_steps: usize,
}

impl<F: Float> ClothConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        ClothConfig {
            rows: 40,
            cols: 40,
            density: F::from_f32(4.0),
            particle_mass: F::one(),
            structural_stiffness: F::from_f32(300.0),
            shear_stiffness: F::from_f32(200.0),
            flexion_stiffness: F::from_f32(200.0),
            damping: F::from_f32(0.1),
            gravity: Vec3::new(F::zero(), F::from_f32(-2.0), F::zero()),
            integrator: Integrator::Verlet,
            viscosity: F::zero(),
            fluid_velocity: Vec3::zero(),
            constraint_iterations: 10,
            stretch_ratio: F::from_f32(1.5),
            pins: PinLayout::TopCorners { offset: F::from_f32(0.1) },
            origin: Vec3::zero(),
            time_step: F::from_f32(0.01),
            sub_steps: 25,
        }
    }

    pub fn with_grid(mut self, rows: usize, cols: usize) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    pub fn with_density(mut self, density: F) -> Self {
        self.density = density;
        self
    }

    pub fn with_particle_mass(mut self, mass: F) -> Self {
        self.particle_mass = mass;
        self
    }

    /// Set structural, shear and flexion stiffness.
    pub fn with_stiffness(mut self, structural: F, shear: F, flexion: F) -> Self {
        self.structural_stiffness = structural;
        self.shear_stiffness = shear;
        self.flexion_stiffness = flexion;
        self
    }

    pub fn with_damping(mut self, damping: F) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_gravity(mut self, gravity: Vec3<F>) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_integrator(mut self, integrator: Integrator) -> Self {
        self.integrator = integrator;
        self
    }

    /// Enable normal-direction fluid drag.
    pub fn with_viscosity(mut self, viscosity: F, fluid_velocity: Vec3<F>) -> Self {
        self.viscosity = viscosity;
        self.fluid_velocity = fluid_velocity;
        self
    }

    pub fn with_constraint_iterations(mut self, iterations: usize) -> Self {
        self.constraint_iterations = iterations;
        self
    }

    pub fn with_stretch_ratio(mut self, ratio: F) -> Self {
        self.stretch_ratio = ratio;
        self
    }

    pub fn with_pins(mut self, pins: PinLayout<F>) -> Self {
        self.pins = pins;
        self
    }

    pub fn with_origin(mut self, origin: Vec3<F>) -> Self {
        self.origin = origin;
        self
    }

    /// Set the per-frame stepping schedule.
    pub fn with_time_step(mut self, time_step: F, sub_steps: usize) -> Self {
        self.time_step = time_step;
        self.sub_steps = sub_steps.max(1);
        self
    }

    /// Grid spacing between neighboring particles.
    pub fn spacing(&self) -> F {
        F::one() / self.density
    }

    /// Check every parameter and pin against the grid.
    pub fn validate(&self) -> Result<(), ClothError> {
        if self.rows < 2 || self.cols < 2 {
            return Err(ClothError::InvalidGridDimensions { rows: self.rows, cols: self.cols });
        }
        if !self.density.is_finite() || self.density <= F::zero() {
            return Err(ClothError::InvalidDensity);
        }
        if !self.particle_mass.is_finite() || self.particle_mass <= F::zero() {
            return Err(ClothError::InvalidMass);
        }
        for k in [self.structural_stiffness, self.shear_stiffness, self.flexion_stiffness] {
            if !k.is_finite() || k < F::zero() {
                return Err(ClothError::InvalidStiffness);
            }
        }
        if !self.damping.is_finite() || self.damping < F::zero() || self.damping > F::one() {
            return Err(ClothError::InvalidDamping);
        }
        if !self.stretch_ratio.is_finite() || self.stretch_ratio < F::one() {
            return Err(ClothError::InvalidStretchRatio);
        }
        if !self.time_step.is_finite() || self.time_step <= F::zero() {
            return Err(ClothError::InvalidTimeStep);
        }
        for pin in self.pins.resolve(self.cols) {
            if pin.row >= self.rows || pin.col >= self.cols {
                return Err(ClothError::CellOutOfBounds {
                    row: pin.row,
                    col: pin.col,
                    rows: self.rows,
                    cols: self.cols,
                });
            }
        }
        Ok(())
    }
}

impl<F: Float> Default for ClothConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}
