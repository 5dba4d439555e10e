//! Mass-spring cloth simulation.
//!
//! `weft` models a rectangular cloth as a grid of point masses joined by
//! structural, shear and flexion springs, and advances it under gravity,
//! spring forces, damping, fluid drag and user-applied wind.
//!
//! # Features
//!
//! - **Three integrators**: semi-implicit Euler, classical RK4, and Verlet
//! - **Stretch limiting**: Jacobi relaxation caps springs at a multiple of rest length
//! - **Obstacles**: sphere and axis-aligned cube collision with friction
//! - **Normals**: per-face normals written to particles for rendering
//! - **Fold detection**: flags sharply bent rows/columns for refinement
//! - **Observable**: Monitor physics steps via the `StepObserver` trait
//! - **`no_std` compatible**: Works in embedded and WASM environments
//!
//! ```
//! use weft::{Cloth, ClothConfig, Integrator, Obstacle, Sphere, Vec3};
//!
//! let config = ClothConfig::<f64>::new()
//!     .with_grid(10, 10)
//!     .with_integrator(Integrator::SemiImplicitEuler);
//! let mut cloth = Cloth::new(config).unwrap();
//! let ball = Obstacle::Sphere(Sphere::new(Vec3::new(1.0, -1.5, 1.0), 1.0, 0.8));
//!
//! cloth.add_force(Vec3::new(0.0, 0.0, 2.0));
//! cloth.frame(&ball, true);
//! assert_eq!(cloth.normals().len(), 100);
//! ```

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod particle;
pub mod spring;
pub mod topology;
pub mod force;
pub mod integrator;
pub mod constraint;
pub mod collision;
pub mod normal;
pub mod refine;
pub mod cloth;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::{Axis, Vec2, Vec3};
pub use particle::Particle;
pub use spring::{Spring, SpringDirection, SpringKind};
pub use topology::{Face, SpringAdjacency, Topology};
pub use force::ForceParams;
pub use integrator::{Integrator, Rk4Scratch};
pub use constraint::{SolveReport, StretchSolver};
pub use collision::{Contact, Cube, Obstacle, Sphere};
pub use refine::FoldCandidate;
pub use cloth::Cloth;
pub use config::{ClothConfig, Pin, PinLayout};
pub use observer::{LogStepObserver, NoOpStepObserver, StepObserver};
pub use error::ClothError;
