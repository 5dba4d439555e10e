//! Error types for cloth construction and indexing.

use alloc::string::String;
use thiserror::Error;

/// Errors reported by configuration validation and checked accessors.
///
/// The stepping loop itself never fails.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClothError {
    #[error("grid must be at least 2x2 (got {rows}x{cols})")]
    InvalidGridDimensions { rows: usize, cols: usize },
    #[error("density must be positive and finite")]
    InvalidDensity,
    #[error("particle mass must be positive and finite")]
    InvalidMass,
    #[error("spring stiffness must be non-negative and finite")]
    InvalidStiffness,
    #[error("damping must be in [0, 1]")]
    InvalidDamping,
    #[error("stretch ratio must be at least 1")]
    InvalidStretchRatio,
    #[error("time step must be positive and finite")]
    InvalidTimeStep,
    #[error("particle index {index} out of bounds (count: {count})")]
    ParticleOutOfBounds { index: usize, count: usize },
    #[error("grid cell ({row}, {col}) out of bounds for a {rows}x{cols} grid")]
    CellOutOfBounds { row: usize, col: usize, rows: usize, cols: usize },
    #[error("unknown integration scheme `{0}`")]
    UnknownIntegrator(String),
}
