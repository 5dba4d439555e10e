//! Cloth grid topology: particles, springs, faces and spring adjacency.

use crate::config::ClothConfig;
use crate::error::ClothError;
use crate::float::Float;
use crate::particle::Particle;
use crate::spring::{Spring, SpringDirection};
use crate::vec::{Vec2, Vec3};
use alloc::vec::Vec as AllocVec;

/// A triangle of particle indices.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Face(pub [usize; 3]);

/// Spring indices touching each particle, grouped by direction.
#[derive(Clone, Debug, Default)]
pub struct SpringAdjacency {
    links: AllocVec<[AllocVec<usize>; 6]>,
}

impl SpringAdjacency {
    fn build<F: Float>(particle_count: usize, springs: &[Spring<F>]) -> Self {
        let mut links: AllocVec<[AllocVec<usize>; 6]> =
            (0..particle_count).map(|_| Default::default()).collect();
        for (i, s) in springs.iter().enumerate() {
            let slot = s.direction.slot();
            links[s.a][slot].push(i);
            links[s.b][slot].push(i);
        }
        SpringAdjacency { links }
    }

    /// Springs of `direction` with `particle` as an endpoint.
    pub fn springs_of(&self, particle: usize, direction: SpringDirection) -> &[usize] {
        &self.links[particle][direction.slot()]
    }

    /// Number of springs of any direction touching `particle`.
    pub fn degree(&self, particle: usize) -> usize {
        self.links[particle].iter().map(|l| l.len()).sum()
    }
}

/// The grid of particles and everything built over it.
///
/// Particle at (row, col) has index `row * cols + col`.
pub struct Topology<F: Float> {
    pub particles: AllocVec<Particle<F>>,
    pub springs: AllocVec<Spring<F>>,
    pub faces: AllocVec<Face>,
    pub adjacency: SpringAdjacency,
    rows: usize,
    cols: usize,
}

impl<F: Float> Topology<F> {
    /// Lay out the grid on the XZ plane and connect it.
    ///
    /// Creates 3 categories of springs:
    /// - Structural: right and lower neighbors
    /// - Shear: both diagonals of every cell
    /// - Flexion: skip-one right and lower neighbors
    ///
    /// Rest lengths are captured before pins are offset.
    pub fn build(config: &ClothConfig<F>) -> Result<Self, ClothError> {
        config.validate()?;
        let rows = config.rows;
        let cols = config.cols;

        let mut particles = AllocVec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                particles.push(Particle::new(
                    Self::rest_position(config, row, col),
                    Self::tex_coord(rows, cols, row, col),
                    config.particle_mass,
                ));
            }
        }

        let springs = Self::link_springs(config, &particles);
        let faces = Self::build_faces(rows, cols);
        let adjacency = SpringAdjacency::build(particles.len(), &springs);

        let mut topology = Topology { particles, springs, faces, adjacency, rows, cols };
        for pin in config.pins.resolve(cols) {
            let idx = topology.checked_index(pin.row, pin.col)?;
            topology.particles[idx].pin(pin.offset);
        }

        log::debug!(
            "built {}x{} cloth: {} springs, {} faces",
            rows,
            cols,
            topology.springs.len(),
            topology.faces.len()
        );
        Ok(topology)
    }

    /// Unpinned position of the particle at (row, col).
    pub fn rest_position(config: &ClothConfig<F>, row: usize, col: usize) -> Vec3<F> {
        let spacing = config.spacing();
        Vec3::new(
            F::from_f32(col as f32) * spacing,
            F::zero(),
            F::from_f32(row as f32) * spacing,
        )
    }

    fn tex_coord(rows: usize, cols: usize, row: usize, col: usize) -> Vec2<F> {
        Vec2::new(
            F::from_f32(col as f32) / F::from_f32((cols - 1) as f32),
            F::from_f32(row as f32) / F::from_f32((rows - 1) as f32),
        )
    }

    fn link_springs(config: &ClothConfig<F>, particles: &[Particle<F>]) -> AllocVec<Spring<F>> {
        let rows = config.rows;
        let cols = config.cols;
        let ratio = config.stretch_ratio;
        let mut springs = AllocVec::new();
        let mut link = |a: usize, b: usize, k: F, direction: SpringDirection| {
            springs.push(Spring::new(a, b, particles, k, ratio, direction));
        };

        // Structural: horizontal
        for row in 0..rows {
            for col in 0..(cols - 1) {
                let a = row * cols + col;
                link(a, a + 1, config.structural_stiffness, SpringDirection::StructuralRow);
            }
        }

        // Structural: vertical
        for row in 0..(rows - 1) {
            for col in 0..cols {
                let a = row * cols + col;
                link(a, a + cols, config.structural_stiffness, SpringDirection::StructuralColumn);
            }
        }

        // Shear: diagonals
        for row in 0..(rows - 1) {
            for col in 0..(cols - 1) {
                let tl = row * cols + col;
                let tr = tl + 1;
                let bl = tl + cols;
                let br = bl + 1;
                link(tl, br, config.shear_stiffness, SpringDirection::ShearDown);
                link(tr, bl, config.shear_stiffness, SpringDirection::ShearUp);
            }
        }

        // Flexion: skip-one horizontal
        for row in 0..rows {
            for col in 0..(cols.saturating_sub(2)) {
                let a = row * cols + col;
                link(a, a + 2, config.flexion_stiffness, SpringDirection::FlexionRow);
            }
        }

        // Flexion: skip-one vertical
        for row in 0..(rows.saturating_sub(2)) {
            for col in 0..cols {
                let a = row * cols + col;
                link(a, a + 2 * cols, config.flexion_stiffness, SpringDirection::FlexionColumn);
            }
        }

        springs
    }

    /// Two triangles per cell, wound so the flat sheet faces +Y.
    fn build_faces(rows: usize, cols: usize) -> AllocVec<Face> {
        let mut faces = AllocVec::with_capacity(2 * (rows - 1) * (cols - 1));
        for row in 0..(rows - 1) {
            for col in 0..(cols - 1) {
                let tl = row * cols + col;
                let tr = tl + 1;
                let bl = tl + cols;
                let br = bl + 1;
                faces.push(Face([tr, tl, bl]));
                faces.push(Face([br, tr, bl]));
            }
        }
        faces
    }

    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn checked_index(&self, row: usize, col: usize) -> Result<usize, ClothError> {
        if row >= self.rows || col >= self.cols {
            return Err(ClothError::CellOutOfBounds { row, col, rows: self.rows, cols: self.cols });
        }
        Ok(self.index(row, col))
    }

    pub fn rows(&self) -> usize { self.rows }
    pub fn cols(&self) -> usize { self.cols }
    pub fn particle_count(&self) -> usize { self.particles.len() }
    pub fn spring_count(&self) -> usize { self.springs.len() }
}
