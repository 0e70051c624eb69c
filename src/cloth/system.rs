//! Mass-spring system owning its particles, springs and scratch buffers.

use std::collections::HashSet;

use glam::Vec3;
use log::debug;

use super::integrator::step_with_forces;
use super::Spring;
use crate::error::{Error, Result};
use crate::params::{ClothConfig, SpringParams};

/// Particle system loaded from a triangle mesh
pub struct MassSpring {
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    springs: Vec<Spring>,
    params: SpringParams,
    /// Particle held in place (e.g. grabbed by the user)
    pinned: Option<usize>,
    /// Loaded pose, restored by `reset`
    rest_positions: Vec<Vec3>,
    /// Reused force buffer
    forces: Vec<Vec3>,
}

impl MassSpring {
    /// Build a particle per vertex and a spring per unique triangle edge.
    ///
    /// Rest lengths are the edge lengths of the loaded mesh, so the system
    /// starts in equilibrium apart from gravity.
    pub fn from_mesh(
        vertices: &[Vec3],
        triangles: &[[usize; 3]],
        params: SpringParams,
    ) -> Result<Self> {
        params.validate()?;

        let len = vertices.len();
        let mut seen = HashSet::new();
        let mut springs = Vec::new();

        for triangle in triangles {
            for &index in triangle {
                if index >= len {
                    return Err(Error::IndexOutOfRange { index, len });
                }
            }
            for (a, b) in [
                (triangle[0], triangle[1]),
                (triangle[1], triangle[2]),
                (triangle[2], triangle[0]),
            ] {
                let key = (a.min(b), a.max(b));
                if a != b && seen.insert(key) {
                    springs.push(Spring::new(key.0, key.1, vertices[a].distance(vertices[b])));
                }
            }
        }

        debug!(
            "Mass-spring: {} particles, {} springs from {} triangles",
            len,
            springs.len(),
            triangles.len()
        );

        Ok(Self {
            positions: vertices.to_vec(),
            velocities: vec![Vec3::ZERO; len],
            springs,
            params,
            pinned: None,
            rest_positions: vertices.to_vec(),
            forces: Vec::with_capacity(len),
        })
    }

    /// Square horizontal sheet centred over the origin
    ///
    /// `resolution` particles per side; each grid cell is split into two
    /// triangles, giving structural springs along rows and columns plus one
    /// shear diagonal per cell.
    pub fn cloth_grid(config: &ClothConfig, params: SpringParams) -> Result<Self> {
        config.validate()?;

        let n = config.resolution;
        let spacing = config.size / (n - 1) as f32;
        let half = config.size / 2.0;

        let mut vertices = Vec::with_capacity(n * n);
        for row in 0..n {
            for col in 0..n {
                vertices.push(Vec3::new(
                    col as f32 * spacing - half,
                    config.spawn_height,
                    row as f32 * spacing - half,
                ));
            }
        }

        let mut triangles = Vec::with_capacity((n - 1) * (n - 1) * 2);
        for row in 0..n - 1 {
            for col in 0..n - 1 {
                let top_left = row * n + col;
                let top_right = top_left + 1;
                let bottom_left = top_left + n;
                let bottom_right = bottom_left + 1;

                triangles.push([top_left, bottom_left, top_right]);
                triangles.push([top_right, bottom_left, bottom_right]);
            }
        }

        Self::from_mesh(&vertices, &triangles, params)
    }

    /// Advance one timestep
    pub fn step(&mut self, dt: f32) -> Result<()> {
        step_with_forces(
            &mut self.positions,
            &mut self.velocities,
            &self.springs,
            &self.params,
            dt,
            self.pinned,
            &mut self.forces,
        )
    }

    /// Hold a particle in place (or release with `None`)
    pub fn pin(&mut self, index: Option<usize>) {
        self.pinned = index;
    }

    pub fn pinned(&self) -> Option<usize> {
        self.pinned
    }

    /// Move the pinned particle; it keeps zero velocity while held
    pub fn drag_pinned(&mut self, position: Vec3) {
        if let Some(i) = self.pinned {
            if let (Some(p), Some(v)) = (self.positions.get_mut(i), self.velocities.get_mut(i)) {
                *p = position;
                *v = Vec3::ZERO;
            }
        }
    }

    pub fn set_params(&mut self, params: SpringParams) -> Result<()> {
        params.validate()?;
        self.params = params;
        Ok(())
    }

    pub fn params(&self) -> &SpringParams {
        &self.params
    }

    /// Restore the loaded pose with zero velocity
    pub fn reset(&mut self) {
        self.positions.copy_from_slice(&self.rest_positions);
        self.velocities.fill(Vec3::ZERO);
    }

    /// Sum of ½·m·|v|² over all particles
    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.params.particle_mass
            * self
                .velocities
                .iter()
                .map(|v| v.length_squared())
                .sum::<f32>()
    }

    /// Mean particle position
    pub fn centroid(&self) -> Vec3 {
        if self.positions.is_empty() {
            return Vec3::ZERO;
        }
        self.positions.iter().copied().sum::<Vec3>() / self.positions.len() as f32
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    pub fn springs(&self) -> &[Spring] {
        &self.springs
    }

    pub fn particle_count(&self) -> usize {
        self.positions.len()
    }
}
