//! UV-sphere mesh generated on polar coordinates.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use std::f32::consts::PI;

use crate::error::{Error, Result};
use crate::params::SphereParams;

/// Vertex data for the sphere mesh (position + normal)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable, PartialEq)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn normal(&self) -> Vec3 {
        Vec3::from_array(self.normal)
    }
}

/// Sphere mesh with triangle indices
#[derive(Debug, Clone)]
pub struct SphereMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    segments: usize,
    rings: usize,
}

impl SphereMesh {
    /// Generate `(rings + 1) * (segments + 1)` vertices and two triangles
    /// per quad.
    ///
    /// # Arguments
    /// * `radius` - Sphere radius
    /// * `segments` - Subdivisions around the Y axis (phi in [0, 2π])
    /// * `rings` - Subdivisions from pole to pole (theta in [0, π])
    pub fn generate(radius: f32, segments: usize, rings: usize) -> Result<Self> {
        if segments == 0 || rings == 0 {
            return Err(Error::InvalidConfig(format!(
                "Sphere needs at least one segment and ring, got {}x{}",
                segments, rings
            )));
        }

        let mut vertices = Vec::with_capacity((rings + 1) * (segments + 1));
        let mut indices = Vec::with_capacity(rings * segments * 6);

        // Vertex matrix is (rings + 1) rows by (segments + 1) columns;
        // the seam column is duplicated so UV-style indexing stays simple
        for j in 0..=rings {
            let theta = j as f32 / rings as f32 * PI;
            for i in 0..=segments {
                let phi = i as f32 / segments as f32 * 2.0 * PI;

                let x = phi.cos() * theta.sin();
                let y = theta.cos();
                let z = phi.sin() * theta.sin();

                vertices.push(Vertex {
                    position: [radius * x, radius * y, radius * z],
                    normal: [x, y, z],
                });
            }
        }

        for j in 0..rings {
            for i in 0..segments {
                let first = (j * (segments + 1) + i) as u32;
                let second = first + (segments + 1) as u32;

                indices.extend_from_slice(&[
                    first,
                    second,
                    first + 1,
                    second,
                    second + 1,
                    first + 1,
                ]);
            }
        }

        Ok(Self {
            vertices,
            indices,
            segments,
            rings,
        })
    }

    /// Generate from validated sphere parameters
    pub fn from_params(params: &SphereParams) -> Result<Self> {
        params.validate()?;
        Self::generate(params.radius, params.segments, params.rings)
    }

    /// Line-list indices (one horizontal and one vertical edge per quad)
    pub fn line_indices(&self) -> Vec<u32> {
        let mut lines = Vec::with_capacity(self.rings * self.segments * 4);
        for j in 0..self.rings {
            for i in 0..self.segments {
                let first = (j * (self.segments + 1) + i) as u32;
                let second = first + (self.segments + 1) as u32;
                lines.extend_from_slice(&[first, second, first, first + 1]);
            }
        }
        lines
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_counts() {
        let mesh = SphereMesh::generate(1.0, 8, 4).unwrap();

        // (rings + 1) * (segments + 1) vertices
        assert_eq!(mesh.vertices.len(), 5 * 9);
        // rings * segments quads, 2 triangles each
        assert_eq!(mesh.indices.len(), 4 * 8 * 6);
        assert_eq!(mesh.triangle_count(), 64);
        assert_eq!(mesh.line_indices().len(), 4 * 8 * 4);
    }

    #[test]
    fn test_vertices_lie_on_radius() {
        let mesh = SphereMesh::generate(2.5, 16, 12).unwrap();

        for v in &mesh.vertices {
            assert!((v.position().length() - 2.5).abs() < 1e-4);
            assert!((v.normal().length() - 1.0).abs() < 1e-4);
            assert!((v.position() - v.normal() * 2.5).length() < 1e-4);
        }
    }

    #[test]
    fn test_poles() {
        let mesh = SphereMesh::generate(1.0, 6, 3).unwrap();

        assert!((mesh.vertices[0].position()[1] - 1.0).abs() < 1e-6);
        let last = mesh.vertices.last().unwrap();
        assert!((last.position()[1] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_indices_in_range() {
        let mesh = SphereMesh::generate(1.0, 10, 7).unwrap();
        let count = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < count));
    }

    #[test]
    fn test_vertex_is_pod() {
        let mesh = SphereMesh::generate(1.0, 2, 2).unwrap();
        let bytes: &[u8] = bytemuck::cast_slice(&mesh.vertices);
        assert_eq!(bytes.len(), mesh.vertices.len() * 24);
    }

    #[test]
    fn test_degenerate_sphere_rejected() {
        assert!(SphereMesh::generate(1.0, 0, 4).is_err());
        assert!(SphereMesh::generate(1.0, 4, 0).is_err());
    }
}
