//! Per-frame vertex displacement along the normals.
//!
//! CPU mirror of the sphere vertex shader: each vertex samples 3D Perlin
//! noise at `position * frequency + time * time_scale` and is pushed along its
//! normal by `noise * bass_uniform * displacement_scale`.

use glam::Vec3;
use noise::{NoiseFn, Perlin};

use super::{SphereMesh, Vertex};
use crate::params::SphereParams;

/// Noise-driven sphere deformation
pub struct SphereDeformer {
    perlin: Perlin,
    params: SphereParams,
}

impl SphereDeformer {
    pub fn new(params: &SphereParams) -> Self {
        Self {
            perlin: Perlin::new(params.noise_seed),
            params: params.clone(),
        }
    }

    /// Sample displacement noise at a rest position
    ///
    /// Returns value in range [-1, 1]
    pub fn noise_at(&self, position: Vec3, time_s: f32) -> f32 {
        let drift = Vec3::splat(time_s * self.params.noise_time_scale);
        let p = position * self.params.noise_frequency + drift;
        self.perlin.get([p.x as f64, p.y as f64, p.z as f64]) as f32
    }

    /// Write the deformed vertices of `mesh` into `out` (resized to fit).
    ///
    /// Normals are copied from the rest mesh. A zero `bass_uniform` leaves
    /// every position at rest.
    pub fn deform(&self, mesh: &SphereMesh, time_s: f32, bass_uniform: f32, out: &mut Vec<Vertex>) {
        out.clear();
        out.reserve(mesh.vertices.len());

        let amount = bass_uniform * self.params.displacement_scale;
        for vertex in &mesh.vertices {
            let position = vertex.position();
            let normal = vertex.normal();
            let offset = if amount == 0.0 {
                Vec3::ZERO
            } else {
                normal * (self.noise_at(position, time_s) * amount)
            };

            out.push(Vertex {
                position: (position + offset).to_array(),
                normal: vertex.normal,
            });
        }
    }

    /// Largest distance any deformed vertex moved from its rest position
    pub fn max_displacement(mesh: &SphereMesh, deformed: &[Vertex]) -> f32 {
        mesh.vertices
            .iter()
            .zip(deformed)
            .map(|(rest, moved)| rest.position().distance(moved.position()))
            .fold(0.0, f32::max)
    }

    pub fn params(&self) -> &SphereParams {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_sphere() -> (SphereMesh, SphereDeformer) {
        let params = SphereParams {
            segments: 24,
            rings: 16,
            ..SphereParams::default()
        };
        (
            SphereMesh::from_params(&params).unwrap(),
            SphereDeformer::new(&params),
        )
    }

    #[test]
    fn test_silence_leaves_sphere_at_rest() {
        let (mesh, deformer) = small_sphere();
        let mut out = Vec::new();

        deformer.deform(&mesh, 3.7, 0.0, &mut out);

        assert_eq!(out, mesh.vertices);
    }

    #[test]
    fn test_displacement_along_normal_and_bounded() {
        let (mesh, deformer) = small_sphere();
        let mut out = Vec::new();
        let bass_uniform = 1.5;

        deformer.deform(&mesh, 0.4, bass_uniform, &mut out);

        assert_eq!(out.len(), mesh.vertices.len());
        let limit = bass_uniform * deformer.params().displacement_scale + 1e-4;
        for (rest, moved) in mesh.vertices.iter().zip(&out) {
            let offset = moved.position() - rest.position();
            assert!(offset.length() <= limit);
            // Offset is parallel to the normal
            assert!(offset.cross(rest.normal()).length() < 1e-4);
        }
        assert!(SphereDeformer::max_displacement(&mesh, &out) > 0.0);
    }

    #[test]
    fn test_louder_bass_moves_further() {
        let (mesh, deformer) = small_sphere();
        let mut quiet = Vec::new();
        let mut loud = Vec::new();

        deformer.deform(&mesh, 1.3, 0.2, &mut quiet);
        deformer.deform(&mesh, 1.3, 2.0, &mut loud);

        let quiet_max = SphereDeformer::max_displacement(&mesh, &quiet);
        let loud_max = SphereDeformer::max_displacement(&mesh, &loud);
        assert!((loud_max - quiet_max * 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_same_seed_is_deterministic() {
        let (mesh, deformer) = small_sphere();
        let other = SphereDeformer::new(deformer.params());
        let (mut a, mut b) = (Vec::new(), Vec::new());

        deformer.deform(&mesh, 2.0, 1.0, &mut a);
        other.deform(&mesh, 2.0, 1.0, &mut b);

        assert_eq!(a, b);
    }
}
