//! Sphere mesh, noise displacement and frame colour parameters.

use glam::Vec3;

use crate::error::{Error, Result};

/// Sphere mesh and vertex displacement parameters
#[derive(Debug, Clone)]
pub struct SphereParams {
    /// Sphere radius (world units)
    pub radius: f32,

    /// Longitudinal subdivisions (around the Y axis)
    pub segments: usize,

    /// Latitudinal subdivisions (pole to pole)
    pub rings: usize,

    /// Spatial frequency of the displacement noise (cycles per unit)
    pub noise_frequency: f32,

    /// Noise drift speed (larger -> faster animation)
    pub noise_time_scale: f32,

    /// Displacement per unit of noise and bass uniform
    pub displacement_scale: f32,

    /// Perlin noise seed
    pub noise_seed: u32,
}

impl Default for SphereParams {
    fn default() -> Self {
        Self {
            radius: 1.0,
            segments: 200,
            rings: 200,
            noise_frequency: 4.0,
            noise_time_scale: 0.5,
            displacement_scale: 0.5,
            noise_seed: 42,
        }
    }
}

impl SphereParams {
    pub fn validate(&self) -> Result<()> {
        if self.segments == 0 || self.rings == 0 {
            return Err(Error::InvalidConfig(format!(
                "Sphere needs at least one segment and ring, got {}x{}",
                self.segments, self.rings
            )));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "Sphere radius must be > 0, got {}",
                self.radius
            )));
        }
        Ok(())
    }
}

/// Frame colour and motion mapping from bass strength
#[derive(Debug, Clone)]
pub struct VisualParams {
    /// Background clear colour (hex)
    pub background_hex: String,

    /// Sphere base colour (hex)
    pub sphere_hex: String,

    /// Model spin around Y (radians per second)
    pub spin_speed: f32,

    /// Extra spin per unit of bass strength (radians)
    pub bass_spin_scale: f32,

    /// Bass strength -> displacement uniform multiplier
    pub bass_uniform_scale: f32,

    /// Ambient term of the sphere's diffuse shading
    pub ambient: f32,

    /// Direction towards the main light (normalized on use)
    pub light_direction: Vec3,
}

impl Default for VisualParams {
    fn default() -> Self {
        Self {
            background_hex: "#CCE5CC".to_string(), // mint
            sphere_hex: "#99CCFF".to_string(),     // baby blue
            spin_speed: 0.3,
            bass_spin_scale: 0.8,
            bass_uniform_scale: 3.0,
            ambient: 0.12,
            light_direction: Vec3::new(0.5, 0.7, 1.0),
        }
    }
}
