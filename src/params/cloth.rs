//! Mass-spring simulation parameters.

use glam::Vec3;

use crate::error::{Error, Result};

/// Per-step physical constants for the mass-spring integrator
#[derive(Debug, Clone)]
pub struct SpringParams {
    /// Hooke constant (force per unit of stretch)
    pub stiffness: f32,

    /// Damping along each spring axis (force per unit of relative speed)
    pub damping: f32,

    /// Mass of every particle (kg, must be > 0)
    pub particle_mass: f32,

    /// Gravitational acceleration (world units / s²)
    pub gravity: Vec3,

    /// Fraction of velocity kept after hitting a wall (0..=1)
    pub restitution: f32,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            stiffness: 1.0,
            damping: 1.0,
            particle_mass: 0.1,
            gravity: Vec3::new(0.0, -2.0, 0.0),
            restitution: 0.8,
        }
    }
}

impl SpringParams {
    pub fn validate(&self) -> Result<()> {
        if !self.particle_mass.is_finite() || self.particle_mass <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "Particle mass must be > 0, got {}",
                self.particle_mass
            )));
        }
        if !self.stiffness.is_finite() || self.stiffness < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "Stiffness must be >= 0, got {}",
                self.stiffness
            )));
        }
        if !self.damping.is_finite() || self.damping < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "Damping must be >= 0, got {}",
                self.damping
            )));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(Error::InvalidConfig(format!(
                "Restitution must be in [0, 1], got {}",
                self.restitution
            )));
        }
        if !self.gravity.is_finite() {
            return Err(Error::InvalidConfig("Gravity must be finite".to_string()));
        }
        Ok(())
    }
}

/// Cloth sheet layout and stepping
#[derive(Debug, Clone)]
pub struct ClothConfig {
    /// Particles per side of the square sheet (>= 2)
    pub resolution: usize,

    /// Edge length of the sheet (world units, the box is [-1, 1]³)
    pub size: f32,

    /// Height of the horizontal sheet when spawned
    pub spawn_height: f32,

    /// Simulation timestep (seconds)
    pub time_step_s: f32,
}

impl Default for ClothConfig {
    fn default() -> Self {
        Self {
            resolution: 10,
            size: 1.2,
            spawn_height: 0.8,
            time_step_s: 1.0 / 60.0,
        }
    }
}

impl ClothConfig {
    pub fn validate(&self) -> Result<()> {
        if self.resolution < 2 {
            return Err(Error::InvalidConfig(format!(
                "Cloth resolution must be >= 2, got {}",
                self.resolution
            )));
        }
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "Cloth size must be > 0, got {}",
                self.size
            )));
        }
        if !self.time_step_s.is_finite() || self.time_step_s <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "Time step must be > 0, got {}",
                self.time_step_s
            )));
        }
        Ok(())
    }
}
