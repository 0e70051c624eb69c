//! Per-frame visual uniforms driven by bass strength.
//!
//! Bass warms the background (less red, more blue), drains green from the
//! sphere, speeds up the spin and scales the displacement uniform handed to
//! the deformer.

use glam::Vec3;

use crate::error::{Error, Result};
use crate::params::VisualParams;

/// Parse `#RRGGBB` (leading `#` optional) into linear `[0, 1]` channels
pub fn parse_hex_color(hex: &str) -> Result<Vec3> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(Error::InvalidConfig(format!(
            "Expected colour as #RRGGBB, got '{}'",
            hex
        )));
    }

    let channel = |range: std::ops::Range<usize>| -> Result<f32> {
        u8::from_str_radix(&digits[range], 16)
            .map(|v| v as f32 / 255.0)
            .map_err(|_| Error::InvalidConfig(format!("Invalid hex colour '{}'", hex)))
    };

    Ok(Vec3::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Uniform values for one rendered frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    /// Background clear colour (RGB, [0, 1])
    pub clear_color: Vec3,

    /// Sphere base colour (RGB, [0, 1])
    pub sphere_color: Vec3,

    /// Model rotation around Y (radians)
    pub model_spin_y: f32,

    /// Displacement strength for the vertex deformer
    pub bass_uniform: f32,

    /// Normalized direction towards the light
    pub light_dir: Vec3,
}

impl FrameUniforms {
    /// Derive the frame's uniforms from time and the current bass strength
    ///
    /// # Arguments
    /// * `time_s` - Seconds since the visualizer started
    /// * `bass` - Bass strength for this frame (read once per frame)
    /// * `params` - Colours and scaling factors
    pub fn compute(time_s: f32, bass: f32, params: &VisualParams) -> Result<Self> {
        let bg = parse_hex_color(&params.background_hex)?;
        let sphere = parse_hex_color(&params.sphere_hex)?;

        let clear_color = Vec3::new(bg.x * (1.0 - 0.5 * bass), bg.y, bg.z * (1.0 + 0.2 * bass))
            .clamp(Vec3::ZERO, Vec3::ONE);
        let sphere_color = Vec3::new(
            sphere.x,
            sphere.y * (1.0 - bass),
            sphere.z * (1.0 + 0.2 * bass),
        )
        .clamp(Vec3::ZERO, Vec3::ONE);

        Ok(Self {
            clear_color,
            sphere_color,
            model_spin_y: time_s * params.spin_speed + bass * params.bass_spin_scale,
            bass_uniform: bass * params.bass_uniform_scale,
            light_dir: params.light_direction.normalize_or_zero(),
        })
    }
}

/// Lambert shading with an ambient floor
pub fn diffuse_shade(normal: Vec3, light_dir: Vec3, color: Vec3, ambient: f32) -> Vec3 {
    let lambert = normal.normalize_or_zero().dot(light_dir).max(0.0);
    color * (ambient + (1.0 - ambient) * lambert)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        let c = parse_hex_color("#99CCFF").unwrap();
        assert!((c - Vec3::new(0.6, 0.8, 1.0)).length() < 1e-6);

        let c = parse_hex_color("ff0000").unwrap();
        assert_eq!(c, Vec3::new(1.0, 0.0, 0.0));

        assert!(parse_hex_color("#12345").is_err());
        assert!(parse_hex_color("#GG0000").is_err());
        assert!(parse_hex_color("#ééé").is_err());
    }

    #[test]
    fn test_silent_frame_uses_base_colours() {
        let params = VisualParams::default();
        let uniforms = FrameUniforms::compute(0.0, 0.0, &params).unwrap();

        assert_eq!(uniforms.clear_color, parse_hex_color(&params.background_hex).unwrap());
        assert_eq!(uniforms.sphere_color, parse_hex_color(&params.sphere_hex).unwrap());
        assert_eq!(uniforms.model_spin_y, 0.0);
        assert_eq!(uniforms.bass_uniform, 0.0);
        assert!((uniforms.light_dir.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_bass_shifts_colours() {
        let params = VisualParams::default();
        let uniforms = FrameUniforms::compute(2.0, 0.5, &params).unwrap();
        let bg = parse_hex_color(&params.background_hex).unwrap();
        let sphere = parse_hex_color(&params.sphere_hex).unwrap();

        assert!((uniforms.clear_color.x - bg.x * 0.75).abs() < 1e-6);
        assert!((uniforms.clear_color.z - (bg.z * 1.1).min(1.0)).abs() < 1e-6);
        assert!((uniforms.sphere_color.y - sphere.y * 0.5).abs() < 1e-6);
        // Baby blue is already saturated in blue
        assert_eq!(uniforms.sphere_color.z, 1.0);

        assert!((uniforms.model_spin_y - (2.0 * 0.3 + 0.5 * 0.8)).abs() < 1e-6);
        assert!((uniforms.bass_uniform - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_colours_stay_in_range() {
        let params = VisualParams::default();
        let uniforms = FrameUniforms::compute(1.0, 4.0, &params).unwrap();

        for c in [uniforms.clear_color, uniforms.sphere_color] {
            assert!(c.min_element() >= 0.0);
            assert!(c.max_element() <= 1.0);
        }
    }

    #[test]
    fn test_bad_colour_is_config_error() {
        let params = VisualParams {
            sphere_hex: "blue".to_string(),
            ..VisualParams::default()
        };
        assert!(matches!(
            FrameUniforms::compute(0.0, 0.1, &params),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_diffuse_shade() {
        let color = Vec3::new(0.6, 0.8, 1.0);

        let lit = diffuse_shade(Vec3::Z, Vec3::Z, color, 0.12);
        assert!((lit - color).length() < 1e-6);

        let back = diffuse_shade(-Vec3::Z, Vec3::Z, color, 0.12);
        assert!((back - color * 0.12).length() < 1e-6);
    }
}
