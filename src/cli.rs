//! Command-line argument parsing.

use clap::Parser;

use crate::params::{AnalyserConfig, ClothConfig, EnvelopeParams, SphereParams};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "reactive-sphere")]
#[command(about = "Headless audio-reactive sphere and cloth simulation", long_about = None)]
pub struct Args {
    /// Number of frames to simulate
    #[arg(long, value_name = "FRAMES", default_value = "600")]
    pub frames: u32,

    /// Frame rate of the simulation loop
    #[arg(long, value_name = "FPS", default_value = "60")]
    pub fps: f32,

    /// Tempo of the synthesised kick
    #[arg(long, value_name = "BPM", default_value = "120")]
    pub bpm: f32,

    /// Cloth particles per side
    #[arg(long, value_name = "N", default_value = "10")]
    pub cloth_resolution: usize,

    /// Sphere segments and rings
    #[arg(long, value_name = "N", default_value = "64")]
    pub sphere_segments: usize,

    /// Perlin noise seed for sphere displacement
    #[arg(long, value_name = "SEED", default_value = "42")]
    pub seed: u32,

    /// Hold a cloth particle in place (index)
    #[arg(long, value_name = "INDEX")]
    pub pin: Option<usize>,

    /// Log a summary every N frames
    #[arg(long, value_name = "N", default_value = "30")]
    pub log_every: u32,

    /// Envelope attack (0..=1)
    #[arg(long, value_name = "FRACTION")]
    pub attack: Option<f32>,

    /// Envelope release (0..=1)
    #[arg(long, value_name = "FRACTION")]
    pub release: Option<f32>,

    /// Envelope gate threshold
    #[arg(long, value_name = "LEVEL")]
    pub threshold: Option<f32>,
}

impl Args {
    /// Envelope tuning with command-line overrides applied
    pub fn envelope_params(&self) -> EnvelopeParams {
        let mut params = EnvelopeParams::default();
        if let Some(attack) = self.attack {
            params.attack = attack;
        }
        if let Some(release) = self.release {
            params.release = release;
        }
        if let Some(threshold) = self.threshold {
            params.threshold = threshold;
        }
        params
    }

    pub fn cloth_config(&self) -> ClothConfig {
        ClothConfig {
            resolution: self.cloth_resolution,
            time_step_s: 1.0 / self.fps,
            ..ClothConfig::default()
        }
    }

    pub fn sphere_params(&self) -> SphereParams {
        SphereParams {
            segments: self.sphere_segments,
            rings: self.sphere_segments,
            noise_seed: self.seed,
            ..SphereParams::default()
        }
    }

    /// PCM samples synthesised per frame at the analyser's sample rate
    pub fn samples_per_frame(&self, analyser: &AnalyserConfig) -> usize {
        (analyser.sample_rate_hz / self.fps).round().max(1.0) as usize
    }
}
