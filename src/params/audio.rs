//! Audio analysis configuration and bass envelope tuning.

use std::ops::RangeInclusive;

use crate::error::{Error, Result};

/// Analyser configuration (mirrors the knobs of a Web Audio `AnalyserNode`)
#[derive(Debug, Clone)]
pub struct AnalyserConfig {
    /// Audio sample rate (Hz)
    pub sample_rate_hz: f32,

    /// FFT window size (must be power of 2, 32..=32768)
    /// 1024 -> 512 frequency bins
    pub fft_size: usize,

    /// Temporal smoothing between snapshots (0 = none, just below 1 = heavy)
    pub smoothing_time_constant: f32,

    /// Magnitude mapped to byte 0 (dBFS)
    pub min_decibels: f32,

    /// Magnitude mapped to byte 255 (dBFS)
    pub max_decibels: f32,
}

impl Default for AnalyserConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 48000.0,
            fft_size: 1024,
            smoothing_time_constant: 0.8,
            min_decibels: -100.0,
            max_decibels: -30.0,
        }
    }
}

impl AnalyserConfig {
    /// Width of one frequency bin (Hz)
    pub fn bin_width_hz(&self) -> f32 {
        self.sample_rate_hz / self.fft_size as f32
    }

    /// Number of bins in a byte snapshot (half the FFT size)
    pub fn frequency_bin_count(&self) -> usize {
        self.fft_size / 2
    }

    /// Validate configuration (FFT size must be power of 2, etc.)
    pub fn validate(&self) -> Result<()> {
        if !self.fft_size.is_power_of_two() || !(32..=32768).contains(&self.fft_size) {
            return Err(Error::InvalidConfig(format!(
                "FFT size must be a power of 2 in 32..=32768, got {}",
                self.fft_size
            )));
        }
        if !self.sample_rate_hz.is_finite() || self.sample_rate_hz <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "Sample rate must be > 0, got {}",
                self.sample_rate_hz
            )));
        }
        if !(0.0..1.0).contains(&self.smoothing_time_constant) {
            return Err(Error::InvalidConfig(format!(
                "Smoothing time constant must be in [0, 1), got {}",
                self.smoothing_time_constant
            )));
        }
        if self.min_decibels >= self.max_decibels {
            return Err(Error::InvalidConfig(format!(
                "min_decibels ({}) must be below max_decibels ({})",
                self.min_decibels, self.max_decibels
            )));
        }
        Ok(())
    }
}

/// Bass envelope follower tuning
///
/// Fast attack / slow release, gated below `threshold`.
#[derive(Debug, Clone)]
pub struct EnvelopeParams {
    /// Resting level, also the output floor when nothing is playing
    pub base_level: f32,

    /// Fraction of the gap closed per update while rising (0..=1)
    pub attack: f32,

    /// Fraction of the gap closed per update while falling (0..=1)
    pub release: f32,

    /// Envelope values below this snap back to `base_level`
    pub threshold: f32,

    /// Lower edge of the scanned band (Hz)
    pub min_freq_hz: f32,

    /// Upper edge of the scanned band (Hz)
    pub max_freq_hz: f32,
}

impl Default for EnvelopeParams {
    fn default() -> Self {
        Self {
            base_level: 0.05,
            attack: 0.12,
            release: 0.01,
            threshold: 0.1,
            min_freq_hz: 10.0,
            max_freq_hz: 200.0,
        }
    }
}

impl EnvelopeParams {
    /// Validate tuning values; `min_freq_hz > max_freq_hz` is allowed and
    /// simply scans an empty band.
    pub fn validate(&self) -> Result<()> {
        let unit: RangeInclusive<f32> = 0.0..=1.0;
        if !unit.contains(&self.attack) {
            return Err(Error::InvalidConfig(format!(
                "Attack must be in [0, 1], got {}",
                self.attack
            )));
        }
        if !unit.contains(&self.release) {
            return Err(Error::InvalidConfig(format!(
                "Release must be in [0, 1], got {}",
                self.release
            )));
        }
        if !self.base_level.is_finite() || self.base_level < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "Base level must be >= 0, got {}",
                self.base_level
            )));
        }
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "Threshold must be >= 0, got {}",
                self.threshold
            )));
        }
        if self.min_freq_hz.is_nan() || self.max_freq_hz.is_nan() {
            return Err(Error::InvalidConfig("Band edges must not be NaN".to_string()));
        }
        Ok(())
    }
}
