//! Bass envelope follower.
//!
//! Turns a byte spectrum snapshot into a punchy scalar for vertex
//! displacement: peak detection over a bass band, asymmetric one-pole
//! smoothing (fast attack, slow release), a hard gate back to the resting
//! level, and a 2.5 power curve that exaggerates strong hits.

use crate::error::{Error, Result};
use crate::params::EnvelopeParams;

/// Exponent applied to the envelope before scaling
const PUNCH_EXPONENT: f32 = 2.5;

/// Weight of the punched envelope in the output
const PUNCH_GAIN: f32 = 0.8;

/// Stateful bass envelope follower
#[derive(Debug, Clone)]
pub struct BassEnvelope {
    params: EnvelopeParams,
    bass_level: f32,
}

impl BassEnvelope {
    /// Create an envelope resting at `params.base_level`
    pub fn new(params: EnvelopeParams) -> Result<Self> {
        params.validate()?;
        let bass_level = params.base_level;
        Ok(Self { params, bass_level })
    }

    /// Advance the envelope with one spectrum snapshot and return the
    /// displacement strength.
    ///
    /// # Arguments
    /// * `spectrum` - Byte magnitudes (0-255), one per bin, increasing frequency
    /// * `sample_rate` - Sample rate of the analysed signal (Hz)
    /// * `fft_size` - FFT size used to produce `spectrum` (bin width = rate / size)
    ///
    /// On error the envelope state is left untouched.
    pub fn update(&mut self, spectrum: &[u8], sample_rate: f32, fft_size: usize) -> Result<f32> {
        if spectrum.is_empty() {
            return Err(Error::InvalidInput("spectrum is empty".to_string()));
        }
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(Error::InvalidInput(format!(
                "sample rate must be finite and > 0, got {sample_rate}"
            )));
        }
        if fft_size == 0 {
            return Err(Error::InvalidInput("FFT size must be > 0".to_string()));
        }

        let freq_step = sample_rate / fft_size as f32;
        let norm_value = band_peak(spectrum, &self.params, freq_step) as f32 / 255.0;

        let coeff = if norm_value > self.bass_level {
            self.params.attack
        } else {
            self.params.release
        };
        self.bass_level += (norm_value - self.bass_level) * coeff;

        if self.bass_level < self.params.threshold {
            self.bass_level = self.params.base_level;
        }

        Ok(self.strength())
    }

    /// Output for the current envelope value without advancing it
    pub fn strength(&self) -> f32 {
        self.params.base_level + self.bass_level.powf(PUNCH_EXPONENT) * PUNCH_GAIN
    }

    /// Value a caller substitutes when no spectrum is available
    pub fn idle_strength(&self) -> f32 {
        self.params.base_level
    }

    /// Current smoothed envelope (before the punch curve)
    pub fn bass_level(&self) -> f32 {
        self.bass_level
    }

    pub fn params(&self) -> &EnvelopeParams {
        &self.params
    }

    /// Set the resting level; the envelope restarts from it.
    ///
    /// Non-finite values are ignored, as in every setter below.
    pub fn set_base_level(&mut self, level: f32) {
        if !level.is_finite() {
            return;
        }
        self.params.base_level = level.max(0.0);
        self.bass_level = self.params.base_level;
    }

    /// Set attack fraction (0-1)
    pub fn set_attack(&mut self, attack: f32) {
        if attack.is_finite() {
            self.params.attack = attack.clamp(0.0, 1.0);
        }
    }

    /// Set release fraction (0-1)
    pub fn set_release(&mut self, release: f32) {
        if release.is_finite() {
            self.params.release = release.clamp(0.0, 1.0);
        }
    }

    /// Set gate threshold (>= 0)
    pub fn set_threshold(&mut self, threshold: f32) {
        if threshold.is_finite() {
            self.params.threshold = threshold.max(0.0);
        }
    }

    /// Set the scanned band in Hz. An inverted band scans nothing; NaN edges
    /// are ignored.
    pub fn set_band(&mut self, min_freq_hz: f32, max_freq_hz: f32) {
        if min_freq_hz.is_nan() || max_freq_hz.is_nan() {
            return;
        }
        self.params.min_freq_hz = min_freq_hz;
        self.params.max_freq_hz = max_freq_hz;
    }

    /// Drop back to the resting level
    pub fn reset(&mut self) {
        self.bass_level = self.params.base_level;
    }
}

impl Default for BassEnvelope {
    fn default() -> Self {
        let params = EnvelopeParams::default();
        let bass_level = params.base_level;
        Self { params, bass_level }
    }
}

/// Peak byte inside the configured band, 0 when the band maps to no bins
fn band_peak(spectrum: &[u8], params: &EnvelopeParams, freq_step: f32) -> u8 {
    let last = spectrum.len() - 1;

    let min_index = (params.min_freq_hz / freq_step).floor().max(0.0) as usize;
    let max_bin = (params.max_freq_hz / freq_step).floor();
    if max_bin < 0.0 {
        return 0;
    }
    let max_index = (max_bin as usize).min(last);

    if min_index > max_index {
        return 0;
    }

    spectrum[min_index..=max_index]
        .iter()
        .copied()
        .max()
        .unwrap_or(0)
}
