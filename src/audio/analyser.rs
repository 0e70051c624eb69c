//! FFT spectrum analyser producing byte frequency data.
//!
//! Follows the Web Audio `AnalyserNode` pipeline so the envelope sees the
//! same numbers a browser would hand it: Blackman window over the latest
//! `fft_size` samples, magnitude scaled by `1 / fft_size`, temporal smoothing,
//! decibel conversion, and a linear map of `[min_db, max_db]` onto `0..=255`.

use std::f32::consts::PI;
use std::sync::Arc;

use log::debug;
use rustfft::{num_complex::Complex, Fft, FftPlanner};

use super::SpectrumSource;
use crate::error::Result;
use crate::params::AnalyserConfig;

/// Blackman window alpha used by Web Audio
const BLACKMAN_ALPHA: f32 = 0.16;

/// Real-time FFT spectrum analyser
pub struct SpectrumAnalyser {
    config: AnalyserConfig,
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    /// Most recent `fft_size` samples, oldest first
    time_domain: Vec<f32>,
    /// Smoothed magnitudes carried between snapshots
    smoothed: Vec<f32>,
    /// Pre-allocated FFT buffer to avoid allocation per snapshot
    fft_buffer: Vec<Complex<f32>>,
}

impl SpectrumAnalyser {
    /// Create a new analyser with a validated configuration
    pub fn new(config: AnalyserConfig) -> Result<Self> {
        config.validate()?;

        let fft_size = config.fft_size;
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(fft_size);

        debug!(
            "Analyser: {} bins @ {:.3} Hz per bin",
            config.frequency_bin_count(),
            config.bin_width_hz()
        );

        Ok(Self {
            window: blackman_window(fft_size),
            time_domain: vec![0.0; fft_size],
            smoothed: vec![0.0; config.frequency_bin_count()],
            fft_buffer: vec![Complex::new(0.0, 0.0); fft_size],
            fft,
            config,
        })
    }

    pub fn config(&self) -> &AnalyserConfig {
        &self.config
    }

    /// Append mono samples, keeping only the latest `fft_size`
    pub fn push_samples(&mut self, samples: &[f32]) {
        let size = self.time_domain.len();
        if samples.len() >= size {
            self.time_domain
                .copy_from_slice(&samples[samples.len() - size..]);
            return;
        }

        let keep = size - samples.len();
        self.time_domain.copy_within(samples.len().., 0);
        self.time_domain[keep..].copy_from_slice(samples);
    }

    /// Run the FFT over the current window and update the smoothed magnitudes
    fn analyse(&mut self) {
        for ((buf, &sample), &w) in self
            .fft_buffer
            .iter_mut()
            .zip(&self.time_domain)
            .zip(&self.window)
        {
            *buf = Complex::new(sample * w, 0.0);
        }

        self.fft.process(&mut self.fft_buffer);

        let scale = 1.0 / self.config.fft_size as f32;
        let tau = self.config.smoothing_time_constant;
        for (prev, bin) in self.smoothed.iter_mut().zip(&self.fft_buffer) {
            let magnitude = bin.norm() * scale;
            let next = tau * *prev + (1.0 - tau) * magnitude;
            // Web Audio flushes non-finite history to zero
            *prev = if next.is_finite() { next } else { 0.0 };
        }
    }

    /// Clear sample history and smoothing state
    pub fn reset(&mut self) {
        self.time_domain.fill(0.0);
        self.smoothed.fill(0.0);
    }
}

impl SpectrumSource for SpectrumAnalyser {
    fn sample_rate(&self) -> f32 {
        self.config.sample_rate_hz
    }

    fn fft_size(&self) -> usize {
        self.config.fft_size
    }

    fn byte_frequency_data(&mut self, out: &mut [u8]) {
        self.analyse();

        let min_db = self.config.min_decibels;
        let range_scale = 255.0 / (self.config.max_decibels - min_db);

        for (byte, &magnitude) in out.iter_mut().zip(&self.smoothed) {
            let db = 20.0 * magnitude.log10();
            // log10(0) is -inf, which clamps to 0 like any quiet bin
            let scaled = (range_scale * (db - min_db)).floor();
            *byte = scaled.clamp(0.0, 255.0) as u8;
        }
    }
}

/// Blackman window of length `size`
fn blackman_window(size: usize) -> Vec<f32> {
    let a0 = 0.5 * (1.0 - BLACKMAN_ALPHA);
    let a1 = 0.5;
    let a2 = 0.5 * BLACKMAN_ALPHA;
    (0..size)
        .map(|i| {
            let x = i as f32 / size as f32;
            a0 - a1 * (2.0 * PI * x).cos() + a2 * (4.0 * PI * x).cos()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyser() -> SpectrumAnalyser {
        SpectrumAnalyser::new(AnalyserConfig::default()).unwrap()
    }

    fn tone(freq_hz: f32, amplitude: f32, len: usize, sample_rate: f32) -> Vec<f32> {
        (0..len)
            .map(|i| amplitude * (2.0 * PI * freq_hz * i as f32 / sample_rate).sin())
            .collect()
    }

    #[test]
    fn test_blackman_window() {
        let w = blackman_window(1024);
        // Zero at the left edge, 1 at the centre
        assert!(w[0].abs() < 1e-6);
        assert!((w[512] - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_silence_is_all_zero() {
        let mut a = analyser();
        a.push_samples(&vec![0.0; 2048]);

        let mut out = vec![7u8; a.frequency_bin_count()];
        a.byte_frequency_data(&mut out);
        assert!(out.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_tone_peaks_in_its_bin() {
        let mut a = analyser();
        let sample_rate = a.sample_rate();
        // Exactly bin 2 (93.75 Hz at 46.875 Hz per bin)
        let samples = tone(93.75, 0.05, 1024, sample_rate);

        let mut out = vec![0u8; a.frequency_bin_count()];
        for _ in 0..20 {
            a.push_samples(&samples);
            a.byte_frequency_data(&mut out);
        }

        let (peak_bin, &peak) = out
            .iter()
            .enumerate()
            .max_by_key(|(_, &b)| b)
            .unwrap();
        assert_eq!(peak_bin, 2);
        assert!(peak > 200, "expected a loud bin, got {peak}");
        assert!(out[100] < peak);
    }

    #[test]
    fn test_smoothing_rises_gradually() {
        let mut a = analyser();
        let samples = tone(93.75, 0.05, 1024, a.sample_rate());
        a.push_samples(&samples);

        let mut first = vec![0u8; a.frequency_bin_count()];
        a.byte_frequency_data(&mut first);
        let mut second = vec![0u8; a.frequency_bin_count()];
        a.byte_frequency_data(&mut second);

        assert!(second[2] > first[2]);
    }

    #[test]
    fn test_push_keeps_latest_samples() {
        let mut a = analyser();
        let ramp: Vec<f32> = (0..1500).map(|i| i as f32).collect();
        a.push_samples(&ramp[..1000]);
        a.push_samples(&ramp[1000..]);

        assert_eq!(a.time_domain.len(), 1024);
        assert_eq!(a.time_domain[0], 476.0);
        assert_eq!(a.time_domain[1023], 1499.0);
    }
}
