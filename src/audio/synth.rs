//! Procedural kick drum used to drive the visualizer without live input.

use std::f32::consts::TAU;

use super::{SpectrumAnalyser, SpectrumSource};

/// Pitch the kick starts its sweep from (Hz)
const KICK_START_HZ: f32 = 150.0;

/// Pitch the kick settles on (Hz)
const KICK_END_HZ: f32 = 50.0;

/// Pitch sweep decay rate (1/s)
const PITCH_DECAY: f32 = 30.0;

/// Amplitude decay rate (1/s)
const AMP_DECAY: f32 = 8.0;

/// Four-on-the-floor kick generator (mono, deterministic)
#[derive(Debug, Clone)]
pub struct KickSynth {
    sample_rate: f32,
    /// Samples between kick onsets
    beat_period_samples: u64,
    amplitude: f32,
    /// Samples since the last beat
    beat_sample: u64,
    /// Oscillator phase (radians)
    phase: f32,
}

impl KickSynth {
    /// Create a kick at `bpm` beats per minute with peak `amplitude`
    pub fn new(sample_rate: f32, bpm: f32, amplitude: f32) -> Self {
        let beat_period_s = 60.0 / bpm.max(1.0);
        Self {
            sample_rate,
            beat_period_samples: (beat_period_s * sample_rate).round().max(1.0) as u64,
            amplitude,
            beat_sample: 0,
            phase: 0.0,
        }
    }

    /// Fill `out` with the next block of samples
    pub fn render(&mut self, out: &mut [f32]) {
        let dt = 1.0 / self.sample_rate;
        for sample in out.iter_mut() {
            let t = self.beat_sample as f32 * dt;
            let freq = KICK_END_HZ + (KICK_START_HZ - KICK_END_HZ) * (-t * PITCH_DECAY).exp();
            let amp = self.amplitude * (-t * AMP_DECAY).exp();

            *sample = amp * self.phase.sin();

            self.phase = (self.phase + TAU * freq * dt) % TAU;
            self.beat_sample += 1;
            if self.beat_sample >= self.beat_period_samples {
                self.beat_sample = 0;
                self.phase = 0.0;
            }
        }
    }

    /// Samples between kick onsets
    pub fn beat_period_samples(&self) -> u64 {
        self.beat_period_samples
    }

    /// Render `count` samples into a new buffer
    pub fn next_block(&mut self, count: usize) -> Vec<f32> {
        let mut block = vec![0.0; count];
        self.render(&mut block);
        block
    }
}

/// Kick synth wired into an analyser, advancing one frame of audio per
/// snapshot
pub struct KickSource {
    synth: KickSynth,
    analyser: SpectrumAnalyser,
    block: Vec<f32>,
}

impl KickSource {
    /// `samples_per_frame` PCM samples are synthesised before each snapshot
    pub fn new(synth: KickSynth, analyser: SpectrumAnalyser, samples_per_frame: usize) -> Self {
        Self {
            synth,
            analyser,
            block: vec![0.0; samples_per_frame],
        }
    }

    pub fn samples_per_frame(&self) -> usize {
        self.block.len()
    }
}

impl SpectrumSource for KickSource {
    fn sample_rate(&self) -> f32 {
        self.analyser.sample_rate()
    }

    fn fft_size(&self) -> usize {
        self.analyser.fft_size()
    }

    fn byte_frequency_data(&mut self, out: &mut [u8]) {
        self.synth.render(&mut self.block);
        self.analyser.push_samples(&self.block);
        self.analyser.byte_frequency_data(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kick_is_bounded() {
        let mut kick = KickSynth::new(48000.0, 120.0, 0.8);
        let block = kick.next_block(48000);
        assert!(block.iter().all(|s| s.abs() <= 0.8 + 1e-6));
    }

    #[test]
    fn test_kick_decays_between_beats() {
        let mut kick = KickSynth::new(48000.0, 60.0, 1.0);
        let block = kick.next_block(48000);

        let early = block[..4800].iter().fold(0.0f32, |m, s| m.max(s.abs()));
        let late = block[43200..].iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert!(early > 0.5);
        assert!(late < 0.01);
    }

    #[test]
    fn test_kick_retriggers_on_exact_sample() {
        let mut kick = KickSynth::new(48000.0, 60.0, 1.0);
        assert_eq!(kick.beat_period_samples(), 48000);

        let block = kick.next_block(3 * 48000);
        let peak = |range: std::ops::Range<usize>| {
            block[range].iter().fold(0.0f32, |m, s| m.max(s.abs()))
        };

        for beat in 1..3 {
            let onset = beat * 48000;
            // Still silent right before the onset, loud right after
            assert!(peak(onset - 100..onset) < 0.01);
            assert!(peak(onset..onset + 480) > 0.5);
        }
    }

    #[test]
    fn test_kick_is_deterministic() {
        let mut a = KickSynth::new(44100.0, 128.0, 0.5);
        let mut b = KickSynth::new(44100.0, 128.0, 0.5);
        assert_eq!(a.next_block(1000), b.next_block(1000));
    }

    #[test]
    fn test_kick_source_reports_low_band() {
        use crate::params::AnalyserConfig;

        let config = AnalyserConfig::default();
        let analyser = SpectrumAnalyser::new(config.clone()).unwrap();
        let synth = KickSynth::new(config.sample_rate_hz, 120.0, 0.05);
        let mut source = KickSource::new(synth, analyser, 800);
        let mut bins = vec![0u8; source.frequency_bin_count()];

        source.byte_frequency_data(&mut bins);

        let low = bins[..5].iter().copied().max().unwrap_or(0);
        let high = bins[200..].iter().copied().max().unwrap_or(0);
        assert!(low > 0);
        assert!(low > high);
    }
}
