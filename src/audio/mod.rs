//! Audio analysis for the visualizer.
//!
//! Combines a Web-Audio-style FFT analyser with the bass envelope follower
//! that drives sphere displacement, plus a procedural kick generator that
//! stands in for live input.

mod analyser;
mod envelope;
mod session;
mod synth;

// Re-export public types
pub use analyser::SpectrumAnalyser;
pub use envelope::BassEnvelope;
pub use session::AudioSession;
pub use synth::{KickSource, KickSynth};

/// Pull-based source of byte frequency snapshots
///
/// Bins are linearly spaced from 0 Hz up to half the sample rate, one byte
/// (0-255) of magnitude per bin.
pub trait SpectrumSource {
    /// Sample rate of the analysed signal (Hz)
    fn sample_rate(&self) -> f32;

    /// FFT size behind each snapshot
    fn fft_size(&self) -> usize;

    /// Number of bins in one snapshot
    fn frequency_bin_count(&self) -> usize {
        self.fft_size() / 2
    }

    /// Fill `out` with the current snapshot (extra entries are left untouched)
    fn byte_frequency_data(&mut self, out: &mut [u8]);
}
