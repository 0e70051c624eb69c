//! Audio session owning the spectrum source and the bass envelope.
//!
//! One session per visualizer run. Sources are attached with `open` and
//! detached with `close`; while no source is attached the session reports the
//! envelope's resting level.

use log::{info, warn};

use super::{BassEnvelope, SpectrumSource};

/// Explicit audio context for one visualizer session
pub struct AudioSession {
    source: Option<Box<dyn SpectrumSource>>,
    envelope: BassEnvelope,
    /// Reused snapshot buffer, resized when the source changes
    spectrum: Vec<u8>,
}

impl AudioSession {
    /// Create a closed session around an envelope
    pub fn new(envelope: BassEnvelope) -> Self {
        Self {
            source: None,
            envelope,
            spectrum: Vec::new(),
        }
    }

    /// Attach a source, replacing (and dropping) any previous one
    pub fn open(&mut self, source: Box<dyn SpectrumSource>) {
        if self.source.is_some() {
            info!("Audio: replacing active source");
        }

        info!(
            "Audio: source open ({} bins @ {} Hz)",
            source.frequency_bin_count(),
            source.sample_rate()
        );

        self.spectrum.clear();
        self.spectrum.resize(source.frequency_bin_count(), 0);
        self.source = Some(source);
        self.envelope.reset();
    }

    /// Detach the current source, returning it to the caller
    pub fn close(&mut self) -> Option<Box<dyn SpectrumSource>> {
        let source = self.source.take();
        if source.is_some() {
            info!("Audio: source closed");
        }
        self.spectrum.clear();
        self.envelope.reset();
        source
    }

    pub fn is_open(&self) -> bool {
        self.source.is_some()
    }

    /// Read one snapshot and advance the envelope.
    ///
    /// Call once per frame. Returns the resting level while closed or when
    /// the source hands back unusable data.
    pub fn bass_strength(&mut self) -> f32 {
        let Some(source) = self.source.as_mut() else {
            return self.envelope.idle_strength();
        };

        source.byte_frequency_data(&mut self.spectrum);

        match self
            .envelope
            .update(&self.spectrum, source.sample_rate(), source.fft_size())
        {
            Ok(strength) => strength,
            Err(e) => {
                warn!("Audio: envelope update skipped: {}", e);
                self.envelope.idle_strength()
            }
        }
    }

    /// Latest spectrum snapshot (empty while closed)
    pub fn spectrum(&self) -> &[u8] {
        &self.spectrum
    }

    pub fn envelope(&self) -> &BassEnvelope {
        &self.envelope
    }

    /// Tuning access for sliders and CLI overrides
    pub fn envelope_mut(&mut self) -> &mut BassEnvelope {
        &mut self.envelope
    }
}

impl Default for AudioSession {
    fn default() -> Self {
        Self::new(BassEnvelope::default())
    }
}
