//! Parameter definitions with physical units and documented semantics.
//!
//! All tuning constants of the visualizer and the cloth simulation live here:
//! - Physical units (seconds, Hz, decibels, kilograms, ...)
//! - Documented ranges and meanings
//! - `validate()` on every struct that feeds a kernel

mod audio;
mod cloth;
mod sphere;

// Re-export all types
pub use audio::{AnalyserConfig, EnvelopeParams};
pub use cloth::{ClothConfig, SpringParams};
pub use sphere::{SphereParams, VisualParams};
