//! Reactive sphere library - Audio-reactive sphere and cloth simulation core
//!
//! Bass envelope following over FFT snapshots, a mass-spring cloth integrator
//! boxed in `[-1, 1]³`, and the sphere mesh/uniform helpers they drive.

pub mod audio;
pub mod cli;
pub mod cloth;
pub mod compose;
pub mod error;
pub mod params;
pub mod sphere;
pub mod visual;

pub use error::{Error, Result};
