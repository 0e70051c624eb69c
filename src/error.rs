//! Error types shared by the envelope follower, the cloth integrator and the
//! supporting mesh/colour helpers.

use thiserror::Error;

/// Errors surfaced synchronously by the numerical kernels
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Caller supplied data the kernel cannot work with (empty spectrum,
    /// non-finite timestep, mismatched particle arrays, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A spring or triangle references a particle that does not exist
    #[error("Particle index {index} out of range for {len} particles")]
    IndexOutOfRange { index: usize, len: usize },

    /// A parameter struct failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
