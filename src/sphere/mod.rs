//! Audio-reactive sphere: UV-sphere mesh and Perlin noise displacement.

mod deform;
mod mesh;

// Re-export public types
pub use deform::SphereDeformer;
pub use mesh::{SphereMesh, Vertex};
