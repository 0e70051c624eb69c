//! Mass-spring soft body / cloth simulation.
//!
//! Particles live in caller-owned parallel arrays of positions and
//! velocities; springs connect pairs of particle indices. `step` advances
//! the whole system by one semi-implicit Euler step and bounces particles
//! off the walls of the `[-1, 1]³` box.

mod collision;
mod integrator;
mod system;

// Re-export public types
pub use collision::{resolve_box_collisions, BOX_HALF_EXTENT};
pub use integrator::{accumulate_forces, integrate, step, step_with_forces};
pub use system::MassSpring;

/// Undirected spring between two particles
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    pub p0: usize,
    pub p1: usize,
    /// Undeformed length
    pub rest: f32,
}

impl Spring {
    pub fn new(p0: usize, p1: usize, rest: f32) -> Self {
        Self { p0, p1, rest }
    }
}
