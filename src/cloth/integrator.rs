//! Force accumulation and semi-implicit Euler integration.

use glam::Vec3;

use super::collision::resolve_box_collisions;
use super::Spring;
use crate::error::{Error, Result};
use crate::params::SpringParams;

/// Advance the particle system by one timestep.
///
/// Gravity, Hookean springs and axial damping are summed per particle,
/// velocities then positions are integrated (skipping `pinned`), and
/// particles that left the box are reflected back with `restitution`.
///
/// # Arguments
/// * `positions` / `velocities` - Parallel particle arrays, mutated in place
/// * `springs` - Constraints between particle indices
/// * `params` - Stiffness, damping, mass, gravity, restitution
/// * `dt` - Timestep in seconds (finite, >= 0)
/// * `pinned` - Particle left untouched this step (e.g. held by a drag)
///
/// Everything is validated before the first write, so an error leaves the
/// arrays unchanged.
pub fn step(
    positions: &mut [Vec3],
    velocities: &mut [Vec3],
    springs: &[Spring],
    params: &SpringParams,
    dt: f32,
    pinned: Option<usize>,
) -> Result<()> {
    let mut forces = Vec::with_capacity(positions.len());
    step_with_forces(positions, velocities, springs, params, dt, pinned, &mut forces)
}

/// [`step`] with a caller-owned force buffer, reused across steps
pub fn step_with_forces(
    positions: &mut [Vec3],
    velocities: &mut [Vec3],
    springs: &[Spring],
    params: &SpringParams,
    dt: f32,
    pinned: Option<usize>,
    forces: &mut Vec<Vec3>,
) -> Result<()> {
    validate_step(positions, velocities, params, dt)?;

    accumulate_forces(positions, velocities, springs, params, forces)?;
    integrate(positions, velocities, forces, params.particle_mass, dt, pinned);
    resolve_box_collisions(positions, velocities, params.restitution, pinned);
    Ok(())
}

/// Total force on every particle, written into `forces` (resized to fit).
///
/// Spring endpoints are checked against the particle count before anything
/// is summed.
pub fn accumulate_forces(
    positions: &[Vec3],
    velocities: &[Vec3],
    springs: &[Spring],
    params: &SpringParams,
    forces: &mut Vec<Vec3>,
) -> Result<()> {
    if positions.len() != velocities.len() {
        return Err(Error::InvalidInput(format!(
            "{} positions but {} velocities",
            positions.len(),
            velocities.len()
        )));
    }
    check_spring_indices(springs, positions.len())?;

    forces.clear();
    forces.resize(positions.len(), params.gravity * params.particle_mass);

    for spring in springs {
        let (i, j) = (spring.p0, spring.p1);
        let delta = positions[i] - positions[j];
        // Coincident endpoints give a zero axis and therefore no force
        let d = delta.normalize_or_zero();
        let l = delta.length();

        let spring_force = d * (params.stiffness * (spring.rest - l));
        forces[i] += spring_force;
        forces[j] -= spring_force;

        let relative = velocities[i] - velocities[j];
        forces[i] += d * (-params.damping * relative.dot(d));
        forces[j] += d * (-params.damping * (-relative).dot(d));
    }

    Ok(())
}

/// Semi-implicit Euler: velocity from force first, then position from the
/// new velocity. The pinned particle is skipped.
pub fn integrate(
    positions: &mut [Vec3],
    velocities: &mut [Vec3],
    forces: &[Vec3],
    particle_mass: f32,
    dt: f32,
    pinned: Option<usize>,
) {
    for (i, ((position, velocity), force)) in positions
        .iter_mut()
        .zip(velocities.iter_mut())
        .zip(forces)
        .enumerate()
    {
        if pinned == Some(i) {
            continue;
        }
        let acceleration = *force / particle_mass;
        *velocity += acceleration * dt;
        *position += *velocity * dt;
    }
}

fn validate_step(
    positions: &[Vec3],
    velocities: &[Vec3],
    params: &SpringParams,
    dt: f32,
) -> Result<()> {
    if !dt.is_finite() || dt < 0.0 {
        return Err(Error::InvalidInput(format!(
            "timestep must be finite and >= 0, got {dt}"
        )));
    }
    if !params.particle_mass.is_finite() || params.particle_mass <= 0.0 {
        return Err(Error::InvalidInput(format!(
            "particle mass must be finite and > 0, got {}",
            params.particle_mass
        )));
    }
    if positions.len() != velocities.len() {
        return Err(Error::InvalidInput(format!(
            "{} positions but {} velocities",
            positions.len(),
            velocities.len()
        )));
    }
    Ok(())
}

fn check_spring_indices(springs: &[Spring], len: usize) -> Result<()> {
    for spring in springs {
        for index in [spring.p0, spring.p1] {
            if index >= len {
                return Err(Error::IndexOutOfRange { index, len });
            }
        }
    }
    Ok(())
}
