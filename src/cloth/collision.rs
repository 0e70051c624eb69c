//! Collision response against the walls of the simulation box.

use glam::Vec3;

/// The box spans `[-BOX_HALF_EXTENT, BOX_HALF_EXTENT]` on every axis
pub const BOX_HALF_EXTENT: f32 = 1.0;

/// Reflect particles that left the box back inside.
///
/// Every axis and side is handled on its own: a coordinate that overshoots a
/// wall by `h` is placed `restitution * h` inside it and that velocity
/// component is negated and scaled by `restitution`. Corner hits are simply
/// several independent corrections. The pinned particle is skipped.
pub fn resolve_box_collisions(
    positions: &mut [Vec3],
    velocities: &mut [Vec3],
    restitution: f32,
    pinned: Option<usize>,
) {
    for (i, (position, velocity)) in positions
        .iter_mut()
        .zip(velocities.iter_mut())
        .enumerate()
    {
        if pinned == Some(i) {
            continue;
        }
        for axis in 0..3 {
            reflect_axis(&mut position[axis], &mut velocity[axis], restitution);
        }
    }
}

#[inline]
fn reflect_axis(p: &mut f32, v: &mut f32, restitution: f32) {
    if *p < -BOX_HALF_EXTENT {
        let h = -BOX_HALF_EXTENT - *p;
        *p = restitution * h - BOX_HALF_EXTENT;
        *v = -*v * restitution;
    }
    if *p > BOX_HALF_EXTENT {
        let h = *p - BOX_HALF_EXTENT;
        *p = BOX_HALF_EXTENT - restitution * h;
        *v = -*v * restitution;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_wall_reflection() {
        let mut positions = vec![Vec3::new(1.05, 0.0, 0.0)];
        let mut velocities = vec![Vec3::new(2.0, 0.5, 0.0)];

        resolve_box_collisions(&mut positions, &mut velocities, 0.5, None);

        assert!((positions[0].x - 0.975).abs() < 1e-6);
        assert!((velocities[0].x - -1.0).abs() < 1e-6);
        // Other axes untouched
        assert_eq!(velocities[0].y, 0.5);
    }

    #[test]
    fn test_min_wall_reflection() {
        let mut positions = vec![Vec3::new(0.0, -1.2, 0.0)];
        let mut velocities = vec![Vec3::new(0.0, -3.0, 0.0)];

        resolve_box_collisions(&mut positions, &mut velocities, 0.8, None);

        assert!((positions[0].y - (0.8 * 0.2 - 1.0)).abs() < 1e-6);
        assert!((velocities[0].y - 2.4).abs() < 1e-6);
    }

    #[test]
    fn test_corner_axes_corrected_independently() {
        let mut positions = vec![Vec3::new(1.1, -1.1, 1.2)];
        let mut velocities = vec![Vec3::new(1.0, -1.0, 1.0)];

        resolve_box_collisions(&mut positions, &mut velocities, 1.0, None);

        assert!((positions[0] - Vec3::new(0.9, -0.9, 0.8)).length() < 1e-5);
        assert_eq!(velocities[0], Vec3::new(-1.0, 1.0, -1.0));
    }

    #[test]
    fn test_inside_box_untouched() {
        let mut positions = vec![Vec3::new(0.99, -0.99, 0.0)];
        let mut velocities = vec![Vec3::ONE];

        resolve_box_collisions(&mut positions, &mut velocities, 0.3, None);

        assert_eq!(positions[0], Vec3::new(0.99, -0.99, 0.0));
        assert_eq!(velocities[0], Vec3::ONE);
    }

    #[test]
    fn test_zero_restitution_sticks_to_wall() {
        let mut positions = vec![Vec3::new(1.5, 0.0, 0.0)];
        let mut velocities = vec![Vec3::new(4.0, 0.0, 0.0)];

        resolve_box_collisions(&mut positions, &mut velocities, 0.0, None);

        assert_eq!(positions[0].x, 1.0);
        assert_eq!(velocities[0].x, 0.0);
    }

    #[test]
    fn test_pinned_particle_may_stay_outside() {
        let mut positions = vec![Vec3::new(1.5, 0.0, 0.0)];
        let mut velocities = vec![Vec3::X];

        resolve_box_collisions(&mut positions, &mut velocities, 0.5, Some(0));

        assert_eq!(positions[0].x, 1.5);
    }
}
