//! Trail history bookkeeping

use particle_physics::{Particle, TrailPoint, MIN_TRAIL_DISTANCE, TRAIL_MAX_AGE, TRAIL_MAX_LENGTH};

/// Record, age and prune one particle's trail.
///
/// Called before the particle moves, so the sampled point is its position
/// at the start of the step.
pub fn update_trail(particle: &mut Particle, show_trails: bool, dt: f32, trail_length: usize) {
    if !show_trails {
        particle.trail.clear();
        return;
    }

    let moved_enough = particle
        .trail
        .first()
        .is_none_or(|newest| newest.position.distance(particle.position) > MIN_TRAIL_DISTANCE);
    if moved_enough {
        particle.trail.insert(0, TrailPoint::new(particle.position));
    }

    particle.trail.truncate(trail_length.min(TRAIL_MAX_LENGTH));

    for point in &mut particle.trail {
        point.age += dt;
    }
    particle.trail.retain(|point| point.age < TRAIL_MAX_AGE);
}

/// Applies [`update_trail`] to a whole particle set
#[derive(Debug, Default, Clone, Copy)]
pub struct TrailTracker;

impl TrailTracker {
    pub fn update(
        &self,
        particles: &mut [Particle],
        show_trails: bool,
        dt: f32,
        trail_length: usize,
    ) {
        for particle in particles {
            update_trail(particle, show_trails, dt, trail_length);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn moving_particle() -> Particle {
        Particle::new(0, Vec2::new(10.0, 10.0), Vec2::new(3.0, 0.0), "type1")
    }

    #[test]
    fn test_first_sample_is_recorded() {
        let mut p = moving_particle();
        update_trail(&mut p, true, 1.0, 10);
        assert_eq!(p.trail.len(), 1);
        assert_eq!(p.trail[0].position, Vec2::new(10.0, 10.0));
        assert_eq!(p.trail[0].age, 1.0);
    }

    #[test]
    fn test_small_moves_are_not_recorded() {
        let mut p = moving_particle();
        update_trail(&mut p, true, 1.0, 10);
        p.position.x += 1.5;
        update_trail(&mut p, true, 1.0, 10);
        assert_eq!(p.trail.len(), 1);
        assert_eq!(p.trail[0].age, 2.0);
    }

    #[test]
    fn test_length_is_capped() {
        let mut p = moving_particle();
        for _ in 0..30 {
            update_trail(&mut p, true, 0.1, 5);
            p.position.x += 3.0;
        }
        assert_eq!(p.trail.len(), 5);
        // Newest first
        assert!(p.trail[0].position.x > p.trail[1].position.x);

        for _ in 0..40 {
            update_trail(&mut p, true, 0.1, 50);
            p.position.x += 3.0;
        }
        assert_eq!(p.trail.len(), TRAIL_MAX_LENGTH);
    }

    #[test]
    fn test_old_points_are_evicted() {
        let mut p = moving_particle();
        update_trail(&mut p, true, 2.0, 10);
        for _ in 0..7 {
            update_trail(&mut p, true, 2.0, 10);
        }
        // Stationary particle: one point, aged 16 > max age
        assert!(p.trail.is_empty());
    }

    #[test]
    fn test_disabled_clears() {
        let mut p = moving_particle();
        update_trail(&mut p, true, 1.0, 10);
        update_trail(&mut p, false, 1.0, 10);
        assert!(p.trail.is_empty());
    }

    #[test]
    fn test_tracker_updates_all() {
        let mut particles = vec![moving_particle(), moving_particle()];
        TrailTracker.update(&mut particles, true, 1.0, 10);
        assert!(particles.iter().all(|p| p.trail.len() == 1));
    }
}
