//! Pairwise interaction forces and integration
//!
//! One call to [`PhysicsStep::step`] advances every particle by one
//! discretized time step. Interactions read positions as they were at the
//! start of the step, so the result does not depend on storage order.

use glam::Vec2;

use crate::constants::{BOUNCE_DAMPING, MAX_TIME_STEP, NOMINAL_FRAME_MS};
use crate::interactions::InteractionTable;
use crate::options::SimulationOptions;
use crate::particle::Particle;

/// Convert elapsed wall time into a time step in nominal frames, capped at
/// [`MAX_TIME_STEP`] so a stalled frame cannot destabilize the integration
pub fn time_step(elapsed_ms: f64) -> f32 {
    ((elapsed_ms / NOMINAL_FRAME_MS) as f32).clamp(0.0, MAX_TIME_STEP)
}

/// Shortest displacement along one axis of a torus of length `size`
#[inline]
pub fn wrap_component(delta: f32, size: f32) -> f32 {
    if delta.abs() > size * 0.5 {
        delta - delta.signum() * size
    } else {
        delta
    }
}

/// Vector from `from` to `to`, using the minimum-image convention when wrapping
#[inline]
pub fn displacement(from: Vec2, to: Vec2, options: &SimulationOptions) -> Vec2 {
    let delta = to - from;
    if options.wrap_edges {
        Vec2::new(
            wrap_component(delta.x, options.width),
            wrap_component(delta.y, options.height),
        )
    } else {
        delta
    }
}

/// Force `strength` exerts at displacement `delta`, with linear falloff to
/// zero at `radius`. Coincident points and points at or beyond the radius
/// contribute nothing.
#[inline]
pub fn interaction_force(delta: Vec2, strength: f32, radius: f32) -> Vec2 {
    let dist = delta.length();
    if dist > 0.0 && dist < radius {
        let magnitude = strength * (1.0 - dist / radius);
        delta / dist * magnitude
    } else {
        Vec2::ZERO
    }
}

/// Scale velocity by `1 - friction * dt`, then clamp its length to `max_speed`
pub fn apply_friction_and_limit_speed(
    velocity: Vec2,
    friction: f32,
    max_speed: f32,
    dt: f32,
) -> Vec2 {
    let damped = velocity * (1.0 - friction * dt);
    let speed = damped.length();
    if speed > max_speed {
        damped / speed * max_speed
    } else {
        damped
    }
}

/// Wrap a coordinate into `[0, size)`
#[inline]
fn wrap_coordinate(value: f32, size: f32) -> f32 {
    if size <= 0.0 {
        return value;
    }
    let wrapped = value.rem_euclid(size);
    // rem_euclid can round up to `size` for tiny negative inputs
    if wrapped >= size {
        0.0
    } else {
        wrapped
    }
}

/// Keep a coordinate inside the box, reflecting and damping the velocity
/// component on contact. Returns the new `(position, velocity)` pair.
#[inline]
fn bounce_coordinate(value: f32, velocity: f32, size: f32) -> (f32, f32) {
    if value < 0.0 {
        (0.0, -velocity * BOUNCE_DAMPING)
    } else if value >= size {
        ((size - 1.0).max(0.0), -velocity * BOUNCE_DAMPING)
    } else {
        (value, velocity)
    }
}

/// Integrate one particle's position and apply the boundary policy
pub fn update_position(particle: &mut Particle, options: &SimulationOptions, dt: f32) {
    let moved = particle.position + particle.velocity * dt;

    if options.wrap_edges {
        particle.position = Vec2::new(
            wrap_coordinate(moved.x, options.width),
            wrap_coordinate(moved.y, options.height),
        );
    } else {
        let (x, vx) = bounce_coordinate(moved.x, particle.velocity.x, options.width);
        let (y, vy) = bounce_coordinate(moved.y, particle.velocity.y, options.height);
        particle.position = Vec2::new(x, y);
        particle.velocity = Vec2::new(vx, vy);
    }
}

/// Reusable physics pass.
///
/// Holds scratch copies of positions and interned type indices between
/// frames so the per-frame pass does not allocate. No particle references
/// are retained.
#[derive(Debug, Default)]
pub struct PhysicsStep {
    positions: Vec<Vec2>,
    type_indices: Vec<usize>,
    table: InteractionTable,
}

impl PhysicsStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance all particles by `dt`.
    ///
    /// Order per particle: interaction accumulation, friction, speed clamp,
    /// position integration with boundary handling.
    pub fn step(&mut self, particles: &mut [Particle], options: &SimulationOptions, dt: f32) {
        self.positions.clear();
        self.positions.extend(particles.iter().map(|p| p.position));

        self.table
            .rebuild(&options.interactions, particles.iter().map(|p| p.type_id.as_str()));
        self.type_indices.clear();
        for p in particles.iter() {
            // Every id was interned by the rebuild above
            let index = self.table.index_of(&p.type_id).unwrap_or_default();
            self.type_indices.push(index);
        }

        let radius = options.interaction_radius;

        for (i, particle) in particles.iter_mut().enumerate() {
            let own_position = self.positions[i];
            let own_type = self.type_indices[i];
            let mut impulse = Vec2::ZERO;

            for (j, &other_position) in self.positions.iter().enumerate() {
                if i == j {
                    continue;
                }
                let strength = self.table.strength(own_type, self.type_indices[j]);
                if strength == 0.0 {
                    continue;
                }
                let delta = displacement(own_position, other_position, options);
                impulse += interaction_force(delta, strength, radius);
            }

            particle.velocity += impulse * dt;
            particle.velocity = apply_friction_and_limit_speed(
                particle.velocity,
                options.friction,
                options.max_speed,
                dt,
            );
            update_position(particle, options, dt);
        }
    }
}
