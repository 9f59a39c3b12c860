//! Tuning constants for the particle life model
//!
//! These are stylized values, not physical units. Time is measured in
//! "steps", where one step corresponds to one nominal 60 Hz frame.

/// Reference frame duration in milliseconds (60 Hz)
pub const NOMINAL_FRAME_MS: f64 = 16.67;

/// Upper bound for a single time step, in nominal frames.
/// A stalled frame never advances the simulation by more than this.
pub const MAX_TIME_STEP: f32 = 2.0;

/// Velocity retained (and inverted) when a particle bounces off a wall
pub const BOUNCE_DAMPING: f32 = 0.8;

/// Type id used by the random factory when no particle types are configured
pub const DEFAULT_TYPE_ID: &str = "type1";

/// Half-width of the uniform range for random initial velocity components
pub const RANDOM_VELOCITY_HALF_RANGE: f32 = 0.25;

/// Hard cap on the number of trail points kept per particle
pub const TRAIL_MAX_LENGTH: usize = 20;

/// Age (in steps) after which a trail point is evicted
pub const TRAIL_MAX_AGE: f32 = 15.0;

/// Minimum distance a particle must travel before a new trail point is recorded
pub const MIN_TRAIL_DISTANCE: f32 = 2.0;

/// Trail segments longer than this are treated as wrap-around jumps and not drawn
pub const TRAIL_JUMP_THRESHOLD: f32 = 50.0;

// Control panel defaults
pub const DEFAULT_PARTICLE_COUNT: usize = 300;
pub const DEFAULT_FRICTION: f32 = 0.05;
pub const DEFAULT_MAX_SPEED: f32 = 3.0;
pub const DEFAULT_INTERACTION_RADIUS: f32 = 50.0;
pub const DEFAULT_TRAIL_LENGTH: usize = 10;
pub const DEFAULT_WIDTH: f32 = 1280.0;
pub const DEFAULT_HEIGHT: f32 = 720.0;
