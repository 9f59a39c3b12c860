//! Mutable simulation state: particles, id allocation, run flag, view and FPS

use particle_physics::Particle;
use particle_renderer::Transform;

/// Length of one FPS measurement window
pub const FPS_WINDOW_MS: f64 = 1000.0;

/// Rolling frames-per-second estimate.
///
/// The first recorded frame opens a window; the visible estimate is only
/// refreshed once a window of at least [`FPS_WINDOW_MS`] has elapsed.
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    window_start: Option<f64>,
    frames: u32,
    fps: u32,
}

impl FpsCounter {
    pub fn record_frame(&mut self, timestamp_ms: f64) {
        let Some(start) = self.window_start else {
            self.window_start = Some(timestamp_ms);
            return;
        };

        self.frames += 1;
        let elapsed = timestamp_ms - start;
        if elapsed >= FPS_WINDOW_MS {
            self.fps = (self.frames as f64 * 1000.0 / elapsed).round() as u32;
            self.frames = 0;
            self.window_start = Some(timestamp_ms);
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

/// Exclusive owner of the particle collection and the id counter
#[derive(Debug, Default)]
pub struct SimulationState {
    particles: Vec<Particle>,
    next_id: u64,
    running: bool,
    transform: Transform,
    fps: FpsCounter,
}

impl SimulationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn add(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Swap in a whole new collection. The id counter is untouched.
    pub fn replace(&mut self, particles: Vec<Particle>) {
        self.particles = particles;
    }

    /// Keep the first `len` particles
    pub fn truncate(&mut self, len: usize) {
        self.particles.truncate(len);
    }

    /// Return the next id and advance the counter
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Remove all particles and restart ids from zero
    pub fn clear(&mut self) {
        self.particles.clear();
        self.next_id = 0;
    }

    pub fn record_frame(&mut self, timestamp_ms: f64) {
        self.fps.record_frame(timestamp_ms);
    }

    pub fn fps(&self) -> u32 {
        self.fps.fps()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_ids_increment_until_clear() {
        let mut state = SimulationState::new();
        assert_eq!(state.next_id(), 0);
        assert_eq!(state.next_id(), 1);
        state.add(Particle::new(1, Vec2::ZERO, Vec2::ZERO, "type1"));
        state.clear();
        assert!(state.is_empty());
        assert_eq!(state.next_id(), 0);
    }

    #[test]
    fn test_replace_keeps_counter() {
        let mut state = SimulationState::new();
        state.next_id();
        state.next_id();
        state.replace(vec![Particle::new(7, Vec2::ZERO, Vec2::ZERO, "type1")]);
        assert_eq!(state.len(), 1);
        assert_eq!(state.next_id(), 2);
    }

    #[test]
    fn test_truncate_keeps_prefix() {
        let mut state = SimulationState::new();
        for _ in 0..5 {
            let id = state.next_id();
            state.add(Particle::new(id, Vec2::splat(id as f32), Vec2::ZERO, "type1"));
        }
        state.truncate(2);
        let ids: Vec<u64> = state.particles().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![0, 1]);
        state.truncate(10);
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn test_fps_updates_once_per_window() {
        let mut fps = FpsCounter::default();
        fps.record_frame(5000.0);
        for i in 1..=59 {
            fps.record_frame(5000.0 + i as f64 * 16.0);
            assert_eq!(fps.fps(), 0);
        }
        fps.record_frame(6000.0);
        assert_eq!(fps.fps(), 60);

        // Nothing changes mid-window
        fps.record_frame(6500.0);
        assert_eq!(fps.fps(), 60);
        fps.record_frame(7000.0);
        assert_eq!(fps.fps(), 2);
    }

    #[test]
    fn test_transform_last_write_wins() {
        let mut state = SimulationState::new();
        state.set_transform(Transform::new(2.0, 1.0, 1.0));
        state.set_transform(Transform::new(3.0, 0.0, -4.0));
        assert_eq!(state.transform(), Transform::new(3.0, 0.0, -4.0));
    }
}
