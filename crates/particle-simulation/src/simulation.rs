//! Simulation orchestrator
//!
//! [`ParticleLifeSimulation`] owns the particle state, the physics pass, the
//! trail tracker and the scene renderer, and exposes the lifecycle API. The
//! host drives it by calling [`ParticleLifeSimulation::tick`] once per frame.

use glam::Vec2;
use particle_physics::{
    apply_palette, time_step, InteractionMatrix, NewParticle, OptionsUpdate, Particle,
    ParticleFactory, PhysicsStep, SimulationOptions,
};
use particle_renderer::{Mesh, SceneRenderer, Transform};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::state::SimulationState;
use crate::trails::TrailTracker;

/// Default screen-space radius for [`ParticleLifeSimulation::particle_at`]
pub const DEFAULT_PICK_RADIUS: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Constructed,
    Initialized,
    Running,
    Stopped,
}

pub struct ParticleLifeSimulation {
    options: SimulationOptions,
    state: SimulationState,
    physics: PhysicsStep,
    trails: TrailTracker,
    renderer: SceneRenderer,
    rng: StdRng,
    lifecycle: LifecycleState,
    last_timestamp: f64,
}

impl ParticleLifeSimulation {
    pub fn new(options: SimulationOptions) -> Self {
        Self::with_rng(options, StdRng::from_os_rng())
    }

    /// Deterministic construction for tests and reproducible runs
    pub fn with_seed(options: SimulationOptions, seed: u64) -> Self {
        Self::with_rng(options, StdRng::seed_from_u64(seed))
    }

    fn with_rng(options: SimulationOptions, rng: StdRng) -> Self {
        let renderer = SceneRenderer::new(options.width, options.height);
        Self {
            options,
            state: SimulationState::new(),
            physics: PhysicsStep::new(),
            trails: TrailTracker,
            renderer,
            rng,
            lifecycle: LifecycleState::Constructed,
            last_timestamp: 0.0,
        }
    }

    fn populate(&mut self) {
        self.state.clear();
        for _ in 0..self.options.particle_count {
            self.add_random_particle();
        }
    }

    /// Replace all particles with `particle_count` random ones and restart ids
    pub fn initialize(&mut self) {
        self.populate();
        self.lifecycle = if self.state.is_running() {
            LifecycleState::Running
        } else {
            LifecycleState::Initialized
        };
        log::info!("Initialized simulation with {} particles", self.state.len());
    }

    /// Same as [`initialize`](Self::initialize) but keeps the run/stop state
    pub fn reset(&mut self) {
        self.populate();
        if self.lifecycle == LifecycleState::Constructed {
            self.lifecycle = LifecycleState::Initialized;
        }
        log::info!("Reset simulation with {} particles", self.state.len());
    }

    /// Begin advancing on [`tick`](Self::tick). No-op when already running.
    pub fn start(&mut self, now_ms: f64) {
        if self.state.is_running() {
            return;
        }
        self.state.set_running(true);
        self.lifecycle = LifecycleState::Running;
        self.last_timestamp = now_ms;
        log::info!("Simulation started");
    }

    pub fn stop(&mut self) {
        if self.lifecycle == LifecycleState::Stopped {
            return;
        }
        self.state.set_running(false);
        self.lifecycle = LifecycleState::Stopped;
        log::info!("Simulation stopped");
    }

    pub fn state(&self) -> LifecycleState {
        self.lifecycle
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn add_random_particle(&mut self) -> Particle {
        let id = self.state.next_id();
        let particle = ParticleFactory::create_random(&self.options, id, &mut self.rng);
        self.state.add(particle.clone());
        particle
    }

    /// Insert a particle immediately, whatever the lifecycle state
    pub fn add_particle(&mut self, request: NewParticle) -> Particle {
        let id = self.state.next_id();
        let particle = ParticleFactory::create(request, id);
        log::debug!(
            "Added particle {} of type '{}' at ({:.1}, {:.1})",
            particle.id,
            particle.type_id,
            particle.position.x,
            particle.position.y
        );
        self.state.add(particle.clone());
        particle
    }

    /// Insert a particle of `type_id` within `jitter / 2` of `position`
    /// (per axis) with a small random velocity
    pub fn spawn_particle(&mut self, type_id: &str, position: Vec2, jitter: f32) -> Particle {
        let request = ParticleFactory::scattered(type_id, position, jitter, &mut self.rng);
        self.add_particle(request)
    }

    /// Grow with random particles or truncate so exactly `count` remain
    fn adjust_count(&mut self, count: usize) {
        let live = self.state.len();
        if count > live {
            for _ in live..count {
                self.add_random_particle();
            }
        } else {
            self.state.truncate(count);
        }
        log::debug!("Adjusted particle count from {live} to {count}");
    }

    /// Merge a partial update. A changed `particle_count` adds or removes
    /// particles immediately.
    pub fn update_options(&mut self, update: OptionsUpdate) {
        let old_count = self.options.particle_count;
        log::debug!("Updating options: {update:?}");
        self.options.merge(update);
        self.after_options_changed(old_count);
    }

    /// Replace the whole configuration, with the same count handling as
    /// [`update_options`](Self::update_options)
    pub fn set_options(&mut self, options: SimulationOptions) {
        let old_count = self.options.particle_count;
        self.options = options;
        log::debug!("Replaced options");
        self.after_options_changed(old_count);
    }

    fn after_options_changed(&mut self, old_count: usize) {
        self.renderer.update_dimensions(self.options.width, self.options.height);
        if self.options.particle_count != old_count {
            self.adjust_count(self.options.particle_count);
        }
    }

    /// Recolor types from a named palette; unknown ids change nothing
    pub fn apply_palette(&mut self, palette_id: &str) {
        self.options.particle_types = apply_palette(&self.options.particle_types, palette_id);
        log::debug!("Applied color palette '{palette_id}'");
    }

    /// Draw a fresh random interaction matrix over the current types
    pub fn randomize_interactions(&mut self) {
        self.options.interactions =
            InteractionMatrix::random(&self.options.particle_types, &mut self.rng);
        log::debug!("Randomized interaction matrix");
    }

    pub fn options(&self) -> &SimulationOptions {
        &self.options
    }

    pub fn particles(&self) -> &[Particle] {
        self.state.particles()
    }

    pub fn fps(&self) -> u32 {
        self.state.fps()
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.state.set_transform(transform);
    }

    pub fn transform(&self) -> Transform {
        self.state.transform()
    }

    /// First particle in storage order within `pick_radius` of the world
    /// point under `screen_point`
    pub fn particle_at(&self, screen_point: Vec2, pick_radius: f32) -> Option<&Particle> {
        let world = self.state.transform().screen_to_world(screen_point);
        let radius_sq = pick_radius * pick_radius;
        let hit = self
            .state
            .particles()
            .iter()
            .find(|p| p.position.distance_squared(world) <= radius_sq);
        if let Some(p) = hit {
            log::debug!("Picked particle {} at ({:.1}, {:.1})", p.id, world.x, world.y);
        }
        hit
    }

    /// Run one frame if started: FPS bookkeeping, trails, physics, render.
    /// Returns whether the simulation advanced.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        if !self.state.is_running() {
            return false;
        }
        let elapsed = now_ms - self.last_timestamp;
        self.last_timestamp = now_ms;

        self.state.record_frame(now_ms);
        self.advance(elapsed);
        self.render();
        true
    }

    /// Step trails and physics by `elapsed_ms` without rendering
    pub fn advance(&mut self, elapsed_ms: f64) {
        let dt = time_step(elapsed_ms);
        let particles = self.state.particles_mut();
        self.trails
            .update(particles, self.options.show_trails, dt, self.options.trail_length);
        self.physics.step(particles, &self.options, dt);
    }

    /// Draw the current state without stepping
    pub fn render(&mut self) -> &Mesh {
        let transform = self.state.transform();
        self.renderer
            .render_frame(self.state.particles(), &self.options, &transform)
    }

    /// Surface size changed
    pub fn resize(&mut self, width: f32, height: f32) {
        self.options.width = width;
        self.options.height = height;
        self.renderer.update_dimensions(width, height);
        log::debug!("Resized simulation to {width}x{height}");
    }

    /// Geometry from the last render
    pub fn frame(&self) -> &Mesh {
        self.renderer.mesh()
    }

    pub fn clear_color(&self) -> particle_renderer::Color {
        self.renderer.clear_color()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_options(count: usize) -> SimulationOptions {
        SimulationOptions {
            width: 200.0,
            height: 200.0,
            particle_count: count,
            ..SimulationOptions::neutral()
        }
    }

    #[test]
    fn test_lifecycle_transitions() {
        let mut sim = ParticleLifeSimulation::with_seed(small_options(10), 1);
        assert_eq!(sim.state(), LifecycleState::Constructed);
        sim.initialize();
        assert_eq!(sim.state(), LifecycleState::Initialized);
        sim.start(0.0);
        assert_eq!(sim.state(), LifecycleState::Running);
        sim.stop();
        assert_eq!(sim.state(), LifecycleState::Stopped);
        sim.reset();
        assert_eq!(sim.state(), LifecycleState::Stopped);
        assert_eq!(sim.particles().len(), 10);
    }

    #[test]
    fn test_tick_requires_running() {
        let mut sim = ParticleLifeSimulation::with_seed(small_options(5), 2);
        sim.initialize();
        assert!(!sim.tick(16.0));
        sim.start(0.0);
        assert!(sim.tick(16.67));
        assert!(!sim.frame().is_empty());
        sim.stop();
        assert!(!sim.tick(33.0));
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut sim = ParticleLifeSimulation::with_seed(small_options(5), 3);
        sim.initialize();
        sim.start(100.0);
        sim.start(5000.0);
        let before: Vec<Vec2> = sim.particles().iter().map(|p| p.position).collect();
        // Second start did not restart the clock, so the step is capped rather than tiny
        sim.tick(5000.0);
        let moved = sim
            .particles()
            .iter()
            .zip(&before)
            .any(|(p, b)| p.position.distance(*b) > 0.0);
        assert!(moved);
    }

    #[test]
    fn test_reset_preserves_running() {
        let mut sim = ParticleLifeSimulation::with_seed(small_options(4), 4);
        sim.initialize();
        sim.start(0.0);
        sim.reset();
        assert!(sim.is_running());
        assert_eq!(sim.state(), LifecycleState::Running);
        let ids: Vec<u64> = sim.particles().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_pick_uses_inverse_transform() {
        let mut sim = ParticleLifeSimulation::with_seed(small_options(0), 5);
        sim.initialize();
        sim.add_particle(NewParticle::at("type1", Vec2::new(50.0, 50.0)));
        sim.set_transform(Transform::new(2.0, 10.0, 10.0));

        // World (50, 50) is at screen (110, 110)
        let hit = sim.particle_at(Vec2::new(110.0, 110.0), DEFAULT_PICK_RADIUS);
        assert_eq!(hit.map(|p| p.id), Some(0));
        // Inclusive radius in world units
        assert!(sim.particle_at(Vec2::new(120.0, 110.0), DEFAULT_PICK_RADIUS).is_some());
        assert!(sim.particle_at(Vec2::new(121.0, 110.0), DEFAULT_PICK_RADIUS).is_none());
    }

    #[test]
    fn test_add_particle_while_stopped() {
        let mut sim = ParticleLifeSimulation::with_seed(small_options(2), 6);
        sim.initialize();
        sim.stop();
        let p = sim.add_particle(NewParticle::at("type2", Vec2::new(1.0, 2.0)));
        assert_eq!(p.id, 2);
        assert_eq!(sim.particles().len(), 3);
        assert_eq!(sim.particles()[2], p);
    }

    #[test]
    fn test_spawned_particle_moves() {
        let mut sim = ParticleLifeSimulation::with_seed(small_options(0), 9);
        sim.initialize();
        let p = sim.spawn_particle("type3", Vec2::new(80.0, 80.0), 5.0);
        assert_eq!(sim.particles().len(), 1);
        assert_eq!(p.type_id, "type3");
        assert!(p.position.distance(Vec2::new(80.0, 80.0)) <= 2.5 * std::f32::consts::SQRT_2);
        assert_ne!(p.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_resize_updates_options() {
        let mut sim = ParticleLifeSimulation::with_seed(small_options(0), 7);
        sim.resize(640.0, 480.0);
        assert_eq!(sim.options().width, 640.0);
        assert_eq!(sim.options().height, 480.0);
    }

    #[test]
    fn test_apply_palette_and_randomize() {
        let mut sim = ParticleLifeSimulation::with_seed(small_options(0), 8);
        sim.apply_palette("neon");
        assert_eq!(sim.options().particle_types[0].color, "#ff00ff");
        sim.randomize_interactions();
        assert_eq!(sim.options().interactions.len(), 16);
    }
}
