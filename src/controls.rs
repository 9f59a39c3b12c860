//! Keyboard and mouse bindings

use std::path::PathBuf;

use glam::Vec2;
use particle_physics::{color_palettes, OptionsUpdate, Particle, DEFAULT_TYPE_ID};
use particle_renderer::Transform;
use particle_simulation::{ParticleLifeSimulation, DEFAULT_PICK_RADIUS};
use winit::event::MouseScrollDelta;
use winit::keyboard::KeyCode;

use crate::config::{export_options, EXPORT_FILE_NAME};

/// Particles added or removed by one +/- press
pub const COUNT_STEP: i64 = 50;
pub const ZOOM_IN_FACTOR: f32 = 1.1;
pub const ZOOM_OUT_FACTOR: f32 = 0.9;
/// Delay between insertions while the right button is held
pub const SPAWN_INTERVAL_MS: f64 = 50.0;
/// World-space spread of particles inserted while the button is held
pub const SPAWN_JITTER: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ToggleRunning,
    Reset,
    ResetView,
    ToggleTrails,
    CycleTrailStyle,
    ToggleGlow,
    ToggleWrap,
    CyclePalette,
    RandomizeInteractions,
    /// Zero-based index into the particle types
    SelectType(usize),
    AdjustCount(i64),
    ExportSettings,
    Quit,
}

pub fn command_for_key(key: KeyCode) -> Option<Command> {
    let command = match key {
        KeyCode::Space => Command::ToggleRunning,
        KeyCode::KeyR => Command::Reset,
        KeyCode::KeyC => Command::ResetView,
        KeyCode::KeyT => Command::ToggleTrails,
        KeyCode::KeyY => Command::CycleTrailStyle,
        KeyCode::KeyG => Command::ToggleGlow,
        KeyCode::KeyW => Command::ToggleWrap,
        KeyCode::KeyP => Command::CyclePalette,
        KeyCode::KeyM => Command::RandomizeInteractions,
        KeyCode::KeyS => Command::ExportSettings,
        KeyCode::Escape => Command::Quit,
        KeyCode::Equal | KeyCode::NumpadAdd => Command::AdjustCount(COUNT_STEP),
        KeyCode::Minus | KeyCode::NumpadSubtract => Command::AdjustCount(-COUNT_STEP),
        KeyCode::Digit1 | KeyCode::Numpad1 => Command::SelectType(0),
        KeyCode::Digit2 | KeyCode::Numpad2 => Command::SelectType(1),
        KeyCode::Digit3 | KeyCode::Numpad3 => Command::SelectType(2),
        KeyCode::Digit4 | KeyCode::Numpad4 => Command::SelectType(3),
        KeyCode::Digit5 | KeyCode::Numpad5 => Command::SelectType(4),
        KeyCode::Digit6 | KeyCode::Numpad6 => Command::SelectType(5),
        KeyCode::Digit7 | KeyCode::Numpad7 => Command::SelectType(6),
        KeyCode::Digit8 | KeyCode::Numpad8 => Command::SelectType(7),
        KeyCode::Digit9 | KeyCode::Numpad9 => Command::SelectType(8),
        _ => return None,
    };
    Some(command)
}

/// Scrolling up zooms in, scrolling down zooms out
pub fn zoom_factor(delta: MouseScrollDelta) -> Option<f32> {
    let y = match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(pos) => pos.y as f32,
    };
    if y > 0.0 {
        Some(ZOOM_IN_FACTOR)
    } else if y < 0.0 {
        Some(ZOOM_OUT_FACTOR)
    } else {
        None
    }
}

/// Input state that persists between events
pub struct Controls {
    cursor: Vec2,
    dragging: bool,
    next_spawn_ms: Option<f64>,
    selected_type: usize,
    palette_index: usize,
    export_path: PathBuf,
}

impl Default for Controls {
    fn default() -> Self {
        Self::new(PathBuf::from(EXPORT_FILE_NAME))
    }
}

impl Controls {
    pub fn new(export_path: PathBuf) -> Self {
        Self {
            cursor: Vec2::ZERO,
            dragging: false,
            next_spawn_ms: None,
            selected_type: 0,
            palette_index: 0,
            export_path,
        }
    }

    pub fn selected_type(&self) -> usize {
        self.selected_type
    }

    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    /// Track the cursor and pan while the left button is held.
    /// Returns whether the view moved.
    pub fn cursor_moved(&mut self, sim: &mut ParticleLifeSimulation, position: Vec2) -> bool {
        let delta = position - self.cursor;
        self.cursor = position;
        if !self.dragging || delta == Vec2::ZERO {
            return false;
        }
        let mut transform = sim.transform();
        transform.pan(delta);
        sim.set_transform(transform);
        true
    }

    pub fn zoom(&self, sim: &mut ParticleLifeSimulation, factor: f32) {
        let mut transform = sim.transform();
        transform.zoom_at(self.cursor, factor);
        sim.set_transform(transform);
    }

    fn spawn_at_cursor(&self, sim: &mut ParticleLifeSimulation, jitter: f32) -> Particle {
        let world = sim.transform().screen_to_world(self.cursor);
        let type_id = sim
            .options()
            .particle_types
            .get(self.selected_type)
            .map(|t| t.id.clone())
            .unwrap_or_else(|| DEFAULT_TYPE_ID.to_string());
        sim.spawn_particle(&type_id, world, jitter)
    }

    /// Right button pressed: insert a particle of the selected type under
    /// the cursor and keep inserting until [`stop_adding`](Self::stop_adding)
    pub fn start_adding(&mut self, sim: &mut ParticleLifeSimulation, now_ms: f64) -> Particle {
        self.next_spawn_ms = Some(now_ms + SPAWN_INTERVAL_MS);
        self.spawn_at_cursor(sim, 0.0)
    }

    pub fn stop_adding(&mut self) {
        self.next_spawn_ms = None;
    }

    /// Insert at most one jittered particle if the button is held and the
    /// interval has elapsed. Returns whether a particle was added.
    pub fn update_adding(&mut self, sim: &mut ParticleLifeSimulation, now_ms: f64) -> bool {
        match self.next_spawn_ms {
            Some(due) if now_ms >= due => {
                self.spawn_at_cursor(sim, SPAWN_JITTER);
                self.next_spawn_ms = Some(now_ms + SPAWN_INTERVAL_MS);
                true
            }
            _ => false,
        }
    }

    /// Log the particle under the cursor, if any
    pub fn pick(&self, sim: &ParticleLifeSimulation) -> Option<u64> {
        let particle = sim.particle_at(self.cursor, DEFAULT_PICK_RADIUS)?;
        log::info!(
            "Particle {} ({}) at ({:.1}, {:.1}), speed {:.2}",
            particle.id,
            particle.type_id,
            particle.position.x,
            particle.position.y,
            particle.speed()
        );
        Some(particle.id)
    }

    pub fn apply(&mut self, command: Command, sim: &mut ParticleLifeSimulation, now_ms: f64) {
        match command {
            Command::ToggleRunning => {
                if sim.is_running() {
                    sim.stop();
                } else {
                    sim.start(now_ms);
                }
            }
            Command::Reset => sim.reset(),
            Command::ResetView => sim.set_transform(Transform::IDENTITY),
            Command::ToggleTrails => sim.update_options(OptionsUpdate {
                show_trails: Some(!sim.options().show_trails),
                ..Default::default()
            }),
            Command::CycleTrailStyle => {
                let style = sim.options().trail_style.next();
                log::info!("Trail style: {}", style.key());
                sim.update_options(OptionsUpdate {
                    trail_style: Some(style),
                    ..Default::default()
                });
            }
            Command::ToggleGlow => sim.update_options(OptionsUpdate {
                glow_effect: Some(!sim.options().glow_effect),
                ..Default::default()
            }),
            Command::ToggleWrap => sim.update_options(OptionsUpdate {
                wrap_edges: Some(!sim.options().wrap_edges),
                ..Default::default()
            }),
            Command::CyclePalette => {
                let palettes = color_palettes();
                self.palette_index = (self.palette_index + 1) % palettes.len();
                let palette = &palettes[self.palette_index];
                log::info!("Palette: {}", palette.name);
                sim.apply_palette(&palette.id);
            }
            Command::RandomizeInteractions => sim.randomize_interactions(),
            Command::SelectType(index) => {
                if let Some(t) = sim.options().particle_types.get(index) {
                    log::info!("Selected type '{}' for insertion", t.name);
                    self.selected_type = index;
                }
            }
            Command::AdjustCount(delta) => {
                let count = (sim.options().particle_count as i64 + delta).max(0) as usize;
                sim.update_options(OptionsUpdate::particle_count(count));
            }
            Command::ExportSettings => match export_options(sim.options(), &self.export_path) {
                Ok(()) => log::info!("Exported settings to {}", self.export_path.display()),
                Err(e) => log::error!("Could not export settings: {}", e),
            },
            // The event loop owns shutdown
            Command::Quit => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use particle_physics::{SimulationOptions, TrailStyle};

    fn sim(count: usize) -> ParticleLifeSimulation {
        let options = SimulationOptions {
            width: 400.0,
            height: 300.0,
            particle_count: count,
            ..SimulationOptions::neutral()
        };
        let mut sim = ParticleLifeSimulation::with_seed(options, 42);
        sim.initialize();
        sim
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(command_for_key(KeyCode::Space), Some(Command::ToggleRunning));
        assert_eq!(command_for_key(KeyCode::Digit3), Some(Command::SelectType(2)));
        assert_eq!(command_for_key(KeyCode::Minus), Some(Command::AdjustCount(-50)));
        assert_eq!(command_for_key(KeyCode::KeyQ), None);
    }

    #[test]
    fn test_zoom_direction() {
        assert_eq!(zoom_factor(MouseScrollDelta::LineDelta(0.0, 1.0)), Some(1.1));
        assert_eq!(zoom_factor(MouseScrollDelta::LineDelta(0.0, -2.0)), Some(0.9));
        assert_eq!(zoom_factor(MouseScrollDelta::LineDelta(0.0, 0.0)), None);
    }

    #[test]
    fn test_drag_pans_view() {
        let mut sim = sim(0);
        let mut controls = Controls::default();
        controls.cursor_moved(&mut sim, Vec2::new(10.0, 10.0));
        controls.set_dragging(true);
        assert!(controls.cursor_moved(&mut sim, Vec2::new(25.0, 5.0)));
        assert_eq!(sim.transform().translation, Vec2::new(15.0, -5.0));
        controls.set_dragging(false);
        assert!(!controls.cursor_moved(&mut sim, Vec2::new(100.0, 100.0)));
    }

    #[test]
    fn test_insert_uses_selected_type_and_inverse_transform() {
        let mut sim = sim(0);
        sim.set_transform(Transform::new(2.0, 20.0, 0.0));
        let mut controls = Controls::default();
        controls.apply(Command::SelectType(2), &mut sim, 0.0);
        controls.cursor_moved(&mut sim, Vec2::new(120.0, 60.0));

        let p = controls.start_adding(&mut sim, 0.0);
        assert_eq!(p.type_id, "type3");
        assert_eq!(p.position, Vec2::new(50.0, 30.0));
        assert_ne!(p.velocity, Vec2::ZERO);
        assert!(p.velocity.x.abs() <= 0.25 && p.velocity.y.abs() <= 0.25);
        assert_eq!(controls.pick(&sim), Some(p.id));
    }

    #[test]
    fn test_held_button_keeps_adding() {
        let mut sim = sim(0);
        let mut controls = Controls::default();
        controls.cursor_moved(&mut sim, Vec2::new(100.0, 100.0));

        controls.start_adding(&mut sim, 0.0);
        assert!(!controls.update_adding(&mut sim, 30.0));
        assert!(controls.update_adding(&mut sim, 50.0));
        assert!(!controls.update_adding(&mut sim, 60.0));
        assert!(controls.update_adding(&mut sim, 100.0));
        assert_eq!(sim.particles().len(), 3);
        for p in sim.particles() {
            assert!((p.position.x - 100.0).abs() <= SPAWN_JITTER / 2.0);
            assert!((p.position.y - 100.0).abs() <= SPAWN_JITTER / 2.0);
        }

        controls.stop_adding();
        assert!(!controls.update_adding(&mut sim, 500.0));
        assert_eq!(sim.particles().len(), 3);
    }

    #[test]
    fn test_select_out_of_range_is_ignored() {
        let mut sim = sim(0);
        let mut controls = Controls::default();
        controls.apply(Command::SelectType(8), &mut sim, 0.0);
        assert_eq!(controls.selected_type(), 0);
    }

    #[test]
    fn test_toggles_and_count() {
        let mut sim = sim(60);
        let mut controls = Controls::default();

        controls.apply(Command::ToggleRunning, &mut sim, 0.0);
        assert!(sim.is_running());
        controls.apply(Command::ToggleRunning, &mut sim, 10.0);
        assert!(!sim.is_running());

        controls.apply(Command::ToggleTrails, &mut sim, 0.0);
        assert!(sim.options().show_trails);
        controls.apply(Command::CycleTrailStyle, &mut sim, 0.0);
        assert_eq!(sim.options().trail_style, TrailStyle::Dots);
        controls.apply(Command::ToggleWrap, &mut sim, 0.0);
        assert!(!sim.options().wrap_edges);

        controls.apply(Command::AdjustCount(-COUNT_STEP), &mut sim, 0.0);
        assert_eq!(sim.particles().len(), 10);
        controls.apply(Command::AdjustCount(-COUNT_STEP), &mut sim, 0.0);
        assert_eq!(sim.particles().len(), 0);
        controls.apply(Command::AdjustCount(COUNT_STEP), &mut sim, 0.0);
        assert_eq!(sim.particles().len(), 50);
    }

    #[test]
    fn test_palette_cycles() {
        let mut sim = sim(0);
        let mut controls = Controls::default();
        controls.apply(Command::CyclePalette, &mut sim, 0.0);
        assert_eq!(sim.options().particle_types[0].color, "#ff00ff");
    }

    #[test]
    fn test_zoom_clamps() {
        let mut sim = sim(0);
        let controls = Controls::default();
        for _ in 0..40 {
            controls.zoom(&mut sim, ZOOM_IN_FACTOR);
        }
        assert_eq!(sim.transform().scale, particle_renderer::MAX_SCALE);
    }
}
