//! Particle Life
//!
//! Colored particles attract and repel each other according to a directed
//! type-pair matrix. Pass a settings JSON file to start from saved options.

mod config;
mod controls;
mod error;
mod gpu;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use controls::{command_for_key, zoom_factor, Command, Controls};
use error::HostError;
use glam::Vec2;
use gpu::GpuState;
use particle_simulation::ParticleLifeSimulation;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

#[derive(Parser, Debug)]
#[command(version, about = "Particle life simulation")]
struct Args {
    /// Settings JSON exported with S
    settings: Option<PathBuf>,
}

struct App {
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    simulation: ParticleLifeSimulation,
    controls: Controls,
    clock: Instant,
    last_title: Option<String>,
    error: Option<HostError>,
}

impl App {
    fn new(simulation: ParticleLifeSimulation) -> Self {
        Self {
            window: None,
            gpu_state: None,
            simulation,
            controls: Controls::default(),
            clock: Instant::now(),
            last_title: None,
            error: None,
        }
    }

    fn now_ms(&self) -> f64 {
        self.clock.elapsed().as_secs_f64() * 1000.0
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), HostError> {
        let options = self.simulation.options();
        let window_attributes = Window::default_attributes()
            .with_title("Particle Life")
            .with_inner_size(winit::dpi::LogicalSize::new(options.width, options.height));

        let window = Arc::new(event_loop.create_window(window_attributes)?);
        let gpu_state = pollster::block_on(GpuState::new(window.clone()))?;

        let size = gpu_state.size();
        self.simulation.resize(size.width as f32, size.height as f32);
        self.simulation.initialize();
        self.simulation.start(self.now_ms());

        self.window = Some(window);
        self.gpu_state = Some(gpu_state);
        Ok(())
    }

    fn update_title(&mut self) {
        let Some(window) = &self.window else {
            return;
        };
        let options = self.simulation.options();
        let inserting = options
            .particle_types
            .get(self.controls.selected_type())
            .map(|t| t.name.as_str())
            .unwrap_or("-");
        let paused = if self.simulation.is_running() { "" } else { " - paused" };
        let title = format!(
            "Particle Life - {} FPS - {} particles - adding {}{}",
            self.simulation.fps(),
            self.simulation.particles().len(),
            inserting,
            paused
        );
        if self.last_title.as_deref() == Some(title.as_str()) {
            return;
        }
        window.set_title(&title);
        self.last_title = Some(title);
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = self.now_ms();
        self.controls.update_adding(&mut self.simulation, now);
        if !self.simulation.tick(now) {
            self.simulation.render();
        }
        self.update_title();

        let Some(gpu_state) = &mut self.gpu_state else {
            return;
        };
        let clear = self.simulation.clear_color();
        match gpu_state.render(self.simulation.frame(), clear) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = gpu_state.size();
                gpu_state.resize(size);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory");
                event_loop.exit();
            }
            Err(e) => log::warn!("Dropped frame: {:?}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.create_window(event_loop) {
                log::error!("{}", e);
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => match command_for_key(key) {
                Some(Command::Quit) => event_loop.exit(),
                Some(command) => {
                    let now = self.now_ms();
                    self.controls.apply(command, &mut self.simulation, now);
                }
                None => {}
            },

            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
                if physical_size.width > 0 && physical_size.height > 0 {
                    self.simulation
                        .resize(physical_size.width as f32, physical_size.height as f32);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let cursor = Vec2::new(position.x as f32, position.y as f32);
                self.controls.cursor_moved(&mut self.simulation, cursor);
            }

            WindowEvent::MouseInput { state, button, .. } => match button {
                MouseButton::Left => self.controls.set_dragging(state == ElementState::Pressed),
                MouseButton::Right if state == ElementState::Pressed => {
                    let now = self.now_ms();
                    self.controls.start_adding(&mut self.simulation, now);
                }
                MouseButton::Right => self.controls.stop_adding(),
                MouseButton::Middle if state == ElementState::Pressed => {
                    if self.controls.pick(&self.simulation).is_none() {
                        log::debug!("No particle under the cursor");
                    }
                }
                _ => {}
            },

            WindowEvent::MouseWheel { delta, .. } => {
                if let Some(factor) = zoom_factor(delta) {
                    self.controls.zoom(&mut self.simulation, factor);
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<(), HostError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let options = config::options_or_default(args.settings.as_deref());
    let simulation = ParticleLifeSimulation::new(options);

    log::info!("Controls: Space run/pause, R reset, C reset view, T trails, Y trail style, G glow");
    log::info!("          W wrap, P palette, M new interactions, 1-9 type, +/- count");
    log::info!("          S export, Esc quit");
    log::info!("          Left drag pan, wheel zoom, right click/hold add, middle click inspect");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(simulation);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
