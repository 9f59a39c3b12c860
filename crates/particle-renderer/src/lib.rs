//! # Particle Renderer
//!
//! Turns a particle snapshot into one frame of 2D geometry (trails, discs,
//! glow halos) and presents that geometry with wgpu.

pub mod camera;
pub mod color;
pub mod mesh;
pub mod painter;
pub mod presenter;
pub mod renderer;
pub mod trails;
pub mod vertex;

pub use camera::*;
pub use color::*;
pub use mesh::*;
pub use painter::*;
pub use presenter::*;
pub use renderer::*;
pub use trails::*;
pub use vertex::*;
