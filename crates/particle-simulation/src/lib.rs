//! # Particle Life Simulation
//!
//! Frame-by-frame driver for the particle life model: particle state and id
//! allocation, trail history, and the orchestrator tying physics and
//! rendering together.

pub mod simulation;
pub mod state;
pub mod trails;

pub use simulation::*;
pub use state::*;
pub use trails::*;
