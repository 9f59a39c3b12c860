//! # Particle Life Physics
//!
//! Particle and type data, the directed interaction matrix, simulation
//! options and the per-step integration that moves particles under
//! type-pair attraction and repulsion.

pub mod constants;
pub mod factory;
pub mod forces;
pub mod interactions;
pub mod options;
pub mod palette;
pub mod particle;

pub use constants::*;
pub use factory::*;
pub use forces::*;
pub use interactions::*;
pub use options::*;
pub use palette::*;
pub use particle::*;
