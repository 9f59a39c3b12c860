//! Particle, particle type and trail data

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A named category of particle.
///
/// Types participate in the interaction matrix by their `id`. The `mass`
/// field is carried along for completeness but does not scale forces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleType {
    pub id: String,
    pub name: String,
    /// CSS color text (`#rrggbb`, `#rgb`, `rgb(..)` or `rgba(..)`)
    pub color: String,
    /// Render radius in simulation units
    pub radius: f32,
    pub mass: f32,
}

impl ParticleType {
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
            radius: 3.0,
            mass: 1.0,
        }
    }
}

/// The four types a fresh session starts with
pub fn default_particle_types() -> Vec<ParticleType> {
    vec![
        ParticleType::new("type1", "Alpha", "#3b82f6"),
        ParticleType::new("type2", "Beta", "#ef4444"),
        ParticleType::new("type3", "Gamma", "#10b981"),
        ParticleType::new("type4", "Delta", "#f59e0b"),
    ]
}

/// Find a type by id. Unknown ids yield `None` and the particle is inert.
pub fn find_type<'a>(types: &'a [ParticleType], id: &str) -> Option<&'a ParticleType> {
    types.iter().find(|t| t.id == id)
}

/// A recorded past position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub position: Vec2,
    /// Accumulated time steps since the point was recorded
    pub age: f32,
}

impl TrailPoint {
    pub fn new(position: Vec2) -> Self {
        Self { position, age: 0.0 }
    }
}

/// A simulated point mass
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: u64,
    pub position: Vec2,
    pub velocity: Vec2,
    pub type_id: String,
    /// Newest first
    pub trail: Vec<TrailPoint>,
}

impl Particle {
    pub fn new(id: u64, position: Vec2, velocity: Vec2, type_id: impl Into<String>) -> Self {
        Self {
            id,
            position,
            velocity,
            type_id: type_id.into(),
            trail: Vec::new(),
        }
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

/// Explicit placement request for a single particle
#[derive(Debug, Clone, PartialEq)]
pub struct NewParticle {
    pub type_id: String,
    pub position: Vec2,
    /// Defaults to zero on each axis
    pub velocity: Option<Vec2>,
}

impl NewParticle {
    pub fn at(type_id: impl Into<String>, position: Vec2) -> Self {
        Self {
            type_id: type_id.into(),
            position,
            velocity: None,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = Some(velocity);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_types() {
        let types = default_particle_types();
        assert_eq!(types.len(), 4);
        assert_eq!(types[0].id, "type1");
        assert_eq!(types[3].name, "Delta");
        assert!(types.iter().all(|t| t.radius > 0.0));
    }

    #[test]
    fn test_find_type_unknown_is_none() {
        let types = default_particle_types();
        assert!(find_type(&types, "type2").is_some());
        assert!(find_type(&types, "ghost").is_none());
    }
}
