//! Simulation configuration
//!
//! [`SimulationOptions`] is a plain value re-supplied on every change. The
//! serialized form uses the camelCase keys of the exported settings files,
//! so a saved file can be read straight back into the same shape.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::interactions::InteractionMatrix;
use crate::particle::{default_particle_types, ParticleType};

/// How trails are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TrailStyle {
    /// Connected segments fading with age
    #[default]
    Line,
    /// Independent shrinking dots
    Dots,
    /// One tapered stroke with a bright head
    Comet,
}

impl TrailStyle {
    pub const ALL: [TrailStyle; 3] = [TrailStyle::Line, TrailStyle::Dots, TrailStyle::Comet];

    pub fn key(self) -> &'static str {
        match self {
            TrailStyle::Line => "line",
            TrailStyle::Dots => "dots",
            TrailStyle::Comet => "comet",
        }
    }

    /// Parse a style key. Unknown keys fall back to [`TrailStyle::Line`].
    pub fn from_key(key: &str) -> Self {
        match key {
            "dots" => TrailStyle::Dots,
            "comet" => TrailStyle::Comet,
            _ => TrailStyle::Line,
        }
    }

    pub fn next(self) -> Self {
        match self {
            TrailStyle::Line => TrailStyle::Dots,
            TrailStyle::Dots => TrailStyle::Comet,
            TrailStyle::Comet => TrailStyle::Line,
        }
    }
}

impl From<String> for TrailStyle {
    fn from(key: String) -> Self {
        TrailStyle::from_key(&key)
    }
}

impl From<TrailStyle> for String {
    fn from(style: TrailStyle) -> Self {
        style.key().to_string()
    }
}

impl fmt::Display for TrailStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Full engine configuration.
///
/// Nothing here is validated: negative radii or out-of-range matrix values
/// produce well-defined (if odd) motion, never a failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationOptions {
    pub width: f32,
    pub height: f32,
    pub particle_count: usize,
    pub particle_types: Vec<ParticleType>,
    pub interactions: InteractionMatrix,
    pub friction: f32,
    pub max_speed: f32,
    pub interaction_radius: f32,
    pub wrap_edges: bool,
    pub glow_effect: bool,
    pub show_trails: bool,
    pub trail_style: TrailStyle,
    pub trail_length: usize,
}

impl SimulationOptions {
    /// Defaults with an empty interaction matrix
    pub fn neutral() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            particle_count: DEFAULT_PARTICLE_COUNT,
            particle_types: default_particle_types(),
            interactions: InteractionMatrix::new(),
            friction: DEFAULT_FRICTION,
            max_speed: DEFAULT_MAX_SPEED,
            interaction_radius: DEFAULT_INTERACTION_RADIUS,
            wrap_edges: true,
            glow_effect: false,
            show_trails: false,
            trail_style: TrailStyle::Line,
            trail_length: DEFAULT_TRAIL_LENGTH,
        }
    }

    /// Apply every field set in `update`, leaving the rest untouched
    pub fn merge(&mut self, update: OptionsUpdate) {
        let OptionsUpdate {
            width,
            height,
            particle_count,
            particle_types,
            interactions,
            friction,
            max_speed,
            interaction_radius,
            wrap_edges,
            glow_effect,
            show_trails,
            trail_style,
            trail_length,
        } = update;

        if let Some(v) = width {
            self.width = v;
        }
        if let Some(v) = height {
            self.height = v;
        }
        if let Some(v) = particle_count {
            self.particle_count = v;
        }
        if let Some(v) = particle_types {
            self.particle_types = v;
        }
        if let Some(v) = interactions {
            self.interactions = v;
        }
        if let Some(v) = friction {
            self.friction = v;
        }
        if let Some(v) = max_speed {
            self.max_speed = v;
        }
        if let Some(v) = interaction_radius {
            self.interaction_radius = v;
        }
        if let Some(v) = wrap_edges {
            self.wrap_edges = v;
        }
        if let Some(v) = glow_effect {
            self.glow_effect = v;
        }
        if let Some(v) = show_trails {
            self.show_trails = v;
        }
        if let Some(v) = trail_style {
            self.trail_style = v;
        }
        if let Some(v) = trail_length {
            self.trail_length = v;
        }
    }
}

impl Default for SimulationOptions {
    /// Session defaults, including a freshly randomized interaction matrix
    fn default() -> Self {
        let mut options = Self::neutral();
        options.interactions = InteractionMatrix::random(&options.particle_types, &mut rand::rng());
        options
    }
}

/// Partial configuration change; `None` fields are left as they are
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptionsUpdate {
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub particle_count: Option<usize>,
    pub particle_types: Option<Vec<ParticleType>>,
    pub interactions: Option<InteractionMatrix>,
    pub friction: Option<f32>,
    pub max_speed: Option<f32>,
    pub interaction_radius: Option<f32>,
    pub wrap_edges: Option<bool>,
    pub glow_effect: Option<bool>,
    pub show_trails: Option<bool>,
    pub trail_style: Option<TrailStyle>,
    pub trail_length: Option<usize>,
}

impl OptionsUpdate {
    pub fn particle_count(count: usize) -> Self {
        Self {
            particle_count: Some(count),
            ..Default::default()
        }
    }
}
