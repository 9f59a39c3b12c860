//! 2D view transform for pan and zoom

use glam::{Affine2, Vec2};

/// Smallest and largest zoom the view helpers allow
pub const MIN_SCALE: f32 = 0.5;
pub const MAX_SCALE: f32 = 5.0;

/// Translate-then-scale view transform.
///
/// A world point `w` lands on screen at `translation + w * scale`. Only the
/// renderer and picking read it; physics is unaffected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub scale: f32,
    pub translation: Vec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        scale: 1.0,
        translation: Vec2::ZERO,
    };

    pub fn new(scale: f32, translate_x: f32, translate_y: f32) -> Self {
        Self {
            scale,
            translation: Vec2::new(translate_x, translate_y),
        }
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        self.translation + world * self.scale
    }

    /// Inverse of [`Transform::world_to_screen`]. A zero scale maps every
    /// screen point to the untranslated origin offset.
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        if self.scale == 0.0 {
            return screen - self.translation;
        }
        (screen - self.translation) / self.scale
    }

    /// Move the view by a screen-space delta
    pub fn pan(&mut self, delta: Vec2) {
        self.translation += delta;
    }

    /// Multiply the scale by `factor` (clamped to [`MIN_SCALE`, `MAX_SCALE`])
    /// keeping the world point under `screen_point` fixed
    pub fn zoom_at(&mut self, screen_point: Vec2, factor: f32) {
        let new_scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        if self.scale != 0.0 {
            let ratio = new_scale / self.scale;
            self.translation = screen_point - (screen_point - self.translation) * ratio;
        }
        self.scale = new_scale;
    }

    pub fn to_affine(&self) -> Affine2 {
        Affine2::from_translation(self.translation) * Affine2::from_scale(Vec2::splat(self.scale))
    }
}
