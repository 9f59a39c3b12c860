//! Immediate-mode 2D canvas that tessellates into a [`Mesh`]
//!
//! The painter keeps a save/restore stack of affine transforms and an
//! optional shadow that turns every filled disc into a glowing one. All
//! geometry is built in local coordinates and mapped through the current
//! transform vertex by vertex.

use std::f32::consts::TAU;

use glam::{Affine2, Vec2};

use crate::color::Color;
use crate::mesh::Mesh;

/// Alpha of a glow halo at the disc edge, relative to the shadow color
const GLOW_INNER_ALPHA: f32 = 0.5;

const MIN_CIRCLE_SEGMENTS: u32 = 8;
const MAX_CIRCLE_SEGMENTS: u32 = 48;

/// Soft halo drawn behind filled discs
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    pub blur: f32,
    pub color: Color,
}

/// Two-stop linear gradient in local coordinates.
///
/// Colors are evaluated by projecting a point onto the `start -> end` axis.
/// A degenerate axis paints nothing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearGradient {
    pub start: Vec2,
    pub end: Vec2,
    pub from: Color,
    pub to: Color,
}

impl LinearGradient {
    pub fn new(start: Vec2, end: Vec2, from: Color, to: Color) -> Self {
        Self { start, end, from, to }
    }

    pub fn color_at(&self, point: Vec2) -> Color {
        let axis = self.end - self.start;
        let len_sq = axis.length_squared();
        if len_sq <= f32::EPSILON {
            return Color::TRANSPARENT;
        }
        let t = (point - self.start).dot(axis) / len_sq;
        self.from.lerp(self.to, t)
    }
}

/// What was drawn since the last [`Painter::begin_frame`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaintStats {
    pub discs: usize,
    pub glows: usize,
    pub segments: usize,
}

pub struct Painter {
    mesh: Mesh,
    transform: Affine2,
    stack: Vec<(Affine2, Option<Shadow>)>,
    shadow: Option<Shadow>,
    stats: PaintStats,
}

impl Default for Painter {
    fn default() -> Self {
        Self::new()
    }
}

impl Painter {
    pub fn new() -> Self {
        Self {
            mesh: Mesh::new(),
            transform: Affine2::IDENTITY,
            stack: Vec::new(),
            shadow: None,
            stats: PaintStats::default(),
        }
    }

    /// Drop all geometry and reset transform, shadow and stats
    pub fn begin_frame(&mut self) {
        self.mesh.clear();
        self.transform = Affine2::IDENTITY;
        self.stack.clear();
        self.shadow = None;
        self.stats = PaintStats::default();
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn stats(&self) -> PaintStats {
        self.stats
    }

    pub fn transform(&self) -> Affine2 {
        self.transform
    }

    /// Push transform and shadow state
    pub fn save(&mut self) {
        self.stack.push((self.transform, self.shadow));
    }

    /// Pop the last saved state. Unbalanced restores are ignored.
    pub fn restore(&mut self) {
        if let Some((transform, shadow)) = self.stack.pop() {
            self.transform = transform;
            self.shadow = shadow;
        }
    }

    pub fn translate(&mut self, offset: Vec2) {
        self.transform = self.transform * Affine2::from_translation(offset);
    }

    /// Apply an extra transform on top of the current one
    pub fn concat(&mut self, transform: Affine2) {
        self.transform = self.transform * transform;
    }

    pub fn set_shadow(&mut self, shadow: Option<Shadow>) {
        self.shadow = shadow.filter(|s| s.blur > 0.0 && s.color.a > 0.0);
    }

    fn map(&self, local: Vec2) -> [f32; 2] {
        self.transform.transform_point2(local).to_array()
    }

    fn circle_segments(&self, radius: f32) -> u32 {
        let screen_radius = radius * self.transform.matrix2.x_axis.length();
        ((screen_radius * 2.0).ceil() as u32).clamp(MIN_CIRCLE_SEGMENTS, MAX_CIRCLE_SEGMENTS)
    }

    /// Filled disc as a triangle fan, with a glow halo underneath when a
    /// shadow is set. Non-positive radii draw nothing.
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if radius.is_nan() || radius <= 0.0 || color.a <= 0.0 {
            return;
        }

        let segments = self.circle_segments(radius);

        if let Some(shadow) = self.shadow {
            self.add_halo(center, radius, shadow, segments);
        }

        let center_idx = self.mesh.push_vertex(self.map(center), color);
        let first = self.mesh.next_index();
        for i in 0..segments {
            let angle = i as f32 / segments as f32 * TAU;
            let p = center + Vec2::from_angle(angle) * radius;
            self.mesh.push_vertex(self.map(p), color);
        }
        for i in 0..segments {
            let a = first + i;
            let b = first + (i + 1) % segments;
            self.mesh.push_triangle(center_idx, a, b);
        }
        self.stats.discs += 1;
    }

    /// The blur is a screen-space width: it does not grow with zoom.
    fn add_halo(&mut self, center: Vec2, radius: f32, shadow: Shadow, segments: u32) {
        let inner = shadow.color.fade(GLOW_INNER_ALPHA);
        let outer = shadow.color.with_alpha(0.0);

        let first = self.mesh.next_index();
        for i in 0..segments {
            let dir = Vec2::from_angle(i as f32 / segments as f32 * TAU);
            let rim = self.transform.transform_point2(center + dir * radius);
            let out_dir = self.transform.transform_vector2(dir).normalize_or_zero();
            self.mesh.push_vertex(rim.to_array(), inner);
            self.mesh.push_vertex((rim + out_dir * shadow.blur).to_array(), outer);
        }
        for i in 0..segments {
            let j = (i + 1) % segments;
            let (in0, out0) = (first + i * 2, first + i * 2 + 1);
            let (in1, out1) = (first + j * 2, first + j * 2 + 1);
            self.mesh.push_quad(in0, out0, out1, in1);
        }
        self.stats.glows += 1;
    }

    /// Straight segment from `a` to `b` with butt caps. The color runs
    /// from `from` at `a` to `to` at `b`.
    pub fn stroke_segment(&mut self, a: Vec2, b: Vec2, width: f32, from: Color, to: Color) {
        let gradient = LinearGradient::new(a, b, from, to);
        self.stroke_segment_with(a, b, width, &gradient);
    }

    /// Polyline stroked with a gradient shared by the whole path
    pub fn stroke_path(&mut self, points: &[Vec2], width: f32, gradient: &LinearGradient) {
        for pair in points.windows(2) {
            self.stroke_segment_with(pair[0], pair[1], width, gradient);
        }
    }

    fn stroke_segment_with(&mut self, a: Vec2, b: Vec2, width: f32, gradient: &LinearGradient) {
        if width.is_nan() || width <= 0.0 {
            return;
        }
        let dir = b - a;
        let len = dir.length();
        if len <= f32::EPSILON {
            return;
        }
        let normal = Vec2::new(-dir.y, dir.x) / len * (width * 0.5);

        let corners = [a + normal, b + normal, b - normal, a - normal];
        let first = self.mesh.next_index();
        for corner in corners {
            let color = gradient.color_at(corner);
            self.mesh.push_vertex(self.map(corner), color);
        }
        self.mesh.push_quad(first, first + 1, first + 2, first + 3);
        self.stats.segments += 1;
    }
}
