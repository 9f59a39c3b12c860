//! Per-frame scene rendering
//!
//! Builds one frame's geometry: trails first, then particles, under the view
//! transform. With wrapped edges the whole scene is repeated over a 3x3 grid
//! of tiles so particles crossing an edge stay visible on both sides.

use glam::Vec2;
use particle_physics::{Particle, ParticleType, SimulationOptions};

use crate::camera::Transform;
use crate::color::Color;
use crate::mesh::Mesh;
use crate::painter::{PaintStats, Painter, Shadow};
use crate::trails::draw_trails;

/// Glow halo width relative to the particle radius
pub const GLOW_BLUR_FACTOR: f32 = 2.5;

/// Discs for every particle, grouped by type in type-list order.
/// Particles of unknown types are not drawn.
pub fn draw_particles(
    painter: &mut Painter,
    particles: &[Particle],
    types: &[ParticleType],
    glow: bool,
) {
    for particle_type in types {
        let mut group = particles
            .iter()
            .filter(|p| p.type_id == particle_type.id)
            .peekable();
        if group.peek().is_none() {
            continue;
        }

        let color = Color::parse(&particle_type.color);
        painter.set_shadow(glow.then_some(Shadow {
            blur: particle_type.radius * GLOW_BLUR_FACTOR,
            color,
        }));

        for particle in group {
            painter.fill_circle(particle.position, particle_type.radius, color);
        }
    }
    painter.set_shadow(None);
}

/// Tile offsets for the wrapped-edge illusion, row by row
pub fn tile_offsets(width: f32, height: f32) -> [Vec2; 9] {
    let mut offsets = [Vec2::ZERO; 9];
    let mut i = 0;
    for dy in [-height, 0.0, height] {
        for dx in [-width, 0.0, width] {
            offsets[i] = Vec2::new(dx, dy);
            i += 1;
        }
    }
    offsets
}

/// Draws simulation frames into a reusable [`Painter`]
pub struct SceneRenderer {
    width: f32,
    height: f32,
    painter: Painter,
}

impl SceneRenderer {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            painter: Painter::new(),
        }
    }

    pub fn update_dimensions(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Color the presenter clears to before drawing the mesh
    pub fn clear_color(&self) -> Color {
        Color::background()
    }

    /// Replace the previous frame with the current particles
    pub fn render_frame(
        &mut self,
        particles: &[Particle],
        options: &SimulationOptions,
        transform: &Transform,
    ) -> &Mesh {
        let painter = &mut self.painter;
        painter.begin_frame();

        painter.save();
        painter.concat(transform.to_affine());

        let draw_scene = |painter: &mut Painter| {
            if options.show_trails {
                draw_trails(
                    painter,
                    particles,
                    &options.particle_types,
                    options.trail_style,
                    options.trail_length,
                );
            }
            draw_particles(painter, particles, &options.particle_types, options.glow_effect);
        };

        if options.wrap_edges {
            for offset in tile_offsets(self.width, self.height) {
                painter.save();
                painter.translate(offset);
                draw_scene(painter);
                painter.restore();
            }
        } else {
            draw_scene(painter);
        }

        painter.restore();
        self.painter.mesh()
    }

    /// Geometry of the last rendered frame
    pub fn mesh(&self) -> &Mesh {
        self.painter.mesh()
    }

    pub fn stats(&self) -> PaintStats {
        self.painter.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use particle_physics::{TrailPoint, TrailStyle};

    fn options(wrap: bool) -> SimulationOptions {
        SimulationOptions {
            width: 200.0,
            height: 100.0,
            wrap_edges: wrap,
            ..SimulationOptions::neutral()
        }
    }

    fn particles() -> Vec<Particle> {
        vec![
            Particle::new(0, Vec2::new(10.0, 10.0), Vec2::ZERO, "type1"),
            Particle::new(1, Vec2::new(50.0, 20.0), Vec2::ZERO, "type2"),
            Particle::new(2, Vec2::new(90.0, 30.0), Vec2::ZERO, "ghost"),
        ]
    }

    #[test]
    fn test_unknown_types_not_drawn() {
        let mut renderer = SceneRenderer::new(200.0, 100.0);
        renderer.render_frame(&particles(), &options(false), &Transform::IDENTITY);
        assert_eq!(renderer.stats().discs, 2);
        assert_eq!(renderer.stats().glows, 0);
    }

    #[test]
    fn test_wrap_draws_nine_tiles() {
        let mut renderer = SceneRenderer::new(200.0, 100.0);
        renderer.render_frame(&particles(), &options(true), &Transform::IDENTITY);
        assert_eq!(renderer.stats().discs, 18);
    }

    #[test]
    fn test_tile_offsets_cover_neighbours() {
        let offsets = tile_offsets(200.0, 100.0);
        assert!(offsets.contains(&Vec2::ZERO));
        assert!(offsets.contains(&Vec2::new(-200.0, -100.0)));
        assert!(offsets.contains(&Vec2::new(200.0, 0.0)));
        assert!(offsets.contains(&Vec2::new(0.0, 100.0)));
    }

    #[test]
    fn test_glow_per_particle() {
        let mut opts = options(false);
        opts.glow_effect = true;
        let mut renderer = SceneRenderer::new(200.0, 100.0);
        renderer.render_frame(&particles(), &opts, &Transform::IDENTITY);
        assert_eq!(renderer.stats().glows, 2);
    }

    #[test]
    fn test_transform_applied() {
        let one = vec![Particle::new(0, Vec2::new(10.0, 10.0), Vec2::ZERO, "type1")];
        let mut renderer = SceneRenderer::new(200.0, 100.0);
        let mesh = renderer.render_frame(&one, &options(false), &Transform::new(2.0, 5.0, 7.0));
        assert_eq!(mesh.vertices[0].pos, [25.0, 27.0]);
    }

    #[test]
    fn test_trails_drawn_before_particles() {
        let mut p = Particle::new(0, Vec2::new(10.0, 10.0), Vec2::ZERO, "type1");
        p.trail = vec![
            TrailPoint::new(Vec2::new(10.0, 10.0)),
            TrailPoint {
                position: Vec2::new(14.0, 10.0),
                age: 1.0,
            },
        ];
        let mut opts = options(false);
        opts.show_trails = true;
        opts.trail_style = TrailStyle::Line;

        let mut renderer = SceneRenderer::new(200.0, 100.0);
        let mesh = renderer.render_frame(&[p], &opts, &Transform::IDENTITY);
        // The trail quad comes first, its vertices are translucent
        assert!(mesh.vertices[0].color[3] < 1.0);
        assert_eq!(mesh.vertices.last().map(|v| v.color[3]), Some(1.0));
        assert_eq!(renderer.stats().segments, 1);
    }

    #[test]
    fn test_frame_replaces_previous() {
        let mut renderer = SceneRenderer::new(200.0, 100.0);
        renderer.render_frame(&particles(), &options(false), &Transform::IDENTITY);
        renderer.render_frame(&[], &options(false), &Transform::IDENTITY);
        assert!(renderer.mesh().is_empty());
    }
}
