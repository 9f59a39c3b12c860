//! Trail drawing in the three supported styles

use glam::Vec2;
use particle_physics::{
    Particle, ParticleType, TrailPoint, TrailStyle, TRAIL_JUMP_THRESHOLD, TRAIL_MAX_AGE,
};

use crate::color::Color;
use crate::painter::{LinearGradient, Painter};

const LINE_MAX_OPACITY: f32 = 0.6;
const DOT_MAX_OPACITY: f32 = 0.7;
const DOT_SIZE_FACTOR: f32 = 0.8;
const COMET_WIDTH_FACTOR: f32 = 1.5;
const COMET_HEAD_OPACITY: f32 = 0.8;
const COMET_HEAD_SIZE_FACTOR: f32 = 1.2;
const COMET_HEAD_DISC_OPACITY: f32 = 0.7;

/// Fraction of life left for a trail point, 1 when fresh and 0 at max age
#[inline]
fn freshness(point: &TrailPoint) -> f32 {
    1.0 - point.age / TRAIL_MAX_AGE
}

/// Connected segments, each fading from the newer point to the older one.
/// Segments longer than the jump threshold are wrap-around artifacts and skipped.
pub fn draw_line_trail(painter: &mut Painter, trail: &[TrailPoint], base: Color, radius: f32) {
    for pair in trail.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);
        if current.position.distance(next.position) > TRAIL_JUMP_THRESHOLD {
            continue;
        }

        let start_opacity = (LINE_MAX_OPACITY * freshness(current)).max(0.0);
        let end_opacity = (LINE_MAX_OPACITY * freshness(next)).max(0.0);
        let width = radius / 2.0 * freshness(current);

        painter.stroke_segment(
            current.position,
            next.position,
            width,
            base.with_alpha(start_opacity),
            base.with_alpha(end_opacity),
        );
    }
}

/// One shrinking, fading dot per recorded point
pub fn draw_dot_trail(painter: &mut Painter, trail: &[TrailPoint], base: Color, radius: f32) {
    for point in trail {
        let opacity = (DOT_MAX_OPACITY * freshness(point)).max(0.0);
        let size = radius * DOT_SIZE_FACTOR * freshness(point);
        painter.fill_circle(point.position, size, base.with_alpha(opacity));
    }
}

/// A single thick stroke fading from head to tail, plus a bright head disc
pub fn draw_comet_trail(painter: &mut Painter, trail: &[TrailPoint], base: Color, radius: f32) {
    let (Some(head), Some(tail)) = (trail.first(), trail.last()) else {
        return;
    };
    if trail.len() < 2 {
        return;
    }

    let gradient = LinearGradient::new(
        head.position,
        tail.position,
        base.with_alpha(COMET_HEAD_OPACITY),
        base.with_alpha(0.0),
    );
    let width = radius * COMET_WIDTH_FACTOR;

    // Split into sub-paths wherever the trail jumps across a wrapped edge
    let mut path: Vec<Vec2> = vec![head.position];
    for pair in trail.windows(2) {
        let (prev, current) = (pair[0].position, pair[1].position);
        if prev.distance(current) > TRAIL_JUMP_THRESHOLD {
            painter.stroke_path(&path, width, &gradient);
            path.clear();
        }
        path.push(current);
    }
    painter.stroke_path(&path, width, &gradient);

    painter.fill_circle(
        head.position,
        radius * COMET_HEAD_SIZE_FACTOR,
        base.with_alpha(COMET_HEAD_DISC_OPACITY),
    );
}

/// Trails for every particle, grouped by type in type-list order.
///
/// Particles with fewer than two points are skipped and only the newest
/// `trail_length` points are drawn.
pub fn draw_trails(
    painter: &mut Painter,
    particles: &[Particle],
    types: &[ParticleType],
    style: TrailStyle,
    trail_length: usize,
) {
    for particle_type in types {
        let [r, g, b] = Color::parse(&particle_type.color).to_rgb8();
        let base = Color::from_rgba8(r, g, b, 255);

        for particle in particles.iter().filter(|p| p.type_id == particle_type.id) {
            if particle.trail.len() < 2 {
                continue;
            }
            let visible = &particle.trail[..particle.trail.len().min(trail_length)];

            match style {
                TrailStyle::Line => draw_line_trail(painter, visible, base, particle_type.radius),
                TrailStyle::Dots => draw_dot_trail(painter, visible, base, particle_type.radius),
                TrailStyle::Comet => draw_comet_trail(painter, visible, base, particle_type.radius),
            }
        }
    }
}
