//! Particle construction

use glam::Vec2;
use rand::Rng;

use crate::constants::{DEFAULT_TYPE_ID, RANDOM_VELOCITY_HALF_RANGE};
use crate::options::SimulationOptions;
use crate::particle::{NewParticle, Particle};

fn random_velocity<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    Vec2::new(
        (rng.random::<f32>() - 0.5) * 2.0 * RANDOM_VELOCITY_HALF_RANGE,
        (rng.random::<f32>() - 0.5) * 2.0 * RANDOM_VELOCITY_HALF_RANGE,
    )
}

/// Builds particles with caller-assigned ids
pub struct ParticleFactory;

impl ParticleFactory {
    /// Uniformly random type, position inside the field and a small random
    /// velocity. Falls back to [`DEFAULT_TYPE_ID`] when no types are configured.
    pub fn create_random<R: Rng + ?Sized>(
        options: &SimulationOptions,
        id: u64,
        rng: &mut R,
    ) -> Particle {
        let type_id = if options.particle_types.is_empty() {
            DEFAULT_TYPE_ID.to_string()
        } else {
            options.particle_types[rng.random_range(0..options.particle_types.len())]
                .id
                .clone()
        };

        let position = Vec2::new(
            rng.random::<f32>() * options.width,
            rng.random::<f32>() * options.height,
        );
        Particle::new(id, position, random_velocity(rng), type_id)
    }

    /// Insertion request near `position`: each axis is offset by up to
    /// `jitter / 2` and the velocity is drawn like a random particle's
    pub fn scattered<R: Rng + ?Sized>(
        type_id: impl Into<String>,
        position: Vec2,
        jitter: f32,
        rng: &mut R,
    ) -> NewParticle {
        let offset = Vec2::new(
            (rng.random::<f32>() - 0.5) * jitter,
            (rng.random::<f32>() - 0.5) * jitter,
        );
        NewParticle::at(type_id, position + offset).with_velocity(random_velocity(rng))
    }

    /// Particle at an explicit position. The type id is not validated.
    pub fn create(request: NewParticle, id: u64) -> Particle {
        Particle::new(
            id,
            request.position,
            request.velocity.unwrap_or(Vec2::ZERO),
            request.type_id,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_particle_within_bounds() {
        let options = SimulationOptions::neutral();
        let mut rng = StdRng::seed_from_u64(1);
        for id in 0..200 {
            let p = ParticleFactory::create_random(&options, id, &mut rng);
            assert_eq!(p.id, id);
            assert!((0.0..options.width).contains(&p.position.x));
            assert!((0.0..options.height).contains(&p.position.y));
            assert!(p.velocity.x.abs() <= RANDOM_VELOCITY_HALF_RANGE);
            assert!(p.velocity.y.abs() <= RANDOM_VELOCITY_HALF_RANGE);
            assert!(options.particle_types.iter().any(|t| t.id == p.type_id));
            assert!(p.trail.is_empty());
        }
    }

    #[test]
    fn test_random_particle_without_types() {
        let options = SimulationOptions {
            particle_types: Vec::new(),
            ..SimulationOptions::neutral()
        };
        let mut rng = StdRng::seed_from_u64(2);
        let p = ParticleFactory::create_random(&options, 0, &mut rng);
        assert_eq!(p.type_id, DEFAULT_TYPE_ID);
    }

    #[test]
    fn test_explicit_particle_defaults_velocity() {
        let p = ParticleFactory::create(NewParticle::at("ghost", Vec2::new(3.0, 4.0)), 9);
        assert_eq!(p.id, 9);
        assert_eq!(p.type_id, "ghost");
        assert_eq!(p.position, Vec2::new(3.0, 4.0));
        assert_eq!(p.velocity, Vec2::ZERO);

        let request = NewParticle::at("type1", Vec2::ZERO).with_velocity(Vec2::X);
        let moving = ParticleFactory::create(request, 10);
        assert_eq!(moving.velocity, Vec2::X);
    }

    #[test]
    fn test_scattered_request_stays_near_point() {
        let mut rng = StdRng::seed_from_u64(3);
        let target = Vec2::new(40.0, 60.0);
        for _ in 0..100 {
            let request = ParticleFactory::scattered("type2", target, 5.0, &mut rng);
            assert_eq!(request.type_id, "type2");
            assert!((request.position.x - target.x).abs() <= 2.5);
            assert!((request.position.y - target.y).abs() <= 2.5);
            let v = request.velocity.unwrap();
            assert!(v.x.abs() <= RANDOM_VELOCITY_HALF_RANGE);
            assert!(v.y.abs() <= RANDOM_VELOCITY_HALF_RANGE);
        }
        // No jitter keeps the exact point but still gives a velocity
        let exact = ParticleFactory::scattered("type1", target, 0.0, &mut rng);
        assert_eq!(exact.position, target);
        assert!(exact.velocity.is_some());
    }
}
