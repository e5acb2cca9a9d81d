//! Beat-spawned particle bursts.
//!
//! Particles fly out from the spawn origin with drag, shrink and fade
//! as their life runs out, and are removed once life reaches zero.

use nannou::geom::Vec2;
use pulse_viz_api::{DrawList, Hsba};
use rand::Rng;

use crate::utils::math::{map_amp, map_clamped};

/// Starting life of every particle
pub const MAX_LIFE: f32 = 255.0;
/// Velocity multiplier applied every update
const DRAG: f32 = 0.98;
const SATURATION: f32 = 80.0;
const BRIGHTNESS: f32 = 90.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Reserved for external forces; nothing drives it yet
    pub acceleration: Vec2,
    pub life: f32,
    /// Life lost per update, 3-8
    pub decay: f32,
    pub size: f32,
    /// Base hue, 0-360
    pub hue: f32,
}

impl Particle {
    fn spawn<R: Rng + ?Sized>(rng: &mut R, origin: Vec2, bass: f32, mid: f32) -> Self {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let speed = map_amp(bass, 3.0, 15.0);

        Self {
            position: origin,
            velocity: Vec2::new(angle.cos(), angle.sin()) * speed,
            acceleration: Vec2::ZERO,
            life: MAX_LIFE,
            decay: rng.random_range(3.0..=8.0),
            size: map_amp(mid, 5.0, 20.0),
            hue: rng.random_range(0.0..360.0),
        }
    }

    fn update(&mut self) {
        self.velocity += self.acceleration;
        self.position += self.velocity;
        self.velocity *= DRAG;
        self.life -= self.decay;
    }

    pub fn is_dead(&self) -> bool {
        self.life <= 0.0
    }
}

#[derive(Clone, Debug, Default)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` particles at `origin`; speed follows bass, size follows mid
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        origin: Vec2,
        bass: f32,
        mid: f32,
        count: usize,
    ) {
        self.particles.reserve(count);
        for _ in 0..count {
            self.particles.push(Particle::spawn(rng, origin, bass, mid));
        }
    }

    pub fn update(&mut self) {
        for particle in &mut self.particles {
            particle.update();
        }
    }

    /// Drop dead particles, keeping survivors in their original order
    pub fn prune(&mut self) {
        self.particles.retain(|p| !p.is_dead());
    }

    /// Filled discs that fade and shrink with remaining life
    pub fn render(&self, hue_offset: f32, out: &mut DrawList) {
        for particle in &self.particles {
            let alpha = map_clamped(particle.life, 0.0, MAX_LIFE, 0.0, 80.0);
            let diameter = particle.size * (particle.life / MAX_LIFE).max(0.0);
            let color = Hsba::new(particle.hue + hue_offset, SATURATION, BRIGHTNESS, alpha);
            out.disc(particle.position, diameter, color);
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_viz_api::Primitive;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_spawn_ranges() {
        let mut system = ParticleSystem::new();
        system.spawn(&mut seeded(), Vec2::new(10.0, -5.0), 255.0, 0.0, 50);

        assert_eq!(system.len(), 50);
        for p in system.iter() {
            assert_eq!(p.position, Vec2::new(10.0, -5.0));
            assert!((p.velocity.length() - 15.0).abs() < 1e-3);
            assert_eq!(p.acceleration, Vec2::ZERO);
            assert_eq!(p.life, MAX_LIFE);
            assert!((3.0..=8.0).contains(&p.decay));
            assert_eq!(p.size, 5.0);
            assert!((0.0..360.0).contains(&p.hue));
        }
    }

    #[test]
    fn test_speed_follows_bass() {
        let mut system = ParticleSystem::new();
        system.spawn(&mut seeded(), Vec2::ZERO, 0.0, 255.0, 1);
        let p = system.iter().next().unwrap();
        assert!((p.velocity.length() - 3.0).abs() < 1e-3);
        assert_eq!(p.size, 20.0);
    }

    #[test]
    fn test_update_applies_drag() {
        let mut system = ParticleSystem::new();
        system.spawn(&mut seeded(), Vec2::ZERO, 255.0, 0.0, 1);
        let before = system.iter().next().unwrap().clone();

        system.update();
        let after = system.iter().next().unwrap();

        assert_eq!(after.position, before.velocity);
        assert!((after.velocity.length() - before.velocity.length() * DRAG).abs() < 1e-4);
        assert_eq!(after.life, MAX_LIFE - before.decay);
    }

    #[test]
    fn test_life_non_increasing_and_pruned_when_dead() {
        let mut system = ParticleSystem::new();
        system.spawn(&mut seeded(), Vec2::ZERO, 200.0, 100.0, 20);

        let mut previous: Vec<f32> = system.iter().map(|p| p.life).collect();
        for _ in 0..200 {
            system.update();
            let current: Vec<f32> = system.iter().map(|p| p.life).collect();
            for (before, now) in previous.iter().zip(&current) {
                assert!(now <= before);
            }

            let alive = system.iter().filter(|p| !p.is_dead()).count();
            system.prune();
            assert_eq!(system.len(), alive);
            assert!(system.iter().all(|p| p.life > 0.0));

            previous = system.iter().map(|p| p.life).collect();
        }
        // Slowest decay is 3 per update, so 86 updates empty the system
        assert!(system.is_empty());
    }

    #[test]
    fn test_prune_keeps_survivor_order() {
        let mut system = ParticleSystem::new();
        system.spawn(&mut seeded(), Vec2::ZERO, 100.0, 100.0, 6);
        for (i, p) in system.particles.iter_mut().enumerate() {
            p.life = if i % 2 == 0 { 0.0 } else { i as f32 };
        }

        system.prune();
        let lives: Vec<f32> = system.iter().map(|p| p.life).collect();
        assert_eq!(lives, vec![1.0, 3.0, 5.0]);
    }

    #[test]
    fn test_render_fades_and_shrinks() {
        let mut system = ParticleSystem::new();
        system.spawn(&mut seeded(), Vec2::ZERO, 100.0, 255.0, 1);
        system.particles[0].life = MAX_LIFE / 2.0;
        system.particles[0].hue = 350.0;

        let mut out = DrawList::new();
        system.render(20.0, &mut out);

        match out.iter().next() {
            Some(Primitive::Disc {
                diameter, color, ..
            }) => {
                assert!((diameter - 10.0).abs() < 1e-4);
                assert!((color.alpha - 40.0).abs() < 1e-4);
                assert!((color.hue - 10.0).abs() < 1e-4);
            }
            other => panic!("expected disc, got {:?}", other),
        };
    }

    #[test]
    fn test_dead_particle_renders_invisible() {
        let mut system = ParticleSystem::new();
        system.spawn(&mut seeded(), Vec2::ZERO, 100.0, 100.0, 1);
        system.particles[0].life = -2.0;

        let mut out = DrawList::new();
        system.render(0.0, &mut out);
        match out.iter().next() {
            Some(Primitive::Disc {
                diameter, color, ..
            }) => {
                assert_eq!(*diameter, 0.0);
                assert_eq!(color.alpha, 0.0);
            }
            other => panic!("expected disc, got {:?}", other),
        };
    }
}
