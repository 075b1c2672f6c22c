//! Transient visual effects.
//!
//! Particles are pure decoration: spawned on discrete game events,
//! advected for a fixed lifetime, then dropped.  Nothing in the
//! simulation reads them.  The system imposes no spawn cap; callers
//! keep memory bounded by only spawning on discrete events, never per
//! frame.

use std::f32::consts::TAU;

use rand::Rng;

/// Visual family of a particle; the renderer maps each to a sprite
/// sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    /// Red burst when regular food is eaten.
    FoodBurst,
    /// White burst on a fatal collision, one per body segment.
    Collision,
    /// Rainbow burst when bonus food is eaten.
    Rainbow,
}

impl ParticleKind {
    /// Frames a particle of this kind lives.
    fn lifetime(self) -> u32 {
        match self {
            ParticleKind::FoodBurst => 30,
            ParticleKind::Collision => 45,
            ParticleKind::Rainbow => 60,
        }
    }

    /// Speed range in pixels per frame.
    fn speed_range(self) -> (f32, f32) {
        match self {
            ParticleKind::FoodBurst => (0.5, 2.5),
            ParticleKind::Collision => (0.3, 1.5),
            ParticleKind::Rainbow => (1.0, 3.0),
        }
    }
}

/// One live particle, in pixel space.
#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    vx: f32,
    vy: f32,
    /// Frames remaining; retired at zero.
    pub lifetime: u32,
    /// Frames lived so far; drives the animation frame.
    pub age: u32,
    pub kind: ParticleKind,
}

/// Owns every live particle.
#[derive(Debug, Default)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit `count` particles of `kind` at the pixel position, each
    /// with a random direction and a kind-specific speed and lifetime.
    pub fn spawn(&mut self, kind: ParticleKind, x: f32, y: f32, count: u32, rng: &mut impl Rng) {
        let (lo, hi) = kind.speed_range();
        for _ in 0..count {
            let angle = rng.gen_range(0.0..TAU);
            let speed = rng.gen_range(lo..hi);
            self.particles.push(Particle {
                x,
                y,
                vx: angle.cos() * speed,
                vy: angle.sin() * speed,
                lifetime: kind.lifetime(),
                age: 0,
                kind,
            });
        }
    }

    /// Advance every particle one frame and retire the expired.
    pub fn advance(&mut self) {
        for p in &mut self.particles {
            p.x += p.vx;
            p.y += p.vy;
            p.age += 1;
            p.lifetime -= 1;
        }
        self.particles.retain(|p| p.lifetime > 0);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Drop everything, used on life and level resets.
    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn spawn_creates_count_particles() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut ps = ParticleSystem::new();
        ps.spawn(ParticleKind::FoodBurst, 100.0, 100.0, 10, &mut rng);
        assert_eq!(ps.len(), 10);
    }

    #[test]
    fn particles_retire_at_end_of_life() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut ps = ParticleSystem::new();
        ps.spawn(ParticleKind::FoodBurst, 0.0, 0.0, 5, &mut rng);
        for _ in 0..ParticleKind::FoodBurst.lifetime() - 1 {
            ps.advance();
        }
        assert_eq!(ps.len(), 5);
        ps.advance();
        assert!(ps.is_empty());
    }

    #[test]
    fn particles_move_each_frame() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut ps = ParticleSystem::new();
        ps.spawn(ParticleKind::Rainbow, 50.0, 50.0, 1, &mut rng);
        ps.advance();
        let p = ps.iter().next().unwrap();
        assert!((p.x - 50.0).abs() > f32::EPSILON || (p.y - 50.0).abs() > f32::EPSILON);
        assert_eq!(p.age, 1);
    }

    #[test]
    fn kinds_have_distinct_lifetimes() {
        assert!(ParticleKind::Rainbow.lifetime() > ParticleKind::FoodBurst.lifetime());
    }

    #[test]
    fn clear_empties_the_system() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut ps = ParticleSystem::new();
        ps.spawn(ParticleKind::Collision, 0.0, 0.0, 8, &mut rng);
        ps.clear();
        assert!(ps.is_empty());
    }
}
