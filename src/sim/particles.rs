//! Cosmetic particle bursts
//!
//! Particles never feed back into physics, collision or scoring.

use glam::Vec2;
use rand::Rng;

use crate::tuning::Tuning;

/// Which event emitted a particle (used for color lookup)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstKind {
    Flap,
    Score,
}

/// A particle for visual effects
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining lifetime in frames
    pub life: f32,
    pub kind: BurstKind,
}

impl Particle {
    /// Integrate, damp, age
    pub fn step(&mut self, damping: f32) {
        self.pos += self.vel;
        self.vel *= damping;
        self.life -= 1.0;
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

/// Append one burst of `tuning.burst_size` particles at `origin`
pub fn emit_burst<R: Rng>(
    particles: &mut Vec<Particle>,
    origin: Vec2,
    kind: BurstKind,
    tuning: &Tuning,
    rng: &mut R,
) {
    particles.reserve(tuning.burst_size);
    for _ in 0..tuning.burst_size {
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * tuning.particle_speed,
            (rng.random::<f32>() - 0.5) * tuning.particle_speed,
        );
        let life = tuning.particle_min_life + rng.random::<f32>() * tuning.particle_life_spread;
        particles.push(Particle {
            pos: origin,
            vel,
            life,
            kind,
        });
    }
}

/// Advance every particle one frame and drop the expired ones
pub fn update_particles(particles: &mut Vec<Particle>, damping: f32) {
    for particle in particles.iter_mut() {
        particle.step(damping);
    }
    particles.retain(Particle::is_alive);
}
